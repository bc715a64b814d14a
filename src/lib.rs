// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Partition and sector resolution for a bootloader's flash layer.
//!
//! Given a firmware image index and a slot role, this crate resolves the
//! identifier of the physical flash partition backing it; given a byte
//! offset inside a partition, it resolves the erase-sector boundaries that
//! contain it. It performs no flash I/O itself: the flash driver is reached
//! only through the [`FlashGeometry`] trait, and everything else is pure
//! lookup over configuration established once at startup.
//!
//! This crate supports both `no_std` (embedded) and `std` (host) environments:
//! - Default: `no_std` mode for embedded targets
//! - `std` feature: `std::error::Error` interop for host tools
//! - `direct-upload` feature: upload-protocol slot mapping
//! - `defmt` feature: deferred-format derives and error-path logging

#![cfg_attr(not(feature = "std"), no_std)]

pub mod device;
pub mod error;
pub mod geometry;
pub mod map;
pub mod partition;

// Re-export commonly used types
pub use device::FlashDevice;
pub use error::{LayoutError, MapError};
pub use geometry::{page_containing, sector_containing, FlashGeometry, Page};
pub use map::{FlashMap, OverrideHook, MAX_OVERRIDE_HOOKS};
pub use partition::{ImageSlots, Partition, PartitionId, Sector, Slot};
