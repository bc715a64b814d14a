// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Flash device identity: guarded base-address lookup.
//!
//! A build targets exactly one physical flash controller for boot-relevant
//! storage; [`FlashDevice::base_address_of`] refuses every other identifier.

use serde::{Deserialize, Serialize};

use crate::error::MapError;

/// The byte value flash reads as after an erase, unless a board overrides it.
const ERASED_VALUE: u8 = 0xFF;

/// The single configured flash device backing all partitions.
///
/// Built once at startup from board configuration; read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlashDevice {
    id: u8,
    base_address: u32,
    erased_value: u8,
}

impl FlashDevice {
    pub const fn new(id: u8, base_address: u32) -> Self {
        Self {
            id,
            base_address,
            erased_value: ERASED_VALUE,
        }
    }

    /// Override the erased byte value for parts that erase to something
    /// other than `0xFF`.
    pub const fn with_erased_value(mut self, value: u8) -> Self {
        self.erased_value = value;
        self
    }

    pub const fn id(&self) -> u8 {
        self.id
    }

    /// Base address of the device identified by `device_id`.
    ///
    /// Succeeds only for the configured identifier; anything else fails with
    /// [`MapError::InvalidDevice`] rather than falling back to a different
    /// device's address.
    pub fn base_address_of(&self, device_id: u8) -> Result<u32, MapError> {
        if device_id != self.id {
            #[cfg(feature = "defmt")]
            defmt::error!("invalid flash device {}; expected {}", device_id, self.id);
            return Err(MapError::InvalidDevice);
        }
        Ok(self.base_address)
    }

    /// The byte value erased flash reads as on this device.
    pub const fn erased_value(&self) -> u8 {
        self.erased_value
    }
}
