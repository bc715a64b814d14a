// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Error types for slot resolution, geometry queries, and layout validation.

use core::fmt;

use crate::partition::PartitionId;

/// Errors returned by resolution and geometry operations.
///
/// Every error is surfaced verbatim to the caller. Nothing at this layer
/// retries, recovers, or falls back to a different device or partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MapError {
    /// Requested device identifier does not match the configured flash device.
    InvalidDevice,
    /// Unrecognized image index, a role not supported by this configuration,
    /// or an unmapped upload slot number.
    InvalidSlot,
    /// No partition matches the given identifier.
    InvalidPartition,
    /// Offset outside the partition bounds.
    OutOfRange,
    /// The underlying flash driver failed a geometry query.
    Device,
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::InvalidDevice => write!(f, "invalid flash device"),
            MapError::InvalidSlot => write!(f, "invalid slot"),
            MapError::InvalidPartition => write!(f, "invalid partition"),
            MapError::OutOfRange => write!(f, "offset out of range"),
            MapError::Device => write!(f, "flash driver error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MapError {}

/// Static layout problems caught while building a [`FlashMap`](crate::FlashMap).
///
/// These indicate a broken board configuration, not a runtime condition;
/// callers are expected to treat them as fatal during initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutError {
    /// Two partitions share an identifier.
    DuplicateId(PartitionId),
    /// Partition declared with size zero.
    EmptyPartition(PartitionId),
    /// Partition belongs to a device other than the configured one.
    DeviceMismatch(PartitionId),
    /// Two partitions overlap in the device address space.
    Overlap(PartitionId, PartitionId),
    /// A slot or upload-slot entry references an undeclared partition.
    UnknownPartition(PartitionId),
    /// A partition is assigned to more than one slot.
    SharedSlot(PartitionId),
    /// The override hook chain is full.
    HookCapacity,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::DuplicateId(id) => write!(f, "duplicate partition id {id}"),
            LayoutError::EmptyPartition(id) => write!(f, "partition {id} has size zero"),
            LayoutError::DeviceMismatch(id) => {
                write!(f, "partition {id} is on an unconfigured device")
            }
            LayoutError::Overlap(a, b) => write!(f, "partitions {a} and {b} overlap"),
            LayoutError::UnknownPartition(id) => {
                write!(f, "reference to undeclared partition {id}")
            }
            LayoutError::SharedSlot(id) => {
                write!(f, "partition {id} is assigned to more than one slot")
            }
            LayoutError::HookCapacity => write!(f, "override hook chain is full"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LayoutError {}
