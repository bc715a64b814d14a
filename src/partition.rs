// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Shared data model: partitions, sectors, and slot roles.

use serde::{Deserialize, Serialize};

use crate::error::MapError;

/// Opaque identifier of a fixed flash partition.
///
/// Callers obtain identifiers from the resolvers and never construct them
/// by other means.
pub type PartitionId = u8;

/// A named, fixed, contiguous region of physical flash.
///
/// Partitions are enumerated at build/configuration time and are immutable;
/// `offset` and `size` are in the device-absolute address frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Partition {
    pub id: PartitionId,
    pub device_id: u8,
    pub offset: u32,
    pub size: u32,
}

impl Partition {
    pub const fn new(id: PartitionId, device_id: u8, offset: u32, size: u32) -> Self {
        Self {
            id,
            device_id,
            offset,
            size,
        }
    }

    /// One past the last device-absolute address of this partition.
    pub const fn end(&self) -> u64 {
        self.offset as u64 + self.size as u64
    }
}

/// A physical erase unit, expressed relative to its partition's base.
///
/// Derived on demand from the flash driver's page table, never stored.
/// Invariant: `offset + size <= partition.size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sector {
    pub offset: u32,
    pub size: u32,
}

/// Logical role a partition plays for a firmware image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Slot {
    /// The slot an image executes from.
    Primary,
    /// The staging slot holding a pending update.
    Secondary,
}

impl Slot {
    /// Wire numbering used by update protocols: primary = 0, secondary = 1.
    pub const fn index(self) -> u8 {
        match self {
            Slot::Primary => 0,
            Slot::Secondary => 1,
        }
    }
}

impl TryFrom<u8> for Slot {
    type Error = MapError;

    /// Convert a raw protocol slot number. Anything other than 0 or 1 is
    /// not a slot role and fails with [`MapError::InvalidSlot`].
    fn try_from(raw: u8) -> Result<Self, MapError> {
        match raw {
            0 => Ok(Slot::Primary),
            1 => Ok(Slot::Secondary),
            _ => Err(MapError::InvalidSlot),
        }
    }
}

/// Static slot assignment for one firmware image.
///
/// A single-application-slot build sets `secondary` to `None`, which
/// disables SECONDARY resolution for the image entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImageSlots {
    pub primary: PartitionId,
    pub secondary: Option<PartitionId>,
}

impl ImageSlots {
    /// Partition identifiers assigned to this image, primary first.
    pub fn slot_ids(&self) -> impl Iterator<Item = PartitionId> {
        core::iter::once(self.primary).chain(self.secondary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_from_protocol_numbering() {
        assert_eq!(Slot::try_from(0), Ok(Slot::Primary));
        assert_eq!(Slot::try_from(1), Ok(Slot::Secondary));
    }

    #[test]
    fn test_slot_from_unknown_number_fails() {
        assert_eq!(Slot::try_from(2), Err(MapError::InvalidSlot));
        assert_eq!(Slot::try_from(255), Err(MapError::InvalidSlot));
    }

    #[test]
    fn test_slot_index_round_trip() {
        assert_eq!(Slot::try_from(Slot::Primary.index()), Ok(Slot::Primary));
        assert_eq!(Slot::try_from(Slot::Secondary.index()), Ok(Slot::Secondary));
    }

    #[test]
    fn test_partition_end() {
        let p = Partition::new(3, 0, 0x1000, 0x2000);
        assert_eq!(p.end(), 0x3000);
    }

    #[test]
    fn test_partition_end_does_not_wrap() {
        let p = Partition::new(3, 0, 0xFFFF_F000, 0x2000);
        assert_eq!(p.end(), 0x1_0000_1000);
    }

    #[test]
    fn test_slot_ids_with_secondary() {
        let image = ImageSlots {
            primary: 1,
            secondary: Some(2),
        };
        let ids: [Option<PartitionId>; 3] = {
            let mut it = image.slot_ids();
            [it.next(), it.next(), it.next()]
        };
        assert_eq!(ids, [Some(1), Some(2), None]);
    }

    #[test]
    fn test_slot_ids_single_slot() {
        let image = ImageSlots {
            primary: 1,
            secondary: None,
        };
        let mut it = image.slot_ids();
        assert_eq!(it.next(), Some(1));
        assert_eq!(it.next(), None);
    }
}
