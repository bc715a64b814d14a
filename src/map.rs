// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Slot-to-partition resolution over a validated static flash layout.
//!
//! A [`FlashMap`] is built once during initialization from board-supplied
//! configuration, validated eagerly so a broken layout fails fast, and then
//! shared immutably; every resolver takes `&self` and mutates nothing, so
//! concurrent callers need no coordination.

use core::fmt;

use heapless::Vec;

use crate::device::FlashDevice;
use crate::error::{LayoutError, MapError};
use crate::partition::{ImageSlots, Partition, PartitionId, Slot};

/// Capacity of the override hook chain.
pub const MAX_OVERRIDE_HOOKS: usize = 4;

/// Board/application-supplied resolver allowed to intercept the default
/// slot-to-partition mapping.
///
/// Hooks are consulted in registration order on forward resolution only;
/// reverse lookups always reflect the canonical layout.
pub trait OverrideHook {
    /// Intercept a forward slot resolution.
    ///
    /// `None` declines and passes the request on; `Some(Ok(id))` resolves it
    /// and short-circuits the rest of the chain; `Some(Err(e))` fails it
    /// outright. A declining chain is not success — the default rule runs.
    fn try_resolve(&self, image_index: u8, slot: Slot) -> Option<Result<PartitionId, MapError>>;
}

/// The validated flash layout: one device, the static partition table, the
/// per-image slot assignments, and the registered override hooks.
pub struct FlashMap<'a> {
    device: FlashDevice,
    partitions: &'a [Partition],
    images: &'a [ImageSlots],
    #[cfg(feature = "direct-upload")]
    upload_slots: &'a [Option<PartitionId>],
    hooks: Vec<&'a dyn OverrideHook, MAX_OVERRIDE_HOOKS>,
}

impl fmt::Debug for FlashMap<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("FlashMap");
        s.field("device", &self.device)
            .field("partitions", &self.partitions)
            .field("images", &self.images);
        #[cfg(feature = "direct-upload")]
        s.field("upload_slots", &self.upload_slots);
        s.field("hooks", &self.hooks.len()).finish()
    }
}

impl<'a> FlashMap<'a> {
    /// Build and validate a flash map from static board configuration.
    ///
    /// Validation covers the whole invariant set: partitions carry the
    /// configured device identifier, have nonzero size, do not collide by
    /// identifier or overlap by address range, and every slot assignment
    /// references a declared partition exactly once across all images.
    pub fn new(
        device: FlashDevice,
        partitions: &'a [Partition],
        images: &'a [ImageSlots],
    ) -> Result<Self, LayoutError> {
        for (i, p) in partitions.iter().enumerate() {
            if p.size == 0 {
                return Err(LayoutError::EmptyPartition(p.id));
            }
            if p.device_id != device.id() {
                return Err(LayoutError::DeviceMismatch(p.id));
            }
            for q in &partitions[..i] {
                if q.id == p.id {
                    return Err(LayoutError::DuplicateId(p.id));
                }
                if (p.offset as u64) < q.end() && (q.offset as u64) < p.end() {
                    return Err(LayoutError::Overlap(q.id, p.id));
                }
            }
        }

        for (i, image) in images.iter().enumerate() {
            if image.secondary == Some(image.primary) {
                return Err(LayoutError::SharedSlot(image.primary));
            }
            for id in image.slot_ids() {
                if lookup(partitions, id).is_none() {
                    return Err(LayoutError::UnknownPartition(id));
                }
                if images[..i]
                    .iter()
                    .any(|other| other.slot_ids().any(|o| o == id))
                {
                    return Err(LayoutError::SharedSlot(id));
                }
            }
        }

        Ok(Self {
            device,
            partitions,
            images,
            #[cfg(feature = "direct-upload")]
            upload_slots: &[],
            hooks: Vec::new(),
        })
    }

    /// Install the upload-protocol slot table, a sparse mapping indexed by
    /// upload slot number.
    ///
    /// Which slots exist is a build-time fact: every entry is checked
    /// against the partition table here, not discovered at call time.
    #[cfg(feature = "direct-upload")]
    pub fn with_upload_slots(
        mut self,
        upload_slots: &'a [Option<PartitionId>],
    ) -> Result<Self, LayoutError> {
        for id in upload_slots.iter().flatten() {
            if lookup(self.partitions, *id).is_none() {
                return Err(LayoutError::UnknownPartition(*id));
            }
        }
        self.upload_slots = upload_slots;
        Ok(self)
    }

    /// Append an override hook to the chain.
    ///
    /// Registration happens during single-threaded initialization, before
    /// the map is shared.
    pub fn register_hook(&mut self, hook: &'a dyn OverrideHook) -> Result<(), LayoutError> {
        self.hooks.push(hook).map_err(|_| LayoutError::HookCapacity)
    }

    /// The configured flash device.
    pub const fn device(&self) -> &FlashDevice {
        &self.device
    }

    /// Look up a partition record by identifier.
    pub fn partition(&self, id: PartitionId) -> Result<&Partition, MapError> {
        lookup(self.partitions, id).ok_or(MapError::InvalidPartition)
    }

    /// Resolve `(image_index, slot)` to a partition identifier.
    ///
    /// The override hook chain runs first; if every hook declines, the
    /// static per-image assignment applies. Unknown image indices and
    /// SECONDARY requests against a single-slot image fail with
    /// [`MapError::InvalidSlot`].
    pub fn partition_id(&self, image_index: u8, slot: Slot) -> Result<PartitionId, MapError> {
        for hook in &self.hooks {
            if let Some(resolved) = hook.try_resolve(image_index, slot) {
                return resolved;
            }
        }

        let image = self
            .images
            .get(usize::from(image_index))
            .ok_or(MapError::InvalidSlot)?;
        match slot {
            Slot::Primary => Ok(image.primary),
            Slot::Secondary => image.secondary.ok_or(MapError::InvalidSlot),
        }
    }

    /// Single-image convenience: resolve a slot of image 0.
    pub fn single_image_partition_id(&self, slot: Slot) -> Result<PartitionId, MapError> {
        self.partition_id(0, slot)
    }

    /// Map a partition identifier back to the slot role it plays for
    /// `image_index`.
    ///
    /// This is the pure inverse of the default forward rule; override hooks
    /// are never consulted, so diagnostics reflect the canonical layout.
    pub fn slot_of(&self, image_index: u8, partition_id: PartitionId) -> Result<Slot, MapError> {
        let image = self
            .images
            .get(usize::from(image_index))
            .ok_or(MapError::InvalidPartition)?;

        if partition_id == image.primary {
            return Ok(Slot::Primary);
        }
        if image.secondary == Some(partition_id) {
            return Ok(Slot::Secondary);
        }

        #[cfg(feature = "defmt")]
        defmt::error!(
            "partition {} is not a slot of image {}",
            partition_id,
            image_index
        );
        Err(MapError::InvalidPartition)
    }

    /// Map an upload-protocol slot number to a partition identifier,
    /// independent of the image-index scheme.
    ///
    /// Slot numbers beyond the table, or whose partition was not compiled
    /// into this build, fail with [`MapError::InvalidSlot`].
    #[cfg(feature = "direct-upload")]
    pub fn upload_partition_id(&self, upload_slot: u8) -> Result<PartitionId, MapError> {
        self.upload_slots
            .get(usize::from(upload_slot))
            .copied()
            .flatten()
            .ok_or(MapError::InvalidSlot)
    }
}

fn lookup(partitions: &[Partition], id: PartitionId) -> Option<&Partition> {
    partitions.iter().find(|p| p.id == id)
}
