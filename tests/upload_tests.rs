// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Unit tests for the direct-upload slot mapping (feature `direct-upload`).

use bootmap::{
    FlashDevice, FlashMap, ImageSlots, LayoutError, MapError, Partition, PartitionId, Slot,
};

const DEVICE_ID: u8 = 7;

// Image slots plus one upload-only staging partition (id 5).
const PARTITIONS: [Partition; 3] = [
    Partition::new(1, DEVICE_ID, 0x0001_0000, 0x0006_0000),
    Partition::new(2, DEVICE_ID, 0x0007_0000, 0x0006_0000),
    Partition::new(5, DEVICE_ID, 0x000D_0000, 0x0002_0000),
];

const IMAGES: [ImageSlots; 1] = [ImageSlots {
    primary: 1,
    secondary: Some(2),
}];

// Upload slots 0 and 1 both stage into the primary partition; slot 2 targets
// the optional staging partition; slot 3 was not compiled into this build.
const UPLOAD_SLOTS: [Option<PartitionId>; 4] = [Some(1), Some(1), Some(5), None];

fn make_map<'a>() -> FlashMap<'a> {
    FlashMap::new(FlashDevice::new(DEVICE_ID, 0x1000_0000), &PARTITIONS, &IMAGES)
        .unwrap()
        .with_upload_slots(&UPLOAD_SLOTS)
        .unwrap()
}

// =============================================================================
// Upload slot resolution
// =============================================================================

#[test]
fn test_upload_slots_alias_primary_partition() {
    let map = make_map();
    assert_eq!(map.upload_partition_id(0), Ok(1));
    assert_eq!(map.upload_partition_id(1), Ok(1));
}

#[test]
fn test_upload_slot_maps_to_optional_partition() {
    let map = make_map();
    assert_eq!(map.upload_partition_id(2), Ok(5));
}

#[test]
fn test_upload_slot_not_compiled_in_fails() {
    let map = make_map();
    // A hole in the table and a slot past the table both fail the same way
    assert_eq!(map.upload_partition_id(3), Err(MapError::InvalidSlot));
    assert_eq!(map.upload_partition_id(9), Err(MapError::InvalidSlot));
}

#[test]
fn test_upload_mapping_is_independent_of_image_indexing() {
    let map = make_map();
    // Partition 5 is reachable through the upload scheme only
    assert_eq!(map.partition_id(0, Slot::Primary), Ok(1));
    assert_eq!(map.slot_of(0, 5), Err(MapError::InvalidPartition));
    assert_eq!(map.upload_partition_id(2), Ok(5));
}

#[test]
fn test_empty_table_rejects_every_slot() {
    let map = FlashMap::new(FlashDevice::new(DEVICE_ID, 0), &PARTITIONS, &IMAGES).unwrap();
    assert_eq!(map.upload_partition_id(0), Err(MapError::InvalidSlot));
}

// =============================================================================
// Configuration-time validation
// =============================================================================

#[test]
fn test_dangling_upload_reference_fails_fast() {
    let table: [Option<PartitionId>; 1] = [Some(42)];
    let err = FlashMap::new(FlashDevice::new(DEVICE_ID, 0), &PARTITIONS, &IMAGES)
        .unwrap()
        .with_upload_slots(&table)
        .unwrap_err();
    assert_eq!(err, LayoutError::UnknownPartition(42));
}

#[test]
fn test_resolved_upload_partition_is_openable() {
    let map = make_map();
    let id = map.upload_partition_id(2).unwrap();
    let partition = map.partition(id).unwrap();
    assert_eq!(partition.id, 5);
    assert_eq!(partition.size, 0x0002_0000);
}
