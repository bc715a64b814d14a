// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Sector geometry: erase-unit lookup and offset-frame conversion.
//!
//! The flash driver answers page queries in the device-absolute frame;
//! callers erasing or writing inside a partition work partition-relative.
//! [`sector_containing`] converts between the two, [`page_containing`]
//! stays in the device frame for callers that only have a device-level view.

use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::partition::{Partition, Sector};

/// A physical erase unit in the device-absolute address frame, as reported
/// by the flash driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Page {
    pub offset: u32,
    pub size: u32,
}

/// Erase-unit geometry queries, implemented by the flash driver.
///
/// Queries are synchronous and short; serialization of concurrent access to
/// the actual hardware is the driver's concern, not this crate's.
pub trait FlashGeometry {
    /// The erase page containing the device-absolute `offset`.
    ///
    /// Driver failures are reported as [`MapError::Device`] and propagate
    /// verbatim through the resolvers.
    fn page_at(&self, offset: u32) -> Result<Page, MapError>;
}

/// Resolve the erase sector containing `offset` within `partition`.
///
/// `offset` is partition-relative and must satisfy `offset < partition.size`;
/// violations fail with [`MapError::OutOfRange`]. On success the returned
/// sector satisfies `sector.offset <= offset < sector.offset + sector.size`.
pub fn sector_containing(
    geom: &impl FlashGeometry,
    partition: &Partition,
    offset: u32,
) -> Result<Sector, MapError> {
    if offset >= partition.size {
        return Err(MapError::OutOfRange);
    }

    let absolute = partition
        .offset
        .checked_add(offset)
        .ok_or(MapError::OutOfRange)?;
    let page = geom.page_at(absolute)?;

    // A page starting below the partition base has no partition-relative
    // representation; partitions must be aligned to erase units.
    let relative = page
        .offset
        .checked_sub(partition.offset)
        .ok_or(MapError::OutOfRange)?;

    Ok(Sector {
        offset: relative,
        size: page.size,
    })
}

/// Resolve the erase page containing a device-absolute `offset`.
///
/// Boundaries stay in the device frame; used when only a device-level view
/// is available.
pub fn page_containing(geom: &impl FlashGeometry, offset: u32) -> Result<Page, MapError> {
    geom.page_at(offset)
}
