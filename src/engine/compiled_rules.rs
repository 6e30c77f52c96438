//! Detector compilation and indexing.
//!
//! This module holds the *static* side of the engine: structures derived from
//! the full detector list that let a run skip detectors which cannot fire.
//!
//! An annotation run is split into two phases:
//!
//! 1. **Compile/index detectors** (this module): wrap the registry in a
//!    `CompiledDetectors` and index each detector by its coarse buckets.
//! 2. **Run** (see `scheduler.rs`): scan the verse for buckets (`trigger.rs`),
//!    select the active detectors, then walk the verse once.
//!
//! ## Extension points
//!
//! Adding a new bucket:
//!   1. Add a `BucketMask` bit and bump `BUCKET_COUNT`.
//!   2. Teach `TriggerInfo::scan` (in `trigger.rs`) to detect it.
//!
//! The index itself iterates over `BucketMask::all()`, so nothing else needs
//! to change.
//!
//! ## Invariants
//!
//! - `DetectorId` is an index into `CompiledDetectors::detectors` and
//!   `CompiledDetectors::metas`; both keep registry order.
//! - A bucket is a *necessary* condition: if a detector can fire anywhere in a
//!   verse, at least one of its buckets is present in that verse.

use crate::Detector;

/// Detector identifier (index into the registry, which is also its priority).
pub(crate) type DetectorId = usize;

bitflags::bitflags! {
    /// Coarse buckets for fast verse classification.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BucketMask: u32 {
        const HAS_MADDAH      = 1 << 0;
        const HAS_ALIF        = 1 << 1;
        const HAS_SILENT_MARK = 1 << 2;
        const HAS_CLOSE_PAIR  = 1 << 3;
        const HAS_QALQALAH    = 1 << 4;
        const HAS_NASAL       = 1 << 5;
        const HAS_SHADDA      = 1 << 6;
        const HAS_MEEM        = 1 << 7;
        const HAS_HA          = 1 << 8;
        const HAS_MARKER      = 1 << 9;
        const HAS_WAQF        = 1 << 10;
        const HAS_SAJDAH      = 1 << 11;
    }
}

pub const BUCKET_COUNT: usize = 12;

/// Metadata attached to a detector.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DetectorMeta {
    pub name: &'static str,
    pub buckets: BucketMask,
}

#[derive(Default, Debug)]
pub(crate) struct RuleIndex {
    pub always_on: Vec<DetectorId>,
    pub by_bucket: [Vec<DetectorId>; BUCKET_COUNT],
}

/// Pre-compiled detector set with metadata and indexes.
#[derive(Debug)]
pub(crate) struct CompiledDetectors<'a> {
    pub detectors: Vec<&'a Detector>,
    pub metas: Vec<DetectorMeta>,
    pub index: RuleIndex,
}

impl<'a> CompiledDetectors<'a> {
    pub fn new(detectors: &'a [Detector]) -> Self {
        let detectors: Vec<&Detector> = detectors.iter().collect();
        let metas: Vec<DetectorMeta> = detectors
            .iter()
            .map(|d| DetectorMeta { name: d.name, buckets: BucketMask::from_bits_truncate(d.buckets) })
            .collect();

        let mut index = RuleIndex::default();
        for (id, meta) in metas.iter().enumerate() {
            if meta.buckets.is_empty() {
                index.always_on.push(id);
                continue;
            }
            for (slot, bucket) in BucketMask::all().iter().enumerate() {
                if meta.buckets.contains(bucket) {
                    index.by_bucket[slot].push(id);
                }
            }
        }

        CompiledDetectors { detectors, metas, index }
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }
}
