//! Trigger scanning (verse pre-classification).
//!
//! This module inspects the verse once and produces a `BucketMask` of coarse
//! signals that let the scheduler skip whole detectors.
//!
//! ## Design notes
//!
//! - The scan is a superset test. False positives are fine because the
//!   detector still has to match at a position; a false negative would change
//!   the output and is a bug.
//! - Keep the scan cheap: one pass over the characters, no lookahead beyond
//!   the close-pair check, which needs both letters anywhere in the verse.

use super::compiled_rules::BucketMask;
use crate::rules::chars::{
    ALWAYS_SILENT, HA, HAMZAT_WASL, KAF, LAM, MADDAH_ABOVE, MEEM, NOON, QAF, QALQALAH_LETTERS, RA, SAJDAH, SHADDA,
    SILENT_UNLESS_STOP, CharClass, classify, is_alif_like, is_tanween,
};
use crate::rules::cursor::Verse;

/// Verse characteristics detected before the scan.
#[derive(Debug, Clone)]
pub struct TriggerInfo {
    pub buckets: BucketMask,
}

impl TriggerInfo {
    pub fn scan(verse: &Verse) -> Self {
        let mut buckets = BucketMask::empty();
        let (mut lam, mut ra, mut qaf, mut kaf) = (false, false, false, false);

        for &c in verse.chars() {
            match c {
                MADDAH_ABOVE => buckets |= BucketMask::HAS_MADDAH,
                ALWAYS_SILENT | SILENT_UNLESS_STOP => buckets |= BucketMask::HAS_SILENT_MARK,
                SHADDA => buckets |= BucketMask::HAS_SHADDA,
                NOON => buckets |= BucketMask::HAS_NASAL,
                MEEM => buckets |= BucketMask::HAS_MEEM,
                HA => buckets |= BucketMask::HAS_HA,
                SAJDAH => buckets |= BucketMask::HAS_SAJDAH,
                HAMZAT_WASL => buckets |= BucketMask::HAS_ALIF,
                LAM => lam = true,
                RA => ra = true,
                QAF => qaf = true,
                KAF => kaf = true,
                _ => {}
            }
            if is_alif_like(c) {
                buckets |= BucketMask::HAS_ALIF;
            }
            if is_tanween(c) {
                buckets |= BucketMask::HAS_NASAL;
            }
            if QALQALAH_LETTERS.contains(&c) {
                buckets |= BucketMask::HAS_QALQALAH;
            }
            let class = classify(c);
            if class.contains(CharClass::MARKER) {
                buckets |= BucketMask::HAS_MARKER;
            }
            if class.contains(CharClass::WAQF) {
                buckets |= BucketMask::HAS_WAQF;
            }
        }

        if (lam && ra) || (qaf && kaf) {
            buckets |= BucketMask::HAS_CLOSE_PAIR;
        }

        TriggerInfo { buckets }
    }
}
