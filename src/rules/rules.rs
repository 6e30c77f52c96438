use crate::Detector;
use crate::engine::BucketMask;

use crate::rules::{
    rules_article::{detect_hamzat_wasl, detect_orthographic_silent, detect_silent_alif_lam},
    rules_letters::{detect_ghunna, detect_mithlain, detect_mutaqaribain, detect_qalqalah},
    rules_madd::detect_madd,
    rules_marks::{detect_minor_mark, detect_sajdah, detect_waqf},
    rules_muqattaat::detect_muqattaat,
    rules_nun::detect_nun,
    rules_silat_ha::detect_silat_ha,
};

// Detectors

/// Disjoined opening letters (`الٓمٓ`), read at full length.
fn detector_muqattaat() -> Detector {
    detector! {
        name: "huruf-muqattaat",
        detect: detect_muqattaat,
        buckets: BucketMask::HAS_MADDAH.bits(),
    }
}

/// Alif and lam of the definite article.
fn detector_alif_lam() -> Detector {
    detector! {
        name: "silent-alif-lam",
        detect: detect_silent_alif_lam,
        buckets: BucketMask::HAS_ALIF.bits(),
    }
}

fn detector_hamzat_wasl() -> Detector {
    detector! {
        name: "silent-hamzat-wasl",
        detect: detect_hamzat_wasl,
        buckets: BucketMask::HAS_ALIF.bits(),
    }
}

/// Letters written but never read: small silent marks, the alif after
/// fathatan, the alif after a plural waw.
fn detector_orthographic() -> Detector {
    detector! {
        name: "silent-orthographic",
        detect: detect_orthographic_silent,
        buckets: BucketMask::HAS_ALIF.bits() | BucketMask::HAS_SILENT_MARK.bits(),
    }
}

fn detector_mutaqaribain() -> Detector {
    detector! {
        name: "idgham-mutaqaribain",
        detect: detect_mutaqaribain,
        buckets: BucketMask::HAS_CLOSE_PAIR.bits(),
    }
}

/// Any voweled letter may carry a madd, so this one is never gated.
fn detector_madd() -> Detector {
    detector! {
        name: "madd",
        detect: detect_madd,
    }
}

fn detector_qalqalah() -> Detector {
    detector! {
        name: "qalqalah",
        detect: detect_qalqalah,
        buckets: BucketMask::HAS_QALQALAH.bits(),
    }
}

fn detector_nun() -> Detector {
    detector! {
        name: "noon-sakinah-tanween",
        detect: detect_nun,
        buckets: BucketMask::HAS_NASAL.bits(),
    }
}

fn detector_ghunna() -> Detector {
    detector! {
        name: "ghunna",
        detect: detect_ghunna,
        buckets: BucketMask::HAS_SHADDA.bits(),
    }
}

fn detector_mithlain() -> Detector {
    detector! {
        name: "idgham-mithlain",
        detect: detect_mithlain,
        buckets: BucketMask::HAS_MEEM.bits(),
    }
}

fn detector_silat_ha() -> Detector {
    detector! {
        name: "silat-ha",
        detect: detect_silat_ha,
        buckets: BucketMask::HAS_HA.bits(),
    }
}

fn detector_minor_marks() -> Detector {
    detector! {
        name: "minor-marks",
        detect: detect_minor_mark,
        buckets: BucketMask::HAS_MARKER.bits(),
    }
}

fn detector_waqf() -> Detector {
    detector! {
        name: "waqf",
        detect: detect_waqf,
        buckets: BucketMask::HAS_WAQF.bits(),
    }
}

fn detector_sajdah() -> Detector {
    detector! {
        name: "sajdah",
        detect: detect_sajdah,
        buckets: BucketMask::HAS_SAJDAH.bits(),
    }
}

/// All detectors, highest priority first. At each unclaimed position the
/// scheduler takes the first proposal in this order.
pub fn get() -> Vec<Detector> {
    vec![
        detector_muqattaat(),
        detector_alif_lam(),
        detector_hamzat_wasl(),
        detector_orthographic(),
        detector_mutaqaribain(),
        detector_madd(),
        detector_qalqalah(),
        detector_nun(),
        detector_ghunna(),
        detector_mithlain(),
        detector_silat_ha(),
        detector_minor_marks(),
        detector_waqf(),
        detector_sajdah(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_order_is_fixed() {
        let names: Vec<&str> = get().iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            [
                "huruf-muqattaat",
                "silent-alif-lam",
                "silent-hamzat-wasl",
                "silent-orthographic",
                "idgham-mutaqaribain",
                "madd",
                "qalqalah",
                "noon-sakinah-tanween",
                "ghunna",
                "idgham-mithlain",
                "silat-ha",
                "minor-marks",
                "waqf",
                "sajdah",
            ]
        );
    }

    #[test]
    fn only_madd_is_always_on() {
        let always: Vec<&str> = get().iter().filter(|d| d.buckets == 0).map(|d| d.name).collect();
        assert_eq!(always, ["madd"]);
    }
}
