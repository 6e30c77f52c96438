//! Span resolution.
//!
//! The scan records annotations in the order detectors fire, and a retroactive
//! relabel can land before annotations already recorded. Resolution turns that
//! list into the output contract:
//!
//! ```text
//! raw annotations ──▶ stable sort by start ──▶ drop start < cursor ──▶ disjoint
//! ```
//!
//! Ties on `start` keep recording order, so the earlier (higher priority)
//! annotation wins. Zero-length annotations do not advance the cursor.

use crate::Annotation;
use tracing::debug;

/// Sort by start and drop every annotation that begins inside one already kept.
///
/// Returns the kept annotations and the number dropped.
pub(crate) fn resolve(mut annotations: Vec<Annotation>) -> (Vec<Annotation>, usize) {
    annotations.sort_by_key(|a| a.start);

    let mut kept = Vec::with_capacity(annotations.len());
    let mut cursor = 0;
    let mut dropped = 0;
    for a in annotations {
        if a.start < cursor {
            debug!(start = a.start, length = a.length, kind = a.kind.name(), cursor, "dropping overlapped span");
            dropped += 1;
            continue;
        }
        cursor = a.end();
        kept.push(a);
    }
    (kept, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuleKind;

    #[test]
    fn sorts_and_drops_overlaps() {
        let raw = vec![
            Annotation::new(5, 2, RuleKind::Qalqalah),
            Annotation::new(0, 3, RuleKind::MaddAsli),
            Annotation::new(2, 2, RuleKind::Ikhfa),
            Annotation::new(3, 1, RuleKind::Ghunna),
        ];
        let (spans, dropped) = resolve(raw);
        assert_eq!(
            spans,
            vec![
                Annotation::new(0, 3, RuleKind::MaddAsli),
                Annotation::new(3, 1, RuleKind::Ghunna),
                Annotation::new(5, 2, RuleKind::Qalqalah),
            ]
        );
        assert_eq!(dropped, 1);
    }

    #[test]
    fn equal_starts_keep_the_first_recorded() {
        let raw = vec![Annotation::new(1, 2, RuleKind::Qasr), Annotation::new(1, 1, RuleKind::MaddAsli)];
        assert_eq!(resolve(raw).0, vec![Annotation::new(1, 2, RuleKind::Qasr)]);
    }

    #[test]
    fn zero_length_spans_do_not_block() {
        let raw = vec![Annotation::new(2, 0, RuleKind::Ghunna), Annotation::new(2, 2, RuleKind::IdghamBiGhunna)];
        let (spans, dropped) = resolve(raw);
        assert_eq!(spans.len(), 2);
        assert_eq!(dropped, 0);
    }

    #[test]
    fn empty_input() {
        assert_eq!(resolve(Vec::new()), (Vec::new(), 0));
    }
}
