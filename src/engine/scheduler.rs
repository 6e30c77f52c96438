//! The annotation scan.
//!
//! This module is the operational core of the engine:
//!
//! - Select the detectors that can possibly fire on the verse (bucket gating;
//!   see `compiled_rules.rs` and `trigger.rs`).
//! - Walk the verse once, left to right. At every position nobody has claimed
//!   yet, consult the active detectors in priority order and record the first
//!   proposal.
//! - Resolve the recorded annotations into a sorted, disjoint list (see
//!   `resolve.rs`).
//!
//! ## Pass structure
//!
//! ```text
//! (0) trigger scan   -> buckets -> active detector ids (priority order)
//! (1) single pass    -> accepted annotations + marked positions
//! (2) resolve        -> sorted, non-overlapping Vec<Annotation>
//! ```
//!
//! ## Claims
//!
//! Accepting a proposal marks every position its annotations cover; marked
//! positions are skipped by the rest of the pass. A zero-length annotation
//! marks nothing. A *retroactive* proposal first cuts every accepted
//! annotation that overlaps its primary range back to the part before that
//! range (dropping it when nothing is left) and frees the positions cut off.
//!
//! The accepted list and the marked set are locals of [`Scheduler::scan`], so
//! concurrent runs share nothing.

use super::compiled_rules::{BucketMask, CompiledDetectors, DetectorId};
use super::metrics::{RawClaim, RunMetrics, RunResult, ScanMetrics};
use super::resolve::resolve;
use super::trigger::TriggerInfo;
use crate::rules::cursor::Verse;
use crate::{Annotation, Detector};
use std::collections::BTreeSet;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Scheduler runs a detector registry over one verse.
///
/// Usage: create with `Scheduler::new(&verse, &detectors)` then call `run()`.
#[derive(Debug)]
pub(crate) struct Scheduler<'a> {
    verse: &'a Verse,
    compiled: CompiledDetectors<'a>,
    /// Active detectors; ordered iteration preserves registry priority.
    active: BTreeSet<DetectorId>,
    trigger_time: Duration,
}

impl<'a> Scheduler<'a> {
    /// Create a new `Scheduler` for `verse` using pre-compiled detectors.
    pub fn new_compiled(verse: &'a Verse, compiled: CompiledDetectors<'a>) -> Self {
        let start = Instant::now();
        let trigger_info = TriggerInfo::scan(verse);
        debug!(buckets = ?trigger_info.buckets, "trigger scan");

        let mut active: BTreeSet<DetectorId> = compiled.index.always_on.iter().copied().collect();
        for (slot, bucket) in BucketMask::all().iter().enumerate() {
            if trigger_info.buckets.contains(bucket) {
                active.extend(&compiled.index.by_bucket[slot]);
            }
        }
        debug!(active = active.len(), total = compiled.len(), "active detectors");

        Scheduler { verse, compiled, active, trigger_time: start.elapsed() }
    }

    pub fn new(verse: &'a Verse, detectors: &'a [Detector]) -> Self {
        Self::new_compiled(verse, CompiledDetectors::new(detectors))
    }

    /// Every detector active regardless of buckets.
    #[cfg(test)]
    pub(crate) fn ungated(verse: &'a Verse, detectors: &'a [Detector]) -> Self {
        let compiled = CompiledDetectors::new(detectors);
        let active = (0..compiled.len()).collect();
        Scheduler { verse, compiled, active, trigger_time: Duration::ZERO }
    }

    /// Names of the detectors that survived gating, in priority order.
    pub(crate) fn active_detector_names(&self) -> Vec<&'static str> {
        self.active.iter().map(|&id| self.compiled.metas[id].name).collect()
    }

    /// The single left-to-right pass.
    ///
    /// Returns every recorded claim (including ones later retracted), the
    /// accepted annotations in recording order, and scan counters.
    fn scan(&self) -> (Vec<RawClaim>, Vec<Annotation>, ScanMetrics) {
        let start = Instant::now();
        let len = self.verse.len();
        let mut marked = vec![false; len];
        let mut accepted: Vec<Annotation> = Vec::new();
        let mut raw: Vec<RawClaim> = Vec::new();
        let mut hits = vec![0usize; self.compiled.len()];
        let mut retractions = 0;

        let set = |marked: &mut [bool], a: &Annotation, value: bool| {
            for slot in marked.iter_mut().take(a.end().min(len)).skip(a.start) {
                *slot = value;
            }
        };

        for i in 0..len {
            if marked[i] {
                continue;
            }
            let Some((id, proposal)) =
                self.active.iter().find_map(|&id| (self.compiled.detectors[id].detect)(self.verse, i).map(|p| (id, p)))
            else {
                continue;
            };
            let name = self.compiled.metas[id].name;

            if proposal.retroactive {
                let relabel = proposal.primary;
                let mut kept = Vec::with_capacity(accepted.len());
                for a in accepted.drain(..) {
                    if !a.overlaps(&relabel) {
                        kept.push(a);
                        continue;
                    }
                    trace!(start = a.start, length = a.length, kind = a.kind.name(), by = name, "retracting");
                    set(&mut marked, &a, false);
                    retractions += 1;
                    if a.start < relabel.start {
                        let head = Annotation::spanning(a.start, relabel.start, a.kind);
                        set(&mut marked, &head, true);
                        kept.push(head);
                    }
                }
                accepted = kept;
            }

            for a in std::iter::once(proposal.primary).chain(proposal.hidden) {
                trace!(at = i, start = a.start, length = a.length, kind = a.kind.name(), detector = name, "accept");
                set(&mut marked, &a, true);
                accepted.push(a);
                raw.push(RawClaim { annotation: a, detector: name });
            }
            hits[id] += 1;
        }

        let hits = self.active.iter().map(|&id| (self.compiled.metas[id].name, hits[id])).collect();
        let metrics = ScanMetrics { duration: start.elapsed(), hits, proposals: raw.len(), retractions };
        (raw, accepted, metrics)
    }

    /// Run the scan and resolution, returning timing details.
    pub fn run_with_metrics(self) -> RunResult {
        let total_start = Instant::now();
        let (raw, accepted, scan) = self.scan();
        let resolve_start = Instant::now();
        let (spans, dropped) = resolve(accepted);
        let resolve = resolve_start.elapsed();
        let total = total_start.elapsed() + self.trigger_time;

        RunResult { raw, spans, dropped, metrics: RunMetrics { total, trigger: self.trigger_time, scan, resolve } }
    }

    /// Convenience wrapper that discards timing details.
    pub fn run(self) -> Vec<Annotation> {
        self.run_with_metrics().spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Proposal, RuleKind};

    fn claim_everything(v: &Verse, i: usize) -> Option<Proposal> {
        (v.at(i) != ' ').then(|| Proposal::span(i, (i + 2).min(v.len()), RuleKind::MaddAsli))
    }

    fn relabel_on_bang(v: &Verse, i: usize) -> Option<Proposal> {
        (v.at(i) == '!').then(|| {
            Proposal::span(i - 1, i, RuleKind::Qasr)
                .with_hidden(Annotation::new(i, 1, RuleKind::HiddenMarker))
                .retroactive()
        })
    }

    fn claim_c(v: &Verse, i: usize) -> Option<Proposal> {
        (v.at(i) == 'c').then(|| Proposal::span(i, i + 1, RuleKind::Ikhfa))
    }

    fn zero_width(v: &Verse, i: usize) -> Option<Proposal> {
        (v.at(i) == '*').then(|| Proposal::at(i, 0, RuleKind::Ghunna))
    }

    #[test]
    fn first_detector_wins_and_claims_positions() {
        let detectors = vec![detector! { name: "pairs", detect: claim_everything }];
        let verse = Verse::new("abcde");
        let spans = Scheduler::new(&verse, &detectors).run();
        assert_eq!(
            spans,
            vec![
                Annotation::new(0, 2, RuleKind::MaddAsli),
                Annotation::new(2, 2, RuleKind::MaddAsli),
                Annotation::new(4, 1, RuleKind::MaddAsli),
            ]
        );
    }

    #[test]
    fn priority_follows_registry_order() {
        let detectors =
            vec![detector! { name: "zero", detect: zero_width }, detector! { name: "pairs", detect: claim_everything }];
        let verse = Verse::new("*ab");
        let result = Scheduler::new(&verse, &detectors).run_with_metrics();
        assert_eq!(result.spans[0], Annotation::new(0, 0, RuleKind::Ghunna));
        // position 0 stays unmarked but the scan has moved on
        assert_eq!(result.spans[1], Annotation::new(1, 2, RuleKind::MaddAsli));
        assert_eq!(result.metrics.scan.hits, vec![("zero", 1), ("pairs", 1)]);
    }

    #[test]
    fn retroactive_proposal_trims_earlier_claim() {
        let detectors = vec![
            detector! { name: "relabel", detect: relabel_on_bang },
            detector! { name: "pairs", detect: claim_everything },
        ];
        // "ab" is claimed at 0; "!" at 2 is unmarked and relabels "b"
        let verse = Verse::new("ab!c");
        let result = Scheduler::new(&verse, &detectors).run_with_metrics();
        assert_eq!(
            result.spans,
            vec![
                Annotation::new(0, 1, RuleKind::MaddAsli),
                Annotation::new(1, 1, RuleKind::Qasr),
                Annotation::new(2, 1, RuleKind::HiddenMarker),
                Annotation::new(3, 1, RuleKind::MaddAsli),
            ]
        );
        assert_eq!(result.metrics.scan.retractions, 1);
        assert_eq!(result.raw.len(), 4);
    }

    #[test]
    fn retroactive_proposal_drops_a_claim_it_fully_covers() {
        let detectors = vec![
            detector! { name: "relabel", detect: relabel_on_bang },
            detector! { name: "single", detect: claim_c },
        ];
        let verse = Verse::new("c!");
        let result = Scheduler::new(&verse, &detectors).run_with_metrics();
        assert_eq!(
            result.spans,
            vec![Annotation::new(0, 1, RuleKind::Qasr), Annotation::new(1, 1, RuleKind::HiddenMarker)]
        );
        assert_eq!(result.metrics.scan.retractions, 1);
    }

    #[test]
    fn empty_verse_runs_clean() {
        let detectors = crate::rules::rules::get();
        let verse = Verse::new("");
        assert!(Scheduler::new(&verse, &detectors).run().is_empty());
    }

    #[test]
    fn gating_skips_detectors_without_buckets() {
        let detectors = crate::rules::rules::get();
        // qaf fatha dal sukun
        let verse = Verse::new("\u{0642}\u{064E}\u{062F}\u{0652}");
        let names = Scheduler::new(&verse, &detectors).active_detector_names();
        assert_eq!(names, ["madd", "qalqalah"]);
    }
}
