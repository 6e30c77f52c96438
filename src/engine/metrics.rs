//! Engine run metrics.
//!
//! The intended usage is:
//!
//! - `Scheduler::run` for normal operation.
//! - `Scheduler::run_with_metrics` for profiling, debugging regressions, and
//!   inspecting what the scan proposed before resolution.
//!
//! Metrics are *opt-in*: the plain `run` path drops them.

use crate::Annotation;
use std::time::Duration;

// --- Metrics -----------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for [`Scheduler::run_with_metrics`].
    ///
    /// [`Scheduler::run_with_metrics`]: super::Scheduler::run_with_metrics
    pub total: Duration,
    /// Time spent in the trigger scan and detector selection.
    pub trigger: Duration,
    pub scan: ScanMetrics,
    /// Time spent sorting and de-overlapping annotations.
    pub resolve: Duration,
}

/// Counters and timing for the left-to-right scan.
#[derive(Debug, Default, Clone)]
pub struct ScanMetrics {
    pub duration: Duration,
    /// Accepted proposals per detector, in registry order.
    pub hits: Vec<(&'static str, usize)>,
    /// Number of proposals recorded (including later-retracted ones).
    pub proposals: usize,
    /// Accepted annotations cut back or removed by a retroactive proposal.
    pub retractions: usize,
}

/// A recorded proposal annotation with the detector that made it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawClaim {
    pub annotation: Annotation,
    pub detector: &'static str,
}

/// Scheduler output bundled with timing information.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Annotations as recorded by the scan, before resolution.
    pub raw: Vec<RawClaim>,
    /// Sorted, pairwise disjoint annotations.
    pub spans: Vec<Annotation>,
    /// Annotations dropped by the resolver for overlapping an earlier one.
    pub dropped: usize,
    pub metrics: RunMetrics,
}
