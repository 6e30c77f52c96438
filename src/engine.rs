//! Annotation engine.
//!
//! The engine takes a detector registry (see `rules::rules`) and a verse and
//! produces the final list of annotations. It is split into focused
//! submodules under `src/engine/`.
//!
//! ## How the parts work together
//!
//! ```text
//! detectors (all) ──┐
//!                   │  CompiledDetectors::new      (compiled_rules.rs)
//!                   └───────────────┬─────────────
//!                                   │
//! verse ── TriggerInfo::scan ───────┼─ select active detectors (buckets)
//!          (trigger.rs)             │
//!                                   v
//!                        Scheduler::scan (scheduler.rs)
//!                          - one pass over positions
//!                          - first proposal wins
//!                          - marked set, retroactive relabels
//!                                   │
//!                                   v
//!                        resolve (resolve.rs)
//!                          - stable sort by start
//!                          - drop overlaps
//!                                   │
//!                                   v
//!                           Vec<Annotation>
//! ```
//!
//! Unlike a fixpoint parser there is no iteration: each position is decided
//! once, and priority between detectors is the registry order.
//!
//! ## Responsibilities by module
//!
//! - `compiled_rules.rs`: indexes detectors by coarse buckets.
//! - `trigger.rs`: scans the verse to compute which buckets are present.
//! - `scheduler.rs`: the single pass and the claim bookkeeping.
//! - `resolve.rs`: sorts and de-overlaps.
//! - `metrics.rs`: timing and counters for verbose runs.
//!
//! ## Debugging
//!
//! The engine emits `tracing` events: trigger buckets and the active detector
//! count at `debug`, every accept and retraction at `trace`, resolver drops at
//! `debug`. Run the CLI with `RUST_LOG=tajweed=trace` to see them.

#[path = "engine/compiled_rules.rs"]
mod compiled_rules;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/resolve.rs"]
mod resolve;
#[path = "engine/scheduler.rs"]
mod scheduler;
#[path = "engine/trigger.rs"]
mod trigger;

pub use compiled_rules::BucketMask;
pub(crate) use resolve::resolve;
pub(crate) use scheduler::Scheduler;
