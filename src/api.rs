use crate::engine::Scheduler;
use crate::render::render;
use crate::rules::cursor::Verse;
use crate::{Annotation, Detector, KindSet, TajweedError};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::time::Duration;
use tracing::warn;
use unicode_normalization::UnicodeNormalization;

static DEFAULT_DETECTORS: Lazy<Vec<Detector>> = Lazy::new(crate::rules::rules::get);

/// Options that affect annotation and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// NFC-normalize the input before scanning.
    pub normalize: bool,
    /// Put a single space before a rendered pause sign unless one is there.
    pub waqf_separator: bool,
    /// Kinds to drop from results and render as plain text.
    pub disabled: KindSet,
}

impl Default for Options {
    fn default() -> Self {
        Options { normalize: true, waqf_separator: true, disabled: KindSet::empty() }
    }
}

/// Result from [`annotate_with`].
#[derive(Debug, Clone, Serialize)]
pub struct AnnotateResult {
    /// The scanned text. Span indices are character indices into this string,
    /// which differs from the input when normalization changed it.
    pub text: String,
    pub spans: Vec<Annotation>,
    /// Total elapsed time spent scanning and resolving.
    pub elapsed: Duration,
}

/// A recorded proposal, kept for debugging.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub annotation: Annotation,
    /// Name of the detector that proposed it.
    pub detector: String,
    /// The characters it covers.
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetectorHits {
    pub name: String,
    pub hits: usize,
}

/// Additional details returned by [`annotate_verbose_with`].
#[derive(Debug, Clone, Serialize)]
pub struct ScanDetails {
    pub total: Duration,
    pub trigger: Duration,
    pub scan: Duration,
    pub resolve: Duration,
    /// Names of the detectors that were active for this input, by priority.
    pub active_detectors: Vec<String>,
    /// Everything the scan recorded, before retraction and resolution.
    pub candidates: Vec<Candidate>,
    /// Accepted proposals per active detector.
    pub hits: Vec<DetectorHits>,
    /// Annotations recorded by the scan, retracted ones included.
    pub proposals: usize,
    pub retracted: usize,
    /// Annotations dropped by the resolver.
    pub dropped: usize,
}

/// Result from [`annotate_verbose_with`].
#[derive(Debug, Clone, Serialize)]
pub struct AnnotateResultVerbose {
    pub text: String,
    pub spans: Vec<Annotation>,
    pub elapsed: Duration,
    pub details: ScanDetails,
}

/// Annotate `text` exactly as given, with every rule enabled.
///
/// # Example
/// ```
/// use tajweed::{RuleKind, annotate};
///
/// // qaf fatha dal sukun
/// let spans = annotate("\u{0642}\u{064E}\u{062F}\u{0652}");
/// assert_eq!(spans.len(), 1);
/// assert_eq!(spans[0].kind, RuleKind::Qalqalah);
/// assert!(annotate("").is_empty());
/// ```
pub fn annotate(text: &str) -> Vec<Annotation> {
    let verse = Verse::new(text);
    if verse.is_empty() {
        return Vec::new();
    }
    Scheduler::new(&verse, &DEFAULT_DETECTORS).run()
}

/// Annotate `text` with `options`, dropping disabled kinds.
pub fn annotate_with(text: &str, options: &Options) -> AnnotateResult {
    let text = prepare(text, options);
    let verse = Verse::new(&text);
    let run = Scheduler::new(&verse, &DEFAULT_DETECTORS).run_with_metrics();

    AnnotateResult { spans: enabled(run.spans, options), text, elapsed: run.metrics.total }
}

/// Annotate `text` with `options` and return scan details.
///
/// The default [`annotate_with`] path does not build these traces.
pub fn annotate_verbose_with(text: &str, options: &Options) -> AnnotateResultVerbose {
    let text = prepare(text, options);
    let verse = Verse::new(&text);
    let scheduler = Scheduler::new(&verse, &DEFAULT_DETECTORS);
    let active_detectors = scheduler.active_detector_names().into_iter().map(str::to_string).collect();
    let run = scheduler.run_with_metrics();

    let candidates = run
        .raw
        .iter()
        .map(|c| Candidate {
            annotation: c.annotation,
            detector: c.detector.to_string(),
            text: verse.slice(c.annotation.start, c.annotation.end()),
        })
        .collect();
    let hits = run.metrics.scan.hits.iter().map(|&(name, hits)| DetectorHits { name: name.to_string(), hits }).collect();

    let details = ScanDetails {
        total: run.metrics.total,
        trigger: run.metrics.trigger,
        scan: run.metrics.scan.duration,
        resolve: run.metrics.resolve,
        active_detectors,
        candidates,
        hits,
        proposals: run.metrics.scan.proposals,
        retracted: run.metrics.scan.retractions,
        dropped: run.dropped,
    };

    AnnotateResultVerbose { spans: enabled(run.spans, options), text, elapsed: run.metrics.total, details }
}

/// Unicode NFC.
pub fn normalize(text: &str) -> String {
    text.nfc().collect()
}

/// Render `text` with `spans` using default options.
///
/// ```
/// use tajweed::{annotate, render_marked};
///
/// let text = "\u{0642}\u{064E}\u{062F}\u{0652}";
/// let html = render_marked(text, &annotate(text)).unwrap();
/// assert_eq!(html, "\u{0642}\u{064E}<span class=\"qalqalah\">\u{062F}\u{0652}</span>");
/// ```
pub fn render_marked(text: &str, spans: &[Annotation]) -> Result<String, TajweedError> {
    render(text, spans, &Options::default())
}

pub fn render_marked_with(text: &str, spans: &[Annotation], options: &Options) -> Result<String, TajweedError> {
    render(text, spans, options)
}

/// Normalize, annotate and render in one call.
///
/// Falls back to the (normalized) plain text if rendering fails.
pub fn tajweed(text: &str, options: &Options) -> String {
    let result = annotate_with(text, options);
    match render(&result.text, &result.spans, options) {
        Ok(marked) => marked,
        Err(err) => {
            warn!(%err, "rendering failed, returning plain text");
            result.text
        }
    }
}

fn prepare(text: &str, options: &Options) -> String {
    if options.normalize { normalize(text) } else { text.to_string() }
}

fn enabled(spans: Vec<Annotation>, options: &Options) -> Vec<Annotation> {
    if options.disabled.is_empty() {
        return spans;
    }
    spans.into_iter().filter(|a| !options.disabled.has(a.kind)).collect()
}
