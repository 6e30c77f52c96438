//! Tajweed annotation for fully-diacritized Quranic Arabic text.
//!
//! The crate scans a verse character by character, runs a fixed-priority
//! battery of rule detectors at every position that is not yet claimed, and
//! returns an ordered list of non-overlapping [`Annotation`]s. The
//! [`render_marked`] helper interleaves those spans with the literal text so
//! a caller can style each rule kind.
//!
//! ```
//! use tajweed::{RuleKind, annotate};
//!
//! let spans = annotate("الشَّمْس");
//! assert_eq!(spans[0].kind, RuleKind::SilentLetter);
//! assert_eq!((spans[0].start, spans[0].length), (0, 2));
//! ```

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod render;
mod rules;

pub use api::{
    AnnotateResult, AnnotateResultVerbose, Candidate, DetectorHits, Options, ScanDetails, annotate,
    annotate_verbose_with, annotate_with, normalize, render_marked, render_marked_with, tajweed,
};
pub use error::TajweedError;

use crate::rules::cursor::Verse;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// --- Rule kinds -------------------------------------------------------------

/// Closed set of rule categories an annotation can carry.
///
/// The kebab-case names returned by [`RuleKind::name`] are a stable external
/// contract: callers key per-rule visibility settings and stylesheet classes
/// on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    MaddAsli,
    MaddMuttasil,
    MaddMunfasil,
    MaddArid,
    MaddLazim,
    MaddLiin,
    Qalqalah,
    Ghunna,
    IdghamBiGhunna,
    IdghamBilaGhunna,
    IdghamMutaqaribain,
    IdghamMithlain,
    Ikhfa,
    Iqlab,
    SilatHa,
    SilentLetter,
    HiddenMarker,
    WaqfLazim,
    WaqfJaiz,
    WaqfAwla,
    WaqfContinue,
    WaqfMuanaqah,
    Sajdah,
    Qasr,
    Med,
    Tashiil,
    Sakta,
    Ishmam,
}

impl RuleKind {
    /// Every kind, in declaration order.
    pub const ALL: [RuleKind; 28] = [
        RuleKind::MaddAsli,
        RuleKind::MaddMuttasil,
        RuleKind::MaddMunfasil,
        RuleKind::MaddArid,
        RuleKind::MaddLazim,
        RuleKind::MaddLiin,
        RuleKind::Qalqalah,
        RuleKind::Ghunna,
        RuleKind::IdghamBiGhunna,
        RuleKind::IdghamBilaGhunna,
        RuleKind::IdghamMutaqaribain,
        RuleKind::IdghamMithlain,
        RuleKind::Ikhfa,
        RuleKind::Iqlab,
        RuleKind::SilatHa,
        RuleKind::SilentLetter,
        RuleKind::HiddenMarker,
        RuleKind::WaqfLazim,
        RuleKind::WaqfJaiz,
        RuleKind::WaqfAwla,
        RuleKind::WaqfContinue,
        RuleKind::WaqfMuanaqah,
        RuleKind::Sajdah,
        RuleKind::Qasr,
        RuleKind::Med,
        RuleKind::Tashiil,
        RuleKind::Sakta,
        RuleKind::Ishmam,
    ];

    /// Stable class/tag name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            RuleKind::MaddAsli => "madd-asli",
            RuleKind::MaddMuttasil => "madd-muttasil",
            RuleKind::MaddMunfasil => "madd-munfasil",
            RuleKind::MaddArid => "madd-arid",
            RuleKind::MaddLazim => "madd-lazim",
            RuleKind::MaddLiin => "madd-liin",
            RuleKind::Qalqalah => "qalqalah",
            RuleKind::Ghunna => "ghunna",
            RuleKind::IdghamBiGhunna => "idgham-bi-ghunna",
            RuleKind::IdghamBilaGhunna => "idgham-bila-ghunna",
            RuleKind::IdghamMutaqaribain => "idgham-mutaqaribain",
            RuleKind::IdghamMithlain => "idgham-mithlain",
            RuleKind::Ikhfa => "ikhfa",
            RuleKind::Iqlab => "iqlab",
            RuleKind::SilatHa => "silat-ha",
            RuleKind::SilentLetter => "silent-letter",
            RuleKind::HiddenMarker => "hidden-marker",
            RuleKind::WaqfLazim => "waqf-lazim",
            RuleKind::WaqfJaiz => "waqf-jaiz",
            RuleKind::WaqfAwla => "waqf-awla",
            RuleKind::WaqfContinue => "waqf-continue",
            RuleKind::WaqfMuanaqah => "waqf-muanaqah",
            RuleKind::Sajdah => "sajdah",
            RuleKind::Qasr => "qasr",
            RuleKind::Med => "med",
            RuleKind::Tashiil => "tashiil",
            RuleKind::Sakta => "sakta",
            RuleKind::Ishmam => "ishmam",
        }
    }

    /// Human-readable English label, as shown in a legend.
    pub fn label(self) -> &'static str {
        match self {
            RuleKind::MaddAsli => "Natural madd (2)",
            RuleKind::MaddMuttasil => "Connected madd (4-5)",
            RuleKind::MaddMunfasil => "Separated madd (4-5)",
            RuleKind::MaddArid => "Madd at a pause (2/4/6)",
            RuleKind::MaddLazim => "Necessary madd (6)",
            RuleKind::MaddLiin => "Soft madd",
            RuleKind::Qalqalah => "Qalqalah",
            RuleKind::Ghunna => "Ghunna",
            RuleKind::IdghamBiGhunna => "Idgham with ghunna",
            RuleKind::IdghamBilaGhunna => "Idgham without ghunna",
            RuleKind::IdghamMutaqaribain => "Idgham of close letters",
            RuleKind::IdghamMithlain => "Idgham of identical letters",
            RuleKind::Ikhfa => "Ikhfa",
            RuleKind::Iqlab => "Iqlab",
            RuleKind::SilatHa => "Silat al-ha",
            RuleKind::SilentLetter => "Silent letter",
            RuleKind::HiddenMarker => "Hidden marker",
            RuleKind::WaqfLazim => "Mandatory stop",
            RuleKind::WaqfJaiz => "Permissible stop",
            RuleKind::WaqfAwla => "Better to stop",
            RuleKind::WaqfContinue => "Better to continue",
            RuleKind::WaqfMuanaqah => "Stop at one of two",
            RuleKind::Sajdah => "Prostration",
            RuleKind::Qasr => "Qasr",
            RuleKind::Med => "Med",
            RuleKind::Tashiil => "Tashiil",
            RuleKind::Sakta => "Sakta",
            RuleKind::Ishmam => "Ishmam",
        }
    }

    /// Short legend abbreviation.
    pub fn abbreviation(self) -> &'static str {
        match self {
            RuleKind::MaddAsli => "MA",
            RuleKind::MaddMuttasil => "MMT",
            RuleKind::MaddMunfasil => "MMN",
            RuleKind::MaddArid => "MAR",
            RuleKind::MaddLazim => "ML",
            RuleKind::MaddLiin => "MLN",
            RuleKind::Qalqalah => "Q",
            RuleKind::Ghunna => "G",
            RuleKind::IdghamBiGhunna => "IBG",
            RuleKind::IdghamBilaGhunna => "IWG",
            RuleKind::IdghamMutaqaribain => "IMQ",
            RuleKind::IdghamMithlain => "IMT",
            RuleKind::Ikhfa => "IK",
            RuleKind::Iqlab => "IQ",
            RuleKind::SilatHa => "SH",
            RuleKind::SilentLetter => "S",
            RuleKind::HiddenMarker => "",
            RuleKind::WaqfLazim => "م",
            RuleKind::WaqfJaiz => "ج",
            RuleKind::WaqfAwla => "قلى",
            RuleKind::WaqfContinue => "صلى",
            RuleKind::WaqfMuanaqah => "∴",
            RuleKind::Sajdah => "۩",
            RuleKind::Qasr => "QS",
            RuleKind::Med => "MD",
            RuleKind::Tashiil => "TS",
            RuleKind::Sakta => "SK",
            RuleKind::Ishmam => "IS",
        }
    }

    /// True for the five pause-sign classes.
    pub fn is_waqf(self) -> bool {
        matches!(
            self,
            RuleKind::WaqfLazim
                | RuleKind::WaqfJaiz
                | RuleKind::WaqfAwla
                | RuleKind::WaqfContinue
                | RuleKind::WaqfMuanaqah
        )
    }

    /// True for the madd family, madd-liin included.
    pub fn is_madd(self) -> bool {
        matches!(
            self,
            RuleKind::MaddAsli
                | RuleKind::MaddMuttasil
                | RuleKind::MaddMunfasil
                | RuleKind::MaddArid
                | RuleKind::MaddLazim
                | RuleKind::MaddLiin
        )
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RuleKind {
    type Err = TajweedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        RuleKind::ALL
            .iter()
            .copied()
            .find(|k| k.name() == needle)
            .ok_or_else(|| TajweedError::UnknownKind(needle.to_string()))
    }
}

bitflags::bitflags! {
    /// A set of rule kinds, one bit per [`RuleKind`] in declaration order.
    ///
    /// Used for per-rule visibility toggles ([`Options::disabled`]).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct KindSet: u32 {
        const MADD_ASLI           = 1 << 0;
        const MADD_MUTTASIL       = 1 << 1;
        const MADD_MUNFASIL       = 1 << 2;
        const MADD_ARID           = 1 << 3;
        const MADD_LAZIM          = 1 << 4;
        const MADD_LIIN           = 1 << 5;
        const QALQALAH            = 1 << 6;
        const GHUNNA              = 1 << 7;
        const IDGHAM_BI_GHUNNA    = 1 << 8;
        const IDGHAM_BILA_GHUNNA  = 1 << 9;
        const IDGHAM_MUTAQARIBAIN = 1 << 10;
        const IDGHAM_MITHLAIN     = 1 << 11;
        const IKHFA               = 1 << 12;
        const IQLAB               = 1 << 13;
        const SILAT_HA            = 1 << 14;
        const SILENT_LETTER       = 1 << 15;
        const HIDDEN_MARKER       = 1 << 16;
        const WAQF_LAZIM          = 1 << 17;
        const WAQF_JAIZ           = 1 << 18;
        const WAQF_AWLA           = 1 << 19;
        const WAQF_CONTINUE       = 1 << 20;
        const WAQF_MUANAQAH       = 1 << 21;
        const SAJDAH              = 1 << 22;
        const QASR                = 1 << 23;
        const MED                 = 1 << 24;
        const TASHIIL             = 1 << 25;
        const SAKTA               = 1 << 26;
        const ISHMAM              = 1 << 27;

        const MADD = Self::MADD_ASLI.bits()
            | Self::MADD_MUTTASIL.bits()
            | Self::MADD_MUNFASIL.bits()
            | Self::MADD_ARID.bits()
            | Self::MADD_LAZIM.bits()
            | Self::MADD_LIIN.bits();
        const WAQF = Self::WAQF_LAZIM.bits()
            | Self::WAQF_JAIZ.bits()
            | Self::WAQF_AWLA.bits()
            | Self::WAQF_CONTINUE.bits()
            | Self::WAQF_MUANAQAH.bits();
    }
}

impl Default for KindSet {
    fn default() -> Self {
        KindSet::empty()
    }
}

impl KindSet {
    /// The single-kind set for `kind`.
    pub fn of(kind: RuleKind) -> Self {
        Self::from_bits_retain(1 << kind as u32)
    }

    pub fn has(self, kind: RuleKind) -> bool {
        self.contains(Self::of(kind))
    }

    /// Kinds in this set, in declaration order.
    pub fn kinds(self) -> impl Iterator<Item = RuleKind> {
        RuleKind::ALL.into_iter().filter(move |k| self.has(*k))
    }
}

impl FromIterator<RuleKind> for KindSet {
    fn from_iter<I: IntoIterator<Item = RuleKind>>(iter: I) -> Self {
        iter.into_iter().fold(KindSet::empty(), |acc, k| acc | KindSet::of(k))
    }
}

impl FromStr for KindSet {
    type Err = TajweedError;

    /// Parse a comma-separated list of kind names. `madd` and `waqf` name the
    /// whole family.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut set = KindSet::empty();
        for item in s.split(',').map(str::trim).filter(|item| !item.is_empty()) {
            set |= match item {
                "madd" => KindSet::MADD,
                "waqf" => KindSet::WAQF,
                name => KindSet::of(name.parse()?),
            };
        }
        Ok(set)
    }
}

// --- Annotations ------------------------------------------------------------

/// A rule span over the input: `length` characters starting at character
/// index `start`.
///
/// A zero-length annotation marks a position without consuming characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
    pub start: usize,
    pub length: usize,
    pub kind: RuleKind,
}

impl Annotation {
    pub fn new(start: usize, length: usize, kind: RuleKind) -> Self {
        Annotation { start, length, kind }
    }

    /// Build from a half-open `start..end` range.
    pub fn spanning(start: usize, end: usize, kind: RuleKind) -> Self {
        Annotation { start, length: end.saturating_sub(start), kind }
    }

    /// Exclusive end index, saturating at `usize::MAX`.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.length)
    }

    pub fn covers(&self, index: usize) -> bool {
        index >= self.start && index < self.end()
    }

    pub fn overlaps(&self, other: &Annotation) -> bool {
        self.start < other.end() && other.start < self.end()
    }
}

// --- Detectors --------------------------------------------------------------

/// What a detector proposes for one position.
///
/// `hidden` carries the second annotation of a minor mark (the marker
/// character itself). A `retroactive` proposal supersedes any accepted
/// annotation that overlaps its primary range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Proposal {
    pub primary: Annotation,
    pub hidden: Option<Annotation>,
    pub retroactive: bool,
}

impl Proposal {
    pub fn span(start: usize, end: usize, kind: RuleKind) -> Self {
        Proposal { primary: Annotation::spanning(start, end, kind), hidden: None, retroactive: false }
    }

    pub fn at(start: usize, length: usize, kind: RuleKind) -> Self {
        Proposal { primary: Annotation::new(start, length, kind), hidden: None, retroactive: false }
    }

    pub fn with_hidden(mut self, hidden: Annotation) -> Self {
        self.hidden = Some(hidden);
        self
    }

    pub fn retroactive(mut self) -> Self {
        self.retroactive = true;
        self
    }

    pub fn kind(&self) -> RuleKind {
        self.primary.kind
    }
}

pub(crate) type DetectFn = fn(&Verse, usize) -> Option<Proposal>;

/// A rule detector: a name, coarse trigger buckets, and the detection
/// function run by the scheduler at every unclaimed position.
pub(crate) struct Detector {
    pub name: &'static str,
    pub detect: DetectFn,
    /// Bucket mask - the detector only runs if the input has one of these
    /// buckets. Zero means always on.
    pub buckets: u32,
}

impl std::fmt::Debug for Detector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Detector").field("name", &self.name).field("buckets", &self.buckets).finish()
    }
}
