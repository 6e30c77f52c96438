//! Marks that are not letters: minor-mark markers, pause signs, and the
//! sajdah sign.

use super::chars::{SAJDAH, marker_kind, waqf_kind};
use super::cursor::Verse;
use crate::{Annotation, Proposal, RuleKind};

/// An internal marker relabels the letter before it and is itself hidden.
///
/// The relabel is retroactive: it replaces whatever an earlier position
/// claimed over that letter.
pub fn detect_minor_mark(v: &Verse, i: usize) -> Option<Proposal> {
    let kind = marker_kind(v.at(i))?;
    let hidden = Annotation::new(i, 1, RuleKind::HiddenMarker);
    match v.prev_base_letter(i) {
        Some(letter) => Some(Proposal::span(letter, i, kind).with_hidden(hidden).retroactive()),
        None => Some(Proposal::at(i, 1, RuleKind::HiddenMarker)),
    }
}

pub fn detect_waqf(v: &Verse, i: usize) -> Option<Proposal> {
    waqf_kind(v.at(i)).map(|kind| Proposal::at(i, 1, kind))
}

pub fn detect_sajdah(v: &Verse, i: usize) -> Option<Proposal> {
    (v.at(i) == SAJDAH).then(|| Proposal::at(i, 1, RuleKind::Sajdah))
}
