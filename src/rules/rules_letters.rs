//! Single-letter rules: qalqalah, ghunna, and the idgham of close or
//! identical letters.

use super::chars::{KAF, LAM, MEEM, NOON, QALQALAH_LETTERS, QAF, RA};
use super::cursor::Verse;
use crate::{Proposal, RuleKind};

/// Lam into ra, qaf into kaf. The first letter carries no vowel; the pair may
/// straddle a word boundary (`قُل رَّبِّ`, `نَخْلُقكُّم`).
pub fn detect_mutaqaribain(v: &Verse, i: usize) -> Option<Proposal> {
    let into = match v.at(i) {
        LAM => RA,
        QAF => KAF,
        _ => return None,
    };
    if !v.is_quiescent(i) {
        return None;
    }
    let target = v.next_letter_across_words(v.marks_end(i))?;
    (v.at(target) == into).then(|| Proposal::span(i, target, RuleKind::IdghamMutaqaribain))
}

pub fn detect_qalqalah(v: &Verse, i: usize) -> Option<Proposal> {
    (QALQALAH_LETTERS.contains(&v.at(i)) && v.has_sukun(i))
        .then(|| Proposal::span(i, v.marks_end(i), RuleKind::Qalqalah))
}

/// Doubled noon or meem. Zero-length: styling marks the position only.
pub fn detect_ghunna(v: &Verse, i: usize) -> Option<Proposal> {
    (matches!(v.at(i), NOON | MEEM) && v.has_shadda(i)).then(|| Proposal::at(i, 0, RuleKind::Ghunna))
}

/// Quiescent meem running into another meem.
pub fn detect_mithlain(v: &Verse, i: usize) -> Option<Proposal> {
    if v.at(i) != MEEM || !v.is_quiescent(i) {
        return None;
    }
    let target = v.next_letter_across_words(v.marks_end(i))?;
    (v.at(target) == MEEM).then(|| Proposal::span(i, target, RuleKind::IdghamMithlain))
}
