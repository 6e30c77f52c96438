//! Silent letters: the definite article, hamzat al-wasl, and the Uthmani
//! orthographic letters that are written but not read.

use super::chars::{
    ALIF, ALWAYS_SILENT, ARTICLE_PREFIXES, DAMMA, FATHATAN, HAMZA_ABOVE, HAMZA_BELOW, HAMZAT_WASL, LAM, MADDAH_ABOVE,
    SILENT_UNLESS_STOP, SUN_LETTERS, WAW, is_base_letter,
};
use super::cursor::Verse;
use crate::{Proposal, RuleKind};

/// True when the alif at `j` opens a definite article: `ٱ` (or a bare `ا`
/// carrying no hamza or maddah) followed by a lam that is quiescent or
/// doubled, at the start of a word or behind a one-letter prefix.
pub(crate) fn is_article_alif(v: &Verse, j: usize) -> bool {
    let bare_alif = v.at(j) == ALIF && !v.has_mark(j, |m| matches!(m, HAMZA_ABOVE | HAMZA_BELOW | MADDAH_ABOVE));
    if !(v.at(j) == HAMZAT_WASL || bare_alif) {
        return false;
    }
    let Some(lam) = v.next_base_letter(j) else { return false };
    if v.at(lam) != LAM || v.has_madda(lam) || (v.has_vowel(lam) && !v.has_shadda(lam)) || v.has_tanween(lam) {
        return false;
    }
    v.is_word_start(j)
        || v.prev_base_letter(j).is_some_and(|p| v.is_word_start(p) && ARTICLE_PREFIXES.contains(&v.at(p)))
}

/// The article's alif and lam.
///
/// ```text
/// ٱلَّذِينَ   lam doubled      alif silent unless speech starts here
/// ٱلشَّمْس    sun letter       alif+lam silent (lam alone if alif is voweled)
/// ٱلْقَمَر    moon letter      alif silent unless speech starts here
/// ```
pub fn detect_silent_alif_lam(v: &Verse, i: usize) -> Option<Proposal> {
    if !is_article_alif(v, i) {
        return None;
    }
    let lam = v.next_base_letter(i)?;
    let alif_voweled = v.has_vowel(i);
    let pronounced = alif_voweled || v.is_speech_start(i);

    if v.has_shadda(lam) {
        return (!pronounced).then(|| Proposal::span(i, v.marks_end(i), RuleKind::SilentLetter));
    }

    let sun = v.next_base_letter(lam).is_some_and(|k| SUN_LETTERS.contains(&v.at(k)) && v.has_shadda(k));
    if sun {
        if alif_voweled {
            return Some(Proposal::span(lam, v.marks_end(lam), RuleKind::SilentLetter));
        }
        return Some(Proposal::span(i, v.marks_end(lam), RuleKind::SilentLetter));
    }

    (!pronounced).then(|| Proposal::span(i, v.marks_end(i), RuleKind::SilentLetter))
}

/// Hamzat al-wasl is dropped when speech runs into it from a preceding word.
pub fn detect_hamzat_wasl(v: &Verse, i: usize) -> Option<Proposal> {
    let c = v.at(i);
    let wasl = c == HAMZAT_WASL || (c == ALIF && v.is_word_start(i) && v.marks(i).next().is_none());
    if !wasl || v.is_speech_start(i) {
        return None;
    }
    Some(Proposal::span(i, v.marks_end(i), RuleKind::SilentLetter))
}

/// Letters the Uthmani orthography writes but recitation skips.
///
/// - any letter carrying the small high rounded zero (U+06DF);
/// - a letter carrying the upright rectangular zero (U+06E0), unless a stop
///   follows;
/// - the bare alif written after fathatan (`كِتَابًا`);
/// - the bare alif written after a word-final plural waw (`قَالُوا`).
pub fn detect_orthographic_silent(v: &Verse, i: usize) -> Option<Proposal> {
    let c = v.at(i);
    if !is_base_letter(c) {
        return None;
    }
    let silent = Proposal::span(i, v.marks_end(i), RuleKind::SilentLetter);
    if v.has_mark(i, |m| m == ALWAYS_SILENT) {
        return Some(silent);
    }
    if v.has_mark(i, |m| m == SILENT_UNLESS_STOP) {
        return (!v.is_at_stop(v.marks_end(i))).then_some(silent);
    }
    if c != ALIF || v.marks(i).next().is_some() {
        return None;
    }
    let prev = v.prev_base_letter(i)?;
    if v.carries(prev, FATHATAN) {
        return Some(silent);
    }
    is_plural_alif(v, prev, i).then_some(silent)
}

/// The bare alif at `alif` trails a plural waw at `waw`: the waw is quiescent
/// after a damma (or carries sukun) and the alif ends the word.
pub(crate) fn is_plural_alif(v: &Verse, waw: usize, alif: usize) -> bool {
    if v.at(waw) != WAW || !v.is_word_end(alif) || v.marks(alif).any(|m| m != ALWAYS_SILENT) {
        return false;
    }
    if v.has_sukun(waw) {
        return true;
    }
    v.is_quiescent(waw) && v.prev_base_letter(waw).is_some_and(|p| v.carries(p, DAMMA))
}
