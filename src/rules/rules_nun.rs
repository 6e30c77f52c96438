//! Noon sakinah and tanween: idgham, iqlab and ikhfa.

use super::chars::{
    IDGHAM_BILA_GHUNNA_LETTERS, IKHFA_LETTERS, IQLAB_LETTERS, NOON, YANMOU_LETTERS, is_alif_like,
};
use super::cursor::Verse;
use crate::{Proposal, RuleKind};

/// Outcome of examining a noon sakinah or tanween against the letter it runs
/// into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NunAssimilation {
    /// The letter carrying the sukun-less noon or the tanween.
    pub trigger: usize,
    /// First letter of what follows, possibly in the next word.
    pub target: usize,
    pub kind: RuleKind,
}

/// Words where a noon sakinah meets a yanmou letter inside the same word and
/// is read clearly (izhar) instead of merged.
fn is_izhar_word(v: &Verse, i: usize) -> bool {
    regex!(r"^[وفب]?(?:[اٱ]ل)?(?:دني[اى]|صنوان|قنوان|بنيان)(?:ه|هم|ها|كم)?$").is_match(&v.word_skeleton(i))
}

pub(crate) fn nun_assimilation(v: &Verse, i: usize) -> Option<NunAssimilation> {
    let tanween = v.has_tanween(i);
    if !(tanween || (v.at(i) == NOON && v.is_quiescent(i))) {
        return None;
    }

    let mut from = v.marks_end(i);
    if tanween {
        // a written alif (or alif maksura) after tanween is not read
        if let Some(a) = v.next_base_letter(i).filter(|&a| is_alif_like(v.at(a)) && v.is_quiescent(a)) {
            from = v.marks_end(a);
        }
    }
    let target = v.next_letter_across_words(from)?;
    let t = v.at(target);

    let kind = if YANMOU_LETTERS.contains(&t) {
        if v.is_same_word(i, target) && is_izhar_word(v, i) {
            return None;
        }
        RuleKind::IdghamBiGhunna
    } else if IDGHAM_BILA_GHUNNA_LETTERS.contains(&t) {
        RuleKind::IdghamBilaGhunna
    } else if IQLAB_LETTERS.contains(&t) {
        RuleKind::Iqlab
    } else if IKHFA_LETTERS.contains(&t) {
        RuleKind::Ikhfa
    } else {
        return None;
    };

    Some(NunAssimilation { trigger: i, target, kind })
}

/// Span from the trigger letter up to, not including, the target letter.
pub fn detect_nun(v: &Verse, i: usize) -> Option<Proposal> {
    let hit = nun_assimilation(v, i)?;
    Some(Proposal::span(hit.trigger, hit.target, hit.kind))
}
