//! Silat al-ha: the pronoun suffix ha, read with a short connecting vowel
//! into the next word (`بِهِۦ`, `لَهُۥ`).

use super::chars::{DAMMA, HA, HAMZAT_WASL, KASRA, LAM, SMALL_WAW, SMALL_YEH};
use super::cursor::Verse;
use crate::{Proposal, RuleKind};

pub fn detect_silat_ha(v: &Verse, i: usize) -> Option<Proposal> {
    if v.at(i) != HA || !v.is_word_end(i) {
        return None;
    }
    if !v.has_mark(i, |m| matches!(m, DAMMA | KASRA | SMALL_WAW | SMALL_YEH)) {
        return None;
    }
    let prev = v.prev_base_letter(i)?;
    if !v.has_vowel(prev) || is_divine_name(v, prev) {
        return None;
    }
    let next = v.next_letter_across_words(v.marks_end(i))?;
    if v.at(next) == HAMZAT_WASL {
        return None;
    }
    Some(Proposal::span(i, v.marks_end(i), RuleKind::SilatHa))
}

/// The ha of the divine name ends `لّه` (doubled lam after a lam).
fn is_divine_name(v: &Verse, lam: usize) -> bool {
    v.at(lam) == LAM && v.has_shadda(lam) && v.prev_base_letter(lam).is_some_and(|p| v.at(p) == LAM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pronoun_ha_between_words() {
        // lam fatha ha damma small-waw space qaf fatha
        let v = Verse::new("\u{0644}\u{064E}\u{0647}\u{064F}\u{06E5} \u{0642}\u{064E}");
        assert_eq!(detect_silat_ha(&v, 2), Some(Proposal::span(2, 5, RuleKind::SilatHa)));
    }

    #[test]
    fn no_connection_before_wasl_or_stop() {
        let wasl = Verse::new("\u{0644}\u{064E}\u{0647}\u{064F} \u{0671}\u{0644}\u{0652}");
        assert_eq!(detect_silat_ha(&wasl, 2), None);
        let stop = Verse::new("\u{0644}\u{064E}\u{0647}\u{064F} \u{06DD}");
        assert_eq!(detect_silat_ha(&stop, 2), None);
        let end = Verse::new("\u{0644}\u{064E}\u{0647}\u{064F}");
        assert_eq!(detect_silat_ha(&end, 2), None);
    }

    #[test]
    fn divine_name_is_excluded() {
        // alif-wasl lam lam shadda fatha ha kasra space ra fatha
        let v = Verse::new("\u{0671}\u{0644}\u{0644}\u{0651}\u{064E}\u{0647}\u{0650} \u{0631}\u{064E}");
        assert_eq!(detect_silat_ha(&v, 5), None);
    }

    #[test]
    fn quiescent_predecessor_blocks() {
        // meem fatha noon sukun ha damma space qaf
        let v = Verse::new("\u{0645}\u{064E}\u{0646}\u{0652}\u{0647}\u{064F} \u{0642}\u{064E}");
        assert_eq!(detect_silat_ha(&v, 4), None);
    }
}
