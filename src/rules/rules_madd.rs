//! The madd (elongation) family.
//!
//! A madd is anchored on its *carrier*: the voweled letter whose vowel is
//! drawn out by the following madd letter. Classification looks at what
//! comes after the madd letter and picks the first matching case:
//!
//! ```text
//! 1. madd-liin      fatha + waw/ya with sukun, one letter, then a stop
//! 2. madd-muttasil  hamza later in the same word
//! 3. madd-munfasil  word ends, next word opens with a hamza
//! 4. silent-letter  word ends, next word opens with hamzat al-wasl
//!    madd-asli      word ends otherwise
//! 5. madd-lazim     doubled or sukun letter later in the same word
//! 6. madd-arid      a stop mark, or one last letter and then a stop
//! 7. madd-asli      otherwise
//! ```

use super::chars::{
    ALIF, ALIF_MADDAH, ALWAYS_SILENT, DAMMA, FARSI_YEH, FATHA, HAMZA_ABOVE, HAMZA_BELOW, HAMZAT_WASL, KASRA, NOON,
    SHADDA, SILENT_UNLESS_STOP, SUBSCRIPT_ALIF, TATWEEL, WAW, YA, is_alif_like, is_base_letter, is_hamza, is_madd_mark, is_stop_mark,
    is_tanween, is_vowel, is_ya_like, marker_kind,
};
use super::cursor::Verse;
use super::rules_article::{is_article_alif, is_plural_alif};
use super::rules_nun::nun_assimilation;
use crate::{Proposal, RuleKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MaddSite {
    /// The madd letter (equal to the carrier for dagger alif and alif-maddah).
    letter: usize,
    /// Last letter the madd covers: the madd letter or an absorbed plural alif.
    last: usize,
    /// Exclusive end of the madd span.
    end: usize,
    madda: bool,
    liin: bool,
}

fn madd_site(v: &Verse, i: usize) -> Option<MaddSite> {
    let c = v.at(i);
    if !is_base_letter(c) || !(c == ALIF_MADDAH || v.has_mark(i, |m| is_vowel(m) || is_madd_mark(m))) {
        return None;
    }

    let subscript = v.has_mark(i, |m| m == SUBSCRIPT_ALIF) && !v.next_base_letter(i).is_some_and(|n| is_ya_like(v.at(n)));
    if v.has_dagger_alif(i) || subscript || (c == ALIF_MADDAH && v.is_word_start(i)) {
        return Some(site(v, i, i, false));
    }
    // dagger alif written on a tatweel after the carrier: ٱلرَّحْمَـٰنِ
    let t = v.marks_end(i);
    if v.at(t) == TATWEEL && v.has_dagger_alif(t) {
        return Some(site(v, i, t, false));
    }

    let j = v.next_base_letter(i).filter(|&j| is_base_letter(v.at(j)))?;
    let l = v.at(j);
    let madd = (v.carries(i, FATHA) && is_alif_like(l))
        || (v.carries(i, DAMMA) && l == WAW)
        || (v.carries(i, KASRA) && is_ya_like(l));
    let liin = v.carries(i, FATHA) && matches!(l, WAW | YA | FARSI_YEH) && v.has_sukun(j);
    if !(madd || liin) {
        return None;
    }
    // a minor-mark marker on the carrier relabels it instead
    if (i + 1..j).any(|k| marker_kind(v.at(k)).is_some()) {
        return None;
    }
    let carries_own_reading = |m: char| {
        is_vowel(m) || is_tanween(m) || matches!(m, SHADDA | ALWAYS_SILENT | SILENT_UNLESS_STOP)
    };
    if v.has_mark(j, carries_own_reading) || is_article_alif(v, j) {
        return None;
    }
    Some(site(v, i, j, liin))
}

fn site(v: &Verse, carrier: usize, letter: usize, liin: bool) -> MaddSite {
    let madda = v.has_madda(carrier) || v.has_madda(letter) || v.at(letter) == ALIF_MADDAH;
    let plural_alif = if v.at(letter) == WAW {
        v.next_base_letter(letter).filter(|&a| v.at(a) == ALIF && is_plural_alif(v, letter, a))
    } else {
        None
    };
    let last = plural_alif.unwrap_or(letter);
    MaddSite { letter, last, end: v.marks_end(last), madda, liin }
}

/// A next word that opens on a hamza, on a voweled alif, or on alif-maddah.
fn opens_with_hamza(v: &Verse, n: usize) -> bool {
    let c = v.at(n);
    is_hamza(c)
        || c == ALIF_MADDAH
        || (c == ALIF && v.has_mark(n, |m| is_vowel(m) || m == HAMZA_ABOVE || m == HAMZA_BELOW))
}

pub fn detect_madd(v: &Verse, i: usize) -> Option<Proposal> {
    let s = madd_site(v, i)?;
    let k = v.next_base_letter(s.last);
    let madd = |kind| Some(Proposal::span(i, s.end, kind));
    let silent = || Some(Proposal::span(s.letter, v.marks_end(s.letter), RuleKind::SilentLetter));

    if s.liin {
        let before_stop =
            k.is_some_and(|k| is_base_letter(v.at(k)) && v.is_word_end(k) && v.is_at_stop(v.marks_end(k)));
        return if before_stop { madd(RuleKind::MaddLiin) } else { None };
    }

    let Some(k) = k else {
        if let Some(n) = v.next_letter_across_words(s.end) {
            if opens_with_hamza(v, n) {
                return madd(RuleKind::MaddMunfasil);
            }
            if v.at(n) == HAMZAT_WASL || is_article_alif(v, n) {
                // two quiescents meet: the madd letter drops
                return if s.letter == i || v.at(s.letter) == TATWEEL { None } else { silent() };
            }
        }
        // the madd letter ends the word
        return madd(RuleKind::MaddAsli);
    };
    if is_hamza(v.at(k)) || v.at(k) == ALIF_MADDAH {
        return madd(RuleKind::MaddMuttasil);
    }

    if is_base_letter(v.at(k)) {
        let assimilating_noon = v.at(k) == NOON && nun_assimilation(v, k).is_some();
        if v.has_shadda(k) || (v.has_sukun(k) && !assimilating_noon) {
            return if v.at(s.letter) == ALIF && !s.madda { silent() } else { madd(RuleKind::MaddLazim) };
        }
    }

    let at_stop = is_stop_mark(v.at(k)) || (v.is_word_end(k) && v.is_at_stop(v.marks_end(k)));
    if at_stop { madd(RuleKind::MaddArid) } else { madd(RuleKind::MaddAsli) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_at(text: &str, i: usize) -> Option<(usize, usize, RuleKind)> {
        let v = Verse::new(text);
        detect_madd(&v, i).map(|p| (p.primary.start, p.primary.length, p.primary.kind))
    }

    #[test]
    fn natural_madd_inside_a_verse() {
        // dhal fatha alif space sin fatha
        assert_eq!(kind_at("\u{0630}\u{064E}\u{0627} \u{0633}\u{064E}", 0), Some((0, 3, RuleKind::MaddAsli)));
    }

    #[test]
    fn madd_before_an_ayah_end_is_arid() {
        // jeem fatha alif-maksura dagger ayah-end
        let text = "\u{062C}\u{064E}\u{0649}\u{0670}\u{06DD}";
        assert_eq!(kind_at(text, 0), Some((0, 4, RuleKind::MaddArid)));
        // ra kasra ya meem kasra, at end of text
        assert_eq!(kind_at("\u{0631}\u{0650}\u{064A}\u{0645}\u{0650}", 0), Some((0, 3, RuleKind::MaddArid)));
    }

    #[test]
    fn word_final_madd_letter_is_asli() {
        // meem fatha alif, at the end of the text
        assert_eq!(kind_at("\u{0645}\u{064E}\u{0627}", 0), Some((0, 3, RuleKind::MaddAsli)));
        // jeem fatha alif-maksura dagger space ayah-end
        let spaced = "\u{062C}\u{064E}\u{0649}\u{0670} \u{06DD}";
        assert_eq!(kind_at(spaced, 0), Some((0, 4, RuleKind::MaddAsli)));
    }

    #[test]
    fn hamza_in_the_same_word_is_muttasil() {
        // jeem fatha alif-maddah hamza fatha
        assert_eq!(kind_at("\u{062C}\u{064E}\u{0622}\u{0621}\u{064E}", 0), Some((0, 3, RuleKind::MaddMuttasil)));
    }

    #[test]
    fn hamza_opening_the_next_word_is_munfasil() {
        // ya fatha alif space hamza-above fatha
        let text = "\u{064A}\u{064E}\u{0627} \u{0623}\u{064E}";
        assert_eq!(kind_at(text, 0), Some((0, 3, RuleKind::MaddMunfasil)));
    }

    #[test]
    fn doubled_letter_after_madd_is_lazim_even_at_a_stop() {
        // dad fatha shadda alif-maddah lam shadda kasra ya noon fatha
        let text = "\u{0636}\u{064E}\u{0651}\u{0622}\u{0644}\u{0651}\u{0650}\u{064A}\u{0646}\u{064E}";
        assert_eq!(kind_at(text, 0), Some((0, 4, RuleKind::MaddLazim)));
        // ta fatha ha fatha alif-maddah jeem shadda space ayah-end
        let stop = "\u{062A}\u{064E}\u{062D}\u{064E}\u{0622}\u{062C}\u{0651} \u{06DD}";
        assert_eq!(kind_at(stop, 2), Some((2, 3, RuleKind::MaddLazim)));
    }

    #[test]
    fn bare_alif_before_a_doubled_letter_is_silent() {
        // fa fatha alif ta shadda fatha
        let text = "\u{0641}\u{064E}\u{0627}\u{062A}\u{0651}\u{064E}";
        assert_eq!(kind_at(text, 0), Some((2, 1, RuleKind::SilentLetter)));
    }

    #[test]
    fn meeting_of_two_quiescents_drops_the_madd_letter() {
        // qaf fatha alif lam damma waw alif space alif-wasl ta shadda
        let text = "\u{0642}\u{064E}\u{0627}\u{0644}\u{064F}\u{0648}\u{0627} \u{0671}\u{062A}\u{0651}";
        assert_eq!(kind_at(text, 3), Some((5, 1, RuleKind::SilentLetter)));
        // the plural alif is absorbed into an ordinary madd
        let plain = "\u{0642}\u{064E}\u{0627}\u{0644}\u{064F}\u{0648}\u{0627} \u{0641}\u{064E}";
        assert_eq!(kind_at(plain, 3), Some((3, 4, RuleKind::MaddAsli)));
    }

    #[test]
    fn liin_only_before_a_stop() {
        // kha fatha waw sukun fa dammatan space ayah-end
        let stop = "\u{062E}\u{064E}\u{0648}\u{0652}\u{0641}\u{064C} \u{06DD}";
        assert_eq!(kind_at(stop, 0), Some((0, 4, RuleKind::MaddLiin)));
        let running = "\u{062E}\u{064E}\u{0648}\u{0652}\u{0641}\u{064C} \u{0648}\u{064E}";
        assert_eq!(kind_at(running, 0), None);
    }

    #[test]
    fn dagger_alif_carrier() {
        // ha fatha dagger dhal fatha alif
        assert_eq!(kind_at("\u{0647}\u{064E}\u{0670}\u{0630}\u{064E}\u{0627}", 0), Some((0, 3, RuleKind::MaddAsli)));
    }

    #[test]
    fn dagger_alif_on_a_tatweel() {
        // meem fatha tatweel dagger noon kasra space ra
        let text = "\u{0645}\u{064E}\u{0640}\u{0670}\u{0646}\u{0650} \u{0631}";
        assert_eq!(kind_at(text, 0), Some((0, 4, RuleKind::MaddAsli)));
    }

    #[test]
    fn marker_on_the_carrier_blocks_the_madd() {
        // sin kasra sakta-marker ya noon
        assert_eq!(kind_at("\u{0633}\u{0650}\u{08D4}\u{064A}\u{0646}", 0), None);
    }

    #[test]
    fn article_alif_is_not_a_madd_letter() {
        // waw fatha alif lam shin shadda
        assert_eq!(kind_at("\u{0648}\u{064E}\u{0627}\u{0644}\u{0634}\u{0651}", 0), None);
    }

    #[test]
    fn voweled_follower_is_not_a_madd_letter() {
        // ba fatha waw fatha
        assert_eq!(kind_at("\u{0628}\u{064E}\u{0648}\u{064E}", 0), None);
        // qaf damma waw shadda
        assert_eq!(kind_at("\u{0642}\u{064F}\u{0648}\u{0651}", 0), None);
    }
}
