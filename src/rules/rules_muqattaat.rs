//! Disjoined opening letters (huruf muqattaat), e.g. `الٓمٓ`, `كٓهيعٓصٓ`.

use super::chars::{HURUF_MUQATTAAT, is_base_letter, is_tanween, is_vowel};
use super::cursor::Verse;
use crate::{Proposal, RuleKind};

/// A muqattaat letter bearing maddah, in a word that carries no short vowel
/// or tanween, is read with a six-count `madd-lazim`.
pub fn detect_muqattaat(v: &Verse, i: usize) -> Option<Proposal> {
    if !HURUF_MUQATTAAT.contains(&v.at(i)) || !v.has_madda(i) {
        return None;
    }
    let (start, end) = v.word_bounds(i);
    let voweled = (start..end).any(|k| is_base_letter(v.at(k)) && v.has_mark(k, |m| is_vowel(m) || is_tanween(m)));
    if voweled {
        return None;
    }
    Some(Proposal::span(i, v.marks_end(i), RuleKind::MaddLazim))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maddah_letters_of_an_opening_are_lazim() {
        // alif lam+maddah meem+maddah
        let v = Verse::new("\u{0627}\u{0644}\u{0653}\u{0645}\u{0653}");
        assert_eq!(detect_muqattaat(&v, 0), None);
        assert_eq!(detect_muqattaat(&v, 1), Some(Proposal::span(1, 3, RuleKind::MaddLazim)));
        assert_eq!(detect_muqattaat(&v, 3), Some(Proposal::span(3, 5, RuleKind::MaddLazim)));
    }

    #[test]
    fn voweled_words_are_not_openings() {
        // sin fatha waw fatha alif maddah hamza dammatan: maddah on an ordinary word
        let v = Verse::new("\u{0633}\u{064E}\u{0648}\u{064E}\u{0627}\u{0653}\u{0621}\u{064C}");
        assert_eq!(detect_muqattaat(&v, 4), None);
    }
}
