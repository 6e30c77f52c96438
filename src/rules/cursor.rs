//! Cursor navigation over a verse.
//!
//! A [`Verse`] is the input text as an indexable sequence of `char`s. Every
//! query accepts any index, including ones past the end; reads outside the
//! text yield the `'\0'` sentinel and searches yield `None`, so detectors can
//! probe around a position without bounds checks.

use super::chars::{
    self, ALIF, AYAH_END, DAGGER_ALIF, MADDAH_ABOVE, SHADDA, is_base_letter, is_diacritic, is_stop_mark,
    is_transparent, is_word_break,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verse {
    chars: Vec<char>,
}

impl Verse {
    pub fn new(text: &str) -> Self {
        Verse { chars: text.chars().collect() }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Character at `i`, or `'\0'` outside the text.
    pub fn at(&self, i: usize) -> char {
        self.chars.get(i).copied().unwrap_or('\0')
    }

    /// Character `n` positions before `i`, or `'\0'`.
    pub fn before(&self, i: usize, n: usize) -> char {
        i.checked_sub(n).map_or('\0', |j| self.at(j))
    }

    /// `start..end` as a `String`, clamped to the text.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.len());
        let start = start.min(end);
        self.chars[start..end].iter().collect()
    }

    // --- Diacritic runs -----------------------------------------------------

    /// Index just past the diacritic run that follows `i`.
    pub fn marks_end(&self, i: usize) -> usize {
        let mut j = i + 1;
        while is_diacritic(self.at(j)) {
            j += 1;
        }
        j.min(self.len().max(i + 1))
    }

    /// The diacritics attached to the character at `i`.
    pub fn marks(&self, i: usize) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().skip(i + 1).take_while(|c| is_diacritic(**c)).copied()
    }

    pub fn has_mark(&self, i: usize, pred: impl Fn(char) -> bool) -> bool {
        self.marks(i).any(pred)
    }

    /// Fatha, damma or kasra on the letter at `i`.
    pub fn has_vowel(&self, i: usize) -> bool {
        self.has_mark(i, chars::is_vowel)
    }

    pub fn has_sukun(&self, i: usize) -> bool {
        self.has_mark(i, chars::is_sukun)
    }

    pub fn has_shadda(&self, i: usize) -> bool {
        self.has_mark(i, |c| c == SHADDA)
    }

    pub fn has_madda(&self, i: usize) -> bool {
        self.has_mark(i, |c| c == MADDAH_ABOVE)
    }

    pub fn has_tanween(&self, i: usize) -> bool {
        self.has_mark(i, chars::is_tanween)
    }

    pub fn has_dagger_alif(&self, i: usize) -> bool {
        self.has_mark(i, |c| c == DAGGER_ALIF)
    }

    /// True when the letter at `i` carries a specific vowel `v`.
    pub fn carries(&self, i: usize, v: char) -> bool {
        self.has_mark(i, |c| c == v)
    }

    /// No short vowel, tanween or shadda: the letter is quiescent, whether
    /// or not a sukun is written.
    pub fn is_quiescent(&self, i: usize) -> bool {
        !self.has_mark(i, |c| chars::is_vowel(c) || chars::is_tanween(c) || c == SHADDA || c == DAGGER_ALIF)
    }

    // --- Letter search ------------------------------------------------------

    /// Nearest base letter before `i`, skipping diacritics, tatweel and
    /// internal markers. `None` when anything else comes first.
    pub fn prev_base_letter(&self, i: usize) -> Option<usize> {
        let mut j = i;
        while j > 0 {
            j -= 1;
            let c = self.at(j);
            if is_base_letter(c) {
                return Some(j);
            }
            if !is_transparent(c) {
                return None;
            }
        }
        None
    }

    /// Nearest base letter after `i`, skipping diacritics, tatweel and
    /// internal markers.
    ///
    /// A pause sign, the ayah-end mark or the sajdah sign counts as found: it
    /// terminates a rule's scope without being a pronounced letter. Returns
    /// `None` at whitespace, at the end of the text, and at any other
    /// character.
    pub fn next_base_letter(&self, i: usize) -> Option<usize> {
        let mut j = i + 1;
        while j < self.len() {
            let c = self.at(j);
            if is_base_letter(c) || is_stop_mark(c) {
                return Some(j);
            }
            if !is_transparent(c) {
                return None;
            }
            j += 1;
        }
        None
    }

    /// First base letter at or after `from`, crossing whitespace. Stops with
    /// `None` at a stop mark, the end of the text, or foreign characters.
    pub fn next_letter_across_words(&self, from: usize) -> Option<usize> {
        let mut j = from;
        while j < self.len() {
            let c = self.at(j);
            if is_base_letter(c) {
                return Some(j);
            }
            if !(c.is_whitespace() || is_transparent(c)) {
                return None;
            }
            j += 1;
        }
        None
    }

    // --- Words and stops ----------------------------------------------------

    pub fn is_word_start(&self, i: usize) -> bool {
        i == 0 || is_word_break(self.before(i, 1))
    }

    /// True when no further letter of the same word follows `i`.
    pub fn is_word_end(&self, i: usize) -> bool {
        match self.next_base_letter(i) {
            None => true,
            Some(j) => is_stop_mark(self.at(j)),
        }
    }

    /// No word-break character strictly between `i` and `j`.
    pub fn is_same_word(&self, i: usize, j: usize) -> bool {
        let (lo, hi) = if i <= j { (i, j) } else { (j, i) };
        (lo + 1..hi).all(|k| !is_word_break(self.at(k)))
    }

    /// Skipping whitespace from `i`, the next character is a pause sign, the
    /// ayah-end mark, or the end of the text.
    pub fn is_at_stop(&self, i: usize) -> bool {
        let mut j = i;
        while self.at(j).is_whitespace() {
            j += 1;
        }
        j >= self.len() || chars::waqf_kind(self.at(j)).is_some() || self.at(j) == AYAH_END
    }

    /// Nothing but whitespace precedes `i`, or the previous non-space
    /// character is an ayah-end mark: a recitation starts here.
    pub fn is_speech_start(&self, i: usize) -> bool {
        let mut j = i;
        while j > 0 {
            j -= 1;
            let c = self.at(j);
            if c.is_whitespace() {
                continue;
            }
            return c == AYAH_END;
        }
        true
    }

    /// Half-open bounds of the word that contains `i`.
    pub fn word_bounds(&self, i: usize) -> (usize, usize) {
        let mut start = i.min(self.len());
        while start > 0 && !is_word_break(self.at(start - 1)) {
            start -= 1;
        }
        let mut end = i.min(self.len());
        while end < self.len() && !is_word_break(self.at(end)) {
            end += 1;
        }
        (start, end)
    }

    /// Base letters of the word containing `i`, with a dagger alif spelled
    /// as a full alif. Used to match lexical exceptions regardless of
    /// diacritization.
    pub fn word_skeleton(&self, i: usize) -> String {
        let (start, end) = self.word_bounds(i);
        self.chars[start..end]
            .iter()
            .filter_map(|&c| match c {
                DAGGER_ALIF => Some(ALIF),
                c if is_base_letter(c) => Some(c),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::chars::{FATHA, SUKUN};

    // "قُلْ هُوَ" : qaf damma lam sukun space ha damma waw fatha
    fn sample() -> Verse {
        Verse::new("\u{0642}\u{064F}\u{0644}\u{0652} \u{0647}\u{064F}\u{0648}\u{064E}")
    }

    #[test]
    fn out_of_range_reads_are_sentinels() {
        let v = sample();
        assert_eq!(v.at(100), '\0');
        assert_eq!(v.before(0, 1), '\0');
        assert_eq!(v.next_base_letter(100), None);
        assert_eq!(v.prev_base_letter(0), None);
        assert_eq!(v.marks(100).count(), 0);
        assert!(v.is_at_stop(v.len()));
        assert_eq!(v.slice(3, 100), "\u{0652} \u{0647}\u{064F}\u{0648}\u{064E}");
    }

    #[test]
    fn letter_search_skips_marks_and_stops_at_space() {
        let v = sample();
        assert_eq!(v.next_base_letter(0), Some(2));
        assert_eq!(v.next_base_letter(2), None);
        assert_eq!(v.prev_base_letter(2), Some(0));
        assert_eq!(v.prev_base_letter(5), None);
        assert_eq!(v.next_letter_across_words(4), Some(5));
        assert_eq!(v.next_base_letter(5), Some(7));
    }

    #[test]
    fn forward_search_finds_stop_marks() {
        let v = Verse::new("\u{0642}\u{064E}\u{0627}\u{06DD}");
        assert_eq!(v.next_base_letter(2), Some(3));
        assert_eq!(v.next_letter_across_words(3), None);
        assert!(v.is_word_end(2));
    }

    #[test]
    fn diacritic_run_queries() {
        let v = sample();
        assert_eq!(v.marks_end(2), 4);
        assert!(v.has_sukun(2));
        assert!(v.has_vowel(0));
        assert!(!v.has_vowel(2));
        assert!(v.carries(7, FATHA));
        assert!(v.is_quiescent(2));
        assert!(!v.is_quiescent(0));
        assert_eq!(v.marks_end(v.len() - 1), v.len());
        assert!(!v.carries(0, SUKUN));
    }

    #[test]
    fn word_and_stop_predicates() {
        let v = sample();
        assert!(v.is_word_start(0));
        assert!(v.is_word_start(5));
        assert!(!v.is_word_start(2));
        assert!(v.is_same_word(0, 3));
        assert!(!v.is_same_word(2, 5));
        assert!(v.is_word_end(2));
        assert!(!v.is_word_end(0));
        assert!(v.is_at_stop(9));
        assert!(!v.is_at_stop(4));
        assert!(v.is_speech_start(0));
        assert!(!v.is_speech_start(5));
        assert_eq!(v.word_bounds(6), (5, 9));
        assert_eq!(v.word_skeleton(1), "\u{0642}\u{0644}");
    }

    #[test]
    fn speech_restarts_after_ayah_end() {
        let v = Verse::new("\u{0642}\u{064E}\u{0627} \u{06DD} \u{0671}");
        assert!(v.is_speech_start(6));
    }
}
