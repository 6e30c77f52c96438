//! Character classification.
//!
//! Pure, total functions over a single `char`. The out-of-range sentinel
//! `'\0'` (see `Verse::at`) classifies as nothing, so callers never need to
//! bounds-check before asking a question.

use crate::RuleKind;

pub const FATHATAN: char = '\u{064B}';
pub const DAMMATAN: char = '\u{064C}';
pub const KASRATAN: char = '\u{064D}';
pub const FATHA: char = '\u{064E}';
pub const DAMMA: char = '\u{064F}';
pub const KASRA: char = '\u{0650}';
pub const SHADDA: char = '\u{0651}';
pub const SUKUN: char = '\u{0652}';
pub const MADDAH_ABOVE: char = '\u{0653}';
pub const HAMZA_ABOVE: char = '\u{0654}';
pub const HAMZA_BELOW: char = '\u{0655}';
pub const SUBSCRIPT_ALIF: char = '\u{0656}';
pub const DAGGER_ALIF: char = '\u{0670}';
/// Uthmani sukun (small high dotless head of khah).
pub const UTHMANI_SUKUN: char = '\u{06E1}';
/// Small high rounded zero: the letter is never pronounced.
pub const ALWAYS_SILENT: char = '\u{06DF}';
/// Small high upright rectangular zero: silent except at a stop.
pub const SILENT_UNLESS_STOP: char = '\u{06E0}';
pub const SMALL_WAW: char = '\u{06E5}';
pub const SMALL_YEH: char = '\u{06E6}';
pub const TATWEEL: char = '\u{0640}';

pub const HAMZA: char = '\u{0621}';
pub const ALIF_MADDAH: char = '\u{0622}';
pub const ALIF_HAMZA_ABOVE: char = '\u{0623}';
pub const WAW_HAMZA: char = '\u{0624}';
pub const ALIF_HAMZA_BELOW: char = '\u{0625}';
pub const YEH_HAMZA: char = '\u{0626}';
pub const ALIF: char = '\u{0627}';
pub const RA: char = '\u{0631}';
pub const QAF: char = '\u{0642}';
pub const KAF: char = '\u{0643}';
pub const LAM: char = '\u{0644}';
pub const MEEM: char = '\u{0645}';
pub const NOON: char = '\u{0646}';
pub const HA: char = '\u{0647}';
pub const WAW: char = '\u{0648}';
pub const ALIF_MAKSURA: char = '\u{0649}';
pub const YA: char = '\u{064A}';
pub const HAMZAT_WASL: char = '\u{0671}';
pub const FARSI_YEH: char = '\u{06CC}';

pub const AYAH_END: char = '\u{06DD}';
pub const RUB_EL_HIZB: char = '\u{06DE}';
pub const SAJDAH: char = '\u{06E9}';

pub const QASR_MARK: char = '\u{08D1}';
pub const MED_MARK: char = '\u{08D2}';
pub const TASHIIL_MARK: char = '\u{08D3}';
pub const SAKTA_MARK: char = '\u{08D4}';
pub const ISHMAM_MARK: char = '\u{08D5}';

pub const HAMZA_FORMS: &[char] = &[HAMZA, ALIF_HAMZA_ABOVE, ALIF_HAMZA_BELOW, WAW_HAMZA, YEH_HAMZA];
pub const QALQALAH_LETTERS: &[char] = &['ق', 'ط', 'ب', 'ج', 'د'];
pub const YANMOU_LETTERS: &[char] = &['ي', 'ن', 'م', 'و', FARSI_YEH];
pub const IDGHAM_BILA_GHUNNA_LETTERS: &[char] = &['ل', 'ر'];
pub const IQLAB_LETTERS: &[char] = &['ب'];
pub const IKHFA_LETTERS: &[char] = &['ت', 'ث', 'ج', 'د', 'ذ', 'ز', 'س', 'ش', 'ص', 'ض', 'ط', 'ظ', 'ف', 'ق', 'ك'];
pub const SUN_LETTERS: &[char] = &['ت', 'ث', 'د', 'ذ', 'ر', 'ز', 'س', 'ش', 'ص', 'ض', 'ط', 'ظ', 'ل', 'ن'];
pub const HURUF_MUQATTAAT: &[char] =
    &['ا', 'ل', 'م', 'ص', 'ر', 'ك', 'ه', 'ي', 'ع', 'ط', 'س', 'ح', 'ق', 'ن', 'ض'];
/// One-letter prefixes that can sit in front of the definite article.
pub const ARTICLE_PREFIXES: &[char] = &['و', 'ف', 'ب', 'ك'];

bitflags::bitflags! {
    /// Coarse category of a single character.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CharClass: u16 {
        const LETTER     = 1 << 0;
        const DIACRITIC  = 1 << 1;
        const SPACE      = 1 << 2;
        const WORD_BREAK = 1 << 3;
        const WAQF       = 1 << 4;
        const AYAH_END   = 1 << 5;
        /// Sajdah and rub-el-hizb signs.
        const SPECIAL    = 1 << 6;
        /// Internal minor-mark code points (hidden from output).
        const MARKER     = 1 << 7;
        const TATWEEL    = 1 << 8;
    }
}

/// Classify `c`. Unknown characters (Latin, digits, punctuation, `'\0'`)
/// yield the empty set.
pub fn classify(c: char) -> CharClass {
    let mut class = CharClass::empty();
    if is_base_letter(c) {
        class |= CharClass::LETTER;
    }
    if is_diacritic(c) {
        class |= CharClass::DIACRITIC;
    }
    if c.is_whitespace() {
        class |= CharClass::SPACE;
    }
    if waqf_kind(c).is_some() {
        class |= CharClass::WAQF;
    }
    if c == AYAH_END {
        class |= CharClass::AYAH_END;
    }
    if c == SAJDAH || c == RUB_EL_HIZB {
        class |= CharClass::SPECIAL;
    }
    if marker_kind(c).is_some() {
        class |= CharClass::MARKER;
    }
    if c == TATWEEL {
        class |= CharClass::TATWEEL;
    }
    if is_word_break(c) {
        class |= CharClass::WORD_BREAK;
    }
    class
}

pub fn is_base_letter(c: char) -> bool {
    matches!(
        c,
        '\u{0621}'..='\u{063A}'
            | '\u{0641}'..='\u{064A}'
            | '\u{066E}'..='\u{066F}'
            | '\u{0671}'..='\u{06D3}'
            | '\u{06D5}'
            | '\u{06EE}'..='\u{06EF}'
            | '\u{06FA}'..='\u{06FC}'
    )
}

/// Vowel signs, shadda, sukun, tanween, madd marks and the small Quranic
/// marks. Pause signs are not diacritics even where they sit in the same
/// Unicode block.
pub fn is_diacritic(c: char) -> bool {
    match c {
        '\u{0615}' | '\u{0619}' => false,
        '\u{0610}'..='\u{061A}' => true,
        '\u{064B}'..='\u{065F}' => true,
        '\u{0670}' | '\u{06DC}' => true,
        '\u{06DF}'..='\u{06E8}' => true,
        '\u{06EA}'..='\u{06ED}' => true,
        _ => false,
    }
}

/// Fatha, damma or kasra.
pub fn is_vowel(c: char) -> bool {
    matches!(c, FATHA | DAMMA | KASRA)
}

pub fn is_sukun(c: char) -> bool {
    matches!(c, SUKUN | UTHMANI_SUKUN)
}

pub fn is_tanween(c: char) -> bool {
    matches!(c, FATHATAN | DAMMATAN | KASRATAN)
}

/// Dagger alif, subscript alif, maddah above, small waw, small yeh.
pub fn is_madd_mark(c: char) -> bool {
    matches!(c, DAGGER_ALIF | SUBSCRIPT_ALIF | MADDAH_ABOVE | SMALL_WAW | SMALL_YEH)
}

pub fn is_hamza(c: char) -> bool {
    HAMZA_FORMS.contains(&c)
}

/// Pause sign to pause class.
pub fn waqf_kind(c: char) -> Option<RuleKind> {
    match c {
        '\u{06D8}' => Some(RuleKind::WaqfLazim),
        '\u{0615}' | '\u{06D7}' => Some(RuleKind::WaqfAwla),
        '\u{06DA}' | '\u{0619}' => Some(RuleKind::WaqfJaiz),
        '\u{06D6}' | '\u{06D9}' => Some(RuleKind::WaqfContinue),
        '\u{06DB}' => Some(RuleKind::WaqfMuanaqah),
        _ => None,
    }
}

/// Internal minor-mark code point to the kind it applies to the preceding
/// letter.
pub fn marker_kind(c: char) -> Option<RuleKind> {
    match c {
        QASR_MARK => Some(RuleKind::Qasr),
        MED_MARK => Some(RuleKind::Med),
        TASHIIL_MARK => Some(RuleKind::Tashiil),
        SAKTA_MARK => Some(RuleKind::Sakta),
        ISHMAM_MARK => Some(RuleKind::Ishmam),
        _ => None,
    }
}

/// Characters that end a pronounced word: whitespace, pause signs, the
/// ayah-end mark and the standalone Quranic symbols.
pub fn is_word_break(c: char) -> bool {
    c.is_whitespace() || waqf_kind(c).is_some() || matches!(c, AYAH_END | SAJDAH | RUB_EL_HIZB)
}

/// Characters that end a rule's scope when searching forward: a pause sign,
/// the ayah-end mark or the sajdah sign.
pub fn is_stop_mark(c: char) -> bool {
    waqf_kind(c).is_some() || matches!(c, AYAH_END | SAJDAH)
}

/// Characters letter navigation steps over.
pub fn is_transparent(c: char) -> bool {
    is_diacritic(c) || c == TATWEEL || marker_kind(c).is_some()
}

pub fn is_alif_like(c: char) -> bool {
    matches!(c, ALIF | ALIF_MAKSURA | ALIF_MADDAH)
}

pub fn is_ya_like(c: char) -> bool {
    matches!(c, YA | FARSI_YEH | ALIF_MAKSURA)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_letters_marks_and_breaks() {
        assert_eq!(classify('ب'), CharClass::LETTER);
        assert_eq!(classify(FATHA), CharClass::DIACRITIC);
        assert_eq!(classify(' '), CharClass::SPACE | CharClass::WORD_BREAK);
        assert_eq!(classify('\u{06D8}'), CharClass::WAQF | CharClass::WORD_BREAK);
        assert_eq!(classify(AYAH_END), CharClass::AYAH_END | CharClass::WORD_BREAK);
        assert_eq!(classify(SAJDAH), CharClass::SPECIAL | CharClass::WORD_BREAK);
        assert_eq!(classify(QASR_MARK), CharClass::MARKER);
        assert_eq!(classify(TATWEEL), CharClass::TATWEEL);
        assert!(classify('x').is_empty());
        assert!(classify('\0').is_empty());
    }

    #[test]
    fn waqf_signs_are_not_diacritics() {
        for c in ['\u{0615}', '\u{0619}', '\u{06D6}', '\u{06DB}'] {
            assert!(waqf_kind(c).is_some());
            assert!(!is_diacritic(c));
        }
        assert!(is_diacritic('\u{0618}'));
        assert!(is_diacritic(UTHMANI_SUKUN));
    }

    #[test]
    fn waqf_table_maps_eight_signs_to_five_classes() {
        let kinds: Vec<RuleKind> = ('\u{0600}'..='\u{06FF}').filter_map(waqf_kind).collect();
        assert_eq!(kinds.len(), 8);
        let mut distinct = kinds.clone();
        distinct.sort();
        distinct.dedup();
        assert_eq!(distinct.len(), 5);
    }

    #[test]
    fn vowel_identity() {
        assert!(is_vowel(DAMMA) && !is_vowel(SUKUN) && !is_vowel(DAMMATAN));
        assert!(is_sukun(SUKUN) && is_sukun(UTHMANI_SUKUN));
        assert!(is_tanween(KASRATAN) && !is_tanween(KASRA));
        assert!(is_madd_mark(DAGGER_ALIF) && is_madd_mark(MADDAH_ABOVE) && !is_madd_mark(SHADDA));
    }

    #[test]
    fn letter_tables_have_expected_sizes() {
        assert_eq!(IKHFA_LETTERS.len(), 15);
        assert_eq!(SUN_LETTERS.len(), 14);
        assert_eq!(QALQALAH_LETTERS.len(), 5);
        assert!(IKHFA_LETTERS.iter().all(|c| is_base_letter(*c)));
    }
}
