//! Interleaves literal verse text with marked-up rule spans.

use crate::engine::resolve;
use crate::{Annotation, Options, RuleKind, TajweedError};

/// Render `text` with every span wrapped as `<span class="{kind}">..</span>`.
///
/// Spans are resolved first (sorted, overlaps dropped). Literal text between
/// spans is copied unchanged, without escaping.
pub(crate) fn render(text: &str, spans: &[Annotation], options: &Options) -> Result<String, TajweedError> {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    if let Some(bad) = spans.iter().find(|a| a.start.checked_add(a.length).is_none_or(|end| end > len)) {
        return Err(TajweedError::SpanOutOfBounds { start: bad.start, length: bad.length, len });
    }

    let (spans, _) = resolve(spans.to_vec());
    let mut out = String::with_capacity(text.len() + spans.len() * 32);
    let mut cursor = 0;
    for a in spans {
        out.extend(&chars[cursor..a.start]);
        let body = &chars[a.start..a.end()];
        cursor = a.end();

        if a.kind == RuleKind::HiddenMarker {
            continue;
        }
        if options.disabled.has(a.kind) {
            out.extend(body);
            continue;
        }
        if a.kind.is_waqf() && options.waqf_separator && out.chars().next_back().is_some_and(|c| !c.is_whitespace()) {
            out.push(' ');
        }
        out.push_str("<span class=\"");
        out.push_str(a.kind.name());
        out.push_str("\">");
        out.extend(body);
        out.push_str("</span>");
    }
    out.extend(&chars[cursor..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KindSet;

    fn plain() -> Options {
        Options { waqf_separator: false, ..Options::default() }
    }

    #[test]
    fn empty_text_renders_empty() {
        assert_eq!(render("", &[], &Options::default()).unwrap(), "");
    }

    #[test]
    fn spans_wrap_their_characters() {
        let spans = [Annotation::new(1, 2, RuleKind::Qalqalah)];
        assert_eq!(render("abcd", &spans, &plain()).unwrap(), "a<span class=\"qalqalah\">bc</span>d");
    }

    #[test]
    fn hidden_markers_vanish() {
        let spans = [Annotation::new(0, 1, RuleKind::Qasr), Annotation::new(1, 1, RuleKind::HiddenMarker)];
        assert_eq!(render("a!b", &spans, &plain()).unwrap(), "<span class=\"qasr\">a</span>b");
    }

    #[test]
    fn zero_length_span_is_an_empty_marker() {
        let spans = [Annotation::new(1, 0, RuleKind::Ghunna)];
        assert_eq!(render("ab", &spans, &plain()).unwrap(), "a<span class=\"ghunna\"></span>b");
    }

    #[test]
    fn waqf_gets_a_separator_once() {
        let spans = [Annotation::new(1, 1, RuleKind::WaqfJaiz)];
        let opts = Options::default();
        assert_eq!(render("a\u{06DA}", &spans, &opts).unwrap(), "a <span class=\"waqf-jaiz\">\u{06DA}</span>");
        let spaced = [Annotation::new(2, 1, RuleKind::WaqfJaiz)];
        assert_eq!(render("a \u{06DA}", &spaced, &opts).unwrap(), "a <span class=\"waqf-jaiz\">\u{06DA}</span>");
        let leading = [Annotation::new(0, 1, RuleKind::WaqfJaiz)];
        assert_eq!(render("\u{06DA}", &leading, &opts).unwrap(), "<span class=\"waqf-jaiz\">\u{06DA}</span>");
    }

    #[test]
    fn disabled_kinds_render_as_text() {
        let spans = [Annotation::new(0, 1, RuleKind::Ikhfa), Annotation::new(1, 1, RuleKind::Iqlab)];
        let opts = Options { disabled: KindSet::of(RuleKind::Ikhfa), ..plain() };
        assert_eq!(render("ab", &spans, &opts).unwrap(), "a<span class=\"iqlab\">b</span>");
    }

    #[test]
    fn overlapping_input_keeps_the_first() {
        let spans = [Annotation::new(0, 2, RuleKind::MaddAsli), Annotation::new(1, 2, RuleKind::Ikhfa)];
        assert_eq!(render("abc", &spans, &plain()).unwrap(), "<span class=\"madd-asli\">ab</span>c");
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let spans = [Annotation::new(2, 3, RuleKind::MaddAsli)];
        let err = render("abc", &spans, &plain()).unwrap_err();
        assert!(matches!(err, TajweedError::SpanOutOfBounds { start: 2, length: 3, len: 3 }));
    }

    #[test]
    fn overflowing_span_is_an_error() {
        let spans = [Annotation::new(usize::MAX, 1, RuleKind::Ikhfa)];
        let err = render("abc", &spans, &plain()).unwrap_err();
        assert!(matches!(err, TajweedError::SpanOutOfBounds { start: usize::MAX, length: 1, len: 3 }));
    }
}
