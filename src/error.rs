//! Error type for the annotation engine.
//!
//! Annotation itself never fails: empty input yields no spans and unknown
//! characters are copied through as literals. Errors only arise at the edges,
//! when a caller hands the renderer spans that do not fit the text, or names a
//! rule kind that does not exist.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TajweedError {
    /// A span reaches past the end of the text it is rendered against.
    #[error("Span out of bounds: {start}+{length} exceeds text length {len}")]
    SpanOutOfBounds { start: usize, length: usize, len: usize },

    /// A rule kind name that is not part of the stable set.
    #[error("Unknown rule kind: {0}")]
    UnknownKind(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = TajweedError::SpanOutOfBounds { start: 4, length: 3, len: 5 };
        assert_eq!(err.to_string(), "Span out of bounds: 4+3 exceeds text length 5");
        assert_eq!(TajweedError::UnknownKind("madd-x".into()).to_string(), "Unknown rule kind: madd-x");
    }

    #[test]
    fn io_errors_convert() {
        let err: TajweedError = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "stdin closed").into();
        assert!(matches!(err, TajweedError::Io(_)));
    }
}
