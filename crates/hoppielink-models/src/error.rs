//! Error types for the `hoppielink-models` crate.
//!
//! Every fallible constructor and parser in this crate returns a
//! [`ParseError`]. The two variants are deliberately distinguishable so
//! callers can tell "not this protocol at all" from "this protocol but
//! malformed" (e.g. warn-and-skip vs. log the offending field).

/// Errors produced when parsing or constructing ACARS messages.
///
/// Both variants are recoverable validation failures; the parser never
/// returns a partially constructed message alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The input matched no recognized keyword grammar or type tag.
    #[error("unrecognized packet format \"{value}\"")]
    UnknownFormat {
        /// The input that matched nothing.
        value: String,
    },

    /// A keyword grammar matched, but one of its fields failed validation
    /// (wrong arity, non-numeric token, out-of-range value, malformed
    /// timestamp).
    #[error("invalid {field} \"{value}\": {reason}")]
    InvalidField {
        /// The name of the offending field.
        field: &'static str,
        /// The value that failed validation.
        value: String,
        /// Human-readable explanation.
        reason: String,
    },
}

impl ParseError {
    /// Shorthand for an [`ParseError::InvalidField`] with owned strings.
    pub(crate) fn invalid(field: &'static str, value: impl Into<String>, reason: &str) -> Self {
        ParseError::InvalidField {
            field,
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    /// Shorthand for an [`ParseError::UnknownFormat`].
    pub(crate) fn unknown(value: impl Into<String>) -> Self {
        ParseError::UnknownFormat {
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_unknown_format() {
        let err = ParseError::unknown("REQUEST EVENT");
        assert_eq!(
            err.to_string(),
            "unrecognized packet format \"REQUEST EVENT\""
        );
    }

    #[test]
    fn error_display_invalid_field() {
        let err = ParseError::invalid("reporting interval", "abc", "must be a positive integer");
        assert_eq!(
            err.to_string(),
            "invalid reporting interval \"abc\": must be a positive integer"
        );
    }

    #[test]
    fn variants_are_distinguishable() {
        let unknown = ParseError::unknown("x");
        let field = ParseError::invalid("latitude", "x", "not numeric");
        assert_ne!(unknown, field);
        assert!(matches!(unknown, ParseError::UnknownFormat { .. }));
        assert!(matches!(field, ParseError::InvalidField { .. }));
    }
}
