use thiserror::Error;

use crate::codec::SUFFIX_LEN;
use crate::grammar::MAX_PREFIX_LEN;

/// Boxed error returned by value generators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error returned when generating, parsing or decoding identifiers.
#[derive(Debug, Error)]
pub enum Error {
    /// The prefix of the identifier type is longer than 63 bytes or contains something
    /// other than `a`-`z`.
    #[error("invalid prefix `{prefix}`: expected at most {} characters matching [a-z]", MAX_PREFIX_LEN)]
    InvalidPrefix { prefix: String },

    /// The input has no separator, but the identifier type has a non-empty prefix.
    #[error("no prefix in `{received}`, expected `{expected}`")]
    MissingPrefix {
        expected: &'static str,
        received: String,
    },

    /// The input starts with a separator.
    #[error("prefix cannot be empty when there's a separator")]
    EmptyPrefixWithSeparator,

    /// The input carries the prefix of some other identifier type.
    #[error("prefix was `{received}`, expected `{expected}`")]
    PrefixMismatch {
        expected: &'static str,
        received: String,
    },

    /// The suffix is not exactly 26 bytes long.
    #[error("suffix length is {length}, expected {}", SUFFIX_LEN)]
    InvalidLength { length: usize },

    /// The suffix contains a character outside of the alphabet.
    #[error("invalid character {character:?} at position {index} of suffix")]
    InvalidCharacter { index: usize, character: char },

    /// The suffix encodes a value wider than 128 bits.
    #[error("suffix must start with a 0-7 digit to avoid overflows")]
    Overflow,

    /// The value generator failed.
    #[error("generate value: {0}")]
    Generate(#[source] BoxError),

    /// A raw UUID could not be parsed.
    #[error("invalid uuid: {0}")]
    InvalidUuid(#[from] uuid::Error),

    /// A database column held NULL.
    #[error("cannot load NULL into a typed identifier")]
    NullValue,
}

impl Error {
    /// Returns true if the error concerns the prefix part of the identifier.
    pub fn is_prefix_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidPrefix { .. }
                | Error::MissingPrefix { .. }
                | Error::EmptyPrefixWithSeparator
                | Error::PrefixMismatch { .. }
        )
    }

    /// Returns true if the error concerns the encoded suffix.
    pub fn is_suffix_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidLength { .. } | Error::InvalidCharacter { .. } | Error::Overflow
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(Error::EmptyPrefixWithSeparator.is_prefix_error());
        assert!(Error::InvalidPrefix {
            prefix: "A".to_string()
        }
        .is_prefix_error());
        assert!(!Error::Overflow.is_prefix_error());

        assert!(Error::Overflow.is_suffix_error());
        assert!(Error::InvalidLength { length: 3 }.is_suffix_error());
        assert!(!Error::NullValue.is_suffix_error());
        assert!(!Error::NullValue.is_prefix_error());
    }

    #[test]
    fn test_messages() {
        let err = Error::PrefixMismatch {
            expected: "user",
            received: "account".to_string(),
        };
        assert_eq!(err.to_string(), "prefix was `account`, expected `user`");

        let err = Error::InvalidLength { length: 25 };
        assert_eq!(err.to_string(), "suffix length is 25, expected 26");

        let err = Error::InvalidPrefix {
            prefix: "User".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid prefix `User`: expected at most 63 characters matching [a-z]"
        );

        let err = Error::InvalidCharacter {
            index: 4,
            character: 'u',
        };
        assert_eq!(
            err.to_string(),
            "invalid character 'u' at position 4 of suffix"
        );
    }

    #[test]
    fn test_generate_keeps_source() {
        use std::error::Error as _;

        let inner: BoxError = "entropy exhausted".into();
        let err = Error::Generate(inner);
        assert_eq!(err.to_string(), "generate value: entropy exhausted");
        assert_eq!(err.source().unwrap().to_string(), "entropy exhausted");
    }
}
