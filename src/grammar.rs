use std::fmt::{self, Write};

use crate::codec::{Alphabet, SUFFIX_LEN, VALUE_LEN};
use crate::Error;

/// Maximum length of a prefix.  Generating or parsing an identifier type with a longer
/// prefix fails.
pub const MAX_PREFIX_LEN: usize = 63;

/// Joins a non-empty prefix to the encoded suffix.
pub const SEPARATOR: char = '_';

/// Type marker defining the prefix of an identifier type.
///
/// The prefix is a property of the type, never of an identifier value.  It must match
/// `[a-z]{0,63}`; an empty prefix produces bare suffixes without a separator.
///
/// ```
/// #[derive(Debug)]
/// pub struct UserPrefix;
/// impl typeid_rs::Prefix for UserPrefix {
///     fn prefix() -> &'static str { "user" }
/// }
/// ```
pub trait Prefix {
    fn prefix() -> &'static str;
}

/// Checks that `prefix` is at most 63 characters of `a`-`z`.
///
/// ```
/// use typeid_rs::validate_prefix;
///
/// assert!(validate_prefix("user").is_ok());
/// assert!(validate_prefix("").is_ok());
/// assert!(validate_prefix("User").is_err());
/// ```
pub fn validate_prefix(prefix: &str) -> Result<(), Error> {
    if prefix.len() > MAX_PREFIX_LEN || !prefix.bytes().all(|b| b.is_ascii_lowercase()) {
        return Err(Error::InvalidPrefix {
            prefix: prefix.to_string(),
        });
    }
    Ok(())
}

/// Writes `prefix_suffix`, or only the suffix for an empty prefix.
pub(crate) fn compose<W: Write>(
    out: &mut W,
    prefix: &str,
    value: &[u8; VALUE_LEN],
    alphabet: &Alphabet,
) -> fmt::Result {
    if !prefix.is_empty() {
        out.write_str(prefix)?;
        out.write_char(SEPARATOR)?;
    }
    let mut suffix = [0u8; SUFFIX_LEN];
    alphabet.encode_to(&mut suffix, value);
    out.write_str(std::str::from_utf8(&suffix).map_err(|_| fmt::Error)?)
}

/// Separates `input` into prefix and suffix and checks the prefix against `expected`.
/// Returns the unvalidated suffix.
pub(crate) fn split<'a>(input: &'a str, expected: &'static str) -> Result<&'a str, Error> {
    match input.split_once(SEPARATOR) {
        None if expected.is_empty() => Ok(input),
        None => Err(Error::MissingPrefix {
            expected,
            received: input.to_string(),
        }),
        Some(("", _)) => Err(Error::EmptyPrefixWithSeparator),
        Some((prefix, _)) if prefix != expected => Err(Error::PrefixMismatch {
            expected,
            received: prefix.to_string(),
        }),
        Some((_, suffix)) => Ok(suffix),
    }
}

/// Parses `input` as an identifier with the `expected` prefix and decodes its suffix.
pub(crate) fn parse(
    input: &str,
    expected: &'static str,
    alphabet: &Alphabet,
) -> Result<[u8; VALUE_LEN], Error> {
    let result = split(input, expected).and_then(|suffix| {
        validate_prefix(expected)?;
        alphabet.decode(suffix)
    });
    if let Err(err) = &result {
        tracing::trace!(prefix = expected, error = %err, "rejected identifier");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{LOWER, UPPER};

    const ZEROS: &str = "00000000000000000000000000";

    #[test]
    fn test_validate_prefix() {
        let longest = "a".repeat(MAX_PREFIX_LEN);
        let valid = ["", "a", "user", "account", longest.as_str()];
        for prefix in valid {
            assert!(validate_prefix(prefix).is_ok(), "{prefix:?} should be valid");
        }

        let too_long = "abcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyzabcdefghijkl";
        let invalid = [
            "Prefix", "PREFIX", "pref1x", "pre,fix", "pre_fix", "pre-fix", " prefix", "prefix ",
            "präfix", too_long,
        ];
        for prefix in invalid {
            match validate_prefix(prefix) {
                Err(Error::InvalidPrefix { prefix: received }) => assert_eq!(received, prefix),
                other => panic!("{prefix:?} should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_compose() {
        let value = [0u8; VALUE_LEN];

        let mut out = String::new();
        compose(&mut out, "user", &value, &LOWER).unwrap();
        assert_eq!(out, format!("user_{ZEROS}"));
        assert_eq!(out.len(), "user".len() + 1 + SUFFIX_LEN);

        let mut out = String::new();
        compose(&mut out, "", &[0xff; VALUE_LEN], &UPPER).unwrap();
        assert_eq!(out, "7ZZZZZZZZZZZZZZZZZZZZZZZZZ");
        assert_eq!(out.len(), SUFFIX_LEN);
    }

    #[test]
    fn test_split() {
        let input = format!("user_{ZEROS}");
        assert_eq!(split(&input, "user").unwrap(), ZEROS);
        assert_eq!(split(ZEROS, "").unwrap(), ZEROS);

        // Only the first separator splits.
        assert_eq!(split("user_a_b", "user").unwrap(), "a_b");
    }

    #[test]
    fn test_split_errors() {
        match split(ZEROS, "user") {
            Err(Error::MissingPrefix { expected, received }) => {
                assert_eq!(expected, "user");
                assert_eq!(received, ZEROS);
            }
            other => panic!("unexpected {other:?}"),
        }

        assert!(matches!(split("_", ""), Err(Error::EmptyPrefixWithSeparator)));
        assert!(matches!(
            split(&format!("_{ZEROS}"), ""),
            Err(Error::EmptyPrefixWithSeparator)
        ));
        assert!(matches!(
            split(&format!("_{ZEROS}"), "user"),
            Err(Error::EmptyPrefixWithSeparator)
        ));

        // An empty expected prefix never accepts a separator.
        assert!(matches!(
            split(&format!("user_{ZEROS}"), ""),
            Err(Error::PrefixMismatch { expected: "", .. })
        ));

        match split(&format!("User_{ZEROS}"), "user") {
            Err(Error::PrefixMismatch { expected, received }) => {
                assert_eq!(expected, "user");
                assert_eq!(received, "User");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            split(&format!(" user_{ZEROS}"), "user"),
            Err(Error::PrefixMismatch { .. })
        ));
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            parse(&format!("user_{ZEROS}"), "user", &LOWER).unwrap(),
            [0u8; VALUE_LEN]
        );
        assert!(matches!(
            parse("user_8zzzzzzzzzzzzzzzzzzzzzzzzz", "user", &LOWER),
            Err(Error::Overflow)
        ));
        assert!(matches!(
            parse("user_", "user", &LOWER),
            Err(Error::InvalidLength { length: 0 })
        ));
        assert!(matches!(parse("_", "", &LOWER), Err(Error::EmptyPrefixWithSeparator)));

        // A matching but invalid prefix is still rejected.
        assert!(matches!(
            parse(&format!("Prefix_{ZEROS}"), "Prefix", &LOWER),
            Err(Error::InvalidPrefix { .. })
        ));
    }
}
