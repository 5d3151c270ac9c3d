//! Channel and stream name validation.

use unicode_normalization::UnicodeNormalization;

use crate::constants::RESERVED_CHARS;
use crate::error::NameError;
use crate::scanner::Scanner;

/// Returns true if `c` may not appear in a claim name.
///
/// Besides the URI delimiters in [`RESERVED_CHARS`], names may not carry
/// spaces, control characters, or the noncharacters U+FFFE and U+FFFF.
#[must_use]
pub fn is_reserved_char(c: char) -> bool {
    RESERVED_CHARS.contains(&c)
        || c == ' '
        || c.is_control()
        || matches!(c, '\u{FFFE}' | '\u{FFFF}')
}

/// Checks that `name` is a legal channel or stream name.
///
/// # Errors
///
/// Returns [`NameError::Empty`] for an empty name, and
/// [`NameError::ReservedChar`] with the scalar position of the first
/// reserved character otherwise.
///
/// # Examples
///
/// ```
/// use lbry_uri::{validate_name, NameError};
///
/// assert!(validate_name("what").is_ok());
/// assert_eq!(
///     validate_name("ça:va"),
///     Err(NameError::ReservedChar { char: ':', position: 2 })
/// );
/// ```
pub fn validate_name(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }

    let mut scanner = Scanner::new(name);
    let _ = scanner.take_until(is_reserved_char);
    match scanner.peek() {
        Some(c) => Err(NameError::ReservedChar {
            char: c,
            position: scanner.position(),
        }),
        None => Ok(()),
    }
}

/// Returns true if `name` is a legal channel or stream name.
///
/// Channel names are checked without their leading `@`.
///
/// ```
/// use lbry_uri::is_name_valid;
///
/// assert!(is_name_valid("test*1"));
/// assert!(!is_name_valid("bad/name"));
/// assert!(!is_name_valid(""));
/// ```
#[must_use]
pub fn is_name_valid(name: &str) -> bool {
    validate_name(name).is_ok()
}

/// Normalizes a name for case-insensitive comparison and lookup.
///
/// Applies canonical decomposition (NFD) and then lowercases, so names that
/// differ only in case or in composed/decomposed accents share one key.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.nfd().collect::<String>().to_lowercase()
}
