//! Scalar-safe scanning over URI text.
//!
//! Every position this module hands out is produced by `char_indices`, so a
//! match boundary always falls between two Unicode scalar values. Slicing
//! the input with a [`Match`] can therefore never split a multi-byte code
//! point, whatever script the name is written in.

use std::ops::Range;

/// A set of characters a [`Scanner`] can test against.
///
/// Implemented for a single `char`, arrays and slices of `char`, and any
/// `Fn(char) -> bool` predicate.
pub trait CharClass {
    /// Returns true if `c` belongs to the class.
    fn matches(&self, c: char) -> bool;
}

impl CharClass for char {
    fn matches(&self, c: char) -> bool {
        *self == c
    }
}

impl<const N: usize> CharClass for [char; N] {
    fn matches(&self, c: char) -> bool {
        self.contains(&c)
    }
}

impl CharClass for &[char] {
    fn matches(&self, c: char) -> bool {
        self.contains(&c)
    }
}

impl<F> CharClass for F
where
    F: Fn(char) -> bool,
{
    fn matches(&self, c: char) -> bool {
        self(c)
    }
}

/// A matched region of the scanned input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'a> {
    text: &'a str,
    span: Range<usize>,
    bytes: Range<usize>,
}

impl<'a> Match<'a> {
    /// Returns the matched text.
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        self.text
    }

    /// Returns the match position measured in Unicode scalar values.
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the match position measured in UTF-8 bytes.
    #[must_use]
    pub fn byte_range(&self) -> Range<usize> {
        self.bytes.clone()
    }

    /// Returns true if nothing was matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A forward-only cursor over a string, advancing one scalar value at a time.
///
/// # Examples
///
/// ```
/// use lbry_uri::Scanner;
///
/// let mut scanner = Scanner::new("名前:abc");
/// let name = scanner.take_until(':');
/// assert_eq!(name.as_str(), "名前");
/// assert_eq!(name.span(), 0..2);
/// assert!(scanner.eat(':'));
/// assert_eq!(scanner.rest().as_str(), "abc");
/// ```
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: &'a str,
    byte_pos: usize,
    scalar_pos: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner positioned at the start of `input`.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            byte_pos: 0,
            scalar_pos: 0,
        }
    }

    /// Returns the next character without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Consumes and returns the next character.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.byte_pos += c.len_utf8();
        self.scalar_pos += 1;
        Some(c)
    }

    /// Consumes the next character if it belongs to `class`.
    pub fn eat(&mut self, class: impl CharClass) -> bool {
        match self.peek() {
            Some(c) if class.matches(c) => {
                self.bump();
                true
            }
            _ => false,
        }
    }

    /// Consumes characters while they belong to `class`.
    pub fn take_while(&mut self, class: impl CharClass) -> Match<'a> {
        let start = self.mark();
        while let Some(c) = self.peek() {
            if !class.matches(c) {
                break;
            }
            self.bump();
        }
        self.since(start)
    }

    /// Consumes characters up to, not including, the first one in `class`.
    pub fn take_until(&mut self, class: impl CharClass) -> Match<'a> {
        self.take_while(|c: char| !class.matches(c))
    }

    /// Finds the next character in `class` without moving the cursor.
    #[must_use]
    pub fn find(&self, class: impl CharClass) -> Option<Match<'a>> {
        let rest = self.remaining();
        rest.char_indices()
            .enumerate()
            .find(|(_, (_, c))| class.matches(*c))
            .map(|(offset, (byte, c))| {
                let start = self.byte_pos + byte;
                let end = start + c.len_utf8();
                Match {
                    text: &self.input[start..end],
                    span: self.scalar_pos + offset..self.scalar_pos + offset + 1,
                    bytes: start..end,
                }
            })
    }

    /// Consumes everything left in the input.
    pub fn rest(&mut self) -> Match<'a> {
        let start = self.mark();
        self.scalar_pos += self.remaining().chars().count();
        self.byte_pos = self.input.len();
        self.since(start)
    }

    /// Returns true once the whole input has been consumed.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        self.byte_pos >= self.input.len()
    }

    /// Returns the current position in scalar values.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.scalar_pos
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.byte_pos..]
    }

    const fn mark(&self) -> (usize, usize) {
        (self.byte_pos, self.scalar_pos)
    }

    fn since(&self, (byte_start, scalar_start): (usize, usize)) -> Match<'a> {
        Match {
            text: &self.input[byte_start..self.byte_pos],
            span: scalar_start..self.scalar_pos,
            bytes: byte_start..self.byte_pos,
        }
    }
}

/// Returns the first character of `input` that belongs to `class`.
///
/// # Examples
///
/// ```
/// use lbry_uri::scanner;
///
/// let hit = scanner::find("é$1", '$').unwrap();
/// assert_eq!(hit.span(), 1..2);
/// assert_eq!(hit.byte_range(), 2..3);
/// assert!(scanner::find("plain", '$').is_none());
/// ```
#[must_use]
pub fn find(input: &str, class: impl CharClass) -> Option<Match<'_>> {
    Scanner::new(input).find(class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_until_stops_before_class() {
        let mut scanner = Scanner::new("stuff#2");
        let name = scanner.take_until(['#', ':', '$']);
        assert_eq!(name.as_str(), "stuff");
        assert_eq!(name.span(), 0..5);
        assert_eq!(scanner.peek(), Some('#'));
    }

    #[test]
    fn spans_count_scalars_not_bytes() {
        let mut scanner = Scanner::new("\u{D799}\u{E000}x");
        let m = scanner.take_until('x');
        assert_eq!(m.span(), 0..2);
        assert_eq!(m.byte_range(), 0..6);
        assert_eq!(m.as_str(), "\u{D799}\u{E000}");
    }

    #[test]
    fn multi_scalar_text_is_never_split() {
        // Devanagari letter plus combining vowel sign, then an emoji ZWJ sequence.
        let input = "क्षि👩‍💻:ab";
        let mut scanner = Scanner::new(input);
        let name = scanner.take_until(':');
        assert_eq!(name.as_str(), "क्षि👩‍💻");
        assert!(scanner.eat(':'));
        assert_eq!(scanner.rest().as_str(), "ab");
        assert!(scanner.is_eof());
    }

    #[test]
    fn find_does_not_advance() {
        let scanner = Scanner::new("a/b");
        let hit = scanner.find('/').unwrap();
        assert_eq!(hit.as_str(), "/");
        assert_eq!(scanner.position(), 0);
    }

    #[test]
    fn find_reports_none_without_match() {
        assert!(find("", '@').is_none());
        assert!(find("abc", '@').is_none());
    }

    #[test]
    fn predicate_class() {
        let mut scanner = Scanner::new("123abc");
        let digits = scanner.take_while(|c: char| c.is_ascii_digit());
        assert_eq!(digits.as_str(), "123");
        assert!(!scanner.eat(|c: char| c.is_ascii_digit()));
    }

    #[test]
    fn empty_input_is_eof() {
        let mut scanner = Scanner::new("");
        assert!(scanner.is_eof());
        assert_eq!(scanner.bump(), None);
        assert!(scanner.rest().is_empty());
    }
}
