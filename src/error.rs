//! Error types for LBRY URI parsing.

use std::fmt;

/// Errors that can occur when parsing an LBRY URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The input that failed to parse
    pub input: String,
    /// The specific error that occurred
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Returns true if the input was rejected for lacking a protocol prefix.
    #[must_use]
    pub const fn is_missing_protocol(&self) -> bool {
        matches!(self.kind, ParseErrorKind::MissingProtocol)
    }

    /// Returns the grammar violation, if that is why parsing failed.
    #[must_use]
    pub const fn format_error(&self) -> Option<&FormatError> {
        match &self.kind {
            ParseErrorKind::InvalidFormat(e) => Some(e),
            ParseErrorKind::MissingProtocol => None,
        }
    }
}

/// Specific parsing error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A protocol prefix was required but none was recognized
    MissingProtocol,
    /// The URI does not follow the grammar
    InvalidFormat(FormatError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse LBRY URI '{}': ", self.input)?;
        match &self.kind {
            ParseErrorKind::MissingProtocol => write!(
                f,
                "missing protocol; URI must start with 'lbry://' or a recognized web host"
            ),
            ParseErrorKind::InvalidFormat(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ParseErrorKind::InvalidFormat(e) => Some(e),
            ParseErrorKind::MissingProtocol => None,
        }
    }
}

/// Grammar violations reported under [`ParseErrorKind::InvalidFormat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The URI names neither a channel nor a stream
    MissingName,
    /// A channel marker is not followed by a name
    EmptyChannelName,
    /// A channel segment is followed by a slash but no stream
    MissingStreamAfterChannel,
    /// A channel segment does not start with `@`
    MissingChannelMarker {
        /// The offending segment
        segment: String,
    },
    /// A `@` appeared at the start of a stream segment
    UnexpectedChannelMarker {
        /// The offending segment
        segment: String,
    },
    /// A channel or stream name failed validation
    InvalidName {
        /// The rejected name
        name: String,
        /// Reason for invalidity
        reason: NameError,
    },
    /// A reference sigil is not followed by a value
    EmptyReference {
        /// The sigil that was found
        sigil: char,
    },
    /// A segment carries more than one claim reference
    MultipleReferences {
        /// The offending segment
        segment: String,
    },
    /// A claim id is not a valid hex string
    InvalidClaimId {
        /// The rejected value
        value: String,
        /// Reason for invalidity
        reason: ClaimIdError,
    },
    /// A bid position is not a positive integer
    InvalidBidPosition {
        /// The rejected value
        value: String,
    },
    /// A claim sequence was attached to a segment
    UnsupportedClaimSequence {
        /// The rejected sequence number
        sequence: u64,
    },
    /// Percent-decoding the URI did not produce valid UTF-8
    InvalidPercentEncoding,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "URI does not include a name"),
            Self::EmptyChannelName => write!(f, "no channel name after '@'"),
            Self::MissingStreamAfterChannel => {
                write!(f, "channel is followed by '/' but no stream name")
            }
            Self::MissingChannelMarker { segment } => {
                write!(f, "channel segment '{segment}' must start with '@'")
            }
            Self::UnexpectedChannelMarker { segment } => {
                write!(f, "stream segment '{segment}' cannot start with '@'")
            }
            Self::InvalidName { name, reason } => write!(f, "invalid name '{name}': {reason}"),
            Self::EmptyReference { sigil } => {
                write!(f, "no claim reference provided after '{sigil}'")
            }
            Self::MultipleReferences { segment } => {
                write!(
                    f,
                    "segment '{segment}' has more than one claim reference; use one of ':', '#' or '$'"
                )
            }
            Self::InvalidClaimId { value, reason } => {
                write!(f, "invalid claim ID '{value}': {reason}")
            }
            Self::InvalidBidPosition { value } => {
                write!(f, "bid position '{value}' must be a positive integer")
            }
            Self::UnsupportedClaimSequence { sequence } => {
                write!(
                    f,
                    "claim sequence {sequence} has no written form; use a claim ID or bid position"
                )
            }
            Self::InvalidPercentEncoding => {
                write!(f, "percent-encoded bytes do not form valid UTF-8")
            }
        }
    }
}

impl std::error::Error for FormatError {}

/// Errors for builder operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// The trailing path contains a query separator
    InvalidPath {
        /// The rejected path
        path: String,
        /// The offending character
        char: char,
    },
}

impl fmt::Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPath { path, char } => {
                write!(f, "path '{path}' cannot contain {char:?}; '?' starts the query")
            }
        }
    }
}

impl std::error::Error for BuilderError {}

/// Errors for claim name validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// Name is empty
    Empty,
    /// Name contains a reserved character
    ReservedChar {
        /// The reserved character
        char: char,
        /// Position in the name, in Unicode scalar values
        position: usize,
    },
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "name cannot be empty"),
            Self::ReservedChar { char, position } => {
                write!(
                    f,
                    "reserved character {char:?} at position {position}; names cannot contain spaces, control characters or any of ?$#@;:/\\=\"<>%{{}}|^~[]`"
                )
            }
        }
    }
}

impl std::error::Error for NameError {}

/// Errors for claim id parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimIdError {
    /// Claim id is empty
    Empty,
    /// Claim id exceeds the configured maximum length
    TooLong {
        /// Maximum allowed length
        max: usize,
        /// Actual length
        actual: usize,
    },
    /// Non-hex character
    InvalidChar {
        /// The invalid character
        char: char,
        /// Position in the input
        position: usize,
    },
}

impl fmt::Display for ClaimIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "claim ID cannot be empty"),
            Self::TooLong { max, actual } => {
                write!(f, "claim ID length {actual} exceeds maximum {max}")
            }
            Self::InvalidChar { char, position } => {
                write!(
                    f,
                    "invalid character {char:?} at position {position}; only hex digits allowed"
                )
            }
        }
    }
}

impl std::error::Error for ClaimIdError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_input() {
        let err = ParseError {
            input: "@".to_string(),
            kind: ParseErrorKind::InvalidFormat(FormatError::EmptyChannelName),
        };
        assert_eq!(
            err.to_string(),
            "failed to parse LBRY URI '@': no channel name after '@'"
        );
    }

    #[test]
    fn missing_protocol_helpers() {
        let err = ParseError {
            input: String::new(),
            kind: ParseErrorKind::MissingProtocol,
        };
        assert!(err.is_missing_protocol());
        assert!(err.format_error().is_none());
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn format_error_is_source() {
        let err = ParseError {
            input: "a$0".to_string(),
            kind: ParseErrorKind::InvalidFormat(FormatError::InvalidBidPosition {
                value: "0".to_string(),
            }),
        };
        assert!(!err.is_missing_protocol());
        assert!(std::error::Error::source(&err).is_some());
    }
}
