//! Channel and stream segments of an LBRY URI.

use std::fmt;

use crate::claim_id::ClaimId;
use crate::claim_ref::ClaimRef;
use crate::constants::{CHANNEL_MARKER, REFERENCE_SIGILS};
use crate::error::FormatError;
use crate::name::{normalize_name, validate_name};
use crate::scanner::Scanner;

/// Which half of the address a segment occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// A channel segment, written with a leading `@`.
    Channel,
    /// A stream (content) segment.
    Stream,
}

/// A claim name with an optional claim reference.
///
/// # Examples
///
/// ```
/// use lbry_uri::{Segment, SegmentKind};
///
/// let channel = Segment::parse("@lbry#3f", SegmentKind::Channel).unwrap();
/// assert_eq!(channel.name(), "lbry");
/// assert_eq!(channel.claim_id().map(|id| id.as_str()), Some("3f"));
///
/// let stream = Segment::parse("what$2", SegmentKind::Stream).unwrap();
/// assert_eq!(stream.bid_position(), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    name: String,
    reference: Option<ClaimRef>,
}

impl Segment {
    /// Creates a segment from a name and an optional reference.
    ///
    /// The name is given without any leading `@`. The result always writes
    /// out to text that parses back to the same segment, so claim sequences
    /// (which have no written form) and zero bid positions are refused.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::InvalidName` if the name is empty or contains a
    /// reserved character, `FormatError::InvalidBidPosition` for a bid
    /// position of 0, and `FormatError::UnsupportedClaimSequence` for any
    /// claim sequence.
    pub fn new(name: &str, reference: Option<ClaimRef>) -> Result<Self, FormatError> {
        validate_name(name).map_err(|reason| FormatError::InvalidName {
            name: name.to_string(),
            reason,
        })?;

        match reference {
            Some(ClaimRef::BidPosition(0)) => {
                return Err(FormatError::InvalidBidPosition {
                    value: "0".to_string(),
                });
            }
            Some(ClaimRef::Sequence(sequence)) => {
                return Err(FormatError::UnsupportedClaimSequence { sequence });
            }
            _ => {}
        }

        Ok(Self {
            name: name.to_string(),
            reference,
        })
    }

    /// Parses one segment of a URI, in legacy or modern form.
    ///
    /// # Errors
    ///
    /// Returns `FormatError` if the segment does not match `kind`, the name is
    /// empty or invalid, or the claim reference is missing, repeated or malformed.
    pub fn parse(raw: &str, kind: SegmentKind) -> Result<Self, FormatError> {
        Self::parse_bounded(raw, kind, None)
    }

    pub(crate) fn parse_bounded(
        raw: &str,
        kind: SegmentKind,
        max_claim_id_length: Option<usize>,
    ) -> Result<Self, FormatError> {
        let mut scanner = Scanner::new(raw);

        match kind {
            SegmentKind::Channel => {
                if !scanner.eat(CHANNEL_MARKER) {
                    return Err(FormatError::MissingChannelMarker {
                        segment: raw.to_string(),
                    });
                }
            }
            SegmentKind::Stream => {
                if scanner.peek() == Some(CHANNEL_MARKER) {
                    return Err(FormatError::UnexpectedChannelMarker {
                        segment: raw.to_string(),
                    });
                }
            }
        }

        let name = scanner.take_until(REFERENCE_SIGILS);

        let reference = match scanner.bump() {
            None => None,
            Some(sigil) => {
                let token = scanner.rest();
                if token.is_empty() {
                    return Err(FormatError::EmptyReference { sigil });
                }
                if token.as_str().contains(REFERENCE_SIGILS) {
                    return Err(FormatError::MultipleReferences {
                        segment: raw.to_string(),
                    });
                }
                Some(ClaimRef::parse(sigil, token.as_str(), max_claim_id_length)?)
            }
        };

        if name.is_empty() {
            return Err(match kind {
                SegmentKind::Channel => FormatError::EmptyChannelName,
                SegmentKind::Stream => FormatError::MissingName,
            });
        }

        Self::new(name.as_str(), reference)
    }

    /// Returns the name, in its original case and without any `@`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the name folded for case-insensitive lookups.
    #[must_use]
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    /// Returns the claim reference, if any.
    #[must_use]
    pub const fn reference(&self) -> Option<&ClaimRef> {
        self.reference.as_ref()
    }

    /// Returns the claim id, if the reference is one.
    #[must_use]
    pub fn claim_id(&self) -> Option<&ClaimId> {
        self.reference.as_ref().and_then(ClaimRef::claim_id)
    }

    /// Returns the claim sequence, if the reference is one.
    #[must_use]
    pub fn claim_sequence(&self) -> Option<u64> {
        self.reference.as_ref().and_then(ClaimRef::sequence)
    }

    /// Returns the bid position, if the reference is one.
    #[must_use]
    pub fn bid_position(&self) -> Option<u64> {
        self.reference.as_ref().and_then(ClaimRef::bid_position)
    }

    /// Returns a copy of this segment without its claim reference.
    #[must_use]
    pub fn without_reference(&self) -> Self {
        Self {
            name: self.name.clone(),
            reference: None,
        }
    }
}

/// Writes the name followed by the reference in modern form.
impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(reference) = &self.reference {
            write!(f, "{reference}")?;
        }
        Ok(())
    }
}
