//! Claim references attached to a channel or stream name.

use std::fmt;

use crate::claim_id::ClaimId;
use crate::constants::{BID_POSITION_SIGIL, CLAIM_ID_SIGIL, CLAIM_SEQUENCE_MARKER};
use crate::error::FormatError;

/// Selects one claim among those sharing a name.
///
/// A segment carries at most one reference; without one the resolver picks
/// the claim currently controlling the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClaimRef {
    /// A specific claim, by full id or id prefix.
    ClaimId(ClaimId),
    /// The Nth claim ever made for the name, counting from 1.
    ///
    /// Has no written form in a URI, so [`Segment::new`](crate::Segment::new)
    /// refuses it.
    Sequence(u64),
    /// The claim with the Nth highest bid for the name, counting from 1.
    BidPosition(u64),
}

impl ClaimRef {
    /// Parses the reference that follows `sigil` in a segment.
    ///
    /// `sigil` is one of `:`, `#` or `$`. `:` and `#` introduce a claim id,
    /// `$` a bid position.
    pub(crate) fn parse(
        sigil: char,
        token: &str,
        max_claim_id_length: Option<usize>,
    ) -> Result<Self, FormatError> {
        if sigil == BID_POSITION_SIGIL {
            return parse_ordinal(token)
                .map(Self::BidPosition)
                .ok_or_else(|| FormatError::InvalidBidPosition {
                    value: token.to_string(),
                });
        }

        let id = match max_claim_id_length {
            Some(max) => ClaimId::parse_bounded(token, max),
            None => ClaimId::parse(token),
        };
        id.map(Self::ClaimId)
            .map_err(|reason| FormatError::InvalidClaimId {
                value: token.to_string(),
                reason,
            })
    }

    /// Returns the claim id, if this is a claim-id reference.
    #[must_use]
    pub const fn claim_id(&self) -> Option<&ClaimId> {
        match self {
            Self::ClaimId(id) => Some(id),
            _ => None,
        }
    }

    /// Returns the claim sequence, if this is a sequence reference.
    #[must_use]
    pub const fn sequence(&self) -> Option<u64> {
        match self {
            Self::Sequence(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the bid position, if this is a bid-position reference.
    #[must_use]
    pub const fn bid_position(&self) -> Option<u64> {
        match self {
            Self::BidPosition(n) => Some(*n),
            _ => None,
        }
    }
}

/// Writes the reference with its sigil: `:id`, `$n` or `*n`.
impl fmt::Display for ClaimRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClaimId(id) => write!(f, "{CLAIM_ID_SIGIL}{id}"),
            Self::Sequence(n) => write!(f, "{CLAIM_SEQUENCE_MARKER}{n}"),
            Self::BidPosition(n) => write!(f, "{BID_POSITION_SIGIL}{n}"),
        }
    }
}

/// Parses a positive decimal integer without sign or leading zeros.
fn parse_ordinal(token: &str) -> Option<u64> {
    let mut chars = token.chars();
    let first = chars.next()?;
    if !matches!(first, '1'..='9') || !chars.all(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}
