//! Parser, validator and serializer for the `lbry://` URI scheme.
//!
//! LBRY URIs name content ("streams") and publisher identities ("channels")
//! on the LBRY network. This crate decomposes any accepted spelling of such a
//! URI (with or without protocol, legacy or modern claim references,
//! percent-encoded or not) into a validated [`LbryUri`], and writes it back
//! in canonical form.
//!
//! # Overview
//!
//! ```text
//! lbry://@channel:claimId/stream:claimId[/path][?query]
//! ```
//!
//! Each of the channel and stream names may carry one claim reference:
//!
//! | Sigil | Form    | Meaning                              |
//! |-------|---------|--------------------------------------|
//! | `:`   | modern  | claim id (hex, any length)           |
//! | `#`   | legacy  | claim id                             |
//! | `$`   | legacy  | bid position (positive integer)      |
//!
//! Inputs may also start with `https://`, and with one of the web hosts
//! `odysee.com/`, `open.lbry.com/` or `lbry.tv/`.
//!
//! # Quick Start
//!
//! ```rust
//! use lbry_uri::{is_name_valid, parse, serialize};
//!
//! let uri = parse("https://odysee.com/@test#1/stuff$2", true).unwrap();
//!
//! assert_eq!(uri.channel_name(), Some("test"));
//! assert_eq!(uri.channel_claim_id().map(|id| id.as_str()), Some("1"));
//! assert_eq!(uri.stream_name(), Some("stuff"));
//! assert_eq!(uri.stream_bid_position(), Some(2));
//!
//! assert_eq!(serialize(&uri), "lbry://@test:1/stuff$2");
//!
//! assert!(is_name_valid("what"));
//! assert!(!is_name_valid("wh@t"));
//! ```
//!
//! # Unicode
//!
//! Names are matched per Unicode scalar value through [`Scanner`]; no
//! boundary ever falls inside a multi-byte character. Use
//! [`normalize_name`] to compare names case-insensitively.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod builder;
mod claim_id;
mod claim_ref;
mod config;
mod constants;
mod error;
#[cfg(kani)]
mod kani_impls;
mod name;
pub mod prelude;
pub mod scanner;
mod segment;
mod uri;

pub use builder::{Empty, HasChannel, HasStream, LbryUriBuilder};
pub use claim_id::ClaimId;
pub use claim_ref::ClaimRef;
pub use config::ParseOptions;
pub use constants::{
    BID_POSITION_SIGIL, CHANNEL_MARKER, CLAIM_ID_LENGTH, CLAIM_ID_SIGIL, HOST_PREFIXES,
    LEGACY_CLAIM_ID_SIGIL, PROTOCOL, PROTOCOL_PREFIXES, RESERVED_CHARS, SCHEME,
};
pub use error::{BuilderError, ClaimIdError, FormatError, NameError, ParseError, ParseErrorKind};
pub use name::{is_name_valid, is_reserved_char, normalize_name, validate_name};
pub use scanner::{CharClass, Match, Scanner};
pub use segment::{Segment, SegmentKind};
pub use uri::LbryUri;

/// Parses an LBRY URI.
///
/// Shorthand for [`LbryUri::parse`].
///
/// # Errors
///
/// Returns [`ParseErrorKind::MissingProtocol`] when `require_proto` is set and
/// no recognized prefix is present, and [`ParseErrorKind::InvalidFormat`] for
/// any grammar violation.
pub fn parse(url: &str, require_proto: bool) -> Result<LbryUri, ParseError> {
    LbryUri::parse(url, require_proto)
}

/// Parses an LBRY URI, returning `None` on any error.
///
/// Shorthand for [`LbryUri::try_parse`].
#[must_use]
pub fn try_parse(url: &str, require_proto: bool) -> Option<LbryUri> {
    LbryUri::try_parse(url, require_proto)
}

/// Writes a URI in canonical `lbry://` form.
///
/// Claim ids use the modern `:` sigil whatever the input used.
#[must_use]
pub fn serialize(uri: &LbryUri) -> String {
    uri.to_string()
}
