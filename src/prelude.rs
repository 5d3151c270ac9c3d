//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use lbry_uri::prelude::*;
//!
//! let uri = LbryUri::parse("lbry://@lbry/what", true).unwrap();
//! assert!(is_name_valid(uri.stream_name().unwrap()));
//! ```
//!
//! Builder state markers (`Empty`, `HasChannel`, `HasStream`) and scanner
//! types are intentionally excluded.

pub use crate::{
    // Core types
    ClaimId, ClaimRef, LbryUri, ParseOptions, Segment, SegmentKind,
    // Builder
    LbryUriBuilder,
    // Errors
    BuilderError, ClaimIdError, FormatError, NameError, ParseError, ParseErrorKind,
    // Functions
    is_name_valid, normalize_name, parse, serialize, try_parse, validate_name,
    // Constants
    CLAIM_ID_LENGTH, PROTOCOL, SCHEME,
};
