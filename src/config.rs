//! Parser configuration.

/// Options controlling how strictly a URI is parsed.
///
/// # Examples
///
/// ```
/// use lbry_uri::{LbryUri, ParseOptions, CLAIM_ID_LENGTH};
///
/// let options = ParseOptions::new()
///     .with_require_proto(true)
///     .with_max_claim_id_length(Some(CLAIM_ID_LENGTH));
///
/// assert!(LbryUri::parse_with("lbry://what:abc", &options).is_ok());
/// assert!(LbryUri::parse_with("what:abc", &options).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Whether the input must start with a recognized protocol or host prefix.
    ///
    /// Default: false
    pub require_proto: bool,

    /// Whether percent-escapes in the channel and stream part are decoded
    /// before parsing.
    ///
    /// The query string is always kept as given.
    /// Default: true
    pub decode_percent: bool,

    /// Longest claim id accepted, in hex characters.
    ///
    /// None accepts ids of any length, including short prefixes.
    /// Default: None
    pub max_claim_id_length: Option<usize>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            require_proto: false,
            decode_percent: true,
            max_claim_id_length: None,
        }
    }
}

impl ParseOptions {
    /// Creates options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether a protocol prefix is required.
    #[must_use]
    pub const fn with_require_proto(mut self, require: bool) -> Self {
        self.require_proto = require;
        self
    }

    /// Sets whether percent-escapes are decoded.
    #[must_use]
    pub const fn with_decode_percent(mut self, decode: bool) -> Self {
        self.decode_percent = decode;
        self
    }

    /// Sets the longest accepted claim id.
    #[must_use]
    pub const fn with_max_claim_id_length(mut self, max: Option<usize>) -> Self {
        self.max_claim_id_length = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_lenient() {
        let options = ParseOptions::default();
        assert!(!options.require_proto);
        assert!(options.decode_percent);
        assert_eq!(options.max_claim_id_length, None);
    }

    #[test]
    fn setters_chain() {
        let options = ParseOptions::new()
            .with_require_proto(true)
            .with_decode_percent(false)
            .with_max_claim_id_length(Some(40));
        assert!(options.require_proto);
        assert!(!options.decode_percent);
        assert_eq!(options.max_claim_id_length, Some(40));
    }
}
