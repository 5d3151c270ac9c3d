//! Main LBRY URI type.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use percent_encoding::percent_decode_str;

use crate::claim_id::ClaimId;
use crate::config::ParseOptions;
use crate::constants::{CHANNEL_MARKER, HOST_PREFIXES, PROTOCOL, PROTOCOL_PREFIXES};
use crate::error::{FormatError, ParseError, ParseErrorKind};
use crate::segment::{Segment, SegmentKind};

/// A parsed and validated LBRY URI.
///
/// An LBRY URI names a stream, a channel, or a stream published in a
/// channel. Each name may carry one claim reference picking a specific
/// claim among those sharing the name.
///
/// # Structure
///
/// ```text
/// [lbry://|https://][host/][@channel[ref]/]stream[ref][/path][?query]
///
/// ref := ':' claim-id | '#' claim-id | '$' bid-position
/// ```
///
/// Legacy (`#`, `$`) and modern (`:`) references can be mixed, one per
/// segment.
///
/// # Examples
///
/// ```
/// use lbry_uri::LbryUri;
///
/// let uri = LbryUri::parse("lbry://@test:1/stuff#2", true).unwrap();
/// assert_eq!(uri.channel_name(), Some("test"));
/// assert_eq!(uri.channel_claim_id().map(|id| id.as_str()), Some("1"));
/// assert_eq!(uri.stream_name(), Some("stuff"));
/// assert_eq!(uri.stream_claim_id().map(|id| id.as_str()), Some("2"));
///
/// // Serialization uses modern sigils only
/// assert_eq!(uri.to_string(), "lbry://@test:1/stuff:2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LbryUri {
    channel: Option<Segment>,
    stream: Option<Segment>,
    path: Option<String>,
    query: Option<String>,
}

impl LbryUri {
    /// Parses an LBRY URI from a string.
    ///
    /// With `require_proto`, the input must start with `lbry://`, `https://`
    /// or one of the recognized web hosts.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - A prefix is required but missing
    /// - Neither a channel nor a stream name is present
    /// - A name contains a reserved character
    /// - A claim reference is empty, repeated or malformed
    pub fn parse(input: &str, require_proto: bool) -> Result<Self, ParseError> {
        Self::parse_with(input, &ParseOptions::new().with_require_proto(require_proto))
    }

    /// Parses an LBRY URI with explicit options.
    ///
    /// # Errors
    ///
    /// Same as [`LbryUri::parse`], plus claim ids longer than
    /// `options.max_claim_id_length`.
    pub fn parse_with(input: &str, options: &ParseOptions) -> Result<Self, ParseError> {
        tracing::trace!(input, require_proto = options.require_proto, "parsing LBRY URI");
        Self::parse_inner(input, options).map_err(|kind| ParseError {
            input: input.to_string(),
            kind,
        })
    }

    /// Parses an LBRY URI, returning `None` on any error.
    ///
    /// Meant for best-effort call sites such as deep links and notification
    /// targets; use [`LbryUri::parse`] to learn why an input was rejected.
    ///
    /// ```
    /// use lbry_uri::LbryUri;
    ///
    /// assert!(LbryUri::try_parse("odysee.com/@veritasium", true).is_some());
    /// assert!(LbryUri::try_parse("@", false).is_none());
    /// ```
    #[must_use]
    pub fn try_parse(input: &str, require_proto: bool) -> Option<Self> {
        match Self::parse(input, require_proto) {
            Ok(uri) => Some(uri),
            Err(e) => {
                tracing::debug!(error = %e, "discarding unparseable LBRY URI");
                None
            }
        }
    }

    pub(crate) const fn from_parts(
        channel: Option<Segment>,
        stream: Option<Segment>,
        path: Option<String>,
        query: Option<String>,
    ) -> Self {
        Self {
            channel,
            stream,
            path,
            query,
        }
    }

    /// Returns the channel segment, if present.
    #[must_use]
    pub const fn channel(&self) -> Option<&Segment> {
        self.channel.as_ref()
    }

    /// Returns the stream segment, if present.
    #[must_use]
    pub const fn stream(&self) -> Option<&Segment> {
        self.stream.as_ref()
    }

    /// Returns true if the URI has a channel segment.
    #[must_use]
    pub const fn is_channel(&self) -> bool {
        self.channel.is_some()
    }

    /// Returns true if the URI has a channel segment.
    ///
    /// Same as [`LbryUri::is_channel`].
    #[must_use]
    pub const fn is_channel_url(&self) -> bool {
        self.is_channel()
    }

    /// Returns true if the URI addresses a channel and no content in it.
    #[must_use]
    pub const fn is_channel_only(&self) -> bool {
        self.channel.is_some() && self.stream.is_none()
    }

    /// Returns true if the URI addresses content outside of any channel.
    #[must_use]
    pub const fn is_anonymous(&self) -> bool {
        self.channel.is_none() && self.stream.is_some()
    }

    /// Returns the channel name, without `@`.
    #[must_use]
    pub fn channel_name(&self) -> Option<&str> {
        self.channel.as_ref().map(Segment::name)
    }

    /// Returns the channel claim id, if given.
    #[must_use]
    pub fn channel_claim_id(&self) -> Option<&ClaimId> {
        self.channel.as_ref().and_then(Segment::claim_id)
    }

    /// Returns the channel claim sequence, if given.
    #[must_use]
    pub fn channel_claim_sequence(&self) -> Option<u64> {
        self.channel.as_ref().and_then(Segment::claim_sequence)
    }

    /// Returns the channel bid position, if given.
    #[must_use]
    pub fn channel_bid_position(&self) -> Option<u64> {
        self.channel.as_ref().and_then(Segment::bid_position)
    }

    /// Returns the stream name.
    #[must_use]
    pub fn stream_name(&self) -> Option<&str> {
        self.stream.as_ref().map(Segment::name)
    }

    /// Returns the stream claim id, if given.
    #[must_use]
    pub fn stream_claim_id(&self) -> Option<&ClaimId> {
        self.stream.as_ref().and_then(Segment::claim_id)
    }

    /// Returns the stream claim sequence, if given.
    #[must_use]
    pub fn stream_claim_sequence(&self) -> Option<u64> {
        self.stream.as_ref().and_then(Segment::claim_sequence)
    }

    /// Returns the stream bid position, if given.
    #[must_use]
    pub fn stream_bid_position(&self) -> Option<u64> {
        self.stream.as_ref().and_then(Segment::bid_position)
    }

    /// Returns the path following the stream segment, without its leading `/`.
    ///
    /// The path is kept exactly as given, percent escapes included.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Returns the query string, without its leading `?`.
    #[must_use]
    pub fn query_string(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Returns the address in modern form, without protocol, path or query.
    ///
    /// ```
    /// use lbry_uri::LbryUri;
    ///
    /// let uri = LbryUri::parse("https://odysee.com/@chan#ab/video$2?t=10", false).unwrap();
    /// assert_eq!(uri.canonical(), "@chan:ab/video$2");
    /// ```
    #[must_use]
    pub fn canonical(&self) -> String {
        self.address(false)
    }

    /// Returns the address with all claim references dropped.
    ///
    /// ```
    /// use lbry_uri::LbryUri;
    ///
    /// let uri = LbryUri::parse("@chan:ab/video:cd", false).unwrap();
    /// assert_eq!(uri.vanity(), "@chan/video");
    /// ```
    #[must_use]
    pub fn vanity(&self) -> String {
        self.address(true)
    }

    fn address(&self, vanity: bool) -> String {
        let mut out = String::new();

        if let Some(channel) = &self.channel {
            out.push(CHANNEL_MARKER);
            push_segment(&mut out, channel, vanity);
        }

        if let Some(stream) = &self.stream {
            if self.channel.is_some() {
                out.push('/');
            }
            push_segment(&mut out, stream, vanity);
        }

        out
    }

    fn parse_inner(input: &str, options: &ParseOptions) -> Result<Self, ParseErrorKind> {
        // Strip protocol and host
        let (rest, has_prefix) = Self::strip_prefix(input);
        if options.require_proto && !has_prefix {
            return Err(ParseErrorKind::MissingProtocol);
        }

        // Query and path stay as given; only names and references are decoded
        let (address, query) = Self::split_query(rest);

        let (channel, stream, path) =
            Self::split_segments(address, options).map_err(ParseErrorKind::InvalidFormat)?;

        tracing::trace!(
            channel = ?channel.as_ref().map(Segment::name),
            stream = ?stream.as_ref().map(Segment::name),
            "parsed LBRY URI"
        );

        Ok(Self {
            channel,
            stream,
            path,
            query,
        })
    }

    /// Removes an optional protocol and an optional host, reporting whether
    /// anything was removed.
    fn strip_prefix(input: &str) -> (&str, bool) {
        let mut rest = input;
        let mut stripped = false;

        for prefixes in [&PROTOCOL_PREFIXES[..], &HOST_PREFIXES[..]] {
            if let Some(tail) = strip_any_ascii_prefix(rest, prefixes) {
                rest = tail;
                stripped = true;
            }
        }

        (rest, stripped)
    }

    fn split_query(input: &str) -> (&str, Option<String>) {
        match input.split_once('?') {
            Some((rest, "")) => (rest, None), // Empty query is stripped
            Some((rest, query)) => (rest, Some(query.to_string())),
            None => (input, None),
        }
    }

    #[allow(clippy::type_complexity)]
    fn split_segments(
        address: &str,
        options: &ParseOptions,
    ) -> Result<(Option<Segment>, Option<Segment>, Option<String>), FormatError> {
        let max_claim_id_length = options.max_claim_id_length;
        let mut parts = address.split('/');
        let first = decode_segment(parts.next().unwrap_or_default(), options.decode_percent)?;

        if first.is_empty() {
            return Err(FormatError::MissingName);
        }

        let (channel, stream) = if first.starts_with(CHANNEL_MARKER) {
            let channel =
                Segment::parse_bounded(&first, SegmentKind::Channel, max_claim_id_length)?;
            let stream = match parts.next() {
                None => None,
                Some("") => return Err(FormatError::MissingStreamAfterChannel),
                Some(raw) => Some(Segment::parse_bounded(
                    &decode_segment(raw, options.decode_percent)?,
                    SegmentKind::Stream,
                    max_claim_id_length,
                )?),
            };
            (Some(channel), stream)
        } else {
            let stream = Segment::parse_bounded(&first, SegmentKind::Stream, max_claim_id_length)?;
            (None, Some(stream))
        };

        // Anything past the addressing segments is an opaque path
        let path = parts.collect::<Vec<_>>().join("/");
        let path = (!path.is_empty()).then_some(path);

        Ok((channel, stream, path))
    }
}

/// Percent-decodes one addressing segment. An encoded `/` stays inside the
/// segment, where name validation rejects it.
fn decode_segment(raw: &str, decode: bool) -> Result<Cow<'_, str>, FormatError> {
    if !decode {
        return Ok(Cow::Borrowed(raw));
    }
    percent_decode_str(raw)
        .decode_utf8()
        .map_err(|_| FormatError::InvalidPercentEncoding)
}

fn push_segment(out: &mut String, segment: &Segment, vanity: bool) {
    if vanity {
        out.push_str(segment.name());
    } else {
        out.push_str(&segment.to_string());
    }
}

/// Strips the first of `prefixes` that `input` starts with, ignoring ASCII case.
fn strip_any_ascii_prefix<'a>(input: &'a str, prefixes: &[&str]) -> Option<&'a str> {
    prefixes.iter().find_map(|prefix| {
        let head = input.get(..prefix.len())?;
        if head.eq_ignore_ascii_case(prefix) {
            input.get(prefix.len()..)
        } else {
            None
        }
    })
}

/// Writes the full URI: `lbry://`, the canonical address, then path and query.
impl fmt::Display for LbryUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PROTOCOL}{}", self.canonical())?;
        if let Some(path) = &self.path {
            write!(f, "/{path}")?;
        }
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        Ok(())
    }
}

impl FromStr for LbryUri {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, false)
    }
}

impl TryFrom<&str> for LbryUri {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s, false)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for LbryUri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for LbryUri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s, false).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEX40: &str = "0123456789abcdef0123456789abcdef01234567";

    fn format_error(input: &str) -> FormatError {
        match LbryUri::parse(input, false) {
            Err(ParseError {
                kind: ParseErrorKind::InvalidFormat(e),
                ..
            }) => e,
            other => panic!("expected format error for {input:?}, got {other:?}"),
        }
    }

    #[test]
    fn parse_bare_stream() {
        let uri = LbryUri::parse("test", false).unwrap();
        assert_eq!(uri.stream_name(), Some("test"));
        assert!(uri.stream().unwrap().reference().is_none());
        assert!(!uri.is_channel());
        assert!(uri.is_anonymous());
    }

    #[test]
    fn parse_channel_only() {
        let uri = LbryUri::parse("lbry://@test", true).unwrap();
        assert_eq!(uri.channel_name(), Some("test"));
        assert!(uri.is_channel());
        assert!(uri.is_channel_url());
        assert!(uri.is_channel_only());
        assert_eq!(uri.stream_name(), None);
    }

    #[test]
    fn parse_mixed_legacy_and_modern() {
        let uri = LbryUri::parse("@test:1/stuff#2", false).unwrap();
        assert_eq!(uri.channel_name(), Some("test"));
        assert_eq!(uri.channel_claim_id().map(ClaimId::as_str), Some("1"));
        assert_eq!(uri.stream_name(), Some("stuff"));
        assert_eq!(uri.stream_claim_id().map(ClaimId::as_str), Some("2"));
        assert!(!uri.is_channel_only());
    }

    #[test]
    fn parse_channel_claim_id_and_stream() {
        let uri = LbryUri::parse(&format!("@test#{HEX40}/stuff"), false).unwrap();
        assert_eq!(uri.channel_name(), Some("test"));
        assert_eq!(uri.channel_claim_id().map(ClaimId::as_str), Some(HEX40));
        assert_eq!(uri.stream_name(), Some("stuff"));
        assert!(uri.stream_claim_id().is_none());
    }

    #[test]
    fn parse_bid_position() {
        let uri = LbryUri::parse("test$1", false).unwrap();
        assert_eq!(uri.stream_name(), Some("test"));
        assert_eq!(uri.stream_bid_position(), Some(1));
        assert!(uri.stream_claim_id().is_none());
        assert!(uri.stream_claim_sequence().is_none());
    }

    #[test]
    fn parse_empty_with_required_proto() {
        let result = LbryUri::parse("", true);
        assert!(matches!(
            result,
            Err(ParseError {
                kind: ParseErrorKind::MissingProtocol,
                ..
            })
        ));
    }

    #[test]
    fn parse_empty_without_proto() {
        assert_eq!(format_error(""), FormatError::MissingName);
    }

    #[test]
    fn parse_lone_marker() {
        assert_eq!(format_error("@"), FormatError::EmptyChannelName);
    }

    #[test]
    fn channel_with_trailing_slash_fails() {
        assert_eq!(format_error("@test/"), FormatError::MissingStreamAfterChannel);
    }

    #[test]
    fn trailing_path_is_kept() {
        let uri = LbryUri::parse("@chan/video/comments/123", false).unwrap();
        assert_eq!(uri.stream_name(), Some("video"));
        assert_eq!(uri.path(), Some("comments/123"));

        let uri = LbryUri::parse("video/extra", false).unwrap();
        assert_eq!(uri.stream_name(), Some("video"));
        assert_eq!(uri.path(), Some("extra"));
    }

    #[test]
    fn trailing_slash_after_stream_has_no_path() {
        let uri = LbryUri::parse("video/", false).unwrap();
        assert_eq!(uri.path(), None);
    }

    #[test]
    fn query_is_split_off() {
        let uri = LbryUri::parse("lbry://@chan/video?t=30&src=share", true).unwrap();
        assert_eq!(uri.stream_name(), Some("video"));
        assert_eq!(uri.query_string(), Some("t=30&src=share"));

        let uri = LbryUri::parse("video?", false).unwrap();
        assert_eq!(uri.query_string(), None);
    }

    #[test]
    fn query_is_not_decoded() {
        let uri = LbryUri::parse("video?q=a%20b", false).unwrap();
        assert_eq!(uri.query_string(), Some("q=a%20b"));
    }

    #[test]
    fn percent_encoded_address_is_decoded() {
        let uri = LbryUri::parse("lbry://%40chan%3Aab/caf%C3%A9", true).unwrap();
        assert_eq!(uri.channel_name(), Some("chan"));
        assert_eq!(uri.channel_claim_id().map(ClaimId::as_str), Some("ab"));
        assert_eq!(uri.stream_name(), Some("café"));
    }

    #[test]
    fn path_is_not_decoded() {
        let uri = LbryUri::parse("lbry://video/a%3Fb", true).unwrap();
        assert_eq!(uri.stream_name(), Some("video"));
        assert_eq!(uri.path(), Some("a%3Fb"));
        assert_eq!(uri.query_string(), None);

        let serialized = uri.to_string();
        assert_eq!(serialized, "lbry://video/a%3Fb");
        assert_eq!(LbryUri::parse(&serialized, true).unwrap(), uri);
    }

    #[test]
    fn path_escapes_survive_after_channel() {
        let uri = LbryUri::parse("@chan/caf%C3%A9/x%2Fy%20z?t=1", false).unwrap();
        assert_eq!(uri.stream_name(), Some("café"));
        assert_eq!(uri.path(), Some("x%2Fy%20z"));
        assert_eq!(uri.to_string(), "lbry://@chan/café/x%2Fy%20z?t=1");
    }

    #[test]
    fn encoded_slash_does_not_split_segments() {
        assert!(matches!(
            format_error("@chan%2Fvideo"),
            FormatError::InvalidName { .. }
        ));
    }

    #[test]
    fn percent_decoding_can_be_disabled() {
        let options = ParseOptions::new().with_decode_percent(false);
        let result = LbryUri::parse_with("caf%C3%A9", &options);
        assert!(matches!(
            result.map_err(|e| e.kind),
            Err(ParseErrorKind::InvalidFormat(FormatError::InvalidName { .. }))
        ));
    }

    #[test]
    fn invalid_utf8_escape_fails() {
        assert_eq!(format_error("bad%FF"), FormatError::InvalidPercentEncoding);
    }

    #[test]
    fn prefix_match_ignores_ascii_case() {
        let uri = LbryUri::parse("LBRY://Odysee.com/@Chan", true).unwrap();
        assert_eq!(uri.channel_name(), Some("Chan"));
    }

    #[test]
    fn bare_host_satisfies_required_proto() {
        let uri = LbryUri::parse("odysee.com/@chan:1/video:2", true).unwrap();
        assert_eq!(uri.channel_name(), Some("chan"));
        assert_eq!(uri.stream_name(), Some("video"));
    }

    #[test]
    fn unknown_scheme_is_not_a_prefix() {
        let result = LbryUri::parse("ftp://video", true);
        assert!(result.unwrap_err().is_missing_protocol());
    }

    #[test]
    fn non_ascii_input_near_prefix_does_not_panic() {
        // Byte 7 falls inside the multi-byte character
        assert!(LbryUri::parse("lbry:/é", false).is_err());
        assert!(LbryUri::parse("odysee.c\u{D799}", true).is_err());
    }

    #[test]
    fn two_channel_segments_fail() {
        assert!(matches!(
            format_error("@one/@two"),
            FormatError::UnexpectedChannelMarker { .. }
        ));
    }

    #[test]
    fn max_claim_id_length_option() {
        let options = ParseOptions::new().with_max_claim_id_length(Some(4));
        assert!(LbryUri::parse_with("video:abcd", &options).is_ok());
        assert!(LbryUri::parse_with("video:abcde", &options).is_err());
        assert!(LbryUri::parse_with("@chan:abcde/video", &options).is_err());
    }

    #[test]
    fn display_uses_modern_form() {
        let uri = LbryUri::parse(&format!("https://lbry.tv/@test#{HEX40}/stuff$3/x?t=1"), true)
            .unwrap();
        assert_eq!(uri.to_string(), format!("lbry://@test:{HEX40}/stuff$3/x?t=1"));
        assert_eq!(uri.canonical(), format!("@test:{HEX40}/stuff$3"));
        assert_eq!(uri.vanity(), "@test/stuff");
    }

    #[test]
    fn display_roundtrip() {
        let input = "lbry://@test:1/stuff:2";
        let uri = LbryUri::parse(input, true).unwrap();
        assert_eq!(uri.to_string(), input);
        assert_eq!(LbryUri::parse(&uri.to_string(), true).unwrap(), uri);
    }

    #[test]
    fn from_str_is_lenient() {
        let uri: LbryUri = "what".parse().unwrap();
        assert_eq!(uri.stream_name(), Some("what"));
        assert!(LbryUri::try_from("@").is_err());
    }
}
