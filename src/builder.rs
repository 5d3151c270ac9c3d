//! Typestate builder for constructing [`LbryUri`] instances.
//!
//! This module provides a builder that uses phantom types to enforce
//! at compile-time that a URI names at least a channel or a stream, and that
//! a trailing path only follows a stream.

use std::marker::PhantomData;

use crate::claim_ref::ClaimRef;
use crate::error::{BuilderError, FormatError};
use crate::segment::{Segment, SegmentKind};
use crate::uri::LbryUri;

/// Marker: No segment set yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct Empty;

/// Marker: A channel has been set, no stream yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct HasChannel;

/// Marker: A stream has been set.
#[derive(Debug, Clone, Copy, Default)]
pub struct HasStream;

/// A typestate builder for constructing [`LbryUri`] instances.
///
/// Segments are set channel first, then stream; either may be skipped but
/// not both. Segments are validated on construction, so every built URI
/// serializes to text that parses back to an equal URI.
///
/// # Type State
///
/// - [`Empty`]: Initial state, cannot build
/// - [`HasChannel`]: Channel set; builds a channel-only URI
/// - [`HasStream`]: Stream set (with or without channel); may add a path
///
/// # Examples
///
/// ```
/// use lbry_uri::{ClaimRef, LbryUriBuilder, Segment};
///
/// let uri = LbryUriBuilder::new()
///     .try_channel("@lbry")?
///     .stream(Segment::new("what", Some(ClaimRef::BidPosition(2)))?)
///     .query("t=30")
///     .build()?;
///
/// assert_eq!(uri.to_string(), "lbry://@lbry/what$2?t=30");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Compile-Time Safety
///
/// ```compile_fail
/// use lbry_uri::LbryUriBuilder;
///
/// // Error: nothing to build
/// let uri = LbryUriBuilder::new().build();
/// ```
///
/// ```compile_fail
/// use lbry_uri::{LbryUriBuilder, Segment};
///
/// // Error: a path needs a stream before it
/// let builder = LbryUriBuilder::new()
///     .channel(Segment::new("lbry", None).unwrap())
///     .path("comments");
/// ```
#[derive(Debug, Clone)]
pub struct LbryUriBuilder<State = Empty> {
    channel: Option<Segment>,
    stream: Option<Segment>,
    path: Option<String>,
    query: Option<String>,
    _state: PhantomData<State>,
}

impl LbryUriBuilder<Empty> {
    /// Creates a new builder in the initial state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            channel: None,
            stream: None,
            path: None,
            query: None,
            _state: PhantomData,
        }
    }

    /// Sets the channel and advances to the [`HasChannel`] state.
    #[must_use]
    pub fn channel(self, channel: Segment) -> LbryUriBuilder<HasChannel> {
        self.advance(Some(channel), None)
    }

    /// Parses and sets the channel from a string such as `@name:claimid`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] if the string is not a valid channel segment.
    pub fn try_channel(self, s: &str) -> Result<LbryUriBuilder<HasChannel>, FormatError> {
        let channel = Segment::parse(s, SegmentKind::Channel)?;
        Ok(self.channel(channel))
    }

    /// Sets an anonymous stream and advances to the [`HasStream`] state.
    #[must_use]
    pub fn stream(self, stream: Segment) -> LbryUriBuilder<HasStream> {
        self.advance(None, Some(stream))
    }

    /// Parses and sets an anonymous stream from a string such as `name$2`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] if the string is not a valid stream segment.
    pub fn try_stream(self, s: &str) -> Result<LbryUriBuilder<HasStream>, FormatError> {
        let stream = Segment::parse(s, SegmentKind::Stream)?;
        Ok(self.stream(stream))
    }

    /// Sets a channel by name and reference.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] if the name or the reference is invalid.
    pub fn channel_named(
        self,
        name: &str,
        reference: Option<ClaimRef>,
    ) -> Result<LbryUriBuilder<HasChannel>, FormatError> {
        Ok(self.channel(Segment::new(name, reference)?))
    }
}

impl Default for LbryUriBuilder<Empty> {
    fn default() -> Self {
        Self::new()
    }
}

impl LbryUriBuilder<HasChannel> {
    /// Sets the stream published in the channel and advances to [`HasStream`].
    #[must_use]
    pub fn stream(mut self, stream: Segment) -> LbryUriBuilder<HasStream> {
        let channel = self.channel.take();
        self.advance(channel, Some(stream))
    }

    /// Parses and sets the stream from a string.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] if the string is not a valid stream segment.
    pub fn try_stream(self, s: &str) -> Result<LbryUriBuilder<HasStream>, FormatError> {
        let stream = Segment::parse(s, SegmentKind::Stream)?;
        Ok(self.stream(stream))
    }

    /// Builds a channel-only URI.
    #[must_use]
    pub fn build(self) -> LbryUri {
        LbryUri::from_parts(self.channel, None, None, self.query)
    }
}

impl LbryUriBuilder<HasStream> {
    /// Sets the trailing path (without leading `/`).
    ///
    /// An empty path is the same as no path.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.path = (!path.is_empty()).then_some(path);
        self
    }

    /// Builds the final [`LbryUri`].
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidPath`] if the path contains `?`.
    pub fn build(self) -> Result<LbryUri, BuilderError> {
        if let Some(path) = self.path.as_ref().filter(|path| path.contains('?')) {
            return Err(BuilderError::InvalidPath {
                path: path.clone(),
                char: '?',
            });
        }
        Ok(LbryUri::from_parts(
            self.channel,
            self.stream,
            self.path,
            self.query,
        ))
    }
}

impl<State> LbryUriBuilder<State> {
    /// Sets the query string (without leading `?`).
    ///
    /// The query is opaque and kept as given; an empty query is dropped.
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = (!query.is_empty()).then_some(query);
        self
    }

    fn advance<Next>(
        self,
        channel: Option<Segment>,
        stream: Option<Segment>,
    ) -> LbryUriBuilder<Next> {
        LbryUriBuilder {
            channel,
            stream,
            path: self.path,
            query: self.query,
            _state: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClaimId;

    #[test]
    fn build_anonymous_stream() {
        let uri = LbryUriBuilder::new()
            .try_stream("what")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(uri.stream_name(), Some("what"));
        assert!(uri.is_anonymous());
    }

    #[test]
    fn build_channel_only() {
        let uri = LbryUriBuilder::new()
            .try_channel("@lbry:3f")
            .unwrap()
            .build();
        assert!(uri.is_channel_only());
        assert_eq!(uri.to_string(), "lbry://@lbry:3f");
    }

    #[test]
    fn build_channel_and_stream() {
        let uri = LbryUriBuilder::new()
            .channel_named("lbry", Some(ClaimRef::ClaimId(ClaimId::parse("ab").unwrap())))
            .unwrap()
            .try_stream("what#cd")
            .unwrap()
            .path("comments")
            .build()
            .unwrap();
        assert_eq!(uri.to_string(), "lbry://@lbry:ab/what:cd/comments");
        assert_eq!(LbryUri::parse(&uri.to_string(), true).unwrap(), uri);
    }

    #[test]
    fn builder_matches_parser() {
        let built = LbryUriBuilder::new()
            .try_channel("@test#1")
            .unwrap()
            .try_stream("stuff:2")
            .unwrap()
            .build()
            .unwrap();
        let parsed = LbryUri::parse("@test:1/stuff#2", false).unwrap();
        assert_eq!(built, parsed);
    }

    #[test]
    fn claim_sequences_cannot_be_attached() {
        let result = LbryUriBuilder::new().channel_named("lbry", Some(ClaimRef::Sequence(3)));
        assert!(matches!(
            result,
            Err(FormatError::UnsupportedClaimSequence { sequence: 3 })
        ));
    }

    #[test]
    fn zero_bid_position_cannot_be_attached() {
        let result = LbryUriBuilder::new().channel_named("lbry", Some(ClaimRef::BidPosition(0)));
        assert!(matches!(result, Err(FormatError::InvalidBidPosition { .. })));
    }

    #[test]
    fn built_uris_roundtrip() {
        let id = ClaimId::parse("3F").unwrap();
        let references = [None, Some(ClaimRef::ClaimId(id)), Some(ClaimRef::BidPosition(4))];
        for channel_ref in &references {
            for stream_ref in &references {
                let uri = LbryUriBuilder::new()
                    .channel_named("lbry", channel_ref.clone())
                    .unwrap()
                    .stream(Segment::new("what", stream_ref.clone()).unwrap())
                    .path("a%3Fb/c")
                    .query("t=1")
                    .build()
                    .unwrap();
                let reparsed = LbryUri::parse(&uri.to_string(), true).unwrap();
                assert_eq!(reparsed, uri, "{uri}");
            }
        }
    }

    #[test]
    fn path_with_query_marker_fails() {
        let result = LbryUriBuilder::new()
            .try_stream("what")
            .unwrap()
            .path("a?b")
            .build();
        assert!(matches!(
            result,
            Err(BuilderError::InvalidPath { char: '?', .. })
        ));
    }

    #[test]
    fn query_survives_state_changes() {
        let uri = LbryUriBuilder::new()
            .query("t=1")
            .try_channel("@c")
            .unwrap()
            .try_stream("s")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(uri.query_string(), Some("t=1"));
    }

    #[test]
    fn empty_path_and_query_are_dropped() {
        let uri = LbryUriBuilder::new()
            .try_stream("s")
            .unwrap()
            .path("")
            .query("")
            .build()
            .unwrap();
        assert_eq!(uri.path(), None);
        assert_eq!(uri.query_string(), None);
    }

    #[test]
    fn try_channel_rejects_stream_segment() {
        assert!(LbryUriBuilder::new().try_channel("lbry").is_err());
        assert!(LbryUriBuilder::new().try_stream("@lbry").is_err());
    }
}
