//! Constants for LBRY URI parsing and validation.

/// The URI scheme.
pub const SCHEME: &str = "lbry";

/// The canonical protocol prefix emitted by the serializer.
pub const PROTOCOL: &str = "lbry://";

/// Length of a full claim id as issued by the network (hex characters).
///
/// The parser does not enforce it; see `ParseOptions::with_max_claim_id_length`.
pub const CLAIM_ID_LENGTH: usize = 40;

/// Protocol prefixes accepted in front of a URI, longest first.
pub const PROTOCOL_PREFIXES: [&str; 2] = ["https://", "lbry://"];

/// Web hosts whose paths mirror the `lbry://` address space.
pub const HOST_PREFIXES: [&str; 3] = ["open.lbry.com/", "odysee.com/", "lbry.tv/"];

/// Prefix marking a channel segment.
pub const CHANNEL_MARKER: char = '@';

/// Modern claim-id sigil.
pub const CLAIM_ID_SIGIL: char = ':';

/// Legacy claim-id sigil.
pub const LEGACY_CLAIM_ID_SIGIL: char = '#';

/// Legacy bid-position sigil.
pub const BID_POSITION_SIGIL: char = '$';

/// Marker written in front of a claim sequence when serializing.
pub const CLAIM_SEQUENCE_MARKER: char = '*';

/// All characters that introduce a claim reference inside a segment.
pub const REFERENCE_SIGILS: [char; 3] = [CLAIM_ID_SIGIL, LEGACY_CLAIM_ID_SIGIL, BID_POSITION_SIGIL];

/// Characters that may never appear in a channel or stream name.
pub const RESERVED_CHARS: [char; 21] = [
    '?', '$', '#', '@', ';', ':', '/', '\\', '=', '"', '<', '>', '%', '{', '}', '|', '^', '~',
    '[', ']', '`',
];
