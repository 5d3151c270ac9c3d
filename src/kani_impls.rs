//! Kani Arbitrary implementations and proof harnesses for property verification.
//!
//! # Usage
//!
//! Kani is not a Cargo dependency. Install and run with:
//!
//! ```bash
//! cargo install --locked kani-verifier
//! cargo kani setup
//! cargo kani --features kani
//! ```
//!
//! This module is only compiled when using Kani (`#[cfg(kani)]`).

use crate::{ClaimId, ClaimRef, LbryUri, Segment, SegmentKind, is_name_valid};

/// Characters that exercise every branch of the grammar.
const GRAMMAR_CHARS: &[char] = &[
    'a', 'Z', '0', '9', 'f', '*', '-', '@', ':', '#', '$', '/', '?', '%', ' ', 'é', '\u{D799}',
    '\u{E000}', '\u{FFFD}', '\u{FFFF}',
];

/// Characters allowed in names
const NAME_CHARS: &[char] = &['a', 'Z', '0', '*', '-', '.', 'é', '\u{E000}'];

fn pick(chars: &[char]) -> char {
    let idx: usize = kani::any();
    chars[idx % chars.len()]
}

fn arbitrary_string(chars: &[char], max_len: usize) -> String {
    let len: usize = kani::any();
    let len = len % (max_len + 1);
    (0..len).map(|_| pick(chars)).collect()
}

impl kani::Arbitrary for ClaimId {
    fn any() -> Self {
        let hex = ['0', '7', 'a', 'f'];
        let len: usize = kani::any();
        let id: String = (0..1 + (len % 4)).map(|_| pick(&hex)).collect();
        ClaimId::parse(&id).expect("valid claim id by construction")
    }
}

impl kani::Arbitrary for ClaimRef {
    fn any() -> Self {
        let n: u64 = kani::any();
        match kani::any::<u8>() % 3 {
            0 => ClaimRef::ClaimId(kani::any()),
            1 => ClaimRef::BidPosition(n),
            _ => ClaimRef::Sequence(n),
        }
    }
}

impl kani::Arbitrary for Segment {
    fn any() -> Self {
        let mut name = arbitrary_string(NAME_CHARS, 3);
        name.push(pick(NAME_CHARS));
        let position: u64 = kani::any();
        kani::assume(position > 0);
        let reference = match kani::any::<u8>() % 3 {
            0 => None,
            1 => Some(ClaimRef::ClaimId(kani::any())),
            _ => Some(ClaimRef::BidPosition(position)),
        };
        Segment::new(&name, reference).expect("valid segment by construction")
    }
}

#[kani::proof]
#[kani::unwind(8)]
fn parse_never_panics() {
    let input = arbitrary_string(GRAMMAR_CHARS, 6);
    let require_proto: bool = kani::any();
    let _ = LbryUri::parse(&input, require_proto);
}

#[kani::proof]
#[kani::unwind(8)]
fn name_validity_is_deterministic() {
    let name = arbitrary_string(GRAMMAR_CHARS, 5);
    assert_eq!(is_name_valid(&name), is_name_valid(&name));
}

#[kani::proof]
fn segments_refuse_unwritable_references() {
    let reference: ClaimRef = kani::any();
    let accepted = Segment::new("a", Some(reference.clone())).is_ok();
    let writable = !matches!(reference, ClaimRef::Sequence(_) | ClaimRef::BidPosition(0));
    assert_eq!(accepted, writable);
}

#[kani::proof]
#[kani::unwind(8)]
fn segment_display_reparses() {
    let segment: Segment = kani::any();
    let text = segment.to_string();
    let reparsed = Segment::parse(&text, SegmentKind::Stream).expect("display output parses");
    assert_eq!(reparsed, segment);
}
