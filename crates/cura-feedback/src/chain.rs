//! Hash-chain primitives: hashing and chain integrity verification.
//!
//! Hash input layout (bytes, in order):
//!   1. session_id as UTF-8 bytes
//!   2. sequence as 8-byte little-endian
//!   3. prev_hash as UTF-8 bytes (64 ASCII hex chars)
//!   4. canonical JSON of the triplet (serde_json, no pretty-printing)
//!
//! Every field that contributes to an event's hash is listed explicitly so
//! nothing is accidentally omitted.

use sha2::{Digest, Sha256};

use cura_contracts::feedback::FeedbackTriplet;

use crate::event::FeedbackEvent;

/// Compute the SHA-256 hash for a single feedback event.
///
/// The hash commits to the event's position (`sequence`), its session
/// (`session_id`), its link to the previous event (`prev_hash`), and the
/// full triplet.  Returns a lowercase 64-character hex string.
///
/// # Panics
///
/// Panics if `triplet` cannot be serialized to JSON — which cannot happen
/// for the well-formed `FeedbackTriplet` type.
pub fn hash_event(
    session_id: &str,
    sequence: u64,
    triplet: &FeedbackTriplet,
    prev_hash: &str,
) -> String {
    let triplet_json =
        serde_json::to_vec(triplet).expect("FeedbackTriplet must always be serializable to JSON");

    let mut hasher = Sha256::new();
    hasher.update(session_id.as_bytes());
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(&triplet_json);

    hex::encode(hasher.finalize())
}

/// Verify the integrity of a feedback hash chain.
///
/// Returns `true` when the chain is valid according to both rules:
///
/// 1. **Prev-hash linkage** — each event's `prev_hash` equals the
///    `this_hash` of the preceding event (or `GENESIS_HASH` for event 0).
/// 2. **Hash correctness** — each event's `this_hash` matches the value
///    recomputed from its own fields.
///
/// Returns `false` the moment any mismatch is detected.  An empty chain
/// is defined as valid.
pub fn verify_chain(events: &[FeedbackEvent]) -> bool {
    let mut expected_prev = FeedbackEvent::GENESIS_HASH.to_string();

    for event in events {
        if event.prev_hash != expected_prev {
            return false;
        }

        let recomputed = hash_event(
            &event.session_id,
            event.sequence,
            &event.triplet,
            &event.prev_hash,
        );
        if event.this_hash != recomputed {
            return false;
        }

        expected_prev = event.this_hash.clone();
    }

    true
}
