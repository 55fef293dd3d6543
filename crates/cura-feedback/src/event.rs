//! Feedback event and log-export types.
//!
//! `FeedbackEvent` is a single entry in the hash chain — it wraps a
//! `FeedbackTriplet` with sequence numbering and the SHA-256 hashes that
//! make tampering detectable.  `FeedbackLogExport` is the sealed record
//! handed to aggregation/reporting collaborators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cura_contracts::feedback::FeedbackTriplet;

/// A single entry in the SHA-256 hash chain for one session's feedback log.
///
/// Each event commits to the previous event via `prev_hash`, forming an
/// append-only chain.  Modifying any field — including those of the
/// embedded `triplet` — invalidates `this_hash` and every subsequent
/// `prev_hash`, which `verify_chain` detects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackEvent {
    /// Monotonically increasing position in the chain, starting at 0.
    /// Chain order is chronological: sequence 0 is the oldest decision.
    pub sequence: u64,

    /// The session this event belongs to.
    pub session_id: String,

    /// The immutable triplet recorded for one clinician decision.
    pub triplet: FeedbackTriplet,

    /// SHA-256 hash (hex) of the previous event, or `GENESIS_HASH` for the
    /// first event.
    pub prev_hash: String,

    /// SHA-256 hash (hex) of this event's canonical content.
    pub this_hash: String,
}

impl FeedbackEvent {
    /// The sentinel `prev_hash` used for the first event in every chain.
    ///
    /// 64 hex zeros — a value that can never be the SHA-256 of real data,
    /// making genesis detection unambiguous.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// A sealed snapshot of one session's feedback log.
///
/// Produced by `FeedbackLog::export_log()`.  The `terminal_hash` is the
/// `this_hash` of the last event and serves as a compact commitment to the
/// entire log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackLogExport {
    /// The session whose decisions are recorded here.
    pub session_id: String,

    /// All feedback events in chain (chronological) order.
    pub events: Vec<FeedbackEvent>,

    /// Wall-clock time (UTC) the log was exported.
    pub finalized_at: DateTime<Utc>,

    /// The `this_hash` of the last event.  Empty string if the log is empty.
    pub terminal_hash: String,
}
