//! The session-scoped feedback recorder.
//!
//! `FeedbackLog` is the single source of truth for adoption-rate
//! statistics.  It keeps all events in a `Vec` protected by a `Mutex`;
//! appending the chained event and bumping the counters happen inside one
//! critical section, so `adopted + modified + rejected == total` holds
//! after every call even under rapid sequential use.
//!
//! The recorder never mutates a note.  Adopting a suggestion yields a
//! `NoteMutation` instruction the caller's editor applies transactionally
//! (with undo support) on its side.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{debug, info};

use cura_contracts::{
    error::{CuraError, CuraResult},
    feedback::{AdoptionStats, FeedbackTriplet, NoteMutation, Rating},
    insight::Suggestion,
};

use crate::{
    chain::{hash_event, verify_chain},
    event::{FeedbackEvent, FeedbackLogExport},
};

// ── Internal mutable state ────────────────────────────────────────────────────

/// The mutable interior of a `FeedbackLog`.
pub(crate) struct LogState {
    /// All events written so far, in append (chronological) order.
    pub(crate) events: Vec<FeedbackEvent>,

    /// Running counters derived from the events.
    pub(crate) stats: AdoptionStats,

    /// The `this_hash` of the last written event, or `GENESIS_HASH` before
    /// any event has been written.
    pub(crate) last_hash: String,
}

// ── Public recorder ───────────────────────────────────────────────────────────

/// The outcome of recording one clinician decision.
#[derive(Debug, Clone)]
pub struct RecordOutcome {
    /// The triplet as appended to the log.
    pub triplet: FeedbackTriplet,

    /// Present only for `Rating::Adopt`: the addendum the caller's editor
    /// should append to the note.  The recorder itself never touches note
    /// text.
    pub note_mutation: Option<NoteMutation>,
}

/// An in-memory, append-only feedback log backed by a SHA-256 hash chain.
///
/// Session/workstation-scoped: construct one per session and pass the
/// handle explicitly — there is no ambient singleton.  Prior triplets are
/// never removed or overwritten.
///
/// # Thread safety
///
/// All methods acquire an internal `Mutex`; clones of the inner `Arc` may
/// be observed from other threads without additional synchronization.
pub struct FeedbackLog {
    session_id: String,
    pub(crate) state: Arc<Mutex<LogState>>,
}

impl FeedbackLog {
    /// Create an empty log for the given session.
    pub fn new(session_id: impl Into<String>) -> Self {
        let state = LogState {
            events: Vec::new(),
            stats: AdoptionStats::default(),
            last_hash: FeedbackEvent::GENESIS_HASH.to_string(),
        };
        Self {
            session_id: session_id.into(),
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Record one clinician decision against a suggestion.
    ///
    /// Builds the triplet from the note snapshot and the suggestion's
    /// content, appends it to the chain, and increments exactly one of the
    /// adopted/modified/rejected counters plus the total — all atomically
    /// with respect to other calls on this log.
    ///
    /// Returns `Err(LogWriteFailed)` only if the internal mutex is
    /// poisoned, which cannot happen under normal operation.
    pub fn record(
        &self,
        note_text: &str,
        suggestion: &Suggestion,
        rating: Rating,
    ) -> CuraResult<RecordOutcome> {
        let triplet = FeedbackTriplet {
            problem: note_text.to_string(),
            answer: suggestion.content.clone(),
            rating,
            timestamp: Utc::now(),
        };

        let mut state = self.state.lock().map_err(|e| CuraError::LogWriteFailed {
            reason: format!("feedback state lock poisoned: {}", e),
        })?;

        let prev_hash = state.last_hash.clone();
        let sequence = state.events.len() as u64;
        let this_hash = hash_event(&self.session_id, sequence, &triplet, &prev_hash);

        state.events.push(FeedbackEvent {
            sequence,
            session_id: self.session_id.clone(),
            triplet: triplet.clone(),
            prev_hash,
            this_hash: this_hash.clone(),
        });
        state.last_hash = this_hash;

        match rating {
            Rating::Adopt => state.stats.adopted += 1,
            Rating::Modify => state.stats.modified += 1,
            Rating::Reject => state.stats.rejected += 1,
        }
        state.stats.total_triplets += 1;

        debug!(
            session_id = %self.session_id,
            sequence,
            rating = %rating,
            rule_id = %suggestion.rule_id,
            "feedback triplet recorded"
        );

        let note_mutation = match rating {
            Rating::Adopt => Some(NoteMutation::addendum_for(&suggestion.content)),
            Rating::Modify | Rating::Reject => None,
        };

        Ok(RecordOutcome { triplet, note_mutation })
    }

    /// A snapshot of the running counters.
    pub fn stats(&self) -> AdoptionStats {
        let state = self.state.lock().expect("feedback state lock poisoned");
        state.stats
    }

    /// Export a sealed snapshot of the log for reporting collaborators.
    ///
    /// The `terminal_hash` is the `this_hash` of the last event, or an
    /// empty string when no decision has been recorded yet.
    pub fn export_log(&self) -> FeedbackLogExport {
        let state = self.state.lock().expect("feedback state lock poisoned");
        let terminal_hash = state
            .events
            .last()
            .map(|e| e.this_hash.clone())
            .unwrap_or_default();

        info!(
            session_id = %self.session_id,
            event_count = state.events.len(),
            "feedback log exported"
        );

        FeedbackLogExport {
            session_id: self.session_id.clone(),
            events: state.events.clone(),
            finalized_at: Utc::now(),
            terminal_hash,
        }
    }

    /// Verify that the in-memory chain has not been tampered with.
    pub fn verify_integrity(&self) -> bool {
        let state = self.state.lock().expect("feedback state lock poisoned");
        verify_chain(&state.events)
    }
}
