//! # cura-feedback
//!
//! Immutable, append-only, SHA-256 hash-chained feedback recording for the
//! CURA runtime.
//!
//! ## Overview
//!
//! Every clinician decision (adopt / modify / reject) on a suggestion is
//! recorded as a `{problem, answer, rating}` triplet wrapped in a
//! `FeedbackEvent` that links to the previous event via its SHA-256 hash.
//! Tampering with any event — even a single byte — breaks the chain and is
//! detected by `verify_chain`.  The log simultaneously maintains the
//! running adoption counters consumed by federated-statistics views.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cura_feedback::FeedbackLog;
//! use cura_contracts::feedback::Rating;
//!
//! let log = FeedbackLog::new("WS-CARDIO-01");
//! let outcome = log.record(note_text, &suggestion, Rating::Adopt)?;
//! if let Some(mutation) = outcome.note_mutation {
//!     editor.apply(mutation); // transactional, with undo — caller's side
//! }
//! assert!(log.verify_integrity());
//! ```

pub mod chain;
pub mod event;
pub mod recorder;

pub use chain::{hash_event, verify_chain};
pub use event::{FeedbackEvent, FeedbackLogExport};
pub use recorder::{FeedbackLog, RecordOutcome};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use cura_contracts::feedback::{NoteMutation, Rating};
    use cura_contracts::insight::{Priority, Suggestion};

    use super::{FeedbackEvent, FeedbackLog};

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// Build a suggestion with a distinguishable content string.
    fn make_suggestion(content: &str) -> Suggestion {
        Suggestion {
            rule_id: "unstable-angina-pathway".to_string(),
            priority: Priority::Medium,
            source: "Fuwai Hospital Guidelines 2024".to_string(),
            title: "Unstable angina standard pathway".to_string(),
            rationale: "Symptom match: \"chest pain\"".to_string(),
            content: content.to_string(),
        }
    }

    // ── Counter invariant ─────────────────────────────────────────────────────

    /// After every single record call, adopted + modified + rejected must
    /// equal the total.
    #[test]
    fn counter_invariant_holds_after_every_call() {
        let log = FeedbackLog::new("ws-invariant");
        let suggestion = make_suggestion("ECG within 10 minutes");

        let ratings = [
            Rating::Adopt,
            Rating::Adopt,
            Rating::Reject,
            Rating::Modify,
            Rating::Adopt,
            Rating::Reject,
        ];

        for (i, rating) in ratings.into_iter().enumerate() {
            log.record("note snapshot", &suggestion, rating).unwrap();

            let stats = log.stats();
            assert_eq!(
                stats.adopted + stats.modified + stats.rejected,
                stats.total_triplets,
                "invariant broken after call {}",
                i
            );
            assert_eq!(stats.total_triplets, (i + 1) as u64);
        }
    }

    /// One decision of each kind leaves counters {1,1,1,3} and three log
    /// entries in chronological order.
    #[test]
    fn three_ratings_yield_one_each() {
        let log = FeedbackLog::new("ws-three");

        log.record("note", &make_suggestion("first"), Rating::Adopt).unwrap();
        log.record("note", &make_suggestion("second"), Rating::Modify).unwrap();
        log.record("note", &make_suggestion("third"), Rating::Reject).unwrap();

        let stats = log.stats();
        assert_eq!(stats.adopted, 1);
        assert_eq!(stats.modified, 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.total_triplets, 3);

        // Chronological order: oldest decision first.
        let export = log.export_log();
        assert_eq!(export.events.len(), 3);
        let answers: Vec<&str> = export
            .events
            .iter()
            .map(|e| e.triplet.answer.as_str())
            .collect();
        assert_eq!(answers, vec!["first", "second", "third"]);
    }

    // ── Note mutation ─────────────────────────────────────────────────────────

    /// Adopt returns an addendum instruction; the recorder never applies it.
    #[test]
    fn adopt_returns_note_mutation() {
        let log = FeedbackLog::new("ws-adopt");
        let suggestion = make_suggestion("Aspirin 300 mg loading dose.");

        let outcome = log.record("chest pain", &suggestion, Rating::Adopt).unwrap();

        match outcome.note_mutation {
            Some(NoteMutation::AppendAddendum { text }) => {
                assert_eq!(text, "\n\n[AI Suggestion]: Aspirin 300 mg loading dose.");
            }
            None => panic!("Adopt must yield a note mutation"),
        }
    }

    /// Modify and Reject must not instruct any note change.
    #[test]
    fn modify_and_reject_return_no_mutation() {
        let log = FeedbackLog::new("ws-no-mutation");
        let suggestion = make_suggestion("content");

        let modified = log.record("note", &suggestion, Rating::Modify).unwrap();
        let rejected = log.record("note", &suggestion, Rating::Reject).unwrap();

        assert!(modified.note_mutation.is_none());
        assert!(rejected.note_mutation.is_none());
    }

    /// The triplet snapshots the note and the suggestion content verbatim.
    #[test]
    fn triplet_snapshots_problem_and_answer() {
        let log = FeedbackLog::new("ws-snapshot");
        let suggestion = make_suggestion("Troponin I panel");

        let outcome = log
            .record("persistent chest pain", &suggestion, Rating::Reject)
            .unwrap();

        assert_eq!(outcome.triplet.problem, "persistent chest pain");
        assert_eq!(outcome.triplet.answer, "Troponin I panel");
        assert_eq!(outcome.triplet.rating, Rating::Reject);
    }

    // ── Hash chain ────────────────────────────────────────────────────────────

    /// Writing three events produces a valid chain.
    #[test]
    fn hash_chain_integrity() {
        let log = FeedbackLog::new("ws-integrity");
        log.record("a", &make_suggestion("one"), Rating::Adopt).unwrap();
        log.record("b", &make_suggestion("two"), Rating::Modify).unwrap();
        log.record("c", &make_suggestion("three"), Rating::Reject).unwrap();

        assert!(log.verify_integrity(), "chain must be valid after sequential writes");
    }

    /// Mutating any stored triplet breaks the chain.
    #[test]
    fn tamper_detection() {
        let log = FeedbackLog::new("ws-tamper");
        log.record("a", &make_suggestion("one"), Rating::Adopt).unwrap();
        log.record("b", &make_suggestion("two"), Rating::Reject).unwrap();

        // Directly mutate the internal state to simulate tampering.
        {
            let mut state = log.state.lock().unwrap();
            state.events[0].triplet.answer = "TAMPERED".to_string();
        }

        assert!(
            !log.verify_integrity(),
            "chain must detect tampering with a stored triplet"
        );
    }

    /// The first event links to the genesis sentinel; sequences count up
    /// from zero with no gaps.
    #[test]
    fn genesis_and_sequence() {
        let log = FeedbackLog::new("ws-genesis");
        log.record("a", &make_suggestion("one"), Rating::Adopt).unwrap();
        log.record("b", &make_suggestion("two"), Rating::Adopt).unwrap();

        let export = log.export_log();
        assert_eq!(export.events[0].prev_hash, FeedbackEvent::GENESIS_HASH);
        for (idx, event) in export.events.iter().enumerate() {
            assert_eq!(event.sequence, idx as u64);
        }
    }

    /// `export_log()` seals every event and commits to the chain tip.
    #[test]
    fn export_log_terminal_hash() {
        let log = FeedbackLog::new("ws-export");
        log.record("a", &make_suggestion("one"), Rating::Adopt).unwrap();
        log.record("b", &make_suggestion("two"), Rating::Modify).unwrap();

        let export = log.export_log();
        assert_eq!(export.session_id, "ws-export");
        assert_eq!(
            export.terminal_hash,
            export.events.last().unwrap().this_hash
        );
        assert!(super::verify_chain(&export.events));
    }

    /// An empty log is trivially valid and exports an empty terminal hash.
    #[test]
    fn empty_log_is_valid() {
        let log = FeedbackLog::new("ws-empty");
        assert!(log.verify_integrity());

        let export = log.export_log();
        assert!(export.events.is_empty());
        assert_eq!(export.terminal_hash, "");
        assert_eq!(log.stats().total_triplets, 0);
    }
}
