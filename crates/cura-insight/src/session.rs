//! Latest-request-wins evaluation for a note session.
//!
//! The host debounces keystrokes however it likes (timers, quiescence
//! windows — not the core's concern) and submits the note snapshot it wants
//! evaluated.  Submitting bumps a generation counter; evaluating a ticket
//! from an older generation yields nothing.  A stale suggestion set can
//! therefore never be delivered after a newer one — superseded requests are
//! discarded, not queued.

use tracing::debug;

use cura_contracts::insight::Suggestion;

use crate::engine::InsightEngine;

/// A claim on one evaluation of one note snapshot.
///
/// Tickets are cheap and single-use; a newer `submit` invalidates every
/// earlier ticket for the session.
#[derive(Debug)]
pub struct EvalTicket {
    generation: u64,
    note_text: String,
}

/// One doctor-station note session.
pub struct NoteSession {
    engine: InsightEngine,
    generation: u64,
}

impl NoteSession {
    /// Create a session around the given engine.
    pub fn new(engine: InsightEngine) -> Self {
        Self { engine, generation: 0 }
    }

    /// Register the latest note snapshot for evaluation.
    ///
    /// Implicitly supersedes every ticket issued before this call.
    pub fn submit(&mut self, note_text: impl Into<String>) -> EvalTicket {
        self.generation += 1;
        EvalTicket {
            generation: self.generation,
            note_text: note_text.into(),
        }
    }

    /// Evaluate a ticket's snapshot — unless the ticket was superseded.
    ///
    /// Returns `None` for a stale ticket; the caller simply drops it and
    /// waits for the evaluation of the newest one.
    pub fn evaluate(&self, ticket: &EvalTicket) -> Option<Vec<Suggestion>> {
        if ticket.generation != self.generation {
            debug!(
                ticket_generation = ticket.generation,
                current_generation = self.generation,
                "discarding superseded evaluation"
            );
            return None;
        }

        Some(self.engine.evaluate(&ticket.note_text))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use cura_rules::InsightRuleSet;

    use crate::engine::InsightEngine;

    use super::NoteSession;

    fn session() -> NoteSession {
        NoteSession::new(InsightEngine::new(InsightRuleSet::builtin()))
    }

    /// A superseded ticket yields nothing; only the newest one evaluates.
    #[test]
    fn stale_ticket_is_discarded() {
        let mut session = session();

        let first = session.submit("chest pain");
        let second = session.submit("hypertension");

        assert!(session.evaluate(&first).is_none());

        let suggestions = session.evaluate(&second).expect("newest ticket must evaluate");
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].rule_id, "hypertensive-crisis");
    }

    /// The newest ticket stays valid across repeated evaluations — results
    /// are recomputed, never cached or mutated.
    #[test]
    fn newest_ticket_evaluates_repeatedly() {
        let mut session = session();
        let ticket = session.submit("angina at rest");

        let a = session.evaluate(&ticket).unwrap();
        let b = session.evaluate(&ticket).unwrap();
        assert_eq!(a, b);
    }
}
