//! The insight rule engine.
//!
//! Evaluation algorithm:
//!
//! 1. Lower-case the note once.
//! 2. For each registered rule, in registration order: the rule fires if
//!    ANY of its triggers occurs as a substring of the lowered note.
//! 3. Stable-sort fired rules by priority (HIGH, MEDIUM, LOW) — ties keep
//!    registration order.
//!
//! Evaluation is pure: the same note always yields the same ordered
//! suggestion list, and no suggestion carries state between evaluations.

use std::sync::Arc;

use tracing::debug;

use cura_contracts::insight::Suggestion;
use cura_rules::{InsightRule, InsightRuleSet};

/// A rule engine bound to one registered rule table.
///
/// Rule tables are read-only after load; the engine holds a shared handle
/// and needs no locking.
#[derive(Debug)]
pub struct InsightEngine {
    rules: Arc<InsightRuleSet>,
}

impl InsightEngine {
    /// Create an engine over the given rule table.
    pub fn new(rules: Arc<InsightRuleSet>) -> Self {
        Self { rules }
    }

    /// Evaluate `note_text` against every registered rule.
    ///
    /// Returns one suggestion per fired rule, ordered by priority and then
    /// registration.  Empty or whitespace-only input yields an empty list,
    /// never an error; so does a note that fires nothing.
    pub fn evaluate(&self, note_text: &str) -> Vec<Suggestion> {
        if note_text.trim().is_empty() {
            return Vec::new();
        }

        let lowered = note_text.to_lowercase();

        let mut fired: Vec<Suggestion> = self
            .rules
            .rules()
            .iter()
            .filter(|rule| Self::fires(rule, &lowered))
            .map(Self::materialize)
            .collect();

        // Stable sort: registration order survives within each priority.
        fired.sort_by_key(|s| s.priority);

        debug!(
            fired = fired.len(),
            registered = self.rules.rules().len(),
            "insight evaluation complete"
        );

        fired
    }

    /// True when any trigger occurs in the (already lowered) note.
    fn fires(rule: &InsightRule, lowered_note: &str) -> bool {
        rule.triggers
            .iter()
            .any(|trigger| lowered_note.contains(&trigger.to_lowercase()))
    }

    /// Materialize a fired rule against the current note snapshot.
    fn materialize(rule: &InsightRule) -> Suggestion {
        debug!(rule_id = %rule.id, priority = %rule.priority, "insight rule fired");
        Suggestion {
            rule_id: rule.id.clone(),
            priority: rule.priority,
            source: rule.source.clone(),
            title: rule.title.clone(),
            rationale: rule.rationale.clone(),
            content: rule.content.clone(),
        }
    }
}
