//! Decision-support suggestion types.
//!
//! A `Suggestion` is the materialization of an insight rule against one
//! note snapshot.  Suggestions are ephemeral: recomputed whenever the note
//! text changes, never mutated, always fully replaced.

use serde::{Deserialize, Serialize};

/// Suggestion priority.  Ordering is fixed: High before Medium before Low.
///
/// Variant declaration order is load-bearing — the derived `Ord` sorts
/// `High` first, which is what the engine's output ordering relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        };
        f.write_str(name)
    }
}

/// One decision-support suggestion, ready for the rendering collaborator.
///
/// Visibility policy (e.g. a "silent mode" that hides action affordances)
/// is a presentation concern — the engine always emits the full list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// The insight rule that fired.
    pub rule_id: String,
    /// Display/ordering priority.
    pub priority: Priority,
    /// Provenance label (e.g. "Fuwai Hospital Guidelines 2024").
    pub source: String,
    /// Short headline.
    pub title: String,
    /// Why the rule fired, in clinician-readable form.
    pub rationale: String,
    /// The suggested content itself — this is what a feedback triplet
    /// records as its `answer`.
    pub content: String,
}
