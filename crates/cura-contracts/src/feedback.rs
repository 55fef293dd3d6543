//! Feedback triplet, aggregate statistics, and note-mutation types.
//!
//! A triplet is the unit exported toward aggregation/reporting collaborators
//! (the federated-statistics views).  Triplets are append-only; the running
//! counters they drive satisfy `adopted + modified + rejected == total` at
//! all times.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The clinician's decision on one suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rating {
    Adopt,
    Modify,
    Reject,
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Rating::Adopt => "ADOPT",
            Rating::Modify => "MODIFY",
            Rating::Reject => "REJECT",
        };
        f.write_str(name)
    }
}

/// One recorded {problem, answer, rating} feedback sample.
///
/// `problem` is the note text snapshot at decision time; `answer` is the
/// suggestion content the clinician rated.  Never edited or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackTriplet {
    /// The note text at the moment the decision was made.
    pub problem: String,
    /// The rated suggestion's content.
    pub answer: String,
    /// The clinician's decision.
    pub rating: Rating,
    /// When the decision was recorded (UTC).
    pub timestamp: DateTime<Utc>,
}

/// Running adoption counters, read by external reporting views.
///
/// Serializes in camelCase — `totalTriplets` is the spelling the
/// federated-statistics surface consumes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionStats {
    pub adopted: u64,
    pub modified: u64,
    pub rejected: u64,
    pub total_triplets: u64,
}

impl AdoptionStats {
    /// Percentage of adopted triplets, rounded to the nearest integer.
    /// Returns 0 when no triplets have been recorded.
    pub fn adopted_pct(&self) -> u32 {
        Self::pct(self.adopted, self.total_triplets)
    }

    /// Percentage of modified triplets, rounded to the nearest integer.
    pub fn modified_pct(&self) -> u32 {
        Self::pct(self.modified, self.total_triplets)
    }

    /// Percentage of rejected triplets, rounded to the nearest integer.
    pub fn rejected_pct(&self) -> u32 {
        Self::pct(self.rejected, self.total_triplets)
    }

    /// `round(count / total * 100)`, with 0 — not a division error — when
    /// the log is empty.
    fn pct(count: u64, total: u64) -> u32 {
        if total == 0 {
            return 0;
        }
        ((count as f64 / total as f64) * 100.0).round() as u32
    }
}

/// An instruction the caller's editor applies to the note — never performed
/// by the recorder itself, so the editor can apply it transactionally with
/// undo support.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteMutation {
    /// Append `text` to the end of the note.  Emitted on Adopt only; the
    /// text frames the suggestion content as an AI-originated addendum.
    AppendAddendum { text: String },
}

impl NoteMutation {
    /// Build the Adopt addendum for a suggestion's content.
    pub fn addendum_for(content: &str) -> Self {
        NoteMutation::AppendAddendum {
            text: format!("\n\n[AI Suggestion]: {}", content),
        }
    }
}
