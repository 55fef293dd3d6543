//! Insight rule types and configuration schema.
//!
//! An `InsightConfig` is deserialized from TOML and holds the registered
//! decision-support rules in declaration order.  Declaration order matters:
//! it is the tie-breaker when two fired rules share a priority.

use std::path::Path;
use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};

use cura_contracts::error::{CuraError, CuraResult};
use cura_contracts::insight::Priority;

/// The built-in default rule table, embedded at compile time.
const BUILTIN_INSIGHT: &str = include_str!("../rules/insight.toml");

/// A single trigger-pattern-to-suggestion rule.
///
/// The rule fires when ANY of its `triggers` occurs case-insensitively as a
/// substring of the note text.  Firing is independent per rule — overlapping
/// trigger sets may fire several rules from one token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightRule {
    /// Stable identifier, carried into every suggestion this rule emits.
    pub id: String,

    /// Output ordering priority.
    pub priority: Priority,

    /// Provenance label shown with the suggestion.
    pub source: String,

    /// Suggestion headline.
    pub title: String,

    /// Why the rule fires, in clinician-readable form.
    pub rationale: String,

    /// The suggested content itself.
    pub content: String,

    /// Substring triggers, matched case-insensitively.
    pub triggers: Vec<String>,
}

/// The top-level structure deserialized from an insight TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightConfig {
    /// Registered rules, in declaration order.
    pub rules: Vec<InsightRule>,
}

/// A parsed insight rule table.  Registration order is preserved exactly.
#[derive(Debug)]
pub struct InsightRuleSet {
    rules: Vec<InsightRule>,
}

impl InsightRuleSet {
    /// Parse `s` as TOML.  Returns `CuraError::ConfigError` on malformed
    /// input.
    pub fn from_toml_str(s: &str) -> CuraResult<Self> {
        let config: InsightConfig = toml::from_str(s).map_err(|e| CuraError::ConfigError {
            reason: format!("failed to parse insight rules TOML: {}", e),
        })?;
        Ok(Self { rules: config.rules })
    }

    /// Read the file at `path` and parse it as an insight rule table.
    pub fn from_file(path: &Path) -> CuraResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| CuraError::ConfigError {
            reason: format!("failed to read rules file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The embedded default table, shared process-wide.
    pub fn builtin() -> Arc<InsightRuleSet> {
        static BUILTIN: LazyLock<Arc<InsightRuleSet>> = LazyLock::new(|| {
            Arc::new(
                InsightRuleSet::from_toml_str(BUILTIN_INSIGHT)
                    .expect("embedded insight rule table must be valid"),
            )
        });
        Arc::clone(&BUILTIN)
    }

    /// All rules in registration order.
    pub fn rules(&self) -> &[InsightRule] {
        &self.rules
    }
}
