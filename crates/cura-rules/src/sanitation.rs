//! Sanitation rule types and configuration schema.
//!
//! A `SanitationConfig` is deserialized from TOML and holds an ordered list
//! of `SanitationRule`s across three families.  Rules within a family apply
//! in ascending `order`; families apply in the fixed sequence
//! clean → normalize → redact.  Adding a rule is a table edit, never a
//! control-flow change — one generic applier per family interprets the
//! table (see `cura-pipeline`).

use std::path::Path;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use cura_contracts::error::{CuraError, CuraResult};

/// The built-in default rule table, embedded at compile time.
const BUILTIN_SANITATION: &str = include_str!("../rules/sanitation.toml");

/// The three sanitation rule families.
///
/// Expressed as plain kebab-case strings in TOML:
/// ```toml
/// family = "clean"
/// family = "normalize"
/// family = "redact"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleFamily {
    /// Markup tags, entity collapse, corruption markers.
    Clean,
    /// Terminology normalization and transliteration-remnant removal.
    Normalize,
    /// PII masking.
    Redact,
}

impl RuleFamily {
    /// The fixed family application sequence.
    pub const SEQUENCE: [RuleFamily; 3] =
        [RuleFamily::Clean, RuleFamily::Normalize, RuleFamily::Redact];
}

/// A single sanitation rule loaded from TOML.
///
/// `pattern` is a regex applied with `replace_all` semantics.  When
/// `replace` is absent the rule removes its matches; when present it is a
/// replacement template and may reference capture groups (`${1}`).
///
/// Invariant (enforced by tests, not the parser): within a family, no
/// rule's replacement text may create a new match for any rule of the same
/// family, so that re-running a family against its own output is a no-op.
/// The redact family in particular must never re-trigger on its own
/// placeholder tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitationRule {
    /// Stable identifier used in log output.
    pub id: String,

    /// Human-readable explanation of what this rule removes or rewrites.
    pub description: String,

    /// The family this rule belongs to.
    pub family: RuleFamily,

    /// Application position within the family (ascending).
    pub order: u32,

    /// The regex to match.
    pub pattern: String,

    /// Replacement template.  Absent means matches are removed.
    #[serde(default)]
    pub replace: Option<String>,
}

/// The top-level structure deserialized from a sanitation TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitationConfig {
    /// All rules, in declaration order.
    pub rules: Vec<SanitationRule>,
}

/// A rule paired with its compiled pattern.
#[derive(Debug)]
pub struct CompiledRule {
    /// The rule as declared.
    pub rule: SanitationRule,
    /// The compiled form of `rule.pattern`.
    pub regex: Regex,
}

impl CompiledRule {
    /// The replacement text for this rule — empty for removal rules.
    pub fn replacement(&self) -> &str {
        self.rule.replace.as_deref().unwrap_or("")
    }
}

/// A parsed, compiled, order-sorted sanitation rule table.
///
/// Construct via `from_toml_str`, `from_file`, or `builtin()`, then pass to
/// the pipeline.  Read-only after construction; requires no locking.
#[derive(Debug)]
pub struct SanitationRuleSet {
    rules: Vec<CompiledRule>,
}

impl SanitationRuleSet {
    /// Parse `s` as TOML, compile every pattern, and sort rules by `order`.
    ///
    /// The sort is stable, so rules sharing an `order` value keep their
    /// declaration order.  Returns `CuraError::ConfigError` if the TOML is
    /// malformed or any pattern fails to compile.
    pub fn from_toml_str(s: &str) -> CuraResult<Self> {
        let config: SanitationConfig =
            toml::from_str(s).map_err(|e| CuraError::ConfigError {
                reason: format!("failed to parse sanitation rules TOML: {}", e),
            })?;

        let mut rules = Vec::with_capacity(config.rules.len());
        for rule in config.rules {
            let regex = Regex::new(&rule.pattern).map_err(|e| CuraError::ConfigError {
                reason: format!("rule '{}': invalid pattern '{}': {}", rule.id, rule.pattern, e),
            })?;
            rules.push(CompiledRule { rule, regex });
        }

        rules.sort_by_key(|c| c.rule.order);

        Ok(Self { rules })
    }

    /// Read the file at `path` and parse it as a sanitation rule table.
    pub fn from_file(path: &Path) -> CuraResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| CuraError::ConfigError {
            reason: format!("failed to read rules file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The embedded default table, shared process-wide.
    ///
    /// Compiled once on first use.  The embedded document is validated by
    /// this crate's tests, so the expect can only fire on a build that
    /// shipped a broken table.
    pub fn builtin() -> Arc<SanitationRuleSet> {
        static BUILTIN: LazyLock<Arc<SanitationRuleSet>> = LazyLock::new(|| {
            Arc::new(
                SanitationRuleSet::from_toml_str(BUILTIN_SANITATION)
                    .expect("embedded sanitation rule table must be valid"),
            )
        });
        Arc::clone(&BUILTIN)
    }

    /// All rules of one family, in ascending `order`.
    pub fn family(&self, family: RuleFamily) -> impl Iterator<Item = &CompiledRule> {
        self.rules.iter().filter(move |c| c.rule.family == family)
    }

    /// Total number of rules across all families.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the table holds no rules at all.  An empty table is valid:
    /// every stage degrades to a no-op.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
