//! # cura-rules
//!
//! TOML-driven rule tables for the CURA clinical text runtime.
//!
//! ## Overview
//!
//! Pattern→action checks are expressed as declarative tables, never as
//! conditional branches: the sanitation families (clean, normalize, redact)
//! and the insight trigger rules are all data, interpreted by generic
//! appliers in `cura-pipeline` and `cura-insight`.  Adding a rule is a TOML
//! edit.
//!
//! Built-in default tables are embedded with `include_str!`; deployments
//! may load replacements from disk.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use cura_rules::{SanitationRuleSet, InsightRuleSet};
//!
//! let sanitation = SanitationRuleSet::builtin();
//! let insight = InsightRuleSet::from_file(Path::new("rules/insight.toml"))?;
//! ```
//!
//! Rule tables are read-only after construction and require no locking.

pub mod insight;
pub mod sanitation;

pub use insight::{InsightConfig, InsightRule, InsightRuleSet};
pub use sanitation::{CompiledRule, RuleFamily, SanitationConfig, SanitationRule, SanitationRuleSet};

// ── Tests ─────────────────────────────────────────────────────────────────────
