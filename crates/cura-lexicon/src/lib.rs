//! # cura-lexicon
//!
//! The terminology table and incremental autocomplete matcher for the CURA
//! runtime.
//!
//! Matching is a deliberate simplicity contract: an entry matches when it
//! contains the trailing input fragment as a substring and is not exactly
//! equal to it (no self-suggestion).  Results come back in registration
//! order, capped at the caller's limit — never ranked by relevance.
//! Deciding *when* to invoke the matcher (trailing-window size, keystroke
//! debouncing) is the host UI's concern.

use std::path::Path;
use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};

use cura_contracts::error::{CuraError, CuraResult};

/// The built-in default table, embedded at compile time.
const BUILTIN_TERMS: &str = include_str!("../data/terms.toml");

/// The top-level structure deserialized from a terminology TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconConfig {
    /// All terminology entries, in declaration (registration) order.
    pub terms: Vec<String>,
}

/// An ordered, read-only terminology table.
///
/// Process-wide after initialization; requires no locking.
#[derive(Debug)]
pub struct Lexicon {
    terms: Vec<String>,
}

impl Lexicon {
    /// Parse `s` as TOML.  Returns `CuraError::ConfigError` on malformed
    /// input.
    pub fn from_toml_str(s: &str) -> CuraResult<Self> {
        let config: LexiconConfig = toml::from_str(s).map_err(|e| CuraError::ConfigError {
            reason: format!("failed to parse terminology TOML: {}", e),
        })?;
        Ok(Self { terms: config.terms })
    }

    /// Read the file at `path` and parse it as a terminology table.
    pub fn from_file(path: &Path) -> CuraResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| CuraError::ConfigError {
            reason: format!("failed to read terminology file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The embedded default table, shared process-wide.
    pub fn builtin() -> Arc<Lexicon> {
        static BUILTIN: LazyLock<Arc<Lexicon>> = LazyLock::new(|| {
            Arc::new(
                Lexicon::from_toml_str(BUILTIN_TERMS)
                    .expect("embedded terminology table must be valid"),
            )
        });
        Arc::clone(&BUILTIN)
    }

    /// All entries in registration order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Completions for `trailing_fragment`.
    ///
    /// Returns entries containing the fragment as a substring — excluding
    /// an entry exactly equal to the fragment — in registration order, at
    /// most `max_results` of them.  Matching is case-sensitive.  An empty
    /// table, or a fragment matching nothing, yields an empty list.
    pub fn suggest(&self, trailing_fragment: &str, max_results: usize) -> Vec<&str> {
        self.terms
            .iter()
            .filter(|term| term.contains(trailing_fragment) && term.as_str() != trailing_fragment)
            .take(max_results)
            .map(String::as_str)
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
