//! Runtime error types for the CURA text processing core.
//!
//! Fallible operations return `CuraResult<T>`.  Note that text processing
//! itself is never fallible: malformed or empty input is valid everywhere,
//! and absence of a match is a silent outcome.  Errors exist only for
//! configuration loading, poisoned locks, and illegal state-machine use.

use thiserror::Error;

/// The unified error type for the CURA runtime.
#[derive(Debug, Error)]
pub enum CuraError {
    /// A rule table or lexicon document is missing, unreadable, or malformed.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The feedback log could not persist a triplet.
    ///
    /// This is treated as fatal — a decision that cannot be recorded cannot
    /// contribute to adoption statistics.
    #[error("feedback log write failed: {reason}")]
    LogWriteFailed { reason: String },

    /// The sanitation pipeline was driven through an illegal transition,
    /// such as stepping a machine that has already completed.
    #[error("state machine error: {reason}")]
    StateMachineError { reason: String },
}

/// Convenience alias used throughout the CURA crates.
pub type CuraResult<T> = Result<T, CuraError>;
