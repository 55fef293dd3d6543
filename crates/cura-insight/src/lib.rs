//! # cura-insight
//!
//! The rule-based decision-support engine for the CURA clinical text
//! runtime.
//!
//! ## Overview
//!
//! The engine scans free-text clinical notes for the trigger patterns
//! registered in `cura-rules` and emits prioritized, sourced suggestions.
//! Evaluation is pure and deterministic; this is a deterministic
//! pattern-trigger engine, not a statistical model.
//!
//! `NoteSession` adds the latest-request-wins recomputation policy: a new
//! submission supersedes any earlier in-flight evaluation, so a stale
//! suggestion set is never delivered after a newer one.

pub mod engine;
pub mod session;

pub use engine::InsightEngine;
pub use session::{EvalTicket, NoteSession};

// ── Tests ─────────────────────────────────────────────────────────────────────
