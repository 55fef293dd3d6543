//! # cura-pipeline
//!
//! The staged sanitation pipeline for the CURA clinical text runtime.
//!
//! ## Overview
//!
//! Raw clinical text passes through four fixed stages — CLEANING, MAPPING,
//! MASKING, VECTORIZING — driven one stage at a time by an explicit state
//! machine the caller steps.  The first three stages interpret the rule
//! families declared in `cura-rules`; the fourth is the handoff marker to
//! an external embedding/indexing collaborator.
//!
//! Every sealed run carries a compliance verdict: `Fail` means redaction
//! patterns still match the output (masking was skipped on input that
//! needed it), so the caller can refuse to forward the document.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cura_pipeline::{AdaptorSession, StepOutcome};
//! use cura_rules::SanitationRuleSet;
//!
//! let mut session = AdaptorSession::new("SPOKE_BJ_02", SanitationRuleSet::builtin());
//! let machine = session.begin(raw_text, config);
//! loop {
//!     match machine.step()? {
//!         StepOutcome::Advanced { stage, .. } => render_progress(stage),
//!         StepOutcome::Complete(run) => break forward(run),
//!     }
//! }
//! ```

pub mod applier;
pub mod machine;
pub mod session;

pub use applier::{apply_family, redaction_clean};
pub use machine::{Phase, PipelineMachine, StepOutcome};
pub use session::AdaptorSession;
