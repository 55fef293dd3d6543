//! The sanitation pipeline state machine.
//!
//! The pipeline enforces the fixed stage order:
//!
//!   IDLE → CLEANING → MAPPING → MASKING → VECTORIZING → COMPLETE
//!
//! Each call to `step()` executes exactly one stage, so every transition is
//! observable: a host can render progress between calls, await between
//! calls, or drive the machine to completion with `run()`.  The core
//! assumes no timing mechanism — scheduling transitions belongs to the
//! caller.
//!
//! A disabled stage still occupies its slot in the trace (`skipped = true`,
//! text unchanged); callers see all four stages in every run regardless of
//! configuration.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use cura_contracts::{
    error::{CuraError, CuraResult},
    pipeline::{
        ComplianceCheck, ComplianceRecord, PipelineConfig, PipelineRun, RunId, StageKind,
        StageReport,
    },
};
use cura_rules::{RuleFamily, SanitationRuleSet};

use crate::applier::{apply_family, redaction_clean};

/// The observable lifecycle phase of a pipeline machine.
///
/// `Idle` before the first step; each stage phase after that stage has
/// executed; `Complete` once the run has been sealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Cleaning,
    Mapping,
    Masking,
    Vectorizing,
    Complete,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Idle => "IDLE",
            Phase::Cleaning => "CLEANING",
            Phase::Mapping => "MAPPING",
            Phase::Masking => "MASKING",
            Phase::Vectorizing => "VECTORIZING",
            Phase::Complete => "COMPLETE",
        };
        f.write_str(name)
    }
}

/// The outcome of a single `step()` call.
///
/// Callers pattern-match on this to decide what to do next:
/// - `Advanced` → render the stage that just ran, then call step() again
/// - `Complete` → collect the sealed, immutable `PipelineRun`
#[derive(Debug)]
pub enum StepOutcome {
    /// One stage executed (or was skipped).  The run is not yet sealed.
    Advanced {
        /// The stage that just occupied its trace slot.
        stage: StageKind,
        /// True when the stage's config flag was off.
        skipped: bool,
    },

    /// All four stages have run; the sealed run is returned.
    Complete(PipelineRun),
}

/// A single in-flight sanitation run.
///
/// Construct one machine per run.  The machine owns the evolving text; no
/// intermediate text is exposed, so a superseded machine can be dropped
/// without ever surfacing partial output.
pub struct PipelineMachine {
    run_id: RunId,
    input: String,
    text: String,
    config: PipelineConfig,
    rules: Arc<SanitationRuleSet>,
    source_node_id: String,
    phase: Phase,
    reports: Vec<StageReport>,
}

impl PipelineMachine {
    /// Create a machine in the `Idle` phase.  No text is touched until the
    /// first `step()`.
    pub fn new(
        input: impl Into<String>,
        config: PipelineConfig,
        rules: Arc<SanitationRuleSet>,
        source_node_id: impl Into<String>,
    ) -> Self {
        let input = input.into();
        Self {
            run_id: RunId::new(),
            text: input.clone(),
            input,
            config,
            rules,
            source_node_id: source_node_id.into(),
            phase: Phase::Idle,
            reports: Vec::with_capacity(StageKind::ALL.len()),
        }
    }

    /// This run's unique identifier.
    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    /// The current observable phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True once the run has been sealed.
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// Execute the next stage.
    ///
    /// Returns `Advanced` after each of the four stages and `Complete` on
    /// the call after `Vectorizing`, when the run is sealed.  Stepping a
    /// completed machine is a `StateMachineError`.
    pub fn step(&mut self) -> CuraResult<StepOutcome> {
        let stage = match self.phase {
            Phase::Idle => StageKind::Cleaning,
            Phase::Cleaning => StageKind::Mapping,
            Phase::Mapping => StageKind::Masking,
            Phase::Masking => StageKind::Vectorizing,
            Phase::Vectorizing => return Ok(StepOutcome::Complete(self.seal())),
            Phase::Complete => {
                return Err(CuraError::StateMachineError {
                    reason: format!(
                        "pipeline run {} already complete; create a new run instead of stepping",
                        self.run_id.0
                    ),
                });
            }
        };

        let skipped = self.execute(stage);
        self.phase = match stage {
            StageKind::Cleaning => Phase::Cleaning,
            StageKind::Mapping => Phase::Mapping,
            StageKind::Masking => Phase::Masking,
            StageKind::Vectorizing => Phase::Vectorizing,
        };

        Ok(StepOutcome::Advanced { stage, skipped })
    }

    /// Drive the machine to completion and return the sealed run.
    pub fn run(&mut self) -> CuraResult<PipelineRun> {
        loop {
            if let StepOutcome::Complete(run) = self.step()? {
                return Ok(run);
            }
        }
    }

    /// Execute one stage against the current text, record its trace slot,
    /// and return whether it was skipped.
    fn execute(&mut self, stage: StageKind) -> bool {
        let started_at = Utc::now();

        // Vectorizing has no flag and no family: it only marks the handoff
        // to the external embedding collaborator.
        let (enabled, family) = match stage {
            StageKind::Cleaning => (self.config.clean_enabled, Some(RuleFamily::Clean)),
            StageKind::Mapping => (self.config.normalize_enabled, Some(RuleFamily::Normalize)),
            StageKind::Masking => (self.config.redact_enabled, Some(RuleFamily::Redact)),
            StageKind::Vectorizing => (true, None),
        };
        let skipped = !enabled;

        if let (true, Some(family)) = (enabled, family) {
            self.text = apply_family(&self.text, &self.rules, family);
        }

        debug!(
            run_id = %self.run_id.0,
            stage = %stage,
            skipped,
            "pipeline stage executed"
        );

        self.reports.push(StageReport {
            stage,
            started_at,
            finished_at: Utc::now(),
            skipped,
        });

        skipped
    }

    /// Seal the run: compute the compliance verdict and build the immutable
    /// `PipelineRun`.
    ///
    /// The compliance scan runs on every run, even when masking was
    /// skipped — that is the point: a caller must be able to refuse to
    /// forward non-compliant output.
    fn seal(&mut self) -> PipelineRun {
        let compliance_check = if redaction_clean(&self.text, &self.rules) {
            ComplianceCheck::Pass
        } else {
            ComplianceCheck::Fail
        };

        if compliance_check == ComplianceCheck::Fail {
            warn!(
                run_id = %self.run_id.0,
                source_node_id = %self.source_node_id,
                "output still matches redaction patterns; flagging for downstream policy"
            );
        }

        info!(
            run_id = %self.run_id.0,
            compliance = ?compliance_check,
            "pipeline run complete"
        );

        self.phase = Phase::Complete;

        PipelineRun {
            run_id: self.run_id.clone(),
            input: self.input.clone(),
            config: self.config,
            stages: self.reports.clone(),
            output: self.text.clone(),
            metadata: ComplianceRecord {
                source_node_id: self.source_node_id.clone(),
                compliance_check,
                timestamp: Utc::now(),
            },
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
