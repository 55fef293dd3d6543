//! Sanitation pipeline types: stages, traces, and the compliance record.
//!
//! A pipeline run transforms one raw clinical document through four fixed
//! stages.  The types here describe the *result* of a run; the state machine
//! that produces them lives in `cura-pipeline`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a single pipeline run.
///
/// Every run — including superseded ones — gets its own UUID, which appears
/// in structured log output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub uuid::Uuid);

impl RunId {
    /// Create a new, unique run ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

/// The four pipeline stages, in their fixed execution order.
///
/// Cleaning, Mapping, and Masking each correspond to one rule family and one
/// config flag.  Vectorizing is the terminal handoff marker: the pipeline
/// never embeds text itself, it only signals readiness to the downstream
/// indexing collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StageKind {
    /// Markup and noise cleanup.
    Cleaning,
    /// Terminology normalization.
    Mapping,
    /// PII redaction.
    Masking,
    /// Embedding handoff marker (no text transformation).
    Vectorizing,
}

impl StageKind {
    /// All stages in execution order.  Every run's trace contains exactly
    /// these four entries, in this order, regardless of configuration.
    pub const ALL: [StageKind; 4] = [
        StageKind::Cleaning,
        StageKind::Mapping,
        StageKind::Masking,
        StageKind::Vectorizing,
    ];
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StageKind::Cleaning => "CLEANING",
            StageKind::Mapping => "MAPPING",
            StageKind::Masking => "MASKING",
            StageKind::Vectorizing => "VECTORIZING",
        };
        f.write_str(name)
    }
}

/// Per-stage configuration flags.
///
/// A disabled stage is still recorded in the trace (with `skipped = true`)
/// so callers always observe all four stage slots.  Vectorizing has no flag
/// and always executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Run the Cleaning stage (markup/entity/noise cleanup).
    pub clean_enabled: bool,
    /// Run the Mapping stage (terminology normalization).
    pub normalize_enabled: bool,
    /// Run the Masking stage (PII redaction).
    pub redact_enabled: bool,
}

impl Default for PipelineConfig {
    /// All three transformation stages enabled.
    fn default() -> Self {
        Self {
            clean_enabled: true,
            normalize_enabled: true,
            redact_enabled: true,
        }
    }
}

/// One entry in a run's stage trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageReport {
    /// Which stage this entry describes.
    pub stage: StageKind,
    /// When the stage began (UTC).
    pub started_at: DateTime<Utc>,
    /// When the stage finished (UTC).
    pub finished_at: DateTime<Utc>,
    /// True when the stage's config flag was off; the text passed through
    /// unchanged.
    pub skipped: bool,
}

/// The compliance verdict attached to every run.
///
/// `Fail` means redaction-pattern matches remain in the output — reachable
/// when masking was disabled on input that needed it.  This is a data
/// condition for a downstream policy decision, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceCheck {
    Pass,
    Fail,
}

/// Metadata record consumed by the downstream indexing collaborator.
///
/// Field names serialize in camelCase — this exact wire shape is part of
/// the external interface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceRecord {
    /// Identifier of the node that produced this document (e.g. "SPOKE_BJ_02").
    pub source_node_id: String,
    /// Whether the output is free of residual redaction-pattern matches.
    pub compliance_check: ComplianceCheck,
    /// When the run finished (UTC, ISO-8601 on the wire).
    pub timestamp: DateTime<Utc>,
}

/// A finished pipeline run.  Immutable once constructed.
///
/// `stages` always holds exactly four reports, one per `StageKind::ALL`
/// entry, each marked `skipped` per its config flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRun {
    /// Unique identifier for this run.
    pub run_id: RunId,
    /// The raw input document, as received.
    pub input: String,
    /// The configuration this run executed under.
    pub config: PipelineConfig,
    /// The stage-by-stage trace, in execution order.
    pub stages: Vec<StageReport>,
    /// The final text after all enabled stages.
    pub output: String,
    /// Compliance metadata for the downstream indexing collaborator.
    pub metadata: ComplianceRecord,
}
