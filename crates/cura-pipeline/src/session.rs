//! Session-level run ownership and supersession.
//!
//! A session owns at most one in-flight pipeline machine.  Starting a new
//! run implicitly supersedes the previous one: the old machine is dropped
//! before it can seal, so no partial output from a superseded run is ever
//! surfaced.

use std::sync::Arc;

use tracing::warn;

use cura_contracts::pipeline::PipelineConfig;
use cura_rules::SanitationRuleSet;

use crate::machine::PipelineMachine;

/// One data-adaptor session: a rule table, a node identity, and at most one
/// in-flight run.
pub struct AdaptorSession {
    source_node_id: String,
    rules: Arc<SanitationRuleSet>,
    current: Option<PipelineMachine>,
}

impl AdaptorSession {
    /// Create a session for the given node identity and rule table.
    pub fn new(source_node_id: impl Into<String>, rules: Arc<SanitationRuleSet>) -> Self {
        Self {
            source_node_id: source_node_id.into(),
            rules,
            current: None,
        }
    }

    /// Start a new run, superseding any in-flight one.
    ///
    /// The superseded machine is dropped unsealed — last write wins.
    pub fn begin(&mut self, input: impl Into<String>, config: PipelineConfig) -> &mut PipelineMachine {
        if let Some(prev) = self.current.take() {
            if !prev.is_complete() {
                warn!(
                    superseded_run_id = %prev.run_id().0,
                    "new pipeline run supersedes in-flight run; partial output discarded"
                );
            }
        }

        self.current.insert(PipelineMachine::new(
            input,
            config,
            Arc::clone(&self.rules),
            self.source_node_id.clone(),
        ))
    }

    /// The current machine, if a run has been started.
    pub fn machine(&mut self) -> Option<&mut PipelineMachine> {
        self.current.as_mut()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
