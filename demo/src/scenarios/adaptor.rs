//! Scenario 1: Data Adaptor
//!
//! Feeds a messy HIS/EMR export — embedded markup, corruption markers, a
//! colloquial TCM term, and three kinds of PII — through the staged
//! sanitation pipeline, printing each observable stage transition.  The run
//! is then repeated with masking disabled to show the compliance scan
//! flagging non-forwardable output.

use cura_contracts::error::CuraResult;
use cura_contracts::pipeline::{ComplianceCheck, PipelineConfig, PipelineRun};
use cura_pipeline::{AdaptorSession, StepOutcome};
use cura_rules::SanitationRuleSet;

/// The raw input a hospital information system might hand the adaptor.
const RAW_EXPORT: &str = "<div>Name: Wei</div>\n\
<span class=\"id\">ID: 110101198001011234??</span>\n\
<p>Address: 12 Chaoyang North Street &nbsp;</p>\n\
<div>Chief complaint: chest impediment (Xiong Bi) for 3 days.</div>\n\
<div>History: hypertension. BP: 150/95 mmHg.</div>";

pub fn run_scenario() -> CuraResult<()> {
    println!("Scenario 1: Data Adaptor — staged sanitation");
    println!("--------------------------------------------");
    println!();
    println!("Raw input:");
    println!("{}", RAW_EXPORT);
    println!();

    let mut session = AdaptorSession::new("SPOKE_BJ_02", SanitationRuleSet::builtin());

    // Full pipeline: all three transformation stages enabled.
    let run = drive(&mut session, PipelineConfig::default())?;
    print_run(&run);

    // Same input with masking disabled: the compliance scan must flag the
    // residual PII so a caller can refuse to forward the document.
    println!("Re-running with masking disabled:");
    println!();
    let run = drive(
        &mut session,
        PipelineConfig {
            redact_enabled: false,
            ..PipelineConfig::default()
        },
    )?;
    print_run(&run);

    Ok(())
}

/// Step the machine one stage at a time, printing each transition the way a
/// progress UI would render it.
fn drive(session: &mut AdaptorSession, config: PipelineConfig) -> CuraResult<PipelineRun> {
    let machine = session.begin(RAW_EXPORT, config);

    loop {
        match machine.step()? {
            StepOutcome::Advanced { stage, skipped } => {
                let status = if skipped { "skipped" } else { "done" };
                println!("  [{}] {}", stage, status);
            }
            StepOutcome::Complete(run) => {
                println!();
                return Ok(run);
            }
        }
    }
}

fn print_run(run: &PipelineRun) {
    println!("Sanitized output:");
    println!("{}", run.output);
    println!();
    println!(
        "Metadata: {}",
        serde_json::to_string_pretty(&run.metadata).expect("metadata serializes")
    );
    if run.metadata.compliance_check == ComplianceCheck::Fail {
        println!("Compliance FAIL — output withheld from the vector index.");
    }
    println!();
}
