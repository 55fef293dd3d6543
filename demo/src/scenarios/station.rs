//! Scenario 2: Doctor Station
//!
//! Simulates a clinician typing a progress note.  An early snapshot is
//! superseded by a newer one (latest request wins), the newest snapshot is
//! evaluated into prioritized suggestions, the autocomplete matcher
//! completes a trailing fragment, and three feedback decisions are recorded
//! and rolled into adoption statistics.

use cura_contracts::error::CuraResult;
use cura_contracts::feedback::{NoteMutation, Rating};
use cura_feedback::FeedbackLog;
use cura_insight::{InsightEngine, NoteSession};
use cura_lexicon::Lexicon;
use cura_rules::InsightRuleSet;

pub fn run_scenario() -> CuraResult<()> {
    println!("Scenario 2: Doctor Station — insight, feedback, autocomplete");
    println!("------------------------------------------------------------");
    println!();

    let mut session = NoteSession::new(InsightEngine::new(InsightRuleSet::builtin()));

    // The clinician keeps typing: the first snapshot is superseded before
    // its evaluation is consumed.
    let early = session.submit("Patient reports chest pain");
    let mut note = String::from(
        "Patient reports chest pain since this morning. \
         History of hypertension. BP 180/110 on admission.",
    );
    let latest = session.submit(note.clone());

    assert!(session.evaluate(&early).is_none());
    println!("(superseded snapshot discarded without delivering suggestions)");
    println!();

    let suggestions = session
        .evaluate(&latest)
        .expect("newest snapshot must evaluate");

    println!("Note:");
    println!("{}", note);
    println!();
    println!("Suggestions ({}):", suggestions.len());
    for suggestion in &suggestions {
        println!(
            "  [{}] {} — {} ({})",
            suggestion.priority, suggestion.title, suggestion.source, suggestion.rationale
        );
        println!("        {}", suggestion.content);
    }
    println!();

    // Autocomplete on the trailing fragment of the input.
    let lexicon = Lexicon::builtin();
    println!("Autocomplete for trailing fragment \"cardia\":");
    for term in lexicon.suggest("cardia", 5) {
        println!("  {}", term);
    }
    println!();

    // Record one decision per suggestion; Adopt hands back the addendum the
    // editor applies to the note on its side.
    let log = FeedbackLog::new("WS-CARDIO-01");
    let ratings = [Rating::Adopt, Rating::Modify, Rating::Reject];

    for (suggestion, rating) in suggestions.iter().zip(ratings) {
        let outcome = log.record(&note, suggestion, rating)?;
        println!("Recorded [{}] {}", rating, suggestion.title);

        if let Some(NoteMutation::AppendAddendum { text }) = outcome.note_mutation {
            note.push_str(&text);
            println!("  (addendum applied to the note by the editor)");
        }
    }
    println!();

    let stats = log.stats();
    println!(
        "Adoption stats: adopted {} ({}%), modified {} ({}%), rejected {} ({}%), total {}",
        stats.adopted,
        stats.adopted_pct(),
        stats.modified,
        stats.modified_pct(),
        stats.rejected,
        stats.rejected_pct(),
        stats.total_triplets
    );

    let export = log.export_log();
    println!(
        "Feedback chain: {} events, intact: {}, terminal hash {}",
        export.events.len(),
        log.verify_integrity(),
        &export.terminal_hash[..16.min(export.terminal_hash.len())]
    );
    println!();

    Ok(())
}
