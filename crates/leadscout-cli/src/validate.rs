//! `validate` command: batch-score a JSON file of leads.

use std::path::Path;

use anyhow::Context;

use leadscout_core::LeadRecord;
use leadscout_validate::LeadValidator;

pub(crate) fn run(file: &Path, json: bool) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("reading leads from {}", file.display()))?;
    let leads: Vec<LeadRecord> =
        serde_json::from_str(&content).context("leads file must be a JSON array of leads")?;

    let validator = LeadValidator::with_builtin_reference();
    let outcome = validator.batch_validate(&leads);

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    for lead in &leads {
        if let Some(result) = outcome.results.get(&lead.id) {
            let verdict = if result.is_valid {
                "valid"
            } else if result.confidence_score >= 50 {
                "suspicious"
            } else {
                "invalid"
            };
            println!(
                "{:<30} score {:>3}  {}",
                truncate(&lead.name, 30),
                result.confidence_score,
                verdict
            );
            for warning in &result.warnings {
                println!("{:<30}            - {warning}", "");
            }
        }
    }

    let summary = &outcome.summary;
    println!(
        "\n{} leads: {} valid, {} suspicious, {} invalid (mean score {:.1})",
        summary.total, summary.valid, summary.suspicious, summary.invalid, summary.mean_score
    );
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_owned()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    }
}
