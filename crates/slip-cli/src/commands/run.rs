use anyhow::Result;
use colored::Colorize;
use slip_application::{ManagerConsole, SlipContext};
use slip_core::action::{ActionKind, RunLogEntry};
use strum::IntoEnumIterator;

use super::report;

pub fn catalog() -> impl Iterator<Item = ActionKind> {
    ActionKind::iter()
}

pub fn list_actions() {
    for action in catalog() {
        println!("{:<30} {}", action.name(), action.label().bright_black());
    }
}

/// Runs `actions` sequentially, waiting for each archive sync before the next.
pub async fn run(context: &SlipContext, actions: &[ActionKind], json: bool) -> Result<()> {
    let mut console = ManagerConsole::new(context);
    console.mount().await.map_err(report)?;

    let mut failures = 0;
    for action in actions {
        eprintln!("{} {}", action.busy_label().bright_black(), action.label());
        let outcome = console.run_action(*action).await.map_err(report)?;
        if let Err(e) = outcome.archive_sync.await {
            tracing::warn!("[slip] Archive sync task failed: {}", e);
        }
        if !outcome.entry.ok {
            failures += 1;
        }
        print_entry(&outcome.entry);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&console.run_log().await)?);
    }
    println!(
        "{} archived files after run",
        console.archives().len().to_string().bold()
    );

    if failures > 0 {
        anyhow::bail!("{} of {} actions failed", failures, actions.len());
    }
    Ok(())
}

fn print_entry(entry: &RunLogEntry) {
    if entry.ok {
        let payload = entry
            .payload
            .as_ref()
            .map(|p| p.to_string())
            .unwrap_or_default();
        println!("{} {} {}", "OK".green().bold(), entry.endpoint, payload);
    } else {
        println!(
            "{} {} {}",
            "ERROR".red().bold(),
            entry.endpoint,
            entry.error.as_deref().unwrap_or_default()
        );
    }
}
