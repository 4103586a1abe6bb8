use anyhow::Result;
use colored::Colorize;
use slip_application::{ManagerConsole, SlipContext};
use slip_core::archive::ArchiveFile;

use super::report;

pub async fn list(context: &SlipContext, json: bool) -> Result<()> {
    let mut console = ManagerConsole::new(context);
    console.mount().await.map_err(report)?;
    if let Some(e) = console.initial_sync_error() {
        return Err(report(e.clone()));
    }
    let listing = console.archives();

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    print_section(&console, "CSV", &listing.csv);
    print_section(&console, "PDF", &listing.pdf);
    Ok(())
}

fn print_section(console: &ManagerConsole, title: &str, files: &[ArchiveFile]) {
    println!("{} ({})", title.bold(), files.len());
    if files.is_empty() {
        println!("  {}", "none".bright_black());
    }
    for file in files {
        println!(
            "  {}  {}  {} bytes",
            file.name,
            file.modified.bright_black(),
            file.size_bytes
        );
        println!("    {}", console.archive_link(file).underline());
    }
}
