use anyhow::{Context, Result};
use colored::Colorize;
use slip_application::{Dashboard, SlipContext};
use std::io::{BufRead, IsTerminal, Write};

use super::report;

pub const PASSWORD_ENV: &str = "SLIP_PASSWORD";

pub async fn login(context: &SlipContext, email: &str) -> Result<()> {
    let from_env = std::env::var(PASSWORD_ENV).ok();
    if from_env.is_none() && std::io::stdin().is_terminal() {
        eprint!("Password for {}: ", email);
        std::io::stderr().flush()?;
    }
    let password = read_password(from_env, &mut std::io::stdin().lock())?;

    context
        .auth_service()
        .login(email, &password)
        .await
        .map_err(report)?;

    println!("{} signed in as {}", "OK".green().bold(), email);
    Ok(())
}

pub fn logout(context: &SlipContext) -> Result<()> {
    context.auth_service().logout().map_err(report)?;
    println!("{} signed out", "OK".green().bold());
    Ok(())
}

pub async fn me(context: &SlipContext) -> Result<()> {
    let mut dashboard = Dashboard::new(context);
    let summary = dashboard.mount().await.map_err(report)?;
    let identity = &summary.identity;

    println!("{} <{}>", identity.display_name().bold(), identity.email);
    println!("  id:   {}", identity.id);
    println!("  role: {}", identity.role);
    if summary.can_manage {
        println!("  {}", "manager actions available".cyan());
    }
    Ok(())
}

/// Takes the password from the environment value if set, else from the first
/// line of `input`.
fn read_password(from_env: Option<String>, input: &mut impl BufRead) -> Result<String> {
    if let Some(password) = from_env.filter(|p| !p.is_empty()) {
        return Ok(password);
    }

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        anyhow::bail!("No password given (set {} or pipe it on stdin)", PASSWORD_ENV);
    }
    Ok(password.to_string())
}
