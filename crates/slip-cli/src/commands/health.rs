use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use slip_application::SlipContext;

pub async fn check(context: &SlipContext) -> Result<()> {
    let health = context.health_check();
    match health.check().await {
        Ok(status) => {
            println!("{} {}", "OK".green().bold(), health.base_url());
            println!("{}", serde_json::to_string_pretty(&status)?);
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "ERROR".red().bold(), health.base_url());
            println!("{}", json!({"error": e.user_message()}));
            anyhow::bail!("backend is not healthy")
        }
    }
}
