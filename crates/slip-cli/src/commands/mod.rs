pub mod archives;
pub mod health;
pub mod run;
pub mod session;

use colored::Colorize;
use slip_core::error::SlipError;

/// Converts a client error into a terminal-friendly `anyhow` error.
pub(crate) fn report(err: SlipError) -> anyhow::Error {
    anyhow::anyhow!("{}", err.user_message().red())
}
