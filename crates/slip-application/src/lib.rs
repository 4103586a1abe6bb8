//! Application layer for the Slip client.
//!
//! Use cases coordinating the domain seams: the request pipeline every call
//! goes through, the session guard run on each protected view, the
//! single-flight action runner with its archive sync, and the views built on
//! top of them.

pub mod action_runner;
pub mod archive_sync;
pub mod auth_service;
pub mod context;
pub mod dashboard;
pub mod health;
pub mod manager_console;
pub mod pipeline;
pub mod session_guard;

#[cfg(test)]
mod test_support;

pub use action_runner::{ActionReport, ActionRunner};
pub use archive_sync::ArchiveSync;
pub use auth_service::AuthService;
pub use context::SlipContext;
pub use dashboard::{Dashboard, DashboardSummary};
pub use health::HealthCheck;
pub use manager_console::ManagerConsole;
pub use pipeline::RequestPipeline;
pub use session_guard::{GuardState, Rejection, SessionGuard};
