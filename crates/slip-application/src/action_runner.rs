//! Single-flight action runner.
//!
//! Executes the manager's mutating operations one at a time. A second `run`
//! while one is in flight is rejected up front with `SlipError::Busy`; there
//! is no queue. Every attempt, successful or not, lands in the run log and
//! starts a detached archive sync.

use slip_core::action::{ActionKind, RunLog, RunLogEntry};
use slip_core::error::{Result, SlipError};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::archive_sync::ArchiveSync;
use crate::pipeline::RequestPipeline;

/// Result of one accepted `run`.
#[derive(Debug)]
pub struct ActionReport {
    /// The entry that was prepended to the run log.
    pub entry: RunLogEntry,
    /// Handle of the archive sync started after the attempt.
    pub archive_sync: JoinHandle<()>,
}

pub struct ActionRunner {
    pipeline: Arc<RequestPipeline>,
    archive_sync: Arc<ArchiveSync>,
    busy: Mutex<Option<String>>,
    run_log: RwLock<RunLog>,
}

/// Holds the busy marker; clears it on drop.
struct BusyClaim<'a> {
    slot: &'a Mutex<Option<String>>,
}

impl Drop for BusyClaim<'_> {
    fn drop(&mut self) {
        *lock(self.slot) = None;
    }
}

fn lock(slot: &Mutex<Option<String>>) -> MutexGuard<'_, Option<String>> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ActionRunner {
    pub fn new(pipeline: Arc<RequestPipeline>, archive_sync: Arc<ArchiveSync>) -> Self {
        Self {
            pipeline,
            archive_sync,
            busy: Mutex::new(None),
            run_log: RwLock::new(RunLog::new()),
        }
    }

    /// Name of the action currently in flight, if any.
    pub fn busy(&self) -> Option<String> {
        lock(&self.busy).clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy().is_some()
    }

    /// Snapshot of the run log, most recent first.
    pub async fn run_log(&self) -> RunLog {
        self.run_log.read().await.clone()
    }

    /// Runs one of the catalogued manager actions.
    pub async fn run_action(&self, action: ActionKind) -> Result<ActionReport> {
        self.run(action.name(), &action.path()).await
    }

    /// Runs `action_name` by POSTing an empty body to `endpoint_path`.
    ///
    /// # Errors
    ///
    /// Returns `SlipError::Busy` if another action is in flight. Backend and
    /// transport failures are not errors here: they are recorded in the run
    /// log and returned as a failed entry.
    pub async fn run(&self, action_name: &str, endpoint_path: &str) -> Result<ActionReport> {
        let _claim = self.claim(action_name)?;

        tracing::info!("[ActionRunner] Running {} ({})", action_name, endpoint_path);

        let entry = match self.pipeline.post_empty(endpoint_path).await {
            Ok(payload) => {
                tracing::info!("[ActionRunner] {} succeeded", action_name);
                RunLogEntry::success(action_name, payload)
            }
            Err(e) => {
                let message = e.user_message();
                tracing::warn!("[ActionRunner] {} failed: {}", action_name, message);
                RunLogEntry::failure(action_name, message)
            }
        };

        self.run_log.write().await.prepend(entry.clone());

        let archive_sync = self.archive_sync.spawn_sync();

        Ok(ActionReport {
            entry,
            archive_sync,
        })
    }

    fn claim(&self, action_name: &str) -> Result<BusyClaim<'_>> {
        let mut slot = lock(&self.busy);
        if let Some(in_flight) = slot.as_ref() {
            tracing::debug!(
                "[ActionRunner] Rejecting {}: {} is in flight",
                action_name,
                in_flight
            );
            return Err(SlipError::Busy {
                in_flight: in_flight.clone(),
            });
        }
        *slot = Some(action_name.to_string());
        Ok(BusyClaim { slot: &self.busy })
    }
}
