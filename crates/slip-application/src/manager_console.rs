//! Manager-only view.
//!
//! Mount runs the session guard with the manager role; once authorized, the
//! initial archive sync is performed and the four actions become available.
//! The run log lives as long as this value.

use slip_core::action::{ActionKind, RunLog};
use slip_core::archive::{ArchiveFile, ArchiveListing};
use slip_core::error::{Result, SlipError};
use slip_core::identity::{Identity, Role};
use std::sync::Arc;
use tokio::sync::watch;

use crate::action_runner::{ActionReport, ActionRunner};
use crate::archive_sync::ArchiveSync;
use crate::auth_service::AuthService;
use crate::context::SlipContext;
use crate::session_guard::{GuardState, SessionGuard};

pub struct ManagerConsole {
    base_url: String,
    guard: SessionGuard,
    auth: AuthService,
    archive_sync: Arc<ArchiveSync>,
    runner: ActionRunner,
    state: GuardState,
    initial_sync_error: Option<SlipError>,
}

impl ManagerConsole {
    pub fn new(context: &SlipContext) -> Self {
        let archive_sync = Arc::new(ArchiveSync::new(context.pipeline.clone()));
        let runner = ActionRunner::new(context.pipeline.clone(), archive_sync.clone());
        Self {
            base_url: context.base_url().to_string(),
            guard: context.session_guard(),
            auth: context.auth_service(),
            archive_sync,
            runner,
            state: GuardState::Unchecked,
            initial_sync_error: None,
        }
    }

    /// Enters the view.
    ///
    /// On success returns the manager's identity after the initial archive
    /// sync. A failed initial sync does not fail the mount; the listing stays
    /// empty, the error is kept in `initial_sync_error` and
    /// `refresh_archives` can be used to retry.
    pub async fn mount(&mut self) -> Result<Identity> {
        self.initial_sync_error = None;
        self.state = self.guard.enter(Some(Role::Manager)).await;
        let identity = self.state.clone().into_result()?;

        if let Err(e) = self.archive_sync.refresh().await {
            tracing::warn!("[ManagerConsole] Initial archive sync failed: {}", e);
            self.initial_sync_error = Some(e);
        }
        Ok(identity)
    }

    /// Error of the archive sync performed by the last `mount`, if it failed.
    pub fn initial_sync_error(&self) -> Option<&SlipError> {
        self.initial_sync_error.as_ref()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.state.identity()
    }

    pub fn state(&self) -> &GuardState {
        &self.state
    }

    /// Runs an action by name and path.
    pub async fn run(&self, action_name: &str, endpoint_path: &str) -> Result<ActionReport> {
        self.ensure_authorized()?;
        self.runner.run(action_name, endpoint_path).await
    }

    /// Runs one of the four manager actions.
    pub async fn run_action(&self, action: ActionKind) -> Result<ActionReport> {
        self.ensure_authorized()?;
        self.runner.run_action(action).await
    }

    /// Manual archive refresh; errors are returned to the caller.
    pub async fn refresh_archives(&self) -> Result<ArchiveListing> {
        self.ensure_authorized()?;
        self.archive_sync.refresh().await
    }

    pub fn archives(&self) -> ArchiveListing {
        self.archive_sync.current()
    }

    pub fn subscribe_archives(&self) -> watch::Receiver<ArchiveListing> {
        self.archive_sync.subscribe()
    }

    /// Absolute link for an archived file.
    pub fn archive_link(&self, file: &ArchiveFile) -> String {
        file.download_url(&self.base_url)
    }

    pub async fn run_log(&self) -> RunLog {
        self.runner.run_log().await
    }

    /// Name of the action in flight; every action control is disabled while set.
    pub fn busy(&self) -> Option<String> {
        self.runner.busy()
    }

    /// Clears the session and returns to the login view.
    pub fn logout(&mut self) -> Result<()> {
        self.state = GuardState::Unchecked;
        self.auth.logout()
    }

    fn ensure_authorized(&self) -> Result<()> {
        match &self.state {
            GuardState::Authorized(_) => Ok(()),
            GuardState::Rejected(rejection) => Err(rejection.clone().into_error()),
            GuardState::Unchecked => Err(SlipError::Unauthenticated),
        }
    }
}
