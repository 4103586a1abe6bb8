//! Dashboard view, open to any authenticated role.

use serde::Serialize;
use slip_core::error::{Result, SlipError};
use slip_core::identity::{Identity, Role};
use slip_core::navigation::{Navigator, Route};
use std::sync::Arc;

use crate::auth_service::AuthService;
use crate::context::SlipContext;
use crate::session_guard::SessionGuard;

/// What the dashboard shows after a successful mount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub identity: Identity,
    /// Whether the link to the manager view is offered.
    pub can_manage: bool,
}

pub struct Dashboard {
    guard: SessionGuard,
    auth: AuthService,
    navigator: Arc<dyn Navigator>,
    summary: Option<DashboardSummary>,
}

impl Dashboard {
    pub fn new(context: &SlipContext) -> Self {
        Self {
            guard: context.session_guard(),
            auth: context.auth_service(),
            navigator: context.navigator.clone(),
            summary: None,
        }
    }

    pub async fn mount(&mut self) -> Result<DashboardSummary> {
        let identity = self.guard.enter(None).await.into_result()?;
        let summary = DashboardSummary {
            can_manage: identity.is_manager(),
            identity,
        };
        self.summary = Some(summary.clone());
        Ok(summary)
    }

    pub fn summary(&self) -> Option<&DashboardSummary> {
        self.summary.as_ref()
    }

    /// Navigates to the manager view. Only offered to managers; the manager
    /// view re-checks the role on its own mount regardless.
    pub fn open_manager(&self) -> Result<()> {
        match &self.summary {
            Some(summary) if summary.can_manage => {
                self.navigator.navigate(Route::Manager);
                Ok(())
            }
            Some(summary) => Err(SlipError::Forbidden {
                required: Role::Manager,
                actual: summary.identity.role,
            }),
            None => Err(SlipError::Unauthenticated),
        }
    }

    pub fn logout(&mut self) -> Result<()> {
        self.summary = None;
        self.auth.logout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        RecordingNavigator, ScriptedTransport, employee_identity, manager_identity,
    };
    use serde_json::json;
    use slip_core::idempotency::KeyStrategy;
    use slip_core::transport::Method;
    use slip_infrastructure::MemoryCredentialStore;

    fn dashboard_for(identity: serde_json::Value) -> (Dashboard, Arc<RecordingNavigator>) {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Get, "/auth/me", 200, identity);
        let navigator = Arc::new(RecordingNavigator::new());
        let ctx = SlipContext::new(
            transport,
            Arc::new(MemoryCredentialStore::with_token("tok")),
            Arc::new(KeyStrategy::Uuid),
            navigator.clone(),
        );
        (Dashboard::new(&ctx), navigator)
    }

    #[tokio::test]
    async fn test_manager_can_open_manager_view() {
        let (mut dashboard, navigator) = dashboard_for(manager_identity());

        let summary = dashboard.mount().await.unwrap();
        assert!(summary.can_manage);

        dashboard.open_manager().unwrap();
        assert_eq!(navigator.routes(), vec![Route::Manager]);
    }

    #[tokio::test]
    async fn test_employee_sees_dashboard_without_manager_link() {
        let (mut dashboard, navigator) = dashboard_for(employee_identity());

        let summary = dashboard.mount().await.unwrap();
        assert!(!summary.can_manage);
        assert_eq!(summary.identity.display_name(), "Dan Popa");

        assert!(dashboard.open_manager().is_err());
        assert!(navigator.routes().is_empty());
    }

    #[tokio::test]
    async fn test_failed_identity_redirects() {
        let (mut dashboard, navigator) = dashboard_for(json!({"email": "x@example.com"}));

        let err = dashboard.mount().await.unwrap_err();

        assert_eq!(err, SlipError::Unauthenticated);
        assert_eq!(navigator.routes(), vec![Route::Login]);
        assert!(dashboard.summary().is_none());
    }
}
