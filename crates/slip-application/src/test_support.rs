//! Mock implementations of the trait seams, shared by the unit tests.

use async_trait::async_trait;
use serde_json::{Value, json};
use slip_core::error::{Result, SlipError};
use slip_core::navigation::{Navigator, Notice, Route};
use slip_core::transport::{ApiRequest, ApiResponse, HttpTransport, Method};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

pub const TEST_BASE_URL: &str = "http://backend.test";

/// Transport that answers from a fixed routing table and records requests.
pub struct ScriptedTransport {
    routes: Mutex<HashMap<(Method, String), Result<ApiResponse>>>,
    gates: Mutex<HashMap<String, Arc<Semaphore>>>,
    holds: Mutex<HashMap<String, Arc<Semaphore>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            routes: Mutex::new(HashMap::new()),
            gates: Mutex::new(HashMap::new()),
            holds: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answers `method path` with `status` and `body` until replaced.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), Ok(ApiResponse::new(status, body)));
    }

    /// Fails `method path` without a response.
    pub fn fail(&self, method: Method, path: &str, message: &str) {
        self.routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), Err(SlipError::transport(message)));
    }

    /// Holds every request to `path` until a permit is added to the returned gate.
    pub fn gate(&self, path: &str) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        self.gates
            .lock()
            .unwrap()
            .insert(path.to_string(), gate.clone());
        gate
    }

    /// Holds only the next request to `path`, after its answer has been
    /// taken from the routing table, until a permit is added.
    pub fn hold_next(&self, path: &str) -> Arc<Semaphore> {
        let hold = Arc::new(Semaphore::new(0));
        self.holds
            .lock()
            .unwrap()
            .insert(path.to_string(), hold.clone());
        hold
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(request.clone());

        let gate = self.gates.lock().unwrap().get(&request.path).cloned();
        if let Some(gate) = gate {
            gate.acquire().await.unwrap().forget();
        }

        let answer = self
            .routes
            .lock()
            .unwrap()
            .get(&(request.method, request.path.clone()))
            .cloned()
            .unwrap_or_else(|| Ok(ApiResponse::new(404, json!({"detail": "Not Found"}))));

        let hold = self.holds.lock().unwrap().remove(&request.path);
        if let Some(hold) = hold {
            hold.acquire().await.unwrap().forget();
        }
        answer
    }

    fn base_url(&self) -> &str {
        TEST_BASE_URL
    }
}

/// Navigator that records every command it receives.
#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }

    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

pub fn manager_identity() -> Value {
    json!({
        "id": 1,
        "email": "boss@example.com",
        "first_name": "Maria",
        "last_name": "Ionescu",
        "role": "manager"
    })
}

pub fn employee_identity() -> Value {
    json!({
        "id": 2,
        "email": "dev@example.com",
        "first_name": "Dan",
        "last_name": "Popa",
        "role": "employee"
    })
}
