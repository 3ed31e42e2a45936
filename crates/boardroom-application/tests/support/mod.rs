//! Shared fixtures for the workflow tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use boardroom_application::{SessionStore, SharedSessionStore};
use boardroom_core::api::{Action, Payload, RemoteApi, ResponseBody};
use boardroom_core::error::{BoardroomError, Result};
use boardroom_core::session::{Credentials, Role, Session, Theme};
use boardroom_core::state::ClientState;
use boardroom_infrastructure::{BackendGateway, InMemoryClientStateRepository};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Value, json};

/// Answers calls from a queue of scripted responses and records every
/// request it receives.
#[derive(Default)]
pub struct ScriptedApi {
    responses: Mutex<VecDeque<Result<Value>>>,
    requests: Mutex<Vec<(Action, Payload)>>,
}

impl ScriptedApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_ok(&self, fields: Value) {
        self.responses.lock().unwrap().push_back(Ok(fields));
    }

    pub fn push_err(&self, err: BoardroomError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    pub fn requests(&self) -> Vec<(Action, Payload)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn actions(&self) -> Vec<Action> {
        self.requests().into_iter().map(|(action, _)| action).collect()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl RemoteApi for ScriptedApi {
    async fn call(&self, action: Action, payload: Payload) -> Result<ResponseBody> {
        self.requests.lock().unwrap().push((action, payload));
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(Value::Object(mut map))) => {
                map.entry("success").or_insert(Value::Bool(true));
                Ok(ResponseBody::new(map))
            }
            Some(Ok(_)) => Ok(ResponseBody::default()),
            Some(Err(err)) => Err(err),
            None => Err(BoardroomError::transport(format!(
                "no scripted response for {}",
                action
            ))),
        }
    }
}

pub struct Harness {
    pub api: Arc<ScriptedApi>,
    pub gateway: BackendGateway,
    pub repo: Arc<InMemoryClientStateRepository>,
    pub store: SharedSessionStore,
}

impl Harness {
    pub fn with_state(state: ClientState) -> Self {
        let api = ScriptedApi::new();
        let gateway = BackendGateway::new(api.clone());
        let repo = Arc::new(InMemoryClientStateRepository::with_state(state));
        let store = SessionStore::open(repo.clone()).unwrap().into_shared();
        Self {
            api,
            gateway,
            repo,
            store,
        }
    }

    pub fn logged_out() -> Self {
        Self::with_state(ClientState::new())
    }

    pub fn logged_in(role: Role) -> Self {
        let credentials = Credentials::new("tok-123", role).unwrap();
        Self::with_state(ClientState {
            session: Session::authenticated(credentials, Theme::Dark),
            ..ClientState::default()
        })
    }
}

/// Noon on a fixed day, so expiry arithmetic is easy to read.
pub fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

/// A statement record as the backend sends it, created at [`noon`].
pub fn statement_json(id: i64, is_active: bool, duration_minutes: u32) -> Value {
    json!({
        "statementID": id,
        "text": format!("Statement {}", id),
        "judgeVote": "agree",
        "isActive": is_active,
        "createdAt": "2024-03-01T12:00:00Z",
        "durationMinutes": duration_minutes,
    })
}
