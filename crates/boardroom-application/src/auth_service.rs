//! Login and logout.

use boardroom_core::error::{BoardroomError, Result};
use boardroom_core::session::Role;
use boardroom_infrastructure::BackendGateway;

use crate::in_flight::InFlight;
use crate::session_store::SharedSessionStore;

/// Authenticates against the backend and records the resulting session.
pub struct AuthService {
    gateway: BackendGateway,
    store: SharedSessionStore,
    in_flight: InFlight,
}

impl AuthService {
    pub fn new(gateway: BackendGateway, store: SharedSessionStore) -> Self {
        Self {
            gateway,
            store,
            in_flight: InFlight::new(),
        }
    }

    /// Logs in. The session is only stored once the backend accepts the
    /// credentials; a rejection leaves the previous session untouched.
    pub async fn login(&self, username: &str, password: &str) -> Result<Role> {
        let username = username.trim();
        if username.is_empty() {
            return Err(BoardroomError::invalid_input("username must not be empty"));
        }
        if password.is_empty() {
            return Err(BoardroomError::invalid_input("password must not be empty"));
        }

        let _guard = self.in_flight.try_begin()?;
        let credentials = self.gateway.login(username, password).await?;
        let role = credentials.role;
        self.store.lock().await.login(credentials.token, role)?;
        Ok(role)
    }

    pub async fn logout(&self) -> Result<()> {
        self.store.lock().await.logout()
    }
}
