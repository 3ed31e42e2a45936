pub mod judge;
pub mod participant;
pub mod session;
pub mod utils;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use boardroom_application::{SessionStore, SharedSessionStore};
use boardroom_core::error::BoardroomError;
use boardroom_core::session::Role;
use boardroom_core::state::ClientStateRepository;
use boardroom_core::view::View;
use boardroom_infrastructure::{
    BackendGateway, BoardroomPaths, ConfigService, HttpApiClient, InMemoryClientStateRepository,
    TomlClientStateRepository,
};

/// Everything a command needs. The backend client is only built by commands
/// that talk to the network, so local commands work without a configured URL.
pub struct AppContext {
    pub store: SharedSessionStore,
    pub state_location: String,
    config: ConfigService,
    api_url: Option<String>,
}

impl AppContext {
    pub fn open(
        paths: &BoardroomPaths,
        api_url: Option<String>,
        state_file: Option<PathBuf>,
        ephemeral: bool,
    ) -> Result<Self> {
        let repository: Arc<dyn ClientStateRepository>;
        let state_location;
        if ephemeral {
            repository = Arc::new(InMemoryClientStateRepository::new());
            state_location = "memory (ephemeral)".to_string();
        } else {
            let path = match state_file {
                Some(path) => path,
                None => paths.state_file()?,
            };
            let file_repository = TomlClientStateRepository::new(path);
            state_location = file_repository.path().display().to_string();
            repository = Arc::new(file_repository);
        }

        tracing::debug!(state = %state_location, "Opening client state");
        Ok(Self {
            store: SessionStore::open(repository)?.into_shared(),
            state_location,
            config: ConfigService::new(paths.config_file()?),
            api_url,
        })
    }

    pub fn config(&self) -> &ConfigService {
        &self.config
    }

    pub fn api_url_override(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    pub fn gateway(&self) -> Result<BackendGateway> {
        let config = self.config.resolve(self.api_url.as_deref())?;
        let client = HttpApiClient::from_config(&config)?;
        Ok(BackendGateway::new(Arc::new(client)))
    }

    /// Fails unless the stored session selects `view`.
    pub async fn require_view(&self, view: View) -> Result<()> {
        let current = self.store.lock().await.view();
        match (current, view) {
            (current, wanted) if current == wanted => Ok(()),
            (View::Login, _) => Err(BoardroomError::NotAuthenticated.into()),
            (_, View::Judge) => Err(BoardroomError::RoleRequired(Role::Judge).into()),
            (_, _) => Err(BoardroomError::RoleRequired(Role::Participant).into()),
        }
    }
}
