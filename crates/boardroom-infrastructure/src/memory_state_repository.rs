//! In-memory client state repository.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use boardroom_core::error::{BoardroomError, Result};
use boardroom_core::state::{ClientState, ClientStateRepository};

/// Keeps state for the lifetime of the process only.
///
/// Used for `--ephemeral` runs and as a test double; `save_count` lets tests
/// check that every mutation was persisted.
#[derive(Debug, Default)]
pub struct InMemoryClientStateRepository {
    state: Mutex<ClientState>,
    saves: AtomicUsize,
}

impl InMemoryClientStateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: ClientState) -> Self {
        Self {
            state: Mutex::new(state),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// The last saved state.
    pub fn snapshot(&self) -> Result<ClientState> {
        self.load()
    }
}

impl ClientStateRepository for InMemoryClientStateRepository {
    fn load(&self) -> Result<ClientState> {
        self.state
            .lock()
            .map(|state| state.clone())
            .map_err(|e| BoardroomError::io(format!("Failed to lock state: {}", e)))
    }

    fn save(&self, state: &ClientState) -> Result<()> {
        let mut guard = self
            .state
            .lock()
            .map_err(|e| BoardroomError::io(format!("Failed to lock state: {}", e)))?;
        *guard = state.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardroom_core::session::{Session, Theme};

    #[test]
    fn test_save_and_load() {
        let repo = InMemoryClientStateRepository::new();
        let state = ClientState {
            session: Session::logged_out(Theme::Light),
            ..ClientState::default()
        };
        repo.save(&state).unwrap();
        assert_eq!(repo.load().unwrap(), state);
        assert_eq!(repo.save_count(), 1);
    }
}
