//! File-backed client state repository.

use std::path::PathBuf;

use boardroom_core::error::Result;
use boardroom_core::state::{ClientState, ClientStateRepository};

use crate::dto::ClientStateDto;
use crate::storage::AtomicTomlFile;

/// Stores [`ClientState`] as a TOML document, replaced atomically on every save.
pub struct TomlClientStateRepository {
    file: AtomicTomlFile<ClientStateDto>,
}

impl TomlClientStateRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }
}

impl ClientStateRepository for TomlClientStateRepository {
    fn load(&self) -> Result<ClientState> {
        let state = self
            .file
            .load()?
            .map(ClientState::from)
            .unwrap_or_default();
        tracing::debug!(
            path = %self.file.path().display(),
            authenticated = state.session.is_authenticated(),
            "Loaded client state"
        );
        Ok(state)
    }

    fn save(&self, state: &ClientState) -> Result<()> {
        self.file.save(&ClientStateDto::from(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardroom_core::ledger::VoteChoice;
    use boardroom_core::session::{Credentials, Role, Session, Theme};
    use boardroom_core::statement::StatementId;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_default() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlClientStateRepository::new(temp_dir.path().join("state.toml"));
        assert_eq!(repo.load().unwrap(), ClientState::default());
    }

    #[test]
    fn test_save_then_reload_restores_exact_state() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.toml");

        let mut state = ClientState {
            session: Session::authenticated(
                Credentials::new("tok", Role::Participant).unwrap(),
                Theme::Light,
            ),
            ..ClientState::default()
        };
        state
            .ledger
            .record_vote(&StatementId::new("42"), VoteChoice::Agree)
            .unwrap();
        state
            .ledger
            .record_vote(&StatementId::new("42"), VoteChoice::Disagree)
            .unwrap();

        TomlClientStateRepository::new(path.clone()).save(&state).unwrap();

        // A fresh repository stands in for a page reload.
        let reloaded = TomlClientStateRepository::new(path).load().unwrap();
        assert_eq!(reloaded, state);
        assert!(!reloaded.ledger.can_vote(&StatementId::new("42")));
    }

    #[test]
    fn test_out_of_range_counts_do_not_block_loading() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.toml");
        std::fs::write(
            &path,
            "token = \"tok\"\nrole = \"participant\"\n\n[voteCounts]\n\"42\" = 300\n\"7\" = -1\n",
        )
        .unwrap();

        let state = TomlClientStateRepository::new(path).load().unwrap();
        assert!(state.session.is_authenticated());
        assert_eq!(state.ledger.vote_count(&StatementId::new("42")), 2);
        assert_eq!(state.ledger.vote_count(&StatementId::new("7")), 0);
    }
}
