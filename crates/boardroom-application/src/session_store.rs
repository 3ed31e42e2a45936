//! Session store.
//!
//! The single owner of the persisted client state. Every mutation is written
//! through the repository before it becomes visible, so a failed write leaves
//! the previous state in place and a reload always restores the last
//! successful mutation.

use std::sync::Arc;

use boardroom_core::error::Result;
use boardroom_core::ledger::{VoteChoice, VoteLedger};
use boardroom_core::session::{Credentials, Role, Session, Theme};
use boardroom_core::state::{ClientState, ClientStateRepository};
use boardroom_core::statement::StatementId;
use boardroom_core::view::{View, select_view};
use tokio::sync::Mutex;

/// Store shared between workflows.
pub type SharedSessionStore = Arc<Mutex<SessionStore>>;

pub struct SessionStore {
    state: ClientState,
    repository: Arc<dyn ClientStateRepository>,
}

impl SessionStore {
    /// Opens the store, restoring whatever the repository holds.
    pub fn open(repository: Arc<dyn ClientStateRepository>) -> Result<Self> {
        let state = repository.load()?;
        Ok(Self { state, repository })
    }

    /// Wraps the store for sharing between workflows.
    pub fn into_shared(self) -> SharedSessionStore {
        Arc::new(Mutex::new(self))
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn session(&self) -> &Session {
        &self.state.session
    }

    pub fn ledger(&self) -> &VoteLedger {
        &self.state.ledger
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.session.is_authenticated()
    }

    pub fn view(&self) -> View {
        select_view(&self.state.session)
    }

    /// Stores credentials the backend has just issued.
    pub fn login(&mut self, token: impl Into<String>, role: Role) -> Result<()> {
        let credentials = Credentials::new(token, role)?;
        let mut next = self.state.clone();
        next.session.sign_in(credentials);
        self.commit(next)?;
        tracing::info!(%role, "Logged in");
        Ok(())
    }

    /// Clears the session and the whole vote ledger. Only the theme survives.
    pub fn logout(&mut self) -> Result<()> {
        self.commit(ClientState::logged_out(self.state.session.theme()))?;
        tracing::info!("Logged out; vote ledger cleared");
        Ok(())
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        let mut next = self.state.clone();
        next.session.set_theme(theme);
        self.commit(next)
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let theme = self.state.session.theme().toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }

    /// Records a vote the backend has confirmed.
    pub fn record_vote(&mut self, statement_id: &StatementId, choice: VoteChoice) -> Result<()> {
        let mut next = self.state.clone();
        next.ledger.record_vote(statement_id, choice)?;
        self.commit(next)?;
        tracing::info!(statement_id = %statement_id, vote = %choice, "Vote recorded");
        Ok(())
    }

    fn commit(&mut self, next: ClientState) -> Result<()> {
        self.repository.save(&next)?;
        self.state = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardroom_core::error::BoardroomError;
    use boardroom_infrastructure::InMemoryClientStateRepository;

    fn store() -> (SessionStore, Arc<InMemoryClientStateRepository>) {
        let repo = Arc::new(InMemoryClientStateRepository::new());
        (SessionStore::open(repo.clone()).unwrap(), repo)
    }

    /// Fails every save, for checking that state is left untouched.
    struct BrokenRepository;

    impl ClientStateRepository for BrokenRepository {
        fn load(&self) -> Result<ClientState> {
            Ok(ClientState::default())
        }

        fn save(&self, _state: &ClientState) -> Result<()> {
            Err(BoardroomError::io("disk full"))
        }
    }

    #[test]
    fn test_login_persists_and_authenticates() {
        let (mut store, repo) = store();
        store.login("abc", Role::Participant).unwrap();

        assert!(store.is_authenticated());
        assert_eq!(store.session().role(), Some(Role::Participant));
        assert_eq!(store.view(), View::Participant);
        assert_eq!(repo.snapshot().unwrap(), store.state().clone());
    }

    #[test]
    fn test_login_rejects_empty_token() {
        let (mut store, repo) = store();
        assert!(store.login("", Role::Judge).is_err());
        assert!(!store.is_authenticated());
        assert_eq!(repo.save_count(), 0);
    }

    #[test]
    fn test_logout_clears_session_and_ledger_but_keeps_theme() {
        let (mut store, repo) = store();
        store.set_theme(Theme::Light).unwrap();
        store.login("abc", Role::Participant).unwrap();
        store.record_vote(&StatementId::new("1"), VoteChoice::Agree).unwrap();
        store.record_vote(&StatementId::new("2"), VoteChoice::Neutral).unwrap();

        store.logout().unwrap();

        assert!(!store.is_authenticated());
        assert!(store.ledger().can_vote_neutral());
        assert!(store.ledger().vote_history().is_empty());
        assert!(store.ledger().vote_counts().is_empty());
        assert_eq!(store.session().theme(), Theme::Light);
        assert_eq!(store.view(), View::Login);
        assert_eq!(repo.snapshot().unwrap(), ClientState::logged_out(Theme::Light));
    }

    #[test]
    fn test_reopen_restores_prior_session() {
        let repo = Arc::new(InMemoryClientStateRepository::new());
        {
            let mut store = SessionStore::open(repo.clone()).unwrap();
            store.login("abc", Role::Judge).unwrap();
            store.toggle_theme().unwrap();
        }
        let reopened = SessionStore::open(repo).unwrap();
        assert_eq!(reopened.session().token(), Some("abc"));
        assert_eq!(reopened.session().theme(), Theme::Light);
    }

    #[test]
    fn test_every_mutation_is_saved() {
        let (mut store, repo) = store();
        store.login("abc", Role::Participant).unwrap();
        store.set_theme(Theme::Light).unwrap();
        store.record_vote(&StatementId::new("1"), VoteChoice::Agree).unwrap();
        store.logout().unwrap();
        assert_eq!(repo.save_count(), 4);
    }

    #[test]
    fn test_toggle_theme_flips_and_persists() {
        let (mut store, repo) = store();
        assert_eq!(store.toggle_theme().unwrap(), Theme::Light);
        assert_eq!(repo.snapshot().unwrap().session.theme(), Theme::Light);
        assert_eq!(store.toggle_theme().unwrap(), Theme::Dark);
    }

    #[test]
    fn test_ineligible_vote_is_not_saved() {
        let (mut store, repo) = store();
        store.record_vote(&StatementId::new("1"), VoteChoice::Neutral).unwrap();
        let saves = repo.save_count();

        let err = store
            .record_vote(&StatementId::new("2"), VoteChoice::Neutral)
            .unwrap_err();
        assert!(err.is_ineligible_vote());
        assert_eq!(repo.save_count(), saves);
    }

    #[test]
    fn test_failed_save_leaves_state_untouched() {
        let mut store = SessionStore::open(Arc::new(BrokenRepository)).unwrap();
        assert!(store.login("abc", Role::Judge).is_err());
        assert!(!store.is_authenticated());
        assert!(store.toggle_theme().is_err());
        assert_eq!(store.session().theme(), Theme::Dark);
    }
}
