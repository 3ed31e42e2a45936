//! Client state domain model.
//!
//! The whole of what survives a reload: the session and the vote ledger.

use crate::ledger::VoteLedger;
use crate::session::{Session, Theme};

/// Client state that persists across restarts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientState {
    pub session: Session,
    pub ledger: VoteLedger,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State after a logout: nothing but the theme survives.
    pub fn logged_out(theme: Theme) -> Self {
        Self {
            session: Session::logged_out(theme),
            ledger: VoteLedger::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logged_out_keeps_theme_only() {
        let state = ClientState::logged_out(Theme::Light);
        assert!(!state.session.is_authenticated());
        assert_eq!(state.session.theme(), Theme::Light);
        assert_eq!(state.ledger, VoteLedger::new());
    }
}
