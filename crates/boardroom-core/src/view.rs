//! Top-level view selection.

use crate::session::{Role, Session};

/// Which top-level view to present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Judge,
    Participant,
}

/// Picks the view for a session. A pure function of the session.
pub fn select_view(session: &Session) -> View {
    match session.role() {
        None => View::Login,
        Some(Role::Judge) => View::Judge,
        Some(Role::Participant) => View::Participant,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Credentials, Theme};

    #[test]
    fn test_select_view() {
        assert_eq!(select_view(&Session::default()), View::Login);

        let judge = Session::authenticated(Credentials::new("t", Role::Judge).unwrap(), Theme::Dark);
        assert_eq!(select_view(&judge), View::Judge);

        let participant =
            Session::authenticated(Credentials::new("t", Role::Participant).unwrap(), Theme::Light);
        assert_eq!(select_view(&participant), View::Participant);
    }
}
