//! Session domain model.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{BoardroomError, Result};

/// Role granted by the backend at login.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    Judge,
    Participant,
}

/// Display theme. Presentation only, but persisted with the session.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Returns the other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Token and role issued together by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub role: Role,
}

impl Credentials {
    /// Creates credentials, rejecting an empty token.
    pub fn new(token: impl Into<String>, role: Role) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(BoardroomError::invalid_input("login token must not be empty"));
        }
        Ok(Self { token, role })
    }
}

/// The client session.
///
/// A token exists if and only if a role exists: both live in one
/// `Option<Credentials>`, so a half-authenticated session is unrepresentable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    credentials: Option<Credentials>,
    theme: Theme,
}

impl Session {
    /// Creates a logged-out session with the given theme.
    pub fn logged_out(theme: Theme) -> Self {
        Self {
            credentials: None,
            theme,
        }
    }

    /// Creates an authenticated session.
    pub fn authenticated(credentials: Credentials, theme: Theme) -> Self {
        Self {
            credentials: Some(credentials),
            theme,
        }
    }

    /// Returns the token, or `None` when logged out.
    pub fn token(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.token.as_str())
    }

    pub fn role(&self) -> Option<Role> {
        self.credentials.as_ref().map(|c| c.role)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    /// Returns the token if the session holds `role`.
    pub fn token_for(&self, role: Role) -> Result<&str> {
        match &self.credentials {
            None => Err(BoardroomError::NotAuthenticated),
            Some(c) if c.role == role => Ok(c.token.as_str()),
            Some(_) => Err(BoardroomError::RoleRequired(role)),
        }
    }

    pub fn sign_in(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
    }

    pub fn sign_out(&mut self) {
        self.credentials = None;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_is_logged_out() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
        assert!(session.role().is_none());
        assert_eq!(session.theme(), Theme::Dark);
    }

    #[test]
    fn test_credentials_reject_empty_token() {
        assert!(Credentials::new("", Role::Judge).is_err());
        assert!(Credentials::new("   ", Role::Judge).is_err());
        assert!(Credentials::new("abc", Role::Judge).is_ok());
    }

    #[test]
    fn test_sign_in_and_out() {
        let mut session = Session::default();
        session.sign_in(Credentials::new("abc", Role::Participant).unwrap());
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("abc"));
        assert_eq!(session.role(), Some(Role::Participant));

        session.sign_out();
        assert!(!session.is_authenticated());
        assert!(session.role().is_none());
    }

    #[test]
    fn test_token_for_checks_role() {
        let session =
            Session::authenticated(Credentials::new("abc", Role::Participant).unwrap(), Theme::Dark);
        assert_eq!(session.token_for(Role::Participant).unwrap(), "abc");
        assert_eq!(
            session.token_for(Role::Judge),
            Err(BoardroomError::RoleRequired(Role::Judge))
        );
        assert_eq!(
            Session::default().token_for(Role::Judge),
            Err(BoardroomError::NotAuthenticated)
        );
    }

    #[test]
    fn test_role_and_theme_parse() {
        assert_eq!("judge".parse::<Role>().unwrap(), Role::Judge);
        assert_eq!("Participant".parse::<Role>().unwrap(), Role::Participant);
        assert!("admin".parse::<Role>().is_err());
        assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Role::Judge.to_string(), "judge");
    }
}
