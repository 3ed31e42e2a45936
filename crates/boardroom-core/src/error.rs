//! Error types for the Boardroom Battles client.

use std::fmt;

use thiserror::Error;

use crate::session::Role;

/// Why a vote was refused locally, before any request was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ineligibility {
    /// The statement already received an initial vote and one change.
    VoteLimitReached { statement_id: String },
    /// The one neutral vote allowed per browser has been spent.
    NeutralAlreadyUsed,
}

impl fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ineligibility::VoteLimitReached { statement_id } => write!(
                f,
                "You have already voted and changed your vote on statement {}",
                statement_id
            ),
            Ineligibility::NeutralAlreadyUsed => {
                write!(f, "You have already used your neutral vote")
            }
        }
    }
}

/// A shared error type for the entire client.
///
/// The first three variants form the user-facing taxonomy: transport
/// failures, backend rejections, and local eligibility refusals. Their
/// `Display` output is exactly what the views show.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardroomError {
    /// The request failed or the response could not be understood.
    #[error("Network error: {detail}")]
    Transport { detail: String },

    /// The backend answered `success: false`.
    #[error("{message}")]
    Api { message: String },

    /// A vote was refused by the local ledger.
    #[error("{0}")]
    IneligibleVote(Ineligibility),

    /// User input failed validation before reaching the network.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The action needs a logged-in session.
    #[error("You are not logged in")]
    NotAuthenticated,

    /// The action needs a session with a specific role.
    #[error("This action requires a {0} session")]
    RoleRequired(Role),

    /// There is no statement that can currently be voted on.
    #[error("{0}")]
    StatementUnavailable(String),

    /// The action was attempted without its confirmation step.
    #[error("Please confirm the action before submitting")]
    ConfirmationRequired,

    /// Another operation is still waiting for the backend.
    #[error("Another request is still in progress")]
    OperationInFlight,

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BoardroomError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Transport error
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            detail: detail.into(),
        }
    }

    /// Creates an Api error carrying the backend's message verbatim
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Creates an InvalidInput error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates a StatementUnavailable error
    pub fn statement_unavailable(message: impl Into<String>) -> Self {
        Self::StatementUnavailable(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    pub fn is_ineligible_vote(&self) -> bool {
        matches!(self, Self::IneligibleVote(_))
    }

    /// True when the error was produced without contacting the backend.
    pub fn is_local(&self) -> bool {
        !matches!(self, Self::Transport { .. } | Self::Api { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<Ineligibility> for BoardroomError {
    fn from(reason: Ineligibility) -> Self {
        Self::IneligibleVote(reason)
    }
}

impl From<std::io::Error> for BoardroomError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for BoardroomError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for BoardroomError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for BoardroomError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, BoardroomError>`.
pub type Result<T> = std::result::Result<T, BoardroomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_display_has_network_prefix() {
        let err = BoardroomError::transport("connection refused");
        assert_eq!(err.to_string(), "Network error: connection refused");
        assert!(err.is_transport());
        assert!(!err.is_local());
    }

    #[test]
    fn test_api_display_is_backend_message_verbatim() {
        let err = BoardroomError::api("Invalid token");
        assert_eq!(err.to_string(), "Invalid token");
        assert!(err.is_api());
    }

    #[test]
    fn test_ineligible_vote_is_local() {
        let err: BoardroomError = Ineligibility::NeutralAlreadyUsed.into();
        assert!(err.is_ineligible_vote());
        assert!(err.is_local());
        assert_eq!(err.to_string(), "You have already used your neutral vote");
    }

    #[test]
    fn test_role_required_display() {
        let err = BoardroomError::RoleRequired(Role::Judge);
        assert_eq!(err.to_string(), "This action requires a judge session");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: BoardroomError = io.into();
        assert!(matches!(err, BoardroomError::Io { .. }));
    }
}
