//! Persisted client state document.
//!
//! Keys match what the browser client keeps in local storage: `token`,
//! `role`, `theme`, `neutralUsed`, `voteCounts`, `voteHistory`.

use std::collections::BTreeMap;

use boardroom_core::ledger::{MAX_VOTES_PER_STATEMENT, VoteChoice, VoteLedger, VoteRecord};
use boardroom_core::session::{Credentials, Role, Session, Theme};
use boardroom_core::state::ClientState;
use boardroom_core::statement::StatementId;
use serde::{Deserialize, Serialize};

pub const CLIENT_STATE_SCHEMA_VERSION: &str = "1.0.0";

fn current_schema_version() -> String {
    CLIENT_STATE_SCHEMA_VERSION.to_string()
}

/// One `voteHistory` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecordDto {
    #[serde(rename = "statementID")]
    pub statement_id: String,
    pub vote: VoteChoice,
}

/// Client state file V1.0.0.
///
/// Scalars come before the table-valued fields so the TOML output keeps
/// them at the top level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientStateDto {
    #[serde(default = "current_schema_version")]
    pub schema_version: String,
    #[serde(default)]
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub neutral_used: bool,
    /// Raw TOML integers; range repair happens on conversion.
    #[serde(default)]
    pub vote_counts: BTreeMap<String, i64>,
    #[serde(default)]
    pub vote_history: Vec<VoteRecordDto>,
}

impl Default for ClientStateDto {
    fn default() -> Self {
        Self::from(&ClientState::default())
    }
}

impl From<&ClientState> for ClientStateDto {
    fn from(state: &ClientState) -> Self {
        Self {
            schema_version: current_schema_version(),
            token: state.session.token().unwrap_or_default().to_string(),
            role: state.session.role(),
            theme: state.session.theme(),
            neutral_used: state.ledger.neutral_used(),
            vote_counts: state
                .ledger
                .vote_counts()
                .iter()
                .map(|(id, count)| (id.to_string(), i64::from(*count)))
                .collect(),
            vote_history: state
                .ledger
                .vote_history()
                .iter()
                .map(|r| VoteRecordDto {
                    statement_id: r.statement_id.to_string(),
                    vote: r.vote,
                })
                .collect(),
        }
    }
}

impl From<ClientStateDto> for ClientState {
    /// Converts a stored document, repairing it where it breaks an invariant.
    fn from(dto: ClientStateDto) -> Self {
        let session = match dto.role {
            Some(role) if !dto.token.trim().is_empty() => match Credentials::new(dto.token, role) {
                Ok(credentials) => Session::authenticated(credentials, dto.theme),
                Err(_) => Session::logged_out(dto.theme),
            },
            Some(_) => {
                tracing::warn!("Stored session has a role but no token; treating as logged out");
                Session::logged_out(dto.theme)
            }
            None => {
                if !dto.token.is_empty() {
                    tracing::warn!(
                        "Stored session has a token but no role; treating as logged out"
                    );
                }
                Session::logged_out(dto.theme)
            }
        };

        let vote_counts = dto
            .vote_counts
            .into_iter()
            .map(|(id, count)| {
                let clamped = count.clamp(0, i64::from(MAX_VOTES_PER_STATEMENT));
                if clamped != count {
                    tracing::warn!(statement_id = %id, count, "Stored vote count out of range; clamping");
                }
                (StatementId::new(id), clamped as u8)
            })
            .collect();
        let vote_history = dto
            .vote_history
            .into_iter()
            .map(|r| VoteRecord {
                statement_id: StatementId::new(r.statement_id),
                vote: r.vote,
            })
            .collect();

        ClientState {
            session,
            ledger: VoteLedger::from_parts(vote_counts, dto.neutral_used, vote_history),
        }
    }
}
