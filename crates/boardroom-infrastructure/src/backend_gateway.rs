//! Typed access to the backend actions.
//!
//! Each method builds the payload for one action, sends it through a
//! [`RemoteApi`], and converts the response fields into domain types.

use std::sync::Arc;

use boardroom_core::api::{Action, Payload, RemoteApi, ResponseBody};
use boardroom_core::error::{BoardroomError, Result};
use boardroom_core::ledger::VoteChoice;
use boardroom_core::results::ScoreEntry;
use boardroom_core::session::Credentials;
use boardroom_core::statement::{Stance, Statement, StatementId};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::dto::{LoginGrantDto, ScoreDto, StatementDto};

#[derive(Deserialize)]
struct StatementListDto {
    #[serde(default)]
    statements: Vec<StatementDto>,
}

#[derive(Deserialize)]
struct ScoreListDto {
    #[serde(default)]
    scores: Vec<ScoreDto>,
}

/// Typed facade over a [`RemoteApi`].
#[derive(Clone)]
pub struct BackendGateway {
    api: Arc<dyn RemoteApi>,
}

impl BackendGateway {
    pub fn new(api: Arc<dyn RemoteApi>) -> Self {
        Self { api }
    }

    async fn send(&self, action: Action, fields: Value) -> Result<ResponseBody> {
        let payload = match fields {
            Value::Object(map) => map,
            _ => Payload::new(),
        };
        self.api.call(action, payload).await
    }

    /// `login`: exchanges credentials for a token and role.
    pub async fn login(&self, username: &str, password: &str) -> Result<Credentials> {
        let body = self
            .send(
                Action::Login,
                json!({ "username": username, "password": password }),
            )
            .await?;
        body.parse::<LoginGrantDto>("login")?.try_into()
    }

    /// `getStatement`: the currently active statement, if any. Sent without a token.
    pub async fn get_statement(&self) -> Result<Option<Statement>> {
        let body = self.send(Action::GetStatement, json!({})).await?;
        let dto: StatementDto = body.parse("getStatement")?;
        if dto.is_empty() {
            return Ok(None);
        }
        Statement::try_from(dto).map(Some)
    }

    /// `getAllStatements`: every statement, for the judge.
    pub async fn get_all_statements(&self, token: &str) -> Result<Vec<Statement>> {
        let body = self
            .send(Action::GetAllStatements, json!({ "token": token }))
            .await?;
        let list: StatementListDto = body.parse("getAllStatements")?;
        list.statements.into_iter().map(Statement::try_from).collect()
    }

    /// `setStatement`: publishes a new statement.
    pub async fn set_statement(
        &self,
        token: &str,
        text: &str,
        judge_vote: Stance,
        duration_minutes: u32,
    ) -> Result<()> {
        self.send(
            Action::SetStatement,
            json!({
                "token": token,
                "text": text,
                "judgeVote": judge_vote.to_string(),
                "durationMinutes": duration_minutes,
            }),
        )
        .await
        .map(|_| ())
    }

    /// `toggleStatementActive`: sets the active flag of a statement.
    pub async fn toggle_statement_active(
        &self,
        token: &str,
        statement_id: &StatementId,
        is_active: bool,
    ) -> Result<()> {
        self.send(
            Action::ToggleStatementActive,
            json!({
                "token": token,
                "statementID": statement_id_value(statement_id),
                "isActive": is_active,
            }),
        )
        .await
        .map(|_| ())
    }

    /// `reactivateStatement`: reopens a statement for a fresh duration.
    pub async fn reactivate_statement(
        &self,
        token: &str,
        statement_id: &StatementId,
        duration_minutes: u32,
    ) -> Result<()> {
        self.send(
            Action::ReactivateStatement,
            json!({
                "token": token,
                "statementID": statement_id_value(statement_id),
                "durationMinutes": duration_minutes,
            }),
        )
        .await
        .map(|_| ())
    }

    /// `vote`: casts a participant vote.
    pub async fn vote(
        &self,
        token: &str,
        statement_id: &StatementId,
        vote: VoteChoice,
    ) -> Result<()> {
        self.send(
            Action::Vote,
            json!({
                "token": token,
                "statementID": statement_id_value(statement_id),
                "vote": vote.to_string(),
            }),
        )
        .await
        .map(|_| ())
    }

    /// `getResults`: scores in the order the backend ranks them.
    pub async fn get_results(&self, token: &str) -> Result<Vec<ScoreEntry>> {
        let body = self
            .send(Action::GetResults, json!({ "token": token }))
            .await?;
        let list: ScoreListDto = body.parse("getResults")?;
        list.scores.into_iter().map(ScoreEntry::try_from).collect()
    }
}

/// Sends numeric identifiers back as JSON numbers, everything else as strings,
/// so the backend sees the same type it issued.
fn statement_id_value(id: &StatementId) -> Value {
    let raw = id.as_str();
    let canonical_integer = !raw.is_empty()
        && raw.bytes().all(|b| b.is_ascii_digit())
        && (raw == "0" || !raw.starts_with('0'));
    match raw.parse::<i64>() {
        Ok(n) if canonical_integer => Value::from(n),
        _ => Value::String(raw.to_string()),
    }
}

impl std::fmt::Debug for BackendGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendGateway").finish_non_exhaustive()
    }
}

impl From<Arc<dyn RemoteApi>> for BackendGateway {
    fn from(api: Arc<dyn RemoteApi>) -> Self {
        Self::new(api)
    }
}
