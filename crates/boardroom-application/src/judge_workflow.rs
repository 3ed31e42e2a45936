//! Judge dashboard use case.

use boardroom_core::error::{BoardroomError, Result};
use boardroom_core::results::ScoreEntry;
use boardroom_core::session::Role;
use boardroom_core::statement::{Stance, Statement, StatementId, validate_duration_minutes};
use boardroom_infrastructure::BackendGateway;
use tokio::sync::Mutex;

use crate::in_flight::{InFlight, InFlightGuard};
use crate::notice::Notice;
use crate::session_store::SharedSessionStore;

/// Result of toggling a statement from the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The statement was closed; carries the refreshed list.
    Deactivated(Vec<Statement>),
    /// Reopening needs a new duration, see [`JudgeWorkflow::confirm_reactivation`].
    DurationRequired(StatementId),
}

pub struct JudgeWorkflow {
    gateway: BackendGateway,
    store: SharedSessionStore,
    statements: Mutex<Vec<Statement>>,
    results: Mutex<Option<Vec<ScoreEntry>>>,
    pending_reactivation: Mutex<Option<StatementId>>,
    notice: Mutex<Option<Notice>>,
    in_flight: InFlight,
}

impl JudgeWorkflow {
    pub fn new(gateway: BackendGateway, store: SharedSessionStore) -> Self {
        Self {
            gateway,
            store,
            statements: Mutex::new(Vec::new()),
            results: Mutex::new(None),
            pending_reactivation: Mutex::new(None),
            notice: Mutex::new(None),
            in_flight: InFlight::new(),
        }
    }

    pub async fn statements(&self) -> Vec<Statement> {
        self.statements.lock().await.clone()
    }

    /// Last successfully fetched scores; `None` until the first fetch.
    pub async fn results(&self) -> Option<Vec<ScoreEntry>> {
        self.results.lock().await.clone()
    }

    pub async fn pending_reactivation(&self) -> Option<StatementId> {
        self.pending_reactivation.lock().await.clone()
    }

    pub async fn notice(&self) -> Option<Notice> {
        self.notice.lock().await.clone()
    }

    /// Publishes a new statement and refreshes the list.
    pub async fn set_statement(
        &self,
        text: &str,
        judge_vote: Stance,
        duration_minutes: i64,
    ) -> Result<Vec<Statement>> {
        let text = text.trim();
        if text.is_empty() {
            return Err(self
                .fail(BoardroomError::invalid_input("statement text must not be empty"))
                .await);
        }
        let minutes = match validate_duration_minutes(duration_minutes) {
            Ok(minutes) => minutes,
            Err(err) => return Err(self.fail(err).await),
        };
        let token = self.judge_token().await?;
        let _guard = self.begin().await?;

        if let Err(err) = self
            .gateway
            .set_statement(&token, text, judge_vote, minutes)
            .await
        {
            return Err(self.fail(err).await);
        }
        tracing::info!(judge_vote = %judge_vote, minutes, "Statement published");

        *self.notice.lock().await = Some(Notice::success("Statement set successfully"));
        self.fetch_statements(&token).await
    }

    pub async fn refresh_statements(&self) -> Result<Vec<Statement>> {
        let token = self.judge_token().await?;
        let _guard = self.begin().await?;
        self.fetch_statements(&token).await
    }

    /// Deactivates an active statement immediately. Reactivating an inactive
    /// one first asks for a duration, so it only records the request.
    pub async fn toggle_active(
        &self,
        statement_id: &StatementId,
        currently_active: bool,
    ) -> Result<ToggleOutcome> {
        let token = self.judge_token().await?;

        if !currently_active {
            if self.in_flight.is_active() {
                return Err(self.fail(BoardroomError::OperationInFlight).await);
            }
            *self.pending_reactivation.lock().await = Some(statement_id.clone());
            return Ok(ToggleOutcome::DurationRequired(statement_id.clone()));
        }

        let _guard = self.begin().await?;
        if let Err(err) = self
            .gateway
            .toggle_statement_active(&token, statement_id, false)
            .await
        {
            return Err(self.fail(err).await);
        }
        tracing::info!(statement_id = %statement_id, "Statement deactivated");

        *self.notice.lock().await = Some(Notice::success("Statement deactivated"));
        let statements = self.fetch_statements(&token).await?;
        Ok(ToggleOutcome::Deactivated(statements))
    }

    /// Reopens the statement chosen by the last [`Self::toggle_active`] for
    /// `duration_minutes`. The pending request survives a failure so the
    /// judge can retry.
    pub async fn confirm_reactivation(&self, duration_minutes: i64) -> Result<Vec<Statement>> {
        let Some(statement_id) = self.pending_reactivation.lock().await.clone() else {
            return Err(self.fail(BoardroomError::ConfirmationRequired).await);
        };
        let minutes = match validate_duration_minutes(duration_minutes) {
            Ok(minutes) => minutes,
            Err(err) => return Err(self.fail(err).await),
        };
        let token = self.judge_token().await?;
        let _guard = self.begin().await?;

        if let Err(err) = self
            .gateway
            .reactivate_statement(&token, &statement_id, minutes)
            .await
        {
            return Err(self.fail(err).await);
        }
        tracing::info!(statement_id = %statement_id, minutes, "Statement reactivated");

        *self.pending_reactivation.lock().await = None;
        *self.notice.lock().await = Some(Notice::success("Statement reactivated"));
        self.fetch_statements(&token).await
    }

    pub async fn cancel_reactivation(&self) {
        *self.pending_reactivation.lock().await = None;
    }

    /// Fetches the scores. On failure the previous results stay as they were
    /// and the backend message is shown as is.
    pub async fn get_results(&self) -> Result<Vec<ScoreEntry>> {
        let token = self.judge_token().await?;
        let _guard = self.begin().await?;

        match self.gateway.get_results(&token).await {
            Ok(scores) => {
                *self.results.lock().await = Some(scores.clone());
                *self.notice.lock().await = None;
                Ok(scores)
            }
            Err(err) => Err(self.fail(err).await),
        }
    }

    async fn fetch_statements(&self, token: &str) -> Result<Vec<Statement>> {
        match self.gateway.get_all_statements(token).await {
            Ok(statements) => {
                *self.statements.lock().await = statements.clone();
                Ok(statements)
            }
            Err(err) => Err(self.fail(err).await),
        }
    }

    async fn judge_token(&self) -> Result<String> {
        let token = self
            .store
            .lock()
            .await
            .session()
            .token_for(Role::Judge)
            .map(str::to_string);
        match token {
            Ok(token) => Ok(token),
            Err(err) => Err(self.fail(err).await),
        }
    }

    async fn begin(&self) -> Result<InFlightGuard<'_>> {
        match self.in_flight.try_begin() {
            Ok(guard) => Ok(guard),
            Err(err) => Err(self.fail(err).await),
        }
    }

    async fn fail(&self, err: BoardroomError) -> BoardroomError {
        *self.notice.lock().await = Some(Notice::from(&err));
        err
    }
}
