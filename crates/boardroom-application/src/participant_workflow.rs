//! Participant dashboard use case.
//!
//! Per statement the participant moves through
//! `Loaded -> VoteConfirmationPending -> Submitting -> Submitted`, falling
//! back to `Loaded` when a submission fails. Nothing reaches the network
//! without passing through the confirmation step and the local ledger check.

use boardroom_core::error::{BoardroomError, Ineligibility, Result};
use boardroom_core::ledger::{VoteChoice, VoteRecord};
use boardroom_core::session::Role;
use boardroom_core::statement::{Statement, StatementId};
use boardroom_infrastructure::BackendGateway;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::in_flight::{InFlight, InFlightGuard};
use crate::notice::Notice;
use crate::session_store::SharedSessionStore;

const NO_ACTIVE_STATEMENT: &str = "No active statement available";
const VOTING_CLOSED: &str = "Voting on this statement has closed";
const STALE_STATEMENT: &str = "That statement is no longer the one being voted on";

/// Where the participant is with the currently loaded statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantPhase {
    NoStatement,
    Loaded(Statement),
    VoteConfirmationPending {
        statement: Statement,
        choice: VoteChoice,
    },
    Submitting {
        statement: Statement,
        choice: VoteChoice,
    },
    Submitted {
        statement: Statement,
        choice: VoteChoice,
    },
}

impl ParticipantPhase {
    pub fn statement(&self) -> Option<&Statement> {
        match self {
            ParticipantPhase::NoStatement => None,
            ParticipantPhase::Loaded(statement)
            | ParticipantPhase::VoteConfirmationPending { statement, .. }
            | ParticipantPhase::Submitting { statement, .. }
            | ParticipantPhase::Submitted { statement, .. } => Some(statement),
        }
    }
}

/// A `Submitting` phase whose request future was dropped. The outcome is
/// unknown and the ledger was not touched, so it reverts to `Loaded`.
fn clear_abandoned_submission(phase: &mut ParticipantPhase) {
    if let ParticipantPhase::Submitting { statement, .. } = phase {
        *phase = ParticipantPhase::Loaded(statement.clone());
    }
}

pub struct ParticipantWorkflow {
    gateway: BackendGateway,
    store: SharedSessionStore,
    phase: Mutex<ParticipantPhase>,
    notice: Mutex<Option<Notice>>,
    in_flight: InFlight,
}

impl ParticipantWorkflow {
    pub fn new(gateway: BackendGateway, store: SharedSessionStore) -> Self {
        Self {
            gateway,
            store,
            phase: Mutex::new(ParticipantPhase::NoStatement),
            notice: Mutex::new(None),
            in_flight: InFlight::new(),
        }
    }

    pub async fn phase(&self) -> ParticipantPhase {
        let mut phase = self.phase.lock().await.clone();
        if !self.in_flight.is_active() {
            clear_abandoned_submission(&mut phase);
        }
        phase
    }

    pub async fn notice(&self) -> Option<Notice> {
        self.notice.lock().await.clone()
    }

    /// Whether the voting controls should be enabled right now.
    pub async fn is_voting_open(&self, now: DateTime<Utc>) -> bool {
        self.phase
            .lock()
            .await
            .statement()
            .is_some_and(|s| s.is_open_for_voting(now))
    }

    pub async fn vote_history(&self) -> Vec<VoteRecord> {
        self.store.lock().await.ledger().vote_history().to_vec()
    }

    pub async fn can_vote(&self, statement_id: &StatementId) -> bool {
        self.store.lock().await.ledger().can_vote(statement_id)
    }

    pub async fn can_vote_neutral(&self) -> bool {
        self.store.lock().await.ledger().can_vote_neutral()
    }

    /// Ledger check that needs no statement fetch. Neutral only depends on the
    /// global allowance; agree/disagree is checked when the id is known.
    pub async fn check_local_eligibility(
        &self,
        statement_id: Option<&StatementId>,
        choice: VoteChoice,
    ) -> Result<()> {
        let checked = {
            let store = self.store.lock().await;
            let ledger = store.ledger();
            match statement_id {
                Some(id) => ledger.check_eligibility(id, choice),
                None if choice.is_neutral() && !ledger.can_vote_neutral() => {
                    Err(Ineligibility::NeutralAlreadyUsed.into())
                }
                None => Ok(()),
            }
        };
        match checked {
            Ok(()) => Ok(()),
            Err(err) => Err(self.fail(err).await),
        }
    }

    /// Fetches the active statement (no token needed) and applies the local
    /// expiry override before presenting it.
    pub async fn load_active_statement(&self, now: DateTime<Utc>) -> Result<Option<Statement>> {
        let _guard = self.begin().await?;

        match self.gateway.get_statement().await {
            Ok(Some(statement)) => {
                let flagged_active = statement.is_active;
                let statement = statement.with_expiry_applied(now);
                if flagged_active && !statement.is_active {
                    tracing::warn!(
                        statement_id = %statement.id,
                        expires_at = %statement.expires_at(),
                        "Backend reports statement active after it expired; treating as inactive"
                    );
                }
                *self.phase.lock().await = ParticipantPhase::Loaded(statement.clone());
                *self.notice.lock().await = None;
                Ok(Some(statement))
            }
            Ok(None) => {
                *self.phase.lock().await = ParticipantPhase::NoStatement;
                *self.notice.lock().await = None;
                Ok(None)
            }
            Err(err) => Err(self.fail(err).await),
        }
    }

    /// Picks a vote and waits for confirmation. Refused early if the
    /// statement is closed or the ledger would reject the vote.
    pub async fn select_vote(&self, choice: VoteChoice, now: DateTime<Utc>) -> Result<()> {
        if self.in_flight.is_active() {
            return Err(self.fail(BoardroomError::OperationInFlight).await);
        }

        let mut phase = self.phase.lock().await;
        clear_abandoned_submission(&mut phase);

        let Some(statement) = phase.statement().cloned() else {
            drop(phase);
            return Err(self
                .fail(BoardroomError::statement_unavailable(NO_ACTIVE_STATEMENT))
                .await);
        };

        if !statement.is_open_for_voting(now) {
            *phase = ParticipantPhase::Loaded(statement.with_expiry_applied(now));
            drop(phase);
            return Err(self
                .fail(BoardroomError::statement_unavailable(VOTING_CLOSED))
                .await);
        }

        let eligible = self
            .store
            .lock()
            .await
            .ledger()
            .check_eligibility(&statement.id, choice);
        if let Err(err) = eligible {
            drop(phase);
            return Err(self.fail(err).await);
        }

        *phase = ParticipantPhase::VoteConfirmationPending { statement, choice };
        drop(phase);
        *self.notice.lock().await = None;
        Ok(())
    }

    /// Backs out of a pending confirmation.
    pub async fn cancel_vote(&self) -> Result<()> {
        if self.in_flight.is_active() {
            return Err(self.fail(BoardroomError::OperationInFlight).await);
        }
        let mut phase = self.phase.lock().await;
        if let ParticipantPhase::VoteConfirmationPending { statement, .. } = &*phase {
            *phase = ParticipantPhase::Loaded(statement.clone());
        }
        Ok(())
    }

    /// Sends the confirmed vote.
    ///
    /// `statement_id` and `choice` must match the pending confirmation. The
    /// statement's activity, the session and the ledger are all re-checked
    /// immediately before sending; the ledger is updated only after the
    /// backend accepts the vote.
    pub async fn submit_vote(
        &self,
        statement_id: &StatementId,
        choice: VoteChoice,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let _guard = self.begin().await?;

        let statement = {
            let phase = self.phase.lock().await;
            let confirmed = match &*phase {
                ParticipantPhase::VoteConfirmationPending {
                    statement,
                    choice: pending,
                } => {
                    if &statement.id != statement_id {
                        Err(BoardroomError::statement_unavailable(STALE_STATEMENT))
                    } else if *pending != choice {
                        Err(BoardroomError::ConfirmationRequired)
                    } else {
                        Ok(statement.clone())
                    }
                }
                ParticipantPhase::NoStatement => {
                    Err(BoardroomError::statement_unavailable(NO_ACTIVE_STATEMENT))
                }
                other => match other.statement() {
                    Some(s) if &s.id != statement_id => {
                        Err(BoardroomError::statement_unavailable(STALE_STATEMENT))
                    }
                    _ => Err(BoardroomError::ConfirmationRequired),
                },
            };
            drop(phase);
            match confirmed {
                Ok(statement) => statement,
                Err(err) => return Err(self.fail(err).await),
            }
        };

        if !statement.is_open_for_voting(now) {
            *self.phase.lock().await = ParticipantPhase::Loaded(statement.with_expiry_applied(now));
            return Err(self
                .fail(BoardroomError::statement_unavailable(VOTING_CLOSED))
                .await);
        }

        let checked = {
            let store = self.store.lock().await;
            store
                .session()
                .token_for(Role::Participant)
                .map(str::to_string)
                .and_then(|token| {
                    store
                        .ledger()
                        .check_eligibility(&statement.id, choice)
                        .map(|_| token)
                })
        };
        let token = match checked {
            Ok(token) => token,
            Err(err) => {
                *self.phase.lock().await = ParticipantPhase::Loaded(statement);
                return Err(self.fail(err).await);
            }
        };

        *self.phase.lock().await = ParticipantPhase::Submitting {
            statement: statement.clone(),
            choice,
        };
        tracing::debug!(statement_id = %statement.id, vote = %choice, "Submitting vote");

        if let Err(err) = self.gateway.vote(&token, &statement.id, choice).await {
            *self.phase.lock().await = ParticipantPhase::Loaded(statement);
            return Err(self.fail(err).await);
        }

        let recorded = self.store.lock().await.record_vote(&statement.id, choice);
        if let Err(err) = recorded {
            tracing::warn!(
                statement_id = %statement.id,
                error = %err,
                "Backend accepted the vote but the local ledger could not be updated"
            );
            *self.phase.lock().await = ParticipantPhase::Loaded(statement);
            return Err(self.fail(err).await);
        }

        *self.phase.lock().await = ParticipantPhase::Submitted { statement, choice };
        *self.notice.lock().await = Some(Notice::success("Vote submitted successfully"));
        Ok(())
    }

    async fn begin(&self) -> Result<InFlightGuard<'_>> {
        let guard = match self.in_flight.try_begin() {
            Ok(guard) => guard,
            Err(err) => return Err(self.fail(err).await),
        };
        clear_abandoned_submission(&mut *self.phase.lock().await);
        Ok(guard)
    }

    async fn fail(&self, err: BoardroomError) -> BoardroomError {
        *self.notice.lock().await = Some(Notice::from(&err));
        err
    }
}
