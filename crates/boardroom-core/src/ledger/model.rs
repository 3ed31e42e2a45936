//! Vote eligibility ledger.
//!
//! Tracks, per browser, how many agree/disagree votes were cast on each
//! statement, whether the single neutral vote has been spent, and the last
//! choice made on each statement.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{Ineligibility, Result};
use crate::statement::{Stance, StatementId};

/// An initial vote plus one change of mind.
pub const MAX_VOTES_PER_STATEMENT: u8 = 2;

/// A participant's answer to a statement.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum VoteChoice {
    Agree,
    Disagree,
    Neutral,
}

impl VoteChoice {
    pub fn is_neutral(self) -> bool {
        matches!(self, VoteChoice::Neutral)
    }
}

impl From<Stance> for VoteChoice {
    fn from(stance: Stance) -> Self {
        match stance {
            Stance::Agree => VoteChoice::Agree,
            Stance::Disagree => VoteChoice::Disagree,
        }
    }
}

/// The latest vote on one statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    #[serde(rename = "statementID")]
    pub statement_id: StatementId,
    pub vote: VoteChoice,
}

/// Per-browser vote eligibility state.
///
/// Invariants, upheld by every method:
/// - no statement has more than [`MAX_VOTES_PER_STATEMENT`] counted votes
/// - `neutral_used` only ever goes from false to true (until [`reset`](Self::reset))
/// - the history holds at most one record per statement
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteLedger {
    vote_counts: BTreeMap<StatementId, u8>,
    neutral_used: bool,
    vote_history: Vec<VoteRecord>,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a ledger from persisted parts.
    ///
    /// Counts above the cap are clamped and duplicate history records are
    /// collapsed, keeping the position of the first and the vote of the last.
    pub fn from_parts(
        vote_counts: BTreeMap<StatementId, u8>,
        neutral_used: bool,
        vote_history: Vec<VoteRecord>,
    ) -> Self {
        let vote_counts = vote_counts
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(id, count)| (id, count.min(MAX_VOTES_PER_STATEMENT)))
            .collect();

        let mut ledger = Self {
            vote_counts,
            neutral_used,
            vote_history: Vec::with_capacity(vote_history.len()),
        };
        for record in vote_history {
            ledger.upsert_history(record.statement_id, record.vote);
        }
        ledger
    }

    pub fn vote_count(&self, statement_id: &StatementId) -> u8 {
        self.vote_counts.get(statement_id).copied().unwrap_or(0)
    }

    /// True while the statement has room for another agree/disagree vote.
    pub fn can_vote(&self, statement_id: &StatementId) -> bool {
        self.vote_count(statement_id) < MAX_VOTES_PER_STATEMENT
    }

    pub fn can_vote_neutral(&self) -> bool {
        !self.neutral_used
    }

    /// Checks the precondition of [`record_vote`](Self::record_vote) without
    /// changing anything. Callers run this before sending a vote.
    pub fn check_eligibility(&self, statement_id: &StatementId, choice: VoteChoice) -> Result<()> {
        if choice.is_neutral() {
            if !self.can_vote_neutral() {
                return Err(Ineligibility::NeutralAlreadyUsed.into());
            }
        } else if !self.can_vote(statement_id) {
            return Err(Ineligibility::VoteLimitReached {
                statement_id: statement_id.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Records a vote the backend has confirmed.
    ///
    /// Agree/disagree increments the statement's count; neutral spends the
    /// neutral allowance and leaves counts alone. Either way the statement's
    /// history record is replaced by the new choice.
    pub fn record_vote(&mut self, statement_id: &StatementId, choice: VoteChoice) -> Result<()> {
        self.check_eligibility(statement_id, choice)?;

        if choice.is_neutral() {
            self.neutral_used = true;
        } else {
            *self.vote_counts.entry(statement_id.clone()).or_insert(0) += 1;
        }
        self.upsert_history(statement_id.clone(), choice);
        Ok(())
    }

    /// Clears counts, the neutral flag and the history.
    pub fn reset(&mut self) {
        self.vote_counts.clear();
        self.neutral_used = false;
        self.vote_history.clear();
    }

    pub fn neutral_used(&self) -> bool {
        self.neutral_used
    }

    pub fn vote_counts(&self) -> &BTreeMap<StatementId, u8> {
        &self.vote_counts
    }

    pub fn vote_history(&self) -> &[VoteRecord] {
        &self.vote_history
    }

    /// The latest vote on a statement, if any.
    pub fn last_vote(&self, statement_id: &StatementId) -> Option<VoteChoice> {
        self.vote_history
            .iter()
            .find(|r| &r.statement_id == statement_id)
            .map(|r| r.vote)
    }

    fn upsert_history(&mut self, statement_id: StatementId, vote: VoteChoice) {
        match self
            .vote_history
            .iter_mut()
            .find(|r| r.statement_id == statement_id)
        {
            Some(existing) => existing.vote = vote,
            None => self.vote_history.push(VoteRecord { statement_id, vote }),
        }
    }
}
