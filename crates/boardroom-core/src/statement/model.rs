//! Read-only client projection of a backend statement.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{BoardroomError, Result};

/// Opaque statement identifier assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatementId(String);

impl StatementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StatementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StatementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for StatementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A yes/no position. Used for the judge's own stance on a statement.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Stance {
    Agree,
    Disagree,
}

/// A statement as last fetched from the backend.
///
/// The backend is authoritative; the only local change ever applied is the
/// expiry override in [`Statement::with_expiry_applied`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub id: StatementId,
    pub text: String,
    /// The judge's own stance, for display. `None` if the backend sent
    /// something other than agree/disagree.
    pub judge_vote: Option<Stance>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub duration_minutes: u32,
}

impl Statement {
    /// `created_at + duration_minutes`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at
            .checked_add_signed(TimeDelta::minutes(i64::from(self.duration_minutes)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at()
    }

    /// Active according to the backend and not yet expired locally.
    pub fn is_open_for_voting(&self, now: DateTime<Utc>) -> bool {
        self.is_active && !self.is_expired(now)
    }

    /// Time left before voting closes, or `None` if it already has.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        if !self.is_open_for_voting(now) {
            return None;
        }
        Some(self.expires_at() - now)
    }

    /// Marks an expired statement inactive regardless of the backend flag.
    pub fn with_expiry_applied(mut self, now: DateTime<Utc>) -> Self {
        if self.is_active && self.is_expired(now) {
            self.is_active = false;
        }
        self
    }
}

/// Validates a duration given as a number.
pub fn validate_duration_minutes(minutes: i64) -> Result<u32> {
    if minutes <= 0 {
        return Err(BoardroomError::invalid_input(
            "duration must be a positive whole number of minutes",
        ));
    }
    u32::try_from(minutes)
        .map_err(|_| BoardroomError::invalid_input("duration is too large"))
}

/// Validates a duration typed by the user.
pub fn parse_duration_minutes(input: &str) -> Result<u32> {
    let minutes: i64 = input.trim().parse().map_err(|_| {
        BoardroomError::invalid_input(format!(
            "'{}' is not a whole number of minutes",
            input.trim()
        ))
    })?;
    validate_duration_minutes(minutes)
}
