//! Statement wire record.

use boardroom_core::error::{BoardroomError, Result};
use boardroom_core::statement::{Stance, Statement, StatementId};
use serde::Deserialize;
use serde_json::Value;

use super::lenient;

/// A statement exactly as the backend sends it, before coercion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatementDto {
    #[serde(rename = "statementID", default)]
    pub statement_id: Option<Value>,
    #[serde(default)]
    pub text: Option<Value>,
    #[serde(rename = "judgeVote", default)]
    pub judge_vote: Option<Value>,
    #[serde(rename = "isActive", default)]
    pub is_active: Option<Value>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<Value>,
    #[serde(rename = "durationMinutes", default)]
    pub duration_minutes: Option<Value>,
}

impl StatementDto {
    /// True when the record carries no identifier at all, which the
    /// `getStatement` action uses to say "nothing is active".
    pub fn is_empty(&self) -> bool {
        self.statement_id
            .as_ref()
            .and_then(lenient::identifier)
            .is_none()
    }
}

fn malformed(field: &str) -> BoardroomError {
    BoardroomError::transport(format!("Malformed statement record: bad or missing {}", field))
}

impl TryFrom<StatementDto> for Statement {
    type Error = BoardroomError;

    fn try_from(dto: StatementDto) -> Result<Self> {
        let id = dto
            .statement_id
            .as_ref()
            .and_then(lenient::identifier)
            .ok_or_else(|| malformed("statementID"))?;
        let text = dto
            .text
            .as_ref()
            .and_then(lenient::text)
            .ok_or_else(|| malformed("text"))?;
        let judge_vote = dto
            .judge_vote
            .as_ref()
            .and_then(lenient::text)
            .and_then(|raw| raw.trim().parse::<Stance>().ok());
        let is_active = match dto.is_active.as_ref() {
            None | Some(Value::Null) => false,
            Some(raw) => lenient::boolean(raw).ok_or_else(|| malformed("isActive"))?,
        };
        let created_at = dto
            .created_at
            .as_ref()
            .and_then(lenient::timestamp)
            .ok_or_else(|| malformed("createdAt"))?;
        let duration_minutes = dto
            .duration_minutes
            .as_ref()
            .and_then(lenient::minutes)
            .ok_or_else(|| malformed("durationMinutes"))?;

        Ok(Statement {
            id: StatementId::new(id),
            text,
            judge_vote,
            is_active,
            created_at,
            duration_minutes,
        })
    }
}
