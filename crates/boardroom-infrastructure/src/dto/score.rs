//! Score wire record.

use boardroom_core::error::{BoardroomError, Result};
use boardroom_core::results::ScoreEntry;
use serde::Deserialize;
use serde_json::Value;

use super::lenient;

#[derive(Debug, Clone, Deserialize)]
pub struct ScoreDto {
    #[serde(rename = "userID", default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub username: Option<Value>,
    #[serde(default)]
    pub score: Option<Value>,
}

impl TryFrom<ScoreDto> for ScoreEntry {
    type Error = BoardroomError;

    fn try_from(dto: ScoreDto) -> Result<Self> {
        let user_id = dto
            .user_id
            .as_ref()
            .and_then(lenient::identifier)
            .ok_or_else(|| BoardroomError::transport("Malformed score record: missing userID"))?;
        let username = dto
            .username
            .as_ref()
            .and_then(lenient::text)
            .unwrap_or_default();
        let score = match dto.score.as_ref() {
            None | Some(Value::Null) => 0.0,
            Some(raw) => lenient::number(raw).ok_or_else(|| {
                BoardroomError::transport("Malformed score record: score is not a number")
            })?,
        };

        Ok(ScoreEntry {
            user_id,
            username,
            score,
        })
    }
}
