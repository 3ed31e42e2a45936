//! Login response record.

use boardroom_core::error::{BoardroomError, Result};
use boardroom_core::session::{Credentials, Role};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginGrantDto {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub role: String,
}

impl TryFrom<LoginGrantDto> for Credentials {
    type Error = BoardroomError;

    fn try_from(dto: LoginGrantDto) -> Result<Self> {
        let role: Role = dto.role.trim().parse().map_err(|_| {
            BoardroomError::transport(format!("Unexpected role in login response: '{}'", dto.role))
        })?;
        Credentials::new(dto.token, role)
            .map_err(|_| BoardroomError::transport("Login response did not include a token"))
    }
}
