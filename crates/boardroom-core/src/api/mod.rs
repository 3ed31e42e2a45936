//! The remote API contract.
//!
//! One operation, `call(action, payload)`, reaches the backend. Everything
//! typed is layered on top of it in the infrastructure crate.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::{BoardroomError, Result};

/// Request fields other than `action`.
pub type Payload = Map<String, Value>;

/// Backend actions, serialized as their camelCase wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum Action {
    Login,
    GetStatement,
    GetAllStatements,
    SetStatement,
    ToggleStatementActive,
    ReactivateStatement,
    Vote,
    GetResults,
}

impl Action {
    /// Whether the request must carry the session token.
    pub fn requires_token(self) -> bool {
        !matches!(self, Action::Login | Action::GetStatement)
    }
}

/// The fields of a `success: true` response, minus `success` itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseBody(Map<String, Value>);

impl ResponseBody {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Deserializes the fields into a typed record.
    ///
    /// A shape mismatch means the response could not be understood, so it is
    /// reported as a transport error.
    pub fn parse<T: DeserializeOwned>(self, what: &str) -> Result<T> {
        serde_json::from_value(Value::Object(self.0)).map_err(|err| {
            BoardroomError::transport(format!("Unexpected {} response: {}", what, err))
        })
    }
}

/// A single-attempt, uncached JSON RPC to the backend.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// Sends `{action, ...payload}` and returns the response fields.
    ///
    /// Fails with [`BoardroomError::Api`] when the backend answers
    /// `success: false`, and with [`BoardroomError::Transport`] when the
    /// request fails or the body is not a JSON envelope.
    async fn call(&self, action: Action, payload: Payload) -> Result<ResponseBody>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use strum::IntoEnumIterator;

    #[test]
    fn test_action_wire_names() {
        assert_eq!(Action::Login.to_string(), "login");
        assert_eq!(Action::GetAllStatements.to_string(), "getAllStatements");
        assert_eq!(Action::ToggleStatementActive.as_ref(), "toggleStatementActive");
        assert_eq!("reactivateStatement".parse::<Action>().unwrap(), Action::ReactivateStatement);
        assert_eq!(Action::iter().count(), 8);
    }

    #[test]
    fn test_requires_token() {
        assert!(!Action::Login.requires_token());
        assert!(!Action::GetStatement.requires_token());
        assert!(Action::Vote.requires_token());
        assert!(Action::GetResults.requires_token());
    }

    #[test]
    fn test_response_body_parse() {
        #[derive(Deserialize)]
        struct Grant {
            token: String,
        }

        let Value::Object(map) = json!({"token": "abc"}) else {
            unreachable!()
        };
        let body = ResponseBody::new(map);
        assert!(body.contains("token"));
        let grant: Grant = body.clone().parse("login").unwrap();
        assert_eq!(grant.token, "abc");

        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Missing {
            role: String,
        }
        let err = body.parse::<Missing>("login").unwrap_err();
        assert!(err.is_transport());
    }
}
