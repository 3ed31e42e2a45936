//! HTTP implementation of the remote API contract.
//!
//! Every call is a single `POST` of `{action, ...payload}` as JSON to one
//! fixed endpoint. There are no retries, no caching and no client timeout.

use async_trait::async_trait;
use boardroom_core::api::{Action, Payload, RemoteApi, ResponseBody};
use boardroom_core::config::ClientConfig;
use boardroom_core::error::{BoardroomError, Result};
use reqwest::{Client, Url};
use serde_json::Value;

/// Message used when the backend rejects a request without saying why.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Request failed";

/// Talks to the backend endpoint over HTTP(S).
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    endpoint: Url,
}

impl HttpApiClient {
    /// Creates a client for `endpoint`, which must be an absolute http(s) URL.
    pub fn new(endpoint: &str) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            endpoint: parse_endpoint(endpoint)?,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(&config.api_url)
    }
}

/// Validates an endpoint URL.
pub fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint.trim())
        .map_err(|e| BoardroomError::config(format!("Invalid API URL '{}': {}", endpoint, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(BoardroomError::config(format!(
            "API URL must use http or https, not '{}'",
            other
        ))),
    }
}

/// Builds the request body: the payload fields plus `action`.
pub fn request_body(action: Action, mut payload: Payload) -> Value {
    payload.insert("action".to_string(), Value::String(action.to_string()));
    Value::Object(payload)
}

/// Interprets a raw response body as the `{success, ...}` envelope.
pub fn interpret_response(raw: &str) -> Result<ResponseBody> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|_| BoardroomError::transport(format!("Invalid JSON response: {}", raw)))?;

    let Value::Object(mut fields) = value else {
        return Err(BoardroomError::transport(format!(
            "Unexpected response: {}",
            raw
        )));
    };

    match fields.remove("success") {
        Some(Value::Bool(true)) => Ok(ResponseBody::new(fields)),
        Some(Value::Bool(false)) => {
            let message = match fields.get("error") {
                Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
                Some(Value::Null) | None => DEFAULT_FAILURE_MESSAGE.to_string(),
                Some(Value::String(_)) => DEFAULT_FAILURE_MESSAGE.to_string(),
                Some(other) => other.to_string(),
            };
            Err(BoardroomError::api(message))
        }
        _ => Err(BoardroomError::transport(format!(
            "Response is missing the success flag: {}",
            raw
        ))),
    }
}

#[async_trait]
impl RemoteApi for HttpApiClient {
    async fn call(&self, action: Action, payload: Payload) -> Result<ResponseBody> {
        let body = request_body(action, payload);
        tracing::debug!(action = %action, endpoint = %self.endpoint, "Sending backend request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|err| BoardroomError::transport(err.to_string()))?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|err| BoardroomError::transport(format!("Failed to read response: {}", err)))?;

        let result = match interpret_response(&raw) {
            Err(err) if err.is_transport() && !status.is_success() => Err(
                BoardroomError::transport(format!("HTTP {}: {}", status, raw)),
            ),
            other => other,
        };

        match &result {
            Ok(_) => tracing::debug!(action = %action, "Backend request succeeded"),
            Err(err) => tracing::warn!(action = %action, error = %err, "Backend request failed"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_includes_action() {
        let Value::Object(payload) = json!({"token": "abc", "statementID": 42, "vote": "agree"})
        else {
            unreachable!()
        };
        let body = request_body(Action::Vote, payload);
        assert_eq!(
            body,
            json!({"action": "vote", "token": "abc", "statementID": 42, "vote": "agree"})
        );
    }

    #[test]
    fn test_success_envelope() {
        let body = interpret_response(r#"{"success":true,"token":"abc","role":"participant"}"#)
            .unwrap();
        assert_eq!(body.get("token"), Some(&json!("abc")));
        assert!(!body.contains("success"));
    }

    #[test]
    fn test_failure_envelope_surfaces_backend_message() {
        let err = interpret_response(r#"{"success":false,"error":"Invalid token"}"#).unwrap_err();
        assert_eq!(err, BoardroomError::api("Invalid token"));
        assert_eq!(err.to_string(), "Invalid token");
    }

    #[test]
    fn test_failure_without_message_uses_default() {
        let err = interpret_response(r#"{"success":false}"#).unwrap_err();
        assert_eq!(err, BoardroomError::api(DEFAULT_FAILURE_MESSAGE));
    }

    #[test]
    fn test_invalid_json_keeps_raw_body() {
        let err = interpret_response("<html>Script error</html>").unwrap_err();
        assert!(err.is_transport());
        assert_eq!(
            err.to_string(),
            "Network error: Invalid JSON response: <html>Script error</html>"
        );
    }

    #[test]
    fn test_missing_success_flag_is_transport_error() {
        assert!(interpret_response(r#"{"token":"abc"}"#).unwrap_err().is_transport());
        assert!(interpret_response(r#"[1,2]"#).unwrap_err().is_transport());
        assert!(interpret_response(r#"{"success":"yes"}"#).unwrap_err().is_transport());
    }

    #[test]
    fn test_parse_endpoint() {
        assert!(parse_endpoint("https://script.example.test/macros/s/abc/exec").is_ok());
        assert!(parse_endpoint("http://localhost:8080").is_ok());
        assert!(parse_endpoint("ftp://example.test").is_err());
        assert!(parse_endpoint("not a url").is_err());
    }

    #[test]
    fn test_new_rejects_bad_url() {
        assert!(matches!(
            HttpApiClient::new("example.test").map(|_| ()),
            Err(BoardroomError::Config(_))
        ));
    }
}
