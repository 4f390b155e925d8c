use std::fmt;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OAuth2Error {
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    #[error("Invalid redirect URL: {0}")]
    InvalidRedirectUrl(String),

    /// The redirect carried no `code`; the provider's own `error` is kept when present
    #[error("No authorization code found in the redirect URL")]
    MissingCode {
        provider_error: Option<String>,
        description: Option<String>,
    },

    #[error("Access token not present in token response")]
    MissingAccessToken,

    #[error("Token exchange error: {0}")]
    TokenExchange(String),

    #[error("Fetch profile error: {0}")]
    FetchProfile(String),

    #[error("Serde error: {0}")]
    Serde(String),

    #[error("{0}")]
    Provider(ProviderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl OAuth2Error {
    /// The provider's JSON error body, if the failure came with one
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Provider(err) => err.payload.as_ref(),
            _ => None,
        }
    }
}

/// Which provider call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderStage {
    TokenExchange,
    ProfileFetch,
}

impl fmt::Display for ProviderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokenExchange => f.write_str("Token exchange"),
            Self::ProfileFetch => f.write_str("Profile fetch"),
        }
    }
}

/// A non-success HTTP response from the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderError {
    pub stage: ProviderStage,
    pub status: u16,
    /// OAuth2 `error` code, or the Google API error reason/status
    pub error_code: Option<String>,
    pub message: String,
    pub payload: Option<Value>,
}

impl ProviderError {
    /// Build from a raw response body.
    ///
    /// Handles both OAuth2 token errors (`{"error": "invalid_grant",
    /// "error_description": ".."}`) and Google API errors (`{"error": {"code":
    /// 403, "message": "..", "status": "..", "details": [..]}}`).
    pub(crate) fn from_response_body(stage: ProviderStage, status: u16, body: &str) -> Self {
        let payload = serde_json::from_str::<Value>(body).ok();

        let error_code = payload.as_ref().and_then(error_code_from_payload);
        let message = payload
            .as_ref()
            .and_then(message_from_payload)
            .unwrap_or_else(|| {
                let body = body.trim();
                if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    body.to_string()
                }
            });

        Self {
            stage,
            status,
            error_code,
            message,
            payload,
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failed with HTTP {}: {}",
            self.stage, self.status, self.message
        )
    }
}

fn error_code_from_payload(payload: &Value) -> Option<String> {
    match payload.get("error")? {
        Value::String(code) => Some(code.clone()),
        Value::Object(api_error) => {
            // ErrorInfo.reason is more specific than the canonical status
            let reason = api_error
                .get("details")
                .and_then(Value::as_array)
                .and_then(|details| {
                    details
                        .iter()
                        .find_map(|d| d.get("reason").and_then(Value::as_str))
                });
            let legacy_reason = api_error
                .get("errors")
                .and_then(Value::as_array)
                .and_then(|errors| {
                    errors
                        .iter()
                        .find_map(|e| e.get("reason").and_then(Value::as_str))
                });
            reason
                .or(legacy_reason)
                .or_else(|| api_error.get("status").and_then(Value::as_str))
                .map(str::to_string)
        }
        _ => None,
    }
}

fn message_from_payload(payload: &Value) -> Option<String> {
    if let Some(description) = payload.get("error_description").and_then(Value::as_str) {
        return Some(description.to_string());
    }
    match payload.get("error")? {
        Value::String(code) => Some(code.clone()),
        Value::Object(api_error) => api_error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}
