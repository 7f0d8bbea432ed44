// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for casedesk-session.
//!
//! `ApiError` describes the outcome of one REST call after transport
//! normalisation. `SessionError` covers failures of the layer itself
//! (configuration, client construction). Session-level API failures are
//! absorbed by the store and never surface as `SessionError`.

use serde_json::Value;
use thiserror::Error;

use crate::auth_core::constants::wire;

/// Normalised failure of a single API call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// HTTP 401
    #[error("Unauthorized: {}", .0.as_deref().unwrap_or("no session"))]
    Unauthorized(Option<String>),

    /// HTTP 403. `expired` is set when the server flags a lapsed subscription.
    #[error("Forbidden: {}", .message.as_deref().unwrap_or("access denied"))]
    Forbidden {
        message: Option<String>,
        expired: bool,
    },

    /// Any other non-success status
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("request failed"))]
    Status {
        status: u16,
        message: Option<String>,
    },

    /// No response was received (connection refused, DNS, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// A response arrived but its body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    pub fn is_subscription_expired(&self) -> bool {
        matches!(self, ApiError::Forbidden { expired: true, .. })
    }

    /// Server-provided message when present, otherwise a generic fallback.
    pub fn user_message(&self) -> String {
        let server = match self {
            ApiError::Unauthorized(m) => m.as_deref(),
            ApiError::Forbidden { message, .. } => message.as_deref(),
            ApiError::Status { message, .. } => message.as_deref(),
            ApiError::Network(_) => {
                return "Unable to reach the server. Check your connection.".to_string()
            }
            ApiError::Decode(_) => None,
        };
        server
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| wire::GENERIC_FAILURE_MESSAGE.to_string())
    }
}

/// Pull a human-readable message out of an error body.
///
/// Looks at `message`, then `error` (string or `{ message }`), then `msg`.
pub fn extract_message(body: &Value) -> Option<String> {
    let direct = |key: &str| body.get(key).and_then(Value::as_str).map(str::to_string);
    direct("message")
        .or_else(|| direct("error"))
        .or_else(|| {
            body.get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .or_else(|| direct("msg"))
        .filter(|m| !m.trim().is_empty())
}

/// Failures of the session layer itself.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// HTTP client could not be constructed
    #[error("Client error: {0}")]
    Client(String),

    /// An API call failed in a context that reports it (e.g. explicit login)
    #[error(transparent)]
    Api(#[from] ApiError),

    /// I/O Error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SessionError {
    /// Get user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Configuration(_) => "Internal error".to_string(),
            SessionError::Client(_) => "Internal error".to_string(),
            SessionError::Api(e) => e.user_message(),
            SessionError::Io(_) => "Internal system error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_message_variants() {
        assert_eq!(
            extract_message(&json!({"message": "Case not found"})).as_deref(),
            Some("Case not found")
        );
        assert_eq!(
            extract_message(&json!({"error": "Bad input"})).as_deref(),
            Some("Bad input")
        );
        assert_eq!(
            extract_message(&json!({"error": {"message": "Nested"}})).as_deref(),
            Some("Nested")
        );
        assert_eq!(extract_message(&json!({"message": "   "})), None);
        assert_eq!(extract_message(&json!(null)), None);
    }

    #[test]
    fn test_user_message_falls_back_to_generic() {
        let err = ApiError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message(), wire::GENERIC_FAILURE_MESSAGE);

        let err = ApiError::Status {
            status: 422,
            message: Some("Hearing date is in the past".to_string()),
        };
        assert_eq!(err.user_message(), "Hearing date is in the past");
    }
}
