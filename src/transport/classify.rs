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

use serde_json::Value;

use crate::auth_core::constants::wire;
use crate::auth_core::errors::{extract_message, ApiError};
use crate::auth_core::events::BridgeSignal;
use crate::auth_core::types::Domain;

/// Does a 403 body carry the subscription-expired marker?
pub fn is_expired_marker(body: &Value) -> bool {
    let flag = body
        .get(wire::EXPIRED_FIELD)
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let code = body
        .get("code")
        .and_then(Value::as_str)
        .is_some_and(|c| c == wire::EXPIRED_CODE);
    flag || code
}

/// Bridge signal implied by a received response, if any.
pub fn classify_response(domain: Domain, status: u16, body: &Value) -> Option<BridgeSignal> {
    match status {
        401 => Some(BridgeSignal::SessionInvalidated { domain }),
        403 if is_expired_marker(body) => Some(BridgeSignal::SubscriptionExpired { domain }),
        _ => None,
    }
}

/// Map a non-success status and its body to an `ApiError`.
pub fn error_for_status(status: u16, body: &Value) -> ApiError {
    let message = extract_message(body);
    match status {
        401 => ApiError::Unauthorized(message),
        403 => ApiError::Forbidden {
            message,
            expired: is_expired_marker(body),
        },
        _ => ApiError::Status { status, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_response() {
        let d = Domain::Organization;
        assert_eq!(
            classify_response(d, 401, &Value::Null),
            Some(BridgeSignal::SessionInvalidated { domain: d })
        );
        assert_eq!(
            classify_response(d, 403, &json!({"expired": true})),
            Some(BridgeSignal::SubscriptionExpired { domain: d })
        );
        assert_eq!(
            classify_response(d, 403, &json!({"code": "SUBSCRIPTION_EXPIRED"})),
            Some(BridgeSignal::SubscriptionExpired { domain: d })
        );
        assert_eq!(classify_response(d, 403, &json!({"message": "nope"})), None);
        assert_eq!(classify_response(d, 500, &Value::Null), None);
        assert_eq!(classify_response(d, 200, &Value::Null), None);
    }

    #[test]
    fn test_error_for_status() {
        let err = error_for_status(403, &json!({"message": "Plan expired", "expired": true}));
        assert_eq!(
            err,
            ApiError::Forbidden {
                message: Some("Plan expired".to_string()),
                expired: true
            }
        );
        assert!(err.is_subscription_expired());
        assert!(error_for_status(401, &Value::Null).is_unauthorized());
        assert_eq!(
            error_for_status(404, &json!({"error": "Client not found"})).user_message(),
            "Client not found"
        );
    }
}
