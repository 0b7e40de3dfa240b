//! Request and response bodies for the QKart REST API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Credentials posted to `POST /auth/login` and `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Successful login payload.
///
/// ```json
/// { "success": true, "token": "testtoken", "username": "criodo", "balance": 5000 }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    /// Bearer token for subsequent cart calls.
    pub token: String,
    /// Username the session belongs to.
    pub username: String,
    /// Wallet balance of the user.
    pub balance: Decimal,
}

/// Envelope the backend uses for failures (and bare acknowledgements).
///
/// ```json
/// { "success": false, "message": "Password is incorrect" }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct BackendMessage {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_payload_ignores_success_flag() {
        let json = r#"{"success":true,"token":"testtoken","username":"criodo","balance":5000}"#;
        let payload: AuthPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.token, "testtoken");
        assert_eq!(payload.username, "criodo");
        assert_eq!(payload.balance, Decimal::from(5000_u32));
    }

    #[test]
    fn test_backend_message_defaults() {
        let msg: BackendMessage = serde_json::from_str("{}").unwrap();
        assert!(!msg.success);
        assert!(msg.message.is_empty());
    }
}
