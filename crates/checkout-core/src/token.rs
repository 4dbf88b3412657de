//! # Credentials and Access Tokens

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Client-credentials pair issued by the gateway
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Bearer credential returned by the client-credentials grant.
///
/// Opaque and time-bounded. Nothing in this workspace renews it; callers
/// that reuse a token across checkouts own its expiry tracking.
#[derive(Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,

    #[serde(default)]
    pub token_type: String,

    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,

    /// Local receipt time, used for expiry bookkeeping
    #[serde(skip, default = "Utc::now")]
    pub acquired_at: DateTime<Utc>,
}

impl AccessToken {
    /// Create a token from a known bearer string (tests, token reuse)
    pub fn new(access_token: impl Into<String>, expires_in: u64) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "Bearer".to_string(),
            expires_in,
            scope: None,
            app_id: None,
            nonce: None,
            acquired_at: Utc::now(),
        }
    }

    pub fn secret(&self) -> &str {
        &self.access_token
    }

    /// Authorization header value
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        i64::try_from(self.expires_in)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| self.acquired_at.checked_add_signed(lifetime))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at() <= Utc::now()
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("app_id", &self.app_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_token_response() {
        let token: AccessToken = serde_json::from_str(
            r#"{
                "scope": "https://api.paypal.com/v1/payments/.*",
                "access_token": "EEwJ6tF9x5WCIZDYzyZGaz6Khbw7raYRIBV_WxVvgmsG",
                "token_type": "Bearer",
                "app_id": "APP-6XR95014BA15863X",
                "expires_in": 28800
            }"#,
        )
        .unwrap();

        assert_eq!(token.secret(), "EEwJ6tF9x5WCIZDYzyZGaz6Khbw7raYRIBV_WxVvgmsG");
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 28800);
        assert_eq!(token.app_id.as_deref(), Some("APP-6XR95014BA15863X"));
        assert!(!token.is_expired());
    }

    #[test]
    fn test_bearer_header() {
        let token = AccessToken::new("abc123", 3600);
        assert_eq!(token.bearer_header(), "Bearer abc123");
    }

    #[test]
    fn test_zero_lifetime_is_expired() {
        let token = AccessToken::new("abc123", 0);
        assert!(token.is_expired());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let token = AccessToken::new("super-secret-token", 3600);
        let creds = Credentials::new("client", "super-secret-key");

        assert!(!format!("{:?}", token).contains("super-secret-token"));
        assert!(!format!("{:?}", creds).contains("super-secret-key"));
        assert!(format!("{:?}", creds).contains("client"));
    }
}
