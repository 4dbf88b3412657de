//! # PayPal Configuration
//!
//! Configuration management for the PayPal integration.
//! Credentials are loaded from environment variables.

use checkout_core::{CheckoutError, Credentials};
use std::env;
use std::time::Duration;

/// Sandbox REST endpoint
pub const SANDBOX_API_BASE_URL: &str = "https://api.sandbox.paypal.com";

/// Live REST endpoint
pub const LIVE_API_BASE_URL: &str = "https://api.paypal.com";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which PayPal environment the credentials belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayPalMode {
    Sandbox,
    Live,
}

impl PayPalMode {
    pub fn api_base_url(&self) -> &'static str {
        match self {
            PayPalMode::Sandbox => SANDBOX_API_BASE_URL,
            PayPalMode::Live => LIVE_API_BASE_URL,
        }
    }
}

impl std::str::FromStr for PayPalMode {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sandbox" => Ok(PayPalMode::Sandbox),
            "live" => Ok(PayPalMode::Live),
            other => Err(CheckoutError::Configuration(format!(
                "PAYPAL_MODE must be sandbox or live, got {}",
                other
            ))),
        }
    }
}

/// PayPal API configuration
#[derive(Debug, Clone)]
pub struct PayPalConfig {
    /// REST app client id and secret
    pub credentials: Credentials,

    /// Sandbox or live
    pub mode: PayPalMode,

    /// API base URL (overridable for testing/mocking)
    pub api_base_url: String,

    /// Default timeout applied when a call does not set its own
    pub timeout: Duration,
}

impl PayPalConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `PAYPAL_TEST_CLIENTID`
    /// - `PAYPAL_TEST_SECRET`
    ///
    /// Optional:
    /// - `PAYPAL_MODE` (`sandbox` | `live`, default `sandbox`)
    /// - `PAYPAL_API_BASE_URL` (overrides the mode's endpoint)
    /// - `PAYPAL_TIMEOUT_SECS` (default 30)
    pub fn from_env() -> Result<Self, CheckoutError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let client_id = required_var("PAYPAL_TEST_CLIENTID")?;
        let client_secret = required_var("PAYPAL_TEST_SECRET")?;

        let mode = match env::var("PAYPAL_MODE") {
            Ok(value) => value.parse()?,
            Err(_) => PayPalMode::Sandbox,
        };

        let api_base_url = env::var("PAYPAL_API_BASE_URL")
            .unwrap_or_else(|_| mode.api_base_url().to_string());

        let timeout = match env::var("PAYPAL_TIMEOUT_SECS") {
            Ok(value) => value.parse::<u64>().map(Duration::from_secs).map_err(|_| {
                CheckoutError::Configuration(format!(
                    "PAYPAL_TIMEOUT_SECS must be a whole number of seconds, got {}",
                    value
                ))
            })?,
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            credentials: Credentials::new(client_id, client_secret),
            mode,
            api_base_url,
            timeout,
        })
    }

    /// Create a sandbox config with explicit values (for testing)
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(client_id, client_secret),
            mode: PayPalMode::Sandbox,
            api_base_url: SANDBOX_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn is_sandbox(&self) -> bool {
        self.mode == PayPalMode::Sandbox
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Builder: switch environment, resetting the base URL to match
    pub fn with_mode(mut self, mode: PayPalMode) -> Self {
        self.mode = mode;
        self.api_base_url = mode.api_base_url().to_string();
        self
    }

    /// Builder: set the default request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn required_var(name: &str) -> Result<String, CheckoutError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(CheckoutError::Configuration(format!("{} not set", name))),
    }
}
