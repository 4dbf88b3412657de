//! # Checkout Error Types
//!
//! Typed error handling for the checkout flow.
//! All gateway operations return `Result<T, CheckoutError>`.
//!
//! Every variant carries enough context (status code and/or the raw gateway
//! body) to be diagnosed against the gateway's own error payloads.

use thiserror::Error;

/// Core error type for all checkout operations
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Configuration errors (missing credentials, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid caller input (empty payment id, empty payer id)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Network/HTTP failure talking to the gateway, including timeouts
    #[error("Transport error: {0}")]
    Transport(String),

    /// The caller's cancellation signal fired before the gateway answered
    #[error("Request cancelled")]
    Cancelled,

    /// Token exchange answered with anything but 200
    #[error("Authentication failed: HTTP {status}: {body}")]
    Auth { status: u16, body: String },

    /// Response body did not parse as the expected shape
    #[error("Decode error: {message}")]
    Decode { message: String, body: String },

    /// Payment creation answered with anything but 201
    #[error("Payment creation failed: HTTP {status}: {body}")]
    Creation { status: u16, body: String },

    /// Payment execution answered with a non-2xx status
    #[error("Payment execution failed: HTTP {status}")]
    Execution { status: u16, body: String },

    /// Sale lookup answered with anything but 200
    #[error("Sale lookup failed: HTTP {status}")]
    SaleLookup { status: u16, body: String },

    /// Expected link relation absent from a payment's links
    #[error("Link not found: rel={rel}")]
    LinkNotFound { rel: String },

    /// Executed payment carries no sale in its related resources
    #[error("No sale found for payment {payment_id}")]
    SaleNotFound { payment_id: String },

    /// Sale did not reach the terminal success state
    #[error("Payment is not completed (state: {actual_state})")]
    Verification { actual_state: String },

    /// Request body could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CheckoutError {
    /// Returns true if repeating the failed call is safe.
    ///
    /// Only transport failures qualify. Execution errors in particular are
    /// never retryable: the gateway may already have captured the payment.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CheckoutError::Transport(_))
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CheckoutError::Configuration(_) => 500,
            CheckoutError::InvalidRequest(_) => 400,
            CheckoutError::Transport(_) => 503,
            CheckoutError::Cancelled => 503,
            CheckoutError::Auth { .. } => 502,
            CheckoutError::Decode { .. } => 502,
            CheckoutError::Creation { .. } => 502,
            CheckoutError::Execution { .. } => 502,
            CheckoutError::SaleLookup { .. } => 502,
            CheckoutError::LinkNotFound { .. } => 502,
            CheckoutError::SaleNotFound { .. } => 502,
            CheckoutError::Verification { .. } => 402,
            CheckoutError::Serialization(_) => 500,
        }
    }

    /// Raw gateway body attached to this error, if any
    pub fn gateway_body(&self) -> Option<&str> {
        match self {
            CheckoutError::Auth { body, .. }
            | CheckoutError::Decode { body, .. }
            | CheckoutError::Creation { body, .. }
            | CheckoutError::Execution { body, .. }
            | CheckoutError::SaleLookup { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;
