//! # checkout-paypal
//!
//! PayPal Payments REST gateway for paypal-checkout-rs.
//!
//! `PayPalClient` implements `checkout_core::PaymentGateway` over four calls:
//!
//! 1. Token exchange (client credentials, HTTP Basic)
//! 2. Payment creation (intent "sale", payer method "paypal")
//! 3. Payment execution with the payer id from the approval redirect
//! 4. Sale lookup
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_core::{AwaitingToken, CallOptions, PaymentGateway};
//! use checkout_paypal::PayPalClient;
//!
//! // Reads PAYPAL_TEST_CLIENTID / PAYPAL_TEST_SECRET
//! let client = PayPalClient::from_env()?;
//! let call = CallOptions::new();
//!
//! let session = AwaitingToken::new()
//!     .authenticate(&client, client.credentials(), &call)
//!     .await?;
//! let (handle, approval_url) = session.begin_approval(&client, &order, &call).await?;
//!
//! // Redirect the payer to approval_url
//! ```

pub mod client;
pub mod config;
pub mod oauth;
pub mod payments;
pub mod transport;

pub use client::PayPalClient;
pub use config::{PayPalConfig, PayPalMode, LIVE_API_BASE_URL, SANDBOX_API_BASE_URL};
pub use transport::{AuthScheme, GatewayRequest, HttpTransport, RawResponse, RequestBody};
