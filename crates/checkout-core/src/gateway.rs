//! # Payment Gateway Trait
//!
//! The seam between the checkout flow and a concrete gateway client.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  PaymentGateway (trait)                     │
//! │  ├── acquire_token()                                        │
//! │  ├── create_payment()                                       │
//! │  ├── execute_payment()                                      │
//! │  └── lookup_sale()                                          │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                  ┌─────────┴─────────┐
//!                  │   PayPalClient    │
//!                  │ (checkout-paypal) │
//!                  └───────────────────┘
//! ```

use crate::call::CallOptions;
use crate::error::CheckoutResult;
use crate::order::PaymentOrder;
use crate::payment::{PaymentRecord, Sale};
use crate::token::{AccessToken, Credentials};
use async_trait::async_trait;
use std::sync::Arc;

/// One request/response cycle per method; implementations never retry.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Exchange client credentials for an access token.
    ///
    /// Always a fresh round trip; no caching or refresh.
    async fn acquire_token(
        &self,
        credentials: &Credentials,
        call: &CallOptions,
    ) -> CheckoutResult<AccessToken>;

    /// Create a payment awaiting payer approval.
    async fn create_payment(
        &self,
        token: &AccessToken,
        order: &PaymentOrder,
        call: &CallOptions,
    ) -> CheckoutResult<PaymentRecord>;

    /// Execute an approved payment.
    ///
    /// This is the capture step. Calling it twice for the same payment is
    /// only safe if the gateway itself deduplicates; nothing here does.
    async fn execute_payment(
        &self,
        token: &AccessToken,
        payment_id: &str,
        payer_id: &str,
        call: &CallOptions,
    ) -> CheckoutResult<PaymentRecord>;

    /// Fetch a sale by id.
    async fn lookup_sale(
        &self,
        token: &AccessToken,
        sale_id: &str,
        call: &CallOptions,
    ) -> CheckoutResult<Sale>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;
