//! # checkout-core
//!
//! Core types and flow for the paypal-checkout payment orchestrator.
//!
//! This crate provides:
//! - `PaymentGateway` trait for implementing gateway clients
//! - Wire types: `PaymentIntent`, `PaymentRecord`, `Sale`, `Link`, `MoneyAmount`
//! - `PaymentOrder` and `CheckoutUrls` for describing a payment
//! - The checkout flow state machine (`AwaitingToken` → ... → `Completed`)
//! - `CheckoutError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{AwaitingToken, ApprovalHandle, CallOptions, CheckoutUrls, PaymentOrder};
//!
//! // Authenticate once, reuse the token for many checkouts
//! let session = AwaitingToken::new().authenticate(&gateway, &credentials, &call).await?;
//!
//! let order = PaymentOrder::new(1.00, 0.20, 2.00, "USD", urls.redirect_urls());
//! let (handle, approval_url) = session.begin_approval(&gateway, &order, &call).await?;
//!
//! // Redirect the payer to approval_url. When the browser comes back:
//! let handle = ApprovalHandle::new(payment_id_from_query)?;
//! let executed = handle.resume_after_approval(&gateway, session.token(), payer_id, &call).await?;
//! let completed = executed.verify_sale(&gateway, session.token(), &call).await?;
//! ```

pub mod call;
pub mod error;
pub mod flow;
pub mod gateway;
pub mod money;
pub mod order;
pub mod payment;
pub mod token;

// Re-exports for convenience
pub use call::CallOptions;
pub use error::{CheckoutError, CheckoutResult};
pub use flow::{
    ApprovalHandle, AwaitingExecution, AwaitingToken, CheckoutStage, Completed, Executed,
    TokenAcquired,
};
pub use gateway::{BoxedPaymentGateway, PaymentGateway};
pub use money::{AmountDetails, MoneyAmount, PaymentAmount};
pub use order::{CheckoutUrls, PaymentOrder};
pub use payment::{
    resolve_approval_url, validate_resource_id, Link, Payer, PaymentIntent, PaymentRecord, RedirectUrls,
    RelatedResource, Sale, Transaction, APPROVAL_URL_REL, INTENT_SALE, PAYMENT_METHOD_PAYPAL,
    SALE_STATE_COMPLETED,
};
pub use token::{AccessToken, Credentials};
