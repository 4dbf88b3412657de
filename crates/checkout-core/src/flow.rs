//! # Checkout Flow
//!
//! The payment lifecycle as a chain of values. Each stage exposes only the
//! operation that is legal next and is consumed by it, so a flow cannot be
//! driven out of order and a failed flow cannot be resumed.
//!
//! ```text
//! AwaitingToken ──authenticate──▶ TokenAcquired ──begin_approval──▶ (ApprovalHandle, approval_url)
//!                                   (reusable)                          │
//!                                                          payer approves on the gateway
//!                                                                       │
//! Completed ◀──verify_sale── Executed ◀──execute── AwaitingExecution ◀──approve(payer_id)
//! ```
//!
//! `ApprovalHandle` holds nothing but the payment id and can be serialized
//! into the return URL or a cookie; `ApprovalHandle::new` rebuilds it from
//! the callback's query parameters.

use crate::call::CallOptions;
use crate::error::{CheckoutError, CheckoutResult};
use crate::gateway::PaymentGateway;
use crate::order::PaymentOrder;
use crate::payment::{validate_resource_id, PaymentRecord, Sale};
use crate::token::{AccessToken, Credentials};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Label of each stage, for logs and responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStage {
    AwaitingToken,
    TokenAcquired,
    AwaitingApproval,
    AwaitingExecution,
    Executed,
    Completed,
}

impl CheckoutStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStage::AwaitingToken => "awaiting_token",
            CheckoutStage::TokenAcquired => "token_acquired",
            CheckoutStage::AwaitingApproval => "awaiting_approval",
            CheckoutStage::AwaitingExecution => "awaiting_execution",
            CheckoutStage::Executed => "executed",
            CheckoutStage::Completed => "completed",
        }
    }
}

impl std::fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Start of every checkout: no credential yet
#[derive(Debug, Default)]
pub struct AwaitingToken;

impl AwaitingToken {
    pub fn new() -> Self {
        Self
    }

    pub fn stage(&self) -> CheckoutStage {
        CheckoutStage::AwaitingToken
    }

    /// Acquire a fresh token from the gateway
    #[instrument(skip_all, fields(provider = gateway.provider_name()))]
    pub async fn authenticate<G>(
        self,
        gateway: &G,
        credentials: &Credentials,
        call: &CallOptions,
    ) -> CheckoutResult<TokenAcquired>
    where
        G: PaymentGateway + ?Sized,
    {
        let token = gateway.acquire_token(credentials, call).await?;
        debug!("Token acquired, expires_in={}s", token.expires_in);
        Ok(TokenAcquired { token })
    }

    /// Reuse a token acquired earlier (tokens may serve many checkouts until they expire)
    pub fn with_token(self, token: AccessToken) -> TokenAcquired {
        TokenAcquired { token }
    }
}

/// Authenticated; can start any number of independent payments
#[derive(Debug, Clone)]
pub struct TokenAcquired {
    token: AccessToken,
}

impl TokenAcquired {
    pub fn stage(&self) -> CheckoutStage {
        CheckoutStage::TokenAcquired
    }

    pub fn token(&self) -> &AccessToken {
        &self.token
    }

    pub fn into_token(self) -> AccessToken {
        self.token
    }

    /// Create a payment and return where to send the payer.
    ///
    /// The returned handle is the flow instance for this payment; the URL
    /// must be opened by the payer's browser.
    #[instrument(skip_all, fields(provider = gateway.provider_name(), currency = %order.currency))]
    pub async fn begin_approval<G>(
        &self,
        gateway: &G,
        order: &PaymentOrder,
        call: &CallOptions,
    ) -> CheckoutResult<(ApprovalHandle, String)>
    where
        G: PaymentGateway + ?Sized,
    {
        let record = gateway.create_payment(&self.token, order, call).await?;

        if record.id.is_empty() {
            return Err(CheckoutError::Decode {
                message: "created payment has no id".to_string(),
                body: String::new(),
            });
        }

        let approval_url = record.approval_url()?.to_string();

        info!(
            "Payment created: id={}, state={}, awaiting approval",
            record.id, record.state
        );

        Ok((
            ApprovalHandle {
                payment_id: record.id,
            },
            approval_url,
        ))
    }
}

/// A created payment waiting for the payer to approve it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedHandle")]
pub struct ApprovalHandle {
    payment_id: String,
}

#[derive(Deserialize)]
struct UncheckedHandle {
    payment_id: String,
}

impl TryFrom<UncheckedHandle> for ApprovalHandle {
    type Error = CheckoutError;

    fn try_from(raw: UncheckedHandle) -> CheckoutResult<Self> {
        ApprovalHandle::new(raw.payment_id)
    }
}

impl ApprovalHandle {
    /// Rebuild the handle from the payment id echoed back by the gateway
    pub fn new(payment_id: impl Into<String>) -> CheckoutResult<Self> {
        let payment_id = payment_id.into();
        validate_resource_id("payment id", &payment_id)?;
        Ok(Self { payment_id })
    }

    pub fn stage(&self) -> CheckoutStage {
        CheckoutStage::AwaitingApproval
    }

    pub fn payment_id(&self) -> &str {
        &self.payment_id
    }

    /// Record the payer's approval
    pub fn approve(self, payer_id: impl Into<String>) -> CheckoutResult<AwaitingExecution> {
        let payer_id = payer_id.into();
        if payer_id.trim().is_empty() {
            return Err(CheckoutError::InvalidRequest(
                "payer id must not be empty".to_string(),
            ));
        }
        Ok(AwaitingExecution {
            payment_id: self.payment_id,
            payer_id,
        })
    }

    /// Approve and execute in one step
    pub async fn resume_after_approval<G>(
        self,
        gateway: &G,
        token: &AccessToken,
        payer_id: impl Into<String>,
        call: &CallOptions,
    ) -> CheckoutResult<Executed>
    where
        G: PaymentGateway + ?Sized,
    {
        self.approve(payer_id)?.execute(gateway, token, call).await
    }
}

/// Approved by the payer, not yet captured
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwaitingExecution {
    payment_id: String,
    payer_id: String,
}

impl AwaitingExecution {
    pub fn stage(&self) -> CheckoutStage {
        CheckoutStage::AwaitingExecution
    }

    pub fn payment_id(&self) -> &str {
        &self.payment_id
    }

    pub fn payer_id(&self) -> &str {
        &self.payer_id
    }

    /// Capture the payment. Not safe to repeat.
    #[instrument(skip_all, fields(provider = gateway.provider_name(), payment_id = %self.payment_id))]
    pub async fn execute<G>(
        self,
        gateway: &G,
        token: &AccessToken,
        call: &CallOptions,
    ) -> CheckoutResult<Executed>
    where
        G: PaymentGateway + ?Sized,
    {
        let payment = gateway
            .execute_payment(token, &self.payment_id, &self.payer_id, call)
            .await?;

        info!("Payment executed: id={}, state={}", payment.id, payment.state);

        Ok(Executed { payment })
    }
}

/// Captured payment whose sale has not been checked yet
#[derive(Debug, Clone)]
pub struct Executed {
    payment: PaymentRecord,
}

impl Executed {
    pub fn stage(&self) -> CheckoutStage {
        CheckoutStage::Executed
    }

    pub fn payment(&self) -> &PaymentRecord {
        &self.payment
    }

    pub fn into_payment(self) -> PaymentRecord {
        self.payment
    }

    /// Look up the resulting sale and require it to be completed
    #[instrument(skip_all, fields(provider = gateway.provider_name(), payment_id = %self.payment.id))]
    pub async fn verify_sale<G>(
        self,
        gateway: &G,
        token: &AccessToken,
        call: &CallOptions,
    ) -> CheckoutResult<Completed>
    where
        G: PaymentGateway + ?Sized,
    {
        let sale_id = self.payment.sale_id()?.to_string();
        let sale = gateway.lookup_sale(token, &sale_id, call).await?;

        let sale = sale.verify_completed().map_err(|e| {
            warn!("Sale {} not completed: {}", sale_id, e);
            e
        })?;

        info!("Sale verified: id={}, state={}", sale.id, sale.state);

        Ok(Completed {
            payment: self.payment,
            sale,
        })
    }
}

/// Terminal success: the sale is completed
#[derive(Debug, Clone)]
pub struct Completed {
    payment: PaymentRecord,
    sale: Sale,
}

impl Completed {
    pub fn stage(&self) -> CheckoutStage {
        CheckoutStage::Completed
    }

    pub fn payment(&self) -> &PaymentRecord {
        &self.payment
    }

    pub fn sale(&self) -> &Sale {
        &self.sale
    }
}
