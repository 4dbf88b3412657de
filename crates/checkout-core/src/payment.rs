//! # Payment Types
//!
//! Request and response bodies of the gateway's Payments API, plus the two
//! pure checks the flow needs: approval link lookup and sale verification.

use crate::error::{CheckoutError, CheckoutResult};
use crate::money::PaymentAmount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Link relation of the payer approval page
pub const APPROVAL_URL_REL: &str = "approval_url";

/// Terminal success state of a sale
pub const SALE_STATE_COMPLETED: &str = "completed";

/// Intent kind for immediate capture
pub const INTENT_SALE: &str = "sale";

/// Payer funding method
pub const PAYMENT_METHOD_PAYPAL: &str = "paypal";

/// Where the payer's browser is sent after approving or cancelling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectUrls {
    pub return_url: String,
    pub cancel_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payer {
    #[serde(default)]
    pub payment_method: String,

    /// Present on responses ("VERIFIED", "UNVERIFIED")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// A single transaction of a payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: PaymentAmount,

    #[serde(default)]
    pub description: String,

    /// Sales, refunds etc. created for this transaction (responses only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_resources: Vec<RelatedResource>,
}

/// A payment the merchant wants the payer to approve
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentIntent {
    pub intent: String,
    pub redirect_urls: RedirectUrls,
    pub payer: Payer,
    pub transactions: Vec<Transaction>,
}

impl PaymentIntent {
    /// Build a "sale" intent paid through the gateway's own wallet
    pub fn sale(redirect_urls: RedirectUrls, transactions: Vec<Transaction>) -> Self {
        Self {
            intent: INTENT_SALE.to_string(),
            redirect_urls,
            payer: Payer {
                payment_method: PAYMENT_METHOD_PAYPAL.to_string(),
                status: None,
            },
            transactions,
        }
    }
}

/// A relation-tagged URL returned by the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    pub rel: String,
    #[serde(default)]
    pub method: String,
}

/// Resource attached to a payment after execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale: Option<Sale>,
}

/// The gateway's view of a payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Payment id ("PAY-6RV70583SB702805EKEYSZ6Y")
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,

    /// Lifecycle state ("created", "approved", "failed")
    #[serde(default)]
    pub state: String,

    #[serde(default)]
    pub intent: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer: Option<Payer>,

    #[serde(default)]
    pub transactions: Vec<Transaction>,

    #[serde(default)]
    pub links: Vec<Link>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_resources: Vec<RelatedResource>,
}

impl PaymentRecord {
    /// Find a link by exact relation name
    pub fn find_link(&self, rel: &str) -> Option<&Link> {
        self.links.iter().find(|link| link.rel == rel)
    }

    /// URL of the hosted page where the payer approves this payment
    pub fn approval_url(&self) -> CheckoutResult<&str> {
        self.find_link(APPROVAL_URL_REL)
            .map(|link| link.href.as_str())
            .ok_or_else(|| CheckoutError::LinkNotFound {
                rel: APPROVAL_URL_REL.to_string(),
            })
    }

    /// Id of the sale created by executing this payment.
    ///
    /// Looks at top-level related resources first, then at each
    /// transaction's.
    pub fn sale_id(&self) -> CheckoutResult<&str> {
        self.related_resources
            .iter()
            .chain(
                self.transactions
                    .iter()
                    .flat_map(|tx| tx.related_resources.iter()),
            )
            .filter_map(|resource| resource.sale.as_ref())
            .map(|sale| sale.id.as_str())
            .find(|id| !id.is_empty())
            .ok_or_else(|| CheckoutError::SaleNotFound {
                payment_id: self.id.clone(),
            })
    }
}

/// Check a gateway-assigned id (payment, sale) before it goes into a URL path.
///
/// Gateway ids are ASCII letters, digits, `-` and `_`. Anything else is
/// rejected rather than normalized.
pub fn validate_resource_id<'a>(what: &str, value: &'a str) -> CheckoutResult<&'a str> {
    if value.is_empty() {
        return Err(CheckoutError::InvalidRequest(format!("{} is empty", what)));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(CheckoutError::InvalidRequest(format!(
            "{} contains unexpected characters",
            what
        )));
    }
    Ok(value)
}

/// Resolve the payer hand-off URL of a created payment
pub fn resolve_approval_url(record: &PaymentRecord) -> CheckoutResult<String> {
    record.approval_url().map(str::to_string)
}

/// A charge against an approved payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,

    /// "completed", "pending", "refunded", "denied", ...
    pub state: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<PaymentAmount>,

    #[serde(default)]
    pub parent_payment: String,

    #[serde(default)]
    pub links: Vec<Link>,
}

impl Sale {
    pub fn is_completed(&self) -> bool {
        self.state == SALE_STATE_COMPLETED
    }

    /// Accept the sale only in its terminal success state.
    ///
    /// Pending and other transient states are failures, never success.
    pub fn verify_completed(self) -> CheckoutResult<Sale> {
        if self.is_completed() {
            Ok(self)
        } else {
            Err(CheckoutError::Verification {
                actual_state: self.state,
            })
        }
    }
}
