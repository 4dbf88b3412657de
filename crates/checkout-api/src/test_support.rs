//! In-memory gateway for handler and route tests.

use async_trait::async_trait;
use checkout_core::{
    AccessToken, CallOptions, CheckoutError, CheckoutResult, Credentials, Link, PaymentGateway,
    PaymentOrder, PaymentRecord, RelatedResource, Sale, Transaction, APPROVAL_URL_REL,
};
use std::sync::Mutex;

pub const APPROVAL_URL: &str =
    "https://www.sandbox.paypal.com/cgi-bin/webscr?cmd=_express-checkout&token=EC-TEST";

pub struct FakeGateway {
    pub sale_state: String,
    pub reject_token: bool,
    pub calls: Mutex<Vec<String>>,
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self {
            sale_state: "completed".to_string(),
            reject_token: false,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeGateway {
    pub fn with_sale_state(state: &str) -> Self {
        Self {
            sale_state: state.to_string(),
            ..Self::default()
        }
    }

    pub fn rejecting_tokens() -> Self {
        Self {
            reject_token: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn sale(&self, id: &str) -> Sale {
        serde_json::from_value(serde_json::json!({ "id": id, "state": self.sale_state }))
            .unwrap()
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn acquire_token(
        &self,
        credentials: &Credentials,
        _call: &CallOptions,
    ) -> CheckoutResult<AccessToken> {
        self.record(format!("token:{}", credentials.client_id));
        if self.reject_token {
            return Err(CheckoutError::Auth {
                status: 401,
                body: r#"{"error":"invalid_client"}"#.to_string(),
            });
        }
        Ok(AccessToken::new("fake-token", 28800))
    }

    async fn create_payment(
        &self,
        _token: &AccessToken,
        order: &PaymentOrder,
        _call: &CallOptions,
    ) -> CheckoutResult<PaymentRecord> {
        self.record(format!("create:{}", order.amount().total));
        let mut record: PaymentRecord = serde_json::from_value(serde_json::json!({
            "id": "PAY-TEST",
            "state": "created",
            "intent": "sale"
        }))
        .unwrap();
        record.links.push(Link {
            href: APPROVAL_URL.to_string(),
            rel: APPROVAL_URL_REL.to_string(),
            method: "REDIRECT".to_string(),
        });
        Ok(record)
    }

    async fn execute_payment(
        &self,
        _token: &AccessToken,
        payment_id: &str,
        payer_id: &str,
        _call: &CallOptions,
    ) -> CheckoutResult<PaymentRecord> {
        self.record(format!("execute:{}:{}", payment_id, payer_id));
        let mut record: PaymentRecord = serde_json::from_value(serde_json::json!({
            "id": payment_id,
            "state": "approved",
            "intent": "sale"
        }))
        .unwrap();
        record.transactions.push(Transaction {
            amount: order_amount(),
            description: String::new(),
            related_resources: vec![RelatedResource {
                sale: Some(self.sale(&format!("SALE-{}", payment_id))),
            }],
        });
        Ok(record)
    }

    async fn lookup_sale(
        &self,
        _token: &AccessToken,
        sale_id: &str,
        _call: &CallOptions,
    ) -> CheckoutResult<Sale> {
        self.record(format!("sale:{}", sale_id));
        Ok(self.sale(sale_id))
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

fn order_amount() -> checkout_core::PaymentAmount {
    checkout_core::PaymentAmount::compose(1.00, 0.20, 2.00, "USD")
}
