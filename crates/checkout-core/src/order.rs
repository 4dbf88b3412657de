//! # Order Types
//!
//! Merchant-side inputs of a payment: amounts, description and the
//! callback URLs the payer returns to.

use crate::money::PaymentAmount;
use crate::payment::{PaymentIntent, RedirectUrls, Transaction};
use serde::{Deserialize, Serialize};

/// Everything needed to create one payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentOrder {
    pub subtotal: f64,
    pub tax: f64,
    pub shipping: f64,

    /// Currency code ("USD")
    pub currency: String,

    /// Transaction description shown to the payer
    #[serde(default)]
    pub description: String,

    pub redirect_urls: RedirectUrls,
}

impl PaymentOrder {
    /// Create an order with the given amount breakdown
    pub fn new(
        subtotal: f64,
        tax: f64,
        shipping: f64,
        currency: impl Into<String>,
        redirect_urls: RedirectUrls,
    ) -> Self {
        Self {
            subtotal,
            tax,
            shipping,
            currency: currency.into(),
            description: String::new(),
            redirect_urls,
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Amount block with the total derived before formatting
    pub fn amount(&self) -> PaymentAmount {
        PaymentAmount::compose(self.subtotal, self.tax, self.shipping, self.currency.clone())
    }

    /// Build the single-transaction "sale" intent for this order
    pub fn to_intent(&self) -> PaymentIntent {
        PaymentIntent::sale(
            self.redirect_urls.clone(),
            vec![Transaction {
                amount: self.amount(),
                description: self.description.clone(),
                related_resources: Vec::new(),
            }],
        )
    }
}

/// Callback URLs of the hosting application
#[derive(Debug, Clone)]
pub struct CheckoutUrls {
    /// Base URL of the application (e.g., "http://localhost:3000")
    pub base_url: String,
    /// Return path after approval (e.g., "/ok")
    pub return_path: String,
    /// Cancel path (e.g., "/cancel")
    pub cancel_path: String,
}

impl CheckoutUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            return_path: "/ok".to_string(),
            cancel_path: "/cancel".to_string(),
        }
    }

    pub fn return_url(&self) -> String {
        format!("{}{}", self.base_url, self.return_path)
    }

    pub fn cancel_url(&self) -> String {
        format!("{}{}", self.base_url, self.cancel_path)
    }

    pub fn redirect_urls(&self) -> RedirectUrls {
        RedirectUrls {
            return_url: self.return_url(),
            cancel_url: self.cancel_url(),
        }
    }
}

impl Default for CheckoutUrls {
    fn default() -> Self {
        Self::new("http://localhost:3000")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_urls() {
        let urls = CheckoutUrls::new("https://shop.example.com/");

        assert_eq!(urls.return_url(), "https://shop.example.com/ok");
        assert_eq!(urls.cancel_url(), "https://shop.example.com/cancel");
    }

    #[test]
    fn test_order_to_intent() {
        let order = PaymentOrder::new(1.00, 0.20, 2.00, "USD", CheckoutUrls::default().redirect_urls())
            .with_description("The products that I have purchased:");

        let intent = order.to_intent();

        assert_eq!(intent.intent, "sale");
        assert_eq!(intent.payer.payment_method, "paypal");
        assert_eq!(intent.redirect_urls.return_url, "http://localhost:3000/ok");
        assert_eq!(intent.transactions.len(), 1);
        assert_eq!(intent.transactions[0].amount.total.as_str(), "3.20");
        assert_eq!(
            intent.transactions[0].description,
            "The products that I have purchased:"
        );
    }

    #[test]
    fn test_negative_amounts_pass_through() {
        let order = PaymentOrder::new(5.00, -1.00, 0.0, "USD", CheckoutUrls::default().redirect_urls());
        assert_eq!(order.amount().total.as_str(), "4.00");
        assert_eq!(
            order.amount().details.unwrap().tax.unwrap().as_str(),
            "-1.00"
        );
    }
}
