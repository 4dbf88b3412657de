//! # Money Types
//!
//! Monetary amounts in the gateway's wire format: decimal strings with
//! exactly two fraction digits ("3.20").

use serde::{Deserialize, Serialize};

/// A monetary figure as the gateway expects it on the wire.
///
/// Outbound amounts are only ever produced by [`MoneyAmount::from_value`];
/// inbound amounts are taken verbatim from gateway responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoneyAmount(String);

impl MoneyAmount {
    /// Format a numeric value to fixed 2-decimal precision
    pub fn from_value(value: f64) -> Self {
        Self(format!("{:.2}", value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MoneyAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Subtotal/tax/shipping decomposition of a payment amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<MoneyAmount>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<MoneyAmount>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping: Option<MoneyAmount>,
}

/// Amount block of a transaction or sale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAmount {
    /// Total charged ("3.20")
    pub total: MoneyAmount,

    /// ISO 4217 currency code as the gateway spells it ("USD", "EUR")
    pub currency: String,

    /// Breakdown, always present on outbound requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<AmountDetails>,
}

impl PaymentAmount {
    /// Build an amount from its parts.
    ///
    /// The total is summed in the numeric domain first and formatted once,
    /// so it is never re-derived from the already-rounded parts. Amounts are
    /// passed through unvalidated; the gateway rejects negative or
    /// inconsistent figures.
    pub fn compose(subtotal: f64, tax: f64, shipping: f64, currency: impl Into<String>) -> Self {
        let total = subtotal + tax + shipping;
        Self {
            total: MoneyAmount::from_value(total),
            currency: currency.into(),
            details: Some(AmountDetails {
                subtotal: Some(MoneyAmount::from_value(subtotal)),
                tax: Some(MoneyAmount::from_value(tax)),
                shipping: Some(MoneyAmount::from_value(shipping)),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(MoneyAmount::from_value(1.0).as_str(), "1.00");
        assert_eq!(MoneyAmount::from_value(0.2).as_str(), "0.20");
        assert_eq!(MoneyAmount::from_value(19.999).as_str(), "20.00");
        assert_eq!(MoneyAmount::from_value(0.0).to_string(), "0.00");
    }

    #[test]
    fn test_compose_reference_order() {
        let amount = PaymentAmount::compose(1.00, 0.20, 2.00, "USD");
        let details = amount.details.as_ref().unwrap();

        assert_eq!(amount.total.as_str(), "3.20");
        assert_eq!(amount.currency, "USD");
        assert_eq!(details.subtotal.as_ref().unwrap().as_str(), "1.00");
        assert_eq!(details.tax.as_ref().unwrap().as_str(), "0.20");
        assert_eq!(details.shipping.as_ref().unwrap().as_str(), "2.00");
    }

    #[test]
    fn test_total_derived_before_rounding() {
        let cases = [
            (0.004, 0.004, 0.004),
            (10.125, 0.333, 1.111),
            (99.994, 0.004, 0.004),
        ];
        for (subtotal, tax, shipping) in cases {
            let amount = PaymentAmount::compose(subtotal, tax, shipping, "EUR");
            assert_eq!(
                amount.total.as_str(),
                format!("{:.2}", subtotal + tax + shipping)
            );
        }

        // every part formats as "0.00" while the sum is 0.012
        let amount = PaymentAmount::compose(0.004, 0.004, 0.004, "EUR");
        assert_eq!(amount.total.as_str(), "0.01");
    }

    #[test]
    fn test_negative_amounts_pass_through() {
        let amount = PaymentAmount::compose(5.00, -1.50, 0.00, "USD");
        let details = amount.details.as_ref().unwrap();

        assert_eq!(amount.total.as_str(), "3.50");
        assert_eq!(details.tax.as_ref().unwrap().as_str(), "-1.50");
    }

    #[test]
    fn test_amount_serialization_omits_missing_details() {
        let amount: PaymentAmount =
            serde_json::from_str(r#"{"total":"7.47","currency":"USD"}"#).unwrap();
        assert!(amount.details.is_none());

        let json = serde_json::to_value(&amount).unwrap();
        assert_eq!(json, serde_json::json!({"total": "7.47", "currency": "USD"}));
    }
}
