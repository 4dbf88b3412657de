//! # Payments API
//!
//! Request builders and response interpretation for payment creation,
//! execution and sale lookup.
//!
//! | Call         | Endpoint                               | Success |
//! |--------------|----------------------------------------|---------|
//! | create       | POST /v1/payments/payment              | 201     |
//! | execute      | POST /v1/payments/payment/{id}/execute | 2xx     |
//! | sale lookup  | GET  /v1/payments/sale/{id}            | 200     |

use crate::transport::{GatewayRequest, RawResponse};
use checkout_core::{
    validate_resource_id, AccessToken, CheckoutError, CheckoutResult, PaymentOrder,
    PaymentRecord, Sale,
};
use serde::Serialize;

pub const PAYMENT_PATH: &str = "/v1/payments/payment";
pub const SALE_PATH: &str = "/v1/payments/sale";

#[derive(Debug, Serialize)]
struct ExecuteBody<'a> {
    payer_id: &'a str,
}

pub(crate) fn create_request(
    token: &AccessToken,
    order: &PaymentOrder,
) -> CheckoutResult<GatewayRequest> {
    GatewayRequest::post(PAYMENT_PATH)
        .bearer(token.secret())
        .header("Content-Type", "application/json")
        .json(&order.to_intent())
}

pub(crate) fn parse_create_response(response: RawResponse) -> CheckoutResult<PaymentRecord> {
    if response.status != 201 {
        return Err(CheckoutError::Creation {
            status: response.status,
            body: response.body,
        });
    }
    response.decode()
}

pub(crate) fn execute_request(
    token: &AccessToken,
    payment_id: &str,
    payer_id: &str,
) -> CheckoutResult<GatewayRequest> {
    let payment_id = validate_resource_id("payment id", payment_id)?;
    if payer_id.trim().is_empty() {
        return Err(CheckoutError::InvalidRequest("payer id is empty".to_string()));
    }

    GatewayRequest::post(PAYMENT_PATH)
        .segment(payment_id)
        .segment("execute")
        .bearer(token.secret())
        .header("Content-Type", "application/json")
        .json(&ExecuteBody { payer_id })
}

pub(crate) fn parse_execute_response(response: RawResponse) -> CheckoutResult<PaymentRecord> {
    if !response.is_success() {
        return Err(CheckoutError::Execution {
            status: response.status,
            body: response.body,
        });
    }
    response.decode()
}

pub(crate) fn sale_request(token: &AccessToken, sale_id: &str) -> CheckoutResult<GatewayRequest> {
    let sale_id = validate_resource_id("sale id", sale_id)?;

    Ok(GatewayRequest::get(SALE_PATH)
        .segment(sale_id)
        .bearer(token.secret())
        .header("Accept", "application/json"))
}

pub(crate) fn parse_sale_response(response: RawResponse) -> CheckoutResult<Sale> {
    if response.status != 200 {
        return Err(CheckoutError::SaleLookup {
            status: response.status,
            body: response.body,
        });
    }
    response.decode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::RequestBody;
    use checkout_core::CheckoutUrls;
    use serde_json::json;

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            body: body.to_string(),
        }
    }

    fn token() -> AccessToken {
        AccessToken::new("A21AAF", 3600)
    }

    #[test]
    fn test_create_request_carries_composed_intent() {
        let order = PaymentOrder::new(
            1.00,
            0.20,
            2.00,
            "USD",
            CheckoutUrls::default().redirect_urls(),
        )
        .with_description("The products that I have purchased:");

        let request = create_request(&token(), &order).unwrap();
        assert_eq!(request.path, "/v1/payments/payment");

        let RequestBody::Json(body) = request.body else {
            panic!("expected JSON body");
        };
        assert_eq!(body["intent"], "sale");
        assert_eq!(body["payer"]["payment_method"], "paypal");
        assert_eq!(body["transactions"][0]["amount"]["total"], "3.20");
        assert_eq!(body["transactions"][0]["amount"]["details"]["tax"], "0.20");
        assert_eq!(
            body["redirect_urls"]["return_url"],
            "http://localhost:3000/ok"
        );
    }

    #[test]
    fn test_create_non_201_keeps_body_verbatim() {
        let body = r#"{"name":"VALIDATION_ERROR","details":[{"field":"transactions[0].amount","issue":"Amount cannot be zero"}]}"#;

        // 200 is not the documented success status for creation
        for status in [200, 400, 500] {
            match parse_create_response(raw(status, body)).unwrap_err() {
                CheckoutError::Creation { status: s, body: b } => {
                    assert_eq!(s, status);
                    assert_eq!(b, body);
                }
                other => panic!("expected creation error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_execute_request_body_is_serialized() {
        let request = execute_request(&token(), "PAY-1", " PAYER\"-9").unwrap();
        assert_eq!(request.path, "/v1/payments/payment");
        assert_eq!(request.segments, vec!["PAY-1", "execute"]);
        assert_eq!(request.display_path(), "/v1/payments/payment/PAY-1/execute");

        // sent exactly as received, surrounding whitespace included
        let RequestBody::Json(body) = request.body else {
            panic!("expected JSON body");
        };
        assert_eq!(body, json!({ "payer_id": " PAYER\"-9" }));
    }

    #[test]
    fn test_execute_request_rejects_bad_ids() {
        assert!(matches!(
            execute_request(&token(), "PAY-1", "  "),
            Err(CheckoutError::InvalidRequest(_))
        ));
        assert!(matches!(
            execute_request(&token(), "", "PAYER"),
            Err(CheckoutError::InvalidRequest(_))
        ));
        assert!(matches!(
            execute_request(&token(), " PAY-1 ", "PAYER"),
            Err(CheckoutError::InvalidRequest(_))
        ));
        assert!(matches!(
            execute_request(&token(), "../../../oauth2/token?", "PAYER"),
            Err(CheckoutError::InvalidRequest(_))
        ));
        assert!(matches!(
            sale_request(&token(), "../payment/PAY-1"),
            Err(CheckoutError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_execute_any_2xx_succeeds() {
        let body = r#"{"id":"PAY-1","state":"approved","intent":"sale"}"#;
        assert_eq!(parse_execute_response(raw(200, body)).unwrap().id, "PAY-1");
        assert_eq!(parse_execute_response(raw(201, body)).unwrap().state, "approved");

        let err = parse_execute_response(raw(400, r#"{"name":"PAYMENT_NOT_APPROVED_FOR_EXECUTION"}"#))
            .unwrap_err();
        assert!(matches!(err, CheckoutError::Execution { status: 400, .. }));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_sale_lookup() {
        let sale = parse_sale_response(raw(200, r#"{"id":"SALE-1","state":"pending"}"#)).unwrap();
        assert_eq!(sale.state, "pending");

        let err = parse_sale_response(raw(404, r#"{"name":"INVALID_RESOURCE_ID"}"#)).unwrap_err();
        assert!(matches!(err, CheckoutError::SaleLookup { status: 404, .. }));

        let request = sale_request(&token(), "SALE-1").unwrap();
        assert_eq!(request.method, reqwest::Method::GET);
        assert_eq!(request.display_path(), "/v1/payments/sale/SALE-1");
    }
}
