//! # OAuth2 Client Credentials
//!
//! Builds the token request and interprets the token response.

use crate::transport::{GatewayRequest, RawResponse};
use checkout_core::{AccessToken, CheckoutError, CheckoutResult, Credentials};

pub const TOKEN_PATH: &str = "/v1/oauth2/token";

pub(crate) fn token_request(credentials: &Credentials) -> GatewayRequest {
    GatewayRequest::post(TOKEN_PATH)
        .basic_auth(&credentials.client_id, &credentials.client_secret)
        .header("Accept", "application/json")
        .header("Accept-Language", "en_US")
        .form(&[("grant_type", "client_credentials")])
}

/// Only 200 counts as success. A 200 without a usable token is a decode failure.
pub(crate) fn parse_token_response(response: RawResponse) -> CheckoutResult<AccessToken> {
    if response.status != 200 {
        return Err(CheckoutError::Auth {
            status: response.status,
            body: response.body,
        });
    }

    let token: AccessToken = response.decode()?;
    if token.access_token.trim().is_empty() {
        return Err(CheckoutError::Decode {
            message: "access_token is empty".to_string(),
            body: response.body,
        });
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{AuthScheme, RequestBody};

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_token_request_shape() {
        let request = token_request(&Credentials::new("client", "secret"));

        assert_eq!(request.method, reqwest::Method::POST);
        assert_eq!(request.path, "/v1/oauth2/token");
        assert!(matches!(
            request.auth,
            Some(AuthScheme::Basic { ref username, ref password })
                if username == "client" && password == "secret"
        ));
        assert!(request
            .headers
            .contains(&("Accept-Language", "en_US".to_string())));
        match request.body {
            RequestBody::Form(pairs) => assert_eq!(
                pairs,
                vec![("grant_type".to_string(), "client_credentials".to_string())]
            ),
            other => panic!("expected form body, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_token_success() {
        let token = parse_token_response(raw(
            200,
            r#"{"scope":"https://uri.paypal.com/services/payments","access_token":"EEwJ6tF9x5WCIZDYzyZGaz6Khbw7raYRIBV_WxVvgmsG","token_type":"Bearer","app_id":"APP-80W284485P519543T","expires_in":28800}"#,
        ))
        .unwrap();

        assert_eq!(token.secret(), "EEwJ6tF9x5WCIZDYzyZGaz6Khbw7raYRIBV_WxVvgmsG");
        assert_eq!(token.expires_in, 28800);
        assert_eq!(token.app_id.as_deref(), Some("APP-80W284485P519543T"));
    }

    #[test]
    fn test_parse_token_non_200_is_auth_error() {
        let err = parse_token_response(raw(
            401,
            r#"{"error":"invalid_client","error_description":"Client Authentication failed"}"#,
        ))
        .unwrap_err();

        match err {
            CheckoutError::Auth { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("invalid_client"));
            }
            other => panic!("expected auth error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_token_201_is_still_auth_error() {
        let err = parse_token_response(raw(201, r#"{"access_token":"x"}"#)).unwrap_err();
        assert!(matches!(err, CheckoutError::Auth { status: 201, .. }));
    }

    #[test]
    fn test_parse_token_empty_is_decode_error() {
        let err = parse_token_response(raw(200, r#"{"access_token":"","expires_in":100}"#))
            .unwrap_err();
        assert!(matches!(err, CheckoutError::Decode { .. }));

        let err = parse_token_response(raw(200, "not json")).unwrap_err();
        assert!(matches!(err, CheckoutError::Decode { .. }));
    }
}
