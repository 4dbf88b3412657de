//! # Request Handlers
//!
//! Axum request handlers for the demo checkout.
//!
//! `GET /` starts a payment and redirects the payer to the gateway.
//! The gateway sends the browser back to `GET /ok` with the payment id and
//! payer id in the query string, which is all that is needed to finish.

use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use checkout_core::{ApprovalHandle, AwaitingToken, CheckoutError};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Query string of the gateway's approval redirect
#[derive(Debug, Deserialize)]
pub struct ReturnParams {
    #[serde(rename = "paymentId")]
    pub payment_id: Option<String>,
    #[serde(rename = "PayerID")]
    pub payer_id: Option<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

/// Map a checkout error to a response. Gateway bodies are only echoed
/// outside production.
fn checkout_error_to_response(err: CheckoutError, state: &AppState) -> HandlerError {
    let code = err.status_code();
    let mut response = ErrorResponse::new(err.to_string(), code);
    if !state.config.is_production() {
        if let Some(body) = err.gateway_body() {
            response = response.with_details(body);
        }
    }
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

fn missing_param(name: &str) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(format!("Missing query parameter: {}", name), 400)),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "paypal-checkout",
        "provider": state.gateway.provider_name(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create the demo payment and send the payer to the approval page
#[instrument(skip(state))]
pub async fn start_checkout(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, HandlerError> {
    let call = state.call_options();
    let gateway = state.gateway.as_ref();

    let session = AwaitingToken::new()
        .authenticate(gateway, &state.credentials, &call)
        .await
        .map_err(|e| {
            error!("Token exchange failed: {}", e);
            checkout_error_to_response(e, &state)
        })?;

    let (handle, approval_url) = session
        .begin_approval(gateway, &state.order(), &call)
        .await
        .map_err(|e| {
            error!("Payment creation failed: {}", e);
            checkout_error_to_response(e, &state)
        })?;

    info!(payment_id = %handle.payment_id(), "Redirecting payer for approval");

    Ok((StatusCode::FOUND, [(header::LOCATION, approval_url)]))
}

/// Finish a payment the payer approved
#[instrument(skip(state, params), fields(payment_id = ?params.payment_id))]
pub async fn checkout_return(
    State(state): State<AppState>,
    Query(params): Query<ReturnParams>,
) -> Result<Html<&'static str>, HandlerError> {
    let payment_id = params.payment_id.ok_or_else(|| missing_param("paymentId"))?;
    let payer_id = params.payer_id.ok_or_else(|| missing_param("PayerID"))?;

    let handle =
        ApprovalHandle::new(payment_id).map_err(|e| checkout_error_to_response(e, &state))?;

    let call = state.call_options();
    let gateway = state.gateway.as_ref();

    // The token from `GET /` is not kept between requests
    let session = AwaitingToken::new()
        .authenticate(gateway, &state.credentials, &call)
        .await
        .map_err(|e| checkout_error_to_response(e, &state))?;

    let executed = handle
        .resume_after_approval(gateway, session.token(), payer_id, &call)
        .await
        .map_err(|e| {
            error!("Payment execution failed: {}", e);
            checkout_error_to_response(e, &state)
        })?;

    let completed = executed
        .verify_sale(gateway, session.token(), &call)
        .await
        .map_err(|e| {
            error!("Sale verification failed: {}", e);
            checkout_error_to_response(e, &state)
        })?;

    info!(
        payment_id = %completed.payment().id,
        sale_id = %completed.sale().id,
        "Checkout completed"
    );

    Ok(Html(
        r#"<!DOCTYPE html>
<html>
<head><title>Payment Complete</title></head>
<body style="font-family: system-ui; text-align: center; padding: 60px;">
    <h1>Money transferred successfully!</h1>
</body>
</html>
"#,
    ))
}

/// The payer backed out on the gateway's page
pub async fn checkout_cancel() -> impl IntoResponse {
    Html(
        r#"<!DOCTYPE html>
<html>
<head><title>Payment Cancelled</title></head>
<body style="font-family: system-ui; text-align: center; padding: 60px;">
    <h1>Payment cancelled</h1>
    <p style="color: #666;">No charges were made.</p>
</body>
</html>
"#,
    )
}
