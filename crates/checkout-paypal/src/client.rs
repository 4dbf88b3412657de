//! # PayPal Client
//!
//! `PaymentGateway` implementation backed by the Payments REST API.

use crate::config::PayPalConfig;
use crate::oauth;
use crate::payments;
use crate::transport::HttpTransport;
use async_trait::async_trait;
use checkout_core::{
    AccessToken, CallOptions, CheckoutResult, Credentials, PaymentGateway, PaymentOrder,
    PaymentRecord, Sale,
};
use tracing::{debug, error, info, instrument};

/// Payments REST client.
///
/// Holds no per-checkout state and is safe to share across tasks.
#[derive(Debug, Clone)]
pub struct PayPalClient {
    config: PayPalConfig,
    transport: HttpTransport,
}

impl PayPalClient {
    pub fn new(config: PayPalConfig) -> CheckoutResult<Self> {
        let transport = HttpTransport::new(&config.api_base_url, config.timeout)?;
        Ok(Self { config, transport })
    }

    /// Create from environment variables
    pub fn from_env() -> CheckoutResult<Self> {
        Self::new(PayPalConfig::from_env()?)
    }

    pub fn config(&self) -> &PayPalConfig {
        &self.config
    }

    /// Credentials this client was configured with
    pub fn credentials(&self) -> &Credentials {
        &self.config.credentials
    }
}

#[async_trait]
impl PaymentGateway for PayPalClient {
    #[instrument(skip(self, credentials, call), fields(client_id = %credentials.client_id))]
    async fn acquire_token(
        &self,
        credentials: &Credentials,
        call: &CallOptions,
    ) -> CheckoutResult<AccessToken> {
        let response = self
            .transport
            .send(oauth::token_request(credentials), call)
            .await?;

        if response.status != 200 {
            error!("PayPal token error: status={}, body={}", response.status, response.body);
        }

        let token = oauth::parse_token_response(response)?;
        info!(expires_in = token.expires_in, "Acquired PayPal access token");
        Ok(token)
    }

    #[instrument(skip(self, token, order, call), fields(currency = %order.currency))]
    async fn create_payment(
        &self,
        token: &AccessToken,
        order: &PaymentOrder,
        call: &CallOptions,
    ) -> CheckoutResult<PaymentRecord> {
        let request = payments::create_request(token, order)?;
        debug!("Creating PayPal payment: total={}", order.amount().total);

        let response = self.transport.send(request, call).await?;
        if response.status != 201 {
            error!("PayPal create error: status={}, body={}", response.status, response.body);
        }

        let payment = payments::parse_create_response(response)?;
        info!("Created PayPal payment: {} ({})", payment.id, payment.state);
        Ok(payment)
    }

    /// Executes (captures) an approved payment.
    ///
    /// Not safe to retry on its own: a timeout may hide a capture that
    /// already happened. Check the payment before trying again.
    #[instrument(skip(self, token, call))]
    async fn execute_payment(
        &self,
        token: &AccessToken,
        payment_id: &str,
        payer_id: &str,
        call: &CallOptions,
    ) -> CheckoutResult<PaymentRecord> {
        let request = payments::execute_request(token, payment_id, payer_id)?;

        let response = self.transport.send(request, call).await?;
        if !response.is_success() {
            error!("PayPal execute error: status={}, body={}", response.status, response.body);
        }

        let payment = payments::parse_execute_response(response)?;
        info!("Executed PayPal payment: {} ({})", payment.id, payment.state);
        Ok(payment)
    }

    #[instrument(skip(self, token, call))]
    async fn lookup_sale(
        &self,
        token: &AccessToken,
        sale_id: &str,
        call: &CallOptions,
    ) -> CheckoutResult<Sale> {
        let request = payments::sale_request(token, sale_id)?;

        let response = self.transport.send(request, call).await?;
        if response.status != 200 {
            error!("PayPal sale error: status={}, body={}", response.status, response.body);
        }

        let sale = payments::parse_sale_response(response)?;
        debug!("Sale {} is {}", sale.id, sale.state);
        Ok(sale)
    }

    fn provider_name(&self) -> &'static str {
        "paypal"
    }
}
