//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the gateway, merchant credentials, callback URLs and the demo
//! order template. Nothing here belongs to a single checkout.

use checkout_core::{BoxedPaymentGateway, CallOptions, CheckoutUrls, Credentials, PaymentOrder};
use checkout_paypal::PayPalClient;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

const DEFAULT_CHECKOUT_CONFIG: &str = "config/checkout.toml";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Base URL the payer's browser returns to
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Path of the order template TOML
    pub checkout_config: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            checkout_config: std::env::var("CHECKOUT_CONFIG")
                .unwrap_or_else(|_| DEFAULT_CHECKOUT_CONFIG.to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Amounts and description of the demo purchase
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderTemplate {
    pub subtotal: f64,
    pub tax: f64,
    pub shipping: f64,
    pub currency: String,
    #[serde(default)]
    pub description: String,
}

impl OrderTemplate {
    /// Turn the template into an order returning to `urls`
    pub fn to_order(&self, urls: &CheckoutUrls) -> PaymentOrder {
        PaymentOrder::new(
            self.subtotal,
            self.tax,
            self.shipping,
            self.currency.clone(),
            urls.redirect_urls(),
        )
        .with_description(self.description.clone())
    }
}

impl Default for OrderTemplate {
    fn default() -> Self {
        Self {
            subtotal: 1.00,
            tax: 0.20,
            shipping: 2.00,
            currency: "USD".to_string(),
            description: "The products that I have purchased:".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CheckoutFile {
    order: OrderTemplate,
}

/// Parse the `[order]` table of a checkout config file
pub fn parse_order_template(content: &str) -> anyhow::Result<OrderTemplate> {
    let file: CheckoutFile = toml::from_str(content)?;
    Ok(file.order)
}

/// Load the order template, falling back to the built-in demo order
pub fn load_order_template(path: impl AsRef<Path>) -> anyhow::Result<OrderTemplate> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let template = parse_order_template(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
            tracing::info!("Loaded order template from {}", path.display());
            Ok(template)
        }
        Err(_) => {
            tracing::warn!("No checkout config at {}, using demo order", path.display());
            Ok(OrderTemplate::default())
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment gateway
    pub gateway: BoxedPaymentGateway,
    /// Merchant credentials for the token exchange
    pub credentials: Credentials,
    /// Return/cancel URLs
    pub urls: CheckoutUrls,
    /// Demo order
    pub template: OrderTemplate,
    /// Application config
    pub config: AppConfig,
    /// Cancelled on shutdown; every gateway call gets a child token
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Create a new AppState backed by the PayPal client
    pub fn new(shutdown: CancellationToken) -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let template = load_order_template(&config.checkout_config)?;

        let client = PayPalClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize PayPal: {}", e))?;
        let credentials = client.credentials().clone();

        Ok(Self::with_gateway(
            Arc::new(client),
            credentials,
            config,
            template,
            shutdown,
        ))
    }

    /// Assemble state around any gateway (tests use a fake)
    pub fn with_gateway(
        gateway: BoxedPaymentGateway,
        credentials: Credentials,
        config: AppConfig,
        template: OrderTemplate,
        shutdown: CancellationToken,
    ) -> Self {
        let urls = CheckoutUrls::new(&config.base_url);
        Self {
            gateway,
            credentials,
            urls,
            template,
            config,
            shutdown,
        }
    }

    /// The demo order with this server's callback URLs
    pub fn order(&self) -> PaymentOrder {
        self.template.to_order(&self.urls)
    }

    /// Options for one gateway call, cancelled with the server
    pub fn call_options(&self) -> CallOptions {
        CallOptions::new().with_cancellation(self.shutdown.child_token())
    }
}
