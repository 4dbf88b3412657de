//! # paypal-checkout
//!
//! Demo server walking a payer through the PayPal Payments REST flow.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export PAYPAL_TEST_CLIENTID=...
//! export PAYPAL_TEST_SECRET=...
//!
//! # Run the server, then open http://localhost:3000/
//! paypal-checkout
//! ```

use checkout_api::{routes, AppState, Shutdown};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    print_banner();

    let shutdown = Shutdown::try_new()?;
    let state = AppState::new(shutdown.token())?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Payment provider: {}", state.gateway.provider_name());
    info!(
        "Order: {} {} ({})",
        state.order().amount().total,
        state.template.currency,
        state.template.description
    );

    let app = routes::create_router(state);

    info!("PayPal checkout starting on http://{}", addr);

    if !is_prod {
        info!("Start a checkout: GET http://{}/", addr);
        info!("Health: GET http://{}/health", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.token().cancelled_owned())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// `LOG_FORMAT=json` switches to JSON lines; otherwise human-readable output
fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }
}

fn print_banner() {
    println!(
        r#"
  PayPal Checkout RS
  ━━━━━━━━━━━━━━━━━━━━━━━
  Payments REST demo
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
