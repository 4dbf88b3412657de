//! # checkout-api
//!
//! Demonstration server for paypal-checkout-rs.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Create payment, redirect to approval page |
//! | GET | `/ok` | Return URL: execute payment, verify sale |
//! | GET | `/cancel` | Cancel URL |
//! | GET | `/health` | Health check |

pub mod handlers;
pub mod routes;
pub mod shutdown;
pub mod state;

#[cfg(test)]
mod test_support;

pub use routes::create_router;
pub use shutdown::Shutdown;
pub use state::{AppConfig, AppState, OrderTemplate};
