//! Standalone mock server binary
//!
//! Seeds a couple of well-known sessions and serves the order API on
//! localhost, handy for poking the client against a live surface:
//!
//! ```text
//! cargo run -p atelier-api-mock
//! curl -b 'session=customer-token' http://127.0.0.1:8080/orders/mine
//! ```

use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use atelier_api_mock::{AppState, User, router};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let state = Arc::new(
        AppState::new()
            .with_user("customer-token", User::customer("alice"))
            .with_user("manager-token", User::workshop_manager("mina"))
            .with_user("operator-token", User::order_operator("omid"))
            .with_user("accountant-token", User::accountant("aram")),
    );

    let listener = TcpListener::bind("127.0.0.1:8080").await?;
    tracing::info!(addr = %listener.local_addr()?, "mock order API listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
