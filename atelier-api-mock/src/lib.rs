//! In-memory mock of the atelier order API
//!
//! Implements the consumed API surface for integration tests and local
//! poking: session-scoped roles and permissions, CSRF enforcement,
//! customer scoping, internal-note filtering and status validation, backed
//! by an in-memory store. The contract mirrors what the production backend
//! enforces; the client trusts it rather than re-checking locally.

pub mod api;
pub mod error;
pub mod state;

pub use api::router;
pub use error::ApiError;
pub use state::{AppState, Role, User};

use std::net::SocketAddr;
use std::sync::Arc;

/// Serve the mock on an ephemeral local port; returns the bound address.
pub async fn spawn(state: Arc<AppState>) -> std::io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = router(state);
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            tracing::error!(%err, "mock order API exited");
        }
    });
    Ok(addr)
}
