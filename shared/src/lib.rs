//! Shared types for the Atelier order console
//!
//! Domain models and wire DTOs used across crates: the client consumes
//! them when decoding API responses, the API mock produces them.

pub mod api;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{CapabilitySet, Order, OrderId, OrderItem, OrderMessage, OrderStatus, Payment, PaymentStatus};
