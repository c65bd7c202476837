//! Atelier Client - order console over the atelier JSON API
//!
//! Fetches role-scoped order snapshots, reflects server-computed
//! capabilities, submits mutation commands, and re-renders from a full
//! refresh after every write (read-after-write, never optimistic).

pub mod commands;
pub mod config;
pub mod desk;
pub mod error;
pub mod http;
pub mod orders;
pub mod render;

pub use commands::{ItemDraft, MessageDraft, OrderDraft, PaymentDraft, PricingDraft, Submission};
pub use config::ClientConfig;
pub use desk::{CustomerDesk, CustomerOrders, StaffDesk, StaffOrders};
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use orders::OrderApi;
pub use render::Regions;

// Re-export shared types for convenience
pub use shared::models::{CapabilitySet, OrderId, OrderStatus, PaymentStatus};
