//! LINE Messaging API integration
//!
//! - `signature`: `X-Line-Signature` verification
//! - `types`: webhook payload and its mapping onto pipeline events
//! - `client`: reply delivery and image content download
//! - `webhook`: the axum endpoint the platform calls

pub mod client;
pub mod signature;
pub mod types;
pub mod webhook;

// Re-exports for convenience
pub use client::LineClient;
pub use signature::{sign, verify_signature, SignatureError, SIGNATURE_HEADER};
pub use types::{WebhookEvent, WebhookPayload};
pub use webhook::{webhook_routes, WebhookState};
