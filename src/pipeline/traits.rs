//! Seams between the router and its collaborators.
//!
//! The router depends only on these traits; the LINE client, the QR decoder
//! and the HTTP resolver are injected at construction time, and tests swap
//! in recording fakes.

use async_trait::async_trait;

use super::decoder::DecodeError;
use super::event::ImageRef;
use super::outcome::VerificationOutcome;
use crate::core::error::AppResult;

/// Fetches the raw bytes of a submitted image.
#[async_trait]
pub trait ImageRetriever: Send + Sync {
    async fn fetch(&self, image: &ImageRef) -> AppResult<Vec<u8>>;
}

/// Extracts the slip token from image bytes. Pure and CPU-bound.
pub trait SlipDecoder: Send + Sync {
    fn decode(&self, image: &[u8]) -> Result<String, DecodeError>;
}

/// Resolves a decoded token against the lookup service.
#[async_trait]
pub trait VerificationResolver: Send + Sync {
    async fn resolve(&self, token: &str) -> VerificationOutcome;
}

/// Delivers a text reply. Failures are reported to the caller for logging
/// only; they are never retried.
#[async_trait]
pub trait ReplySender: Send + Sync {
    async fn reply(&self, reply_token: &str, text: &str) -> AppResult<()>;
}
