//! slipcheck - LINE bot that verifies payment slips
//!
//! Members send a photo of a transfer slip; the bot decodes the slip's QR
//! code, looks the token up on the verification service and replies with
//! the transfer details.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, metrics, HTTP server
//! - `storage`: SQLite pool and migrations
//! - `membership`: the membership gate
//! - `pipeline`: decode → resolve → compose, driven by the event router
//! - `line`: LINE webhook, signature check and API client

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod cli;
pub mod core;
pub mod i18n;
pub mod line;
pub mod membership;
pub mod pipeline;
pub mod storage;

// Re-export commonly used types for convenience
pub use core::{config, AppError, AppResult};
pub use membership::{InMemoryMembership, MembershipOracle, SqliteMembership};
pub use pipeline::{EventRouter, InboundEvent, RouterDeps, VerificationOutcome};
