//! Common test utilities
//!
//! Recording fakes for the router's collaborators, shared across all
//! integration tests.

#![allow(dead_code)]

pub mod fakes;
pub mod fixtures;

#[allow(unused_imports)]
pub use fakes::{CountingRetriever, FixedResolver, RecordingReplier, StubDecoder};
#[allow(unused_imports)]
pub use fixtures::{qr_png, sample_record_json, TestEnvironment};
