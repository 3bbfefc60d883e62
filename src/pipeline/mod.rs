//! Slip verification pipeline
//!
//! - `event`: normalized inbound events
//! - `decoder`: QR decoding of slip images
//! - `resolver`: token lookup with error-code-first parsing
//! - `composer`: outcome → reply text
//! - `router`: membership gate and orchestration

pub mod composer;
pub mod decoder;
pub mod event;
pub mod outcome;
pub mod resolver;
pub mod router;
pub mod traits;

// Re-exports for convenience
pub use composer::compose;
pub use decoder::{DecodeError, QrSlipDecoder};
pub use event::{EventKind, ImageRef, InboundEvent};
pub use outcome::{RejectionReason, TransactionRecord, VerificationOutcome};
pub use resolver::HttpVerificationResolver;
pub use router::{EventRouter, RouterDeps};
pub use traits::{ImageRetriever, ReplySender, SlipDecoder, VerificationResolver};
