//! Transaction lookup against the verification service.
//!
//! The service answers invalid tokens with HTTP 200 and a body like
//! `{"error_code": 1}`, so the body is always checked for an error code
//! before it is read as a transaction record.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use super::outcome::{RejectionReason, TransactionRecord, VerificationOutcome};
use super::traits::VerificationResolver;
use crate::core::error::{AppError, AppResult};
use crate::core::metrics;

/// Error-code shape of a lookup response. Any JSON object parses into it.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error_code: Option<i64>,
}

/// Classifies a success-status response body.
///
/// Precedence: non-zero `error_code` → `LookupRejected`, then a full record →
/// `Resolved`, anything else → `LookupMalformed`.
pub fn parse_lookup_body(body: &[u8]) -> VerificationOutcome {
    if let Ok(ErrorEnvelope {
        error_code: Some(code),
    }) = serde_json::from_slice::<ErrorEnvelope>(body)
    {
        if code != 0 {
            return VerificationOutcome::LookupRejected(RejectionReason::ErrorCode(code));
        }
    }

    match serde_json::from_slice::<TransactionRecord>(body) {
        Ok(record) => VerificationOutcome::Resolved(record),
        Err(e) => {
            log::warn!("Lookup response did not match the record shape: {}", e);
            VerificationOutcome::LookupMalformed
        }
    }
}

/// Resolves tokens with a single GET to `{base_url}/{token}`.
///
/// No retries. The client timeout bounds every lookup.
#[derive(Clone)]
pub struct HttpVerificationResolver {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpVerificationResolver {
    /// Builds a resolver with its own client and the given request timeout
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_client(client, base_url)
    }

    /// Builds a resolver on top of an existing client
    pub fn with_client(client: reqwest::Client, base_url: &str) -> AppResult<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Validation(format!("lookup URL cannot take a path: {}", base_url)));
        }
        Ok(Self { client, base_url })
    }

    /// URL for a token; the token is percent-encoded as one path segment
    pub fn lookup_url(&self, token: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(token);
        }
        url
    }
}

#[async_trait]
impl VerificationResolver for HttpVerificationResolver {
    async fn resolve(&self, token: &str) -> VerificationOutcome {
        let url = self.lookup_url(token);
        let _timer = metrics::LOOKUP_DURATION_SECONDS.start_timer();

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("🔌 Lookup request for token {} failed: {}", token, e);
                return VerificationOutcome::LookupTransportFailed;
            }
        };

        let status = response.status();
        if !status.is_success() {
            log::warn!("Lookup for token {} answered with status {}", token, status);
            return VerificationOutcome::LookupRejected(RejectionReason::HttpStatus(status.as_u16()));
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                log::warn!("🔌 Reading lookup body for token {} failed: {}", token, e);
                return VerificationOutcome::LookupTransportFailed;
            }
        };

        let outcome = parse_lookup_body(&body);
        log::info!("Lookup for token {} → {}", token, outcome.label());
        outcome
    }
}
