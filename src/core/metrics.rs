//! Metrics collection for the bot using Prometheus
//!
//! Tracks inbound events by kind, verification outcomes, lookup latency and
//! reply delivery failures. Exposed by the webhook server at `/metrics`.

use lazy_static::lazy_static;
use prometheus::{register_counter_vec, register_histogram, CounterVec, Encoder, Histogram, TextEncoder};

lazy_static! {
    /// Inbound events by kind
    /// Labels: kind (follow/text/image/other)
    pub static ref EVENTS_TOTAL: CounterVec = register_counter_vec!(
        "slipcheck_events_total",
        "Total number of inbound chat events by kind",
        &["kind"]
    )
    .expect("events counter registers once");

    /// Verification outcomes
    /// Labels: outcome (resolved/decode_failed/transport_failed/rejected/malformed)
    pub static ref VERIFICATION_OUTCOMES_TOTAL: CounterVec = register_counter_vec!(
        "slipcheck_verification_outcomes_total",
        "Total number of slip verifications by outcome",
        &["outcome"]
    )
    .expect("outcome counter registers once");

    /// Time spent waiting on the lookup service
    pub static ref LOOKUP_DURATION_SECONDS: Histogram = register_histogram!(
        "slipcheck_lookup_duration_seconds",
        "Time spent on the transaction lookup request",
        vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("lookup histogram registers once");

    /// Replies the chat platform refused or we failed to deliver
    /// Labels: category (http/validation/...), see `AppError::category`
    pub static ref REPLY_FAILURES_TOTAL: CounterVec = register_counter_vec!(
        "slipcheck_reply_failures_total",
        "Total number of replies that could not be delivered",
        &["category"]
    )
    .expect("reply failure counter registers once");
}

/// Records one inbound event
pub fn record_event(kind: &str) {
    EVENTS_TOTAL.with_label_values(&[kind]).inc();
}

/// Records the outcome of one verification
pub fn record_outcome(outcome: &str) {
    VERIFICATION_OUTCOMES_TOTAL.with_label_values(&[outcome]).inc();
}

/// Records a failed reply delivery under its error category
pub fn record_reply_failure(category: &str) {
    REPLY_FAILURES_TOTAL.with_label_values(&[category]).inc();
}

/// Renders every registered metric in the Prometheus text format
pub fn render() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&prometheus::gather(), &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
