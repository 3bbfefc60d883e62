use serde::Deserialize;

/// Transaction details returned by the lookup service.
///
/// All fields are kept verbatim as the service sent them. Only meaningful
/// together with the token that produced it; never cached.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransactionRecord {
    pub amount: String,
    /// Some upstream responses omit the bank; rendered as an empty field
    #[serde(default)]
    pub from_bank: String,
    pub sender: String,
    pub receiver: String,
    pub timestamp: String,
    pub transaction_id: String,
}

/// Why the lookup service refused a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// Non-success HTTP status
    HttpStatus(u16),
    /// Non-zero `error_code` inside a success-shaped body
    ErrorCode(i64),
}

/// Everything a slip verification can end in. The reply composer formats
/// exactly one message per variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    Resolved(TransactionRecord),
    DecodeFailed,
    LookupTransportFailed,
    LookupRejected(RejectionReason),
    LookupMalformed,
}

impl VerificationOutcome {
    /// Label used for metrics and logs
    pub fn label(&self) -> &'static str {
        match self {
            VerificationOutcome::Resolved(_) => "resolved",
            VerificationOutcome::DecodeFailed => "decode_failed",
            VerificationOutcome::LookupTransportFailed => "transport_failed",
            VerificationOutcome::LookupRejected(_) => "rejected",
            VerificationOutcome::LookupMalformed => "malformed",
        }
    }
}
