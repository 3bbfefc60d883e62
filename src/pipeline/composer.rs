//! Turns a verification outcome into the text the user receives.

use fluent_templates::fluent_bundle::FluentArgs;
use unic_langid::LanguageIdentifier;

use super::outcome::{RejectionReason, TransactionRecord, VerificationOutcome};
use crate::i18n;

/// Renders one reply per outcome variant. Never returns an empty string.
pub fn compose(lang: &LanguageIdentifier, outcome: &VerificationOutcome) -> String {
    match outcome {
        VerificationOutcome::Resolved(record) => compose_record(lang, record),
        VerificationOutcome::DecodeFailed => i18n::t(lang, "slip-decode-failed"),
        VerificationOutcome::LookupTransportFailed => i18n::t(lang, "slip-lookup-unavailable"),
        VerificationOutcome::LookupRejected(reason) => {
            let code = match reason {
                RejectionReason::HttpStatus(status) => format!("HTTP {}", status),
                RejectionReason::ErrorCode(code) => code.to_string(),
            };
            let mut args = FluentArgs::new();
            args.set("code", code);
            i18n::t_args(lang, "slip-lookup-rejected", &args)
        }
        VerificationOutcome::LookupMalformed => i18n::t(lang, "slip-lookup-malformed"),
    }
}

fn compose_record(lang: &LanguageIdentifier, record: &TransactionRecord) -> String {
    let mut args = FluentArgs::new();
    args.set("amount", record.amount.clone());
    args.set("from_bank", record.from_bank.clone());
    args.set("sender", record.sender.clone());
    args.set("receiver", record.receiver.clone());
    args.set("timestamp", record.timestamp.clone());
    args.set("transaction_id", record.transaction_id.clone());
    i18n::t_args(lang, "slip-details", &args)
}
