//! Event router: membership gate plus the retrieve → decode → resolve →
//! compose chain, producing at most one reply per event.

use std::sync::Arc;

use unic_langid::LanguageIdentifier;

use super::composer::compose;
use super::event::{EventKind, ImageRef, InboundEvent};
use super::outcome::VerificationOutcome;
use super::traits::{ImageRetriever, ReplySender, SlipDecoder, VerificationResolver};
use crate::core::metrics;
use crate::i18n;
use crate::membership::MembershipOracle;

/// Text command that enrolls the sender as a member
pub const JOIN_COMMAND: &str = "/join";

/// Collaborators the router drives. Everything is injected so the router can
/// be exercised without a live chat platform.
#[derive(Clone)]
pub struct RouterDeps {
    pub membership: Arc<dyn MembershipOracle>,
    pub retriever: Arc<dyn ImageRetriever>,
    pub decoder: Arc<dyn SlipDecoder>,
    pub resolver: Arc<dyn VerificationResolver>,
    pub replier: Arc<dyn ReplySender>,
}

pub struct EventRouter {
    deps: RouterDeps,
    lang: LanguageIdentifier,
}

impl EventRouter {
    pub fn new(deps: RouterDeps, lang: LanguageIdentifier) -> Self {
        Self { deps, lang }
    }

    /// Handles one event and sends its reply, if any.
    ///
    /// Delivery failures are logged and counted, never retried.
    pub async fn dispatch(&self, event: InboundEvent) {
        metrics::record_event(event.kind_label());

        let Some(text) = self.route(&event).await else {
            return;
        };

        let Some(reply_token) = event.reply_token.as_deref() else {
            log::warn!("No reply token on {} event from {}, dropping reply", event.kind_label(), event.user_id);
            return;
        };

        if let Err(e) = self.deps.replier.reply(reply_token, &text).await {
            metrics::record_reply_failure(e.category());
            log::error!("❌ Failed to send reply to {}: {}", event.user_id, e);
        }
    }

    /// Decides the reply for one event without sending it.
    ///
    /// Returns `None` for follow events and unrecognised event kinds.
    pub async fn route(&self, event: &InboundEvent) -> Option<String> {
        let user_id = event.user_id.as_str();

        match &event.kind {
            EventKind::Follow => {
                match self.deps.membership.add_member(user_id).await {
                    Ok(()) => log::info!("User {} followed the account and was added as a member", user_id),
                    Err(e) => log::error!("Failed to add follower {} as member: {}", user_id, e),
                }
                None
            }
            EventKind::TextCommand(text) if text.trim() == JOIN_COMMAND => Some(self.handle_join(user_id).await),
            EventKind::TextCommand(_) => {
                if self.deps.membership.is_member(user_id).await {
                    Some(self.t("send-slip-prompt"))
                } else {
                    log::info!("User {} is not a member", user_id);
                    Some(self.t("join-required"))
                }
            }
            EventKind::ImageSubmission(image) => {
                if !self.deps.membership.is_member(user_id).await {
                    log::info!("Ignoring slip from non-member {}", user_id);
                    return Some(self.t("join-required"));
                }
                Some(self.handle_slip(user_id, image).await)
            }
            EventKind::Other(kind) => {
                log::debug!("Ignoring {} event from {}", kind, user_id);
                None
            }
        }
    }

    async fn handle_join(&self, user_id: &str) -> String {
        if self.deps.membership.is_member(user_id).await {
            return self.t("join-already-member");
        }

        match self.deps.membership.add_member(user_id).await {
            Ok(()) => {
                log::info!("User {} joined", user_id);
                self.t("join-success")
            }
            Err(e) => {
                // The user can simply send /join again
                log::error!("Failed to add member {}: {}", user_id, e);
                self.t("join-required")
            }
        }
    }

    async fn handle_slip(&self, user_id: &str, image: &ImageRef) -> String {
        let bytes = match self.deps.retriever.fetch(image).await {
            Ok(bytes) => bytes,
            Err(e) => {
                log::error!("Failed to retrieve slip image from {}: {}", user_id, e);
                return self.t("slip-retrieval-failed");
            }
        };

        let outcome = match self.decode(bytes).await {
            Some(token) => {
                log::info!("Decoded slip token {} from {}", token, user_id);
                self.deps.resolver.resolve(&token).await
            }
            None => VerificationOutcome::DecodeFailed,
        };

        metrics::record_outcome(outcome.label());
        compose(&self.lang, &outcome)
    }

    /// Decodes on the blocking pool; any failure collapses to `None`
    async fn decode(&self, bytes: Vec<u8>) -> Option<String> {
        let decoder = Arc::clone(&self.deps.decoder);
        match tokio::task::spawn_blocking(move || decoder.decode(&bytes)).await {
            Ok(Ok(token)) => Some(token),
            Ok(Err(e)) => {
                log::info!("Slip decode failed: {}", e);
                None
            }
            Err(e) => {
                log::error!("Slip decode task failed: {}", e);
                None
            }
        }
    }

    fn t(&self, key: &str) -> String {
        i18n::t(&self.lang, key)
    }
}
