//! LINE webhook payload, reduced to the fields the bot reads.

use serde::Deserialize;

use crate::pipeline::{EventKind, ImageRef, InboundEvent};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub reply_token: Option<String>,
    #[serde(default)]
    pub source: Option<EventSource>,
    #[serde(default)]
    pub message: Option<MessageContent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    /// "user", "group" or "room"
    #[serde(rename = "type", default)]
    pub source_type: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageContent {
    Text {
        id: String,
        text: String,
    },
    Image {
        id: String,
        #[serde(default, rename = "contentProvider")]
        content_provider: Option<ContentProvider>,
    },
    /// Stickers, video, audio, location, ...
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentProvider {
    /// "line" or "external"
    #[serde(rename = "type")]
    pub provider_type: String,
    #[serde(default)]
    pub original_content_url: Option<String>,
}

impl WebhookEvent {
    /// Maps the platform event onto the closed set the router understands.
    ///
    /// Events without a user id cannot be gated and become `Other`.
    pub fn into_inbound(self) -> InboundEvent {
        let user_id = self.source.and_then(|s| s.user_id);
        let Some(user_id) = user_id else {
            return InboundEvent::new(String::new(), self.reply_token, EventKind::Other(self.event_type));
        };

        let kind = match (self.event_type.as_str(), self.message) {
            ("follow", _) => EventKind::Follow,
            ("message", Some(MessageContent::Text { text, .. })) => EventKind::TextCommand(text),
            ("message", Some(MessageContent::Image { id, content_provider })) => {
                EventKind::ImageSubmission(image_ref(id, content_provider))
            }
            (other, _) => EventKind::Other(other.to_string()),
        };

        InboundEvent::new(user_id, self.reply_token, kind)
    }
}

fn image_ref(message_id: String, provider: Option<ContentProvider>) -> ImageRef {
    match provider {
        Some(ContentProvider {
            provider_type,
            original_content_url: Some(url),
        }) if provider_type == "external" => ImageRef::External { url },
        _ => ImageRef::Platform { message_id },
    }
}
