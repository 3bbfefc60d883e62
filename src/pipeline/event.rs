//! Normalized inbound events, independent of the chat platform's wire format.

/// Where the slip image lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// Content hosted by the chat platform, fetched by message id
    Platform { message_id: String },
    /// Content hosted elsewhere, fetched from the given URL
    External { url: String },
}

/// What happened, with the kind-specific payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// The user added the bot account as a friend
    Follow,
    /// Any text message; commands are recognised by the router
    TextCommand(String),
    /// An image the user wants verified
    ImageSubmission(ImageRef),
    /// Anything else; carries the platform's event type for logging
    Other(String),
}

/// One event delivered by the transport, consumed once by the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub user_id: String,
    /// Single-use token needed to reply; absent for events that cannot be answered
    pub reply_token: Option<String>,
    pub kind: EventKind,
}

impl InboundEvent {
    pub fn new(user_id: impl Into<String>, reply_token: Option<String>, kind: EventKind) -> Self {
        Self {
            user_id: user_id.into(),
            reply_token,
            kind,
        }
    }

    /// Label used for metrics and logs
    pub fn kind_label(&self) -> &'static str {
        match self.kind {
            EventKind::Follow => "follow",
            EventKind::TextCommand(_) => "text",
            EventKind::ImageSubmission(_) => "image",
            EventKind::Other(_) => "other",
        }
    }
}
