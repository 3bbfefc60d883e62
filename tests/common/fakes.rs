//! Recording fakes for the pipeline traits

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use slipcheck::pipeline::{
    DecodeError, ImageRef, ImageRetriever, ReplySender, SlipDecoder, VerificationOutcome, VerificationResolver,
};
use slipcheck::{AppError, AppResult};

/// Records every reply instead of sending it
#[derive(Default)]
pub struct RecordingReplier {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingReplier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A replier whose deliveries always fail (after recording them)
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, text)| text).collect()
    }
}

#[async_trait]
impl ReplySender for RecordingReplier {
    async fn reply(&self, reply_token: &str, text: &str) -> AppResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((reply_token.to_string(), text.to_string()));
        if self.fail {
            return Err(AppError::Validation("reply token expired".to_string()));
        }
        Ok(())
    }
}

/// Returns fixed bytes (or fails) and counts how often it was asked
pub struct CountingRetriever {
    calls: AtomicUsize,
    bytes: Option<Vec<u8>>,
}

impl CountingRetriever {
    pub fn returning(bytes: Vec<u8>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            bytes: Some(bytes),
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            bytes: None,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageRetriever for CountingRetriever {
    async fn fetch(&self, _image: &ImageRef) -> AppResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.bytes
            .clone()
            .ok_or_else(|| AppError::Validation("content expired".to_string()))
    }
}

/// Decodes every image to the same token, or finds nothing
pub struct StubDecoder {
    token: Option<String>,
}

impl StubDecoder {
    pub fn token(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
        }
    }

    pub fn nothing() -> Self {
        Self { token: None }
    }
}

impl SlipDecoder for StubDecoder {
    fn decode(&self, _image: &[u8]) -> Result<String, DecodeError> {
        self.token.clone().ok_or(DecodeError::NoSymbol)
    }
}

/// Answers every token with the same outcome and remembers the tokens
pub struct FixedResolver {
    outcome: VerificationOutcome,
    tokens: Mutex<Vec<String>>,
}

impl FixedResolver {
    pub fn new(outcome: VerificationOutcome) -> Self {
        Self {
            outcome,
            tokens: Mutex::new(Vec::new()),
        }
    }

    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl VerificationResolver for FixedResolver {
    async fn resolve(&self, token: &str) -> VerificationOutcome {
        self.tokens.lock().unwrap().push(token.to_string());
        self.outcome.clone()
    }
}
