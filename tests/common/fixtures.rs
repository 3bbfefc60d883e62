//! Test fixtures: slip images, lookup bodies and a wired-up router

use std::io::Cursor;
use std::sync::Arc;

use image::{GrayImage, ImageFormat, Luma};
use serde_json::json;
use slipcheck::i18n::lang_from_code;
use slipcheck::pipeline::{EventRouter, RouterDeps, SlipDecoder, VerificationResolver};
use slipcheck::InMemoryMembership;

use super::fakes::{CountingRetriever, RecordingReplier};

/// Renders `payload` as a PNG QR code with a quiet zone
pub fn qr_png(payload: &str) -> Vec<u8> {
    let code = qrcode::QrCode::new(payload.as_bytes()).unwrap();
    let modules = code.width() as u32;
    let colors = code.to_colors();
    let (scale, quiet) = (8u32, 4u32);
    let side = (modules + 2 * quiet) * scale;

    let img = GrayImage::from_fn(side, side, |x, y| {
        let (mx, my) = (x / scale, y / scale);
        let inside = (quiet..quiet + modules).contains(&mx) && (quiet..quiet + modules).contains(&my);
        if inside && colors[((my - quiet) * modules + (mx - quiet)) as usize] == qrcode::Color::Dark {
            Luma([0])
        } else {
            Luma([255])
        }
    });

    let mut buf = Vec::new();
    image::DynamicImage::ImageLuma8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

/// The lookup body used throughout the tests
pub fn sample_record_json() -> serde_json::Value {
    json!({
        "amount": "500.00",
        "from_bank": "X",
        "sender": "A",
        "receiver": "B",
        "timestamp": "T",
        "transaction_id": "TX1"
    })
}

/// A router wired to in-memory membership and recording fakes
pub struct TestEnvironment {
    pub membership: Arc<InMemoryMembership>,
    pub retriever: Arc<CountingRetriever>,
    pub replier: Arc<RecordingReplier>,
    pub router: Arc<EventRouter>,
}

impl TestEnvironment {
    pub fn new(
        retriever: CountingRetriever,
        decoder: impl SlipDecoder + 'static,
        resolver: impl VerificationResolver + 'static,
    ) -> Self {
        Self::with_replier(retriever, decoder, resolver, RecordingReplier::new())
    }

    pub fn with_replier(
        retriever: CountingRetriever,
        decoder: impl SlipDecoder + 'static,
        resolver: impl VerificationResolver + 'static,
        replier: RecordingReplier,
    ) -> Self {
        let membership = Arc::new(InMemoryMembership::new());
        let retriever = Arc::new(retriever);
        let replier = Arc::new(replier);

        let deps = RouterDeps {
            membership: membership.clone(),
            retriever: retriever.clone(),
            decoder: Arc::new(decoder),
            resolver: Arc::new(resolver),
            replier: replier.clone(),
        };
        let router = Arc::new(EventRouter::new(deps, lang_from_code("th")));

        Self {
            membership,
            retriever,
            replier,
            router,
        }
    }
}
