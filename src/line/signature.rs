use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Header LINE uses to sign webhook bodies
pub const SIGNATURE_HEADER: &str = "x-line-signature";

#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("channel secret is not configured")]
    NoSecret,

    #[error("signature is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("signature does not match request body")]
    Mismatch,
}

fn mac_for(channel_secret: &str, body: &[u8]) -> Result<HmacSha256, SignatureError> {
    if channel_secret.is_empty() {
        return Err(SignatureError::NoSecret);
    }
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes()).map_err(|_| SignatureError::NoSecret)?;
    mac.update(body);
    Ok(mac)
}

/// Computes `base64(HMAC-SHA256(channel_secret, body))`
pub fn sign(channel_secret: &str, body: &[u8]) -> Result<String, SignatureError> {
    let mac = mac_for(channel_secret, body)?;
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Validates the `X-Line-Signature` header against the raw request body.
///
/// Comparison is constant-time.
pub fn verify_signature(channel_secret: &str, body: &[u8], signature: &str) -> Result<(), SignatureError> {
    let expected = STANDARD.decode(signature.trim())?;
    mac_for(channel_secret, body)?
        .verify_slice(&expected)
        .map_err(|_| SignatureError::Mismatch)
}
