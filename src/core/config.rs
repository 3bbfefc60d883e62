//! Configuration for the bot, read from the environment once on first access.
//!
//! `main` loads `.env` (via dotenvy) before any of these are touched.

use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// LINE channel secret used to verify the `X-Line-Signature` header
/// Read from LINE_CHANNEL_SECRET environment variable
pub static LINE_CHANNEL_SECRET: Lazy<String> =
    Lazy::new(|| env::var("LINE_CHANNEL_SECRET").unwrap_or_else(|_| String::new()));

/// LINE channel access token used for reply and content requests
/// Read from LINE_CHANNEL_TOKEN environment variable
pub static LINE_CHANNEL_TOKEN: Lazy<String> =
    Lazy::new(|| env::var("LINE_CHANNEL_TOKEN").unwrap_or_else(|_| String::new()));

/// Base URL of the LINE Messaging API (reply endpoint)
/// Default: https://api.line.me
pub static LINE_API_BASE: Lazy<String> =
    Lazy::new(|| env::var("LINE_API_BASE").unwrap_or_else(|_| "https://api.line.me".to_string()));

/// Base URL of the LINE data API (message content endpoint)
/// Default: https://api-data.line.me
pub static LINE_DATA_API_BASE: Lazy<String> =
    Lazy::new(|| env::var("LINE_DATA_API_BASE").unwrap_or_else(|_| "https://api-data.line.me".to_string()));

/// Port for the webhook server
/// Read from PORT environment variable, default 8080
pub static PORT: Lazy<u16> = Lazy::new(|| {
    env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080)
});

/// Base URL of the transaction lookup service; the decoded token is appended
/// as the final path segment
pub static LOOKUP_BASE_URL: Lazy<String> = Lazy::new(|| {
    env::var("LOOKUP_BASE_URL").unwrap_or_else(|_| "https://fast888.co/api/get_tr_detail".to_string())
});

/// SQLite file for persistent membership
/// Read from MEMBERSHIP_DB_PATH; when unset, members are kept in memory and lost on restart
pub static MEMBERSHIP_DB_PATH: Lazy<Option<String>> =
    Lazy::new(|| env::var("MEMBERSHIP_DB_PATH").ok().filter(|p| !p.is_empty()));

/// Language of every reply the bot sends
/// Read from BOT_LANGUAGE, default "th"
pub static BOT_LANGUAGE: Lazy<String> =
    Lazy::new(|| env::var("BOT_LANGUAGE").unwrap_or_else(|_| "th".to_string()));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: app.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "app.log".to_string()));

/// Network configuration
pub mod network {
    use super::Duration;

    /// Timeout for the transaction lookup (in seconds)
    pub const LOOKUP_TIMEOUT_SECS: u64 = 5;

    /// Timeout for downloading the slip image (in seconds)
    pub const CONTENT_TIMEOUT_SECS: u64 = 15;

    /// Timeout for reply delivery (in seconds)
    pub const REPLY_TIMEOUT_SECS: u64 = 10;

    /// Lookup timeout duration
    pub fn lookup_timeout() -> Duration {
        Duration::from_secs(LOOKUP_TIMEOUT_SECS)
    }

    /// Image download timeout duration
    pub fn content_timeout() -> Duration {
        Duration::from_secs(CONTENT_TIMEOUT_SECS)
    }

    /// Reply timeout duration
    pub fn reply_timeout() -> Duration {
        Duration::from_secs(REPLY_TIMEOUT_SECS)
    }
}

/// Database configuration
pub mod database {
    use super::Duration;

    /// Maximum number of pooled SQLite connections
    pub const MAX_POOL_SIZE: u32 = 8;

    /// How long a writer waits for the SQLite lock before giving up (in seconds)
    pub const BUSY_TIMEOUT_SECS: u64 = 5;

    /// Busy timeout duration
    pub fn busy_timeout() -> Duration {
        Duration::from_secs(BUSY_TIMEOUT_SECS)
    }
}

/// Upper bound on a slip image we are willing to buffer (10 MiB)
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;
