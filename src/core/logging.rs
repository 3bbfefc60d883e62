//! Logging initialization and startup diagnostics
//!
//! This module provides:
//! - Logger initialization (console + file)
//! - A one-shot summary of the runtime configuration

use anyhow::Result;
use simplelog::*;
use std::fs::File;

use crate::core::config;

/// Initialize logger for both console and file output
///
/// # Arguments
/// * `log_file_path` - Path to the log file
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to create the file or a logger was already set
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = File::create(log_file_path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs the effective configuration at startup.
///
/// Secrets are never printed, only whether they are present.
pub fn log_startup_configuration() {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("🧾 slipcheck configuration");
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if config::LINE_CHANNEL_SECRET.is_empty() {
        log::error!("❌ LINE_CHANNEL_SECRET: not set (every webhook call will be rejected)");
    } else {
        log::info!("✅ LINE_CHANNEL_SECRET: set");
    }

    if config::LINE_CHANNEL_TOKEN.is_empty() {
        log::error!("❌ LINE_CHANNEL_TOKEN: not set (replies and image downloads will fail)");
    } else {
        log::info!("✅ LINE_CHANNEL_TOKEN: set");
    }

    log::info!("🔎 Lookup service: {}", config::LOOKUP_BASE_URL.as_str());
    log::info!("🌐 Reply language: {}", config::BOT_LANGUAGE.as_str());

    match config::MEMBERSHIP_DB_PATH.as_deref() {
        Some(path) => log::info!("👥 Membership store: SQLite at {}", path),
        None => log::warn!("⚠️  Membership store: in-memory (members are lost on restart)"),
    }
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}
