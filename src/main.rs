use anyhow::Result;
use dotenvy::dotenv;
use std::path::Path;
use std::sync::Arc;

use slipcheck::cli::{Cli, Commands};
use slipcheck::core::{config, init_logger, log_startup_configuration, web_server};
use slipcheck::i18n;
use slipcheck::line::{webhook_routes, LineClient, WebhookState};
use slipcheck::membership::{InMemoryMembership, MembershipOracle, SqliteMembership};
use slipcheck::pipeline::{
    compose, EventRouter, HttpVerificationResolver, QrSlipDecoder, RouterDeps, SlipDecoder, VerificationResolver,
};
use slipcheck::storage::create_pool;

/// Main entry point
///
/// Parses CLI arguments and dispatches to the appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, credentials, database).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Log panics from event tasks instead of losing them on stderr
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
        if let Some(msg) = panic_info.payload().downcast_ref::<&str>() {
            log::error!("Panic message: {}", msg);
        }
    }));

    // Load environment variables from .env if present
    let _ = dotenv();

    init_logger(&config::LOG_FILE_PATH)?;

    match cli.command {
        Some(Commands::Run { port }) => run_bot(port.unwrap_or(*config::PORT)).await,
        Some(Commands::Decode { path }) => run_decode(&path),
        Some(Commands::Lookup { token, lang }) => run_lookup(&token, lang.as_deref()).await,
        None => {
            log::info!("No command specified, running bot in default mode");
            run_bot(*config::PORT).await
        }
    }
}

/// Serve the webhook until Ctrl+C
async fn run_bot(port: u16) -> Result<()> {
    log_startup_configuration();

    if config::LINE_CHANNEL_SECRET.is_empty() {
        return Err(anyhow::anyhow!("LINE_CHANNEL_SECRET environment variable not set"));
    }

    let line = Arc::new(LineClient::from_env()?);
    let membership = create_membership()?;
    let resolver = HttpVerificationResolver::new(&config::LOOKUP_BASE_URL, config::network::lookup_timeout())?;

    let deps = RouterDeps {
        membership,
        retriever: line.clone(),
        decoder: Arc::new(QrSlipDecoder::new()),
        resolver: Arc::new(resolver),
        replier: line,
    };
    let router = Arc::new(EventRouter::new(deps, i18n::lang_from_code(&config::BOT_LANGUAGE)));

    let app = webhook_routes(WebhookState::new(router, &config::LINE_CHANNEL_SECRET));
    web_server::start_web_server(port, app)
        .await
        .map_err(|e| anyhow::anyhow!("Web server failed: {}", e))
}

/// SQLite when MEMBERSHIP_DB_PATH is set, otherwise an in-memory set
fn create_membership() -> Result<Arc<dyn MembershipOracle>> {
    match config::MEMBERSHIP_DB_PATH.as_deref() {
        Some(path) => {
            let pool = create_pool(path).map_err(|e| anyhow::anyhow!("Failed to create database pool: {}", e))?;
            Ok(Arc::new(SqliteMembership::new(Arc::new(pool))))
        }
        None => Ok(Arc::new(InMemoryMembership::new())),
    }
}

/// Decode a slip image from disk
fn run_decode(path: &Path) -> Result<()> {
    let bytes = std::fs::read(path).map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    let token = QrSlipDecoder::new().decode(&bytes)?;
    println!("{}", token);
    Ok(())
}

/// Resolve a token and print the reply the bot would send
async fn run_lookup(token: &str, lang: Option<&str>) -> Result<()> {
    let resolver = HttpVerificationResolver::new(&config::LOOKUP_BASE_URL, config::network::lookup_timeout())?;
    let outcome = resolver.resolve(token).await;
    let lang = i18n::lang_from_code(lang.unwrap_or(&config::BOT_LANGUAGE));

    log::info!("Lookup outcome: {}", outcome.label());
    println!("{}", compose(&lang, &outcome));
    Ok(())
}
