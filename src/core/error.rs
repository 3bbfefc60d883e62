use thiserror::Error;

/// Centralized error types for the application
///
/// Infrastructure failures (database, HTTP, background tasks) are converted into this enum.
/// Pipeline outcomes that the user sees are NOT errors; they are modelled by
/// [`crate::pipeline::VerificationOutcome`].
///
/// # Example
///
/// ```no_run
/// use slipcheck::core::error::AppError;
///
/// fn handle_error(err: AppError) {
///     log::error!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Database connection pool errors
    #[error("Database pool error: {0}")]
    DatabasePool(#[from] r2d2::Error),

    /// HTTP/Fetch errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP status code errors
    #[error("HTTP request failed with status: {0}")]
    HttpStatus(reqwest::StatusCode),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Blocking task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// Anyhow errors (for general error handling)
    #[error("Application error: {0}")]
    Anyhow(#[from] anyhow::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Short label used for metrics and log grouping
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Database(_) | AppError::DatabasePool(_) => "database",
            AppError::Http(_) | AppError::HttpStatus(_) => "http",
            AppError::Url(_) => "url",
            AppError::Join(_) => "task",
            AppError::Anyhow(_) => "other",
            AppError::Validation(_) => "validation",
        }
    }
}
