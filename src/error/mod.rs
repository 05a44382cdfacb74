use thiserror::Error;

/// Application-level errors
///
/// The pipeline core is total: it never errors for any input string.
/// These variants belong to the boundary around it - configuration
/// loading, input length enforcement, and export file writes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration loading or parsing failed.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong.
        message: String,
    },

    /// The request was rejected at the boundary.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What was rejected and why.
        message: String,
    },

    /// An export file write failed.
    #[error("Export I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;
