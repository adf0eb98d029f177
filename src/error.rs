//! Error types for the memobot responder.

/// Top-level error type for the responder and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    /// Configuration load/save error.
    #[error("config error: {0}")]
    Config(String),

    /// Fact persistence error (load or write-through flush).
    #[error("storage error: {0}")]
    Storage(String),

    /// FAQ catalog load/save error.
    #[error("faq error: {0}")]
    Faq(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, BotError>;
