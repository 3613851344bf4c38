//! Error types for the frontend bundle

/// Errors that can occur while hydrating a page
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Missing backend context when backend context is required")]
    MissingContext,

    #[error("Missing static path in backend context")]
    MissingStaticPath,

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("DOM error: {0}")]
    Dom(String),
}

impl Error {
    /// Wraps an opaque browser-side failure.
    pub fn dom(message: impl Into<String>) -> Self {
        Error::Dom(message.into())
    }
}

/// Result type alias for frontend operations
pub type Result<T> = std::result::Result<T, Error>;
