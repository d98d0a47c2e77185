/// Result alias that carries the custom [`KeepsakeError`] type.
pub type Result<T> = std::result::Result<T, KeepsakeError>;

/// Error type for the core crate.
///
/// Only the loading boundary (content, configuration, scripts) produces
/// errors. Sequencing problems such as a stale timer or an advance past the
/// finale are reported as [`crate::Transition`] outcomes instead and never
/// reach the viewer.
#[derive(Debug, thiserror::Error)]
pub enum KeepsakeError {
    /// Problem with a document that parsed but cannot be used, such as an
    /// empty playback script.
    #[error("{0}")]
    Message(String),
    /// A configuration or content value was rejected during validation.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// A JSON document could not be decoded.
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}

impl KeepsakeError {
    /// Wraps a free-form message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}
