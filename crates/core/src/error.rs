/// Result alias that carries the custom [`EqualizerError`] type.
pub type Result<T> = std::result::Result<T, EqualizerError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum EqualizerError {
    /// Free-form message, mostly used for lock poisoning and CLI plumbing.
    #[error("{0}")]
    Message(String),
    /// The caller handed over input that breaks a function contract.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Projection needs a strictly positive, finite viewport.
    #[error("invalid viewport {width}x{height}: both dimensions must be positive and finite")]
    InvalidViewport { width: f32, height: f32 },
    /// Wrapper around configuration parsing failures.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl EqualizerError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}

impl From<&str> for EqualizerError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for EqualizerError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
