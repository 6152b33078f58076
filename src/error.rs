use thiserror::Error;

/// Unified error type for the jog dial
#[derive(Error, Debug)]
pub enum DialError {
    #[error("Invalid configuration for `{field}`: {reason}")]
    Config { field: &'static str, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl DialError {
    /// Shorthand for a configuration rejection
    pub fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Config {
            field,
            reason: reason.into(),
        }
    }
}

pub type DialResult<T> = Result<T, DialError>;
