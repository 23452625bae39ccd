use thiserror::Error;

/// Main error type for sqlts
///
/// The generation engine itself never fails; these errors come from the
/// layers around it (loading snapshots, reading config, writing output).
#[derive(Error, Debug)]
pub enum SqltsError {
    #[error("Schema error: {message}")]
    Schema { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Output error: {message}")]
    Output { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SqltsError {
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema { message: message.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn output(message: impl Into<String>) -> Self {
        Self::Output { message: message.into() }
    }
}

pub type Result<T> = std::result::Result<T, SqltsError>;
