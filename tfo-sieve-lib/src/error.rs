use thiserror::Error;

/// Errors that can occur while loading, attributing or classifying a run
#[derive(Error, Debug)]
pub enum SieveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Attribution oracle error: {0}")]
    Oracle(String),

    #[error("Attribution oracle timed out for {addr}")]
    OracleTimeout { addr: String },

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid prefix: {0}")]
    InvalidPrefix(String),
}

impl From<reqwest::Error> for SieveError {
    fn from(err: reqwest::Error) -> Self {
        SieveError::Oracle(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SieveError>;
