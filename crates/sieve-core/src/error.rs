use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid canonical field: {0}")]
    InvalidFieldName(String),

    #[error("Invalid name parsing mode: {0}")]
    InvalidNameMode(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
