use hierscope_api::ReaderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HierscopeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Reader error: {0}")]
    Reader(#[from] ReaderError),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, HierscopeError>;
