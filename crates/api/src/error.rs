#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Archive error in {path}: {message}")]
    Archive { path: String, message: String },
    #[error("Failed to decode {class}: {message}")]
    Decode { class: String, message: String },
}

impl ReaderError {
    pub fn decode(class: impl Into<String>, message: impl Into<String>) -> Self {
        ReaderError::Decode {
            class: class.into(),
            message: message.into(),
        }
    }

    pub fn archive(path: impl Into<String>, message: impl Into<String>) -> Self {
        ReaderError::Archive {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type ReadResult<T> = std::result::Result<T, ReaderError>;
