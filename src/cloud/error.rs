use thiserror::Error;

use crate::storage::StorageError;

pub const EMPTY_INPUT_MESSAGE: &str = "Please provide text to generate a word cloud";

pub type CloudResult<T> = std::result::Result<T, CloudError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudErrorKind {
    Validation,
    Network,
    Unexpected,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CloudError {
    #[error("{}", EMPTY_INPUT_MESSAGE)]
    EmptyInput,
    #[error("Network response was not ok")]
    HttpStatus { status: u16 },
    #[error("network request failed: {message}")]
    Transport { message: String },
    #[error("unexpected response: {message}")]
    Unexpected { message: String },
}

impl CloudError {
    pub fn kind(&self) -> CloudErrorKind {
        match self {
            Self::EmptyInput => CloudErrorKind::Validation,
            Self::HttpStatus { .. } | Self::Transport { .. } => CloudErrorKind::Network,
            Self::Unexpected { .. } => CloudErrorKind::Unexpected,
        }
    }
}

impl From<StorageError> for CloudError {
    fn from(err: StorageError) -> Self {
        Self::Unexpected {
            message: err.to_string(),
        }
    }
}
