use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Backup failed: {0}")]
    Backup(String),

    #[error("Invalid argument '{field}': {message}")]
    InvalidArgument { field: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_argument(field: &str, message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Error::Backup(_) => "BACKUP_FAILED",
            Error::InvalidArgument { .. } => "INVALID_ARGUMENT",
            Error::Io(_) => "IO_ERROR",
            Error::Json(_) => "JSON_ERROR",
            Error::Pattern(_) => "PATTERN_ERROR",
            Error::Other(_) => "ERROR",
        }
    }
}
