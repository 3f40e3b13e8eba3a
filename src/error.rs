use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("import was cancelled before it finished")]
    Cancelled,

    #[error("import task panicked: {0}")]
    Panicked(String),
}

impl From<tokio::task::JoinError> for ImportError {
    fn from(err: tokio::task::JoinError) -> Self {
        if err.is_cancelled() {
            ImportError::Cancelled
        } else {
            ImportError::Panicked(err.to_string())
        }
    }
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubjectRecordError {
    #[error("graded subject is missing its score")]
    MissingScore,

    #[error("pending and in-progress subjects carry no score")]
    UnexpectedScore,

    #[error("isPrevious disagrees with status {status}")]
    PreviousMismatch { status: &'static str },
}
