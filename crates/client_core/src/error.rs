use reqwest::StatusCode;
use thiserror::Error;

/// Rejections raised before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select an option before continuing.")]
    UnansweredQuestion,
    #[error("That option is not available for this question.")]
    InvalidOption { option_index: usize, option_count: usize },
    #[error("There is no question to answer right now.")]
    NoActiveQuestion,
    #[error("Please answer every question before submitting.")]
    IncompleteAssessment { answered: usize, total: usize },
    #[error("Please upload a PDF, DOC, or DOCX file.")]
    UnsupportedFileType { mime_type: String },
    #[error("File size must be less than 5MB.")]
    FileTooLarge { size_bytes: usize },
    #[error("{field} is required.")]
    MissingField { field: &'static str },
    #[error("Complete the assessment to share your results.")]
    NoResultsToShare,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request timeout")]
    Timeout,
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{}", http_message(.status, .message))]
    Http {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("{0}")]
    Api(String),
    #[error("unexpected response from server: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A host capability (clipboard, browser hand-off) failed.
    #[error("{0:#}")]
    Platform(anyhow::Error),
}

fn http_message(status: &StatusCode, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!(
            "HTTP {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("request failed")
        ),
    }
}
