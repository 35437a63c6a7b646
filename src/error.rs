use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlerError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("GitHub API request failed with status {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("Filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl From<csv::Error> for CrawlerError {
    fn from(err: csv::Error) -> Self {
        CrawlerError::Filesystem(err.into())
    }
}

pub type Result<T> = std::result::Result<T, CrawlerError>;
