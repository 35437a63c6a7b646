use crate::error::{CrawlerError, Result};
use crate::types::GitHubRepo;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One repository found by the search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub url: String,
    pub stars: u64,
    pub forks: u64,
    /// Kept in memory only, never exported
    pub language: Option<String>,
}

impl From<GitHubRepo> for SearchRecord {
    fn from(repo: GitHubRepo) -> Self {
        SearchRecord {
            name: repo.name,
            full_name: repo.full_name,
            description: repo.description,
            url: repo.html_url,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            language: repo.language,
        }
    }
}

/// Inputs for a single collection run, captured by value when the run starts
#[derive(Clone)]
pub struct CollectionRequest {
    pub credential: String,
    pub keyword: String,
    pub count: usize,
    pub destination: PathBuf,
}

impl fmt::Debug for CollectionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionRequest")
            .field("credential", &"[REDACTED]")
            .field("keyword", &self.keyword)
            .field("count", &self.count)
            .field("destination", &self.destination)
            .finish()
    }
}

impl CollectionRequest {
    pub fn new(
        credential: impl Into<String>,
        keyword: impl Into<String>,
        count: usize,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            credential: credential.into(),
            keyword: keyword.into(),
            count,
            destination: destination.into(),
        }
    }

    /// Rejects the request before any network or filesystem access
    pub fn validate(&self) -> Result<()> {
        if self.credential.trim().is_empty() {
            return Err(CrawlerError::Validation("GitHub token is required".to_string()));
        }
        if self.keyword.trim().is_empty() {
            return Err(CrawlerError::Validation("Search keyword is required".to_string()));
        }
        if self.count == 0 {
            return Err(CrawlerError::Validation(
                "Count must be a positive integer".to_string(),
            ));
        }
        if self.destination.as_os_str().is_empty() {
            return Err(CrawlerError::Validation(
                "Destination directory is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub record_count: usize,
    pub output_path: PathBuf,
}

/// Status of a collection run as shown to the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionStatus {
    Ready,
    Fetching,
    Completed(CollectionSummary),
    Failed(String),
}

impl CollectionStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, CollectionStatus::Completed(_) | CollectionStatus::Failed(_))
    }
}

impl fmt::Display for CollectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionStatus::Ready => write!(f, "Ready"),
            CollectionStatus::Fetching => write!(f, "Fetching..."),
            CollectionStatus::Completed(summary) => write!(
                f,
                "Done! Saved {} repositories to: {}",
                summary.record_count,
                summary.output_path.display()
            ),
            CollectionStatus::Failed(message) => write!(f, "Error: {}", message),
        }
    }
}
