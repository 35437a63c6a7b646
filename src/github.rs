use crate::error::{CrawlerError, Result};
use crate::types::{GitHubRepo, SearchResponse};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const API_BASE_URL: &str = "https://api.github.com";

/// One page of a keyword search, sorted by stars descending
#[derive(Debug, Clone, Copy)]
pub struct PageQuery<'a> {
    pub credential: &'a str,
    pub keyword: &'a str,
    pub page: u32,
    pub per_page: u32,
}

/// Anything that can answer a paginated repository search
#[async_trait]
pub trait SearchSource: Send + Sync {
    async fn search_page(&self, query: &PageQuery<'_>) -> Result<Vec<GitHubRepo>>;
}

pub struct GitHubClient {
    client: Client,
    search_url: Url,
}

impl GitHubClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(API_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("GitHub Repo Crawler/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;

        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let search_url = base.join("search/repositories")?;

        Ok(GitHubClient { client, search_url })
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    async fn make_request(&self, query: &PageQuery<'_>) -> Result<Response> {
        let response = self
            .client
            .get(self.search_url.clone())
            .query(&[
                ("q", query.keyword.to_string()),
                ("sort", "stars".to_string()),
                ("order", "desc".to_string()),
                ("page", query.page.to_string()),
                ("per_page", query.per_page.to_string()),
            ])
            .header("Accept", "application/vnd.github.v3+json")
            .header("Authorization", format!("token {}", query.credential))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(page = query.page, status = status.as_u16(), "Search request rejected");
        Err(CrawlerError::Remote {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl SearchSource for GitHubClient {
    async fn search_page(&self, query: &PageQuery<'_>) -> Result<Vec<GitHubRepo>> {
        let response = self.make_request(query).await?;
        let body = response.text().await?;
        let results: SearchResponse = serde_json::from_str(&body)?;

        if results.incomplete_results {
            warn!(page = query.page, "GitHub reported incomplete search results");
        }
        debug!(
            page = query.page,
            items = results.items.len(),
            total_count = results.total_count,
            "Fetched search page"
        );

        Ok(results.items)
    }
}
