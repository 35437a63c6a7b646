#![allow(dead_code)]

use async_trait::async_trait;
use github_repo_crawler::error::{CrawlerError, Result};
use github_repo_crawler::github::{PageQuery, SearchSource};
use github_repo_crawler::types::GitHubRepo;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub fn make_repo(index: usize, stars: u64) -> GitHubRepo {
    GitHubRepo {
        name: format!("repo-{}", index),
        full_name: format!("owner/repo-{}", index),
        description: Some(format!("Repository number {}", index)),
        html_url: format!("https://github.com/owner/repo-{}", index),
        stargazers_count: stars,
        forks_count: index as u64,
        language: Some("Rust".to_string()),
    }
}

/// `count` repositories numbered from `first`, stars strictly descending
pub fn make_page(first: usize, count: usize) -> Vec<GitHubRepo> {
    (first..first + count)
        .map(|i| make_repo(i, 100_000 - i as u64))
        .collect()
}

pub enum FakePage {
    Items(Vec<GitHubRepo>),
    Status(u16, &'static str),
}

#[derive(Debug, Clone)]
pub struct RecordedQuery {
    pub credential: String,
    pub keyword: String,
    pub page: u32,
    pub per_page: u32,
}

/// In-memory search source that serves pre-built pages and records every query
pub struct FakeSource {
    pages: Vec<FakePage>,
    queries: Mutex<Vec<RecordedQuery>>,
}

impl FakeSource {
    pub fn new(pages: Vec<FakePage>) -> Arc<Self> {
        Arc::new(Self {
            pages,
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn queries(&self) -> Vec<RecordedQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn pages_requested(&self) -> Vec<u32> {
        self.queries().into_iter().map(|q| q.page).collect()
    }
}

#[async_trait]
impl SearchSource for FakeSource {
    async fn search_page(&self, query: &PageQuery<'_>) -> Result<Vec<GitHubRepo>> {
        self.queries.lock().unwrap().push(RecordedQuery {
            credential: query.credential.to_string(),
            keyword: query.keyword.to_string(),
            page: query.page,
            per_page: query.per_page,
        });

        match self.pages.get(query.page as usize - 1) {
            Some(FakePage::Items(items)) => Ok(items.clone()),
            Some(FakePage::Status(status, body)) => Err(CrawlerError::Remote {
                status: *status,
                body: body.to_string(),
            }),
            None => Ok(Vec::new()),
        }
    }
}

pub fn csv_files_in(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .expect("Failed to read directory")
        .map(|entry| entry.expect("Failed to read entry").path())
        .filter(|path| path.extension().map_or(false, |ext| ext == "csv"))
        .collect();
    files.sort();
    files
}

/// Reads an exported CSV file, returning its data rows (header excluded)
pub fn read_rows(path: &Path) -> Vec<csv::StringRecord> {
    let bytes = std::fs::read(path).expect("Failed to read CSV");
    let body = bytes
        .strip_prefix(b"\xEF\xBB\xBF".as_slice())
        .expect("CSV is missing the UTF-8 BOM");
    let mut reader = csv::Reader::from_reader(body);
    reader
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()
        .expect("Failed to parse CSV")
}

/// Minimal HTTP/1.1 server that answers each connection with the next queued
/// response and keeps the raw request heads for inspection.
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    pub async fn start(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub server");
        let addr = listener.local_addr().expect("Failed to read local address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let mut queue: VecDeque<(u16, String)> = responses.into();

        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut head = Vec::new();
                let mut buf = [0u8; 4096];
                loop {
                    let n = match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => n,
                    };
                    head.extend_from_slice(&buf[..n]);
                    if head.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                recorded
                    .lock()
                    .unwrap()
                    .push(String::from_utf8_lossy(&head).into_owned());

                let (status, body) = queue
                    .pop_front()
                    .unwrap_or_else(|| (200, r#"{"total_count":0,"incomplete_results":false,"items":[]}"#.to_string()));
                let response = format!(
                    "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

pub fn search_body(repos: &[GitHubRepo]) -> String {
    let items: Vec<serde_json::Value> = repos
        .iter()
        .map(|r| {
            serde_json::json!({
                "id": 1,
                "name": r.name,
                "full_name": r.full_name,
                "description": r.description,
                "html_url": r.html_url,
                "stargazers_count": r.stargazers_count,
                "forks_count": r.forks_count,
                "language": r.language,
                "private": false,
            })
        })
        .collect();
    serde_json::json!({
        "total_count": repos.len(),
        "incomplete_results": false,
        "items": items,
    })
    .to_string()
}
