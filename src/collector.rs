use crate::error::Result;
use crate::export;
use crate::github::{PageQuery, SearchSource};
use crate::models::{CollectionRequest, CollectionStatus, CollectionSummary, SearchRecord};
use crate::paginate::collect_paginated;
use chrono::Local;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// GitHub's default search page size
pub const PAGE_SIZE: u32 = 30;

/// Runs keyword searches against a `SearchSource` and exports the results
pub struct Collector<S> {
    source: Arc<S>,
}

impl<S> Clone for Collector<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S: SearchSource + 'static> Collector<S> {
    pub fn new(source: S) -> Self {
        Self::from_shared(Arc::new(source))
    }

    pub fn from_shared(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Collects up to `request.count` records and writes them to a CSV file in
    /// `request.destination`. Nothing is written unless every page succeeds.
    pub async fn run(&self, request: CollectionRequest) -> Result<CollectionSummary> {
        request.validate()?;

        info!(
            keyword = %request.keyword,
            count = request.count,
            destination = %request.destination.display(),
            "Starting collection"
        );

        let records = self.collect(&request).await?;
        let output_path = export::write_csv(&request.destination, &records, &Local::now())?;

        info!(
            records = records.len(),
            path = %output_path.display(),
            "Collection complete"
        );

        Ok(CollectionSummary {
            record_count: records.len(),
            output_path,
        })
    }

    async fn collect(&self, request: &CollectionRequest) -> Result<Vec<SearchRecord>> {
        let source = self.source.as_ref();
        let credential = request.credential.as_str();
        let keyword = request.keyword.as_str();

        let repos = collect_paginated(request.count, PAGE_SIZE as usize, |page| async move {
            let query = PageQuery {
                credential,
                keyword,
                page,
                per_page: PAGE_SIZE,
            };
            source.search_page(&query).await
        })
        .await?;

        Ok(repos.into_iter().map(SearchRecord::from).collect())
    }

    /// Runs the collection on a background task, publishing progress to `status`.
    /// The request is owned by the task, so later edits by the caller cannot
    /// affect a run already in flight.
    pub fn submit(
        &self,
        request: CollectionRequest,
        status: watch::Sender<CollectionStatus>,
    ) -> JoinHandle<Result<CollectionSummary>> {
        let collector = self.clone();

        tokio::spawn(async move {
            if let Err(e) = request.validate() {
                status.send_replace(CollectionStatus::Failed(e.to_string()));
                return Err(e);
            }

            status.send_replace(CollectionStatus::Fetching);

            let result = collector.run(request).await;
            match &result {
                Ok(summary) => {
                    status.send_replace(CollectionStatus::Completed(summary.clone()));
                }
                Err(e) => {
                    error!("Collection failed: {}", e);
                    status.send_replace(CollectionStatus::Failed(e.to_string()));
                }
            }
            result
        })
    }
}
