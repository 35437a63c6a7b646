use anyhow::Context;
use clap::Parser;
use colored::*;
use github_repo_crawler::cli::Cli;
use github_repo_crawler::collector::Collector;
use github_repo_crawler::config::CredentialStore;
use github_repo_crawler::error::CrawlerError;
use github_repo_crawler::github::GitHubClient;
use github_repo_crawler::models::{CollectionRequest, CollectionStatus};
use tokio::sync::watch;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    println!("{}", "GitHub Repo Crawler".bold().green());
    println!("{}\n", "=".repeat(50).dimmed());

    let store = CredentialStore::new(cli.config.clone());
    let saved_token = match store.load() {
        Ok(token) => token,
        Err(e) => {
            warn!(path = %store.path().display(), "Ignoring unreadable credential file: {}", e);
            None
        }
    };

    let token = cli.token.clone().or(saved_token).unwrap_or_default();
    let request = CollectionRequest::new(
        token.clone(),
        cli.keyword.clone(),
        cli.count,
        cli.output_dir.clone(),
    );

    if let Err(e) = request.validate() {
        print_status(&CollectionStatus::Failed(e.to_string()));
        std::process::exit(2);
    }

    store
        .apply(cli.credential_preference(), &token)
        .with_context(|| format!("Failed to update {}", store.path().display()))?;

    let client = GitHubClient::with_base_url(&cli.api_url)
        .context("Failed to create GitHub client")?;
    let collector = Collector::new(client);

    let (status_tx, mut status_rx) = watch::channel(CollectionStatus::Ready);
    print_status(&status_rx.borrow_and_update());

    let handle = collector.submit(request, status_tx);

    // The channel also closes if the background task dies without reporting
    while status_rx.changed().await.is_ok() {
        let status = status_rx.borrow_and_update().clone();
        print_status(&status);
        if status.is_finished() {
            break;
        }
    }

    match handle.await {
        Ok(Ok(_)) => Ok(()),
        // Already reported through the status channel
        Ok(Err(_)) => std::process::exit(1),
        Err(e) => {
            let message = CrawlerError::Task(e.to_string()).to_string();
            print_status(&CollectionStatus::Failed(message));
            std::process::exit(1);
        }
    }
}

fn print_status(status: &CollectionStatus) {
    let line = status.to_string();
    match status {
        CollectionStatus::Ready => println!("{}", line.dimmed()),
        CollectionStatus::Fetching => println!("{}", line.blue()),
        CollectionStatus::Completed(_) => println!("✅ {}", line.green()),
        CollectionStatus::Failed(_) => eprintln!("❌ {}", line.red()),
    }
}
