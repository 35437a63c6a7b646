use crate::config::{CredentialPreference, DEFAULT_CONFIG_FILE};
use crate::github::API_BASE_URL;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "github-repo-crawler")]
#[command(about = "GitHub Repo Crawler - Searches repositories by keyword and saves them as CSV")]
#[command(version)]
pub struct Cli {
    /// GitHub personal access token (falls back to the saved token)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Search keyword
    #[arg(short, long)]
    pub keyword: String,

    /// Number of repositories to collect
    #[arg(short = 'n', long, default_value_t = 30)]
    pub count: usize,

    /// Directory the CSV file is written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Remember the token for later runs
    #[arg(long, conflicts_with = "forget_token")]
    pub remember_token: bool,

    /// Delete any remembered token
    #[arg(long)]
    pub forget_token: bool,

    /// Path of the file holding the remembered token
    #[arg(long, env = "CRAWLER_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = API_BASE_URL)]
    pub api_url: String,
}

impl Cli {
    pub fn credential_preference(&self) -> CredentialPreference {
        CredentialPreference::from_flags(self.remember_token, self.forget_token)
    }
}
