use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_CONFIG_FILE: &str = "github_crawler.cfg";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialPreference {
    Remember,
    Forget,
    Unchanged,
}

impl CredentialPreference {
    pub fn from_flags(remember: bool, forget: bool) -> Self {
        match (remember, forget) {
            (true, _) => CredentialPreference::Remember,
            (false, true) => CredentialPreference::Forget,
            (false, false) => CredentialPreference::Unchanged,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct SavedCredential {
    token: String,
}

/// Local JSON file holding the remembered GitHub token
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_FILE)
    }
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<String>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let saved: SavedCredential = serde_json::from_str(&contents)?;
        debug!(path = %self.path.display(), "Loaded saved credential");
        Ok(Some(saved.token).filter(|token| !token.is_empty()))
    }

    pub fn save(&self, token: &str) -> Result<()> {
        let json = serde_json::to_string(&SavedCredential {
            token: token.to_string(),
        })?;
        fs::write(&self.path, json)?;
        info!(path = %self.path.display(), "Saved credential");
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "Removed saved credential");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn apply(&self, preference: CredentialPreference, token: &str) -> Result<()> {
        match preference {
            CredentialPreference::Remember => self.save(token),
            CredentialPreference::Forget => self.clear(),
            CredentialPreference::Unchanged => Ok(()),
        }
    }
}
