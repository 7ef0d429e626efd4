use crate::errors::GhClipError;
use crate::selection::SelectionSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs as async_fs;
use tracing::{debug, info};

/// Per-user state carried between invocations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    /// Keyed by `owner/repo`.
    pub selections: BTreeMap<String, SelectionSet>,
    /// Expanded folder paths, keyed by `owner/repo`.
    pub expanded: BTreeMap<String, Vec<String>>,
    pub show_folders: bool,
    pub show_content: bool,
    pub show_intro: bool,
}

impl Session {
    pub fn selection(&self, repo_key: &str) -> Option<&SelectionSet> {
        self.selections.get(repo_key)
    }

    pub fn selection_mut(&mut self, repo_key: &str) -> &mut SelectionSet {
        self.selections.entry(repo_key.to_owned()).or_default()
    }

    pub fn is_expanded(&self, repo_key: &str, folder: &str) -> bool {
        self.expanded
            .get(repo_key)
            .is_some_and(|folders| folders.iter().any(|f| f == folder))
    }

    pub fn expand(&mut self, repo_key: &str, folder: &str) {
        let folders = self.expanded.entry(repo_key.to_owned()).or_default();
        if !folders.iter().any(|f| f == folder) {
            folders.push(folder.to_owned());
        }
    }

    pub fn collapse(&mut self, repo_key: &str, folder: &str) {
        if let Some(folders) = self.expanded.get_mut(repo_key) {
            folders.retain(|f| f != folder);
        }
    }

    /// Loads the session at `path`; a missing file yields a fresh session.
    pub async fn load(path: &Path) -> Result<Self, GhClipError> {
        match async_fs::read_to_string(path).await {
            Ok(raw) => {
                let session = serde_json::from_str(&raw)
                    .map_err(|e| GhClipError::SessionError(format!("{}: {}", path.display(), e)))?;
                debug!("Loaded session from {}", path.display());
                Ok(session)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No session at {}, starting fresh", path.display());
                Ok(Session::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn save(&self, path: &Path) -> Result<(), GhClipError> {
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }
        let raw = serde_json::to_string_pretty(self)?;
        async_fs::write(path, raw).await?;
        debug!("Saved session to {}", path.display());
        Ok(())
    }

    pub async fn reset(path: &Path) -> Result<(), GhClipError> {
        match async_fs::remove_file(path).await {
            Ok(()) => {
                info!("Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

pub fn default_session_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ghclip")
        .join("session.json")
}
