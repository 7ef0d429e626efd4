use crate::errors::GhClipError;
use crate::github::{RepoRef, DEFAULT_API_BASE};
use crate::session::default_session_path;
use std::path::PathBuf;

/// Settings resolved from flags and environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub user: Option<String>,
    pub token: Option<String>,
    pub api_base: String,
    pub session_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            user: None,
            token: None,
            api_base: DEFAULT_API_BASE.to_owned(),
            session_path: default_session_path(),
        }
    }
}

impl Config {
    pub fn require_user(&self) -> Result<&str, GhClipError> {
        self.user
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| {
                GhClipError::ConfigError("no GitHub user configured (use --user or GHCLIP_USER)".to_owned())
            })
    }

    pub fn repo_ref(&self, input: &str) -> Result<RepoRef, GhClipError> {
        RepoRef::parse(input, self.user.as_deref().filter(|u| !u.is_empty()))
    }
}
