use crate::errors::GhClipError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    File,
    Directory,
}

/// A file or directory entry returned by the contents listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryNode {
    pub path: String,
    pub name: String,
    pub kind: NodeKind,
    /// Present only for `NodeKind::File`.
    pub download_ref: Option<String>,
}

impl RepositoryNode {
    pub fn file(path: &str, download_ref: &str) -> Self {
        RepositoryNode {
            path: path.to_owned(),
            name: base_name(path).to_owned(),
            kind: NodeKind::File,
            download_ref: Some(download_ref.to_owned()),
        }
    }

    pub fn directory(path: &str) -> Self {
        RepositoryNode {
            path: path.to_owned(),
            name: base_name(path).to_owned(),
            kind: NodeKind::Directory,
            download_ref: None,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    pub fn is_directory(&self) -> bool {
        self.kind == NodeKind::Directory
    }
}

fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Raw entry of `GET /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ContentEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    #[serde(default)]
    pub download_url: Option<String>,
}

impl ContentEntry {
    /// Symlinks and submodules have no counterpart and are dropped.
    pub fn into_node(self) -> Option<RepositoryNode> {
        let kind = match self.entry_type.as_str() {
            "file" => NodeKind::File,
            "dir" => NodeKind::Directory,
            _ => return None,
        };
        let download_ref = match kind {
            NodeKind::File => self.download_url,
            NodeKind::Directory => None,
        };
        Some(RepositoryNode {
            path: self.path,
            name: self.name,
            kind,
            download_ref,
        })
    }
}

/// The contents endpoint answers with an array for directories and a single
/// object when the path names a file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ContentsResponse {
    Listing(Vec<ContentEntry>),
    Single(ContentEntry),
}

impl ContentsResponse {
    pub fn into_nodes(self) -> Vec<RepositoryNode> {
        match self {
            ContentsResponse::Listing(entries) => {
                entries.into_iter().filter_map(ContentEntry::into_node).collect()
            }
            ContentsResponse::Single(entry) => entry.into_node().into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// An `owner/repo` pair. A bare repository name uses the configured user as
/// owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    pub fn parse(input: &str, default_owner: Option<&str>) -> Result<Self, GhClipError> {
        let input = input.trim().trim_end_matches('/');
        let (owner, repo) = match input.split_once('/') {
            Some((owner, repo)) => (owner.to_owned(), repo.trim_end_matches(".git").to_owned()),
            None => {
                let owner = default_owner.ok_or_else(|| {
                    GhClipError::ConfigError(format!(
                        "no owner given for '{}' and no GitHub user configured",
                        input
                    ))
                })?;
                (owner.to_owned(), input.to_owned())
            }
        };
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return Err(GhClipError::ConfigError(format!(
                "invalid repository reference: '{}'",
                input
            )));
        }
        Ok(RepoRef { owner, repo })
    }

    /// Key under which session state for this repository is stored.
    pub fn key(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}
