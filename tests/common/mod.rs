#![allow(dead_code)]

use async_trait::async_trait;
use ghclip::clipboard::ClipboardCopier;
use ghclip::errors::GhClipError;
use ghclip::github::{RemoteSource, Repository, RepositoryNode, CONTENT_PLACEHOLDER};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory repository keyed by directory path ("" is the root).
#[derive(Default)]
pub struct FakeRemote {
    pub repos: Vec<Repository>,
    directories: HashMap<String, Vec<RepositoryNode>>,
    failing: HashMap<String, u16>,
    contents: HashMap<String, String>,
    pub listed: Mutex<Vec<String>>,
}

impl FakeRemote {
    pub fn new() -> Self {
        FakeRemote::default()
    }

    /// Adds a file, creating its parent directories along the way.
    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        let download_ref = format!("https://raw.example/{}", path);
        self.contents.insert(download_ref.clone(), content.to_owned());
        self.add_node(RepositoryNode::file(path, &download_ref));
        self
    }

    /// Adds a file whose download fails.
    pub fn with_broken_file(mut self, path: &str) -> Self {
        let download_ref = format!("https://raw.example/broken/{}", path);
        self.add_node(RepositoryNode::file(path, &download_ref));
        self
    }

    pub fn with_failing_dir(mut self, path: &str, status: u16) -> Self {
        if !path.is_empty() {
            self.add_node(RepositoryNode::directory(path));
        }
        self.failing.insert(path.to_owned(), status);
        self
    }

    pub fn without_file(mut self, path: &str) -> Self {
        for nodes in self.directories.values_mut() {
            nodes.retain(|n| n.path != path);
        }
        self
    }

    pub fn with_repo(mut self, name: &str) -> Self {
        self.repos.push(Repository {
            name: name.to_owned(),
            full_name: format!("me/{}", name),
            private: false,
            html_url: format!("https://github.com/me/{}", name),
            description: None,
        });
        self
    }

    pub fn listings_of(&self, path: &str) -> usize {
        self.listed.lock().unwrap().iter().filter(|p| *p == path).count()
    }

    fn add_node(&mut self, node: RepositoryNode) {
        let parent = match node.path.rsplit_once('/') {
            Some((parent, _)) => parent.to_owned(),
            None => String::new(),
        };
        if !parent.is_empty() && !self.has_node(&parent) {
            self.add_node(RepositoryNode::directory(&parent));
        }
        self.directories.entry(parent).or_default().push(node);
    }

    fn has_node(&self, path: &str) -> bool {
        self.directories
            .values()
            .any(|nodes| nodes.iter().any(|n| n.path == path))
    }
}

#[async_trait]
impl RemoteSource for FakeRemote {
    async fn list_repos(&self, _user: &str) -> Result<Vec<Repository>, GhClipError> {
        Ok(self.repos.clone())
    }

    async fn list_directory(
        &self,
        _owner: &str,
        _repo: &str,
        path: &str,
    ) -> Result<Vec<RepositoryNode>, GhClipError> {
        self.listed.lock().unwrap().push(path.to_owned());
        if let Some(status) = self.failing.get(path) {
            return Err(GhClipError::FetchError { status: *status });
        }
        match self.directories.get(path) {
            Some(nodes) => Ok(nodes.clone()),
            None if path.is_empty() => Ok(Vec::new()),
            None => Err(GhClipError::FetchError { status: 404 }),
        }
    }

    async fn fetch_content(&self, download_ref: &str) -> String {
        self.contents
            .get(download_ref)
            .cloned()
            .unwrap_or_else(|| CONTENT_PLACEHOLDER.to_owned())
    }
}

#[derive(Default)]
pub struct FakeClipboard {
    pub copied: Mutex<Vec<String>>,
}

#[async_trait]
impl ClipboardCopier for FakeClipboard {
    async fn copy_text(&self, text: &str) -> Result<(), GhClipError> {
        self.copied.lock().unwrap().push(text.to_owned());
        Ok(())
    }
}

/// Clipboard that is never available, like a headless session.
pub struct UnavailableClipboard;

#[async_trait]
impl ClipboardCopier for UnavailableClipboard {
    async fn copy_text(&self, _text: &str) -> Result<(), GhClipError> {
        Err(GhClipError::ClipboardInitError("no display".to_owned()))
    }
}
