use crate::errors::GhClipError;
use crate::github::{RemoteSource, RepoRef, RepositoryNode};
use crate::session::Session;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Checkbox changes and view toggles requested for one render pass.
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    pub show_folders: Option<bool>,
    pub expand: Vec<String>,
    pub collapse: Vec<String>,
    pub check: Vec<String>,
    pub uncheck: Vec<String>,
    pub clear: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleFile {
    pub path: String,
    pub label: String,
    pub checked: bool,
}

#[derive(Debug, Clone)]
pub struct FolderView {
    pub folder: RepositoryNode,
    pub expanded: bool,
    pub files: Vec<VisibleFile>,
}

/// What one pass over a repository shows: root files, root folders and the
/// files of expanded folders.
#[derive(Debug, Default)]
pub struct RepoView {
    pub root_nodes: Vec<RepositoryNode>,
    pub root_files: Vec<VisibleFile>,
    pub folders: Vec<FolderView>,
    pub show_folders: bool,
    pub fetch_error: Option<GhClipError>,
}

impl RepoView {
    pub fn known_folders(&self) -> Vec<RepositoryNode> {
        self.root_nodes
            .iter()
            .filter(|n| n.is_directory())
            .cloned()
            .collect()
    }

    pub fn visible_files(&self) -> impl Iterator<Item = &VisibleFile> {
        self.root_files
            .iter()
            .chain(self.folders.iter().flat_map(|f| f.files.iter()))
    }
}

/// Runs one render pass: applies toggles, lists what is visible and
/// reconciles the repository's selection against the checkbox values.
pub async fn render_pass(
    source: &dyn RemoteSource,
    repo: &RepoRef,
    session: &mut Session,
    request: &RenderRequest,
) -> RepoView {
    let key = repo.key();
    if let Some(show) = request.show_folders {
        session.show_folders = show;
    }
    for folder in &request.collapse {
        session.collapse(&key, folder.trim_matches('/'));
    }
    if request.clear {
        session.selection_mut(&key).clear();
    }

    let mut view = RepoView {
        show_folders: session.show_folders,
        ..RepoView::default()
    };

    let root_nodes = match source.list_directory(&repo.owner, &repo.repo, "").await {
        Ok(nodes) => nodes,
        Err(e) => {
            warn!("Failed to list {}: {}", key, e);
            view.fetch_error = Some(e);
            return view;
        }
    };

    for folder in &request.expand {
        let folder = folder.trim_matches('/');
        if root_nodes.iter().any(|n| n.is_directory() && n.path == folder) {
            session.expand(&key, folder);
        } else {
            warn!("'{}' is not a folder at the repository root", folder);
        }
    }

    let selected = session.selection(&key).cloned().unwrap_or_default();
    let checkbox = |path: &str| -> bool {
        if request.uncheck.iter().any(|p| p == path) {
            false
        } else if request.check.iter().any(|p| p == path) {
            true
        } else {
            selected.contains(path)
        }
    };

    for node in root_nodes.iter().filter(|n| n.is_file()) {
        view.root_files.push(VisibleFile {
            path: node.path.clone(),
            label: node.name.clone(),
            checked: checkbox(&node.path),
        });
    }

    for folder in root_nodes.iter().filter(|n| n.is_directory()) {
        let expanded = session.is_expanded(&key, &folder.path);
        let mut files = Vec::new();
        if view.show_folders && expanded {
            match source.list_directory(&repo.owner, &repo.repo, &folder.path).await {
                Ok(children) => {
                    for child in children.into_iter().filter(|n| n.is_file()) {
                        files.push(VisibleFile {
                            label: format!("{}/{}", folder.name, child.name),
                            checked: checkbox(&child.path),
                            path: child.path,
                        });
                    }
                }
                Err(e) => warn!("Failed to list folder {}: {}", folder.path, e),
            }
        }
        view.folders.push(FolderView {
            folder: folder.clone(),
            expanded,
            files,
        });
    }
    view.root_nodes = root_nodes;

    let visible: HashSet<&str> = view.visible_files().map(|f| f.path.as_str()).collect();
    for path in request.check.iter().chain(request.uncheck.iter()) {
        if !visible.contains(path.as_str()) {
            warn!("'{}' is not visible; show and expand its folder first", path);
        }
    }

    session
        .selection_mut(&key)
        .reconcile(view.visible_files().map(|f| (f.path.as_str(), f.checked)));
    debug!(
        "Render pass over {} showed {} files",
        key,
        view.visible_files().count()
    );
    view
}
