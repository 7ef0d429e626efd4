use crate::github::{RemoteSource, RepositoryNode};
use crate::selection::SelectionSet;
use std::fmt;
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateEntry {
    pub qualified_name: String,
    pub content: String,
}

impl AggregateEntry {
    pub fn render(&self) -> String {
        format!("===== {} =====\n{}\n\n", self.qualified_name, self.content)
    }
}

/// Selected files' contents in selection order, rendered as
/// `===== name =====` blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateDocument {
    entries: Vec<AggregateEntry>,
}

impl AggregateDocument {
    pub fn entries(&self) -> &[AggregateEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn push(&mut self, qualified_name: String, content: String) {
        self.entries.push(AggregateEntry {
            qualified_name,
            content,
        });
    }

    pub fn render(&self) -> String {
        self.entries.iter().map(AggregateEntry::render).collect()
    }
}

impl fmt::Display for AggregateDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            f.write_str(&entry.render())?;
        }
        Ok(())
    }
}

struct Resolved {
    node: RepositoryNode,
    folder_name: Option<String>,
}

impl Resolved {
    fn qualified_name(&self) -> String {
        match &self.folder_name {
            Some(folder) => format!("{}/{}", folder, self.node.name),
            None => self.node.name.clone(),
        }
    }
}

/// Builds the aggregate for `selection`.
///
/// Each path is looked up among the root files first, then in every known
/// folder, which is listed again for each lookup. Paths that resolve nowhere
/// are skipped.
pub async fn aggregate(
    source: &dyn RemoteSource,
    owner: &str,
    repo: &str,
    selection: &SelectionSet,
    root_nodes: &[RepositoryNode],
    known_folders: &[RepositoryNode],
) -> AggregateDocument {
    let mut document = AggregateDocument::default();

    for path in selection.iter() {
        let resolved = match resolve(source, owner, repo, path, root_nodes, known_folders).await {
            Some(resolved) => resolved,
            None => {
                debug!("Skipping unresolved selection {}", path);
                continue;
            }
        };
        let Some(download_ref) = resolved.node.download_ref.as_deref() else {
            debug!("Skipping {} without download reference", path);
            continue;
        };

        let content = source.fetch_content(download_ref).await;
        trace!("Fetched {} bytes for {}", content.len(), path);
        document.push(resolved.qualified_name(), content);
    }

    debug!("Aggregated {} of {} selected files", document.len(), selection.len());
    document
}

async fn resolve(
    source: &dyn RemoteSource,
    owner: &str,
    repo: &str,
    path: &str,
    root_nodes: &[RepositoryNode],
    known_folders: &[RepositoryNode],
) -> Option<Resolved> {
    if let Some(node) = root_nodes.iter().find(|n| n.is_file() && n.path == path) {
        return Some(Resolved {
            node: node.clone(),
            folder_name: None,
        });
    }

    for folder in known_folders {
        let children = match source.list_directory(owner, repo, &folder.path).await {
            Ok(children) => children,
            Err(e) => {
                warn!("Failed to list folder {}: {}", folder.path, e);
                continue;
            }
        };
        if let Some(node) = children.into_iter().find(|n| n.is_file() && n.path == path) {
            return Some(Resolved {
                node,
                folder_name: Some(folder.name.clone()),
            });
        }
    }
    None
}
