use crate::github::{NodeKind, RemoteSource};
use futures::future::{BoxFuture, FutureExt};
use tracing::{debug, warn};

/// Lists every file path under `path`, depth-first, in the order the remote
/// returns entries. A directory whose listing fails contributes no files.
pub async fn list_all_files(
    source: &dyn RemoteSource,
    owner: &str,
    repo: &str,
    path: &str,
) -> Vec<String> {
    let files = walk(source, owner, repo, path.to_owned()).await;
    debug!("Found {} files in {}/{}", files.len(), owner, repo);
    files
}

fn walk<'a>(
    source: &'a dyn RemoteSource,
    owner: &'a str,
    repo: &'a str,
    path: String,
) -> BoxFuture<'a, Vec<String>> {
    async move {
        let nodes = match source.list_directory(owner, repo, &path).await {
            Ok(nodes) => nodes,
            Err(e) => {
                warn!("Skipping '{}': {}", path, e);
                return Vec::new();
            }
        };

        let mut files = Vec::new();
        for node in nodes {
            match node.kind {
                NodeKind::File => files.push(node.path),
                NodeKind::Directory => files.extend(walk(source, owner, repo, node.path).await),
            }
        }
        files
    }
    .boxed()
}
