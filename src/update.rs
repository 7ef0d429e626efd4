use crate::errors::GhClipError;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

/// Checkout this binary was built from.
pub fn default_source_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Runs `git pull` in `source_dir`. On failure the running binary is left
/// untouched; a successful pull takes effect once the tool is rebuilt.
pub async fn pull_latest(source_dir: &Path) -> Result<String, GhClipError> {
    if !source_dir.is_dir() {
        return Err(GhClipError::SelfUpdateError(format!(
            "source directory {} does not exist",
            source_dir.display()
        )));
    }

    debug!("Running git pull in {}", source_dir.display());
    let output = Command::new("git")
        .arg("pull")
        .current_dir(source_dir)
        .output()
        .await
        .map_err(|e| GhClipError::SelfUpdateError(format!("failed to run git: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GhClipError::SelfUpdateError(format!(
            "git pull exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_owned();
    info!("Source updated: {}", stdout);
    Ok(stdout)
}
