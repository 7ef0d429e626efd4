use crate::errors::GhClipError;
use arboard::Clipboard;
use async_trait::async_trait;
use tracing::{debug, info};

#[async_trait]
pub trait ClipboardCopier: Send + Sync {
    async fn copy_text(&self, text: &str) -> Result<(), GhClipError>;
}

/// Copies through the platform clipboard.
pub struct SystemClipboard;

#[async_trait]
impl ClipboardCopier for SystemClipboard {
    async fn copy_text(&self, text: &str) -> Result<(), GhClipError> {
        debug!("Initializing clipboard");
        let mut clipboard =
            Clipboard::new().map_err(|e| GhClipError::ClipboardInitError(e.to_string()))?;
        clipboard
            .set_text(text.to_owned())
            .map_err(|e| GhClipError::ClipboardWriteError(e.to_string()))?;
        Ok(())
    }
}

pub async fn copy_block(
    copier: &dyn ClipboardCopier,
    text: &str,
    label: &str,
) -> Result<(), GhClipError> {
    copier.copy_text(text).await?;
    info!("{} copied to clipboard ({} chars)", label, text.chars().count());
    Ok(())
}
