use thiserror::Error;

#[derive(Error, Debug)]
pub enum GhClipError {
    #[error("Fetch failed with HTTP status {status}")]
    FetchError { status: u16 },

    #[error("Request failed: {0}")]
    RequestError(String),

    #[error("Content fetch failed: {0}")]
    ContentFetchError(String),

    #[error("Self update failed: {0}")]
    SelfUpdateError(String),

    #[error("Clipboard initialization failed: {0}")]
    ClipboardInitError(String),

    #[error("Clipboard write failed: {0}")]
    ClipboardWriteError(String),

    #[error("Session error: {0}")]
    SessionError(String),

    #[error("IO Error: {0}")]
    IoError(String),

    #[error("Tokenizer Error: {0}")]
    TokenizerError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<std::io::Error> for GhClipError {
    fn from(err: std::io::Error) -> Self {
        GhClipError::IoError(err.to_string())
    }
}

impl From<reqwest::Error> for GhClipError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => GhClipError::FetchError {
                status: status.as_u16(),
            },
            None => GhClipError::RequestError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for GhClipError {
    fn from(err: serde_json::Error) -> Self {
        GhClipError::SessionError(err.to_string())
    }
}
