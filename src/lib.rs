pub mod aggregate;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod errors;
pub mod github;
pub mod intro;
pub mod logger;
pub mod render;
pub mod reporting;
pub mod selection;
pub mod session;
pub mod tree;
pub mod trie;
pub mod update;

pub use aggregate::{aggregate, AggregateDocument, AggregateEntry};
pub use errors::GhClipError;
pub use selection::SelectionSet;
pub use tree::list_all_files;
