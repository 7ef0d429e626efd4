//! GitHub REST access: repository listing, directory listing and raw file
//! downloads.

pub mod client;
pub mod types;

pub use client::{GitHubClient, RemoteSource, CONTENT_PLACEHOLDER, DEFAULT_API_BASE};
pub use types::{NodeKind, RepoRef, Repository, RepositoryNode};
