//! prgate GitHub adapter
//!
//! REST implementations of the `PullRequestSource` and `MergeClient`
//! collaborators from `prgate-core`.

pub mod client;
pub mod config;
pub mod error;
pub mod wire;

pub use client::GithubClient;
pub use config::{GithubConfig, DEFAULT_API_URL};
pub use error::{GithubError, Result};
pub use wire::{assemble_pull_request, parse_merge_response, ApiFile, ApiPullRequest};
