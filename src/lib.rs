//! dimg - docker pull image supporter
//!
//! Prompts for an image name, lists the repository's tags from Docker Hub,
//! lets the user pick one and pulls `name:tag` through the local `docker`
//! binary or, when that is missing, the Docker Engine API.

pub mod cli;
pub mod image;
pub mod pull;

use thiserror::Error;

/// Main error type for dimg operations
#[derive(Error, Debug)]
pub enum DimgError {
    /// Rejected user input
    #[error("{0}")]
    Validation(String),

    /// Registry answered with a failure status or pagination went wrong
    #[error("Failed to fetch tags: {0}")]
    Fetch(String),

    /// Transport failure while talking to the registry
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed JSON from the registry or the pull progress stream
    #[error("Decode error: {0}")]
    Decode(String),

    /// User aborted an interactive prompt
    #[error("Cancelled")]
    Cancelled,

    /// `docker pull` or the Engine API pull failed
    #[error("Pull failed: {0}")]
    Pull(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DimgError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "dimg";
