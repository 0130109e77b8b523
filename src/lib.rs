//! docker-facts - derive Docker build facts for a CI step
//!
//! This crate works out where the Dockerfile and build context live, which
//! target and build arguments apply, whether the image should be pushed and
//! which tags it should carry. Explicit inputs are combined with whatever an
//! auto-discovered compose file says about the image.

pub mod cli;
pub mod compose;
pub mod config;
pub mod facts;
pub mod github;
pub mod image;
pub mod workspace;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for docker-facts operations
#[derive(Error, Debug)]
pub enum FactsError {
    #[error("Required input '{0}' not provided")]
    MissingInput(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid compose file {path}: {reason}")]
    InvalidCompose { path: PathBuf, reason: String },

    #[error("Cannot determine workspace root: {0}")]
    Workspace(String),
}

pub type Result<T> = std::result::Result<T, FactsError>;
