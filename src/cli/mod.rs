//! Command-line and environment input surface
//!
//! Every input can be given as a long flag for local runs, but inside a
//! workflow they arrive as `INPUT_*` and `GITHUB_*` environment variables.

use clap::Parser;
use std::path::PathBuf;

/// docker-facts - derive Docker build facts for a CI step
#[derive(Parser, Debug, Default, Clone)]
#[command(name = "docker-facts")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Image name to build (e.g. "my-org/my-app")
    #[arg(long, env = "INPUT_IMAGE")]
    pub image: Option<String>,

    /// Version to tag the image with
    #[arg(long, env = "INPUT_VERSION")]
    pub image_version: Option<String>,

    /// Path to the Dockerfile [default: ./Dockerfile]
    #[arg(long, env = "INPUT_DOCKERFILE")]
    pub dockerfile: Option<String>,

    /// Path to the build context [default: .]
    #[arg(long, env = "INPUT_CONTEXT")]
    pub context: Option<String>,

    /// Comma-separated registries to publish additional tags for
    #[arg(long, env = "INPUT_REGISTRIES")]
    pub registries: Option<String>,

    /// Pull request label that forces a push [default: canary]
    #[arg(long, env = "INPUT_CANARY_LABEL")]
    pub canary_label: Option<String>,

    /// Always push the image ("true" to enable)
    #[arg(long, env = "INPUT_FORCE_PUSH")]
    pub force_push: Option<String>,

    /// Add a "latest" tag for release tags ("true" to enable)
    #[arg(long, env = "INPUT_WITH_LATEST")]
    pub with_latest: Option<String>,

    /// Build target stage
    #[arg(long, env = "INPUT_TARGET")]
    pub target: Option<String>,

    /// Prefix version tags with the target ("true" to enable)
    #[arg(long, env = "INPUT_PREPEND_TARGET")]
    pub prepend_target: Option<String>,

    /// Workspace root that relative paths are resolved against [default: .]
    #[arg(long, env = "GITHUB_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Name of the event that triggered the workflow
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    pub event_name: Option<String>,

    /// Git ref that triggered the workflow
    #[arg(long = "ref", env = "GITHUB_REF")]
    pub git_ref: Option<String>,

    /// Default branch of the repository
    #[arg(long, env = "GITHUB_DEFAULT_BRANCH")]
    pub default_branch: Option<String>,

    /// Path to the JSON event payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    /// File that step outputs are appended to
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub output: Option<PathBuf>,

    /// File that exported environment variables are appended to
    #[arg(long, env = "GITHUB_ENV")]
    pub env_file: Option<PathBuf>,
}
