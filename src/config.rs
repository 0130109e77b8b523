//! Resolved, immutable run configuration
//!
//! [`Config`] is built once from the raw [`Cli`] inputs and handed by
//! reference to every component, so nothing below `main` touches the
//! process environment to find its settings.

use crate::cli::Cli;
use crate::{FactsError, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_DOCKERFILE: &str = "./Dockerfile";
pub const DEFAULT_CONTEXT: &str = ".";
pub const DEFAULT_CANARY_LABEL: &str = "canary";
pub const DEFAULT_BRANCH: &str = "main";

/// Workflow metadata supplied by the CI runner
#[derive(Debug, Clone, Default)]
pub struct GithubContext {
    /// Absolute workspace root
    pub workspace: PathBuf,
    pub event_name: String,
    /// Full git ref, e.g. "refs/heads/main" or "refs/tags/v1.0.0"
    pub git_ref: String,
    /// Explicitly configured default branch, if any
    pub default_branch: Option<String>,
    pub event_path: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

/// Action inputs with defaults applied
#[derive(Debug, Clone)]
pub struct Config {
    pub image: String,
    pub version: String,
    pub dockerfile: String,
    pub context: String,
    pub registries: Vec<String>,
    pub canary_label: String,
    pub force_push: bool,
    pub with_latest: bool,
    pub target: Option<String>,
    pub prepend_target: bool,
    pub github: GithubContext,
}

impl Config {
    /// Create a configuration with every optional input at its default
    pub fn new(
        image: impl Into<String>,
        version: impl Into<String>,
        workspace: impl AsRef<Path>,
    ) -> Self {
        Self {
            image: image.into(),
            version: version.into(),
            dockerfile: DEFAULT_DOCKERFILE.to_string(),
            context: DEFAULT_CONTEXT.to_string(),
            registries: Vec::new(),
            canary_label: DEFAULT_CANARY_LABEL.to_string(),
            force_push: false,
            with_latest: false,
            target: None,
            prepend_target: false,
            github: GithubContext {
                workspace: workspace.as_ref().to_path_buf(),
                ..Default::default()
            },
        }
    }

    /// Build the configuration from parsed command-line/environment inputs
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let image = non_empty(cli.image).ok_or(FactsError::MissingInput("image"))?;
        let version = non_empty(cli.image_version).ok_or(FactsError::MissingInput("version"))?;

        let workspace = absolute_workspace(
            cli.workspace
                .filter(|path| !path.as_os_str().is_empty())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTEXT)),
        )?;

        Ok(Self {
            image,
            version,
            dockerfile: non_empty(cli.dockerfile)
                .unwrap_or_else(|| DEFAULT_DOCKERFILE.to_string()),
            context: non_empty(cli.context).unwrap_or_else(|| DEFAULT_CONTEXT.to_string()),
            registries: cli
                .registries
                .as_deref()
                .map(parse_registries)
                .unwrap_or_default(),
            canary_label: non_empty(cli.canary_label)
                .unwrap_or_else(|| DEFAULT_CANARY_LABEL.to_string()),
            force_push: parse_flag(cli.force_push.as_deref()),
            with_latest: parse_flag(cli.with_latest.as_deref()),
            target: non_empty(cli.target),
            prepend_target: parse_flag(cli.prepend_target.as_deref()),
            github: GithubContext {
                workspace,
                event_name: cli.event_name.unwrap_or_default(),
                git_ref: cli.git_ref.unwrap_or_default(),
                default_branch: non_empty(cli.default_branch),
                event_path: cli.event_path.filter(|path| !path.as_os_str().is_empty()),
                output: cli.output.filter(|path| !path.as_os_str().is_empty()),
                env_file: cli.env_file.filter(|path| !path.as_os_str().is_empty()),
            },
        })
    }
}

/// Split a comma-separated registry list, dropping blank entries
pub fn parse_registries(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|registry| !registry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Boolean inputs are enabled only by a case-insensitive "true"
pub fn parse_flag(raw: Option<&str>) -> bool {
    raw.map(|value| value.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn absolute_workspace(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(crate::workspace::paths::normalize(&path));
    }
    let cwd = std::env::current_dir()
        .map_err(|e| FactsError::Workspace(format!("current directory unavailable: {}", e)))?;
    Ok(crate::workspace::paths::normalize(&cwd.join(path)))
}
