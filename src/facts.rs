//! Build fact resolution and export
//!
//! [`resolve`] derives the facts from the configuration and the workspace;
//! [`export`] writes them where the workflow can see them.

use crate::compose::{self, ComposeLocator, ComposeOverride};
use crate::config::Config;
use crate::github::output::{append_lines, file_command_entry, OutputSink};
use crate::github::push;
use crate::image::TagGenerator;
use crate::workspace::{DockerfileFinder, WorkspacePaths};
use crate::Result;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Prefix for build arguments exported as environment variables
pub const BUILD_ARG_PREFIX: &str = "BUILD_ARG_";

/// Everything the build step needs to know
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildFacts {
    /// Workspace-relative Dockerfile path
    pub dockerfile: PathBuf,
    /// Workspace-relative build context
    pub context: PathBuf,
    pub target: Option<String>,
    pub push: bool,
    /// Image tags; never empty
    pub tags: Vec<String>,
    /// `BUILD_ARG_<KEY>` environment entries from the compose file
    pub build_args: Vec<(String, String)>,
}

impl BuildFacts {
    /// Step outputs in the order they are written
    pub fn outputs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("dockerfile", self.dockerfile.display().to_string()),
            ("context", self.context.display().to_string()),
            ("target", self.target.clone().unwrap_or_default()),
            ("push", self.push.to_string()),
            ("tags", self.tags.join(",")),
        ]
    }
}

/// Derive the build facts for the configured image
pub fn resolve(config: &Config) -> BuildFacts {
    let paths = WorkspacePaths::new(&config.github.workspace);
    let finder = DockerfileFinder::new(&paths);
    let input_context = Path::new(&config.context);

    let mut context = paths.resolve(input_context);
    let mut dockerfile = finder.find(&config.dockerfile, input_context);
    let mut target = config.target.clone();

    let compose = ComposeLocator::new(&paths)
        .find(Some(config.context.as_str()))
        .map(|file| load_override(&file, &config.image))
        .unwrap_or_default();
    if compose.is_empty() {
        tracing::info!("No compose build settings apply to {}", config.image);
    }

    match (&compose.dockerfile, &compose.context) {
        (Some(compose_dockerfile), Some(compose_context)) => {
            let compose_context = input_context.join(compose_context);
            context = paths.resolve(&compose_context);
            dockerfile = finder.find(compose_context.join(compose_dockerfile), &context);
        }
        (Some(compose_dockerfile), None) => {
            dockerfile = finder.find(input_context.join(compose_dockerfile), &context);
        }
        (None, Some(compose_context)) => {
            context = paths.resolve(input_context.join(compose_context));
            dockerfile = finder.find(&config.dockerfile, &context);
        }
        (None, None) => {}
    }

    if target.is_none() {
        target = compose.target.clone();
    }

    let build_args: Vec<(String, String)> = compose
        .build_args
        .iter()
        .map(|(name, value)| (build_arg_var(name), value.clone()))
        .collect();
    for (name, value) in &build_args {
        tracing::info!("Setting build arg: {}={}", name, value);
    }

    let push = push::should_push(config);
    let tags = TagGenerator::new(config).generate(&config.version, &[], target.as_deref());

    let facts = BuildFacts {
        dockerfile: paths.to_relative(&dockerfile),
        context: paths.to_relative(&context),
        target,
        push,
        tags,
        build_args,
    };

    tracing::info!("Dockerfile: {}", facts.dockerfile.display());
    tracing::info!("Context: {}", facts.context.display());
    tracing::info!("Target: {}", facts.target.as_deref().unwrap_or(""));
    tracing::info!("Should push: {}", facts.push);
    tracing::info!("Tags: {}", facts.tags.join(","));

    facts
}

/// Export build args to the environment and write the step outputs.
///
/// `stdout` receives the outputs when no output file is usable.
pub fn export<W: Write>(facts: &BuildFacts, config: &Config, stdout: &mut W) -> Result<()> {
    for (name, value) in &facts.build_args {
        std::env::set_var(name, value);
    }

    if let Some(env_file) = config.github.env_file.as_deref() {
        if !facts.build_args.is_empty() {
            let lines: Vec<String> = facts
                .build_args
                .iter()
                .map(|(name, value)| file_command_entry(name, value))
                .collect();
            if let Err(e) = append_lines(env_file, &lines) {
                tracing::error!("Failed to export build args to {}: {}", env_file.display(), e);
            }
        }
    }

    OutputSink::new(config.github.output.as_deref()).emit(&facts.outputs(), stdout)
}

/// `BUILD_ARG_<KEY>` with the key upper-cased
pub fn build_arg_var(name: &str) -> String {
    format!("{}{}", BUILD_ARG_PREFIX, name.to_uppercase())
}

fn load_override(file: &Path, image: &str) -> ComposeOverride {
    compose::parse(file, image).unwrap_or_else(|e| {
        tracing::error!("Error parsing Docker Compose file: {}", e);
        ComposeOverride::default()
    })
}
