//! Compose file discovery

use crate::workspace::WorkspacePaths;
use std::path::{Path, PathBuf};

/// File names probed, highest priority first
pub const COMPOSE_FILE_NAMES: [&str; 4] = [
    "docker-compose.yml",
    "docker-compose.yaml",
    "compose.yml",
    "compose.yaml",
];

/// Looks for a compose file in the workspace, then in the build context
pub struct ComposeLocator<'a> {
    paths: &'a WorkspacePaths,
}

impl<'a> ComposeLocator<'a> {
    pub fn new(paths: &'a WorkspacePaths) -> Self {
        Self { paths }
    }

    /// Find the compose file to use.
    ///
    /// Any match in the workspace root beats any match in the context
    /// directory, whatever the file names.
    pub fn find(&self, context: Option<&str>) -> Option<PathBuf> {
        if let Some(found) = probe(self.paths.root()) {
            tracing::info!("Found Docker Compose file in workspace: {}", found.display());
            return Some(found);
        }

        if let Some(context) = context.filter(|c| !c.is_empty()) {
            if !self.paths.is_root(context) {
                if let Some(found) = probe(&self.paths.resolve(context)) {
                    tracing::info!("Found Docker Compose file in context: {}", found.display());
                    return Some(found);
                }
            }
        }

        tracing::info!("No Docker Compose file found");
        None
    }
}

fn probe(dir: &Path) -> Option<PathBuf> {
    COMPOSE_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}
