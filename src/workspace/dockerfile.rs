//! Dockerfile lookup across the workspace and build context

use crate::workspace::paths::{normalize, WorkspacePaths};
use std::path::{Path, PathBuf};

/// Probes the likely locations of a Dockerfile
pub struct DockerfileFinder<'a> {
    paths: &'a WorkspacePaths,
}

impl<'a> DockerfileFinder<'a> {
    pub fn new(paths: &'a WorkspacePaths) -> Self {
        Self { paths }
    }

    /// Candidate locations in probe order, without duplicates:
    ///
    /// 1. the Dockerfile path resolved against the workspace
    /// 2. the bare file name inside the context directory
    /// 3. the Dockerfile path appended to the context directory
    pub fn candidates(&self, dockerfile: impl AsRef<Path>, context: impl AsRef<Path>) -> Vec<PathBuf> {
        let dockerfile = dockerfile.as_ref();
        let context_dir = self.paths.resolve(context);

        let mut candidates = vec![self.paths.resolve(dockerfile)];
        if let Some(name) = dockerfile.file_name() {
            candidates.push(context_dir.join(name));
        }
        let nested = dockerfile.strip_prefix("./").unwrap_or(dockerfile);
        if !nested.as_os_str().is_empty() {
            candidates.push(normalize(&context_dir.join(nested)));
        }

        let mut unique: Vec<PathBuf> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if !candidate.as_os_str().is_empty() && !unique.contains(&candidate) {
                unique.push(candidate);
            }
        }
        unique
    }

    /// First candidate that exists on disk
    pub fn locate(&self, dockerfile: impl AsRef<Path>, context: impl AsRef<Path>) -> Option<PathBuf> {
        self.candidates(dockerfile, context)
            .into_iter()
            .find(|candidate| candidate.exists())
    }

    /// Like [`locate`](Self::locate), but falls back to the resolved input
    /// path when nothing exists.
    pub fn find(&self, dockerfile: impl AsRef<Path>, context: impl AsRef<Path>) -> PathBuf {
        let dockerfile = dockerfile.as_ref();
        match self.locate(dockerfile, context) {
            Some(found) => {
                tracing::info!("Found Dockerfile at: {}", found.display());
                found
            }
            None => {
                let fallback = self.paths.resolve(dockerfile);
                tracing::warn!(
                    "Could not find Dockerfile at any expected location, using: {}",
                    fallback.display()
                );
                fallback
            }
        }
    }
}
