//! Workspace-relative path handling and Dockerfile lookup

pub mod dockerfile;
pub mod paths;

pub use dockerfile::DockerfileFinder;
pub use paths::WorkspacePaths;
