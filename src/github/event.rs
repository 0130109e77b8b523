//! Workflow event payload

use crate::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// The parts of the event payload the push rules look at
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventData {
    #[serde(default)]
    pub pull_request: Option<PullRequest>,
    #[serde(default)]
    pub repository: Option<Repository>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequest {
    #[serde(default)]
    pub labels: Vec<Label>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Label {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Repository {
    #[serde(default)]
    pub default_branch: Option<String>,
}

impl EventData {
    /// Load the payload from the event file.
    ///
    /// A missing path or file is not an error and yields empty event data.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path.filter(|p| p.exists()) else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Names of the labels on the pull request, if any
    pub fn label_names(&self) -> Vec<&str> {
        self.pull_request
            .as_ref()
            .map(|pr| pr.labels.iter().map(|label| label.name.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn has_label(&self, name: &str) -> bool {
        self.label_names().contains(&name)
    }

    pub fn default_branch(&self) -> Option<&str> {
        self.repository
            .as_ref()
            .and_then(|repo| repo.default_branch.as_deref())
            .filter(|branch| !branch.is_empty())
    }
}
