//! Push decision for the built image

use crate::config::{Config, DEFAULT_BRANCH};
use crate::github::event::EventData;
use std::fmt;

/// Why an image is going to be pushed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushReason {
    Forced,
    DefaultBranch,
    Tag,
    CanaryLabel,
}

impl fmt::Display for PushReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Forced => "force push enabled",
            Self::DefaultBranch => "on default branch",
            Self::Tag => "tagged release",
            Self::CanaryLabel => "canary label on pull request",
        };
        f.write_str(text)
    }
}

/// Evaluates the push rules against the workflow context
pub struct PushDecision<'a> {
    config: &'a Config,
    event: &'a EventData,
}

impl<'a> PushDecision<'a> {
    pub fn new(config: &'a Config, event: &'a EventData) -> Self {
        Self { config, event }
    }

    /// Configured default branch, else the one in the event payload, else "main"
    pub fn default_branch(&self) -> &str {
        self.config
            .github
            .default_branch
            .as_deref()
            .or_else(|| self.event.default_branch())
            .unwrap_or(DEFAULT_BRANCH)
    }

    /// First rule that allows a push, in precedence order
    pub fn evaluate(&self) -> Option<PushReason> {
        let github = &self.config.github;

        if self.config.force_push {
            return Some(PushReason::Forced);
        }
        if github.git_ref == format!("refs/heads/{}", self.default_branch()) {
            return Some(PushReason::DefaultBranch);
        }
        if github.git_ref.starts_with("refs/tags/") {
            return Some(PushReason::Tag);
        }
        if github.event_name == "pull_request" && self.event.has_label(&self.config.canary_label) {
            return Some(PushReason::CanaryLabel);
        }
        None
    }
}

/// Decide whether to push, loading the event payload once.
///
/// An unreadable payload counts as an event without labels.
pub fn should_push(config: &Config) -> bool {
    let event = EventData::load(config.github.event_path.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("Failed to load event data: {}", e);
        EventData::default()
    });

    match PushDecision::new(config, &event).evaluate() {
        Some(reason) => {
            tracing::info!("Push enabled: {}", reason);
            true
        }
        None => {
            tracing::info!("Push disabled: conditions not met");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::event::{Label, PullRequest, Repository};
    use std::fs;
    use tempfile::TempDir;

    fn config(git_ref: &str) -> Config {
        let mut config = Config::new("test-image", "1.0.0", "/ws");
        config.github.git_ref = git_ref.to_string();
        config
    }

    fn labeled(labels: &[&str]) -> EventData {
        EventData {
            pull_request: Some(PullRequest {
                labels: labels
                    .iter()
                    .map(|name| Label {
                        name: name.to_string(),
                    })
                    .collect(),
            }),
            repository: None,
        }
    }

    #[test]
    fn test_force_push_wins() {
        let mut config = config("refs/heads/feature");
        config.force_push = true;
        let event = EventData::default();

        assert_eq!(
            PushDecision::new(&config, &event).evaluate(),
            Some(PushReason::Forced)
        );
    }

    #[test]
    fn test_default_branch_exact_match_only() {
        let event = EventData::default();

        let config = config("refs/heads/main");
        assert_eq!(
            PushDecision::new(&config, &event).evaluate(),
            Some(PushReason::DefaultBranch)
        );

        let config = self::config("refs/heads/main-feature");
        assert_eq!(PushDecision::new(&config, &event).evaluate(), None);
    }

    #[test]
    fn test_configured_default_branch() {
        let mut config = config("refs/heads/develop");
        config.github.default_branch = Some("develop".to_string());
        let event = EventData::default();

        assert_eq!(
            PushDecision::new(&config, &event).evaluate(),
            Some(PushReason::DefaultBranch)
        );
    }

    #[test]
    fn test_default_branch_from_event_payload() {
        let config = config("refs/heads/trunk");
        let event = EventData {
            pull_request: None,
            repository: Some(Repository {
                default_branch: Some("trunk".to_string()),
            }),
        };

        let decision = PushDecision::new(&config, &event);
        assert_eq!(decision.default_branch(), "trunk");
        assert_eq!(decision.evaluate(), Some(PushReason::DefaultBranch));
    }

    #[test]
    fn test_tag_ref() {
        let config = config("refs/tags/v1.2.3");
        let event = EventData::default();

        assert_eq!(
            PushDecision::new(&config, &event).evaluate(),
            Some(PushReason::Tag)
        );
    }

    #[test]
    fn test_canary_label_on_pull_request() {
        let mut config = config("refs/pull/7/merge");
        config.github.event_name = "pull_request".to_string();

        let event = labeled(&["docs", "canary"]);
        assert_eq!(
            PushDecision::new(&config, &event).evaluate(),
            Some(PushReason::CanaryLabel)
        );

        let event = labeled(&["docs"]);
        assert_eq!(PushDecision::new(&config, &event).evaluate(), None);

        config.canary_label = "preview".to_string();
        let event = labeled(&["preview"]);
        assert_eq!(
            PushDecision::new(&config, &event).evaluate(),
            Some(PushReason::CanaryLabel)
        );
    }

    #[test]
    fn test_canary_label_ignored_outside_pull_request() {
        let mut config = config("refs/heads/feature");
        config.github.event_name = "push".to_string();
        let event = labeled(&["canary"]);

        assert_eq!(PushDecision::new(&config, &event).evaluate(), None);
    }

    #[test]
    fn test_should_push_reads_event_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("event.json");
        fs::write(&path, r#"{"pull_request": {"labels": [{"name": "canary"}]}}"#).unwrap();

        let mut config = config("refs/pull/1/merge");
        config.github.event_name = "pull_request".to_string();
        config.github.event_path = Some(path);

        assert!(should_push(&config));
    }

    #[test]
    fn test_should_push_malformed_event_degrades() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("event.json");
        fs::write(&path, "not json at all").unwrap();

        let mut config = config("refs/pull/1/merge");
        config.github.event_name = "pull_request".to_string();
        config.github.event_path = Some(path);

        assert!(!should_push(&config));
    }
}
