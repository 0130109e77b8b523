//! Image tag generation

use crate::config::Config;
use crate::image::reference::ImageName;

/// Version substrings that mark a pre-release, which never gets "latest"
pub const PRERELEASE_MARKERS: [&str; 4] = ["alpha", "beta", "rc", "dev"];

/// Generates the tags an image is published under
pub struct TagGenerator<'a> {
    config: &'a Config,
}

impl<'a> TagGenerator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Generate tags for `version`.
    ///
    /// An empty `registries` slice means the configured registries; a
    /// missing `target` means the configured target. Tags come out as the
    /// version tag followed by its registry variants, then (for releases
    /// with `with_latest`) the latest tag and its registry variants.
    pub fn generate(&self, version: &str, registries: &[String], target: Option<&str>) -> Vec<String> {
        let registries = if registries.is_empty() {
            self.config.registries.as_slice()
        } else {
            registries
        };
        let image = ImageName::from_input(&self.config.image);
        let prefix = self.target_prefix(target.or(self.config.target.as_deref()));

        let mut labels = vec![version_label(&prefix, version)];
        if self.config.with_latest && self.is_release(version) {
            labels.push(format!("{}latest", prefix));
        }

        let mut tags = Vec::with_capacity(labels.len() * (registries.len() + 1));
        for label in &labels {
            tags.push(image.with_tag(label));
            for registry in registries {
                tags.push(image.on_registry(registry, label));
            }
        }

        validate_tags(tags)
    }

    /// Whether this run publishes a release: a tag ref and a version
    /// without pre-release markers
    pub fn is_release(&self, version: &str) -> bool {
        self.config.github.git_ref.starts_with("refs/tags/")
            && !PRERELEASE_MARKERS
                .iter()
                .any(|marker| version.contains(marker))
    }

    fn target_prefix(&self, target: Option<&str>) -> String {
        if !self.config.prepend_target {
            return String::new();
        }
        match target.filter(|t| !t.is_empty()) {
            Some(target) => format!("{}-", target),
            None => {
                tracing::warn!(
                    "Target prepending enabled but no target provided. Skipping target prefix."
                );
                String::new()
            }
        }
    }
}

/// `<prefix>v<version>`, without doubling a leading `v`
pub fn version_label(prefix: &str, version: &str) -> String {
    if version.starts_with('v') {
        format!("{}{}", prefix, version)
    } else {
        format!("{}v{}", prefix, version)
    }
}

/// Repair tags whose tag part holds more than one `:` by cutting at the
/// second one. Colons before the last `/` belong to a registry port.
pub fn validate_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| {
            let name_start = tag.rfind('/').map(|i| i + 1).unwrap_or(0);
            let (head, name) = tag.split_at(name_start);
            let mut parts = name.splitn(3, ':');
            let fixed = match (parts.next(), parts.next(), parts.next()) {
                (Some(repo), Some(label), Some(_)) => Some(format!("{}{}:{}", head, repo, label)),
                _ => None,
            };
            match fixed {
                Some(fixed) => {
                    tracing::warn!("Found malformed tag: {}, using {}", tag, fixed);
                    fixed
                }
                None => tag,
            }
        })
        .collect()
}
