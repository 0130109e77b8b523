//! Image name parsing

use std::fmt;

/// Bare first path segments that are treated as registry hosts even
/// without a dot
pub const BARE_REGISTRY_HOSTS: [&str; 3] = ["localhost", "ghcr", "docker"];

/// Name used when no image is configured
pub const UNNAMED_IMAGE: &str = "unnamed";

/// Image name split into an optional registry host, the repository path
/// and an optional tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageName {
    /// Registry host (e.g., "ghcr.io"), if the first segment looks like one
    pub registry: Option<String>,
    /// Repository path (e.g., "my-org/my-app")
    pub repository: String,
    /// Tag (e.g., "latest"), if one was given
    pub tag: Option<String>,
}

impl ImageName {
    /// Parse an image name
    pub fn parse(name: &str) -> Self {
        let name = name.trim();

        // A colon after the last slash separates the tag; one before it
        // belongs to a registry port
        let (without_tag, tag) = match name.rsplit_once(':') {
            Some((head, tail)) if !tail.contains('/') => (head, Some(tail.to_string())),
            _ => (name, None),
        };

        let (registry, repository) = match without_tag.split_once('/') {
            Some((first, rest)) if looks_like_registry(first) => {
                (Some(first.to_string()), rest.to_string())
            }
            _ => (None, without_tag.to_string()),
        };

        Self {
            registry,
            repository,
            tag,
        }
    }

    /// Parse the configured image name, dropping any tag it carries
    pub fn from_input(image: &str) -> Self {
        let image = if image.trim().is_empty() {
            UNNAMED_IMAGE
        } else {
            image
        };

        let mut name = Self::parse(image);
        if let Some(tag) = name.tag.take() {
            tracing::warn!(
                "Image already has a tag: {}, ignoring tag '{}'",
                image,
                tag
            );
        }
        name
    }

    /// Image name including the registry host, without the tag
    pub fn name(&self) -> String {
        match &self.registry {
            Some(registry) => format!("{}/{}", registry, self.repository),
            None => self.repository.clone(),
        }
    }

    /// Image name with the given tag
    pub fn with_tag(&self, tag: &str) -> String {
        format!("{}:{}", self.name(), tag)
    }

    /// Image name re-homed onto another registry
    pub fn on_registry(&self, registry: &str, tag: &str) -> String {
        format!("{}/{}:{}", registry, self.repository, tag)
    }
}

impl fmt::Display for ImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "{}:{}", self.name(), tag),
            None => f.write_str(&self.name()),
        }
    }
}

/// Whether the first path segment of an image name is a registry host:
/// it contains a dot, or is one of [`BARE_REGISTRY_HOSTS`].
pub fn looks_like_registry(segment: &str) -> bool {
    segment.contains('.') || BARE_REGISTRY_HOSTS.contains(&segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_image() {
        let name = ImageName::parse("test-image");
        assert_eq!(name.registry, None);
        assert_eq!(name.repository, "test-image");
        assert_eq!(name.tag, None);
    }

    #[test]
    fn test_parse_image_with_user() {
        let name = ImageName::parse("my-org/my-app:v1.0");
        assert_eq!(name.registry, None);
        assert_eq!(name.repository, "my-org/my-app");
        assert_eq!(name.tag.as_deref(), Some("v1.0"));
    }

    #[test]
    fn test_parse_image_with_registry() {
        let name = ImageName::parse("ghcr.io/owner/repo:tag");
        assert_eq!(name.registry.as_deref(), Some("ghcr.io"));
        assert_eq!(name.repository, "owner/repo");
        assert_eq!(name.tag.as_deref(), Some("tag"));
    }

    #[test]
    fn test_parse_bare_registry_hosts() {
        for host in ["localhost", "ghcr", "docker"] {
            let name = ImageName::parse(&format!("{}/team/app", host));
            assert_eq!(name.registry.as_deref(), Some(host));
            assert_eq!(name.repository, "team/app");
        }
    }

    #[test]
    fn test_parse_port_is_not_tag() {
        let name = ImageName::parse("registry.local:5000/app");
        assert_eq!(name.registry.as_deref(), Some("registry.local:5000"));
        assert_eq!(name.repository, "app");
        assert_eq!(name.tag, None);
    }

    #[test]
    fn test_dotless_private_host_is_kept() {
        // Hosts without a dot outside the allow-list are part of the path
        let name = ImageName::parse("myregistry/app");
        assert_eq!(name.registry, None);
        assert_eq!(name.repository, "myregistry/app");
    }

    #[test]
    fn test_from_input_drops_tag() {
        let name = ImageName::from_input("my-app:1.0");
        assert_eq!(name.tag, None);
        assert_eq!(name.to_string(), "my-app");
    }

    #[test]
    fn test_from_input_empty_is_unnamed() {
        assert_eq!(ImageName::from_input("").name(), "unnamed");
    }

    #[test]
    fn test_on_registry() {
        let name = ImageName::parse("ghcr.io/owner/app");
        assert_eq!(name.with_tag("v1"), "ghcr.io/owner/app:v1");
        assert_eq!(name.on_registry("docker.io", "v1"), "docker.io/owner/app:v1");
    }
}
