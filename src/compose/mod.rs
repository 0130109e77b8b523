//! Compose file discovery and build-section extraction

pub mod locate;
pub mod parse;

pub use locate::ComposeLocator;
pub use parse::parse;

use std::collections::BTreeMap;

/// Build settings a compose file declares for the target image.
///
/// Every field is optional; an empty override changes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeOverride {
    pub dockerfile: Option<String>,
    pub context: Option<String>,
    pub target: Option<String>,
    pub build_args: BTreeMap<String, String>,
}

impl ComposeOverride {
    pub fn is_empty(&self) -> bool {
        self.dockerfile.is_none()
            && self.context.is_none()
            && self.target.is_none()
            && self.build_args.is_empty()
    }
}
