//! Image naming and tag generation

pub mod reference;
pub mod tags;

pub use reference::ImageName;
pub use tags::{validate_tags, TagGenerator};
