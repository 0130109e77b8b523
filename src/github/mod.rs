//! GitHub Actions workflow context: event payload, push rules and outputs

pub mod event;
pub mod output;
pub mod push;

pub use event::EventData;
pub use output::OutputSink;
pub use push::{PushDecision, PushReason};
