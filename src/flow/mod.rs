//! The flow document model, validation, and trigger matching.

pub mod document;
pub(crate) mod graph;
pub mod trigger;
pub mod validator;

pub use document::*;
pub use validator::{MAX_BUTTONS, MAX_DELAY_SECS, ValidatedFlow, validate};
