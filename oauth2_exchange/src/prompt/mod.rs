//! Operator input for the interactive step.
//!
//! The flow reads the pasted redirect URL through [`LineSource`] so it can run
//! against a terminal or a scripted source. [`ClosingGuard`] closes the source
//! on every exit path.

mod errors;
mod source;

pub use errors::PromptError;
pub use source::{ClosingGuard, LineSource, ScriptedLines, StdinLines};
