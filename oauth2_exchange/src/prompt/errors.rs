use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PromptError {
    #[error("Failed to read input: {0}")]
    Read(String),

    #[error("Input already closed")]
    Closed,
}
