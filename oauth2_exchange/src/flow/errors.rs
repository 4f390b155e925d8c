use thiserror::Error;

use crate::oauth2::OAuth2Error;
use crate::prompt::PromptError;

/// Failures that stop a run outright.
///
/// Provider rejections and a missing authorization code are not errors at this
/// level; they are reported to the operator and returned as an
/// [`Outcome`](super::Outcome).
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("OAuth2 setup error: {0}")]
    OAuth2(#[from] OAuth2Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),

    #[error("Console error: {0}")]
    Console(#[from] std::io::Error),
}
