//! oauth2_exchange - Interactive check of Google OAuth2 client credentials
//!
//! Builds a consent URL for the configured client, reads the post-consent
//! redirect URL pasted by an operator, exchanges the authorization code once
//! and confirms the access token by fetching the account's name and email.
//! Nothing is persisted and nothing is retried.

mod config;
mod flow;
mod oauth2;
mod prompt;

pub use config::{CLIENT_ID_VAR, CLIENT_SECRET_VAR, ConfigError, Credentials, REDIRECT_URI_VAR};

pub use flow::{ExchangeError, FlowState, NOT_FOUND, Outcome, print_missing_config, run_exchange};

pub use oauth2::{
    Diagnosis, GOOGLE_AUTH_URL, GOOGLE_PROFILE_URL, GOOGLE_TOKEN_URL, LIKELY_CAUSES, OAUTH2_SCOPES,
    OAuth2Error, Profile, ProviderEndpoints, ProviderError, ProviderStage, TokenPair,
    build_consent_url, diagnose, extract_authorization_code,
};

pub use prompt::{ClosingGuard, LineSource, PromptError, ScriptedLines, StdinLines};
