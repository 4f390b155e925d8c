mod config;
mod diagnostics;
mod errors;
mod main;
mod types;

pub use config::{
    GOOGLE_AUTH_URL, GOOGLE_PROFILE_URL, GOOGLE_TOKEN_URL, OAUTH2_SCOPES, ProviderEndpoints,
};
pub use diagnostics::{Diagnosis, LIKELY_CAUSES, diagnose};
pub use errors::{OAuth2Error, ProviderError, ProviderStage};
pub use main::{build_consent_url, extract_authorization_code};
pub use types::{Profile, TokenPair};

pub(crate) use main::{exchange_code_for_token, fetch_profile, get_client};
