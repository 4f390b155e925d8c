use std::env;

/// Google's authorization (consent) endpoint
pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Google's token endpoint
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// People API endpoint for the authenticated user's own profile
pub const GOOGLE_PROFILE_URL: &str = "https://people.googleapis.com/v1/people/me";

/// Scopes requested on every consent
pub const OAUTH2_SCOPES: [&str; 4] = [
    "profile",
    "email",
    "https://www.googleapis.com/auth/gmail.send",
    "https://www.googleapis.com/auth/gmail.readonly",
];

// Supported parameters:
// response_type: code
// access_type: online, offline(for refresh token)
// prompt: none, consent, select_account
pub(super) const OAUTH2_RESPONSE_TYPE: &str = "code";
pub(super) const OAUTH2_ACCESS_TYPE: &str = "offline";
pub(super) const OAUTH2_PROMPT: &str = "consent";

/// Profile lookup is limited to these person fields
pub(super) const PROFILE_PERSON_FIELDS: &str = "names,emailAddresses";

/// Provider endpoints used by one exchange run.
///
/// Each URL defaults to Google's and can be overridden from the environment,
/// which is how tests point the flow at a local mock provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoints {
    pub auth_url: String,
    pub token_url: String,
    pub profile_url: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            auth_url: GOOGLE_AUTH_URL.to_string(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
            profile_url: GOOGLE_PROFILE_URL.to_string(),
        }
    }
}

impl ProviderEndpoints {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolve each endpoint, preferring a non-empty override from `lookup`
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let resolve = |name: &str, default: &str| match lookup(name) {
            Some(url) if !url.trim().is_empty() => {
                tracing::debug!("Using {} from environment: {}", name, url);
                url.trim().to_string()
            }
            _ => default.to_string(),
        };

        Self {
            auth_url: resolve("OAUTH2_AUTH_URL", GOOGLE_AUTH_URL),
            token_url: resolve("OAUTH2_TOKEN_URL", GOOGLE_TOKEN_URL),
            profile_url: resolve("OAUTH2_PROFILE_URL", GOOGLE_PROFILE_URL),
        }
    }
}
