//! Client credentials read from the process environment

use std::fmt;

use thiserror::Error;

/// Environment variable holding the OAuth2 client identifier
pub const CLIENT_ID_VAR: &str = "GOOGLE_CLIENT_ID";

/// Environment variable holding the OAuth2 client secret
pub const CLIENT_SECRET_VAR: &str = "GOOGLE_CLIENT_SECRET";

/// Environment variable holding the redirect URI registered for the client
pub const REDIRECT_URI_VAR: &str = "GOOGLE_REDIRECT_URI";

/// The pre-provisioned client credentials under test.
///
/// Values are only checked for presence. A malformed client id or redirect URI
/// is left for the provider to reject, since that rejection is what the
/// exchange is meant to surface.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl Credentials {
    /// Read the three required values from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the three required values through `lookup`.
    ///
    /// Empty or whitespace-only values count as missing. Every missing name is
    /// collected so the operator can fix them all in one pass.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut read = |name: &'static str| match lookup(name) {
            Some(value) if !value.trim().is_empty() => value.trim().to_string(),
            _ => {
                missing.push(name);
                String::new()
            }
        };

        let client_id = read(CLIENT_ID_VAR);
        let client_secret = read(CLIENT_SECRET_VAR);
        let redirect_uri = read(REDIRECT_URI_VAR);

        if !missing.is_empty() {
            tracing::error!("Missing required configuration: {:?}", missing);
            return Err(ConfigError::Missing(missing));
        }

        Ok(Self {
            client_id,
            client_secret,
            redirect_uri,
        })
    }

    /// Length of the client secret in characters. The secret itself is never shown.
    pub fn secret_len(&self) -> usize {
        self.client_secret.chars().count()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &format_args!("<{} chars>", self.secret_len()),
            )
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

impl ConfigError {
    /// Names of the environment variables that were absent or empty
    pub fn missing(&self) -> &[&'static str] {
        match self {
            Self::Missing(names) => names,
        }
    }
}
