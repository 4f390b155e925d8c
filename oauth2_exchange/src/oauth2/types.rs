use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use super::errors::OAuth2Error;

/// Raw body of a successful token endpoint response
#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    pub(super) access_token: Option<String>,
    pub(super) refresh_token: Option<String>,
    pub(super) expires_in: Option<i64>,
    pub(super) token_type: Option<String>,
    pub(super) scope: Option<String>,
}

impl TokenResponse {
    /// Convert into a [`TokenPair`], stamping the expiry relative to `now`.
    ///
    /// The exchange only counts as successful when an access token is present.
    pub(super) fn into_token_pair(self, now: DateTime<Utc>) -> Result<TokenPair, OAuth2Error> {
        let access_token = self
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or(OAuth2Error::MissingAccessToken)?;

        Ok(TokenPair {
            access_token,
            refresh_token: self.refresh_token.filter(|token| !token.is_empty()),
            expires_at: self
                .expires_in
                .and_then(Duration::try_seconds)
                .and_then(|ttl| now.checked_add_signed(ttl)),
            token_type: self.token_type,
            scope: self.scope,
        })
    }
}

/// Tokens obtained from one exchange. Held in memory only.
#[derive(Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "<redacted>"),
            )
            .field("expires_at", &self.expires_at)
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .finish()
    }
}

// The person resource we get back from the People API
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PeopleResponse {
    #[serde(default)]
    names: Vec<PersonName>,
    #[serde(default)]
    email_addresses: Vec<PersonEmail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersonName {
    display_name: Option<String>,
    #[serde(default)]
    metadata: FieldMetadata,
}

#[derive(Debug, Deserialize)]
struct PersonEmail {
    value: Option<String>,
    #[serde(default)]
    metadata: FieldMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct FieldMetadata {
    #[serde(default)]
    primary: bool,
}

/// Display name and primary email of the authenticated account.
///
/// Either may be absent; the caller prints a placeholder rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl From<PeopleResponse> for Profile {
    fn from(person: PeopleResponse) -> Self {
        let name = pick_primary(
            person
                .names
                .into_iter()
                .map(|n| (n.metadata.primary, n.display_name)),
        );
        let email = pick_primary(
            person
                .email_addresses
                .into_iter()
                .map(|e| (e.metadata.primary, e.value)),
        );
        Self { name, email }
    }
}

/// Primary non-empty value if flagged, otherwise the first non-empty one
fn pick_primary(entries: impl Iterator<Item = (bool, Option<String>)>) -> Option<String> {
    let mut first = None;
    for (primary, value) in entries {
        let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
            continue;
        };
        if primary {
            return Some(value);
        }
        if first.is_none() {
            first = Some(value);
        }
    }
    first
}
