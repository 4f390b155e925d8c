//! Troubleshooting hints for a failed exchange.
//!
//! The fixed checklist is always printed. When the provider's error code or
//! HTTP status points at one cause, a targeted hint is printed first.

use super::errors::{OAuth2Error, ProviderStage};

/// Likely causes of any provider failure, in the order they are printed
pub const LIKELY_CAUSES: [&str; 4] = [
    "Client ID or client secret does not match the OAuth client in Google Cloud Console",
    "Gmail API or People API is not enabled for the Google Cloud project",
    "Redirect URI is not listed under the OAuth client's authorized redirect URIs",
    "OAuth consent screen is not configured, or the account is not an approved test user",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnosis {
    CredentialMismatch,
    RedirectUriNotAuthorized,
    InvalidGrant,
    ConsentScreen,
    ApiNotEnabled,
}

impl Diagnosis {
    pub fn hint(&self) -> &'static str {
        match self {
            Self::CredentialMismatch => {
                "The provider rejected the client credentials. Check GOOGLE_CLIENT_ID and GOOGLE_CLIENT_SECRET."
            }
            Self::RedirectUriNotAuthorized => {
                "GOOGLE_REDIRECT_URI is not an authorized redirect URI for this OAuth client."
            }
            Self::InvalidGrant => {
                "The authorization code was rejected. Codes are single-use and expire within minutes; \
                 they must also be exchanged with the same client and redirect URI that requested them."
            }
            Self::ConsentScreen => {
                "Consent was refused. Check the OAuth consent screen publishing status and test users."
            }
            Self::ApiNotEnabled => {
                "The API behind this call is not enabled for the project, or the token lacks its scope."
            }
        }
    }
}

/// Map a failure to a specific cause, when the evidence supports one
pub fn diagnose(error: &OAuth2Error) -> Option<Diagnosis> {
    match error {
        OAuth2Error::Provider(err) => {
            let by_code = err.error_code.as_deref().and_then(|code| match code {
                "invalid_client" | "unauthorized_client" => Some(Diagnosis::CredentialMismatch),
                "redirect_uri_mismatch" => Some(Diagnosis::RedirectUriNotAuthorized),
                "invalid_grant" => Some(Diagnosis::InvalidGrant),
                "access_denied" | "org_internal" | "admin_policy_enforced" => {
                    Some(Diagnosis::ConsentScreen)
                }
                "SERVICE_DISABLED" | "accessNotConfigured" | "ACCESS_TOKEN_SCOPE_INSUFFICIENT" => {
                    Some(Diagnosis::ApiNotEnabled)
                }
                "PERMISSION_DENIED" if err.stage == ProviderStage::ProfileFetch => {
                    Some(Diagnosis::ApiNotEnabled)
                }
                _ => None,
            });

            by_code.or(match (err.stage, err.status) {
                (ProviderStage::TokenExchange, 401) => Some(Diagnosis::CredentialMismatch),
                (ProviderStage::ProfileFetch, 403) => Some(Diagnosis::ApiNotEnabled),
                _ => None,
            })
        }
        OAuth2Error::MissingCode {
            provider_error: Some(code),
            ..
        } if code == "access_denied" => Some(Diagnosis::ConsentScreen),
        _ => None,
    }
}
