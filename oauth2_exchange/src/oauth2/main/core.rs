use url::Url;

use crate::config::Credentials;
use crate::oauth2::config::{
    OAUTH2_ACCESS_TYPE, OAUTH2_PROMPT, OAUTH2_RESPONSE_TYPE, OAUTH2_SCOPES, ProviderEndpoints,
};
use crate::oauth2::errors::OAuth2Error;

/// Build the consent URL the operator opens in a browser.
///
/// Deterministic for a given client and endpoint: offline access so a refresh
/// token is issued, and `prompt=consent` so the consent screen is shown every
/// time instead of being silently skipped.
pub fn build_consent_url(
    credentials: &Credentials,
    endpoints: &ProviderEndpoints,
) -> Result<String, OAuth2Error> {
    let mut url = Url::parse(&endpoints.auth_url)
        .map_err(|e| OAuth2Error::InvalidEndpoint(format!("{}: {e}", endpoints.auth_url)))?;

    url.query_pairs_mut()
        .append_pair("client_id", &credentials.client_id)
        .append_pair("redirect_uri", &credentials.redirect_uri)
        .append_pair("response_type", OAUTH2_RESPONSE_TYPE)
        .append_pair("scope", &OAUTH2_SCOPES.join(" "))
        .append_pair("access_type", OAUTH2_ACCESS_TYPE)
        .append_pair("prompt", OAUTH2_PROMPT);

    tracing::debug!("Consent URL: {}", url);
    Ok(url.into())
}

/// Pull the authorization code out of a pasted post-consent redirect URL.
///
/// The operator pastes the whole URL, not just the code. When there is no
/// `code`, the provider's `error` / `error_description` are carried in the
/// error so the operator sees why consent did not complete.
pub fn extract_authorization_code(redirect_url: &str) -> Result<String, OAuth2Error> {
    let redirect_url = redirect_url.trim();
    let parsed = Url::parse(redirect_url)
        .map_err(|e| OAuth2Error::InvalidRedirectUrl(format!("{e}: {redirect_url:?}")))?;

    let mut code = None;
    let mut provider_error = None;
    let mut description = None;
    for (key, value) in parsed.query_pairs() {
        match key.as_ref() {
            "code" if !value.is_empty() => code = Some(value.into_owned()),
            "error" => provider_error = Some(value.into_owned()),
            "error_description" => description = Some(value.into_owned()),
            _ => {}
        }
    }

    match code {
        Some(code) => {
            tracing::debug!("Authorization code found ({} chars)", code.len());
            Ok(code)
        }
        None => {
            tracing::debug!(
                "No authorization code in redirect, provider error: {:?}",
                provider_error
            );
            Err(OAuth2Error::MissingCode {
                provider_error,
                description,
            })
        }
    }
}
