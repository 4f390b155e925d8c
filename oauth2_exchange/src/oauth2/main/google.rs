use chrono::Utc;

use crate::config::Credentials;
use crate::oauth2::config::{PROFILE_PERSON_FIELDS, ProviderEndpoints};
use crate::oauth2::errors::{OAuth2Error, ProviderError, ProviderStage};
use crate::oauth2::types::{PeopleResponse, Profile, TokenPair, TokenResponse};

/// Trade an authorization code for a token pair. Exactly one request, no retry.
pub(crate) async fn exchange_code_for_token(
    client: &reqwest::Client,
    endpoints: &ProviderEndpoints,
    credentials: &Credentials,
    code: &str,
) -> Result<TokenPair, OAuth2Error> {
    let response = client
        .post(endpoints.token_url.as_str())
        .form(&[
            ("code", code),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("redirect_uri", credentials.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await
        .map_err(|e| OAuth2Error::TokenExchange(e.to_string()))?;

    let status = response.status();
    tracing::debug!("Token Exchange Response status: {}", status);

    let response_body = response
        .text()
        .await
        .map_err(|e| OAuth2Error::TokenExchange(e.to_string()))?;

    if !status.is_success() {
        let err = ProviderError::from_response_body(
            ProviderStage::TokenExchange,
            status.as_u16(),
            &response_body,
        );
        tracing::error!("Token exchange rejected: {}", err);
        return Err(OAuth2Error::Provider(err));
    }

    let token_response: TokenResponse = serde_json::from_str(&response_body)
        .map_err(|e| OAuth2Error::Serde(format!("Failed to deserialize token response: {e}")))?;

    tracing::debug!(
        "Token response: access_token={}, refresh_token={}, expires_in={:?}, scope={:?}",
        token_response.access_token.is_some(),
        token_response.refresh_token.is_some(),
        token_response.expires_in,
        token_response.scope
    );

    token_response.into_token_pair(Utc::now())
}

/// Fetch the display name and primary email of the token's owner
pub(crate) async fn fetch_profile(
    client: &reqwest::Client,
    endpoints: &ProviderEndpoints,
    access_token: &str,
) -> Result<Profile, OAuth2Error> {
    let response = client
        .get(endpoints.profile_url.as_str())
        .query(&[("personFields", PROFILE_PERSON_FIELDS)])
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| OAuth2Error::FetchProfile(e.to_string()))?;

    let status = response.status();
    let response_body = response
        .text()
        .await
        .map_err(|e| OAuth2Error::FetchProfile(e.to_string()))?;

    if !status.is_success() {
        let err = ProviderError::from_response_body(
            ProviderStage::ProfileFetch,
            status.as_u16(),
            &response_body,
        );
        tracing::error!("Profile fetch rejected: {}", err);
        return Err(OAuth2Error::Provider(err));
    }

    tracing::debug!("Profile response body: {:#?}", response_body);
    let person: PeopleResponse = serde_json::from_str(&response_body)
        .map_err(|e| OAuth2Error::Serde(format!("Failed to deserialize profile response: {e}")))?;

    Ok(Profile::from(person))
}
