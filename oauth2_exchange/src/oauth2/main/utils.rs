use std::time::Duration;

use crate::oauth2::errors::OAuth2Error;

/// Creates the HTTP client used for both provider calls.
///
/// - `timeout`: 30 seconds, so an unreachable provider is reported as an
///   error instead of leaving the run hanging after the operator pasted a URL.
/// - `pool_idle_timeout` / `pool_max_idle_per_host`: reqwest defaults. A run
///   makes at most two requests to two hosts.
pub(crate) fn get_client() -> Result<reqwest::Client, OAuth2Error> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .map_err(|e| OAuth2Error::Internal(format!("Failed to create HTTP client: {e}")))
}
