use std::io::Write;

use crate::config::Credentials;
use crate::oauth2::{
    Diagnosis, OAuth2Error, Profile, ProviderEndpoints, TokenPair, build_consent_url, diagnose,
    exchange_code_for_token, extract_authorization_code, fetch_profile, get_client,
};
use crate::prompt::{ClosingGuard, LineSource};

use super::errors::ExchangeError;
use super::report;

/// Where a run is, or where it stopped.
///
/// No state is revisited. `MissingConfig`, `NoCode`, `ExchangeFailed` and
/// `Done` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    MissingConfig,
    AwaitingInput,
    CodeExtracted,
    TokenExchanged,
    ProfileFetched,
    Done,
    NoCode,
    ExchangeFailed,
}

impl FlowState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::MissingConfig | Self::Done | Self::NoCode | Self::ExchangeFailed
        )
    }
}

/// How a run that reached the prompt ended
#[derive(Debug)]
pub enum Outcome {
    /// Tokens obtained and the profile call accepted the access token
    Verified { tokens: TokenPair, profile: Profile },
    /// The pasted input held no usable authorization code; nothing was sent
    NoCode(OAuth2Error),
    /// The token or profile call failed
    ExchangeFailed {
        error: OAuth2Error,
        diagnosis: Option<Diagnosis>,
    },
}

impl Outcome {
    pub fn final_state(&self) -> FlowState {
        match self {
            Self::Verified { .. } => FlowState::Done,
            Self::NoCode(_) => FlowState::NoCode,
            Self::ExchangeFailed { .. } => FlowState::ExchangeFailed,
        }
    }
}

fn advance(state: &mut FlowState, next: FlowState) {
    tracing::debug!("Exchange flow: {:?} -> {:?}", state, next);
    *state = next;
}

/// Run one interactive exchange.
///
/// Prints the configuration summary and consent URL, waits for one pasted
/// redirect URL, exchanges its code once and fetches the profile with the new
/// access token. Provider failures and bad input are reported on `out` and
/// returned as an [`Outcome`]; only local failures (console, stdin, an invalid
/// endpoint override) are errors.
///
/// `source` is closed before this returns, on every path.
pub async fn run_exchange<S, W>(
    credentials: &Credentials,
    endpoints: &ProviderEndpoints,
    source: S,
    out: &mut W,
) -> Result<Outcome, ExchangeError>
where
    S: LineSource,
    W: Write,
{
    let mut input = ClosingGuard::new(source);
    let mut state = FlowState::AwaitingInput;

    report::print_configuration(out, credentials)?;
    let consent_url = build_consent_url(credentials, endpoints)?;
    report::print_instructions(out, &consent_url)?;

    tracing::info!("Waiting for the redirect URL");
    let Some(line) = input.next_line().await? else {
        let err = OAuth2Error::InvalidRedirectUrl(
            "input ended before a redirect URL was entered".to_string(),
        );
        return stop_without_code(out, &mut state, err);
    };

    let code = match extract_authorization_code(&line) {
        Ok(code) => code,
        Err(err) => return stop_without_code(out, &mut state, err),
    };
    advance(&mut state, FlowState::CodeExtracted);
    report::print_code_received(out, code.len())?;

    let client = get_client()?;

    let tokens = match exchange_code_for_token(&client, endpoints, credentials, &code).await {
        Ok(tokens) => tokens,
        Err(err) => return stop_with_failure(out, &mut state, err),
    };
    advance(&mut state, FlowState::TokenExchanged);
    tracing::info!(
        "Token exchange succeeded (refresh token: {})",
        tokens.refresh_token.is_some()
    );
    report::print_tokens(out, &tokens)?;

    let profile = match fetch_profile(&client, endpoints, &tokens.access_token).await {
        Ok(profile) => profile,
        Err(err) => return stop_with_failure(out, &mut state, err),
    };
    advance(&mut state, FlowState::ProfileFetched);
    report::print_profile(out, &profile)?;

    advance(&mut state, FlowState::Done);
    Ok(Outcome::Verified { tokens, profile })
}

fn stop_without_code<W: Write>(
    out: &mut W,
    state: &mut FlowState,
    err: OAuth2Error,
) -> Result<Outcome, ExchangeError> {
    tracing::info!("No authorization code: {}", err);
    report::print_no_code(out, &err, diagnose(&err))?;
    advance(state, FlowState::NoCode);
    Ok(Outcome::NoCode(err))
}

fn stop_with_failure<W: Write>(
    out: &mut W,
    state: &mut FlowState,
    error: OAuth2Error,
) -> Result<Outcome, ExchangeError> {
    tracing::error!("Exchange failed: {}", error);
    let diagnosis = diagnose(&error);
    report::print_failure(out, &error, diagnosis)?;
    advance(state, FlowState::ExchangeFailed);
    Ok(Outcome::ExchangeFailed { error, diagnosis })
}
