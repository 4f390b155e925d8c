//! Operator-facing console text.
//!
//! Every function writes to the given sink so tests can capture output. Token
//! values and the client secret never reach the sink.

use std::io::{self, Write};

use crate::config::{ConfigError, Credentials};
use crate::oauth2::{Diagnosis, LIKELY_CAUSES, OAuth2Error, Profile, TokenPair};

/// Printed for a profile field the provider did not return
pub const NOT_FOUND: &str = "Not found";

pub fn print_missing_config<W: Write>(out: &mut W, err: &ConfigError) -> io::Result<()> {
    writeln!(out, "Missing required configuration:")?;
    for name in err.missing() {
        writeln!(out, "  - {name}")?;
    }
    writeln!(
        out,
        "Set these environment variables (or add them to .env) and run again."
    )
}

pub(super) fn print_configuration<W: Write>(
    out: &mut W,
    credentials: &Credentials,
) -> io::Result<()> {
    writeln!(out, "OAuth2 configuration")?;
    writeln!(out, "  Client ID:      {}", credentials.client_id)?;
    writeln!(
        out,
        "  Client secret:  set ({} characters)",
        credentials.secret_len()
    )?;
    writeln!(out, "  Redirect URI:   {}", credentials.redirect_uri)?;
    writeln!(out)
}

pub(super) fn print_instructions<W: Write>(out: &mut W, consent_url: &str) -> io::Result<()> {
    writeln!(
        out,
        "Step 1. Open this URL in a browser and sign in with the account to test:"
    )?;
    writeln!(out)?;
    writeln!(out, "  {consent_url}")?;
    writeln!(out)?;
    writeln!(
        out,
        "Step 2. Grant every requested permission on the consent screen."
    )?;
    writeln!(
        out,
        "Step 3. The browser is sent to the redirect URI. The page itself may fail to load."
    )?;
    writeln!(out, "        Copy the full URL from the address bar.")?;
    writeln!(
        out,
        "Step 4. Paste the full redirect URL below and press Enter."
    )?;
    writeln!(out)?;
    write!(out, "Redirect URL: ")?;
    out.flush()
}

pub(super) fn print_no_code<W: Write>(
    out: &mut W,
    err: &OAuth2Error,
    diagnosis: Option<Diagnosis>,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Error: {err}")?;
    if let OAuth2Error::MissingCode {
        provider_error: Some(provider_error),
        description,
    } = err
    {
        match description {
            Some(description) => writeln!(out, "  Provider error: {provider_error} ({description})")?,
            None => writeln!(out, "  Provider error: {provider_error}")?,
        }
    }
    if let Some(diagnosis) = diagnosis {
        writeln!(out, "  Hint: {}", diagnosis.hint())?;
    }
    writeln!(
        out,
        "Paste the complete URL the browser was redirected to, including everything after '?'."
    )
}

pub(super) fn print_code_received<W: Write>(out: &mut W, code_len: usize) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Authorization code received ({code_len} characters). Exchanging it for tokens..."
    )
}

pub(super) fn print_tokens<W: Write>(out: &mut W, tokens: &TokenPair) -> io::Result<()> {
    writeln!(out, "Token exchange succeeded")?;
    writeln!(out, "  Access token:   present")?;
    match &tokens.refresh_token {
        Some(_) => writeln!(out, "  Refresh token:  present")?,
        None => writeln!(
            out,
            "  Refresh token:  missing (issued only when consent is granted with offline access)"
        )?,
    }
    match tokens.expires_at {
        Some(expires_at) => writeln!(out, "  Expiry:         present ({})", expires_at.to_rfc3339())?,
        None => writeln!(out, "  Expiry:         missing")?,
    }
    if let Some(scope) = &tokens.scope {
        writeln!(out, "  Granted scopes: {scope}")?;
    }
    writeln!(out)?;
    writeln!(out, "Fetching profile to verify the access token...")
}

pub(super) fn print_profile<W: Write>(out: &mut W, profile: &Profile) -> io::Result<()> {
    writeln!(out, "Profile")?;
    writeln!(
        out,
        "  Name:   {}",
        profile.name.as_deref().unwrap_or(NOT_FOUND)
    )?;
    writeln!(
        out,
        "  Email:  {}",
        profile.email.as_deref().unwrap_or(NOT_FOUND)
    )?;
    writeln!(out)?;
    writeln!(out, "Success: the OAuth2 client works end to end.")
}

pub(super) fn print_failure<W: Write>(
    out: &mut W,
    err: &OAuth2Error,
    diagnosis: Option<Diagnosis>,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Exchange failed: {err}")?;
    if let Some(payload) = err.payload() {
        writeln!(out, "Provider response:")?;
        let pretty = serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
        for line in pretty.lines() {
            writeln!(out, "  {line}")?;
        }
    }
    if let Some(diagnosis) = diagnosis {
        writeln!(out, "Most likely cause: {}", diagnosis.hint())?;
    }
    writeln!(out, "Common causes:")?;
    for (i, cause) in LIKELY_CAUSES.iter().enumerate() {
        writeln!(out, "  {}. {cause}", i + 1)?;
    }
    Ok(())
}
