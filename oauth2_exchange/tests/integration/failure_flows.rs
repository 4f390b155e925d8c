use crate::common::{
    MockProvider, MockReply, profile_body, redirect_with_code, test_credentials,
    token_success_body,
};
use oauth2_exchange::{
    Diagnosis, FlowState, LIKELY_CAUSES, OAuth2Error, Outcome, ProviderEndpoints, ProviderStage,
    ScriptedLines, run_exchange,
};
use serde_json::json;
use std::sync::atomic::Ordering;

/// The token endpoint rejects the code with a structured payload
///
/// Expect the error message, the payload, a targeted hint and the full
/// checklist, then a graceful stop with the input closed.
#[tokio::test]
async fn test_token_exchange_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let provider = MockProvider::start(
        MockReply::error(
            400,
            json!({ "error": "invalid_grant", "error_description": "Bad Request" }),
        ),
        MockReply::ok(profile_body()),
    )
    .await;
    let source = ScriptedLines::new([redirect_with_code("ABC123")]);
    let closed = source.closed_flag();
    let mut out = Vec::new();

    let outcome = run_exchange(&test_credentials(), &provider.endpoints(), source, &mut out).await?;

    match &outcome {
        Outcome::ExchangeFailed { error, diagnosis } => {
            assert_eq!(*diagnosis, Some(Diagnosis::InvalidGrant));
            match error {
                OAuth2Error::Provider(err) => {
                    assert_eq!(err.stage, ProviderStage::TokenExchange);
                    assert_eq!(err.status, 400);
                    assert_eq!(err.error_code.as_deref(), Some("invalid_grant"));
                }
                other => panic!("Expected a provider error, got {other:?}"),
            }
        }
        other => panic!("Expected ExchangeFailed, got {other:?}"),
    }
    assert_eq!(outcome.final_state(), FlowState::ExchangeFailed);
    assert_eq!(provider.token_requests().len(), 1, "no retry");
    assert!(provider.profile_requests().is_empty());
    assert!(closed.load(Ordering::SeqCst));

    let output = String::from_utf8(out)?;
    assert!(output.contains("Exchange failed: Token exchange failed with HTTP 400: Bad Request"));
    assert!(output.contains("Provider response:"));
    assert!(output.contains("\"error\": \"invalid_grant\""));
    assert!(output.contains(Diagnosis::InvalidGrant.hint()));
    for cause in LIKELY_CAUSES {
        assert!(output.contains(cause), "missing cause: {cause}");
    }
    Ok(())
}

/// The exchange succeeds but the People API is disabled for the project
#[tokio::test]
async fn test_profile_fetch_forbidden() -> Result<(), Box<dyn std::error::Error>> {
    let provider = MockProvider::start(
        MockReply::ok(token_success_body()),
        MockReply::error(
            403,
            json!({
                "error": {
                    "code": 403,
                    "message": "People API has not been used in project 123 before or it is disabled.",
                    "status": "PERMISSION_DENIED",
                    "details": [{
                        "@type": "type.googleapis.com/google.rpc.ErrorInfo",
                        "reason": "SERVICE_DISABLED"
                    }]
                }
            }),
        ),
    )
    .await;
    let source = ScriptedLines::new([redirect_with_code("ABC123")]);
    let mut out = Vec::new();

    let outcome = run_exchange(&test_credentials(), &provider.endpoints(), source, &mut out).await?;

    match outcome {
        Outcome::ExchangeFailed { diagnosis, .. } => {
            assert_eq!(diagnosis, Some(Diagnosis::ApiNotEnabled));
        }
        other => panic!("Expected ExchangeFailed, got {other:?}"),
    }
    assert_eq!(provider.profile_requests().len(), 1);

    let output = String::from_utf8(out)?;
    // Token details are still reported before the profile failure
    assert!(output.contains("Token exchange succeeded"));
    assert!(output.contains("Profile fetch failed with HTTP 403"));
    assert!(output.contains("SERVICE_DISABLED"));
    Ok(())
}

/// A 200 response without an access token is not a successful exchange
#[tokio::test]
async fn test_token_response_without_access_token() -> Result<(), Box<dyn std::error::Error>> {
    let provider = MockProvider::start(
        MockReply::ok(json!({ "refresh_token": "1//orphan", "expires_in": 3599 })),
        MockReply::ok(profile_body()),
    )
    .await;
    let source = ScriptedLines::new([redirect_with_code("ABC123")]);
    let mut out = Vec::new();

    let outcome = run_exchange(&test_credentials(), &provider.endpoints(), source, &mut out).await?;

    assert!(matches!(
        outcome,
        Outcome::ExchangeFailed {
            error: OAuth2Error::MissingAccessToken,
            diagnosis: None
        }
    ));
    assert!(provider.profile_requests().is_empty());

    let output = String::from_utf8(out)?;
    assert!(output.contains("Access token not present in token response"));
    assert!(!output.contains("Provider response:"));
    Ok(())
}

/// Nothing is listening on the token endpoint
#[tokio::test]
async fn test_unreachable_token_endpoint() -> Result<(), Box<dyn std::error::Error>> {
    // Reserve a port, then free it so connections are refused
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let endpoints = ProviderEndpoints {
        token_url: format!("http://{addr}/token"),
        profile_url: format!("http://{addr}/v1/people/me"),
        ..ProviderEndpoints::default()
    };
    let source = ScriptedLines::new([redirect_with_code("ABC123")]);
    let closed = source.closed_flag();
    let mut out = Vec::new();

    let outcome = run_exchange(&test_credentials(), &endpoints, source, &mut out).await?;

    assert!(matches!(
        outcome,
        Outcome::ExchangeFailed {
            error: OAuth2Error::TokenExchange(_),
            diagnosis: None
        }
    ));
    assert!(closed.load(Ordering::SeqCst));

    let output = String::from_utf8(out)?;
    assert!(output.contains("Common causes:"));
    Ok(())
}
