//! Axum-based mock OAuth2 provider for exchange flow tests
//!
//! Each test starts its own server on an ephemeral loopback port, so tests
//! can run in parallel with different canned replies.

use axum::{
    Json, Router,
    extract::{Form, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    routing::{get, post},
};
use serde_json::Value;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use oauth2_exchange::ProviderEndpoints;

/// Status and JSON body returned by one mock endpoint
#[derive(Clone, Debug)]
pub struct MockReply {
    pub status: StatusCode,
    pub body: Value,
}

impl MockReply {
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn error(status: u16, body: Value) -> Self {
        Self {
            status: StatusCode::from_u16(status).expect("valid status code"),
            body,
        }
    }
}

/// A profile request as the mock saw it
#[derive(Clone, Debug)]
pub struct ProfileRequest {
    pub authorization: Option<String>,
    pub query: HashMap<String, String>,
}

#[derive(Clone)]
struct MockState {
    token_reply: MockReply,
    profile_reply: MockReply,
    token_requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
    profile_requests: Arc<Mutex<Vec<ProfileRequest>>>,
}

/// Handle to a running mock provider
pub struct MockProvider {
    pub base_url: String,
    state: MockState,
}

impl MockProvider {
    pub async fn start(token_reply: MockReply, profile_reply: MockReply) -> Self {
        let state = MockState {
            token_reply,
            profile_reply,
            token_requests: Arc::default(),
            profile_requests: Arc::default(),
        };

        let app = Router::new()
            .route("/token", post(token))
            .route("/v1/people/me", get(profile))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock provider");
        let addr = listener.local_addr().expect("mock provider address");

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                println!("Mock provider error: {e}");
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Endpoints that send token and profile calls here; the consent URL stays Google's
    pub fn endpoints(&self) -> ProviderEndpoints {
        ProviderEndpoints {
            token_url: format!("{}/token", self.base_url),
            profile_url: format!("{}/v1/people/me", self.base_url),
            ..ProviderEndpoints::default()
        }
    }

    pub fn token_requests(&self) -> Vec<HashMap<String, String>> {
        self.state.token_requests.lock().unwrap().clone()
    }

    pub fn profile_requests(&self) -> Vec<ProfileRequest> {
        self.state.profile_requests.lock().unwrap().clone()
    }
}

async fn token(
    State(state): State<MockState>,
    Form(params): Form<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.token_requests.lock().unwrap().push(params);
    (state.token_reply.status, Json(state.token_reply.body))
}

async fn profile(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);
    state
        .profile_requests
        .lock()
        .unwrap()
        .push(ProfileRequest {
            authorization,
            query,
        });
    (state.profile_reply.status, Json(state.profile_reply.body))
}
