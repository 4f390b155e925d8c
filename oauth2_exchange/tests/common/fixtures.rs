use serde_json::{Value, json};

use oauth2_exchange::Credentials;

pub const TEST_CLIENT_ID: &str = "client-123.apps.googleusercontent.com";
pub const TEST_CLIENT_SECRET: &str = "GOCSPX-test-secret";
pub const TEST_REDIRECT_URI: &str = "https://app.example.com/callback";
pub const TEST_ACCESS_TOKEN: &str = "ya29.mock-access-token";

pub fn test_credentials() -> Credentials {
    Credentials {
        client_id: TEST_CLIENT_ID.to_string(),
        client_secret: TEST_CLIENT_SECRET.to_string(),
        redirect_uri: TEST_REDIRECT_URI.to_string(),
    }
}

pub fn redirect_with_code(code: &str) -> String {
    format!("{TEST_REDIRECT_URI}?code={code}&scope=email%20profile")
}

pub fn token_success_body() -> Value {
    json!({
        "access_token": TEST_ACCESS_TOKEN,
        "refresh_token": "1//mock-refresh-token",
        "expires_in": 3599,
        "scope": "email profile https://www.googleapis.com/auth/gmail.send https://www.googleapis.com/auth/gmail.readonly",
        "token_type": "Bearer"
    })
}

pub fn profile_body() -> Value {
    json!({
        "resourceName": "people/1234567890",
        "etag": "%EgUBAi43PRoEAQIFByIMMkx",
        "names": [{
            "metadata": { "primary": true, "source": { "type": "PROFILE", "id": "1234567890" } },
            "displayName": "Test User",
            "givenName": "Test",
            "familyName": "User"
        }],
        "emailAddresses": [{
            "metadata": { "primary": true, "verified": true },
            "value": "test@example.com"
        }]
    })
}
