//! Fixture credentials for tests against mock token endpoints.

pub const TEST_CLIENT_EMAIL: &str = "ga4-mcp@ga4-mcp-test.iam.gserviceaccount.com";

/// Throwaway 2048-bit RSA key, never registered with any project.
pub const TEST_PRIVATE_KEY_PEM: &str = include_str!("../tests/fixtures/service_account_key.pem");

/// Public half of [`TEST_PRIVATE_KEY_PEM`], for verifying signed assertions.
pub const TEST_PUBLIC_KEY_PEM: &str = include_str!("../tests/fixtures/service_account_key.pub.pem");

/// Service-account key JSON whose token endpoint is `token_uri`.
pub fn service_account_json(token_uri: &str) -> String {
    serde_json::json!({
        "type": "service_account",
        "project_id": "ga4-mcp-test",
        "private_key_id": "test-key-id",
        "private_key": TEST_PRIVATE_KEY_PEM,
        "client_email": TEST_CLIENT_EMAIL,
        "client_id": "100000000000000000001",
        "auth_uri": "https://accounts.google.com/o/oauth2/auth",
        "token_uri": token_uri,
    })
    .to_string()
}
