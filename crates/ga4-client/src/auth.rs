//! Service-account authentication for the GA4 APIs.
//!
//! Credentials are loaded from the configured source, turned into a signed
//! RS256 assertion, and exchanged at the credential's token URI for a bearer
//! access token (OAuth 2.0 JWT bearer grant).

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{Config, SCOPES};
use crate::error::{ClientError, ClientResult};

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const EXPIRY_SKEW_SECS: i64 = 60;

pub const SETUP_GUIDE: &str = "\
Google Analytics MCP is not configured yet. Follow these steps:

1. Go to Google Cloud Console → IAM & Admin → Service Accounts
   https://console.cloud.google.com/iam-admin/serviceaccounts
   - Create a new project (or select an existing one)
   - Click \"+ Create Service Account\", give it any name, click \"Done\"

2. Create a JSON key:
   - Click the service account you just created
   - Go to \"Keys\" tab → \"Add Key\" → \"Create new key\" → JSON → Download

3. Enable the APIs in your GCP project:
   - Google Analytics Admin API: https://console.cloud.google.com/apis/library/analyticsadmin.googleapis.com
   - Google Analytics Data API: https://console.cloud.google.com/apis/library/analyticsdata.googleapis.com

4. Grant access in GA4:
   - Go to GA4 → Admin → Property Access Management
   - Click \"+\" → add the service account email (it looks like name@project.iam.gserviceaccount.com)
   - Give it \"Editor\" role

5. Configure this MCP server:
   - Open the JSON file you downloaded in step 2
   - Copy the entire content
   - Set it as the GA_CREDENTIALS environment variable in your MCP client config

   Example MCP client config:
   {
     \"mcpServers\": {
       \"google-analytics\": {
         \"command\": \"ga4-mcp\",
         \"env\": {
           \"GA_CREDENTIALS\": \"<paste the entire JSON here>\"
         }
       }
     }
   }

   Alternatively save the file to ~/.google-analytics-mcp/credentials.json
   or point GA_CREDENTIALS_PATH at it.

That's it! Restart your MCP client and try again.";

/// Service-account key file contents, as downloaded from the Cloud Console.
#[derive(Deserialize)]
struct ServiceAccountKey {
    #[serde(rename = "type")]
    key_type: String,
    #[serde(default)]
    project_id: Option<String>,
    #[serde(default)]
    private_key_id: Option<String>,
    private_key: SecretString,
    client_email: String,
    #[serde(default)]
    client_id: Option<String>,
    #[serde(default)]
    token_uri: Option<String>,
}

/// Loaded service-account credential: principal, scopes and signing key.
pub struct Credentials {
    client_email: String,
    client_id: Option<String>,
    project_id: Option<String>,
    private_key_id: Option<String>,
    token_uri: String,
    scopes: Vec<String>,
    signing_key: EncodingKey,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_email", &self.client_email)
            .field("client_id", &self.client_id)
            .field("project_id", &self.project_id)
            .field("token_uri", &self.token_uri)
            .field("scopes", &self.scopes)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    token_type: Option<String>,
}

/// OAuth bearer token with its expiry.
#[derive(Debug)]
pub struct AccessToken {
    token: SecretString,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: SecretString::from(token.into()),
            token_type: "Bearer".to_string(),
            expires_at,
        }
    }

    pub fn secret(&self) -> &str {
        self.token.expose_secret()
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() + Duration::seconds(EXPIRY_SKEW_SECS) >= self.expires_at
    }
}

/// Result of a local credential check (no network).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AuthStatus {
    Authenticated {
        authenticated: bool,
        service_account_email: String,
        project_id: Option<String>,
        scopes: Vec<String>,
    },
    Unauthenticated {
        authenticated: bool,
        reason: String,
    },
}

impl AuthStatus {
    /// Load credentials from `config` and report who they authenticate as.
    pub fn check(config: &Config) -> Self {
        match Credentials::resolve(config) {
            Ok(creds) => AuthStatus::Authenticated {
                authenticated: true,
                service_account_email: creds.client_email,
                project_id: creds.project_id,
                scopes: creds.scopes,
            },
            Err(e) => AuthStatus::Unauthenticated {
                authenticated: false,
                reason: e.to_string(),
            },
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthStatus::Authenticated { .. })
    }
}

impl Credentials {
    /// Resolve credentials: inline JSON first, then the key file.
    ///
    /// Any missing or invalid source yields [`ClientError::NotConfigured`].
    /// A malformed inline payload does not fall back to the key file.
    pub fn resolve(config: &Config) -> ClientResult<Self> {
        if let Some(inline) = &config.credentials_json {
            debug!("Loading service account from inline credentials");
            return Self::from_json(inline.expose_secret());
        }

        let path = &config.credentials_path;
        if !path.is_file() {
            debug!(path = %path.display(), "No credentials file found");
            return Err(ClientError::NotConfigured);
        }

        debug!(path = %path.display(), "Loading service account from file");
        let contents = std::fs::read_to_string(path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "Failed to read credentials file");
            ClientError::NotConfigured
        })?;
        Self::from_json(&contents)
    }

    /// Parse a service-account key payload.
    pub fn from_json(payload: &str) -> ClientResult<Self> {
        let key: ServiceAccountKey = serde_json::from_str(payload).map_err(|e| {
            warn!(error = %e, "Malformed service account JSON");
            ClientError::NotConfigured
        })?;

        if key.key_type != "service_account" {
            warn!(key_type = %key.key_type, "Credential is not a service account key");
            return Err(ClientError::NotConfigured);
        }
        if key.client_email.trim().is_empty() {
            warn!("Service account key has no client_email");
            return Err(ClientError::NotConfigured);
        }

        let signing_key = EncodingKey::from_rsa_pem(key.private_key.expose_secret().as_bytes())
            .map_err(|e| {
                warn!(error = %e, "Service account private key is not a valid RSA PEM");
                ClientError::NotConfigured
            })?;

        Ok(Self {
            client_email: key.client_email,
            client_id: key.client_id,
            project_id: key.project_id,
            private_key_id: key.private_key_id,
            token_uri: key
                .token_uri
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| DEFAULT_TOKEN_URI.to_string()),
            scopes: SCOPES.iter().map(|s| s.to_string()).collect(),
            signing_key,
        })
    }

    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub fn token_uri(&self) -> &str {
        &self.token_uri
    }

    /// Sign the JWT bearer assertion issued at `now`.
    pub fn signed_assertion(&self, now: DateTime<Utc>) -> ClientResult<String> {
        let iat = now.timestamp();
        let claims = AssertionClaims {
            iss: &self.client_email,
            scope: self.scopes.join(" "),
            aud: &self.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.private_key_id.clone();

        jsonwebtoken::encode(&header, &claims, &self.signing_key)
            .map_err(|e| ClientError::AuthError(format!("Failed to sign assertion: {}", e)))
    }

    /// Exchange a signed assertion for an access token.
    pub async fn exchange(
        &self,
        http: &reqwest::Client,
        assertion: &str,
    ) -> ClientResult<AccessToken> {
        debug!(token_uri = %self.token_uri, principal = %self.client_email, "Requesting access token");

        let response = http
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Token exchange rejected");
            return Err(ClientError::AuthError(format!(
                "token endpoint returned {}: {}",
                status.as_u16(),
                body
            )));
        }

        let token: TokenResponse = response.json().await?;
        let expires_in = token.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS);

        Ok(AccessToken {
            token: SecretString::from(token.access_token),
            token_type: token.token_type.unwrap_or_else(|| "Bearer".to_string()),
            expires_at: Utc::now() + Duration::seconds(expires_in),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiEndpoints;
    use crate::test_support::{
        service_account_json, TEST_CLIENT_EMAIL, TEST_PRIVATE_KEY_PEM, TEST_PUBLIC_KEY_PEM,
    };
    use std::io::Write;

    fn missing_path() -> std::path::PathBuf {
        std::env::temp_dir().join("ga4-client-tests-no-such-dir/credentials.json")
    }

    #[test]
    fn test_resolve_inline_credentials() {
        let config = Config::with_inline_credentials(
            service_account_json("https://oauth2.googleapis.com/token"),
            ApiEndpoints::default(),
        );
        let creds = Credentials::resolve(&config).unwrap();
        assert_eq!(creds.client_email(), TEST_CLIENT_EMAIL);
        assert_eq!(creds.project_id(), Some("ga4-mcp-test"));
        assert_eq!(creds.scopes().len(), 2);
        assert!(creds.scopes()[0].ends_with("analytics.edit"));
    }

    #[test]
    fn test_resolve_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(service_account_json("https://oauth2.googleapis.com/token").as_bytes())
            .unwrap();
        let config = Config::with_credentials_path(file.path(), ApiEndpoints::default());
        let creds = Credentials::resolve(&config).unwrap();
        assert_eq!(creds.client_email(), TEST_CLIENT_EMAIL);
    }

    #[test]
    fn test_missing_file_is_not_configured() {
        let config = Config::with_credentials_path(missing_path(), ApiEndpoints::default());
        let err = Credentials::resolve(&config).unwrap_err();
        assert!(err.is_not_configured());
    }

    #[test]
    fn test_malformed_inline_json_is_not_configured() {
        let config = Config::with_inline_credentials("{not json", ApiEndpoints::default());
        let err = Credentials::resolve(&config).unwrap_err();
        assert!(err.is_not_configured());
        assert_eq!(err.to_string(), SETUP_GUIDE);
    }

    #[test]
    fn test_malformed_file_is_not_configured() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[]").unwrap();
        let config = Config::with_credentials_path(file.path(), ApiEndpoints::default());
        assert!(Credentials::resolve(&config).unwrap_err().is_not_configured());
    }

    #[test]
    fn test_wrong_key_type_is_not_configured() {
        let payload = serde_json::json!({
            "type": "authorized_user",
            "client_email": TEST_CLIENT_EMAIL,
            "private_key": TEST_PRIVATE_KEY_PEM,
        })
        .to_string();
        assert!(Credentials::from_json(&payload)
            .unwrap_err()
            .is_not_configured());
    }

    #[test]
    fn test_invalid_private_key_is_not_configured() {
        let payload = serde_json::json!({
            "type": "service_account",
            "client_email": TEST_CLIENT_EMAIL,
            "private_key": "not a pem",
        })
        .to_string();
        assert!(Credentials::from_json(&payload)
            .unwrap_err()
            .is_not_configured());
    }

    #[test]
    fn test_default_token_uri() {
        let payload = serde_json::json!({
            "type": "service_account",
            "client_email": TEST_CLIENT_EMAIL,
            "private_key": TEST_PRIVATE_KEY_PEM,
        })
        .to_string();
        let creds = Credentials::from_json(&payload).unwrap();
        assert_eq!(creds.token_uri(), DEFAULT_TOKEN_URI);
    }

    #[test]
    fn test_key_fields_captured() {
        let creds = Credentials::from_json(&service_account_json(DEFAULT_TOKEN_URI)).unwrap();
        assert_eq!(creds.client_email(), TEST_CLIENT_EMAIL);
        assert_eq!(creds.client_id(), Some("100000000000000000001"));
        assert_eq!(creds.project_id(), Some("ga4-mcp-test"));
        assert!(!format!("{creds:?}").contains("PRIVATE KEY"));
    }

    #[test]
    fn test_signed_assertion_claims() {
        let creds =
            Credentials::from_json(&service_account_json("https://example.test/token")).unwrap();
        let now = Utc::now();
        let assertion = creds.signed_assertion(now).unwrap();

        let parts: Vec<&str> = assertion.split('.').collect();
        assert_eq!(parts.len(), 3);

        let header = jsonwebtoken::decode_header(&assertion).unwrap();
        assert_eq!(header.alg, Algorithm::RS256);
        assert_eq!(header.kid.as_deref(), Some("test-key-id"));

        let mut validation = jsonwebtoken::Validation::new(Algorithm::RS256);
        validation.set_audience(&["https://example.test/token"]);
        let public_key =
            jsonwebtoken::DecodingKey::from_rsa_pem(TEST_PUBLIC_KEY_PEM.as_bytes()).unwrap();
        let data =
            jsonwebtoken::decode::<serde_json::Value>(&assertion, &public_key, &validation)
                .unwrap();
        assert_eq!(data.claims["iss"], TEST_CLIENT_EMAIL);
        assert_eq!(data.claims["aud"], "https://example.test/token");
        assert_eq!(data.claims["iat"], now.timestamp());
        assert_eq!(data.claims["exp"], now.timestamp() + 3600);
        assert!(data.claims["scope"]
            .as_str()
            .unwrap()
            .contains("analytics.readonly"));
    }

    #[tokio::test]
    async fn test_exchange_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/token")
            .match_body(mockito::Matcher::UrlEncoded(
                "grant_type".into(),
                JWT_BEARER_GRANT.into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"ya29.test","expires_in":3599,"token_type":"Bearer"}"#)
            .create_async()
            .await;

        let creds =
            Credentials::from_json(&service_account_json(&format!("{}/token", server.url())))
                .unwrap();
        let assertion = creds.signed_assertion(Utc::now()).unwrap();
        let token = creds
            .exchange(&reqwest::Client::new(), &assertion)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(token.secret(), "ya29.test");
        assert_eq!(token.token_type, "Bearer");
        assert!(!token.is_expired());
    }

    #[tokio::test]
    async fn test_exchange_rejected_is_auth_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/token")
            .with_status(400)
            .with_body(r#"{"error":"invalid_grant","error_description":"Invalid JWT Signature."}"#)
            .create_async()
            .await;

        let creds =
            Credentials::from_json(&service_account_json(&format!("{}/token", server.url())))
                .unwrap();
        let assertion = creds.signed_assertion(Utc::now()).unwrap();
        let err = creds
            .exchange(&reqwest::Client::new(), &assertion)
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::AuthError(_)));
        assert!(err.to_string().contains("invalid_grant"));
    }

    #[test]
    fn test_access_token_expiry() {
        let expired = AccessToken::new("t", Utc::now() - Duration::seconds(1));
        assert!(expired.is_expired());
        let nearly = AccessToken::new("t", Utc::now() + Duration::seconds(30));
        assert!(nearly.is_expired());
        let fresh = AccessToken::new("t", Utc::now() + Duration::seconds(3600));
        assert!(!fresh.is_expired());
    }

    #[test]
    fn test_debug_hides_key_material() {
        let creds =
            Credentials::from_json(&service_account_json("https://example.test/token")).unwrap();
        let debug = format!("{creds:?}");
        assert!(debug.contains(TEST_CLIENT_EMAIL));
        assert!(!debug.contains("PRIVATE KEY"));

        let token = AccessToken::new("ya29.secret", Utc::now());
        assert!(!format!("{token:?}").contains("ya29.secret"));
    }

    #[test]
    fn test_auth_status_check() {
        let config = Config::with_inline_credentials(
            service_account_json("https://example.test/token"),
            ApiEndpoints::default(),
        );
        let status = AuthStatus::check(&config);
        assert!(status.is_authenticated());
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["authenticated"], true);
        assert_eq!(json["service_account_email"], TEST_CLIENT_EMAIL);
        assert_eq!(json["scopes"].as_array().unwrap().len(), 2);

        let config = Config::with_credentials_path(missing_path(), ApiEndpoints::default());
        let status = AuthStatus::check(&config);
        assert!(!status.is_authenticated());
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["authenticated"], false);
        assert_eq!(json["reason"], SETUP_GUIDE);
    }
}
