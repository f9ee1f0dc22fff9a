//! Process configuration for GA4 credentials and API endpoints.
//!
//! Resolved once from the environment and cached for the process lifetime:
//! 1. `GA_CREDENTIALS` — inline service-account JSON (highest priority)
//! 2. `GA_CREDENTIALS_PATH` — path to a service-account key file
//! 3. `~/.google-analytics-mcp/credentials.json` — default key file
//!
//! `GA_ADMIN_API_URL` and `GA_DATA_API_URL` override the API base URLs.

use std::path::PathBuf;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use secrecy::SecretString;
use tracing::debug;

pub const CREDENTIALS_ENV: &str = "GA_CREDENTIALS";
pub const CREDENTIALS_PATH_ENV: &str = "GA_CREDENTIALS_PATH";
pub const ADMIN_API_URL_ENV: &str = "GA_ADMIN_API_URL";
pub const DATA_API_URL_ENV: &str = "GA_DATA_API_URL";

pub const DEFAULT_ADMIN_API_URL: &str = "https://analyticsadmin.googleapis.com/v1beta";
pub const DEFAULT_DATA_API_URL: &str = "https://analyticsdata.googleapis.com/v1beta";

const DEFAULT_CREDENTIALS_DIR: &str = ".google-analytics-mcp";
const DEFAULT_CREDENTIALS_FILENAME: &str = "credentials.json";

/// OAuth scopes requested for every token.
pub const SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/analytics.edit",
    "https://www.googleapis.com/auth/analytics.readonly",
];

static GLOBAL: OnceCell<Arc<Config>> = OnceCell::new();

/// Base URLs for the two GA4 API surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    pub admin_base_url: String,
    pub data_base_url: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            admin_base_url: DEFAULT_ADMIN_API_URL.to_string(),
            data_base_url: DEFAULT_DATA_API_URL.to_string(),
        }
    }
}

impl ApiEndpoints {
    /// Point both API surfaces at one base URL (mock servers in tests).
    pub fn single(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            admin_base_url: base_url.clone(),
            data_base_url: base_url,
        }
    }
}

/// Immutable credential source configuration.
#[derive(Debug)]
pub struct Config {
    /// Raw service-account JSON from `GA_CREDENTIALS`.
    pub credentials_json: Option<SecretString>,
    /// Key file fallback.
    pub credentials_path: PathBuf,
    pub endpoints: ApiEndpoints,
}

impl Config {
    /// Resolve configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let credentials_path = non_empty(CREDENTIALS_PATH_ENV)
            .map(|p| expand_path(&p))
            .unwrap_or_else(default_credentials_path);

        let endpoints = ApiEndpoints {
            admin_base_url: non_empty(ADMIN_API_URL_ENV)
                .unwrap_or_else(|| DEFAULT_ADMIN_API_URL.to_string()),
            data_base_url: non_empty(DATA_API_URL_ENV)
                .unwrap_or_else(|| DEFAULT_DATA_API_URL.to_string()),
        };

        Self {
            credentials_json: non_empty(CREDENTIALS_ENV).map(SecretString::from),
            credentials_path,
            endpoints,
        }
    }

    /// Build a configuration that reads credentials from an inline JSON payload.
    pub fn with_inline_credentials(json: impl Into<String>, endpoints: ApiEndpoints) -> Self {
        Self {
            credentials_json: Some(SecretString::from(json.into())),
            credentials_path: default_credentials_path(),
            endpoints,
        }
    }

    /// Build a configuration that reads credentials from a key file.
    pub fn with_credentials_path(path: impl Into<PathBuf>, endpoints: ApiEndpoints) -> Self {
        Self {
            credentials_json: None,
            credentials_path: path.into(),
            endpoints,
        }
    }

    /// Process-wide configuration, resolved from the environment on first access.
    ///
    /// Concurrent first calls race to initialize; exactly one value wins and
    /// every caller observes it.
    pub fn shared() -> Arc<Config> {
        GLOBAL
            .get_or_init(|| {
                let config = Config::from_env();
                debug!(
                    inline = config.credentials_json.is_some(),
                    path = %config.credentials_path.display(),
                    "Resolved GA4 configuration"
                );
                Arc::new(config)
            })
            .clone()
    }
}

/// `~/.google-analytics-mcp/credentials.json`
pub fn default_credentials_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(DEFAULT_CREDENTIALS_DIR)
        .join(DEFAULT_CREDENTIALS_FILENAME)
}

/// Expand a leading `~/` to the home directory.
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
