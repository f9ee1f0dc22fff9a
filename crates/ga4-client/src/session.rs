//! Authenticated session: one access token and the two API clients built on it.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::admin::AdminClient;
use crate::auth::Credentials;
use crate::config::Config;
use crate::data::DataClient;
use crate::error::{ClientError, ClientResult};
use crate::transport::ApiTransport;

/// Admin and Data clients sharing one HTTP client and bearer token.
#[derive(Debug, Clone)]
pub struct AnalyticsSession {
    admin: AdminClient,
    data: DataClient,
    principal: String,
}

impl AnalyticsSession {
    /// Resolve credentials from `config` and obtain a fresh access token.
    ///
    /// Fails with [`ClientError::NotConfigured`] before any network call when
    /// no usable credential exists.
    pub async fn connect(config: Arc<Config>) -> ClientResult<Self> {
        let (credentials, assertion) = {
            let config = Arc::clone(&config);
            tokio::task::spawn_blocking(move || {
                let credentials = Credentials::resolve(&config)?;
                let assertion = credentials.signed_assertion(Utc::now())?;
                Ok::<_, ClientError>((credentials, assertion))
            })
            .await
            .map_err(|e| ClientError::Internal(format!("credential task failed: {e}")))??
        };

        let http = reqwest::Client::new();
        let token = Arc::new(credentials.exchange(&http, &assertion).await?);
        debug!(principal = %credentials.client_email(), expires_at = %token.expires_at, "GA4 session ready");

        let endpoints = &config.endpoints;
        Ok(Self {
            admin: AdminClient::new(ApiTransport::new(
                http.clone(),
                endpoints.admin_base_url.as_str(),
                Arc::clone(&token),
            )),
            data: DataClient::new(ApiTransport::new(
                http,
                endpoints.data_base_url.as_str(),
                token,
            )),
            principal: credentials.client_email().to_string(),
        })
    }

    pub fn admin(&self) -> &AdminClient {
        &self.admin
    }

    pub fn data(&self) -> &DataClient {
        &self.data
    }

    /// Service account the session acts as.
    pub fn principal(&self) -> &str {
        &self.principal
    }
}
