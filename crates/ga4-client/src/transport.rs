//! Authenticated JSON transport shared by the Admin and Data clients.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::AccessToken;
use crate::error::{ClientError, ClientResult};

const PAGE_SIZE: &str = "200";

/// Google API error envelope: `{"error": {"code", "message", "status"}}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Bearer-authenticated JSON calls against one API base URL.
#[derive(Debug, Clone)]
pub struct ApiTransport {
    http: reqwest::Client,
    base_url: String,
    token: Arc<AccessToken>,
}

impl ApiTransport {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, token: Arc<AccessToken>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ClientResult<T> {
        debug!(method = "GET", path, "GA4 API call");
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(self.token.secret())
            .query(query)
            .send()
            .await?;
        decode(path, response).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        debug!(method = "POST", path, "GA4 API call");
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(self.token.secret())
            .json(body)
            .send()
            .await?;
        decode(path, response).await
    }

    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        self.delete_returning::<serde_json::Value>(path)
            .await
            .map(|_| ())
    }

    /// DELETE whose response body is the affected resource.
    pub async fn delete_returning<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        debug!(method = "DELETE", path, "GA4 API call");
        let response = self
            .http
            .delete(self.url(path))
            .bearer_auth(self.token.secret())
            .send()
            .await?;
        decode(path, response).await
    }

    /// Fetch every page of a list endpoint and collect the `collection` array.
    ///
    /// An absent collection (the API omits empty lists) yields an empty Vec.
    pub async fn list_all<T: DeserializeOwned>(
        &self,
        path: &str,
        collection: &str,
        query: &[(&str, &str)],
    ) -> ClientResult<Vec<T>> {
        let mut items = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut params: Vec<(&str, &str)> = query.to_vec();
            params.push(("pageSize", PAGE_SIZE));
            if let Some(token) = page_token.as_deref() {
                params.push(("pageToken", token));
            }

            let mut page: serde_json::Value = self.get(path, &params).await?;

            if let Some(serde_json::Value::Array(values)) =
                page.get_mut(collection).map(serde_json::Value::take)
            {
                for value in values {
                    items.push(serde_json::from_value(value)?);
                }
            }

            match page
                .get("nextPageToken")
                .and_then(serde_json::Value::as_str)
                .filter(|t| !t.is_empty())
            {
                Some(next) => page_token = Some(next.to_string()),
                None => break,
            }
        }

        debug!(path, collection, count = items.len(), "Listed resources");
        Ok(items)
    }
}

async fn check_status(path: &str, response: reqwest::Response) -> ClientResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => match envelope.error.status {
            Some(code) => format!("{} ({})", envelope.error.message, code),
            None => envelope.error.message,
        },
        Err(_) => body,
    };
    warn!(path, status = status.as_u16(), %message, "GA4 API call failed");
    Err(ClientError::api_error(status.as_u16(), message))
}

async fn decode<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> ClientResult<T> {
    let response = check_status(path, response).await?;
    let bytes = response.bytes().await?;
    // Some endpoints answer with no body at all
    if bytes.is_empty() {
        return Ok(serde_json::from_str("{}")?);
    }
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn transport(base_url: String) -> ApiTransport {
        let token = Arc::new(AccessToken::new("ya29.test", Utc::now() + Duration::hours(1)));
        ApiTransport::new(reqwest::Client::new(), base_url, token)
    }

    #[tokio::test]
    async fn test_get_sends_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1beta/properties/1")
            .match_header("authorization", "Bearer ya29.test")
            .with_status(200)
            .with_body(r#"{"name":"properties/1"}"#)
            .create_async()
            .await;

        let t = transport(format!("{}/v1beta/", server.url()));
        let value: serde_json::Value = t.get("properties/1", &[]).await.unwrap();
        mock.assert_async().await;
        assert_eq!(value["name"], "properties/1");
    }

    #[tokio::test]
    async fn test_api_error_message_extracted() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/properties/404")
            .with_status(404)
            .with_body(
                r#"{"error":{"code":404,"message":"Requested entity was not found.","status":"NOT_FOUND"}}"#,
            )
            .create_async()
            .await;

        let t = transport(server.url());
        let err = t
            .get::<serde_json::Value>("properties/404", &[])
            .await
            .unwrap_err();
        match err {
            ClientError::ApiError { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Requested entity was not found. (NOT_FOUND)");
            }
            other => panic!("Expected ApiError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_api_error_raw_body_fallback() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/x")
            .with_status(502)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let err = transport(server.url()).delete("x").await.unwrap_err();
        assert_eq!(err.to_string(), "API error: 502 - upstream exploded");
    }

    #[tokio::test]
    async fn test_list_all_follows_page_tokens() {
        let mut server = mockito::Server::new_async().await;
        let first = server
            .mock("GET", "/accounts")
            .match_query(mockito::Matcher::Exact("pageSize=200".into()))
            .with_status(200)
            .with_body(r#"{"accounts":[{"name":"accounts/1"}],"nextPageToken":"p2"}"#)
            .create_async()
            .await;
        let second = server
            .mock("GET", "/accounts")
            .match_query(mockito::Matcher::Exact("pageSize=200&pageToken=p2".into()))
            .with_status(200)
            .with_body(r#"{"accounts":[{"name":"accounts/2"}]}"#)
            .create_async()
            .await;

        let items: Vec<serde_json::Value> = transport(server.url())
            .list_all("accounts", "accounts", &[])
            .await
            .unwrap();
        first.assert_async().await;
        second.assert_async().await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["name"], "accounts/2");
    }

    #[tokio::test]
    async fn test_list_all_empty_collection() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/accounts")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let items: Vec<serde_json::Value> = transport(server.url())
            .list_all("accounts", "accounts", &[])
            .await
            .unwrap();
        assert!(items.is_empty());
    }
}
