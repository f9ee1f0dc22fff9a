//! # Admin API client
//!
//! Account and property management against
//! `analyticsadmin.googleapis.com/v1beta`: properties, data streams, key
//! events, custom definitions, Google Ads links and Measurement Protocol
//! secrets.
//!
//! List methods walk every page and return an empty Vec when the API omits
//! the collection.

pub mod requests;
pub mod resources;

pub use requests::*;
pub use resources::*;

use tracing::info;

use crate::error::ClientResult;
use crate::transport::ApiTransport;

/// Typed Admin API operations over an authenticated transport.
#[derive(Debug, Clone)]
pub struct AdminClient {
    transport: ApiTransport,
}

impl AdminClient {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    // ===================================================================================
    // ACCOUNTS AND PROPERTIES
    // ===================================================================================

    pub async fn list_accounts(&self) -> ClientResult<Vec<Account>> {
        self.transport.list_all("accounts", "accounts", &[]).await
    }

    pub async fn list_properties(&self, account_id: &str) -> ClientResult<Vec<Property>> {
        let filter = properties_filter(account_id);
        self.transport
            .list_all("properties", "properties", &[("filter", filter.as_str())])
            .await
    }

    pub async fn create_property(&self, draft: &PropertyDraft) -> ClientResult<Property> {
        let property: Property = self.transport.post("properties", draft).await?;
        info!(name = %property.name, parent = %draft.parent, "Created property");
        Ok(property)
    }

    pub async fn get_property(&self, property_id: &str) -> ClientResult<Property> {
        self.transport.get(&property_name(property_id), &[]).await
    }

    /// Soft-delete a property. The API returns it with `delete_time` and
    /// `expire_time` set; it can be restored until then.
    pub async fn delete_property(&self, property_id: &str) -> ClientResult<Property> {
        let path = property_name(property_id);
        let property: Property = self.transport.delete_returning(&path).await?;
        info!(name = %path, "Moved property to trash");
        Ok(property)
    }

    // ===================================================================================
    // DATA STREAMS
    // ===================================================================================

    pub async fn list_data_streams(&self, property_id: &str) -> ClientResult<Vec<DataStream>> {
        let path = format!("{}/dataStreams", property_name(property_id));
        self.transport.list_all(&path, "dataStreams", &[]).await
    }

    pub async fn create_data_stream(
        &self,
        property_id: &str,
        draft: &DataStreamDraft,
    ) -> ClientResult<DataStream> {
        let path = format!("{}/dataStreams", property_name(property_id));
        let stream: DataStream = self.transport.post(&path, draft).await?;
        info!(
            name = %stream.name,
            measurement_id = stream.measurement_id().unwrap_or_default(),
            "Created data stream"
        );
        Ok(stream)
    }

    pub async fn delete_data_stream(&self, property_id: &str, stream_id: &str) -> ClientResult<()> {
        let path = data_stream_name(property_id, stream_id);
        self.transport.delete(&path).await?;
        info!(name = %path, "Deleted data stream");
        Ok(())
    }

    // ===================================================================================
    // KEY EVENTS
    // ===================================================================================

    pub async fn list_key_events(&self, property_id: &str) -> ClientResult<Vec<KeyEvent>> {
        let path = format!("{}/keyEvents", property_name(property_id));
        self.transport.list_all(&path, "keyEvents", &[]).await
    }

    pub async fn create_key_event(
        &self,
        property_id: &str,
        draft: &KeyEventDraft,
    ) -> ClientResult<KeyEvent> {
        let path = format!("{}/keyEvents", property_name(property_id));
        self.transport.post(&path, draft).await
    }

    pub async fn delete_key_event(&self, property_id: &str, key_event_id: &str) -> ClientResult<()> {
        let path = key_event_name(property_id, key_event_id);
        self.transport.delete(&path).await?;
        info!(name = %path, "Deleted key event");
        Ok(())
    }

    // ===================================================================================
    // CUSTOM DEFINITIONS
    // ===================================================================================

    pub async fn list_custom_dimensions(
        &self,
        property_id: &str,
    ) -> ClientResult<Vec<CustomDimension>> {
        let path = format!("{}/customDimensions", property_name(property_id));
        self.transport.list_all(&path, "customDimensions", &[]).await
    }

    pub async fn create_custom_dimension(
        &self,
        property_id: &str,
        draft: &CustomDimensionDraft,
    ) -> ClientResult<CustomDimension> {
        let path = format!("{}/customDimensions", property_name(property_id));
        self.transport.post(&path, draft).await
    }

    pub async fn list_custom_metrics(&self, property_id: &str) -> ClientResult<Vec<CustomMetric>> {
        let path = format!("{}/customMetrics", property_name(property_id));
        self.transport.list_all(&path, "customMetrics", &[]).await
    }

    pub async fn create_custom_metric(
        &self,
        property_id: &str,
        draft: &CustomMetricDraft,
    ) -> ClientResult<CustomMetric> {
        let path = format!("{}/customMetrics", property_name(property_id));
        self.transport.post(&path, draft).await
    }

    // ===================================================================================
    // INTEGRATIONS
    // ===================================================================================

    pub async fn list_google_ads_links(
        &self,
        property_id: &str,
    ) -> ClientResult<Vec<GoogleAdsLink>> {
        let path = format!("{}/googleAdsLinks", property_name(property_id));
        self.transport.list_all(&path, "googleAdsLinks", &[]).await
    }

    pub async fn create_google_ads_link(
        &self,
        property_id: &str,
        draft: &GoogleAdsLinkDraft,
    ) -> ClientResult<GoogleAdsLink> {
        let path = format!("{}/googleAdsLinks", property_name(property_id));
        self.transport.post(&path, draft).await
    }

    pub async fn list_measurement_protocol_secrets(
        &self,
        property_id: &str,
        stream_id: &str,
    ) -> ClientResult<Vec<MeasurementProtocolSecret>> {
        let path = format!(
            "{}/measurementProtocolSecrets",
            data_stream_name(property_id, stream_id)
        );
        self.transport
            .list_all(&path, "measurementProtocolSecrets", &[])
            .await
    }

    pub async fn create_measurement_protocol_secret(
        &self,
        property_id: &str,
        stream_id: &str,
        draft: &MeasurementProtocolSecretDraft,
    ) -> ClientResult<MeasurementProtocolSecret> {
        let path = format!(
            "{}/measurementProtocolSecrets",
            data_stream_name(property_id, stream_id)
        );
        let secret: MeasurementProtocolSecret = self.transport.post(&path, draft).await?;
        info!(name = %secret.name, "Created measurement protocol secret");
        Ok(secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AccessToken;
    use chrono::{Duration, Utc};
    use mockito::Matcher;
    use std::sync::Arc;

    fn client(base_url: String) -> AdminClient {
        let token = Arc::new(AccessToken::new("ya29.admin", Utc::now() + Duration::hours(1)));
        AdminClient::new(ApiTransport::new(reqwest::Client::new(), base_url, token))
    }

    #[tokio::test]
    async fn test_list_properties_sends_parent_filter() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/properties")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("filter".into(), "parent:accounts/77".into()),
                Matcher::UrlEncoded("pageSize".into(), "200".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"properties":[{"name":"properties/1","displayName":"Shop"}]}"#)
            .create_async()
            .await;

        let properties = client(server.url()).list_properties("77").await.unwrap();
        mock.assert_async().await;
        assert_eq!(properties.len(), 1);
        assert_eq!(properties[0].display_name.as_deref(), Some("Shop"));
    }

    #[tokio::test]
    async fn test_list_accounts_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/accounts")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let accounts = client(server.url()).list_accounts().await.unwrap();
        assert!(accounts.is_empty());
    }

    #[tokio::test]
    async fn test_create_property_posts_draft() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/properties")
            .match_header("authorization", "Bearer ya29.admin")
            .match_body(Matcher::Json(serde_json::json!({
                "parent": "accounts/9",
                "displayName": "Shop",
                "timeZone": "Europe/Rome",
                "currencyCode": "EUR",
            })))
            .with_status(200)
            .with_body(r#"{"name":"properties/500","displayName":"Shop","timeZone":"Europe/Rome"}"#)
            .create_async()
            .await;

        let property = client(server.url())
            .create_property(&PropertyDraft::new("9", "Shop", "Europe/Rome", "EUR"))
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(property.name, "properties/500");
    }

    #[tokio::test]
    async fn test_delete_property_returns_trashed_property() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/properties/500")
            .with_status(200)
            .with_body(
                r#"{"name":"properties/500","deleteTime":"2026-10-19T10:00:00Z","expireTime":"2026-12-18T10:00:00Z"}"#,
            )
            .create_async()
            .await;

        let property = client(server.url()).delete_property("500").await.unwrap();
        assert_eq!(property.delete_time.as_deref(), Some("2026-10-19T10:00:00Z"));
        assert!(property.expire_time.is_some());
    }

    #[tokio::test]
    async fn test_create_web_data_stream() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/properties/5/dataStreams")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "type": "WEB_DATA_STREAM",
                "displayName": "https://example.com",
                "webStreamData": {"defaultUri": "https://example.com"},
            })))
            .with_status(200)
            .with_body(
                r#"{"name":"properties/5/dataStreams/8","type":"WEB_DATA_STREAM","webStreamData":{"measurementId":"G-TEST123"}}"#,
            )
            .create_async()
            .await;

        let stream = client(server.url())
            .create_data_stream("5", &web_data_stream("https://example.com", ""))
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(stream.measurement_id(), Some("G-TEST123"));
    }

    #[tokio::test]
    async fn test_delete_key_event_empty_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/properties/5/keyEvents/k1")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        client(server.url()).delete_key_event("5", "k1").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_measurement_protocol_secrets_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/properties/5/dataStreams/8/measurementProtocolSecrets")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"measurementProtocolSecrets":[{"name":"properties/5/dataStreams/8/measurementProtocolSecrets/s1","displayName":"MCP Server","secretValue":"abc"}]}"#,
            )
            .create_async()
            .await;

        let secrets = client(server.url())
            .list_measurement_protocol_secrets("5", "8")
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(secrets[0].secret_value.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_permission_denied_surfaces_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/properties/5/customDimensions")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body(
                r#"{"error":{"code":403,"message":"The caller does not have permission","status":"PERMISSION_DENIED"}}"#,
            )
            .create_async()
            .await;

        let err = client(server.url())
            .list_custom_dimensions("5")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "api_error");
        assert!(err.to_string().contains("PERMISSION_DENIED"));
    }
}
