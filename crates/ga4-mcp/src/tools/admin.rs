//! Admin API tool implementations.
//!
//! Each function validates its arguments, opens a session from the shared
//! config and renders the result. Enum-valued arguments are parsed before any
//! credential is touched, so a bad scope fails the same way configured or not.

use std::sync::Arc;

use ga4_client::admin::{self, PropertyDraft};
use ga4_client::{AnalyticsSession, AuthStatus, ClientResult, Config};

use super::helpers::{format_json, list_or_message};
use super::params::{
    CreateCustomDimensionParams, CreateCustomMetricParams, CreateGoogleAdsLinkParams,
    CreateKeyEventParams, CreatePropertyParams, CreateWebDataStreamParams, DataStreamParams,
    DeleteKeyEventParams, ListPropertiesParams, MeasurementProtocolSecretParams, PropertyParams,
};

/// Local credential check; reports problems in the status instead of failing.
pub async fn check_auth_status(config: Arc<Config>) -> String {
    match tokio::task::spawn_blocking(move || AuthStatus::check(&config)).await {
        Ok(status) => format_json(&status),
        Err(e) => format_json(&AuthStatus::Unauthenticated {
            authenticated: false,
            reason: format!("credential check failed: {e}"),
        }),
    }
}

// ── Accounts and properties ──

pub async fn list_accounts(config: Arc<Config>) -> ClientResult<String> {
    let session = AnalyticsSession::connect(config).await?;
    let accounts = session.admin().list_accounts().await?;
    Ok(list_or_message(&accounts, || {
        "No accounts found. Make sure you have access to at least one Google Analytics account."
            .to_string()
    }))
}

pub async fn list_properties(
    config: Arc<Config>,
    params: ListPropertiesParams,
) -> ClientResult<String> {
    let session = AnalyticsSession::connect(config).await?;
    let properties = session.admin().list_properties(&params.account_id).await?;
    Ok(list_or_message(&properties, || {
        format!("No properties found for account {}.", params.account_id)
    }))
}

pub async fn create_property(
    config: Arc<Config>,
    params: CreatePropertyParams,
) -> ClientResult<String> {
    let draft = PropertyDraft::new(
        &params.account_id,
        &params.display_name,
        &params.time_zone,
        &params.currency_code,
    );
    let session = AnalyticsSession::connect(config).await?;
    let property = session.admin().create_property(&draft).await?;
    Ok(format_json(&property))
}

pub async fn get_property(config: Arc<Config>, params: PropertyParams) -> ClientResult<String> {
    let session = AnalyticsSession::connect(config).await?;
    let property = session.admin().get_property(&params.property_id).await?;
    Ok(format_json(&property))
}

pub async fn delete_property(config: Arc<Config>, params: PropertyParams) -> ClientResult<String> {
    let session = AnalyticsSession::connect(config).await?;
    let property = session.admin().delete_property(&params.property_id).await?;
    Ok(format_json(&property))
}

// ── Data streams ──

pub async fn list_data_streams(
    config: Arc<Config>,
    params: PropertyParams,
) -> ClientResult<String> {
    let session = AnalyticsSession::connect(config).await?;
    let streams = session.admin().list_data_streams(&params.property_id).await?;
    Ok(list_or_message(&streams, || {
        format!("No data streams found for property {}.", params.property_id)
    }))
}

pub async fn create_web_data_stream(
    config: Arc<Config>,
    params: CreateWebDataStreamParams,
) -> ClientResult<String> {
    let draft = admin::web_data_stream(&params.default_uri, &params.display_name);
    let session = AnalyticsSession::connect(config).await?;
    let stream = session
        .admin()
        .create_data_stream(&params.property_id, &draft)
        .await?;
    Ok(format_json(&stream))
}

pub async fn delete_data_stream(
    config: Arc<Config>,
    params: DataStreamParams,
) -> ClientResult<String> {
    let session = AnalyticsSession::connect(config).await?;
    session
        .admin()
        .delete_data_stream(&params.property_id, &params.stream_id)
        .await?;
    Ok(format!("Data stream {} deleted.", params.stream_id))
}

// ── Key events ──

pub async fn list_key_events(config: Arc<Config>, params: PropertyParams) -> ClientResult<String> {
    let session = AnalyticsSession::connect(config).await?;
    let events = session.admin().list_key_events(&params.property_id).await?;
    Ok(list_or_message(&events, || {
        format!("No key events found for property {}.", params.property_id)
    }))
}

pub async fn create_key_event(
    config: Arc<Config>,
    params: CreateKeyEventParams,
) -> ClientResult<String> {
    let draft = admin::key_event(&params.event_name);
    let session = AnalyticsSession::connect(config).await?;
    let event = session
        .admin()
        .create_key_event(&params.property_id, &draft)
        .await?;
    Ok(format_json(&event))
}

pub async fn delete_key_event(
    config: Arc<Config>,
    params: DeleteKeyEventParams,
) -> ClientResult<String> {
    let session = AnalyticsSession::connect(config).await?;
    session
        .admin()
        .delete_key_event(&params.property_id, &params.key_event_id)
        .await?;
    Ok(format!("Key event {} deleted.", params.key_event_id))
}

// ── Custom definitions ──

pub async fn list_custom_dimensions(
    config: Arc<Config>,
    params: PropertyParams,
) -> ClientResult<String> {
    let session = AnalyticsSession::connect(config).await?;
    let dimensions = session
        .admin()
        .list_custom_dimensions(&params.property_id)
        .await?;
    Ok(list_or_message(&dimensions, || {
        format!("No custom dimensions found for property {}.", params.property_id)
    }))
}

pub async fn create_custom_dimension(
    config: Arc<Config>,
    params: CreateCustomDimensionParams,
) -> ClientResult<String> {
    let draft = admin::custom_dimension(
        &params.parameter_name,
        &params.display_name,
        &params.scope,
        &params.description,
    )?;
    let session = AnalyticsSession::connect(config).await?;
    let dimension = session
        .admin()
        .create_custom_dimension(&params.property_id, &draft)
        .await?;
    Ok(format_json(&dimension))
}

pub async fn list_custom_metrics(
    config: Arc<Config>,
    params: PropertyParams,
) -> ClientResult<String> {
    let session = AnalyticsSession::connect(config).await?;
    let metrics = session
        .admin()
        .list_custom_metrics(&params.property_id)
        .await?;
    Ok(list_or_message(&metrics, || {
        format!("No custom metrics found for property {}.", params.property_id)
    }))
}

pub async fn create_custom_metric(
    config: Arc<Config>,
    params: CreateCustomMetricParams,
) -> ClientResult<String> {
    let draft = admin::custom_metric(
        &params.parameter_name,
        &params.display_name,
        &params.scope,
        &params.measurement_unit,
        &params.description,
    )?;
    let session = AnalyticsSession::connect(config).await?;
    let metric = session
        .admin()
        .create_custom_metric(&params.property_id, &draft)
        .await?;
    Ok(format_json(&metric))
}

// ── Integrations ──

pub async fn list_google_ads_links(
    config: Arc<Config>,
    params: PropertyParams,
) -> ClientResult<String> {
    let session = AnalyticsSession::connect(config).await?;
    let links = session
        .admin()
        .list_google_ads_links(&params.property_id)
        .await?;
    Ok(list_or_message(&links, || {
        format!("No Google Ads links found for property {}.", params.property_id)
    }))
}

pub async fn create_google_ads_link(
    config: Arc<Config>,
    params: CreateGoogleAdsLinkParams,
) -> ClientResult<String> {
    let draft = admin::google_ads_link(&params.customer_id);
    let session = AnalyticsSession::connect(config).await?;
    let link = session
        .admin()
        .create_google_ads_link(&params.property_id, &draft)
        .await?;
    Ok(format_json(&link))
}

/// First existing secret on the stream, or a newly created one.
pub async fn get_measurement_protocol_secret(
    config: Arc<Config>,
    params: MeasurementProtocolSecretParams,
) -> ClientResult<String> {
    let session = AnalyticsSession::connect(config).await?;
    let existing = session
        .admin()
        .list_measurement_protocol_secrets(&params.property_id, &params.stream_id)
        .await?;

    if let Some(secret) = existing.into_iter().next() {
        return Ok(format_json(&secret));
    }

    let created = session
        .admin()
        .create_measurement_protocol_secret(
            &params.property_id,
            &params.stream_id,
            &admin::measurement_protocol_secret(&params.display_name),
        )
        .await?;
    Ok(format_json(&created))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ga4_client::{ApiEndpoints, ClientError};

    fn unconfigured() -> Arc<Config> {
        Arc::new(Config::with_credentials_path(
            std::env::temp_dir().join("ga4-mcp-admin-tests-missing/credentials.json"),
            ApiEndpoints::default(),
        ))
    }

    #[tokio::test]
    async fn test_invalid_scope_rejected_before_credentials() {
        let err = create_custom_dimension(
            unconfigured(),
            CreateCustomDimensionParams {
                property_id: "1".into(),
                parameter_name: "user_type".into(),
                display_name: "User type".into(),
                scope: "INVALID".into(),
                description: String::new(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ClientError::InvalidEnum { .. }));
    }

    #[tokio::test]
    async fn test_invalid_unit_rejected_before_credentials() {
        let err = create_custom_metric(
            unconfigured(),
            CreateCustomMetricParams {
                property_id: "1".into(),
                parameter_name: "distance".into(),
                display_name: "Distance".into(),
                scope: "EVENT".into(),
                measurement_unit: "LEAGUES".into(),
                description: String::new(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), "invalid_enum");
        assert!(err.to_string().contains("LEAGUES"));
    }

    #[tokio::test]
    async fn test_unconfigured_list_is_not_configured() {
        let err = list_accounts(unconfigured()).await.unwrap_err();
        assert!(err.is_not_configured());
    }

    #[tokio::test]
    async fn test_check_auth_status_unconfigured() {
        let out = check_auth_status(unconfigured()).await;
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["authenticated"], false);
        assert!(parsed["reason"]
            .as_str()
            .unwrap()
            .contains("not configured yet"));
    }
}
