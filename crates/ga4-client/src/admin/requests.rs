//! Request builders for the Admin API.
//!
//! Bare identifiers from tool arguments are composed into resource names,
//! and enum-like strings are parsed before a request body exists.

use serde::Serialize;

use crate::enums::{DataStreamType, DimensionScope, MeasurementUnit, MetricScope};
use crate::error::ClientResult;

pub fn account_name(account_id: &str) -> String {
    format!("accounts/{account_id}")
}

pub fn property_name(property_id: &str) -> String {
    format!("properties/{property_id}")
}

pub fn data_stream_name(property_id: &str, stream_id: &str) -> String {
    format!("properties/{property_id}/dataStreams/{stream_id}")
}

pub fn key_event_name(property_id: &str, key_event_id: &str) -> String {
    format!("properties/{property_id}/keyEvents/{key_event_id}")
}

/// List filter selecting the properties under one account.
pub fn properties_filter(account_id: &str) -> String {
    format!("parent:{}", account_name(account_id))
}

/// Body for `properties.create`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDraft {
    pub parent: String,
    pub display_name: String,
    pub time_zone: String,
    pub currency_code: String,
}

impl PropertyDraft {
    pub fn new(account_id: &str, display_name: &str, time_zone: &str, currency_code: &str) -> Self {
        Self {
            parent: account_name(account_id),
            display_name: display_name.to_string(),
            time_zone: time_zone.to_string(),
            currency_code: currency_code.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebStreamDraft {
    pub default_uri: String,
}

/// Body for `dataStreams.create`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataStreamDraft {
    #[serde(rename = "type")]
    pub stream_type: DataStreamType,
    pub display_name: String,
    pub web_stream_data: WebStreamDraft,
}

/// A web stream; an empty display name falls back to the site URL.
pub fn web_data_stream(default_uri: &str, display_name: &str) -> DataStreamDraft {
    let display_name = if display_name.is_empty() {
        default_uri
    } else {
        display_name
    };
    DataStreamDraft {
        stream_type: DataStreamType::Web,
        display_name: display_name.to_string(),
        web_stream_data: WebStreamDraft {
            default_uri: default_uri.to_string(),
        },
    }
}

/// Body for `customDimensions.create`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomDimensionDraft {
    pub parameter_name: String,
    pub display_name: String,
    pub scope: DimensionScope,
    pub description: String,
}

pub fn custom_dimension(
    parameter_name: &str,
    display_name: &str,
    scope: &str,
    description: &str,
) -> ClientResult<CustomDimensionDraft> {
    Ok(CustomDimensionDraft {
        parameter_name: parameter_name.to_string(),
        display_name: display_name.to_string(),
        scope: scope.parse()?,
        description: description.to_string(),
    })
}

/// Body for `customMetrics.create`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomMetricDraft {
    pub parameter_name: String,
    pub display_name: String,
    pub scope: MetricScope,
    pub measurement_unit: MeasurementUnit,
    pub description: String,
}

/// Fails on an unknown scope or unit before anything is sent.
pub fn custom_metric(
    parameter_name: &str,
    display_name: &str,
    scope: &str,
    measurement_unit: &str,
    description: &str,
) -> ClientResult<CustomMetricDraft> {
    Ok(CustomMetricDraft {
        parameter_name: parameter_name.to_string(),
        display_name: display_name.to_string(),
        scope: scope.parse()?,
        measurement_unit: measurement_unit.parse()?,
        description: description.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyEventDraft {
    pub event_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleAdsLinkDraft {
    pub customer_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementProtocolSecretDraft {
    pub display_name: String,
}

pub fn key_event(event_name: &str) -> KeyEventDraft {
    KeyEventDraft {
        event_name: event_name.to_string(),
    }
}

pub fn google_ads_link(customer_id: &str) -> GoogleAdsLinkDraft {
    GoogleAdsLinkDraft {
        customer_id: customer_id.to_string(),
    }
}

pub fn measurement_protocol_secret(display_name: &str) -> MeasurementProtocolSecretDraft {
    MeasurementProtocolSecretDraft {
        display_name: display_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    #[test]
    fn test_resource_names() {
        assert_eq!(account_name("123"), "accounts/123");
        assert_eq!(property_name("456"), "properties/456");
        assert_eq!(data_stream_name("456", "789"), "properties/456/dataStreams/789");
        assert_eq!(key_event_name("456", "k1"), "properties/456/keyEvents/k1");
        assert_eq!(properties_filter("123"), "parent:accounts/123");
    }

    #[test]
    fn test_property_draft_body() {
        let draft = PropertyDraft::new("42", "Shop", "Europe/Rome", "EUR");
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            serde_json::json!({
                "parent": "accounts/42",
                "displayName": "Shop",
                "timeZone": "Europe/Rome",
                "currencyCode": "EUR",
            })
        );
    }

    #[test]
    fn test_web_stream_display_name_defaults_to_uri() {
        let draft = web_data_stream("https://example.com", "");
        assert_eq!(draft.display_name, "https://example.com");
        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(body["type"], "WEB_DATA_STREAM");
        assert_eq!(body["webStreamData"]["defaultUri"], "https://example.com");

        let named = web_data_stream("https://example.com", "Main site");
        assert_eq!(named.display_name, "Main site");
    }

    #[test]
    fn test_custom_dimension_scope_lookup() {
        let draft = custom_dimension("user_type", "User type", "USER", "").unwrap();
        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(body["scope"], "USER");
        assert_eq!(body["parameterName"], "user_type");

        let err = custom_dimension("user_type", "User type", "INVALID", "").unwrap_err();
        assert!(matches!(err, ClientError::InvalidEnum { .. }));
    }

    #[test]
    fn test_custom_metric_unit_lookup() {
        let draft =
            custom_metric("cost", "Cost", "EVENT", "CURRENCY", "Order cost").unwrap();
        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(body["measurementUnit"], "CURRENCY");
        assert_eq!(body["scope"], "EVENT");

        assert!(custom_metric("cost", "Cost", "EVENT", "PARSECS", "").is_err());
        assert!(custom_metric("cost", "Cost", "USER", "STANDARD", "").is_err());
    }

    #[test]
    fn test_small_bodies() {
        assert_eq!(
            serde_json::to_value(key_event("purchase")).unwrap(),
            serde_json::json!({"eventName": "purchase"})
        );
        assert_eq!(
            serde_json::to_value(google_ads_link("1234567890")).unwrap(),
            serde_json::json!({"customerId": "1234567890"})
        );
        assert_eq!(
            serde_json::to_value(measurement_protocol_secret("MCP Server")).unwrap(),
            serde_json::json!({"displayName": "MCP Server"})
        );
    }
}
