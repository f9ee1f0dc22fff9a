//! Admin API resource messages.
//!
//! Deserialized from the API's camelCase JSON and serialized back out in
//! snake_case for display. Absent optional fields are omitted on output and
//! unknown fields are ignored.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all(deserialize = "camelCase", serialize = "snake_case"))]
pub struct Account {
    #[serde(default)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gmp_organization: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all(deserialize = "camelCase", serialize = "snake_case"))]
pub struct Property {
    #[serde(default)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
    /// Set once the property is soft-deleted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_time: Option<String>,
    /// When a soft-deleted property is purged for good.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all(deserialize = "camelCase", serialize = "snake_case"))]
pub struct WebStreamData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firebase_app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_uri: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all(deserialize = "camelCase", serialize = "snake_case"))]
pub struct AppStreamData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firebase_app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all(deserialize = "camelCase", serialize = "snake_case"))]
pub struct DataStream {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub stream_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_stream_data: Option<WebStreamData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android_app_stream_data: Option<AppStreamData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ios_app_stream_data: Option<AppStreamData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

impl DataStream {
    /// `G-XXXXXXXXXX` for web streams.
    pub fn measurement_id(&self) -> Option<&str> {
        self.web_stream_data
            .as_ref()
            .and_then(|w| w.measurement_id.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all(deserialize = "camelCase", serialize = "snake_case"))]
pub struct KeyEvent {
    #[serde(default)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counting_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all(deserialize = "camelCase", serialize = "snake_case"))]
pub struct CustomDimension {
    #[serde(default)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disallow_ads_personalization: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all(deserialize = "camelCase", serialize = "snake_case"))]
pub struct CustomMetric {
    #[serde(default)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub restricted_metric_type: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all(deserialize = "camelCase", serialize = "snake_case"))]
pub struct GoogleAdsLink {
    #[serde(default)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_manage_clients: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ads_personalization_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all(deserialize = "camelCase", serialize = "snake_case"))]
pub struct MeasurementProtocolSecret {
    #[serde(default)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_camel_in_snake_out() {
        let json = r#"{
            "name": "properties/123",
            "propertyType": "PROPERTY_TYPE_ORDINARY",
            "parent": "accounts/9",
            "displayName": "Shop",
            "timeZone": "Europe/Rome",
            "currencyCode": "EUR",
            "someFutureField": {"x": 1}
        }"#;
        let property: Property = serde_json::from_str(json).unwrap();
        assert_eq!(property.display_name.as_deref(), Some("Shop"));

        let out = serde_json::to_value(&property).unwrap();
        assert_eq!(out["display_name"], "Shop");
        assert_eq!(out["time_zone"], "Europe/Rome");
        assert_eq!(out["property_type"], "PROPERTY_TYPE_ORDINARY");
        assert!(out.get("delete_time").is_none());
        assert!(out.get("someFutureField").is_none());
    }

    #[test]
    fn test_data_stream_type_and_measurement_id() {
        let json = r#"{
            "name": "properties/1/dataStreams/2",
            "type": "WEB_DATA_STREAM",
            "displayName": "example.com",
            "webStreamData": {"measurementId": "G-ABC123", "defaultUri": "https://example.com"}
        }"#;
        let stream: DataStream = serde_json::from_str(json).unwrap();
        assert_eq!(stream.measurement_id(), Some("G-ABC123"));

        let out = serde_json::to_value(&stream).unwrap();
        assert_eq!(out["type"], "WEB_DATA_STREAM");
        assert_eq!(out["web_stream_data"]["measurement_id"], "G-ABC123");
        assert_eq!(out["web_stream_data"]["default_uri"], "https://example.com");
        assert!(out.get("ios_app_stream_data").is_none());
    }

    #[test]
    fn test_custom_metric_restricted_types() {
        let json = r#"{"name":"properties/1/customMetrics/5","parameterName":"cost","measurementUnit":"CURRENCY","restrictedMetricType":["COST_DATA"]}"#;
        let metric: CustomMetric = serde_json::from_str(json).unwrap();
        let out = serde_json::to_value(&metric).unwrap();
        assert_eq!(out["measurement_unit"], "CURRENCY");
        assert_eq!(out["restricted_metric_type"][0], "COST_DATA");

        let bare: CustomMetric = serde_json::from_str(r#"{"name":"n"}"#).unwrap();
        let out = serde_json::to_value(&bare).unwrap();
        assert!(out.get("restricted_metric_type").is_none());
    }

    #[test]
    fn test_secret_value_passthrough() {
        let secret: MeasurementProtocolSecret = serde_json::from_str(
            r#"{"name":"properties/1/dataStreams/2/measurementProtocolSecrets/3","displayName":"MCP Server","secretValue":"abc"}"#,
        )
        .unwrap();
        let out = serde_json::to_value(&secret).unwrap();
        assert_eq!(out["secret_value"], "abc");
        assert_eq!(out["display_name"], "MCP Server");
    }
}
