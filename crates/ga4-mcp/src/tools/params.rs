//! Parameter structs for all MCP tools.
//!
//! Identifiers are bare numeric strings (`"123456789"`), never resource
//! names like `properties/123456789`.

use schemars::JsonSchema;
use serde::Deserialize;

fn default_time_zone() -> String {
    "Europe/Rome".to_string()
}

fn default_currency_code() -> String {
    "EUR".to_string()
}

fn default_event_scope() -> String {
    "EVENT".to_string()
}

fn default_measurement_unit() -> String {
    "STANDARD".to_string()
}

fn default_secret_display_name() -> String {
    "MCP Server".to_string()
}

fn default_start_date() -> String {
    "28daysAgo".to_string()
}

fn default_end_date() -> String {
    "today".to_string()
}

fn default_limit() -> i64 {
    100
}

// ── Accounts and properties ──

/// Parameters for the `list_properties` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListPropertiesParams {
    #[schemars(description = "The account ID (numeric, e.g. '123456789')")]
    pub account_id: String,
}

/// Parameters for the `create_property` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreatePropertyParams {
    #[schemars(description = "The account ID to create the property under")]
    pub account_id: String,
    #[schemars(description = "Display name for the new property")]
    pub display_name: String,
    #[schemars(description = "IANA time zone (default: 'Europe/Rome')")]
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    #[schemars(description = "ISO 4217 currency code (default: 'EUR')")]
    #[serde(default = "default_currency_code")]
    pub currency_code: String,
}

/// Parameters for tools that address a single property.
///
/// Shared by `get_property`, `delete_property`, the list tools and
/// `get_metadata`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct PropertyParams {
    #[schemars(description = "The property ID (numeric, e.g. '123456789')")]
    pub property_id: String,
}

// ── Data streams ──

/// Parameters for the `create_web_data_stream` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateWebDataStreamParams {
    #[schemars(description = "The property ID")]
    pub property_id: String,
    #[schemars(description = "Website URL (e.g. 'https://example.com')")]
    pub default_uri: String,
    #[schemars(description = "Display name for the stream (defaults to the URL)")]
    #[serde(default)]
    pub display_name: String,
}

/// Parameters for the `delete_data_stream` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DataStreamParams {
    #[schemars(description = "The property ID")]
    pub property_id: String,
    #[schemars(description = "The data stream ID")]
    pub stream_id: String,
}

/// Parameters for the `get_tracking_snippet` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct TrackingSnippetParams {
    #[schemars(description = "The measurement ID (e.g. 'G-XXXXXXXXXX')")]
    pub measurement_id: String,
}

// ── Key events ──

/// Parameters for the `create_key_event` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateKeyEventParams {
    #[schemars(description = "The property ID")]
    pub property_id: String,
    #[schemars(description = "Event name to mark as key event (e.g. 'purchase', 'sign_up')")]
    pub event_name: String,
}

/// Parameters for the `delete_key_event` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteKeyEventParams {
    #[schemars(description = "The property ID")]
    pub property_id: String,
    #[schemars(description = "The key event ID")]
    pub key_event_id: String,
}

// ── Custom definitions ──

/// Parameters for the `create_custom_dimension` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateCustomDimensionParams {
    #[schemars(description = "The property ID")]
    pub property_id: String,
    #[schemars(description = "Event parameter name (e.g. 'user_type')")]
    pub parameter_name: String,
    #[schemars(description = "Display name shown in reports")]
    pub display_name: String,
    #[schemars(description = "Scope: EVENT, USER, or ITEM (default: EVENT)")]
    #[serde(default = "default_event_scope")]
    pub scope: String,
    #[schemars(description = "Optional description")]
    #[serde(default)]
    pub description: String,
}

/// Parameters for the `create_custom_metric` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateCustomMetricParams {
    #[schemars(description = "The property ID")]
    pub property_id: String,
    #[schemars(description = "Event parameter name")]
    pub parameter_name: String,
    #[schemars(description = "Display name shown in reports")]
    pub display_name: String,
    #[schemars(description = "Scope (only EVENT is supported, default: EVENT)")]
    #[serde(default = "default_event_scope")]
    pub scope: String,
    #[schemars(
        description = "Unit: STANDARD, CURRENCY, FEET, METERS, KILOMETERS, MILES, MILLISECONDS, SECONDS, MINUTES, HOURS (default: STANDARD)"
    )]
    #[serde(default = "default_measurement_unit")]
    pub measurement_unit: String,
    #[schemars(description = "Optional description")]
    #[serde(default)]
    pub description: String,
}

// ── Integrations ──

/// Parameters for the `create_google_ads_link` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateGoogleAdsLinkParams {
    #[schemars(description = "The property ID")]
    pub property_id: String,
    #[schemars(description = "Google Ads customer ID (digits only, e.g. '1234567890')")]
    pub customer_id: String,
}

/// Parameters for the `get_measurement_protocol_secret` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct MeasurementProtocolSecretParams {
    #[schemars(description = "The property ID")]
    pub property_id: String,
    #[schemars(description = "The data stream ID")]
    pub stream_id: String,
    #[schemars(description = "Name for the secret if one has to be created (default: 'MCP Server')")]
    #[serde(default = "default_secret_display_name")]
    pub display_name: String,
}

// ── Reports ──

/// Parameters for the `run_report` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RunReportParams {
    #[schemars(description = "The property ID")]
    pub property_id: String,
    #[schemars(description = "Dimension names (e.g. ['country', 'city'])")]
    pub dimensions: Vec<String>,
    #[schemars(description = "Metric names (e.g. ['activeUsers', 'sessions'])")]
    pub metrics: Vec<String>,
    #[schemars(description = "Start date ('YYYY-MM-DD', 'NdaysAgo', 'yesterday', 'today')")]
    #[serde(default = "default_start_date")]
    pub start_date: String,
    #[schemars(description = "End date (same format as start_date)")]
    #[serde(default = "default_end_date")]
    pub end_date: String,
    #[schemars(description = "Optional dimension to filter on")]
    pub dimension_filter_name: Option<String>,
    #[schemars(description = "Value for the dimension filter (exact match)")]
    pub dimension_filter_value: Option<String>,
    #[schemars(description = "Max rows (default 100)")]
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[schemars(description = "Row offset for pagination (default 0)")]
    #[serde(default)]
    pub offset: i64,
}

/// Parameters for the `run_realtime_report` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RunRealtimeReportParams {
    #[schemars(description = "The property ID")]
    pub property_id: String,
    #[schemars(description = "Optional real-time dimensions (e.g. ['country', 'unifiedScreenName'])")]
    pub dimensions: Option<Vec<String>>,
    #[schemars(description = "Optional real-time metrics (default: ['activeUsers'])")]
    pub metrics: Option<Vec<String>>,
}
