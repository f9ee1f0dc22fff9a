//! MCP ServerHandler implementation for Google Analytics 4.
//!
//! **Auth**
//! - `check_auth_status` — Report which service account is configured
//!
//! **Admin: accounts and properties**
//! - `list_accounts`, `list_properties`, `create_property`, `get_property`,
//!   `delete_property`
//!
//! **Admin: data streams**
//! - `list_data_streams`, `create_web_data_stream`, `delete_data_stream`,
//!   `get_tracking_snippet` (offline)
//!
//! **Admin: key events and custom definitions**
//! - `list_key_events`, `create_key_event`, `delete_key_event`
//! - `list_custom_dimensions`, `create_custom_dimension`
//! - `list_custom_metrics`, `create_custom_metric`
//!
//! **Admin: integrations**
//! - `list_google_ads_links`, `create_google_ads_link`,
//!   `get_measurement_protocol_secret`
//!
//! **Data: reports**
//! - `run_report`, `run_realtime_report`, `get_metadata`
//!
//! Every tool except `check_auth_status` and `get_tracking_snippet` answers
//! with the setup guide when no credential is configured.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ServerHandler};

use ga4_client::Config;

use crate::tools::snippet::tracking_snippet;
use crate::tools::{self, *};

/// Google Analytics 4 MCP server handler.
#[derive(Debug, Clone)]
pub struct Ga4McpServer {
    tool_router: ToolRouter<Self>,
    config: Arc<Config>,
}

impl Default for Ga4McpServer {
    fn default() -> Self {
        Self::with_config(Config::shared())
    }
}

impl Ga4McpServer {
    /// Create a server resolving credentials from the process environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a server over an explicit configuration.
    pub fn with_config(config: Arc<Config>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            config,
        }
    }

    fn shared_config(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for Ga4McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "google-analytics".to_string(),
                title: Some("Google Analytics 4 MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: Some(
                    "MCP server for Google Analytics 4 administration and reporting \
                     through a service account"
                        .to_string(),
                ),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Google Analytics 4 tools backed by a service account. \
                 Start with check_auth_status; if it is not authenticated, relay the setup guide to the user.\n\
                 IDs are bare numbers (e.g. '123456789'), not resource names.\n\
                 Setup flow: list_accounts → list_properties / create_property → \
                 create_web_data_stream → get_tracking_snippet with the stream's measurement_id.\n\
                 Reporting: get_metadata lists valid dimension and metric names for run_report; \
                 run_realtime_report shows activity from the last minutes.\n\
                 Server-side events: get_measurement_protocol_secret returns or creates an API secret for a stream."
                    .to_string(),
            ),
        }
    }
}

#[tool_router(router = tool_router)]
impl Ga4McpServer {
    // ── Auth ──

    #[tool(
        name = "check_auth_status",
        description = "Check if the Google Analytics service account is configured and valid. Returns the service account email, project and scopes, or the reason authentication is unavailable."
    )]
    pub async fn check_auth_status(&self) -> String {
        tools::admin::check_auth_status(self.shared_config()).await
    }

    // ── Admin: accounts and properties ──

    #[tool(
        name = "list_accounts",
        description = "List all Google Analytics accounts accessible by the service account."
    )]
    pub async fn list_accounts(&self) -> String {
        with_setup_guide(tools::admin::list_accounts(self.shared_config())).await
    }

    #[tool(
        name = "list_properties",
        description = "List all GA4 properties for an account."
    )]
    pub async fn list_properties(
        &self,
        Parameters(params): Parameters<ListPropertiesParams>,
    ) -> String {
        with_setup_guide(tools::admin::list_properties(self.shared_config(), params)).await
    }

    #[tool(
        name = "create_property",
        description = "Create a new GA4 property under an account. Time zone defaults to Europe/Rome and currency to EUR."
    )]
    pub async fn create_property(
        &self,
        Parameters(params): Parameters<CreatePropertyParams>,
    ) -> String {
        with_setup_guide(tools::admin::create_property(self.shared_config(), params)).await
    }

    #[tool(name = "get_property", description = "Get details of a GA4 property.")]
    pub async fn get_property(&self, Parameters(params): Parameters<PropertyParams>) -> String {
        with_setup_guide(tools::admin::get_property(self.shared_config(), params)).await
    }

    #[tool(
        name = "delete_property",
        description = "Soft-delete a GA4 property. It moves to the trash and can be restored for 35 days."
    )]
    pub async fn delete_property(&self, Parameters(params): Parameters<PropertyParams>) -> String {
        with_setup_guide(tools::admin::delete_property(self.shared_config(), params)).await
    }

    // ── Admin: data streams ──

    #[tool(
        name = "list_data_streams",
        description = "List all data streams (web, Android, iOS) for a GA4 property, including web measurement IDs."
    )]
    pub async fn list_data_streams(
        &self,
        Parameters(params): Parameters<PropertyParams>,
    ) -> String {
        with_setup_guide(tools::admin::list_data_streams(self.shared_config(), params)).await
    }

    #[tool(
        name = "create_web_data_stream",
        description = "Create a web data stream for a property. Returns the stream with its measurement ID (G-XXXXXXXXXX)."
    )]
    pub async fn create_web_data_stream(
        &self,
        Parameters(params): Parameters<CreateWebDataStreamParams>,
    ) -> String {
        with_setup_guide(tools::admin::create_web_data_stream(
            self.shared_config(),
            params,
        ))
        .await
    }

    #[tool(name = "delete_data_stream", description = "Delete a data stream.")]
    pub async fn delete_data_stream(
        &self,
        Parameters(params): Parameters<DataStreamParams>,
    ) -> String {
        with_setup_guide(tools::admin::delete_data_stream(self.shared_config(), params)).await
    }

    #[tool(
        name = "get_tracking_snippet",
        description = "Get the gtag.js HTML snippet to install on a website for a measurement ID. Works without credentials."
    )]
    pub async fn get_tracking_snippet(
        &self,
        Parameters(params): Parameters<TrackingSnippetParams>,
    ) -> String {
        tracking_snippet(&params.measurement_id)
    }

    // ── Admin: key events ──

    #[tool(
        name = "list_key_events",
        description = "List key events (conversions) for a property."
    )]
    pub async fn list_key_events(&self, Parameters(params): Parameters<PropertyParams>) -> String {
        with_setup_guide(tools::admin::list_key_events(self.shared_config(), params)).await
    }

    #[tool(
        name = "create_key_event",
        description = "Mark an event as a key event (conversion), e.g. 'purchase' or 'sign_up'."
    )]
    pub async fn create_key_event(
        &self,
        Parameters(params): Parameters<CreateKeyEventParams>,
    ) -> String {
        with_setup_guide(tools::admin::create_key_event(self.shared_config(), params)).await
    }

    #[tool(
        name = "delete_key_event",
        description = "Remove an event from key events (conversions)."
    )]
    pub async fn delete_key_event(
        &self,
        Parameters(params): Parameters<DeleteKeyEventParams>,
    ) -> String {
        with_setup_guide(tools::admin::delete_key_event(self.shared_config(), params)).await
    }

    // ── Admin: custom definitions ──

    #[tool(
        name = "list_custom_dimensions",
        description = "List custom dimensions for a property."
    )]
    pub async fn list_custom_dimensions(
        &self,
        Parameters(params): Parameters<PropertyParams>,
    ) -> String {
        with_setup_guide(tools::admin::list_custom_dimensions(
            self.shared_config(),
            params,
        ))
        .await
    }

    #[tool(
        name = "create_custom_dimension",
        description = "Create a custom dimension from an event parameter. Scope is EVENT, USER or ITEM (default EVENT)."
    )]
    pub async fn create_custom_dimension(
        &self,
        Parameters(params): Parameters<CreateCustomDimensionParams>,
    ) -> String {
        with_setup_guide(tools::admin::create_custom_dimension(
            self.shared_config(),
            params,
        ))
        .await
    }

    #[tool(
        name = "list_custom_metrics",
        description = "List custom metrics for a property."
    )]
    pub async fn list_custom_metrics(
        &self,
        Parameters(params): Parameters<PropertyParams>,
    ) -> String {
        with_setup_guide(tools::admin::list_custom_metrics(self.shared_config(), params)).await
    }

    #[tool(
        name = "create_custom_metric",
        description = "Create a custom metric from a numeric event parameter. Scope must be EVENT; measurement_unit defaults to STANDARD."
    )]
    pub async fn create_custom_metric(
        &self,
        Parameters(params): Parameters<CreateCustomMetricParams>,
    ) -> String {
        with_setup_guide(tools::admin::create_custom_metric(
            self.shared_config(),
            params,
        ))
        .await
    }

    // ── Admin: integrations ──

    #[tool(
        name = "list_google_ads_links",
        description = "List Google Ads account links for a property."
    )]
    pub async fn list_google_ads_links(
        &self,
        Parameters(params): Parameters<PropertyParams>,
    ) -> String {
        with_setup_guide(tools::admin::list_google_ads_links(
            self.shared_config(),
            params,
        ))
        .await
    }

    #[tool(
        name = "create_google_ads_link",
        description = "Link a Google Ads account to a GA4 property."
    )]
    pub async fn create_google_ads_link(
        &self,
        Parameters(params): Parameters<CreateGoogleAdsLinkParams>,
    ) -> String {
        with_setup_guide(tools::admin::create_google_ads_link(
            self.shared_config(),
            params,
        ))
        .await
    }

    #[tool(
        name = "get_measurement_protocol_secret",
        description = "Get or create a Measurement Protocol API secret for server-side event tracking. Returns the first existing secret on the stream, otherwise creates one."
    )]
    pub async fn get_measurement_protocol_secret(
        &self,
        Parameters(params): Parameters<MeasurementProtocolSecretParams>,
    ) -> String {
        with_setup_guide(tools::admin::get_measurement_protocol_secret(
            self.shared_config(),
            params,
        ))
        .await
    }

    // ── Data: reports ──

    #[tool(
        name = "run_report",
        description = "Run a GA4 report with dimensions, metrics, a date range and an optional exact-match dimension filter. Returns headers and one object per row."
    )]
    pub async fn run_report(&self, Parameters(params): Parameters<RunReportParams>) -> String {
        with_setup_guide(tools::data::run_report(self.shared_config(), params)).await
    }

    #[tool(
        name = "run_realtime_report",
        description = "Run a real-time report showing active users and live events. Metrics default to ['activeUsers']."
    )]
    pub async fn run_realtime_report(
        &self,
        Parameters(params): Parameters<RunRealtimeReportParams>,
    ) -> String {
        with_setup_guide(tools::data::run_realtime_report(self.shared_config(), params)).await
    }

    #[tool(
        name = "get_metadata",
        description = "List all available dimensions and metrics for a GA4 property. Use it to discover names for run_report."
    )]
    pub async fn get_metadata(&self, Parameters(params): Parameters<PropertyParams>) -> String {
        with_setup_guide(tools::data::get_metadata(self.shared_config(), params)).await
    }
}
