//! # Data API client
//!
//! Ad-hoc reports, realtime reports and schema metadata against
//! `analyticsdata.googleapis.com/v1beta`, plus the flattened documents the
//! tools render.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::admin::property_name;
use crate::enums::MatchType;
use crate::error::ClientResult;
use crate::transport::ApiTransport;

/// Metric used by realtime reports when the caller names none.
pub const DEFAULT_REALTIME_METRIC: &str = "activeUsers";

// =======================================================================================
// REQUEST MESSAGES
// =======================================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dimension {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringFilter {
    pub value: String,
    pub match_type: MatchType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub field_name: String,
    pub string_filter: StringFilter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterExpression {
    pub filter: Filter,
}

/// Body for `properties.runReport`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportRequest {
    pub dimensions: Vec<Dimension>,
    pub metrics: Vec<Metric>,
    pub date_ranges: Vec<DateRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension_filter: Option<FilterExpression>,
    pub limit: i64,
    pub offset: i64,
}

impl RunReportRequest {
    pub fn new(
        dimensions: &[String],
        metrics: &[String],
        start_date: &str,
        end_date: &str,
        limit: i64,
        offset: i64,
    ) -> Self {
        Self {
            dimensions: dimensions.iter().map(|d| Dimension { name: d.clone() }).collect(),
            metrics: metrics.iter().map(|m| Metric { name: m.clone() }).collect(),
            date_ranges: vec![DateRange {
                start_date: start_date.to_string(),
                end_date: end_date.to_string(),
            }],
            dimension_filter: None,
            limit,
            offset,
        }
    }

    /// Attach an exact-match dimension filter. A missing or empty name or
    /// value leaves the request unfiltered.
    #[must_use]
    pub fn with_exact_filter(mut self, name: Option<&str>, value: Option<&str>) -> Self {
        if let (Some(name), Some(value)) = (name, value) {
            if !name.is_empty() && !value.is_empty() {
                self.dimension_filter = Some(FilterExpression {
                    filter: Filter {
                        field_name: name.to_string(),
                        string_filter: StringFilter {
                            value: value.to_string(),
                            match_type: MatchType::Exact,
                        },
                    },
                });
            }
        }
        self
    }
}

/// Body for `properties.runRealtimeReport`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRealtimeReportRequest {
    pub dimensions: Vec<Dimension>,
    pub metrics: Vec<Metric>,
}

impl RunRealtimeReportRequest {
    pub fn new(dimensions: Option<&[String]>, metrics: Option<&[String]>) -> Self {
        let metrics = match metrics {
            Some(names) => names.iter().map(|m| Metric { name: m.clone() }).collect(),
            None => vec![Metric {
                name: DEFAULT_REALTIME_METRIC.to_string(),
            }],
        };
        Self {
            dimensions: dimensions
                .unwrap_or_default()
                .iter()
                .map(|d| Dimension { name: d.clone() })
                .collect(),
            metrics,
        }
    }
}

// =======================================================================================
// RESPONSE MESSAGES
// =======================================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Header {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Value {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    #[serde(default)]
    pub dimension_values: Vec<Value>,
    #[serde(default)]
    pub metric_values: Vec<Value>,
}

/// Response of both `runReport` and `runRealtimeReport`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportResponse {
    #[serde(default)]
    pub dimension_headers: Vec<Header>,
    #[serde(default)]
    pub metric_headers: Vec<Header>,
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub row_count: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMetadata {
    #[serde(default)]
    pub api_name: String,
    #[serde(default)]
    pub ui_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataResponse {
    #[serde(default)]
    pub dimensions: Vec<FieldMetadata>,
    #[serde(default)]
    pub metrics: Vec<FieldMetadata>,
}

// =======================================================================================
// DOCUMENTS
// =======================================================================================

/// One report row as header → value pairs, serialized as a JSON object in
/// header order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportRow(Vec<(String, String)>);

impl ReportRow {
    /// Pair headers with values positionally; extra items on either side
    /// are dropped. A repeated header keeps its first position and takes the
    /// later value.
    fn zip(headers: &[String], values: impl IntoIterator<Item = String>) -> Self {
        let mut pairs: Vec<(String, String)> = Vec::with_capacity(headers.len());
        for (header, value) in headers.iter().zip(values) {
            match pairs.iter_mut().find(|(h, _)| h == header) {
                Some(existing) => existing.1 = value,
                None => pairs.push((header.clone(), value)),
            }
        }
        Self(pairs)
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ReportRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (header, value) in &self.0 {
            map.serialize_entry(header, value)?;
        }
        map.end()
    }
}

/// Flattened report: dimension headers then metric headers, one object per row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportDocument {
    pub row_count: i64,
    pub headers: Vec<String>,
    pub rows: Vec<ReportRow>,
}

impl From<&RunReportResponse> for ReportDocument {
    fn from(response: &RunReportResponse) -> Self {
        let headers: Vec<String> = response
            .dimension_headers
            .iter()
            .chain(&response.metric_headers)
            .map(|h| h.name.clone())
            .collect();

        let rows = response
            .rows
            .iter()
            .map(|row| {
                let values = row
                    .dimension_values
                    .iter()
                    .chain(&row.metric_values)
                    .map(|v| v.value.clone());
                ReportRow::zip(&headers, values)
            })
            .collect();

        Self {
            row_count: response.row_count,
            headers,
            rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSummary {
    pub api_name: String,
    pub ui_name: String,
    pub description: String,
    pub category: String,
}

impl From<&FieldMetadata> for FieldSummary {
    fn from(field: &FieldMetadata) -> Self {
        Self {
            api_name: field.api_name.clone(),
            ui_name: field.ui_name.clone(),
            description: field.description.clone(),
            category: field.category.clone(),
        }
    }
}

/// Catalog of the dimensions and metrics a property can report on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataDocument {
    pub dimensions_count: usize,
    pub metrics_count: usize,
    pub dimensions: Vec<FieldSummary>,
    pub metrics: Vec<FieldSummary>,
}

impl From<&MetadataResponse> for MetadataDocument {
    fn from(response: &MetadataResponse) -> Self {
        let dimensions: Vec<FieldSummary> =
            response.dimensions.iter().map(FieldSummary::from).collect();
        let metrics: Vec<FieldSummary> = response.metrics.iter().map(FieldSummary::from).collect();
        Self {
            dimensions_count: dimensions.len(),
            metrics_count: metrics.len(),
            dimensions,
            metrics,
        }
    }
}

// =======================================================================================
// CLIENT
// =======================================================================================

/// Typed Data API operations over an authenticated transport.
#[derive(Debug, Clone)]
pub struct DataClient {
    transport: ApiTransport,
}

impl DataClient {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    pub async fn run_report(
        &self,
        property_id: &str,
        request: &RunReportRequest,
    ) -> ClientResult<ReportDocument> {
        let path = format!("{}:runReport", property_name(property_id));
        let response: RunReportResponse = self.transport.post(&path, request).await?;
        debug!(property_id, rows = response.rows.len(), row_count = response.row_count, "Report returned");
        Ok(ReportDocument::from(&response))
    }

    pub async fn run_realtime_report(
        &self,
        property_id: &str,
        request: &RunRealtimeReportRequest,
    ) -> ClientResult<ReportDocument> {
        let path = format!("{}:runRealtimeReport", property_name(property_id));
        let response: RunReportResponse = self.transport.post(&path, request).await?;
        debug!(property_id, rows = response.rows.len(), "Realtime report returned");
        Ok(ReportDocument::from(&response))
    }

    pub async fn get_metadata(&self, property_id: &str) -> ClientResult<MetadataDocument> {
        let path = format!("{}/metadata", property_name(property_id));
        let response: MetadataResponse = self.transport.get(&path, &[]).await?;
        Ok(MetadataDocument::from(&response))
    }
}
