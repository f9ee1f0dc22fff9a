//! Data API tool implementations: reports and metadata.

use std::sync::Arc;

use ga4_client::{AnalyticsSession, ClientResult, Config, RunRealtimeReportRequest, RunReportRequest};

use super::helpers::format_json;
use super::params::{PropertyParams, RunRealtimeReportParams, RunReportParams};

pub async fn run_report(config: Arc<Config>, params: RunReportParams) -> ClientResult<String> {
    let request = RunReportRequest::new(
        &params.dimensions,
        &params.metrics,
        &params.start_date,
        &params.end_date,
        params.limit,
        params.offset,
    )
    .with_exact_filter(
        params.dimension_filter_name.as_deref(),
        params.dimension_filter_value.as_deref(),
    );

    let session = AnalyticsSession::connect(config).await?;
    let report = session
        .data()
        .run_report(&params.property_id, &request)
        .await?;
    Ok(format_json(&report))
}

pub async fn run_realtime_report(
    config: Arc<Config>,
    params: RunRealtimeReportParams,
) -> ClientResult<String> {
    let request =
        RunRealtimeReportRequest::new(params.dimensions.as_deref(), params.metrics.as_deref());

    let session = AnalyticsSession::connect(config).await?;
    let report = session
        .data()
        .run_realtime_report(&params.property_id, &request)
        .await?;
    Ok(format_json(&report))
}

pub async fn get_metadata(config: Arc<Config>, params: PropertyParams) -> ClientResult<String> {
    let session = AnalyticsSession::connect(config).await?;
    let metadata = session.data().get_metadata(&params.property_id).await?;
    Ok(format_json(&metadata))
}
