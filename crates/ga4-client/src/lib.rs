//! # GA4 Client
//!
//! Google Analytics 4 Admin and Data API client with service-account
//! authentication.
//!
//! ## Overview
//!
//! - [`config`] resolves where credentials come from (inline JSON, key file)
//!   and which API base URLs to call, once per process.
//! - [`auth`] loads the service-account key, signs the JWT bearer assertion
//!   and exchanges it for an access token.
//! - [`session::AnalyticsSession`] bundles a token with an [`AdminClient`] and
//!   a [`DataClient`].
//! - [`admin`] and [`data`] hold typed request/response messages and the
//!   display documents built from them.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ga4_client::{AnalyticsSession, Config, RunReportRequest};
//!
//! # async fn example() -> ga4_client::ClientResult<()> {
//! let session = AnalyticsSession::connect(Config::shared()).await?;
//!
//! for account in session.admin().list_accounts().await? {
//!     println!("{}", account.name);
//! }
//!
//! let request = RunReportRequest::new(
//!     &["country".to_string()],
//!     &["activeUsers".to_string()],
//!     "7daysAgo",
//!     "today",
//!     10,
//!     0,
//! );
//! let report = session.data().run_report("123456789", &request).await?;
//! println!("{} rows", report.row_count);
//! # Ok(())
//! # }
//! ```

pub mod admin;
pub mod auth;
pub mod config;
pub mod data;
pub mod enums;
pub mod error;
pub mod session;
pub mod transport;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_support;

pub use admin::AdminClient;
pub use auth::{AccessToken, AuthStatus, Credentials, SETUP_GUIDE};
pub use config::{ApiEndpoints, Config};
pub use data::{
    DataClient, MetadataDocument, ReportDocument, RunRealtimeReportRequest, RunReportRequest,
};
pub use enums::{DataStreamType, DimensionScope, MatchType, MeasurementUnit, MetricScope};
pub use error::{ClientError, ClientResult};
pub use session::AnalyticsSession;
