//! Shared helper functions for MCP tool implementations.

use std::future::Future;

use serde::Serialize;
use tracing::warn;

use ga4_client::{ClientError, ClientResult, SETUP_GUIDE};

/// Build a structured error JSON string that LLMs can parse.
pub fn error_json(error_code: &str, message: &str) -> String {
    serde_json::json!({
        "error": error_code,
        "message": message,
    })
    .to_string()
}

/// Pretty-print a value as 2-space indented JSON.
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| error_json("serialization_error", &e.to_string()))
}

/// JSON list, or `empty_message` when there is nothing to show.
pub fn list_or_message<T: Serialize>(items: &[T], empty_message: impl FnOnce() -> String) -> String {
    if items.is_empty() {
        empty_message()
    } else {
        format_json(items)
    }
}

/// Run a tool operation and render its outcome as tool text.
///
/// A missing credential yields the setup guide verbatim. Every other failure
/// becomes [`error_json`] keyed by [`ClientError::code`].
pub async fn with_setup_guide<F>(operation: F) -> String
where
    F: Future<Output = ClientResult<String>>,
{
    match operation.await {
        Ok(output) => output,
        Err(ClientError::NotConfigured) => SETUP_GUIDE.to_string(),
        Err(e) => {
            warn!(code = e.code(), error = %e, "Tool call failed");
            error_json(e.code(), &e.to_string())
        }
    }
}
