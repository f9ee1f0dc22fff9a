//! MCP tool parameters and implementations.
//!
//! Parameter structs derive `Deserialize + JsonSchema` for MCP tool
//! registration. Implementations take the shared [`ga4_client::Config`] and
//! return tool text; server.rs wraps them with [`helpers::with_setup_guide`].

pub mod admin;
pub mod data;
pub mod helpers;
pub mod params;
pub mod snippet;

pub use helpers::{error_json, format_json, with_setup_guide};
pub use params::*;
