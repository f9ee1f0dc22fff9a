//! Google Analytics 4 MCP Server library.
//!
//! Provides the [`server::Ga4McpServer`] MCP server handler and tool parameter types.
//! Used by the `ga4-mcp` binary and available for integration testing.

pub mod server;
pub mod tools;
