//! Google Analytics 4 MCP Server
//!
//! Model Context Protocol server exposing GA4 property administration and
//! reporting to LLM agents over stdio.
//!
//! # Usage
//!
//! ```bash
//! GA_CREDENTIALS="$(cat service-account.json)" ga4-mcp
//! ga4-mcp --check   # verify credentials and exit
//! ```

use clap::Parser;
use ga4_client::{AuthStatus, Config};
use ga4_mcp::server::Ga4McpServer;
use ga4_mcp::tools::format_json;
use rmcp::ServiceExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ga4-mcp", version)]
#[command(about = "MCP server for Google Analytics 4 administration and reporting")]
struct Args {
    /// Print the credential status as JSON and exit instead of serving
    #[arg(long)]
    check: bool,

    /// Log directives used when RUST_LOG is unset
    #[arg(long, env = "GA4_MCP_LOG", default_value = "ga4_mcp=info,ga4_client=info")]
    log_filter: String,
}

/// RUST_LOG wins when set; otherwise `fallback` applies.
fn env_filter(rust_log: Option<String>, fallback: &str) -> anyhow::Result<EnvFilter> {
    let directives = rust_log
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());
    Ok(EnvFilter::try_new(directives)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // stdout carries the JSON-RPC stream; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(
            std::env::var(EnvFilter::DEFAULT_ENV).ok(),
            &args.log_filter,
        )?)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::shared();

    if args.check {
        let status = tokio::task::spawn_blocking(move || AuthStatus::check(&config)).await?;
        println!("{}", format_json(&status));
        if !status.is_authenticated() {
            std::process::exit(1);
        }
        return Ok(());
    }

    tracing::info!("ga4-mcp starting (stdio transport)");

    let server = Ga4McpServer::with_config(config);
    let transport = rmcp::transport::io::stdio();

    let service = server.serve(transport).await?;
    service.waiting().await?;

    Ok(())
}
