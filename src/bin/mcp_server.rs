//! MCP Server Binary
//!
//! Runs the Notion Epic tracker as an MCP server over stdio.
//!
//! # Usage
//!
//! ```bash
//! # Run directly
//! NOTION_TOKEN=secret_xxx ./mcp_server
//!
//! # With a config file
//! ./mcp_server --config ./config.yaml
//!
//! # With debug logging
//! RUST_LOG=debug ./mcp_server
//! ```
//!
//! # Client Integration
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "notion-epic-tracker": {
//!       "command": "/path/to/mcp_server",
//!       "env": {
//!         "NOTION_TOKEN": "secret_xxx"
//!       }
//!     }
//!   }
//! }
//! ```

use anyhow::Result;
use clap::Parser;
use notion_epic_tracker::mcp::McpServer;
use notion_epic_tracker::{AppState, Config};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// MCP Server for the Notion Epic tracker
#[derive(Parser, Debug)]
#[command(name = "mcp_server")]
#[command(about = "MCP server exposing Notion Epic / Task tracking tools")]
#[command(version)]
struct Args {
    /// YAML config file (defaults to ./config.yaml when present)
    #[arg(long, env = "EPIC_TRACKER_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Initialize logging (to stderr to keep stdout clean for MCP)
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("notion_epic_tracker=info".parse()?))
        .init();

    let args = Args::parse();
    let state = AppState::new(Config::from_yaml_and_env(args.config.as_deref())?);
    let config = &state.config;

    info!("Starting MCP server for notion-epic-tracker");
    info!("Notion API: {} ({})", config.notion_api_url, config.notion_api_version);
    if config.notion_token.is_none() {
        warn!("NOTION_TOKEN is not set; every tool call will fail until it is");
    }

    let mut server = McpServer::new(state.tracker.clone());

    if let Err(e) = server.run().await {
        error!("MCP server error: {}", e);
        return Err(e);
    }

    Ok(())
}
