//! MCP (Model Context Protocol) server implementation
//!
//! This module provides an MCP server that exposes the Epic tracker
//! operations as tools for MCP clients.

pub mod handlers;
pub mod protocol;
pub mod server;
pub mod tools;

pub use protocol::*;
pub use server::McpServer;
