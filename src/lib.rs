//! glue-mcp: an MCP server for browsing a Glue Data Catalog.
//!
//! The crate is split along the same lines as the binary's surfaces:
//! - [`catalog`] - backend abstraction (AWS Glue or a JSON fixture)
//! - [`mcp`] - MCP tool surface (stdio and streamable HTTP transports)
//! - [`api`] - read-only REST API mirroring the catalog operations
//! - [`models`] - catalog entity types shared by both surfaces

pub mod api;
pub mod catalog;
pub mod config;
pub mod mcp;
pub mod models;
pub mod telemetry;
