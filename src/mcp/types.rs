//! Request and response types for MCP tools.

use rmcp::schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::{CatalogDatabase, TableRef};

// ============================================================
// Request Types
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetDatabaseMetadataRequest {
    #[schemars(description = "The database name")]
    pub database_name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetTableMetadataRequest {
    #[schemars(description = "The database name")]
    pub database_name: String,
    #[schemars(description = "The table name")]
    pub table_name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchTablesRequest {
    #[schemars(description = "Free-text search over table names and descriptions")]
    pub query: String,
    #[schemars(description = "Maximum number of matches to return. Defaults to 25.")]
    #[serde(default)]
    pub max_results: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RenderCatalogTreeRequest {
    #[schemars(description = "Render only this database. Omit to render the whole catalog.")]
    #[serde(default)]
    pub database_name: Option<String>,
}

// ============================================================
// Response Types
// ============================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListDatabasesResponse {
    pub databases: Vec<CatalogDatabase>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DatabaseMetadataResponse {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_uri: Option<String>,
    /// Names of the tables in this database.
    pub tables: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchTablesResponse {
    pub query: String,
    pub matches: Vec<TableRef>,
}
