//! MCP server exposing the data catalog to AI agents.

mod tree_render;
mod types;

pub use tree_render::render_tree;
pub use types::*;

use metrics::counter;
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt,
};

use crate::catalog::{CatalogError, SharedCatalog};
use crate::models::{CatalogDatabase, CatalogTable, TableRef};

/// Default cap for `search_tables` when the client does not send one.
const DEFAULT_SEARCH_LIMIT: usize = 25;

#[derive(Clone)]
pub struct McpServer {
    catalog: SharedCatalog,
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    pub fn new(catalog: SharedCatalog) -> Self {
        Self {
            catalog,
            tool_router: Self::tool_router(),
        }
    }

    fn catalog_err(e: CatalogError) -> McpError {
        if e.is_not_found() {
            McpError::invalid_params(e.to_string(), None)
        } else {
            McpError::internal_error(e.to_string(), None)
        }
    }

    fn to_json<T: serde::Serialize>(value: &T) -> Result<CallToolResult, McpError> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // ============================================================
    // Test helpers - expose tool logic for testing
    // ============================================================

    pub async fn test_list_databases(&self) -> Result<ListDatabasesResponse, McpError> {
        let databases = self
            .catalog
            .list_databases()
            .await
            .map_err(Self::catalog_err)?;
        Ok(ListDatabasesResponse { databases })
    }

    pub async fn test_get_database_metadata(
        &self,
        database_name: &str,
    ) -> Result<DatabaseMetadataResponse, McpError> {
        let database = self
            .catalog
            .get_database(database_name)
            .await
            .map_err(Self::catalog_err)?;
        let tables = self
            .catalog
            .list_tables(database_name)
            .await
            .map_err(Self::catalog_err)?;

        Ok(DatabaseMetadataResponse {
            name: database.name,
            description: database.description,
            location_uri: database.location_uri,
            tables: tables.into_iter().map(|t| t.name).collect(),
        })
    }

    pub async fn test_get_table_metadata(
        &self,
        database_name: &str,
        table_name: &str,
    ) -> Result<CatalogTable, McpError> {
        self.catalog
            .get_table(database_name, table_name)
            .await
            .map_err(Self::catalog_err)
    }

    pub async fn test_search_tables(
        &self,
        query: &str,
        max_results: Option<u32>,
    ) -> Result<SearchTablesResponse, McpError> {
        let cap = max_results.map_or(DEFAULT_SEARCH_LIMIT, |n| n as usize);
        let matches = self
            .catalog
            .search_tables(query, cap)
            .await
            .map_err(Self::catalog_err)?;

        Ok(SearchTablesResponse {
            query: query.to_string(),
            matches: matches.iter().map(TableRef::from).collect(),
        })
    }

    pub async fn test_render_catalog_tree(
        &self,
        database_name: Option<&str>,
    ) -> Result<String, McpError> {
        let databases = match database_name {
            Some(name) => vec![self
                .catalog
                .get_database(name)
                .await
                .map_err(Self::catalog_err)?],
            None => self
                .catalog
                .list_databases()
                .await
                .map_err(Self::catalog_err)?,
        };

        let mut tree: Vec<(CatalogDatabase, Vec<CatalogTable>)> =
            Vec::with_capacity(databases.len());
        for database in databases {
            let tables = self
                .catalog
                .list_tables(&database.name)
                .await
                .map_err(Self::catalog_err)?;
            tree.push((database, tables));
        }

        Ok(render_tree(&tree))
    }
}

#[tool_router]
impl McpServer {
    #[tool(
        description = "List the databases in the data catalog. Returns each database with its description and storage location. Call this first to discover what data exists."
    )]
    async fn list_databases(&self) -> Result<CallToolResult, McpError> {
        tracing::info!("Listing catalog databases");
        counter!("calls.list_databases").increment(1);

        let response = self.test_list_databases().await.inspect_err(|_| {
            counter!("errors.list_databases.catalog").increment(1);
        })?;

        Self::to_json(&response)
    }

    #[tool(
        description = "Get database metadata from the data catalog, including the names of the tables in the database. Use get_table_metadata afterwards to inspect a specific table's schema."
    )]
    async fn get_database_metadata(
        &self,
        params: Parameters<GetDatabaseMetadataRequest>,
    ) -> Result<CallToolResult, McpError> {
        let req = params.0;
        tracing::info!(database = %req.database_name, "Getting database metadata");
        counter!("calls.get_database_metadata").increment(1);

        let response = self
            .test_get_database_metadata(&req.database_name)
            .await
            .inspect_err(|_| {
                counter!("errors.get_database_metadata.catalog").increment(1);
            })?;

        Self::to_json(&response)
    }

    #[tool(
        description = "Get table metadata from the data catalog: columns with their types and comments, partition keys, storage location, table type, and creation time."
    )]
    async fn get_table_metadata(
        &self,
        params: Parameters<GetTableMetadataRequest>,
    ) -> Result<CallToolResult, McpError> {
        let req = params.0;
        tracing::info!(
            database = %req.database_name,
            table = %req.table_name,
            "Getting table metadata"
        );
        counter!("calls.get_table_metadata").increment(1);

        let table = self
            .test_get_table_metadata(&req.database_name, &req.table_name)
            .await
            .inspect_err(|_| {
                counter!("errors.get_table_metadata.catalog").increment(1);
            })?;

        Self::to_json(&table)
    }

    #[tool(
        description = "Search for tables across all databases by free text. Matches table names and descriptions. Returns lightweight references; follow up with get_table_metadata for schemas."
    )]
    async fn search_tables(
        &self,
        params: Parameters<SearchTablesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let req = params.0;
        tracing::info!(query = %req.query, "Searching tables");
        counter!("calls.search_tables").increment(1);

        let response = self
            .test_search_tables(&req.query, req.max_results)
            .await
            .inspect_err(|_| {
                counter!("errors.search_tables.catalog").increment(1);
            })?;

        Self::to_json(&response)
    }

    #[tool(
        description = "Render the catalog as an ASCII tree of databases and tables. Good for a quick overview; pass database_name to focus on one database."
    )]
    async fn render_catalog_tree(
        &self,
        params: Parameters<RenderCatalogTreeRequest>,
    ) -> Result<CallToolResult, McpError> {
        let req = params.0;
        counter!("calls.render_catalog_tree").increment(1);

        let tree = self
            .test_render_catalog_tree(req.database_name.as_deref())
            .await
            .inspect_err(|_| {
                counter!("errors.render_catalog_tree.catalog").increment(1);
            })?;

        Ok(CallToolResult::success(vec![Content::text(tree)]))
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: rmcp::model::Implementation {
                name: "glue-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            instructions: Some(
                r#"glue-mcp provides read-only access to a Glue Data Catalog.

WORKFLOW:
1. Call list_databases to see what databases exist.
2. Call get_database_metadata to see the tables in a database.
3. Call get_table_metadata to inspect a table's columns and partition keys.

Use search_tables when you know roughly what you are looking for but not
where it lives. Use render_catalog_tree for a compact overview of the whole
catalog.

The catalog is never modified by these tools. Table schemas reflect what the
catalog reports; partition keys are listed separately from data columns."#
                    .into(),
            ),
            ..Default::default()
        }
    }
}

pub async fn run_stdio_server(catalog: SharedCatalog) -> anyhow::Result<()> {
    use tokio::io::{stdin, stdout};

    tracing::info!("Starting MCP server via stdio");

    let service = McpServer::new(catalog);
    let server = service.serve((stdin(), stdout())).await?;

    let quit_reason = server.waiting().await?;
    tracing::info!("MCP server stopped: {:?}", quit_reason);

    Ok(())
}
