use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::catalog::{CatalogError, SharedCatalog};
use crate::mcp::DatabaseMetadataResponse;
use crate::models::{CatalogDatabase, CatalogTable, TableRef};

/// Default cap for the search endpoint.
const DEFAULT_SEARCH_LIMIT: usize = 25;

// ============================================================
// Error Handling
// ============================================================

/// Map catalog errors onto HTTP responses. Missing entities are safe to
/// echo back; upstream failures are logged server-side and the client gets
/// a generic body so AWS error detail never leaks through the API.
fn catalog_error(e: CatalogError) -> (StatusCode, String) {
    match e {
        CatalogError::DatabaseNotFound(_) | CatalogError::TableNotFound { .. } => {
            tracing::warn!("Lookup failed: {}", e);
            (StatusCode::NOT_FOUND, e.to_string())
        }
        CatalogError::Backend(msg) => {
            tracing::error!("Upstream catalog error: {}", msg);
            (
                StatusCode::BAD_GATEWAY,
                "upstream catalog error".to_string(),
            )
        }
    }
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Databases
// ============================================================

pub async fn list_databases(
    State(catalog): State<SharedCatalog>,
) -> Result<Json<Vec<CatalogDatabase>>, (StatusCode, String)> {
    catalog
        .list_databases()
        .await
        .map(Json)
        .map_err(catalog_error)
}

pub async fn get_database(
    State(catalog): State<SharedCatalog>,
    Path(name): Path<String>,
) -> Result<Json<DatabaseMetadataResponse>, (StatusCode, String)> {
    let database = catalog.get_database(&name).await.map_err(catalog_error)?;
    let tables = catalog.list_tables(&name).await.map_err(catalog_error)?;

    Ok(Json(DatabaseMetadataResponse {
        name: database.name,
        description: database.description,
        location_uri: database.location_uri,
        tables: tables.into_iter().map(|t| t.name).collect(),
    }))
}

// ============================================================
// Tables
// ============================================================

pub async fn list_tables(
    State(catalog): State<SharedCatalog>,
    Path(name): Path<String>,
) -> Result<Json<Vec<CatalogTable>>, (StatusCode, String)> {
    catalog
        .list_tables(&name)
        .await
        .map(Json)
        .map_err(catalog_error)
}

pub async fn get_table(
    State(catalog): State<SharedCatalog>,
    Path((name, table)): Path<(String, String)>,
) -> Result<Json<CatalogTable>, (StatusCode, String)> {
    catalog
        .get_table(&name, &table)
        .await
        .map(Json)
        .map_err(catalog_error)
}

// ============================================================
// Search
// ============================================================

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub limit: Option<u32>,
}

pub async fn search_tables(
    State(catalog): State<SharedCatalog>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<TableRef>>, (StatusCode, String)> {
    let cap = query.limit.map_or(DEFAULT_SEARCH_LIMIT, |n| n as usize);
    let matches = catalog
        .search_tables(&query.q, cap)
        .await
        .map_err(catalog_error)?;

    Ok(Json(matches.iter().map(TableRef::from).collect()))
}
