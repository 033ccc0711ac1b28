//! Catalog access layer.
//!
//! Everything above this module talks to a [`CatalogSource`], never to AWS
//! directly. Two backends exist: [`GlueCatalog`] wraps the AWS Glue Data
//! Catalog, and [`StaticCatalog`] serves a JSON fixture for tests and
//! offline development (selected via the `GLUE_MCP_FIXTURE` env var).

mod aws;
mod fixture;

pub use aws::GlueCatalog;
pub use fixture::StaticCatalog;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{CatalogDatabase, CatalogTable};

/// Errors from catalog lookups.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("database '{0}' not found")]
    DatabaseNotFound(String),

    #[error("table '{database}.{table}' not found")]
    TableNotFound { database: String, table: String },

    #[error("catalog request failed: {0}")]
    Backend(String),
}

impl CatalogError {
    /// True for lookups that failed because the entity does not exist,
    /// as opposed to the backend being unreachable.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::DatabaseNotFound(_) | Self::TableNotFound { .. }
        )
    }
}

/// Read-only view of a data catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// All databases in the catalog. Empty catalogs return an empty list.
    async fn list_databases(&self) -> Result<Vec<CatalogDatabase>, CatalogError>;

    async fn get_database(&self, name: &str) -> Result<CatalogDatabase, CatalogError>;

    /// All tables in a database. Errors if the database does not exist.
    async fn list_tables(&self, database: &str) -> Result<Vec<CatalogTable>, CatalogError>;

    async fn get_table(&self, database: &str, table: &str)
        -> Result<CatalogTable, CatalogError>;

    /// Free-text table search across the catalog, capped at `max_results`.
    /// An empty query or a zero cap yields no matches.
    async fn search_tables(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<CatalogTable>, CatalogError>;
}

/// Shared handle the servers hold.
pub type SharedCatalog = Arc<dyn CatalogSource>;
