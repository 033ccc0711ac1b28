//! AWS Glue Data Catalog backend.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_glue::error::ProvideErrorMetadata;
use aws_sdk_glue::primitives::DateTime as SmithyDateTime;
use aws_sdk_glue::types as glue;
use chrono::{DateTime, Utc};

use super::{CatalogError, CatalogSource};
use crate::models::{CatalogDatabase, CatalogTable, Column};

/// Glue error code for missing databases and tables.
const ENTITY_NOT_FOUND: &str = "EntityNotFoundException";

/// [`CatalogSource`] backed by the AWS Glue Data Catalog.
#[derive(Debug, Clone)]
pub struct GlueCatalog {
    client: aws_sdk_glue::Client,
}

impl GlueCatalog {
    pub fn new(client: aws_sdk_glue::Client) -> Self {
        Self { client }
    }

    /// Build a client from the ambient AWS configuration (env, profile,
    /// instance role - whatever the default provider chain resolves).
    pub async fn from_env() -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        Self::new(aws_sdk_glue::Client::new(&config))
    }

    pub fn region(&self) -> Option<String> {
        self.client.config().region().map(|r| r.to_string())
    }
}

#[async_trait]
impl CatalogSource for GlueCatalog {
    async fn list_databases(&self) -> Result<Vec<CatalogDatabase>, CatalogError> {
        let mut stream = self.client.get_databases().into_paginator().send();
        let mut databases: Vec<glue::Database> = Vec::new();
        while let Some(page) = stream.next().await {
            let page = page.map_err(|e| CatalogError::Backend(e.to_string()))?;
            databases.extend(page.database_list);
        }

        Ok(databases.iter().map(database_from_glue).collect())
    }

    async fn get_database(&self, name: &str) -> Result<CatalogDatabase, CatalogError> {
        let response = self
            .client
            .get_database()
            .name(name)
            .send()
            .await
            .map_err(|e| {
                if e.code() == Some(ENTITY_NOT_FOUND) {
                    CatalogError::DatabaseNotFound(name.to_string())
                } else {
                    CatalogError::Backend(e.to_string())
                }
            })?;

        response
            .database()
            .map(database_from_glue)
            .ok_or_else(|| CatalogError::DatabaseNotFound(name.to_string()))
    }

    async fn list_tables(&self, database: &str) -> Result<Vec<CatalogTable>, CatalogError> {
        let mut stream = self
            .client
            .get_tables()
            .database_name(database)
            .into_paginator()
            .send();
        let mut tables: Vec<glue::Table> = Vec::new();
        while let Some(page) = stream.next().await {
            let page = page.map_err(|e| {
                if e.code() == Some(ENTITY_NOT_FOUND) {
                    CatalogError::DatabaseNotFound(database.to_string())
                } else {
                    CatalogError::Backend(e.to_string())
                }
            })?;
            tables.extend(page.table_list.unwrap_or_default());
        }

        Ok(tables
            .iter()
            .map(|t| table_from_glue(database, t))
            .collect())
    }

    async fn get_table(
        &self,
        database: &str,
        table: &str,
    ) -> Result<CatalogTable, CatalogError> {
        let response = self
            .client
            .get_table()
            .database_name(database)
            .name(table)
            .send()
            .await
            .map_err(|e| {
                if e.code() == Some(ENTITY_NOT_FOUND) {
                    CatalogError::TableNotFound {
                        database: database.to_string(),
                        table: table.to_string(),
                    }
                } else {
                    CatalogError::Backend(e.to_string())
                }
            })?;

        response
            .table()
            .map(|t| table_from_glue(database, t))
            .ok_or_else(|| CatalogError::TableNotFound {
                database: database.to_string(),
                table: table.to_string(),
            })
    }

    async fn search_tables(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<CatalogTable>, CatalogError> {
        if query.is_empty() || max_results == 0 {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .search_tables()
            .search_text(query)
            .max_results(i32::try_from(max_results).unwrap_or(i32::MAX))
            .send()
            .await
            .map_err(|e| CatalogError::Backend(e.to_string()))?;

        Ok(response
            .table_list()
            .iter()
            .take(max_results)
            .map(|t| table_from_glue(t.database_name().unwrap_or_default(), t))
            .collect())
    }
}

fn database_from_glue(db: &glue::Database) -> CatalogDatabase {
    CatalogDatabase {
        name: db.name().to_string(),
        description: db.description().map(str::to_string),
        location_uri: db.location_uri().map(str::to_string),
        created_at: db.create_time().and_then(timestamp),
    }
}

fn table_from_glue(database: &str, table: &glue::Table) -> CatalogTable {
    let descriptor = table.storage_descriptor();

    CatalogTable {
        database: table.database_name().unwrap_or(database).to_string(),
        name: table.name().to_string(),
        description: table.description().map(str::to_string),
        owner: table.owner().map(str::to_string),
        table_type: table.table_type().map(str::to_string),
        location: descriptor
            .and_then(|sd| sd.location())
            .map(str::to_string),
        columns: descriptor
            .map(|sd| sd.columns().iter().map(column_from_glue).collect())
            .unwrap_or_default(),
        partition_keys: table.partition_keys().iter().map(column_from_glue).collect(),
        created_at: table.create_time().and_then(timestamp),
    }
}

fn column_from_glue(column: &glue::Column) -> Column {
    Column {
        name: column.name().to_string(),
        data_type: column.r#type().map(str::to_string),
        comment: column.comment().map(str::to_string),
    }
}

fn timestamp(dt: &SmithyDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(dt.secs(), dt.subsec_nanos())
}
