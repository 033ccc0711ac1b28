//! In-memory catalog loaded from a JSON fixture.
//!
//! Fixture format: a `databases` array where each entry is a
//! [`CatalogDatabase`] with an inline `tables` array. Table entries may omit
//! their `database` field; it is filled in from the enclosing database.
//!
//! ```json
//! {
//!   "databases": [
//!     {
//!       "name": "sales",
//!       "description": "Sales mart",
//!       "tables": [
//!         { "name": "orders", "columns": [{ "name": "order_id", "data_type": "bigint" }] }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use super::{CatalogError, CatalogSource};
use crate::models::{CatalogDatabase, CatalogTable};

#[derive(Debug, Deserialize)]
struct Fixture {
    databases: Vec<FixtureDatabase>,
}

#[derive(Debug, Deserialize)]
struct FixtureDatabase {
    #[serde(flatten)]
    database: CatalogDatabase,
    #[serde(default)]
    tables: Vec<FixtureTable>,
}

/// Like [`CatalogTable`] but with the owning database implied by position.
#[derive(Debug, Deserialize)]
struct FixtureTable {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    owner: Option<String>,
    #[serde(default)]
    table_type: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    columns: Vec<crate::models::Column>,
    #[serde(default)]
    partition_keys: Vec<crate::models::Column>,
}

/// [`CatalogSource`] over a fixed set of databases and tables.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    databases: Vec<CatalogDatabase>,
    // database name -> tables, ordered for stable listings
    tables: BTreeMap<String, Vec<CatalogTable>>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a JSON fixture file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            CatalogError::Backend(format!(
                "failed to read fixture {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let fixture: Fixture = serde_json::from_str(raw)
            .map_err(|e| CatalogError::Backend(format!("invalid fixture: {e}")))?;

        let mut catalog = Self::new();
        for entry in fixture.databases {
            let database_name = entry.database.name.clone();
            let tables = entry
                .tables
                .into_iter()
                .map(|t| CatalogTable {
                    database: database_name.clone(),
                    name: t.name,
                    description: t.description,
                    owner: t.owner,
                    table_type: t.table_type,
                    location: t.location,
                    columns: t.columns,
                    partition_keys: t.partition_keys,
                    created_at: None,
                })
                .collect();
            catalog.databases.push(entry.database);
            catalog.tables.insert(database_name, tables);
        }
        Ok(catalog)
    }

    /// Add a database with its tables. Test convenience.
    pub fn with_database(
        mut self,
        database: CatalogDatabase,
        tables: Vec<CatalogTable>,
    ) -> Self {
        self.tables.insert(database.name.clone(), tables);
        self.databases.push(database);
        self
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn list_databases(&self) -> Result<Vec<CatalogDatabase>, CatalogError> {
        Ok(self.databases.clone())
    }

    async fn get_database(&self, name: &str) -> Result<CatalogDatabase, CatalogError> {
        self.databases
            .iter()
            .find(|db| db.name == name)
            .cloned()
            .ok_or_else(|| CatalogError::DatabaseNotFound(name.to_string()))
    }

    async fn list_tables(&self, database: &str) -> Result<Vec<CatalogTable>, CatalogError> {
        self.tables
            .get(database)
            .cloned()
            .ok_or_else(|| CatalogError::DatabaseNotFound(database.to_string()))
    }

    async fn get_table(
        &self,
        database: &str,
        table: &str,
    ) -> Result<CatalogTable, CatalogError> {
        let tables = self.list_tables(database).await?;
        tables
            .into_iter()
            .find(|t| t.name == table)
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

        let needle = query.to_lowercase();
        let matches = self
            .tables
            .values()
            .flatten()
            .filter(|t| {
                t.name.to_lowercase().contains(&needle)
                    || t.description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .take(max_results)
            .cloned()
            .collect();
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Column;

    fn sample() -> StaticCatalog {
        StaticCatalog::new()
            .with_database(
                CatalogDatabase::new("sales"),
                vec![
                    CatalogTable {
                        description: Some("Customer orders".to_string()),
                        columns: vec![Column::typed("order_id", "bigint")],
                        ..CatalogTable::new("sales", "orders")
                    },
                    CatalogTable::new("sales", "customers"),
                ],
            )
            .with_database(CatalogDatabase::new("logs"), vec![])
    }

    #[tokio::test]
    async fn lists_databases_in_insertion_order() {
        let catalog = sample();
        let names: Vec<_> = catalog
            .list_databases()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["sales", "logs"]);
    }

    #[tokio::test]
    async fn unknown_database_errors() {
        let catalog = sample();
        let err = catalog.list_tables("missing").await.unwrap_err();
        assert!(matches!(err, CatalogError::DatabaseNotFound(name) if name == "missing"));
    }

    #[tokio::test]
    async fn unknown_table_errors() {
        let catalog = sample();
        let err = catalog.get_table("sales", "missing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn search_matches_name_and_description_case_insensitively() {
        let catalog = sample();

        let by_name = catalog.search_tables("ORD", 10).await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "orders");

        let by_description = catalog.search_tables("customer", 10).await.unwrap();
        // matches the orders description and the customers table name
        assert_eq!(by_description.len(), 2);
    }

    #[tokio::test]
    async fn search_honors_cap_and_empty_query() {
        let catalog = sample();
        assert!(catalog.search_tables("", 10).await.unwrap().is_empty());
        assert!(catalog.search_tables("orders", 0).await.unwrap().is_empty());
        assert_eq!(catalog.search_tables("s", 1).await.unwrap().len(), 1);
    }

    #[test]
    fn loads_fixture_json() {
        let catalog = StaticCatalog::from_json(
            r#"{
                "databases": [
                    {
                        "name": "sales",
                        "description": "Sales mart",
                        "tables": [
                            {
                                "name": "orders",
                                "columns": [{ "name": "order_id", "data_type": "bigint" }],
                                "partition_keys": [{ "name": "dt", "data_type": "string" }]
                            }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(catalog.databases.len(), 1);
        let tables = catalog.tables.get("sales").unwrap();
        assert_eq!(tables[0].database, "sales");
        assert_eq!(tables[0].columns[0].name, "order_id");
        assert_eq!(tables[0].partition_keys[0].name, "dt");
    }

    #[test]
    fn rejects_malformed_fixture() {
        let err = StaticCatalog::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CatalogError::Backend(_)));
    }
}
