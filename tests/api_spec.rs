use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use glue_mcp::api::create_router;
use glue_mcp::catalog::StaticCatalog;
use glue_mcp::config::SecurityConfig;
use glue_mcp::models::{CatalogDatabase, CatalogTable, Column, TableRef};

fn sample_catalog() -> StaticCatalog {
    StaticCatalog::new()
        .with_database(
            CatalogDatabase {
                description: Some("Sales mart".to_string()),
                ..CatalogDatabase::new("sales")
            },
            vec![
                CatalogTable {
                    description: Some("Customer orders".to_string()),
                    columns: vec![Column::typed("order_id", "bigint")],
                    partition_keys: vec![Column::typed("dt", "string")],
                    ..CatalogTable::new("sales", "orders")
                },
                CatalogTable::new("sales", "customers"),
            ],
        )
        .with_database(CatalogDatabase::new("logs"), vec![])
}

fn setup(security: SecurityConfig) -> TestServer {
    let app = create_router(Arc::new(sample_catalog()), security);
    TestServer::new(app).expect("Failed to create test server")
}

mod databases {
    use super::*;

    #[tokio::test]
    async fn lists_all_databases() {
        let server = setup(SecurityConfig::disabled());

        let response = server.get("/api/v1/databases").await;

        response.assert_status_ok();
        let databases: Vec<CatalogDatabase> = response.json();
        assert_eq!(databases.len(), 2);
        assert_eq!(databases[0].name, "sales");
    }

    #[tokio::test]
    async fn returns_database_with_table_names() {
        let server = setup(SecurityConfig::disabled());

        let response = server.get("/api/v1/databases/sales").await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "sales");
        assert_eq!(body["description"], "Sales mart");
        assert_eq!(body["tables"], serde_json::json!(["orders", "customers"]));
    }

    #[tokio::test]
    async fn unknown_database_is_not_found() {
        let server = setup(SecurityConfig::disabled());

        let response = server.get("/api/v1/databases/missing").await;

        response.assert_status_not_found();
    }
}

mod tables {
    use super::*;

    #[tokio::test]
    async fn lists_tables_in_database() {
        let server = setup(SecurityConfig::disabled());

        let response = server.get("/api/v1/databases/sales/tables").await;

        response.assert_status_ok();
        let tables: Vec<CatalogTable> = response.json();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].name, "orders");
        assert_eq!(tables[0].partition_keys[0].name, "dt");
    }

    #[tokio::test]
    async fn returns_single_table_with_schema() {
        let server = setup(SecurityConfig::disabled());

        let response = server.get("/api/v1/databases/sales/tables/orders").await;

        response.assert_status_ok();
        let table: CatalogTable = response.json();
        assert_eq!(table.database, "sales");
        assert_eq!(table.columns[0].name, "order_id");
    }

    #[tokio::test]
    async fn unknown_table_is_not_found() {
        let server = setup(SecurityConfig::disabled());

        let response = server.get("/api/v1/databases/sales/tables/missing").await;

        response.assert_status_not_found();
    }
}

mod search {
    use super::*;

    #[tokio::test]
    async fn returns_matching_refs() {
        let server = setup(SecurityConfig::disabled());

        let response = server
            .get("/api/v1/search")
            .add_query_param("q", "orders")
            .await;

        response.assert_status_ok();
        let matches: Vec<TableRef> = response.json();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].database, "sales");
        assert_eq!(matches[0].name, "orders");
    }

    #[tokio::test]
    async fn respects_limit() {
        let server = setup(SecurityConfig::disabled());

        let response = server
            .get("/api/v1/search")
            .add_query_param("q", "s")
            .add_query_param("limit", "1")
            .await;

        response.assert_status_ok();
        let matches: Vec<TableRef> = response.json();
        assert_eq!(matches.len(), 1);
    }
}

mod auth {
    use super::*;

    #[tokio::test]
    async fn rejects_request_without_token() {
        let server = setup(SecurityConfig::with_api_key("secret"));

        let response = server.get("/api/v1/databases").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn rejects_wrong_token() {
        let server = setup(SecurityConfig::with_api_key("secret"));

        let response = server
            .get("/api/v1/databases")
            .authorization_bearer("wrong")
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn accepts_valid_token() {
        let server = setup(SecurityConfig::with_api_key("secret"));

        let response = server
            .get("/api/v1/databases")
            .authorization_bearer("secret")
            .await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn health_bypasses_auth() {
        let server = setup(SecurityConfig::with_api_key("secret"));

        let response = server.get("/health").await;

        response.assert_status_ok();
    }
}

mod rate_limiting {
    use super::*;

    #[tokio::test]
    async fn throttles_after_limit() {
        let server = setup(SecurityConfig::with_rate_limit(2));

        server.get("/api/v1/databases").await.assert_status_ok();
        server.get("/api/v1/databases").await.assert_status_ok();

        let response = server.get("/api/v1/databases").await;
        response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    }
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let server = setup(SecurityConfig::disabled());

        let response = server.get("/health").await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "ok");
    }
}
