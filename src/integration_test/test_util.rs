use crate::app_env::test::TEST_DB_URL;
use crate::{persistence, routes};
use axum::Router;
use axum::body::{self, Body};
use axum::http::{Method, Request, Response, header};
use dotenv::dotenv;
use rand::{Rng, thread_rng};
use serde_json::Value;
use sqlx::{Connection, PgConnection, PgPool, Row};
use std::env;
use tokio::sync::OnceCell;
use tower::ServiceExt;

/// Completes once databases left behind by earlier test runs have been dropped
static OLD_DBS_CLEARED: OnceCell<()> = OnceCell::const_new();

/// A throwaway database with the application's schema applied. Call [TestDatabase::teardown]
/// at the end of the test to drop it again.
pub struct TestDatabase {
    base_url: String,
    db_name: String,
    pool: PgPool,
}

impl TestDatabase {
    /// Creates a uniquely named database next to the one TEST_DB_URL points at and migrates it
    pub async fn create() -> TestDatabase {
        if dotenv().is_err() {
            println!("Test is running without .env file.");
        }

        let base_url = env::var(TEST_DB_URL).expect(
            "You must provide the TEST_DB_URL environment variable as the base postgres connection string",
        );
        OLD_DBS_CLEARED
            .get_or_init(|| drop_databases_like(&base_url, "test_db%"))
            .await;

        let db_id: u32 = thread_rng().gen_range(10_000..99_999);
        let db_name = format!("test_db_{db_id}");

        let mut conn = PgConnection::connect(&base_url)
            .await
            .expect("Test failure - could not create initial connection to provision database.");
        sqlx::query(&format!("CREATE DATABASE {db_name}"))
            .execute(&mut conn)
            .await
            .unwrap_or_else(|err| panic!("Failed to create test database {db_name}: {err}"));
        let _ = conn.close().await;

        let pool = persistence::connect_sqlx(&format!("{base_url}/{db_name}"), 5)
            .await
            .expect("Could not connect to the test database");
        persistence::run_migrations(&pool)
            .await
            .expect("Could not migrate the test database");

        TestDatabase {
            base_url,
            db_name,
            pool,
        }
    }

    /// Builds the full application router on top of this database
    pub fn router(&self) -> Router {
        routes::build_router(persistence::ExternalConnectivity::new(self.pool.clone()))
    }

    pub async fn teardown(self) {
        self.pool.close().await;

        let conn = PgConnection::connect(&self.base_url).await;
        let mut conn = match conn {
            Ok(cxn) => cxn,
            Err(conn_err) => {
                println!(
                    "Failed to reconnect to database to drop test database {}, please remove it manually. Error: {}",
                    self.db_name, conn_err
                );
                return;
            }
        };

        let drop_result = sqlx::query(&format!("DROP DATABASE {}", self.db_name))
            .execute(&mut conn)
            .await;
        if let Err(db_err) = drop_result {
            println!(
                "Failed to drop test database {}, please remove it manually. Error: {}",
                self.db_name, db_err
            );
        }
        let _ = conn.close().await;
    }
}

/// Drops every database whose name matches the SQL LIKE pattern. With `test_db%` this removes
/// databases left over when a test panicked before [TestDatabase::teardown], so it must finish
/// before any test of this run creates its database.
pub async fn drop_databases_like(base_url: &str, name_pattern: &str) {
    let mut conn = match PgConnection::connect(base_url).await {
        Ok(cxn) => cxn,
        Err(conn_err) => {
            println!("Warning: could not connect to drop databases matching {name_pattern}. Error: {conn_err}");
            return;
        }
    };

    let matching_dbs = sqlx::query("SELECT datname FROM pg_catalog.pg_database WHERE datname LIKE $1")
        .bind(name_pattern)
        .fetch_all(&mut conn)
        .await;
    let matching_dbs: Vec<String> = match matching_dbs {
        Ok(rows) => rows.iter().map(|row| row.get::<String, _>(0)).collect(),
        Err(query_err) => {
            println!(
                "Warning: failed to list databases matching {name_pattern}. You may need to delete them manually. Error: {query_err}"
            );
            let _ = conn.close().await;
            return;
        }
    };

    for db_name in matching_dbs {
        let drop_result = sqlx::query(&format!("DROP DATABASE {db_name}"))
            .execute(&mut conn)
            .await;
        if drop_result.is_err() {
            println!("Warning: failed to drop old database {db_name}, you may need to do it manually.");
        }
    }
    let _ = conn.close().await;
}

/// Sends a request through the router, asking for JSON back
pub async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let request_builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::ACCEPT, "application/json");

    let request = match body {
        Some(json_body) => request_builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json_body.to_string())),
        None => request_builder.body(Body::empty()),
    }
    .expect("Could not build test request");

    router
        .clone()
        .oneshot(request)
        .await
        .expect("Router failed to produce a response")
}

/// Reads the response body as raw bytes
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not read data from response body!")
        .to_vec()
}

/// Reads the response body as JSON
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap_or_else(|err| {
        panic!(
            "Response body was not JSON! Error: {err}, Received body: {:?}",
            String::from_utf8_lossy(&bytes)
        )
    })
}

mod tests {
    use super::*;

    async fn database_exists(conn: &mut PgConnection, db_name: &str) -> bool {
        sqlx::query("SELECT datname FROM pg_catalog.pg_database WHERE datname = $1")
            .bind(db_name)
            .fetch_optional(conn)
            .await
            .expect("Could not look up database")
            .is_some()
    }

    #[tokio::test]
    #[cfg_attr(not(feature = "integration_test"), ignore)]
    async fn drops_leftover_databases() {
        if dotenv().is_err() {
            println!("Test is running without .env file.");
        }
        let base_url = env::var(TEST_DB_URL).expect(
            "You must provide the TEST_DB_URL environment variable as the base postgres connection string",
        );
        let db_id: u32 = thread_rng().gen_range(10_000..99_999);
        let leftover_name = format!("leftover_db_{db_id}");

        let mut conn = PgConnection::connect(&base_url)
            .await
            .expect("Could not connect to provision a leftover database");
        sqlx::query(&format!("CREATE DATABASE {leftover_name}"))
            .execute(&mut conn)
            .await
            .expect("Could not create a leftover database");
        assert!(database_exists(&mut conn, &leftover_name).await);

        drop_databases_like(&base_url, &format!("{leftover_name}%")).await;

        assert!(!database_exists(&mut conn, &leftover_name).await);
        let _ = conn.close().await;
    }
}
