//! Common test utilities for API integration tests
//!
//! Each `TestContext` owns a scratch database derived from `DATABASE_URL`, a
//! router built over it and helpers to seed customers and deployments. Tests
//! return early when `DATABASE_URL` is not set.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use chrono::NaiveDate;
use deployboard_api::app::{build_router, AppState};
use deployboard_api::config::{ApiConfig, Config, DatabaseConfig};
use deployboard_shared::db::migrations::{drop_database, ensure_database_exists, run_migrations};
use deployboard_shared::db::pool::{self, close_pool, create_pool};
use deployboard_shared::models::deployment::DeploymentStatus;
use sqlx::PgPool;
use tower::Service as _;
use uuid::Uuid;

/// Test context containing a migrated database and the router over it
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
    url: String,
}

impl TestContext {
    /// Creates a fresh database and router, or `None` without `DATABASE_URL`
    pub async fn new() -> Option<Self> {
        let Ok(base_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping API test");
            return None;
        };

        let (server, _) = base_url.rsplit_once('/').unwrap_or((&base_url, ""));
        let url = format!("{}/deployboard_api_test_{}", server, Uuid::new_v4().simple());
        ensure_database_exists(&url).await.expect("Failed to create scratch database");

        let db = create_pool(pool::DatabaseConfig {
            max_connections: 4,
            min_connections: 0,
            ..pool::DatabaseConfig::new(url.clone())
        })
        .await
        .expect("Failed to create pool");

        run_migrations(&db).await.expect("Failed to run migrations");

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
                cache_max_age_seconds: 120,
            },
            database: DatabaseConfig {
                url: url.clone(),
                max_connections: 4,
                run_migrations: false,
            },
        };

        let app = build_router(AppState::new(db.clone(), config.clone()));

        Some(Self { db, app, config, url })
    }

    /// Sends a request through the router
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().call(request).await.unwrap()
    }

    /// GETs `uri`
    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    /// Sends `body` as JSON with `method`
    pub async fn send_json(&self, method: &str, uri: &str, body: serde_json::Value) -> Response<Body> {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Inserts a customer and returns its id
    pub async fn insert_customer(&self, name: &str, email: &str) -> Uuid {
        sqlx::query_scalar(
            "INSERT INTO customers (name, email, image_url) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(name)
        .bind(email)
        .bind("/customers/test.png")
        .fetch_one(&self.db)
        .await
        .expect("Failed to insert customer")
    }

    /// Inserts a deployment (`amount` in cents) and returns its id
    pub async fn insert_deployment(
        &self,
        customer_id: Uuid,
        amount: i32,
        status: DeploymentStatus,
        date: NaiveDate,
    ) -> Uuid {
        sqlx::query_scalar(
            "INSERT INTO deployments (customer_id, amount, status, date) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(customer_id)
        .bind(amount)
        .bind(status.as_str())
        .bind(date)
        .fetch_one(&self.db)
        .await
        .expect("Failed to insert deployment")
    }

    /// Closes the pool and drops the scratch database
    pub async fn cleanup(self) {
        close_pool(self.db).await;
        if let Err(e) = drop_database(&self.url).await {
            eprintln!("Failed to drop scratch database {}: {}", self.url, e);
        }
    }
}

/// Reads a response body as JSON
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}
