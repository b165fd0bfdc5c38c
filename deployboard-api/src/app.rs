/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use deployboard_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let app = deployboard_api::app::build_router(AppState::new(pool, config));
/// # Ok(())
/// # }
/// ```

use crate::{cache::Fresh, config::Config};
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use deployboard_shared::data::{Operation, QueryService};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Read queries for the dashboard
    pub query: QueryService,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            query: QueryService::new(db.clone()),
            db,
            config: Arc::new(config),
        }
    }

    /// Wraps a read result with the Cache-Control setting of `operation`
    pub fn fresh<T>(&self, operation: Operation, body: T) -> Fresh<T> {
        Fresh {
            body,
            options: operation.read_options(),
            max_age_seconds: self.config.api.cache_max_age_seconds,
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                          # Health check
/// └── /v1/
///     ├── /dashboard/
///     │   ├── GET /cards               # Summary counts
///     │   ├── GET /latest-deployments  # Five newest deployments
///     │   └── GET /revenue             # Monthly revenue
///     ├── /deployments/
///     │   ├── GET    /?query=&page=    # Search, one page
///     │   ├── POST   /                 # Create
///     │   ├── GET    /pages?query=     # Page count for a search
///     │   ├── GET    /:id              # Edit-form record
///     │   ├── PUT    /:id              # Update
///     │   ├── DELETE /:id              # Delete
///     │   └── GET    /:id/edit         # Record plus customer choices
///     └── /customers/
///         ├── GET /                    # Selection list
///         └── GET /summaries?query=    # Customer table with totals
/// ```
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let dashboard_routes = Router::new()
        .route("/cards", get(routes::dashboard::cards))
        .route("/latest-deployments", get(routes::dashboard::latest_deployments))
        .route("/revenue", get(routes::dashboard::revenue));

    let deployment_routes = Router::new()
        .route(
            "/",
            get(routes::deployments::list_deployments).post(routes::deployments::create_deployment),
        )
        .route("/pages", get(routes::deployments::deployment_pages))
        .route(
            "/:id",
            get(routes::deployments::get_deployment)
                .put(routes::deployments::update_deployment)
                .delete(routes::deployments::delete_deployment),
        )
        .route("/:id/edit", get(routes::deployments::edit_deployment));

    let customer_routes = Router::new()
        .route("/", get(routes::customers::list_customers))
        .route("/summaries", get(routes::customers::customer_summaries));

    let v1_routes = Router::new()
        .nest("/dashboard", dashboard_routes)
        .nest("/deployments", deployment_routes)
        .nest("/customers", customer_routes);

    let cors = if state.config.allows_any_origin() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
