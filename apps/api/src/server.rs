//! # HTTP Server
//!
//! Routes and layers around the GraphQL schema.
//!
//! ## Routes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /graphql          single or batched GraphQL request (JSON)       │
//! │  GET  /graphql          GraphiQL page (when the playground is on)      │
//! │  GET  /schema.graphql   SDL for client code generation                 │
//! │  GET  /health           { status, database, checked_at }  200 | 503    │
//! │                                                                         │
//! │  Layers: TraceLayer (span per request with a uuid) → CorsLayer         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql::{BatchRequest, BatchResponse};
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use stockroom_db::Database;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info_span;
use uuid::Uuid;

use crate::graphql::{build_schema, InventorySchema};
use crate::service::InventoryService;

/// Shared application state.
pub struct AppState {
    pub schema: InventorySchema,
    pub db: Database,
}

impl AppState {
    /// Wires the service and schema around one database pool.
    pub fn new(db: Database) -> Self {
        let schema = build_schema(InventoryService::new(db.clone()));
        AppState { schema, db }
    }
}

/// Router options taken from the configuration.
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    /// Exact allowed origin; any origin when `None`
    pub cors_allowed_origin: Option<String>,
    /// Serve GraphiQL on `GET /graphql`
    pub graphql_playground: bool,
}

/// Builds the application router.
pub fn build_router(state: Arc<AppState>, options: &RouterOptions) -> Router {
    let graphql_route = if options.graphql_playground {
        post(graphql_handler).get(graphiql)
    } else {
        post(graphql_handler)
    };

    Router::new()
        .route("/graphql", graphql_route)
        .route("/schema.graphql", get(schema_sdl))
        .route("/health", get(health))
        .layer(cors_layer(options.cors_allowed_origin.clone()))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                info_span!(
                    "http_request",
                    request_id = %Uuid::new_v4(),
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
        .with_state(state)
}

fn cors_layer(allowed_origin: Option<String>) -> CorsLayer {
    let origin = match allowed_origin {
        Some(allowed) => AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin.as_bytes() == allowed.as_bytes()
        }),
        None => AllowOrigin::from(Any),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

// =============================================================================
// Handlers
// =============================================================================

async fn graphql_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BatchRequest>,
) -> Json<BatchResponse> {
    Json(state.schema.execute_batch(request).await)
}

async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

async fn schema_sdl(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        state.schema.sdl(),
    )
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub checked_at: String,
}

async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let healthy = state.db.health_check().await;

    let (code, status, database) = if healthy {
        (StatusCode::OK, "ok", "up")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded", "down")
    };

    (
        code,
        Json(HealthResponse {
            status,
            database,
            checked_at: chrono::Utc::now().to_rfc3339(),
        }),
    )
}
