//! HTTP request handlers for the Insights API.
//!
//! Serves the parsed markdown insights file using axum.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, on, MethodFilter},
    Router as AxumRouter,
};
use insight_domain::traits::InsightStore;
use insight_domain::InsightRecord;
use insight_store::{MarkdownStore, StoreError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Store the insights are read from
    pub store: Arc<MarkdownStore>,
}

impl AppState {
    /// State serving the given markdown store
    pub fn new(store: MarkdownStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Paper metadata as exposed over HTTP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightMeta {
    /// Paper title
    pub title: String,
    /// Author names
    pub authors: Vec<String>,
}

/// One parsed section of the insights file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedInsight {
    /// Title and authors
    pub meta: InsightMeta,
    /// Insight bullets, in file order
    pub insights: Vec<String>,
}

impl From<InsightRecord> for ParsedInsight {
    fn from(record: InsightRecord) -> Self {
        Self {
            meta: InsightMeta {
                title: record.meta.title,
                authors: record.meta.authors,
            },
            insights: record.insights,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Always "ok" while the server answers
    pub status: String,
    /// Path of the insights file
    pub insights_file: String,
    /// Whether the insights file currently exists
    pub exists: bool,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// The insights file does not exist
    #[error("Insights file not found")]
    FileNotFound,

    /// Only GET is served
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The insights file could not be read
    #[error("Failed to read insights file: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::FileNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        if status == StatusCode::METHOD_NOT_ALLOWED {
            (status, [(header::ALLOW, "GET")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => ApiError::FileNotFound,
            StoreError::Io(e) => ApiError::Internal(e.to_string()),
        }
    }
}

/// GET /api/insights - Parsed insights, in file order
async fn list_insights(
    State(state): State<AppState>,
) -> Result<Json<Vec<ParsedInsight>>, ApiError> {
    let records = state.store.read_all().await.map_err(|e| {
        if !matches!(e, StoreError::NotFound(_)) {
            error!("Failed to read {}: {}", state.store.path().display(), e);
        }
        ApiError::from(e)
    })?;

    debug!("Serving {} insight sections", records.len());

    Ok(Json(records.into_iter().map(ParsedInsight::from).collect()))
}

/// Any other method on /api/insights, HEAD included
async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// GET /health - Liveness plus insights file presence
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
        insights_file: state.store.path().display().to_string(),
        exists: state.store.exists().await,
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route(
            "/api/insights",
            on(MethodFilter::GET, list_insights).fallback(method_not_allowed),
        )
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
