//! Request handlers and API payload types.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use soul_core::error::Error;
use soul_core::model::{FeatureVector, Mapping, Namespace, PackageRecord, Resolution, TopologyMetrics};
use soul_core::similarity::DEFAULT_ALTERNATIVE_THRESHOLD;
use soul_resolve::{DependencyGraph, RecommendationReport, RegistryStats, VerificationResult};

use crate::AppState;

/// Uniform response envelope for every endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AlternativesQuery {
    pub threshold: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub name_a: String,
    pub name_b: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub names: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GraphRequest {
    pub root: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub namespace: String,
    pub version: String,
    pub features: Vec<f64>,
    #[serde(default)]
    pub topology: TopologyMetrics,
}

/// Status contract for registry errors: missing record 404, malformed
/// input 400, duplicate registration 409, store failure 503.
fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::NotFound { .. } => StatusCode::NOT_FOUND,
        Error::DimensionMismatch { .. } | Error::InvalidRecord(_) => StatusCode::BAD_REQUEST,
        Error::AlreadyExists { .. } => StatusCode::CONFLICT,
        Error::Database(_) | Error::StoreUnavailable(_) | Error::Io(_) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        Error::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn success<T>(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::OK, Json(ApiResponse::ok(data)))
}

fn failure<T>(err: &Error) -> (StatusCode, Json<ApiResponse<T>>) {
    let status = status_for(err);
    if status.is_server_error() {
        warn!("request failed: {err}");
    }
    (status, Json(ApiResponse::err(err.to_string())))
}

/// GET /api/health
pub async fn health() -> Json<ApiResponse<String>> {
    Json(ApiResponse::ok("OK".to_string()))
}

/// GET /api/resolve/:name
pub async fn resolve(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> (StatusCode, Json<ApiResponse<Resolution>>) {
    match state.service.resolve(&name) {
        Ok(resolution @ Resolution::Found(_)) => success(resolution),
        Ok(Resolution::NotFound { name }) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::err(format!(
                "no record for {name} in any namespace"
            ))),
        ),
        Err(err) => failure(&err),
    }
}

/// GET /api/alternatives/:name?threshold=
///
/// The threshold defaults to the engine's alternative-discovery cutoff;
/// an empty match list is a success, not a 404.
pub async fn alternatives(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<AlternativesQuery>,
) -> (StatusCode, Json<ApiResponse<Vec<Mapping>>>) {
    let threshold = query.threshold.unwrap_or(DEFAULT_ALTERNATIVE_THRESHOLD);
    match state.service.find_alternatives(&name, threshold) {
        Ok(alternatives) => success(alternatives),
        Err(err) => failure(&err),
    }
}

/// POST /api/verify
pub async fn verify(
    State(state): State<AppState>,
    Json(request): Json<VerifyRequest>,
) -> (StatusCode, Json<ApiResponse<VerificationResult>>) {
    match state.service.verify(&request.name_a, &request.name_b) {
        Ok(result) => success(result),
        Err(err) => failure(&err),
    }
}

/// POST /api/recommend
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> (StatusCode, Json<ApiResponse<RecommendationReport>>) {
    match state.service.recommend(&request.names) {
        Ok(report) => success(report),
        Err(err) => failure(&err),
    }
}

/// POST /api/graph
pub async fn build_graph(
    State(state): State<AppState>,
    Json(request): Json<GraphRequest>,
) -> (StatusCode, Json<ApiResponse<DependencyGraph>>) {
    match state.service.build_graph(&request.root, &request.dependencies) {
        Ok(graph) => success(graph),
        Err(err) => failure(&err),
    }
}

/// GET /api/stats
pub async fn stats(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<RegistryStats>>) {
    match state.service.stats() {
        Ok(stats) => success(stats),
        Err(err) => failure(&err),
    }
}

/// POST /api/packages, 201 on success.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> (StatusCode, Json<ApiResponse<PackageRecord>>) {
    let namespace = match request.namespace.parse::<Namespace>() {
        Ok(namespace) => namespace,
        Err(err) => {
            return (StatusCode::BAD_REQUEST, Json(ApiResponse::err(err.to_string())));
        }
    };

    match state.service.register(
        &request.name,
        namespace,
        &request.version,
        FeatureVector::new(request.features),
        request.topology,
    ) {
        Ok(record) => (StatusCode::CREATED, Json(ApiResponse::ok(record))),
        Err(err) => failure(&err),
    }
}

/// DELETE /api/packages/:namespace/:name
pub async fn purge(
    State(state): State<AppState>,
    Path((namespace, name)): Path<(String, String)>,
) -> (StatusCode, Json<ApiResponse<String>>) {
    let namespace = match namespace.parse::<Namespace>() {
        Ok(namespace) => namespace,
        Err(err) => {
            return (StatusCode::BAD_REQUEST, Json(ApiResponse::err(err.to_string())));
        }
    };

    match state.service.purge(&name, namespace) {
        Ok(()) => success(format!("purged {}", namespace.key_for(&name))),
        Err(err) => failure(&err),
    }
}
