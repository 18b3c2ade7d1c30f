use std::sync::Arc;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::construct::Database;
use crate::error::{Result, StringLensError};
use crate::filter::StructuredQuery;
use crate::settings::FilterSettings;

#[derive(Clone)]
pub struct AppState {
    pub database: Arc<Database>,
    pub filters: FilterSettings,
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    message: &'static str,
}

#[derive(Deserialize)]
pub struct NaturalLanguageQuery {
    pub query: Option<String>,
}

impl IntoResponse for StringLensError {
    fn into_response(self) -> Response {
        let status = match &self {
            StringLensError::MissingField { .. }
            | StringLensError::MissingQuery
            | StringLensError::Validation { .. }
            | StringLensError::UnparseableQuery => StatusCode::BAD_REQUEST,
            StringLensError::TypeMismatch | StringLensError::ConflictingFilters { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            StringLensError::Duplicate => StatusCode::CONFLICT,
            StringLensError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if self.is_internal() {
            error!(error = %self, "request failed");
            let body = MessageResponse { message: "Internal server error" };
            return (status, Json(body)).into_response();
        }
        match &self {
            StringLensError::Validation { parameter } => {
                warn!(parameter, code = %status.as_u16(), "invalid query parameter")
            }
            StringLensError::ConflictingFilters { conflicts } => {
                warn!(?conflicts, code = %status.as_u16(), "conflicting filters")
            }
            _ => warn!(msg = %self, code = %status.as_u16(), "request rejected"),
        }
        (status, Json(serde_json::json!({ "message": self.to_string() }))).into_response()
    }
}

/// Runs store work on the blocking pool, since rusqlite is synchronous.
async fn blocking<T, F>(database: Arc<Database>, work: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&Database) -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || work(&database))
        .await
        .map_err(|e| {
            warn!(error = %e, "Join error");
            StringLensError::Internal(e.to_string())
        })?
}

async fn analyze_string(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(body) = body.map_err(|_| StringLensError::MissingField { field: "value" })?;
    let value = match body.get("value") {
        None | Some(Value::Null) => return Err(StringLensError::MissingField { field: "value" }),
        Some(Value::String(s)) if s.is_empty() => {
            return Err(StringLensError::MissingField { field: "value" });
        }
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err(StringLensError::TypeMismatch),
    };
    let record = blocking(state.database, move |db| db.analyze(&value)).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn list_strings(
    State(state): State<AppState>,
    query: std::result::Result<Query<StructuredQuery>, axum::extract::rejection::QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(query) = query.map_err(|_| StringLensError::Validation { parameter: "query" })?;
    let filters = query.build()?;
    if state.filters.reject_inverted_range && filters.has_inverted_range() {
        return Err(StringLensError::Validation { parameter: "min_length" });
    }
    let result = blocking(state.database, move |db| db.search(filters)).await?;
    Ok(Json(result))
}

async fn filter_by_natural_language(
    State(state): State<AppState>,
    params: std::result::Result<Query<NaturalLanguageQuery>, axum::extract::rejection::QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(params) = params.map_err(|_| StringLensError::Validation { parameter: "query" })?;
    let query = params
        .query
        .filter(|q| !q.is_empty())
        .ok_or(StringLensError::MissingQuery)?;
    let result = blocking(state.database, move |db| db.search_natural_language(&query)).await?;
    Ok(Json(result))
}

async fn get_string(
    State(state): State<AppState>,
    Path(string_value): Path<String>,
) -> Result<impl IntoResponse> {
    let record = blocking(state.database, move |db| db.lookup(&string_value)).await?;
    Ok(Json(record))
}

async fn delete_string(
    State(state): State<AppState>,
    Path(string_value): Path<String>,
) -> Result<impl IntoResponse> {
    blocking(state.database, move |db| db.delete(&string_value)).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "Ok", message: "Server is healthy" })
}

async fn route_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(MessageResponse { message: "Route not found" }))
}

pub fn router(database: Arc<Database>, filters: FilterSettings) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    Router::new()
        // method fallbacks, so a known path with an unknown method is a 404 as well
        .route("/health", get(health).fallback(route_not_found))
        .route(
            "/strings",
            get(list_strings).post(analyze_string).fallback(route_not_found),
        )
        .route(
            "/strings/filter-by-natural-language",
            get(filter_by_natural_language).fallback(route_not_found),
        )
        .route(
            "/strings/:string_value",
            get(get_string).delete(delete_string).fallback(route_not_found),
        )
        .fallback(route_not_found)
        .with_state(AppState { database, filters })
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
