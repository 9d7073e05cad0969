//! Resource handlers: one create/list pair shared by all six resources.
//! The resource is resolved from the path segment via the catalog.

use crate::error::AppError;
use crate::service::{CrudService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{Map, Value};

fn body_to_map(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

pub async fn list(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let resource = state
        .catalog
        .by_path(&segment)
        .ok_or_else(|| AppError::NotFound(segment.clone()))?;
    let rows = CrudService::list(&state.pool, resource).await?;
    Ok(Json(Value::Array(rows)))
}

pub async fn create(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let resource = state
        .catalog
        .by_path(&segment)
        .ok_or_else(|| AppError::NotFound(segment.clone()))?;
    let body = body_to_map(body)?;
    RequestValidator::validate(&body, resource).map_err(AppError::Invalid)?;
    let row = CrudService::create(&state.pool, resource, body).await?;
    Ok(Json(row))
}
