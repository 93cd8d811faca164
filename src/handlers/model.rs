//! Model CRUD handlers: list, create, read, update, delete.

use crate::error::AppError;
use crate::service::CrudService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

pub async fn list(
    State(state): State<AppState>,
    Path(model): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Value>>, AppError> {
    let model = state.registry.get(&model)?;
    let docs = CrudService::list(&state.store, model, &params).await?;
    Ok(Json(docs))
}

pub async fn create(
    State(state): State<AppState>,
    Path(model): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let model = state.registry.get(&model)?;
    let doc = CrudService::create(&state.store, model, body).await?;
    Ok((StatusCode::OK, Json(doc)))
}

pub async fn read(
    State(state): State<AppState>,
    Path((model, id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let model = state.registry.get(&model)?;
    let doc = CrudService::read(&state.store, model, &id).await?;
    Ok(Json(doc))
}

pub async fn update(
    State(state): State<AppState>,
    Path((model, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let model = state.registry.get(&model)?;
    let doc = CrudService::update(&state.store, model, &id, body).await?;
    Ok(Json(doc))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((model, id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let model = state.registry.get(&model)?;
    let doc = CrudService::delete(&state.store, model, &id).await?;
    Ok(Json(doc))
}
