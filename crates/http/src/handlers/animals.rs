//! Catalog endpoints. Each handler issues exactly one store call.

use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use fauna_core::{AnimalPage, AnimalRecord, AnimalUpdate, NewAnimal};

use crate::AppState;
use crate::api_error::ApiError;
use crate::extract::{ApiJson, ApiQuery};
use crate::query_types::{CreateAnimalRequest, ListQuery};
use crate::response_types::{CreateResponse, SuccessResponse};

/// Ids arrive as text; a non-numeric id is a client error like any other
/// store rejection.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim().parse().map_err(|_| {
        ApiError::BadRequest(format!("invalid input syntax for type bigint: \"{raw}\""))
    })
}

pub async fn list_by_country(
    State(state): State<Arc<AppState>>,
    Path(pais): Path<String>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<Json<AnimalPage>, ApiError> {
    let window = query.window();
    let page = state
        .store
        .list_by_country(&pais, window)
        .await
        .map_err(|e| ApiError::query(&e))?;
    tracing::debug!(country = %pais, returned = page.animals.len(), total = page.total, "listed");
    Ok(Json(page))
}

pub async fn create_animal(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateAnimalRequest>,
) -> Result<Json<CreateResponse>, ApiError> {
    let row = NewAnimal::submitted(req.name, req.description, req.image_url, req.country);
    let data = state.store.insert(&[row]).await.map_err(|e| ApiError::rejected(&e))?;
    Ok(Json(CreateResponse { success: true, data }))
}

pub async fn get_animal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AnimalRecord>, ApiError> {
    let id = parse_id(&id)?;
    let record = state.store.get(id).await.map_err(|e| ApiError::rejected(&e))?;
    Ok(Json(record))
}

pub async fn delete_animal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let id = parse_id(&id)?;
    state.store.delete(id).await.map_err(|e| ApiError::rejected(&e))?;
    Ok(Json(SuccessResponse { success: true }))
}

pub async fn update_animal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(changes): ApiJson<AnimalUpdate>,
) -> Result<Json<AnimalRecord>, ApiError> {
    let id = parse_id(&id)?;
    let record = state.store.update(id, &changes).await.map_err(|e| ApiError::rejected(&e))?;
    Ok(Json(record))
}
