//! Advertisement handlers: retrieve, create, partial update, delete.

use crate::error::AppError;
use crate::model::{AdvertisementView, Created, Deleted, UpdatedAdvertisementView};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

/// Only positive integers name an advertisement; anything else cannot exist.
fn parse_id(id_str: &str) -> Result<i64, AppError> {
    if id_str.is_empty() || !id_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::advertisement_not_found());
    }
    match id_str.parse::<i64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(AppError::advertisement_not_found()),
    }
}

fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    body.map(|Json(v)| v).map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(e.body_text())
        } else {
            AppError::BadRequest(e.body_text())
        }
    })
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = state.advertisements.retrieve(id).await?;
    Ok(Json(AdvertisementView::from(row)))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = json_body(body)?;
    let ad = RequestValidator::validate_create(&body)?;
    let advertisement_id = state.advertisements.create(ad).await?;
    Ok(Json(Created { advertisement_id }))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let body = json_body(body)?;
    let patch = RequestValidator::validate_update(&body)?;
    let row = state.advertisements.partial_update(id, patch).await?;
    Ok(Json(UpdatedAdvertisementView::from(row)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state.advertisements.delete(id).await?;
    Ok(Json(Deleted { deleted: true }))
}
