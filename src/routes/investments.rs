use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use http::StatusCode;
use serde_json::Value;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{Investment, TypeCount};
use crate::services::investment_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    // The literal distribution path is registered ahead of the `:id` routes.
    Router::new()
        .route("/types/distribution", get(type_distribution))
        .route("/", get(fetch_investments).post(create_investment))
        .route(
            "/:id",
            get(get_investment)
                .put(update_investment)
                .delete(delete_investment),
        )
}

pub async fn type_distribution(
    State(state): State<AppState>,
) -> Result<Json<Vec<TypeCount>>, AppError> {
    info!("GET /investments/types/distribution - Counting investments by type");
    let distribution = investment_service::type_distribution(state.store.as_ref())
        .await
        .map_err(|e| {
            error!("Failed to compute type distribution: {}", e);
            e
        })?;
    Ok(Json(distribution))
}

pub async fn fetch_investments(
    State(state): State<AppState>,
) -> Result<Json<Vec<Investment>>, AppError> {
    info!("GET /investments - Fetching all investments");
    let investments = investment_service::fetch_all(state.store.as_ref())
        .await
        .map_err(|e| {
            error!("Failed to fetch investments: {}", e);
            e
        })?;
    Ok(Json(investments))
}

pub async fn get_investment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Investment>, AppError> {
    info!("GET /investments/{} - Fetching investment", id);
    let investment = investment_service::fetch_one(state.store.as_ref(), &id)
        .await
        .map_err(|e| {
            error!("Failed to fetch investment {}: {}", id, e);
            e
        })?;
    Ok(Json(investment))
}

#[axum::debug_handler]
pub async fn create_investment(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Investment>), AppError> {
    info!("POST /investments - Creating new investment");
    let Json(body) = body?;
    let investment = investment_service::create(state.store.as_ref(), &body)
        .await
        .map_err(|e| {
            error!("Failed to create investment: {}", e);
            e
        })?;
    Ok((StatusCode::CREATED, Json(investment)))
}

pub async fn update_investment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Investment>, AppError> {
    info!("PUT /investments/{} - Updating investment", id);
    let Json(body) = body?;
    let investment = investment_service::update(state.store.as_ref(), &id, &body)
        .await
        .map_err(|e| {
            error!("Failed to update investment {}: {}", id, e);
            e
        })?;
    Ok(Json(investment))
}

pub async fn delete_investment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    info!("DELETE /investments/{} - Deleting investment", id);
    investment_service::delete(state.store.as_ref(), &id)
        .await
        .map_err(|e| {
            error!("Failed to delete investment {}: {}", id, e);
            e
        })?;
    Ok(StatusCode::NO_CONTENT)
}
