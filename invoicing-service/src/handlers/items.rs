use crate::dtos::{
    CatalogItemResponse, CreateItemRequest, ItemDeletedResponse, ItemListResponse, ItemResponse,
    UpdateItemRequest,
};
use crate::middleware::OwnerId;
use crate::startup::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use service_core::error::AppError;
use uuid::Uuid;
use validator::Validate;

pub async fn create_item(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Json(payload): Json<CreateItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let item = state
        .db
        .create_catalog_item(&payload.into_create(owner_id))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ItemResponse {
            item: CatalogItemResponse::from(item),
        }),
    ))
}

pub async fn list_items(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
) -> Result<impl IntoResponse, AppError> {
    let items = state.db.list_catalog_items(owner_id).await?;

    Ok(Json(ItemListResponse {
        items: items.into_iter().map(CatalogItemResponse::from).collect(),
    }))
}

pub async fn get_item(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Path(item_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let item = state.db.get_catalog_item(owner_id, item_id).await?;

    Ok(Json(ItemResponse {
        item: CatalogItemResponse::from(item),
    }))
}

pub async fn update_item(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Path(item_id): Path<Uuid>,
    Json(payload): Json<UpdateItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let item = state
        .db
        .update_catalog_item(owner_id, item_id, &payload.into_update())
        .await?;

    Ok(Json(ItemResponse {
        item: CatalogItemResponse::from(item),
    }))
}

pub async fn delete_item(
    State(state): State<AppState>,
    OwnerId(owner_id): OwnerId,
    Path(item_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    state.db.delete_catalog_item(owner_id, item_id).await?;

    Ok(Json(ItemDeletedResponse::new()))
}
