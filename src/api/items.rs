//! `/items` routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use super::{
    AppState,
    error::AppError,
    extract::{ResourceId, ValidJson, ValidQuery},
    schemas::{ErrorMessage, ItemList, MessageResponse, Pagination, ValidationErrorBody},
};
use crate::items::{Item, ItemChanges, ItemFilter, NewItem};

pub(crate) fn routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/:id",
            get(get_item).patch(update_item).delete(delete_item),
        )
        .route("/items/:id/archive", post(archive_item))
}

/// Add an item to the catalog. Items start as `draft` unless a status is given.
#[utoipa::path(
    post,
    path = "/items",
    tag = "Items",
    request_body = NewItem,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 422, description = "Validation error", body = ValidationErrorBody)
    )
)]
pub(crate) async fn create_item(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<NewItem>,
) -> Result<(StatusCode, Json<Item>), AppError> {
    let item = state.items.insert(body).await?;
    tracing::info!(id = item.id, owner_id = item.owner_id, "Created item");
    Ok((StatusCode::CREATED, Json(item)))
}

/// List items filtered by status, owner, price range, or tag.
#[utoipa::path(
    get,
    path = "/items",
    tag = "Items",
    params(Pagination, ItemFilter),
    responses(
        (status = 200, description = "One page of items", body = ItemList),
        (status = 422, description = "Validation error", body = ValidationErrorBody)
    )
)]
pub(crate) async fn list_items(
    State(state): State<AppState>,
    ValidQuery(page): ValidQuery<Pagination>,
    ValidQuery(filter): ValidQuery<ItemFilter>,
) -> Result<Json<ItemList>, AppError> {
    let result = state.items.list(&filter, page.skip, page.limit).await;
    Ok(Json(ItemList {
        items: result.items,
        total: result.total,
        skip: page.skip,
        limit: page.limit,
    }))
}

/// Fetch one item.
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "Items",
    params(("id" = u64, Path, description = "Item identifier")),
    responses(
        (status = 200, description = "The item", body = Item),
        (status = 404, description = "Item not found", body = ErrorMessage)
    )
)]
pub(crate) async fn get_item(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<Item>, AppError> {
    Ok(Json(state.items.get(id).await?))
}

/// Update the supplied fields of an item.
#[utoipa::path(
    patch,
    path = "/items/{id}",
    tag = "Items",
    params(("id" = u64, Path, description = "Item identifier")),
    request_body = ItemChanges,
    responses(
        (status = 200, description = "The updated item", body = Item),
        (status = 404, description = "Item not found", body = ErrorMessage),
        (status = 422, description = "Validation error", body = ValidationErrorBody)
    )
)]
pub(crate) async fn update_item(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    ValidJson(changes): ValidJson<ItemChanges>,
) -> Result<Json<Item>, AppError> {
    let item = state.items.update(id, changes).await?;
    tracing::info!(id, status = ?item.status, "Updated item");
    Ok(Json(item))
}

/// Delete an item permanently.
#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "Items",
    params(("id" = u64, Path, description = "Item identifier")),
    responses(
        (status = 200, description = "Item deleted", body = MessageResponse),
        (status = 404, description = "Item not found", body = ErrorMessage)
    )
)]
pub(crate) async fn delete_item(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<MessageResponse>, AppError> {
    state.items.delete(id).await?;
    tracing::info!(id, "Deleted item");
    Ok(Json(MessageResponse {
        message: format!("Item {id} successfully deleted"),
        success: true,
    }))
}

/// Archive an item instead of deleting it; the record stays retrievable.
#[utoipa::path(
    post,
    path = "/items/{id}/archive",
    tag = "Items",
    params(("id" = u64, Path, description = "Item identifier")),
    responses(
        (status = 200, description = "The archived item", body = Item),
        (status = 404, description = "Item not found", body = ErrorMessage)
    )
)]
pub(crate) async fn archive_item(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<Item>, AppError> {
    let item = state.items.archive(id).await?;
    tracing::info!(id, "Archived item");
    Ok(Json(item))
}
