//! `/users` routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};

use super::{
    AppState,
    error::AppError,
    extract::{ResourceId, ValidJson, ValidQuery},
    schemas::{ErrorMessage, MessageResponse, Pagination, UserList, ValidationErrorBody},
};
use crate::users::{NewUser, User, UserChanges, UserFilter};

pub(crate) fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).patch(update_user).delete(delete_user),
        )
}

/// Register a new user. E-mail and username must be unique.
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = NewUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "E-mail or username already in use", body = ErrorMessage),
        (status = 422, description = "Validation error", body = ValidationErrorBody)
    )
)]
pub(crate) async fn create_user(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<NewUser>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = state.users.insert(body).await?;
    tracing::info!(id = user.id, username = %user.username, "Created user");
    Ok((StatusCode::CREATED, Json(user)))
}

/// List users with optional filters and pagination.
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(Pagination, UserFilter),
    responses(
        (status = 200, description = "One page of users", body = UserList),
        (status = 422, description = "Validation error", body = ValidationErrorBody)
    )
)]
pub(crate) async fn list_users(
    State(state): State<AppState>,
    ValidQuery(page): ValidQuery<Pagination>,
    ValidQuery(filter): ValidQuery<UserFilter>,
) -> Result<Json<UserList>, AppError> {
    let result = state.users.list(&filter, page.skip, page.limit).await;
    Ok(Json(UserList {
        users: result.items,
        total: result.total,
        skip: page.skip,
        limit: page.limit,
    }))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = u64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 404, description = "User not found", body = ErrorMessage)
    )
)]
pub(crate) async fn get_user(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.users.get(id).await?))
}

/// Update the supplied fields of a user.
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = u64, Path, description = "User identifier")),
    request_body = UserChanges,
    responses(
        (status = 200, description = "The updated user", body = User),
        (status = 400, description = "E-mail or username already in use", body = ErrorMessage),
        (status = 404, description = "User not found", body = ErrorMessage),
        (status = 422, description = "Validation error", body = ValidationErrorBody)
    )
)]
pub(crate) async fn update_user(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    ValidJson(changes): ValidJson<UserChanges>,
) -> Result<Json<User>, AppError> {
    let user = state.users.update(id, changes).await?;
    tracing::info!(id, "Updated user");
    Ok(Json(user))
}

/// Delete a user permanently.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = u64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found", body = ErrorMessage)
    )
)]
pub(crate) async fn delete_user(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<MessageResponse>, AppError> {
    state.users.delete(id).await?;
    tracing::info!(id, "Deleted user");
    Ok(Json(MessageResponse {
        message: format!("User {id} successfully deleted"),
        success: true,
    }))
}
