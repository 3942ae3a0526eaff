//! User management handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use super::dto::{parse_role, CreateUserRequest, UpdateUserRequest, UserDto};
use crate::application::UserService;
use crate::domain::policy::{authorize, Operation};
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiResponse, ApiResult, EmptyData, ValidatedJson};
use crate::interfaces::http::middleware::CallerContext;

/// User handler state
#[derive(Clone)]
pub struct UsersState {
    pub user_service: Arc<UserService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users", body = ApiResponse<Vec<UserDto>>),
        (status = 401, description = "Authentication required")
    )
)]
pub async fn list_users(
    State(state): State<UsersState>,
    Extension(caller): Extension<CallerContext>,
) -> ApiResult<Json<ApiResponse<Vec<UserDto>>>> {
    authorize(caller.role(), Operation::ListUsers)?;

    let users = state.user_service.get_all().await?;
    Ok(Json(ApiResponse::success(
        users.into_iter().map(UserDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserDto>),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<UsersState>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<UserDto>>> {
    authorize(caller.role(), Operation::ReadUser)?;

    let user = state
        .user_service
        .get_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::not_found("User", "id", &id))?;
    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserDto>),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn create_user(
    State(state): State<UsersState>,
    Extension(caller): Extension<CallerContext>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<UserDto>>)> {
    authorize(caller.role(), Operation::CreateUser)?;

    let role = parse_role(&request.role)?;
    let user = state
        .user_service
        .create(&request.email, &request.password, &request.full_name, role)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserDto::from(user))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<EmptyData>),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<UsersState>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<ApiResponse<EmptyData>>> {
    authorize(caller.role(), Operation::UpdateUser)?;

    let role = parse_role(&request.role)?;
    state
        .user_service
        .update(&id, &request.email, &request.full_name, role, request.is_active)
        .await?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = ApiResponse<EmptyData>),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<UsersState>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<EmptyData>>> {
    authorize(caller.role(), Operation::DeleteUser)?;

    state.user_service.delete(&id).await?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}
