//! EV owner handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use super::dto::{parse_status, CreateOwnerRequest, OwnerDto, UpdateOwnerRequest};
use crate::application::OwnerService;
use crate::domain::policy::{authorize, Operation};
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiResponse, ApiResult, EmptyData, ValidatedJson};
use crate::interfaces::http::middleware::CallerContext;

/// Owner handler state
#[derive(Clone)]
pub struct OwnersState {
    pub owner_service: Arc<OwnerService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/owners",
    tag = "EV Owners",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All owners", body = ApiResponse<Vec<OwnerDto>>),
        (status = 403, description = "Staff role required")
    )
)]
pub async fn list_owners(
    State(state): State<OwnersState>,
    Extension(caller): Extension<CallerContext>,
) -> ApiResult<Json<ApiResponse<Vec<OwnerDto>>>> {
    authorize(caller.role(), Operation::ListOwners)?;

    let owners = state.owner_service.get_all().await?;
    Ok(Json(ApiResponse::success(
        owners.into_iter().map(OwnerDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/owners/{nic}",
    tag = "EV Owners",
    security(("bearer_auth" = [])),
    params(("nic" = String, Path, description = "Owner NIC")),
    responses(
        (status = 200, description = "Owner details", body = ApiResponse<OwnerDto>),
        (status = 404, description = "Owner not found")
    )
)]
pub async fn get_owner(
    State(state): State<OwnersState>,
    Extension(caller): Extension<CallerContext>,
    Path(nic): Path<String>,
) -> ApiResult<Json<ApiResponse<OwnerDto>>> {
    authorize(caller.role(), Operation::ReadOwner)?;

    let owner = state
        .owner_service
        .get_by_nic(&nic)
        .await?
        .ok_or_else(|| DomainError::not_found("Owner", "nic", &nic))?;
    Ok(Json(ApiResponse::success(OwnerDto::from(owner))))
}

#[utoipa::path(
    post,
    path = "/api/v1/owners",
    tag = "EV Owners",
    security(("bearer_auth" = [])),
    request_body = CreateOwnerRequest,
    responses(
        (status = 201, description = "Owner created", body = ApiResponse<OwnerDto>),
        (status = 409, description = "NIC already exists")
    )
)]
pub async fn create_owner(
    State(state): State<OwnersState>,
    Extension(caller): Extension<CallerContext>,
    ValidatedJson(request): ValidatedJson<CreateOwnerRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<OwnerDto>>)> {
    authorize(caller.role(), Operation::CreateOwner)?;

    let owner = state.owner_service.create(request.into_owner()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(OwnerDto::from(owner))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/owners/{nic}",
    tag = "EV Owners",
    security(("bearer_auth" = [])),
    params(("nic" = String, Path, description = "Owner NIC")),
    request_body = UpdateOwnerRequest,
    responses(
        (status = 200, description = "Owner updated", body = ApiResponse<EmptyData>),
        (status = 404, description = "Owner not found")
    )
)]
pub async fn update_owner(
    State(state): State<OwnersState>,
    Extension(caller): Extension<CallerContext>,
    Path(nic): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateOwnerRequest>,
) -> ApiResult<Json<ApiResponse<EmptyData>>> {
    authorize(caller.role(), Operation::UpdateOwner)?;

    let status = parse_status(&request.status)?;
    state
        .owner_service
        .update(
            &nic,
            &request.name,
            request.email,
            request.phone,
            request.vehicle_details,
            status,
        )
        .await?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}

#[utoipa::path(
    delete,
    path = "/api/v1/owners/{nic}",
    tag = "EV Owners",
    security(("bearer_auth" = [])),
    params(("nic" = String, Path, description = "Owner NIC")),
    responses(
        (status = 200, description = "Owner deleted", body = ApiResponse<EmptyData>),
        (status = 404, description = "Owner not found")
    )
)]
pub async fn delete_owner(
    State(state): State<OwnersState>,
    Extension(caller): Extension<CallerContext>,
    Path(nic): Path<String>,
) -> ApiResult<Json<ApiResponse<EmptyData>>> {
    authorize(caller.role(), Operation::DeleteOwner)?;

    state.owner_service.delete(&nic).await?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}

#[utoipa::path(
    post,
    path = "/api/v1/owners/{nic}/activate",
    tag = "EV Owners",
    security(("bearer_auth" = [])),
    params(("nic" = String, Path, description = "Owner NIC")),
    responses(
        (status = 200, description = "Owner activated", body = ApiResponse<EmptyData>),
        (status = 404, description = "Owner not found")
    )
)]
pub async fn activate_owner(
    State(state): State<OwnersState>,
    Extension(caller): Extension<CallerContext>,
    Path(nic): Path<String>,
) -> ApiResult<Json<ApiResponse<EmptyData>>> {
    authorize(caller.role(), Operation::ActivateOwner)?;

    state.owner_service.activate(&nic).await?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}

#[utoipa::path(
    post,
    path = "/api/v1/owners/{nic}/deactivate",
    tag = "EV Owners",
    security(("bearer_auth" = [])),
    params(("nic" = String, Path, description = "Owner NIC")),
    responses(
        (status = 200, description = "Owner deactivated", body = ApiResponse<EmptyData>),
        (status = 404, description = "Owner not found")
    )
)]
pub async fn deactivate_owner(
    State(state): State<OwnersState>,
    Extension(caller): Extension<CallerContext>,
    Path(nic): Path<String>,
) -> ApiResult<Json<ApiResponse<EmptyData>>> {
    authorize(caller.role(), Operation::DeactivateOwner)?;

    state.owner_service.deactivate(&nic).await?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}
