//! Charging station handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use super::dto::{
    parse_station_type, CreateStationRequest, StationDto, UpdateScheduleRequest,
    UpdateStationRequest,
};
use crate::application::StationService;
use crate::domain::policy::{authorize, Operation};
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiResponse, ApiResult, EmptyData, ValidatedJson};
use crate::interfaces::http::middleware::CallerContext;

/// Station handler state
#[derive(Clone)]
pub struct StationsState {
    pub station_service: Arc<StationService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/stations",
    tag = "Charging Stations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All stations", body = ApiResponse<Vec<StationDto>>),
        (status = 403, description = "Staff role required")
    )
)]
pub async fn list_stations(
    State(state): State<StationsState>,
    Extension(caller): Extension<CallerContext>,
) -> ApiResult<Json<ApiResponse<Vec<StationDto>>>> {
    authorize(caller.role(), Operation::ListStations)?;

    let stations = state.station_service.get_all().await?;
    Ok(Json(ApiResponse::success(
        stations.into_iter().map(StationDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/stations/{id}",
    tag = "Charging Stations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Station ID")),
    responses(
        (status = 200, description = "Station details", body = ApiResponse<StationDto>),
        (status = 404, description = "Station not found")
    )
)]
pub async fn get_station(
    State(state): State<StationsState>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<StationDto>>> {
    authorize(caller.role(), Operation::ReadStation)?;

    let station = state
        .station_service
        .get_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::not_found("Station", "id", &id))?;
    Ok(Json(ApiResponse::success(StationDto::from(station))))
}

#[utoipa::path(
    post,
    path = "/api/v1/stations",
    tag = "Charging Stations",
    security(("bearer_auth" = [])),
    request_body = CreateStationRequest,
    responses(
        (status = 201, description = "Station created", body = ApiResponse<StationDto>),
        (status = 403, description = "Staff role required")
    )
)]
pub async fn create_station(
    State(state): State<StationsState>,
    Extension(caller): Extension<CallerContext>,
    ValidatedJson(request): ValidatedJson<CreateStationRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<StationDto>>)> {
    authorize(caller.role(), Operation::CreateStation)?;

    let station_type = parse_station_type(&request.station_type)?;
    let station = state
        .station_service
        .create(
            &request.location,
            station_type,
            request.slots_available,
            request.schedule,
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(StationDto::from(station))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/stations/{id}",
    tag = "Charging Stations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Station ID")),
    request_body = UpdateStationRequest,
    responses(
        (status = 200, description = "Station updated", body = ApiResponse<EmptyData>),
        (status = 404, description = "Station not found")
    )
)]
pub async fn update_station(
    State(state): State<StationsState>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateStationRequest>,
) -> ApiResult<Json<ApiResponse<EmptyData>>> {
    authorize(caller.role(), Operation::UpdateStation)?;

    let station_type = parse_station_type(&request.station_type)?;
    state
        .station_service
        .update(
            &id,
            &request.location,
            station_type,
            request.slots_available,
            request.schedule,
        )
        .await?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}

#[utoipa::path(
    delete,
    path = "/api/v1/stations/{id}",
    tag = "Charging Stations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Station ID")),
    responses(
        (status = 200, description = "Station deleted", body = ApiResponse<EmptyData>),
        (status = 403, description = "Backoffice role required"),
        (status = 404, description = "Station not found")
    )
)]
pub async fn delete_station(
    State(state): State<StationsState>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<EmptyData>>> {
    authorize(caller.role(), Operation::DeleteStation)?;

    state.station_service.delete(&id).await?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}

#[utoipa::path(
    post,
    path = "/api/v1/stations/{id}/activate",
    tag = "Charging Stations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Station ID")),
    responses(
        (status = 200, description = "Station activated", body = ApiResponse<EmptyData>),
        (status = 404, description = "Station not found")
    )
)]
pub async fn activate_station(
    State(state): State<StationsState>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<EmptyData>>> {
    authorize(caller.role(), Operation::ActivateStation)?;

    state.station_service.activate(&id).await?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}

#[utoipa::path(
    post,
    path = "/api/v1/stations/{id}/deactivate",
    tag = "Charging Stations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Station ID")),
    responses(
        (status = 200, description = "Station deactivated", body = ApiResponse<EmptyData>),
        (status = 404, description = "Station not found"),
        (status = 409, description = "Station has active bookings")
    )
)]
pub async fn deactivate_station(
    State(state): State<StationsState>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<EmptyData>>> {
    authorize(caller.role(), Operation::DeactivateStation)?;

    state.station_service.deactivate(&id).await?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}

#[utoipa::path(
    post,
    path = "/api/v1/stations/{id}/schedule",
    tag = "Charging Stations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Station ID")),
    request_body = UpdateScheduleRequest,
    responses(
        (status = 200, description = "Schedule updated", body = ApiResponse<EmptyData>),
        (status = 404, description = "Station not found")
    )
)]
pub async fn update_station_schedule(
    State(state): State<StationsState>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateScheduleRequest>,
) -> ApiResult<Json<ApiResponse<EmptyData>>> {
    authorize(caller.role(), Operation::UpdateStationSchedule)?;

    state
        .station_service
        .update_schedule(&id, request.schedule)
        .await?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}
