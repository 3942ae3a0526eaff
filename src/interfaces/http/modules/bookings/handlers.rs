//! Booking handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use super::dto::{BookingDto, CreateBookingRequest, UpdateBookingRequest};
use crate::application::BookingService;
use crate::domain::policy::{authorize, Operation};
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiResponse, ApiResult, EmptyData, ValidatedJson};
use crate::interfaces::http::middleware::CallerContext;

/// Booking handler state
#[derive(Clone)]
pub struct BookingsState {
    pub booking_service: Arc<BookingService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    responses(
        (status = 200, description = "All bookings", body = ApiResponse<Vec<BookingDto>>)
    )
)]
pub async fn list_bookings(
    State(state): State<BookingsState>,
    Extension(caller): Extension<CallerContext>,
) -> ApiResult<Json<ApiResponse<Vec<BookingDto>>>> {
    authorize(caller.role(), Operation::ListBookings)?;

    let bookings = state.booking_service.get_all().await?;
    Ok(Json(ApiResponse::success(
        bookings.into_iter().map(BookingDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = ApiResponse<BookingDto>),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<BookingsState>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<BookingDto>>> {
    authorize(caller.role(), Operation::ReadBooking)?;

    let booking = state
        .booking_service
        .get_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::not_found("Booking", "id", &id))?;
    Ok(Json(ApiResponse::success(BookingDto::from(booking))))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/owner/{nic}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("nic" = String, Path, description = "Owner NIC")),
    responses(
        (status = 200, description = "Bookings held by the owner", body = ApiResponse<Vec<BookingDto>>),
        (status = 401, description = "Authentication required")
    )
)]
pub async fn list_bookings_by_owner(
    State(state): State<BookingsState>,
    Extension(caller): Extension<CallerContext>,
    Path(nic): Path<String>,
) -> ApiResult<Json<ApiResponse<Vec<BookingDto>>>> {
    authorize(caller.role(), Operation::ListBookingsByOwner)?;

    let bookings = state.booking_service.get_by_owner(&nic).await?;
    Ok(Json(ApiResponse::success(
        bookings.into_iter().map(BookingDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/station/{station_id}",
    tag = "Bookings",
    params(("station_id" = String, Path, description = "Station ID")),
    responses(
        (status = 200, description = "Bookings on the station", body = ApiResponse<Vec<BookingDto>>)
    )
)]
pub async fn list_bookings_by_station(
    State(state): State<BookingsState>,
    Extension(caller): Extension<CallerContext>,
    Path(station_id): Path<String>,
) -> ApiResult<Json<ApiResponse<Vec<BookingDto>>>> {
    authorize(caller.role(), Operation::ListBookingsByStation)?;

    let bookings = state.booking_service.get_by_station(&station_id).await?;
    Ok(Json(ApiResponse::success(
        bookings.into_iter().map(BookingDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = ApiResponse<BookingDto>),
        (status = 400, description = "Reservation outside the 7-day window"),
        (status = 404, description = "Station not found"),
        (status = 409, description = "Station is not active")
    )
)]
pub async fn create_booking(
    State(state): State<BookingsState>,
    Extension(caller): Extension<CallerContext>,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<BookingDto>>)> {
    authorize(caller.role(), Operation::CreateBooking)?;

    let booking = state
        .booking_service
        .create(&request.owner_nic, &request.station_id, request.reservation_at)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(BookingDto::from(booking))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Booking ID")),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Booking updated", body = ApiResponse<EmptyData>),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Lead time violated")
    )
)]
pub async fn update_booking(
    State(state): State<BookingsState>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateBookingRequest>,
) -> ApiResult<Json<ApiResponse<EmptyData>>> {
    authorize(caller.role(), Operation::UpdateBooking)?;

    state
        .booking_service
        .update(&id, &request.station_id, request.reservation_at)
        .await?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/cancel",
    tag = "Bookings",
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking cancelled", body = ApiResponse<EmptyData>),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Lead time violated or already terminal")
    )
)]
pub async fn cancel_booking(
    State(state): State<BookingsState>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<EmptyData>>> {
    authorize(caller.role(), Operation::CancelBooking)?;

    state.booking_service.cancel(&id).await?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}
