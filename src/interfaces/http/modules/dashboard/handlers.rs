//! Dashboard summary handler

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::policy::{authorize, Operation};
use crate::domain::{DomainResult, RepositoryProvider};
use crate::interfaces::http::common::{ApiError, ApiResponse};
use crate::interfaces::http::middleware::CallerContext;

/// Dashboard handler state
#[derive(Clone)]
pub struct DashboardState {
    pub repos: Arc<dyn RepositoryProvider>,
}

/// Collection counts shown on the operator dashboard
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardSummary {
    pub users: u64,
    pub owners: u64,
    pub stations: u64,
    pub bookings: u64,
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/summary",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Collection counts", body = ApiResponse<DashboardSummary>),
        (status = 401, description = "Authentication required"),
        (status = 500, description = "Summary unavailable")
    )
)]
pub async fn summary(
    State(state): State<DashboardState>,
    Extension(caller): Extension<CallerContext>,
) -> Result<Json<ApiResponse<DashboardSummary>>, axum::response::Response> {
    use axum::response::IntoResponse;

    authorize(caller.role(), Operation::ViewDashboard)
        .map_err(|e| ApiError(e).into_response())?;

    match collect_counts(&state.repos).await {
        Ok(summary) => Ok(Json(ApiResponse::success(summary))),
        Err(e) => {
            // Detail stays server-side; the caller gets a generic failure.
            error!(error = %e, "Dashboard summary failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<DashboardSummary>::error(
                    "Failed to load dashboard summary",
                )),
            )
                .into_response())
        }
    }
}

async fn collect_counts(repos: &Arc<dyn RepositoryProvider>) -> DomainResult<DashboardSummary> {
    Ok(DashboardSummary {
        users: repos.users().count().await?,
        owners: repos.owners().count().await?,
        stations: repos.stations().count().await?,
        bookings: repos.bookings().count().await?,
    })
}
