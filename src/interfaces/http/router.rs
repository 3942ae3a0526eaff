//! API router with Swagger UI

use std::sync::Arc;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{BookingService, OwnerService, StationService, UserService};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::JwtConfig;

use super::middleware::{auth_context, AuthState};
use super::modules::{auth, bookings, dashboard, health, owners, stations, users};

/// Unified state for all routes. Axum hands each handler its own
/// sub-state via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub booking_service: Arc<BookingService>,
    pub station_service: Arc<StationService>,
    pub owner_service: Arc<OwnerService>,
    pub user_service: Arc<UserService>,
    pub jwt_config: JwtConfig,
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<AppState> for auth::AuthHandlerState {
    fn from_ref(s: &AppState) -> Self {
        auth::AuthHandlerState {
            user_service: Arc::clone(&s.user_service),
            jwt_config: s.jwt_config.clone(),
        }
    }
}

impl FromRef<AppState> for users::UsersState {
    fn from_ref(s: &AppState) -> Self {
        users::UsersState {
            user_service: Arc::clone(&s.user_service),
        }
    }
}

impl FromRef<AppState> for owners::OwnersState {
    fn from_ref(s: &AppState) -> Self {
        owners::OwnersState {
            owner_service: Arc::clone(&s.owner_service),
        }
    }
}

impl FromRef<AppState> for stations::StationsState {
    fn from_ref(s: &AppState) -> Self {
        stations::StationsState {
            station_service: Arc::clone(&s.station_service),
        }
    }
}

impl FromRef<AppState> for bookings::BookingsState {
    fn from_ref(s: &AppState) -> Self {
        bookings::BookingsState {
            booking_service: Arc::clone(&s.booking_service),
        }
    }
}

impl FromRef<AppState> for dashboard::DashboardState {
    fn from_ref(s: &AppState) -> Self {
        dashboard::DashboardState {
            repos: Arc::clone(&s.repos),
        }
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Auth
        auth::handlers::login,
        // Users
        users::handlers::list_users,
        users::handlers::get_user,
        users::handlers::create_user,
        users::handlers::update_user,
        users::handlers::delete_user,
        // EV Owners
        owners::handlers::list_owners,
        owners::handlers::get_owner,
        owners::handlers::create_owner,
        owners::handlers::update_owner,
        owners::handlers::delete_owner,
        owners::handlers::activate_owner,
        owners::handlers::deactivate_owner,
        // Charging Stations
        stations::handlers::list_stations,
        stations::handlers::get_station,
        stations::handlers::create_station,
        stations::handlers::update_station,
        stations::handlers::delete_station,
        stations::handlers::activate_station,
        stations::handlers::deactivate_station,
        stations::handlers::update_station_schedule,
        // Bookings
        bookings::handlers::list_bookings,
        bookings::handlers::get_booking,
        bookings::handlers::list_bookings_by_owner,
        bookings::handlers::list_bookings_by_station,
        bookings::handlers::create_booking,
        bookings::handlers::update_booking,
        bookings::handlers::cancel_booking,
        // Dashboard
        dashboard::handlers::summary,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and token issuance"),
        (name = "Users", description = "Staff account management"),
        (name = "EV Owners", description = "EV owner registry"),
        (name = "Charging Stations", description = "Station registry and lifecycle"),
        (name = "Bookings", description = "Charging-slot bookings"),
        (name = "Dashboard", description = "Operator dashboard"),
        (name = "Health", description = "Service health"),
    ),
    info(
        title = "EV Charging Booking Service API",
        description = "Reservation service for EV charging stations",
    )
)]
struct ApiDoc;

/// Build the full application router.
pub fn create_api_router(state: AppState) -> Router {
    let auth_state = AuthState {
        jwt_config: state.jwt_config.clone(),
    };

    let api = Router::new()
        // Health
        .route("/health", get(health::handlers::health_check))
        // Auth
        .route("/auth/login", post(auth::handlers::login))
        // Users
        .route(
            "/users",
            get(users::handlers::list_users).post(users::handlers::create_user),
        )
        .route(
            "/users/{id}",
            get(users::handlers::get_user)
                .put(users::handlers::update_user)
                .delete(users::handlers::delete_user),
        )
        // EV Owners
        .route(
            "/owners",
            get(owners::handlers::list_owners).post(owners::handlers::create_owner),
        )
        .route(
            "/owners/{nic}",
            get(owners::handlers::get_owner)
                .put(owners::handlers::update_owner)
                .delete(owners::handlers::delete_owner),
        )
        .route("/owners/{nic}/activate", post(owners::handlers::activate_owner))
        .route(
            "/owners/{nic}/deactivate",
            post(owners::handlers::deactivate_owner),
        )
        // Charging Stations
        .route(
            "/stations",
            get(stations::handlers::list_stations).post(stations::handlers::create_station),
        )
        .route(
            "/stations/{id}",
            get(stations::handlers::get_station)
                .put(stations::handlers::update_station)
                .delete(stations::handlers::delete_station),
        )
        .route(
            "/stations/{id}/activate",
            post(stations::handlers::activate_station),
        )
        .route(
            "/stations/{id}/deactivate",
            post(stations::handlers::deactivate_station),
        )
        .route(
            "/stations/{id}/schedule",
            post(stations::handlers::update_station_schedule),
        )
        // Bookings
        .route(
            "/bookings",
            get(bookings::handlers::list_bookings).post(bookings::handlers::create_booking),
        )
        .route(
            "/bookings/{id}",
            get(bookings::handlers::get_booking).put(bookings::handlers::update_booking),
        )
        .route(
            "/bookings/{id}/cancel",
            post(bookings::handlers::cancel_booking),
        )
        .route(
            "/bookings/owner/{nic}",
            get(bookings::handlers::list_bookings_by_owner),
        )
        .route(
            "/bookings/station/{station_id}",
            get(bookings::handlers::list_bookings_by_station),
        )
        // Dashboard
        .route("/dashboard/summary", get(dashboard::handlers::summary))
        .with_state(state);

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/v1", api)
        .layer(middleware::from_fn_with_state(auth_state, auth_context))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
