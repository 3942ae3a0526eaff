//! EV charging booking service
//!
//! REST API for charging-station reservations. Reads configuration from
//! a TOML file (~/.config/evcharge/config.toml by default).

use std::sync::Arc;

use tracing::{error, info};

use evcharge::application::{
    BookingService, OwnerService, StationLocks, StationService, UserService,
};
use evcharge::config::AppConfig;
use evcharge::domain::{RepositoryProvider, UserRole};
use evcharge::infrastructure::crypto::JwtConfig;
use evcharge::infrastructure::InMemoryStore;
use evcharge::support::ShutdownSignal;
use evcharge::{create_api_router, default_config_path, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("EVCHARGE_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting EV charging booking service...");

    let jwt_config = JwtConfig {
        secret: app_cfg.security.jwt_secret.clone(),
        expiration_hours: app_cfg.security.jwt_expiration_hours,
        issuer: "evcharge-service".to_string(),
    };
    info!(
        "JWT configured with {}h token expiration",
        jwt_config.expiration_hours
    );

    // ── Store & services ───────────────────────────────────────
    let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryStore::new());

    let user_service = Arc::new(UserService::new(repos.clone()));
    create_default_admin(&user_service, &repos, &app_cfg).await;

    let station_locks = Arc::new(StationLocks::new());
    let booking_service = Arc::new(BookingService::new(repos.clone(), station_locks.clone()));
    let station_service = Arc::new(StationService::new(repos.clone(), station_locks));
    let owner_service = Arc::new(OwnerService::new(repos.clone()));

    // ── Router & server ────────────────────────────────────────
    let router = create_api_router(AppState {
        repos,
        booking_service,
        station_service,
        owner_service,
        user_service,
        jwt_config,
    });

    let shutdown = ShutdownSignal::new();
    shutdown.listen_for_ctrl_c();

    let addr = format!("{}:{}", app_cfg.server.host, app_cfg.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    let server_shutdown = shutdown.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            server_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        })
        .await?;

    info!("EV charging booking service shutdown complete");
    Ok(())
}

/// Create the default admin user if no users exist
async fn create_default_admin(
    user_service: &UserService,
    repos: &Arc<dyn RepositoryProvider>,
    app_cfg: &AppConfig,
) {
    let users_count = repos.users().count().await.unwrap_or(0);
    if users_count > 0 {
        return;
    }

    info!("Creating default admin user...");
    match user_service
        .create(
            &app_cfg.admin.email,
            &app_cfg.admin.password,
            &app_cfg.admin.full_name,
            UserRole::Backoffice,
        )
        .await
    {
        Ok(_) => {
            info!("Default admin created: {}", app_cfg.admin.email);
            info!("Please change the admin password immediately!");
        }
        Err(e) => {
            error!("Failed to create admin user: {}", e);
        }
    }
}
