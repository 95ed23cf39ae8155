//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use campus_common::{AppConfig, AppError, JwtService};
use campus_db::{
    create_pool, run_migrations, PgCommentRepository, PgCommunityRepository, PgMemberRepository,
    PgNotificationRepository, PgPostRepository, PgUserRepository,
};
use campus_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the Axum application with the basic middleware stack (used in tests)
pub fn create_app(state: AppState) -> Router {
    let router = create_router().merge(health_routes());
    let router = apply_middleware(router);
    router.with_state(state)
}

/// Build the Axum application with rate limiting and configured CORS.
/// Health routes are mounted outside the rate limiter.
pub fn create_app_with_config(state: AppState, config: &AppConfig) -> Router {
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    let router = api.merge(health_routes());
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = campus_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("Migrations applied");

    // Create JWT service
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));

    // Create repositories
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let post_repo = Arc::new(PgPostRepository::new(pool.clone()));
    let comment_repo = Arc::new(PgCommentRepository::new(pool.clone()));
    let community_repo = Arc::new(PgCommunityRepository::new(pool.clone()));
    let member_repo = Arc::new(PgMemberRepository::new(pool.clone()));
    let notification_repo = Arc::new(PgNotificationRepository::new(pool.clone()));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .pool(pool)
        .user_repo(user_repo)
        .post_repo(post_repo)
        .comment_repo(comment_repo)
        .community_repo(community_repo)
        .member_repo(member_repo)
        .notification_repo(notification_repo)
        .jwt_service(jwt_service)
        .auth_config(Arc::new(config.auth.clone()))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api.port));

    // Create app state
    let state = create_app_state(config).await?;

    // Build application (rate limiting and CORS from config)
    let config = state.config().clone();
    let app = create_app_with_config(state, &config);

    // Run server
    run_server(app, addr).await
}
