//! Router assembly.
//!
//! Follows the split used at startup: session routes carry auth state,
//! admin routes sit behind the auth guard, public routes are open, and the
//! gatekeeper wraps the whole router so rejections fire before routing.

use crate::api::{admin, public};
use crate::auth::{self, AuthState};
use crate::middleware::{gatekeeper_middleware, request_logging, Gatekeeper};
use crate::store::JobStore;
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JobStore>,
}

/// Build the full application router
pub fn create_router(store: Arc<JobStore>, auth_state: AuthState, gatekeeper: Gatekeeper) -> Router {
    let app_state = AppState { store };
    let jwt_handler = auth_state.jwt_handler.clone();

    // Login stands alone: it is the credential check itself.
    let session_routes = Router::new()
        .route("/api/admin/login", post(auth::api::login))
        .with_state(auth_state.clone());

    let logout_routes = Router::new()
        .route("/api/admin/logout", post(auth::api::logout))
        .route_layer(axum::middleware::from_fn_with_state(
            jwt_handler.clone(),
            auth::admin_auth_middleware,
        ))
        .with_state(auth_state);

    // Admin API routes behind the authoritative session check.
    let admin_routes = Router::new()
        .route(
            "/api/admin/jobs",
            get(admin::list_jobs).post(admin::create_job),
        )
        .route(
            "/api/admin/jobs/:id",
            put(admin::update_job).delete(admin::delete_job),
        )
        .route("/api/admin/applications", get(admin::list_applications))
        .route(
            "/api/admin/applications/:id",
            put(admin::update_application).delete(admin::delete_application),
        )
        .route(
            "/api/admin/applications/:id/comments",
            get(admin::list_comments).post(admin::create_comment),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            jwt_handler,
            auth::admin_auth_middleware,
        ))
        .with_state(app_state.clone());

    let public_routes = Router::new()
        .route("/api/health", get(public::health_check))
        .route("/api/jobs", get(public::list_jobs))
        .route("/api/jobs/:id", get(public::get_job))
        .route("/api/applications", post(public::submit_application))
        .with_state(app_state);

    Router::new()
        .merge(public_routes)
        .merge(session_routes)
        .merge(logout_routes)
        .merge(admin_routes)
        .layer(axum::middleware::from_fn(request_logging))
        .layer(axum::middleware::from_fn_with_state(
            gatekeeper,
            gatekeeper_middleware,
        ))
        .layer(CorsLayer::permissive())
}
