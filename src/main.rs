//! Job board backend server.

use anyhow::{Context, Result};
use dotenv::dotenv;
use jobboard_backend::{
    api::create_router,
    auth::{AdminStore, AuthState, JwtHandler},
    middleware::{Gatekeeper, RateLimiter},
    store::JobStore,
};
use std::{env, sync::Arc, time::Duration};
use tokio::{net::TcpListener, time::interval};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How often stale rate-limit windows are swept.
const SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv();
    init_tracing();

    info!("🚀 Job board backend starting");

    // The signing secret is a hard startup requirement.
    let jwt_secret =
        env::var("JWT_SECRET").context("JWT_SECRET must be set (session token signing secret)")?;

    let production = matches!(env::var("APP_ENV").as_deref(), Ok("production"));

    let db_path = env::var("DATABASE_PATH").unwrap_or_else(|_| "jobboard.db".to_string());
    let store = Arc::new(JobStore::new(&db_path)?);
    let admin_store = Arc::new(AdminStore::new(&db_path)?);
    info!("📊 Database initialized at: {}", db_path);

    let jwt_handler = Arc::new(JwtHandler::new(jwt_secret));
    let auth_state = AuthState::new(admin_store, jwt_handler, production);

    let gatekeeper = Gatekeeper::new(RateLimiter::new());

    // Background sweep keeps the counter map bounded; stale windows are
    // otherwise only replaced lazily on access.
    let limiter = gatekeeper.limiter.clone();
    tokio::spawn(async move {
        let mut ticker = interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            limiter.sweep();
        }
    });

    let app = create_router(store, auth_state, gatekeeper);

    let addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr).await?;
    info!("🎯 API server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobboard_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
