//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use chrono::Duration;
use society_cache::{InMemorySessionStore, RedisPool, RedisSessionStore, SessionStore};
use society_common::{AdminDirectory, AppConfig, AppError, SessionBackend};
use society_core::{
    CommitteeMember, ContactInfo, Document, Event, GalleryAlbum, Notice, Settings,
};
use society_service::ServiceContext;
use society_store::{
    DiskUploadStore, JsonAuditLog, JsonCollectionStore, JsonSingletonStore, CONTACT_FILE,
    SETTINGS_FILE,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tower_http::services::ServeDir;
use tracing::{debug, info, warn};

use crate::middleware::apply_middleware_with_config;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// How often idle sessions nobody asks about again are evicted
const SESSION_SWEEP_INTERVAL: std::time::Duration = std::time::Duration::from_secs(5 * 60);

/// Build the complete Axum application with all routes and middleware
///
/// Health probes and static uploads sit outside the rate limiter.
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        &config.storage,
        config.app.env.is_production(),
    );
    let uploads = ServeDir::new(&config.storage.upload_dir);

    api.merge(health_routes())
        .nest_service("/uploads", uploads)
        .with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let data_dir = config.storage.data_dir.clone();
    tokio::fs::create_dir_all(&data_dir)
        .await
        .map_err(|e| AppError::Storage(format!("{}: {e}", data_dir.display())))?;
    info!(data_dir = %data_dir.display(), "Data directory ready");

    let uploads = DiskUploadStore::new(config.storage.upload_dir.clone());
    uploads.initialize().await?;
    info!(upload_dir = %config.storage.upload_dir.display(), "Upload directory ready");

    let sessions = create_session_store(&config)?;
    spawn_session_sweeper(Arc::clone(&sessions), SESSION_SWEEP_INTERVAL);
    let directory = AdminDirectory::from_config(config.session.admin_accounts_file.as_deref()).await?;
    info!(accounts = directory.len(), "Admin directory loaded");

    let service_context = ServiceContext::builder()
        .notices(Arc::new(JsonCollectionStore::<Notice>::new(&data_dir)))
        .documents(Arc::new(JsonCollectionStore::<Document>::new(&data_dir)))
        .events(Arc::new(JsonCollectionStore::<Event>::new(&data_dir)))
        .gallery(Arc::new(JsonCollectionStore::<GalleryAlbum>::new(&data_dir)))
        .committee(Arc::new(JsonCollectionStore::<CommitteeMember>::new(&data_dir)))
        .contact(Arc::new(JsonSingletonStore::<ContactInfo>::in_dir(&data_dir, CONTACT_FILE)))
        .settings(Arc::new(JsonSingletonStore::<Settings>::in_dir(&data_dir, SETTINGS_FILE)))
        .audit_log(Arc::new(JsonAuditLog::new(&data_dir, config.audit.max_entries)))
        .uploads(Arc::new(uploads))
        .sessions(sessions)
        .directory(Arc::new(directory))
        .upload_limits(
            config.storage.max_document_size_mb,
            config.storage.max_image_size_mb,
        )
        .build()?;

    Ok(AppState::new(service_context, config))
}

fn create_session_store(config: &AppConfig) -> Result<Arc<dyn SessionStore>, AppError> {
    let ttl = Duration::minutes(config.session.ttl_minutes);

    match config.session.backend {
        SessionBackend::Memory => {
            info!(ttl_minutes = config.session.ttl_minutes, "Using in-memory sessions");
            Ok(Arc::new(InMemorySessionStore::new(ttl)))
        }
        SessionBackend::Redis => {
            let redis = config.redis.as_ref().ok_or_else(|| {
                AppError::Validation("REDIS_URL is required for redis sessions".to_string())
            })?;
            let pool = RedisPool::from_config(redis).map_err(|e| AppError::Cache(e.to_string()))?;
            info!(ttl_minutes = config.session.ttl_minutes, "Using Redis sessions");
            Ok(Arc::new(RedisSessionStore::new(pool, ttl)))
        }
    }
}

/// Periodically evict expired sessions for as long as the runtime lives
pub fn spawn_session_sweeper(
    sessions: Arc<dyn SessionStore>,
    every: std::time::Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticks = interval(every);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticks.tick().await;
        loop {
            ticks.tick().await;
            match sessions.purge_expired().await {
                Ok(0) => {}
                Ok(evicted) => debug!(evicted, "Expired sessions purged"),
                Err(e) => warn!(error = %e, "Session sweep failed"),
            }
        }
    })
}

/// Run the HTTP server until Ctrl-C / SIGTERM
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(anyhow::anyhow!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();
    let state = create_app_state(config).await?;
    let app = create_app(state);
    run_server(app, &addr).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}
