//! Middleware stack for the API server
//!
//! Provides logging, request ID generation, CORS, rate limiting, body limits
//! and request timeouts.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, Request, StatusCode},
    Router,
};
use society_common::{CorsConfig, RateLimitConfig, StorageConfig};
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor, GovernorLayer,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level};

use crate::state::AppState;

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MIB: usize = 1024 * 1024;

/// Request timeout; slow requests get 503
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Photos accepted in one gallery upload before the body limit kicks in
const PHOTOS_PER_UPLOAD: usize = 10;

/// Largest request body accepted
///
/// Leaves room above the per-file limits so oversized files reach the upload
/// policy and get a descriptive validation error instead of a bare 413.
pub fn upload_body_limit(storage: &StorageConfig) -> usize {
    let document = usize::try_from(storage.max_document_size_mb).unwrap_or(usize::MAX / MIB) * 2;
    let photos = usize::try_from(storage.max_image_size_mb).unwrap_or(usize::MAX / MIB)
        * PHOTOS_PER_UPLOAD;
    document.max(photos).saturating_add(1).saturating_mul(MIB)
}

/// Apply the middleware stack
///
/// Request order: rate limit, request id, trace, timeout, CORS, body limit, handler.
pub fn apply_middleware_with_config(
    router: Router<AppState>,
    rate_limit_config: &RateLimitConfig,
    cors_config: &CorsConfig,
    storage_config: &StorageConfig,
    is_production: bool,
) -> Router<AppState> {
    let router = router
        .layer(DefaultBodyLimit::max(upload_body_limit(storage_config)))
        .layer(create_cors_layer_from_config(cors_config, is_production))
        .layer(
            ServiceBuilder::new()
                // Request ID
                .layer(SetRequestIdLayer::new(
                    header::HeaderName::from_static(REQUEST_ID_HEADER),
                    MakeRequestUuid,
                ))
                .layer(PropagateRequestIdLayer::new(header::HeaderName::from_static(
                    REQUEST_ID_HEADER,
                )))
                // Tracing
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(|request: &Request<Body>| {
                            let request_id = request
                                .headers()
                                .get(REQUEST_ID_HEADER)
                                .and_then(|v| v.to_str().ok())
                                .unwrap_or("unknown");

                            tracing::info_span!(
                                "http_request",
                                method = %request.method(),
                                uri = %request.uri(),
                                request_id = %request_id,
                            )
                        })
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                // Timeout (returns 503 Service Unavailable on timeout)
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::SERVICE_UNAVAILABLE,
                    REQUEST_TIMEOUT,
                )),
        );

    apply_rate_limit(router, rate_limit_config)
}

/// Global rate limit (not per client), outermost layer
fn apply_rate_limit(router: Router<AppState>, config: &RateLimitConfig) -> Router<AppState> {
    if !config.enabled {
        info!("Rate limiting disabled");
        return router;
    }

    let governor_conf = GovernorConfigBuilder::default()
        .per_second(config.requests_per_second.into())
        .burst_size(config.burst)
        .key_extractor(GlobalKeyExtractor)
        .finish();

    match governor_conf {
        Some(conf) => router.layer(GovernorLayer {
            config: Arc::new(conf),
        }),
        None => {
            warn!(
                requests_per_second = config.requests_per_second,
                burst = config.burst,
                "Invalid rate limit settings, rate limiting disabled"
            );
            router
        }
    }
}

/// Create CORS layer from configuration
///
/// Credentials (the session cookie) are only allowed for listed origins.
fn create_cors_layer_from_config(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let base_layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([
            header::HeaderName::from_static(REQUEST_ID_HEADER),
            header::CONTENT_DISPOSITION,
        ]);

    if !config.allowed_origins.is_empty() {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| {
                origin.parse::<HeaderValue>().ok().or_else(|| {
                    warn!("Invalid CORS origin: {}", origin);
                    None
                })
            })
            .collect();

        info!("CORS: Allowing {} configured origins", origins.len());
        base_layer
            .allow_origin(AllowOrigin::list(origins))
            .allow_credentials(true)
    } else if is_production {
        warn!(
            "CORS: No allowed origins configured in production mode. \
             Requests from browsers will be blocked."
        );
        base_layer.allow_origin(AllowOrigin::list(Vec::<HeaderValue>::new()))
    } else {
        warn!(
            "CORS: Allowing any origin without credentials (development mode). \
             Configure CORS_ALLOWED_ORIGINS for cookie-based admin access."
        );
        base_layer.allow_origin(Any)
    }
}
