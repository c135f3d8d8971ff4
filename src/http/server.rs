//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, limits, timeouts, request ID, metrics)
//! - Build the shared `ZoneService` and inject it into handlers
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::Request,
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::alerts::{self, Notifier};
use crate::config::ServiceConfig;
use crate::http::handlers;
use crate::http::page::load_index;
use crate::http::request::{MakeRequestUuidV4, X_REQUEST_ID};
use crate::observability::metrics;
use crate::zones::ZoneService;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub zones: Arc<ZoneService>,
    pub index_html: Arc<str>,
}

/// HTTP server for the zone tracker.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
    zones: Arc<ZoneService>,
}

impl HttpServer {
    /// Create a new HTTP server with the notifier described by the config.
    pub fn new(config: ServiceConfig) -> Self {
        let notifier = alerts::from_config(&config.alerts);
        Self::with_notifier(config, notifier)
    }

    /// Create a new HTTP server with an explicit notifier.
    pub fn with_notifier(config: ServiceConfig, notifier: Arc<dyn Notifier>) -> Self {
        let zones = Arc::new(ZoneService::new(
            config.levels,
            notifier,
            config.alerts.zones.clone(),
        ));

        let state = AppState {
            zones: zones.clone(),
            index_html: load_index(&config.assets),
        };

        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            zones,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/", get(handlers::index))
            .route("/health", get(handlers::health))
            .route(
                "/api/levels",
                get(handlers::get_levels).post(handlers::set_levels),
            )
            .route(
                "/api/state",
                get(handlers::get_state).post(handlers::update_state),
            )
            .route("/api/reset", post(handlers::reset_state))
            .route("/api/measure", post(handlers::measure));

        if let Some(dir) = &config.assets.static_dir {
            if dir.is_dir() {
                router = router.nest_service("/static", ServeDir::new(dir));
            } else {
                tracing::warn!(path = %dir.display(), "Static directory not found, /static disabled");
            }
        }

        // Request ID is set before the trace span opens.
        let request_tracing = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get(X_REQUEST_ID)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown");
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id
                    )
                }),
            );

        router
            .with_state(state)
            .layer(middleware::from_fn(metrics::track_requests))
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(request_tracing)
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Shared zone service backing the handlers.
    pub fn zones(&self) -> Arc<ZoneService> {
        self.zones.clone()
    }
}
