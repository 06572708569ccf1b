//! Application startup and lifecycle management.

use axum::{
    middleware::from_fn,
    routing::{any, get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    request_id_middleware, security_headers_middleware, REQUEST_ID_HEADER,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ItineraryConfig;
use crate::handlers::{health::health_check, itinerary::generate_itinerary, metrics::metrics, pages};
use crate::middleware::http_metrics_middleware;
use crate::services::providers::GenerationProvider;
use crate::services::ItineraryPlanner;

/// Shared application state. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ItineraryConfig>,
    pub planner: ItineraryPlanner,
}

pub fn build_router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config.static_dir);
    let request_timeout = state.config.request_timeout;

    Router::new()
        .route("/", get(pages::index))
        .route("/plan", post(pages::plan))
        .route("/api/generate-itinerary", any(generate_itinerary))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .nest_service("/static", static_dir)
        .route_layer(from_fn(http_metrics_middleware))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(from_fn(security_headers_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the provider selected by configuration.
    pub async fn build(config: ItineraryConfig) -> Result<Self, AppError> {
        let provider = config.build_provider();
        Self::build_with_provider(config, provider).await
    }

    /// Build the application around an explicit provider (port 0 = random port for testing).
    pub async fn build_with_provider(
        config: ItineraryConfig,
        provider: Arc<dyn GenerationProvider>,
    ) -> Result<Self, AppError> {
        tracing::info!(
            strategy = %config.strategy,
            provider = provider.name(),
            "Initialized generation provider"
        );

        let address = config.common.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        let state = AppState {
            config: Arc::new(config),
            planner: ItineraryPlanner::new(provider),
        };

        tracing::info!("Itinerary service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }

    /// Serve until `signal` resolves, letting in-flight requests finish.
    pub async fn run_until<F>(self, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await
    }
}
