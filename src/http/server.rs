//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the geo routing middleware wired in
//! - Configure middleware stack (tracing, timeout, request ID)
//! - Bind server to listener and serve until shutdown
//!
//! # Design Decisions
//! - The geo layer wraps a small built-in application handler; embedders use
//!   `geo_routing_middleware` directly on their own routers
//! - Client peer addresses are recorded via ConnectInfo so IP selection can
//!   fall back to the socket address
//! - Configuration errors fail construction, never a request

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::loader::ConfigError;
use crate::config::schema::RouterConfig;
use crate::config::validation::validate_config;
use crate::geo::resolver::{CountryResolver, ResolvedCountry, UNKNOWN_COUNTRY};
use crate::http::middleware::geo_routing::{
    geo_routing_middleware, GeoRoutingState, X_GEOIP_COUNTRY,
};
use crate::http::request::{UuidRequestId, X_REQUEST_ID};
use crate::lifecycle::signals::shutdown_signal;

/// HTTP server hosting the geo routing layer.
pub struct HttpServer {
    router: Router,
    config: RouterConfig,
}

impl HttpServer {
    /// Create a new HTTP server from a configuration and an injected country
    /// resolver. Fails fast on configuration errors.
    pub fn new(
        config: RouterConfig,
        resolver: Arc<dyn CountryResolver>,
    ) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;

        let state = GeoRoutingState::new(&config, resolver)
            .map_err(|_| ConfigError::Validation(vec![
                crate::config::validation::ValidationError::MissingFallbackDomain,
            ]))?;

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RouterConfig, state: GeoRoutingState) -> Router {
        Router::new()
            .route("/", any(app_handler))
            .route("/{*path}", any(app_handler))
            .layer(axum::middleware::from_fn_with_state(
                state,
                geo_routing_middleware,
            ))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(GlobalConcurrencyLimitLayer::new(
                config.listener.max_connections,
            ))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            domains = self.config.domains.len(),
            allow_ip_override = self.config.allow_ip_override,
            max_in_flight = self.config.listener.max_connections,
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Built-in application handler behind the geo layer.
///
/// Answers 200 and echoes the resolved country and request ID so the gateway
/// is observable end to end without a backing application.
async fn app_handler(req: Request<Body>) -> Response {
    let country = req
        .extensions()
        .get::<ResolvedCountry>()
        .map(|c| c.0.clone())
        .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string());
    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    let body = format!(
        "geo-router: {} {} served for {}\n",
        req.method(),
        req.uri().path(),
        country
    );

    let mut response = (StatusCode::OK, body).into_response();
    if let Ok(value) = HeaderValue::from_str(&country) {
        response.headers_mut().insert(X_GEOIP_COUNTRY.clone(), value);
    }

    tracing::debug!(
        request_id = %request_id,
        country = %country,
        path = %req.uri().path(),
        "Served by built-in handler"
    );
    response
}
