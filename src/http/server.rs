//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router for the storefront pipeline
//! - Wire up middleware (request ID, tracing, API forwarding)
//! - Serve static assets for requests the forwarder passes through
//! - Bind the server to a listener and drain it on shutdown

use std::net::SocketAddr;

use axum::{body::Body, middleware, Router};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::forward::forward_api;
use crate::http::request::UuidRequestId;

/// State shared by the forwarding middleware across all requests.
#[derive(Clone)]
pub struct AppState {
    /// Shared upstream HTTP client (connection pooling lives here).
    pub client: Client<HttpConnector, Body>,

    /// Upstream origin, resolved once at startup, no trailing slash.
    pub upstream: String,
}

/// HTTP server for the frontend gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a server whose pass-through stage serves the configured
    /// static asset directory.
    pub fn new(config: GatewayConfig) -> Self {
        let assets = Router::new().fallback_service(ServeDir::new(&config.assets.dir));
        Self::with_pipeline(config, assets)
    }

    /// Create a server with a caller-supplied pass-through pipeline.
    ///
    /// The forwarding middleware wraps `pipeline`; requests without the API
    /// marker are delegated to it unchanged.
    pub fn with_pipeline(config: GatewayConfig, pipeline: Router) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        let state = AppState {
            client,
            upstream: config.upstream.origin().to_string(),
        };

        let router = Self::build_router(pipeline, state);
        Self { router, config }
    }

    /// Layer the pipeline with request ID, tracing, and forwarding.
    fn build_router(pipeline: Router, state: AppState) -> Router {
        pipeline.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(middleware::from_fn_with_state(state, forward_api)),
        )
    }

    /// Run the server, accepting connections until the shutdown signal.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.origin(),
            "Gateway listening"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("Gateway stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}
