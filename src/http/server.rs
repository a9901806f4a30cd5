//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router sending every request to the dispatcher
//! - Wire up middleware (request ID, tracing, timeout)
//! - Build the request-scoped context (method, headers, form, language)
//! - Map dispatch errors to HTTP status codes
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    response::IntoResponse,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use url::form_urlencoded;

use crate::config::{AppConfig, Environment};
use crate::controller::{AppServices, RequestContext};
use crate::dispatch::{DispatchError, Dispatcher};
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};
use crate::http::session;
use crate::observability::metrics;
use crate::routing::Params;

/// Largest form body read into the request context.
const MAX_FORM_BYTES: usize = 1024 * 1024;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub services: Arc<AppServices>,
}

/// HTTP front end for the dispatcher.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and dispatcher.
    pub fn new(config: AppConfig, dispatcher: Dispatcher) -> Self {
        let state = AppState {
            dispatcher: Arc::new(dispatcher),
            services: Arc::new(AppServices::from_config(&config)),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.server.request_timeout_secs,
                    )))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            environment = ?self.config.app.environment,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Hands every request to the dispatcher.
async fn dispatch_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> axum::response::Response {
    let start_time = Instant::now();
    let (parts, body) = request.into_parts();

    let raw_url = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_default();
    let request_id = parts
        .headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let form = if is_form(&parts.headers) {
        match axum::body::to_bytes(body, MAX_FORM_BYTES).await {
            Ok(bytes) => form_urlencoded::parse(&bytes).into_owned().collect(),
            Err(e) => {
                tracing::warn!(request_id = %request_id, error = %e, "Unreadable form body");
                return (StatusCode::BAD_REQUEST, "Unreadable request body").into_response();
            }
        }
    } else {
        Params::new()
    };

    tracing::debug!(
        request_id = %request_id,
        method = %parts.method,
        url = %raw_url,
        "Dispatching request"
    );

    let language = session::language_from_headers(&parts.headers);
    let mut ctx = RequestContext::begin(
        parts.method,
        parts.headers,
        form,
        language,
        state.services.clone(),
    );

    let result = state.dispatcher.dispatch(&raw_url, &mut ctx);
    let persisted_language = ctx.finish();

    let mut response = match result {
        Ok(response) => {
            metrics::record_dispatch("ok", start_time);
            response.into_response()
        }
        Err(e) => {
            metrics::record_dispatch(e.outcome(), start_time);
            error_response(&request_id, &e, state.services.environment)
        }
    };

    if let Some(value) = persisted_language.as_deref().and_then(session::language_cookie) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

/// Development answers with the error detail, production with the reason
/// phrase only.
fn error_response(
    request_id: &str,
    error: &DispatchError,
    environment: Environment,
) -> axum::response::Response {
    let status = error.status_code();
    if status.is_server_error() {
        tracing::error!(request_id = %request_id, outcome = error.outcome(), error = %error, "Dispatch failed");
    } else {
        tracing::warn!(request_id = %request_id, outcome = error.outcome(), error = %error, "Dispatch failed");
    }

    let body = match environment {
        Environment::Development => error.to_string(),
        Environment::Production => status
            .canonical_reason()
            .unwrap_or("Error")
            .to_string(),
    };
    (status, body).into_response()
}
