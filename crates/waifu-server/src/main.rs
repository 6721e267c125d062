use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    body::Body,
    http::{header, Method, Request},
    middleware,
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use waifu::{LlmProvider, MessagePool, Publisher};
use waifu_integration_twitter::{TwitterConfig, TwitterPublisher};

mod adapters;
mod config;
mod error;
mod models;
mod rate_limit;
mod routes;
mod services;
#[cfg(test)]
mod test_support;

use adapters::OpenAiProvider;
use config::ServerConfig;
use error::ApiError;
use rate_limit::IpRateLimiter;
use services::{memory, poster};

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn LlmProvider>,
}

/// Assemble routes and middleware.
///
/// Layer order, outermost first: trace, panic boundary, CORS, rate limit.
pub fn build_router(
    state: AppState,
    config: &ServerConfig,
    limiter: Arc<IpRateLimiter>,
) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(config.allowed_origin.clone())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let trace = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %uuid::Uuid::new_v4(),
            )
        })
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", routes::swagger::ApiDoc::openapi()),
        )
        .merge(routes::health::router())
        .merge(routes::chat::router())
        .layer(middleware::from_fn_with_state(
            limiter,
            rate_limit::rate_limit_middleware,
        ))
        .layer(cors)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(trace)
        .with_state(state)
}

/// Publish integration; the poster stays off without full credentials
fn build_publisher(twitter: Option<TwitterConfig>) -> Option<Arc<dyn Publisher>> {
    let Some(twitter) = twitter else {
        tracing::error!("❌ Twitter credentials incomplete - scheduled poster disabled");
        return None;
    };

    match TwitterPublisher::new(twitter) {
        Ok(p) => {
            tracing::info!("🐦 Twitter publisher initialized");
            Some(Arc::new(p))
        }
        Err(e) => {
            tracing::error!(error = %e, "❌ Failed to initialize Twitter publisher");
            None
        }
    }
}

/// A panicking handler fails only its own request
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "💥 Request handler panicked");
    ApiError::Upstream.into_response()
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();
}

/// Route every panic, in any task, through the logger
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        tracing::error!(panic = %info, "💥 Panic");
    }));
}

/// Graceful shutdown signal handler for SIGTERM and Ctrl+C
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("🛑 Shutdown signal received, draining connections...");
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    install_panic_hook();

    tracing::info!("💬 Waifu Chat relay initializing...");

    let config = ServerConfig::from_env()
        .inspect_err(|e| tracing::error!(error = %e, "❌ Invalid configuration"))
        .context("failed to load configuration")?;

    tracing::info!(
        model = %config.openai_model,
        port = config.port,
        allowed_origin = ?config.allowed_origin,
        rate_limit_max = config.rate_limit.max_requests.get(),
        rate_limit_window = ?config.rate_limit.window,
        "⚙️  Configuration loaded"
    );

    // Completion provider
    let llm = OpenAiProvider::new(config.openai_api_key.clone(), config.openai_model.clone())?
        .with_base_url(config.openai_base_url.clone());
    let state = AppState { llm: Arc::new(llm) };

    let publisher = build_publisher(config.twitter.clone());
    let poster = poster::maybe_start_poster(publisher, MessagePool::default(), config.post_interval);
    let memory_monitor = memory::spawn_memory_monitor(config.memory_log_interval);

    let limiter = Arc::new(IpRateLimiter::new(&config.rate_limit));
    let housekeeping = limiter.clone().spawn_housekeeping(config.rate_limit.window);

    let router = build_router(state, &config, limiter);

    let listener = TcpListener::bind(config.addr())
        .await
        .with_context(|| format!("failed to bind {}", config.addr()))?;

    tracing::info!(addr = %config.addr(), "📚 Swagger UI: /swagger-ui");
    tracing::info!(addr = %config.addr(), "✅ Waifu Chat relay listening");

    let served = axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await;

    if let Some(poster) = poster {
        poster.stop().await;
    }
    memory_monitor.abort();
    housekeeping.abort();

    served.context("HTTP server failed")?;

    tracing::info!("👋 Shutdown complete");
    Ok(())
}
