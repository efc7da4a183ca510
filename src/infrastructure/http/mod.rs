//! Inbound HTTP surface: health check, config view and webhook target

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::application::errors::BotError;
use crate::application::messaging::CommandDispatcher;
use crate::infrastructure::config::ConfigSummary;

/// Body of the health check
pub const ALIVE: &str = "I'm Alive";

/// Shared state for the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<CommandDispatcher>,
    pub config: Arc<ConfigSummary>,
}

impl AppState {
    pub fn new(dispatcher: Arc<CommandDispatcher>, config: ConfigSummary) -> Self {
        Self {
            dispatcher,
            config: Arc::new(config),
        }
    }
}

#[derive(Debug, Serialize)]
struct ReplyBody {
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/config", get(config))
        .route("/", post(incoming))
        .layer(cors())
        .with_state(state)
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("key"),
        ])
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
}

/// Bind and serve until Ctrl-C
pub async fn serve(addr: &str, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

async fn health() -> &'static str {
    ALIVE
}

async fn config(State(state): State<AppState>) -> Json<ConfigSummary> {
    Json(state.config.as_ref().clone())
}

async fn incoming(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ReplyBody>, BotError> {
    tracing::debug!("Webhook content: {}", String::from_utf8_lossy(&body));
    let message = state.dispatcher.handle_payload(&body).await?;
    Ok(Json(ReplyBody { message }))
}

impl BotError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BotError::MalformedNotification(_) => StatusCode::BAD_REQUEST,
            BotError::UnknownCommand(_) => StatusCode::NOT_FOUND,
            BotError::UpstreamUnavailable(_) | BotError::ReplyNotDelivered { .. } => {
                StatusCode::BAD_GATEWAY
            }
            BotError::Config(_) | BotError::Command(_) | BotError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for BotError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        let body = ErrorBody {
            error: self.to_string(),
            message: match self {
                BotError::ReplyNotDelivered { reply, .. } => Some(reply),
                _ => None,
            },
        };
        (status, Json(body)).into_response()
    }
}
