//! HTTP surface: one generation endpoint with permissive CORS

use std::sync::Arc;
use axum::{
  extract::{rejection::JsonRejection, State},
  http::{header::HeaderName, Method, StatusCode},
  response::{IntoResponse, Response},
  routing::{get, post},
  Json, Router,
};
use log::{error, info, warn};
use tower_http::cors::{Any, CorsLayer};

use crate::client::Dispatcher;
use crate::config::ServerConfig;
use crate::error::Error;
use crate::request::{ErrorResponse, GenerateRequest, GenerateResponse};

pub const ALLOWED_HEADERS: [&str; 4]
  = ["authorization", "x-client-info", "apikey", "content-type"];

pub const GENERATION_FAILED: &str = "Failed to generate AI response";
pub const INVALID_REQUEST: &str = "Invalid request";

impl IntoResponse for Error
{   fn into_response(self) -> Response
    {   let (status, error) = match &self
        {   Error::InvalidRequest(_) => {
              (StatusCode::BAD_REQUEST, INVALID_REQUEST)
            }
          , _ => (StatusCode::INTERNAL_SERVER_ERROR, GENERATION_FAILED)
        };
        let body = ErrorResponse
        {   error: error.to_string()
          , details: self.to_string()
        };
        (status, Json(body)).into_response()
    }
}

/// Any origin, the four client headers, empty pre-flight body
pub fn cors_layer() -> CorsLayer
{   CorsLayer::new()
      .allow_origin(Any)
      .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
      .allow_headers(ALLOWED_HEADERS.map(HeaderName::from_static))
}

pub fn build_router(dispatcher: Arc<Dispatcher>) -> Router
{   Router::new()
      .route("/", post(handle_generate))
      .route("/ai-assistant", post(handle_generate))
      .route("/health", get(health))
      .layer(cors_layer())
      .with_state(dispatcher)
}

async fn health() -> &'static str
{   "OK"
}

async fn handle_generate(
  State(dispatcher): State<Arc<Dispatcher>>
, body: Result<Json<GenerateRequest>, JsonRejection>
) -> Result<Json<GenerateResponse>, Error>
{   let Json(request) = body.map_err(|rejection| {
      warn!("Rejected request body: {}", rejection.body_text());
      Error::InvalidRequest(rejection.body_text())
    })?;

    dispatcher.dispatch(&request).await
      .map(Json)
      .map_err(|e| {
        error!("Request failed: {}", e);
        e
      })
}

/// Bind and serve until Ctrl-C
pub async fn serve(
  config: &ServerConfig
, dispatcher: Arc<Dispatcher>
) -> Result<(), Error>
{   let listener = tokio::net::TcpListener::bind(&config.bind)
      .await
      .map_err(|e| {
        Error::InvalidConfiguration(
          format!("cannot bind {}: {}", config.bind, e)
        )
      })?;
    info!("Listening on {}", config.bind);

    axum::serve(listener, build_router(dispatcher))
      .with_graceful_shutdown(shutdown_signal())
      .await
      .map_err(|e| Error::Other(format!("server error: {}", e)))
}

async fn shutdown_signal()
{   if let Err(e) = tokio::signal::ctrl_c().await
    {   error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
