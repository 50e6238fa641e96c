pub mod config;
pub mod error;

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::info;

use tts_core::{MinimaxClient, SynthesisRequest};

use crate::config::ServerConfig;
use crate::error::ApiError;

/// Characters of request text shown in log lines
const LOG_PREVIEW_CHARS: usize = 30;

#[derive(Clone)]
pub struct AppState {
    pub tts: Arc<MinimaxClient>,
}

impl AppState {
    pub fn new(tts: MinimaxClient) -> Self {
        Self { tts: Arc::new(tts) }
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self, tts_core::SynthesisError> {
        let tts = MinimaxClient::with_endpoint(
            config.api_key.clone(),
            config.api_url.clone(),
            config.tts_timeout(),
        )?;
        Ok(Self::new(tts))
    }
}

#[derive(Debug, Serialize)]
pub struct TtsResponse {
    pub success: bool,
    pub audio_base64: String,
    pub format: &'static str,
    pub extra_info: Value,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub tts_configured: bool,
}

/// Assemble the API routes, CORS, request ids, tracing and the static site
/// fallback into one router.
pub fn build_app(state: AppState, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(false);

    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .into_inner();

    let api = Router::new()
        .route("/health", get(health_check))
        .route("/tts", post(tts_endpoint));

    Router::new()
        .nest("/api", api)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(axum::middleware::from_fn(add_request_id))
        .layer(middleware_stack)
        .with_state(state)
}

/// Tag request and response with the same `x-request-id`
async fn add_request_id(mut request: Request, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    let header_value = HeaderValue::from_str(&request_id).ok();
    if let Some(value) = header_value.clone() {
        request.headers_mut().insert("x-request-id", value);
    }
    let mut response = next.run(request).await;
    if let Some(value) = header_value {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        tts_configured: state.tts.is_configured(),
    })
}

pub async fn tts_endpoint(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TtsResponse>, ApiError> {
    let req = parse_tts_request(&body)?;

    let audio = state.tts.synthesize(&req).await?;

    info!("TTS: {}", req.preview(LOG_PREVIEW_CHARS));
    if let Some(chars) = audio.usage("usage_characters") {
        // bound outside info!, whose expansion shadows serde_json::Value
        let missing = Value::Null;
        let audio_length = audio.usage("audio_length").unwrap_or(&missing);
        let audio_size = audio.usage("audio_size").unwrap_or(&missing);
        info!(
            "usage_characters={} audio_length={} audio_size={}",
            chars, audio_length, audio_size,
        );
    }

    Ok(Json(TtsResponse {
        success: true,
        audio_base64: audio.audio_base64(),
        format: audio.format,
        extra_info: audio.extra_info,
    }))
}

/// Decode the inbound body by hand so a bad body gets the same JSON error
/// shape as every other failure.
pub fn parse_tts_request(body: &[u8]) -> Result<SynthesisRequest, ApiError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))?;
    if !value.is_object() {
        return Err(ApiError::InvalidBody("expected a JSON object".to_string()));
    }
    serde_json::from_value(value).map_err(|e| ApiError::InvalidBody(e.to_string()))
}
