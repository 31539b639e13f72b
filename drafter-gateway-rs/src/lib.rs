//! HTTP front end for the drafting pipeline
//!
//! - `GET /` liveness probe
//! - `POST /generate` incident facts in, drafts and exports out

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::header::HeaderMap,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};

use config_rs::DrafterConfig;
use drafting_rs::{GenerationOrchestrator, GenerationResult, IncidentFacts};

pub mod validation;

use validation::{body_rejection, parse_generate_request, validate_content_type, GatewayError};
pub use validation::ErrorResponse;

pub struct DrafterGateway {
    orchestrator: GenerationOrchestrator,
    max_payload_bytes: usize,
}

impl DrafterGateway {
    pub fn new(orchestrator: GenerationOrchestrator, max_payload_bytes: usize) -> Self {
        Self {
            orchestrator,
            max_payload_bytes,
        }
    }

    /// Wires the backend (if any) and limits from process configuration.
    pub fn from_config(config: &DrafterConfig) -> Self {
        let backend = llm_backend_rs::backend_from_config(&config.backend);
        let orchestrator = GenerationOrchestrator::new(backend, config.backend.timeout);
        log::info!(
            "Drafting pipeline ready (backend_mode: {})",
            orchestrator.backend_mode()
        );
        Self::new(orchestrator, config.gateway.max_payload_bytes)
    }

    pub fn create_router(self: Arc<Self>) -> Router {
        let max_payload_bytes = self.max_payload_bytes;
        Router::new()
            .route("/", get(Self::root_handler))
            .route("/generate", post(Self::generate_handler))
            // Checked by the body extractor; over-limit bodies become a JSON 413
            .layer(DefaultBodyLimit::max(max_payload_bytes))
            .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
            .with_state(self)
    }

    async fn root_handler() -> impl IntoResponse {
        Json(serde_json::json!({ "status": "ok" }))
    }

    async fn generate_handler(
        State(state): State<Arc<Self>>,
        headers: HeaderMap,
        body: Result<Bytes, BytesRejection>,
    ) -> Result<Json<GenerationResult>, GatewayError> {
        validate_content_type(&headers)?;
        let body = body.map_err(body_rejection)?;
        let request = parse_generate_request(&body)?;

        log::debug!("Generate request received ({} bytes)", body.len());

        let result = state.orchestrator.generate(IncidentFacts::from(request)).await;
        Ok(Json(result))
    }
}
