//! OpenAI Responses API implementation of [`GenerativeBackend`].

pub mod llm_client;

use std::sync::Arc;

use config_rs::BackendConfig;
use drafting_rs::GenerativeBackend;

pub use llm_client::{OpenAiClient, OPENAI_MODE};

/// Backend for the drafting pipeline, or `None` for template-only mode.
///
/// A missing key is the normal template setup and is logged at info; any
/// other construction failure is logged as a warning and also yields `None`.
pub fn backend_from_config(config: &BackendConfig) -> Option<Arc<dyn GenerativeBackend>> {
    if !config.is_enabled() {
        log::info!("OPENAI_API_KEY not set, drafts will use templates only");
        return None;
    }

    match OpenAiClient::from_config(config) {
        Ok(client) => Some(Arc::new(client)),
        Err(err) => {
            log::warn!("Generative backend unavailable, using templates: {}", err);
            None
        }
    }
}
