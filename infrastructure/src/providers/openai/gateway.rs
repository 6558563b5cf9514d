//! OpenAI-compatible gateway
//!
//! Creates [`OpenAiSession`]s that share one pooled HTTP client.

use super::session::OpenAiSession;
use async_trait::async_trait;
use council_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use council_domain::Model;
use std::time::Duration;
use tracing::info;

pub struct OpenAiGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl OpenAiGateway {
    /// `base_url` is the API root, e.g. `https://api.openai.com/v1`
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;
        let endpoint = chat_endpoint(base_url);
        info!("Using chat completions endpoint {}", endpoint);

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn chat_endpoint(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(OpenAiSession::new(
            self.client.clone(),
            self.endpoint.clone(),
            self.api_key.clone(),
            model.clone(),
            system_prompt,
        )))
    }
}
