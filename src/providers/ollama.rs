use crate::config::ProviderConfig;
use crate::error::ExtractionError;
use crate::model::ExtractionRequest;
use crate::providers::{build_request_message, check_status, LlmProvider, PRODUCT_EXTRACTION_PROMPT};
use crate::schema::{product_schema, Dialect};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde_json::json;

/// Local models through Ollama's native chat endpoint.
///
/// Ollama has no browsing tool, so live retrieval requests always end up on the
/// synthesis path of the prompt.
pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OllamaProvider {
    /// Create a new Ollama provider from configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, ExtractionError> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "http://localhost:11434".to_string());

        Ok(OllamaProvider {
            client: Client::new(),
            base_url,
            model: config.model_or_default("ollama"),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String, model: String) -> Self {
        OllamaProvider {
            client: Client::new(),
            base_url,
            model,
            temperature: 0.0,
            max_tokens: 4096,
        }
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    async fn extract(
        &self,
        request: &ExtractionRequest,
    ) -> Result<Option<String>, ExtractionError> {
        if request.live_retrieval {
            info!("Ollama cannot browse; {} will be synthesized", request.source_url);
        }

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&json!({
                "model": self.model,
                "stream": false,
                "format": product_schema(Dialect::JsonSchema),
                "messages": [
                    {"role": "system", "content": PRODUCT_EXTRACTION_PROMPT},
                    {"role": "user", "content": build_request_message(request)}
                ],
                "options": {
                    "temperature": self.temperature,
                    "num_predict": self.max_tokens
                }
            }))
            .send()
            .await?;

        let response_body = check_status(self.provider_name(), response).await?;
        debug!("Ollama response: {:?}", response_body);

        Ok(response_body["message"]["content"]
            .as_str()
            .filter(|content| !content.trim().is_empty())
            .map(str::to_string))
    }
}
