use crate::config::ProviderConfig;
use crate::error::ExtractionError;
use crate::model::ExtractionRequest;
use crate::providers::{
    build_request_message, check_status, resolve_api_key, LlmProvider, PRODUCT_EXTRACTION_PROMPT,
};
use crate::schema::{product_schema, Dialect};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde_json::{json, Value};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub struct GoogleProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GoogleProvider {
    /// Create a new Google Gemini provider from configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, ExtractionError> {
        // Try config first, then fall back to environment variables
        let api_key = resolve_api_key(config.api_key.as_ref(), &["GEMINI_API_KEY", "GOOGLE_API_KEY"])?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(GoogleProvider {
            client: Client::new(),
            api_key,
            base_url,
            model: config.model_or_default("google"),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        GoogleProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.0,
            max_tokens: 4096,
        }
    }

    fn request_body(&self, request: &ExtractionRequest) -> Value {
        let mut generation_config = json!({
            "temperature": self.temperature,
            "maxOutputTokens": self.max_tokens,
        });
        let mut message = build_request_message(request);

        // Gemini refuses a JSON response mode alongside tools, so with URL
        // context the schema travels in the message and the reply is checked locally
        if request.live_retrieval {
            message.push_str(&format!(
                "\n\nJSON schema:\n{}",
                product_schema(Dialect::JsonSchema)
            ));
        } else {
            generation_config["responseMimeType"] = json!("application/json");
            generation_config["responseSchema"] = product_schema(Dialect::Gemini);
        }

        let mut body = json!({
            "systemInstruction": {
                "parts": [{ "text": PRODUCT_EXTRACTION_PROMPT }]
            },
            "contents": [{
                "role": "user",
                "parts": [{ "text": message }]
            }],
            "generationConfig": generation_config
        });

        if request.live_retrieval {
            body["tools"] = json!([{ "urlContext": {} }]);
        }

        body
    }
}

#[async_trait]
impl LlmProvider for GoogleProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    async fn extract(
        &self,
        request: &ExtractionRequest,
    ) -> Result<Option<String>, ExtractionError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body(request))
            .send()
            .await?;

        let response_body = check_status(self.provider_name(), response).await?;
        debug!("{:?}", response_body);

        if let Some(reason) = response_body["promptFeedback"]["blockReason"].as_str() {
            warn!("Gemini blocked the request: {}", reason);
            return Err(ExtractionError::TransportOrModelFailure(format!(
                "Request blocked by the model: {}",
                reason
            )));
        }

        // With URL context the answer may be split over several text parts
        let text: String = response_body["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part["text"].as_str())
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(text))
        }
    }
}
