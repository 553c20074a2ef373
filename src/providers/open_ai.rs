use crate::config::ProviderConfig;
use crate::error::ExtractionError;
use crate::model::ExtractionRequest;
use crate::providers::{
    build_request_message, check_status, resolve_api_key, LlmProvider, PRODUCT_EXTRACTION_PROMPT,
};
use crate::schema::{product_schema, Dialect};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider from configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, ExtractionError> {
        // Try config first, then fall back to environment variable
        let api_key = resolve_api_key(config.api_key.as_ref(), &["OPENAI_API_KEY"])?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "https://api.openai.com".to_string());

        Ok(OpenAIProvider {
            client: Client::new(),
            api_key,
            base_url,
            model: config.model_or_default("openai"),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        OpenAIProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.0,
            max_tokens: 4096,
        }
    }

    fn request_body(&self, request: &ExtractionRequest) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": PRODUCT_EXTRACTION_PROMPT},
                {"role": "user", "content": build_request_message(request)}
            ],
            "max_tokens": self.max_tokens,
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "product_record",
                    "strict": true,
                    "schema": product_schema(Dialect::JsonSchema)
                }
            }
        });

        // Search-enabled models reject sampling parameters
        if request.live_retrieval {
            body["web_search_options"] = json!({});
        } else {
            body["temperature"] = json!(self.temperature);
        }

        body
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn extract(
        &self,
        request: &ExtractionRequest,
    ) -> Result<Option<String>, ExtractionError> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&self.request_body(request))
            .send()
            .await?;

        let response_body = check_status(self.provider_name(), response).await?;
        debug!("{:?}", response_body);

        let message = &response_body["choices"][0]["message"];
        if let Some(refusal) = message["refusal"].as_str() {
            return Err(ExtractionError::TransportOrModelFailure(format!(
                "Model refused: {}",
                refusal
            )));
        }

        Ok(message["content"]
            .as_str()
            .filter(|content| !content.trim().is_empty())
            .map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn test_request() -> ExtractionRequest {
        ExtractionRequest::new("https://example.com/item/blue-widget-i.123", true).unwrap()
    }

    #[tokio::test]
    async fn test_extract() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer fake_api_key")
            .match_body(Matcher::PartialJson(json!({
                "response_format": {
                    "type": "json_schema",
                    "json_schema": {"name": "product_record", "strict": true}
                },
                "web_search_options": {}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "choices": [{
                        "message": {
                            "content": "{\"name\": \"Blue Widget\"}"
                        }
                    }]
                }"#,
            )
            .create_async()
            .await;

        let provider = OpenAIProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gpt-4o-mini-search-preview".to_string(),
        );

        let result = provider.extract(&test_request()).await.unwrap();
        assert_eq!(result.as_deref(), Some(r#"{"name": "Blue Widget"}"#));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_extract_api_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "Invalid request"}"#)
            .create_async()
            .await;

        let provider = OpenAIProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gpt-4o-mini".to_string(),
        );

        let result = provider.extract(&test_request()).await;
        assert!(matches!(
            result,
            Err(ExtractionError::TransportOrModelFailure(m)) if m.contains("Invalid request")
        ));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_extract_refusal() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices": [{"message": {"content": null, "refusal": "I can't help with that."}}]}"#,
            )
            .create_async()
            .await;

        let provider = OpenAIProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gpt-4o-mini".to_string(),
        );

        let result = provider.extract(&test_request()).await;
        assert!(matches!(
            result,
            Err(ExtractionError::TransportOrModelFailure(m)) if m.contains("can't help")
        ));
    }

    #[test]
    fn test_offline_request_sets_temperature() {
        let provider = OpenAIProvider::with_base_url(
            "fake_api_key".to_string(),
            "http://localhost".to_string(),
            "gpt-4o-mini".to_string(),
        );
        let request = ExtractionRequest::new("https://example.com/p/lamp", false).unwrap();
        let body = provider.request_body(&request);

        assert!(body.get("web_search_options").is_none());
        assert!(body["temperature"].is_number());
        assert_eq!(
            body["response_format"]["json_schema"]["schema"]["additionalProperties"],
            json!(false)
        );
    }

    #[test]
    fn test_missing_key_is_missing_credential() {
        if std::env::var("OPENAI_API_KEY").is_ok() {
            return;
        }
        let config = ProviderConfig::for_provider("openai");
        assert!(matches!(
            OpenAIProvider::new(&config),
            Err(ExtractionError::MissingCredential(_))
        ));
    }
}
