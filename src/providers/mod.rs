mod factory;
mod google;
mod ollama;
mod open_ai;
mod prompt;

pub use factory::ProviderFactory;
pub use google::GoogleProvider;
pub use ollama::OllamaProvider;
pub use open_ai::OpenAIProvider;
pub use prompt::{build_extraction_prompt, build_request_message, PRODUCT_EXTRACTION_PROMPT};

use async_trait::async_trait;

use crate::error::ExtractionError;
use crate::model::ExtractionRequest;

/// Unified trait for all LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "google", "openai")
    fn provider_name(&self) -> &str;

    /// Issue one schema-constrained extraction call.
    ///
    /// Returns the raw text payload, or `None` when the model produced no text.
    async fn extract(
        &self,
        request: &ExtractionRequest,
    ) -> Result<Option<String>, ExtractionError>;
}

/// Read a provider's API key from config, then from the given environment variables.
pub(crate) fn resolve_api_key(
    configured: Option<&String>,
    env_vars: &[&str],
) -> Result<String, ExtractionError> {
    configured
        .filter(|key| !key.trim().is_empty())
        .cloned()
        .or_else(|| {
            env_vars
                .iter()
                .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
        })
        .ok_or_else(|| {
            ExtractionError::MissingCredential(format!(
                "{} not found in config or environment",
                env_vars.join(" / ")
            ))
        })
}

/// Turn a non-success HTTP response into a model failure carrying the API's message.
pub(crate) async fn check_status(
    provider_name: &str,
    response: reqwest::Response,
) -> Result<serde_json::Value, ExtractionError> {
    let status = response.status();
    let body = response.json::<serde_json::Value>().await;

    if !status.is_success() {
        let body = body.unwrap_or(serde_json::Value::Null);
        let message = body["error"]["message"]
            .as_str()
            .or_else(|| body["error"].as_str())
            .unwrap_or("unknown error");
        return Err(ExtractionError::TransportOrModelFailure(format!(
            "{} API error ({}): {}",
            provider_name, status, message
        )));
    }

    Ok(body?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_api_key_prefers_config() {
        let key = Some("from-config".to_string());
        let resolved = resolve_api_key(key.as_ref(), &["PRODUCT_IMPORT_TEST_UNSET_KEY"]).unwrap();
        assert_eq!(resolved, "from-config");
    }

    #[test]
    fn test_resolve_api_key_missing_is_missing_credential() {
        let blank = Some("   ".to_string());
        let result = resolve_api_key(blank.as_ref(), &["PRODUCT_IMPORT_TEST_UNSET_KEY"]);
        match result {
            Err(ExtractionError::MissingCredential(detail)) => {
                assert!(detail.contains("PRODUCT_IMPORT_TEST_UNSET_KEY"));
            }
            other => panic!("Expected MissingCredential, got {:?}", other),
        }
    }
}
