use log::{debug, info, warn};

use crate::config::AiConfig;
use crate::error::ExtractionError;
use crate::model::{ExtractionRequest, ProductRecord};
use crate::providers::{LlmProvider, ProviderFactory};

/// Issues extraction calls and coerces the answer into a [`ProductRecord`].
///
/// Every call re-issues a full request: nothing is cached, retried or timed out
/// here.
pub struct Extractor {
    provider: Box<dyn LlmProvider>,
    live_retrieval: bool,
}

impl Extractor {
    pub fn new(provider: Box<dyn LlmProvider>, live_retrieval: bool) -> Self {
        Self {
            provider,
            live_retrieval,
        }
    }

    /// Build the extractor for the configured default provider.
    ///
    /// Fails with [`ExtractionError::MissingCredential`] when that provider
    /// needs an API key and none is configured.
    pub fn from_config(config: &AiConfig) -> Result<Self, ExtractionError> {
        let provider = ProviderFactory::get_default_provider(config)?;
        info!("Using provider '{}'", provider.provider_name());
        Ok(Self::new(provider, config.live_retrieval))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Extract a product record for `url`.
    ///
    /// A blank URL is rejected with [`ExtractionError::EmptyUrl`] before any
    /// external call.
    pub async fn extract(&self, url: &str) -> Result<ProductRecord, ExtractionError> {
        let request = ExtractionRequest::new(url, self.live_retrieval)?;
        debug!(
            "Extracting {} (slug '{}', seed {}) with {}",
            request.source_url,
            request.slug,
            request.placeholder_seed,
            self.provider.provider_name()
        );

        let payload = self
            .provider
            .extract(&request)
            .await?
            .ok_or(ExtractionError::EmptyResponse)?;

        match ProductRecord::from_payload(&payload) {
            Ok(record) => {
                info!(
                    "Extracted '{}' ({} images, {} reviews)",
                    record.name,
                    record.images.len(),
                    record.reviews.len()
                );
                Ok(record)
            }
            Err(e) => {
                warn!("Rejected payload for {}: {}", request.source_url, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CannedProvider {
        reply: Result<Option<String>, String>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl LlmProvider for CannedProvider {
        fn provider_name(&self) -> &str {
            "canned"
        }

        async fn extract(
            &self,
            _request: &ExtractionRequest,
        ) -> Result<Option<String>, ExtractionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply
                .clone()
                .map_err(ExtractionError::TransportOrModelFailure)
        }
    }

    fn extractor(reply: Result<Option<String>, String>) -> (Extractor, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = CannedProvider {
            reply,
            calls: Arc::clone(&calls),
        };
        (Extractor::new(Box::new(provider), true), calls)
    }

    #[tokio::test]
    async fn test_extract_valid_payload() {
        let payload = r#"{"name": "Lamp", "price": "$10", "description": "Bright",
            "images": [], "rating": 4, "sold": "12", "reviews": []}"#;
        let (extractor, calls) = extractor(Ok(Some(payload.to_string())));

        let record = extractor.extract("https://example.com/p/lamp").await.unwrap();
        assert_eq!(record.name, "Lamp");
        assert!(record.images.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blank_url_makes_no_call() {
        let (extractor, calls) = extractor(Ok(None));
        let result = extractor.extract("   ").await;
        assert!(matches!(result, Err(ExtractionError::EmptyUrl)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_no_payload_is_empty_response() {
        let (extractor, _) = extractor(Ok(None));
        let result = extractor.extract("https://example.com/p/lamp").await;
        assert!(matches!(result, Err(ExtractionError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates_message() {
        let (extractor, _) = extractor(Err("connection reset".to_string()));
        let result = extractor.extract("https://example.com/p/lamp").await;
        assert!(matches!(
            result,
            Err(ExtractionError::TransportOrModelFailure(m)) if m == "connection reset"
        ));
    }

    #[tokio::test]
    async fn test_each_call_reissues_request() {
        let (extractor, calls) = extractor(Ok(Some("not json".to_string())));
        let _ = extractor.extract("https://example.com/p/lamp").await;
        let _ = extractor.extract("https://example.com/p/lamp").await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
