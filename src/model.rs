use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ExtractionError;

/// Placeholder image service used when a record has to be synthesized.
pub const PLACEHOLDER_IMAGE_BASE: &str = "https://picsum.photos/seed";

// Field docs double as the descriptions the model sees in the output schema.

/// A single customer review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Review {
    /// Reviewer display name
    pub user: String,
    /// Rating given by the reviewer, 0 to 5
    pub rating: f64,
    /// Review text
    pub comment: String,
}

/// Structured product data shown on a product page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProductRecord {
    /// Product title exactly as shown on the page
    pub name: String,
    /// Price with currency symbol as displayed, e.g. "R$ 29,90"
    pub price: String,
    /// Product description
    pub description: String,
    /// Absolute image URLs, main image first
    pub images: Vec<String>,
    /// Average rating, 0 to 5
    pub rating: f64,
    /// Units sold as displayed, e.g. "1.2k"
    pub sold: String,
    /// Customer reviews
    pub reviews: Vec<Review>,
}

impl ProductRecord {
    /// Coerce a raw model payload into a record.
    ///
    /// Accepts the JSON either bare or wrapped in a Markdown code fence. Any
    /// missing or mistyped field rejects the whole payload, so a partially
    /// shaped answer is never rendered.
    pub fn from_payload(payload: &str) -> Result<Self, ExtractionError> {
        let body = strip_code_fence(payload);
        if body.is_empty() {
            return Err(ExtractionError::EmptyResponse);
        }

        serde_json::from_str(body).map_err(|e| ExtractionError::MalformedPayload(e.to_string()))
    }

    /// Plain-text summary handed to the clipboard.
    pub fn summary(&self) -> String {
        format!(
            "Produto: {}\nPreço: {}\nDescrição: {}",
            self.name, self.price, self.description
        )
    }
}

fn strip_code_fence(payload: &str) -> &str {
    let trimmed = payload.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);

    // Drop a language tag such as "json", with or without a line break after it
    rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()).trim()
}

/// Everything a provider needs to issue one extraction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub source_url: String,
    /// Last meaningful path segment, used to name a synthesized product
    pub slug: String,
    /// Deterministic seed for placeholder images
    pub placeholder_seed: u32,
    /// Ask the capability to retrieve the live page
    pub live_retrieval: bool,
}

impl ExtractionRequest {
    pub fn new(url: &str, live_retrieval: bool) -> Result<Self, ExtractionError> {
        let source_url = url.trim();
        if source_url.is_empty() {
            return Err(ExtractionError::EmptyUrl);
        }

        let slug = slug_from_url(source_url);
        let placeholder_seed = fnv1a(slug.as_bytes());

        Ok(ExtractionRequest {
            source_url: source_url.to_string(),
            slug,
            placeholder_seed,
            live_retrieval,
        })
    }

    /// Placeholder image URLs for a synthesized record.
    pub fn placeholder_images(&self, count: usize) -> Vec<String> {
        (1..=count)
            .map(|n| {
                format!(
                    "{}/{}-{}/800/800",
                    PLACEHOLDER_IMAGE_BASE, self.placeholder_seed, n
                )
            })
            .collect()
    }
}

/// Derive a slug from the URL path, tolerating malformed input.
fn slug_from_url(raw: &str) -> String {
    let from_parsed = Url::parse(raw).ok().and_then(|url| {
        let last_segment = url
            .path_segments()
            .and_then(|mut segments| segments.rfind(|s| !s.is_empty()).map(str::to_string));
        last_segment.or_else(|| url.host_str().map(str::to_string))
    });

    let slug = from_parsed.unwrap_or_else(|| {
        let without_query = raw.split(['?', '#']).next().unwrap_or(raw);
        without_query
            .split('/')
            .rfind(|s| !s.is_empty())
            .unwrap_or(without_query)
            .to_string()
    });

    if slug.is_empty() {
        "produto".to_string()
    } else {
        slug
    }
}

fn fnv1a(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0x811c_9dc5_u32, |hash, byte| {
        (hash ^ u32::from(*byte)).wrapping_mul(0x0100_0193)
    })
}
