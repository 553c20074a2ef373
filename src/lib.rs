//! Turn a product-page URL into a structured product record.
//!
//! The extraction itself is delegated to an LLM provider asked for
//! schema-constrained JSON; this crate builds that request, validates the answer
//! and drives a small presentation store around it.

pub mod clipboard;
pub mod config;
pub mod error;
pub mod extractor;
pub mod model;
pub mod providers;
pub mod render;
pub mod schema;
pub mod session;
pub mod store;

pub use config::AiConfig;
pub use error::ExtractionError;
pub use extractor::Extractor;
pub use model::{ExtractionRequest, ProductRecord, Review};
pub use session::Session;

/// Extract a product record using the configured default provider.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), product_import::ExtractionError> {
/// let record = product_import::extract_product("https://example.com/item/blue-widget").await?;
/// println!("{} - {}", record.name, record.price);
/// # Ok(())
/// # }
/// ```
pub async fn extract_product(url: &str) -> Result<ProductRecord, ExtractionError> {
    let config = AiConfig::load()?;
    Extractor::from_config(&config)?.extract(url).await
}
