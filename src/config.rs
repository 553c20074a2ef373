use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

/// Main AI configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    /// Provider used for extraction
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Ask the provider to retrieve the live page before falling back to synthesis
    #[serde(default = "default_live_retrieval")]
    pub live_retrieval: bool,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: HashMap::new(),
            live_retrieval: default_live_retrieval(),
        }
    }
}

/// Configuration for a specific AI provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier (e.g., "gemini-2.5-flash", "gpt-4o-mini")
    #[serde(default)]
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl ProviderConfig {
    /// Settings used when the default provider has no section of its own.
    pub fn for_provider(provider_name: &str) -> Self {
        Self {
            enabled: default_enabled(),
            model: default_model(provider_name).to_string(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }

    /// Configured model, or the provider's default when left blank.
    pub fn model_or_default(&self, provider_name: &str) -> String {
        if self.model.trim().is_empty() {
            default_model(provider_name).to_string()
        } else {
            self.model.clone()
        }
    }
}

// Default value functions
fn default_provider() -> String {
    "google".to_string()
}

fn default_live_retrieval() -> bool {
    true
}

fn default_enabled() -> bool {
    true
}

// Greedy sampling keeps a synthesized record stable for a given URL
fn default_temperature() -> f32 {
    0.0
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_model(provider_name: &str) -> &'static str {
    match provider_name {
        "openai" => "gpt-4o-mini-search-preview",
        "ollama" => "llama3.1",
        _ => "gemini-2.5-flash",
    }
}

impl AiConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with PRODUCT_IMPORT__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: PRODUCT_IMPORT__PROVIDERS__GOOGLE__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Settings for the default provider, synthesised when not configured.
    pub fn default_provider_config(&self) -> ProviderConfig {
        self.providers
            .get(&self.default_provider)
            .cloned()
            .unwrap_or_else(|| ProviderConfig::for_provider(&self.default_provider))
    }
}

/// Load configuration from file and environment variables
///
/// See [`AiConfig::load`] for the source priority.
pub fn load_config() -> Result<AiConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: PRODUCT_IMPORT__PROVIDERS__OPENAI__API_KEY
        .add_source(
            Environment::with_prefix("PRODUCT_IMPORT")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_provider(), "google");
        assert!(default_live_retrieval());
        assert_eq!(default_temperature(), 0.0);
        assert_eq!(default_max_tokens(), 4096);
    }

    #[test]
    fn test_default_model_per_provider() {
        assert_eq!(default_model("google"), "gemini-2.5-flash");
        assert_eq!(default_model("openai"), "gpt-4o-mini-search-preview");
        assert_eq!(default_model("ollama"), "llama3.1");
    }

    #[test]
    fn test_default_provider_config_is_synthesised() {
        let config = AiConfig::default();
        let provider = config.default_provider_config();
        assert!(provider.enabled);
        assert_eq!(provider.model, "gemini-2.5-flash");
        assert!(provider.api_key.is_none());
    }

    #[test]
    fn test_configured_provider_wins() {
        let mut config = AiConfig {
            default_provider: "openai".to_string(),
            ..AiConfig::default()
        };
        let mut openai = ProviderConfig::for_provider("openai");
        openai.model = "gpt-4o".to_string();
        openai.api_key = Some("test-key".to_string());
        config.providers.insert("openai".to_string(), openai);

        let provider = config.default_provider_config();
        assert_eq!(provider.model, "gpt-4o");
        assert_eq!(provider.api_key.as_deref(), Some("test-key"));
    }

    #[test]
    fn test_blank_model_falls_back() {
        let mut provider = ProviderConfig::for_provider("google");
        provider.model = "  ".to_string();
        assert_eq!(provider.model_or_default("google"), "gemini-2.5-flash");
    }

    #[test]
    fn test_deserialize_from_toml() {
        let toml = r#"
            default_provider = "ollama"
            live_retrieval = false

            [providers.ollama]
            model = "qwen2.5"
            base_url = "http://gpu-box:11434"
        "#;

        let config: AiConfig = Config::builder()
            .add_source(File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.default_provider, "ollama");
        assert!(!config.live_retrieval);
        let ollama = &config.providers["ollama"];
        assert!(ollama.enabled);
        assert_eq!(ollama.model, "qwen2.5");
        assert_eq!(ollama.base_url.as_deref(), Some("http://gpu-box:11434"));
    }
}
