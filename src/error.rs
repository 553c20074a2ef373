use thiserror::Error;

/// Shown when the external inference capability has no credential configured.
pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "Chave de API não configurada. Defina GEMINI_API_KEY (ou PRODUCT_IMPORT__PROVIDERS__<PROVEDOR>__API_KEY) e tente novamente.";

/// Shown when the model answered but nothing usable could be read from it.
pub const EXTRACTION_FAILED_MESSAGE: &str =
    "Não foi possível extrair os dados do produto. Verifique o link e tente novamente.";

/// Errors that can occur while extracting a product record
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The URL was empty after trimming; no call was made
    #[error("URL cannot be empty")]
    EmptyUrl,

    /// The external capability is not configured
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// The call succeeded but yielded no payload
    #[error("The model returned an empty response")]
    EmptyResponse,

    /// Network, HTTP or model-side failure
    #[error("Extraction request failed: {0}")]
    TransportOrModelFailure(String),

    /// A payload was returned but it does not match the product schema
    #[error("Malformed product payload: {0}")]
    MalformedPayload(String),

    /// Invalid provider or configuration source
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ExtractionError {
    /// The single message surfaced to the user in the Error state.
    pub fn user_message(&self) -> String {
        match self {
            ExtractionError::MissingCredential(_) => MISSING_CREDENTIAL_MESSAGE.to_string(),
            ExtractionError::EmptyResponse | ExtractionError::MalformedPayload(_) => {
                EXTRACTION_FAILED_MESSAGE.to_string()
            }
            ExtractionError::TransportOrModelFailure(message) if !message.trim().is_empty() => {
                message.clone()
            }
            ExtractionError::Configuration(message) => message.clone(),
            _ => EXTRACTION_FAILED_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for ExtractionError {
    fn from(err: reqwest::Error) -> Self {
        ExtractionError::TransportOrModelFailure(err.to_string())
    }
}

impl From<config::ConfigError> for ExtractionError {
    fn from(err: config::ConfigError) -> Self {
        ExtractionError::Configuration(err.to_string())
    }
}
