use crate::model::ExtractionRequest;

/// The fixed instruction set sent with every extraction call.
///
/// The prompt is loaded from `prompt.txt` at compile time using the
/// `include_str!` macro, making it easy to edit without dealing with
/// Rust string syntax.
pub const PRODUCT_EXTRACTION_PROMPT: &str = include_str!("prompt.txt");

/// Number of placeholder images offered for a synthesized record.
const PLACEHOLDER_IMAGE_COUNT: usize = 3;

/// Build the per-request user message: the URL plus the fabrication inputs.
pub fn build_request_message(request: &ExtractionRequest) -> String {
    let images = request
        .placeholder_images(PLACEHOLDER_IMAGE_COUNT)
        .join("\n");

    let retrieval = if request.live_retrieval {
        "Retrieve the page now."
    } else {
        "Live retrieval is disabled for this request: fabricate the record from the slug."
    };

    format!(
        "URL: {}\nURL slug: {}\n{}\n\nPlaceholder image URLs:\n{}",
        request.source_url, request.slug, retrieval, images
    )
}

/// System prompt and request message joined, for providers with a single input.
pub fn build_extraction_prompt(request: &ExtractionRequest) -> String {
    format!(
        "{}\n\n{}",
        PRODUCT_EXTRACTION_PROMPT,
        build_request_message(request)
    )
}
