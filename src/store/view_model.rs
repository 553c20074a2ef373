use crate::model::Review;
use crate::store::{Status, UiState};

/// Referrer policy every image element must be rendered with.
pub const IMAGE_REFERRER_POLICY: &str = "no-referrer";

/// Everything the rendering layer needs, derived from [`UiState`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProductView {
    pub status: Status,
    pub request_url: String,
    pub error_message: Option<String>,
    pub submit_enabled: bool,
    pub detail: Option<DetailView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub name: String,
    pub price: String,
    pub description: String,
    /// `None` renders as a placeholder icon
    pub primary_image: Option<String>,
    pub thumbnails: Vec<Thumbnail>,
    pub rating: f64,
    pub stars: String,
    pub sold: String,
    pub reviews: Vec<Review>,
    pub summary: String,
    pub copied: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub index: usize,
    pub url: String,
    pub selected: bool,
}

impl ProductView {
    pub(crate) fn from_state(state: &UiState) -> Self {
        let detail = state.record().map(|record| {
            let selected = state.selected_image_index();
            DetailView {
                name: record.name.clone(),
                price: record.price.clone(),
                description: record.description.clone(),
                primary_image: record.images.get(selected).cloned(),
                thumbnails: record
                    .images
                    .iter()
                    .enumerate()
                    .map(|(index, url)| Thumbnail {
                        index,
                        url: url.clone(),
                        selected: index == selected,
                    })
                    .collect(),
                rating: record.rating,
                stars: stars(record.rating),
                sold: record.sold.clone(),
                reviews: record.reviews.clone(),
                summary: record.summary(),
                copied: state.copied_flag_active(),
            }
        });

        ProductView {
            status: state.status(),
            request_url: state.request_url().to_string(),
            error_message: match state.status() {
                Status::Error => Some(state.error_message().to_string()),
                _ => None,
            },
            submit_enabled: state.status() != Status::Loading,
            detail,
        }
    }
}

/// Five-star strip for display. The numeric rating itself is never clamped.
pub fn stars(rating: f64) -> String {
    let filled = if rating.is_finite() {
        rating.round().clamp(0.0, 5.0) as usize
    } else {
        0
    };
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}
