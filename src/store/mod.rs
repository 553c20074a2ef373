//! Presentation store: explicit UI state, pure transitions and derived views.
//!
//! Nothing here performs I/O. Transitions return [`Effect`]s that the session
//! runtime executes, feeding results back as [`Msg`]s.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, COPIED_RESET_DELAY};
pub use msg::Msg;
pub use state::{Generation, Status, TimerToken, UiState};
pub use update::update;
pub use view_model::{DetailView, ProductView, Thumbnail, IMAGE_REFERRER_POLICY};
