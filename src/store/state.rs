use std::fmt;

use crate::model::ProductRecord;
use crate::store::view_model::ProductView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Error,
    Ready,
}

/// Tag of an issued extraction call. Only the latest one may land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifies one armed copied-flag reset. A newer token invalidates older ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimerToken(u64);

impl TimerToken {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// State owned by the presentation layer. Mutated only through [`crate::store::update`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UiState {
    request_url: String,
    status: Status,
    error_message: String,
    record: Option<ProductRecord>,
    selected_image_index: usize,
    copied_flag_active: bool,
    generation: Generation,
    last_timer: TimerToken,
    pending_timer: Option<TimerToken>,
    configuration_error: Option<String>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session whose extraction capability could not be configured.
    ///
    /// Every submission lands in Error with `message` and no call is issued.
    pub fn misconfigured(message: impl Into<String>) -> Self {
        Self {
            configuration_error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn view(&self) -> ProductView {
        ProductView::from_state(self)
    }

    pub fn request_url(&self) -> &str {
        &self.request_url
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn record(&self) -> Option<&ProductRecord> {
        self.record.as_ref()
    }

    pub fn selected_image_index(&self) -> usize {
        self.selected_image_index
    }

    pub fn copied_flag_active(&self) -> bool {
        self.copied_flag_active
    }

    /// Latest issued extraction generation.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Timer that will clear the copied flag, if one is armed.
    pub fn pending_timer(&self) -> Option<TimerToken> {
        self.pending_timer
    }

    pub fn configuration_error(&self) -> Option<&str> {
        self.configuration_error.as_deref()
    }

    pub(crate) fn begin_loading(&mut self, url: &str) -> Generation {
        self.generation = self.generation.next();
        self.request_url = url.to_string();
        self.status = Status::Loading;
        self.error_message.clear();
        self.record = None;
        self.selected_image_index = 0;
        self.clear_copied();
        self.generation
    }

    pub(crate) fn finish_ready(&mut self, record: ProductRecord) {
        self.status = Status::Ready;
        self.record = Some(record);
        self.selected_image_index = 0;
        self.error_message.clear();
    }

    pub(crate) fn finish_error(&mut self, url: &str, message: String) {
        self.request_url = url.to_string();
        self.status = Status::Error;
        self.error_message = message;
        self.record = None;
        self.selected_image_index = 0;
        self.clear_copied();
    }

    pub(crate) fn set_selected_image(&mut self, index: usize) {
        self.selected_image_index = index;
    }

    pub(crate) fn arm_copied(&mut self) -> TimerToken {
        self.last_timer = self.last_timer.next();
        self.pending_timer = Some(self.last_timer);
        self.copied_flag_active = true;
        self.last_timer
    }

    pub(crate) fn clear_copied(&mut self) {
        self.copied_flag_active = false;
        self.pending_timer = None;
    }
}
