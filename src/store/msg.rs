use crate::model::ProductRecord;
use crate::store::{Generation, TimerToken};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// URL submitted from the form field
    Submit(String),
    ExtractionSucceeded {
        generation: Generation,
        record: ProductRecord,
    },
    ExtractionFailed {
        generation: Generation,
        message: String,
    },
    /// Thumbnail picked
    SelectImage(usize),
    CopySummary,
    CopiedResetElapsed {
        token: TimerToken,
    },
}
