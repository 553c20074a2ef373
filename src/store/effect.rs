use std::time::Duration;

use crate::store::{Generation, TimerToken};

/// How long the "copied" flag stays up after a copy.
pub const COPIED_RESET_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run one extraction call and report back tagged with `generation`
    Extract { generation: Generation, url: String },
    /// Hand text to the clipboard sink
    WriteClipboard(String),
    /// Arm the one-shot timer that clears the copied flag
    ScheduleCopiedReset { token: TimerToken, delay: Duration },
}
