use log::debug;

use crate::error::EXTRACTION_FAILED_MESSAGE;
use crate::store::{Effect, Msg, Status, UiState, COPIED_RESET_DELAY};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: UiState, msg: Msg) -> (UiState, Vec<Effect>) {
    let effects = match msg {
        Msg::Submit(raw) => {
            let url = raw.trim();
            if url.is_empty() || state.status() == Status::Loading {
                return (state, Vec::new());
            }

            if let Some(message) = state.configuration_error().map(str::to_string) {
                state.finish_error(url, message);
                return (state, Vec::new());
            }

            let generation = state.begin_loading(url);
            vec![Effect::Extract {
                generation,
                url: url.to_string(),
            }]
        }
        Msg::ExtractionSucceeded { generation, record } => {
            if generation == state.generation() && state.status() == Status::Loading {
                state.finish_ready(record);
            } else {
                debug!("Dropping stale success {}", generation);
            }
            Vec::new()
        }
        Msg::ExtractionFailed {
            generation,
            message,
        } => {
            if generation == state.generation() && state.status() == Status::Loading {
                let message = if message.trim().is_empty() {
                    EXTRACTION_FAILED_MESSAGE.to_string()
                } else {
                    message
                };
                let url = state.request_url().to_string();
                state.finish_error(&url, message);
            } else {
                debug!("Dropping stale failure {}", generation);
            }
            Vec::new()
        }
        Msg::SelectImage(index) => {
            let in_bounds = state
                .record()
                .is_some_and(|record| index < record.images.len());
            if state.status() == Status::Ready && in_bounds {
                state.set_selected_image(index);
            }
            Vec::new()
        }
        Msg::CopySummary => {
            let summary = match (state.status(), state.record()) {
                (Status::Ready, Some(record)) => record.summary(),
                _ => return (state, Vec::new()),
            };
            let token = state.arm_copied();
            vec![
                Effect::WriteClipboard(summary),
                Effect::ScheduleCopiedReset {
                    token,
                    delay: COPIED_RESET_DELAY,
                },
            ]
        }
        Msg::CopiedResetElapsed { token } => {
            if state.pending_timer() == Some(token) {
                state.clear_copied();
            }
            Vec::new()
        }
    };

    (state, effects)
}
