//! Runtime side of the presentation store.
//!
//! A [`Session`] owns the [`UiState`] and is the only place where
//! [`update`] runs. Extraction calls and the copied-flag timer run as tokio
//! tasks that never touch the state: they report back through the message
//! channel and the owner feeds those messages to [`Session::dispatch`].

use std::sync::Arc;

use log::{info, warn};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::clipboard::ClipboardSink;
use crate::config::AiConfig;
use crate::error::{ExtractionError, MISSING_CREDENTIAL_MESSAGE};
use crate::extractor::Extractor;
use crate::store::{update, Effect, Msg, ProductView, UiState};

pub struct Session {
    state: UiState,
    extractor: Option<Arc<Extractor>>,
    clipboard: Arc<dyn ClipboardSink>,
    msg_tx: UnboundedSender<Msg>,
    copied_timer: Option<JoinHandle<()>>,
}

impl Session {
    pub fn new(
        extractor: Extractor,
        clipboard: Arc<dyn ClipboardSink>,
        msg_tx: UnboundedSender<Msg>,
    ) -> Self {
        Self {
            state: UiState::new(),
            extractor: Some(Arc::new(extractor)),
            clipboard,
            msg_tx,
            copied_timer: None,
        }
    }

    /// Session without an extraction capability: every submit shows `message`.
    pub fn misconfigured(
        message: impl Into<String>,
        clipboard: Arc<dyn ClipboardSink>,
        msg_tx: UnboundedSender<Msg>,
    ) -> Self {
        Self {
            state: UiState::misconfigured(message),
            extractor: None,
            clipboard,
            msg_tx,
            copied_timer: None,
        }
    }

    /// Build a session for the configured provider.
    ///
    /// A missing credential is not an error here: the session starts in the
    /// misconfigured mode so the user sees the configuration message.
    pub fn from_config(
        config: &AiConfig,
        clipboard: Arc<dyn ClipboardSink>,
        msg_tx: UnboundedSender<Msg>,
    ) -> Result<Self, ExtractionError> {
        match Extractor::from_config(config) {
            Ok(extractor) => Ok(Self::new(extractor, clipboard, msg_tx)),
            Err(err @ ExtractionError::MissingCredential(_)) => {
                warn!("{}", err);
                Ok(Self::misconfigured(err.user_message(), clipboard, msg_tx))
            }
            Err(err) => Err(err),
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn view(&self) -> ProductView {
        self.state.view()
    }

    /// Apply `msg` and execute the resulting effects.
    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Extract { generation, url } => {
                info!("Extract {} url={}", generation, url);
                let tx = self.msg_tx.clone();
                let Some(extractor) = self.extractor.clone() else {
                    let _ = tx.send(Msg::ExtractionFailed {
                        generation,
                        message: MISSING_CREDENTIAL_MESSAGE.to_string(),
                    });
                    return;
                };

                tokio::spawn(async move {
                    let msg = match extractor.extract(&url).await {
                        Ok(record) => Msg::ExtractionSucceeded { generation, record },
                        Err(e) => {
                            warn!("Extraction {} failed: {}", generation, e);
                            Msg::ExtractionFailed {
                                generation,
                                message: e.user_message(),
                            }
                        }
                    };
                    let _ = tx.send(msg);
                });
            }
            Effect::WriteClipboard(text) => {
                if let Err(e) = self.clipboard.write_text(&text) {
                    warn!("Clipboard write failed: {}", e);
                }
            }
            Effect::ScheduleCopiedReset { token, delay } => {
                if let Some(previous) = self.copied_timer.take() {
                    previous.abort();
                }
                let tx = self.msg_tx.clone();
                self.copied_timer = Some(tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(Msg::CopiedResetElapsed { token });
                }));
            }
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(timer) = self.copied_timer.take() {
            timer.abort();
        }
    }
}
