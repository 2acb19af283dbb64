// src/chat/translation.rs - translate requests and combine
use super::backend::ChatBackend;
use super::compose::{ComposeController, SendOutcome};
use super::events::SessionEvent;
use super::notice::Notice;
use super::tasks::TaskScheduler;
use super::transcript::Transcript;
use crate::core::config::TranslateConfig;
use crate::core::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationState {
    Idle,
    Requested { ticket: u64, source: String },
    Fulfilled { ticket: u64, text: String },
    Failed { ticket: u64, reason: String },
}

/// Identifies one issued translate request. Only the latest handle's
/// completion is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationHandle {
    ticket: u64,
}

impl TranslationHandle {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }
}

pub struct TranslationController {
    state: TranslationState,
    latest_ticket: u64,
    targets: Vec<String>,
    target: usize,
}

impl TranslationController {
    pub fn new(config: &TranslateConfig) -> Self {
        let targets = config.targets.clone();
        let target = targets
            .iter()
            .position(|t| *t == config.default_target)
            .unwrap_or(0);
        Self {
            state: TranslationState::Idle,
            latest_ticket: 0,
            targets,
            target,
        }
    }

    pub fn state(&self) -> &TranslationState {
        &self.state
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn target(&self) -> &str {
        self.targets.get(self.target).map(String::as_str).unwrap_or_default()
    }

    pub fn select_target(&mut self, value: &str) -> bool {
        match self.targets.iter().position(|t| t == value) {
            Some(index) => {
                self.target = index;
                true
            }
            None => false,
        }
    }

    pub fn cycle_target(&mut self) {
        if !self.targets.is_empty() {
            self.target = (self.target + 1) % self.targets.len();
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, TranslationState::Requested { .. })
    }

    /// The translated text, only once a request has been fulfilled.
    pub fn result_text(&self) -> Option<&str> {
        match &self.state {
            TranslationState::Fulfilled { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn translate(
        &mut self,
        input: &str,
        backend: &dyn ChatBackend,
        tasks: &TaskScheduler,
    ) -> std::result::Result<TranslationHandle, Notice> {
        let source = input.trim();
        if source.is_empty() {
            return Err(Notice::EmptyMessage);
        }

        self.latest_ticket += 1;
        let ticket = self.latest_ticket;
        self.state = TranslationState::Requested {
            ticket,
            source: source.to_string(),
        };

        log::info!("Translation requested: {} chars to {}", source.chars().count(), self.target());
        let request = backend.translate(source, self.target());
        tasks.request(async move {
            SessionEvent::TranslationFinished {
                ticket,
                result: request.await,
            }
        });

        Ok(TranslationHandle { ticket })
    }

    /// Applies a completion. Returns false when `ticket` was superseded.
    pub fn on_finished(&mut self, ticket: u64, result: Result<String>) -> bool {
        let current = matches!(
            self.state,
            TranslationState::Requested { ticket: t, .. } if t == ticket
        );
        if !current || ticket != self.latest_ticket {
            log::debug!("Discarding stale translation #{}", ticket);
            return false;
        }

        self.state = match result {
            Ok(text) => TranslationState::Fulfilled { ticket, text },
            Err(e) => {
                log::error!("Translation error: {}", e);
                TranslationState::Failed {
                    ticket,
                    reason: e.to_string(),
                }
            }
        };
        true
    }

    /// Back to idle; any outstanding request becomes stale.
    pub fn clear(&mut self) {
        self.latest_ticket += 1;
        self.state = TranslationState::Idle;
    }

    /// Sends `"<original> (<translated>)"` through `compose` and clears
    /// the translation. The input itself is left to the send timers.
    pub fn combine(
        &mut self,
        compose: &mut ComposeController,
        transcript: &mut Transcript,
        backend: &dyn ChatBackend,
        tasks: &TaskScheduler,
    ) -> std::result::Result<SendOutcome, Notice> {
        let original = compose.text().trim().to_string();
        let translated = self.result_text().map(str::trim).unwrap_or_default().to_string();
        if original.is_empty() || translated.is_empty() {
            return Err(Notice::EmptyTranslation);
        }
        if !compose.can_send() {
            return Ok(SendOutcome::Busy);
        }

        compose.set_text(&format!("{} ({})", original, translated));
        let outcome = compose.send(transcript, backend, tasks);
        self.clear();
        Ok(outcome)
    }
}
