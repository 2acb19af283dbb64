// src/chat/compose.rs - message input, typing throttle, send debounce
use super::backend::ChatBackend;
use super::events::SessionEvent;
use super::tasks::{TaskScheduler, TimerHandle};
use super::transcript::{Sender, Transcript};
use crate::core::config::TimingConfig;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendPhase {
    Enabled,
    /// A message went out; the input is locked until `SendClear` for
    /// this generation arrives.
    PendingClear { generation: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    Empty,
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputChange {
    Updated,
    Cleared,
    Ignored,
}

pub struct ComposeController {
    text: String,
    enabled: bool,
    typing_allowed: bool,
    char_count: usize,
    phase: SendPhase,
    next_generation: u64,
    pending: Option<TimerHandle>,
    timing: TimingConfig,
}

impl ComposeController {
    pub fn new(timing: TimingConfig) -> Self {
        Self {
            text: String::new(),
            enabled: true,
            typing_allowed: true,
            char_count: 0,
            phase: SendPhase::Enabled,
            next_generation: 0,
            pending: None,
            timing,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn phase(&self) -> SendPhase {
        self.phase
    }

    pub fn can_send(&self) -> bool {
        self.phase == SendPhase::Enabled
    }

    pub fn char_count(&self) -> usize {
        self.char_count
    }

    pub fn typing_allowed(&self) -> bool {
        self.typing_allowed
    }

    /// User edit. Updates the live count and emits at most one typing
    /// signal per cool-down window.
    pub fn on_input_changed(
        &mut self,
        text: &str,
        backend: &dyn ChatBackend,
        tasks: &TaskScheduler,
    ) -> InputChange {
        if !self.enabled {
            return InputChange::Ignored;
        }

        let cleared = !self.text.is_empty() && text.is_empty();
        self.text = text.to_string();
        self.recount();

        if self.typing_allowed {
            tasks.detach("typing signal", backend.send_typing());
            self.typing_allowed = false;
            tasks.schedule(self.timing.typing_cooldown, SessionEvent::TypingCooldownElapsed);
        }

        if cleared {
            InputChange::Cleared
        } else {
            InputChange::Updated
        }
    }

    pub fn on_typing_cooldown_elapsed(&mut self) {
        self.typing_allowed = true;
    }

    /// Replaces the input without a typing signal (programmatic edit).
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    pub fn recount(&mut self) {
        self.char_count = self.text.graphemes(true).count();
    }

    pub fn send(
        &mut self,
        transcript: &mut Transcript,
        backend: &dyn ChatBackend,
        tasks: &TaskScheduler,
    ) -> SendOutcome {
        if self.text.trim().is_empty() {
            return SendOutcome::Empty;
        }
        if !self.can_send() {
            log::debug!("Send ignored, previous message still pending");
            return SendOutcome::Busy;
        }

        let message = self.text.clone();
        transcript.append(Sender::User, &message, tasks);
        tasks.detach("message signal", backend.send_message(&message));
        self.char_count = 0;

        self.next_generation += 1;
        let generation = self.next_generation;
        self.phase = SendPhase::PendingClear { generation };

        let group = tasks.group();
        tasks.schedule_in(
            &group,
            self.timing.send_disable_delay,
            SessionEvent::SendDisable { generation },
        );
        tasks.schedule_in(
            &group,
            self.timing.send_clear_delay,
            SessionEvent::SendClear { generation },
        );
        if let Some(previous) = self.pending.replace(group) {
            previous.cancel();
        }

        log::info!("Message sent ({} chars)", message.graphemes(true).count());
        SendOutcome::Sent
    }

    pub fn on_send_disable(&mut self, generation: u64) -> bool {
        if self.phase != (SendPhase::PendingClear { generation }) {
            return false;
        }
        self.enabled = false;
        true
    }

    /// Clears and unlocks the input. Returns false for stale generations.
    pub fn on_send_clear(&mut self, generation: u64) -> bool {
        if self.phase != (SendPhase::PendingClear { generation }) {
            return false;
        }
        self.text.clear();
        self.enabled = true;
        self.phase = SendPhase::Enabled;
        self.pending = None;
        true
    }
}
