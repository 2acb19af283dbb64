// src/chat/events.rs
use crate::core::error::Result;
use crate::i18n::{LocaleBundle, LocaleError};

/// Completions delivered back to the session's single logical thread.
#[derive(Debug)]
pub enum SessionEvent {
    TypingCooldownElapsed,
    SendDisable { generation: u64 },
    SendClear { generation: u64 },
    ScrollSettled,
    TranslationFinished { ticket: u64, result: Result<String> },
    LocaleLoaded {
        code: String,
        result: std::result::Result<LocaleBundle, LocaleError>,
    },
}
