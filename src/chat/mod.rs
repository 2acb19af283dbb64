// src/chat/mod.rs
pub mod backend;
pub mod compose;
pub mod events;
pub mod notice;
pub mod session;
pub mod tasks;
pub mod transcript;
pub mod translation;

pub use backend::{ChatBackend, HttpBackend};
pub use compose::{InputChange, SendOutcome, SendPhase};
pub use events::SessionEvent;
pub use notice::Notice;
pub use session::ChatSession;
pub use transcript::{Sender, Transcript, TranscriptEntry};
pub use translation::{TranslationHandle, TranslationState};
