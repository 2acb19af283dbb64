// src/chat/transcript.rs
use super::events::SessionEvent;
use super::tasks::{TaskScheduler, TimerHandle};
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Counterpart,
}

#[derive(Debug, Clone)]
pub struct TranscriptEntry {
    pub sender: Sender,
    pub content: String,
    pub sent_at: DateTime<Local>,
}

/// Local message list for this run. Oldest entries drop once
/// `max_messages` is reached.
pub struct Transcript {
    entries: VecDeque<TranscriptEntry>,
    max_messages: usize,
    settle_delay: Duration,
    /// Entries hidden below the visible window; 0 = pinned to the end.
    scroll_offset: usize,
    settle: Option<TimerHandle>,
}

impl Transcript {
    pub fn new(max_messages: usize, settle_delay: Duration) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_messages.min(256)),
            max_messages: max_messages.max(1),
            settle_delay,
            scroll_offset: 0,
            settle: None,
        }
    }

    /// Adds an entry and scrolls to the end once layout has settled.
    pub fn append(&mut self, sender: Sender, content: &str, tasks: &TaskScheduler) {
        if self.entries.len() >= self.max_messages {
            self.entries.pop_front();
        }
        self.entries.push_back(TranscriptEntry {
            sender,
            content: content.to_string(),
            sent_at: Local::now(),
        });

        if let Some(previous) = self.settle.take() {
            previous.cancel();
        }
        self.settle = Some(tasks.schedule(self.settle_delay, SessionEvent::ScrollSettled));
    }

    pub fn on_scroll_settled(&mut self) {
        self.scroll_offset = 0;
        self.settle = None;
    }

    pub fn scroll_up(&mut self, lines: usize) {
        let max_offset = self.entries.len().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + lines).min(max_offset);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &TranscriptEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
