// src/input/editor.rs - single-line editing with a grapheme cursor
use super::keyboard::KeyAction;
use std::time::{Duration, Instant};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

pub struct CursorState {
    position: usize,
    text_length: usize,
    visible: bool,
    last_blink: Instant,
    blink_interval: Duration,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            position: 0,
            text_length: 0,
            visible: true,
            last_blink: Instant::now(),
            blink_interval: Duration::from_millis(530),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn update_blink(&mut self) {
        if self.last_blink.elapsed() >= self.blink_interval {
            self.visible = !self.visible;
            self.last_blink = Instant::now();
        }
    }

    fn show(&mut self) {
        self.visible = true;
        self.last_blink = Instant::now();
    }

    fn set_text_length(&mut self, text: &str) {
        self.text_length = text.graphemes(true).count();
        self.position = self.position.min(self.text_length);
    }

    fn move_to(&mut self, position: usize) {
        self.position = position.min(self.text_length);
        self.show();
    }

    /// Byte offset of the cursor within `text`.
    fn byte_position(&self, text: &str) -> usize {
        text.grapheme_indices(true)
            .nth(self.position)
            .map(|(pos, _)| pos)
            .unwrap_or(text.len())
    }
}

impl Default for CursorState {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns editing actions into new input text. The text itself lives in
/// the chat session; the editor only owns the cursor.
pub struct LineEditor {
    cursor: CursorState,
    max_length: usize,
}

impl LineEditor {
    pub fn new(max_length: usize) -> Self {
        Self {
            cursor: CursorState::new(),
            max_length,
        }
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    pub fn tick(&mut self) {
        self.cursor.update_blink();
    }

    /// Re-clamps the cursor after the session changed the text on its own
    /// (for example the post-send clear).
    pub fn sync(&mut self, text: &str) {
        self.cursor.set_text_length(text);
    }

    /// Display columns left of the cursor.
    pub fn cursor_column(&self, text: &str) -> usize {
        text[..self.cursor.byte_position(text)].width()
    }

    /// Applies `action` to `text`. `Some` carries the edited text, `None`
    /// means the text is unchanged (cursor moves included).
    pub fn apply(&mut self, action: &KeyAction, text: &str) -> Option<String> {
        self.cursor.set_text_length(text);
        let position = self.cursor.position();

        match action {
            KeyAction::InsertChar(c) => {
                if text.graphemes(true).count() >= self.max_length {
                    return None;
                }
                let mut edited = text.to_string();
                edited.insert(self.cursor.byte_position(text), *c);
                self.cursor.set_text_length(&edited);
                // a combining mark may merge into the previous grapheme
                let grown = edited.graphemes(true).count() > text.graphemes(true).count();
                self.cursor.move_to(if grown { position + 1 } else { position });
                Some(edited)
            }
            KeyAction::Backspace if position > 0 => {
                self.cursor.move_to(position - 1);
                let start = self.cursor.byte_position(text);
                let end = next_boundary(text, start);
                let mut edited = text.to_string();
                edited.replace_range(start..end, "");
                self.cursor.set_text_length(&edited);
                Some(edited)
            }
            KeyAction::Delete if position < self.cursor.text_length => {
                let start = self.cursor.byte_position(text);
                let end = next_boundary(text, start);
                let mut edited = text.to_string();
                edited.replace_range(start..end, "");
                self.cursor.set_text_length(&edited);
                Some(edited)
            }
            KeyAction::ClearLine if !text.is_empty() => {
                self.cursor.set_text_length("");
                self.cursor.move_to(0);
                Some(String::new())
            }
            KeyAction::MoveLeft => {
                self.cursor.move_to(position.saturating_sub(1));
                None
            }
            KeyAction::MoveRight => {
                self.cursor.move_to(position + 1);
                None
            }
            KeyAction::MoveToStart => {
                self.cursor.move_to(0);
                None
            }
            KeyAction::MoveToEnd => {
                self.cursor.move_to(self.cursor.text_length);
                None
            }
            _ => None,
        }
    }
}

fn next_boundary(text: &str, start: usize) -> usize {
    text[start..]
        .graphemes(true)
        .next()
        .map(|g| start + g.len())
        .unwrap_or(text.len())
}
