// src/input/keyboard.rs - key to action mapping
use crate::core::prelude::*;
use crossterm::event::KeyEventKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    InsertChar(char),
    Backspace,
    Delete,
    MoveLeft,
    MoveRight,
    MoveToStart,
    MoveToEnd,
    ClearLine,
    Submit,
    Translate,
    Combine,
    CycleTarget,
    CycleLanguage,
    PageUp,
    PageDown,
    Dismiss,
    Quit,
    NoAction,
}

#[derive(Debug, Default)]
pub struct KeyboardManager;

impl KeyboardManager {
    pub fn new() -> Self {
        Self
    }

    /// While a notice is open only Enter/Esc get through, both as `Dismiss`.
    pub fn get_action(&self, key: &KeyEvent, notice_open: bool) -> KeyAction {
        if key.kind == KeyEventKind::Release {
            return KeyAction::NoAction;
        }

        if notice_open {
            return match key.code {
                KeyCode::Enter | KeyCode::Esc => KeyAction::Dismiss,
                _ => KeyAction::NoAction,
            };
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match (key.code, ctrl) {
            (KeyCode::Char('c'), true) => KeyAction::Quit,
            (KeyCode::Char('t'), true) => KeyAction::Translate,
            (KeyCode::Char('b'), true) => KeyAction::Combine,
            (KeyCode::Char('u'), true) => KeyAction::ClearLine,
            (KeyCode::Char('a'), true) => KeyAction::MoveToStart,
            (KeyCode::Char('e'), true) => KeyAction::MoveToEnd,
            (KeyCode::Char(_), true) => KeyAction::NoAction,
            (KeyCode::Char(c), false) if !c.is_control() => KeyAction::InsertChar(c),
            (KeyCode::Esc, _) => KeyAction::Quit,
            (KeyCode::Enter, _) => KeyAction::Submit,
            (KeyCode::Backspace, _) => KeyAction::Backspace,
            (KeyCode::Delete, _) => KeyAction::Delete,
            (KeyCode::Left, _) => KeyAction::MoveLeft,
            (KeyCode::Right, _) => KeyAction::MoveRight,
            (KeyCode::Home, _) => KeyAction::MoveToStart,
            (KeyCode::End, _) => KeyAction::MoveToEnd,
            (KeyCode::F(2), _) => KeyAction::CycleTarget,
            (KeyCode::F(3), _) => KeyAction::CycleLanguage,
            (KeyCode::PageUp, _) | (KeyCode::Up, _) => KeyAction::PageUp,
            (KeyCode::PageDown, _) | (KeyCode::Down, _) => KeyAction::PageDown,
            _ => KeyAction::NoAction,
        }
    }
}
