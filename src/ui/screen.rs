// src/ui/screen.rs - main loop: terminal events and session completions
use crate::chat::{ChatSession, SendOutcome};
use crate::core::prelude::*;
use crate::input::{
    editor::LineEditor,
    keyboard::{KeyAction, KeyboardManager},
    AppEvent, EventHandler,
};
use crate::ui::{render, terminal::TerminalManager};

use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::Stdout;

pub type TerminalBackend = Terminal<CrosstermBackend<Stdout>>;

pub struct ScreenManager {
    terminal: TerminalBackend,
    terminal_mgr: TerminalManager,
    session: ChatSession,
    editor: LineEditor,
    events: EventHandler,
    keyboard_manager: KeyboardManager,
    terminal_size: (u16, u16),
    title: String,
}

impl ScreenManager {
    pub async fn new(config: &Config, session: ChatSession) -> Result<Self> {
        let title = session.labels().title.clone();
        let mut terminal_mgr = TerminalManager::new().await?;
        terminal_mgr.setup(&title).await?;

        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        let size = terminal.size()?;

        Ok(Self {
            terminal,
            terminal_mgr,
            session,
            editor: LineEditor::new(config.input_max_length),
            events: EventHandler::new(config.poll_rate),
            keyboard_manager: KeyboardManager::new(),
            terminal_size: (size.width, size.height),
            title,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.render()?;

        let result = loop {
            tokio::select! {
                event = self.events.next() => match event {
                    Some(AppEvent::Input(key)) => {
                        if self.handle_input_event(key) {
                            break Ok(());
                        }
                    }
                    Some(AppEvent::Resize(width, height)) => {
                        self.terminal_size = (width, height);
                        self.terminal.autoresize()?;
                    }
                    Some(AppEvent::Tick) => self.editor.tick(),
                    None => break Ok(()),
                },
                Some(event) = self.session.next_event() => {
                    self.session.handle_event(event);
                    self.session.process_pending();
                }
            }

            self.editor.sync(self.session.input());
            self.sync_title();
            self.render()?;
        };

        self.events.shutdown().await;
        self.session.shutdown();
        self.terminal_mgr.cleanup().await?;
        result
    }

    /// Returns true when the user asked to quit.
    fn handle_input_event(&mut self, key: KeyEvent) -> bool {
        let notice_open = self.session.notice().is_some();
        let action = self.keyboard_manager.get_action(&key, notice_open);

        match action {
            KeyAction::Quit => return true,
            KeyAction::Dismiss => {
                self.session.dismiss_notice();
            }
            KeyAction::Submit => {
                if self.session.send() == SendOutcome::Busy {
                    log::debug!("Send pressed while previous message pending");
                }
            }
            KeyAction::Translate => {
                self.session.translate();
            }
            KeyAction::Combine => {
                self.session.combine();
            }
            KeyAction::CycleTarget => self.session.cycle_target(),
            KeyAction::CycleLanguage => self.session.cycle_language(),
            KeyAction::PageUp => self.session.scroll_up(self.page_size()),
            KeyAction::PageDown => self.session.scroll_down(self.page_size()),
            KeyAction::NoAction => {}
            editing => {
                if !self.session.input_enabled() {
                    return false;
                }
                let current = self.session.input().to_string();
                if let Some(edited) = self.editor.apply(&editing, &current) {
                    self.session.on_input_changed(&edited);
                }
            }
        }
        false
    }

    fn page_size(&self) -> usize {
        // header, translation, input and hint rows plus borders
        self.terminal_size.1.saturating_sub(10).max(1) as usize
    }

    fn sync_title(&mut self) {
        let title = &self.session.labels().title;
        if *title != self.title {
            self.title = title.clone();
            if let Err(e) = self.terminal_mgr.set_title(&self.title) {
                log::warn!("Could not set terminal title: {}", e);
            }
        }
    }

    fn render(&mut self) -> Result<()> {
        let session = &self.session;
        let editor = &self.editor;
        self.terminal
            .draw(|frame| render::draw(frame, session, editor))?;
        Ok(())
    }
}
