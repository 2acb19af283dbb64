// src/ui/terminal.rs - raw mode and alternate screen lifecycle
use crate::core::prelude::*;
use crossterm::{
    cursor, execute,
    style::ResetColor,
    terminal::{
        self, disable_raw_mode, enable_raw_mode, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::Stdout;

pub struct TerminalManager {
    stdout: Stdout,
    raw_mode_enabled: bool,
}

impl TerminalManager {
    pub async fn new() -> Result<Self> {
        Ok(Self {
            stdout: io::stdout(),
            raw_mode_enabled: false,
        })
    }

    pub async fn setup(&mut self, title: &str) -> Result<()> {
        enable_raw_mode()?;
        self.raw_mode_enabled = true;
        execute!(
            self.stdout,
            EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            terminal::DisableLineWrap,
            terminal::SetTitle(title),
            cursor::Hide
        )?;
        Ok(())
    }

    /// Retitles the window after an interface language change.
    pub fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(self.stdout, terminal::SetTitle(title))?;
        Ok(())
    }

    pub async fn cleanup(&mut self) -> Result<()> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }

        execute!(
            self.stdout,
            terminal::Clear(ClearType::All),
            LeaveAlternateScreen,
            terminal::EnableLineWrap,
            ResetColor,
            cursor::Show,
            cursor::MoveTo(0, 0)
        )?;
        self.stdout.flush()?;
        log::info!("Terminal restored");
        Ok(())
    }

    pub fn is_raw_mode_enabled(&self) -> bool {
        self.raw_mode_enabled
    }
}

impl Drop for TerminalManager {
    fn drop(&mut self) {
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
            let _ = execute!(
                std::io::stdout(),
                terminal::LeaveAlternateScreen,
                cursor::Show,
                ResetColor
            );
            log::warn!("Emergency terminal cleanup in destructor");
        }
    }
}
