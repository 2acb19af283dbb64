// Core essentials
pub use crate::core::config::Config;
pub use crate::core::error::{AppError, Result};

// Standard library essentials
pub use std::io::{self, Write};
pub use std::time::Duration;

// Crossterm basics
pub use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// Async plumbing shared by backend and locale sources
pub use futures::future::BoxFuture;
