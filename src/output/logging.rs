// src/output/logging.rs - file logger
//
// The terminal belongs to ratatui, so log records go to a file next to
// the config instead of stderr.
use crate::core::constants::{CONFIG_DIR, LOG_FILE};
use crate::core::prelude::*;
use log::LevelFilter;
use std::fs::OpenOptions;
use std::path::PathBuf;

pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Log file beside the active config, or under `<exe dir>/.webchat/`.
pub fn log_file_path(config: &Config) -> PathBuf {
    if let Some(dir) = config.config_dir() {
        return dir.join(LOG_FILE);
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_DIR)))
        .unwrap_or_else(|| PathBuf::from(CONFIG_DIR))
        .join(LOG_FILE)
}

/// Installs the global logger. `RUST_LOG` overrides the configured level.
pub fn init(config: &Config) -> Result<PathBuf> {
    let path = log_file_path(config);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(AppError::Io)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(AppError::Io)?;

    env_logger::Builder::new()
        .filter_level(parse_level(&config.log_level))
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {:<5} {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .map_err(|e| AppError::Config(format!("Logger: {}", e)))?;

    Ok(path)
}
