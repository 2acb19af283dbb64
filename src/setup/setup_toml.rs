// src/setup/setup_toml.rs - default config and search paths

use crate::core::constants::{CONFIG_DIR, CONFIG_FILE};
use crate::core::prelude::*;
use std::path::PathBuf;
use tokio::fs;

const DEFAULT_CONFIG: &str = r#"[general]
max_messages = 200
input_max_length = 500
# Poll-Rate: 16ms = 60 FPS (allowed: 16-1000)
poll_rate = 16
log_level = "info"

[backend]
base_url = "http://127.0.0.1:5000"
timeout_secs = 60

[timing]
# Minimum gap between two typing signals
typing_cooldown_ms = 1000
# Sent text stays visible this long before the input locks
send_disable_delay_ms = 10
# Input is cleared and unlocked after this delay
send_clear_delay_ms = 1000
scroll_settle_ms = 50

[language]
# Interface language chosen by the user (empty = detect from system)
current = ""
# "remote" = GET <base_url>/static/lang/<code>.json, "embedded" = built-in bundles
source = "remote"
available = ["en-US", "zh-CN", "ja-JP"]

[translate]
targets = ["English", "Chinese", "Japanese", "Korean", "French", "German", "Spanish", "Russian"]
default_target = "English"
"#;

pub async fn ensure_config_exists() -> Result<PathBuf> {
    let exe_path = std::env::current_exe().map_err(AppError::Io)?;
    let base_dir = exe_path
        .parent()
        .ok_or_else(|| AppError::Validation("Cannot determine program directory".into()))?;

    let config_dir = base_dir.join(CONFIG_DIR);
    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)
            .await
            .map_err(AppError::Io)?;
        log::debug!("Config directory created: {}", config_dir.display());
    }

    let config_path = config_dir.join(CONFIG_FILE);
    if !config_path.exists() {
        write_default_config(&config_path).await?;
        log::info!("Config file created: {}", config_path.display());
    }

    Ok(config_path)
}

pub async fn write_default_config(path: &std::path::Path) -> Result<()> {
    fs::write(path, DEFAULT_CONFIG)
        .await
        .map_err(AppError::Io)
}

pub fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(base_dir) = exe_path.parent() {
            paths.push(base_dir.join(CONFIG_DIR).join(CONFIG_FILE));
            paths.push(base_dir.join(CONFIG_FILE));
            paths.push(base_dir.join("config").join(CONFIG_FILE));
        }
    }
    #[cfg(debug_assertions)]
    {
        paths.push(PathBuf::from(CONFIG_FILE));
    }
    paths
}
