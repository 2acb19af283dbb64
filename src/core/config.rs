// src/core/config.rs
use crate::core::constants::*;
use crate::core::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// TOML Configuration Structure
#[derive(Debug, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    general: GeneralConfig,
    #[serde(default)]
    backend: BackendConfigToml,
    #[serde(default)]
    timing: TimingConfigToml,
    #[serde(default)]
    language: LanguageConfigToml,
    #[serde(default)]
    translate: TranslateConfigToml,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeneralConfig {
    #[serde(default = "default_max_messages")]
    max_messages: usize,
    #[serde(default = "default_input_max_length")]
    input_max_length: usize,
    #[serde(default = "default_poll_rate")]
    poll_rate: u64,
    #[serde(default = "default_log_level")]
    log_level: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct BackendConfigToml {
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default = "default_timeout")]
    timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct TimingConfigToml {
    #[serde(default = "default_typing_cooldown")]
    typing_cooldown_ms: u64,
    #[serde(default = "default_send_disable_delay")]
    send_disable_delay_ms: u64,
    #[serde(default = "default_send_clear_delay")]
    send_clear_delay_ms: u64,
    #[serde(default = "default_scroll_settle")]
    scroll_settle_ms: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct LanguageConfigToml {
    #[serde(default)]
    current: String,
    #[serde(default)]
    source: LocaleSourceKind,
    #[serde(default = "default_available")]
    available: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TranslateConfigToml {
    #[serde(default = "default_targets")]
    targets: Vec<String>,
    #[serde(default = "default_target")]
    default_target: String,
}

/// Where locale bundles are fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleSourceKind {
    #[default]
    Remote,
    Embedded,
}

// Default Functions
fn default_max_messages() -> usize {
    DEFAULT_MAX_MESSAGES
}
fn default_input_max_length() -> usize {
    DEFAULT_INPUT_MAX_LENGTH
}
fn default_poll_rate() -> u64 {
    DEFAULT_POLL_RATE
}
fn default_log_level() -> String {
    "info".into()
}
fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_typing_cooldown() -> u64 {
    TYPING_COOLDOWN_MS
}
fn default_send_disable_delay() -> u64 {
    SEND_DISABLE_DELAY_MS
}
fn default_send_clear_delay() -> u64 {
    SEND_CLEAR_DELAY_MS
}
fn default_scroll_settle() -> u64 {
    SCROLL_SETTLE_MS
}
fn default_available() -> Vec<String> {
    AVAILABLE_LOCALES.iter().map(|s| s.to_string()).collect()
}
fn default_targets() -> Vec<String> {
    TARGET_LANGUAGES.iter().map(|s| s.to_string()).collect()
}
fn default_target() -> String {
    DEFAULT_TARGET_LANGUAGE.into()
}

crate::impl_default!(GeneralConfig, GeneralConfig {
    max_messages: default_max_messages(),
    input_max_length: default_input_max_length(),
    poll_rate: default_poll_rate(),
    log_level: default_log_level(),
});

crate::impl_default!(BackendConfigToml, BackendConfigToml {
    base_url: default_base_url(),
    timeout_secs: default_timeout(),
});

crate::impl_default!(TimingConfigToml, TimingConfigToml {
    typing_cooldown_ms: default_typing_cooldown(),
    send_disable_delay_ms: default_send_disable_delay(),
    send_clear_delay_ms: default_send_clear_delay(),
    scroll_settle_ms: default_scroll_settle(),
});

crate::impl_default!(LanguageConfigToml, LanguageConfigToml {
    current: String::new(),
    source: LocaleSourceKind::default(),
    available: default_available(),
});

crate::impl_default!(TranslateConfigToml, TranslateConfigToml {
    targets: default_targets(),
    default_target: default_target(),
});

// Main Configuration Structures
#[derive(Debug, Clone)]
pub struct Config {
    config_path: Option<PathBuf>,
    pub max_messages: usize,
    pub input_max_length: usize,
    pub poll_rate: Duration,
    pub log_level: String,
    pub backend: BackendConfig,
    pub timing: TimingConfig,
    pub language: LanguageConfig,
    pub translate: TranslateConfig,
    pub debug_info: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Copy)]
pub struct TimingConfig {
    pub typing_cooldown: Duration,
    pub send_disable_delay: Duration,
    pub send_clear_delay: Duration,
    pub scroll_settle: Duration,
}

#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// Persisted interface locale; `None` when the user never chose one.
    pub preferred: Option<String>,
    pub source: LocaleSourceKind,
    pub available: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TranslateConfig {
    pub targets: Vec<String>,
    pub default_target: String,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            typing_cooldown: Duration::from_millis(TYPING_COOLDOWN_MS),
            send_disable_delay: Duration::from_millis(SEND_DISABLE_DELAY_MS),
            send_clear_delay: Duration::from_millis(SEND_CLEAR_DELAY_MS),
            scroll_settle: Duration::from_millis(SCROLL_SETTLE_MS),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_file_model(ConfigFile::default(), None)
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            backend: BackendConfigToml::default(),
            timing: TimingConfigToml::default(),
            language: LanguageConfigToml::default(),
            translate: TranslateConfigToml::default(),
        }
    }
}

impl Config {
    pub async fn load() -> Result<Self> {
        Self::load_with_messages(true).await
    }

    pub async fn load_with_messages(show_messages: bool) -> Result<Self> {
        // Try existing configs
        for path in crate::setup::setup_toml::get_config_paths() {
            if path.exists() {
                match Self::from_file(&path).await {
                    Ok(config) => {
                        if show_messages {
                            config.log_startup();
                        }
                        return Ok(config);
                    }
                    Err(e) => log::warn!("Skipping config {}: {}", path.display(), e),
                }
            }
        }

        // Create new config
        let path = crate::setup::setup_toml::ensure_config_exists().await?;
        let mut config = Self::from_file(&path).await?;

        config.debug_info = Some(format!("New config: {}", path.display()));
        if show_messages {
            config.log_startup();
        }
        Ok(config)
    }

    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(AppError::Io)?;
        let file: ConfigFile =
            toml::from_str(&content).map_err(|e| AppError::Config(format!("TOML: {}", e)))?;

        let poll_rate = Self::clamp(file.general.poll_rate, MIN_POLL_RATE, MAX_POLL_RATE, DEFAULT_POLL_RATE);
        let needs_fix = poll_rate != file.general.poll_rate;

        let mut file = file;
        file.general.poll_rate = poll_rate;
        let config = Self::from_file_model(file, Some(path.as_ref().to_path_buf()));

        // Auto-save corrected values
        if needs_fix {
            if let Err(e) = config.save().await {
                log::warn!("Could not write corrected config: {}", e);
            }
        }

        Ok(config)
    }

    fn from_file_model(file: ConfigFile, config_path: Option<PathBuf>) -> Self {
        let preferred = Some(file.language.current.trim().to_string()).filter(|s| !s.is_empty());

        let mut targets = file.translate.targets;
        if targets.is_empty() {
            targets = default_targets();
        }
        let default_target = if targets.contains(&file.translate.default_target) {
            file.translate.default_target
        } else {
            targets[0].clone()
        };

        let mut available = file.language.available;
        if available.is_empty() {
            available = default_available();
        }

        Self {
            config_path,
            max_messages: file.general.max_messages.max(1),
            input_max_length: file.general.input_max_length.max(1),
            poll_rate: Duration::from_millis(file.general.poll_rate),
            log_level: file.general.log_level,
            backend: BackendConfig {
                base_url: file.backend.base_url.trim_end_matches('/').to_string(),
                timeout: Duration::from_secs(file.backend.timeout_secs.max(1)),
            },
            timing: TimingConfig {
                typing_cooldown: Duration::from_millis(file.timing.typing_cooldown_ms),
                send_disable_delay: Duration::from_millis(file.timing.send_disable_delay_ms),
                send_clear_delay: Duration::from_millis(
                    file.timing.send_clear_delay_ms.max(file.timing.send_disable_delay_ms),
                ),
                scroll_settle: Duration::from_millis(file.timing.scroll_settle_ms),
            },
            language: LanguageConfig {
                preferred,
                source: file.language.source,
                available,
            },
            translate: TranslateConfig {
                targets,
                default_target,
            },
            debug_info: None,
        }
    }

    pub async fn save(&self) -> Result<()> {
        let Some(path) = &self.config_path else {
            return Ok(());
        };

        let file = ConfigFile {
            general: GeneralConfig {
                max_messages: self.max_messages,
                input_max_length: self.input_max_length,
                poll_rate: self.poll_rate.as_millis() as u64,
                log_level: self.log_level.clone(),
            },
            backend: BackendConfigToml {
                base_url: self.backend.base_url.clone(),
                timeout_secs: self.backend.timeout.as_secs(),
            },
            timing: TimingConfigToml {
                typing_cooldown_ms: self.timing.typing_cooldown.as_millis() as u64,
                send_disable_delay_ms: self.timing.send_disable_delay.as_millis() as u64,
                send_clear_delay_ms: self.timing.send_clear_delay.as_millis() as u64,
                scroll_settle_ms: self.timing.scroll_settle.as_millis() as u64,
            },
            language: LanguageConfigToml {
                current: self.language.preferred.clone().unwrap_or_default(),
                source: self.language.source,
                available: self.language.available.clone(),
            },
            translate: TranslateConfigToml {
                targets: self.translate.targets.clone(),
                default_target: self.translate.default_target.clone(),
            },
        };

        let content = toml::to_string_pretty(&file)
            .map_err(|e| AppError::Config(format!("TOML: {}", e)))?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(AppError::Io)?;
        }
        tokio::fs::write(path, content)
            .await
            .map_err(AppError::Io)?;
        Ok(())
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Directory holding the config file; log files live next to it.
    pub fn config_dir(&self) -> Option<&Path> {
        self.config_path.as_deref().and_then(Path::parent)
    }

    fn clamp(value: u64, min: u64, max: u64, default: u64) -> u64 {
        if value < min || value > max {
            default
        } else {
            value
        }
    }

    pub fn log_startup(&self) {
        log::info!(
            "Config loaded: backend={} locale source={:?} preferred={}",
            self.backend.base_url,
            self.language.source,
            self.language.preferred.as_deref().unwrap_or("-")
        );
        if let Some(info) = &self.debug_info {
            log::debug!("{}", info);
        }
    }
}
