pub const APP_TITLE: &str = "WEBCHAT";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const CONFIG_DIR: &str = ".webchat";
pub const CONFIG_FILE: &str = "webchat.toml";
pub const LOG_FILE: &str = "webchat.log";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_MESSAGES: usize = 200;
pub const DEFAULT_INPUT_MAX_LENGTH: usize = 500;
pub const DEFAULT_POLL_RATE: u64 = 16;
pub const MIN_POLL_RATE: u64 = 16;
pub const MAX_POLL_RATE: u64 = 1000;

pub const TYPING_COOLDOWN_MS: u64 = 1000;
pub const SEND_DISABLE_DELAY_MS: u64 = 10;
pub const SEND_CLEAR_DELAY_MS: u64 = 1000;
pub const SCROLL_SETTLE_MS: u64 = 50;

/// Locale used when neither the preference nor the system locale can be loaded.
pub const DEFAULT_LOCALE: &str = "zh-CN";

/// Primary subtag -> locale code tried after an exact system-locale miss.
pub const PRIMARY_SUBTAG_MAP: &[(&str, &str)] = &[("ja", "ja-JP"), ("zh", "zh-CN"), ("en", "en-US")];

pub const AVAILABLE_LOCALES: &[&str] = &["en-US", "zh-CN", "ja-JP"];

pub const TARGET_LANGUAGES: &[&str] = &[
    "English", "Chinese", "Japanese", "Korean", "French", "German", "Spanish", "Russian",
];
pub const DEFAULT_TARGET_LANGUAGE: &str = "English";
