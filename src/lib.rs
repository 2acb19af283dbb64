#[macro_export]
macro_rules! impl_default {
    ($type:ty, $body:expr) => {
        impl Default for $type {
            fn default() -> Self {
                $body
            }
        }
    };
}

// Module definitions
pub mod chat;
pub mod core;
pub mod i18n;
pub mod input;
pub mod output;
pub mod setup;
pub mod ui;
pub mod view;

// Essential re-exports
pub use chat::{ChatBackend, ChatSession, HttpBackend};
pub use core::config::Config;
pub use core::error::{AppError, Result};
pub use i18n::{LocalizationStore, PreferenceStore, TomlPreferenceStore};

use std::sync::Arc;

/// Wires config, backend, locale source and preference storage into a
/// session and resolves the startup language.
pub async fn build_session(config: &Config) -> Result<ChatSession> {
    let client = HttpBackend::build_client(config)?;
    let backend: Arc<dyn ChatBackend> =
        Arc::new(HttpBackend::new(client.clone(), &config.backend.base_url));
    let store = LocalizationStore::new(i18n::source::source_from_config(config, client));

    let preference_path = match config.config_path() {
        Some(path) => path.to_path_buf(),
        None => setup::setup_toml::ensure_config_exists().await?,
    };
    let preferences: Arc<dyn PreferenceStore> = Arc::new(TomlPreferenceStore::new(preference_path));

    let mut session = ChatSession::new(config, store, backend, preferences);
    let system = i18n::resolver::system_locale();
    let resolution = session.start(system.as_deref()).await;
    if !resolution.loaded {
        log::error!("No language bundle available, labels fall back to keys");
    }
    Ok(session)
}

// Main entry point
pub async fn run() -> Result<()> {
    let config = Config::load_with_messages(false).await?;
    let log_path = output::logging::init(&config)?;
    log::info!(
        "{} v{} starting, log file {}",
        core::constants::APP_TITLE,
        core::constants::VERSION,
        log_path.display()
    );
    config.log_startup();

    let session = build_session(&config).await?;
    let mut screen = ui::screen::ScreenManager::new(&config, session).await?;
    screen.run().await
}
