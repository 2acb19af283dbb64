// src/i18n/mod.rs
pub mod bundle;
pub mod error;
pub mod persistence;
pub mod resolver;
pub mod source;
pub mod store;

pub use bundle::LocaleBundle;
pub use error::LocaleError;
pub use persistence::{PreferenceStore, TomlPreferenceStore};
pub use resolver::{resolve_startup_locale, Resolution, ResolutionOrigin};
pub use source::{EmbeddedSource, LocaleSource, RemoteSource};
pub use store::LocalizationStore;
