// src/i18n/resolver.rs - startup locale selection
use super::store::LocalizationStore;
use crate::core::constants::{DEFAULT_LOCALE, PRIMARY_SUBTAG_MAP};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionOrigin {
    Preference,
    System,
    PrimarySubtag,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub locale: String,
    pub origin: ResolutionOrigin,
    /// False when not even the default bundle could be loaded.
    pub loaded: bool,
}

/// Order: stored preference > exact system locale > mapped primary
/// subtag > `DEFAULT_LOCALE`. A stored preference is used as-is even
/// when its bundle cannot be loaded (lookups then show raw keys). Sets
/// the active locale on `store`; never persists the outcome.
pub async fn resolve_startup_locale(
    store: &mut LocalizationStore,
    preferred: Option<&str>,
    system: Option<&str>,
) -> Resolution {
    let resolution = resolve_chain(store, preferred, system).await;
    store.set_active(&resolution.locale);
    resolution
}

async fn resolve_chain(
    store: &mut LocalizationStore,
    preferred: Option<&str>,
    system: Option<&str>,
) -> Resolution {
    if let Some(code) = preferred.map(str::trim).filter(|c| !c.is_empty()) {
        let loaded = store.load(code).await.is_ok();
        if loaded {
            log::info!("Using preferred language: {}", code);
        } else {
            log::error!(
                "Preferred language {} could not be loaded, showing untranslated keys",
                code
            );
        }
        return Resolution {
            locale: code.to_string(),
            origin: ResolutionOrigin::Preference,
            loaded,
        };
    }

    if let Some(system) = system.and_then(normalize_locale) {
        log::info!("Detected system language: {}", system);
        if store.load(&system).await.is_ok() {
            return found(&system, ResolutionOrigin::System);
        }

        let mapped = map_primary_subtag(&system);
        log::info!("Mapping primary language of {} to {}", system, mapped);
        if mapped != system && store.load(&mapped).await.is_ok() {
            return found(&mapped, ResolutionOrigin::PrimarySubtag);
        }
        log::info!("No translation available for {}, using default {}", system, DEFAULT_LOCALE);
    }

    let loaded = store.load(DEFAULT_LOCALE).await.is_ok();
    if !loaded {
        log::error!(
            "Default language {} could not be loaded, showing untranslated keys",
            DEFAULT_LOCALE
        );
    }
    Resolution {
        locale: DEFAULT_LOCALE.to_string(),
        origin: ResolutionOrigin::Default,
        loaded,
    }
}

fn found(code: &str, origin: ResolutionOrigin) -> Resolution {
    Resolution {
        locale: code.to_string(),
        origin,
        loaded: true,
    }
}

/// Primary subtag (text before the first '-') through the fixed table,
/// or verbatim when unmapped.
pub fn map_primary_subtag(code: &str) -> String {
    let primary = code.split('-').next().unwrap_or(code);
    PRIMARY_SUBTAG_MAP
        .iter()
        .find(|(subtag, _)| subtag.eq_ignore_ascii_case(primary))
        .map(|(_, mapped)| mapped.to_string())
        .unwrap_or_else(|| primary.to_string())
}

/// Turns OS forms like `ja_JP.UTF-8` or `de_DE@euro` into `ja-JP` / `de-DE`.
/// `C` and `POSIX` carry no language.
pub fn normalize_locale(raw: &str) -> Option<String> {
    let base = raw
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim()
        .replace('_', "-");

    if base.is_empty() || base.eq_ignore_ascii_case("c") || base.eq_ignore_ascii_case("posix") {
        return None;
    }
    Some(base)
}

pub fn system_locale() -> Option<String> {
    sys_locale::get_locale()
}
