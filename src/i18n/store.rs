// src/i18n/store.rs
use super::bundle::LocaleBundle;
use super::error::LocaleError;
use super::source::LocaleSource;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::sync::Arc;

/// Session-scoped bundle cache plus the active locale.
///
/// Bundles are never evicted. Text lookups fall back to the raw key when
/// the active locale has no cached bundle or the key is missing, so an
/// incomplete translation shows key identifiers instead of failing.
pub struct LocalizationStore {
    source: Arc<dyn LocaleSource>,
    cache: HashMap<String, Arc<LocaleBundle>>,
    active: Option<String>,
}

impl LocalizationStore {
    pub fn new(source: Arc<dyn LocaleSource>) -> Self {
        Self {
            source,
            cache: HashMap::new(),
            active: None,
        }
    }

    /// Returns the cached bundle or fetches and caches it. Failures leave
    /// no cache entry.
    pub async fn load(&mut self, code: &str) -> Result<Arc<LocaleBundle>, LocaleError> {
        if let Some(bundle) = self.cache.get(code) {
            return Ok(Arc::clone(bundle));
        }

        match self.source.fetch(code).await {
            Ok(bundle) => {
                log::debug!("Locale {} loaded ({} keys)", code, bundle.len());
                Ok(self.insert(bundle))
            }
            Err(e) => {
                log::warn!("Error loading language resource {}: {}", code, e);
                Err(e)
            }
        }
    }

    /// Fetch without touching the cache; the caller inserts the result
    /// once the future completes.
    pub fn fetch(&self, code: &str) -> BoxFuture<'static, Result<LocaleBundle, LocaleError>> {
        self.source.fetch(code)
    }

    pub fn insert(&mut self, bundle: LocaleBundle) -> Arc<LocaleBundle> {
        let bundle = Arc::new(bundle);
        self.cache
            .entry(bundle.code().to_string())
            .or_insert_with(|| Arc::clone(&bundle))
            .clone()
    }

    pub fn is_cached(&self, code: &str) -> bool {
        self.cache.contains_key(code)
    }

    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn set_active(&mut self, code: &str) {
        if !self.is_cached(code) {
            log::debug!("Activating {} without a cached bundle, raw keys will show", code);
        }
        self.active = Some(code.to_string());
    }

    fn active_bundle(&self) -> Option<&LocaleBundle> {
        self.active
            .as_ref()
            .and_then(|code| self.cache.get(code))
            .map(Arc::as_ref)
    }

    pub fn lookup(&self, key: &str) -> Option<String> {
        self.active_bundle()?.lookup(key)
    }

    pub fn resolve(&self, key: &str) -> String {
        self.lookup(key).unwrap_or_else(|| key.to_string())
    }

    /// `resolve` plus positional `{0}`/`{1}` (or bare `{}`) substitution.
    pub fn resolve_with(&self, key: &str, params: &[&str]) -> String {
        params
            .iter()
            .enumerate()
            .fold(self.resolve(key), |mut text, (i, param)| {
                let indexed = format!("{{{}}}", i);
                if text.contains(&indexed) {
                    text = text.replace(&indexed, param);
                } else if text.contains("{}") {
                    text = text.replacen("{}", param, 1);
                }
                text
            })
    }
}
