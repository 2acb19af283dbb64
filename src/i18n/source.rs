// src/i18n/source.rs - where locale bundles come from
use super::bundle::LocaleBundle;
use super::error::LocaleError;
use crate::core::config::{Config, LocaleSourceKind};
use futures::future::{BoxFuture, FutureExt};
use rust_embed::RustEmbed;
use std::sync::Arc;

#[derive(RustEmbed)]
#[folder = "src/i18n/langs/"]
pub struct Langs;

/// Fetches the bundle for one locale code. The returned future owns
/// everything it needs so it can be spawned.
pub trait LocaleSource: Send + Sync {
    fn fetch(&self, code: &str) -> BoxFuture<'static, Result<LocaleBundle, LocaleError>>;
}

/// Locale codes end up in URLs and file names.
pub fn validate_code(code: &str) -> Result<(), LocaleError> {
    let valid = !code.is_empty()
        && code.len() <= 35
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(LocaleError::InvalidCode(code.into()))
    }
}

/// `GET {base_url}/static/lang/{code}.json`
pub struct RemoteSource {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteSource {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, code: &str) -> String {
        format!("{}/static/lang/{}.json", self.base_url, code)
    }
}

impl LocaleSource for RemoteSource {
    fn fetch(&self, code: &str) -> BoxFuture<'static, Result<LocaleBundle, LocaleError>> {
        if let Err(e) = validate_code(code) {
            return futures::future::ready(Err(e)).boxed();
        }

        let client = self.client.clone();
        let url = self.url_for(code);
        let code = code.to_string();

        async move {
            log::debug!("Fetching locale bundle {}", url);
            let response = client.get(&url).send().await.map_err(|e| LocaleError::Fetch {
                code: code.clone(),
                message: e.to_string(),
            })?;

            let status = response.status();
            if !status.is_success() {
                return Err(LocaleError::Unavailable {
                    code,
                    status: Some(status.as_u16()),
                });
            }

            let text = response.text().await.map_err(|e| LocaleError::Fetch {
                code: code.clone(),
                message: e.to_string(),
            })?;
            LocaleBundle::from_json(&code, &text)
        }
        .boxed()
    }
}

/// Bundles compiled into the binary from `src/i18n/langs/`.
#[derive(Debug, Default)]
pub struct EmbeddedSource;

impl EmbeddedSource {
    pub fn available() -> Vec<String> {
        let mut codes: Vec<String> = Langs::iter()
            .filter_map(|f| f.as_ref().strip_suffix(".json").map(str::to_string))
            .collect();
        codes.sort();
        codes
    }

    fn load(code: &str) -> Result<LocaleBundle, LocaleError> {
        validate_code(code)?;
        let filename = format!("{}.json", code);
        let content = Langs::get(&filename).ok_or_else(|| LocaleError::Unavailable {
            code: code.into(),
            status: None,
        })?;

        let text = std::str::from_utf8(content.data.as_ref()).map_err(|e| LocaleError::Parse {
            code: code.into(),
            message: e.to_string(),
        })?;
        LocaleBundle::from_json(code, text)
    }
}

impl LocaleSource for EmbeddedSource {
    fn fetch(&self, code: &str) -> BoxFuture<'static, Result<LocaleBundle, LocaleError>> {
        futures::future::ready(Self::load(code)).boxed()
    }
}

pub fn source_from_config(config: &Config, client: reqwest::Client) -> Arc<dyn LocaleSource> {
    match config.language.source {
        LocaleSourceKind::Remote => Arc::new(RemoteSource::new(client, &config.backend.base_url)),
        LocaleSourceKind::Embedded => Arc::new(EmbeddedSource),
    }
}
