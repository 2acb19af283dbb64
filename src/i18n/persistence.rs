// src/i18n/persistence.rs - durable interface-language preference

use crate::core::prelude::*;
use futures::future::FutureExt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use toml_edit::{value, Document};

/// Durable storage for the one preferred-locale value.
pub trait PreferenceStore: Send + Sync {
    fn load(&self) -> BoxFuture<'static, Result<Option<String>>>;
    fn save(&self, code: &str) -> BoxFuture<'static, Result<()>>;
}

/// Keeps the preference as `[language] current` in the config file.
/// Edits the document in place so comments and other sections survive.
///
/// Saves run one at a time and the most recently requested value wins:
/// a save that gets the file lock after a newer one has been written is
/// skipped.
#[derive(Debug, Clone)]
pub struct TomlPreferenceStore {
    path: PathBuf,
    requested: Arc<AtomicU64>,
    written: Arc<Mutex<u64>>,
}

impl TomlPreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            requested: Arc::new(AtomicU64::new(0)),
            written: Arc::new(Mutex::new(0)),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    async fn read_document(path: &std::path::Path) -> Result<Document> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(AppError::Io(e)),
        };
        content
            .parse::<Document>()
            .map_err(|e| AppError::Config(format!("TOML: {}", e)))
    }

    fn extract(document: &Document) -> Option<String> {
        document
            .get("language")
            .and_then(|language| language.get("current"))
            .and_then(|current| current.as_str())
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_string)
    }
}

impl PreferenceStore for TomlPreferenceStore {
    fn load(&self) -> BoxFuture<'static, Result<Option<String>>> {
        let path = self.path.clone();
        async move {
            let document = Self::read_document(&path).await?;
            Ok(Self::extract(&document))
        }
        .boxed()
    }

    fn save(&self, code: &str) -> BoxFuture<'static, Result<()>> {
        let path = self.path.clone();
        let code = code.to_string();
        let generation = self.requested.fetch_add(1, Ordering::SeqCst) + 1;
        let written = Arc::clone(&self.written);
        async move {
            let mut written = written.lock().await;
            if *written > generation {
                log::debug!("Skipping superseded save of language '{}'", code);
                return Ok(());
            }

            let rendered = {
                let mut document = Self::read_document(&path).await?;
                if document.get("language").is_some_and(|item| !item.is_table_like()) {
                    return Err(AppError::Config("[language] is not a table".into()));
                }
                document["language"]["current"] = value(code.as_str());
                document.to_string()
            };

            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(AppError::Io)?;
            }
            tokio::fs::write(&path, rendered)
                .await
                .map_err(AppError::Io)?;
            *written = generation;

            log::debug!("Language '{}' saved to {}", code, path.display());
            Ok(())
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_has_no_preference() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlPreferenceStore::new(dir.path().join("absent.toml"));
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlPreferenceStore::new(dir.path().join("webchat.toml"));
        store.save("ja-JP").await.unwrap();
        assert_eq!(store.load().await.unwrap().as_deref(), Some("ja-JP"));

        store.save("en-US").await.unwrap();
        assert_eq!(store.load().await.unwrap().as_deref(), Some("en-US"));
    }

    #[tokio::test]
    async fn test_save_keeps_comments_and_other_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("webchat.toml");
        tokio::fs::write(
            &path,
            "# my settings\n[backend]\nbase_url = \"http://x\"\n\n[language]\n# pick one\ncurrent = \"\"\n",
        )
        .await
        .unwrap();

        let store = TomlPreferenceStore::new(&path);
        assert_eq!(store.load().await.unwrap(), None);
        store.save("zh-CN").await.unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(content.contains("# my settings"));
        assert!(content.contains("base_url = \"http://x\""));
        assert!(content.contains("current = \"zh-CN\""));

        let config = Config::from_file(&path).await.unwrap();
        assert_eq!(config.language.preferred.as_deref(), Some("zh-CN"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_saves_keep_latest_language() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("webchat.toml");
        let store = TomlPreferenceStore::new(&path);

        for _ in 0..50 {
            let first = tokio::spawn(store.save("ja-JP"));
            let second = tokio::spawn(store.save("zh-CN"));
            second.await.unwrap().unwrap();
            first.await.unwrap().unwrap();
            assert_eq!(store.load().await.unwrap().as_deref(), Some("zh-CN"));
        }

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(content.matches("current").count(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_save_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlPreferenceStore::new(dir.path().join("webchat.toml"));
        let clone = store.clone();

        let older = store.save("ja-JP");
        let newer = clone.save("en-US");
        newer.await.unwrap();
        older.await.unwrap();
        assert_eq!(store.load().await.unwrap().as_deref(), Some("en-US"));
    }

    #[tokio::test]
    async fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("webchat.toml");
        tokio::fs::write(&path, "[language\n").await.unwrap();
        let store = TomlPreferenceStore::new(&path);
        assert!(matches!(store.load().await, Err(AppError::Config(_))));
    }
}
