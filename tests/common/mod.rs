// tests/common/mod.rs - in-memory doubles shared by the integration tests
#![allow(dead_code)]

use futures::future::{BoxFuture, FutureExt};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use webchat_client::chat::ChatBackend;
use webchat_client::i18n::{LocaleBundle, LocaleError, LocaleSource};
use webchat_client::{AppError, ChatSession, Config, LocalizationStore, PreferenceStore, Result};

pub const EN_US: &str = r#"{
    "appTitle": "Chat",
    "charCount": " chars",
    "translating": "Translating...",
    "translationFailed": "Translation failed",
    "emptyMessage": "Enter a message first",
    "emptyTranslation": "Nothing to combine",
    "unableToLoadLanguage": "Cannot load {0}",
    "languages": { "English": "English", "Japanese": "Japanese" }
}"#;

pub const ZH_CN: &str = r#"{
    "appTitle": "聊天",
    "charCount": " 个字符",
    "translating": "翻译中...",
    "emptyMessage": "请先输入消息"
}"#;

pub const JA_JP: &str = r#"{
    "appTitle": "チャット",
    "charCount": " 文字",
    "translating": "翻訳中..."
}"#;

#[derive(Default)]
pub struct RecordingBackend {
    pub typing: Mutex<usize>,
    pub messages: Mutex<Vec<String>>,
    pub translations: Mutex<Vec<(String, String)>>,
    /// Scripted translate replies, consumed in order: (delay, reply).
    pub replies: Mutex<VecDeque<(Duration, Result<String>)>>,
}

impl RecordingBackend {
    pub fn reply(&self, delay_ms: u64, reply: Result<String>) {
        self.replies
            .lock()
            .unwrap()
            .push_back((Duration::from_millis(delay_ms), reply));
    }

    pub fn typing_count(&self) -> usize {
        *self.typing.lock().unwrap()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn translations(&self) -> Vec<(String, String)> {
        self.translations.lock().unwrap().clone()
    }
}

impl ChatBackend for RecordingBackend {
    fn send_typing(&self) -> BoxFuture<'static, Result<()>> {
        *self.typing.lock().unwrap() += 1;
        futures::future::ready(Ok(())).boxed()
    }

    fn send_message(&self, text: &str) -> BoxFuture<'static, Result<()>> {
        self.messages.lock().unwrap().push(text.to_string());
        futures::future::ready(Ok(())).boxed()
    }

    fn translate(&self, text: &str, target_language: &str) -> BoxFuture<'static, Result<String>> {
        self.translations
            .lock()
            .unwrap()
            .push((text.to_string(), target_language.to_string()));
        let (delay, reply) = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or((Duration::from_millis(5), Ok(format!("[{}] {}", target_language, text))));
        async move {
            tokio::time::sleep(delay).await;
            reply
        }
        .boxed()
    }
}

pub struct MemorySource {
    docs: HashMap<String, String>,
    pub requested: Mutex<Vec<String>>,
}

impl MemorySource {
    pub fn new(docs: &[(&str, &str)]) -> Self {
        Self {
            docs: docs
                .iter()
                .map(|(code, doc)| (code.to_string(), doc.to_string()))
                .collect(),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl LocaleSource for MemorySource {
    fn fetch(&self, code: &str) -> BoxFuture<'static, std::result::Result<LocaleBundle, LocaleError>> {
        self.requested.lock().unwrap().push(code.to_string());
        let result = match self.docs.get(code) {
            Some(doc) => LocaleBundle::from_json(code, doc),
            None => Err(LocaleError::Unavailable {
                code: code.to_string(),
                status: Some(404),
            }),
        };
        futures::future::ready(result).boxed()
    }
}

#[derive(Default)]
pub struct MemoryPreferences {
    pub stored: Mutex<Option<String>>,
    pub saved: Mutex<Vec<String>>,
    pub broken: bool,
}

impl MemoryPreferences {
    pub fn with(code: &str) -> Self {
        Self {
            stored: Mutex::new(Some(code.to_string())),
            ..Self::default()
        }
    }

    pub fn saved(&self) -> Vec<String> {
        self.saved.lock().unwrap().clone()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn load(&self) -> BoxFuture<'static, Result<Option<String>>> {
        let result = if self.broken {
            Err(AppError::Config("unreadable".into()))
        } else {
            Ok(self.stored.lock().unwrap().clone())
        };
        futures::future::ready(result).boxed()
    }

    fn save(&self, code: &str) -> BoxFuture<'static, Result<()>> {
        *self.stored.lock().unwrap() = Some(code.to_string());
        self.saved.lock().unwrap().push(code.to_string());
        futures::future::ready(Ok(())).boxed()
    }
}

pub struct Harness {
    pub session: ChatSession,
    pub backend: Arc<RecordingBackend>,
    pub source: Arc<MemorySource>,
    pub preferences: Arc<MemoryPreferences>,
}

pub fn harness(docs: &[(&str, &str)], preferences: MemoryPreferences) -> Harness {
    let mut config = Config::default();
    config.language.available = vec!["en-US".into(), "zh-CN".into(), "ja-JP".into()];

    let backend = Arc::new(RecordingBackend::default());
    let source = Arc::new(MemorySource::new(docs));
    let preferences = Arc::new(preferences);
    let store = LocalizationStore::new(source.clone());
    let session = ChatSession::new(&config, store, backend.clone(), preferences.clone());

    Harness {
        session,
        backend,
        source,
        preferences,
    }
}

/// Started session with English active and all three bundles available.
pub async fn english_session() -> Harness {
    let mut h = harness(
        &[("en-US", EN_US), ("zh-CN", ZH_CN), ("ja-JP", JA_JP)],
        MemoryPreferences::with("en-US"),
    );
    h.session.start(None).await;
    h
}

/// Lets virtual time pass, then applies every completion that arrived.
pub async fn advance(session: &mut ChatSession, ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    session.process_pending();
}
