// tests/session_tests.rs - chat session behaviour against in-memory doubles
mod common;

use common::*;
use webchat_client::chat::{InputChange, Notice, SendOutcome, TranslationState};
use std::sync::Arc;
use std::time::Duration;
use webchat_client::i18n::ResolutionOrigin;
use webchat_client::{
    AppError, ChatSession, Config, LocalizationStore, PreferenceStore, TomlPreferenceStore,
};

#[tokio::test(start_paused = true)]
async fn test_whitespace_send_is_ignored() {
    let mut h = english_session().await;
    h.session.on_input_changed("   \t");

    assert_eq!(h.session.send(), SendOutcome::Empty);
    assert!(h.session.transcript().is_empty());
    assert!(h.backend.messages().is_empty());
    assert!(h.session.notice().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_send_locks_then_clears_input() {
    let mut h = english_session().await;
    h.session.on_input_changed("hi there");
    assert_eq!(h.session.labels().char_count, "8 chars");

    assert_eq!(h.session.send(), SendOutcome::Sent);
    assert_eq!(h.session.labels().char_count, "0 chars");
    assert_eq!(h.session.transcript().last().unwrap().content, "hi there");
    assert_eq!(h.backend.messages(), vec!["hi there"]);

    advance(&mut h.session, 20).await;
    assert!(!h.session.input_enabled());
    assert_eq!(h.session.input(), "hi there");

    advance(&mut h.session, 1000).await;
    assert!(h.session.input_enabled());
    assert!(h.session.can_send());
    assert_eq!(h.session.input(), "");
}

#[tokio::test(start_paused = true)]
async fn test_second_send_while_pending_is_busy() {
    let mut h = english_session().await;
    h.session.on_input_changed("first");
    assert_eq!(h.session.send(), SendOutcome::Sent);
    assert_eq!(h.session.send(), SendOutcome::Busy);
    assert_eq!(h.backend.messages(), vec!["first"]);
    assert_eq!(h.session.transcript().len(), 1);

    advance(&mut h.session, 1100).await;
    assert!(h.session.input_enabled());
    assert_eq!(h.session.input(), "");

    // the next send starts a fresh cycle
    h.session.on_input_changed("second");
    assert_eq!(h.session.send(), SendOutcome::Sent);
    advance(&mut h.session, 1100).await;
    assert_eq!(h.backend.messages(), vec!["first", "second"]);
    assert!(h.session.input_enabled());
}

#[tokio::test(start_paused = true)]
async fn test_typing_signal_throttled_by_cooldown() {
    let mut h = english_session().await;
    h.session.on_input_changed("h");
    h.session.on_input_changed("he");
    h.session.on_input_changed("hel");
    assert_eq!(h.backend.typing_count(), 1);

    advance(&mut h.session, 500).await;
    h.session.on_input_changed("hell");
    assert_eq!(h.backend.typing_count(), 1);

    advance(&mut h.session, 600).await;
    h.session.on_input_changed("hello");
    assert_eq!(h.backend.typing_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_translate_empty_input_raises_notice() {
    let mut h = english_session().await;
    h.session.on_input_changed("  ");

    assert!(h.session.translate().is_none());
    assert_eq!(h.session.notice(), Some(&Notice::EmptyMessage));
    assert_eq!(h.session.notice_text().as_deref(), Some("Enter a message first"));
    assert_eq!(h.session.translation_state(), &TranslationState::Idle);
    assert!(h.backend.translations().is_empty());

    assert!(h.session.dismiss_notice());
    assert!(h.session.notice().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_translate_shows_progress_then_result() {
    let mut h = english_session().await;
    h.backend.reply(100, Ok("こんにちは".into()));
    h.session.select_target("Japanese");
    h.session.on_input_changed("  hello ");

    let handle = h.session.translate().expect("request issued");
    assert_eq!(h.session.translation_display().as_deref(), Some("Translating..."));
    assert_eq!(
        h.backend.translations(),
        vec![("hello".to_string(), "Japanese".to_string())]
    );

    advance(&mut h.session, 150).await;
    assert_eq!(
        h.session.translation_state(),
        &TranslationState::Fulfilled {
            ticket: handle.ticket(),
            text: "こんにちは".into()
        }
    );
    assert_eq!(h.session.translation_display().as_deref(), Some("こんにちは"));
}

#[tokio::test(start_paused = true)]
async fn test_failed_translation_is_shown_and_composition_continues() {
    let mut h = english_session().await;
    h.backend.reply(10, Err(AppError::Backend("HTTP 502: bad gateway".into())));
    h.session.on_input_changed("hello");
    h.session.translate();

    advance(&mut h.session, 50).await;
    assert!(matches!(h.session.translation_state(), TranslationState::Failed { .. }));
    assert_eq!(h.session.translation_display().as_deref(), Some("Translation failed"));
    assert_eq!(h.session.send(), SendOutcome::Sent);
}

#[tokio::test(start_paused = true)]
async fn test_stale_translation_never_overwrites_newer() {
    let mut h = english_session().await;
    h.backend.reply(300, Ok("old".into()));
    h.backend.reply(50, Ok("new".into()));

    h.session.on_input_changed("first");
    h.session.translate();
    h.session.on_input_changed("second");
    h.session.translate();

    advance(&mut h.session, 100).await;
    assert_eq!(h.session.translation_display().as_deref(), Some("new"));

    advance(&mut h.session, 300).await;
    assert_eq!(h.session.translation_display().as_deref(), Some("new"));
}

#[tokio::test(start_paused = true)]
async fn test_combine_without_translation_changes_nothing() {
    let mut h = english_session().await;
    h.session.on_input_changed("hello");

    assert!(h.session.combine().is_none());
    assert_eq!(h.session.notice(), Some(&Notice::EmptyTranslation));
    assert_eq!(h.session.input(), "hello");
    assert!(h.session.transcript().is_empty());
    assert!(h.backend.messages().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_combine_without_input_changes_nothing() {
    let mut h = english_session().await;
    h.backend.reply(10, Ok("你好".into()));
    h.session.on_input_changed("hello");
    h.session.translate();
    advance(&mut h.session, 20).await;

    // editing only whitespace keeps the fulfilled translation
    h.session.on_input_changed("   ");
    assert!(h.session.combine().is_none());
    assert_eq!(h.session.notice(), Some(&Notice::EmptyTranslation));
    assert_eq!(h.session.translation_display().as_deref(), Some("你好"));
    assert!(h.backend.messages().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_combine_sends_original_with_translation() {
    let mut h = english_session().await;
    h.backend.reply(10, Ok(" 你好 ".into()));
    h.session.on_input_changed("hello ");
    h.session.translate();
    advance(&mut h.session, 20).await;

    assert_eq!(h.session.combine(), Some(SendOutcome::Sent));
    assert_eq!(h.session.input(), "hello (你好)");
    assert_eq!(h.backend.messages(), vec!["hello (你好)"]);
    assert_eq!(h.session.transcript().last().unwrap().content, "hello (你好)");
    assert_eq!(h.session.translation_state(), &TranslationState::Idle);

    advance(&mut h.session, 1100).await;
    assert_eq!(h.session.input(), "");
}

#[tokio::test(start_paused = true)]
async fn test_clearing_input_discards_translation() {
    let mut h = english_session().await;
    h.backend.reply(100, Ok("late".into()));
    h.session.on_input_changed("hello");
    h.session.translate();

    assert_eq!(h.session.on_input_changed(""), InputChange::Cleared);
    assert_eq!(h.session.translation_state(), &TranslationState::Idle);

    advance(&mut h.session, 200).await;
    assert_eq!(h.session.translation_state(), &TranslationState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_startup_prefers_stored_language_without_persisting() {
    let mut h = harness(
        &[("en-US", EN_US), ("ja-JP", JA_JP)],
        MemoryPreferences::with("en-US"),
    );
    let resolution = h.session.start(Some("ja-JP")).await;

    assert_eq!(resolution.locale, "en-US");
    assert_eq!(resolution.origin, ResolutionOrigin::Preference);
    assert_eq!(h.session.labels().title, "Chat");
    assert!(h.preferences.saved().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_startup_keeps_unloadable_stored_language() {
    let mut h = harness(
        &[("en-US", EN_US), ("zh-CN", ZH_CN)],
        MemoryPreferences::with("ko-KR"),
    );
    let resolution = h.session.start(Some("en-US")).await;

    assert_eq!(resolution.locale, "ko-KR");
    assert_eq!(resolution.origin, ResolutionOrigin::Preference);
    assert!(!resolution.loaded);
    assert_eq!(h.session.active_locale(), Some("ko-KR"));
    assert_eq!(h.session.labels().title, "appTitle");
    assert_eq!(h.source.requested(), vec!["ko-KR"]);
    assert!(h.preferences.saved().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_startup_unknown_system_locale_uses_default() {
    let mut h = harness(
        &[("en-US", EN_US), ("zh-CN", ZH_CN)],
        MemoryPreferences::default(),
    );
    let resolution = h.session.start(Some("fr-FR")).await;

    assert_eq!(resolution.locale, "zh-CN");
    assert_eq!(resolution.origin, ResolutionOrigin::Default);
    assert_eq!(h.session.active_locale(), Some("zh-CN"));
    assert_eq!(h.session.labels().title, "聊天");
    assert_eq!(h.source.requested(), vec!["fr-FR", "fr", "zh-CN"]);
}

#[tokio::test(start_paused = true)]
async fn test_startup_maps_primary_subtag() {
    let mut h = harness(&[("ja-JP", JA_JP), ("zh-CN", ZH_CN)], MemoryPreferences::default());
    let resolution = h.session.start(Some("ja")).await;

    assert_eq!(resolution.locale, "ja-JP");
    assert_eq!(resolution.origin, ResolutionOrigin::PrimarySubtag);
    assert_eq!(h.source.requested(), vec!["ja", "ja-JP"]);
    assert!(h.preferences.saved().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_startup_survives_unreadable_preference() {
    let mut h = harness(
        &[("ja-JP", JA_JP), ("zh-CN", ZH_CN)],
        MemoryPreferences {
            broken: true,
            ..MemoryPreferences::default()
        },
    );
    let resolution = h.session.start(Some("ja_JP.UTF-8")).await;
    assert_eq!(resolution.locale, "ja-JP");
    assert_eq!(resolution.origin, ResolutionOrigin::System);
}

#[tokio::test(start_paused = true)]
async fn test_startup_without_any_bundle_shows_keys() {
    let mut h = harness(&[], MemoryPreferences::default());
    let resolution = h.session.start(None).await;

    assert!(!resolution.loaded);
    assert_eq!(h.session.labels().title, "appTitle");
    h.session.on_input_changed("hi");
    assert_eq!(h.session.send(), SendOutcome::Sent);
}

#[tokio::test(start_paused = true)]
async fn test_change_language_loads_activates_and_persists() {
    let mut h = english_session().await;
    h.session.change_language("ja-JP");
    assert_eq!(h.session.pending_locale(), Some("ja-JP"));
    assert_eq!(h.session.active_locale(), Some("en-US"));

    advance(&mut h.session, 1).await;
    assert_eq!(h.session.active_locale(), Some("ja-JP"));
    assert_eq!(h.session.pending_locale(), None);
    assert_eq!(h.session.labels().title, "チャット");
    assert_eq!(h.preferences.saved(), vec!["ja-JP"]);

    // cached now: switching back is immediate
    h.session.change_language("en-US");
    assert_eq!(h.session.active_locale(), Some("en-US"));
    assert_eq!(h.preferences.saved(), vec!["ja-JP", "en-US"]);
}

#[tokio::test(start_paused = true)]
async fn test_change_language_failure_keeps_current() {
    let mut h = english_session().await;
    h.session.change_language("fr-FR");
    advance(&mut h.session, 1).await;

    assert_eq!(h.session.active_locale(), Some("en-US"));
    assert_eq!(
        h.session.notice(),
        Some(&Notice::LanguageUnavailable("fr-FR".into()))
    );
    assert_eq!(h.session.notice_text().as_deref(), Some("Cannot load fr-FR"));
    assert!(h.preferences.saved().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_cycle_language_walks_available_list() {
    let mut h = english_session().await;
    h.session.cycle_language();
    advance(&mut h.session, 1).await;
    assert_eq!(h.session.active_locale(), Some("zh-CN"));

    h.session.cycle_language();
    advance(&mut h.session, 1).await;
    assert_eq!(h.session.active_locale(), Some("ja-JP"));

    h.session.cycle_language();
    assert_eq!(h.session.active_locale(), Some("en-US"));
}

#[tokio::test(start_paused = true)]
async fn test_cycle_target_relabels_translation_target() {
    let mut h = english_session().await;
    assert_eq!(h.session.target(), "English");
    h.session.cycle_target();
    assert_eq!(h.session.target(), "Chinese");

    h.session.on_input_changed("hi");
    h.session.translate();
    assert_eq!(h.backend.translations()[0].1, "Chinese");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_rapid_language_changes_persist_last_choice() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("webchat.toml");
    tokio::fs::write(&path, "[language]\ncurrent = \"en-US\"\n")
        .await
        .unwrap();

    let mut config = Config::default();
    config.language.available = vec!["en-US".into(), "zh-CN".into(), "ja-JP".into()];
    let source = Arc::new(MemorySource::new(&[
        ("en-US", EN_US),
        ("zh-CN", ZH_CN),
        ("ja-JP", JA_JP),
    ]));
    let mut store = LocalizationStore::new(source);
    for code in ["en-US", "zh-CN", "ja-JP"] {
        store.load(code).await.unwrap();
    }
    let preferences = Arc::new(TomlPreferenceStore::new(&path));
    let mut session = ChatSession::new(
        &config,
        store,
        Arc::new(RecordingBackend::default()),
        preferences.clone(),
    );
    session.start(None).await;

    for _ in 0..20 {
        session.change_language("ja-JP");
        session.change_language("zh-CN");
        assert_eq!(session.active_locale(), Some("zh-CN"));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(preferences.load().await.unwrap().as_deref(), Some("zh-CN"));
        session.change_language("en-US");
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    session.shutdown();
}
