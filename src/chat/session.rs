// src/chat/session.rs - owns all client state, one logical thread
use super::backend::ChatBackend;
use super::compose::{ComposeController, InputChange, SendOutcome};
use super::events::SessionEvent;
use super::notice::Notice;
use super::tasks::TaskScheduler;
use super::transcript::Transcript;
use super::translation::{TranslationController, TranslationHandle, TranslationState};
use crate::core::config::Config;
use crate::i18n::{
    resolve_startup_locale, LocaleBundle, LocaleError, LocalizationStore, PreferenceStore,
    Resolution,
};
use crate::view::{self, Labels};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// The chat page. User operations and async completions are applied
/// here and nowhere else; spawned work reports back through
/// [`SessionEvent`]s drained by [`ChatSession::handle_event`].
pub struct ChatSession {
    backend: Arc<dyn ChatBackend>,
    preferences: Arc<dyn PreferenceStore>,
    store: LocalizationStore,
    compose: ComposeController,
    translation: TranslationController,
    transcript: Transcript,
    tasks: TaskScheduler,
    events: UnboundedReceiver<SessionEvent>,
    labels: Labels,
    notice: Option<Notice>,
    available_locales: Vec<String>,
    pending_locale: Option<String>,
}

impl ChatSession {
    pub fn new(
        config: &Config,
        store: LocalizationStore,
        backend: Arc<dyn ChatBackend>,
        preferences: Arc<dyn PreferenceStore>,
    ) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        let mut session = Self {
            backend,
            preferences,
            store,
            compose: ComposeController::new(config.timing),
            translation: TranslationController::new(&config.translate),
            transcript: Transcript::new(config.max_messages, config.timing.scroll_settle),
            tasks: TaskScheduler::new(tx),
            events,
            labels: Labels::default(),
            notice: None,
            available_locales: config.language.available.clone(),
            pending_locale: None,
        };
        session.refresh_all();
        session
    }

    /// Reads the stored preference, resolves the startup locale and
    /// relabels the view.
    pub async fn start(&mut self, system: Option<&str>) -> Resolution {
        let preferred = match self.preferences.load().await {
            Ok(preferred) => preferred,
            Err(e) => {
                log::warn!("Could not read language preference: {}", e);
                None
            }
        };

        let resolution =
            resolve_startup_locale(&mut self.store, preferred.as_deref(), system).await;
        log::info!(
            "Interface language: {} ({:?})",
            resolution.locale,
            resolution.origin
        );
        self.refresh_all();
        resolution
    }

    // ---------------------------------------------------------------
    // user operations
    // ---------------------------------------------------------------

    pub fn on_input_changed(&mut self, text: &str) -> InputChange {
        let change = self
            .compose
            .on_input_changed(text, self.backend.as_ref(), &self.tasks);
        if change == InputChange::Cleared {
            self.translation.clear();
        }
        self.refresh_char_count();
        change
    }

    pub fn send(&mut self) -> SendOutcome {
        let outcome = self
            .compose
            .send(&mut self.transcript, self.backend.as_ref(), &self.tasks);
        self.refresh_char_count();
        outcome
    }

    pub fn translate(&mut self) -> Option<TranslationHandle> {
        let input = self.compose.text().to_string();
        match self
            .translation
            .translate(&input, self.backend.as_ref(), &self.tasks)
        {
            Ok(handle) => Some(handle),
            Err(notice) => {
                self.raise(notice);
                None
            }
        }
    }

    pub fn combine(&mut self) -> Option<SendOutcome> {
        let result = self.translation.combine(
            &mut self.compose,
            &mut self.transcript,
            self.backend.as_ref(),
            &self.tasks,
        );
        self.refresh_char_count();
        match result {
            Ok(outcome) => Some(outcome),
            Err(notice) => {
                self.raise(notice);
                None
            }
        }
    }

    pub fn select_target(&mut self, value: &str) -> bool {
        self.translation.select_target(value)
    }

    pub fn cycle_target(&mut self) {
        self.translation.cycle_target();
        log::debug!("Target language: {}", self.translation.target());
    }

    /// Switches the interface language. Cached bundles apply at once;
    /// otherwise the bundle is fetched and applied when it arrives.
    pub fn change_language(&mut self, code: &str) {
        if self.store.active() == Some(code) && self.store.is_cached(code) {
            self.pending_locale = None;
            return;
        }

        if self.store.is_cached(code) {
            self.pending_locale = None;
            self.activate(code);
            return;
        }

        log::info!("Loading interface language {}", code);
        self.pending_locale = Some(code.to_string());
        let code = code.to_string();
        let fetch = self.store.fetch(&code);
        self.tasks.request(async move {
            SessionEvent::LocaleLoaded {
                code,
                result: fetch.await,
            }
        });
    }

    pub fn cycle_language(&mut self) {
        if self.available_locales.is_empty() {
            return;
        }
        let current = self
            .pending_locale
            .as_deref()
            .or_else(|| self.store.active());
        let next = current
            .and_then(|code| self.available_locales.iter().position(|c| c == code))
            .map(|i| (i + 1) % self.available_locales.len())
            .unwrap_or(0);
        let code = self.available_locales[next].clone();
        self.change_language(&code);
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.transcript.scroll_up(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.transcript.scroll_down(lines);
    }

    pub fn dismiss_notice(&mut self) -> bool {
        self.notice.take().is_some()
    }

    pub fn refresh_all(&mut self) {
        self.labels = view::refresh_all(
            &self.store,
            &self.compose,
            &self.translation,
            &self.available_locales,
        );
    }

    // ---------------------------------------------------------------
    // completions
    // ---------------------------------------------------------------

    /// Waits for the next completion. The scheduler keeps a sender alive,
    /// so this never yields `None` while the session exists.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events.recv().await
    }

    /// Applies everything already queued; returns how many events ran.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    pub fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::TypingCooldownElapsed => self.compose.on_typing_cooldown_elapsed(),
            SessionEvent::SendDisable { generation } => {
                self.compose.on_send_disable(generation);
            }
            SessionEvent::SendClear { generation } => {
                if self.compose.on_send_clear(generation) {
                    self.translation.clear();
                    self.refresh_char_count();
                }
            }
            SessionEvent::ScrollSettled => self.transcript.on_scroll_settled(),
            SessionEvent::TranslationFinished { ticket, result } => {
                self.translation.on_finished(ticket, result);
            }
            SessionEvent::LocaleLoaded { code, result } => self.on_locale_loaded(code, result),
        }
    }

    fn on_locale_loaded(
        &mut self,
        code: String,
        result: std::result::Result<LocaleBundle, LocaleError>,
    ) {
        let requested = self.pending_locale.as_deref() == Some(code.as_str());
        match result {
            Ok(bundle) => {
                self.store.insert(bundle);
                if requested {
                    self.pending_locale = None;
                    self.activate(&code);
                } else {
                    log::debug!("Locale {} arrived after being superseded", code);
                }
            }
            Err(e) => {
                log::warn!("Error loading language resource {}: {}", code, e);
                if requested {
                    self.pending_locale = None;
                    self.raise(Notice::LanguageUnavailable(code));
                }
            }
        }
    }

    fn activate(&mut self, code: &str) {
        self.store.set_active(code);
        self.refresh_all();
        self.tasks
            .detach("save language preference", self.preferences.save(code));
        log::info!("Interface language changed to {}", code);
    }

    fn raise(&mut self, notice: Notice) {
        log::debug!("Notice: {:?}", notice);
        self.notice = Some(notice);
    }

    fn refresh_char_count(&mut self) {
        self.labels.char_count = view::char_count_text(&self.store, self.compose.char_count());
    }

    pub fn shutdown(&self) {
        self.tasks.shutdown();
    }

    // ---------------------------------------------------------------
    // view accessors
    // ---------------------------------------------------------------

    pub fn input(&self) -> &str {
        self.compose.text()
    }

    pub fn input_enabled(&self) -> bool {
        self.compose.is_enabled()
    }

    pub fn can_send(&self) -> bool {
        self.compose.can_send()
    }

    pub fn char_count(&self) -> usize {
        self.compose.char_count()
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn translation_state(&self) -> &TranslationState {
        self.translation.state()
    }

    pub fn target(&self) -> &str {
        self.translation.target()
    }

    /// Text for the translation line; `None` shows the placeholder.
    pub fn translation_display(&self) -> Option<String> {
        match self.translation.state() {
            TranslationState::Idle => None,
            TranslationState::Requested { .. } => Some(self.store.resolve("translating")),
            TranslationState::Fulfilled { text, .. } => Some(text.clone()),
            TranslationState::Failed { .. } => Some(self.store.resolve("translationFailed")),
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn notice_text(&self) -> Option<String> {
        self.notice
            .as_ref()
            .map(|notice| self.store.resolve_with(notice.key(), &notice.params()))
    }

    pub fn active_locale(&self) -> Option<&str> {
        self.store.active()
    }

    pub fn pending_locale(&self) -> Option<&str> {
        self.pending_locale.as_deref()
    }

    pub fn resolve(&self, key: &str) -> String {
        self.store.resolve(key)
    }
}
