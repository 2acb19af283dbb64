// src/view/mod.rs - localized label snapshot
use crate::chat::compose::ComposeController;
use crate::chat::translation::TranslationController;
use crate::i18n::LocalizationStore;

/// One selectable option: `value` is what the backend or the store sees,
/// `label` is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionLabel {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hints {
    pub send: String,
    pub translate: String,
    pub combine: String,
    pub target: String,
    pub interface: String,
    pub quit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    pub title: String,
    pub input_placeholder: String,
    pub send_button: String,
    pub translate_button: String,
    pub combine_button: String,
    pub target_label: String,
    pub interface_label: String,
    pub translation_placeholder: String,
    pub char_count: String,
    pub targets: Vec<OptionLabel>,
    pub interface_languages: Vec<OptionLabel>,
    pub hints: Hints,
    pub notice_dismiss: String,
}

/// Re-resolves every static label against the active locale.
pub fn refresh_all(
    store: &LocalizationStore,
    compose: &ComposeController,
    translation: &TranslationController,
    available_locales: &[String],
) -> Labels {
    let options = |prefix: &str, values: &[String]| -> Vec<OptionLabel> {
        values
            .iter()
            .map(|value| OptionLabel {
                value: value.clone(),
                label: store
                    .lookup(&format!("{}.{}", prefix, value))
                    .unwrap_or_else(|| value.clone()),
            })
            .collect()
    };

    Labels {
        title: store.resolve("appTitle"),
        input_placeholder: store.resolve("inputPlaceholder"),
        send_button: store.resolve("sendButton"),
        translate_button: store.resolve("translateButton"),
        combine_button: store.resolve("combineButton"),
        target_label: store.resolve("targetLanguageLabel"),
        interface_label: store.resolve("interfaceLanguageLabel"),
        translation_placeholder: store.resolve("translationPlaceholder"),
        char_count: char_count_text(store, compose.char_count()),
        targets: options("languages", translation.targets()),
        interface_languages: options("interfaceLanguages", available_locales),
        hints: Hints {
            send: store.resolve("hints.send"),
            translate: store.resolve("hints.translate"),
            combine: store.resolve("hints.combine"),
            target: store.resolve("hints.target"),
            interface: store.resolve("hints.interface"),
            quit: store.resolve("hints.quit"),
        },
        notice_dismiss: store.resolve("noticeDismiss"),
    }
}

/// `<count><charCount>`, e.g. "5 characters".
pub fn char_count_text(store: &LocalizationStore, count: usize) -> String {
    format!("{}{}", count, store.resolve("charCount"))
}
