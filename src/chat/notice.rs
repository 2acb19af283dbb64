// src/chat/notice.rs

/// Blocking user notices (the terminal stand-in for a browser alert).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    EmptyMessage,
    EmptyTranslation,
    LanguageUnavailable(String),
}

impl Notice {
    pub fn key(&self) -> &'static str {
        match self {
            Self::EmptyMessage => "emptyMessage",
            Self::EmptyTranslation => "emptyTranslation",
            Self::LanguageUnavailable(_) => "unableToLoadLanguage",
        }
    }

    pub fn params(&self) -> Vec<&str> {
        match self {
            Self::LanguageUnavailable(code) => vec![code.as_str()],
            _ => Vec::new(),
        }
    }
}
