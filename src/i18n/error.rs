// src/i18n/error.rs

#[derive(Debug)]
pub enum LocaleError {
    InvalidCode(String),
    Unavailable { code: String, status: Option<u16> },
    Fetch { code: String, message: String },
    Parse { code: String, message: String },
}

impl LocaleError {
    pub fn code(&self) -> &str {
        match self {
            Self::InvalidCode(code) => code,
            Self::Unavailable { code, .. } | Self::Fetch { code, .. } | Self::Parse { code, .. } => code,
        }
    }
}

impl std::fmt::Display for LocaleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCode(code) => write!(f, "Invalid locale code: {:?}", code),
            Self::Unavailable { code, status: Some(status) } => {
                write!(f, "Locale {} unavailable (HTTP {})", code, status)
            }
            Self::Unavailable { code, status: None } => write!(f, "Locale {} unavailable", code),
            Self::Fetch { code, message } => write!(f, "Unable to load locale {}: {}", code, message),
            Self::Parse { code, message } => write!(f, "Malformed locale {}: {}", code, message),
        }
    }
}

impl std::error::Error for LocaleError {}
