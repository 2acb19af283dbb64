// src/i18n/bundle.rs
use super::error::LocaleError;
use serde_json::{Map, Value};

/// One locale's key -> text document. Keys may be flat or nested objects
/// addressed with a dotted path ("languages.English").
#[derive(Debug, Clone)]
pub struct LocaleBundle {
    code: String,
    root: Map<String, Value>,
}

impl LocaleBundle {
    pub fn from_json(code: &str, text: &str) -> Result<Self, LocaleError> {
        let value: Value = serde_json::from_str(text).map_err(|e| LocaleError::Parse {
            code: code.into(),
            message: e.to_string(),
        })?;

        match value {
            Value::Object(root) => Ok(Self {
                code: code.into(),
                root,
            }),
            other => Err(LocaleError::Parse {
                code: code.into(),
                message: format!("expected a JSON object, found {}", type_name(&other)),
            }),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Displayable text for `key`, or `None` when the key, or any segment
    /// of a dotted path, is missing or falsy.
    pub fn lookup(&self, key: &str) -> Option<String> {
        let value = if key.contains('.') {
            let mut segments = key.split('.');
            let first = segments.next()?;
            let mut current = self.root.get(first).filter(|v| is_truthy(v))?;
            for segment in segments {
                current = current.get(segment).filter(|v| is_truthy(v))?;
            }
            current
        } else {
            self.root.get(key).filter(|v| is_truthy(v))?
        };

        match value {
            Value::String(text) => Some(text.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            // objects and arrays have no display form
            _ => None,
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
