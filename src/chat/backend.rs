// src/chat/backend.rs - form-encoded POST / endpoint
use crate::core::prelude::*;
use futures::future::FutureExt;

/// The chat backend. Every call returns an owned future so it can be
/// spawned; typing and message signals are fire-and-forget.
pub trait ChatBackend: Send + Sync {
    /// `typing=1`
    fn send_typing(&self) -> BoxFuture<'static, Result<()>>;
    /// `message=<text>&typing=0`
    fn send_message(&self, text: &str) -> BoxFuture<'static, Result<()>>;
    /// `translate=<text>&target_language=<value>`, plain-text reply.
    fn translate(&self, text: &str, target_language: &str) -> BoxFuture<'static, Result<String>>;
}

pub struct HttpBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBackend {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/", base_url.trim_end_matches('/')),
        }
    }

    pub fn build_client(config: &Config) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(config.backend.timeout)
            .build()
            .map_err(|e| AppError::Backend(format!("HTTP client failed: {}", e)))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn post_form(&self, form: Vec<(&'static str, String)>) -> BoxFuture<'static, Result<reqwest::Response>> {
        let request = self.client.post(&self.endpoint).form(&form);
        async move {
            let response = request.send().await?;
            let status = response.status();
            if status.is_success() {
                Ok(response)
            } else {
                let body = response.text().await.unwrap_or_default();
                Err(AppError::Backend(format!("HTTP {}: {}", status.as_u16(), body.trim())))
            }
        }
        .boxed()
    }
}

impl ChatBackend for HttpBackend {
    fn send_typing(&self) -> BoxFuture<'static, Result<()>> {
        self.post_form(vec![("typing", "1".into())])
            .map(|result| result.map(|_| ()))
            .boxed()
    }

    fn send_message(&self, text: &str) -> BoxFuture<'static, Result<()>> {
        self.post_form(vec![("message", text.into()), ("typing", "0".into())])
            .map(|result| result.map(|_| ()))
            .boxed()
    }

    fn translate(&self, text: &str, target_language: &str) -> BoxFuture<'static, Result<String>> {
        let response = self.post_form(vec![
            ("translate", text.into()),
            ("target_language", target_language.into()),
        ]);
        async move {
            let text = response.await?.text().await?;
            Ok(text)
        }
        .boxed()
    }
}
