//! OpenAI-compatible completion model
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint (OpenAI
//! itself, or a local server exposing the same shape). The response is
//! fetched whole and then re-chunked into small fragments so callers see
//! the same streaming interface every other model would use; this crate
//! carries no SSE client, so true token-by-token streaming is left for a
//! future revision that adds one.

use std::time::Duration;

use async_trait::async_trait;
use cortex_domain::error::{Error, Result};
use cortex_domain::ports::providers::{CompletionChunkStream, CompletionModel};
use futures::stream;
use reqwest::Client;

use crate::constants::CONTENT_TYPE_JSON;

/// Fragment size, in characters, the fetched response is re-chunked into.
const RESTREAM_CHUNK_CHARS: usize = 8;

/// OpenAI chat-completions-shaped model. Receives its HTTP client via
/// constructor injection, matching [`crate::embedding::OpenAIEmbeddingProvider`].
pub struct OpenAiCompletionModel {
    api_key: String,
    base_url: Option<String>,
    model: String,
    timeout: Duration,
    http_client: Client,
}

impl OpenAiCompletionModel {
    /// Create a new OpenAI-compatible completion model.
    pub fn new(api_key: String, base_url: Option<String>, model: String, timeout: Duration, http_client: Client) -> Self {
        Self { api_key, base_url, model, timeout, http_client }
    }

    fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or("https://api.openai.com/v1")
    }

    fn completion_error(&self, context: &str, details: &str) -> Error {
        Error::generic(format!("completion model {}: {context}: {details}", self.model))
    }
}

#[async_trait]
impl CompletionModel for OpenAiCompletionModel {
    async fn stream(&self, prompt: &str, stop_tokens: &[String]) -> Result<CompletionChunkStream> {
        let payload = serde_json::json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "stop": stop_tokens,
        });

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url()))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", CONTENT_TYPE_JSON)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.completion_error("request failed", &e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(self.completion_error(&format!("HTTP {status}"), &body));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| self.completion_error("response parse failed", &e.to_string()))?;

        let text = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| self.completion_error("unexpected response shape", "missing choices[0].message.content"))?
            .to_string();

        let chunks: Vec<Result<String>> = text
            .as_bytes()
            .chunks(RESTREAM_CHUNK_CHARS)
            .map(|bytes| Ok(String::from_utf8_lossy(bytes).into_owned()))
            .collect();

        Ok(Box::pin(stream::iter(chunks)))
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_defaults_to_openai() {
        let model = OpenAiCompletionModel::new("key".into(), None, "gpt-4o-mini".into(), Duration::from_secs(1), Client::new());
        assert_eq!(model.base_url(), "https://api.openai.com/v1");
        assert_eq!(model.model_id(), "gpt-4o-mini");
    }
}
