use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::llm::parser::clean_advice;
use crate::llm::prompts::AdviceRequest;
use crate::llm::provider::LLMProvider;

/// Advice backed by a local Ollama server's `/api/generate` endpoint.
pub struct OllamaProvider {
    client: Client,
    url: String,
    model: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_ctx: u32,
    num_predict: u32,
    top_p: f32,
    repeat_penalty: f32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            num_ctx: 2048,
            num_predict: 180,
            top_p: 0.9,
            repeat_penalty: 1.1,
        }
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl OllamaProvider {
    pub fn new(
        url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url: url.into(),
            model: model.into(),
            timeout,
        })
    }
}

#[async_trait]
impl LLMProvider for OllamaProvider {
    async fn generate_advice(&self, request: &AdviceRequest) -> Result<String> {
        let body = GenerateRequest {
            model: &self.model,
            prompt: request.to_prompt(),
            stream: false,
            options: GenerateOptions::default(),
        };

        tracing::debug!("Sending advice request to Ollama model {}", self.model);

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::LLMApi(format!("Ollama did not answer within {:?}", self.timeout))
                } else {
                    Error::LLMApi(format!("Failed to reach Ollama at {}: {}", self.url, e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::LLMApi(format!(
                "Ollama API error ({}): {}",
                status, body
            )));
        }

        let result: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::LLMApi(format!("Failed to parse Ollama response: {}", e)))?;

        if let Some(error) = result.error {
            return Err(Error::LLMApi(error));
        }

        clean_advice(result.response.as_deref().unwrap_or_default())
    }

    fn name(&self) -> &str {
        "Ollama"
    }
}
