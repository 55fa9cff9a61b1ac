//! HTTP advisory client.
//!
//! Talks to an OpenAI-compatible `chat/completions` endpoint in JSON mode
//! using a blocking `reqwest` client with a request timeout, so a slow
//! service can stall at most one company's scoring for `timeout`.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::advisory::{build_prompt, parse_boost, Advisor, SYSTEM_PROMPT};
use crate::config::AdvisoryConfig;
use crate::error::AdvisoryError;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Advisor backed by an OpenAI-compatible chat API.
#[derive(Debug, Clone)]
pub struct HttpAdvisor {
    config: AdvisoryConfig,
    client: Client,
}

impl HttpAdvisor {
    /// Creates a client with the configured timeout.
    pub fn new(config: AdvisoryConfig) -> Result<Self, AdvisoryError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// Creates a client from the environment, or `None` if not configured.
    pub fn from_env() -> Result<Option<Self>, AdvisoryError> {
        AdvisoryConfig::from_env().map(Self::new).transpose()
    }

    /// The client settings.
    pub fn config(&self) -> &AdvisoryConfig {
        &self.config
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        }
    }
}

impl Advisor for HttpAdvisor {
    fn name(&self) -> &'static str {
        "http"
    }

    fn request_boost(&self, company: &str, steps: &str) -> Result<f64, AdvisoryError> {
        let prompt = build_prompt(company, steps);
        let response: ChatResponse = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&self.request_body(&prompt))
            .send()?
            .error_for_status()?
            .json()?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AdvisoryError::Malformed("empty completion".into()))?;
        debug!(model = %self.config.model, %content, "advisory response");
        parse_boost(&content)
    }
}
