use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TransformError};
use crate::transform::Transform;

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Generation parameters forwarded with every request.
#[derive(Debug, Clone)]
pub struct LlmOptions {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for LlmOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            max_tokens: 15_000,
        }
    }
}

/// Transform implementation that talks to an OpenAI-compatible
/// chat-completions endpoint.
///
/// The base URL comes from `PROMPTMAP_API_BASE` (default the OpenAI API),
/// the key from `PROMPTMAP_API_KEY` or `OPENAI_API_KEY`. The underlying
/// `reqwest::Client` pools connections, so one client instance serves all
/// concurrent workers.
pub struct LlmClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    options: LlmOptions,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f64,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl LlmClient {
    /// Build a client from the process environment.
    pub fn from_env(options: LlmOptions) -> Result<Self> {
        let api_key = std::env::var("PROMPTMAP_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .map_err(|_| TransformError::MissingApiKey)?;
        let base_url = std::env::var("PROMPTMAP_API_BASE")
            .unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url,
            api_key,
            options,
        })
    }
}

#[async_trait]
impl Transform for LlmClient {
    async fn apply(&self, path: &str, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.options.model,
            temperature: self.options.temperature,
            max_tokens: self.options.max_tokens,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        log::debug!(
            "Requesting completion for {path} ({} prompt bytes)",
            prompt.len()
        );

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TransformError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| TransformError::MalformedResponse(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| TransformError::MalformedResponse("response has no choices".into()))
    }
}
