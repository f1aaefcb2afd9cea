//! Chat-completions client for hosted language models.
//!
//! Speaks the OpenAI chat-completions wire format, which covers OpenAI
//! itself, Gemini's OpenAI-compatible endpoint, and Azure OpenAI
//! deployments (different URL shape and auth header).
//!
//! # Example
//!
//! ```rust,ignore
//! use llm_client::LlmClient;
//!
//! let client = LlmClient::gemini(api_key).with_temperature(0.0);
//! let text = client.complete("What's trending in #travel?").await?;
//! ```

pub mod error;
pub mod types;

pub use error::{LlmError, Result};
pub use types::{ChatRequest, ChatResponse, Message, Usage};

use reqwest::Client;
use tracing::{debug, warn};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Which hosted API the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provider {
    /// `{base_url}/chat/completions` with a bearer token.
    OpenAi,
    /// Gemini's OpenAI-compatible endpoint, bearer token.
    Gemini,
    /// `{endpoint}/openai/deployments/{deployment}/chat/completions?api-version=...`
    /// with an `api-key` header.
    Azure {
        deployment: String,
        api_version: String,
    },
}

#[derive(Clone)]
pub struct LlmClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    provider: Provider,
    model: String,
    temperature: Option<f32>,
}

impl LlmClient {
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self::build(api_key, OPENAI_BASE_URL, Provider::OpenAi, DEFAULT_OPENAI_MODEL)
    }

    pub fn gemini(api_key: impl Into<String>) -> Self {
        Self::build(api_key, GEMINI_BASE_URL, Provider::Gemini, DEFAULT_GEMINI_MODEL)
    }

    /// Azure OpenAI; `endpoint` is the resource root, e.g.
    /// `https://my-resource.openai.azure.com`.
    pub fn azure(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        deployment: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Result<Self> {
        let endpoint = endpoint.into();
        let deployment = deployment.into();
        let api_version = api_version.into();

        if endpoint.trim().is_empty() {
            return Err(LlmError::Config("Azure endpoint is empty".into()));
        }
        if deployment.trim().is_empty() {
            return Err(LlmError::Config("Azure deployment name is empty".into()));
        }
        if api_version.trim().is_empty() {
            return Err(LlmError::Config("Azure API version is empty".into()));
        }

        let model = deployment.clone();
        Ok(Self::build(
            api_key,
            &endpoint,
            Provider::Azure {
                deployment,
                api_version,
            },
            &model,
        ))
    }

    fn build(api_key: impl Into<String>, base_url: &str, provider: Provider, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            provider,
            model: model.to_string(),
            temperature: None,
        }
    }

    /// Set a custom base URL (proxies, self-hosted gateways).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the chat-completions endpoint for this provider.
    pub fn completions_url(&self) -> String {
        match &self.provider {
            Provider::OpenAi | Provider::Gemini => format!("{}/chat/completions", self.base_url),
            Provider::Azure {
                deployment,
                api_version,
            } => format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                self.base_url, deployment, api_version
            ),
        }
    }

    /// Single-turn completion with the client's model and temperature.
    pub async fn complete(&self, prompt: impl Into<String>) -> Result<String> {
        let mut request = ChatRequest::new(self.model.clone()).message(Message::user(prompt));
        request.temperature = self.temperature;

        let response = self.chat_completion(request).await?;
        Ok(response.content)
    }

    /// Chat completion.
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse> {
        let start = std::time::Instant::now();

        let builder = self.http_client.post(self.completions_url());
        let builder = match self.provider {
            Provider::Azure { .. } => builder.header("api-key", &self.api_key),
            Provider::OpenAi | Provider::Gemini => builder.bearer_auth(&self.api_key),
        };

        let response = builder.json(&request).send().await.map_err(|e| {
            warn!(error = %e, "LLM request failed");
            LlmError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "LLM API error");
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let chat_response: types::ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.unwrap_or_default())
            .ok_or_else(|| LlmError::Parse("response has no choices".into()))?;

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            chars = content.len(),
            "LLM chat completion"
        );

        Ok(ChatResponse {
            content,
            usage: chat_response.usage,
        })
    }
}
