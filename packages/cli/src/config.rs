use std::env;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use apify_client::{ApifyClient, SearchLimits};
use dotenvy::dotenv;
use llm_client::LlmClient;

/// Which hosted model answers the insight prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProviderKind {
    OpenAi,
    Gemini,
    Azure,
}

impl std::str::FromStr for LlmProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "gemini" | "google" => Ok(Self::Gemini),
            "azure" | "azure-openai" => Ok(Self::Azure),
            other => Err(anyhow!(
                "unknown LLM_PROVIDER '{}' (expected openai, gemini or azure)",
                other
            )),
        }
    }
}

/// Language model settings; validated only when a client is built.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub provider: LlmProviderKind,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: f32,
    pub azure_endpoint: Option<String>,
    pub azure_deployment: Option<String>,
    pub azure_api_version: Option<String>,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub apify_token: Option<String>,
    pub search_limits: SearchLimits,
    pub poll_interval: Duration,
    pub llm: LlmSettings,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let defaults = SearchLimits::default();
        let search_limits = SearchLimits {
            results_limit: parse_or(var("APIFY_RESULTS_LIMIT"), defaults.results_limit)
                .context("APIFY_RESULTS_LIMIT must be a valid number")?,
            search_limit: parse_or(var("APIFY_SEARCH_LIMIT"), defaults.search_limit)
                .context("APIFY_SEARCH_LIMIT must be a valid number")?,
        };
        let poll_secs: u64 = parse_or(var("APIFY_POLL_INTERVAL_SECS"), 5)
            .context("APIFY_POLL_INTERVAL_SECS must be a valid number")?;

        let google_key = var("GOOGLE_API_KEY").or_else(|| var("GEMINI_API_KEY"));
        let provider = match var("LLM_PROVIDER") {
            Some(name) => name.parse()?,
            None if google_key.is_some() => LlmProviderKind::Gemini,
            None => LlmProviderKind::OpenAi,
        };
        let api_key = match provider {
            LlmProviderKind::OpenAi => var("OPENAI_API_KEY"),
            LlmProviderKind::Gemini => google_key,
            LlmProviderKind::Azure => {
                var("AZURE_OPENAI_API_KEY").or_else(|| var("SUBSCRIPTION_KEY"))
            }
        };

        Ok(Self {
            apify_token: var("APIFY_API_TOKEN").or_else(|| var("API_TOKEN")),
            search_limits,
            poll_interval: Duration::from_secs(poll_secs),
            llm: LlmSettings {
                provider,
                api_key,
                base_url: var("OPENAI_BASE_URL"),
                model: var("LLM_MODEL"),
                temperature: parse_or(var("LLM_TEMPERATURE"), 0.0)
                    .context("LLM_TEMPERATURE must be a number")?,
                azure_endpoint: var("AZURE_ENDPOINT"),
                azure_deployment: var("AZURE_DEPLOYMENT_NAME"),
                azure_api_version: var("AZURE_API_VERSION"),
            },
        })
    }

    pub fn apify_client(&self) -> Result<ApifyClient> {
        let token = self
            .apify_token
            .clone()
            .context("APIFY_API_TOKEN must be set to run a scrape")?;
        Ok(ApifyClient::new(token).with_poll_interval(self.poll_interval))
    }

    pub fn llm_client(&self) -> Result<LlmClient> {
        let llm = &self.llm;
        let key_var = match llm.provider {
            LlmProviderKind::OpenAi => "OPENAI_API_KEY",
            LlmProviderKind::Gemini => "GOOGLE_API_KEY",
            LlmProviderKind::Azure => "AZURE_OPENAI_API_KEY",
        };
        let Some(api_key) = llm.api_key.clone() else {
            bail!("{} must be set to generate insights (or pass --no-insight)", key_var);
        };

        let client = match llm.provider {
            LlmProviderKind::OpenAi => LlmClient::openai(api_key),
            LlmProviderKind::Gemini => LlmClient::gemini(api_key),
            LlmProviderKind::Azure => LlmClient::azure(
                api_key,
                llm.azure_endpoint.clone().context("AZURE_ENDPOINT must be set")?,
                llm.azure_deployment
                    .clone()
                    .context("AZURE_DEPLOYMENT_NAME must be set")?,
                llm.azure_api_version
                    .clone()
                    .context("AZURE_API_VERSION must be set")?,
            )?,
        };

        let client = match (&llm.base_url, llm.provider) {
            (Some(url), LlmProviderKind::OpenAi) => client.with_base_url(url),
            _ => client,
        };
        let client = match &llm.model {
            Some(model) => client.with_model(model),
            None => client,
        };

        Ok(client.with_temperature(llm.temperature))
    }
}

fn parse_or<T>(value: Option<String>, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => Ok(raw.trim().parse()?),
        None => Ok(default),
    }
}
