use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::LlmConfig;
use crate::error::InsightError;

/// The generative-text collaborator. Untrusted: a successful call may still
/// return text that is not valid JSON; adapters own that validation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, InsightError>;
}

#[derive(Clone)]
pub struct LlmClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
    temperature: f64,
}

impl LlmClient {
    pub fn from_config(config: &LlmConfig, api_key: String) -> Result<Self, InsightError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| InsightError::Config(format!("failed to build llm client: {}", err)))?;
        Ok(Self {
            client,
            api_key,
            api_base: config.api_base.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, InsightError> {
        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));
        let request = ChatRequest {
            model: self.model.clone(),
            temperature: self.temperature,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt().to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
        };

        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|err| InsightError::ServiceUnavailable(format!("llm request failed: {}", err)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_else(|_| String::new());
            let detail = error_body.trim();
            if detail.is_empty() {
                return Err(InsightError::ServiceUnavailable(format!("llm api error: {}", status)));
            }
            return Err(InsightError::ServiceUnavailable(format!(
                "llm api error: {} {}",
                status, detail
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|err| InsightError::MalformedResponse(format!("llm response parse failed: {}", err)))?;

        let content = body
            .choices
            .first()
            .ok_or_else(|| InsightError::MalformedResponse("llm response missing choices".to_string()))?
            .message
            .content
            .trim()
            .to_string();

        Ok(content)
    }
}

/// Stand-in generator for deployments without an API key. Every call fails
/// with `ServiceUnavailable`, so the engine runs entirely on adapter
/// fallbacks and heuristics.
pub struct DisabledGenerator;

#[async_trait]
impl TextGenerator for DisabledGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, InsightError> {
        Err(InsightError::ServiceUnavailable(
            "LLM_API_KEY is not set".to_string(),
        ))
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: String,
}

fn system_prompt() -> &'static str {
    "You are an analysis assistant for a community forum. \
Follow the output format in each request exactly. \
When JSON is requested, output JSON only, no markdown or commentary, \
with decimals using a leading 0 (e.g., 0.42)."
}
