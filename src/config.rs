use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::InsightError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub cache_ttl_secs: u64,
    pub content_budget: usize,
    pub related_limit: usize,
    pub insight_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: 300,
            content_budget: 2000,
            related_limit: 5,
            insight_limit: 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub api_base: String,
    pub model: String,
    pub temperature: f64,
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumConfig {
    pub api_base: String,
    pub timeout_ms: u64,
}

impl Default for ForumConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:4000/api".to_string(),
            timeout_ms: 5_000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsightConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub forum: ForumConfig,
}

impl InsightConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), InsightError> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| InsightError::Config(format!("failed to read config: {}", err)))?;
                toml::from_str(&contents)
                    .map_err(|err| InsightError::Config(format!("failed to parse config: {}", err)))?
            } else {
                InsightConfig::default()
            }
        } else {
            InsightConfig::default()
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<(), InsightError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| InsightError::Config(format!("failed to create config dir: {}", err)))?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| InsightError::Config(format!("failed to serialize config: {}", err)))?;
        std::fs::write(path, payload)
            .map_err(|err| InsightError::Config(format!("failed to write config: {}", err)))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(ttl) = env::var("INSIGHT_CACHE_TTL_SECS") {
            if let Ok(value) = ttl.parse::<u64>() {
                self.engine.cache_ttl_secs = value;
            }
        }
        if let Ok(budget) = env::var("INSIGHT_CONTENT_BUDGET") {
            if let Ok(value) = budget.parse::<usize>() {
                self.engine.content_budget = value;
            }
        }
        if let Ok(api_base) = env::var("LLM_API_BASE") {
            if !api_base.trim().is_empty() {
                self.llm.api_base = api_base;
            }
        }
        if let Ok(model) = env::var("LLM_MODEL") {
            if !model.trim().is_empty() {
                self.llm.model = model;
            }
        }
        if let Ok(timeout) = env::var("LLM_TIMEOUT_MS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.llm.timeout_ms = value;
            }
        }
        if let Ok(api_base) = env::var("FORUM_API_BASE") {
            if !api_base.trim().is_empty() {
                self.forum.api_base = api_base;
            }
        }
        if let Ok(timeout) = env::var("FORUM_TIMEOUT_MS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.forum.timeout_ms = value;
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("INSIGHT_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/insight.toml")))
}
