use serde::{Deserialize, Serialize};

use forum_insight::{CommunityHealthMetrics, Post, SmartSuggestion, Thread, ThreadAnalysis};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub thread: Thread,
    #[serde(default)]
    pub posts: Vec<Post>,
}

impl AnalyzeRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.thread.id.trim().is_empty() {
            return Err("thread id is required".to_string());
        }
        if self.thread.title.trim().is_empty() {
            return Err("thread title is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: ThreadAnalysis,
}

#[derive(Debug, Deserialize)]
pub struct HealthRequest {
    #[serde(default)]
    pub threads: Vec<Thread>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub metrics: CommunityHealthMetrics,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    pub thread_id: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub suggestions: Vec<SmartSuggestion>,
}
