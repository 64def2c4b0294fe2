pub mod adapters;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod forum;
pub mod llm;
pub mod scoring;
pub mod suggest;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use cache::{AnalysisCache, CacheKey};
pub use config::InsightConfig;
pub use engine::InsightEngine;
pub use error::InsightError;
pub use forum::{ForumClient, ForumData, ThreadPage};
pub use llm::{DisabledGenerator, LlmClient, TextGenerator};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thread {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub reply_count: u32,
    #[serde(default)]
    pub view_count: u32,
    pub author_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub thread_id: String,
    pub content: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

impl SentimentLabel {
    pub fn label(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Mixed => "mixed",
        }
    }

    pub fn is_positive(self) -> bool {
        matches!(self, SentimentLabel::Positive)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentResult {
    pub overall: SentimentLabel,
    pub score: f64,
    pub confidence: f64,
}

impl SentimentResult {
    pub fn neutral() -> Self {
        Self {
            overall: SentimentLabel::Neutral,
            score: 0.0,
            confidence: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToxicitySeverity {
    High,
    Medium,
    Low,
    None,
}

impl ToxicitySeverity {
    pub fn label(self) -> &'static str {
        match self {
            ToxicitySeverity::High => "high",
            ToxicitySeverity::Medium => "medium",
            ToxicitySeverity::Low => "low",
            ToxicitySeverity::None => "none",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationResult {
    pub flagged: bool,
    pub severity: ToxicitySeverity,
    pub categories: Vec<String>,
    pub reasoning: String,
}

impl ModerationResult {
    pub fn clean() -> Self {
        Self {
            flagged: false,
            severity: ToxicitySeverity::None,
            categories: Vec::new(),
            reasoning: "Automated moderation review unavailable.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementLevel {
    High,
    Medium,
    Low,
}

impl EngagementLevel {
    pub fn label(self) -> &'static str {
        match self {
            EngagementLevel::High => "high",
            EngagementLevel::Medium => "medium",
            EngagementLevel::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Engagement {
    pub score: f64,
    pub level: EngagementLevel,
    pub factors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmartSuggestion {
    pub id: String,
    pub title: String,
    pub similarity: f64,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Moderate,
    Promote,
    Archive,
    Feature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestedAction {
    pub action: ActionType,
    pub priority: Priority,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadAnalysis {
    pub thread_id: String,
    pub summary: String,
    pub sentiment: SentimentResult,
    pub toxicity: ModerationResult,
    pub engagement: Engagement,
    pub related_threads: Vec<SmartSuggestion>,
    pub suggested_actions: Vec<SuggestedAction>,
    pub ai_insights: Vec<String>,
    pub computed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Excellent,
    Healthy,
    Concerning,
    Critical,
}

impl HealthStatus {
    pub fn label(self) -> &'static str {
        match self {
            HealthStatus::Excellent => "excellent",
            HealthStatus::Healthy => "healthy",
            HealthStatus::Concerning => "concerning",
            HealthStatus::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthTrend {
    Improving,
    Stable,
    Declining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementTrend {
    Growing,
    Stable,
    Declining,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverallHealth {
    pub score: f64,
    pub status: HealthStatus,
    pub trend: HealthTrend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentBreakdown {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    pub trend: HealthTrend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementSnapshot {
    pub average_replies: f64,
    pub average_views: f64,
    pub active_users: usize,
    pub trend: EngagementTrend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentQuality {
    pub score: f64,
    pub toxic_content: usize,
    pub helpful_content: usize,
    pub trend: HealthTrend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Action,
    Insight,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_items: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityHealthMetrics {
    pub overall: OverallHealth,
    pub sentiment: SentimentBreakdown,
    pub engagement: EngagementSnapshot,
    pub content_quality: ContentQuality,
    pub recommendations: Vec<Recommendation>,
}

impl CommunityHealthMetrics {
    /// Fixed snapshot returned for an empty thread batch. A defined terminal
    /// case, not an error: its `healthy` status bypasses the score-to-status
    /// threshold map.
    pub fn neutral() -> Self {
        Self {
            overall: OverallHealth {
                score: 0.5,
                status: HealthStatus::Healthy,
                trend: HealthTrend::Stable,
            },
            sentiment: SentimentBreakdown {
                positive: 0,
                neutral: 0,
                negative: 0,
                trend: HealthTrend::Stable,
            },
            engagement: EngagementSnapshot {
                average_replies: 0.0,
                average_views: 0.0,
                active_users: 0,
                trend: EngagementTrend::Stable,
            },
            content_quality: ContentQuality {
                score: 0.5,
                toxic_content: 0,
                helpful_content: 0,
                trend: HealthTrend::Stable,
            },
            recommendations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingTopic {
    pub topic: String,
    pub mentions: u32,
    pub sentiment: f64,
}

pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0).min(1.0)
}

pub fn clamp_signed(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(-1.0).min(1.0)
}

pub fn stable_hash64(value: &str) -> u64 {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}
