use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::adapters::{CommunitySentiment, InsightAdapters};
use crate::cache::{AnalysisCache, CacheKey};
use crate::config::{EngineConfig, InsightConfig};
use crate::forum::ForumData;
use crate::llm::TextGenerator;
use crate::scoring::{engagement_score, health_score, health_status};
use crate::suggest::smart_suggestions;
use crate::{
    clamp01, ActionType, CommunityHealthMetrics, ContentQuality, Engagement, EngagementLevel,
    EngagementSnapshot, EngagementTrend, HealthTrend, ModerationResult, OverallHealth, Post,
    Priority, SentimentBreakdown, SentimentLabel, SentimentResult, SmartSuggestion,
    SuggestedAction, Thread, ThreadAnalysis, ToxicitySeverity, TrendingTopic,
};

/// The insight engine facade. Constructed once at the composition root and
/// shared by reference; the cache inside is the engine's only mutable state.
pub struct InsightEngine {
    adapters: InsightAdapters,
    cache: AnalysisCache,
    config: EngineConfig,
    forum: Option<Arc<dyn ForumData>>,
}

impl InsightEngine {
    pub fn new(generator: Arc<dyn TextGenerator>, config: &InsightConfig) -> Self {
        Self {
            adapters: InsightAdapters::new(generator),
            cache: AnalysisCache::new(Duration::from_secs(config.engine.cache_ttl_secs)),
            config: config.engine.clone(),
            forum: None,
        }
    }

    pub fn with_forum(mut self, forum: Arc<dyn ForumData>) -> Self {
        self.forum = Some(forum);
        self
    }

    /// Analyzes one thread with its posts. Total: generative failures are
    /// absorbed as adapter fallbacks, so the result is always structurally
    /// valid (at worst with floor-value confidence fields).
    pub async fn analyze_thread(&self, thread: &Thread, posts: &[Post]) -> ThreadAnalysis {
        let key = CacheKey::new(&thread.id, posts.len());
        if let Some(cached) = self.cache.get(&key) {
            return cached;
        }
        debug!(thread_id = %thread.id, posts = posts.len(), "analysis cache miss");

        let content = bounded_content(thread, posts, self.config.content_budget);
        let (summary, sentiment, toxicity) = tokio::join!(
            self.adapters.summarize(&content),
            self.adapters.thread_sentiment(thread, posts),
            self.adapters.moderation(&content),
        );

        let engagement = engagement_score(thread, posts);
        let related_threads = smart_suggestions(thread, self.config.related_limit);
        let suggested_actions = suggested_actions(thread, &sentiment, &toxicity, &engagement);
        let ai_insights = ai_insights(thread, &sentiment, &engagement, self.config.insight_limit);

        let analysis = ThreadAnalysis {
            thread_id: thread.id.clone(),
            summary,
            sentiment,
            toxicity,
            engagement,
            related_threads,
            suggested_actions,
            ai_insights,
            computed_at: Utc::now(),
        };
        self.cache.put(key, analysis.clone());
        analysis
    }

    /// Reduces a batch of threads into one health snapshot. Total; an empty
    /// batch yields the fixed neutral snapshot.
    pub async fn analyze_community_health(&self, threads: &[Thread]) -> CommunityHealthMetrics {
        if threads.is_empty() {
            return CommunityHealthMetrics::neutral();
        }

        let thread_count = threads.len();
        let total_replies: u64 = threads.iter().map(|thread| thread.reply_count as u64).sum();
        let total_views: u64 = threads.iter().map(|thread| thread.view_count as u64).sum();
        let average_replies = total_replies as f64 / thread_count as f64;
        let average_views = total_views as f64 / thread_count as f64;
        let active_users = threads
            .iter()
            .map(|thread| thread.author_id.as_str())
            .collect::<HashSet<_>>()
            .len();

        // One sentiment call over the whole batch; recommendations consume
        // that sentiment, so they are sequenced after it.
        let sentiment = self.adapters.community_sentiment(threads).await;
        let recommendations = self
            .adapters
            .recommendations(thread_count, average_replies, &sentiment)
            .await;

        let score = health_score(thread_count, total_replies, sentiment.score);
        let sentiment_trend = sentiment_trend(&sentiment);
        let engagement_trend = if average_replies > 5.0 {
            EngagementTrend::Growing
        } else if average_replies < 1.0 {
            EngagementTrend::Declining
        } else {
            EngagementTrend::Stable
        };

        CommunityHealthMetrics {
            overall: OverallHealth {
                score,
                status: health_status(score),
                trend: sentiment_trend,
            },
            sentiment: SentimentBreakdown {
                positive: sentiment.positive,
                neutral: sentiment.neutral,
                negative: sentiment.negative,
                trend: sentiment_trend,
            },
            engagement: EngagementSnapshot {
                average_replies,
                average_views,
                active_users,
                trend: engagement_trend,
            },
            content_quality: content_quality(&sentiment),
            recommendations,
        }
    }

    pub async fn trending_topics(&self, threads: &[Thread], limit: usize) -> Vec<TrendingTopic> {
        self.adapters.trending_topics(threads, limit).await
    }

    /// Related-content suggestions for a thread fetched through the forum
    /// collaborator. Total: a missing collaborator or unknown id yields an
    /// empty list.
    pub async fn generate_smart_suggestions(
        &self,
        thread_id: &str,
        limit: usize,
    ) -> Vec<SmartSuggestion> {
        let Some(forum) = self.forum.as_ref() else {
            warn!(thread_id, "smart suggestions requested without a forum collaborator");
            return Vec::new();
        };
        let page = match forum.list_threads(50).await {
            Ok(page) => page,
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "thread listing failed for suggestions");
                return Vec::new();
            }
        };
        match page.threads.iter().find(|thread| thread.id == thread_id) {
            Some(thread) => smart_suggestions(thread, limit),
            None => {
                warn!(thread_id, "thread not found for suggestions");
                Vec::new()
            }
        }
    }

    pub async fn draft_reply(&self, thread: &Thread, posts: &[Post]) -> String {
        self.adapters.draft_reply(thread, posts).await
    }

    pub async fn improve_content(&self, text: &str) -> String {
        self.adapters.improve_content(text).await
    }

    pub async fn suggest_topics(&self, tags: &[String]) -> Vec<String> {
        self.adapters.suggest_topics(tags).await
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cached_analyses(&self) -> usize {
        self.cache.len()
    }
}

/// Concatenates thread and post content under a character budget, truncating
/// the longest piece first until the total fits.
pub fn bounded_content(thread: &Thread, posts: &[Post], budget: usize) -> String {
    let mut pieces: Vec<String> = Vec::with_capacity(posts.len() + 1);
    pieces.push(format!("{}\n{}", thread.title, thread.body));
    for post in posts {
        pieces.push(post.content.clone());
    }

    loop {
        let lengths: Vec<usize> = pieces.iter().map(|piece| piece.chars().count()).collect();
        let total: usize = lengths.iter().sum();
        if total <= budget {
            break;
        }
        let mut longest = 0;
        for (index, length) in lengths.iter().enumerate() {
            if *length > lengths[longest] {
                longest = index;
            }
        }
        let keep = lengths[longest].saturating_sub(total - budget);
        pieces[longest] = pieces[longest].chars().take(keep).collect();
    }

    pieces.retain(|piece| !piece.trim().is_empty());
    pieces.join("\n---\n")
}

fn suggested_actions(
    thread: &Thread,
    sentiment: &SentimentResult,
    toxicity: &ModerationResult,
    engagement: &Engagement,
) -> Vec<SuggestedAction> {
    let mut actions = Vec::new();

    if toxicity.flagged {
        actions.push(SuggestedAction {
            action: ActionType::Moderate,
            priority: match toxicity.severity {
                ToxicitySeverity::High => Priority::High,
                ToxicitySeverity::Medium => Priority::Medium,
                ToxicitySeverity::Low | ToxicitySeverity::None => Priority::Low,
            },
            reason: format!("Flagged by moderation review: {}", toxicity.reasoning),
        });
    }

    if engagement.score > 0.8 && sentiment.overall.is_positive() {
        actions.push(SuggestedAction {
            action: ActionType::Feature,
            priority: Priority::Medium,
            reason: "High engagement with positive sentiment".to_string(),
        });
    }

    let age_days = (Utc::now() - thread.created_at).num_days();
    if age_days > 30 && engagement.score < 0.2 {
        actions.push(SuggestedAction {
            action: ActionType::Archive,
            priority: Priority::Low,
            reason: "Inactive for over a month with minimal engagement".to_string(),
        });
    }

    if sentiment.overall.is_positive() && thread.reply_count > 5 {
        actions.push(SuggestedAction {
            action: ActionType::Promote,
            priority: Priority::Medium,
            reason: "Positive discussion with an active reply stream".to_string(),
        });
    }

    actions
}

/// Templated insight strings, first `limit` matching rules in priority order.
fn ai_insights(
    thread: &Thread,
    sentiment: &SentimentResult,
    engagement: &Engagement,
    limit: usize,
) -> Vec<String> {
    let mut insights = Vec::new();

    if engagement.level == EngagementLevel::High {
        insights.push("This thread is attracting strong engagement.".to_string());
    }
    if engagement.level == EngagementLevel::Low {
        insights.push("Engagement is lagging; a follow-up question could help.".to_string());
    }
    if sentiment.overall == SentimentLabel::Positive {
        insights.push("The overall tone of this discussion is positive.".to_string());
    }
    if sentiment.overall == SentimentLabel::Negative {
        insights.push("The overall tone is negative; a moderator check-in may help.".to_string());
    }
    if thread.reply_count == 0 {
        insights.push("No replies yet; the thread may need more visibility.".to_string());
    }
    if thread.reply_count > 10 {
        insights.push("An active back-and-forth is underway.".to_string());
    }
    if thread.title.contains('?') || thread.body.contains('?') {
        insights.push("The author is asking a question; a direct answer would land well.".to_string());
    }

    insights.truncate(limit);
    insights
}

fn sentiment_trend(sentiment: &CommunitySentiment) -> HealthTrend {
    if sentiment.score > 0.2 {
        HealthTrend::Improving
    } else if sentiment.score < -0.2 {
        HealthTrend::Declining
    } else {
        HealthTrend::Stable
    }
}

fn content_quality(sentiment: &CommunitySentiment) -> ContentQuality {
    let total = sentiment.positive + sentiment.neutral + sentiment.negative;
    let score = if total == 0 {
        0.5
    } else {
        clamp01((sentiment.positive as f64 + 0.5 * sentiment.neutral as f64) / total as f64)
    };
    ContentQuality {
        score,
        toxic_content: sentiment.negative,
        helpful_content: sentiment.positive,
        trend: sentiment_trend(sentiment),
    }
}
