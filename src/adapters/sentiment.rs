use serde::Deserialize;
use tracing::warn;

use crate::adapters::{parse_object, thread_digest, InsightAdapters};
use crate::error::InsightError;
use crate::{clamp01, clamp_signed, Post, SentimentLabel, SentimentResult, Thread};

#[derive(Deserialize)]
struct SentimentPayload {
    overall: SentimentLabel,
    score: f64,
    confidence: f64,
}

/// Batch-level sentiment distribution over a set of threads.
#[derive(Debug, Clone)]
pub struct CommunitySentiment {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    pub score: f64,
    pub confidence: f64,
}

impl CommunitySentiment {
    /// Neutral fallback: every thread in the batch counted neutral so the
    /// snapshot still reflects batch size.
    pub fn neutral(thread_count: usize) -> Self {
        Self {
            positive: 0,
            neutral: thread_count,
            negative: 0,
            score: 0.0,
            confidence: 0.0,
        }
    }
}

#[derive(Deserialize)]
struct CommunitySentimentPayload {
    positive: usize,
    neutral: usize,
    negative: usize,
    score: f64,
    confidence: f64,
}

impl InsightAdapters {
    pub async fn thread_sentiment(&self, thread: &Thread, posts: &[Post]) -> SentimentResult {
        match self.try_thread_sentiment(thread, posts).await {
            Ok(result) => result,
            Err(err) => {
                warn!(kind = err.kind(), error = %err, thread_id = %thread.id, "sentiment analysis fell back");
                SentimentResult::neutral()
            }
        }
    }

    async fn try_thread_sentiment(
        &self,
        thread: &Thread,
        posts: &[Post],
    ) -> Result<SentimentResult, InsightError> {
        let replies = posts
            .iter()
            .map(|post| format!("- {}", post.content))
            .collect::<Vec<_>>()
            .join("\n");
        let prompt = format!(
            "Assess the overall sentiment of this forum discussion.\n\
Return a single JSON object with fields:\n\
- overall (one of \"positive\", \"negative\", \"neutral\", \"mixed\")\n\
- score (-1..1)\n\
- confidence (0..1)\n\n\
Title: {}\n\
Body: {}\n\
Replies:\n{}",
            thread.title, thread.body, replies
        );
        let raw = self.generate(&prompt).await?;
        let payload: SentimentPayload = parse_object(&raw)?;
        Ok(SentimentResult {
            overall: payload.overall,
            score: clamp_signed(payload.score),
            confidence: clamp01(payload.confidence),
        })
    }

    /// Single call over the whole batch, not per-thread.
    pub async fn community_sentiment(&self, threads: &[Thread]) -> CommunitySentiment {
        match self.try_community_sentiment(threads).await {
            Ok(result) => result,
            Err(err) => {
                warn!(kind = err.kind(), error = %err, threads = threads.len(), "community sentiment fell back");
                CommunitySentiment::neutral(threads.len())
            }
        }
    }

    async fn try_community_sentiment(
        &self,
        threads: &[Thread],
    ) -> Result<CommunitySentiment, InsightError> {
        if threads.is_empty() {
            return Err(InsightError::InvalidInput("empty thread batch".to_string()));
        }
        let prompt = format!(
            "Classify the sentiment of each forum topic below, then aggregate.\n\
Return a single JSON object with fields:\n\
- positive (count of positive topics)\n\
- neutral (count of neutral topics)\n\
- negative (count of negative topics)\n\
- score (-1..1, overall)\n\
- confidence (0..1)\n\n\
Topics:\n{}",
            thread_digest(threads)
        );
        let raw = self.generate(&prompt).await?;
        let payload: CommunitySentimentPayload = parse_object(&raw)?;
        Ok(CommunitySentiment {
            positive: payload.positive,
            neutral: payload.neutral,
            negative: payload.negative,
            score: clamp_signed(payload.score),
            confidence: clamp01(payload.confidence),
        })
    }
}
