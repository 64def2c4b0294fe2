use serde::Deserialize;
use tracing::warn;

use crate::adapters::{parse_array, thread_digest, InsightAdapters};
use crate::error::InsightError;
use crate::{clamp_signed, Thread, TrendingTopic};

#[derive(Deserialize)]
struct TrendingPayload {
    topic: String,
    #[serde(default)]
    mentions: u32,
    #[serde(default)]
    sentiment: f64,
}

impl InsightAdapters {
    pub async fn trending_topics(&self, threads: &[Thread], limit: usize) -> Vec<TrendingTopic> {
        match self.try_trending_topics(threads, limit).await {
            Ok(topics) => topics,
            Err(err) => {
                warn!(kind = err.kind(), error = %err, threads = threads.len(), "trending detection fell back");
                Vec::new()
            }
        }
    }

    async fn try_trending_topics(
        &self,
        threads: &[Thread],
        limit: usize,
    ) -> Result<Vec<TrendingTopic>, InsightError> {
        if threads.is_empty() {
            return Err(InsightError::InvalidInput("empty thread batch".to_string()));
        }
        let prompt = format!(
            "Identify up to {} trending discussion topics across these forum threads.\n\
Return a JSON array of objects with fields:\n\
- topic (short string)\n\
- mentions (count of threads touching the topic)\n\
- sentiment (-1..1)\n\n\
Threads:\n{}",
            limit,
            thread_digest(threads)
        );
        let raw = self.generate(&prompt).await?;
        let payload: Vec<TrendingPayload> = parse_array(&raw)?;

        let mut topics: Vec<TrendingTopic> = payload
            .into_iter()
            .filter(|entry| !entry.topic.trim().is_empty())
            .map(|entry| TrendingTopic {
                topic: entry.topic.trim().to_string(),
                mentions: entry.mentions,
                sentiment: clamp_signed(entry.sentiment),
            })
            .collect();
        topics.truncate(limit);
        Ok(topics)
    }
}
