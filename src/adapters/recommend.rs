use serde::Deserialize;
use tracing::warn;

use crate::adapters::sentiment::CommunitySentiment;
use crate::adapters::{parse_array, InsightAdapters};
use crate::error::InsightError;
use crate::{Priority, Recommendation, RecommendationKind};

const RECOMMENDATION_LIMIT: usize = 5;

#[derive(Deserialize)]
struct RecommendationPayload {
    kind: RecommendationKind,
    priority: Priority,
    title: String,
    description: String,
    #[serde(default)]
    action_items: Option<Vec<String>>,
}

impl InsightAdapters {
    /// Community recommendations, generated with the previously computed
    /// batch sentiment as context (the one adapter dependency that requires
    /// explicit sequencing).
    pub async fn recommendations(
        &self,
        thread_count: usize,
        average_replies: f64,
        sentiment: &CommunitySentiment,
    ) -> Vec<Recommendation> {
        match self
            .try_recommendations(thread_count, average_replies, sentiment)
            .await
        {
            Ok(recommendations) => recommendations,
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "recommendation generation fell back");
                Vec::new()
            }
        }
    }

    async fn try_recommendations(
        &self,
        thread_count: usize,
        average_replies: f64,
        sentiment: &CommunitySentiment,
    ) -> Result<Vec<Recommendation>, InsightError> {
        let prompt = format!(
            "Suggest up to {} actions for the moderators of a forum community.\n\
Return a JSON array of objects with fields:\n\
- kind (one of \"action\", \"insight\", \"warning\")\n\
- priority (one of \"high\", \"medium\", \"low\")\n\
- title (short string)\n\
- description (one sentence)\n\
- action_items (optional array of short strings)\n\n\
Community snapshot:\n\
- threads: {}\n\
- average replies per thread: {:.1}\n\
- topic sentiment: {} positive, {} neutral, {} negative (overall {:.2})",
            RECOMMENDATION_LIMIT,
            thread_count,
            average_replies,
            sentiment.positive,
            sentiment.neutral,
            sentiment.negative,
            sentiment.score
        );
        let raw = self.generate(&prompt).await?;
        let payload: Vec<RecommendationPayload> = parse_array(&raw)?;

        let mut recommendations: Vec<Recommendation> = payload
            .into_iter()
            .filter(|entry| {
                !entry.title.trim().is_empty() && !entry.description.trim().is_empty()
            })
            .map(|entry| Recommendation {
                kind: entry.kind,
                priority: entry.priority,
                title: entry.title.trim().to_string(),
                description: entry.description.trim().to_string(),
                action_items: entry.action_items.map(|items| {
                    items
                        .into_iter()
                        .map(|item| item.trim().to_string())
                        .filter(|item| !item.is_empty())
                        .collect()
                }),
            })
            .collect();
        recommendations.truncate(RECOMMENDATION_LIMIT);
        Ok(recommendations)
    }
}
