use serde::Deserialize;
use tracing::warn;

use crate::adapters::{parse_object, InsightAdapters};
use crate::error::InsightError;
use crate::{ModerationResult, ToxicitySeverity};

#[derive(Deserialize)]
struct ModerationPayload {
    flagged: bool,
    severity: ToxicitySeverity,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    reasoning: String,
}

impl InsightAdapters {
    pub async fn moderation(&self, content: &str) -> ModerationResult {
        match self.try_moderation(content).await {
            Ok(result) => result,
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "moderation analysis fell back");
                ModerationResult::clean()
            }
        }
    }

    async fn try_moderation(&self, content: &str) -> Result<ModerationResult, InsightError> {
        let prompt = format!(
            "Review this forum content for toxicity and policy violations.\n\
Return a single JSON object with fields:\n\
- flagged (true only if the content needs moderator attention)\n\
- severity (one of \"high\", \"medium\", \"low\", \"none\")\n\
- categories (array of short category strings, empty if clean)\n\
- reasoning (one short sentence)\n\n\
Content:\n{}",
            content
        );
        let raw = self.generate(&prompt).await?;
        let payload: ModerationPayload = parse_object(&raw)?;

        let mut categories = payload.categories;
        categories.retain(|category| !category.trim().is_empty());
        categories.sort();
        categories.dedup();

        // An unflagged result cannot carry a severity.
        let severity = if payload.flagged {
            payload.severity
        } else {
            ToxicitySeverity::None
        };

        let reasoning = if payload.reasoning.trim().is_empty() {
            "No issues detected.".to_string()
        } else {
            payload.reasoning.trim().to_string()
        };

        Ok(ModerationResult {
            flagged: payload.flagged,
            severity,
            categories,
            reasoning,
        })
    }
}
