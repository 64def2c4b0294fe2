use serde::Deserialize;
use tracing::warn;

use crate::adapters::{parse_object, InsightAdapters};
use crate::error::InsightError;

/// Substituted whenever summarization fails; `ThreadAnalysis.summary` is
/// always non-empty.
pub const FALLBACK_SUMMARY: &str = "Discussion summary is unavailable right now.";

#[derive(Deserialize)]
struct SummaryPayload {
    summary: String,
}

impl InsightAdapters {
    pub async fn summarize(&self, content: &str) -> String {
        match self.try_summarize(content).await {
            Ok(summary) => summary,
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "summarization fell back");
                FALLBACK_SUMMARY.to_string()
            }
        }
    }

    async fn try_summarize(&self, content: &str) -> Result<String, InsightError> {
        let prompt = format!(
            "Summarize this forum discussion in 1-2 sentences.\n\
Return a single JSON object with one field:\n\
- summary (string, at most 280 characters)\n\n\
Discussion:\n{}",
            content
        );
        let raw = self.generate(&prompt).await?;
        let payload: SummaryPayload = parse_object(&raw)?;
        let summary = payload.summary.trim().to_string();
        if summary.is_empty() {
            return Err(InsightError::MalformedResponse(
                "empty summary field".to_string(),
            ));
        }
        Ok(summary)
    }
}
