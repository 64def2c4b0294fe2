use tracing::warn;

use crate::adapters::{parse_array, InsightAdapters};
use crate::error::InsightError;
use crate::{Post, Thread};

/// Substituted when reply drafting fails.
pub const FALLBACK_REPLY: &str = "Thanks for contributing to the discussion.";

const TOPIC_SUGGESTION_LIMIT: usize = 5;

impl InsightAdapters {
    /// Drafts a short reply to a thread. Free text, no JSON envelope.
    pub async fn draft_reply(&self, thread: &Thread, posts: &[Post]) -> String {
        match self.try_draft_reply(thread, posts).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(kind = err.kind(), error = %err, thread_id = %thread.id, "reply drafting fell back");
                FALLBACK_REPLY.to_string()
            }
        }
    }

    async fn try_draft_reply(&self, thread: &Thread, posts: &[Post]) -> Result<String, InsightError> {
        let recent = posts
            .iter()
            .rev()
            .take(3)
            .map(|post| format!("- {}", post.content))
            .collect::<Vec<_>>()
            .join("\n");
        let prompt = format!(
            "Draft a short, friendly reply (2-3 sentences, plain text, no JSON) \
to this forum thread.\n\n\
Title: {}\n\
Body: {}\n\
Latest replies:\n{}",
            thread.title, thread.body, recent
        );
        let raw = self.generate(&prompt).await?;
        let reply = raw.trim().to_string();
        if reply.is_empty() {
            return Err(InsightError::MalformedResponse("empty reply".to_string()));
        }
        Ok(reply)
    }

    /// Rewrites content for clarity. On any failure the input is returned
    /// unchanged, so this never loses the author's text.
    pub async fn improve_content(&self, text: &str) -> String {
        match self.try_improve_content(text).await {
            Ok(improved) => improved,
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "content improvement fell back");
                text.to_string()
            }
        }
    }

    async fn try_improve_content(&self, text: &str) -> Result<String, InsightError> {
        if text.trim().is_empty() {
            return Err(InsightError::InvalidInput("empty content".to_string()));
        }
        let prompt = format!(
            "Rewrite this forum post for clarity and tone. Keep the author's \
meaning and rough length. Output the rewritten text only, no JSON, no \
commentary.\n\n{}",
            text
        );
        let raw = self.generate(&prompt).await?;
        let improved = raw.trim().to_string();
        if improved.is_empty() {
            return Err(InsightError::MalformedResponse("empty rewrite".to_string()));
        }
        Ok(improved)
    }

    /// Topic ideas for authors, seeded from tag names.
    pub async fn suggest_topics(&self, tags: &[String]) -> Vec<String> {
        match self.try_suggest_topics(tags).await {
            Ok(topics) => topics,
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "topic suggestion fell back");
                Vec::new()
            }
        }
    }

    async fn try_suggest_topics(&self, tags: &[String]) -> Result<Vec<String>, InsightError> {
        if tags.is_empty() {
            return Err(InsightError::InvalidInput("no tags provided".to_string()));
        }
        let prompt = format!(
            "Suggest up to {} new discussion topics for a forum community \
interested in: {}.\n\
Return a JSON array of short topic strings.",
            TOPIC_SUGGESTION_LIMIT,
            tags.join(", ")
        );
        let raw = self.generate(&prompt).await?;
        let payload: Vec<String> = parse_array(&raw)?;
        let mut topics: Vec<String> = payload
            .into_iter()
            .map(|topic| topic.trim().to_string())
            .filter(|topic| !topic.is_empty())
            .collect();
        topics.truncate(TOPIC_SUGGESTION_LIMIT);
        Ok(topics)
    }
}
