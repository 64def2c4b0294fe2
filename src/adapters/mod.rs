pub mod freeform;
pub mod moderation;
pub mod recommend;
pub mod sentiment;
pub mod summary;
pub mod trending;

use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::error::InsightError;
use crate::llm::TextGenerator;
use crate::Thread;

pub use sentiment::CommunitySentiment;

/// Prompt/response adapters over the generative-text collaborator. Every
/// adapter is total: for any input it returns a value conforming to its
/// output type, substituting a typed fallback on service, parse, or
/// validation failure.
pub struct InsightAdapters {
    generator: Arc<dyn TextGenerator>,
}

impl InsightAdapters {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub(crate) async fn generate(&self, prompt: &str) -> Result<String, InsightError> {
        self.generator.generate(prompt).await
    }
}

/// Extracts the outermost JSON object substring and deserializes it. Every
/// failure mode is reported as a `MalformedResponse` variant, never a panic.
pub(crate) fn parse_object<T: DeserializeOwned>(raw: &str) -> Result<T, InsightError> {
    let payload = slice_between(raw, '{', '}')
        .ok_or_else(|| InsightError::MalformedResponse("no JSON object in response".to_string()))?;
    serde_json::from_str(payload)
        .map_err(|err| InsightError::MalformedResponse(format!("JSON object parse failed: {}", err)))
}

/// Array counterpart of `parse_object`.
pub(crate) fn parse_array<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>, InsightError> {
    let payload = slice_between(raw, '[', ']')
        .ok_or_else(|| InsightError::MalformedResponse("no JSON array in response".to_string()))?;
    serde_json::from_str(payload)
        .map_err(|err| InsightError::MalformedResponse(format!("JSON array parse failed: {}", err)))
}

fn slice_between(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    if start >= end {
        return None;
    }
    Some(&text[start..=end])
}

/// Compact one-line-per-thread digest used by the batch prompts.
pub(crate) fn thread_digest(threads: &[Thread]) -> String {
    threads
        .iter()
        .map(|thread| {
            format!(
                "- [{}] \"{}\" replies={} views={}",
                thread.id, thread.title, thread.reply_count, thread.view_count
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
