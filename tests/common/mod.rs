#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};

use forum_insight::{ForumData, InsightError, Post, Tag, TextGenerator, Thread, ThreadPage};

pub fn thread(id: &str) -> Thread {
    Thread {
        id: id.to_string(),
        title: "Weekly release discussion".to_string(),
        body: "What changed in the latest release and how does it affect plugins".to_string(),
        created_at: Utc::now() - Duration::hours(2),
        pinned: false,
        tags: Vec::new(),
        reply_count: 0,
        view_count: 0,
        author_id: "user-1".to_string(),
    }
}

pub fn tagged(thread_id: &str, tags: &[&str]) -> Thread {
    let mut result = thread(thread_id);
    result.tags = tags
        .iter()
        .enumerate()
        .map(|(index, name)| Tag {
            id: format!("tag-{}", index),
            name: name.to_string(),
        })
        .collect();
    result
}

pub fn post(id: &str, thread_id: &str, author_id: &str, content: &str) -> Post {
    Post {
        id: id.to_string(),
        thread_id: thread_id.to_string(),
        content: content.to_string(),
        author_id: author_id.to_string(),
        created_at: Utc::now() - Duration::hours(1),
    }
}

/// Generator that always fails with `ServiceUnavailable`, simulating a down
/// or throttled provider.
pub struct FailingGenerator {
    pub calls: AtomicUsize,
}

impl FailingGenerator {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, InsightError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(InsightError::ServiceUnavailable("provider down".to_string()))
    }
}

/// Generator that returns the same canned response for every call.
pub struct StaticGenerator {
    pub response: String,
    pub calls: AtomicUsize,
}

impl StaticGenerator {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for StaticGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, InsightError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

/// In-memory forum serving a fixed thread list.
pub struct StaticForum {
    pub threads: Vec<Thread>,
}

impl StaticForum {
    pub fn new(threads: Vec<Thread>) -> Self {
        Self { threads }
    }
}

#[async_trait]
impl ForumData for StaticForum {
    async fn list_threads(&self, limit: usize) -> Result<ThreadPage, InsightError> {
        let threads: Vec<Thread> = self.threads.iter().take(limit).cloned().collect();
        let count = threads.len();
        Ok(ThreadPage {
            threads,
            next_cursor: None,
            count,
        })
    }

    async fn list_posts(&self, _thread_id: &str) -> Result<Vec<Post>, InsightError> {
        Ok(Vec::new())
    }
}

/// Forum whose every call fails, simulating an unreachable data API.
pub struct DownForum;

#[async_trait]
impl ForumData for DownForum {
    async fn list_threads(&self, _limit: usize) -> Result<ThreadPage, InsightError> {
        Err(InsightError::ServiceUnavailable("forum down".to_string()))
    }

    async fn list_posts(&self, _thread_id: &str) -> Result<Vec<Post>, InsightError> {
        Err(InsightError::ServiceUnavailable("forum down".to_string()))
    }
}

/// Generator that answers each adapter task with well-formed JSON, routed by
/// prompt markers. Counts calls for cache assertions.
pub struct RoutedGenerator {
    pub calls: AtomicUsize,
}

impl RoutedGenerator {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for RoutedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, InsightError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if prompt.contains("- summary (string") {
            return Ok(r#"{"summary": "A focused discussion about the latest release."}"#.to_string());
        }
        if prompt.contains("overall (one of") {
            return Ok(r#"{"overall": "positive", "score": 0.6, "confidence": 0.9}"#.to_string());
        }
        if prompt.contains("positive (count of positive topics)") {
            return Ok(
                r#"{"positive": 3, "neutral": 1, "negative": 1, "score": 0.4, "confidence": 0.8}"#
                    .to_string(),
            );
        }
        if prompt.contains("flagged (true only if") {
            return Ok(
                r#"{"flagged": false, "severity": "none", "categories": [], "reasoning": "Civil discussion."}"#
                    .to_string(),
            );
        }
        if prompt.contains("trending discussion topics") {
            return Ok(
                r#"[{"topic": "releases", "mentions": 4, "sentiment": 0.5}, {"topic": "plugins", "mentions": 2, "sentiment": 0.1}]"#
                    .to_string(),
            );
        }
        if prompt.contains("actions for the moderators") {
            return Ok(
                r#"[{"kind": "insight", "priority": "medium", "title": "Sentiment is improving", "description": "Positive topics outnumber negative ones."}]"#
                    .to_string(),
            );
        }
        Ok("All good.".to_string())
    }
}
