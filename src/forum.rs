use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use std::time::Duration;

use crate::config::ForumConfig;
use crate::error::InsightError;
use crate::{Post, Thread};

#[derive(Debug, Clone)]
pub struct ThreadPage {
    pub threads: Vec<Thread>,
    pub next_cursor: Option<String>,
    pub count: usize,
}

/// Read access to the forum data API.
#[async_trait]
pub trait ForumData: Send + Sync {
    async fn list_threads(&self, limit: usize) -> Result<ThreadPage, InsightError>;
    async fn list_posts(&self, thread_id: &str) -> Result<Vec<Post>, InsightError>;
}

#[derive(Clone)]
pub struct ForumClient {
    client: reqwest::Client,
    api_base: String,
    token: Option<String>,
}

impl ForumClient {
    pub fn from_config(config: &ForumConfig, token: Option<String>) -> Result<Self, InsightError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| InsightError::Config(format!("failed to build forum client: {}", err)))?;
        Ok(Self {
            client,
            api_base: config.api_base.clone(),
            token,
        })
    }

    fn request(&self, url: String) -> reqwest::RequestBuilder {
        let mut request = self.client.get(url);
        if let Some(token) = self.token.as_ref() {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        request
    }
}

#[async_trait]
impl ForumData for ForumClient {
    async fn list_threads(&self, limit: usize) -> Result<ThreadPage, InsightError> {
        let url = format!("{}/threads", self.api_base.trim_end_matches('/'));
        let response = self
            .request(url)
            .query(&[("limit", limit.to_string())])
            .send()
            .await
            .map_err(|err| InsightError::ServiceUnavailable(format!("forum request failed: {}", err)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(InsightError::ServiceUnavailable(format!(
                "forum api error: {}",
                status
            )));
        }

        let body: ThreadListResponse = response
            .json()
            .await
            .map_err(|err| InsightError::MalformedResponse(format!("forum response parse failed: {}", err)))?;

        let count = body.count.unwrap_or(body.threads.len());
        Ok(ThreadPage {
            threads: body.threads,
            next_cursor: body.next_cursor,
            count,
        })
    }

    async fn list_posts(&self, thread_id: &str) -> Result<Vec<Post>, InsightError> {
        if thread_id.trim().is_empty() {
            return Err(InsightError::InvalidInput("missing thread id".to_string()));
        }
        let url = format!(
            "{}/threads/{}/posts",
            self.api_base.trim_end_matches('/'),
            thread_id
        );
        let response = self
            .request(url)
            .send()
            .await
            .map_err(|err| InsightError::ServiceUnavailable(format!("forum request failed: {}", err)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(InsightError::ServiceUnavailable(format!(
                "forum api error: {}",
                status
            )));
        }

        let body: PostListResponse = response
            .json()
            .await
            .map_err(|err| InsightError::MalformedResponse(format!("forum response parse failed: {}", err)))?;

        Ok(body.posts)
    }
}

#[derive(Deserialize)]
struct ThreadListResponse {
    threads: Vec<Thread>,
    next_cursor: Option<String>,
    count: Option<usize>,
}

#[derive(Deserialize)]
struct PostListResponse {
    posts: Vec<Post>,
}
