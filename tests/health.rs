mod common;

use std::sync::Arc;

use common::{thread, FailingGenerator, RoutedGenerator};
use forum_insight::{HealthStatus, HealthTrend, InsightConfig, InsightEngine, Thread};

fn engine_with(generator: Arc<dyn forum_insight::TextGenerator>) -> InsightEngine {
    InsightEngine::new(generator, &InsightConfig::default())
}

fn batch() -> Vec<Thread> {
    let mut first = thread("t-1");
    first.reply_count = 6;
    first.view_count = 120;
    first.author_id = "user-1".to_string();

    let mut second = thread("t-2");
    second.reply_count = 2;
    second.view_count = 60;
    second.author_id = "user-2".to_string();

    let mut third = thread("t-3");
    third.reply_count = 4;
    third.view_count = 90;
    third.author_id = "user-1".to_string();

    vec![first, second, third]
}

#[tokio::test]
async fn empty_batch_returns_the_neutral_snapshot() {
    let generator = Arc::new(FailingGenerator::new());
    let engine = engine_with(generator.clone());

    let metrics = engine.analyze_community_health(&[]).await;

    assert!((metrics.overall.score - 0.5).abs() < 1e-9);
    assert_eq!(metrics.overall.status, HealthStatus::Healthy);
    assert_eq!(metrics.sentiment.positive, 0);
    assert_eq!(metrics.sentiment.neutral, 0);
    assert_eq!(metrics.sentiment.negative, 0);
    assert_eq!(metrics.engagement.active_users, 0);
    assert!(metrics.recommendations.is_empty());
    // Terminal case: no provider call at all.
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn degraded_snapshot_when_the_provider_is_down() {
    let generator = Arc::new(FailingGenerator::new());
    let engine = engine_with(generator);

    let threads = batch();
    let metrics = engine.analyze_community_health(&threads).await;

    // Fallback counts every thread as neutral.
    assert_eq!(metrics.sentiment.positive, 0);
    assert_eq!(metrics.sentiment.neutral, 3);
    assert_eq!(metrics.sentiment.negative, 0);
    assert!(metrics.recommendations.is_empty());
    assert!(metrics.overall.score >= 0.0 && metrics.overall.score <= 1.0);
    assert_eq!(metrics.overall.trend, HealthTrend::Stable);
}

#[tokio::test]
async fn aggregates_are_plain_means_and_distinct_authors() {
    let generator = Arc::new(FailingGenerator::new());
    let engine = engine_with(generator);

    let threads = batch();
    let metrics = engine.analyze_community_health(&threads).await;

    assert!((metrics.engagement.average_replies - 4.0).abs() < 1e-9);
    assert!((metrics.engagement.average_views - 90.0).abs() < 1e-9);
    assert_eq!(metrics.engagement.active_users, 2);
}

#[tokio::test]
async fn parsed_sentiment_drives_counts_and_trend() {
    let generator = Arc::new(RoutedGenerator::new());
    let engine = engine_with(generator);

    let threads = batch();
    let metrics = engine.analyze_community_health(&threads).await;

    assert_eq!(metrics.sentiment.positive, 3);
    assert_eq!(metrics.sentiment.neutral, 1);
    assert_eq!(metrics.sentiment.negative, 1);
    // Overall batch score 0.4 > 0.2 reads as improving.
    assert_eq!(metrics.overall.trend, HealthTrend::Improving);
    assert_eq!(metrics.recommendations.len(), 1);
    assert_eq!(metrics.recommendations[0].title, "Sentiment is improving");
    assert_eq!(metrics.content_quality.helpful_content, 3);
    assert_eq!(metrics.content_quality.toxic_content, 1);
}

#[tokio::test]
async fn trending_topics_parse_and_cap() {
    let generator = Arc::new(RoutedGenerator::new());
    let engine = engine_with(generator);

    let threads = batch();
    let topics = engine.trending_topics(&threads, 1).await;

    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0].topic, "releases");
}
