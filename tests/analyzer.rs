mod common;

use std::sync::Arc;

use common::{post, tagged, thread, FailingGenerator, RoutedGenerator};
use forum_insight::adapters::summary::FALLBACK_SUMMARY;
use forum_insight::engine::bounded_content;
use forum_insight::{InsightConfig, InsightEngine, SentimentLabel, ToxicitySeverity};

fn engine_with(generator: Arc<dyn forum_insight::TextGenerator>) -> InsightEngine {
    InsightEngine::new(generator, &InsightConfig::default())
}

#[tokio::test]
async fn analysis_survives_a_dead_provider() {
    let generator = Arc::new(FailingGenerator::new());
    let engine = engine_with(generator.clone());

    let thread = thread("t-1");
    let posts = vec![post("p-1", "t-1", "user-2", "I ran into the same issue.")];
    let analysis = engine.analyze_thread(&thread, &posts).await;

    assert_eq!(analysis.thread_id, "t-1");
    assert_eq!(analysis.summary, FALLBACK_SUMMARY);
    assert_eq!(analysis.sentiment.overall, SentimentLabel::Neutral);
    assert!((analysis.sentiment.confidence - 0.0).abs() < 1e-9);
    assert!(!analysis.toxicity.flagged);
    assert_eq!(analysis.toxicity.severity, ToxicitySeverity::None);
    assert!(generator.call_count() > 0);
}

#[tokio::test]
async fn analysis_respects_structural_invariants() {
    let generator = Arc::new(FailingGenerator::new());
    let engine = engine_with(generator);

    let mut thread = tagged("t-2", &["rust", "async", "tokio"]);
    thread.reply_count = 42;
    thread.view_count = 9000;
    thread.title = "Why does my future never resolve?".to_string();
    let analysis = engine.analyze_thread(&thread, &[]).await;

    assert!(analysis.sentiment.score >= -1.0 && analysis.sentiment.score <= 1.0);
    assert!(analysis.engagement.score >= 0.0 && analysis.engagement.score <= 1.0);
    assert!(analysis.related_threads.len() <= 5);
    assert!(analysis.ai_insights.len() <= 4);
    assert!(!analysis.summary.is_empty());
}

#[tokio::test]
async fn second_analysis_within_ttl_skips_the_provider() {
    let generator = Arc::new(RoutedGenerator::new());
    let engine = engine_with(generator.clone());

    let thread = thread("t-3");
    let posts = vec![post("p-1", "t-3", "user-2", "Nice writeup.")];

    let first = engine.analyze_thread(&thread, &posts).await;
    let calls_after_first = generator.call_count();
    let second = engine.analyze_thread(&thread, &posts).await;

    assert_eq!(generator.call_count(), calls_after_first);
    assert_eq!(first.computed_at, second.computed_at);
    assert_eq!(first.summary, second.summary);
}

#[tokio::test]
async fn expired_ttl_invokes_the_provider_again() {
    let generator = Arc::new(RoutedGenerator::new());
    let mut config = InsightConfig::default();
    config.engine.cache_ttl_secs = 0;
    let engine = InsightEngine::new(generator.clone(), &config);

    let thread = thread("t-4");
    engine.analyze_thread(&thread, &[]).await;
    let calls_after_first = generator.call_count();
    engine.analyze_thread(&thread, &[]).await;

    assert!(generator.call_count() > calls_after_first);
}

#[tokio::test]
async fn changed_post_count_misses_the_cache() {
    let generator = Arc::new(RoutedGenerator::new());
    let engine = engine_with(generator.clone());

    let thread = thread("t-5");
    engine.analyze_thread(&thread, &[]).await;
    let calls_after_first = generator.call_count();
    let posts = vec![post("p-1", "t-5", "user-3", "New reply arrived.")];
    engine.analyze_thread(&thread, &posts).await;

    assert!(generator.call_count() > calls_after_first);
}

#[tokio::test]
async fn parsed_provider_output_lands_in_the_analysis() {
    let generator = Arc::new(RoutedGenerator::new());
    let engine = engine_with(generator);

    let mut thread = thread("t-6");
    thread.reply_count = 8;
    let analysis = engine.analyze_thread(&thread, &[]).await;

    assert_eq!(analysis.summary, "A focused discussion about the latest release.");
    assert_eq!(analysis.sentiment.overall, SentimentLabel::Positive);
    assert!((analysis.sentiment.score - 0.6).abs() < 1e-9);
    // Positive sentiment plus more than five replies triggers a promote action.
    assert!(analysis
        .suggested_actions
        .iter()
        .any(|action| action.action == forum_insight::ActionType::Promote));
}

#[test]
fn oversized_content_truncates_the_longest_piece_first() {
    let mut thread = thread("t-8");
    thread.title = "T".to_string();
    thread.body = "b".repeat(50);
    let posts = vec![
        post("p-1", "t-8", "user-2", &"x".repeat(500)),
        post("p-2", "t-8", "user-3", "short reply"),
    ];

    let content = bounded_content(&thread, &posts, 200);
    let pieces: Vec<&str> = content.split("\n---\n").collect();
    let total: usize = pieces.iter().map(|piece| piece.chars().count()).sum();

    assert!(total <= 200);
    // Only the longest piece gives up characters.
    assert!(content.contains(&"b".repeat(50)));
    assert!(content.contains("short reply"));
    assert!(pieces
        .iter()
        .any(|piece| piece.starts_with("xxx") && piece.chars().count() < 500));
}

#[test]
fn content_under_the_budget_is_untouched() {
    let thread = thread("t-9");
    let posts = vec![post("p-1", "t-9", "user-2", "fits fine")];

    let content = bounded_content(&thread, &posts, 2000);
    assert!(content.contains(&thread.title));
    assert!(content.contains("fits fine"));
}

#[tokio::test]
async fn clear_cache_drops_entries() {
    let generator = Arc::new(RoutedGenerator::new());
    let engine = engine_with(generator);

    let thread = thread("t-7");
    engine.analyze_thread(&thread, &[]).await;
    assert_eq!(engine.cached_analyses(), 1);
    engine.clear_cache();
    assert_eq!(engine.cached_analyses(), 0);
}
