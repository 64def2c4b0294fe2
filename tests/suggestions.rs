mod common;

use std::sync::Arc;

use common::{tagged, thread, DownForum, FailingGenerator, StaticForum};
use forum_insight::suggest::{extract_keywords, smart_suggestions};
use forum_insight::{InsightConfig, InsightEngine};

#[test]
fn keywords_are_normalized_and_filtered() {
    let keywords = extract_keywords("The Cache, the cache and a TTL: caching questions remain!");
    assert_eq!(keywords, vec!["cache", "caching", "questions", "remain"]);
}

#[test]
fn keywords_stop_after_ten_tokens() {
    let text = "alpha bravo charlie delta echoes foxtrot golfing hotels india juliet kilos limas";
    let keywords = extract_keywords(text);
    assert_eq!(keywords.len(), 10);
    assert_eq!(keywords[0], "alpha");
    assert!(!keywords.contains(&"limas".to_string()));
}

#[test]
fn tag_matches_outrank_keyword_matches() {
    let mut thread = tagged("t-1", &["rust", "performance", "tokio"]);
    thread.title = "Benchmarking async executors".to_string();
    thread.body = "Comparing scheduler latency under load".to_string();

    let suggestions = smart_suggestions(&thread, 5);

    // Two tag candidates, then two keyword candidates.
    assert_eq!(suggestions.len(), 4);
    assert!((suggestions[0].similarity - 0.8).abs() < 1e-9);
    assert!((suggestions[1].similarity - 0.7).abs() < 1e-9);
    assert!((suggestions[2].similarity - 0.7).abs() < 1e-9);
    assert!((suggestions[3].similarity - 0.6).abs() < 1e-9);
    assert!(suggestions[0].title.contains("rust"));
    assert!(suggestions[1].title.contains("performance"));
}

#[test]
fn limit_truncates_the_candidate_list() {
    let thread = tagged("t-2", &["rust", "tokio"]);
    let suggestions = smart_suggestions(&thread, 1);
    assert_eq!(suggestions.len(), 1);
    assert!((suggestions[0].similarity - 0.8).abs() < 1e-9);
}

#[test]
fn untagged_thread_falls_back_to_keywords() {
    let mut thread = thread("t-3");
    thread.title = "Moderation backlog growing".to_string();
    thread.body = String::new();

    let suggestions = smart_suggestions(&thread, 5);

    assert_eq!(suggestions.len(), 2);
    assert!(suggestions[0].title.contains("moderation"));
    assert!((suggestions[0].similarity - 0.7).abs() < 1e-9);
}

#[test]
fn similarities_are_non_increasing() {
    let mut thread = tagged("t-4", &["rust", "tokio", "async"]);
    thread.title = "Scheduler fairness questions".to_string();

    let suggestions = smart_suggestions(&thread, 5);
    for pair in suggestions.windows(2) {
        assert!(pair[0].similarity >= pair[1].similarity);
    }
}

fn bare_engine() -> InsightEngine {
    InsightEngine::new(Arc::new(FailingGenerator::new()), &InsightConfig::default())
}

#[tokio::test]
async fn known_thread_resolves_through_the_forum() {
    let forum = StaticForum::new(vec![tagged("t-5", &["rust", "tokio"]), thread("t-6")]);
    let engine = bare_engine().with_forum(Arc::new(forum));

    let suggestions = engine.generate_smart_suggestions("t-5", 5).await;

    assert!(!suggestions.is_empty());
    assert!((suggestions[0].similarity - 0.8).abs() < 1e-9);
    assert!(suggestions[0].title.contains("rust"));
}

#[tokio::test]
async fn unknown_thread_yields_no_suggestions() {
    let forum = StaticForum::new(vec![thread("t-7")]);
    let engine = bare_engine().with_forum(Arc::new(forum));

    let suggestions = engine.generate_smart_suggestions("missing", 5).await;
    assert!(suggestions.is_empty());
}

#[tokio::test]
async fn missing_forum_collaborator_yields_no_suggestions() {
    let engine = bare_engine();
    let suggestions = engine.generate_smart_suggestions("t-8", 5).await;
    assert!(suggestions.is_empty());
}

#[tokio::test]
async fn unreachable_forum_yields_no_suggestions() {
    let engine = bare_engine().with_forum(Arc::new(DownForum));
    let suggestions = engine.generate_smart_suggestions("t-9", 5).await;
    assert!(suggestions.is_empty());
}
