mod api;
mod server;

use clap::{Args, Parser, Subcommand};
use std::env;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use api::{AnalyzeRequest, HealthRequest};
use forum_insight::suggest::DEFAULT_SUGGESTION_LIMIT;
use forum_insight::{
    DisabledGenerator, ForumClient, InsightConfig, InsightEngine, LlmClient, TextGenerator,
    ThreadAnalysis,
};

#[derive(Parser)]
#[command(name = "forum-insight", about = "Community insight engine for forum content")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze one thread (JSON `{thread, posts}` from --file or stdin)
    Analyze(AnalyzeArgs),
    /// Community health snapshot (JSON `{threads}` from --file or stdin)
    Health(HealthArgs),
    /// Related-content suggestions for a thread fetched from the forum API
    Suggest(SuggestArgs),
    /// Run the JSON API server
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
struct AnalyzeArgs {
    #[arg(long)]
    file: Option<PathBuf>,
    #[arg(long)]
    model: Option<String>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct HealthArgs {
    #[arg(long)]
    file: Option<PathBuf>,
    #[arg(long)]
    model: Option<String>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct SuggestArgs {
    #[arg(long)]
    thread_id: String,
    #[arg(long, default_value_t = DEFAULT_SUGGESTION_LIMIT)]
    limit: usize,
}

#[derive(Args, Debug, Clone)]
struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let (config, _) = InsightConfig::load(cli.config.clone()).map_err(|err| err.to_string())?;

    match cli.command {
        Command::Analyze(args) => run_analyze(args, &config).await,
        Command::Health(args) => run_health(args, &config).await,
        Command::Suggest(args) => run_suggest(args, &config).await,
        Command::Serve(args) => {
            let engine = build_engine(&config, None)?;
            server::serve(Arc::new(engine), &args.host, args.port).await
        }
    }
}

/// Builds the engine from the merged file/env config. Credentials stay in the
/// environment; everything else (base URLs, model, timeouts) comes from the
/// config.
fn build_engine(config: &InsightConfig, model_override: Option<String>) -> Result<InsightEngine, String> {
    let mut llm_config = config.llm.clone();
    if let Some(model) = model_override {
        llm_config.model = model;
    }
    let generator: Arc<dyn TextGenerator> = match env::var("LLM_API_KEY") {
        Ok(api_key) => Arc::new(
            LlmClient::from_config(&llm_config, api_key).map_err(|err| err.to_string())?,
        ),
        Err(_) => {
            eprintln!("LLM_API_KEY is not set; analyses will use heuristic fallbacks only");
            Arc::new(DisabledGenerator)
        }
    };
    let token = env::var("FORUM_API_TOKEN")
        .ok()
        .filter(|value| !value.trim().is_empty());
    let forum = ForumClient::from_config(&config.forum, token).map_err(|err| err.to_string())?;
    Ok(InsightEngine::new(generator, config).with_forum(Arc::new(forum)))
}

async fn run_analyze(args: AnalyzeArgs, config: &InsightConfig) -> Result<(), String> {
    let payload = read_input(args.file.as_deref())?;
    let request: AnalyzeRequest = serde_json::from_str(&payload)
        .map_err(|err| format!("invalid analyze input: {}", err))?;
    request.validate()?;

    let engine = build_engine(config, args.model)?;
    let analysis = engine.analyze_thread(&request.thread, &request.posts).await;

    if args.json {
        println!("{}", to_json(&analysis)?);
        return Ok(());
    }
    print_analysis(&analysis);
    Ok(())
}

async fn run_health(args: HealthArgs, config: &InsightConfig) -> Result<(), String> {
    let payload = read_input(args.file.as_deref())?;
    let request: HealthRequest = serde_json::from_str(&payload)
        .map_err(|err| format!("invalid health input: {}", err))?;

    let engine = build_engine(config, args.model)?;
    let metrics = engine.analyze_community_health(&request.threads).await;

    if args.json {
        println!("{}", to_json(&metrics)?);
        return Ok(());
    }

    println!(
        "Community health: {:.2} ({}) trend {:?}",
        metrics.overall.score, metrics.overall.status.label(), metrics.overall.trend
    );
    println!(
        "Sentiment: {} positive | {} neutral | {} negative",
        metrics.sentiment.positive, metrics.sentiment.neutral, metrics.sentiment.negative
    );
    println!(
        "Engagement: {:.1} avg replies | {:.0} avg views | {} active users",
        metrics.engagement.average_replies,
        metrics.engagement.average_views,
        metrics.engagement.active_users
    );
    println!(
        "Content quality: {:.2} ({} helpful, {} toxic)",
        metrics.content_quality.score,
        metrics.content_quality.helpful_content,
        metrics.content_quality.toxic_content
    );
    if !metrics.recommendations.is_empty() {
        println!("\nRecommendations:");
        for recommendation in &metrics.recommendations {
            println!("- [{:?}] {}: {}", recommendation.priority, recommendation.title, recommendation.description);
        }
    }
    Ok(())
}

async fn run_suggest(args: SuggestArgs, config: &InsightConfig) -> Result<(), String> {
    let token = env::var("FORUM_API_TOKEN")
        .ok()
        .filter(|value| !value.trim().is_empty());
    let forum =
        ForumClient::from_config(&config.forum, token).map_err(|err| err.to_string())?;
    let engine = InsightEngine::new(Arc::new(DisabledGenerator), config).with_forum(Arc::new(forum));

    let suggestions = engine
        .generate_smart_suggestions(&args.thread_id, args.limit)
        .await;
    if suggestions.is_empty() {
        println!("No suggestions for thread {}", args.thread_id);
        return Ok(());
    }
    for suggestion in suggestions {
        println!(
            "- {} (similarity {:.1}): {}",
            suggestion.title, suggestion.similarity, suggestion.reason
        );
    }
    Ok(())
}

fn print_analysis(analysis: &ThreadAnalysis) {
    println!("Thread {}", analysis.thread_id);
    println!("Summary: {}", analysis.summary);
    println!(
        "Sentiment: {} (score {:.2}, confidence {:.2})",
        analysis.sentiment.overall.label(),
        analysis.sentiment.score,
        analysis.sentiment.confidence
    );
    println!(
        "Toxicity: {} (severity {})",
        if analysis.toxicity.flagged { "flagged" } else { "clean" },
        analysis.toxicity.severity.label()
    );
    println!(
        "Engagement: {:.2} ({})",
        analysis.engagement.score,
        analysis.engagement.level.label()
    );
    for factor in &analysis.engagement.factors {
        println!("  - {}", factor);
    }
    if !analysis.suggested_actions.is_empty() {
        println!("Suggested actions:");
        for action in &analysis.suggested_actions {
            println!("  - {:?} ({:?}): {}", action.action, action.priority, action.reason);
        }
    }
    if !analysis.ai_insights.is_empty() {
        println!("Insights:");
        for insight in &analysis.ai_insights {
            println!("  - {}", insight);
        }
    }
    if !analysis.related_threads.is_empty() {
        println!("Related:");
        for related in &analysis.related_threads {
            println!("  - {} (similarity {:.1})", related.title, related.similarity);
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|err| format!("failed to serialize output: {}", err))
}

fn read_input(file: Option<&Path>) -> Result<String, String> {
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .map_err(|err| format!("failed to read {}: {}", path.display(), err));
    }
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|err| format!("failed reading stdin: {}", err))?;
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Err("missing input: pass --file or pipe stdin".to_string());
    }
    Ok(trimmed.to_string())
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
