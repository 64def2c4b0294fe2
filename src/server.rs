use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::api::{
    AnalyzeRequest, AnalyzeResponse, HealthRequest, HealthResponse, SuggestionQuery,
    SuggestionResponse,
};
use forum_insight::suggest::DEFAULT_SUGGESTION_LIMIT;
use forum_insight::InsightEngine;

#[derive(Clone)]
struct AppState {
    engine: Arc<InsightEngine>,
}

pub async fn serve(engine: Arc<InsightEngine>, host: &str, port: u16) -> Result<(), String> {
    let state = AppState { engine };

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/threads/analyze", post(analyze_handler))
        .route("/api/community/health", post(community_health_handler))
        .route("/api/suggestions", get(suggestions_handler))
        .route("/api/cache", delete(clear_cache_handler))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    axum::serve(
        tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|err| format!("failed to bind server: {}", err))?,
        app,
    )
    .await
    .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, (StatusCode, String)> {
    request
        .validate()
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;
    let analysis = state
        .engine
        .analyze_thread(&request.thread, &request.posts)
        .await;
    Ok(Json(AnalyzeResponse { analysis }))
}

async fn community_health_handler(
    State(state): State<AppState>,
    Json(request): Json<HealthRequest>,
) -> Json<HealthResponse> {
    let metrics = state.engine.analyze_community_health(&request.threads).await;
    Json(HealthResponse { metrics })
}

async fn suggestions_handler(
    State(state): State<AppState>,
    Query(query): Query<SuggestionQuery>,
) -> Result<Json<SuggestionResponse>, (StatusCode, String)> {
    if query.thread_id.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "thread_id is required".to_string()));
    }
    let limit = query.limit.unwrap_or(DEFAULT_SUGGESTION_LIMIT);
    let suggestions = state
        .engine
        .generate_smart_suggestions(&query.thread_id, limit)
        .await;
    Ok(Json(SuggestionResponse { suggestions }))
}

async fn clear_cache_handler(State(state): State<AppState>) -> impl IntoResponse {
    state.engine.clear_cache();
    StatusCode::NO_CONTENT
}
