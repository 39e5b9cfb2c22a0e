use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::{get, post}, Json, Router};
use search_core::loader::build_index;
use search_core::shared::IndexStats;
use search_core::{Occurrence, SharedIndex};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub kw1: String,
    #[serde(default)]
    pub kw2: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { search_core::query::TOP_RESULTS }

#[derive(Serialize)]
pub struct SearchResponse {
    pub kw1: String,
    pub kw2: String,
    pub took_ms: u128,
    pub took_s: f64,
    /// false when neither keyword is indexed
    pub matched: bool,
    pub results: Option<Vec<String>>,
}

/// Where the index is rebuilt from on reload.
#[derive(Clone, Debug)]
pub struct Sources {
    pub docs: PathBuf,
    pub noise: PathBuf,
}

#[derive(Clone)]
pub struct AppState {
    pub index: Arc<SharedIndex>,
    pub sources: Sources,
    pub admin_token: Option<String>,
}

pub fn build_app(sources: Sources) -> Result<Router> {
    // Build the index at startup
    let (index, noise_words) = build_index(&sources.docs, &sources.noise)?;
    let admin_token = std::env::var("ADMIN_TOKEN").ok();
    let app_state = AppState {
        index: Arc::new(SharedIndex::new(index, noise_words)),
        sources,
        admin_token,
    };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/keyword/:keyword", get(keyword_handler))
        .route("/stats", get(stats_handler))
        .route("/index/reload", post(reload_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let k = params.k.clamp(1, 100);
    // query words are normalized the way indexed words were
    let results = state.index.query(params.kw1.trim(), params.kw2.trim(), k);

    let elapsed = start.elapsed();
    tracing::debug!(kw1 = %params.kw1, kw2 = %params.kw2, hits = results.as_ref().map_or(0, Vec::len), "search");
    Json(SearchResponse {
        kw1: params.kw1,
        kw2: params.kw2,
        took_ms: elapsed.as_millis(),
        took_s: elapsed.as_secs_f64(),
        matched: results.is_some(),
        results,
    })
}

pub async fn keyword_handler(State(state): State<AppState>, Path(keyword): Path<String>) -> Result<Json<Vec<Occurrence>>, StatusCode> {
    state.index.lookup(keyword.trim()).map(Json).ok_or(StatusCode::NOT_FOUND)
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<IndexStats> {
    Json(state.index.stats())
}

async fn reload_handler(State(state): State<AppState>, headers: axum::http::HeaderMap) -> Result<Json<IndexStats>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let sources = state.sources.clone();
    let built = tokio::task::spawn_blocking(move || build_index(&sources.docs, &sources.noise))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let (index, noise_words) = built.map_err(|e| {
        tracing::warn!(error = %e, "reload failed");
        (StatusCode::SERVICE_UNAVAILABLE, e.to_string())
    })?;

    state.index.replace(index, noise_words);
    let stats = state.index.stats();
    tracing::info!(keywords = stats.keywords, "index reloaded");
    Ok(Json(stats))
}

fn authorize(state: &AppState, headers: &axum::http::HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
