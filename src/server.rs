//! JSON HTTP API over the ranking engine.
//!
//! A palette UI calls `POST /search` on every keystroke, pushes live
//! vocabulary (running service names, project names) with
//! `PUT /commands/{id}/keywords`, and drops it again with `DELETE /keywords`
//! when that context closes.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`    | `/health` | Health check (returns version) |
//! | `GET`    | `/commands` | Full catalogue in catalogue order |
//! | `POST`   | `/search` | Rank commands for `{ "query": "..." }` |
//! | `PUT`    | `/commands/{id}/keywords` | Replace one command's dynamic keywords |
//! | `DELETE` | `/keywords` | Clear dynamic keywords on every command |
//! | `POST`   | `/params/{name}/search` | Rank one parameter list |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "not_found", "message": "unknown parameter list: envs" } }
//! ```
//!
//! A `query` that is missing, `null`, or not a string is treated as an empty
//! query and returns the whole list, never an error. A body that is not JSON,
//! or a `limit` of zero, answers `bad_request`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use intent_rank_core::models::{Command, ParamOption};
use intent_rank_core::search::{RankedCommand, TokenExplanation};

use crate::catalog::{load_catalog, Palette};
use crate::config::Config;

#[derive(Clone)]
struct AppState {
    palette: Arc<Palette>,
    default_limit: usize,
    default_explain: bool,
}

/// Build the router. Exposed separately from [`run_server`] for in-process tests.
pub fn router(palette: Arc<Palette>, config: &Config) -> Router {
    let state = AppState {
        palette,
        default_limit: config.search.limit,
        default_explain: config.search.explain,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/commands", get(handle_commands))
        .route("/search", post(handle_search))
        .route("/commands/{id}/keywords", put(handle_set_keywords))
        .route("/keywords", delete(handle_clear_keywords))
        .route("/params/{name}/search", post(handle_param_search))
        .layer(cors)
        .with_state(state)
}

/// Load the catalogue and serve until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let palette = Arc::new(load_catalog(&config.catalog.path)?.into_palette());
    let app = router(palette, config);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(bind = %config.server.bind, "palette server listening");
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError {
            status: rejection.status(),
            code: "bad_request".to_string(),
            message: rejection.body_text(),
        }
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

/// Extract a query string, treating anything that is not a string as empty.
fn query_text(value: &serde_json::Value) -> &str {
    value.as_str().unwrap_or_default()
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /commands ============

#[derive(Serialize)]
struct CommandsResponse {
    commands: Vec<Command>,
}

async fn handle_commands(State(state): State<AppState>) -> Json<CommandsResponse> {
    Json(CommandsResponse {
        commands: state.palette.commands.commands().to_vec(),
    })
}

// ============ POST /search ============

#[derive(Deserialize)]
struct SearchRequest {
    #[serde(default)]
    query: serde_json::Value,
    limit: Option<usize>,
    explain: Option<bool>,
}

#[derive(Serialize)]
struct SearchHit {
    id: String,
    label: String,
    category: String,
    score: f64,
    matched: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    explain: Option<Vec<TokenExplanation>>,
}

impl From<RankedCommand<'_>> for SearchHit {
    fn from(r: RankedCommand<'_>) -> Self {
        Self {
            id: r.command.id.clone(),
            label: r.command.label.clone(),
            category: r.command.category.clone(),
            score: r.score,
            matched: r.matched,
            explain: r.explain,
        }
    }
}

#[derive(Serialize)]
struct SearchResponse {
    results: Vec<SearchHit>,
}

async fn handle_search(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Json(req) = payload?;
    let limit = req.limit.unwrap_or(state.default_limit);
    if limit == 0 {
        return Err(bad_request("limit must be at least 1"));
    }

    let query = query_text(&req.query);
    let engine = &state.palette.commands;
    let ranked = if req.explain.unwrap_or(state.default_explain) {
        engine.explain(query)
    } else {
        engine.rank(query)
    };

    let results = ranked
        .into_iter()
        .take(limit)
        .map(SearchHit::from)
        .collect();

    Ok(Json(SearchResponse { results }))
}

// ============ PUT /commands/{id}/keywords ============

#[derive(Deserialize)]
struct KeywordsRequest {
    #[serde(default)]
    keywords: Vec<String>,
}

#[derive(Serialize)]
struct KeywordsResponse {
    applied: bool,
}

/// Unknown ids answer `applied: false`; the update may have raced the catalogue.
async fn handle_set_keywords(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<KeywordsRequest>, JsonRejection>,
) -> Result<Json<KeywordsResponse>, AppError> {
    let Json(req) = payload?;
    let applied = state
        .palette
        .commands
        .set_dynamic_keywords(&id, &req.keywords);
    Ok(Json(KeywordsResponse { applied }))
}

// ============ DELETE /keywords ============

#[derive(Serialize)]
struct ClearResponse {
    cleared: bool,
}

async fn handle_clear_keywords(State(state): State<AppState>) -> Json<ClearResponse> {
    state.palette.commands.clear_dynamic_keywords();
    Json(ClearResponse { cleared: true })
}

// ============ POST /params/{name}/search ============

#[derive(Deserialize)]
struct ParamSearchRequest {
    #[serde(default)]
    query: serde_json::Value,
}

#[derive(Serialize)]
struct ParamSearchResponse {
    results: Vec<ParamOption>,
}

async fn handle_param_search(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<ParamSearchRequest>, JsonRejection>,
) -> Result<Json<ParamSearchResponse>, AppError> {
    let Json(req) = payload?;
    let searcher = state
        .palette
        .params
        .get(&name)
        .ok_or_else(|| not_found(format!("unknown parameter list: {}", name)))?;

    let results = searcher
        .search(query_text(&req.query))
        .into_iter()
        .take(state.default_limit)
        .cloned()
        .collect();

    Ok(Json(ParamSearchResponse { results }))
}
