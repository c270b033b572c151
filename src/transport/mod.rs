//! HTTP transport layer for heroclash.
//!
//! Exposes hero lookups, comparisons and session-scoped selections as a JSON
//! API on axum. Handlers are thin: they decode input, call [`HeroEngine`] or
//! [`SessionRegistry`], and map [`HeroError`] onto status codes. Extractor
//! rejections (bad JSON, bad query strings) go through the same mapping, so
//! every error body is `{"error": "..."}`.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::compare::ComparisonResult;
use crate::engine::HeroEngine;
use crate::error::{ExecutionError, HeroError, ValidationError};
use crate::hero::{Hero, HeroId};
use crate::powerstat::Powerstats;
use crate::selection::SelectionEvent;
use crate::session::{SessionId, SessionRegistry, SessionSnapshot};
use crate::storage::SnapshotInfo;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Hero lookups and comparisons.
    pub engine: HeroEngine,
    /// Per-session selections.
    pub sessions: Arc<SessionRegistry>,
    /// Metadata of the loaded snapshot, reported by `/api/health`.
    pub snapshot: Option<SnapshotInfo>,
}

impl AppState {
    /// State with no snapshot metadata.
    #[must_use]
    pub fn new(engine: HeroEngine, sessions: Arc<SessionRegistry>) -> Self {
        Self {
            engine,
            sessions,
            snapshot: None,
        }
    }

    /// Attaches snapshot metadata.
    #[must_use]
    pub fn with_snapshot(mut self, info: SnapshotInfo) -> Self {
        self.snapshot = Some(info);
        self
    }
}

/// Error response wrapper.
#[derive(Debug)]
pub struct ApiError(HeroError);

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}

impl From<HeroError> for ApiError {
    fn from(err: HeroError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::malformed(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::malformed(rejection.body_text())
    }
}

impl ApiError {
    fn malformed(reason: String) -> Self {
        Self(ValidationError::MalformedRequest { reason }.into())
    }

    fn status(&self) -> StatusCode {
        match &self.0 {
            HeroError::Validation(_) => StatusCode::BAD_REQUEST,
            HeroError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            HeroError::Execution(e) => match e {
                ExecutionError::HeroNotFound { .. }
                | ExecutionError::ComparisonHeroesNotFound { .. }
                | ExecutionError::SessionNotFound { .. } => StatusCode::NOT_FOUND,
                ExecutionError::SelectionIncomplete { .. } => StatusCode::CONFLICT,
                ExecutionError::SessionLimitExceeded { .. } => StatusCode::SERVICE_UNAVAILABLE,
                ExecutionError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.0 {
            HeroError::Validation(e) => format!("Invalid request: {e}"),
            HeroError::Execution(e) => e.to_string(),
            HeroError::Internal { .. } => "Internal server error".to_string(),
        };
        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %self.0, "request rejected");
        }
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

fn parse_hero_id(raw: &str) -> Result<HeroId, ApiError> {
    HeroId::parse("id", raw).map_err(|e| ApiError(e.into()))
}

fn parse_session_id(raw: &str) -> Result<SessionId, ApiError> {
    raw.parse().map_err(|_| {
        ApiError(HeroError::Validation(ValidationError::InvalidSessionId {
            value: raw.to_string(),
        }))
    })
}

/// Body of `GET /api/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the handler answers.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Number of heroes loaded.
    pub heroes: usize,
    /// Number of open sessions.
    pub sessions: usize,
    /// Loaded snapshot, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<SnapshotInfo>,
}

/// Query string of `GET /api/superheroes/compare`. Ids stay raw so the
/// engine can report missing and non-numeric values itself.
#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    /// First hero id.
    pub id1: Option<String>,
    /// Second hero id.
    pub id2: Option<String>,
}

/// Body of `POST /api/sessions/:sid/toggle`.
#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    /// Hero to select or deselect.
    pub hero_id: HeroId,
}

/// Selection as seen by clients.
#[derive(Debug, Serialize)]
pub struct SessionView {
    /// The session.
    pub session_id: SessionId,
    /// Selected heroes, oldest first.
    pub hero_ids: Vec<HeroId>,
    /// True when exactly two heroes are selected.
    pub ready: bool,
}

impl From<SessionSnapshot> for SessionView {
    fn from(snapshot: SessionSnapshot) -> Self {
        Self {
            session_id: snapshot.session_id,
            ready: snapshot.selection.is_ready(),
            hero_ids: snapshot.selection.ids().to_vec(),
        }
    }
}

/// Builds the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/superheroes", get(list_heroes))
        .route("/api/superheroes/compare", get(compare_heroes))
        .route("/api/superheroes/:id", get(get_hero))
        .route("/api/superheroes/:id/powerstats", get(get_powerstats))
        .route("/api/sessions", post(open_session))
        .route("/api/sessions/:sid", get(get_session).delete(close_session))
        .route("/api/sessions/:sid/toggle", post(toggle_hero))
        .route("/api/sessions/:sid/clear", post(clear_selection))
        .route("/api/sessions/:sid/comparison", get(compare_selection))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> ApiResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        heroes: state.engine.hero_count()?,
        sessions: state.sessions.len()?,
        snapshot: state.snapshot.clone(),
    }))
}

async fn list_heroes(State(state): State<AppState>) -> ApiResult<Vec<Hero>> {
    Ok(Json(state.engine.heroes()?))
}

async fn get_hero(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Hero> {
    let id = parse_hero_id(&id)?;
    Ok(Json(state.engine.hero(id)?))
}

async fn get_powerstats(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Powerstats> {
    let id = parse_hero_id(&id)?;
    Ok(Json(state.engine.powerstats(id)?))
}

async fn compare_heroes(
    State(state): State<AppState>,
    query: Result<Query<CompareQuery>, QueryRejection>,
) -> ApiResult<ComparisonResult> {
    let Query(query) = query?;
    let result = state
        .engine
        .compare_raw(query.id1.as_deref(), query.id2.as_deref())?;
    Ok(Json(result))
}

async fn open_session(State(state): State<AppState>) -> Result<Response, ApiError> {
    let snapshot = state.sessions.open()?;
    Ok((StatusCode::CREATED, Json(SessionView::from(snapshot))).into_response())
}

async fn get_session(
    State(state): State<AppState>,
    Path(sid): Path<String>,
) -> ApiResult<SessionView> {
    let sid = parse_session_id(&sid)?;
    Ok(Json(state.sessions.get(sid)?.into()))
}

async fn close_session(
    State(state): State<AppState>,
    Path(sid): Path<String>,
) -> Result<StatusCode, ApiError> {
    let sid = parse_session_id(&sid)?;
    state.sessions.close(sid)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn toggle_hero(
    State(state): State<AppState>,
    Path(sid): Path<String>,
    request: Result<Json<ToggleRequest>, JsonRejection>,
) -> ApiResult<SessionView> {
    let sid = parse_session_id(&sid)?;
    let Json(request) = request?;
    // The reducer does not validate ids; unknown heroes are rejected here.
    state.engine.ensure_hero_exists(request.hero_id)?;
    let snapshot = state.sessions.apply(
        sid,
        SelectionEvent::Toggle {
            hero_id: request.hero_id,
        },
    )?;
    Ok(Json(snapshot.into()))
}

async fn clear_selection(
    State(state): State<AppState>,
    Path(sid): Path<String>,
) -> ApiResult<SessionView> {
    let sid = parse_session_id(&sid)?;
    Ok(Json(state.sessions.apply(sid, SelectionEvent::Clear)?.into()))
}

async fn compare_selection(
    State(state): State<AppState>,
    Path(sid): Path<String>,
) -> ApiResult<ComparisonResult> {
    let sid = parse_session_id(&sid)?;
    let snapshot = state.sessions.get(sid)?;
    Ok(Json(state.engine.compare_selection(&snapshot.selection)?))
}
