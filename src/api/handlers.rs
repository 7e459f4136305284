//! HTTP request handlers

use super::assets::{get_index_html, serve_static};
use super::types::{ChatTurnRequest, ErrorResponse, SessionView};
use super::AppState;
use crate::dispatcher;
use crate::session::{Role, SessionState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Datelike, Local, Timelike};
use rand::seq::SliceRandom;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Root serves the chat UI
        .route("/", get(serve_ui))
        // Static assets (embedded or filesystem fallback)
        .route("/assets/*path", get(serve_static))
        // Session creation
        .route("/api/sessions/new", post(create_session))
        // Session retrieval
        .route("/api/sessions/:id", get(get_session))
        // One chat turn, processed synchronously to completion
        .route("/api/sessions/:id/chat", post(send_chat))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// UI
// ============================================================

async fn serve_ui() -> impl IntoResponse {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - UI assets missing</h1>".to_string()),
        )
            .into_response(),
    }
}

// ============================================================
// Sessions
// ============================================================

async fn create_session(State(state): State<AppState>) -> Json<SessionView> {
    let id = uuid::Uuid::new_v4().to_string();
    let slug = generate_slug();

    let handle = state.sessions.create(&id, &slug);
    let mut session = handle.lock().await;
    tracing::info!(session = %id, slug = %slug, "session created");

    Json(render_view(&mut session))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    let handle = state
        .sessions
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session not found: {id}")))?;

    let mut session = handle.lock().await;
    Ok(Json(render_view(&mut session)))
}

async fn send_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ChatTurnRequest>,
) -> Result<Json<SessionView>, AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::BadRequest("Message text is empty".to_string()));
    }

    let handle = state
        .sessions
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session not found: {id}")))?;

    // Holding the session lock across the model call serializes turns:
    // a second submission on the same session waits for this one.
    let mut session = handle.lock().await;
    dispatcher::handle_turn(&mut session, &req.text, state.model.as_deref()).await;

    Ok(Json(render_view(&mut session)))
}

/// Assemble the full view for the UI: visible transcript plus any pending
/// feedback (rendering it clears the pending flag).
fn render_view(session: &mut SessionState) -> SessionView {
    let messages = session
        .messages
        .iter()
        .filter(|m| m.role != Role::System)
        .cloned()
        .collect();

    SessionView {
        session_id: session.id.clone(),
        slug: session.slug.clone(),
        messages,
        feedback: session.take_pending_feedback(),
    }
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("elicit ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Slug Generation
// ============================================================

fn generate_slug() -> String {
    let now = Local::now();

    let day = match now.weekday() {
        chrono::Weekday::Mon => "monday",
        chrono::Weekday::Tue => "tuesday",
        chrono::Weekday::Wed => "wednesday",
        chrono::Weekday::Thu => "thursday",
        chrono::Weekday::Fri => "friday",
        chrono::Weekday::Sat => "saturday",
        chrono::Weekday::Sun => "sunday",
    };

    let time = match now.hour() {
        6..=11 => "morning",
        12..=16 => "afternoon",
        17..=20 => "evening",
        _ => "night",
    };

    let words = &[
        "batch", "press", "granule", "blend", "coating", "sieve", "hopper", "tablet", "capsule",
        "yield", "kiln", "mill",
    ];

    let mut rng = rand::thread_rng();
    let first = words.choose(&mut rng).unwrap_or(&"batch");
    let second = words.choose(&mut rng).unwrap_or(&"press");

    format!("{day}-{time}-{first}-{second}")
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
