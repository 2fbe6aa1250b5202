//! Axum route handlers for the Question API.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::pipeline::{
    create_question, load_question, render_hand, resolve_answer, AnswerResult, CreatedQuestion,
};
use crate::mahjong::Tile;
use crate::menu::{parse_postback, start_menu, Postback, RichMenu};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub tile: Tile,
}

#[derive(Debug, Deserialize)]
pub struct PostbackRequest {
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PostbackResponse {
    StartQuestion(CreatedQuestion),
    AnswerTile(AnswerResult),
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/questions
///
/// Generates, stores and lays out a new question.
pub async fn handle_create_question(
    State(state): State<AppState>,
) -> Result<Json<CreatedQuestion>, AppError> {
    let created = create_question(&state.generator, state.store.as_ref(), &state.tile_images).await?;
    Ok(Json(created))
}

/// GET /api/v1/questions/:id/image
///
/// PNG of the question's hand. Rendering is deterministic, so this matches the
/// areas returned at creation time.
pub async fn handle_question_image(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let question = load_question(state.store.as_ref(), id).await?;
    let image = render_hand(&state.tile_images, question.hand).await?;
    Ok(([(header::CONTENT_TYPE, "image/png")], image.bytes))
}

/// POST /api/v1/questions/:id/answer
pub async fn handle_answer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerResult>, AppError> {
    let result = resolve_answer(state.store.as_ref(), id, request.tile).await?;
    Ok(Json(result))
}

/// POST /api/v1/postback
///
/// Accepts the raw postback string a menu region carries and dispatches it.
pub async fn handle_postback(
    State(state): State<AppState>,
    Json(request): Json<PostbackRequest>,
) -> Result<Json<PostbackResponse>, AppError> {
    info!("Received postback: {}", request.data);

    let response = match parse_postback(&request.data)? {
        Postback::StartQuestion => PostbackResponse::StartQuestion(
            create_question(&state.generator, state.store.as_ref(), &state.tile_images).await?,
        ),
        Postback::AnswerTile { question_id, tile } => {
            PostbackResponse::AnswerTile(resolve_answer(state.store.as_ref(), question_id, tile).await?)
        }
    };

    Ok(Json(response))
}

/// GET /api/v1/menus/default
///
/// The menu shown before any question exists: one region that starts a question.
pub async fn handle_default_menu() -> Json<RichMenu> {
    Json(start_menu())
}
