//! Question pipeline — ties generation, persistence and layout together.
//!
//! create: generate → insert → attach id → render (spawn_blocking) → menu payload.
//! answer: load → compare the tapped tile with the stored answer.

use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::generation::generator::QuestionGenerator;
use crate::layout::{TileImage, TileImageGenerator};
use crate::mahjong::{Hand, Question, Tile};
use crate::menu::{answer_menu, RichMenu};
use crate::storage::QuestionStore;

/// A freshly created question, ready to be shown.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedQuestion {
    pub id: i64,
    pub question: String,
    pub difficulty: u8,
    /// Reply text for the chat: question followed by its difficulty.
    pub message: String,
    pub menu: RichMenu,
    #[serde(skip)]
    pub image: TileImage,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerResult {
    pub question_id: i64,
    pub correct: bool,
    pub answer: Tile,
    pub explanation: String,
    pub message: String,
}

pub async fn create_question(
    generator: &QuestionGenerator,
    store: &dyn QuestionStore,
    tile_images: &TileImageGenerator,
) -> Result<CreatedQuestion, AppError> {
    let question = generator.generate().await?;
    let id = store.insert(&question.serialize_for_storage()).await?;
    let question = question.with_id(id);
    info!("Stored question {} (difficulty {})", id, question.difficulty);

    let image = render_hand(tile_images, question.hand.clone()).await?;
    let menu = answer_menu(id, &image);

    Ok(CreatedQuestion {
        id,
        message: format!("{}\n難易度: {}", question.question_text, question.difficulty),
        question: question.question_text,
        difficulty: question.difficulty,
        menu,
        image,
    })
}

pub async fn load_question(store: &dyn QuestionStore, id: i64) -> Result<Question, AppError> {
    store
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Question {id} not found")))
}

pub async fn resolve_answer(
    store: &dyn QuestionStore,
    id: i64,
    tile: Tile,
) -> Result<AnswerResult, AppError> {
    let question = load_question(store, id).await?;
    let correct = question.answer == tile;
    info!("Answer for question {}: tile={} correct={}", id, tile, correct);

    let verdict = if correct { "正解です！" } else { "不正解です！" };
    Ok(AnswerResult {
        question_id: id,
        correct,
        answer: question.answer,
        message: format!("{verdict}\n解説: {}", question.explanation),
        explanation: question.explanation,
    })
}

/// Renders off the async executor; the sprite cache is shared, the canvas is per call.
pub async fn render_hand(
    tile_images: &TileImageGenerator,
    hand: Hand,
) -> Result<TileImage, AppError> {
    let tile_images = tile_images.clone();
    let image = tokio::task::spawn_blocking(move || tile_images.generate(&hand))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed rendering tiles: {e}"))
        })??;
    Ok(image)
}
