//! Question store — inserts questions as flat rows and reads them back.
//!
//! `AppState` holds an `Arc<dyn QuestionStore>`; `PgQuestionStore` is the default backend.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::mahjong::{Question, StoredQuestion};
use crate::models::question::QuestionRow;

#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Persists the five fields and returns the assigned id.
    async fn insert(&self, row: &StoredQuestion) -> Result<i64, AppError>;

    async fn find(&self, id: i64) -> Result<Option<Question>, AppError>;
}

pub struct PgQuestionStore {
    pool: PgPool,
}

impl PgQuestionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionStore for PgQuestionStore {
    async fn insert(&self, row: &StoredQuestion) -> Result<i64, AppError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO mahjong_question (question, hand, answer, explanation, difficulty)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&row.question)
        .bind(&row.hand)
        .bind(&row.answer)
        .bind(&row.explanation)
        .bind(row.difficulty)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn find(&self, id: i64) -> Result<Option<Question>, AppError> {
        let row = sqlx::query_as::<_, QuestionRow>(
            "SELECT id, question, hand, answer, explanation, difficulty \
             FROM mahjong_question WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(decode_row).transpose()
    }
}

/// A row that no longer decodes is a server-side fault, never a partial question.
fn decode_row(row: QuestionRow) -> Result<Question, AppError> {
    let (id, stored) = row.into_parts();
    Question::deserialize_from_storage(id, stored).map_err(|e| {
        AppError::Internal(anyhow::anyhow!("Stored question {id} does not decode: {e}"))
    })
}
