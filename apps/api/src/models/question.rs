use sqlx::FromRow;

use crate::mahjong::StoredQuestion;

#[derive(Debug, Clone, FromRow)]
pub struct QuestionRow {
    pub id: i64,
    pub question: String,
    pub hand: String,
    pub answer: String,
    pub explanation: String,
    pub difficulty: i32,
}

impl QuestionRow {
    /// Splits the row into the store-assigned id and the five codec fields.
    pub fn into_parts(self) -> (i64, StoredQuestion) {
        (
            self.id,
            StoredQuestion {
                question: self.question,
                hand: self.hand,
                answer: self.answer,
                explanation: self.explanation,
                difficulty: self.difficulty,
            },
        )
    }
}
