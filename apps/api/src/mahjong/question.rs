//! Puzzle text format: the five labeled lines the oracle answers with, and the
//! flat five-column row a question is persisted as.

use crate::mahjong::hand::Hand;
use crate::mahjong::tile::Tile;
use crate::mahjong::MahjongError;

pub const QUESTION_LABEL: &str = "問題文";
pub const HAND_LABEL: &str = "手牌";
pub const DIFFICULTY_LABEL: &str = "難易度";
pub const ANSWER_LABEL: &str = "解答";
pub const EXPLANATION_LABEL: &str = "解説";

pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 5;

/// Half-width and full-width colons both terminate a label.
const LABEL_SEPARATORS: [char; 2] = [':', '：'];

/// A "which tile to discard" puzzle.
///
/// `id` is `None` until the row store assigns one. `answer` is expected to be
/// one of the hand's tiles but the codec does not enforce it; see [`Question::answer_in_hand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: Option<i64>,
    pub question_text: String,
    pub hand: Hand,
    pub difficulty: u8,
    pub answer: Tile,
    pub explanation: String,
}

/// The five persisted columns, in storage order. Never carries the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredQuestion {
    pub question: String,
    pub hand: String,
    pub answer: String,
    pub explanation: String,
    pub difficulty: i32,
}

impl Question {
    /// Parses an oracle completion.
    ///
    /// Fields are resolved by label, not position. They are checked in the order
    /// question, hand, difficulty, answer, explanation and the first failure wins.
    pub fn parse_block(text: &str) -> Result<Self, MahjongError> {
        let question_text = find_field(text, QUESTION_LABEL)?;
        let hand = Hand::parse(find_field(text, HAND_LABEL)?)?;
        let difficulty = parse_difficulty(find_field(text, DIFFICULTY_LABEL)?)?;
        let answer = Tile::parse(find_field(text, ANSWER_LABEL)?)?;
        let explanation = find_field(text, EXPLANATION_LABEL)?;

        Ok(Self {
            id: None,
            question_text: question_text.to_string(),
            hand,
            difficulty,
            answer,
            explanation: explanation.to_string(),
        })
    }

    /// Returns the same question carrying the store-assigned id.
    pub fn with_id(self, id: i64) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }

    pub fn answer_in_hand(&self) -> bool {
        self.hand.contains(&self.answer)
    }

    pub fn serialize_for_storage(&self) -> StoredQuestion {
        StoredQuestion {
            question: self.question_text.clone(),
            hand: self.hand.serialize(),
            answer: self.answer.code(),
            explanation: self.explanation.clone(),
            difficulty: i32::from(self.difficulty),
        }
    }

    /// Rebuilds a question from a stored row. Stored text goes through the same
    /// hand, tile and difficulty checks as oracle output.
    pub fn deserialize_from_storage(id: i64, row: StoredQuestion) -> Result<Self, MahjongError> {
        let difficulty = u8::try_from(row.difficulty)
            .ok()
            .filter(|d| (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(d))
            .ok_or_else(|| MahjongError::InvalidDifficulty(row.difficulty.to_string()))?;

        Ok(Self {
            id: Some(id),
            question_text: row.question,
            hand: Hand::parse(&row.hand)?,
            difficulty,
            answer: Tile::parse(&row.answer)?,
            explanation: row.explanation,
        })
    }
}

/// First non-empty value of a line that starts with `<label>:`.
/// A label appearing later in a line belongs to that line's own value.
fn find_field<'a>(text: &'a str, label: &'static str) -> Result<&'a str, MahjongError> {
    text.lines()
        .find_map(|line| {
            let value = line
                .trim_start()
                .strip_prefix(label)?
                .strip_prefix(LABEL_SEPARATORS)?
                .trim();
            (!value.is_empty()).then_some(value)
        })
        .ok_or(MahjongError::MissingField(label))
}

fn parse_difficulty(value: &str) -> Result<u8, MahjongError> {
    value
        .parse::<u8>()
        .ok()
        .filter(|d| (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(d))
        .ok_or_else(|| MahjongError::InvalidDifficulty(value.to_string()))
}
