//! Question Generation — drives the oracle until it produces a parseable question.
//!
//! Flow per attempt: send conversation → receive completion → `Question::parse_block`.
//! - parsed → done
//! - `InvalidHandLength` → append the completion and a correction, try again
//! - any other parse error → fatal for this call
//!
//! At most `MAX_GENERATION_ATTEMPTS` oracle calls are made.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::generation::prompts::{INVALID_HAND_CORRECTION, QUESTION_SYSTEM};
use crate::llm_client::{ChatMessage, LlmError, Oracle};
use crate::mahjong::{MahjongError, Question};

pub const MAX_GENERATION_ATTEMPTS: u32 = 3;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Question generation gave up after {attempts} attempts with invalid hands")]
    Exhausted { attempts: u32 },

    #[error("Oracle output could not be parsed: {0}")]
    Parse(#[from] MahjongError),

    #[error("Oracle call failed: {0}")]
    Llm(#[from] LlmError),
}

/// Generates questions against an injected oracle. Cheap to clone.
#[derive(Clone)]
pub struct QuestionGenerator {
    oracle: Arc<dyn Oracle>,
}

impl QuestionGenerator {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }

    /// Runs the bounded generation loop starting from the fixed system instruction.
    pub async fn generate(&self) -> Result<Question, GenerationError> {
        let mut conversation = vec![ChatMessage::system(QUESTION_SYSTEM)];
        let mut attempt = 0u32;

        loop {
            if attempt >= MAX_GENERATION_ATTEMPTS {
                error!(
                    attempts = attempt,
                    conversation = ?conversation,
                    "Question generation exceeded its attempt limit"
                );
                return Err(GenerationError::Exhausted { attempts: attempt });
            }

            info!(attempt, conversation = ?conversation, "Oracle request");
            let output = self.oracle.complete(&conversation).await?;
            info!(attempt, output = %output, "Oracle response");

            match Question::parse_block(&output) {
                Ok(question) => {
                    if !question.answer_in_hand() {
                        warn!(
                            answer = %question.answer,
                            hand = %question.hand,
                            "Generated answer is not one of the hand's tiles"
                        );
                    }
                    return Ok(question);
                }
                Err(MahjongError::InvalidHandLength { expected, actual }) => {
                    info!(
                        expected,
                        actual,
                        retry_count = attempt,
                        output = %output,
                        "Generated question has a hand of unexpected length; asking again"
                    );
                    conversation.push(ChatMessage::assistant(output));
                    conversation.push(ChatMessage::user(INVALID_HAND_CORRECTION));
                    attempt += 1;
                }
                Err(other) => return Err(GenerationError::Parse(other)),
            }
        }
    }
}
