// src/models/question.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validate_not_blank;
use crate::config::MAX_TEXT_LENGTH;

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Text,
    SingleChoice,
    MultipleChoice,
}

impl QuestionType {
    /// Whether answers pick from the question's options.
    pub fn is_choice(self) -> bool {
        !matches!(self, QuestionType::Text)
    }
}

/// A question inside a questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub questionnaire_id: String,
    pub question_text: String,
    pub question_type: QuestionType,

    /// Display position inside the questionnaire. Gaps are allowed.
    pub order: i64,
}

/// DTO for a question being authored.
/// Options are plain texts; ids and ordering are assigned when saved.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuestionDraft {
    #[validate(
        length(min = 1, max = MAX_TEXT_LENGTH),
        custom(function = validate_not_blank)
    )]
    pub question_text: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Vec<String>,
}
