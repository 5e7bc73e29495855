// src/models/option.rs

use serde::{Deserialize, Serialize};

/// One selectable option of a choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: String,
    pub question_id: String,
    pub option_text: String,
    pub order: i64,
}
