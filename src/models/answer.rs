// src/models/answer.rs

use serde::{Deserialize, Serialize};

/// The answer to one question within one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub id: String,
    pub response_id: String,
    pub question_id: String,

    /// Set for text questions.
    pub answer_text: Option<String>,

    /// Option ids, set for choice questions.
    pub selected_options: Option<Vec<String>>,
}

/// DTO for one answer inside a submitted response.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerDraft {
    pub question_id: String,
    #[serde(default)]
    pub answer_text: Option<String>,
    #[serde(default)]
    pub selected_options: Vec<String>,
}
