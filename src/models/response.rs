// src/models/response.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::answer::AnswerDraft;

/// One completion (or attempt) of a questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireResponse {
    pub id: String,
    pub questionnaire_id: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub time_taken_seconds: Option<i64>,
}

/// DTO for submitting a finished questionnaire run.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponseRequest {
    pub questionnaire_id: String,

    /// When the respondent opened the questionnaire.
    pub started_at: DateTime<Utc>,
    pub answers: Vec<AnswerDraft>,
}
