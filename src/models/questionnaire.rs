// src/models/questionnaire.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::question::QuestionDraft;
use super::validate_title;
use crate::config::MAX_DESCRIPTION_LENGTH;

/// A titled, ordered collection of questions owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Questionnaire {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,

    /// Owning user.
    pub user_id: String,
}

/// DTO for building a questionnaire together with its questions.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuestionnaireRequest {
    #[validate(custom(function = validate_title))]
    pub title: String,
    #[validate(length(max = MAX_DESCRIPTION_LENGTH))]
    pub description: Option<String>,
    #[validate(nested)]
    pub questions: Vec<QuestionDraft>,
}

/// DTO for editing a questionnaire's title and description.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateQuestionnaireRequest {
    #[validate(custom(function = validate_title))]
    pub title: String,
    #[validate(length(max = MAX_DESCRIPTION_LENGTH))]
    pub description: Option<String>,
}
