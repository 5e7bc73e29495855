// src/handlers/catalog.rs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;

/// One catalog card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionnaireSummary {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
    pub question_count: usize,
    /// Responses that reached completion.
    pub completion_count: usize,
}

/// Lists questionnaires newest first, optionally only those owned by `owner`.
pub fn list_questionnaires(state: &AppState, owner: Option<&str>) -> Vec<QuestionnaireSummary> {
    let mut summaries: Vec<QuestionnaireSummary> = state
        .questionnaires
        .iter()
        .filter(|q| owner.is_none_or(|owner| q.user_id == owner))
        .map(|q| QuestionnaireSummary {
            id: q.id.clone(),
            title: q.title.clone(),
            description: q.description.clone(),
            created_at: q.created_at,
            user_id: q.user_id.clone(),
            question_count: state
                .questions
                .iter()
                .filter(|question| question.questionnaire_id == q.id)
                .count(),
            completion_count: state
                .responses_of(&q.id)
                .iter()
                .filter(|r| r.completed_at.is_some())
                .count(),
        })
        .collect();

    summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    summaries
}
