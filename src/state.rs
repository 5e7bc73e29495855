// src/state.rs

use serde::{Deserialize, Serialize};

use crate::models::{
    Question, QuestionAnswer, QuestionOption, Questionnaire, QuestionnaireResponse, User,
};

/// Collection fields a stored snapshot must carry, all as arrays.
pub const COLLECTION_FIELDS: [&str; 6] = [
    "users",
    "questionnaires",
    "questions",
    "questionOptions",
    "responses",
    "answers",
];

/// The full aggregate state at one point in time.
///
/// Serialized as-is into the storage slot; field names follow the stored
/// JSON layout (`questionOptions`, `currentUser`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub users: Vec<User>,
    #[serde(default)]
    pub current_user: Option<User>,
    pub questionnaires: Vec<Questionnaire>,
    pub questions: Vec<Question>,
    pub question_options: Vec<QuestionOption>,
    pub responses: Vec<QuestionnaireResponse>,
    pub answers: Vec<QuestionAnswer>,
}

impl AppState {
    /// The canonical empty snapshot.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn questionnaire(&self, id: &str) -> Option<&Questionnaire> {
        self.questionnaires.iter().find(|q| q.id == id)
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    /// Questions of a questionnaire in display order.
    pub fn questions_of(&self, questionnaire_id: &str) -> Vec<&Question> {
        let mut questions: Vec<&Question> = self
            .questions
            .iter()
            .filter(|q| q.questionnaire_id == questionnaire_id)
            .collect();
        questions.sort_by_key(|q| q.order);
        questions
    }

    /// Options of a question in display order.
    pub fn options_of(&self, question_id: &str) -> Vec<&QuestionOption> {
        let mut options: Vec<&QuestionOption> = self
            .question_options
            .iter()
            .filter(|o| o.question_id == question_id)
            .collect();
        options.sort_by_key(|o| o.order);
        options
    }

    pub fn responses_of(&self, questionnaire_id: &str) -> Vec<&QuestionnaireResponse> {
        self.responses
            .iter()
            .filter(|r| r.questionnaire_id == questionnaire_id)
            .collect()
    }
}
