// src/reducer.rs

use std::collections::HashSet;

use crate::{
    error::AppError,
    models::{Question, QuestionAnswer, QuestionOption, Questionnaire, QuestionnaireResponse, User},
    state::AppState,
};

/// Every state transition the store accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetCurrentUser(Option<User>),
    AddUser(User),
    AddQuestionnaire(Questionnaire),
    UpdateQuestionnaire(Questionnaire),
    DeleteQuestionnaire(String),
    AddQuestion(Question),
    UpdateQuestion(Question),
    DeleteQuestion(String),
    AddOption(QuestionOption),
    UpdateOption(QuestionOption),
    DeleteOption(String),
    AddResponse(QuestionnaireResponse),
    AddAnswer(QuestionAnswer),
    /// Replaces the whole state. Used when seeding from storage.
    LoadSnapshot(AppState),
}

impl Action {
    /// Stable name used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::SetCurrentUser(_) => "set-current-user",
            Action::AddUser(_) => "add-user",
            Action::AddQuestionnaire(_) => "add-questionnaire",
            Action::UpdateQuestionnaire(_) => "update-questionnaire",
            Action::DeleteQuestionnaire(_) => "delete-questionnaire",
            Action::AddQuestion(_) => "add-question",
            Action::UpdateQuestion(_) => "update-question",
            Action::DeleteQuestion(_) => "delete-question",
            Action::AddOption(_) => "add-option",
            Action::UpdateOption(_) => "update-option",
            Action::DeleteOption(_) => "delete-option",
            Action::AddResponse(_) => "add-response",
            Action::AddAnswer(_) => "add-answer",
            Action::LoadSnapshot(_) => "load-snapshot",
        }
    }
}

/// Computes the state that follows `state` once `action` is applied.
///
/// Pure: the input snapshot is never touched. Updates and deletes aimed at
/// an unknown id produce a state equal to the input. The only failure is a
/// duplicate email on `AddUser`.
pub fn reduce(state: &AppState, action: Action) -> Result<AppState, AppError> {
    let mut next = state.clone();

    match action {
        Action::SetCurrentUser(user) => {
            next.current_user = user;
        }
        Action::AddUser(user) => {
            if state.users.iter().any(|u| u.email == user.email) {
                return Err(AppError::Conflict(format!(
                    "User with email '{}' already exists",
                    user.email
                )));
            }
            next.users.push(user);
        }
        Action::AddQuestionnaire(questionnaire) => {
            next.questionnaires.push(questionnaire);
        }
        Action::UpdateQuestionnaire(questionnaire) => {
            replace_by_id(&mut next.questionnaires, questionnaire, |q| &q.id);
        }
        Action::DeleteQuestionnaire(id) => {
            // Membership comes from the pre-mutation snapshot.
            let question_ids: HashSet<&str> = state
                .questions
                .iter()
                .filter(|q| q.questionnaire_id == id)
                .map(|q| q.id.as_str())
                .collect();
            let response_ids: HashSet<&str> = state
                .responses
                .iter()
                .filter(|r| r.questionnaire_id == id)
                .map(|r| r.id.as_str())
                .collect();

            next.questionnaires.retain(|q| q.id != id);
            next.questions.retain(|q| q.questionnaire_id != id);
            next.question_options
                .retain(|o| !question_ids.contains(o.question_id.as_str()));
            next.responses.retain(|r| r.questionnaire_id != id);
            next.answers.retain(|a| {
                !response_ids.contains(a.response_id.as_str())
                    && !question_ids.contains(a.question_id.as_str())
            });
        }
        Action::AddQuestion(question) => {
            next.questions.push(question);
        }
        Action::UpdateQuestion(question) => {
            replace_by_id(&mut next.questions, question, |q| &q.id);
        }
        Action::DeleteQuestion(id) => {
            next.questions.retain(|q| q.id != id);
            next.question_options.retain(|o| o.question_id != id);
            next.answers.retain(|a| a.question_id != id);
        }
        Action::AddOption(option) => {
            next.question_options.push(option);
        }
        Action::UpdateOption(option) => {
            replace_by_id(&mut next.question_options, option, |o| &o.id);
        }
        Action::DeleteOption(id) => {
            next.question_options.retain(|o| o.id != id);
            for answer in &mut next.answers {
                if let Some(selected) = answer.selected_options.as_mut() {
                    selected.retain(|option_id| *option_id != id);
                }
            }
        }
        Action::AddResponse(response) => {
            next.responses.push(response);
        }
        Action::AddAnswer(answer) => {
            next.answers.push(answer);
        }
        Action::LoadSnapshot(snapshot) => {
            next = snapshot;
        }
    }

    Ok(next)
}

/// Swaps in `record` where the ids match. Leaves `items` alone on a miss.
fn replace_by_id<T>(items: &mut [T], record: T, id_of: impl Fn(&T) -> &String) {
    if let Some(index) = items.iter().position(|item| id_of(item) == id_of(&record)) {
        items[index] = record;
    }
}
