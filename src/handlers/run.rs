// src/handlers/run.rs

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::{
    error::AppError,
    models::{AnswerDraft, QuestionAnswer, QuestionType, QuestionnaireResponse, SubmitResponseRequest},
    reducer::Action,
    state::AppState,
    storage::Persistence,
    store::Store,
    utils::ids::{new_id, now},
};

/// Whole seconds between start and completion, never negative.
fn elapsed_seconds(started_at: DateTime<Utc>, completed_at: DateTime<Utc>) -> i64 {
    (completed_at - started_at).num_seconds().max(0)
}

/// Checks one answer against the question it targets.
fn check_answer(state: &AppState, questionnaire_id: &str, draft: &AnswerDraft) -> Result<(), AppError> {
    let question = state
        .question(&draft.question_id)
        .filter(|q| q.questionnaire_id == questionnaire_id)
        .ok_or_else(|| {
            AppError::BadRequest(format!(
                "Question '{}' is not part of this questionnaire",
                draft.question_id
            ))
        })?;

    match question.question_type {
        QuestionType::Text => {
            let has_text = draft
                .answer_text
                .as_deref()
                .is_some_and(|text| !text.trim().is_empty());
            if !has_text || !draft.selected_options.is_empty() {
                return Err(AppError::BadRequest(format!(
                    "Question '{}' expects a text answer",
                    question.question_text
                )));
            }
            return Ok(());
        }
        QuestionType::SingleChoice if draft.selected_options.len() != 1 => {
            return Err(AppError::BadRequest(format!(
                "Question '{}' expects exactly one option",
                question.question_text
            )));
        }
        QuestionType::MultipleChoice if draft.selected_options.is_empty() => {
            return Err(AppError::BadRequest(format!(
                "Question '{}' expects at least one option",
                question.question_text
            )));
        }
        _ => {}
    }

    let valid: HashSet<&str> = state
        .options_of(&question.id)
        .iter()
        .map(|o| o.id.as_str())
        .collect();
    let mut seen = HashSet::new();
    for option_id in &draft.selected_options {
        if !valid.contains(option_id.as_str()) || !seen.insert(option_id.as_str()) {
            return Err(AppError::BadRequest(format!(
                "Option '{}' is not a valid choice for '{}'",
                option_id, question.question_text
            )));
        }
    }

    Ok(())
}

/// Records a completed run of a questionnaire. Returns the response id.
///
/// Answers are validated against the current questions and options before
/// anything is dispatched.
pub fn submit_response<P: Persistence>(
    store: &mut Store<P>,
    payload: SubmitResponseRequest,
) -> Result<String, AppError> {
    let state = store.state();
    if state.questionnaire(&payload.questionnaire_id).is_none() {
        return Err(AppError::NotFound("Questionnaire not found".to_string()));
    }

    let mut answered = HashSet::new();
    for draft in &payload.answers {
        if !answered.insert(draft.question_id.as_str()) {
            return Err(AppError::BadRequest(format!(
                "Question '{}' answered more than once",
                draft.question_id
            )));
        }
        check_answer(&state, &payload.questionnaire_id, draft)?;
    }

    let completed_at = now();
    let response = QuestionnaireResponse {
        id: new_id(),
        questionnaire_id: payload.questionnaire_id.clone(),
        started_at: payload.started_at,
        completed_at: Some(completed_at),
        time_taken_seconds: Some(elapsed_seconds(payload.started_at, completed_at)),
    };
    let response_id = response.id.clone();

    let mut actions = vec![Action::AddResponse(response)];
    actions.extend(payload.answers.into_iter().map(|draft| {
        let is_text = state
            .question(&draft.question_id)
            .is_some_and(|q| q.question_type == QuestionType::Text);
        Action::AddAnswer(QuestionAnswer {
            id: new_id(),
            response_id: response_id.clone(),
            question_id: draft.question_id,
            answer_text: if is_text { draft.answer_text } else { None },
            selected_options: if is_text { None } else { Some(draft.selected_options) },
        })
    }));

    store.dispatch_all(actions)?;
    tracing::info!(
        "Recorded response {} for questionnaire {}",
        response_id,
        payload.questionnaire_id
    );

    Ok(response_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_elapsed_seconds_truncates() {
        let start = Utc::now();
        let end = start + Duration::milliseconds(90_900);
        assert_eq!(elapsed_seconds(start, end), 90);
    }

    #[test]
    fn test_elapsed_seconds_clock_skew() {
        let start = Utc::now();
        let end = start - Duration::seconds(5);
        assert_eq!(elapsed_seconds(start, end), 0);
    }
}
