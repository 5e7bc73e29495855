// src/handlers/builder.rs

use std::collections::HashSet;

use validator::Validate;

use crate::{
    config::MIN_CHOICE_OPTIONS,
    error::AppError,
    models::{
        CreateQuestionnaireRequest, Question, QuestionDraft, QuestionOption, Questionnaire,
        UpdateQuestionnaireRequest,
    },
    reducer::Action,
    storage::Persistence,
    store::Store,
    utils::ids::{new_id, now},
};

/// Checks the parts of a draft the derive cannot express.
fn check_draft_options(draft: &QuestionDraft) -> Result<(), AppError> {
    if !draft.question_type.is_choice() {
        if !draft.options.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Text question '{}' cannot have options",
                draft.question_text
            )));
        }
        return Ok(());
    }

    if draft.options.iter().any(|o| o.trim().is_empty()) {
        return Err(AppError::BadRequest(format!(
            "Question '{}' has an empty option",
            draft.question_text
        )));
    }
    if draft.options.len() < MIN_CHOICE_OPTIONS {
        return Err(AppError::BadRequest(format!(
            "Question '{}' needs at least {} options",
            draft.question_text, MIN_CHOICE_OPTIONS
        )));
    }
    Ok(())
}

/// Turns a validated draft into the add actions for it and its options.
fn draft_actions(questionnaire_id: &str, order: i64, draft: QuestionDraft) -> (String, Vec<Action>) {
    let question_id = new_id();
    let mut actions = vec![Action::AddQuestion(Question {
        id: question_id.clone(),
        questionnaire_id: questionnaire_id.to_string(),
        question_text: draft.question_text.trim().to_string(),
        question_type: draft.question_type,
        order,
    })];

    actions.extend(draft.options.into_iter().enumerate().map(|(i, text)| {
        Action::AddOption(QuestionOption {
            id: new_id(),
            question_id: question_id.clone(),
            option_text: text.trim().to_string(),
            order: i as i64,
        })
    }));

    (question_id, actions)
}

/// Creates a questionnaire with all of its questions and options.
///
/// Everything is validated before the first dispatch. Returns the new id.
pub fn create_questionnaire<P: Persistence>(
    store: &mut Store<P>,
    owner_id: &str,
    payload: CreateQuestionnaireRequest,
) -> Result<String, AppError> {
    payload.validate()?;
    for draft in &payload.questions {
        check_draft_options(draft)?;
    }

    let questionnaire = Questionnaire {
        id: new_id(),
        title: payload.title.trim().to_string(),
        description: payload.description.filter(|d| !d.trim().is_empty()),
        created_at: now(),
        user_id: owner_id.to_string(),
    };
    let id = questionnaire.id.clone();

    let mut actions = vec![Action::AddQuestionnaire(questionnaire)];
    for (order, draft) in payload.questions.into_iter().enumerate() {
        let (_, question_actions) = draft_actions(&id, order as i64, draft);
        actions.extend(question_actions);
    }

    store.dispatch_all(actions)?;
    tracing::info!("Created questionnaire {}", id);

    Ok(id)
}

/// Replaces a questionnaire's title and description.
pub fn update_details<P: Persistence>(
    store: &mut Store<P>,
    questionnaire_id: &str,
    payload: UpdateQuestionnaireRequest,
) -> Result<(), AppError> {
    payload.validate()?;

    let mut questionnaire = store
        .state()
        .questionnaire(questionnaire_id)
        .cloned()
        .ok_or(AppError::NotFound("Questionnaire not found".to_string()))?;

    questionnaire.title = payload.title.trim().to_string();
    questionnaire.description = payload.description.filter(|d| !d.trim().is_empty());

    store.dispatch(Action::UpdateQuestionnaire(questionnaire))
}

/// Appends a question after the current last one. Returns the question id.
pub fn add_question<P: Persistence>(
    store: &mut Store<P>,
    questionnaire_id: &str,
    draft: QuestionDraft,
) -> Result<String, AppError> {
    draft.validate()?;
    check_draft_options(&draft)?;

    let state = store.state();
    if state.questionnaire(questionnaire_id).is_none() {
        return Err(AppError::NotFound("Questionnaire not found".to_string()));
    }
    let order = state
        .questions_of(questionnaire_id)
        .last()
        .map_or(0, |q| q.order + 1);

    let (question_id, actions) = draft_actions(questionnaire_id, order, draft);
    store.dispatch_all(actions)?;

    Ok(question_id)
}

/// Renumbers a questionnaire's questions to follow `ordered_ids`.
///
/// `ordered_ids` must list every question of the questionnaire exactly once.
pub fn reorder_questions<P: Persistence>(
    store: &mut Store<P>,
    questionnaire_id: &str,
    ordered_ids: &[String],
) -> Result<(), AppError> {
    let state = store.state();
    if state.questionnaire(questionnaire_id).is_none() {
        return Err(AppError::NotFound("Questionnaire not found".to_string()));
    }

    let current: HashSet<&str> = state
        .questions_of(questionnaire_id)
        .iter()
        .map(|q| q.id.as_str())
        .collect();
    let requested: HashSet<&str> = ordered_ids.iter().map(String::as_str).collect();
    if requested.len() != ordered_ids.len() || requested != current {
        return Err(AppError::BadRequest(
            "Question order must list each question exactly once".to_string(),
        ));
    }

    let actions: Vec<Action> = ordered_ids
        .iter()
        .enumerate()
        .filter_map(|(order, id)| {
            let question = state.question(id)?;
            (question.order != order as i64).then(|| {
                Action::UpdateQuestion(Question {
                    order: order as i64,
                    ..question.clone()
                })
            })
        })
        .collect();

    store.dispatch_all(actions)
}

/// Deletes a questionnaire together with everything hanging off it.
pub fn delete_questionnaire<P: Persistence>(
    store: &mut Store<P>,
    questionnaire_id: &str,
) -> Result<(), AppError> {
    store.dispatch(Action::DeleteQuestionnaire(questionnaire_id.to_string()))?;
    tracing::info!("Deleted questionnaire {}", questionnaire_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionType;

    fn draft(question_type: QuestionType, options: &[&str]) -> QuestionDraft {
        QuestionDraft {
            question_text: "Pick one".to_string(),
            question_type,
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    #[test]
    fn test_choice_needs_two_options() {
        assert!(check_draft_options(&draft(QuestionType::SingleChoice, &["Yes"])).is_err());
        assert!(check_draft_options(&draft(QuestionType::SingleChoice, &["Yes", "No"])).is_ok());
    }

    #[test]
    fn test_blank_option_rejected() {
        let result = check_draft_options(&draft(QuestionType::MultipleChoice, &["A", "  ", "C"]));
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_text_question_has_no_options() {
        assert!(check_draft_options(&draft(QuestionType::Text, &[])).is_ok());
        assert!(check_draft_options(&draft(QuestionType::Text, &["A", "B"])).is_err());
    }

    #[test]
    fn test_draft_actions_orders_options() {
        let (question_id, actions) =
            draft_actions("q1", 4, draft(QuestionType::SingleChoice, &[" Yes ", "No"]));
        assert_eq!(actions.len(), 3);
        match &actions[0] {
            Action::AddQuestion(q) => {
                assert_eq!(q.id, question_id);
                assert_eq!(q.order, 4);
            }
            other => panic!("unexpected action {:?}", other),
        }
        match &actions[1] {
            Action::AddOption(o) => {
                assert_eq!(o.question_id, question_id);
                assert_eq!(o.option_text, "Yes");
                assert_eq!(o.order, 0);
            }
            other => panic!("unexpected action {:?}", other),
        }
    }
}
