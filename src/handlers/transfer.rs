// src/handlers/transfer.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::AppError,
    models::{Question, QuestionOption, Questionnaire},
    reducer::Action,
    state::AppState,
    storage::Persistence,
    store::Store,
    utils::ids::{new_id, now},
};

/// One questionnaire's full structure, as moved between installations.
/// Responses and answers are not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireExport {
    pub questionnaire: Questionnaire,
    pub questions: Vec<Question>,
    pub options: Vec<QuestionOption>,
}

impl QuestionnaireExport {
    pub fn to_json(&self) -> Result<String, AppError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AppError::InternalServerError(e.to_string()))
    }
}

/// Questionnaire section of an import file. Only the details are read,
/// everything else is reassigned on import.
#[derive(Debug, Deserialize)]
struct ImportedQuestionnaire {
    title: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImportFile {
    questionnaire: ImportedQuestionnaire,
    questions: Vec<Question>,
    options: Vec<QuestionOption>,
}

/// Collects a questionnaire with its questions and options, both in order.
pub fn export_questionnaire(
    state: &AppState,
    questionnaire_id: &str,
) -> Result<QuestionnaireExport, AppError> {
    let questionnaire = state
        .questionnaire(questionnaire_id)
        .cloned()
        .ok_or(AppError::NotFound("Questionnaire not found".to_string()))?;

    let questions: Vec<Question> = state
        .questions_of(questionnaire_id)
        .into_iter()
        .cloned()
        .collect();
    let options = questions
        .iter()
        .flat_map(|q| state.options_of(&q.id))
        .cloned()
        .collect();

    Ok(QuestionnaireExport {
        questionnaire,
        questions,
        options,
    })
}

/// Rejects files without the three sections or without an identifiable questionnaire.
fn check_export_shape(value: &Value) -> Result<(), AppError> {
    for field in ["questionnaire", "questions", "options"] {
        if value.get(field).is_none() {
            return Err(AppError::BadRequest(format!(
                "Import file is missing '{}'",
                field
            )));
        }
    }

    let questionnaire = &value["questionnaire"];
    if questionnaire.get("id").is_none() || questionnaire.get("title").is_none() {
        return Err(AppError::BadRequest(
            "Imported questionnaire needs an id and a title".to_string(),
        ));
    }

    Ok(())
}

/// Imports an exported questionnaire under fresh ids, owned by `owner_id`.
///
/// Question references in options are remapped onto the new question ids.
/// Options whose question is not in the file are dropped. Returns the new
/// questionnaire id.
pub fn import_questionnaire<P: Persistence>(
    store: &mut Store<P>,
    json: &str,
    owner_id: &str,
) -> Result<String, AppError> {
    let value: Value = serde_json::from_str(json)?;
    check_export_shape(&value)?;
    let export: ImportFile = serde_json::from_value(value)?;

    let questionnaire = Questionnaire {
        id: new_id(),
        title: export.questionnaire.title,
        description: export.questionnaire.description,
        created_at: now(),
        user_id: owner_id.to_string(),
    };
    let questionnaire_id = questionnaire.id.clone();

    let mut id_map: HashMap<String, String> = HashMap::new();
    let mut actions = vec![Action::AddQuestionnaire(questionnaire)];

    for question in export.questions {
        let new_question_id = new_id();
        id_map.insert(question.id.clone(), new_question_id.clone());
        actions.push(Action::AddQuestion(Question {
            id: new_question_id,
            questionnaire_id: questionnaire_id.clone(),
            ..question
        }));
    }

    for option in export.options {
        let Some(question_id) = id_map.get(&option.question_id) else {
            tracing::warn!(
                "Dropping imported option {}: question {} not in file",
                option.id,
                option.question_id
            );
            continue;
        };
        actions.push(Action::AddOption(QuestionOption {
            id: new_id(),
            question_id: question_id.clone(),
            ..option
        }));
    }

    store.dispatch_all(actions)?;
    tracing::info!("Imported questionnaire as {}", questionnaire_id);

    Ok(questionnaire_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shape_requires_all_sections() {
        let value = json!({ "questionnaire": { "id": "q1", "title": "T" }, "questions": [] });
        assert!(matches!(check_export_shape(&value), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_shape_requires_id_and_title() {
        let value = json!({ "questionnaire": { "id": "q1" }, "questions": [], "options": [] });
        assert!(check_export_shape(&value).is_err());

        let value = json!({ "questionnaire": { "id": "q1", "title": "T" }, "questions": [], "options": [] });
        assert!(check_export_shape(&value).is_ok());
    }

    #[test]
    fn test_import_file_needs_only_id_and_title() {
        let value = json!({
            "questionnaire": { "id": "q1", "title": "T" },
            "questions": [],
            "options": []
        });
        let file: ImportFile = serde_json::from_value(value).unwrap();
        assert_eq!(file.questionnaire.title, "T");
        assert_eq!(file.questionnaire.description, None);
    }
}
