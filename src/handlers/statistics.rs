// src/handlers/statistics.rs

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::{
    error::AppError,
    models::{QuestionAnswer, QuestionType},
    state::AppState,
};

/// Selection count for one option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionCount {
    pub id: String,
    pub name: String,
    pub value: usize,
}

/// Aggregates for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionStatistics {
    Text {
        question_id: String,
        question_text: String,
        total_answers: usize,
        /// Non-empty free-text answers, in submission order.
        answers: Vec<String>,
    },
    Choice {
        question_id: String,
        question_text: String,
        question_type: QuestionType,
        total_answers: usize,
        option_counts: Vec<OptionCount>,
        total_selections: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionnaireStatistics {
    pub questionnaire_id: String,
    pub title: String,
    pub total_responses: usize,
    /// Mean time per response, missing times counted as zero.
    pub average_time_seconds: i64,
    pub questions: Vec<QuestionStatistics>,
}

/// Builds response statistics for one questionnaire.
pub fn questionnaire_statistics(
    state: &AppState,
    questionnaire_id: &str,
) -> Result<QuestionnaireStatistics, AppError> {
    let questionnaire = state
        .questionnaire(questionnaire_id)
        .ok_or(AppError::NotFound(format!(
            "Questionnaire '{}' not found",
            questionnaire_id
        )))?;

    let responses = state.responses_of(questionnaire_id);
    let response_ids: HashSet<&str> = responses.iter().map(|r| r.id.as_str()).collect();

    let mut answers_by_question: HashMap<&str, Vec<&QuestionAnswer>> = HashMap::new();
    for answer in state
        .answers
        .iter()
        .filter(|a| response_ids.contains(a.response_id.as_str()))
    {
        answers_by_question
            .entry(answer.question_id.as_str())
            .or_default()
            .push(answer);
    }

    let questions = state
        .questions_of(questionnaire_id)
        .into_iter()
        .map(|question| {
            let answers = answers_by_question
                .get(question.id.as_str())
                .map(Vec::as_slice)
                .unwrap_or_default();

            if question.question_type == QuestionType::Text {
                return QuestionStatistics::Text {
                    question_id: question.id.clone(),
                    question_text: question.question_text.clone(),
                    total_answers: answers.len(),
                    answers: answers
                        .iter()
                        .filter_map(|a| a.answer_text.clone())
                        .filter(|text| !text.is_empty())
                        .collect(),
                };
            }

            let option_counts: Vec<OptionCount> = state
                .options_of(&question.id)
                .into_iter()
                .map(|option| OptionCount {
                    id: option.id.clone(),
                    name: option.option_text.clone(),
                    value: answers
                        .iter()
                        .filter(|a| {
                            a.selected_options
                                .as_ref()
                                .is_some_and(|selected| selected.contains(&option.id))
                        })
                        .count(),
                })
                .collect();
            let total_selections = option_counts.iter().map(|c| c.value).sum();

            QuestionStatistics::Choice {
                question_id: question.id.clone(),
                question_text: question.question_text.clone(),
                question_type: question.question_type,
                total_answers: answers.len(),
                option_counts,
                total_selections,
            }
        })
        .collect();

    Ok(QuestionnaireStatistics {
        questionnaire_id: questionnaire.id.clone(),
        title: questionnaire.title.clone(),
        total_responses: responses.len(),
        average_time_seconds: average_time(
            responses.iter().map(|r| r.time_taken_seconds.unwrap_or(0)),
        ),
        questions,
    })
}

/// Rounded mean, 0 for no samples.
fn average_time(times: impl ExactSizeIterator<Item = i64>) -> i64 {
    let count = times.len();
    if count == 0 {
        return 0;
    }
    let total: i64 = times.sum();
    (total as f64 / count as f64).round() as i64
}

/// Renders seconds as "M min S sec".
pub fn format_duration(total_seconds: i64) -> String {
    if total_seconds < 0 {
        return "N/A".to_string();
    }
    format!("{} min {} sec", total_seconds / 60, total_seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_time_rounds() {
        assert_eq!(average_time([10, 11].into_iter()), 11);
        assert_eq!(average_time([10, 10, 11].into_iter()), 10);
        assert_eq!(average_time(Vec::<i64>::new().into_iter()), 0);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0 min 0 sec");
        assert_eq!(format_duration(125), "2 min 5 sec");
        assert_eq!(format_duration(-1), "N/A");
    }
}
