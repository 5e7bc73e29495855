// src/models/mod.rs

pub mod answer;
pub mod option;
pub mod question;
pub mod questionnaire;
pub mod response;
pub mod user;

pub use answer::{AnswerDraft, QuestionAnswer};
pub use option::QuestionOption;
pub use question::{Question, QuestionDraft, QuestionType};
pub use questionnaire::{CreateQuestionnaireRequest, Questionnaire, UpdateQuestionnaireRequest};
pub use response::{QuestionnaireResponse, SubmitResponseRequest};
pub use user::{SignInRequest, SignUpRequest, User};

use std::borrow::Cow;

use validator::ValidationError;

use crate::config::{MAX_TITLE_LENGTH, MIN_PASSWORD_LENGTH};

/// Rejects strings that are empty once surrounding whitespace is removed.
pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("must_not_be_blank"));
    }
    Ok(())
}

/// Titles are measured after trimming, the way they are stored.
pub(crate) fn validate_title(value: &str) -> Result<(), ValidationError> {
    let len = value.trim().chars().count() as u64;
    if len == 0 {
        return Err(ValidationError::new("must_not_be_blank"));
    }
    if len > MAX_TITLE_LENGTH {
        return Err(ValidationError::new("length").with_message(Cow::Owned(format!(
            "Title must be at most {} characters long.",
            MAX_TITLE_LENGTH
        ))));
    }
    Ok(())
}

pub(crate) fn validate_password(value: &str) -> Result<(), ValidationError> {
    if (value.chars().count() as u64) < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::new("length").with_message(Cow::Owned(format!(
            "Password must be at least {} characters long.",
            MIN_PASSWORD_LENGTH
        ))));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_measured_after_trim() {
        let title = format!("  {}  ", "x".repeat(MAX_TITLE_LENGTH as usize));
        assert!(validate_title(&title).is_ok());
        assert!(validate_title(&"x".repeat(MAX_TITLE_LENGTH as usize + 1)).is_err());
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn test_password_message_follows_limit() {
        let err = validate_password("abc").unwrap_err();
        let message = err.message.unwrap();
        assert!(message.contains(&MIN_PASSWORD_LENGTH.to_string()));
        assert!(validate_password(&"a".repeat(MIN_PASSWORD_LENGTH as usize)).is_ok());
    }
}
