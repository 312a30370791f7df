// src/models/question.rs

use std::path::Path;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, QuizError};

/// A question as the server stores it, answer key included.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = validate_answer_key))]
pub struct BankQuestion {
    /// The text content of the question.
    #[validate(length(min = 1, max = 1000))]
    pub question: String,

    /// List of options (e.g., ["Option A", "Option B"]).
    /// An option is identified by its 0-based position.
    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,

    /// Index of the correct option.
    pub answer: usize,
}

/// The full question bank, read from disk once at startup.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuestionBank {
    #[validate(length(min = 1), nested)]
    pub questions: Vec<BankQuestion>,
}

impl QuestionBank {
    /// Reads and validates a bank from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::InternalServerError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw).map_err(|e| {
            AppError::InternalServerError(format!("Invalid bank {}: {}", path.display(), e))
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let bank: QuestionBank = serde_json::from_str(raw)?;
        bank.validate()?;
        Ok(bank)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// DTO for sending the bank to a client (answer keys stripped).
    pub fn public(&self) -> QuizBank {
        QuizBank {
            questions: self
                .questions
                .iter()
                .map(|q| Question {
                    question: q.question.clone(),
                    options: q.options.clone(),
                })
                .collect(),
        }
    }
}

/// A question as the client sees it. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Question {
    pub question: String,

    #[validate(length(min = 1))]
    pub options: Vec<String>,
}

/// Body of `GET /api/questions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct QuizBank {
    #[validate(length(min = 1), nested)]
    pub questions: Vec<Question>,
}

impl QuizBank {
    /// Rejects banks the controller cannot navigate: no questions, or a
    /// question with nothing to pick.
    pub fn verify(&self) -> Result<(), QuizError> {
        self.validate()?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    if options.is_empty() {
        return Err(validator::ValidationError::new("options_cannot_be_empty"));
    }
    for opt in options {
        if opt.len() > 500 {
            return Err(validator::ValidationError::new("option_too_long"));
        }
    }
    Ok(())
}

fn validate_answer_key(question: &BankQuestion) -> Result<(), validator::ValidationError> {
    if question.answer >= question.options.len() {
        return Err(validator::ValidationError::new("answer_out_of_range"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANK: &str = r#"{
        "questions": [
            { "question": "2 + 2?", "options": ["3", "4"], "answer": 1 },
            { "question": "Capital of France?", "options": ["Paris", "Rome", "Oslo"], "answer": 0 }
        ]
    }"#;

    #[test]
    fn loads_valid_bank() {
        let bank = QuestionBank::from_json(BANK).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.questions[1].options[0], "Paris");
    }

    #[test]
    fn public_bank_has_no_answer_keys() {
        let bank = QuestionBank::from_json(BANK).unwrap();
        let json = serde_json::to_value(bank.public()).unwrap();
        assert!(json["questions"][0].get("answer").is_none());
        assert_eq!(json["questions"][0]["options"][1], "4");
    }

    #[test]
    fn rejects_answer_key_out_of_range() {
        let raw = r#"{ "questions": [ { "question": "Q", "options": ["a"], "answer": 1 } ] }"#;
        assert!(matches!(
            QuestionBank::from_json(raw),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn rejects_empty_bank_and_empty_options() {
        assert!(QuestionBank::from_json(r#"{ "questions": [] }"#).is_err());
        let raw = r#"{ "questions": [ { "question": "Q", "options": [], "answer": 0 } ] }"#;
        assert!(QuestionBank::from_json(raw).is_err());
    }

    #[test]
    fn malformed_bank_file_is_an_internal_error() {
        let path = std::env::temp_dir().join(format!("quiz_bank_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "questions": [ { "question": "Q" } ] }"#).unwrap();

        let err = QuestionBank::load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        match err {
            AppError::InternalServerError(msg) => {
                assert!(msg.contains("Invalid bank"));
                assert!(msg.contains("quiz_bank_"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn missing_bank_file_is_an_internal_error() {
        let err = QuestionBank::load("definitely/not/here.json").unwrap_err();
        assert!(matches!(err, AppError::InternalServerError(_)));
    }

    #[test]
    fn client_bank_verification() {
        let ok: QuizBank =
            serde_json::from_str(r#"{ "questions": [ { "question": "Q", "options": ["a"] } ] }"#)
                .unwrap();
        assert!(ok.verify().is_ok());

        let empty: QuizBank = serde_json::from_str(r#"{ "questions": [] }"#).unwrap();
        assert!(matches!(empty.verify(), Err(QuizError::BadResponse(_))));

        let no_options: QuizBank =
            serde_json::from_str(r#"{ "questions": [ { "question": "Q", "options": [] } ] }"#)
                .unwrap();
        assert!(matches!(no_options.verify(), Err(QuizError::BadResponse(_))));
    }
}
