// src/models/submission.rs

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// Body of `POST /api/submit`.
/// One option index per question, in question order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub answers: Vec<usize>,
}

/// Per-question outcome inside a [`ScoringResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// Body returned by `POST /api/submit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringResult {
    pub score: usize,
    pub total_questions: usize,
    pub feedback: Vec<FeedbackEntry>,
}

impl ScoringResult {
    /// Checks the result is consistent with a submission of `submitted` answers.
    pub fn verify(&self, submitted: usize) -> Result<(), QuizError> {
        if self.feedback.len() != submitted {
            return Err(QuizError::BadResponse(format!(
                "expected {} feedback entries, got {}",
                submitted,
                self.feedback.len()
            )));
        }
        if self.total_questions != submitted {
            return Err(QuizError::BadResponse(format!(
                "totalQuestions is {} but {} answers were submitted",
                self.total_questions, submitted
            )));
        }
        let correct = self.feedback.iter().filter(|f| f.is_correct).count();
        if self.score != correct {
            return Err(QuizError::BadResponse(format!(
                "score {} does not match {} correct entries",
                self.score, correct
            )));
        }
        Ok(())
    }
}
