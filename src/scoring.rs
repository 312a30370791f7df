// src/scoring.rs

use crate::{
    error::AppError,
    models::{
        question::QuestionBank,
        submission::{FeedbackEntry, ScoringResult},
    },
};

/// Grades an ordered answer list against the bank.
///
/// * Expects exactly one answer per question, in question order.
/// * Every answer must name an existing option of its question.
/// * One point per correct answer; no partial credit.
pub fn grade(bank: &QuestionBank, answers: &[usize]) -> Result<ScoringResult, AppError> {
    if answers.len() != bank.len() {
        return Err(AppError::BadRequest(format!(
            "Expected {} answers, got {}",
            bank.len(),
            answers.len()
        )));
    }

    let mut score = 0;
    let mut feedback = Vec::with_capacity(answers.len());

    for (index, (question, &chosen)) in bank.questions.iter().zip(answers).enumerate() {
        let user_answer = question.options.get(chosen).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Answer {} for question {} is out of range",
                chosen,
                index + 1
            ))
        })?;
        let correct_answer = question.options.get(question.answer).ok_or_else(|| {
            AppError::InternalServerError(format!(
                "Answer key for question {} is out of range",
                index + 1
            ))
        })?;

        let is_correct = chosen == question.answer;
        if is_correct {
            score += 1;
        }

        feedback.push(FeedbackEntry {
            question: question.question.clone(),
            user_answer: user_answer.clone(),
            correct_answer: correct_answer.clone(),
            is_correct,
        });
    }

    Ok(ScoringResult {
        score,
        total_questions: bank.len(),
        feedback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> QuestionBank {
        QuestionBank::from_json(
            r#"{
                "questions": [
                    { "question": "2 + 2?", "options": ["3", "4", "5"], "answer": 1 },
                    { "question": "Largest planet?", "options": ["Jupiter", "Mars"], "answer": 0 },
                    { "question": "H2O is?", "options": ["Salt", "Air", "Water"], "answer": 2 }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn all_correct() {
        let result = grade(&bank(), &[1, 0, 2]).unwrap();
        assert_eq!(result.score, 3);
        assert_eq!(result.total_questions, 3);
        assert!(result.feedback.iter().all(|f| f.is_correct));
    }

    #[test]
    fn feedback_follows_question_order() {
        let result = grade(&bank(), &[0, 0, 1]).unwrap();
        assert_eq!(result.score, 1);
        let first = &result.feedback[0];
        assert_eq!(first.question, "2 + 2?");
        assert_eq!(first.user_answer, "3");
        assert_eq!(first.correct_answer, "4");
        assert!(!first.is_correct);
        assert!(result.feedback[1].is_correct);
        assert_eq!(result.feedback[2].user_answer, "Air");
        assert!(result.verify(3).is_ok());
    }

    #[test]
    fn wrong_answer_count_is_rejected() {
        assert!(matches!(
            grade(&bank(), &[1, 0]),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn out_of_range_option_is_rejected() {
        assert!(matches!(
            grade(&bank(), &[1, 5, 2]),
            Err(AppError::BadRequest(_))
        ));
    }
}
