// src/render.rs

//! Text views of the quiz. Everything here is a pure function of its inputs:
//! the same question and selection always render to the same text.

use std::fmt;

use crate::models::{question::Question, submission::ScoringResult};

/// Which navigation controls are shown for a cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavVisibility {
    pub prev: bool,
    pub next: bool,
    pub submit: bool,
}

/// Visibility rule table:
///
/// | cursor            | prev | next | submit |
/// |-------------------|------|------|--------|
/// | 0, n > 1          | no   | yes  | no     |
/// | 0, n == 1         | no   | no   | yes    |
/// | 0 < cursor < n-1  | yes  | yes  | no     |
/// | cursor == n-1 > 0 | yes  | no   | yes    |
pub fn compute_nav_visibility(cursor: usize, total: usize) -> NavVisibility {
    if total == 0 {
        return NavVisibility::default();
    }
    let last = total - 1;
    NavVisibility {
        prev: cursor > 0,
        next: cursor < last,
        submit: cursor == last,
    }
}

impl fmt::Display for NavVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut controls = Vec::new();
        if self.prev {
            controls.push("[p]rev");
        }
        if self.next {
            controls.push("[n]ext");
        }
        if self.submit {
            controls.push("[s]ubmit");
        }
        write!(f, "{}", controls.join("  "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub index: usize,
    pub label: String,
    pub selected: bool,
}

/// A question rendered as a single-select group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub index: usize,
    pub text: String,
    pub options: Vec<OptionView>,
}

impl QuestionView {
    /// `selected` is the recorded answer for this question, if any.
    pub fn new(index: usize, question: &Question, selected: Option<usize>) -> Self {
        let options = question
            .options
            .iter()
            .enumerate()
            .map(|(i, label)| OptionView {
                index: i,
                label: label.clone(),
                selected: selected == Some(i),
            })
            .collect();

        Self {
            index,
            text: question.question.clone(),
            options,
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.options.iter().find(|o| o.selected).map(|o| o.index)
    }
}

impl fmt::Display for QuestionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}. {}", self.index + 1, self.text)?;
        for option in &self.options {
            let mark = if option.selected { "(*)" } else { "( )" };
            writeln!(f, "  {} {}) {}", mark, option.index + 1, option.label)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Correct => "Correct",
            Verdict::Incorrect => "Incorrect",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackBlock {
    pub number: usize,
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub verdict: Verdict,
}

/// Read-only summary shown once the quiz is scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackView {
    pub score: usize,
    pub total_questions: usize,
    pub blocks: Vec<FeedbackBlock>,
}

impl FeedbackView {
    pub fn new(result: &ScoringResult) -> Self {
        let blocks = result
            .feedback
            .iter()
            .enumerate()
            .map(|(i, entry)| FeedbackBlock {
                number: i + 1,
                question: entry.question.clone(),
                user_answer: entry.user_answer.clone(),
                correct_answer: entry.correct_answer.clone(),
                verdict: if entry.is_correct {
                    Verdict::Correct
                } else {
                    Verdict::Incorrect
                },
            })
            .collect();

        Self {
            score: result.score,
            total_questions: result.total_questions,
            blocks,
        }
    }

    pub fn header(&self) -> String {
        format!("Your Score: {} / {}", self.score, self.total_questions)
    }

    /// Renders the view, letting the caller decorate each verdict label
    /// (the terminal colours them).
    pub fn render_with<F>(&self, mut marker: F) -> String
    where
        F: FnMut(Verdict) -> String,
    {
        let mut out = String::new();
        out.push_str(&self.header());
        out.push_str("\n\nFeedback:\n");
        for block in &self.blocks {
            out.push_str(&format!("Question {}: {}\n", block.number, block.question));
            out.push_str(&format!("Your Answer: {}\n", block.user_answer));
            out.push_str(&format!("Correct Answer: {}\n", block.correct_answer));
            out.push_str(&marker(block.verdict));
            out.push_str("\n----\n");
        }
        out
    }
}

impl fmt::Display for FeedbackView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_with(|v| v.label().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submission::FeedbackEntry;

    fn question() -> Question {
        Question {
            question: "Pick a colour".to_string(),
            options: vec!["Red".to_string(), "Green".to_string(), "Blue".to_string()],
        }
    }

    #[test]
    fn nav_table() {
        assert_eq!(
            compute_nav_visibility(0, 3),
            NavVisibility { prev: false, next: true, submit: false }
        );
        assert_eq!(
            compute_nav_visibility(0, 1),
            NavVisibility { prev: false, next: false, submit: true }
        );
        assert_eq!(
            compute_nav_visibility(1, 3),
            NavVisibility { prev: true, next: true, submit: false }
        );
        assert_eq!(
            compute_nav_visibility(2, 3),
            NavVisibility { prev: true, next: false, submit: true }
        );
    }

    #[test]
    fn nav_bar_lists_visible_controls_only() {
        assert_eq!(compute_nav_visibility(1, 3).to_string(), "[p]rev  [n]ext");
        assert_eq!(compute_nav_visibility(0, 1).to_string(), "[s]ubmit");
    }

    #[test]
    fn question_view_marks_selection() {
        let view = QuestionView::new(1, &question(), Some(2));
        assert_eq!(view.selected(), Some(2));
        assert_eq!(
            view.to_string(),
            "2. Pick a colour\n  ( ) 1) Red\n  ( ) 2) Green\n  (*) 3) Blue\n"
        );
    }

    #[test]
    fn question_view_without_selection() {
        let view = QuestionView::new(0, &question(), None);
        assert_eq!(view.selected(), None);
        assert!(view.options.iter().all(|o| !o.selected));
    }

    #[test]
    fn rendering_is_repeatable() {
        let a = QuestionView::new(0, &question(), Some(1)).to_string();
        let b = QuestionView::new(0, &question(), Some(1)).to_string();
        assert_eq!(a, b);
    }

    #[test]
    fn feedback_view_blocks_and_header() {
        let entry = |q: &str, ok: bool| FeedbackEntry {
            question: q.to_string(),
            user_answer: "x".to_string(),
            correct_answer: if ok { "x" } else { "y" }.to_string(),
            is_correct: ok,
        };
        let result = ScoringResult {
            score: 2,
            total_questions: 3,
            feedback: vec![entry("A", true), entry("B", false), entry("C", true)],
        };

        let view = FeedbackView::new(&result);
        assert_eq!(view.blocks.len(), 3);
        assert_eq!(view.blocks[1].verdict, Verdict::Incorrect);

        let text = view.to_string();
        assert!(text.starts_with("Your Score: 2 / 3"));
        assert!(text.contains("Question 2: B\nYour Answer: x\nCorrect Answer: y\nIncorrect\n"));
        assert_eq!(text.matches("Incorrect").count(), 1);
        assert_eq!(text.matches("\nCorrect\n").count(), 2);
    }
}
