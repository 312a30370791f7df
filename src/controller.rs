// src/controller.rs

//! Quiz navigation and answer-state controller.
//!
//! One `QuizController` is built per attempt and owns everything the attempt
//! mutates: the loaded bank, the cursor and the answer map. User actions come
//! in as [`QuizEvent`]s and go through [`QuizController::handle`], so the state
//! machine can be driven without any rendering surface.
//!
//! Phases: `Loading -> Active -> Submitting -> Finished`, with `Failed` parking
//! the attempt after a network or bad-response error until [`QuizController::retry`].

use std::collections::BTreeMap;

use crate::{
    error::QuizError,
    models::{
        question::QuizBank,
        submission::{ScoringResult, SubmitRequest},
    },
    render::{FeedbackView, NavVisibility, QuestionView, compute_nav_visibility},
    service::QuizService,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizPhase {
    Loading,
    Active,
    Submitting,
    Finished,
    Failed(QuizError),
}

/// Selected option per question index. A question is answered iff its key is
/// present; entries are overwritten but never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerMap(BTreeMap<usize, usize>);

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, question: usize, option: usize) {
        self.0.insert(question, option);
    }

    pub fn get(&self, question: usize) -> Option<usize> {
        self.0.get(&question).copied()
    }

    pub fn contains(&self, question: usize) -> bool {
        self.0.contains_key(&question)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Indices in `0..total` with no recorded answer.
    pub fn missing(&self, total: usize) -> Vec<usize> {
        (0..total).filter(|i| !self.contains(*i)).collect()
    }

    pub fn is_complete(&self, total: usize) -> bool {
        (0..total).all(|i| self.contains(i))
    }

    /// Answers in question order, or `None` while any of `0..total` is unanswered.
    pub fn ordered(&self, total: usize) -> Option<Vec<usize>> {
        (0..total).map(|i| self.get(i)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizEvent {
    OptionSelected { question: usize, option: usize },
    PrevRequested,
    NextRequested,
    SubmitRequested,
}

/// What [`QuizController::handle`] did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// State changed; re-render.
    Updated,
    /// Nothing to do (boundary navigation, or not in `Active`).
    Ignored,
    /// Refused with a user-facing reason; state unchanged.
    Rejected(QuizError),
    /// Entered `Submitting`; the payload must now be sent.
    Submit(SubmitRequest),
}

#[derive(Debug)]
pub struct QuizController {
    phase: QuizPhase,
    bank: Option<QuizBank>,
    cursor: usize,
    answers: AnswerMap,
    /// Payload of the submission in flight, kept for retry after a failure.
    pending: Option<SubmitRequest>,
    result: Option<ScoringResult>,
}

impl Default for QuizController {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizController {
    pub fn new() -> Self {
        Self {
            phase: QuizPhase::Loading,
            bank: None,
            cursor: 0,
            answers: AnswerMap::new(),
            pending: None,
            result: None,
        }
    }

    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn bank(&self) -> Option<&QuizBank> {
        self.bank.as_ref()
    }

    pub fn result(&self) -> Option<&ScoringResult> {
        self.result.as_ref()
    }

    /// Number of questions in the loaded bank (0 before loading).
    pub fn total(&self) -> usize {
        self.bank.as_ref().map_or(0, QuizBank::len)
    }

    pub fn missing_answers(&self) -> Vec<usize> {
        self.answers.missing(self.total())
    }

    /// Fetches the bank and enters `Active` at question 0.
    ///
    /// Runs from `Loading`, or from `Failed` when no bank has arrived yet.
    /// On error the controller moves to `Failed` and the error is returned.
    pub async fn load_questions(&mut self, service: &dyn QuizService) -> Result<(), QuizError> {
        if !self.awaiting_bank() {
            tracing::warn!("Ignoring load request in phase {:?}", self.phase);
            return Ok(());
        }

        match service.fetch_questions().await {
            Ok(bank) => self.questions_loaded(bank),
            Err(e) => {
                tracing::warn!("Failed to load questions: {}", e);
                self.phase = QuizPhase::Failed(e.clone());
                Err(e)
            }
        }
    }

    fn awaiting_bank(&self) -> bool {
        match self.phase {
            QuizPhase::Loading => true,
            QuizPhase::Failed(_) => self.bank.is_none(),
            _ => false,
        }
    }

    fn ensure_active(&self) -> Result<(), QuizError> {
        if self.phase == QuizPhase::Active {
            Ok(())
        } else {
            Err(QuizError::NotActive(format!("{:?}", self.phase)))
        }
    }

    /// Installs a freshly fetched bank.
    /// Only accepted while no bank has been installed yet.
    pub fn questions_loaded(&mut self, bank: QuizBank) -> Result<(), QuizError> {
        if !self.awaiting_bank() {
            return Err(QuizError::NotActive(format!("{:?}", self.phase)));
        }
        if let Err(e) = bank.verify() {
            self.phase = QuizPhase::Failed(e.clone());
            return Err(e);
        }

        tracing::info!("Loaded {} questions", bank.len());
        self.bank = Some(bank);
        self.cursor = 0;
        self.phase = QuizPhase::Active;
        Ok(())
    }

    /// Single entry point for user actions.
    pub fn handle(&mut self, event: QuizEvent) -> Dispatch {
        if self.phase != QuizPhase::Active {
            tracing::debug!("Ignoring {:?} in phase {:?}", event, self.phase);
            return Dispatch::Ignored;
        }

        match event {
            QuizEvent::OptionSelected { question, option } => {
                match self.select_option(question, option) {
                    Ok(()) => Dispatch::Updated,
                    Err(e) => Dispatch::Rejected(e),
                }
            }
            QuizEvent::PrevRequested => {
                if self.go_to_previous() {
                    Dispatch::Updated
                } else {
                    Dispatch::Ignored
                }
            }
            QuizEvent::NextRequested => {
                if self.go_to_next() {
                    Dispatch::Updated
                } else {
                    Dispatch::Ignored
                }
            }
            QuizEvent::SubmitRequested => match self.begin_submit() {
                Ok(request) => Dispatch::Submit(request),
                Err(e) => Dispatch::Rejected(e),
            },
        }
    }

    /// Records `option` for `question`, replacing any earlier pick.
    /// Does not move the cursor.
    pub fn select_option(&mut self, question: usize, option: usize) -> Result<(), QuizError> {
        self.ensure_active()?;
        let in_range = self
            .bank
            .as_ref()
            .and_then(|b| b.get(question))
            .is_some_and(|q| option < q.options.len());
        if !in_range {
            return Err(QuizError::InvalidSelection { question, option });
        }

        self.answers.record(question, option);
        tracing::debug!("Question {} -> option {}", question, option);
        Ok(())
    }

    /// Steps back one question. Returns false at the first question or
    /// outside `Active`.
    pub fn go_to_previous(&mut self) -> bool {
        if self.phase == QuizPhase::Active && self.cursor > 0 {
            self.cursor -= 1;
            tracing::debug!("Cursor -> {}", self.cursor);
            true
        } else {
            false
        }
    }

    /// Steps forward one question. Returns false at the last question or
    /// outside `Active`.
    pub fn go_to_next(&mut self) -> bool {
        if self.phase == QuizPhase::Active && self.cursor + 1 < self.total() {
            self.cursor += 1;
            tracing::debug!("Cursor -> {}", self.cursor);
            true
        } else {
            false
        }
    }

    /// Validates completeness and enters `Submitting`.
    fn begin_submit(&mut self) -> Result<SubmitRequest, QuizError> {
        let total = self.total();
        let Some(answers) = self.answers.ordered(total) else {
            let missing = self.answers.missing(total);
            tracing::warn!("Submit rejected, {} unanswered", missing.len());
            return Err(QuizError::IncompleteSubmission { missing });
        };

        let request = SubmitRequest { answers };
        self.pending = Some(request.clone());
        self.phase = QuizPhase::Submitting;
        Ok(request)
    }

    /// Submits the attempt and waits for the score.
    ///
    /// From `Active` this checks that every question is answered first. From
    /// `Failed` after an earlier submit, the same payload is sent again.
    pub async fn submit(&mut self, service: &dyn QuizService) -> Result<&ScoringResult, QuizError> {
        let retrying = matches!(self.phase, QuizPhase::Failed(_));
        let request = match self.pending.clone().filter(|_| retrying) {
            Some(request) => {
                self.phase = QuizPhase::Submitting;
                request
            }
            None => match self.handle(QuizEvent::SubmitRequested) {
                Dispatch::Submit(request) => request,
                Dispatch::Rejected(e) => return Err(e),
                _ => {
                    return Err(QuizError::NotActive(format!("{:?}", self.phase)));
                }
            },
        };

        tracing::info!("Submitting {} answers", request.answers.len());
        match service.submit_answers(&request).await {
            Ok(result) => self.submission_scored(result),
            Err(e) => {
                self.submission_failed(e.clone());
                Err(e)
            }
        }
    }

    /// Accepts the scoring result for the pending submission and finishes.
    /// Only valid in `Submitting`.
    pub fn submission_scored(&mut self, result: ScoringResult) -> Result<&ScoringResult, QuizError> {
        let submitted = match (&self.phase, &self.pending) {
            (QuizPhase::Submitting, Some(pending)) => pending.answers.len(),
            _ => return Err(QuizError::NotActive(format!("{:?}", self.phase))),
        };
        if let Err(e) = result.verify(submitted) {
            self.submission_failed(e.clone());
            return Err(e);
        }

        tracing::info!("Scored {} / {}", result.score, result.total_questions);
        self.pending = None;
        self.phase = QuizPhase::Finished;
        Ok(&*self.result.insert(result))
    }

    fn submission_failed(&mut self, error: QuizError) {
        tracing::warn!("Submission failed: {}", error);
        self.phase = QuizPhase::Failed(error);
    }

    /// Re-runs whatever failed: the bank fetch or the submission.
    pub async fn retry(&mut self, service: &dyn QuizService) -> Result<(), QuizError> {
        if !matches!(self.phase, QuizPhase::Failed(_)) {
            return Ok(());
        }
        if self.bank.is_none() {
            self.load_questions(service).await
        } else {
            self.submit(service).await.map(|_| ())
        }
    }

    /// The question at `index` with its recorded answer pre-selected.
    pub fn render_question(&self, index: usize) -> Option<QuestionView> {
        let question = self.bank.as_ref()?.get(index)?;
        Some(QuestionView::new(index, question, self.answers.get(index)))
    }

    /// The question under the cursor while the attempt is still interactive.
    pub fn current_view(&self) -> Option<QuestionView> {
        match self.phase {
            QuizPhase::Active | QuizPhase::Submitting => self.render_question(self.cursor),
            _ => None,
        }
    }

    /// Navigation controls to show; all hidden outside `Active`.
    pub fn nav_visibility(&self) -> NavVisibility {
        if self.phase == QuizPhase::Active {
            compute_nav_visibility(self.cursor, self.total())
        } else {
            NavVisibility::default()
        }
    }

    pub fn feedback(&self) -> Option<FeedbackView> {
        self.result.as_ref().map(FeedbackView::new)
    }
}
