// src/terminal.rs

//! Line-based terminal front end for a quiz attempt.
//!
//! Reads one command per line, turns it into controller events and prints
//! the resulting view. Controls that are hidden for the current position are
//! refused, the same way a hidden button cannot be clicked.

use std::io::Write;

use crossterm::{
    cursor::MoveTo,
    queue,
    style::Stylize,
    terminal::{Clear, ClearType},
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::{
    controller::{Dispatch, QuizController, QuizEvent, QuizPhase},
    error::QuizError,
    models::submission::ScoringResult,
    render::{FeedbackView, Verdict},
    service::QuizService,
};

const HELP: &str = "Commands: <number> select option, p prev, n next, s submit, r retry, h help, q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// 1-based option number, as printed.
    Select(usize),
    Prev,
    Next,
    Submit,
    Retry,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Option<Command> {
    let word = line.trim().to_ascii_lowercase();
    match word.as_str() {
        "p" | "prev" => Some(Command::Prev),
        "n" | "next" => Some(Command::Next),
        "s" | "submit" => Some(Command::Submit),
        "r" | "retry" => Some(Command::Retry),
        "h" | "help" | "?" => Some(Command::Help),
        "q" | "quit" | "exit" => Some(Command::Quit),
        other => other
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .map(Command::Select),
    }
}

/// Writes the feedback view, colouring verdicts when `styled`.
pub fn write_feedback<W: Write>(out: &mut W, view: &FeedbackView, styled: bool) -> Result<(), QuizError> {
    let text = view.render_with(|verdict| {
        let label = verdict.label();
        match (styled, verdict) {
            (false, _) => label.to_string(),
            (true, Verdict::Correct) => label.green().bold().to_string(),
            (true, Verdict::Incorrect) => label.red().bold().to_string(),
        }
    });
    write!(out, "{}", text)?;
    Ok(())
}

pub struct TerminalSession<'a, W: Write> {
    controller: QuizController,
    service: &'a dyn QuizService,
    out: W,
    /// Colours and screen clearing; off when output is not a terminal.
    styled: bool,
}

impl<'a, W: Write> TerminalSession<'a, W> {
    pub fn new(service: &'a dyn QuizService, out: W, styled: bool) -> Self {
        Self {
            controller: QuizController::new(),
            service,
            out,
            styled,
        }
    }

    pub fn controller(&self) -> &QuizController {
        &self.controller
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs the attempt until it is scored, the user quits or input ends.
    /// Returns the scoring result when the attempt finished.
    pub async fn run<R>(&mut self, input: R) -> Result<Option<ScoringResult>, QuizError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();

        writeln!(self.out, "Loading questions...")?;
        if let Err(e) = self.controller.load_questions(self.service).await {
            self.report_failure(&e)?;
        } else {
            self.draw()?;
        }

        while let Some(line) = lines.next_line().await? {
            let Some(command) = parse_command(&line) else {
                if !line.trim().is_empty() {
                    writeln!(self.out, "Unknown command '{}'. {}", line.trim(), HELP)?;
                }
                continue;
            };

            match command {
                Command::Quit => {
                    writeln!(self.out, "Bye.")?;
                    return Ok(None);
                }
                Command::Help => writeln!(self.out, "{}", HELP)?,
                Command::Retry => {
                    self.retry().await?;
                    if self.controller.phase() == &QuizPhase::Finished {
                        return Ok(self.controller.result().cloned());
                    }
                }
                Command::Submit => {
                    if self.submit().await? {
                        return Ok(self.controller.result().cloned());
                    }
                }
                Command::Prev | Command::Next | Command::Select(_) => self.navigate(command)?,
            }
        }

        Ok(None)
    }

    fn navigate(&mut self, command: Command) -> Result<(), QuizError> {
        if !self.require_active()? {
            return Ok(());
        }

        let nav = self.controller.nav_visibility();
        let event = match command {
            Command::Prev if !nav.prev => {
                writeln!(self.out, "Already at the first question.")?;
                return Ok(());
            }
            Command::Next if !nav.next => {
                writeln!(self.out, "Already at the last question.")?;
                return Ok(());
            }
            Command::Prev => QuizEvent::PrevRequested,
            Command::Next => QuizEvent::NextRequested,
            Command::Select(number) => QuizEvent::OptionSelected {
                question: self.controller.cursor(),
                option: number - 1,
            },
            _ => return Ok(()),
        };

        match self.controller.handle(event) {
            Dispatch::Updated => self.draw(),
            Dispatch::Rejected(e) => {
                writeln!(self.out, "{}", e)?;
                Ok(())
            }
            Dispatch::Ignored | Dispatch::Submit(_) => Ok(()),
        }
    }

    /// Returns true once the attempt is scored.
    async fn submit(&mut self) -> Result<bool, QuizError> {
        match self.controller.phase() {
            QuizPhase::Active => {
                if !self.controller.nav_visibility().submit {
                    writeln!(self.out, "Submit is available on the last question.")?;
                    return Ok(false);
                }
            }
            QuizPhase::Failed(_) => {
                writeln!(self.out, "Use 'r' to retry.")?;
                return Ok(false);
            }
            _ => return Ok(false),
        }

        writeln!(self.out, "Submitting...")?;
        let outcome = self.controller.submit(self.service).await.map(|_| ());
        match outcome {
            Ok(()) => {
                self.show_feedback()?;
                Ok(true)
            }
            Err(e @ QuizError::IncompleteSubmission { .. }) => {
                writeln!(self.out, "{}", e)?;
                Ok(false)
            }
            Err(e) => {
                self.report_failure(&e)?;
                Ok(false)
            }
        }
    }

    async fn retry(&mut self) -> Result<(), QuizError> {
        if !matches!(self.controller.phase(), QuizPhase::Failed(_)) {
            writeln!(self.out, "Nothing to retry.")?;
            return Ok(());
        }

        match self.controller.retry(self.service).await {
            Ok(()) if self.controller.phase() == &QuizPhase::Finished => self.show_feedback(),
            Ok(()) => self.draw(),
            Err(e) => self.report_failure(&e),
        }
    }

    fn require_active(&mut self) -> Result<bool, QuizError> {
        match self.controller.phase() {
            QuizPhase::Active => Ok(true),
            QuizPhase::Failed(_) => {
                writeln!(self.out, "Use 'r' to retry or 'q' to quit.")?;
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    fn draw(&mut self) -> Result<(), QuizError> {
        let Some(view) = self.controller.current_view() else {
            return Ok(());
        };
        writeln!(self.out)?;
        write!(self.out, "{}", view)?;
        writeln!(
            self.out,
            "Answered {}/{}   {}",
            self.controller.answers().len(),
            self.controller.total(),
            self.controller.nav_visibility()
        )?;
        self.out.flush()?;
        Ok(())
    }

    fn show_feedback(&mut self) -> Result<(), QuizError> {
        let Some(view) = self.controller.feedback() else {
            return Ok(());
        };
        if self.styled {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        write_feedback(&mut self.out, &view, self.styled)?;
        self.out.flush()?;
        Ok(())
    }

    fn report_failure(&mut self, error: &QuizError) -> Result<(), QuizError> {
        let message = error.to_string();
        if self.styled {
            writeln!(self.out, "{}", message.as_str().red())?;
        } else {
            writeln!(self.out, "{}", message)?;
        }
        writeln!(self.out, "Type 'r' to retry or 'q' to quit.")?;
        self.out.flush()?;
        Ok(())
    }
}
