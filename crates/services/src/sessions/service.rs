use chrono::{DateTime, Utc};
use std::fmt;

use quiz_core::Clock;
use quiz_core::model::{Category, Question};

use super::progress::SessionProgress;
use super::result::QuizResult;
use crate::error::SessionError;

//
// ─── STATES ────────────────────────────────────────────────────────────────────
//

/// Per-question state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionPhase {
    /// Waiting for a choice to be submitted. `selection` is tentative and may change.
    Answering { selection: Option<usize> },
    /// The answer was submitted and graded; waiting for the user to move on.
    Revealing,
}

/// Whole-session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    InProgress,
    Finished,
}

/// A graded answer, one per submitted question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmittedAnswer {
    pub question_index: usize,
    pub chosen: usize,
    pub correct_index: usize,
}

impl SubmittedAnswer {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.chosen == self.correct_index
    }
}

/// Read-only view of the question currently on screen.
#[derive(Debug, Clone, Copy)]
pub struct CurrentQuestion<'a> {
    pub index: usize,
    pub total: usize,
    pub question: &'a Question,
    pub selection: Option<usize>,
    pub revealing: bool,
}

/// What the answer screen shows after a submit.
#[derive(Debug, Clone, Copy)]
pub struct AnswerReveal<'a> {
    pub question: &'a Question,
    pub answer: SubmittedAnswer,
}

impl<'a> AnswerReveal<'a> {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.answer.is_correct()
    }

    #[must_use]
    pub fn correct_option(&self) -> &'a str {
        self.question.correct_option()
    }

    #[must_use]
    pub fn chosen_option(&self) -> Option<&'a str> {
        self.question.option(self.answer.chosen)
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One attempt at a category's questions.
///
/// Steps through the questions in order: select, submit, acknowledge. Each
/// question is graded exactly once, on submit. Calls made outside an
/// operation's legal state are rejected with `SessionError` and leave the
/// session untouched.
pub struct QuizSession {
    category: Category,
    clock: Clock,
    current: usize,
    phase: QuestionPhase,
    answers: Vec<SubmittedAnswer>,
    score: usize,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Start a session over `category`.
    ///
    /// A category without questions yields a session that is already finished.
    #[must_use]
    pub fn new(category: Category, clock: Clock) -> Self {
        let started_at = clock.now();
        let completed_at = (!category.is_playable()).then_some(started_at);
        tracing::debug!(
            category = %category.id(),
            questions = category.question_count(),
            "quiz session started"
        );
        Self {
            category,
            clock,
            current: 0,
            phase: QuestionPhase::Answering { selection: None },
            answers: Vec::new(),
            score: 0,
            started_at,
            completed_at,
        }
    }

    #[must_use]
    pub fn category(&self) -> &Category {
        &self.category
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        if self.current < self.category.question_count() {
            SessionStatus::InProgress
        } else {
            SessionStatus::Finished
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status() == SessionStatus::Finished
    }

    #[must_use]
    pub fn phase(&self) -> QuestionPhase {
        self.phase
    }

    /// Index of the question being asked; equals the question count once finished.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn answers(&self) -> &[SubmittedAnswer] {
        &self.answers
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.category.question_count();
        SessionProgress {
            total,
            answered: self.answers.len(),
            remaining: total.saturating_sub(self.current),
            is_complete: self.is_complete(),
        }
    }

    /// The question at the current index plus the pending selection.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` once every question has been acknowledged.
    pub fn current_question(&self) -> Result<CurrentQuestion<'_>, SessionError> {
        let question = self.question_in_progress()?;
        let (selection, revealing) = match self.phase {
            QuestionPhase::Answering { selection } => (selection, false),
            QuestionPhase::Revealing => (self.answers.last().map(|a| a.chosen), true),
        };
        Ok(CurrentQuestion {
            index: self.current,
            total: self.category.question_count(),
            question,
            selection,
            revealing,
        })
    }

    /// Record a tentative choice for the current question. May be called repeatedly.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidInput` if `index` does not address an option,
    /// `SessionError::NotAnswering` after submit, or `SessionError::Finished`.
    pub fn select_option(&mut self, index: usize) -> Result<(), SessionError> {
        let question = self.question_in_progress()?;
        let option_count = question.option_count();
        if !matches!(self.phase, QuestionPhase::Answering { .. }) {
            return Err(reject(SessionError::NotAnswering));
        }
        if index >= option_count {
            return Err(reject(SessionError::InvalidInput {
                index,
                option_count,
            }));
        }
        self.phase = QuestionPhase::Answering {
            selection: Some(index),
        };
        Ok(())
    }

    /// Commit the selected option, grade it, and move to the reveal state.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoSelectionMade` if nothing is selected,
    /// `SessionError::NotAnswering` if this question was already submitted,
    /// or `SessionError::Finished`.
    pub fn submit(&mut self) -> Result<SubmittedAnswer, SessionError> {
        let correct_index = self.question_in_progress()?.correct_index();
        let chosen = match self.phase {
            QuestionPhase::Answering {
                selection: Some(chosen),
            } => chosen,
            QuestionPhase::Answering { selection: None } => {
                return Err(reject(SessionError::NoSelectionMade));
            }
            QuestionPhase::Revealing => return Err(reject(SessionError::NotAnswering)),
        };

        let answer = SubmittedAnswer {
            question_index: self.current,
            chosen,
            correct_index,
        };
        if answer.is_correct() {
            self.score += 1;
        }
        self.answers.push(answer);
        self.phase = QuestionPhase::Revealing;
        Ok(answer)
    }

    /// The graded answer for the current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotRevealing` before submit, or `SessionError::Finished`.
    pub fn reveal(&self) -> Result<AnswerReveal<'_>, SessionError> {
        let question = self.question_in_progress()?;
        match (self.phase, self.answers.last()) {
            (QuestionPhase::Revealing, Some(answer)) => Ok(AnswerReveal {
                question,
                answer: *answer,
            }),
            _ => Err(SessionError::NotRevealing),
        }
    }

    /// Leave the reveal state and advance to the next question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotRevealing` if the current answer has not been
    /// submitted, or `SessionError::Finished`.
    pub fn acknowledge(&mut self) -> Result<SessionStatus, SessionError> {
        self.question_in_progress()?;
        if self.phase != QuestionPhase::Revealing {
            return Err(reject(SessionError::NotRevealing));
        }

        self.current += 1;
        self.phase = QuestionPhase::Answering { selection: None };

        let status = self.status();
        if status == SessionStatus::Finished {
            self.completed_at = Some(self.clock.now());
            tracing::debug!(
                category = %self.category.id(),
                score = self.score,
                total = self.category.question_count(),
                "quiz session finished"
            );
        }
        Ok(status)
    }

    /// Final score once every question has been acknowledged.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFinished` while questions remain.
    pub fn result(&self) -> Result<QuizResult, SessionError> {
        let Some(completed_at) = self.completed_at.filter(|_| self.is_complete()) else {
            return Err(SessionError::NotFinished);
        };
        Ok(QuizResult {
            category_id: self.category.id(),
            score: self.score,
            total: self.category.question_count(),
            started_at: self.started_at,
            completed_at,
        })
    }

    fn question_in_progress(&self) -> Result<&Question, SessionError> {
        self.category
            .questions()
            .get(self.current)
            .ok_or(SessionError::Finished)
    }
}

fn reject(err: SessionError) -> SessionError {
    tracing::debug!(%err, "session call rejected");
    err
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("category_id", &self.category.id())
            .field("questions_len", &self.category.question_count())
            .field("current", &self.current)
            .field("phase", &self.phase)
            .field("score", &self.score)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
