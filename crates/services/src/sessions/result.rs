use std::fmt;

use chrono::{DateTime, Duration, Utc};
use quiz_core::ScoreBand;
use quiz_core::model::CategoryId;

/// Final outcome of a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    pub category_id: CategoryId,
    pub score: usize,
    pub total: usize,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl QuizResult {
    #[must_use]
    pub fn band(&self) -> ScoreBand {
        ScoreBand::classify(self.score, self.total)
    }

    /// Fraction of questions answered correctly, `None` when there were no questions.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> Option<f64> {
        (self.total > 0).then(|| self.score as f64 / self.total as f64)
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.completed_at - self.started_at
    }
}

impl fmt::Display for QuizResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You answered {} out of {} questions correctly.",
            self.score, self.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;

    fn result(score: usize, total: usize) -> QuizResult {
        QuizResult {
            category_id: CategoryId::generate(),
            score,
            total,
            started_at: fixed_now(),
            completed_at: fixed_now() + Duration::seconds(90),
        }
    }

    #[test]
    fn summary_line_matches_results_screen() {
        assert_eq!(
            result(3, 4).to_string(),
            "You answered 3 out of 4 questions correctly."
        );
    }

    #[test]
    fn percentage_is_none_without_questions() {
        assert_eq!(result(0, 0).percentage(), None);
        assert_eq!(result(0, 0).band(), ScoreBand::NoQuestions);
        assert_eq!(result(1, 4).percentage(), Some(0.25));
    }

    #[test]
    fn band_and_duration() {
        let r = result(9, 10);
        assert_eq!(r.band(), ScoreBand::AlmostThere);
        assert_eq!(r.duration(), Duration::seconds(90));
    }
}
