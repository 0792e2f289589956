//! Qualitative grading of a finished attempt.
//!
//! Bands use closed-lower/open-upper percentage intervals and the highest
//! threshold wins. Thresholds are compared with integer cross multiplication
//! so `9/10` lands exactly on `0.9`.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreBand {
    /// Every question answered correctly.
    Perfect,
    /// `[0.9, 1.0)`
    AlmostThere,
    /// `[0.7, 0.9)`
    GoodEffort,
    /// `[0.5, 0.7)`
    Nice,
    /// Below `0.5`.
    NeedsImprovement,
    /// The attempt had no questions, so there is no percentage to grade.
    NoQuestions,
}

/// Coarse colour family for rendering a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTone {
    Success,
    Info,
    Caution,
    Alert,
    Neutral,
}

impl ScoreBand {
    /// Classify `score` out of `total`.
    ///
    /// `total == 0` yields `NoQuestions` instead of dividing by zero. A score
    /// above the total is clamped to `Perfect`.
    #[must_use]
    pub fn classify(score: usize, total: usize) -> Self {
        if total == 0 {
            return Self::NoQuestions;
        }
        let score = score.min(total);
        let at_least = |tenths: usize| score.saturating_mul(10) >= total.saturating_mul(tenths);

        if score == total {
            Self::Perfect
        } else if at_least(9) {
            Self::AlmostThere
        } else if at_least(7) {
            Self::GoodEffort
        } else if at_least(5) {
            Self::Nice
        } else {
            Self::NeedsImprovement
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Perfect => "Perfect",
            Self::AlmostThere => "Almost there",
            Self::GoodEffort => "Good effort",
            Self::Nice => "Nice",
            Self::NeedsImprovement => "Needs improvement",
            Self::NoQuestions => "No questions",
        }
    }

    /// Longer line shown above the score on the results screen.
    #[must_use]
    pub fn headline(self) -> &'static str {
        match self {
            Self::Perfect => "Perfect Score! WOW!",
            Self::AlmostThere => "Almost there! Just missed a few.",
            Self::GoodEffort => "Good effort",
            Self::Nice => "Nice",
            Self::NeedsImprovement => "Brush up on your skills!",
            Self::NoQuestions => "This quiz has no questions.",
        }
    }

    #[must_use]
    pub fn tone(self) -> ScoreTone {
        match self {
            Self::Perfect => ScoreTone::Success,
            Self::AlmostThere | Self::GoodEffort => ScoreTone::Info,
            Self::Nice => ScoreTone::Caution,
            Self::NeedsImprovement => ScoreTone::Alert,
            Self::NoQuestions => ScoreTone::Neutral,
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
