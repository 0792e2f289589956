use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("answer ordinal {raw:?} is not an integer")]
    NonNumericAnswer { raw: String },

    #[error("answer ordinal {ordinal} is outside 1..={option_count}")]
    AnswerOutOfRange { ordinal: i64, option_count: usize },

    #[error("correct index {index} is outside the {option_count} available options")]
    CorrectIndexOutOfRange { index: usize, option_count: usize },
}

/// One multiple-choice prompt. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionRecord")]
pub struct Question {
    text: String,
    options: Vec<String>,
    correct_index: usize,
}

/// Unchecked field layout; deserialization goes through `Question::new`.
#[derive(Deserialize)]
struct QuestionRecord {
    text: String,
    options: Vec<String>,
    correct_index: usize,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = QuestionError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        Self::new(record.text, record.options, record.correct_index)
    }
}

impl Question {
    /// Build a question from a 0-based correct index.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::CorrectIndexOutOfRange` if the index does not address an option.
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
    ) -> Result<Self, QuestionError> {
        if correct_index >= options.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: correct_index,
                option_count: options.len(),
            });
        }
        Ok(Self {
            text: text.into(),
            options,
            correct_index,
        })
    }

    /// Build a question from the 1-based ordinal string used by the content feed.
    ///
    /// The ordinal is parsed strictly: surrounding whitespace or a sign-less
    /// decimal with a fraction is rejected.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::NonNumericAnswer` or `QuestionError::AnswerOutOfRange`.
    pub fn from_ordinal(
        text: impl Into<String>,
        options: Vec<String>,
        ordinal: &str,
    ) -> Result<Self, QuestionError> {
        let parsed: i64 = ordinal.parse().map_err(|_| QuestionError::NonNumericAnswer {
            raw: ordinal.to_string(),
        })?;
        let option_count = options.len();
        let in_range = usize::try_from(parsed)
            .ok()
            .filter(|ordinal| (1..=option_count).contains(ordinal));
        let Some(ordinal) = in_range else {
            return Err(QuestionError::AnswerOutOfRange {
                ordinal: parsed,
                option_count,
            });
        };
        Self::new(text, options, ordinal - 1)
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// The option text that counts as correct.
    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }
}
