mod progress;
mod result;
mod service;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::SessionProgress;
pub use result::QuizResult;
pub use service::{
    AnswerReveal, CurrentQuestion, QuestionPhase, QuizSession, SessionStatus, SubmittedAnswer,
};
