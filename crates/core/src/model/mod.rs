mod category;
mod ids;
mod question;
mod source;

pub use category::Category;
pub use ids::{CategoryId, ParseIdError};
pub use question::{Question, QuestionError};
pub use source::{SourceUrl, SourceUrlError, DEFAULT_SOURCE_URL};
