use std::hash::{Hash, Hasher};

use crate::model::{CategoryId, Question};

/// A named, described group of questions.
///
/// Identity is the generated id: two categories with the same title from
/// different loads are distinct.
#[derive(Debug, Clone)]
pub struct Category {
    id: CategoryId,
    title: String,
    description: String,
    questions: Vec<Question>,
}

impl Category {
    /// Materialize a category with a freshly generated id.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        questions: Vec<Question>,
    ) -> Self {
        Self::with_id(CategoryId::generate(), title, description, questions)
    }

    #[must_use]
    pub fn with_id(
        id: CategoryId,
        title: impl Into<String>,
        description: impl Into<String>,
        questions: Vec<Question>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            questions,
        }
    }

    #[must_use]
    pub fn id(&self) -> CategoryId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// An empty category loads fine but finishes immediately when played.
    #[must_use]
    pub fn is_playable(&self) -> bool {
        !self.questions.is_empty()
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
