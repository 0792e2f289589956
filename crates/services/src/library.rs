use quiz_core::model::{Category, CategoryId};

use crate::content_loader::{ContentLoader, LoadTask};
use crate::error::LoadError;

/// The category list currently shown to the user, plus at most one in-flight refresh.
///
/// Starting a refresh aborts the previous one, so a slow earlier load can
/// never overwrite the result of a later one. The list is only replaced by
/// `finish_refresh`, and a failed load leaves the previous list in place.
pub struct QuizLibrary {
    loader: ContentLoader,
    categories: Vec<Category>,
    pending: Option<LoadTask>,
    last_error: Option<LoadError>,
}

impl QuizLibrary {
    #[must_use]
    pub fn new(loader: ContentLoader) -> Self {
        Self {
            loader,
            categories: Vec::new(),
            pending: None,
            last_error: None,
        }
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn find(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id() == id)
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&LoadError> {
        self.last_error.as_ref()
    }

    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.pending.is_some()
    }

    /// Start loading from `source`, cancelling any refresh still in flight.
    pub fn begin_refresh(&mut self, source: impl Into<String>) {
        let task = self.loader.spawn_load(source);
        self.replace_pending(task);
    }

    /// Start loading from the last known good source.
    pub fn begin_refresh_last_known(&mut self) {
        let task = self.loader.spawn_load_last_known();
        self.replace_pending(task);
    }

    /// Wait for the in-flight refresh and publish its categories.
    ///
    /// Without a pending refresh this returns the current list unchanged.
    ///
    /// # Errors
    ///
    /// Returns the refresh's `LoadError`; the previous categories are kept.
    pub async fn finish_refresh(&mut self) -> Result<&[Category], LoadError> {
        let Some(task) = self.pending.take() else {
            return Ok(&self.categories);
        };
        match task.join().await {
            Ok(categories) => {
                self.categories = categories;
                self.last_error = None;
                Ok(&self.categories)
            }
            Err(err) => {
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Load from `source` and publish the result.
    ///
    /// # Errors
    ///
    /// See [`QuizLibrary::finish_refresh`].
    pub async fn refresh(&mut self, source: impl Into<String>) -> Result<&[Category], LoadError> {
        self.begin_refresh(source);
        self.finish_refresh().await
    }

    fn replace_pending(&mut self, task: LoadTask) {
        if let Some(previous) = self.pending.replace(task) {
            if !previous.is_finished() {
                tracing::debug!("superseding in-flight content load");
            }
            previous.abort();
        }
    }
}
