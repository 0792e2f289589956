use std::sync::Arc;

use quiz_core::model::Category;
use storage::repository::Storage;

use crate::Clock;
use crate::connectivity::{AssumeReachable, ConnectivityProbe};
use crate::content_loader::ContentLoader;
use crate::error::QuizServicesError;
use crate::library::QuizLibrary;
use crate::sessions::QuizSession;
use crate::source_settings_service::SourceSettingsService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct QuizServices {
    clock: Clock,
    source_settings: SourceSettingsService,
    loader: ContentLoader,
}

impl QuizServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `QuizServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        probe: Arc<dyn ConnectivityProbe>,
    ) -> Result<Self, QuizServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock, probe))
    }

    /// Build services over volatile in-memory storage.
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::from_storage(&Storage::in_memory(), clock, Arc::new(AssumeReachable))
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock, probe: Arc<dyn ConnectivityProbe>) -> Self {
        let source_settings = SourceSettingsService::new(Arc::clone(&storage.settings));
        let loader = ContentLoader::new(source_settings.clone()).with_probe(probe);
        Self {
            clock,
            source_settings,
            loader,
        }
    }

    /// Swap the HTTP client used for content loads.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.loader = self.loader.with_client(client);
        self
    }

    #[must_use]
    pub fn loader(&self) -> &ContentLoader {
        &self.loader
    }

    #[must_use]
    pub fn source_settings(&self) -> &SourceSettingsService {
        &self.source_settings
    }

    #[must_use]
    pub fn library(&self) -> QuizLibrary {
        QuizLibrary::new(self.loader.clone())
    }

    #[must_use]
    pub fn start_session(&self, category: &Category) -> QuizSession {
        QuizSession::new(category.clone(), self.clock)
    }
}
