use std::sync::Arc;

use quiz_core::model::SourceUrl;
use storage::repository::KeyValueStore;

use crate::error::SourceSettingsError;

/// Key under which the last successfully loaded source URL is stored.
pub const LAST_SOURCE_KEY: &str = "quiz_data_url";

/// Reads and records the "last known good" content source.
#[derive(Clone)]
pub struct SourceSettingsService {
    store: Arc<dyn KeyValueStore>,
}

impl SourceSettingsService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the stored source, or the built-in default if nothing usable is stored.
    ///
    /// A stored value that no longer parses is ignored.
    ///
    /// # Errors
    ///
    /// Returns `SourceSettingsError` on storage failures.
    pub async fn last_known_source(&self) -> Result<SourceUrl, SourceSettingsError> {
        let stored = self.store.get(LAST_SOURCE_KEY).await?;
        let source = stored
            .as_deref()
            .and_then(|raw| match SourceUrl::parse(raw) {
                Ok(source) => Some(source),
                Err(err) => {
                    tracing::warn!(%err, "ignoring stored content source");
                    None
                }
            })
            .unwrap_or_else(SourceUrl::default_source);
        Ok(source)
    }

    /// Record `source` as the default for future loads.
    ///
    /// # Errors
    ///
    /// Returns `SourceSettingsError` if persistence fails.
    pub async fn remember(&self, source: &SourceUrl) -> Result<(), SourceSettingsError> {
        self.store.set(LAST_SOURCE_KEY, source.as_str()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::DEFAULT_SOURCE_URL;
    use storage::repository::InMemoryRepository;

    #[tokio::test]
    async fn falls_back_to_default_source() {
        let service = SourceSettingsService::new(Arc::new(InMemoryRepository::new()));
        let source = service.last_known_source().await.unwrap();
        assert_eq!(source.as_str(), DEFAULT_SOURCE_URL);
    }

    #[tokio::test]
    async fn remembered_source_is_returned() {
        let repo = InMemoryRepository::new();
        let service = SourceSettingsService::new(Arc::new(repo.clone()));
        let source = SourceUrl::parse("https://example.com/quiz.json").unwrap();

        service.remember(&source).await.unwrap();

        assert_eq!(service.last_known_source().await.unwrap(), source);
        assert_eq!(
            repo.get(LAST_SOURCE_KEY).await.unwrap().as_deref(),
            Some("https://example.com/quiz.json")
        );
    }

    #[tokio::test]
    async fn unparseable_stored_value_falls_back() {
        let repo = InMemoryRepository::new();
        repo.set(LAST_SOURCE_KEY, "::nope::").await.unwrap();
        let service = SourceSettingsService::new(Arc::new(repo));

        let source = service.last_known_source().await.unwrap();
        assert_eq!(source.as_str(), DEFAULT_SOURCE_URL);
    }
}
