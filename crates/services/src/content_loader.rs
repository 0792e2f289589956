use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::task::JoinHandle;

use quiz_core::model::{Category, Question, SourceUrl};

use crate::connectivity::{AssumeReachable, ConnectivityProbe};
use crate::error::LoadError;
use crate::source_settings_service::SourceSettingsService;

/// Fetches quiz content from a remote JSON feed and validates it into
/// `Category` values.
///
/// Every load performs a fresh transfer. There is no caching and no retry;
/// callers re-invoke `load` to retry.
#[derive(Clone)]
pub struct ContentLoader {
    client: Client,
    probe: Arc<dyn ConnectivityProbe>,
    settings: SourceSettingsService,
}

impl ContentLoader {
    #[must_use]
    pub fn new(settings: SourceSettingsService) -> Self {
        Self {
            client: Client::new(),
            probe: Arc::new(AssumeReachable),
            settings,
        }
    }

    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    #[must_use]
    pub fn with_probe(mut self, probe: Arc<dyn ConnectivityProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// Fetch and decode the categories published at `source`.
    ///
    /// On success `source` becomes the last known good source.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::InvalidSource` for a malformed URL,
    /// `LoadError::NoConnectivity` if the probe fails (no transfer is attempted),
    /// `LoadError::TransferFailed` / `LoadError::UnexpectedStatus` for transport failures,
    /// and `LoadError::DecodeFailed` if any part of the payload is malformed.
    pub async fn load(&self, source: &str) -> Result<Vec<Category>, LoadError> {
        let source = SourceUrl::parse(source)?;
        self.load_source(&source).await
    }

    /// Load from the last known good source, or the default feed.
    ///
    /// # Errors
    ///
    /// See [`ContentLoader::load`].
    pub async fn load_last_known(&self) -> Result<Vec<Category>, LoadError> {
        let source = match self.settings.last_known_source().await {
            Ok(source) => source,
            Err(err) => {
                tracing::warn!(%err, "could not read stored source; using default");
                SourceUrl::default_source()
            }
        };
        self.load_source(&source).await
    }

    /// Run [`ContentLoader::load`] on a background task.
    #[must_use]
    pub fn spawn_load(&self, source: impl Into<String>) -> LoadTask {
        let loader = self.clone();
        let source = source.into();
        LoadTask {
            handle: tokio::spawn(async move { loader.load(&source).await }),
        }
    }

    /// Run [`ContentLoader::load_last_known`] on a background task.
    #[must_use]
    pub fn spawn_load_last_known(&self) -> LoadTask {
        let loader = self.clone();
        LoadTask {
            handle: tokio::spawn(async move { loader.load_last_known().await }),
        }
    }

    async fn load_source(&self, source: &SourceUrl) -> Result<Vec<Category>, LoadError> {
        if !self.probe.is_reachable(source.as_url()).await {
            tracing::warn!(%source, "content source unreachable");
            return Err(LoadError::NoConnectivity);
        }

        tracing::info!(%source, "fetching quiz content");
        let response = self
            .client
            .get(source.as_url().clone())
            .send()
            .await
            .map_err(|err| LoadError::TransferFailed(err.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(%source, %status, "content request rejected");
            return Err(LoadError::UnexpectedStatus(status));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| LoadError::TransferFailed(err.to_string()))?;

        let categories = decode_categories(&body).inspect_err(|err| {
            tracing::warn!(%source, %err, "content payload rejected");
        })?;

        if let Err(err) = self.settings.remember(source).await {
            tracing::warn!(%source, %err, "failed to record last known source");
        }

        tracing::info!(%source, categories = categories.len(), "quiz content loaded");
        Ok(categories)
    }
}

/// Decode and validate a content payload.
///
/// All-or-nothing: one malformed question rejects the whole payload.
///
/// # Errors
///
/// Returns `LoadError::DecodeFailed` if the JSON does not match the feed shape
/// or any answer ordinal is non-numeric or out of range.
pub fn decode_categories(body: &[u8]) -> Result<Vec<Category>, LoadError> {
    let raw: Vec<RawCategory> =
        serde_json::from_slice(body).map_err(|err| LoadError::DecodeFailed(err.to_string()))?;
    raw.into_iter().map(RawCategory::into_category).collect()
}

/// Handle to an in-flight load. Completes exactly once.
#[derive(Debug)]
pub struct LoadTask {
    handle: JoinHandle<Result<Vec<Category>, LoadError>>,
}

impl LoadTask {
    /// Cancel the transfer. A later `join` yields `LoadError::Cancelled`.
    pub fn abort(&self) {
        self.handle.abort();
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the load to complete.
    ///
    /// # Errors
    ///
    /// Returns the load's own `LoadError`, or `LoadError::Cancelled` if aborted.
    pub async fn join(self) -> Result<Vec<Category>, LoadError> {
        match self.handle.await {
            Ok(result) => result,
            Err(err) if err.is_cancelled() => Err(LoadError::Cancelled),
            Err(err) => Err(LoadError::TransferFailed(format!("load task failed: {err}"))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    title: String,
    #[serde(alias = "description")]
    desc: String,
    questions: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    text: String,
    answer: String,
    answers: Vec<String>,
}

impl RawCategory {
    fn into_category(self) -> Result<Category, LoadError> {
        let title = self.title;
        let questions = self
            .questions
            .into_iter()
            .enumerate()
            .map(|(position, raw)| {
                Question::from_ordinal(raw.text, raw.answers, &raw.answer).map_err(|err| {
                    LoadError::DecodeFailed(format!(
                        "category {title:?}, question {}: {err}",
                        position + 1
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Category::new(title, self.desc, questions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "title": "Science!",
            "desc": "Because SCIENCE!",
            "questions": [
                {
                    "text": "What is fire?",
                    "answer": "1",
                    "answers": [
                        "One of the four classical elements",
                        "A magical reaction given to us by God",
                        "A band that hasn't yet been discovered",
                        "Fire! Fire! Fire! heh-heh"
                    ]
                }
            ]
        },
        {
            "title": "Mathematics",
            "description": "Did you pass the third grade?",
            "questions": [
                { "text": "What is 2+2?", "answer": "1", "answers": ["4", "22", "An irrational number", "Nobody knows"] },
                { "text": "What is 3*3?", "answer": "3", "answers": ["6", "33", "9"] }
            ]
        }
    ]"#;

    #[test]
    fn decodes_feed_in_order_with_zero_based_indices() {
        let categories = decode_categories(SAMPLE.as_bytes()).unwrap();
        assert_eq!(categories.len(), 2);

        assert_eq!(categories[0].title(), "Science!");
        assert_eq!(categories[0].description(), "Because SCIENCE!");
        assert_eq!(categories[0].questions()[0].correct_index(), 0);

        let maths = &categories[1];
        assert_eq!(maths.description(), "Did you pass the third grade?");
        assert_eq!(maths.questions()[1].correct_index(), 2);
        assert_eq!(maths.questions()[1].correct_option(), "9");
    }

    #[test]
    fn each_decode_generates_fresh_ids() {
        let first = decode_categories(SAMPLE.as_bytes()).unwrap();
        let second = decode_categories(SAMPLE.as_bytes()).unwrap();
        assert_ne!(first[0].id(), second[0].id());
        assert_ne!(first[0].id(), first[1].id());
    }

    #[test]
    fn out_of_range_answer_rejects_whole_payload() {
        let body = r#"[
            { "title": "Ok", "desc": "", "questions": [
                { "text": "Q", "answer": "1", "answers": ["a", "b"] } ] },
            { "title": "Broken", "desc": "", "questions": [
                { "text": "Q1", "answer": "2", "answers": ["a", "b"] },
                { "text": "Q2", "answer": "3", "answers": ["a", "b"] } ] }
        ]"#;
        let err = decode_categories(body.as_bytes()).unwrap_err();
        let LoadError::DecodeFailed(detail) = &err else {
            panic!("expected DecodeFailed, got {err:?}");
        };
        assert!(detail.contains("\"Broken\""), "{detail}");
        assert!(detail.contains("question 2"), "{detail}");
    }

    #[test]
    fn non_numeric_answer_is_a_decode_failure() {
        let body = r#"[{ "title": "T", "desc": "", "questions": [
            { "text": "Q", "answer": "first", "answers": ["a"] } ] }]"#;
        assert!(matches!(
            decode_categories(body.as_bytes()),
            Err(LoadError::DecodeFailed(_))
        ));
    }

    #[test]
    fn wrong_shape_is_a_decode_failure() {
        for body in [
            "",
            "{}",
            r#"[{ "title": "T", "questions": [] }]"#,
            r#"[{ "title": "T", "desc": "", "questions": [{ "text": "Q", "answer": 1, "answers": ["a"] }] }]"#,
        ] {
            let err = decode_categories(body.as_bytes()).unwrap_err();
            assert!(matches!(err, LoadError::DecodeFailed(_)), "{body}: {err:?}");
            assert!(!err.is_retryable());
        }
    }

    #[test]
    fn empty_categories_are_accepted() {
        let body = r#"[{ "title": "Empty", "desc": "nothing yet", "questions": [] }]"#;
        let categories = decode_categories(body.as_bytes()).unwrap();
        assert_eq!(categories.len(), 1);
        assert!(!categories[0].is_playable());
    }

    #[test]
    fn empty_array_decodes_to_no_categories() {
        assert!(decode_categories(b"[]").unwrap().is_empty());
    }
}
