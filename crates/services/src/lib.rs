#![forbid(unsafe_code)]

pub mod app_services;
pub mod connectivity;
pub mod content_loader;
pub mod error;
pub mod library;
pub mod sessions;
pub mod source_settings_service;

pub use quiz_core::Clock;
pub use sessions as session;

pub use app_services::QuizServices;
pub use connectivity::{AssumeReachable, ConnectivityProbe, TcpProbe};
pub use content_loader::{ContentLoader, LoadTask, decode_categories};
pub use error::{LoadError, QuizServicesError, SessionError, SourceSettingsError};
pub use library::QuizLibrary;
pub use sessions::{QuizResult, QuizSession, SessionProgress, SessionStatus};
pub use source_settings_service::{LAST_SOURCE_KEY, SourceSettingsService};
