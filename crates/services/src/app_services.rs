use std::sync::Arc;

use chrono::Duration;
use mathgen_core::model::AiSettings;
use storage::{ExpiringStore, Storage};

use crate::Clock;
use crate::ai::{ChatCompletionsGenerator, TextGenerator};
use crate::error::AppServicesError;
use crate::practice_service::PracticeService;
use crate::problem_client::ProblemClient;
use crate::progress_service::ProgressService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    generation_enabled: bool,
    practice: Arc<PracticeService>,
    progress: Arc<ProgressService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the configured HTTP generator.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage or the HTTP client cannot be initialized.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        expiry: Duration,
        settings: &AiSettings,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::with_storage(&storage, clock, expiry, settings).await
    }

    /// Build services over an existing storage with the configured HTTP generator.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the HTTP client cannot be initialized.
    pub async fn with_storage(
        storage: &Storage,
        clock: Clock,
        expiry: Duration,
        settings: &AiSettings,
    ) -> Result<Self, AppServicesError> {
        let generator: Arc<dyn TextGenerator> =
            Arc::new(ChatCompletionsGenerator::new(settings.clone())?);
        let services = Self::with_generator(storage, clock, expiry, settings, generator).await;
        Ok(Self {
            generation_enabled: settings.is_enabled(),
            ..services
        })
    }

    /// Build services with an explicit generator and load persisted progress.
    pub async fn with_generator(
        storage: &Storage,
        clock: Clock,
        expiry: Duration,
        settings: &AiSettings,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        let store = ExpiringStore::new(Arc::clone(&storage.kv), clock, expiry);
        let progress = Arc::new(ProgressService::new(clock, store));
        let loaded = progress.load().await;
        tracing::info!(
            history = loaded.history.len(),
            attempts = loaded.scores.total(),
            "loaded saved progress"
        );

        let problems = Arc::new(ProblemClient::new(generator, settings));
        let practice = Arc::new(PracticeService::new(problems, Arc::clone(&progress)));

        Self {
            generation_enabled: true,
            practice,
            progress,
        }
    }

    /// False when no API key is configured and every generation call will fail.
    #[must_use]
    pub fn generation_enabled(&self) -> bool {
        self.generation_enabled
    }

    #[must_use]
    pub fn practice(&self) -> Arc<PracticeService> {
        Arc::clone(&self.practice)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }
}
