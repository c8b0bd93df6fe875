use std::sync::Arc;

use juahustle_db::{DataSource, HttpDataSource, InMemoryDataSource, LatencyProfile};
use juahustle_events::NotificationRegistry;

use crate::config::{AppConfig, DataSourceKind, LatencyMode};
use crate::error::AppResult;
use crate::session::{FileProfileStore, ProfileStore, SessionProvider};

/// Root scope shared by every view.
///
/// This is cheaply cloneable (inner data is behind `Arc`). It is built once
/// by the composition root and passed explicitly; nothing here is a global.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Marketplace backend (stub or HTTP).
    pub data_source: Arc<dyn DataSource>,
    /// In-app notification registry, seeded per process start.
    pub notifications: Arc<NotificationRegistry>,
    /// Identity boundary and persisted profile snapshot.
    pub session: Arc<SessionProvider>,
}

impl AppState {
    /// Assemble the root scope from configuration.
    ///
    /// Restores any stored profile snapshot before returning.
    pub async fn build(config: AppConfig) -> AppResult<Self> {
        let data_source: Arc<dyn DataSource> = match config.data_source {
            DataSourceKind::Memory => {
                let latency = match config.latency {
                    LatencyMode::Simulated => LatencyProfile::simulated(),
                    LatencyMode::None => LatencyProfile::none(),
                };
                Arc::new(InMemoryDataSource::new(latency))
            }
            DataSourceKind::Http => Arc::new(HttpDataSource::new(
                config.api_url.clone(),
                config.request_timeout(),
            )?),
        };
        tracing::info!(kind = ?config.data_source, "Data source ready");

        let store: Arc<dyn ProfileStore> = Arc::new(FileProfileStore::new(&config.storage_dir));
        let session = SessionProvider::new(store);
        session.restore().await;

        Ok(Self::from_parts(
            config,
            data_source,
            Arc::new(NotificationRegistry::with_seed()),
            Arc::new(session),
        ))
    }

    /// Assemble from explicit collaborators (tests, embedding).
    pub fn from_parts(
        config: AppConfig,
        data_source: Arc<dyn DataSource>,
        notifications: Arc<NotificationRegistry>,
        session: Arc<SessionProvider>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            data_source,
            notifications,
            session,
        }
    }
}
