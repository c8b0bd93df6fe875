//! Shared fixtures for the view integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::Utc;
use juahustle_app::config::{AppConfig, LatencyMode};
use juahustle_app::session::{MemoryProfileStore, SessionProvider, SessionUser, UserProfile};
use juahustle_app::state::AppState;
use juahustle_core::roles::Role;
use juahustle_db::{InMemoryDataSource, LatencyProfile};
use juahustle_events::seed::seed_notifications;
use juahustle_events::NotificationRegistry;

/// Root scope wired to in-process collaborators, plus handles to poke them.
pub struct TestApp {
    pub state: AppState,
    pub source: Arc<InMemoryDataSource>,
    pub store: Arc<MemoryProfileStore>,
}

impl TestApp {
    /// Seeded data source without latency and a seeded registry.
    pub fn new() -> Self {
        Self::with_latency(LatencyProfile::none())
    }

    pub fn with_latency(latency: LatencyProfile) -> Self {
        let source = Arc::new(InMemoryDataSource::new(latency));
        let store = Arc::new(MemoryProfileStore::new());
        let session = Arc::new(SessionProvider::new(store.clone()));
        let notifications = Arc::new(NotificationRegistry::from_notifications(
            seed_notifications(Utc::now()),
        ));
        let config = AppConfig {
            latency: LatencyMode::None,
            ..AppConfig::default()
        };

        let state = AppState::from_parts(config, source.clone(), notifications, session);
        Self {
            state,
            source,
            store,
        }
    }

    pub fn revision(&self) -> u64 {
        self.state.notifications.snapshot().revision()
    }
}

pub fn hustler() -> SessionUser {
    SessionUser {
        id: "hustler7".into(),
        name: "Brian Ouma".into(),
        email: "brian@example.com".into(),
        phone: "+254700000007".into(),
        role: Role::Hustler,
        profile: Some(UserProfile {
            bio: Some("Handy with tools".into()),
            skills: Some(vec!["Plumbing".into()]),
            rating: Some(4.2),
            completed_jobs: Some(9),
            ..Default::default()
        }),
    }
}

/// Owner of seed job "1".
pub fn owning_client() -> SessionUser {
    SessionUser {
        id: "client1".into(),
        name: "Sarah Kimani".into(),
        email: "client@example.com".into(),
        phone: "+254712345678".into(),
        role: Role::Client,
        profile: None,
    }
}
