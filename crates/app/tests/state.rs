//! Composition root tests: building [`AppState`] from configuration and
//! restoring the persisted profile snapshot across restarts.

use juahustle_app::config::{AppConfig, DataSourceKind, LatencyMode};
use juahustle_app::state::AppState;
use juahustle_app::views::{auth, ViewScope};
use juahustle_core::roles::Role;
use juahustle_db::models::job::JobFilter;
use juahustle_db::DataSource;

fn config(dir: &std::path::Path) -> AppConfig {
    AppConfig {
        data_source: DataSourceKind::Memory,
        storage_dir: dir.to_path_buf(),
        latency: LatencyMode::None,
        ..AppConfig::default()
    }
}

#[tokio::test]
async fn fresh_state_has_seeded_registry_and_no_session() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::build(config(dir.path())).await.unwrap();

    let snapshot = state.notifications.snapshot();
    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot.unread_count(), 2);
    assert!(state.session.current().await.is_none());
    assert_eq!(
        state.data_source.fetch_jobs(&JobFilter::default()).await.unwrap().len(),
        3
    );
}

#[tokio::test]
async fn session_survives_restart_but_notifications_reset() {
    let dir = tempfile::tempdir().unwrap();

    let first = AppState::build(config(dir.path())).await.unwrap();
    let signed_in = auth::login(&first, &ViewScope::new(), "client@example.com", "pw")
        .await
        .into_value()
        .unwrap();
    assert_eq!(signed_in.user.role, Role::Client);
    first.notifications.clear_all();
    drop(first);

    let second = AppState::build(config(dir.path())).await.unwrap();
    assert_eq!(second.session.current().await, Some(signed_in.user));
    assert_eq!(second.notifications.snapshot().len(), 3);
}

#[tokio::test]
async fn http_source_builds_without_contacting_backend() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        data_source: DataSourceKind::Http,
        api_url: "http://127.0.0.1:9/api/v1".into(),
        ..config(dir.path())
    };
    assert!(AppState::build(config).await.is_ok());
}
