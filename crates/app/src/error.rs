use juahustle_core::error::CoreError;
use juahustle_db::DataSourceError;

use crate::config::ConfigError;
use crate::notice::Notice;
use crate::session::SessionError;

/// Application-level error type for views and the composition root.
///
/// Wraps [`CoreError`] for domain errors and the per-layer error types.
/// Every variant converts into a user-visible [`Notice`] via
/// [`AppError::to_notice`]; none of them is fatal to the registry.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `juahustle_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A data source call failed.
    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    /// The session provider or its profile store failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Convenience type alias for view return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Convert into a destructive notice.
    ///
    /// Validation and authorization messages are shown verbatim (inline
    /// feedback); everything else shows `failure` (e.g. "Failed to load job
    /// details") so backend details never leak to the user.
    pub fn to_notice(&self, failure: &str) -> Notice {
        match self {
            AppError::Core(core) | AppError::Session(SessionError::Core(core)) => {
                Self::core_notice(core, failure)
            }
            AppError::DataSource(err) => {
                if err.is_not_found() {
                    tracing::warn!(error = %err, "Data source lookup missed");
                } else {
                    tracing::error!(error = %err, "Data source call failed");
                }
                Notice::error(failure)
            }
            AppError::Session(err) => {
                tracing::error!(error = %err, "Session store failure");
                Notice::error(failure)
            }
            AppError::Config(err) => {
                tracing::error!(error = %err, "Configuration error");
                Notice::error(failure)
            }
        }
    }

    fn core_notice(core: &CoreError, failure: &str) -> Notice {
        match core {
            CoreError::Validation(msg) => Notice::error(msg.clone()),
            CoreError::Unauthorized(_) => Notice::error("Please sign in to continue."),
            CoreError::Forbidden(msg) => Notice::error(msg.clone()),
            CoreError::Conflict(msg) => Notice::error(msg.clone()),
            CoreError::NotFound { entity, id } => {
                tracing::warn!(entity, id = %id, "Lookup missed");
                Notice::error(failure)
            }
            CoreError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal core error");
                Notice::error(failure)
            }
        }
    }
}
