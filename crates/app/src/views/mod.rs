//! View controllers.
//!
//! Each controller translates one user intent into a single data source call
//! followed, on success, by at most one registry `add` and a [`Notice`].
//! Failures become a destructive notice and never touch the registry.
//!
//! Every controller runs inside a [`ViewScope`]. If the scope is unmounted
//! while the call is in flight, the result is dropped on resolution and the
//! controller returns [`ViewOutcome::Detached`] without mutating anything.

pub mod admin;
pub mod apply;
pub mod auth;
pub mod client_dashboard;
pub mod hustler_dashboard;
pub mod job_detail;
pub mod jobs;
pub mod notification_panel;
pub mod profile;

use tokio_util::sync::CancellationToken;

use crate::error::AppResult;
use crate::notice::Notice;

// ---------------------------------------------------------------------------
// ViewScope
// ---------------------------------------------------------------------------

/// Lifetime guard of a mounted view.
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope that unmounts together with `self` (e.g. a dialog inside a
    /// page) but can also be unmounted on its own.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    /// Tear the view down. In-flight calls finish but their results are
    /// discarded.
    pub fn unmount(&self) {
        self.token.cancel();
    }

    pub fn is_mounted(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Resolves once the view is unmounted.
    pub async fn unmounted(&self) {
        self.token.cancelled().await;
    }
}

// ---------------------------------------------------------------------------
// ViewOutcome
// ---------------------------------------------------------------------------

/// Result of a view action.
#[derive(Debug)]
pub enum ViewOutcome<T> {
    /// The call succeeded and its effects were applied.
    Done { value: T, notice: Option<Notice> },
    /// The call failed; show the notice. No state was changed.
    Failed(Notice),
    /// The view unmounted before the call resolved; nothing was applied.
    Detached,
}

impl<T> ViewOutcome<T> {
    pub fn done(value: T) -> Self {
        Self::Done {
            value,
            notice: None,
        }
    }

    pub fn done_with(value: T, notice: Notice) -> Self {
        Self::Done {
            value,
            notice: Some(notice),
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done { .. })
    }

    pub fn is_detached(&self) -> bool {
        matches!(self, Self::Detached)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Done { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Done { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Self::Done { notice, .. } => notice.as_ref(),
            Self::Failed(notice) => Some(notice),
            Self::Detached => None,
        }
    }
}

/// Settle a resolved call against `scope`.
///
/// Unmounted scopes yield [`ViewOutcome::Detached`] regardless of the
/// result and `apply` is not run. Errors become a destructive notice built
/// from `failure`.
pub(crate) fn settle<T, U>(
    scope: &ViewScope,
    result: AppResult<T>,
    failure: &str,
    apply: impl FnOnce(T) -> ViewOutcome<U>,
) -> ViewOutcome<U> {
    if !scope.is_mounted() {
        tracing::debug!("View unmounted before call resolved; dropping result");
        return ViewOutcome::Detached;
    }
    match result {
        Ok(value) => apply(value),
        Err(err) => ViewOutcome::Failed(err.to_notice(failure)),
    }
}

#[cfg(test)]
mod tests {
    use juahustle_core::error::CoreError;

    use super::*;
    use crate::error::AppError;

    #[test]
    fn settle_applies_on_success() {
        let scope = ViewScope::new();
        let outcome = settle(&scope, Ok(2), "x", |v| ViewOutcome::done(v * 10));
        assert_eq!(outcome.into_value(), Some(20));
    }

    #[test]
    fn settle_maps_error_to_notice() {
        let scope = ViewScope::new();
        let result: AppResult<i32> = Err(AppError::Core(CoreError::Internal("db".into())));
        let outcome = settle(&scope, result, "Failed to load", ViewOutcome::done);
        assert_eq!(outcome.notice().map(|n| n.description.as_str()), Some("Failed to load"));
    }

    #[test]
    fn settle_skips_apply_when_unmounted() {
        let scope = ViewScope::new();
        scope.unmount();
        let mut applied = false;
        let outcome: ViewOutcome<()> = settle(&scope, Ok(()), "x", |_| {
            applied = true;
            ViewOutcome::done(())
        });
        assert!(outcome.is_detached());
        assert!(!applied);
    }

    #[test]
    fn child_scope_unmounts_with_parent() {
        let parent = ViewScope::new();
        let child = parent.child();
        child.unmount();
        assert!(parent.is_mounted());

        let child = parent.child();
        parent.unmount();
        assert!(!child.is_mounted());
    }
}
