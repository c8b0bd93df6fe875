//! Sign-in, sign-up and sign-out.
//!
//! These go through the [`SessionProvider`](crate::session::SessionProvider)
//! rather than the data source. The session lives in the root scope, so an
//! unmounted view still leaves the user signed in; only the notice and the
//! redirect are dropped.

use juahustle_core::validation::{validate_email, validate_password_match, validate_required};

use super::{settle, ViewOutcome, ViewScope};
use crate::error::{AppError, AppResult};
use crate::notice::Notice;
use crate::session::{SessionUser, SignupRequest};
use crate::state::AppState;

/// A successful sign-in and where to send the user next.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub user: SessionUser,
    pub redirect: &'static str,
}

impl SignedIn {
    fn new(user: SessionUser) -> Self {
        let redirect = user.role.dashboard_path();
        Self { user, redirect }
    }
}

pub async fn login(
    state: &AppState,
    scope: &ViewScope,
    email: &str,
    password: &str,
) -> ViewOutcome<SignedIn> {
    let result = state
        .session
        .login(email, password)
        .await
        .map_err(AppError::from);

    settle(scope, result, "Failed to sign in. Please try again.", |user| {
        let notice = Notice::success("Welcome back!", format!("Signed in as {}.", user.name));
        ViewOutcome::done_with(SignedIn::new(user), notice)
    })
}

/// Form checks that run before the session is contacted.
fn validate_signup(request: &SignupRequest) -> AppResult<()> {
    validate_password_match(&request.password, &request.confirm_password)?;
    validate_required("Name", &request.name)?;
    validate_email(&request.email)?;
    validate_required("Phone", &request.phone)?;
    Ok(())
}

/// Create an account and sign in. A rejected form persists nothing.
pub async fn signup(
    state: &AppState,
    scope: &ViewScope,
    request: SignupRequest,
) -> ViewOutcome<SignedIn> {
    const FAILURE: &str = "Failed to create account. Please try again.";

    if let Err(err) = validate_signup(&request) {
        return ViewOutcome::Failed(err.to_notice(FAILURE));
    }

    let result = state.session.signup(request).await.map_err(AppError::from);

    settle(scope, result, FAILURE, |user| {
        let notice = Notice::success(
            "Account created successfully!",
            format!("Welcome to JuaHustle, {}!", user.name),
        );
        ViewOutcome::done_with(SignedIn::new(user), notice)
    })
}

/// Sign out. Redirects to the landing page.
pub async fn logout(state: &AppState, scope: &ViewScope) -> ViewOutcome<&'static str> {
    let result = state.session.logout().await.map_err(AppError::from);
    settle(scope, result, "Failed to sign out", |()| ViewOutcome::done("/"))
}
