//! Marketplace roles.
//!
//! The string constants match the `role` values exchanged with the HTTP API
//! and stored in the persisted profile snapshot.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_CLIENT: &str = "client";
pub const ROLE_HUSTLER: &str = "hustler";

/// The two sides of the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Posts jobs and reviews applications.
    Client,
    /// Service provider applying to jobs.
    Hustler,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Client => ROLE_CLIENT,
            Self::Hustler => ROLE_HUSTLER,
        }
    }

    /// Landing route for a freshly signed-in user of this role.
    pub fn dashboard_path(self) -> &'static str {
        match self {
            Self::Client => "/client-dashboard",
            Self::Hustler => "/hustler-dashboard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_CLIENT => Ok(Self::Client),
            ROLE_HUSTLER => Ok(Self::Hustler),
            other => Err(CoreError::Validation(format!(
                "Unknown role '{other}'. Must be one of: {ROLE_CLIENT}, {ROLE_HUSTLER}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_roles() {
        assert_eq!("client".parse::<Role>().unwrap(), Role::Client);
        assert_eq!("hustler".parse::<Role>().unwrap(), Role::Hustler);
    }

    #[test]
    fn parse_unknown_role_is_validation_error() {
        let err = "admin".parse::<Role>().unwrap_err();
        assert!(matches!(err, CoreError::Validation(msg) if msg.contains("admin")));
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Role::Hustler).unwrap();
        assert_eq!(json, "\"hustler\"");
    }

    #[test]
    fn dashboard_path_follows_role() {
        assert_eq!(Role::Client.dashboard_path(), "/client-dashboard");
        assert_eq!(Role::Hustler.dashboard_path(), "/hustler-dashboard");
    }
}
