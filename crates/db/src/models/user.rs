//! Directory user records (admin view).

use juahustle_core::roles::Role;
use juahustle_core::types::{Date, EntityId};
use serde::{Deserialize, Serialize};

/// A registered marketplace user as listed in the admin console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub created_date: Date,
    pub is_active: bool,
}

/// Body of an activate / deactivate request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UserStatusUpdate {
    pub is_active: bool,
}
