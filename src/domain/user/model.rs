//! User domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::geo::GeoPoint;

/// Activity status of a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }

    /// The value this status flips to under the collection-wide toggle.
    pub fn toggled(&self) -> UserStatus {
        match self {
            UserStatus::Active => UserStatus::Inactive,
            UserStatus::Inactive => UserStatus::Active,
        }
    }
}

impl Default for UserStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// User entity.
///
/// `latitude`/`longitude` are the raw display scalars; `location` is the
/// canonical point every spatial query must use. The two must stay
/// numerically consistent — both are written once, at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub location: GeoPoint,
    pub status: UserStatus,
    /// Set exactly once, from the service clock, at creation.
    pub registered_at: DateTime<Utc>,
}

/// Projection returned by the weekday listing — name and email only,
/// nothing else leaks through this path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserListingEntry {
    pub name: String,
    pub email: String,
}
