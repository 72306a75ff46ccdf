//! User DTOs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::directory::RegisteredUser;
use crate::domain::UserListingEntry;

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, max = 128, message = "password must be 6–128 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 512, message = "address is required"))]
    pub address: String,
    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be within [-90, 90]"))]
    pub latitude: f64,
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "longitude must be within [-180, 180]"
    ))]
    pub longitude: f64,
}

/// Profile returned on creation, together with the issued token.
/// The password credential never appears here.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedUserDto {
    pub name: String,
    pub email: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: String,
    pub registered_at: DateTime<Utc>,
    pub token: String,
}

impl From<RegisteredUser> for CreatedUserDto {
    fn from(r: RegisteredUser) -> Self {
        Self {
            name: r.user.name,
            email: r.user.email,
            address: r.user.address,
            latitude: r.user.latitude,
            longitude: r.user.longitude,
            status: r.user.status.as_str().to_string(),
            registered_at: r.user.registered_at,
            token: r.token,
        }
    }
}

/// Destination coordinate for the distance query
#[derive(Debug, Deserialize, IntoParams)]
pub struct DistanceParams {
    pub destination_latitude: f64,
    pub destination_longitude: f64,
}

/// Distance formatted for display, e.g. `"10007.54 km"`
#[derive(Debug, Serialize, ToSchema)]
pub struct DistanceData {
    pub distance: String,
}

/// Weekday listing query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListUsersParams {
    /// Comma-separated weekday indices, 0 = Sunday … 6 = Saturday
    pub week_number: String,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    10
}

/// Listing entry exposed per user — name and email only
#[derive(Debug, Serialize, ToSchema)]
pub struct ListedUserDto {
    pub name: String,
    pub email: String,
}

impl From<UserListingEntry> for ListedUserDto {
    fn from(e: UserListingEntry) -> Self {
        Self {
            name: e.name,
            email: e.email,
        }
    }
}

/// Weekday-name-keyed listing payload
pub type UserListingData = BTreeMap<String, Vec<ListedUserDto>>;

/// Result of the collection-wide status toggle
#[derive(Debug, Serialize, ToSchema)]
pub struct ToggleStatusesData {
    pub affected: u64,
}
