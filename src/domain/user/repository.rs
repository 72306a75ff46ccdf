use async_trait::async_trait;

use super::{CreateUserDto, User, UserListingEntry};
use crate::domain::DomainResult;

/// Storage contract for the user directory.
///
/// Implementations carry no business logic: each method is a single
/// query or mutation against the store. Weekday numbering is 0 = Sunday
/// … 6 = Saturday everywhere.
#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Users whose `registered_at` falls on `weekday`, ordered by
    /// (registered_at, id) ascending, windowed by `page`/`page_size`
    /// (1-based page). Each weekday bucket is paginated independently.
    async fn list_by_weekday(
        &self,
        weekday: u8,
        page: u64,
        page_size: u64,
    ) -> DomainResult<Vec<UserListingEntry>>;

    /// Flip every user's status in one store-side conditional update.
    /// Returns the number of affected records, which equals the
    /// collection size at the operation's effective time.
    async fn toggle_all_statuses(&self) -> DomainResult<u64>;
}
