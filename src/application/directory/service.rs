//! Directory service — application-layer orchestration
//!
//! All directory business logic lives here. HTTP handlers are thin
//! wrappers that delegate to this service. The authenticated principal
//! is always passed in explicitly; nothing is read from ambient state.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;

use crate::domain::weekday;
use crate::domain::{
    CreateUserDto, DomainError, DomainResult, GeoPoint, User, UserListingEntry,
    UserRepositoryInterface,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::hash_password;

/// Result of a successful registration: the stored profile plus the
/// bearer token issued for it.
#[derive(Debug, Clone)]
pub struct RegisteredUser {
    pub user: User,
    pub token: String,
}

/// Weekday-keyed listing. Every requested weekday appears as a key,
/// even when its page is empty.
pub type WeekdayListing = BTreeMap<&'static str, Vec<UserListingEntry>>;

/// Directory service — composes the directory use-cases.
///
/// Generic over `R: UserRepositoryInterface` so it stays decoupled from
/// the concrete persistence layer. Request-scoped and stateless: each
/// call reads what it needs from the store and returns.
pub struct DirectoryService<R: UserRepositoryInterface> {
    repo: Arc<R>,
    jwt_config: JwtConfig,
}

impl<R: UserRepositoryInterface> DirectoryService<R> {
    pub fn new(repo: Arc<R>, jwt_config: JwtConfig) -> Self {
        Self { repo, jwt_config }
    }

    // ── Registration ────────────────────────────────────────────

    /// Create a user with a validated coordinate and issue its token.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        address: &str,
        latitude: f64,
        longitude: f64,
    ) -> DomainResult<RegisteredUser> {
        let location = GeoPoint::new(latitude, longitude)?;

        if self.repo.find_by_email(email).await?.is_some() {
            return Err(DomainError::Conflict("User already exists".into()));
        }

        let password_hash = hash_password(password)
            .map_err(|e| DomainError::Unexpected(format!("failed to hash password: {}", e)))?;

        let user = self
            .repo
            .create_user(CreateUserDto {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
                address: address.to_string(),
                latitude,
                longitude,
                location,
            })
            .await?;

        let token = create_token(&user.id, &self.jwt_config)
            .map_err(|e| DomainError::Unexpected(format!("failed to create token: {}", e)))?;

        info!(user_id = %user.id, email = %user.email, "New user registered");
        Ok(RegisteredUser { user, token })
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Great-circle distance in kilometers from the authenticated
    /// user's stored canonical point to the destination coordinate.
    ///
    /// Full precision; callers round for display. Fails with `NotFound`
    /// when the origin user vanished between authentication and query.
    pub async fn distance_to(
        &self,
        origin_user_id: &str,
        destination_latitude: f64,
        destination_longitude: f64,
    ) -> DomainResult<f64> {
        let destination = GeoPoint::new(destination_latitude, destination_longitude)?;

        let origin = self
            .repo
            .find_by_id(origin_user_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: origin_user_id.to_string(),
            })?;

        Ok(origin.location.haversine_km(&destination))
    }

    /// List users grouped by the weekday they registered.
    ///
    /// `week_number` is the comma-separated day-index parameter
    /// (0 = Sunday … 6 = Saturday). The same `page`/`page_size` window
    /// is applied independently to each requested weekday bucket — one
    /// store query per bucket, never a combined window.
    pub async fn list_by_weekdays(
        &self,
        week_number: &str,
        page: u64,
        page_size: u64,
    ) -> DomainResult<WeekdayListing> {
        if page < 1 {
            return Err(DomainError::Validation(
                "page must be a positive integer".into(),
            ));
        }
        if page_size < 1 {
            return Err(DomainError::Validation(
                "limit must be a positive integer".into(),
            ));
        }

        let days = weekday::parse_week_numbers(week_number)?;

        let mut listing = WeekdayListing::new();
        for day in days {
            let users = self.repo.list_by_weekday(day, page, page_size).await?;
            listing.insert(weekday::day_name(day), users);
        }
        Ok(listing)
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Flip every user's status, each record relative to its own
    /// current value. Returns the number of affected users.
    pub async fn toggle_all_statuses(&self) -> DomainResult<u64> {
        let affected = self.repo.toggle_all_statuses().await?;
        info!(affected, "User statuses toggled");
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::{DateTime, TimeZone, Utc};
    use tokio::sync::RwLock;
    use uuid::Uuid;

    use super::*;
    use crate::domain::weekday::weekday_index;
    use crate::domain::UserStatus;
    use crate::infrastructure::crypto::jwt::verify_token;

    /// In-memory repository for exercising the service without a store.
    struct InMemoryUserRepository {
        users: RwLock<Vec<User>>,
    }

    impl InMemoryUserRepository {
        fn new() -> Self {
            Self {
                users: RwLock::new(Vec::new()),
            }
        }

        async fn seed(&self, users: Vec<User>) {
            self.users.write().await.extend(users);
        }

        async fn statuses_by_email(&self) -> HashMap<String, UserStatus> {
            self.users
                .read()
                .await
                .iter()
                .map(|u| (u.email.clone(), u.status))
                .collect()
        }
    }

    #[async_trait::async_trait]
    impl UserRepositoryInterface for InMemoryUserRepository {
        async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
            let mut users = self.users.write().await;
            if users.iter().any(|u| u.email == dto.email) {
                return Err(DomainError::Conflict("User already exists".into()));
            }
            let user = User {
                id: Uuid::new_v4().to_string(),
                name: dto.name,
                email: dto.email,
                password_hash: dto.password_hash,
                address: dto.address,
                latitude: dto.latitude,
                longitude: dto.longitude,
                location: dto.location,
                status: UserStatus::Active,
                registered_at: Utc::now(),
            };
            users.push(user.clone());
            Ok(user)
        }

        async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
            Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
            Ok(self
                .users
                .read()
                .await
                .iter()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn list_by_weekday(
            &self,
            weekday: u8,
            page: u64,
            page_size: u64,
        ) -> DomainResult<Vec<UserListingEntry>> {
            let users = self.users.read().await;
            let mut bucket: Vec<&User> = users
                .iter()
                .filter(|u| weekday_index(&u.registered_at) == weekday)
                .collect();
            bucket.sort_by(|a, b| {
                a.registered_at
                    .cmp(&b.registered_at)
                    .then_with(|| a.id.cmp(&b.id))
            });
            Ok(bucket
                .into_iter()
                .skip(((page - 1) * page_size) as usize)
                .take(page_size as usize)
                .map(|u| UserListingEntry {
                    name: u.name.clone(),
                    email: u.email.clone(),
                })
                .collect())
        }

        async fn toggle_all_statuses(&self) -> DomainResult<u64> {
            let mut users = self.users.write().await;
            for user in users.iter_mut() {
                user.status = user.status.toggled();
            }
            Ok(users.len() as u64)
        }
    }

    fn test_user(name: &str, lat: f64, lon: f64, registered_at: DateTime<Utc>) -> User {
        User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", name),
            password_hash: "hash".to_string(),
            address: "1 Test Street".to_string(),
            latitude: lat,
            longitude: lon,
            location: GeoPoint::new(lat, lon).unwrap(),
            status: UserStatus::Active,
            registered_at,
        }
    }

    fn service(repo: Arc<InMemoryUserRepository>) -> DirectoryService<InMemoryUserRepository> {
        DirectoryService::new(repo, JwtConfig::default())
    }

    // 2024-01-07 was a Sunday; offsets pick out the rest of that week.
    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn register_persists_user_and_issues_verifiable_token() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let svc = service(repo.clone());

        let registered = svc
            .register("Ada", "ada@example.com", "s3cret-pw", "12 Loop Road", 52.52, 13.405)
            .await
            .unwrap();

        assert_eq!(registered.user.name, "Ada");
        assert_eq!(registered.user.status, UserStatus::Active);
        // canonical point is (lon, lat)
        assert_eq!(registered.user.location.coordinates(), [13.405, 52.52]);
        assert_ne!(registered.user.password_hash, "s3cret-pw");

        let claims = verify_token(&registered.token, &JwtConfig::default()).unwrap();
        assert_eq!(claims.sub, registered.user.id);
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let repo = Arc::new(InMemoryUserRepository::new());
        repo.seed(vec![test_user("ada", 0.0, 0.0, at(7, 10))]).await;
        let svc = service(repo);

        let err = svc
            .register("Ada Again", "ada@example.com", "pw", "addr", 1.0, 1.0)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn register_rejects_out_of_range_coordinates() {
        let svc = service(Arc::new(InMemoryUserRepository::new()));
        let err = svc
            .register("Bad", "bad@example.com", "pw", "addr", 91.0, 0.0)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn distance_quarter_circle_and_identity() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let origin = test_user("origin", 0.0, 0.0, at(7, 10));
        let origin_id = origin.id.clone();
        repo.seed(vec![origin]).await;
        let svc = service(repo);

        let quarter = svc.distance_to(&origin_id, 0.0, 90.0).await.unwrap();
        assert!((quarter - 10007.54).abs() < 0.01, "got {}", quarter);

        let zero = svc.distance_to(&origin_id, 0.0, 0.0).await.unwrap();
        assert_eq!(format!("{:.2}", zero), "0.00");
    }

    #[tokio::test]
    async fn distance_is_symmetric_between_two_stored_users() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let berlin = test_user("berlin", 52.52, 13.405, at(7, 10));
        let paris = test_user("paris", 48.8566, 2.3522, at(7, 11));
        let (berlin_id, paris_id) = (berlin.id.clone(), paris.id.clone());
        repo.seed(vec![berlin, paris]).await;
        let svc = service(repo);

        let d1 = svc.distance_to(&berlin_id, 48.8566, 2.3522).await.unwrap();
        let d2 = svc.distance_to(&paris_id, 52.52, 13.405).await.unwrap();
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[tokio::test]
    async fn distance_for_vanished_user_is_not_found() {
        let svc = service(Arc::new(InMemoryUserRepository::new()));
        let err = svc.distance_to("no-such-id", 0.0, 0.0).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn distance_rejects_invalid_destination() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let origin = test_user("origin", 0.0, 0.0, at(7, 10));
        let origin_id = origin.id.clone();
        repo.seed(vec![origin]).await;
        let svc = service(repo);

        let err = svc.distance_to(&origin_id, 0.0, 181.0).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn weekday_buckets_partition_the_collection() {
        let repo = Arc::new(InMemoryUserRepository::new());
        repo.seed(vec![
            test_user("sun1", 0.0, 0.0, at(7, 8)),
            test_user("mon1", 0.0, 0.0, at(8, 9)),
            test_user("tue1", 0.0, 0.0, at(9, 10)),
            test_user("fri1", 0.0, 0.0, at(12, 11)),
            test_user("sat1", 0.0, 0.0, at(13, 12)),
        ])
        .await;
        let svc = service(repo);

        let listing = svc
            .list_by_weekdays("0,1,2,3,4,5,6", 1, 100)
            .await
            .unwrap();

        let mut all: Vec<String> = listing
            .values()
            .flatten()
            .map(|e| e.email.clone())
            .collect();
        all.sort();
        let expected = vec![
            "fri1@example.com".to_string(),
            "mon1@example.com".to_string(),
            "sat1@example.com".to_string(),
            "sun1@example.com".to_string(),
            "tue1@example.com".to_string(),
        ];
        // every user lands in exactly one bucket, none twice
        assert_eq!(all, expected);
        assert_eq!(listing.len(), 7);
    }

    #[tokio::test]
    async fn pagination_is_independent_per_bucket() {
        let repo = Arc::new(InMemoryUserRepository::new());
        repo.seed(vec![
            test_user("sun1", 0.0, 0.0, at(7, 8)),
            test_user("sun2", 0.0, 0.0, at(7, 9)),
            test_user("sun3", 0.0, 0.0, at(7, 10)),
            test_user("mon1", 0.0, 0.0, at(8, 8)),
            test_user("mon2", 0.0, 0.0, at(8, 9)),
        ])
        .await;
        let svc = service(repo);

        let page1 = svc.list_by_weekdays("0,1", 1, 2).await.unwrap();
        assert_eq!(page1["sunday"].len(), 2);
        assert_eq!(page1["monday"].len(), 2);
        assert_eq!(page1["sunday"][0].email, "sun1@example.com");
        assert_eq!(page1["sunday"][1].email, "sun2@example.com");

        let page2 = svc.list_by_weekdays("0,1", 2, 2).await.unwrap();
        assert_eq!(page2["sunday"].len(), 1);
        assert_eq!(page2["sunday"][0].email, "sun3@example.com");
        assert!(page2["monday"].is_empty());
    }

    #[tokio::test]
    async fn listing_is_deterministic_across_calls() {
        let repo = Arc::new(InMemoryUserRepository::new());
        repo.seed(vec![
            test_user("sun1", 0.0, 0.0, at(7, 8)),
            test_user("sun2", 0.0, 0.0, at(7, 9)),
        ])
        .await;
        let svc = service(repo);

        let first = svc.list_by_weekdays("0", 1, 10).await.unwrap();
        let second = svc.list_by_weekdays("0", 1, 10).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn listing_exposes_only_name_and_email() {
        let repo = Arc::new(InMemoryUserRepository::new());
        repo.seed(vec![test_user("sun1", 12.0, 34.0, at(7, 8))]).await;
        let svc = service(repo);

        let listing = svc.list_by_weekdays("0", 1, 10).await.unwrap();
        let entry = serde_json::to_value(&listing["sunday"][0]).unwrap();
        let mut keys: Vec<String> = entry.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["email", "name"]);
    }

    #[tokio::test]
    async fn listing_validates_paging_and_day_indices() {
        let svc = service(Arc::new(InMemoryUserRepository::new()));
        assert!(matches!(
            svc.list_by_weekdays("0", 0, 10).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            svc.list_by_weekdays("0", 1, 0).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            svc.list_by_weekdays("7", 1, 10).await,
            Err(DomainError::Validation(_))
        ));

        let collapsed = svc.list_by_weekdays("1,1,1", 1, 10).await.unwrap();
        assert_eq!(collapsed.len(), 1);
        assert!(collapsed.contains_key("monday"));
    }

    #[tokio::test]
    async fn toggle_flips_each_record_relative_to_itself() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let mut active = test_user("active", 0.0, 0.0, at(7, 8));
        active.status = UserStatus::Active;
        let mut inactive = test_user("inactive", 0.0, 0.0, at(8, 8));
        inactive.status = UserStatus::Inactive;
        repo.seed(vec![active, inactive]).await;
        let svc = service(repo.clone());

        let affected = svc.toggle_all_statuses().await.unwrap();
        assert_eq!(affected, 2);

        let statuses = repo.statuses_by_email().await;
        assert_eq!(statuses["active@example.com"], UserStatus::Inactive);
        assert_eq!(statuses["inactive@example.com"], UserStatus::Active);
    }

    #[tokio::test]
    async fn toggling_twice_is_an_involution() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let mut second = test_user("b", 0.0, 0.0, at(8, 8));
        second.status = UserStatus::Inactive;
        repo.seed(vec![test_user("a", 0.0, 0.0, at(7, 8)), second]).await;
        let svc = service(repo.clone());

        let before = repo.statuses_by_email().await;
        assert_eq!(svc.toggle_all_statuses().await.unwrap(), 2);
        assert_eq!(svc.toggle_all_statuses().await.unwrap(), 2);
        assert_eq!(repo.statuses_by_email().await, before);
    }
}
