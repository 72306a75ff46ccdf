use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::domain::weekday;
use crate::domain::{
    CreateUserDto, DomainError, DomainResult, GeoPoint, User, UserListingEntry,
    UserRepositoryInterface, UserStatus,
};
use crate::infrastructure::database::entities::user;

/// Upper bound on any single store call; exceeding it surfaces as a
/// retryable `StoreUnavailable` instead of hanging the request.
const STORE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_status_to_domain(status: user::UserStatus) -> UserStatus {
    match status {
        user::UserStatus::Active => UserStatus::Active,
        user::UserStatus::Inactive => UserStatus::Inactive,
    }
}

pub(crate) fn user_model_to_domain(model: user::Model) -> DomainResult<User> {
    // canonical columns are stored (lon, lat); GeoPoint::new takes (lat, lon)
    let location = GeoPoint::new(model.location_lat, model.location_lon).map_err(|_| {
        DomainError::Unexpected(format!("stored canonical point invalid for user {}", model.id))
    })?;

    Ok(User {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        address: model.address,
        latitude: model.latitude,
        longitude: model.longitude,
        location,
        status: entity_status_to_domain(model.status),
        registered_at: model.registered_at,
    })
}

fn db_err(e: DbErr) -> DomainError {
    let msg = e.to_string();
    if msg.contains("UNIQUE") || msg.contains("duplicate") {
        return DomainError::Conflict("User already exists".to_string());
    }
    match e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => DomainError::StoreUnavailable(msg),
        _ => DomainError::Unexpected(format!("database error: {}", msg)),
    }
}

async fn bounded<T, F>(fut: F) -> DomainResult<T>
where
    F: Future<Output = Result<T, DbErr>>,
{
    match tokio::time::timeout(STORE_TIMEOUT, fut).await {
        Ok(result) => result.map_err(db_err),
        Err(_) => Err(DomainError::StoreUnavailable(format!(
            "store call exceeded {}s",
            STORE_TIMEOUT.as_secs()
        ))),
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for SeaOrmUserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let now = Utc::now();

        let new_user = user::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(dto.name),
            email: Set(dto.email),
            password_hash: Set(dto.password_hash),
            address: Set(dto.address),
            latitude: Set(dto.latitude),
            longitude: Set(dto.longitude),
            location_lon: Set(dto.location.lon()),
            location_lat: Set(dto.location.lat()),
            status: Set(user::UserStatus::Active),
            registered_at: Set(now),
            registered_weekday: Set(weekday::weekday_index(&now) as i32),
        };

        let model = bounded(new_user.insert(&self.db)).await?;
        user_model_to_domain(model)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = bounded(user::Entity::find_by_id(id).one(&self.db)).await?;
        model.map(user_model_to_domain).transpose()
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = bounded(
            user::Entity::find()
                .filter(user::Column::Email.eq(email))
                .one(&self.db),
        )
        .await?;
        model.map(user_model_to_domain).transpose()
    }

    async fn list_by_weekday(
        &self,
        weekday: u8,
        page: u64,
        page_size: u64,
    ) -> DomainResult<Vec<UserListingEntry>> {
        let offset = (page - 1) * page_size;

        let rows: Vec<(String, String)> = bounded(
            user::Entity::find()
                .select_only()
                .column(user::Column::Name)
                .column(user::Column::Email)
                .filter(user::Column::RegisteredWeekday.eq(weekday as i32))
                .order_by_asc(user::Column::RegisteredAt)
                .order_by_asc(user::Column::Id)
                .offset(offset)
                .limit(page_size)
                .into_tuple()
                .all(&self.db),
        )
        .await?;

        Ok(rows
            .into_iter()
            .map(|(name, email)| UserListingEntry { name, email })
            .collect())
    }

    async fn toggle_all_statuses(&self) -> DomainResult<u64> {
        // One conditional UPDATE: each record flips relative to its own
        // current value, atomically for readers, and rows_affected is
        // the collection size at the statement's effective time.
        let result = bounded(
            user::Entity::update_many()
                .col_expr(
                    user::Column::Status,
                    Expr::cust("CASE WHEN status = 'active' THEN 'inactive' ELSE 'active' END")
                        .into(),
                )
                .exec(&self.db),
        )
        .await?;

        Ok(result.rows_affected)
    }
}
