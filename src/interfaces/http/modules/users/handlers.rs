//! User API handlers
//!
//! Thin wrappers over `DirectoryService`: extract, delegate, wrap the
//! result in the response envelope.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    CreateUserRequest, CreatedUserDto, DistanceData, DistanceParams, ListUsersParams,
    ListedUserDto, ToggleStatusesData, UserListingData,
};
use crate::application::directory::DirectoryService;
use crate::domain::DomainError;
use crate::infrastructure::database::repositories::SeaOrmUserRepository;
use crate::interfaces::http::common::validated_json::ValidatedJson;
use crate::interfaces::http::common::{domain_error_response, ApiResponse};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// User handler state — concrete over `SeaOrmUserRepository` for Axum
/// compatibility.
#[derive(Clone)]
pub struct UserHandlerState {
    pub directory: Arc<DirectoryService<SeaOrmUserRepository>>,
}

#[utoipa::path(
    post,
    path = "/create",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = ApiResponse<CreatedUserDto>),
        (status = 400, description = "Validation error or duplicate email")
    )
)]
pub async fn create_user(
    State(state): State<UserHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<Json<ApiResponse<CreatedUserDto>>, (StatusCode, Json<ApiResponse<CreatedUserDto>>)> {
    match state
        .directory
        .register(
            &request.name,
            &request.email,
            &request.password,
            &request.address,
            request.latitude,
            request.longitude,
        )
        .await
    {
        Ok(registered) => Ok(Json(ApiResponse::ok(
            "User created successfully",
            CreatedUserDto::from(registered),
        ))),
        Err(e) => Err(domain_error_response(&e)),
    }
}

#[utoipa::path(
    put,
    path = "/change-status",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Every user's status flipped", body = ApiResponse<ToggleStatusesData>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn change_status(
    State(state): State<UserHandlerState>,
    Extension(_principal): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<ToggleStatusesData>>, (StatusCode, Json<ApiResponse<ToggleStatusesData>>)>
{
    match state.directory.toggle_all_statuses().await {
        Ok(affected) => Ok(Json(ApiResponse::ok(
            "User statuses updated successfully",
            ToggleStatusesData { affected },
        ))),
        Err(e) => Err(domain_error_response(&e)),
    }
}

#[utoipa::path(
    get,
    path = "/distance",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(DistanceParams),
    responses(
        (status = 200, description = "Distance from the caller to the destination", body = ApiResponse<DistanceData>),
        (status = 400, description = "Destination out of range"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Caller's record no longer exists")
    )
)]
pub async fn get_distance(
    State(state): State<UserHandlerState>,
    Extension(principal): Extension<AuthenticatedUser>,
    Query(params): Query<DistanceParams>,
) -> Result<Json<ApiResponse<DistanceData>>, (StatusCode, Json<ApiResponse<DistanceData>>)> {
    match state
        .directory
        .distance_to(
            &principal.user_id,
            params.destination_latitude,
            params.destination_longitude,
        )
        .await
    {
        Ok(km) => Ok(Json(ApiResponse::ok(
            "Distance calculated",
            DistanceData {
                // rounding happens here, at the presentation edge
                distance: format!("{:.2} km", km),
            },
        ))),
        Err(DomainError::NotFound { .. }) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::message_only(
                StatusCode::NOT_FOUND,
                "Distance could not be calculated",
            )),
        )),
        Err(e) => Err(domain_error_response(&e)),
    }
}

#[utoipa::path(
    get,
    path = "/list",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(ListUsersParams),
    responses(
        (status = 200, description = "Users grouped by registration weekday", body = ApiResponse<UserListingData>),
        (status = 400, description = "Invalid week_number, page or limit"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
    Extension(_principal): Extension<AuthenticatedUser>,
    Query(params): Query<ListUsersParams>,
) -> Result<Json<ApiResponse<UserListingData>>, (StatusCode, Json<ApiResponse<UserListingData>>)> {
    match state
        .directory
        .list_by_weekdays(&params.week_number, params.page, params.limit)
        .await
    {
        Ok(listing) => {
            let data: UserListingData = listing
                .into_iter()
                .map(|(day, users)| {
                    (
                        day.to_string(),
                        users.into_iter().map(ListedUserDto::from).collect(),
                    )
                })
                .collect();
            Ok(Json(ApiResponse::ok(
                "User listing fetched successfully",
                data,
            )))
        }
        Err(e) => Err(domain_error_response(&e)),
    }
}
