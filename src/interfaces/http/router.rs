//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::directory::DirectoryService;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::repositories::SeaOrmUserRepository;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::{health, metrics, users};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token issued at registration"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Users
        users::handlers::create_user,
        users::handlers::change_status,
        users::handlers::get_distance,
        users::handlers::list_users,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            // Users
            users::dto::CreateUserRequest,
            users::dto::CreatedUserDto,
            users::dto::DistanceData,
            users::dto::ListedUserDto,
            users::dto::ToggleStatusesData,
            // Health
            health::handlers::HealthResponse,
            health::handlers::ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Users", description = "User registration and directory queries: status toggle, distance, weekday listing"),
    ),
    info(
        title = "Geodir Directory Service API",
        version = "1.0.0",
        description = "REST API for the location-aware user directory",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    db: DatabaseConnection,
    jwt_config: JwtConfig,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let repo = Arc::new(SeaOrmUserRepository::new(db.clone()));
    let directory = Arc::new(DirectoryService::new(repo, jwt_config.clone()));

    let user_state = users::handlers::UserHandlerState { directory };
    let auth_state = AuthState { jwt_config };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public route: registration issues the token used everywhere else
    let public_routes = Router::new()
        .route("/create", post(users::handlers::create_user))
        .with_state(user_state.clone());

    // Directory routes (protected)
    let directory_routes = Router::new()
        .route("/change-status", put(users::handlers::change_status))
        .route("/distance", get(users::handlers::get_distance))
        .route("/list", get(users::handlers::list_users))
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .with_state(user_state);

    let health_state = health::handlers::HealthState {
        db,
        started_at: Arc::new(Instant::now()),
    };

    let metrics_state = metrics::handlers::MetricsState {
        handle: prometheus_handle,
    };

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route(
            "/health",
            get(health::handlers::health_check).with_state(health_state),
        )
        // Prometheus
        .route(
            "/metrics",
            get(metrics::handlers::prometheus_metrics).with_state(metrics_state),
        )
        // Users
        .merge(public_routes)
        .merge(directory_routes)
        // Middleware
        .layer(middleware::from_fn(metrics::middleware::track_http_metrics))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
