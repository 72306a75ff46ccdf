//! # Geodir Directory Service
//!
//! Location-aware user directory: registers users with a geographic
//! location, authenticates them with bearer tokens, and answers three
//! directory queries over the user collection (collection-wide status
//! toggle, great-circle distance, weekday-bucketed listing).
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and traits
//! - **application**: Business logic and use cases
//! - **infrastructure**: External concerns (database, crypto)
//! - **interfaces**: REST API with Swagger documentation

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use config::{default_config_path, AppConfig, Config};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
