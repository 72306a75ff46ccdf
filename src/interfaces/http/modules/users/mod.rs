//! Users module — registration and the directory operations

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
