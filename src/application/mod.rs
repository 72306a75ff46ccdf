//! Application layer - business logic and use cases

pub mod directory;

pub use directory::{DirectoryService, RegisteredUser, WeekdayListing};
