//! Directory use-cases
//!
//! The facade composing the three directory operations (status toggle,
//! distance, weekday listing) plus user registration, and the weekday
//! convention shared by all of them.

pub mod service;

pub use service::{DirectoryService, RegisteredUser, WeekdayListing};
