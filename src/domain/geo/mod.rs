//! Geographic primitives
//!
//! Contains the canonical coordinate type and spherical distance math.

pub mod point;

pub use point::{GeoPoint, EARTH_RADIUS_KM};
