//! wellnesshub - Personal wellness tracker
//!
//! Favorites, water intake and workout sessions kept as plain reducer state,
//! mirrored to local storage and restored at startup.

pub mod clock;
pub mod db;
pub mod exercises;
pub mod format;
pub mod persist;
pub mod stats;
pub mod store;
pub mod timer;
pub mod tips;
pub mod tui;

pub use persist::PersistenceGateway;
pub use store::AppStore;
