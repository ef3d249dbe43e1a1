//! FitTrack backend library.
//!
//! A small fitness-tracking backend exposing REST and GraphQL endpoints
//! over two record types (meals and workouts). All transport handlers go
//! through one [`store::RecordStore`], which owns validation, id
//! assignment, and persistence (in-memory or flat-file JSON).

pub mod config;
pub mod models;
pub mod server;
pub mod store;

pub use config::{Config, ConfigError};
pub use models::{
    FieldError, Meal, MealDraft, MealPatch, Workout, WorkoutDraft, WorkoutPatch,
};
pub use server::{router, AppState};
pub use store::{RecordKind, RecordStore, StorageMode, StoreError};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
