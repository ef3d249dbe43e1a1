//! Record types stored by the backend and their input shapes.
//!
//! Each record kind comes in three shapes:
//! - the record itself (`Meal`, `Workout`), as stored and served,
//! - a draft (`MealDraft`, `WorkoutDraft`), the request body for a create,
//! - a patch (`MealPatch`, `WorkoutPatch`), the request body for a
//!   partial update.
//!
//! Drafts and patches carry every field as an `Option` so that validation
//! can report missing fields by name instead of failing at the
//! deserialization layer.

mod meal;
mod workout;

pub use meal::{Meal, MealDraft, MealPatch};
pub use workout::{Workout, WorkoutDraft, WorkoutPatch};

/// A single validation failure, naming the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" {}", self.field, self.message)
    }
}
