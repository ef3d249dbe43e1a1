use serde::{Deserialize, Serialize};

use super::FieldError;

/// A logged meal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    pub id: u64,
    pub name: String,
    pub calories: i64,
}

/// Request body for creating a meal.
///
/// Both fields are required; validation happens in [`MealDraft::build`]
/// so that a missing field is reported by name rather than rejected by
/// the deserializer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MealDraft {
    pub name: Option<String>,
    pub calories: Option<i64>,
}

impl MealDraft {
    /// Validates the draft and builds a `Meal` with the given id.
    ///
    /// Collects every violated constraint, not just the first.
    pub fn build(self, id: u64) -> Result<Meal, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = match self.name {
            Some(name) if !name.trim().is_empty() => Some(name),
            Some(_) => {
                errors.push(FieldError::new("name", "must not be empty"));
                None
            }
            None => {
                errors.push(FieldError::new("name", "is required"));
                None
            }
        };

        let calories = match self.calories {
            Some(calories) if calories >= 0 => Some(calories),
            Some(_) => {
                errors.push(FieldError::new("calories", "must not be negative"));
                None
            }
            None => {
                errors.push(FieldError::new("calories", "is required"));
                None
            }
        };

        match (name, calories) {
            (Some(name), Some(calories)) => Ok(Meal { id, name, calories }),
            _ => Err(errors),
        }
    }
}

/// Request body for a partial meal update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MealPatch {
    pub name: Option<String>,
    pub calories: Option<i64>,
}

impl MealPatch {
    /// True when no recognized field was supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.calories.is_none()
    }

    /// Applies the patch to a meal, validating supplied fields first.
    ///
    /// The meal is untouched unless every supplied field passes, so a
    /// rejected patch never leaves a half-applied record behind.
    pub fn apply(self, meal: &mut Meal) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                errors.push(FieldError::new("name", "must not be empty"));
            }
        }
        if let Some(calories) = self.calories {
            if calories < 0 {
                errors.push(FieldError::new("calories", "must not be negative"));
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        if let Some(name) = self.name {
            meal.name = name;
        }
        if let Some(calories) = self.calories {
            meal.calories = calories;
        }
        Ok(())
    }
}
