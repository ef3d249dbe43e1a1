use serde::{Deserialize, Serialize};

use super::FieldError;

/// A logged workout.
///
/// Serialized with camelCase field names to match the public JSON shape
/// (`caloriesBurned`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: u64,
    pub name: String,
    pub duration: i64,
    pub calories_burned: i64,
}

/// Request body for creating a workout. All fields are required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutDraft {
    pub name: Option<String>,
    pub duration: Option<i64>,
    pub calories_burned: Option<i64>,
}

impl WorkoutDraft {
    /// Validates the draft and builds a `Workout` with the given id.
    pub fn build(self, id: u64) -> Result<Workout, Vec<FieldError>> {
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

        let duration = match self.duration {
            Some(duration) if duration > 0 => Some(duration),
            Some(_) => {
                errors.push(FieldError::new("duration", "must be greater than zero"));
                None
            }
            None => {
                errors.push(FieldError::new("duration", "is required"));
                None
            }
        };

        let calories_burned = match self.calories_burned {
            Some(burned) if burned >= 0 => Some(burned),
            Some(_) => {
                errors.push(FieldError::new("caloriesBurned", "must not be negative"));
                None
            }
            None => {
                errors.push(FieldError::new("caloriesBurned", "is required"));
                None
            }
        };

        match (name, duration, calories_burned) {
            (Some(name), Some(duration), Some(calories_burned)) => Ok(Workout {
                id,
                name,
                duration,
                calories_burned,
            }),
            _ => Err(errors),
        }
    }
}

/// Request body for a partial workout update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPatch {
    pub name: Option<String>,
    pub duration: Option<i64>,
    pub calories_burned: Option<i64>,
}

impl WorkoutPatch {
    /// True when no recognized field was supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.duration.is_none() && self.calories_burned.is_none()
    }

    /// Applies the patch to a workout, validating supplied fields first.
    pub fn apply(self, workout: &mut Workout) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                errors.push(FieldError::new("name", "must not be empty"));
            }
        }
        if let Some(duration) = self.duration {
            if duration <= 0 {
                errors.push(FieldError::new("duration", "must be greater than zero"));
            }
        }
        if let Some(burned) = self.calories_burned {
            if burned < 0 {
                errors.push(FieldError::new("caloriesBurned", "must not be negative"));
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        if let Some(name) = self.name {
            workout.name = name;
        }
        if let Some(duration) = self.duration {
            workout.duration = duration;
        }
        if let Some(burned) = self.calories_burned {
            workout.calories_burned = burned;
        }
        Ok(())
    }
}
