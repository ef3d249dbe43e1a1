//! The record store shared by every transport handler.
//!
//! [`RecordStore`] owns the meal and workout collections, enforces field
//! validation, assigns identifiers, and persists mutations to the
//! configured backing medium. REST handlers and GraphQL resolvers both go
//! through it, so validation and persistence behave identically no matter
//! which transport a request arrived on.
//!
//! Ids come from a strictly monotonic per-collection counter seeded from
//! the current UNIX time in milliseconds, advanced past the largest id
//! found on load. Ids are never reused after deletion.

mod persistence;

pub use persistence::{PersistenceError, StorageMode};

use chrono::Utc;
use std::path::PathBuf;

use crate::models::{
    FieldError, Meal, MealDraft, MealPatch, Workout, WorkoutDraft, WorkoutPatch,
};
use persistence::Backend;

/// Discriminates the two record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Meal,
    Workout,
}

impl RecordKind {
    /// Returns the collection filename for this kind (file mode).
    pub fn filename(&self) -> &'static str {
        match self {
            RecordKind::Meal => "meals.json",
            RecordKind::Workout => "workouts.json",
        }
    }

    /// Human-readable singular label, as used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Meal => "Meal",
            RecordKind::Workout => "Workout",
        }
    }
}

/// Errors returned by store operations.
#[derive(Debug)]
pub enum StoreError {
    /// One or more fields failed validation.
    Validation(Vec<FieldError>),
    /// No record of the given kind with the given id.
    NotFound { kind: RecordKind, id: u64 },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Validation(errors) => {
                let details: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                write!(f, "Invalid input: {}", details.join(", "))
            }
            StoreError::NotFound { kind, id } => {
                write!(f, "{} not found with id {}", kind.label(), id)
            }
        }
    }
}

impl std::error::Error for StoreError {}

trait Record {
    fn id(&self) -> u64;
}

impl Record for Meal {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Record for Workout {
    fn id(&self) -> u64 {
        self.id
    }
}

/// An insertion-ordered collection with a monotonic id counter.
#[derive(Debug)]
struct Collection<T> {
    records: Vec<T>,
    next_id: u64,
}

impl<T: Record> Collection<T> {
    fn new(seed: u64) -> Self {
        Self {
            records: Vec::new(),
            next_id: seed,
        }
    }

    fn from_records(records: Vec<T>, seed: u64) -> Self {
        let mut collection = Self::new(seed);
        for record in records {
            collection.push(record);
        }
        collection
    }

    /// The id the next created record will receive.
    fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Appends a record, keeping the counter ahead of every stored id.
    fn push(&mut self, record: T) {
        self.next_id = self.next_id.max(record.id() + 1);
        self.records.push(record);
    }

    fn get(&self, id: u64) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    fn get_mut(&mut self, id: u64) -> Option<&mut T> {
        self.records.iter_mut().find(|r| r.id() == id)
    }

    fn remove(&mut self, id: u64) -> Option<T> {
        let index = self.records.iter().position(|r| r.id() == id)?;
        Some(self.records.remove(index))
    }
}

/// Owns the meal and workout collections and their persistence.
#[derive(Debug)]
pub struct RecordStore {
    backend: Backend,
    meals: Collection<Meal>,
    workouts: Collection<Workout>,
}

impl RecordStore {
    /// Creates a store with no durability; state is lost on drop.
    pub fn in_memory() -> Self {
        let seed = id_seed();
        Self {
            backend: Backend::Memory,
            meals: Collection::new(seed),
            workouts: Collection::new(seed),
        }
    }

    /// Opens a file-backed store, loading both collections from the data
    /// directory.
    ///
    /// A missing collection file yields an empty collection. A malformed
    /// file also yields an empty collection for that file only, with a
    /// logged warning; it never fails startup.
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        let backend = Backend::File {
            data_dir: data_dir.into(),
        };
        let seed = id_seed();

        let meals = load_or_empty(&backend, RecordKind::Meal, seed);
        let workouts = load_or_empty(&backend, RecordKind::Workout, seed);

        Self {
            backend,
            meals,
            workouts,
        }
    }

    // --- Meals ---

    /// All meals in insertion order.
    pub fn meals(&self) -> &[Meal] {
        &self.meals.records
    }

    pub fn meal(&self, id: u64) -> Option<&Meal> {
        self.meals.get(id)
    }

    /// Validates the draft, assigns a fresh id, appends, and persists.
    pub fn create_meal(&mut self, draft: MealDraft) -> Result<Meal, StoreError> {
        let meal = draft
            .build(self.meals.next_id())
            .map_err(StoreError::Validation)?;
        self.meals.push(meal.clone());
        self.persist(RecordKind::Meal);
        Ok(meal)
    }

    /// Applies a partial update to an existing meal and persists.
    ///
    /// Rejects a patch that supplies no recognized field.
    pub fn update_meal(&mut self, id: u64, patch: MealPatch) -> Result<Meal, StoreError> {
        if patch.is_empty() {
            return Err(StoreError::Validation(vec![FieldError::new(
                "body",
                "must supply at least one of: name, calories",
            )]));
        }
        let meal = self.meals.get_mut(id).ok_or(StoreError::NotFound {
            kind: RecordKind::Meal,
            id,
        })?;
        patch.apply(meal).map_err(StoreError::Validation)?;
        let updated = meal.clone();
        self.persist(RecordKind::Meal);
        Ok(updated)
    }

    /// Removes a meal by id and persists.
    pub fn delete_meal(&mut self, id: u64) -> Result<(), StoreError> {
        self.meals.remove(id).ok_or(StoreError::NotFound {
            kind: RecordKind::Meal,
            id,
        })?;
        self.persist(RecordKind::Meal);
        Ok(())
    }

    // --- Workouts ---

    /// All workouts in insertion order.
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts.records
    }

    pub fn workout(&self, id: u64) -> Option<&Workout> {
        self.workouts.get(id)
    }

    /// Validates the draft, assigns a fresh id, appends, and persists.
    pub fn create_workout(&mut self, draft: WorkoutDraft) -> Result<Workout, StoreError> {
        let workout = draft
            .build(self.workouts.next_id())
            .map_err(StoreError::Validation)?;
        self.workouts.push(workout.clone());
        self.persist(RecordKind::Workout);
        Ok(workout)
    }

    /// Applies a partial update to an existing workout and persists.
    pub fn update_workout(&mut self, id: u64, patch: WorkoutPatch) -> Result<Workout, StoreError> {
        if patch.is_empty() {
            return Err(StoreError::Validation(vec![FieldError::new(
                "body",
                "must supply at least one of: name, duration, caloriesBurned",
            )]));
        }
        let workout = self.workouts.get_mut(id).ok_or(StoreError::NotFound {
            kind: RecordKind::Workout,
            id,
        })?;
        patch.apply(workout).map_err(StoreError::Validation)?;
        let updated = workout.clone();
        self.persist(RecordKind::Workout);
        Ok(updated)
    }

    /// Removes a workout by id and persists.
    pub fn delete_workout(&mut self, id: u64) -> Result<(), StoreError> {
        self.workouts.remove(id).ok_or(StoreError::NotFound {
            kind: RecordKind::Workout,
            id,
        })?;
        self.persist(RecordKind::Workout);
        Ok(())
    }

    /// Writes the affected collection back to its file.
    ///
    /// A failed save is logged and the in-memory mutation stands; memory
    /// and disk can diverge until the next successful save.
    fn persist(&self, kind: RecordKind) {
        let result = match kind {
            RecordKind::Meal => self.backend.save(kind, &self.meals.records),
            RecordKind::Workout => self.backend.save(kind, &self.workouts.records),
        };
        if let Err(e) = result {
            tracing::warn!("Failed to save {} collection: {}", kind.label(), e);
        }
    }
}

fn id_seed() -> u64 {
    Utc::now().timestamp_millis() as u64
}

fn load_or_empty<T: Record + serde::de::DeserializeOwned>(
    backend: &Backend,
    kind: RecordKind,
    seed: u64,
) -> Collection<T> {
    match backend.load(kind) {
        Ok(records) => Collection::from_records(records, seed),
        Err(e) => {
            tracing::warn!(
                "Failed to load {} collection, starting empty: {}",
                kind.label(),
                e
            );
            Collection::new(seed)
        }
    }
}
