//! GraphQL schema and resolvers.
//!
//! Exposes read-only queries over the record store: `meals`, `workouts`,
//! `meal(id)`, `workout(id)`, and the derived `calorieSummary` aggregate.
//! The summary is recomputed on every query; nothing is cached.

use async_graphql::{Context, EmptyMutation, EmptySubscription, Object, Schema, SimpleObject, ID};
use axum::extract::State;

use crate::models;

use super::{AppState, SharedStore};

pub type FitSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Builds the schema with the shared store installed as context data.
pub fn build_schema(store: SharedStore) -> FitSchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(store)
        .finish()
}

/// Axum handler bridging `/graphql` requests into the schema.
pub async fn graphql_handler(
    State(state): State<AppState>,
    req: async_graphql_axum::GraphQLRequest,
) -> async_graphql_axum::GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

/// A meal as exposed over GraphQL. Ids are `ID` (strings on the wire).
#[derive(SimpleObject)]
struct Meal {
    id: ID,
    name: String,
    calories: i64,
}

impl From<&models::Meal> for Meal {
    fn from(meal: &models::Meal) -> Self {
        Self {
            id: ID(meal.id.to_string()),
            name: meal.name.clone(),
            calories: meal.calories,
        }
    }
}

/// A workout as exposed over GraphQL.
#[derive(SimpleObject)]
struct Workout {
    id: ID,
    name: String,
    duration: i64,
    calories_burned: i64,
}

impl From<&models::Workout> for Workout {
    fn from(workout: &models::Workout) -> Self {
        Self {
            id: ID(workout.id.to_string()),
            name: workout.name.clone(),
            duration: workout.duration,
            calories_burned: workout.calories_burned,
        }
    }
}

/// Running totals across both collections, computed at query time.
#[derive(SimpleObject)]
struct CalorieSummary {
    total_calories_eaten: i64,
    total_calories_burned: i64,
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn meals(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Meal>> {
        let store = ctx.data::<SharedStore>()?.read().await;
        Ok(store.meals().iter().map(Meal::from).collect())
    }

    async fn workouts(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Workout>> {
        let store = ctx.data::<SharedStore>()?.read().await;
        Ok(store.workouts().iter().map(Workout::from).collect())
    }

    /// Looks up a meal by id; unknown or unparsable ids resolve to null.
    async fn meal(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<Meal>> {
        let store = ctx.data::<SharedStore>()?.read().await;
        Ok(id
            .parse::<u64>()
            .ok()
            .and_then(|id| store.meal(id))
            .map(Meal::from))
    }

    /// Looks up a workout by id; unknown or unparsable ids resolve to null.
    async fn workout(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<Workout>> {
        let store = ctx.data::<SharedStore>()?.read().await;
        Ok(id
            .parse::<u64>()
            .ok()
            .and_then(|id| store.workout(id))
            .map(Workout::from))
    }

    async fn calorie_summary(&self, ctx: &Context<'_>) -> async_graphql::Result<CalorieSummary> {
        let store = ctx.data::<SharedStore>()?.read().await;
        Ok(CalorieSummary {
            total_calories_eaten: store.meals().iter().map(|m| m.calories).sum(),
            total_calories_burned: store.workouts().iter().map(|w| w.calories_burned).sum(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MealDraft, WorkoutDraft};
    use crate::store::RecordStore;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    fn schema_with(store: RecordStore) -> FitSchema {
        build_schema(Arc::new(RwLock::new(store)))
    }

    fn seeded_store() -> RecordStore {
        let mut store = RecordStore::in_memory();
        store
            .create_meal(MealDraft {
                name: Some("Eggs".to_string()),
                calories: Some(200),
            })
            .unwrap();
        store
            .create_meal(MealDraft {
                name: Some("Toast".to_string()),
                calories: Some(150),
            })
            .unwrap();
        store
            .create_workout(WorkoutDraft {
                name: Some("Run".to_string()),
                duration: Some(30),
                calories_burned: Some(300),
            })
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_calorie_summary_sums_both_collections() {
        let schema = schema_with(seeded_store());
        let response = schema
            .execute("{ calorieSummary { totalCaloriesEaten totalCaloriesBurned } }")
            .await;
        assert!(response.errors.is_empty());

        let data = response.data.into_json().unwrap();
        assert_eq!(data["calorieSummary"]["totalCaloriesEaten"], 350);
        assert_eq!(data["calorieSummary"]["totalCaloriesBurned"], 300);
    }

    #[tokio::test]
    async fn test_calorie_summary_reflects_mutations() {
        let store = Arc::new(RwLock::new(seeded_store()));
        let schema = build_schema(store.clone());

        let meal_id = store.read().await.meals()[0].id;
        store.write().await.delete_meal(meal_id).unwrap();

        let response = schema
            .execute("{ calorieSummary { totalCaloriesEaten } }")
            .await;
        let data = response.data.into_json().unwrap();
        assert_eq!(data["calorieSummary"]["totalCaloriesEaten"], 150);
    }

    #[tokio::test]
    async fn test_meals_query_lists_all() {
        let schema = schema_with(seeded_store());
        let response = schema.execute("{ meals { id name calories } }").await;
        assert!(response.errors.is_empty());

        let data = response.data.into_json().unwrap();
        let meals = data["meals"].as_array().unwrap();
        assert_eq!(meals.len(), 2);
        assert_eq!(meals[0]["name"], "Eggs");
        assert_eq!(meals[1]["name"], "Toast");
    }

    #[tokio::test]
    async fn test_meal_by_id() {
        let store = seeded_store();
        let id = store.meals()[0].id;
        let schema = schema_with(store);

        let query = format!(r#"{{ meal(id: "{}") {{ name calories }} }}"#, id);
        let response = schema.execute(&query).await;
        let data = response.data.into_json().unwrap();
        assert_eq!(data["meal"]["name"], "Eggs");
        assert_eq!(data["meal"]["calories"], 200);
    }

    #[tokio::test]
    async fn test_unknown_meal_resolves_to_null() {
        let schema = schema_with(seeded_store());
        let response = schema.execute(r#"{ meal(id: "999999") { name } }"#).await;
        assert!(response.errors.is_empty());

        let data = response.data.into_json().unwrap();
        assert!(data["meal"].is_null());
    }

    #[tokio::test]
    async fn test_workout_fields_are_camel_case() {
        let schema = schema_with(seeded_store());
        let response = schema
            .execute("{ workouts { name duration caloriesBurned } }")
            .await;
        assert!(response.errors.is_empty());

        let data = response.data.into_json().unwrap();
        assert_eq!(data["workouts"][0]["caloriesBurned"], 300);
    }
}
