//! Transport layer: axum REST routes and the GraphQL endpoint.
//!
//! Handlers here are thin adapters; all validation and persistence lives
//! in [`crate::store::RecordStore`]. The store sits behind an async
//! `RwLock` so each mutating request holds the write guard for the whole
//! operation, including the synchronous file write.

mod error;
mod graphql;
mod routes;

pub use graphql::{build_schema, FitSchema, QueryRoot};

use axum::routing::{get, post, put};
use axum::Router;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::store::RecordStore;

/// The record store as shared by all handlers.
pub type SharedStore = Arc<RwLock<RecordStore>>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub schema: FitSchema,
}

impl AppState {
    pub fn new(store: RecordStore) -> Self {
        let store = Arc::new(RwLock::new(store));
        let schema = graphql::build_schema(store.clone());
        Self { store, schema }
    }
}

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/meals", get(routes::list_meals))
        .route("/workouts", get(routes::list_workouts))
        .route("/submit/meal", post(routes::submit_meal))
        .route("/submit/workout", post(routes::submit_workout))
        .route(
            "/meal/{id}",
            put(routes::update_meal).delete(routes::delete_meal),
        )
        .route(
            "/workout/{id}",
            put(routes::update_workout).delete(routes::delete_workout),
        )
        .route("/graphql", post(graphql::graphql_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
