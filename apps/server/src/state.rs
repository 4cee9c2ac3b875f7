//! Application state.

use std::sync::Arc;

use meal_store::MealStore;

use crate::config::Config;

/// Shared application state.
///
/// The store is injected here rather than held as a module-level
/// singleton, so tests can run the full router against an in-memory
/// store.
pub struct AppState<S: MealStore> {
    /// Server configuration.
    pub config: Config,
    /// Meal store.
    pub store: S,
}

impl<S: MealStore> AppState<S> {
    /// Creates new application state.
    pub fn new(config: Config, store: S) -> Self {
        Self { config, store }
    }
}

/// Type alias for shared state.
pub type SharedState<S> = Arc<AppState<S>>;

/// Creates shared state from config and store.
pub fn create_shared_state<S: MealStore>(config: Config, store: S) -> SharedState<S> {
    Arc::new(AppState::new(config, store))
}
