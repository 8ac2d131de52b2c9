//! Diet Planner Core Library
//!
//! Application state for the diet planner: profile, meal plans and their
//! bounded history, daily tracking, points and badges, settings, grocery list
//! and recipe history. Everything is owned by [`AppStateStore`] and persisted
//! slice by slice through a [`KeyValueStore`].

pub mod calories;
pub mod clock;
pub mod gamification;
pub mod generator;
pub mod models;
pub mod storage;
pub mod store;

pub use calories::{basal_metabolic_rate, estimate_daily_calories};
pub use clock::{Clock, FixedClock, SystemClock};
pub use generator::{
    generate_with_fallback, mock_meal_plan, GenerationError, MockPlanGenerator, PlanGenerator,
    PlanRequest, PlanType,
};
pub use models::{
    AppSettings, DailyTracking, MealCategory, MealItem, MealPlan, NutritionalValues, QuickMeal,
    QuickMealInput, RecipeEntry, RecipeInput, SettingsUpdate, UserInfo, UserInfoUpdate,
    UserProgress,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, SliceKey, StorageError};
pub use store::{AppState, AppStateStore, StoreError, MAX_PLAN_HISTORY};

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
