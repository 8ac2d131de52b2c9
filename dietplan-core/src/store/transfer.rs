//! Export/import bundle formats.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{
    AppSettings, DailyTracking, MealPlan, QuickMeal, RecipeEntry, UserInfo, UserProgress,
};

/// Borrowed view of every slice, written by `export_data`.
#[derive(Debug, Serialize)]
pub(crate) struct ExportBundle<'a> {
    pub user_info: &'a UserInfo,
    pub current_plan: &'a Option<MealPlan>,
    pub plan_history: &'a [MealPlan],
    pub progress: &'a UserProgress,
    pub daily_tracking: &'a DailyTracking,
    pub settings: &'a AppSettings,
    pub quick_meals: &'a [QuickMeal],
    pub recipe_history: &'a [RecipeEntry],
    pub grocery_list: &'a [String],
    pub exported_at: DateTime<Utc>,
}

/// Parsed import file. A `None` field means the key was absent and the
/// slice stays as it is.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ImportBundle {
    pub user_info: Option<UserInfo>,
    /// Outer `None`: key absent. `Some(None)`: explicit `null`, clears the plan.
    #[serde(deserialize_with = "present")]
    pub current_plan: Option<Option<MealPlan>>,
    pub plan_history: Option<Vec<MealPlan>>,
    pub progress: Option<UserProgress>,
    pub daily_tracking: Option<DailyTracking>,
    pub settings: Option<AppSettings>,
    pub quick_meals: Option<Vec<QuickMeal>>,
    pub recipe_history: Option<Vec<RecipeEntry>>,
    pub grocery_list: Option<Vec<String>>,
    pub exported_at: Option<DateTime<Utc>>,
}

/// Distinguishes a present-but-null field from an absent one.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
