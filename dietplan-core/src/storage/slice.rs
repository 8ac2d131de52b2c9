//! Named state slices and their storage keys.

use std::fmt;

/// Each independently persisted part of the application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SliceKey {
    UserInfo,
    CurrentPlan,
    PlanHistory,
    Progress,
    DailyTracking,
    Settings,
    QuickMeals,
    RecipeHistory,
    GroceryList,
}

impl SliceKey {
    pub const ALL: [SliceKey; 9] = [
        SliceKey::UserInfo,
        SliceKey::CurrentPlan,
        SliceKey::PlanHistory,
        SliceKey::Progress,
        SliceKey::DailyTracking,
        SliceKey::Settings,
        SliceKey::QuickMeals,
        SliceKey::RecipeHistory,
        SliceKey::GroceryList,
    ];

    /// Returns the key used in the key-value store.
    pub fn key(&self) -> &'static str {
        match self {
            SliceKey::UserInfo => "ai_diet_planner_user_info",
            SliceKey::CurrentPlan => "ai_diet_planner_current_plan",
            SliceKey::PlanHistory => "ai_diet_planner_plan_history",
            SliceKey::Progress => "ai_diet_planner_progress",
            SliceKey::DailyTracking => "ai_diet_planner_daily_tracking",
            SliceKey::Settings => "ai_diet_planner_settings",
            SliceKey::QuickMeals => "ai_diet_planner_quick_meals",
            SliceKey::RecipeHistory => "ai_diet_planner_recipe_history",
            SliceKey::GroceryList => "ai_diet_planner_grocery_list",
        }
    }
}

impl fmt::Display for SliceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
