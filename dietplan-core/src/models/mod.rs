mod meal_category;
mod meal_plan;
mod progress;
mod quick_meal;
mod recipe;
mod settings;
mod tracking;
mod user;

pub use meal_category::MealCategory;
pub use meal_plan::{DayPlan, MealItem, MealPlan, NutritionalValues};
pub use progress::{
    Challenge, PeriodCounters, PeriodicTracking, ResetPeriod, Streak, UserProgress,
    CHALLENGE_HYDRATION_WEEK, CHALLENGE_MEAL_LOGGER, CHALLENGE_STEP_WEEK,
};
pub use quick_meal::{QuickMeal, QuickMealInput};
pub use recipe::{push_recipe, RecipeEntry, RecipeInput, MAX_RECIPE_HISTORY};
pub use settings::{
    AppSettings, DisplaySettings, NotificationSettings, PrivacySettings, ReminderTimes,
    SettingsUpdate, Theme,
};
pub use tracking::{
    Activity, DailyTracking, Hydration, DEFAULT_TARGET_GLASSES, DEFAULT_TARGET_STEPS,
};
pub use user::{
    ActivityLevel, DietGoal, DietType, Gender, UnitSystem, UserInfo, UserInfoUpdate,
    UserMetrics, UserPreferences,
};
