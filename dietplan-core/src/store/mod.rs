//! The application state store.
//!
//! [`AppStateStore`] owns every persisted slice of state. Reads borrow from
//! memory; each mutation updates memory synchronously and then queues a
//! write of the touched slices to the key-value store (see [`WriteQueue`]).
//!
//! Startup goes through [`AppStateStore::load`], which reads each slice once.
//! A slice that is missing or unreadable starts from its defaults without
//! affecting the others.

mod error;
mod transfer;
mod writer;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::calories;
use crate::clock::Clock;
use crate::gamification::{
    self, BADGE_HYDRATION_HERO, BADGE_STEP_MASTER, HYDRATION_GOAL_POINTS, MEAL_LOG_POINTS,
    PLAN_POINTS, STEP_GOAL_POINTS,
};
use crate::models::{
    push_recipe, AppSettings, Challenge, DailyTracking, MealPlan, PeriodicTracking, QuickMeal,
    QuickMealInput, RecipeEntry, RecipeInput, ResetPeriod, SettingsUpdate, UserInfo,
    UserInfoUpdate, UserProgress, CHALLENGE_HYDRATION_WEEK, CHALLENGE_MEAL_LOGGER,
    CHALLENGE_STEP_WEEK,
};
use crate::storage::{KeyValueStore, SliceKey};

pub use error::StoreError;
pub use writer::WriteQueue;

use transfer::{ExportBundle, ImportBundle};

/// Number of superseded plans kept in the history.
pub const MAX_PLAN_HISTORY: usize = 3;

/// Snapshot of every slice.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppState {
    pub user_info: UserInfo,
    pub current_plan: Option<MealPlan>,
    /// Most recently superseded first, at most [`MAX_PLAN_HISTORY`]
    pub plan_history: Vec<MealPlan>,
    pub progress: UserProgress,
    pub daily_tracking: DailyTracking,
    pub settings: AppSettings,
    /// Newest first
    pub quick_meals: Vec<QuickMeal>,
    pub recipe_history: Vec<RecipeEntry>,
    pub grocery_list: Vec<String>,
}

impl AppState {
    fn read(kv: &dyn KeyValueStore) -> Self {
        Self {
            user_info: read_slice(kv, SliceKey::UserInfo).unwrap_or_default(),
            current_plan: read_slice::<Option<MealPlan>>(kv, SliceKey::CurrentPlan).flatten(),
            plan_history: read_slice(kv, SliceKey::PlanHistory).unwrap_or_default(),
            progress: read_slice(kv, SliceKey::Progress).unwrap_or_default(),
            daily_tracking: read_slice(kv, SliceKey::DailyTracking).unwrap_or_default(),
            settings: read_slice(kv, SliceKey::Settings).unwrap_or_default(),
            quick_meals: read_slice(kv, SliceKey::QuickMeals).unwrap_or_default(),
            recipe_history: read_slice(kv, SliceKey::RecipeHistory).unwrap_or_default(),
            grocery_list: read_slice(kv, SliceKey::GroceryList).unwrap_or_default(),
        }
    }
}

/// Reads and parses one slice. Missing, unreadable and unparseable slices
/// all return `None`; the latter two are logged.
fn read_slice<T: DeserializeOwned>(kv: &dyn KeyValueStore, key: SliceKey) -> Option<T> {
    match kv.get(key.key()) {
        Ok(Some(text)) => match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Failed to parse slice {}, using defaults: {}", key, e);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("Failed to read slice {}, using defaults: {}", key, e);
            None
        }
    }
}

/// Single owner of all persisted application state.
pub struct AppStateStore {
    state: AppState,
    clock: Arc<dyn Clock>,
    writer: WriteQueue,
}

impl AppStateStore {
    /// Loads every slice from `kv` and starts the background writer.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn load(kv: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let reader = Arc::clone(&kv);
        let state = match tokio::task::spawn_blocking(move || AppState::read(reader.as_ref())).await
        {
            Ok(state) => state,
            Err(e) => {
                tracing::error!("Failed to load state, starting from defaults: {}", e);
                AppState::default()
            }
        };

        let mut store = Self {
            state,
            clock,
            writer: WriteQueue::spawn(kv),
        };

        store.roll_over_if_new_day();
        store.check_periodic_reset();

        tracing::info!(
            "Loaded state: {} plan(s) in history, {} quick meal(s), {} points",
            store.state.plan_history.len(),
            store.state.quick_meals.len(),
            store.state.progress.points
        );

        store
    }

    /// Waits until every write queued so far has reached the key-value store.
    pub async fn flush(&self) {
        self.writer.flush().await;
    }

    // ==================== Accessors ====================

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn snapshot(&self) -> AppState {
        self.state.clone()
    }

    pub fn user_info(&self) -> &UserInfo {
        &self.state.user_info
    }

    pub fn current_plan(&self) -> Option<&MealPlan> {
        self.state.current_plan.as_ref()
    }

    pub fn plan_history(&self) -> &[MealPlan] {
        &self.state.plan_history
    }

    pub fn progress(&self) -> &UserProgress {
        &self.state.progress
    }

    pub fn daily_tracking(&self) -> &DailyTracking {
        &self.state.daily_tracking
    }

    pub fn settings(&self) -> &AppSettings {
        &self.state.settings
    }

    pub fn quick_meals(&self) -> &[QuickMeal] {
        &self.state.quick_meals
    }

    pub fn recipe_history(&self) -> &[RecipeEntry] {
        &self.state.recipe_history
    }

    pub fn grocery_list(&self) -> &[String] {
        &self.state.grocery_list
    }

    pub fn hydration_percentage(&self) -> f64 {
        self.state.daily_tracking.hydration_percentage()
    }

    pub fn activity_percentage(&self) -> f64 {
        self.state.daily_tracking.activity_percentage()
    }

    pub fn weekly_progress_percentage(&self) -> f64 {
        self.state.progress.periodic.progress_percentage()
    }

    pub fn calories_logged_today(&self) -> u32 {
        self.state.daily_tracking.calories_logged()
    }

    pub fn estimated_calorie_need(&self) -> u32 {
        calories::estimate_daily_calories(&self.state.user_info.metrics())
    }

    // ==================== Profile & settings ====================

    pub fn update_user_info(&mut self, update: UserInfoUpdate) {
        update.apply_to(&mut self.state.user_info);
        self.persist(SliceKey::UserInfo);
    }

    /// Top-level merge: each provided block replaces the stored one.
    pub fn update_settings(&mut self, update: SettingsUpdate) {
        update.apply_to(&mut self.state.settings);
        self.persist(SliceKey::Settings);
    }

    // ==================== Meal plans ====================

    /// Installs `plan` as the current plan. The previous current plan moves
    /// to the front of the history, which is trimmed to [`MAX_PLAN_HISTORY`].
    pub fn set_new_meal_plan(&mut self, plan: MealPlan) {
        let now = self.clock.now();

        if let Some(previous) = self.state.current_plan.take() {
            let history = &mut self.state.plan_history;
            history.insert(0, previous.stamped(now));
            history.truncate(MAX_PLAN_HISTORY);
        }

        let plan = plan.stamped(now);
        tracing::info!("New current meal plan: {}", plan.display_name());
        self.state.current_plan = Some(plan);
        gamification::add_points(&mut self.state.progress, PLAN_POINTS);

        self.persist(SliceKey::CurrentPlan);
        self.persist(SliceKey::PlanHistory);
        self.persist(SliceKey::Progress);
    }

    pub fn meal_plan_from_history(&self, index: usize) -> Option<&MealPlan> {
        self.state.plan_history.get(index)
    }

    /// Makes the history entry at `index` current again. The entry leaves
    /// the history and the current plan takes its place at the front, so no
    /// plan appears twice. Awards no points. Returns `None` and changes
    /// nothing when `index` is out of range.
    pub fn restore_meal_plan_from_history(&mut self, index: usize) -> Option<&MealPlan> {
        if index >= self.state.plan_history.len() {
            return None;
        }
        let now = self.clock.now();
        let restored = self.state.plan_history.remove(index);

        if let Some(previous) = self.state.current_plan.take() {
            self.state.plan_history.insert(0, previous.stamped(now));
        }

        tracing::info!("Restored meal plan: {}", restored.display_name());
        self.state.current_plan = Some(restored);

        self.persist(SliceKey::CurrentPlan);
        self.persist(SliceKey::PlanHistory);
        self.state.current_plan.as_ref()
    }

    /// Drops the current plan and the history and removes both slices from
    /// storage. Storage failures are logged only.
    pub fn clear_all_meal_plans(&mut self) {
        self.state.current_plan = None;
        self.state.plan_history = Vec::new();
        self.writer.delete(SliceKey::CurrentPlan);
        self.writer.delete(SliceKey::PlanHistory);
    }

    // ==================== Daily tracking ====================

    /// Replaces a stale daily record with a fresh one for today. Returns true
    /// if a rollover happened.
    pub fn roll_over_if_new_day(&mut self) -> bool {
        let today = self.clock.today();
        if self.state.daily_tracking.date == today {
            return false;
        }
        tracing::debug!(
            "Daily tracking rolled over from {} to {}",
            self.state.daily_tracking.date,
            today
        );
        self.state.daily_tracking = self.state.daily_tracking.rolled_over(today);
        self.persist(SliceKey::DailyTracking);
        true
    }

    /// Logs a meal for today, awards points and updates the streak.
    pub fn log_quick_meal(&mut self, input: QuickMealInput) -> QuickMeal {
        self.roll_over_if_new_day();
        let today = self.clock.today();
        let meal = QuickMeal::from_input(input, self.clock.now());

        self.state.quick_meals.insert(0, meal.clone());
        self.state.daily_tracking.meals_logged.push(meal.clone());

        let progress = &mut self.state.progress;
        gamification::add_points(progress, MEAL_LOG_POINTS);
        gamification::update_streak(&mut progress.streak, today);
        progress.periodic.current.meals_logged += 1;
        if let Some(challenge) = progress.challenge_mut(CHALLENGE_MEAL_LOGGER) {
            challenge.advance(1);
        }

        self.persist(SliceKey::QuickMeals);
        self.persist(SliceKey::DailyTracking);
        self.persist(SliceKey::Progress);
        meal
    }

    /// Sets today's glass count. Reaching the target awards points and the
    /// hydration badge.
    pub fn update_hydration(&mut self, glasses: u32) {
        self.roll_over_if_new_day();

        let hydration = &mut self.state.daily_tracking.hydration;
        let was_met = hydration.goal_met();
        hydration.glasses = glasses;

        if hydration.goal_met() {
            let progress = &mut self.state.progress;
            if !was_met {
                progress.periodic.current.hydration_days += 1;
                if let Some(challenge) = progress.challenge_mut(CHALLENGE_HYDRATION_WEEK) {
                    challenge.advance(1);
                }
            }
            gamification::add_points(progress, HYDRATION_GOAL_POINTS);
            gamification::unlock_badge(progress, BADGE_HYDRATION_HERO);
            self.persist(SliceKey::Progress);
        }

        self.persist(SliceKey::DailyTracking);
    }

    /// Sets today's steps and active minutes. Reaching the step target awards
    /// points and the step badge.
    pub fn update_activity(&mut self, steps: u32, minutes: u32) {
        self.roll_over_if_new_day();

        let activity = &mut self.state.daily_tracking.activity;
        let was_met = activity.goal_met();
        activity.steps = steps;
        activity.minutes = minutes;

        if activity.goal_met() {
            let progress = &mut self.state.progress;
            if !was_met {
                progress.periodic.current.active_days += 1;
                if let Some(challenge) = progress.challenge_mut(CHALLENGE_STEP_WEEK) {
                    challenge.advance(1);
                }
            }
            gamification::add_points(progress, STEP_GOAL_POINTS);
            gamification::unlock_badge(progress, BADGE_STEP_MASTER);
            self.persist(SliceKey::Progress);
        }

        self.persist(SliceKey::DailyTracking);
    }

    pub fn set_mood(&mut self, mood: Option<String>) {
        self.roll_over_if_new_day();
        self.state.daily_tracking.mood = mood;
        self.persist(SliceKey::DailyTracking);
    }

    pub fn set_hydration_target(&mut self, glasses: u32) {
        self.roll_over_if_new_day();
        self.state.daily_tracking.hydration.target = glasses;
        self.persist(SliceKey::DailyTracking);
    }

    pub fn set_step_target(&mut self, steps: u32) {
        self.roll_over_if_new_day();
        self.state.daily_tracking.activity.target_steps = steps;
        self.persist(SliceKey::DailyTracking);
    }

    // ==================== Gamification ====================

    pub fn add_points(&mut self, points: i64) {
        gamification::add_points(&mut self.state.progress, points);
        self.persist(SliceKey::Progress);
    }

    /// Returns false if the badge was already unlocked.
    pub fn unlock_badge(&mut self, id: &str) -> bool {
        let unlocked = gamification::unlock_badge(&mut self.state.progress, id);
        if unlocked {
            tracing::info!("Badge unlocked: {}", id);
            self.persist(SliceKey::Progress);
        }
        unlocked
    }

    pub fn advance_challenge(&mut self, id: &str, amount: u32) -> Option<&Challenge> {
        let challenge = self.state.progress.challenge_mut(id)?;
        if challenge.advance(amount) {
            tracing::info!("Challenge completed: {}", id);
        }
        self.persist(SliceKey::Progress);
        self.state.progress.challenge(id)
    }

    pub fn set_reset_period(&mut self, period: ResetPeriod) {
        self.state.progress.periodic.reset_period = period;
        self.persist(SliceKey::Progress);
    }

    /// Zeroes today's counters and meal log. Points, badges and the streak
    /// are untouched.
    pub fn reset_daily_progress(&mut self) {
        let tracking = &mut self.state.daily_tracking;
        tracking.date = self.clock.today();
        tracking.hydration.glasses = 0;
        tracking.activity.steps = 0;
        tracking.activity.minutes = 0;
        tracking.meals_logged.clear();
        self.persist(SliceKey::DailyTracking);
    }

    /// Zeroes the current period counters. Points, badges and the streak are
    /// untouched.
    pub fn reset_weekly_progress(&mut self) {
        self.state.progress.periodic.reset(self.clock.today());
        self.persist(SliceKey::Progress);
    }

    /// Clears points, badges, streak and challenges. Period settings and
    /// goals are kept.
    pub fn reset_all_progress(&mut self) {
        let periodic = PeriodicTracking {
            current: Default::default(),
            last_reset: Some(self.clock.today()),
            ..self.state.progress.periodic
        };
        self.state.progress = UserProgress {
            periodic,
            ..Default::default()
        };
        self.persist(SliceKey::Progress);
    }

    fn check_periodic_reset(&mut self) {
        let today = self.clock.today();
        let periodic = &mut self.state.progress.periodic;
        if periodic.last_reset.is_none() || periodic.is_due(today) {
            tracing::debug!("Starting new {} tracking period", periodic.reset_period);
            periodic.reset(today);
            self.persist(SliceKey::Progress);
        }
    }

    // ==================== Grocery list & recipes ====================

    /// Adds items not already on the list. Returns how many were added.
    pub fn add_to_grocery_list<I, S>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut added = 0;
        for item in items {
            let item = item.into();
            if !self.state.grocery_list.contains(&item) {
                self.state.grocery_list.push(item);
                added += 1;
            }
        }
        if added > 0 {
            self.persist(SliceKey::GroceryList);
        }
        added
    }

    /// Removes exact matches. Returns true if something was removed.
    pub fn remove_from_grocery_list(&mut self, item: &str) -> bool {
        let len_before = self.state.grocery_list.len();
        self.state.grocery_list.retain(|i| i != item);
        let removed = self.state.grocery_list.len() != len_before;
        if removed {
            self.persist(SliceKey::GroceryList);
        }
        removed
    }

    pub fn add_recipe_to_history(&mut self, input: RecipeInput) -> RecipeEntry {
        let entry = RecipeEntry::from_input(input, self.clock.now());
        push_recipe(&mut self.state.recipe_history, entry.clone());
        self.persist(SliceKey::RecipeHistory);
        entry
    }

    pub fn clear_recipe_history(&mut self) {
        self.state.recipe_history = Vec::new();
        self.persist(SliceKey::RecipeHistory);
    }

    // ==================== Export / import ====================

    /// Serializes every slice plus an export timestamp as pretty JSON.
    pub fn export_data(&self) -> Result<String, StoreError> {
        let s = &self.state;
        let bundle = ExportBundle {
            user_info: &s.user_info,
            current_plan: &s.current_plan,
            plan_history: &s.plan_history,
            progress: &s.progress,
            daily_tracking: &s.daily_tracking,
            settings: &s.settings,
            quick_meals: &s.quick_meals,
            recipe_history: &s.recipe_history,
            grocery_list: &s.grocery_list,
            exported_at: self.clock.now(),
        };
        Ok(serde_json::to_string_pretty(&bundle)?)
    }

    /// Replaces every slice present in `text`. The whole text is parsed and
    /// validated before anything changes, so a failed import leaves the
    /// store untouched.
    pub fn import_data(&mut self, text: &str) -> Result<(), StoreError> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| StoreError::Import(format!("data is not valid JSON: {}", e)))?;
        if !value.is_object() {
            return Err(StoreError::Import(
                "expected a JSON object keyed by slice name".to_string(),
            ));
        }
        let bundle: ImportBundle = serde_json::from_value(value)
            .map_err(|e| StoreError::Import(format!("unexpected data shape: {}", e)))?;

        if let Some(exported_at) = bundle.exported_at {
            tracing::debug!("Importing data exported at {}", exported_at);
        }

        let mut touched = Vec::new();
        let s = &mut self.state;
        if let Some(user_info) = bundle.user_info {
            s.user_info = user_info;
            touched.push(SliceKey::UserInfo);
        }
        if let Some(current_plan) = bundle.current_plan {
            s.current_plan = current_plan;
            touched.push(SliceKey::CurrentPlan);
        }
        if let Some(plan_history) = bundle.plan_history {
            s.plan_history = plan_history;
            touched.push(SliceKey::PlanHistory);
        }
        if let Some(progress) = bundle.progress {
            s.progress = progress;
            touched.push(SliceKey::Progress);
        }
        if let Some(daily_tracking) = bundle.daily_tracking {
            s.daily_tracking = daily_tracking;
            touched.push(SliceKey::DailyTracking);
        }
        if let Some(settings) = bundle.settings {
            s.settings = settings;
            touched.push(SliceKey::Settings);
        }
        if let Some(quick_meals) = bundle.quick_meals {
            s.quick_meals = quick_meals;
            touched.push(SliceKey::QuickMeals);
        }
        if let Some(recipe_history) = bundle.recipe_history {
            s.recipe_history = recipe_history;
            touched.push(SliceKey::RecipeHistory);
        }
        if let Some(grocery_list) = bundle.grocery_list {
            s.grocery_list = grocery_list;
            touched.push(SliceKey::GroceryList);
        }

        for key in &touched {
            self.persist(*key);
        }
        tracing::info!("Imported {} slice(s)", touched.len());
        Ok(())
    }

    // ==================== Persistence ====================

    fn persist(&self, key: SliceKey) {
        let s = &self.state;
        let result = match key {
            SliceKey::UserInfo => serde_json::to_string(&s.user_info),
            SliceKey::CurrentPlan => match &s.current_plan {
                Some(plan) => serde_json::to_string(plan),
                None => {
                    self.writer.delete(key);
                    return;
                }
            },
            SliceKey::PlanHistory => serde_json::to_string(&s.plan_history),
            SliceKey::Progress => serde_json::to_string(&s.progress),
            SliceKey::DailyTracking => serde_json::to_string(&s.daily_tracking),
            SliceKey::Settings => serde_json::to_string(&s.settings),
            SliceKey::QuickMeals => serde_json::to_string(&s.quick_meals),
            SliceKey::RecipeHistory => serde_json::to_string(&s.recipe_history),
            SliceKey::GroceryList => serde_json::to_string(&s.grocery_list),
        };

        match result {
            Ok(text) => self.writer.set(key, text),
            Err(e) => tracing::warn!("Failed to serialize slice {}: {}", key, e),
        }
    }
}

#[cfg(test)]
mod tests;
