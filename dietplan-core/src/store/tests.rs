use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};

use super::*;
use crate::clock::FixedClock;
use crate::models::{
    MealCategory, MealItem, NotificationSettings, NutritionalValues, PrivacySettings,
};
use crate::storage::MemoryStore;

fn clock_at(y: i32, m: u32, d: u32) -> Arc<FixedClock> {
    Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
    ))
}

async fn fresh_store() -> (AppStateStore, Arc<MemoryStore>, Arc<FixedClock>) {
    let kv = Arc::new(MemoryStore::new());
    let clock = clock_at(2026, 10, 18);
    let store = AppStateStore::load(kv.clone(), clock.clone()).await;
    (store, kv, clock)
}

fn plan(name: &str) -> MealPlan {
    MealPlan::new(
        vec![MealItem::new("Lunch", vec!["Rice".to_string(), "Beans".to_string()])
            .with_nutrition(NutritionalValues::new(600.0, 25.0, 80.0, 15.0))],
        NutritionalValues::new(1800.0, 90.0, 200.0, 60.0),
    )
    .with_name(name)
}

fn meal(name: &str, calories: u32) -> QuickMealInput {
    QuickMealInput::new(name, MealCategory::Lunch, calories)
}

// ==================== Load ====================

#[tokio::test]
async fn test_fresh_store_has_defaults() {
    let (store, _kv, clock) = fresh_store().await;

    assert!(store.current_plan().is_none());
    assert!(store.plan_history().is_empty());
    assert_eq!(store.progress().points, 0);
    assert_eq!(store.daily_tracking().date, clock.today());
    assert_eq!(store.progress().periodic.last_reset, Some(clock.today()));
    assert_eq!(store.user_info(), &UserInfo::default());
}

#[tokio::test]
async fn test_state_survives_reload() {
    let (mut store, kv, clock) = fresh_store().await;
    store.set_new_meal_plan(plan("A"));
    store.log_quick_meal(meal("Soup", 300));
    store.add_to_grocery_list(["eggs", "milk"]);
    store.update_user_info(UserInfoUpdate {
        name: Some("Sam".to_string()),
        ..Default::default()
    });
    store.flush().await;

    let reloaded = AppStateStore::load(kv.clone(), clock.clone()).await;
    assert_eq!(reloaded.snapshot(), store.snapshot());
}

#[tokio::test]
async fn test_unparseable_slice_falls_back_alone() {
    let kv = Arc::new(MemoryStore::with_entries([
        (SliceKey::UserInfo.key(), "{not json"),
        (SliceKey::GroceryList.key(), r#"["eggs"]"#),
    ]));
    let store = AppStateStore::load(kv, clock_at(2026, 10, 18)).await;

    assert_eq!(store.user_info(), &UserInfo::default());
    assert_eq!(store.grocery_list(), ["eggs".to_string()]);
}

#[tokio::test]
async fn test_missing_fields_filled_from_defaults() {
    let kv = Arc::new(MemoryStore::with_entries([(
        SliceKey::Progress.key(),
        r#"{"points": 42}"#,
    )]));
    let store = AppStateStore::load(kv, clock_at(2026, 10, 18)).await;

    assert_eq!(store.progress().points, 42);
    assert!(store.progress().challenge(CHALLENGE_MEAL_LOGGER).is_some());
    assert_eq!(store.progress().streak.current, 0);
}

#[tokio::test]
async fn test_unknown_enum_values_keep_profile() {
    let kv = Arc::new(MemoryStore::with_entries([
        (
            SliceKey::UserInfo.key(),
            r#"{"name":"Ada","age":41,"preferences":{"goals":["better_sleep"]}}"#,
        ),
        (
            SliceKey::Settings.key(),
            r#"{"display":{"theme":"solarized","language":"fr"}}"#,
        ),
    ]));
    let store = AppStateStore::load(kv, clock_at(2026, 10, 18)).await;

    assert_eq!(store.user_info().name, "Ada");
    assert_eq!(store.user_info().age, 41);
    assert!(store.user_info().preferences.goals.is_empty());
    assert_eq!(store.settings().display.language, "fr");
}

#[tokio::test]
async fn test_stale_daily_tracking_reset_on_load() {
    let stale = r#"{
        "date": "2026-10-17",
        "hydration": {"glasses": 6, "target": 10},
        "activity": {"steps": 9000, "minutes": 50, "target_steps": 12000},
        "mood": "tired"
    }"#;
    let kv = Arc::new(MemoryStore::with_entries([(
        SliceKey::DailyTracking.key(),
        stale,
    )]));
    let store = AppStateStore::load(kv, clock_at(2026, 10, 18)).await;

    let tracking = store.daily_tracking();
    assert_eq!(tracking.date, NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
    assert_eq!(tracking.hydration.glasses, 0);
    assert_eq!(tracking.hydration.target, 10);
    assert_eq!(tracking.activity.steps, 0);
    assert_eq!(tracking.activity.target_steps, 12_000);
    assert!(tracking.mood.is_none());
}

#[tokio::test]
async fn test_same_day_tracking_kept_on_load() {
    let today = r#"{"date": "2026-10-18", "hydration": {"glasses": 3, "target": 8}}"#;
    let kv = Arc::new(MemoryStore::with_entries([(
        SliceKey::DailyTracking.key(),
        today,
    )]));
    let store = AppStateStore::load(kv, clock_at(2026, 10, 18)).await;
    assert_eq!(store.daily_tracking().hydration.glasses, 3);
}

#[tokio::test]
async fn test_elapsed_period_reset_on_load() {
    let progress = r#"{
        "points": 70,
        "periodic": {
            "reset_period": "weekly",
            "last_reset": "2026-10-05",
            "current": {"meals_logged": 9, "hydration_days": 2, "active_days": 1}
        }
    }"#;
    let kv = Arc::new(MemoryStore::with_entries([(SliceKey::Progress.key(), progress)]));
    let store = AppStateStore::load(kv, clock_at(2026, 10, 18)).await;

    let periodic = &store.progress().periodic;
    assert_eq!(periodic.current.meals_logged, 0);
    assert_eq!(
        periodic.last_reset,
        Some(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
    );
    assert_eq!(store.progress().points, 70);
}

// ==================== Meal plans ====================

#[tokio::test]
async fn test_first_plan_becomes_current_with_timestamp() {
    let (mut store, _kv, clock) = fresh_store().await;
    let input = plan("First");

    store.set_new_meal_plan(input.clone());

    let current = store.current_plan().unwrap();
    assert_eq!(current.timestamp, Some(clock.now()));
    assert_eq!(current, &input.with_timestamp(clock.now()));
    assert!(store.plan_history().is_empty());
    assert_eq!(store.progress().points, PLAN_POINTS);
}

#[tokio::test]
async fn test_promotion_moves_current_to_history() {
    let (mut store, _kv, _clock) = fresh_store().await;
    store.set_new_meal_plan(plan("A"));
    store.set_new_meal_plan(plan("B"));

    assert_eq!(store.current_plan().unwrap().display_name(), "B");
    assert_eq!(store.plan_history().len(), 1);
    assert_eq!(store.plan_history()[0].display_name(), "A");
}

#[tokio::test]
async fn test_history_is_bounded_and_most_recent_first() {
    let (mut store, _kv, _clock) = fresh_store().await;
    for name in ["P1", "P2", "P3", "P4", "P5"] {
        store.set_new_meal_plan(plan(name));
        assert!(store.plan_history().len() <= MAX_PLAN_HISTORY);
    }

    let names: Vec<_> = store
        .plan_history()
        .iter()
        .map(|p| p.display_name())
        .collect();
    assert_eq!(names, vec!["P4", "P3", "P2"]);
    assert_eq!(store.current_plan().unwrap().display_name(), "P5");
    assert!(store.plan_history().iter().all(|p| p.timestamp.is_some()));
}

#[tokio::test]
async fn test_existing_timestamp_preserved() {
    let (mut store, _kv, clock) = fresh_store().await;
    let earlier = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    store.set_new_meal_plan(plan("Old").with_timestamp(earlier));

    clock.advance_days(1);
    store.set_new_meal_plan(plan("New"));

    assert_eq!(store.plan_history()[0].timestamp, Some(earlier));
    assert_eq!(store.current_plan().unwrap().timestamp, Some(clock.now()));
}

#[tokio::test]
async fn test_history_lookup_out_of_range() {
    let (mut store, _kv, _clock) = fresh_store().await;
    store.set_new_meal_plan(plan("A"));
    store.set_new_meal_plan(plan("B"));

    assert_eq!(store.meal_plan_from_history(0).unwrap().display_name(), "A");
    assert!(store.meal_plan_from_history(1).is_none());
    assert!(store.meal_plan_from_history(usize::MAX).is_none());
}

#[tokio::test]
async fn test_restore_from_history_swaps_without_duplicates() {
    let (mut store, kv, _clock) = fresh_store().await;
    store.set_new_meal_plan(plan("A"));
    store.set_new_meal_plan(plan("B"));
    let points = store.progress().points;

    for _ in 0..3 {
        let restored = store
            .restore_meal_plan_from_history(0)
            .map(|p| p.display_name().to_string())
            .unwrap();
        assert_eq!(restored, store.current_plan().unwrap().display_name());
    }

    // Three swaps leave A current and B as the only history entry
    assert_eq!(store.current_plan().unwrap().display_name(), "A");
    let names: Vec<_> = store
        .plan_history()
        .iter()
        .map(|p| p.display_name())
        .collect();
    assert_eq!(names, vec!["B"]);
    assert_eq!(store.progress().points, points);

    store.flush().await;
    let reloaded = AppStateStore::load(kv, clock_at(2026, 10, 18)).await;
    assert_eq!(reloaded.current_plan().unwrap().display_name(), "A");
    assert_eq!(reloaded.plan_history().len(), 1);
}

#[tokio::test]
async fn test_restore_out_of_range_changes_nothing() {
    let (mut store, _kv, _clock) = fresh_store().await;
    store.set_new_meal_plan(plan("A"));

    assert!(store.restore_meal_plan_from_history(0).is_none());
    assert_eq!(store.current_plan().unwrap().display_name(), "A");
    assert!(store.plan_history().is_empty());
}

#[tokio::test]
async fn test_clear_all_meal_plans_deletes_slices() {
    let (mut store, kv, _clock) = fresh_store().await;
    store.set_new_meal_plan(plan("A"));
    store.set_new_meal_plan(plan("B"));
    store.flush().await;
    assert!(kv.get(SliceKey::CurrentPlan.key()).unwrap().is_some());

    store.clear_all_meal_plans();
    store.flush().await;

    assert!(store.current_plan().is_none());
    assert!(store.plan_history().is_empty());
    assert!(kv.get(SliceKey::CurrentPlan.key()).unwrap().is_none());
    assert!(kv.get(SliceKey::PlanHistory.key()).unwrap().is_none());
}

#[tokio::test]
async fn test_clear_succeeds_in_memory_when_storage_fails() {
    let (mut store, kv, _clock) = fresh_store().await;
    store.set_new_meal_plan(plan("A"));
    store.flush().await;

    kv.set_fail_writes(true);
    store.clear_all_meal_plans();
    store.flush().await;

    assert!(store.current_plan().is_none());
    // The durable copy is stale but the store keeps working
    assert!(kv.get(SliceKey::CurrentPlan.key()).unwrap().is_some());
    store.add_points(1);
    assert_eq!(store.progress().points, PLAN_POINTS + 1);
}

// ==================== Quick meals & streaks ====================

#[tokio::test]
async fn test_log_quick_meal() {
    let (mut store, _kv, clock) = fresh_store().await;

    let logged = store.log_quick_meal(meal("Salad", 350));

    assert_eq!(store.quick_meals()[0], logged);
    assert_eq!(store.daily_tracking().meals_logged, vec![logged.clone()]);
    assert_eq!(logged.timestamp, clock.now());
    assert_eq!(store.progress().points, MEAL_LOG_POINTS);
    assert_eq!(store.progress().streak.current, 1);
    assert_eq!(store.progress().streak.last_log_date, Some(clock.today()));
    assert_eq!(store.progress().periodic.current.meals_logged, 1);
    assert_eq!(
        store.progress().challenge(CHALLENGE_MEAL_LOGGER).unwrap().progress,
        1
    );
    assert_eq!(store.calories_logged_today(), 350);
}

#[tokio::test]
async fn test_quick_meals_newest_first() {
    let (mut store, _kv, _clock) = fresh_store().await;
    store.log_quick_meal(meal("First", 100));
    store.log_quick_meal(meal("Second", 200));

    assert_eq!(store.quick_meals()[0].name, "Second");
    assert_eq!(store.daily_tracking().meals_logged[0].name, "First");
}

#[tokio::test]
async fn test_streak_grows_daily_and_resets_after_gap() {
    let (mut store, _kv, clock) = fresh_store().await;

    store.log_quick_meal(meal("Day 1", 100));
    store.log_quick_meal(meal("Day 1 again", 100));
    assert_eq!(store.progress().streak.current, 1);

    clock.advance_days(1);
    store.log_quick_meal(meal("Day 2", 100));
    assert_eq!(store.progress().streak.current, 2);
    assert_eq!(store.progress().streak.longest, 2);

    clock.advance_days(2);
    store.log_quick_meal(meal("Day 4", 100));
    assert_eq!(store.progress().streak.current, 1);
    assert_eq!(store.progress().streak.longest, 2);
}

#[tokio::test]
async fn test_new_day_rolls_over_before_logging() {
    let (mut store, _kv, clock) = fresh_store().await;
    store.update_hydration(5);
    store.log_quick_meal(meal("Dinner", 700));

    clock.advance_days(1);
    store.log_quick_meal(meal("Breakfast", 300));

    let tracking = store.daily_tracking();
    assert_eq!(tracking.date, clock.today());
    assert_eq!(tracking.hydration.glasses, 0);
    assert_eq!(tracking.meals_logged.len(), 1);
    assert_eq!(store.quick_meals().len(), 2);
}

// ==================== Hydration & activity ====================

#[tokio::test]
async fn test_hydration_below_target_awards_nothing() {
    let (mut store, _kv, _clock) = fresh_store().await;
    let target = store.daily_tracking().hydration.target;

    store.update_hydration(target - 1);

    assert_eq!(store.progress().points, 0);
    assert!(!store.progress().has_badge(BADGE_HYDRATION_HERO));
}

#[tokio::test]
async fn test_hydration_at_target_awards_badge_and_bonus() {
    let (mut store, _kv, _clock) = fresh_store().await;
    let target = store.daily_tracking().hydration.target;

    store.update_hydration(target);

    assert!(store.progress().has_badge(BADGE_HYDRATION_HERO));
    assert_eq!(
        store.progress().points,
        HYDRATION_GOAL_POINTS + gamification::BADGE_BONUS_POINTS
    );
    assert_eq!(store.hydration_percentage(), 100.0);
    assert_eq!(store.progress().periodic.current.hydration_days, 1);
}

#[tokio::test]
async fn test_hydration_badge_not_duplicated() {
    let (mut store, _kv, _clock) = fresh_store().await;
    store.update_hydration(8);
    store.update_hydration(9);

    let badges: Vec<_> = store
        .progress()
        .badges
        .iter()
        .filter(|b| *b == BADGE_HYDRATION_HERO)
        .collect();
    assert_eq!(badges.len(), 1);
    assert_eq!(
        store.progress().points,
        2 * HYDRATION_GOAL_POINTS + gamification::BADGE_BONUS_POINTS
    );
    // Still one goal day
    assert_eq!(store.progress().periodic.current.hydration_days, 1);
}

#[tokio::test]
async fn test_activity_step_goal() {
    let (mut store, _kv, _clock) = fresh_store().await;

    store.update_activity(9_999, 40);
    assert_eq!(store.progress().points, 0);
    assert_eq!(store.daily_tracking().activity.minutes, 40);

    store.update_activity(10_000, 55);
    assert!(store.progress().has_badge(BADGE_STEP_MASTER));
    assert_eq!(
        store.progress().points,
        STEP_GOAL_POINTS + gamification::BADGE_BONUS_POINTS
    );
    assert_eq!(store.progress().periodic.current.active_days, 1);
    assert_eq!(
        store.progress().challenge(CHALLENGE_STEP_WEEK).unwrap().progress,
        1
    );
}

#[tokio::test]
async fn test_targets_survive_rollover() {
    let (mut store, _kv, clock) = fresh_store().await;
    store.set_hydration_target(12);
    store.set_step_target(6_000);
    store.set_mood(Some("great".to_string()));

    clock.advance_days(1);
    assert!(store.roll_over_if_new_day());

    assert_eq!(store.daily_tracking().hydration.target, 12);
    assert_eq!(store.daily_tracking().activity.target_steps, 6_000);
    assert!(store.daily_tracking().mood.is_none());
}

// ==================== Points, badges, resets ====================

#[tokio::test]
async fn test_unlock_badge_twice_single_bonus() {
    let (mut store, _kv, _clock) = fresh_store().await;
    assert!(store.unlock_badge("early_bird"));
    let after_first = store.snapshot().progress;

    assert!(!store.unlock_badge("early_bird"));
    assert_eq!(store.progress(), &after_first);
    assert_eq!(store.progress().points, gamification::BADGE_BONUS_POINTS);
}

#[tokio::test]
async fn test_add_points_negative() {
    let (mut store, _kv, _clock) = fresh_store().await;
    store.add_points(30);
    store.add_points(-12);
    assert_eq!(store.progress().points, 18);
}

#[tokio::test]
async fn test_advance_unknown_challenge() {
    let (mut store, _kv, _clock) = fresh_store().await;
    assert!(store.advance_challenge("nope", 1).is_none());

    let challenge = store.advance_challenge(CHALLENGE_STEP_WEEK, 10).unwrap();
    assert!(challenge.completed);
    assert_eq!(challenge.progress, challenge.target);
}

#[tokio::test]
async fn test_reset_daily_progress_keeps_gamification() {
    let (mut store, _kv, clock) = fresh_store().await;
    store.log_quick_meal(meal("Lunch", 500));
    store.update_hydration(8);
    store.update_activity(12_000, 60);
    let progress_before = store.snapshot().progress;

    store.reset_daily_progress();

    let tracking = store.daily_tracking();
    assert_eq!(tracking.date, clock.today());
    assert_eq!(tracking.hydration.glasses, 0);
    assert_eq!(tracking.activity.steps, 0);
    assert_eq!(tracking.activity.minutes, 0);
    assert!(tracking.meals_logged.is_empty());
    assert_eq!(store.progress(), &progress_before);
}

#[tokio::test]
async fn test_reset_weekly_progress_keeps_gamification() {
    let (mut store, _kv, clock) = fresh_store().await;
    store.log_quick_meal(meal("Lunch", 500));
    store.unlock_badge("starter");
    let before = store.snapshot().progress;

    clock.advance_days(3);
    store.reset_weekly_progress();

    let progress = store.progress();
    assert_eq!(progress.periodic.current.meals_logged, 0);
    assert_eq!(progress.periodic.last_reset, Some(clock.today()));
    assert_eq!(progress.points, before.points);
    assert_eq!(progress.badges, before.badges);
    assert_eq!(progress.streak, before.streak);
}

#[tokio::test]
async fn test_reset_all_progress() {
    let (mut store, _kv, _clock) = fresh_store().await;
    store.set_reset_period(ResetPeriod::Monthly);
    store.log_quick_meal(meal("Lunch", 500));
    store.unlock_badge("starter");

    store.reset_all_progress();

    let progress = store.progress();
    assert_eq!(progress.points, 0);
    assert!(progress.badges.is_empty());
    assert_eq!(progress.streak.current, 0);
    assert_eq!(progress.periodic.reset_period, ResetPeriod::Monthly);
}

// ==================== Grocery, recipes, settings, profile ====================

#[tokio::test]
async fn test_grocery_list_set_semantics() {
    let (mut store, _kv, _clock) = fresh_store().await;

    assert_eq!(store.add_to_grocery_list(["eggs", "milk", "eggs"]), 2);
    assert_eq!(store.add_to_grocery_list(vec!["milk".to_string()]), 0);
    assert_eq!(store.grocery_list(), ["eggs".to_string(), "milk".to_string()]);

    assert!(!store.remove_from_grocery_list("Eggs"));
    assert!(store.remove_from_grocery_list("eggs"));
    assert_eq!(store.grocery_list(), ["milk".to_string()]);
}

#[tokio::test]
async fn test_recipe_history() {
    let (mut store, _kv, _clock) = fresh_store().await;
    store.add_recipe_to_history(RecipeInput::new("Chili").with_calories(600));
    store.add_recipe_to_history(RecipeInput::new("Curry"));
    store.add_recipe_to_history(RecipeInput::new("chili"));

    let names: Vec<_> = store.recipe_history().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["chili", "Curry"]);

    store.clear_recipe_history();
    assert!(store.recipe_history().is_empty());
}

#[tokio::test]
async fn test_update_settings_is_shallow() {
    let (mut store, _kv, _clock) = fresh_store().await;
    let mut custom = NotificationSettings::default();
    custom.reminder_times.dinner = "20:15".to_string();
    store.update_settings(SettingsUpdate {
        notifications: Some(custom),
        ..Default::default()
    });

    store.update_settings(SettingsUpdate {
        notifications: Some(NotificationSettings {
            enabled: false,
            ..Default::default()
        }),
        privacy: Some(PrivacySettings {
            local_only: true,
            analytics: false,
        }),
        ..Default::default()
    });

    let settings = store.settings();
    assert!(!settings.notifications.enabled);
    assert_eq!(settings.notifications.reminder_times.dinner, "19:00");
    assert!(settings.privacy.local_only);
    assert_eq!(settings.display, Default::default());
}

#[tokio::test]
async fn test_update_user_info_and_calorie_need() {
    let (mut store, _kv, _clock) = fresh_store().await;
    store.update_user_info(UserInfoUpdate {
        age: Some(25),
        weight: Some(70.0),
        height: Some(175.0),
        gender: Some(crate::models::Gender::Male),
        activity_level: Some(crate::models::ActivityLevel::Moderate),
        ..Default::default()
    });

    assert_eq!(store.user_info().name, "User");
    assert_eq!(store.estimated_calorie_need(), 2594);
}

// ==================== Export / import ====================

#[tokio::test]
async fn test_export_import_roundtrip() {
    let (mut source, _kv, clock) = fresh_store().await;
    source.set_new_meal_plan(plan("A"));
    source.set_new_meal_plan(plan("B"));
    source.log_quick_meal(meal("Wrap", 450).with_photo("wrap.jpg"));
    source.update_hydration(8);
    source.add_to_grocery_list(["oats"]);
    source.add_recipe_to_history(RecipeInput::new("Stew"));
    source.update_user_info(UserInfoUpdate {
        email: Some("sam@example.com".to_string()),
        ..Default::default()
    });

    let exported = source.export_data().unwrap();
    assert!(exported.contains("exported_at"));

    let target_kv = Arc::new(MemoryStore::new());
    let mut target = AppStateStore::load(target_kv.clone(), clock.clone()).await;
    target.import_data(&exported).unwrap();

    assert_eq!(target.snapshot(), source.snapshot());

    // Imported slices are persisted too
    target.flush().await;
    let reloaded = AppStateStore::load(target_kv, clock).await;
    assert_eq!(reloaded.snapshot(), source.snapshot());
}

#[tokio::test]
async fn test_export_does_not_change_state() {
    let (mut store, _kv, _clock) = fresh_store().await;
    store.log_quick_meal(meal("Apple", 90));
    let before = store.snapshot();

    store.export_data().unwrap();
    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn test_import_invalid_json_changes_nothing() {
    let (mut store, _kv, _clock) = fresh_store().await;
    store.set_new_meal_plan(plan("Keep"));
    let before = store.snapshot();

    let err = store.import_data("not json").unwrap_err();
    assert!(matches!(err, StoreError::Import(_)));
    assert!(err.to_string().contains("not valid JSON"));
    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn test_import_non_object_rejected() {
    let (mut store, _kv, _clock) = fresh_store().await;
    let before = store.snapshot();

    assert!(store.import_data("[1, 2, 3]").is_err());
    assert!(store.import_data("42").is_err());
    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn test_import_bad_slice_changes_nothing() {
    let (mut store, _kv, _clock) = fresh_store().await;
    store.add_to_grocery_list(["eggs"]);
    let before = store.snapshot();

    // The first slice is fine, the second is malformed
    let text = r#"{"user_info": {"name": "Mallory"}, "progress": {"points": "lots"}}"#;
    assert!(store.import_data(text).is_err());
    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn test_import_partial_leaves_other_slices() {
    let (mut store, _kv, _clock) = fresh_store().await;
    store.set_new_meal_plan(plan("Keep"));
    store.add_to_grocery_list(["eggs"]);

    store
        .import_data(r#"{"grocery_list": ["kale", "tofu"]}"#)
        .unwrap();

    assert_eq!(
        store.grocery_list(),
        ["kale".to_string(), "tofu".to_string()]
    );
    assert_eq!(store.current_plan().unwrap().display_name(), "Keep");
    assert_eq!(store.progress().points, PLAN_POINTS);
}

#[tokio::test]
async fn test_import_null_current_plan_clears_it() {
    let (mut store, kv, _clock) = fresh_store().await;
    store.set_new_meal_plan(plan("Gone"));

    store.import_data(r#"{"current_plan": null}"#).unwrap();
    store.flush().await;

    assert!(store.current_plan().is_none());
    assert!(kv.get(SliceKey::CurrentPlan.key()).unwrap().is_none());
}
