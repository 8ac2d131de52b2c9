//! Points, badges and streak bookkeeping.
//!
//! These are plain functions over [`UserProgress`] so the store can compose
//! them and tests can drive them with fixed dates.

use chrono::NaiveDate;

use crate::models::{Streak, UserProgress};

pub const PLAN_POINTS: i64 = 10;
pub const MEAL_LOG_POINTS: i64 = 5;
pub const HYDRATION_GOAL_POINTS: i64 = 5;
pub const STEP_GOAL_POINTS: i64 = 10;
pub const BADGE_BONUS_POINTS: i64 = 20;

pub const BADGE_HYDRATION_HERO: &str = "hydration_hero";
pub const BADGE_STEP_MASTER: &str = "step_master";

pub fn add_points(progress: &mut UserProgress, points: i64) {
    progress.points = progress.points.saturating_add(points);
}

/// Unlocks `id` and grants the badge bonus. Returns false (and changes
/// nothing) if the badge was already unlocked.
pub fn unlock_badge(progress: &mut UserProgress, id: &str) -> bool {
    if progress.has_badge(id) {
        return false;
    }
    progress.badges.push(id.to_string());
    add_points(progress, BADGE_BONUS_POINTS);
    true
}

/// Records a qualifying action on `today`.
pub fn update_streak(streak: &mut Streak, today: NaiveDate) {
    let yesterday = today.pred_opt();

    if streak.last_log_date.is_some() && streak.last_log_date == yesterday {
        streak.current += 1;
    } else if streak.last_log_date != Some(today) {
        streak.current = 1;
    }

    streak.longest = streak.longest.max(streak.current);
    streak.last_log_date = Some(today);
}

/// `value / target` as a percentage in 0..=100; 0 when the target is 0.
pub fn percentage(value: u32, target: u32) -> f64 {
    if target == 0 {
        return 0.0;
    }
    (f64::from(value) / f64::from(target) * 100.0).min(100.0)
}
