//! Gamification state: points, badges, streaks, challenges and periodic goals.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::gamification::percentage;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Streak {
    pub current: u32,
    pub longest: u32,
    pub last_log_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub name: String,
    pub progress: u32,
    pub target: u32,
    #[serde(default)]
    pub completed: bool,
}

impl Challenge {
    pub fn new(id: impl Into<String>, name: impl Into<String>, target: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            progress: 0,
            target,
            completed: false,
        }
    }

    /// Adds `amount`, clamping at the target. Returns true when this call
    /// completed the challenge.
    pub fn advance(&mut self, amount: u32) -> bool {
        if self.completed {
            return false;
        }
        self.progress = self.progress.saturating_add(amount).min(self.target);
        self.completed = self.progress >= self.target;
        self.completed
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetPeriod {
    Daily,
    Monthly,
    #[default]
    #[serde(other)]
    Weekly,
}

impl ResetPeriod {
    /// Whether `today` falls in a later period than `last_reset`.
    pub fn is_due(&self, last_reset: NaiveDate, today: NaiveDate) -> bool {
        if today <= last_reset {
            return false;
        }
        match self {
            ResetPeriod::Daily => true,
            ResetPeriod::Weekly => today.iso_week() != last_reset.iso_week(),
            ResetPeriod::Monthly => {
                (today.year(), today.month()) != (last_reset.year(), last_reset.month())
            }
        }
    }
}

impl fmt::Display for ResetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResetPeriod::Daily => write!(f, "daily"),
            ResetPeriod::Weekly => write!(f, "weekly"),
            ResetPeriod::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for ResetPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(ResetPeriod::Daily),
            "weekly" => Ok(ResetPeriod::Weekly),
            "monthly" => Ok(ResetPeriod::Monthly),
            _ => Err(format!(
                "Invalid reset period '{}'. Valid options: daily, weekly, monthly",
                s
            )),
        }
    }
}

/// Counters used both for goal targets and for progress within a period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodCounters {
    pub meals_logged: u32,
    pub hydration_days: u32,
    pub active_days: u32,
}

impl PeriodCounters {
    pub fn total(&self) -> u32 {
        self.meals_logged + self.hydration_days + self.active_days
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodicTracking {
    pub reset_period: ResetPeriod,
    pub last_reset: Option<NaiveDate>,
    pub weekly_goals: PeriodCounters,
    pub current: PeriodCounters,
}

impl Default for PeriodicTracking {
    fn default() -> Self {
        Self {
            reset_period: ResetPeriod::default(),
            last_reset: None,
            weekly_goals: PeriodCounters {
                meals_logged: 21,
                hydration_days: 7,
                active_days: 5,
            },
            current: PeriodCounters::default(),
        }
    }
}

impl PeriodicTracking {
    /// Overall completion of the period goals, each counter capped at its goal.
    pub fn progress_percentage(&self) -> f64 {
        let goals = self.weekly_goals;
        let capped = self.current.meals_logged.min(goals.meals_logged)
            + self.current.hydration_days.min(goals.hydration_days)
            + self.current.active_days.min(goals.active_days);
        percentage(capped, goals.total())
    }

    pub fn is_due(&self, today: NaiveDate) -> bool {
        match self.last_reset {
            Some(last) => self.reset_period.is_due(last, today),
            None => false,
        }
    }

    pub fn reset(&mut self, today: NaiveDate) {
        self.current = PeriodCounters::default();
        self.last_reset = Some(today);
    }
}

pub const CHALLENGE_MEAL_LOGGER: &str = "meal_logger";
pub const CHALLENGE_HYDRATION_WEEK: &str = "hydration_week";
pub const CHALLENGE_STEP_WEEK: &str = "step_week";

fn default_challenges() -> Vec<Challenge> {
    vec![
        Challenge::new(CHALLENGE_MEAL_LOGGER, "Log 21 meals", 21),
        Challenge::new(CHALLENGE_HYDRATION_WEEK, "Reach your water goal 7 times", 7),
        Challenge::new(CHALLENGE_STEP_WEEK, "Reach your step goal 5 times", 5),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProgress {
    pub points: i64,
    /// Unlocked badge ids in unlock order, no duplicates
    pub badges: Vec<String>,
    pub streak: Streak,
    pub challenges: Vec<Challenge>,
    pub periodic: PeriodicTracking,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            points: 0,
            badges: Vec::new(),
            streak: Streak::default(),
            challenges: default_challenges(),
            periodic: PeriodicTracking::default(),
        }
    }
}

impl UserProgress {
    pub fn has_badge(&self, id: &str) -> bool {
        self.badges.iter().any(|b| b == id)
    }

    pub fn challenge(&self, id: &str) -> Option<&Challenge> {
        self.challenges.iter().find(|c| c.id == id)
    }

    pub fn challenge_mut(&mut self, id: &str) -> Option<&mut Challenge> {
        self.challenges.iter_mut().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_challenge_advance_clamps_and_completes() {
        let mut challenge = Challenge::new("c", "Test", 3);
        assert!(!challenge.advance(2));
        assert_eq!(challenge.progress, 2);

        assert!(challenge.advance(5));
        assert_eq!(challenge.progress, 3);
        assert!(challenge.completed);

        // Already complete
        assert!(!challenge.advance(1));
        assert_eq!(challenge.progress, 3);
    }

    #[test]
    fn test_weekly_reset_due_on_new_iso_week() {
        // 2026-10-18 is a Sunday, 2026-10-19 a Monday
        let period = ResetPeriod::Weekly;
        assert!(!period.is_due(date(2026, 10, 12), date(2026, 10, 18)));
        assert!(period.is_due(date(2026, 10, 18), date(2026, 10, 19)));
    }

    #[test]
    fn test_daily_and_monthly_reset() {
        assert!(ResetPeriod::Daily.is_due(date(2026, 1, 1), date(2026, 1, 2)));
        assert!(!ResetPeriod::Daily.is_due(date(2026, 1, 2), date(2026, 1, 2)));
        assert!(!ResetPeriod::Monthly.is_due(date(2026, 1, 1), date(2026, 1, 31)));
        assert!(ResetPeriod::Monthly.is_due(date(2026, 1, 31), date(2026, 2, 1)));
    }

    #[test]
    fn test_periodic_never_due_without_last_reset() {
        let periodic = PeriodicTracking::default();
        assert!(!periodic.is_due(date(2026, 1, 1)));
    }

    #[test]
    fn test_progress_percentage_caps_each_counter() {
        let mut periodic = PeriodicTracking::default();
        periodic.current = PeriodCounters {
            meals_logged: 100,
            hydration_days: 0,
            active_days: 0,
        };
        // 21 of 33 total
        let pct = periodic.progress_percentage();
        assert!((pct - 21.0 / 33.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_reset_zeroes_counters_and_stamps_date() {
        let mut periodic = PeriodicTracking::default();
        periodic.current.meals_logged = 4;
        periodic.reset(date(2026, 3, 3));
        assert_eq!(periodic.current, PeriodCounters::default());
        assert_eq!(periodic.last_reset, Some(date(2026, 3, 3)));
    }

    #[test]
    fn test_default_progress_has_challenges() {
        let progress = UserProgress::default();
        assert!(progress.challenge(CHALLENGE_MEAL_LOGGER).is_some());
        assert_eq!(progress.points, 0);
        assert!(!progress.has_badge("anything"));
    }
}
