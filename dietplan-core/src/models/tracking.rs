//! Per-day hydration, activity and meal tracking.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::quick_meal::QuickMeal;
use crate::gamification::percentage;

pub const DEFAULT_TARGET_GLASSES: u32 = 8;
pub const DEFAULT_TARGET_STEPS: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hydration {
    pub glasses: u32,
    pub target: u32,
}

impl Default for Hydration {
    fn default() -> Self {
        Self {
            glasses: 0,
            target: DEFAULT_TARGET_GLASSES,
        }
    }
}

impl Hydration {
    pub fn goal_met(&self) -> bool {
        self.glasses >= self.target
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    pub steps: u32,
    pub minutes: u32,
    pub target_steps: u32,
}

impl Default for Activity {
    fn default() -> Self {
        Self {
            steps: 0,
            minutes: 0,
            target_steps: DEFAULT_TARGET_STEPS,
        }
    }
}

impl Activity {
    pub fn goal_met(&self) -> bool {
        self.steps >= self.target_steps
    }
}

/// Tracking record for a single calendar day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyTracking {
    pub date: NaiveDate,
    pub hydration: Hydration,
    pub activity: Activity,
    pub meals_logged: Vec<QuickMeal>,
    pub mood: Option<String>,
}

impl DailyTracking {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date,
            ..Default::default()
        }
    }

    /// A fresh record for `date` that keeps only the hydration and step targets.
    pub fn rolled_over(&self, date: NaiveDate) -> Self {
        Self {
            date,
            hydration: Hydration {
                target: self.hydration.target,
                ..Default::default()
            },
            activity: Activity {
                target_steps: self.activity.target_steps,
                ..Default::default()
            },
            meals_logged: Vec::new(),
            mood: None,
        }
    }

    pub fn hydration_percentage(&self) -> f64 {
        percentage(self.hydration.glasses, self.hydration.target)
    }

    pub fn activity_percentage(&self) -> f64 {
        percentage(self.activity.steps, self.activity.target_steps)
    }

    pub fn calories_logged(&self) -> u32 {
        self.meals_logged.iter().map(|m| m.calories).sum()
    }
}
