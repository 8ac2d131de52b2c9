use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::meal_category::MealCategory;

/// A meal logged on the fly, outside of any plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickMeal {
    /// Time-ordered (v7) so ids sort by logging time
    pub id: Uuid,
    pub name: String,
    pub category: MealCategory,
    pub calories: u32,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub photo: Option<String>,
}

/// What the caller supplies when logging a meal; id and timestamp are
/// assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct QuickMealInput {
    pub name: String,
    pub category: MealCategory,
    pub calories: u32,
    pub photo: Option<String>,
}

impl QuickMealInput {
    pub fn new(name: impl Into<String>, category: MealCategory, calories: u32) -> Self {
        Self {
            name: name.into(),
            category,
            calories,
            photo: None,
        }
    }

    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }
}

impl QuickMeal {
    pub fn from_input(input: QuickMealInput, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            category: input.category,
            calories: input.calories,
            timestamp: now,
            photo: input.photo,
        }
    }
}

impl fmt::Display for QuickMeal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:<10} {:<24} {} kcal",
            self.timestamp.format("%H:%M"),
            self.category,
            self.name,
            self.calories
        )
    }
}
