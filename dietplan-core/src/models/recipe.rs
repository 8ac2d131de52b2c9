use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Maximum number of recipes kept in the history.
pub const MAX_RECIPE_HISTORY: usize = 20;

/// A recipe the user looked up or saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeEntry {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub calories: Option<u32>,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeInput {
    pub name: String,
    pub ingredients: Vec<String>,
    pub calories: Option<u32>,
}

impl RecipeInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ingredients: Vec::new(),
            calories: None,
        }
    }

    pub fn with_ingredients(mut self, ingredients: Vec<String>) -> Self {
        self.ingredients = ingredients;
        self
    }

    pub fn with_calories(mut self, calories: u32) -> Self {
        self.calories = Some(calories);
        self
    }
}

impl RecipeEntry {
    pub fn from_input(input: RecipeInput, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            ingredients: input.ingredients,
            calories: input.calories,
            saved_at: now,
        }
    }
}

/// Puts `entry` at the front, dropping an older entry with the same name
/// (case-insensitive) and trimming to [`MAX_RECIPE_HISTORY`].
pub fn push_recipe(history: &mut Vec<RecipeEntry>, entry: RecipeEntry) {
    let name_lower = entry.name.to_lowercase();
    history.retain(|r| r.name.to_lowercase() != name_lower);
    history.insert(0, entry);
    history.truncate(MAX_RECIPE_HISTORY);
}

impl fmt::Display for RecipeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(calories) = self.calories {
            write!(f, " ({} kcal)", calories)?;
        }
        if !self.ingredients.is_empty() {
            write!(f, ": {}", self.ingredients.join(", "))?;
        }
        Ok(())
    }
}
