use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionalValues {
    pub calories: f64,
    /// Grams
    pub protein: f64,
    /// Grams
    pub carbohydrates: f64,
    /// Grams
    pub fats: f64,
}

impl NutritionalValues {
    pub fn new(calories: f64, protein: f64, carbohydrates: f64, fats: f64) -> Self {
        Self {
            calories,
            protein,
            carbohydrates,
            fats,
        }
    }
}

impl fmt::Display for NutritionalValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} kcal, {}g protein, {}g carbs, {}g fat",
            self.calories, self.protein, self.carbohydrates, self.fats
        )
    }
}

/// One meal within a plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MealItem {
    pub name: String,
    pub items: Vec<String>,
    pub nutritional_values: NutritionalValues,
    pub nutritional_benefits: String,
}

impl MealItem {
    pub fn new(name: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            name: name.into(),
            items,
            ..Default::default()
        }
    }

    pub fn with_nutrition(mut self, values: NutritionalValues) -> Self {
        self.nutritional_values = values;
        self
    }

    pub fn with_benefits(mut self, benefits: impl Into<String>) -> Self {
        self.nutritional_benefits = benefits.into();
        self
    }
}

/// Meals for a single day of a weekly plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayPlan {
    pub breakfast: Option<MealItem>,
    pub lunch: Option<MealItem>,
    pub dinner: Option<MealItem>,
    pub snacks: Vec<MealItem>,
}

/// A generated meal plan.
///
/// `timestamp` is optional on the wire but every plan installed as the
/// current plan is stamped (see [`MealPlan::stamped`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MealPlan {
    pub meals: Vec<MealItem>,
    pub daily_totals: NutritionalValues,
    /// Day name -> meals, only present for weekly plans
    pub weekly_plans: Option<BTreeMap<String, DayPlan>>,
    pub plan_id: Option<String>,
    pub name: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl MealPlan {
    pub fn new(meals: Vec<MealItem>, daily_totals: NutritionalValues) -> Self {
        Self {
            meals,
            daily_totals,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_plan_id(mut self, plan_id: impl Into<String>) -> Self {
        self.plan_id = Some(plan_id.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_weekly_plans(mut self, days: BTreeMap<String, DayPlan>) -> Self {
        self.weekly_plans = Some(days);
        self
    }

    /// Keeps an existing timestamp, otherwise stamps the plan with `now`.
    pub fn stamped(mut self, now: DateTime<Utc>) -> Self {
        self.timestamp.get_or_insert(now);
        self
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Untitled plan")
    }
}

impl fmt::Display for MealPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = self.display_name();
        writeln!(f, "{}", title)?;
        writeln!(f, "{}", "=".repeat(title.len()))?;
        if let Some(ts) = self.timestamp {
            writeln!(f, "Created: {}", ts.format("%Y-%m-%d %H:%M"))?;
        }
        writeln!(f, "Totals:  {}", self.daily_totals)?;

        for meal in &self.meals {
            writeln!(f, "\n{} ({} kcal)", meal.name, meal.nutritional_values.calories)?;
            for item in &meal.items {
                writeln!(f, "  - {}", item)?;
            }
        }

        if let Some(days) = &self.weekly_plans {
            writeln!(f, "\nWeekly breakdown: {} day(s)", days.len())?;
        }

        Ok(())
    }
}
