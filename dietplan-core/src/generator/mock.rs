//! Template meal plans used when the generation service is unavailable.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{plan_name, GenerationError, PlanGenerator, PlanRequest};
use crate::calories;
use crate::models::{DietType, MealItem, MealPlan, NutritionalValues, UserMetrics, UserPreferences};

struct Template {
    breakfast: &'static [&'static str],
    lunch: &'static [&'static str],
    dinner: &'static [&'static str],
    snacks: &'static [&'static str],
}

const LOW_CARB: Template = Template {
    breakfast: &["Scrambled eggs with spinach", "Avocado slices", "Greek yogurt"],
    lunch: &["Grilled chicken salad", "Mixed greens", "Olive oil dressing"],
    dinner: &["Baked salmon", "Steamed broccoli", "Cauliflower rice"],
    snacks: &["Nuts and seeds", "Cheese cubes"],
};

const VEGETARIAN: Template = Template {
    breakfast: &["Oatmeal with berries", "Almond milk", "Chia seeds"],
    lunch: &["Quinoa bowl", "Black beans", "Roasted vegetables"],
    dinner: &["Lentil curry", "Brown rice", "Naan bread"],
    snacks: &["Hummus with vegetables", "Fruit smoothie"],
};

const KETO: Template = Template {
    breakfast: &["Bacon and eggs", "Avocado", "Bulletproof coffee"],
    lunch: &["Caesar salad with chicken", "Parmesan cheese", "Olive oil"],
    dinner: &["Ribeye steak", "Asparagus", "Butter sauce"],
    snacks: &["Macadamia nuts", "Cheese"],
};

const MEDITERRANEAN: Template = Template {
    breakfast: &["Greek yogurt with honey", "Walnuts", "Fresh berries"],
    lunch: &["Mediterranean bowl", "Chickpeas", "Feta cheese", "Olive oil"],
    dinner: &["Grilled fish", "Quinoa", "Roasted vegetables"],
    snacks: &["Olives", "Hummus with pita"],
};

fn template_for(diet: DietType) -> &'static Template {
    match diet {
        DietType::LowCarb => &LOW_CARB,
        DietType::Vegetarian => &VEGETARIAN,
        DietType::Keto => &KETO,
        _ => &MEDITERRANEAN,
    }
}

/// Share of calories from (protein, carbohydrates, fats).
fn macro_split(diet: DietType) -> (f64, f64, f64) {
    match diet {
        DietType::LowCarb => (0.30, 0.20, 0.50),
        _ => (0.25, 0.45, 0.30),
    }
}

fn meal(
    name: &str,
    items: &[&str],
    totals: NutritionalValues,
    share: f64,
    benefits: &str,
) -> MealItem {
    let part = |value: f64| (value * share).round();
    MealItem::new(name, items.iter().map(|s| s.to_string()).collect())
        .with_nutrition(NutritionalValues::new(
            part(totals.calories),
            part(totals.protein),
            part(totals.carbohydrates),
            part(totals.fats),
        ))
        .with_benefits(benefits)
}

/// Builds a four-meal template plan sized to the estimated calorie need.
pub fn mock_meal_plan(
    metrics: &UserMetrics,
    preferences: &UserPreferences,
    now: DateTime<Utc>,
) -> MealPlan {
    let calories = f64::from(calories::estimate_daily_calories(metrics));
    let (protein_share, carb_share, fat_share) = macro_split(preferences.diet_type);

    // 4 kcal per gram of protein or carbohydrate, 9 per gram of fat
    let totals = NutritionalValues::new(
        calories,
        (calories * protein_share / 4.0).round(),
        (calories * carb_share / 4.0).round(),
        (calories * fat_share / 9.0).round(),
    );

    let t = template_for(preferences.diet_type);
    let meals = vec![
        meal(
            "Breakfast",
            t.breakfast,
            totals,
            0.25,
            "Provides sustained energy and essential nutrients to start your day",
        ),
        meal(
            "Lunch",
            t.lunch,
            totals,
            0.35,
            "Balanced macronutrients to maintain energy levels throughout the afternoon",
        ),
        meal(
            "Dinner",
            t.dinner,
            totals,
            0.30,
            "Light yet satisfying meal to support recovery and prepare for rest",
        ),
        meal(
            "Snacks",
            t.snacks,
            totals,
            0.10,
            "Healthy snacks to maintain steady blood sugar and prevent overeating",
        ),
    ];

    MealPlan::new(meals, totals)
        .with_name(plan_name(preferences))
        .with_plan_id(format!("mock-plan-{}", now.timestamp_millis()))
        .with_timestamp(now)
}

/// Offline generator that always answers with [`mock_meal_plan`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MockPlanGenerator;

#[async_trait]
impl PlanGenerator for MockPlanGenerator {
    async fn generate(&self, request: &PlanRequest) -> Result<MealPlan, GenerationError> {
        Ok(mock_meal_plan(
            &request.metrics,
            &request.preferences,
            request.requested_at,
        ))
    }
}
