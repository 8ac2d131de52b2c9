//! Meal plan generation.
//!
//! Plans normally come from a remote service behind [`PlanGenerator`]. When
//! the service fails, [`generate_with_fallback`] logs the error and returns a
//! template plan from [`mock_meal_plan`] so the caller always gets a plan.

mod mock;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calories;
use crate::models::{MealPlan, UnitSystem, UserInfo, UserMetrics, UserPreferences};

pub use mock::{mock_meal_plan, MockPlanGenerator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    #[default]
    Daily,
    Weekly,
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanType::Daily => write!(f, "daily"),
            PlanType::Weekly => write!(f, "weekly"),
        }
    }
}

impl FromStr for PlanType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(PlanType::Daily),
            "weekly" => Ok(PlanType::Weekly),
            _ => Err(format!(
                "Invalid plan type '{}'. Valid options: daily, weekly",
                s
            )),
        }
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Meal plan service unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to fetch meal plan: {0} {1}")]
    Status(u16, String),

    #[error("Invalid meal plan response: {0}")]
    InvalidResponse(String),
}

/// Everything a generator needs to build a plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub metrics: UserMetrics,
    pub preferences: UserPreferences,
    pub prompt: String,
    pub plan_type: PlanType,
    pub requested_at: DateTime<Utc>,
}

impl PlanRequest {
    /// An empty `prompt` is replaced with a generic request for `plan_type`.
    pub fn new(
        metrics: UserMetrics,
        preferences: UserPreferences,
        prompt: &str,
        plan_type: PlanType,
        requested_at: DateTime<Utc>,
    ) -> Self {
        let prompt = if prompt.trim().is_empty() {
            format!("Generate a balanced {} meal plan", plan_type)
        } else {
            prompt.to_string()
        };
        Self {
            metrics,
            preferences,
            prompt,
            plan_type,
            requested_at,
        }
    }

    pub fn from_user(
        user: &UserInfo,
        prompt: &str,
        plan_type: PlanType,
        requested_at: DateTime<Utc>,
    ) -> Self {
        Self::new(
            user.metrics(),
            user.preferences.clone(),
            prompt,
            plan_type,
            requested_at,
        )
    }

    /// One-line body metrics description sent to the service.
    pub fn metrics_summary(&self) -> String {
        let m = &self.metrics;
        let (weight_unit, height_unit) = match m.unit {
            UnitSystem::Metric => ("kg", "cm"),
            UnitSystem::Imperial => ("lbs", "in"),
        };
        format!(
            "Age: {}, Weight: {}{}, Height: {}{}, Gender: {}, Activity Level: {}",
            m.age, m.weight, weight_unit, m.height, height_unit, m.gender, m.activity_level
        )
    }

    /// One-line preferences description, ending with the calorie target.
    pub fn preferences_summary(&self) -> String {
        let p = &self.preferences;
        let goals: Vec<&str> = p.goals.iter().map(|g| g.as_str()).collect();
        let mut summary = format!(
            "Goals: {}, Diet type: {}, Allergies: {}, Dislikes: {}, Meals per day: {}",
            goals.join(", "),
            p.diet_type,
            p.allergies.join(", "),
            p.dislikes.join(", "),
            p.meal_count
        );
        match p.calorie_target {
            Some(target) => summary.push_str(&format!(", Calorie target: {}", target)),
            None => summary.push_str(&format!(
                ", Approximate calorie target: {}",
                calories::estimate_daily_calories(&self.metrics)
            )),
        }
        summary
    }

    pub fn default_plan_name(&self) -> String {
        plan_name(&self.preferences)
    }
}

/// "<diet> <first goal> plan"
fn plan_name(preferences: &UserPreferences) -> String {
    match preferences.goals.first() {
        Some(goal) => format!("{} {} plan", preferences.diet_type, goal),
        None => format!("{} plan", preferences.diet_type),
    }
}

/// Source of meal plans, typically a remote AI service.
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    async fn generate(&self, request: &PlanRequest) -> Result<MealPlan, GenerationError>;
}

/// Asks `generator` for a plan and fills in the timestamp, id and name. Any
/// generation error is logged and answered with a template plan instead.
pub async fn generate_with_fallback<G>(generator: &G, request: &PlanRequest) -> MealPlan
where
    G: PlanGenerator + ?Sized,
{
    match generator.generate(request).await {
        Ok(plan) => finalize(plan, request),
        Err(e) => {
            tracing::warn!("Meal plan generation failed, using template plan: {}", e);
            mock_meal_plan(&request.metrics, &request.preferences, request.requested_at)
        }
    }
}

fn finalize(mut plan: MealPlan, request: &PlanRequest) -> MealPlan {
    let now = request.requested_at;
    plan.timestamp = Some(now);
    if plan.plan_id.is_none() {
        plan.plan_id = Some(format!("plan-{}", now.timestamp_millis()));
    }
    if plan.name.is_none() {
        plan.name = Some(request.default_plan_name());
    }
    plan
}
