//! Daily calorie need estimation (Mifflin-St Jeor).

use crate::models::{Gender, UnitSystem, UserMetrics};

const KG_PER_LB: f64 = 0.453592;
const CM_PER_IN: f64 = 2.54;

/// Basal metabolic rate in kcal/day.
pub fn basal_metabolic_rate(metrics: &UserMetrics) -> f64 {
    let (weight_kg, height_cm) = match metrics.unit {
        UnitSystem::Metric => (metrics.weight, metrics.height),
        UnitSystem::Imperial => (metrics.weight * KG_PER_LB, metrics.height * CM_PER_IN),
    };

    let sex_offset = match metrics.gender {
        Gender::Male => 5.0,
        Gender::Female | Gender::Other => -161.0,
    };

    10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(metrics.age) + sex_offset
}

/// Estimated daily calorie need, rounded to the nearest kcal.
pub fn estimate_daily_calories(metrics: &UserMetrics) -> u32 {
    let total = basal_metabolic_rate(metrics) * metrics.activity_level.multiplier();
    total.round().max(0.0) as u32
}
