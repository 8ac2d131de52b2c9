//! User profile, body metrics and dietary preferences.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    #[serde(other)]
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
            Gender::Other => write!(f, "other"),
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(format!(
                "Invalid gender '{}'. Valid options: male, female, other",
                s
            )),
        }
    }
}

/// Measurement system used for weight (kg / lbs) and height (cm / in).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    Imperial,
    #[default]
    #[serde(other)]
    Metric,
}

impl UnitSystem {
    pub fn weight_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "kg",
            UnitSystem::Imperial => "lbs",
        }
    }

    pub fn height_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "cm",
            UnitSystem::Imperial => "in",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Metric => write!(f, "metric"),
            UnitSystem::Imperial => write!(f, "imperial"),
        }
    }
}

impl FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            _ => Err(format!(
                "Invalid unit system '{}'. Valid options: metric, imperial",
                s
            )),
        }
    }
}

/// How active the user is during a typical week.
///
/// Values written by newer clients that this build does not know about
/// deserialize to `Unknown` instead of failing the whole profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    #[default]
    Moderate,
    Active,
    VeryActive,
    #[serde(other)]
    Unknown,
}

impl ActivityLevel {
    /// Multiplier applied to the basal metabolic rate.
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
            ActivityLevel::Unknown => 1.55,
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityLevel::Sedentary => write!(f, "sedentary"),
            ActivityLevel::Light => write!(f, "light"),
            ActivityLevel::Moderate => write!(f, "moderate"),
            ActivityLevel::Active => write!(f, "active"),
            ActivityLevel::VeryActive => write!(f, "very_active"),
            ActivityLevel::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            "very_active" => Ok(ActivityLevel::VeryActive),
            _ => Err(format!(
                "Invalid activity level '{}'. Valid options: sedentary, light, moderate, active, very_active",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietGoal {
    WeightLoss,
    Maintenance,
    MuscleGain,
    GeneralHealth,
    Energy,
    Digestion,
    ImmuneSupport,
}

impl DietGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            DietGoal::WeightLoss => "weight_loss",
            DietGoal::Maintenance => "maintenance",
            DietGoal::MuscleGain => "muscle_gain",
            DietGoal::GeneralHealth => "general_health",
            DietGoal::Energy => "energy",
            DietGoal::Digestion => "digestion",
            DietGoal::ImmuneSupport => "immune_support",
        }
    }
}

impl fmt::Display for DietGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DietGoal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "weight_loss" => Ok(DietGoal::WeightLoss),
            "maintenance" => Ok(DietGoal::Maintenance),
            "muscle_gain" => Ok(DietGoal::MuscleGain),
            "general_health" => Ok(DietGoal::GeneralHealth),
            "energy" => Ok(DietGoal::Energy),
            "digestion" => Ok(DietGoal::Digestion),
            "immune_support" => Ok(DietGoal::ImmuneSupport),
            _ => Err(format!("Invalid diet goal '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietType {
    Vegetarian,
    Vegan,
    Pescatarian,
    Keto,
    Paleo,
    Mediterranean,
    LowCarb,
    GlutenFree,
    DairyFree,
    #[default]
    #[serde(other)]
    Omnivore,
}

impl DietType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DietType::Omnivore => "omnivore",
            DietType::Vegetarian => "vegetarian",
            DietType::Vegan => "vegan",
            DietType::Pescatarian => "pescatarian",
            DietType::Keto => "keto",
            DietType::Paleo => "paleo",
            DietType::Mediterranean => "mediterranean",
            DietType::LowCarb => "low_carb",
            DietType::GlutenFree => "gluten_free",
            DietType::DairyFree => "dairy_free",
        }
    }
}

impl fmt::Display for DietType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DietType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "omnivore" => Ok(DietType::Omnivore),
            "vegetarian" => Ok(DietType::Vegetarian),
            "vegan" => Ok(DietType::Vegan),
            "pescatarian" => Ok(DietType::Pescatarian),
            "keto" => Ok(DietType::Keto),
            "paleo" => Ok(DietType::Paleo),
            "mediterranean" => Ok(DietType::Mediterranean),
            "low_carb" => Ok(DietType::LowCarb),
            "gluten_free" => Ok(DietType::GlutenFree),
            "dairy_free" => Ok(DietType::DairyFree),
            _ => Err(format!("Invalid diet type '{}'", s)),
        }
    }
}

/// The inputs needed for calorie estimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserMetrics {
    pub age: u32,
    /// Kilograms or pounds depending on `unit`
    pub weight: f64,
    /// Centimetres or inches depending on `unit`
    pub height: f64,
    pub gender: Gender,
    pub unit: UnitSystem,
    pub activity_level: ActivityLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    #[serde(deserialize_with = "known_goals")]
    pub goals: Vec<DietGoal>,
    pub diet_type: DietType,
    pub allergies: Vec<String>,
    pub dislikes: Vec<String>,
    /// Meals per day
    pub meal_count: u32,
    pub calorie_target: Option<u32>,
}

/// Goals this build does not recognise are dropped rather than failing the
/// whole profile.
fn known_goals<'de, D>(deserializer: D) -> Result<Vec<DietGoal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(raw.iter().filter_map(|goal| goal.parse().ok()).collect())
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            goals: vec![DietGoal::GeneralHealth],
            diet_type: DietType::default(),
            allergies: Vec::new(),
            dislikes: Vec::new(),
            meal_count: 3,
            calorie_target: None,
        }
    }
}

/// Editable user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInfo {
    pub name: String,
    pub email: Option<String>,
    pub age: u32,
    pub weight: f64,
    pub height: f64,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub unit_system: UnitSystem,
    pub preferences: UserPreferences,
}

impl Default for UserInfo {
    fn default() -> Self {
        Self {
            name: "User".to_string(),
            email: None,
            age: 30,
            weight: 70.0,
            height: 170.0,
            gender: Gender::default(),
            activity_level: ActivityLevel::default(),
            unit_system: UnitSystem::default(),
            preferences: UserPreferences::default(),
        }
    }
}

impl UserInfo {
    pub fn metrics(&self) -> UserMetrics {
        UserMetrics {
            age: self.age,
            weight: self.weight,
            height: self.height,
            gender: self.gender,
            unit: self.unit_system,
            activity_level: self.activity_level,
        }
    }
}

/// Partial update for [`UserInfo`]. Only the fields that are `Some` change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInfoUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub gender: Option<Gender>,
    pub activity_level: Option<ActivityLevel>,
    pub unit_system: Option<UnitSystem>,
    pub preferences: Option<UserPreferences>,
}

impl UserInfoUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(self, info: &mut UserInfo) {
        if let Some(name) = self.name {
            info.name = name;
        }
        if let Some(email) = self.email {
            info.email = Some(email);
        }
        if let Some(age) = self.age {
            info.age = age;
        }
        if let Some(weight) = self.weight {
            info.weight = weight;
        }
        if let Some(height) = self.height {
            info.height = height;
        }
        if let Some(gender) = self.gender {
            info.gender = gender;
        }
        if let Some(level) = self.activity_level {
            info.activity_level = level;
        }
        if let Some(unit) = self.unit_system {
            info.unit_system = unit;
        }
        if let Some(preferences) = self.preferences {
            info.preferences = preferences;
        }
    }
}

impl fmt::Display for UserInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.len()))?;
        if let Some(email) = &self.email {
            writeln!(f, "Email:    {}", email)?;
        }
        writeln!(f, "Age:      {}", self.age)?;
        writeln!(
            f,
            "Weight:   {}{}",
            self.weight,
            self.unit_system.weight_unit()
        )?;
        writeln!(
            f,
            "Height:   {}{}",
            self.height,
            self.unit_system.height_unit()
        )?;
        writeln!(f, "Gender:   {}", self.gender)?;
        writeln!(f, "Activity: {}", self.activity_level)?;
        writeln!(f, "Diet:     {}", self.preferences.diet_type)?;
        Ok(())
    }
}
