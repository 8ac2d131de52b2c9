use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealCategory {
    Breakfast,
    Lunch,
    Dinner,
    #[default]
    #[serde(other)]
    Snack,
}

impl fmt::Display for MealCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealCategory::Breakfast => write!(f, "breakfast"),
            MealCategory::Lunch => write!(f, "lunch"),
            MealCategory::Dinner => write!(f, "dinner"),
            MealCategory::Snack => write!(f, "snack"),
        }
    }
}

impl FromStr for MealCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakfast" => Ok(MealCategory::Breakfast),
            "lunch" => Ok(MealCategory::Lunch),
            "dinner" => Ok(MealCategory::Dinner),
            "snack" | "snacks" => Ok(MealCategory::Snack),
            _ => Err(format!(
                "Invalid meal category '{}'. Valid options: breakfast, lunch, dinner, snack",
                s
            )),
        }
    }
}
