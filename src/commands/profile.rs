use clap::{Args, Subcommand};

use super::OutputFormat;
use dietplan_core::models::{
    ActivityLevel, DietGoal, DietType, Gender, UnitSystem, UserPreferences,
};
use dietplan_core::{AppStateStore, UserInfoUpdate};

#[derive(Args)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand)]
pub enum ProfileSubcommand {
    /// Show the current profile
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Update profile fields; omitted fields are left unchanged
    Set(ProfileFields),

    /// Show estimated daily calorie need
    Calories,
}

#[derive(Args, Default)]
pub struct ProfileFields {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    age: Option<u32>,

    /// Weight in kg (metric) or lbs (imperial)
    #[arg(long)]
    weight: Option<f64>,

    /// Height in cm (metric) or inches (imperial)
    #[arg(long)]
    height: Option<f64>,

    /// male, female, other
    #[arg(long, value_parser = str::parse::<Gender>)]
    gender: Option<Gender>,

    /// sedentary, light, moderate, active, very_active
    #[arg(long, value_parser = str::parse::<ActivityLevel>)]
    activity: Option<ActivityLevel>,

    /// metric or imperial
    #[arg(long, value_parser = str::parse::<UnitSystem>)]
    units: Option<UnitSystem>,

    /// Diet type (e.g., vegetarian, keto, low_carb)
    #[arg(long, value_parser = str::parse::<DietType>)]
    diet: Option<DietType>,

    /// Diet goal (can be repeated; replaces existing goals)
    #[arg(long = "goal", value_parser = str::parse::<DietGoal>)]
    goals: Vec<DietGoal>,

    /// Allergy (can be repeated; replaces existing allergies)
    #[arg(long = "allergy")]
    allergies: Vec<String>,

    /// Disliked food (can be repeated; replaces existing dislikes)
    #[arg(long = "dislike")]
    dislikes: Vec<String>,

    /// Meals per day
    #[arg(long)]
    meals: Option<u32>,

    /// Daily calorie target (0 clears it)
    #[arg(long)]
    calorie_target: Option<u32>,
}

impl ProfileFields {
    /// Preferences are one block; any preference flag rewrites it from the
    /// current values.
    fn preferences(&self, current: &UserPreferences) -> Option<UserPreferences> {
        let touched = self.diet.is_some()
            || !self.goals.is_empty()
            || !self.allergies.is_empty()
            || !self.dislikes.is_empty()
            || self.meals.is_some()
            || self.calorie_target.is_some();
        if !touched {
            return None;
        }

        let mut prefs = current.clone();
        if let Some(diet) = self.diet {
            prefs.diet_type = diet;
        }
        if !self.goals.is_empty() {
            prefs.goals = self.goals.clone();
        }
        if !self.allergies.is_empty() {
            prefs.allergies = self.allergies.clone();
        }
        if !self.dislikes.is_empty() {
            prefs.dislikes = self.dislikes.clone();
        }
        if let Some(meals) = self.meals {
            prefs.meal_count = meals;
        }
        if let Some(target) = self.calorie_target {
            prefs.calorie_target = (target > 0).then_some(target);
        }
        Some(prefs)
    }

    fn into_update(self, current: &UserPreferences) -> UserInfoUpdate {
        let preferences = self.preferences(current);
        UserInfoUpdate {
            name: self.name,
            email: self.email,
            age: self.age,
            weight: self.weight,
            height: self.height,
            gender: self.gender,
            activity_level: self.activity,
            unit_system: self.units,
            preferences,
        }
    }
}

impl ProfileCommand {
    pub fn run(self, store: &mut AppStateStore) -> Result<(), Box<dyn std::error::Error>> {
        match self.command {
            ProfileSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(store.user_info())?);
                    }
                    OutputFormat::Text => {
                        let user = store.user_info();
                        print!("{}", user);
                        let goals: Vec<&str> =
                            user.preferences.goals.iter().map(|g| g.as_str()).collect();
                        println!("Goals:    {}", goals.join(", "));
                        if !user.preferences.allergies.is_empty() {
                            println!("Allergies: {}", user.preferences.allergies.join(", "));
                        }
                        if let Some(target) = user.preferences.calorie_target {
                            println!("Target:   {} kcal", target);
                        }
                    }
                }
                Ok(())
            }

            ProfileSubcommand::Set(fields) => {
                let update = fields.into_update(&store.user_info().preferences);
                if update.is_empty() {
                    return Err("Nothing to update. See 'diet profile set --help'.".into());
                }
                store.update_user_info(update);
                println!("Profile updated.");
                Ok(())
            }

            ProfileSubcommand::Calories => {
                let user = store.user_info();
                println!("Estimated daily need: {} kcal", store.estimated_calorie_need());
                if let Some(target) = user.preferences.calorie_target {
                    println!("Your target:          {} kcal", target);
                }
                Ok(())
            }
        }
    }
}
