use chrono::Local;
use clap::{Args, Subcommand};

use super::OutputFormat;
use dietplan_core::{AppStateStore, MealCategory, QuickMeal, QuickMealInput};

#[derive(Args)]
pub struct MealCommand {
    #[command(subcommand)]
    pub command: MealSubcommand,
}

#[derive(Subcommand)]
pub enum MealSubcommand {
    /// Log a meal eaten today
    Log {
        /// Meal name
        name: String,

        /// Calories
        #[arg(long, short = 'k')]
        calories: u32,

        /// Meal category (breakfast, lunch, dinner, snack)
        #[arg(long = "type", short = 't', value_name = "TYPE", default_value = "snack",
              value_parser = str::parse::<MealCategory>)]
        category: MealCategory,

        /// Photo path or URI
        #[arg(long)]
        photo: Option<String>,
    },

    /// List logged meals, newest first
    List {
        /// Maximum number of meals to show
        #[arg(long, short = 'n', default_value = "20")]
        limit: usize,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show meals logged today with a calorie total
    Today {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl MealCommand {
    pub fn run(self, store: &mut AppStateStore) -> Result<(), Box<dyn std::error::Error>> {
        match self.command {
            MealSubcommand::Log {
                name,
                calories,
                category,
                photo,
            } => {
                let mut input = QuickMealInput::new(name, category, calories);
                if let Some(photo) = photo {
                    input = input.with_photo(photo);
                }
                let meal = store.log_quick_meal(input);

                println!("Logged: {}", meal);
                let streak = store.progress().streak;
                println!(
                    "Points: {}  Streak: {} day(s)",
                    store.progress().points,
                    streak.current
                );
                Ok(())
            }

            MealSubcommand::List { limit, format } => {
                let meals: Vec<&QuickMeal> = store.quick_meals().iter().take(limit).collect();
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&meals)?),
                    OutputFormat::Text => {
                        if meals.is_empty() {
                            println!("No meals logged yet.");
                        }
                        for meal in meals {
                            print_meal_row(meal);
                        }
                    }
                }
                Ok(())
            }

            MealSubcommand::Today { format } => {
                let meals = &store.daily_tracking().meals_logged;
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(meals)?),
                    OutputFormat::Text => {
                        println!("Meals for {}", store.daily_tracking().date);
                        for meal in meals {
                            print_meal_row(meal);
                        }
                        println!("\nTotal: {} kcal", store.calories_logged_today());
                    }
                }
                Ok(())
            }
        }
    }
}

fn print_meal_row(meal: &QuickMeal) {
    let when = meal.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M");
    println!(
        "{}  {:<10} {:<28} {:>5} kcal",
        when,
        meal.category.to_string(),
        meal.name,
        meal.calories
    );
}
