//! Grocery list commands.
//!
//! The list is a set of item names in insertion order. Items can be added
//! by hand or pulled from the current meal plan.

use clap::{Args, Subcommand};

use super::OutputFormat;
use dietplan_core::{AppStateStore, MealPlan};

#[derive(Args)]
pub struct GroceryCommand {
    #[command(subcommand)]
    pub command: GrocerySubcommand,
}

#[derive(Subcommand)]
pub enum GrocerySubcommand {
    /// Show the grocery list
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add one or more items
    Add {
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Remove an item (exact name)
    Remove {
        item: String,
    },

    /// Add every item from the current meal plan
    FromPlan,
}

impl GroceryCommand {
    pub fn run(self, store: &mut AppStateStore) -> Result<(), Box<dyn std::error::Error>> {
        match self.command {
            GrocerySubcommand::List { format } => {
                let items = store.grocery_list();
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(items)?),
                    OutputFormat::Text => {
                        if items.is_empty() {
                            println!("Grocery list is empty.");
                        }
                        for item in items {
                            println!("- {}", item);
                        }
                    }
                }
                Ok(())
            }

            GrocerySubcommand::Add { items } => {
                let added = store.add_to_grocery_list(items);
                println!("Added {} item(s).", added);
                Ok(())
            }

            GrocerySubcommand::Remove { item } => {
                if !store.remove_from_grocery_list(&item) {
                    return Err(format!("Item not on the list: {}", item).into());
                }
                println!("Removed '{}'.", item);
                Ok(())
            }

            GrocerySubcommand::FromPlan => {
                let items = match store.current_plan() {
                    Some(plan) => plan_items(plan),
                    None => return Err("No current plan.".into()),
                };
                let added = store.add_to_grocery_list(items);
                println!("Added {} item(s) from the current plan.", added);
                Ok(())
            }
        }
    }
}

/// Every food item in `plan`, including the weekly breakdown.
fn plan_items(plan: &MealPlan) -> Vec<String> {
    let mut items: Vec<String> = plan
        .meals
        .iter()
        .flat_map(|m| m.items.iter().cloned())
        .collect();

    if let Some(days) = &plan.weekly_plans {
        for day in days.values() {
            let meals = [&day.breakfast, &day.lunch, &day.dinner]
                .into_iter()
                .flatten()
                .chain(day.snacks.iter());
            for meal in meals {
                items.extend(meal.items.iter().cloned());
            }
        }
    }
    items
}
