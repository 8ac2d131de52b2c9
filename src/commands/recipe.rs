use clap::{Args, Subcommand};

use super::OutputFormat;
use dietplan_core::{AppStateStore, RecipeInput};

#[derive(Args)]
pub struct RecipeCommand {
    #[command(subcommand)]
    pub command: RecipeSubcommand,
}

#[derive(Subcommand)]
pub enum RecipeSubcommand {
    /// List saved recipes, most recent first
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Save a recipe
    Add {
        /// Recipe name
        name: String,

        /// Ingredient (can be repeated)
        #[arg(long = "ingredient", short = 'i')]
        ingredients: Vec<String>,

        /// Calories per serving
        #[arg(long, short = 'k')]
        calories: Option<u32>,
    },

    /// Remove all saved recipes
    Clear,
}

impl RecipeCommand {
    pub fn run(self, store: &mut AppStateStore) -> Result<(), Box<dyn std::error::Error>> {
        match self.command {
            RecipeSubcommand::List { format } => {
                let recipes = store.recipe_history();
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(recipes)?),
                    OutputFormat::Text => {
                        if recipes.is_empty() {
                            println!("No saved recipes.");
                        }
                        for recipe in recipes {
                            println!("{}", recipe);
                        }
                    }
                }
                Ok(())
            }

            RecipeSubcommand::Add {
                name,
                ingredients,
                calories,
            } => {
                let mut input = RecipeInput::new(name).with_ingredients(ingredients);
                if let Some(kcal) = calories {
                    input = input.with_calories(kcal);
                }
                let entry = store.add_recipe_to_history(input);
                println!("Saved: {}", entry);
                Ok(())
            }

            RecipeSubcommand::Clear => {
                store.clear_recipe_history();
                println!("Recipe history cleared.");
                Ok(())
            }
        }
    }
}
