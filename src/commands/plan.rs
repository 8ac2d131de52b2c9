use clap::{Args, Subcommand};
use std::path::PathBuf;

use super::OutputFormat;
use crate::config::Config;
use dietplan_core::{
    generate_with_fallback, AppStateStore, Clock, MealPlan, MockPlanGenerator, PlanRequest,
    PlanType, SystemClock,
};

#[derive(Args)]
pub struct PlanCommand {
    #[command(subcommand)]
    pub command: PlanSubcommand,
}

#[derive(Subcommand)]
pub enum PlanSubcommand {
    /// Generate a new plan from your profile and make it current
    Generate {
        /// What you would like the plan to focus on
        #[arg(long, short)]
        prompt: Option<String>,

        /// Plan type (daily, weekly); defaults to the configured type
        #[arg(long = "type", short = 't', value_parser = str::parse::<PlanType>)]
        plan_type: Option<PlanType>,
    },

    /// Show the current plan, or a plan from history
    Show {
        /// History index (0 = most recently replaced)
        #[arg(long)]
        history: Option<usize>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List previous plans
    History {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Make a plan from history current again; the current plan takes its
    /// place in history
    Use {
        /// History index (0 = most recently replaced)
        index: usize,
    },

    /// Load a plan from a JSON file and make it current
    Load {
        /// Path to plan JSON
        file: PathBuf,
    },

    /// Remove the current plan and all history
    Clear,
}

impl PlanCommand {
    pub async fn run(
        self,
        store: &mut AppStateStore,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match self.command {
            PlanSubcommand::Generate { prompt, plan_type } => {
                let plan_type = plan_type.unwrap_or(config.default_plan_type.value);
                let request = PlanRequest::from_user(
                    store.user_info(),
                    prompt.as_deref().unwrap_or_default(),
                    plan_type,
                    SystemClock.now(),
                );
                tracing::debug!("Plan request: {}", request.preferences_summary());

                let plan = generate_with_fallback(&MockPlanGenerator, &request).await;
                store.set_new_meal_plan(plan);

                if let Some(plan) = store.current_plan() {
                    println!("Generated {} plan:\n", plan_type);
                    print!("{}", plan);
                }
                Ok(())
            }

            PlanSubcommand::Show { history, format } => {
                let plan = match history {
                    Some(index) => store.meal_plan_from_history(index).ok_or_else(|| {
                        format!(
                            "No plan at history index {} ({} saved)",
                            index,
                            store.plan_history().len()
                        )
                    })?,
                    None => match store.current_plan() {
                        Some(plan) => plan,
                        None => {
                            println!("No current plan. Use 'diet plan generate' to create one.");
                            return Ok(());
                        }
                    },
                };
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(plan)?),
                    OutputFormat::Text => print!("{}", plan),
                }
                Ok(())
            }

            PlanSubcommand::History { format } => {
                let history = store.plan_history();
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(history)?),
                    OutputFormat::Text => {
                        if history.is_empty() {
                            println!("No previous plans.");
                            return Ok(());
                        }
                        for (i, plan) in history.iter().enumerate() {
                            let created = plan
                                .timestamp
                                .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
                                .unwrap_or_else(|| "-".to_string());
                            println!(
                                "{:>2}  {:<32} {:>6} kcal  {}",
                                i,
                                plan.display_name(),
                                plan.daily_totals.calories,
                                created
                            );
                        }
                    }
                }
                Ok(())
            }

            PlanSubcommand::Use { index } => {
                let name = use_from_history(store, index)?;
                println!("Current plan is now '{}'.", name);
                Ok(())
            }

            PlanSubcommand::Load { file } => {
                let contents = std::fs::read_to_string(&file)
                    .map_err(|e| format!("Failed to read '{}': {}", file.display(), e))?;
                let plan: MealPlan = serde_json::from_str(&contents)
                    .map_err(|e| format!("Invalid plan file '{}': {}", file.display(), e))?;
                let name = plan.display_name().to_string();
                store.set_new_meal_plan(plan);
                println!("Loaded plan '{}'.", name);
                Ok(())
            }

            PlanSubcommand::Clear => {
                store.clear_all_meal_plans();
                println!("Cleared current plan and history.");
                Ok(())
            }
        }
    }
}

/// Swaps the history entry at `index` with the current plan and returns the
/// restored plan's name.
fn use_from_history(store: &mut AppStateStore, index: usize) -> Result<String, String> {
    let saved = store.plan_history().len();
    store
        .restore_meal_plan_from_history(index)
        .map(|plan| plan.display_name().to_string())
        .ok_or_else(|| format!("No plan at history index {} ({} saved)", index, saved))
}
