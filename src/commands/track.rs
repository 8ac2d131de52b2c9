use clap::{Args, Subcommand};

use super::OutputFormat;
use dietplan_core::AppStateStore;

#[derive(Args)]
pub struct TrackCommand {
    #[command(subcommand)]
    pub command: TrackSubcommand,
}

#[derive(Subcommand)]
pub enum TrackSubcommand {
    /// Show today's tracking
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Set the number of glasses of water drunk today
    Water {
        glasses: u32,
    },

    /// Set today's step count and active minutes
    Steps {
        steps: u32,

        /// Active minutes (unchanged if omitted)
        #[arg(long, short)]
        minutes: Option<u32>,
    },

    /// Set today's mood
    Mood {
        /// Mood text; omit to clear
        mood: Option<String>,
    },

    /// Change daily targets
    Target {
        /// Glasses of water per day
        #[arg(long)]
        water: Option<u32>,

        /// Steps per day
        #[arg(long)]
        steps: Option<u32>,
    },

    /// Zero today's counters and meal log
    Reset,
}

impl TrackCommand {
    pub fn run(self, store: &mut AppStateStore) -> Result<(), Box<dyn std::error::Error>> {
        match self.command {
            TrackSubcommand::Show { format } => {
                store.roll_over_if_new_day();
                let today = store.daily_tracking();
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(today)?),
                    OutputFormat::Text => {
                        println!("Today ({})", today.date);
                        println!(
                            "Water:    {}/{} glasses ({:.0}%)",
                            today.hydration.glasses,
                            today.hydration.target,
                            store.hydration_percentage()
                        );
                        println!(
                            "Steps:    {}/{} ({:.0}%), {} active min",
                            today.activity.steps,
                            today.activity.target_steps,
                            store.activity_percentage(),
                            today.activity.minutes
                        );
                        println!(
                            "Meals:    {} logged, {} kcal",
                            today.meals_logged.len(),
                            store.calories_logged_today()
                        );
                        if let Some(mood) = &today.mood {
                            println!("Mood:     {}", mood);
                        }
                    }
                }
                Ok(())
            }

            TrackSubcommand::Water { glasses } => {
                let badges_before = store.progress().badges.len();
                store.update_hydration(glasses);
                let h = store.daily_tracking().hydration;
                println!("Water: {}/{} glasses", h.glasses, h.target);
                if h.goal_met() {
                    println!("Hydration goal reached!");
                }
                announce_new_badges(store, badges_before);
                Ok(())
            }

            TrackSubcommand::Steps { steps, minutes } => {
                let badges_before = store.progress().badges.len();
                let minutes = minutes.unwrap_or(store.daily_tracking().activity.minutes);
                store.update_activity(steps, minutes);
                let a = store.daily_tracking().activity;
                println!("Steps: {}/{}, {} active min", a.steps, a.target_steps, a.minutes);
                if a.goal_met() {
                    println!("Step goal reached!");
                }
                announce_new_badges(store, badges_before);
                Ok(())
            }

            TrackSubcommand::Mood { mood } => {
                match &mood {
                    Some(m) => println!("Mood set to '{}'.", m),
                    None => println!("Mood cleared."),
                }
                store.set_mood(mood);
                Ok(())
            }

            TrackSubcommand::Target { water, steps } => {
                if water.is_none() && steps.is_none() {
                    return Err("Specify --water and/or --steps".into());
                }
                if let Some(glasses) = water {
                    store.set_hydration_target(glasses);
                    println!("Water target: {} glasses", glasses);
                }
                if let Some(steps) = steps {
                    store.set_step_target(steps);
                    println!("Step target: {}", steps);
                }
                Ok(())
            }

            TrackSubcommand::Reset => {
                store.reset_daily_progress();
                println!("Today's tracking was reset.");
                Ok(())
            }
        }
    }
}

fn announce_new_badges(store: &AppStateStore, before: usize) {
    for badge in store.progress().badges.iter().skip(before) {
        println!("Badge unlocked: {}", badge);
    }
}
