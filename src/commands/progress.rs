use clap::{Args, Subcommand};

use super::OutputFormat;
use dietplan_core::models::ResetPeriod;
use dietplan_core::AppStateStore;

#[derive(Args)]
pub struct ProgressCommand {
    #[command(subcommand)]
    pub command: ProgressSubcommand,
}

#[derive(Subcommand)]
pub enum ProgressSubcommand {
    /// Show points, badges, streak and challenges
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Set how often period goals reset (daily, weekly, monthly)
    Period {
        #[arg(value_parser = str::parse::<ResetPeriod>)]
        period: ResetPeriod,
    },

    /// Start a new goal period now
    NewPeriod,

    /// Clear all points, badges, streaks and challenges
    ResetAll {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

impl ProgressCommand {
    pub fn run(self, store: &mut AppStateStore) -> Result<(), Box<dyn std::error::Error>> {
        match self.command {
            ProgressSubcommand::Show { format } => {
                let progress = store.progress();
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(progress)?);
                    }
                    OutputFormat::Text => {
                        println!("Points: {}", progress.points);
                        println!(
                            "Streak: {} day(s) (longest {})",
                            progress.streak.current, progress.streak.longest
                        );
                        if progress.badges.is_empty() {
                            println!("Badges: none yet");
                        } else {
                            println!("Badges: {}", progress.badges.join(", "));
                        }

                        let periodic = &progress.periodic;
                        println!(
                            "\nThis {} period: {:.0}% of goals",
                            periodic.reset_period,
                            store.weekly_progress_percentage()
                        );
                        println!(
                            "  meals {}/{}, water days {}/{}, active days {}/{}",
                            periodic.current.meals_logged,
                            periodic.weekly_goals.meals_logged,
                            periodic.current.hydration_days,
                            periodic.weekly_goals.hydration_days,
                            periodic.current.active_days,
                            periodic.weekly_goals.active_days
                        );

                        println!("\nChallenges");
                        for c in &progress.challenges {
                            let mark = if c.completed { "x" } else { " " };
                            println!("  [{}] {} ({}/{})", mark, c.name, c.progress, c.target);
                        }
                    }
                }
                Ok(())
            }

            ProgressSubcommand::Period { period } => {
                store.set_reset_period(period);
                println!("Goals now reset {}.", period);
                Ok(())
            }

            ProgressSubcommand::NewPeriod => {
                store.reset_weekly_progress();
                println!("Started a new goal period.");
                Ok(())
            }

            ProgressSubcommand::ResetAll { yes } => {
                if !yes {
                    return Err("This clears all points and badges. Re-run with --yes.".into());
                }
                store.reset_all_progress();
                println!("All progress cleared.");
                Ok(())
            }
        }
    }
}
