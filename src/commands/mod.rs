mod config_cmd;
mod data;
mod grocery;
mod meal;
mod plan;
mod profile;
mod progress;
mod recipe;
mod settings;
mod track;

use clap::ValueEnum;

pub use config_cmd::ConfigCommand;
pub use data::DataCommand;
pub use grocery::GroceryCommand;
pub use meal::MealCommand;
pub use plan::PlanCommand;
pub use profile::ProfileCommand;
pub use progress::ProgressCommand;
pub use recipe::RecipeCommand;
pub use settings::SettingsCommand;
pub use track::TrackCommand;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Parses "on"/"off" style switches.
pub(crate) fn parse_switch(s: &str) -> Result<bool, String> {
    match s.to_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(format!("Invalid switch '{}'. Use on or off", s)),
    }
}
