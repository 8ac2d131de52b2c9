use clap::{Args, Subcommand};

use super::{parse_switch, OutputFormat};
use dietplan_core::models::{Theme, UnitSystem};
use dietplan_core::{AppSettings, AppStateStore, SettingsUpdate};

#[derive(Args)]
pub struct SettingsCommand {
    #[command(subcommand)]
    pub command: SettingsSubcommand,
}

#[derive(Subcommand)]
pub enum SettingsSubcommand {
    /// Show all settings
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Change settings; omitted values are left unchanged
    Set(SettingsFields),
}

#[derive(Args, Default)]
pub struct SettingsFields {
    /// Enable notifications (on/off)
    #[arg(long, value_parser = parse_switch)]
    notifications: Option<bool>,

    /// Meal reminders (on/off)
    #[arg(long, value_parser = parse_switch)]
    meal_reminders: Option<bool>,

    /// Water reminders (on/off)
    #[arg(long, value_parser = parse_switch)]
    water_reminders: Option<bool>,

    /// Breakfast reminder time (HH:MM)
    #[arg(long, value_parser = parse_time)]
    breakfast_time: Option<String>,

    /// Lunch reminder time (HH:MM)
    #[arg(long, value_parser = parse_time)]
    lunch_time: Option<String>,

    /// Dinner reminder time (HH:MM)
    #[arg(long, value_parser = parse_time)]
    dinner_time: Option<String>,

    /// Keep data on this device only (on/off)
    #[arg(long, value_parser = parse_switch)]
    local_only: Option<bool>,

    /// Share anonymous usage analytics (on/off)
    #[arg(long, value_parser = parse_switch)]
    analytics: Option<bool>,

    /// system, light, dark
    #[arg(long, value_parser = str::parse::<Theme>)]
    theme: Option<Theme>,

    /// metric or imperial
    #[arg(long, value_parser = str::parse::<UnitSystem>)]
    units: Option<UnitSystem>,

    /// Language code (e.g., en)
    #[arg(long)]
    language: Option<String>,
}

fn parse_time(s: &str) -> Result<String, String> {
    chrono::NaiveTime::parse_from_str(s, "%H:%M")
        .map(|t| t.format("%H:%M").to_string())
        .map_err(|_| format!("Invalid time '{}'. Use HH:MM.", s))
}

impl SettingsFields {
    /// Builds a top-level update. Each touched block is rebuilt from its
    /// current value so untouched fields in that block survive the replace.
    fn into_update(self, current: &AppSettings) -> SettingsUpdate {
        let mut update = SettingsUpdate::default();

        if self.notifications.is_some()
            || self.meal_reminders.is_some()
            || self.water_reminders.is_some()
            || self.breakfast_time.is_some()
            || self.lunch_time.is_some()
            || self.dinner_time.is_some()
        {
            let mut block = current.notifications.clone();
            if let Some(v) = self.notifications {
                block.enabled = v;
            }
            if let Some(v) = self.meal_reminders {
                block.meal_reminders = v;
            }
            if let Some(v) = self.water_reminders {
                block.water_reminders = v;
            }
            if let Some(v) = self.breakfast_time {
                block.reminder_times.breakfast = v;
            }
            if let Some(v) = self.lunch_time {
                block.reminder_times.lunch = v;
            }
            if let Some(v) = self.dinner_time {
                block.reminder_times.dinner = v;
            }
            update.notifications = Some(block);
        }

        if self.local_only.is_some() || self.analytics.is_some() {
            let mut block = current.privacy.clone();
            if let Some(v) = self.local_only {
                block.local_only = v;
            }
            if let Some(v) = self.analytics {
                block.analytics = v;
            }
            update.privacy = Some(block);
        }

        if self.theme.is_some() || self.units.is_some() || self.language.is_some() {
            let mut block = current.display.clone();
            if let Some(v) = self.theme {
                block.theme = v;
            }
            if let Some(v) = self.units {
                block.units = v;
            }
            if let Some(v) = self.language {
                block.language = v;
            }
            update.display = Some(block);
        }

        update
    }
}

impl SettingsCommand {
    pub fn run(self, store: &mut AppStateStore) -> Result<(), Box<dyn std::error::Error>> {
        match self.command {
            SettingsSubcommand::Show { format } => {
                let s = store.settings();
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(s)?),
                    OutputFormat::Text => {
                        let on_off = |b: bool| if b { "on" } else { "off" };
                        let n = &s.notifications;
                        println!("Notifications:   {}", on_off(n.enabled));
                        println!("  meal reminders:  {}", on_off(n.meal_reminders));
                        println!("  water reminders: {}", on_off(n.water_reminders));
                        println!(
                            "  times:           {} / {} / {}",
                            n.reminder_times.breakfast,
                            n.reminder_times.lunch,
                            n.reminder_times.dinner
                        );
                        println!("Local only:      {}", on_off(s.privacy.local_only));
                        println!("Analytics:       {}", on_off(s.privacy.analytics));
                        println!("Theme:           {}", s.display.theme);
                        println!("Units:           {}", s.display.units);
                        println!("Language:        {}", s.display.language);
                    }
                }
                Ok(())
            }

            SettingsSubcommand::Set(fields) => {
                let update = fields.into_update(store.settings());
                if update == SettingsUpdate::default() {
                    return Err("Nothing to update. See 'diet settings set --help'.".into());
                }
                store.update_settings(update);
                println!("Settings updated.");
                Ok(())
            }
        }
    }
}
