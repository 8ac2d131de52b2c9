//! Application settings.
//!
//! Settings change only through [`SettingsUpdate`], which merges at the top
//! level: a provided block (notifications, privacy, display) replaces the
//! stored block as a whole. Nested values are never merged individually.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::user::UnitSystem;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderTimes {
    /// "HH:MM"
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
}

impl Default for ReminderTimes {
    fn default() -> Self {
        Self {
            breakfast: "08:00".to_string(),
            lunch: "12:30".to_string(),
            dinner: "19:00".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub enabled: bool,
    pub meal_reminders: bool,
    pub water_reminders: bool,
    pub reminder_times: ReminderTimes,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            meal_reminders: true,
            water_reminders: true,
            reminder_times: ReminderTimes::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacySettings {
    pub local_only: bool,
    pub analytics: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    #[serde(other)]
    System,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::System => write!(f, "system"),
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(Theme::System),
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(format!(
                "Invalid theme '{}'. Valid options: system, light, dark",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub theme: Theme,
    pub units: UnitSystem,
    pub language: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            units: UnitSystem::default(),
            language: "en".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub notifications: NotificationSettings,
    pub privacy: PrivacySettings,
    pub display: DisplaySettings,
}

/// Top-level partial update for [`AppSettings`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsUpdate {
    pub notifications: Option<NotificationSettings>,
    pub privacy: Option<PrivacySettings>,
    pub display: Option<DisplaySettings>,
}

impl SettingsUpdate {
    pub fn apply_to(self, settings: &mut AppSettings) {
        if let Some(notifications) = self.notifications {
            settings.notifications = notifications;
        }
        if let Some(privacy) = self.privacy {
            settings.privacy = privacy;
        }
        if let Some(display) = self.display {
            settings.display = display;
        }
    }
}
