//! App configuration.
//!
//! Loaded once at startup and handed to the screens by shared reference.
//! Nothing here is mutated after load.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{StemeError, StemeResult};

const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Month and day names used by the calendar renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    pub month_names: [String; 12],
    pub month_names_short: [String; 12],
    /// Always starts on Sunday, regardless of `first_day`.
    pub day_names: [String; 7],
    pub day_names_short: [String; 7],
    pub today: String,
}

fn names<const N: usize>(names: [&str; N]) -> [String; N] {
    names.map(String::from)
}

impl Default for LocaleConfig {
    fn default() -> Self {
        LocaleConfig {
            month_names: names([
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]),
            month_names_short: names([
                "Jan.", "Feb.", "Mar.", "Apr.", "May.", "Jun.", "Jul.", "Aug.", "Sep.", "Oct.",
                "Nov.", "Dec.",
            ]),
            day_names: names([
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ]),
            day_names_short: names(["S", "M", "T", "W", "T", "F", "S"]),
            today: "Today".to_string(),
        }
    }
}

impl LocaleConfig {
    /// `month` is 1-12.
    pub fn month_name(&self, month: u32) -> &str {
        month
            .checked_sub(1)
            .and_then(|i| self.month_names.get(i as usize))
            .map_or("", String::as_str)
    }

    /// `weekday` is 0 (Sunday) - 6.
    pub fn day_name_short(&self, weekday: u8) -> &str {
        self.day_names_short
            .get(weekday as usize)
            .map_or("", String::as_str)
    }
}

/// Behaviour of the calendar list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarOptions {
    /// 0 = weeks start on Sunday, 1 = Monday
    pub first_day: u8,
    /// Leave days of neighbouring months blank on a month page.
    pub hide_extra_days: bool,
    /// Block presses on greyed-out weekdays.
    pub disable_all_touch_events_for_disabled_days: bool,
}

/// Settings for the profile header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityOptions {
    /// Avatars are looked up at `{avatar_base_url}/{uid}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_base_url: Option<String>,
    pub fetch_timeout_secs: u64,
}

impl Default for IdentityOptions {
    fn default() -> Self {
        IdentityOptions {
            avatar_base_url: None,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }
}

impl IdentityOptions {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Configuration at ~/.config/steme/config.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StemeConfig {
    #[serde(default)]
    locale: LocaleConfig,

    #[serde(default)]
    calendar: CalendarOptions,

    #[serde(default)]
    identity: IdentityOptions,
}

impl StemeConfig {
    pub fn new(locale: LocaleConfig, calendar: CalendarOptions, identity: IdentityOptions) -> Self {
        StemeConfig {
            locale,
            calendar,
            identity,
        }
    }

    pub fn config_path() -> StemeResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| StemeError::Config("Could not determine config directory".into()))?
            .join("steme");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, falling back to defaults if the file is missing.
    pub fn load() -> StemeResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> StemeResult<Self> {
        if !path.exists() {
            return Ok(StemeConfig::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| StemeError::Config(format!("Could not read config file: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| StemeError::Config(format!("Invalid config file {}: {e}", path.display())))
    }

    pub fn locale(&self) -> &LocaleConfig {
        &self.locale
    }

    pub fn calendar(&self) -> &CalendarOptions {
        &self.calendar
    }

    pub fn identity(&self) -> &IdentityOptions {
        &self.identity
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> StemeResult<()> {
        let contents = format!(
            "\
# steme configuration

[calendar]
# Week starts on Sunday (0) or Monday (1):
# first_day = 0

# Ignore presses on greyed-out weekdays:
# disable_all_touch_events_for_disabled_days = false

[identity]
# Where profile pictures are looked up ({{avatar_base_url}}/{{uid}}):
# avatar_base_url = \"https://example.com/avatars\"

# Give up on a profile picture after this many seconds:
# fetch_timeout_secs = {}
",
            DEFAULT_FETCH_TIMEOUT_SECS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StemeError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| StemeError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = StemeConfig::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config, StemeConfig::default());
        assert_eq!(config.identity().fetch_timeout(), Duration::from_secs(10));
        assert_eq!(config.locale().month_name(3), "March");
        assert_eq!(config.locale().day_name_short(0), "S");
    }

    #[test]
    fn test_default_template_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");
        StemeConfig::create_default_config(&path).unwrap();

        assert_eq!(StemeConfig::load_from(&path).unwrap(), StemeConfig::default());
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[calendar]\ndisable_all_touch_events_for_disabled_days = true\n\n\
             [identity]\navatar_base_url = \"https://avatars.test\"\n",
        )
        .unwrap();

        let config = StemeConfig::load_from(&path).unwrap();
        assert!(config.calendar().disable_all_touch_events_for_disabled_days);
        assert_eq!(config.calendar().first_day, 0);
        assert_eq!(
            config.identity().avatar_base_url.as_deref(),
            Some("https://avatars.test")
        );
        assert_eq!(config.identity().fetch_timeout_secs, 10);
        assert_eq!(config.locale(), &LocaleConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[calendar\n").unwrap();

        assert!(matches!(StemeConfig::load_from(&path), Err(StemeError::Config(_))));
    }
}
