//! Admin matching configuration
//!
//! Toggles for the heuristic passes. Stored as one JSON blob; any field
//! missing from the blob takes its default.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Key of the settings blob in the site settings table
pub const SETTINGS_KEY: &str = "related_records_settings";

pub const MAX_AUTO_RESULTS_LIMIT: u32 = 100;
pub const MIN_NAME_LENGTH_LIMIT: usize = 20;

const KEYS: &[&str] = &[
    "auto_match_enabled",
    "match_by_name",
    "match_by_location",
    "match_by_enslaver",
    "match_by_date",
    "max_auto_results",
    "min_name_length",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchSettings {
    pub auto_match_enabled: bool,
    pub match_by_name: bool,
    pub match_by_location: bool,
    pub match_by_enslaver: bool,
    pub match_by_date: bool,
    /// Cap on heuristic and merged results; 0 defers to the caller's limit
    pub max_auto_results: u32,
    /// Name tokens shorter than this are not searched
    pub min_name_length: usize,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self::defaults()
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(Error::InvalidInput(format!(
            "{} must be true or false, got '{}'",
            key, value
        ))),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidInput(format!("{} must be a number, got '{}'", key, value)))
}

impl MatchSettings {
    pub const fn defaults() -> Self {
        Self {
            auto_match_enabled: true,
            match_by_name: true,
            match_by_location: true,
            match_by_enslaver: true,
            match_by_date: true,
            max_auto_results: 10,
            min_name_length: 3,
        }
    }

    /// Cap applied to heuristic and merged results for one request
    pub fn effective_max_results(&self, caller_limit: u32) -> usize {
        if self.max_auto_results == 0 {
            caller_limit as usize
        } else {
            self.max_auto_results as usize
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_AUTO_RESULTS_LIMIT).contains(&self.max_auto_results) {
            return Err(Error::InvalidInput(format!(
                "max_auto_results must be between 1 and {}",
                MAX_AUTO_RESULTS_LIMIT
            )));
        }
        if !(1..=MIN_NAME_LENGTH_LIMIT).contains(&self.min_name_length) {
            return Err(Error::InvalidInput(format!(
                "min_name_length must be between 1 and {}",
                MIN_NAME_LENGTH_LIMIT
            )));
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "auto_match_enabled" => self.auto_match_enabled.to_string(),
            "match_by_name" => self.match_by_name.to_string(),
            "match_by_location" => self.match_by_location.to_string(),
            "match_by_enslaver" => self.match_by_enslaver.to_string(),
            "match_by_date" => self.match_by_date.to_string(),
            "max_auto_results" => self.max_auto_results.to_string(),
            "min_name_length" => self.min_name_length.to_string(),
            _ => {
                return Err(Error::InvalidInput(format!(
                    "unknown setting '{}' (expected one of: {})",
                    key,
                    KEYS.join(", ")
                )));
            }
        };
        Ok(value)
    }

    /// Set one field from its text form, validating the result
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = *self;
        match key {
            "auto_match_enabled" => updated.auto_match_enabled = parse_bool(key, value)?,
            "match_by_name" => updated.match_by_name = parse_bool(key, value)?,
            "match_by_location" => updated.match_by_location = parse_bool(key, value)?,
            "match_by_enslaver" => updated.match_by_enslaver = parse_bool(key, value)?,
            "match_by_date" => updated.match_by_date = parse_bool(key, value)?,
            "max_auto_results" => updated.max_auto_results = parse_number(key, value)?,
            "min_name_length" => updated.min_name_length = parse_number(key, value)?,
            _ => {
                return Err(Error::InvalidInput(format!(
                    "unknown setting '{}' (expected one of: {})",
                    key,
                    KEYS.join(", ")
                )));
            }
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    pub fn list(&self) -> Vec<(String, String)> {
        KEYS.iter()
            .filter_map(|key| self.get(key).ok().map(|value| (key.to_string(), value)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let settings = MatchSettings::default();
        assert!(settings.auto_match_enabled);
        assert!(settings.match_by_name && settings.match_by_location);
        assert!(settings.match_by_enslaver && settings.match_by_date);
        assert_eq!(settings.max_auto_results, 10);
        assert_eq!(settings.min_name_length, 3);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_blob_fills_defaults() {
        let settings: MatchSettings =
            serde_json::from_value(json!({"autoMatchEnabled": false, "maxAutoResults": 4}))
                .unwrap();
        assert!(!settings.auto_match_enabled);
        assert_eq!(settings.max_auto_results, 4);
        assert!(settings.match_by_date);
        assert_eq!(settings.min_name_length, 3);
    }

    #[test]
    fn test_blob_uses_camel_case() {
        let value = serde_json::to_value(MatchSettings::defaults()).unwrap();
        assert_eq!(value["matchByEnslaver"], true);
        assert_eq!(value["minNameLength"], 3);
    }

    #[test]
    fn test_effective_max_results_falls_back_to_caller_limit() {
        let mut settings = MatchSettings::defaults();
        assert_eq!(settings.effective_max_results(25), 10);

        settings.max_auto_results = 0;
        assert_eq!(settings.effective_max_results(25), 25);
    }

    #[test]
    fn test_get_and_set() {
        let mut settings = MatchSettings::defaults();

        settings.set("match_by_date", "off").unwrap();
        settings.set("max_auto_results", "25").unwrap();
        assert_eq!(settings.get("match_by_date").unwrap(), "false");
        assert_eq!(settings.get("max_auto_results").unwrap(), "25");
        assert_eq!(settings.list().len(), 7);
    }

    #[test]
    fn test_set_rejects_invalid_values() {
        let mut settings = MatchSettings::defaults();

        assert!(settings.set("max_auto_results", "0").is_err());
        assert!(settings.set("max_auto_results", "101").is_err());
        assert!(settings.set("min_name_length", "many").is_err());
        assert!(settings.set("match_by_name", "maybe").is_err());
        assert!(settings.set("match_by_color", "true").is_err());
        assert_eq!(settings, MatchSettings::defaults());
    }
}
