// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use chrono::FixedOffset;

use crate::db::keys;
use crate::models::Coordinates;
use crate::services::navigation::DEFAULT_ZOOM;
use crate::time_utils::{offset_from_minutes, utc_offset};

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Directory holding the stored workout blob
    pub data_dir: PathBuf,
    /// Storage key for the workout collection
    pub storage_key: String,
    /// Zoom level for the initial view and focus requests
    pub map_zoom: u8,
    /// Fixed position to center the map on
    pub home_position: Option<Coordinates>,
    /// JSON geolocation endpoint, used when no home position is set
    pub geolocation_url: Option<String>,
    /// Offset used to date workout descriptions
    pub display_offset: FixedOffset,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            data_dir: PathBuf::from("data"),
            storage_key: keys::WORKOUTS.to_string(),
            map_zoom: DEFAULT_ZOOM,
            home_position: Some(Coordinates::new(41.39, 2.16)),
            geolocation_url: None,
            display_offset: utc_offset(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let home_position = match (optional("HOME_LATITUDE"), optional("HOME_LONGITUDE")) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(
                parse_coordinate("HOME_LATITUDE", &lat, 90.0)?,
                parse_coordinate("HOME_LONGITUDE", &lng, 180.0)?,
            )),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing("HOME_LONGITUDE")),
            (None, Some(_)) => return Err(ConfigError::Missing("HOME_LATITUDE")),
        };

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            data_dir: optional("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
            storage_key: optional("STORAGE_KEY").unwrap_or_else(|| keys::WORKOUTS.to_string()),
            map_zoom: match optional("MAP_ZOOM") {
                Some(v) => v
                    .parse::<u8>()
                    .ok()
                    .filter(|z| (1..=20).contains(z))
                    .ok_or(ConfigError::Invalid("MAP_ZOOM", v))?,
                None => DEFAULT_ZOOM,
            },
            home_position,
            geolocation_url: optional("GEOLOCATION_URL"),
            display_offset: match optional("UTC_OFFSET_MINUTES") {
                Some(v) => v
                    .parse::<i32>()
                    .ok()
                    .and_then(offset_from_minutes)
                    .ok_or(ConfigError::Invalid("UTC_OFFSET_MINUTES", v))?,
                None => utc_offset(),
            },
        })
    }
}

/// Non-empty, trimmed value of an environment variable.
fn optional(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_coordinate(name: &'static str, value: &str, limit: f64) -> Result<f64, ConfigError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() <= limit)
        .ok_or_else(|| ConfigError::Invalid(name, value.to_string()))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set env vars for test
        env::set_var("HOME_LATITUDE", "41.39");
        env::set_var("HOME_LONGITUDE", "2.16");
        env::set_var("MAP_ZOOM", "13");
        env::set_var("STORAGE_KEY", "test_workouts");
        env::set_var("UTC_OFFSET_MINUTES", "-300");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.home_position, Some(Coordinates::new(41.39, 2.16)));
        assert_eq!(config.map_zoom, 13);
        assert_eq!(config.storage_key, "test_workouts");
        assert_eq!(config.port, 8080);
        assert_eq!(config.display_offset.local_minus_utc(), -18_000);

        env::remove_var("HOME_LATITUDE");
        env::remove_var("HOME_LONGITUDE");
        env::remove_var("MAP_ZOOM");
        env::remove_var("STORAGE_KEY");
        env::remove_var("UTC_OFFSET_MINUTES");
    }

    #[test]
    fn test_parse_coordinate_limits() {
        assert_eq!(parse_coordinate("HOME_LATITUDE", "-33.9", 90.0).unwrap(), -33.9);
        assert!(parse_coordinate("HOME_LATITUDE", "91", 90.0).is_err());
        assert!(parse_coordinate("HOME_LONGITUDE", "east", 180.0).is_err());
    }
}
