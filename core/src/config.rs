// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

use jiff::SignedDuration;
use serde::de;

/// The name of the recal application.
pub const APP_NAME: &str = "recal";

/// Colors assigned round-robin to events created without one.
const DEFAULT_PALETTE: [&str; 6] = [
    "#BA3D9D", "#3D7EBA", "#3DBA6F", "#BA8C3D", "#8C3DBA", "#BA3D3D",
];

/// Configuration for the recal application.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// Path to the JSON file holding the event collection.
    pub events_path: PathBuf,

    /// Colors for events created without one.
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,

    /// Length of events created from a start only.
    #[serde(default)]
    pub default_duration: ConfigDuration,
}

impl Config {
    /// Creates a configuration with defaults for everything but the store path.
    pub fn new(events_path: impl Into<PathBuf>) -> Self {
        Self {
            events_path: events_path.into(),
            palette: default_palette(),
            default_duration: ConfigDuration::default(),
        }
    }

    /// Normalize the configuration.
    pub fn normalize(&mut self) -> Result<(), Box<dyn Error>> {
        self.events_path = expand_path(&self.events_path)
            .map_err(|e| format!("Failed to expand events path: {e}"))?;

        if self.palette.is_empty() {
            tracing::warn!("empty palette, events without color will stay uncolored");
        }

        if self.default_duration.0.is_negative() || self.default_duration.0.is_zero() {
            tracing::warn!(duration = %self.default_duration.0, "non-positive default duration, using 60m");
            self.default_duration = ConfigDuration::default();
        }

        Ok(())
    }
}

fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(ToString::to_string).collect()
}

/// A duration read from a string like `"01:30"` or `"45m"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigDuration(pub SignedDuration);

impl ConfigDuration {
    pub fn get(&self) -> SignedDuration {
        self.0
    }
}

impl Default for ConfigDuration {
    fn default() -> Self {
        Self(SignedDuration::from_mins(60))
    }
}

impl<'de> serde::Deserialize<'de> for ConfigDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct DurationVisitor;

        impl<'de> de::Visitor<'de> for DurationVisitor {
            type Value = ConfigDuration;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter
                    .write_str(r#"a duration string like "HH:MM", "1d", "24h", "60m", or "1800s""#)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                parse_duration(value)
                    .map(ConfigDuration)
                    .map_err(|e| de::Error::custom(e.to_string()))
            }
        }

        deserializer.deserialize_str(DurationVisitor)
    }
}

/// Handle tilde (~) and environment variables in the path
fn expand_path(path: &Path) -> Result<PathBuf, Box<dyn Error>> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path.to_str().ok_or("Invalid path")?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    // Handle config directories
    let config_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_CONFIG_HOME/", "${XDG_CONFIG_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in config_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_config_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, Box<dyn Error>> {
    dirs::home_dir().ok_or("User-specific home directory not found".into())
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or("User-specific config directory not found".into())
}

/// Parse a duration string in the format "HH:MM" / "1d" / "24h" / "60m" / "1800s".
pub fn parse_duration(s: &str) -> Result<SignedDuration, Box<dyn Error>> {
    let s = s.trim();

    // Try to parse "HH:MM" format
    if let Some((h, m)) = s.split_once(':') {
        let hours: i64 = h.trim().parse()?;
        let minutes: i64 = m.trim().parse()?;
        Ok(SignedDuration::from_mins(hours * 60 + minutes))
    }
    // Match suffix-based formats
    else if let Some(rest) = s.strip_suffix("d") {
        let days: i64 = rest.trim().parse()?;
        Ok(SignedDuration::from_hours(days * 24))
    } else if let Some(rest) = s.strip_suffix("h") {
        let hours: i64 = rest.trim().parse()?;
        Ok(SignedDuration::from_hours(hours))
    } else if let Some(rest) = s.strip_suffix("m") {
        let minutes: i64 = rest.trim().parse()?;
        Ok(SignedDuration::from_mins(minutes))
    } else if let Some(rest) = s.strip_suffix("s") {
        let seconds: i64 = rest.trim().parse()?;
        Ok(SignedDuration::from_secs(seconds))
    } else {
        Err(format!("Invalid duration format: {s}").into())
    }
}
