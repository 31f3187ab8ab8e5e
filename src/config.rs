//! Board properties and the `key:value` configuration format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Valid range for the grid width.
pub const WIDTH_RANGE: RangeInclusive<u16> = 10..=100;
/// Valid range for the grid height.
pub const HEIGHT_RANGE: RangeInclusive<u16> = 10..=50;
/// Valid range for rounds applied per second.
pub const REFRESH_RANGE: RangeInclusive<u32> = 1..=60;
/// Valid range for the lifespan granted to new and revived cells.
pub const DEATH_AGE_RANGE: RangeInclusive<u32> = 1..=32;
/// Valid range for the round limit.
pub const WIN_ROUND_RANGE: RangeInclusive<u64> = 128..=65536;
/// Valid range for the enemy count that kills a cell.
pub const TO_KILL_RANGE: RangeInclusive<u32> = 1..=8;

/// Board properties, immutable once a game is running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    /// Grid width in cells [10, 100].
    pub width: u16,
    /// Grid height in cells [10, 50].
    pub height: u16,
    /// Rounds applied per second [1, 60].
    pub refresh: u32,
    /// Rounds a new or revived cell lives before dying of age [1, 32].
    pub death_age: u32,
    /// Round limit after which the highest score wins [128, 65536].
    pub win_round: u64,
    /// Enemy neighbours required to kill a cell [1, 8].
    pub to_kill: u32,
    /// Whether the grid is rendered after every round.
    pub output: bool,
}

impl Default for Properties {
    fn default() -> Self {
        Self {
            width: 30,
            height: 30,
            refresh: 4,
            death_age: 4,
            win_round: 512,
            to_kill: 3,
            output: true,
        }
    }
}

impl Properties {
    /// Set a single property from its configuration key and raw value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "width" => self.width = parse_ranged(key, value, WIDTH_RANGE)?,
            "height" => self.height = parse_ranged(key, value, HEIGHT_RANGE)?,
            "refresh" => self.refresh = parse_ranged(key, value, REFRESH_RANGE)?,
            "death-age" => self.death_age = parse_ranged(key, value, DEATH_AGE_RANGE)?,
            "win-round" => self.win_round = parse_ranged(key, value, WIN_ROUND_RANGE)?,
            "to-kill" => self.to_kill = parse_ranged(key, value, TO_KILL_RANGE)?,
            "output" => self.output = parse_flag(key, value)?,
            _ => return Err(ConfigError::UnknownProperty(key.to_string())),
        }
        Ok(())
    }

    /// Parse a whole configuration from `key:value` lines.
    ///
    /// Properties not mentioned keep their defaults. Any error aborts the
    /// parse; no partially-applied configuration ever escapes.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut props = Self::default();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (key, value) = line
                .split_once(':')
                .ok_or_else(|| ConfigError::MalformedLine(line.to_string()))?;
            props.set(key.trim(), value.trim())?;
        }
        Ok(props)
    }

    /// Render the properties back into the `key:value` file format.
    pub fn to_config_string(&self) -> String {
        format!(
            "width:{}\nheight:{}\nrefresh:{}\ndeath-age:{}\nwin-round:{}\nto-kill:{}\noutput:{}\n",
            self.width,
            self.height,
            self.refresh,
            self.death_age,
            self.win_round,
            self.to_kill,
            self.output
        )
    }
}

fn parse_ranged<T>(property: &str, value: &str, range: RangeInclusive<T>) -> Result<T, ConfigError>
where
    T: Copy + FromStr + PartialOrd + fmt::Display,
{
    let parsed = value.parse::<T>().map_err(|_| ConfigError::InvalidValue {
        property: property.to_string(),
        value: value.to_string(),
    })?;
    if !range.contains(&parsed) {
        return Err(ConfigError::OutOfRange {
            property: property.to_string(),
            value: value.to_string(),
            min: range.start().to_string(),
            max: range.end().to_string(),
        });
    }
    Ok(parsed)
}

fn parse_flag(property: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            property: property.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Errors raised while loading a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnknownProperty(String),
    InvalidValue { property: String, value: String },
    OutOfRange {
        property: String,
        value: String,
        min: String,
        max: String,
    },
    MalformedLine(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownProperty(property) => {
                write!(f, "'{}' is not a valid property", property)
            }
            Self::InvalidValue { property, value } => {
                write!(f, "'{}' is not valid for property '{}'", value, property)
            }
            Self::OutOfRange {
                property,
                value,
                min,
                max,
            } => write!(
                f,
                "'{}' is out of range for property '{}' (expected {} to {})",
                value, property, min, max
            ),
            Self::MalformedLine(line) => {
                write!(f, "expected 'key:value', got '{}'", line)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
