//! Policy overrides parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::policy::{Mode, ViewportPolicy};

pub const ENV_MODE: &str = "ROUTETOPO_MODE";
pub const ENV_ZOOM_SPEED: &str = "ROUTETOPO_ZOOM_SPEED";
pub const ENV_MIN_SCALE: &str = "ROUTETOPO_MIN_SCALE";
pub const ENV_MAX_SCALE: &str = "ROUTETOPO_MAX_SCALE";
pub const ENV_LONG_PRESS_MS: &str = "ROUTETOPO_LONG_PRESS_MS";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a number, got {value:?}")]
    NotANumber { var: &'static str, value: String },
    #[error("{var} must be positive, got {value}")]
    NotPositive { var: &'static str, value: f64 },
    #[error("unknown mode {0:?}; expected \"viewer\" or \"editor\"")]
    UnknownMode(String),
    #[error("min scale {min} exceeds max scale {max}")]
    InvertedScaleRange { min: f64, max: f64 },
}

/// Values that replace the preset for a mode. Absent fields keep the preset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolicyOverrides {
    pub mode: Option<Mode>,
    pub zoom_speed: Option<f64>,
    pub min_scale: Option<f64>,
    pub max_scale: Option<f64>,
    pub long_press_ms: Option<f64>,
}

impl PolicyOverrides {
    /// Read overrides from the process environment.
    ///
    /// Optional:
    /// - `ROUTETOPO_MODE`: `viewer` or `editor`
    /// - `ROUTETOPO_ZOOM_SPEED`: scale step per wheel notch
    /// - `ROUTETOPO_MIN_SCALE` / `ROUTETOPO_MAX_SCALE`
    /// - `ROUTETOPO_LONG_PRESS_MS`: hold time before a point is deleted
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var_os(key).map(|v| v.to_string_lossy().into_owned()))
    }

    /// Read overrides through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is present but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mode = lookup(ENV_MODE).map(|raw| parse_mode(&raw)).transpose()?;
        Ok(Self {
            mode,
            zoom_speed: parse_positive(&lookup, ENV_ZOOM_SPEED)?,
            min_scale: parse_positive(&lookup, ENV_MIN_SCALE)?,
            max_scale: parse_positive(&lookup, ENV_MAX_SCALE)?,
            long_press_ms: parse_positive(&lookup, ENV_LONG_PRESS_MS)?,
        })
    }

    /// Build the policy: the preset for the chosen mode (or `default_mode`)
    /// with every present override applied.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvertedScaleRange`] if the resulting min exceeds max.
    pub fn resolve(&self, default_mode: Mode) -> Result<ViewportPolicy, ConfigError> {
        let mut policy = ViewportPolicy::for_mode(self.mode.unwrap_or(default_mode));
        if let Some(v) = self.zoom_speed {
            policy.zoom_speed = v;
        }
        if let Some(v) = self.min_scale {
            policy.min_scale = v;
        }
        if let Some(v) = self.max_scale {
            policy.max_scale = v;
        }
        if let Some(v) = self.long_press_ms {
            policy.long_press_ms = v;
        }
        if policy.min_scale > policy.max_scale {
            return Err(ConfigError::InvertedScaleRange { min: policy.min_scale, max: policy.max_scale });
        }
        Ok(policy)
    }
}

fn parse_mode(raw: &str) -> Result<Mode, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "viewer" => Ok(Mode::Viewer),
        "editor" => Ok(Mode::Editor),
        _ => Err(ConfigError::UnknownMode(raw.to_owned())),
    }
}

fn parse_positive(lookup: &impl Fn(&str) -> Option<String>, var: &'static str) -> Result<Option<f64>, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let value = match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => return Err(ConfigError::NotANumber { var, value: raw }),
    };
    if value <= 0.0 {
        return Err(ConfigError::NotPositive { var, value });
    }
    Ok(Some(value))
}
