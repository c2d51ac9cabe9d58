//! Metric/imperial conversion.
//!
//! Volumes are liters or US gallons, temperatures Celsius or Fahrenheit.
//! Pressure is psi in both systems and never converted.

use crate::policy::{GAL_PER_L, L_PER_GAL};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const PRESSURE_LABEL: &str = "psi";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn volume_label(self) -> &'static str {
        match self {
            UnitSystem::Metric => "L",
            UnitSystem::Imperial => "gal",
        }
    }

    pub fn temp_label(self) -> &'static str {
        match self {
            UnitSystem::Metric => "°C",
            UnitSystem::Imperial => "°F",
        }
    }

    /// Liters → this system's volume unit.
    pub fn volume_to_display(self, liters: f64) -> f64 {
        match self {
            UnitSystem::Metric => liters,
            UnitSystem::Imperial => volume_to_imperial(liters),
        }
    }

    /// This system's volume unit → liters.
    pub fn volume_from_display(self, value: f64) -> f64 {
        match self {
            UnitSystem::Metric => value,
            UnitSystem::Imperial => volume_to_metric(value),
        }
    }

    pub fn temp_to_display(self, celsius: f64) -> f64 {
        match self {
            UnitSystem::Metric => celsius,
            UnitSystem::Imperial => temp_to_imperial(celsius),
        }
    }

    pub fn temp_from_display(self, value: f64) -> f64 {
        match self {
            UnitSystem::Metric => value,
            UnitSystem::Imperial => temp_to_metric(value),
        }
    }

    /// A temperature difference in °C expressed in this system. No offset.
    pub fn temp_delta_to_display(self, delta_c: f64) -> f64 {
        match self {
            UnitSystem::Metric => delta_c,
            UnitSystem::Imperial => temp_delta_to_imperial(delta_c),
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Metric => write!(f, "Metric"),
            UnitSystem::Imperial => write!(f, "Imperial"),
        }
    }
}

#[inline]
pub fn volume_to_imperial(liters: f64) -> f64 {
    liters * GAL_PER_L
}

#[inline]
pub fn volume_to_metric(gallons: f64) -> f64 {
    gallons * L_PER_GAL
}

#[inline]
pub fn temp_to_imperial(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

#[inline]
pub fn temp_to_metric(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

#[inline]
pub fn temp_delta_to_imperial(delta_c: f64) -> f64 {
    delta_c * 9.0 / 5.0
}

#[inline]
pub fn temp_delta_to_metric(delta_f: f64) -> f64 {
    delta_f * 5.0 / 9.0
}

/// Round to `decimals` places with ties toward +∞, so `-0.025` becomes
/// `-0.02` and `0.025` becomes `0.03`. Non-finite input gives NaN.
pub fn round_to(x: f64, decimals: u32) -> f64 {
    if !x.is_finite() {
        return f64::NAN;
    }
    let scale = 10f64.powi(decimals as i32);
    let rounded = (x * scale + 0.5).floor() / scale;
    // Avoid printing "-0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Rounded number without trailing zeros, e.g. `89.4` rather than `89.40`.
pub fn format_rounded(x: f64, decimals: u32) -> String {
    let r = round_to(x, decimals);
    if r.is_nan() {
        return "NaN".to_string();
    }
    let fixed = format!("{:.*}", decimals as usize, r);
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}

/// Rounded number with exactly `decimals` places, e.g. `33.0`.
pub fn format_fixed(x: f64, decimals: u32) -> String {
    let r = round_to(x, decimals);
    if r.is_nan() {
        return "NaN".to_string();
    }
    format!("{:.*}", decimals as usize, r)
}

/// Decimal places used when a volume field is rewritten after a unit switch.
pub const VOLUME_FIELD_DECIMALS: u32 = 2;
/// Decimal places used when a temperature field is rewritten after a unit switch.
pub const TEMP_FIELD_DECIMALS: u32 = 1;
