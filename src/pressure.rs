//! Cold tyre pressure corrections.
//!
//! Both corrections shift all four tyres by the same amount. Pressures are
//! psi regardless of the unit system in use.

use crate::policy::{PSI_PER_DEG_C, PSI_PER_DUCT_STEP};
use crate::units::round_to;
use crate::{CalcError, CalcResult};
use log::debug;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tyre {
    FL,
    FR,
    RL,
    RR,
}

impl Tyre {
    /// Canonical order used everywhere a set of tyres is listed.
    pub const ALL: [Tyre; 4] = [Tyre::FL, Tyre::FR, Tyre::RL, Tyre::RR];

    pub fn label(self) -> &'static str {
        match self {
            Tyre::FL => "FL",
            Tyre::FR => "FR",
            Tyre::RL => "RL",
            Tyre::RR => "RR",
        }
    }
}

impl fmt::Display for Tyre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One pressure per tyre, in psi.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PressureSet {
    #[serde(rename = "FL")]
    pub fl: f64,
    #[serde(rename = "FR")]
    pub fr: f64,
    #[serde(rename = "RL")]
    pub rl: f64,
    #[serde(rename = "RR")]
    pub rr: f64,
}

impl PressureSet {
    pub fn new(fl: f64, fr: f64, rl: f64, rr: f64) -> Self {
        Self { fl, fr, rl, rr }
    }

    pub fn get(&self, tyre: Tyre) -> f64 {
        match tyre {
            Tyre::FL => self.fl,
            Tyre::FR => self.fr,
            Tyre::RL => self.rl,
            Tyre::RR => self.rr,
        }
    }

    /// Pressures in FL, FR, RL, RR order.
    pub fn iter(&self) -> impl Iterator<Item = (Tyre, f64)> + '_ {
        Tyre::ALL.into_iter().map(move |t| (t, self.get(t)))
    }

    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            fl: f(self.fl),
            fr: f(self.fr),
            rl: f(self.rl),
            rr: f(self.rr),
        }
    }

    fn check_finite(&self) -> CalcResult<()> {
        match self.iter().find(|(_, p)| !p.is_finite()) {
            Some((tyre, _)) => Err(CalcError::invalid(format!(
                "Please fill in all fields: {} pressure is missing",
                tyre
            ))),
            None => Ok(()),
        }
    }

    /// Same shift on every tyre, rounded to two decimals.
    fn shifted(&self, delta: f64) -> Self {
        self.map(|p| round_to(p + delta, 2))
    }
}

/// Whether the corrected pressures land inside the driver's target window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowStatus {
    Within,
    Outside,
    /// No complete window was given.
    Unknown,
}

impl WindowStatus {
    pub fn label(self) -> &'static str {
        match self {
            WindowStatus::Within => "Within window",
            WindowStatus::Outside => "Adjust needed",
            WindowStatus::Unknown => "—",
        }
    }
}

// true / false / "unknown", matching what JS callers expect
impl Serialize for WindowStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            WindowStatus::Within => serializer.serialize_bool(true),
            WindowStatus::Outside => serializer.serialize_bool(false),
            WindowStatus::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TempCorrectionInput {
    pub pressures: PressureSet,
    /// Ambient before, °C.
    pub temp_before: f64,
    /// Ambient after, °C.
    pub temp_after: f64,
    #[serde(default)]
    pub target_min: Option<f64>,
    #[serde(default)]
    pub target_max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TempCorrectionResult {
    pub corrected: PressureSet,
    /// Ambient change in °C; the report layer converts it for display.
    pub delta_temp_c: f64,
    pub delta_pressure: f64,
    pub within_window: WindowStatus,
}

/// Shifts cold pressures by 0.1 psi per °C of ambient change.
pub fn correct_for_temperature(input: &TempCorrectionInput) -> CalcResult<TempCorrectionResult> {
    input.pressures.check_finite()?;
    if !input.temp_before.is_finite() || !input.temp_after.is_finite() {
        return Err(CalcError::invalid(
            "Please fill in all fields: both temperatures are required",
        ));
    }

    let delta_temp_c = input.temp_after - input.temp_before;
    let delta_pressure = PSI_PER_DEG_C * delta_temp_c;
    let corrected = input.pressures.shifted(delta_pressure);

    let within_window = match (input.target_min, input.target_max) {
        (Some(min), Some(max)) if min.is_finite() && max.is_finite() => {
            if corrected.iter().all(|(_, p)| min <= p && p <= max) {
                WindowStatus::Within
            } else {
                WindowStatus::Outside
            }
        }
        _ => WindowStatus::Unknown,
    };

    debug!(
        "Temperature correction: ΔT {:.1} °C → Δp {:.2} psi, window {:?}",
        delta_temp_c, delta_pressure, within_window
    );

    Ok(TempCorrectionResult {
        corrected,
        delta_temp_c: round_to(delta_temp_c, 2),
        delta_pressure: round_to(delta_pressure, 2),
        within_window,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DuctDirection {
    Opened,
    Closed,
    Unchanged,
}

impl DuctDirection {
    pub fn from_delta(delta_steps: i32) -> Self {
        match delta_steps {
            0 => DuctDirection::Unchanged,
            d if d > 0 => DuctDirection::Opened,
            _ => DuctDirection::Closed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DuctDirection::Opened => "More open",
            DuctDirection::Closed => "More closed",
            DuctDirection::Unchanged => "No change",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrakeDuctCorrectionInput {
    pub pressures: PressureSet,
    pub step_before: i32,
    pub step_after: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrakeDuctCorrectionResult {
    pub corrected: PressureSet,
    pub delta_steps: i32,
    pub delta_pressure: f64,
    pub direction: DuctDirection,
}

/// Shifts cold pressures by 0.2 psi per brake-duct step.
pub fn correct_for_brake_duct(
    input: &BrakeDuctCorrectionInput,
) -> CalcResult<BrakeDuctCorrectionResult> {
    input.pressures.check_finite()?;

    let delta_steps = input
        .step_after
        .checked_sub(input.step_before)
        .ok_or_else(|| CalcError::invalid("Brake duct steps are out of range"))?;
    let delta_pressure = PSI_PER_DUCT_STEP * delta_steps as f64;

    Ok(BrakeDuctCorrectionResult {
        corrected: input.pressures.shifted(delta_pressure),
        delta_steps,
        delta_pressure: round_to(delta_pressure, 2),
        direction: DuctDirection::from_delta(delta_steps),
    })
}
