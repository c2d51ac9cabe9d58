//! Display rendering of calculation results.
//!
//! Results are stored in canonical units; a report is rebuilt from them
//! whenever the unit system changes, so nothing is ever converted back from
//! already-rounded display text.

use crate::fuel::{FuelInput, FuelResult};
use crate::policy::SAFETY_BUFFER_L;
use crate::pressure::{
    BrakeDuctCorrectionResult, PressureSet, TempCorrectionInput, TempCorrectionResult, Tyre,
};
use crate::units::{format_fixed, format_rounded, UnitSystem, PRESSURE_LABEL};

fn volume(liters: f64, units: UnitSystem) -> String {
    format_rounded(units.volume_to_display(liters), 2)
}

fn pressure_grid(set: &PressureSet) -> Vec<(Tyre, String)> {
    set.iter().map(|(t, p)| (t, format_rounded(p, 2))).collect()
}

/// Tile values for the fuel panel.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelReport {
    pub volume_label: &'static str,
    pub pit_stops: String,
    pub total_laps: String,
    pub stint_laps: String,
    pub final_stint_laps: String,
    pub total_fuel: String,
    pub stint_fuel: String,
    pub final_stint_fuel: String,
    pub buffer: String,
    /// Headline figure, one fixed decimal.
    pub start_fuel: String,
    pub summary: String,
}

impl FuelReport {
    pub fn new(input: &FuelInput, result: &FuelResult, units: UnitSystem) -> Self {
        Self {
            volume_label: units.volume_label(),
            pit_stops: result.pit_stops.to_string(),
            total_laps: result.total_laps.to_string(),
            stint_laps: result.stint_laps.to_string(),
            final_stint_laps: result.final_stint_laps.to_string(),
            total_fuel: volume(result.total_fuel_l, units),
            stint_fuel: volume(result.stint_fuel_l, units),
            final_stint_fuel: volume(result.final_stint_fuel_l, units),
            buffer: volume(SAFETY_BUFFER_L, units),
            start_fuel: format_fixed(units.volume_to_display(result.start_fuel_l), 1),
            summary: fuel_summary(input, result, units),
        }
    }
}

/// Plain-text summary put on the clipboard by the copy button.
pub fn fuel_summary(input: &FuelInput, result: &FuelResult, units: UnitSystem) -> String {
    let mut base = result.race_laps.to_string();
    if input.include_formation_lap {
        base.push_str(" + formation");
    }
    if input.include_cooldown_lap {
        base.push_str(" + cool-down");
    }
    let unit = units.volume_label();
    format!(
        "✅ Done.\nEstimated laps: {} (base: {})\nTotal fuel (adj.): {} {}\nStart fuel: {} {}",
        result.total_laps,
        base,
        volume(result.total_fuel_l, units),
        unit,
        volume(result.start_fuel_l, units),
        unit
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct TempReport {
    pub corrected: Vec<(Tyre, String)>,
    /// Ambient change in the display unit, one decimal.
    pub delta_temp: String,
    pub temp_label: &'static str,
    pub delta_pressure: String,
    pub target_range: String,
    pub status: &'static str,
}

impl TempReport {
    pub fn new(
        input: &TempCorrectionInput,
        result: &TempCorrectionResult,
        units: UnitSystem,
    ) -> Self {
        let target_range = match (input.target_min, input.target_max) {
            (Some(min), Some(max)) => format!(
                "{}–{} {}",
                format_rounded(min, 2),
                format_rounded(max, 2),
                PRESSURE_LABEL
            ),
            _ => "—".to_string(),
        };
        Self {
            corrected: pressure_grid(&result.corrected),
            // From the typed temperatures, not the engine's already-rounded delta
            delta_temp: format_rounded(
                units.temp_delta_to_display(input.temp_after - input.temp_before),
                1,
            ),
            temp_label: units.temp_label(),
            delta_pressure: format_rounded(result.delta_pressure, 2),
            target_range,
            status: result.within_window.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrakeReport {
    pub corrected: Vec<(Tyre, String)>,
    pub delta_steps: String,
    pub delta_pressure: String,
    pub status: &'static str,
}

impl BrakeReport {
    pub fn new(result: &BrakeDuctCorrectionResult) -> Self {
        Self {
            corrected: pressure_grid(&result.corrected),
            delta_steps: result.delta_steps.to_string(),
            delta_pressure: format_rounded(result.delta_pressure, 2),
            status: result.direction.label(),
        }
    }
}
