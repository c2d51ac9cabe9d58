//! Raw form state and its translation into engine inputs.
//!
//! Field values are kept as the text the user typed, in whatever unit system
//! is active. `to_input` parses them and normalizes volumes to liters and
//! temperatures to °C before anything reaches the engine.

use crate::fields::{
    convert_field, optional_bound, optional_count, optional_number, required_number, required_step,
};
use crate::fuel::{FuelInput, LapTime, RaceTime};
use crate::pressure::{BrakeDuctCorrectionInput, PressureSet, TempCorrectionInput};
use crate::units::{UnitSystem, TEMP_FIELD_DECIMALS, VOLUME_FIELD_DECIMALS};
use crate::CalcResult;
use log::debug;

/// Which variant of the fuel form is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FuelMode {
    /// Race time, pace and consumption only.
    #[default]
    Normal,
    /// Adds tank size, optional laps and mandatory stops.
    Pro,
}

/// Fields present in both fuel form variants.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FuelFields {
    pub race_hours: String,
    pub race_minutes: String,
    pub lap_minutes: String,
    pub lap_seconds: String,
    pub fuel_per_lap: String,
    pub fixed_laps: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuelForm {
    pub mode: FuelMode,
    pub normal: FuelFields,
    pub pro: FuelFields,
    pub tank: String,
    pub include_formation: bool,
    pub include_cooldown: bool,
    pub mandatory_stops: String,
}

impl Default for FuelForm {
    fn default() -> Self {
        Self {
            mode: FuelMode::Normal,
            normal: FuelFields::default(),
            pro: FuelFields::default(),
            tank: String::new(),
            include_formation: true,
            include_cooldown: true,
            mandatory_stops: String::new(),
        }
    }
}

impl FuelForm {
    pub fn active_fields(&self) -> &FuelFields {
        match self.mode {
            FuelMode::Normal => &self.normal,
            FuelMode::Pro => &self.pro,
        }
    }

    pub fn active_fields_mut(&mut self) -> &mut FuelFields {
        match self.mode {
            FuelMode::Normal => &mut self.normal,
            FuelMode::Pro => &mut self.pro,
        }
    }

    /// Build the engine input. Volumes are read in `units` and returned in liters.
    ///
    /// The normal form always counts formation and cool-down laps and knows
    /// nothing about the tank or mandatory stops.
    pub fn to_input(&self, units: UnitSystem) -> CalcResult<FuelInput> {
        let fields = self.active_fields();

        // Consumption first so a bad value there is what the driver sees.
        let fuel_per_lap = units.volume_from_display(required_number(
            &fields.fuel_per_lap,
            "Fuel per lap",
        )?);

        let race_time = RaceTime {
            hours: optional_number(&fields.race_hours, "Race hours", 0.0)?,
            minutes: optional_number(&fields.race_minutes, "Race minutes", 0.0)?,
        };
        let lap_time = LapTime {
            minutes: optional_number(&fields.lap_minutes, "Lap minutes", 0.0)?,
            seconds: optional_number(&fields.lap_seconds, "Lap seconds", 0.0)?,
        };
        let fixed_lap_count = optional_count(&fields.fixed_laps, "Fixed laps")?;

        let input = match self.mode {
            FuelMode::Normal => FuelInput {
                race_time,
                lap_time,
                fuel_per_lap,
                fixed_lap_count,
                tank_capacity: 0.0,
                include_formation_lap: true,
                include_cooldown_lap: true,
                mandatory_stops: 0,
            },
            FuelMode::Pro => FuelInput {
                race_time,
                lap_time,
                fuel_per_lap,
                fixed_lap_count,
                tank_capacity: units
                    .volume_from_display(optional_number(&self.tank, "Tank capacity", 0.0)?),
                include_formation_lap: self.include_formation,
                include_cooldown_lap: self.include_cooldown,
                mandatory_stops: optional_count(&self.mandatory_stops, "Mandatory stops")?,
            },
        };
        debug!("Fuel form ({:?}, {}) → {:?}", self.mode, units, input);
        Ok(input)
    }

    /// Rewrite the volume fields once for a switch from `from` to `to`.
    pub fn convert_units(&mut self, from: UnitSystem, to: UnitSystem) {
        if from == to {
            return;
        }
        let convert = |v: f64| to.volume_to_display(from.volume_from_display(v));
        for text in [
            &mut self.normal.fuel_per_lap,
            &mut self.pro.fuel_per_lap,
            &mut self.tank,
        ] {
            if let Some(converted) = convert_field(text, convert, VOLUME_FIELD_DECIMALS) {
                *text = converted;
            }
        }
    }

    /// Clear all fields but keep the selected mode.
    pub fn reset(&mut self) {
        *self = Self {
            mode: self.mode,
            ..Self::default()
        };
    }
}

/// The four pressure inputs shared by both tyre forms.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PressureFields {
    pub fl: String,
    pub fr: String,
    pub rl: String,
    pub rr: String,
}

impl PressureFields {
    pub fn to_set(&self) -> CalcResult<PressureSet> {
        Ok(PressureSet {
            fl: required_number(&self.fl, "FL pressure")?,
            fr: required_number(&self.fr, "FR pressure")?,
            rl: required_number(&self.rl, "RL pressure")?,
            rr: required_number(&self.rr, "RR pressure")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TempForm {
    pub pressures: PressureFields,
    pub temp_before: String,
    pub temp_after: String,
    pub target_min: String,
    pub target_max: String,
}

impl TempForm {
    /// Temperatures are read in `units` and returned in °C.
    pub fn to_input(&self, units: UnitSystem) -> CalcResult<TempCorrectionInput> {
        let pressures = self.pressures.to_set()?;
        let before = required_number(&self.temp_before, "Temperature before")?;
        let after = required_number(&self.temp_after, "Temperature after")?;
        Ok(TempCorrectionInput {
            pressures,
            temp_before: units.temp_from_display(before),
            temp_after: units.temp_from_display(after),
            target_min: optional_bound(&self.target_min, "Target min")?,
            target_max: optional_bound(&self.target_max, "Target max")?,
        })
    }

    pub fn convert_units(&mut self, from: UnitSystem, to: UnitSystem) {
        if from == to {
            return;
        }
        let convert = |v: f64| to.temp_to_display(from.temp_from_display(v));
        for text in [&mut self.temp_before, &mut self.temp_after] {
            if let Some(converted) = convert_field(text, convert, TEMP_FIELD_DECIMALS) {
                *text = converted;
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BrakeForm {
    pub pressures: PressureFields,
    pub step_before: String,
    pub step_after: String,
}

impl BrakeForm {
    pub fn to_input(&self) -> CalcResult<BrakeDuctCorrectionInput> {
        Ok(BrakeDuctCorrectionInput {
            pressures: self.pressures.to_set()?,
            step_before: required_step(&self.step_before, "Brake duct before")?,
            step_after: required_step(&self.step_after, "Brake duct after")?,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
