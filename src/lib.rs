//! Race strategy calculation engine.
//!
//! Everything in here works in canonical units (liters, degrees Celsius, psi).
//! Conversion to and from the unit system the driver is looking at happens at
//! the edges, in [`form`] on the way in and [`report`] on the way out.

use log::warn;
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod fields;
pub mod form;
pub mod fuel;
pub mod pressure;
pub mod report;
pub mod units;

pub use fuel::{compute_fuel, FuelInput, FuelResult, LapTime, RaceTime};
pub use pressure::{
    correct_for_brake_duct, correct_for_temperature, BrakeDuctCorrectionInput,
    BrakeDuctCorrectionResult, DuctDirection, PressureSet, TempCorrectionInput,
    TempCorrectionResult, Tyre, WindowStatus,
};
pub use units::UnitSystem;

/// Fixed calculation policy. These are not runtime-configurable.
pub mod policy {
    /// US gallons per liter.
    pub const GAL_PER_L: f64 = 0.26417205236;
    /// Liters per US gallon.
    pub const L_PER_GAL: f64 = 3.785411784;
    /// Share of a normal lap's fuel burned on a pit-in lap.
    pub const PIT_LAP_FACTOR: f64 = 0.9;
    /// Cold pressure shift per degree Celsius of ambient change.
    pub const PSI_PER_DEG_C: f64 = 0.1;
    /// Pressure shift per brake-duct step.
    pub const PSI_PER_DUCT_STEP: f64 = 0.2;
    /// Reserve shown alongside the fuel plan.
    pub const SAFETY_BUFFER_L: f64 = 1.0;
}

/// Error returned by every calculation in this crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalcError {
    #[error("{0}")]
    InvalidInput(String),
}

impl CalcError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        CalcError::InvalidInput(reason.into())
    }
}

pub type CalcResult<T> = Result<T, CalcError>;

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize result: {}", e)))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to deserialize {}: {}", what, e)))
}

fn calc_error_to_js(err: CalcError) -> JsValue {
    warn!("Calculation rejected: {}", err);
    JsValue::from_str(&err.to_string())
}

/// JavaScript entry point for the fuel plan.
///
/// Takes a camelCase object shaped like [`FuelInput`] (volumes in liters) and
/// returns a [`FuelResult`] object. Invalid input is thrown as a string.
#[wasm_bindgen(js_name = calculateFuel)]
pub fn calculate_fuel_js(input: JsValue) -> Result<JsValue, JsValue> {
    let input: FuelInput = from_js(input, "fuel input")?;
    let result = compute_fuel(&input).map_err(calc_error_to_js)?;
    to_js(&result)
}

/// JavaScript entry point for the ambient temperature pressure correction.
#[wasm_bindgen(js_name = correctTemperature)]
pub fn correct_temperature_js(input: JsValue) -> Result<JsValue, JsValue> {
    let input: TempCorrectionInput = from_js(input, "temperature correction input")?;
    let result = correct_for_temperature(&input).map_err(calc_error_to_js)?;
    to_js(&result)
}

/// JavaScript entry point for the brake-duct pressure correction.
#[wasm_bindgen(js_name = correctBrakeDuct)]
pub fn correct_brake_duct_js(input: JsValue) -> Result<JsValue, JsValue> {
    let input: BrakeDuctCorrectionInput = from_js(input, "brake duct correction input")?;
    let result = correct_for_brake_duct(&input).map_err(calc_error_to_js)?;
    to_js(&result)
}
