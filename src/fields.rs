//! Parsing of raw text field values.
//!
//! An empty field and a field holding garbage are different things: optional
//! fields fall back to their default only when empty, and anything present
//! but unparsable is rejected.

use crate::units::format_fixed;
use crate::{CalcError, CalcResult};
use once_cell::sync::Lazy;
use regex::Regex;

// Accepts "27", "-3", "27.5", "27,5", ".5" and "27."
static NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+([.,]\d*)?|[.,]\d+)$").unwrap());

/// Parse a number field. `Ok(None)` means the field is empty.
///
/// # Examples
/// ```
/// use race_strategy::fields::parse_number;
/// assert_eq!(parse_number("27,5", "FL"), Ok(Some(27.5)));
/// assert_eq!(parse_number("  ", "FL"), Ok(None));
/// assert!(parse_number("27psi", "FL").is_err());
/// ```
pub fn parse_number(input: &str, field_name: &str) -> Result<Option<f64>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if !NUMBER_REGEX.is_match(trimmed) {
        return Err(format!("{} must be a valid number", field_name));
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .map(Some)
        .map_err(|_| format!("{} must be a valid number", field_name))
}

/// Check a parsed value against optional bounds.
pub fn validate_range<T>(
    value: T,
    min: Option<T>,
    max: Option<T>,
    field_name: &str,
) -> Result<T, String>
where
    T: std::fmt::Display + PartialOrd,
{
    if let Some(min_val) = min {
        if value < min_val {
            return Err(format!("{} must be at least {}", field_name, min_val));
        }
    }
    if let Some(max_val) = max {
        if value > max_val {
            return Err(format!("{} cannot exceed {}", field_name, max_val));
        }
    }
    Ok(value)
}

fn whole(value: f64, field_name: &str) -> Result<f64, String> {
    if value.fract() != 0.0 {
        return Err(format!("{} must be a whole number", field_name));
    }
    Ok(value)
}

/// A field that must be filled in.
pub fn required_number(input: &str, field_name: &str) -> CalcResult<f64> {
    match parse_number(input, field_name).map_err(CalcError::InvalidInput)? {
        Some(v) => Ok(v),
        None => Err(CalcError::invalid(format!("{} cannot be empty", field_name))),
    }
}

/// A non-negative field that defaults when left empty.
pub fn optional_number(input: &str, field_name: &str, default: f64) -> CalcResult<f64> {
    match parse_number(input, field_name).map_err(CalcError::InvalidInput)? {
        Some(v) => validate_range(v, Some(0.0), None, field_name).map_err(CalcError::InvalidInput),
        None => Ok(default),
    }
}

/// An optional bound such as a target pressure; `None` when empty.
pub fn optional_bound(input: &str, field_name: &str) -> CalcResult<Option<f64>> {
    parse_number(input, field_name).map_err(CalcError::InvalidInput)
}

/// A whole, non-negative count that is zero when empty (laps, stops).
pub fn optional_count(input: &str, field_name: &str) -> CalcResult<u32> {
    let Some(v) = parse_number(input, field_name).map_err(CalcError::InvalidInput)? else {
        return Ok(0);
    };
    whole(v, field_name)
        .and_then(|v| validate_range(v, Some(0.0), Some(u32::MAX as f64), field_name))
        .map(|v| v as u32)
        .map_err(CalcError::InvalidInput)
}

/// A whole step setting that must be filled in. Negative steps are allowed.
pub fn required_step(input: &str, field_name: &str) -> CalcResult<i32> {
    let v = required_number(input, field_name)?;
    whole(v, field_name)
        .and_then(|v| {
            validate_range(v, Some(i32::MIN as f64), Some(i32::MAX as f64), field_name)
        })
        .map(|v| v as i32)
        .map_err(CalcError::InvalidInput)
}

/// Rewrite a field's text through `convert`, keeping `decimals` places.
///
/// Returns `None` when the field is empty or unparsable so the caller leaves
/// it as the user typed it.
pub fn convert_field(input: &str, convert: impl Fn(f64) -> f64, decimals: u32) -> Option<String> {
    match parse_number(input, "") {
        Ok(Some(v)) => Some(format_fixed(convert(v), decimals)),
        _ => None,
    }
}
