//! Application-level configuration constants.

// UI Behavior
pub const COPY_TOAST_MS: u32 = 1500;
pub const DEFAULT_THEME: &str = "dark";

// Page header per tab
pub const FUEL_TITLE: &str = "Fuel Calculator";
pub const FUEL_DESC: &str = "Enter race time and lap pace (or fixed laps), then Calculate. \
    Use Pro for tank size, formation/cool-down laps, and mandatory pitstops.";
pub const TEMP_TITLE: &str = "Tyre Pressures — Temperature Change";
pub const TEMP_DESC: &str = "Input current cold pressures and ambient before/after. \
    We apply 0.1 psi per °C and preview corrected pressures vs target window.";
pub const BRAKE_TITLE: &str = "Tyre Pressures — Brake Duct Change";
pub const BRAKE_DESC: &str = "Enter current pressures and brake-duct settings before/after. \
    We apply 0.2 psi per step to estimate new pressures.";
