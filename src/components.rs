//! Pure Yew view components for the strategy calculator.
//!
//! Everything here renders from props or report structs; no component owns
//! calculation state.

use race_strategy::pressure::Tyre;
use race_strategy::report::{BrakeReport, FuelReport, TempReport};
use race_strategy::units::PRESSURE_LABEL;
use yew::prelude::*;

/// Labelled numeric text input with an optional unit suffix.
#[derive(Properties, PartialEq)]
pub struct NumberFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    #[prop_or_default]
    pub unit: Option<AttrValue>,
    pub value: AttrValue,
    #[prop_or_default]
    pub placeholder: AttrValue,
    pub oninput: Callback<InputEvent>,
}

#[function_component(NumberField)]
pub fn number_field(props: &NumberFieldProps) -> Html {
    html! {
        <div class="form-group">
            <label for={props.id.clone()}>
                { props.label.clone() }
                if let Some(unit) = &props.unit {
                    <span class="unit">{ format!(" ({})", unit) }</span>
                }
            </label>
            <input
                type="text"
                inputmode="decimal"
                id={props.id.clone()}
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                oninput={props.oninput.clone()}
            />
        </div>
    }
}

/// Labelled checkbox.
#[derive(Properties, PartialEq)]
pub struct CheckboxProps {
    pub label: AttrValue,
    pub checked: bool,
    pub onchange: Callback<Event>,
}

#[function_component(Checkbox)]
pub fn checkbox(props: &CheckboxProps) -> Html {
    html! {
        <div class="form-group checkbox-group">
            <label>
                <input type="checkbox" checked={props.checked} onchange={props.onchange.clone()} />
                { props.label.clone() }
            </label>
        </div>
    }
}

fn stat_tile(label: &str, value: &str, unit: Option<&str>) -> Html {
    html! {
        <div class="stat">
            <div class="stat-label">{ label }</div>
            <div class="stat-value">
                { value }
                if let Some(unit) = unit {
                    <span class="unit">{ format!(" {}", unit) }</span>
                }
            </div>
        </div>
    }
}

/// Error line shown in place of a result panel.
pub fn render_error(message: &str) -> Html {
    html! {
        <div class="result">
            { "❌ " }<span class="err">{ message }</span>
        </div>
    }
}

/// Fuel tiles and the start-fuel callout.
pub fn render_fuel_report(report: &FuelReport) -> Html {
    let unit = Some(report.volume_label);
    html! {
        <div class="fuel-results">
            <div class="stats">
                { stat_tile("Pit stops", &report.pit_stops, None) }
                { stat_tile("Total laps", &report.total_laps, None) }
                { stat_tile("Laps per stint", &report.stint_laps, None) }
                { stat_tile("Final stint laps", &report.final_stint_laps, None) }
            </div>
            <div class="stats">
                { stat_tile("Total fuel", &report.total_fuel, unit) }
                { stat_tile("Fuel per stint", &report.stint_fuel, unit) }
                { stat_tile("Final stint fuel", &report.final_stint_fuel, unit) }
                { stat_tile("Buffer", &report.buffer, unit) }
            </div>
            <div class="callout">
                <div class="callout-label">{ "Start fuel" }</div>
                <div class="callout-value">
                    { report.start_fuel.as_str() }
                    <span class="unit">{ format!(" {}", report.volume_label) }</span>
                </div>
            </div>
        </div>
    }
}

fn render_tyre_grid(corrected: &[(Tyre, String)]) -> Html {
    html! {
        <div class="tyre-grid">
            { corrected.iter().map(|(tyre, value)| html! {
                <div class={classes!("tyre", tyre.label().to_lowercase())}>
                    <div class="tyre-label">{ tyre.label() }</div>
                    <div class="tyre-value">
                        { value.as_str() }<span class="unit">{ format!(" {}", PRESSURE_LABEL) }</span>
                    </div>
                </div>
            }).collect::<Html>() }
        </div>
    }
}

pub fn render_temp_report(report: &TempReport) -> Html {
    html! {
        <div class="temp-results">
            <div class="stats">
                { stat_tile("ΔT", &report.delta_temp, Some(report.temp_label)) }
                { stat_tile("Δp", &report.delta_pressure, Some(PRESSURE_LABEL)) }
                { stat_tile("Target window", &report.target_range, None) }
                { stat_tile("Status", report.status, None) }
            </div>
            { render_tyre_grid(&report.corrected) }
        </div>
    }
}

pub fn render_brake_report(report: &BrakeReport) -> Html {
    html! {
        <div class="brake-results">
            <div class="stats">
                { stat_tile("Δ steps", &report.delta_steps, None) }
                { stat_tile("Δp", &report.delta_pressure, Some(PRESSURE_LABEL)) }
                { stat_tile("Ducts", report.status, None) }
            </div>
            { render_tyre_grid(&report.corrected) }
        </div>
    }
}
