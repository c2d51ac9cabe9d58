//! Main module for the race strategy calculator using Yew.
//! Wires the three calculator forms, unit and theme toggles, and clipboard copy.

use gloo_timers::callback::Timeout;
use log::{info, warn};
use race_strategy::form::{BrakeForm, FuelForm, FuelMode, PressureFields, TempForm};
use race_strategy::pressure::Tyre;
use race_strategy::report::{BrakeReport, FuelReport, TempReport};
use race_strategy::units::PRESSURE_LABEL;
use race_strategy::{
    compute_fuel, correct_for_brake_duct, correct_for_temperature, BrakeDuctCorrectionInput,
    BrakeDuctCorrectionResult, CalcResult, FuelInput, FuelResult, TempCorrectionInput,
    TempCorrectionResult, UnitSystem,
};
use yew::prelude::*;

mod clipboard;
mod components;
mod config;
mod hooks;

use components::{
    render_brake_report, render_error, render_fuel_report, render_temp_report, Checkbox,
    NumberField,
};
use config::*;
use hooks::{use_form, FormState};

// ──────────────────────────────────────────────────────────────────────────────
// Types

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Fuel,
    Temp,
    Brake,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Fuel, Tab::Temp, Tab::Brake];

    fn label(self) -> &'static str {
        match self {
            Tab::Fuel => "Fuel",
            Tab::Temp => "Temperature",
            Tab::Brake => "Brake ducts",
        }
    }

    fn header(self) -> (&'static str, &'static str) {
        match self {
            Tab::Fuel => (FUEL_TITLE, FUEL_DESC),
            Tab::Temp => (TEMP_TITLE, TEMP_DESC),
            Tab::Brake => (BRAKE_TITLE, BRAKE_DESC),
        }
    }
}

/// Last Calculate press of a form: canonical input and result, or the error
/// message to show instead. `None` until the first press or after a reset.
type Outcome<I, R> = Option<Result<(I, R), String>>;

// ──────────────────────────────────────────────────────────────────────────────
// Helper functions

/// Parse a form and run one engine operation on it.
fn run<I, R>(
    parsed: CalcResult<I>,
    calc: impl Fn(&I) -> CalcResult<R>,
) -> Result<(I, R), String> {
    let input = parsed.map_err(|e| e.to_string())?;
    let result = calc(&input).map_err(|e| e.to_string())?;
    Ok((input, result))
}

fn apply_theme(theme: &str) {
    if let Err(e) = gloo_utils::document_element().set_attribute("data-theme", theme) {
        warn!("Failed to set theme: {:?}", e);
    }
}

fn pressure_inputs<F: Clone + PartialEq + 'static>(
    form: &FormState<F>,
    id_prefix: &str,
    fields: &PressureFields,
    access: fn(&mut F) -> &mut PressureFields,
) -> Html {
    let inputs = [
        (Tyre::FL, &fields.fl, form.bind(move |f| &mut access(f).fl)),
        (Tyre::FR, &fields.fr, form.bind(move |f| &mut access(f).fr)),
        (Tyre::RL, &fields.rl, form.bind(move |f| &mut access(f).rl)),
        (Tyre::RR, &fields.rr, form.bind(move |f| &mut access(f).rr)),
    ];
    html! {
        <div class="tyre-inputs">
            { inputs.into_iter().map(|(tyre, value, oninput)| html! {
                <NumberField
                    id={format!("{}{}", id_prefix, tyre.label())}
                    label={tyre.label()}
                    unit={Some(AttrValue::from(PRESSURE_LABEL))}
                    value={value.clone()}
                    {oninput}
                />
            }).collect::<Html>() }
        </div>
    }
}

fn fuel_fields(fuel: &FormState<FuelForm>, units: UnitSystem) -> Html {
    let fields = fuel.form.active_fields();
    let volume = Some(AttrValue::from(units.volume_label()));
    html! {
        <>
            <div class="form-row">
                <NumberField id="raceH" label="Race hours" value={fields.race_hours.clone()}
                    oninput={fuel.bind(|f| &mut f.active_fields_mut().race_hours)} />
                <NumberField id="raceM" label="Race minutes" value={fields.race_minutes.clone()}
                    oninput={fuel.bind(|f| &mut f.active_fields_mut().race_minutes)} />
            </div>
            <div class="form-row">
                <NumberField id="lapM" label="Lap minutes" value={fields.lap_minutes.clone()}
                    oninput={fuel.bind(|f| &mut f.active_fields_mut().lap_minutes)} />
                <NumberField id="lapS" label="Lap seconds" value={fields.lap_seconds.clone()}
                    oninput={fuel.bind(|f| &mut f.active_fields_mut().lap_seconds)} />
            </div>
            <div class="form-row">
                <NumberField id="fuelLap" label="Fuel per lap" unit={volume.clone()}
                    value={fields.fuel_per_lap.clone()}
                    oninput={fuel.bind(|f| &mut f.active_fields_mut().fuel_per_lap)} />
                <NumberField id="lapsFixed" label="Fixed total laps" placeholder="optional"
                    value={fields.fixed_laps.clone()}
                    oninput={fuel.bind(|f| &mut f.active_fields_mut().fixed_laps)} />
            </div>
            if fuel.form.mode == FuelMode::Pro {
                <div class="form-row">
                    <NumberField id="tank" label="Tank capacity" unit={volume}
                        value={fuel.form.tank.clone()}
                        oninput={fuel.bind(|f| &mut f.tank)} />
                    <NumberField id="mandStops" label="Mandatory stops"
                        value={fuel.form.mandatory_stops.clone()}
                        oninput={fuel.bind(|f| &mut f.mandatory_stops)} />
                </div>
                <div class="form-row">
                    <Checkbox label="Formation lap" checked={fuel.form.include_formation}
                        onchange={fuel.bind_checkbox(|f| &mut f.include_formation)} />
                    <Checkbox label="Cool-down lap" checked={fuel.form.include_cooldown}
                        onchange={fuel.bind_checkbox(|f| &mut f.include_cooldown)} />
                </div>
            }
        </>
    }
}

// ──────────────────────────────────────────────────────────────────────────────

/// Primary application component wiring state, effects, and UI elements.
#[function_component(App)]
fn app() -> Html {
    let units = use_state(UnitSystem::default);
    let theme = use_state(|| DEFAULT_THEME.to_string());
    let tab = use_state(|| Tab::Fuel);

    let fuel = use_form::<FuelForm>();
    let temp = use_form::<TempForm>();
    let brake = use_form::<BrakeForm>();

    // Canonical results; reports are rebuilt from these on every render
    let fuel_outcome = use_state(|| None as Outcome<FuelInput, FuelResult>);
    let temp_outcome = use_state(|| None as Outcome<TempCorrectionInput, TempCorrectionResult>);
    let brake_outcome =
        use_state(|| None as Outcome<BrakeDuctCorrectionInput, BrakeDuctCorrectionResult>);

    let copy_toast = use_state(|| false);
    let copy_error = use_state(|| None::<String>);
    let toast_timer = use_state(|| None::<Timeout>);

    // Apply the starting theme once on mount
    {
        let theme = theme.clone();
        use_effect_with((), move |_| {
            apply_theme(&theme);
            || ()
        });
    }

    let toggle_theme = {
        let theme = theme.clone();
        Callback::from(move |_: MouseEvent| {
            let next = if *theme == "light" { "dark" } else { "light" };
            apply_theme(next);
            theme.set(next.to_string());
        })
    };

    // Rewrites typed volume/temperature fields once; results re-render from canonical state
    let set_units = {
        let units = units.clone();
        let fuel = fuel.clone();
        let temp = temp.clone();
        Callback::from(move |next: UnitSystem| {
            let prev = *units;
            if prev == next {
                return;
            }
            fuel.update(|f| f.convert_units(prev, next));
            temp.update(|f| f.convert_units(prev, next));
            units.set(next);
            info!("Units switched from {} to {}", prev, next);
        })
    };

    // --- Fuel ---
    let on_fuel_calc = {
        let form = fuel.form.clone();
        let units = *units;
        let outcome = fuel_outcome.clone();
        let copy_error = copy_error.clone();
        Callback::from(move |_: MouseEvent| {
            let out = run(form.to_input(units), compute_fuel);
            if let Err(e) = &out {
                warn!("Fuel calculation rejected: {}", e);
            }
            copy_error.set(None);
            outcome.set(Some(out));
        })
    };
    let on_fuel_reset = {
        let fuel = fuel.clone();
        let outcome = fuel_outcome.clone();
        let copy_error = copy_error.clone();
        Callback::from(move |_: MouseEvent| {
            fuel.update(FuelForm::reset);
            outcome.set(None);
            copy_error.set(None);
        })
    };
    let set_mode = {
        let fuel = fuel.clone();
        Callback::from(move |mode: FuelMode| fuel.update(|f| f.mode = mode))
    };

    let fuel_view: Option<Result<FuelReport, String>> = match &*fuel_outcome {
        Some(Ok((input, result))) => Some(Ok(FuelReport::new(input, result, *units))),
        Some(Err(e)) => Some(Err(e.clone())),
        None => None,
    };

    let on_copy = {
        let summary = match &fuel_view {
            Some(Ok(report)) => report.summary.clone(),
            _ => String::new(),
        };
        let copy_toast = copy_toast.clone();
        let copy_error = copy_error.clone();
        let toast_timer = toast_timer.clone();
        Callback::from(move |_: MouseEvent| {
            let summary = summary.clone();
            let copy_toast = copy_toast.clone();
            let copy_error = copy_error.clone();
            let toast_timer = toast_timer.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match clipboard::copy_text(&summary).await {
                    Ok(()) => {
                        copy_error.set(None);
                        copy_toast.set(true);
                        let hide = copy_toast.clone();
                        toast_timer.set(Some(Timeout::new(COPY_TOAST_MS, move || {
                            hide.set(false);
                        })));
                    }
                    Err(e) => {
                        warn!("Copy failed: {:?}", e);
                        copy_error.set(Some("Copy failed".to_string()));
                    }
                }
            });
        })
    };

    // --- Temperature ---
    let on_temp_calc = {
        let form = temp.form.clone();
        let units = *units;
        let outcome = temp_outcome.clone();
        Callback::from(move |_: MouseEvent| {
            let out = run(form.to_input(units), correct_for_temperature);
            if let Err(e) = &out {
                warn!("Temperature correction rejected: {}", e);
            }
            outcome.set(Some(out));
        })
    };
    let on_temp_reset = {
        let temp = temp.clone();
        let outcome = temp_outcome.clone();
        Callback::from(move |_: MouseEvent| {
            temp.update(TempForm::reset);
            outcome.set(None);
        })
    };
    let temp_view: Option<Result<TempReport, String>> = match &*temp_outcome {
        Some(Ok((input, result))) => Some(Ok(TempReport::new(input, result, *units))),
        Some(Err(e)) => Some(Err(e.clone())),
        None => None,
    };

    // --- Brake ducts ---
    let on_brake_calc = {
        let form = brake.form.clone();
        let outcome = brake_outcome.clone();
        Callback::from(move |_: MouseEvent| {
            let out = run(form.to_input(), correct_for_brake_duct);
            if let Err(e) = &out {
                warn!("Brake duct correction rejected: {}", e);
            }
            outcome.set(Some(out));
        })
    };
    let on_brake_reset = {
        let brake = brake.clone();
        let outcome = brake_outcome.clone();
        Callback::from(move |_: MouseEvent| {
            brake.update(BrakeForm::reset);
            outcome.set(None);
        })
    };
    let brake_view: Option<Result<BrakeReport, String>> = match &*brake_outcome {
        Some(Ok((_, result))) => Some(Ok(BrakeReport::new(result))),
        Some(Err(e)) => Some(Err(e.clone())),
        None => None,
    };

    let (title, desc) = tab.header();
    let theme_label = if *theme == "light" { "Dark mode" } else { "Light mode" };
    let mode_buttons = [(FuelMode::Normal, "Normal"), (FuelMode::Pro, "Pro")];
    let temp_unit = Some(AttrValue::from(units.temp_label()));

    html! {
        <div class="container">
            <header class="top-bar">
                <div>
                    <h1 id="pageTitle">{ title }</h1>
                    <p id="pageDesc">{ desc }</p>
                </div>
                <div class="toggles">
                    <div class="unit-toggle">
                        { for [UnitSystem::Metric, UnitSystem::Imperial].into_iter().map(|u| {
                            let set_units = set_units.clone();
                            html! {
                                <button
                                    aria-pressed={(*units == u).to_string()}
                                    onclick={Callback::from(move |_: MouseEvent| set_units.emit(u))}
                                >
                                    { u.to_string() }
                                </button>
                            }
                        }) }
                    </div>
                    <button class="theme-toggle" onclick={toggle_theme}>
                        { theme_label }
                    </button>
                </div>
            </header>

            <nav class="tabs" role="tablist">
                { for Tab::ALL.into_iter().map(|t| {
                    let tab = tab.clone();
                    html! {
                        <button
                            role="tab"
                            aria-selected={(*tab == t).to_string()}
                            onclick={Callback::from(move |_: MouseEvent| tab.set(t))}
                        >
                            { t.label() }
                        </button>
                    }
                }) }
            </nav>

            if *tab == Tab::Fuel {
                <section class="panel" id="panel-fuel">
                    <div class="mode-toggle">
                        { for mode_buttons.into_iter().map(|(m, label)| {
                            let set_mode = set_mode.clone();
                            html! {
                                <button
                                    aria-pressed={(fuel.form.mode == m).to_string()}
                                    onclick={Callback::from(move |_: MouseEvent| set_mode.emit(m))}
                                >
                                    { label }
                                </button>
                            }
                        }) }
                    </div>
                    { fuel_fields(&fuel, *units) }
                    <div class="actions">
                        <button class="btn-primary" onclick={on_fuel_calc}>{ "Calculate" }</button>
                        <button class="btn-secondary" onclick={on_fuel_reset}>{ "Reset" }</button>
                    </div>
                    {
                        match &fuel_view {
                            Some(Ok(report)) => html! {
                                <>
                                    { render_fuel_report(report) }
                                    <div class="copy-wrap">
                                        <button class="btn-secondary small" onclick={on_copy}>
                                            { "Copy summary" }
                                        </button>
                                        if *copy_toast {
                                            <span class="toast">{ "Copied!" }</span>
                                        }
                                        if let Some(err) = &*copy_error {
                                            <span class="err">{ err.as_str() }</span>
                                        }
                                    </div>
                                </>
                            },
                            Some(Err(e)) => render_error(e),
                            None => html! {},
                        }
                    }
                </section>
            }

            if *tab == Tab::Temp {
                <section class="panel" id="panel-temp">
                    { pressure_inputs(&temp, "p", &temp.form.pressures, |f| &mut f.pressures) }
                    <div class="form-row">
                        <NumberField id="tBefore" label="Ambient before" unit={temp_unit.clone()}
                            value={temp.form.temp_before.clone()}
                            oninput={temp.bind(|f| &mut f.temp_before)} />
                        <NumberField id="tAfter" label="Ambient after" unit={temp_unit}
                            value={temp.form.temp_after.clone()}
                            oninput={temp.bind(|f| &mut f.temp_after)} />
                    </div>
                    <div class="form-row">
                        <NumberField id="targetMin" label="Target min" placeholder="optional"
                            unit={Some(AttrValue::from(PRESSURE_LABEL))}
                            value={temp.form.target_min.clone()}
                            oninput={temp.bind(|f| &mut f.target_min)} />
                        <NumberField id="targetMax" label="Target max" placeholder="optional"
                            unit={Some(AttrValue::from(PRESSURE_LABEL))}
                            value={temp.form.target_max.clone()}
                            oninput={temp.bind(|f| &mut f.target_max)} />
                    </div>
                    <div class="actions">
                        <button class="btn-primary" onclick={on_temp_calc}>{ "Calculate" }</button>
                        <button class="btn-secondary" onclick={on_temp_reset}>{ "Reset" }</button>
                    </div>
                    {
                        match &temp_view {
                            Some(Ok(report)) => render_temp_report(report),
                            Some(Err(e)) => render_error(e),
                            None => html! {},
                        }
                    }
                </section>
            }

            if *tab == Tab::Brake {
                <section class="panel" id="panel-brake">
                    { pressure_inputs(&brake, "b", &brake.form.pressures, |f| &mut f.pressures) }
                    <div class="form-row">
                        <NumberField id="bdBefore" label="Brake duct before"
                            value={brake.form.step_before.clone()}
                            oninput={brake.bind(|f| &mut f.step_before)} />
                        <NumberField id="bdAfter" label="Brake duct after"
                            value={brake.form.step_after.clone()}
                            oninput={brake.bind(|f| &mut f.step_after)} />
                    </div>
                    <div class="actions">
                        <button class="btn-primary" onclick={on_brake_calc}>{ "Calculate" }</button>
                        <button class="btn-secondary" onclick={on_brake_reset}>{ "Reset" }</button>
                    </div>
                    {
                        match &brake_view {
                            Some(Ok(report)) => render_brake_report(report),
                            Some(Err(e)) => render_error(e),
                            None => html! {},
                        }
                    }
                </section>
            }
        </div>
    }
}

/// Entry point: installs the panic hook and mounts the app.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
