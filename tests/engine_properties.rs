/// Integration tests for the race strategy engine
///
/// Run with: cargo test --test engine_properties -- --nocapture

use race_strategy::fields::convert_field;
use race_strategy::fuel::race_laps;
use race_strategy::units::{
    temp_to_imperial, temp_to_metric, volume_to_imperial, volume_to_metric,
};
use race_strategy::{
    compute_fuel, correct_for_brake_duct, correct_for_temperature, BrakeDuctCorrectionInput,
    CalcError, DuctDirection, FuelInput, LapTime, PressureSet, RaceTime, TempCorrectionInput,
    WindowStatus,
};

fn timed_race(hours: f64, minutes: f64, lap: LapTime) -> FuelInput {
    FuelInput {
        race_time: RaceTime { hours, minutes },
        lap_time: lap,
        fuel_per_lap: 3.0,
        include_formation_lap: false,
        include_cooldown_lap: false,
        ..FuelInput::default()
    }
}

fn baseline_pressures() -> PressureSet {
    PressureSet::new(27.0, 27.0, 26.5, 26.5)
}

#[test]
fn test_race_laps_round_up() {
    println!("\n=== Test: Race Laps Round Up ===");
    let lap = LapTime { minutes: 1.0, seconds: 30.0 };

    let exact = timed_race(1.0, 0.0, lap);
    assert_eq!(race_laps(&exact).unwrap(), 40);

    // One extra second of race time starts another lap
    let over = timed_race(0.0, 60.0 + 1.0 / 60.0, lap);
    assert_eq!(race_laps(&over).unwrap(), 41);

    println!("✓ 3600s / 90s = 40 laps, 3601s / 90s = 41 laps");
}

#[test]
fn test_extra_laps_are_additive() {
    println!("\n=== Test: Formation/Cool-down Additivity ===");
    let lap = LapTime { minutes: 1.0, seconds: 30.0 };

    for (formation, cooldown) in [(false, false), (true, false), (false, true), (true, true)] {
        let input = FuelInput {
            include_formation_lap: formation,
            include_cooldown_lap: cooldown,
            ..timed_race(1.0, 0.0, lap)
        };
        let result = compute_fuel(&input).unwrap();
        let expected = 40 + u32::from(formation) + u32::from(cooldown);
        println!(
            "  formation={} cooldown={} → {} laps",
            formation, cooldown, result.total_laps
        );
        assert_eq!(result.race_laps, 40);
        assert_eq!(result.total_laps, expected);
    }

    println!("✓ Each extra lap contributes exactly one");
}

#[test]
fn test_mandatory_stops_reduce_fuel() {
    println!("\n=== Test: Mandatory Stop Fuel Credit ===");
    let base = FuelInput {
        fixed_lap_count: 30,
        ..timed_race(0.0, 0.0, LapTime::default())
    };
    let without = compute_fuel(&base).unwrap();
    assert_eq!(without.total_fuel_l, 90.0);

    let with_stops = FuelInput {
        mandatory_stops: 2,
        ..base
    };
    let result = compute_fuel(&with_stops).unwrap();
    println!("✓ 90 L base, 2 stops → {:.2} L", result.total_fuel_l);
    assert!((result.total_fuel_l - 89.4).abs() < 1e-9);
}

#[test]
fn test_stint_plan() {
    println!("\n=== Test: Stint Arithmetic ===");
    let input = FuelInput {
        fixed_lap_count: 40,
        tank_capacity: 100.0,
        ..timed_race(0.0, 0.0, LapTime::default())
    };
    let result = compute_fuel(&input).unwrap();

    println!(
        "✓ stint {} laps, {} stop(s), final stint {} laps",
        result.stint_laps, result.pit_stops, result.final_stint_laps
    );
    assert_eq!(result.stint_laps, 33);
    assert_eq!(result.pit_stops, 1);
    assert_eq!(result.final_stint_laps, 7);
    assert_eq!(result.stint_fuel_l, 99.0);
    assert_eq!(result.final_stint_fuel_l, 21.0);
    // A full tank is enough to start
    assert_eq!(result.start_fuel_l, 99.0);
}

#[test]
fn test_temperature_shift_is_uniform() {
    println!("\n=== Test: Temperature Correction ===");
    let input = TempCorrectionInput {
        pressures: baseline_pressures(),
        temp_before: 20.0,
        temp_after: 35.0,
        target_min: None,
        target_max: None,
    };
    let result = correct_for_temperature(&input).unwrap();

    assert_eq!(result.delta_temp_c, 15.0);
    assert_eq!(result.delta_pressure, 1.5);
    assert_eq!(result.corrected, PressureSet::new(28.5, 28.5, 28.0, 28.0));
    assert_eq!(result.within_window, WindowStatus::Unknown);
    println!("✓ +15 °C → +1.5 psi on every tyre");
}

#[test]
fn test_brake_duct_direction() {
    println!("\n=== Test: Brake Duct Direction ===");
    let opened = correct_for_brake_duct(&BrakeDuctCorrectionInput {
        pressures: baseline_pressures(),
        step_before: 2,
        step_after: 5,
    })
    .unwrap();
    assert_eq!(opened.delta_steps, 3);
    assert!((opened.delta_pressure - 0.6).abs() < 1e-9);
    assert_eq!(opened.direction, DuctDirection::Opened);
    assert_eq!(opened.corrected, PressureSet::new(27.6, 27.6, 27.1, 27.1));

    let unchanged = correct_for_brake_duct(&BrakeDuctCorrectionInput {
        pressures: baseline_pressures(),
        step_before: 5,
        step_after: 5,
    })
    .unwrap();
    assert_eq!(unchanged.delta_steps, 0);
    assert_eq!(unchanged.delta_pressure, 0.0);
    assert_eq!(unchanged.direction, DuctDirection::Unchanged);
    assert_eq!(unchanged.corrected, baseline_pressures());

    println!("✓ 2→5 opened (+0.6 psi), 5→5 unchanged");
}

#[test]
fn test_bad_fuel_per_lap_always_rejected() {
    println!("\n=== Test: Invalid Fuel Per Lap ===");
    // Everything else is valid, including a fixed lap count and tank
    let good = FuelInput {
        fixed_lap_count: 40,
        tank_capacity: 100.0,
        mandatory_stops: 1,
        ..timed_race(1.0, 0.0, LapTime { minutes: 1.0, seconds: 30.0 })
    };
    assert!(compute_fuel(&good).is_ok());

    for bad in [0.0, -3.0, f64::NAN, f64::INFINITY] {
        let input = FuelInput {
            fuel_per_lap: bad,
            ..good.clone()
        };
        let err = compute_fuel(&input).unwrap_err();
        println!("  fuel per lap {} → {}", bad, err);
        assert!(matches!(err, CalcError::InvalidInput(_)));
    }

    println!("✓ Zero, negative and non-finite fuel per lap rejected");
}

#[test]
fn test_unit_round_trip_stability() {
    println!("\n=== Test: Unit Round Trip ===");
    // Volume fields carry two decimals, temperature fields one
    let mut worst_volume = 0.0_f64;
    for hundredths in 1..=4000 {
        let gallons = hundredths as f64 / 100.0;
        let liters = convert_field(&gallons.to_string(), volume_to_metric, 2).unwrap();
        let back = convert_field(&liters, volume_to_imperial, 2).unwrap();
        let error = (back.parse::<f64>().unwrap() - gallons).abs();
        worst_volume = worst_volume.max(error);
        assert!(error <= 0.01 + 1e-9, "{} gal came back as {}", gallons, back);
    }

    let mut worst_temp = 0.0_f64;
    for tenths in -300..=600 {
        let celsius = tenths as f64 / 10.0;
        let fahrenheit = convert_field(&celsius.to_string(), temp_to_imperial, 1).unwrap();
        let back = convert_field(&fahrenheit, temp_to_metric, 1).unwrap();
        let error = (back.parse::<f64>().unwrap() - celsius).abs();
        worst_temp = worst_temp.max(error);
        assert!(error <= 0.1 + 1e-9, "{} °C came back as {}", celsius, back);
    }

    println!(
        "✓ worst volume error {:.4} gal, worst temperature error {:.4} °C",
        worst_volume, worst_temp
    );
}

#[test]
fn test_target_window() {
    println!("\n=== Test: Target Window ===");
    let mut input = TempCorrectionInput {
        pressures: baseline_pressures(),
        temp_before: 20.0,
        temp_after: 25.0,
        target_min: Some(25.0),
        target_max: Some(29.0),
    };

    let inside = correct_for_temperature(&input).unwrap();
    assert_eq!(inside.within_window, WindowStatus::Within);

    input.pressures.rr = 28.9;
    let outside = correct_for_temperature(&input).unwrap();
    assert_eq!(outside.corrected.rr, 29.4);
    assert_eq!(outside.within_window, WindowStatus::Outside);

    input.target_min = None;
    input.target_max = None;
    let unknown = correct_for_temperature(&input).unwrap();
    assert_eq!(unknown.within_window, WindowStatus::Unknown);

    println!("✓ inside → within, one tyre over → outside, no window → unknown");
}

#[test]
fn test_result_json_shape() {
    println!("\n=== Test: Result JSON Shape ===");
    let fuel = compute_fuel(&FuelInput {
        fixed_lap_count: 40,
        tank_capacity: 100.0,
        ..timed_race(0.0, 0.0, LapTime::default())
    })
    .unwrap();
    let json = serde_json::to_value(&fuel).unwrap();
    assert_eq!(json["totalLaps"], 40);
    assert_eq!(json["stintLaps"], 33);
    assert_eq!(json["startFuelL"], 99.0);

    let mut temp_input = TempCorrectionInput {
        pressures: baseline_pressures(),
        temp_before: 20.0,
        temp_after: 35.0,
        target_min: Some(25.0),
        target_max: Some(29.0),
    };
    let json = serde_json::to_value(correct_for_temperature(&temp_input).unwrap()).unwrap();
    assert_eq!(json["corrected"]["FL"], 28.5);
    assert_eq!(json["deltaPressure"], 1.5);
    assert_eq!(json["withinWindow"], true);

    temp_input.temp_after = 50.0;
    let json = serde_json::to_value(correct_for_temperature(&temp_input).unwrap()).unwrap();
    assert_eq!(json["withinWindow"], false);

    temp_input.target_max = None;
    let json = serde_json::to_value(correct_for_temperature(&temp_input).unwrap()).unwrap();
    assert_eq!(json["withinWindow"], "unknown");

    let brake = correct_for_brake_duct(&BrakeDuctCorrectionInput {
        pressures: baseline_pressures(),
        step_before: 4,
        step_after: 2,
    })
    .unwrap();
    let json = serde_json::to_value(&brake).unwrap();
    assert_eq!(json["direction"], "closed");
    assert_eq!(json["deltaSteps"], -2);

    println!("✓ camelCase keys, tyre keys, window and direction tags");
}

#[test]
fn test_input_deserializes_with_defaults() {
    println!("\n=== Test: Input Defaults ===");
    let input: FuelInput =
        serde_json::from_str(r#"{"fuelPerLap": 3.0, "fixedLapCount": 20}"#).unwrap();
    assert_eq!(input.tank_capacity, 0.0);
    assert_eq!(input.mandatory_stops, 0);
    assert_eq!(input.race_time, RaceTime::default());
    // Omitted lap flags match the Rust default
    assert!(input.include_formation_lap);
    assert!(input.include_cooldown_lap);
    let defaults = FuelInput::default();
    assert_eq!(input.include_formation_lap, defaults.include_formation_lap);
    assert_eq!(input.include_cooldown_lap, defaults.include_cooldown_lap);

    let result = compute_fuel(&input).unwrap();
    assert_eq!(result.race_laps, 20);
    assert_eq!(result.total_laps, 22);
    assert_eq!(result.pit_stops, 0);

    let explicit: FuelInput = serde_json::from_str(
        r#"{"fuelPerLap": 3.0, "fixedLapCount": 20,
            "includeFormationLap": false, "includeCooldownLap": false}"#,
    )
    .unwrap();
    assert_eq!(compute_fuel(&explicit).unwrap().total_laps, 20);

    println!("✓ Omitted fields default, unknown tank gives no stint plan");
}

#[test]
fn test_huge_lap_count_rejected() {
    println!("\n=== Test: Lap Count Overflow ===");
    let input = FuelInput {
        fuel_per_lap: 1.0,
        fixed_lap_count: u32::MAX,
        ..FuelInput::default()
    };
    let err = compute_fuel(&input).unwrap_err();
    println!("  {} laps + formation + cool-down → {}", u32::MAX, err);
    assert!(matches!(err, CalcError::InvalidInput(_)));

    println!("✓ Overflowing lap total rejected instead of wrapping");
}

#[test]
fn test_negative_tie_rounding() {
    println!("\n=== Test: Negative Tie Rounding ===");
    let input = TempCorrectionInput {
        pressures: baseline_pressures(),
        temp_before: 20.0,
        temp_after: 19.75,
        target_min: None,
        target_max: None,
    };
    let result = correct_for_temperature(&input).unwrap();
    println!("  -0.25 °C → {} psi", result.delta_pressure);
    assert_eq!(result.delta_pressure, -0.02);

    println!("✓ -0.025 psi rounds up to -0.02");
}
