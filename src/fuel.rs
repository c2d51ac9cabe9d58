//! Fuel load estimation: race distance in laps, total fuel and stint plan.

use crate::policy::PIT_LAP_FACTOR;
use crate::units::round_to;
use crate::{CalcError, CalcResult};
use log::{debug, info};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceTime {
    pub hours: f64,
    pub minutes: f64,
}

impl RaceTime {
    pub fn total_seconds(&self) -> f64 {
        self.hours * 3600.0 + self.minutes * 60.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LapTime {
    pub minutes: f64,
    pub seconds: f64,
}

impl LapTime {
    pub fn total_seconds(&self) -> f64 {
        self.minutes * 60.0 + self.seconds
    }
}

/// Everything needed to plan fuel for one race. Volumes are liters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelInput {
    #[serde(default)]
    pub race_time: RaceTime,
    #[serde(default)]
    pub lap_time: LapTime,
    pub fuel_per_lap: f64,
    /// Takes priority over race/lap time when non-zero.
    #[serde(default)]
    pub fixed_lap_count: u32,
    /// 0 means unknown; no stint plan is produced.
    #[serde(default)]
    pub tank_capacity: f64,
    #[serde(default = "default_true")]
    pub include_formation_lap: bool,
    #[serde(default = "default_true")]
    pub include_cooldown_lap: bool,
    #[serde(default)]
    pub mandatory_stops: u32,
}

fn default_true() -> bool {
    true
}

impl Default for FuelInput {
    fn default() -> Self {
        Self {
            race_time: RaceTime::default(),
            lap_time: LapTime::default(),
            fuel_per_lap: 0.0,
            fixed_lap_count: 0,
            tank_capacity: 0.0,
            include_formation_lap: true,
            include_cooldown_lap: true,
            mandatory_stops: 0,
        }
    }
}

/// Fuel plan in liters, rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelResult {
    pub race_laps: u32,
    pub total_laps: u32,
    pub total_fuel_l: f64,
    pub stint_laps: u32,
    pub final_stint_laps: u32,
    pub stint_fuel_l: f64,
    pub final_stint_fuel_l: f64,
    pub start_fuel_l: f64,
    pub pit_stops: u32,
}

fn check_non_negative(value: f64, name: &str) -> CalcResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::invalid(format!(
            "{} must be a non-negative number",
            name
        )));
    }
    Ok(())
}

/// Number of timed race laps: the fixed count when given, otherwise race
/// time divided by lap time, rounded up.
pub fn race_laps(input: &FuelInput) -> CalcResult<u32> {
    let race_seconds = input.race_time.total_seconds();
    let lap_seconds = input.lap_time.total_seconds();

    if input.fixed_lap_count > 0 {
        if race_seconds > 0.0 && lap_seconds > 0.0 {
            debug!(
                "Fixed lap count {} overrides race time {}s / lap time {}s",
                input.fixed_lap_count, race_seconds, lap_seconds
            );
        }
        return Ok(input.fixed_lap_count);
    }

    if race_seconds > 0.0 && lap_seconds > 0.0 {
        let laps = (race_seconds / lap_seconds).ceil();
        if laps > u32::MAX as f64 {
            return Err(CalcError::invalid("Race is too long for the given lap time"));
        }
        return Ok(laps as u32);
    }

    Err(CalcError::invalid(
        "Provide either total race time and lap time, or a fixed total lap count",
    ))
}

/// Builds the fuel plan for a race.
///
/// # Algorithm
/// 1. Reject a missing or non-positive fuel per lap before anything else
/// 2. Work out the timed race laps (fixed count wins over race/lap time)
/// 3. Add the formation and cool-down laps when requested
/// 4. Multiply by fuel per lap, then credit each mandatory stop with the
///    unburnt share of its pit-in lap
/// 5. With a known tank size, split the distance into full stints and a
///    final partial stint
///
/// Rounding to two decimals happens once, on the way out.
pub fn compute_fuel(input: &FuelInput) -> CalcResult<FuelResult> {
    let fuel_per_lap = input.fuel_per_lap;
    if !fuel_per_lap.is_finite() || fuel_per_lap <= 0.0 {
        return Err(CalcError::invalid("Please enter a valid fuel per lap"));
    }

    check_non_negative(input.race_time.hours, "Race hours")?;
    check_non_negative(input.race_time.minutes, "Race minutes")?;
    check_non_negative(input.lap_time.minutes, "Lap minutes")?;
    check_non_negative(input.lap_time.seconds, "Lap seconds")?;
    check_non_negative(input.tank_capacity, "Tank capacity")?;

    let race_laps = race_laps(input)?;
    let total_laps = race_laps
        .checked_add(u32::from(input.include_formation_lap))
        .and_then(|laps| laps.checked_add(u32::from(input.include_cooldown_lap)))
        .ok_or_else(|| CalcError::invalid("Total lap count is out of range"))?;

    if input.mandatory_stops > 0 && input.mandatory_stops >= total_laps {
        return Err(CalcError::invalid(format!(
            "Mandatory stops ({}) must be fewer than the total laps ({})",
            input.mandatory_stops, total_laps
        )));
    }

    let unburnt_per_stop = (1.0 - PIT_LAP_FACTOR) * fuel_per_lap;
    let total_fuel =
        total_laps as f64 * fuel_per_lap - input.mandatory_stops as f64 * unburnt_per_stop;

    let (stint_laps, pit_stops, final_stint_laps, stint_fuel, final_stint_fuel, start_fuel) =
        if input.tank_capacity > 0.0 {
            let stint_laps = (input.tank_capacity / fuel_per_lap).floor() as u32;
            let pit_stops = total_laps / stint_laps.max(1);
            let final_stint_laps = total_laps.saturating_sub(stint_laps * pit_stops);
            let stint_fuel = stint_laps as f64 * fuel_per_lap;
            let final_stint_fuel = final_stint_laps as f64 * fuel_per_lap;
            let start_fuel = if stint_fuel > 0.0 {
                stint_fuel.min(total_fuel)
            } else {
                total_fuel
            };
            (
                stint_laps,
                pit_stops,
                final_stint_laps,
                stint_fuel,
                final_stint_fuel,
                start_fuel,
            )
        } else {
            (0, 0, 0, 0.0, total_fuel, total_fuel)
        };

    info!(
        "Fuel plan: {} laps ({} racing), {:.2} L total, {} stops",
        total_laps, race_laps, total_fuel, pit_stops
    );

    Ok(FuelResult {
        race_laps,
        total_laps,
        total_fuel_l: round_to(total_fuel, 2),
        stint_laps,
        final_stint_laps,
        stint_fuel_l: round_to(stint_fuel, 2),
        final_stint_fuel_l: round_to(final_stint_fuel, 2),
        start_fuel_l: round_to(start_fuel, 2),
        pit_stops,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed(hours: f64, minutes: f64, lap_min: f64, lap_sec: f64, fuel_per_lap: f64) -> FuelInput {
        FuelInput {
            race_time: RaceTime { hours, minutes },
            lap_time: LapTime {
                minutes: lap_min,
                seconds: lap_sec,
            },
            fuel_per_lap,
            include_formation_lap: false,
            include_cooldown_lap: false,
            ..FuelInput::default()
        }
    }

    #[test]
    fn lap_count_rounds_up() {
        let exact = timed(1.0, 0.0, 1.0, 30.0, 3.0);
        assert_eq!(race_laps(&exact).unwrap(), 40);

        // 3601 s can't be expressed in hours+minutes, so lean on fractional minutes.
        let one_second_more = timed(1.0, 1.0 / 60.0, 1.0, 30.0, 3.0);
        assert_eq!(race_laps(&one_second_more).unwrap(), 41);
    }

    #[test]
    fn fixed_lap_count_wins() {
        let mut input = timed(1.0, 0.0, 1.0, 30.0, 3.0);
        input.fixed_lap_count = 25;
        let result = compute_fuel(&input).unwrap();
        assert_eq!(result.race_laps, 25);
        assert_eq!(result.total_laps, 25);
    }

    #[test]
    fn fixed_lap_count_without_times() {
        let input = FuelInput {
            fuel_per_lap: 2.5,
            fixed_lap_count: 10,
            ..FuelInput::default()
        };
        let result = compute_fuel(&input).unwrap();
        assert_eq!(result.race_laps, 10);
        assert_eq!(result.total_laps, 12);
        assert_eq!(result.total_fuel_l, 30.0);
    }

    #[test]
    fn formation_and_cooldown_each_add_one_lap() {
        let cases = [
            (false, false, 0),
            (true, false, 1),
            (false, true, 1),
            (true, true, 2),
        ];
        for (formation, cooldown, extra) in cases {
            let mut input = timed(1.0, 0.0, 1.0, 30.0, 3.0);
            input.include_formation_lap = formation;
            input.include_cooldown_lap = cooldown;
            let result = compute_fuel(&input).unwrap();
            assert_eq!(result.total_laps, 40 + extra);
            assert_eq!(result.race_laps, 40);
        }
    }

    #[test]
    fn mandatory_stops_credit_unburnt_pit_lap() {
        let mut input = timed(0.0, 45.0, 1.0, 30.0, 3.0);
        let base = compute_fuel(&input).unwrap();
        assert_eq!(base.total_laps, 30);
        assert_eq!(base.total_fuel_l, 90.0);

        input.mandatory_stops = 2;
        let adjusted = compute_fuel(&input).unwrap();
        assert_eq!(adjusted.total_fuel_l, 89.4);
    }

    #[test]
    fn stint_breakdown() {
        let mut input = timed(1.0, 0.0, 1.0, 30.0, 3.0);
        input.tank_capacity = 100.0;
        let result = compute_fuel(&input).unwrap();
        assert_eq!(result.total_laps, 40);
        assert_eq!(result.stint_laps, 33);
        assert_eq!(result.pit_stops, 1);
        assert_eq!(result.final_stint_laps, 7);
        assert_eq!(result.stint_fuel_l, 99.0);
        assert_eq!(result.final_stint_fuel_l, 21.0);
        assert_eq!(result.start_fuel_l, 99.0);
        assert_eq!(result.total_fuel_l, 120.0);
    }

    #[test]
    fn start_fuel_capped_by_total() {
        let mut input = timed(0.0, 15.0, 1.0, 30.0, 3.0);
        input.tank_capacity = 100.0;
        let result = compute_fuel(&input).unwrap();
        assert_eq!(result.total_laps, 10);
        assert_eq!(result.pit_stops, 0);
        assert_eq!(result.final_stint_laps, 10);
        assert_eq!(result.start_fuel_l, 30.0);
    }

    #[test]
    fn tank_smaller_than_one_lap_falls_back_to_total() {
        let mut input = timed(0.0, 15.0, 1.0, 30.0, 3.0);
        input.tank_capacity = 2.0;
        let result = compute_fuel(&input).unwrap();
        assert_eq!(result.stint_laps, 0);
        assert_eq!(result.pit_stops, 10);
        assert_eq!(result.final_stint_laps, 10);
        assert_eq!(result.stint_fuel_l, 0.0);
        assert_eq!(result.start_fuel_l, result.total_fuel_l);
    }

    #[test]
    fn unknown_tank_has_no_stints() {
        let input = timed(1.0, 0.0, 1.0, 30.0, 3.0);
        let result = compute_fuel(&input).unwrap();
        assert_eq!(result.stint_laps, 0);
        assert_eq!(result.pit_stops, 0);
        assert_eq!(result.final_stint_laps, 0);
        assert_eq!(result.stint_fuel_l, 0.0);
        assert_eq!(result.final_stint_fuel_l, result.total_fuel_l);
        assert_eq!(result.start_fuel_l, result.total_fuel_l);
    }

    #[test]
    fn rejects_bad_fuel_per_lap() {
        for fpl in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let mut input = timed(1.0, 0.0, 1.0, 30.0, fpl);
            input.fixed_lap_count = 10;
            input.tank_capacity = 100.0;
            assert!(matches!(
                compute_fuel(&input),
                Err(CalcError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn rejects_missing_distance() {
        let input = timed(0.0, 0.0, 1.0, 30.0, 3.0);
        let err = compute_fuel(&input).unwrap_err();
        assert!(err.to_string().contains("fixed total lap count"));

        let no_lap_time = timed(1.0, 0.0, 0.0, 0.0, 3.0);
        assert!(compute_fuel(&no_lap_time).is_err());
    }

    #[test]
    fn rejects_negative_components() {
        let mut input = timed(1.0, 0.0, 1.0, 30.0, 3.0);
        input.tank_capacity = -5.0;
        assert!(compute_fuel(&input).is_err());

        let negative_minutes = timed(1.0, -10.0, 1.0, 30.0, 3.0);
        assert!(compute_fuel(&negative_minutes).is_err());
    }

    #[test]
    fn rejects_more_stops_than_laps() {
        let mut input = FuelInput {
            fuel_per_lap: 3.0,
            fixed_lap_count: 3,
            include_formation_lap: false,
            include_cooldown_lap: false,
            ..FuelInput::default()
        };
        input.mandatory_stops = 3;
        assert!(compute_fuel(&input).is_err());
        input.mandatory_stops = 2;
        assert!(compute_fuel(&input).is_ok());
    }

    #[test]
    fn rejects_lap_count_overflow() {
        let input = FuelInput {
            fuel_per_lap: 1.0,
            fixed_lap_count: u32::MAX,
            ..FuelInput::default()
        };
        assert_eq!(
            compute_fuel(&input),
            Err(CalcError::invalid("Total lap count is out of range"))
        );

        // Without extra laps the same count still fits
        let plain = FuelInput {
            include_formation_lap: false,
            include_cooldown_lap: false,
            ..input
        };
        assert_eq!(compute_fuel(&plain).unwrap().total_laps, u32::MAX);
    }

    #[test]
    fn rounds_only_at_the_end() {
        let input = FuelInput {
            fuel_per_lap: 2.333,
            fixed_lap_count: 3,
            include_formation_lap: false,
            include_cooldown_lap: false,
            ..FuelInput::default()
        };
        let result = compute_fuel(&input).unwrap();
        // 3 * 2.333 = 6.999, not 3 * 2.33
        assert_eq!(result.total_fuel_l, 7.0);
    }
}
