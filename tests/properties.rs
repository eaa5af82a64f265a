//! Behavior of the public estimation API over whole batches.

use approx::assert_relative_eq;

use leaf_wetness::{
    io::{OutputOptions, parse_observations, to_json},
    models::agronomy::leaf_wetness::{
        Constants, ConstantsError, Estimate, EstimateError, LeafWetness, Observation, estimate,
    },
};

fn obs(air: f64, dew: f64, wind: f64, rh: f64, precip: f64) -> Observation {
    Observation {
        air_temp_f: air,
        dew_point_f: dew,
        wind_speed_mph: wind,
        relative_humidity_pct: rh,
        precip_in: precip,
    }
}

fn run(observations: &[Observation]) -> Vec<Estimate> {
    estimate(observations, &Constants::default()).unwrap()
}

fn one(observation: Observation) -> Estimate {
    run(&[observation])[0]
}

/// A spread of conditions from hard frost to humid summer nights.
fn grid() -> Vec<Observation> {
    let mut observations = Vec::new();
    for air in [-10.0, 20.0, 30.0, 32.0, 33.0, 45.0, 60.0, 75.0, 95.0] {
        for depression in [-2.0, 0.0, 0.5, 3.0, 3.3, 20.0] {
            for wind in [0.0, 0.4, 5.0, 25.0] {
                for rh in [20.0, 85.0, 100.0] {
                    for precip in [0.0, 0.01, 1.5] {
                        observations.push(obs(air, air - depression, wind, rh, precip));
                    }
                }
            }
        }
    }
    observations
}

#[test]
fn no_wetness_at_or_below_freezing() {
    for estimate in run(&grid()) {
        if estimate.observation.air_temp_f <= 32.0 {
            assert_eq!(estimate.wetness_mm, 0.0, "{:?}", estimate.observation);
        }
    }
}

#[test]
fn wetness_is_never_negative() {
    for estimate in run(&grid()) {
        assert!(estimate.wetness_mm >= 0.0, "{:?}", estimate.observation);
    }
}

#[test]
fn no_dew_at_or_above_critical_depression() {
    for estimate in run(&grid()) {
        if estimate.diagnostics.dew_point_depression >= 1.845 {
            assert_eq!(estimate.condensation_mm, 0.0, "{:?}", estimate.observation);
        }
    }
}

#[test]
fn rain_interception_is_fixed() {
    for estimate in run(&grid()) {
        let expected = if estimate.observation.precip_in > 0.0 {
            0.6
        } else {
            0.0
        };
        assert_eq!(estimate.diagnostics.rain_interception_mm, expected);
    }
}

#[test]
fn repeated_calls_are_identical() {
    let observations = grid();
    let first = run(&observations);
    let second = run(&observations);

    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.wetness_mm.to_bits(), b.wetness_mm.to_bits());
        assert_eq!(a.condensation_mm.to_bits(), b.condensation_mm.to_bits());
    }
    assert_eq!(first, second);
}

#[test]
fn rows_are_independent() {
    let observations = grid();
    let forward = run(&observations);

    let reversed: Vec<_> = observations.iter().rev().copied().collect();
    let backward = run(&reversed);

    let restored: Vec<_> = backward.into_iter().rev().collect();
    assert_eq!(forward, restored);
}

#[test]
fn parallel_path_matches_sequential() {
    let model = LeafWetness::new(Constants::default()).unwrap();
    let observations = grid();

    assert_eq!(
        model.estimate(&observations).unwrap(),
        model.estimate_par(&observations).unwrap()
    );
}

#[test]
fn mild_dry_afternoon() {
    let estimate = one(obs(70.0, 50.0, 5.0, 60.0, 0.0));
    let d = estimate.diagnostics;

    assert!(d.all_finite());
    assert!(estimate.wetness_mm.is_finite() && estimate.wetness_mm >= 0.0);
    assert_eq!(estimate.wetness_mm, 0.0);
    assert_eq!(estimate.condensation_mm, 0.0);

    assert_relative_eq!(d.dew_point_depression, 100.0 / 9.0, max_relative = 1e-12);
    assert_relative_eq!(d.saturation_vapor_pressure, 2.5040297624334307, max_relative = 1e-12);
    assert_relative_eq!(d.actual_vapor_pressure, 1.5024178574600584, max_relative = 1e-12);
    assert_relative_eq!(d.canopy_wind, 7813410.098010968, max_relative = 1e-12);
    assert_relative_eq!(d.reynolds, 18134.210488053213, max_relative = 1e-12);
    assert_relative_eq!(d.nusselt, 258.482822828215, max_relative = 1e-12);
    assert_relative_eq!(d.boundary_resistance, 22.77386354744884, max_relative = 1e-12);
    assert_relative_eq!(d.long_wave, 5.721437993691779, max_relative = 1e-12);
    assert_relative_eq!(d.convective, 57.05948827227288, max_relative = 1e-12);
    assert_relative_eq!(d.evapotranspirative, 12.447189950831968, max_relative = 1e-12);
    assert_relative_eq!(d.sensible_heat, 12.694797726010414, max_relative = 1e-9);
    assert_relative_eq!(d.condensation_rate, 0.0056246334630086015, max_relative = 1e-9);
    assert_relative_eq!(d.potential_evaporation, 0.019306156358362213, max_relative = 1e-12);
    assert_relative_eq!(d.evaporation_mm, 0.4343885180631497, max_relative = 1e-12);
}

#[test]
fn humid_night_condenses_dew() {
    let estimate = one(obs(65.0, 64.5, 3.0, 99.0, 0.0));

    assert_relative_eq!(estimate.condensation_mm, 0.01282902618163165, max_relative = 1e-9);
    assert_relative_eq!(
        estimate.diagnostics.evaporation_mm,
        0.007844331626329545,
        max_relative = 1e-9
    );
    assert_relative_eq!(estimate.wetness_mm, 0.004984694555302104, max_relative = 1e-8);
}

#[test]
fn depression_just_below_cutoff_condenses() {
    // 40 °F over 36.679 °F is a depression a hair under 1.845 °C.
    let estimate = one(obs(40.0, 36.679, 1.0, 90.0, 0.0));

    assert!(estimate.diagnostics.dew_point_depression < 1.845);
    assert_relative_eq!(
        estimate.condensation_mm,
        0.045105418729353107,
        max_relative = 1e-9
    );
    assert_relative_eq!(
        estimate.wetness_mm,
        0.016574294392345614,
        max_relative = 1e-8
    );
}

#[test]
fn calm_air_uses_leaf_wind_floor() {
    let estimate = one(obs(60.0, 59.0, 0.0, 98.0, 0.0));
    let d = estimate.diagnostics;

    assert_eq!(d.leaf_wind, 0.001);
    assert_eq!(d.canopy_wind, 0.0);
    assert_eq!(d.evaporation_mm, 0.0);
    assert!(d.all_finite());
    assert_relative_eq!(d.reynolds, 8.113014713695962, max_relative = 1e-12);
    assert_relative_eq!(d.nusselt, 2.5283771373389206, max_relative = 1e-12);
    assert_relative_eq!(d.boundary_resistance, 2328.2335730360137, max_relative = 1e-12);
    assert_relative_eq!(estimate.wetness_mm, 0.0030235226817403506, max_relative = 1e-9);
}

#[test]
fn negative_wind_is_calm() {
    let calm = one(obs(60.0, 59.0, 0.0, 98.0, 0.0));
    let negative = one(obs(60.0, 59.0, -4.0, 98.0, 0.0));

    assert_eq!(negative.diagnostics.leaf_wind, calm.diagnostics.leaf_wind);
    assert_eq!(negative.diagnostics.canopy_wind, 0.0);
    assert_eq!(negative.wetness_mm, calm.wetness_mm);
}

#[test]
fn cool_rainy_step() {
    let estimate = one(obs(41.0, 40.0, 1.0, 97.0, 0.2));
    assert_relative_eq!(estimate.wetness_mm, 0.604902548898485, max_relative = 1e-9);
}

#[test]
fn hard_frost_is_dry() {
    for (dew, wind, precip) in [(28.0, 0.0, 0.0), (30.0, 10.0, 0.5), (35.0, 2.0, 0.1)] {
        assert_eq!(one(obs(30.0, dew, wind, 90.0, precip)).wetness_mm, 0.0);
    }
}

#[test]
fn overflowing_temperatures_stay_dry() {
    let estimate = one(obs(1.0e106, 1.0e106, 2.0, 80.0, 0.3));

    assert!(!estimate.diagnostics.all_finite());
    assert_eq!(estimate.condensation_mm, 0.0);
    assert!(estimate.wetness_mm.is_finite());
}

#[test]
fn rain_adds_full_interception() {
    let dry = one(obs(50.0, 50.0, 3.0, 100.0, 0.0));
    let wet = one(obs(50.0, 50.0, 3.0, 100.0, 0.1));

    assert!(wet.wetness_mm >= dry.wetness_mm + 0.6 - 1e-12);
    assert_relative_eq!(wet.wetness_mm, 0.6, max_relative = 1e-12);
}

#[test]
fn dew_point_above_air_is_reported_unclamped() {
    // A negative depression yields negative potential condensation.
    let estimate = one(obs(50.0, 52.0, 2.0, 100.0, 0.0));

    assert!(estimate.condensation_mm < 0.0);
    assert_eq!(estimate.wetness_mm, 0.0);
}

#[test]
fn degenerate_canopy_is_rejected_up_front() {
    let constants = Constants {
        canopy_height_cm: 400.0,
        ..Constants::default()
    };
    assert!(matches!(
        estimate(&[obs(70.0, 50.0, 5.0, 60.0, 0.0)], &constants),
        Err(EstimateError::Constants(ConstantsError::WindProfile { .. }))
    ));
}

#[test]
fn non_finite_row_aborts_batch() {
    let observations = [obs(70.0, 50.0, 5.0, 60.0, 0.0), obs(70.0, 50.0, f64::INFINITY, 60.0, 0.0)];

    let Err(EstimateError::Validation(error)) = estimate(&observations, &Constants::default())
    else {
        panic!("expected a validation error");
    };
    assert_eq!(error.row, 1);
    assert_eq!(
        error.to_string(),
        "row 1, field `WIND_SPEED_2M_MPH`: value is not finite"
    );
}

#[test]
fn json_batch_end_to_end() {
    let input = r#"[
        {"AIR_TEMP_F": 70, "DEWPOINT_F": 50, "WIND_SPEED_2M_MPH": 5,
         "RELATIVE_HUMIDITY_%": 60, "PRECIP_INCHES": 0},
        {"AIR_TEMP_F": 30, "DEWPOINT_F": 29, "WIND_SPEED_2M_MPH": 0,
         "RELATIVE_HUMIDITY_%": 96, "PRECIP_INCHES": 0.3}
    ]"#;

    let estimates = run(&parse_observations(input).unwrap());
    let json = to_json(&estimates, &OutputOptions::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 2);

    let keys: Vec<_> = records[0].as_object().unwrap().keys().cloned().collect();
    let mut expected = vec![
        "AIR_TEMP_F",
        "DEWPOINT_F",
        "WIND_SPEED_2M_MPH",
        "RELATIVE_HUMIDITY_%",
        "Potential condensation of dew (mm)",
        "Estimated Leaf Wetness (mm)",
    ];
    expected.sort_unstable();
    assert_eq!(keys, expected);

    assert_eq!(records[1]["AIR_TEMP_F"], 30.0);
    assert_eq!(records[1]["Estimated Leaf Wetness (mm)"], 0.0);
}
