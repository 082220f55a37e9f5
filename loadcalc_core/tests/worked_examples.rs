//! Solved worksheets for catalog scenarios, checked against hand calculations.

use loadcalc_core::pipeline::{Pipeline, Submission};
use loadcalc_core::scenarios::{commercial_scenario, residential_scenario};
use loadcalc_core::steps::{Answers, CalculationStep};
use loadcalc_core::Worksheet;

fn assert_rows(sheet: &Worksheet, expected: &[(&str, f64)]) {
    for (id, value) in expected {
        assert_eq!(sheet.stored(id), Some(*value), "{} / {}", sheet.scenario_id, id);
    }
}

#[test]
fn small_home_standard_method() {
    let sheet = Pipeline::residential(residential_scenario("small_home").unwrap()).solve();
    assert_rows(
        &sheet,
        &[
            ("general_lighting", 3_600.0),
            ("small_appliance", 3_000.0),
            ("laundry", 1_500.0),
            ("subtotal", 8_100.0),
            ("first_tier", 8_100.0),
            ("remainder_tier", 0.0),
            ("net_general", 8_100.0),
            ("fixed_appliances", 1_200.0),
            ("dryer", 5_000.0),
            ("range", 8_000.0),
            ("water_heater", 4_500.0),
            ("hvac", 10_000.0),
            ("total_va", 36_800.0),
            ("service_amps", 200.0),
            ("service_conductor", 30.0),
            ("gec", 4.0),
        ],
    );

    let amps = sheet.row("service_amps").unwrap();
    assert!((amps.expected - 153.33).abs() < 0.01);
}

#[test]
fn family_home_with_motor_appliances() {
    let sheet = Pipeline::residential(residential_scenario("family_home").unwrap()).solve();
    assert_rows(
        &sheet,
        &[
            ("subtotal", 10_500.0),
            ("first_tier", 10_000.0),
            ("remainder_tier", 175.0),
            ("net_general", 10_175.0),
            ("motor:disposal", 1_176.0),
            ("fixed_appliances", 3_876.0),
            ("dryer", 5_500.0),
            ("range", 8_000.0),
            ("motor:ac", 6_720.0),
            ("hvac", 6_720.0),
            ("total_va", 38_771.0),
            ("service_amps", 200.0),
        ],
    );
}

#[test]
fn large_home_applies_every_demand_rule() {
    let sheet = Pipeline::residential(residential_scenario("large_home").unwrap()).solve();
    assert_rows(
        &sheet,
        &[
            ("net_general", 11_750.0),
            ("fixed_appliances", 3_555.0),
            ("dryer", 5_000.0),
            ("range", 8_400.0),
            ("water_heater", 5_500.0),
            ("hvac", 15_000.0),
            ("other_loads", 18_000.0),
            ("total_va", 67_205.0),
            ("service_amps", 400.0),
            ("service_conductor", 600.0),
            ("gec", 10.0),
        ],
    );
}

#[test]
fn cottage_with_omitted_steps() {
    let sheet = Pipeline::residential(residential_scenario("cottage").unwrap()).solve();
    assert_eq!(sheet.rows.len(), 14);
    assert_rows(
        &sheet,
        &[
            ("fixed_appliances", 0.0),
            ("hvac", 6_000.0),
            ("total_va", 17_200.0),
            ("service_amps", 100.0),
            ("service_conductor", 3.0),
            ("gec", 8.0),
        ],
    );
}

#[test]
fn retail_store_non_dwelling() {
    let sheet = Pipeline::commercial(commercial_scenario("retail_store").unwrap()).solve();
    assert_rows(
        &sheet,
        &[
            ("lighting_load", 5_700.0),
            ("lighting_demand", 5_700.0),
            ("hvac", 6_720.0),
            ("outlet_loads", 17_280.0),
            ("receptacle_demand", 13_640.0),
            ("kitchen_demand", 3_260.0),
            ("largest_motor", 1_680.0),
            ("total_va", 31_000.0),
            ("service_conductor", 1.0),
            ("gec", 6.0),
        ],
    );

    let amps = 31_000.0 / 240.0;
    assert!((amps - 129.2_f64).abs() < 0.05);
}

#[test]
fn office_three_phase() {
    let sheet = Pipeline::commercial(commercial_scenario("office_building").unwrap()).solve();
    assert_rows(
        &sheet,
        &[
            ("lighting_load", 15_600.0),
            ("hvac", 11_096.0),
            ("outlet_loads", 32_400.0),
            ("receptacle_demand", 21_200.0),
            ("kitchen_demand", 0.0),
            ("largest_motor", 4_161.0),
            ("total_va", 52_057.0),
            ("service_conductor", 10.0),
            ("gec", 6.0),
        ],
    );
}

#[test]
fn guided_walkthrough_matches_solve() {
    let home = residential_scenario("family_home").unwrap();
    let pipeline = Pipeline::residential(home);
    let key = pipeline.solve();
    let mut answers = Answers::new();

    for (index, row) in key.rows.iter().enumerate() {
        let submitted = if row.expected.fract() == 0.0 {
            format!("{}", row.expected)
        } else {
            format!("{:.1}", row.expected)
        };
        let result = pipeline.submit(index, &submitted, &mut answers).unwrap();
        assert_eq!(result, Submission::Accepted { stored: row.stored }, "step {}", row.id);
    }

    assert_eq!(answers, key.answers());
}

#[test]
fn evaluation_is_idempotent() {
    let retail = commercial_scenario("retail_store").unwrap();
    let pipeline = Pipeline::commercial(retail);
    let answers = pipeline.solve().answers();

    for index in 0..pipeline.len() {
        let first = pipeline.expected(index, &answers).unwrap();
        let second = pipeline.expected(index, &answers).unwrap();
        assert_eq!(first, second);

        let step = &pipeline.steps()[index];
        assert_eq!(
            pipeline.is_acceptable(index, first, first).unwrap(),
            pipeline.is_acceptable(index, first, first).unwrap()
        );
        assert_eq!(
            pipeline.stored_value(index, &answers, first).unwrap(),
            pipeline.stored_value(index, &answers, first).unwrap(),
            "{}",
            step.id()
        );
        assert_eq!(
            pipeline.hint_text(index, &answers).unwrap(),
            pipeline.hint_text(index, &answers).unwrap()
        );
    }

    assert_eq!(pipeline.solve(), pipeline.solve());
}
