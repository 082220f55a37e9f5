//! Every active step list must resolve each dependency to an earlier step.

use std::collections::HashSet;

use loadcalc_core::filter::{commercial_steps, residential_steps};
use loadcalc_core::scenarios::{commercial_scenarios, residential_scenarios};
use loadcalc_core::steps::CalculationStep;

fn assert_no_forward_references<S: CalculationStep>(
    label: &str,
    steps: &[S],
    scenario: &S::Scenario,
) {
    let mut seen = HashSet::new();
    for step in steps {
        for dep in step.dependencies(scenario) {
            assert!(
                seen.contains(&dep),
                "{}: step {} depends on {} which is not earlier",
                label,
                step.id(),
                dep
            );
        }
        assert!(seen.insert(step.id()), "{}: duplicate step {}", label, step.id());
    }
}

#[test]
fn residential_lists_have_no_forward_references() {
    for scenario in residential_scenarios() {
        assert_no_forward_references(&scenario.id, &residential_steps(scenario), scenario);
    }
}

#[test]
fn commercial_lists_have_no_forward_references() {
    for scenario in commercial_scenarios() {
        assert_no_forward_references(&scenario.id, &commercial_steps(), scenario);
    }
}

#[test]
fn every_motor_appliance_gets_one_conversion_step() {
    for scenario in residential_scenarios() {
        let ids: Vec<String> = residential_steps(scenario)
            .iter()
            .map(|s| s.id().to_string())
            .collect();
        for appliance in &scenario.appliances {
            let key = format!("motor:{}", appliance.id);
            let count = ids.iter().filter(|id| **id == key).count();
            let wanted = usize::from(appliance.is_motor());
            assert_eq!(count, wanted, "{}: {}", scenario.id, appliance.id);
        }
    }
}
