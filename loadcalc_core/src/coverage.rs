//! Equipment list and cross-off coverage.
//!
//! A scenario's equipment is shown as line items. As the user moves through
//! the steps, each item is crossed off once the step that counts it has been
//! passed. The crossed-off set is derived from `(steps, scenario, index)`
//! alone; nothing here holds state.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::motors::{describe_conversion, motor_to_va};
use crate::scenarios::{CommercialScenario, ResidentialScenario};
use crate::steps::commercial::outlet_components;
use crate::steps::CalculationStep;
use crate::tables::demand::{RECEPTACLE_VA, SHOW_WINDOW_VA_PER_FT};

/// Keys for commercial equipment line items
pub mod keys {
    pub const LIGHTING: &str = "general_lighting";
    pub const HVAC_MOTOR: &str = "hvac_motor";
    pub const HEATING: &str = "heating";

    /// Outlet component, e.g. `outlet:show_window`
    pub fn outlet(label: &str) -> String {
        format!("outlet:{}", label.replace(' ', "_"))
    }

    pub fn kitchen(index: usize) -> String {
        format!("kitchen:{}", index)
    }

    /// Non-HVAC motor by position in the scenario's motor list
    pub fn motor(index: usize) -> String {
        format!("motor:{}", index)
    }
}

/// One line of the equipment list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentLine {
    /// Key matched against [`CalculationStep::accounts_for`]
    pub key: String,
    pub label: String,
    /// Connected load; motors use the same conversion as the steps
    pub va: f64,
    /// Extra detail such as the motor conversion
    pub detail: Option<String>,
}

/// Equipment list for a dwelling, one line per appliance
pub fn residential_equipment(scenario: &ResidentialScenario) -> Vec<EquipmentLine> {
    scenario
        .appliances
        .iter()
        .map(|a| EquipmentLine {
            key: a.id.clone(),
            label: a.name.clone(),
            va: a.connected_va(),
            detail: a.motor_rating().map(describe_conversion),
        })
        .collect()
}

/// Equipment list for a non-dwelling building
pub fn commercial_equipment(scenario: &CommercialScenario) -> Vec<EquipmentLine> {
    let rate = scenario.building_type.va_per_sqft();
    let mut lines = vec![EquipmentLine {
        key: keys::LIGHTING.to_string(),
        label: format!("General lighting ({} sq ft)", scenario.square_feet),
        va: (scenario.square_feet * rate).round(),
        detail: Some(format!("{} VA/sq ft", rate)),
    }];

    for (label, va) in outlet_components(scenario) {
        let detail = match label {
            "receptacles" => Some(format!(
                "{} × {} VA",
                scenario.outlets.receptacles, RECEPTACLE_VA
            )),
            "show window" => Some(format!(
                "{} ft × {} VA/ft",
                scenario.outlets.show_window_ft, SHOW_WINDOW_VA_PER_FT
            )),
            _ => None,
        };
        lines.push(EquipmentLine {
            key: keys::outlet(label),
            label: capitalize(label),
            va,
            detail,
        });
    }

    for (i, item) in scenario.kitchen.iter().enumerate() {
        lines.push(EquipmentLine {
            key: keys::kitchen(i),
            label: item.name.clone(),
            va: item.watts,
            detail: None,
        });
    }

    if let Some(hvac) = &scenario.hvac_motor {
        let motor = scenario.motor(hvac);
        lines.push(EquipmentLine {
            key: keys::HVAC_MOTOR.to_string(),
            label: hvac.name.clone(),
            va: motor_to_va(&motor),
            detail: Some(describe_conversion(&motor)),
        });
    }
    if scenario.heating_watts > 0.0 {
        lines.push(EquipmentLine {
            key: keys::HEATING.to_string(),
            label: "Electric heat".to_string(),
            va: scenario.heating_watts,
            detail: None,
        });
    }

    for (i, named) in scenario.other_motors.iter().enumerate() {
        let motor = scenario.motor(named);
        lines.push(EquipmentLine {
            key: keys::motor(i),
            label: named.name.clone(),
            va: motor_to_va(&motor),
            detail: Some(describe_conversion(&motor)),
        });
    }

    lines
}

/// Keys accounted for by the steps strictly before `index`.
///
/// An index past the end covers every step.
pub fn covered_items<S: CalculationStep>(
    steps: &[S],
    scenario: &S::Scenario,
    index: usize,
) -> BTreeSet<String> {
    steps
        .iter()
        .take(index)
        .flat_map(|step| step.accounts_for(scenario))
        .collect()
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{commercial_steps, residential_steps};
    use crate::scenarios::{
        commercial_scenario, commercial_scenarios, residential_scenario, residential_scenarios,
    };

    #[test]
    fn test_residential_lines_convert_motors() {
        let home = residential_scenario("family_home").unwrap();
        let lines = residential_equipment(home);
        assert_eq!(lines.len(), home.appliances.len());
        let disposal = lines.iter().find(|l| l.key == "disposal").unwrap();
        assert_eq!(disposal.va, 1_176.0);
        assert!(disposal.detail.is_some());
        let dryer = lines.iter().find(|l| l.key == "dryer").unwrap();
        assert_eq!(dryer.va, 5_500.0);
        assert!(dryer.detail.is_none());
    }

    #[test]
    fn test_commercial_lines() {
        let retail = commercial_scenario("retail_store").unwrap();
        let lines = commercial_equipment(retail);
        let keys: Vec<&str> = lines.iter().map(|l| l.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "general_lighting",
                "outlet:receptacles",
                "outlet:show_window",
                "outlet:sign_outlet",
                "kitchen:0",
                "kitchen:1",
                "hvac_motor",
                "heating",
            ]
        );
        assert_eq!(lines[0].va, 5_700.0);
        assert_eq!(lines[3].label, "Sign outlet");
        assert_eq!(lines[6].va, 6_720.0);
    }

    #[test]
    fn test_covered_items_progress() {
        let home = residential_scenario("small_home").unwrap();
        let steps = residential_steps(home);
        assert!(covered_items(&steps, home, 0).is_empty());

        let dryer_index = steps.iter().position(|s| s.id().as_str() == "dryer").unwrap();
        let before = covered_items(&steps, home, dryer_index);
        assert!(before.contains("dishwasher"));
        assert!(!before.contains("dryer"));
        let after = covered_items(&steps, home, dryer_index + 1);
        assert!(after.contains("dryer"));
    }

    #[test]
    fn test_every_line_is_eventually_covered() {
        for home in residential_scenarios() {
            let steps = residential_steps(home);
            let covered = covered_items(&steps, home, steps.len());
            for line in residential_equipment(home) {
                assert!(covered.contains(&line.key), "{}: {} never covered", home.id, line.key);
            }
        }
        for building in commercial_scenarios() {
            let steps = commercial_steps();
            let covered = covered_items(&steps, building, usize::MAX);
            for line in commercial_equipment(building) {
                assert!(covered.contains(&line.key), "{}: {} never covered", building.id, line.key);
            }
        }
    }
}
