//! Active step lists.
//!
//! Residential lists depend on the scenario: appliance steps with nothing to
//! count are dropped, and each motor appliance gets a conversion step placed
//! directly before the step that reads its VA. Commercial lists are fixed.

use tracing::debug;

use crate::scenarios::ResidentialScenario;
use crate::steps::{CalculationStep, CommercialStep, ResidentialStep};

/// Ordered, active steps for a dwelling scenario
pub fn residential_steps(scenario: &ResidentialScenario) -> Vec<ResidentialStep> {
    let mut steps = Vec::with_capacity(ResidentialStep::SEQUENCE.len() + scenario.appliances.len());

    for step in ResidentialStep::SEQUENCE.iter() {
        if !step.applies_to(scenario) {
            debug!(
                scenario = %scenario.id,
                step = %step.id(),
                "omitting step with no matching equipment"
            );
            continue;
        }

        let categories = step.categories();
        for appliance in scenario
            .appliances
            .iter()
            .filter(|a| a.is_motor() && categories.contains(&a.category))
        {
            debug!(
                scenario = %scenario.id,
                appliance = %appliance.id,
                before = %step.id(),
                "inserting motor conversion"
            );
            steps.push(ResidentialStep::motor_conversion(appliance));
        }

        steps.push(step.clone());
    }

    steps
}

/// The ten non-dwelling steps
pub fn commercial_steps() -> Vec<CommercialStep> {
    CommercialStep::ALL.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::residential_scenario;

    fn ids(steps: &[ResidentialStep]) -> Vec<String> {
        steps.iter().map(|s| s.id().to_string()).collect()
    }

    #[test]
    fn test_small_home_has_no_motor_steps() {
        let steps = residential_steps(residential_scenario("small_home").unwrap());
        assert_eq!(steps.len(), 16);
        assert!(!ids(&steps).contains(&"other_loads".to_string()));
    }

    #[test]
    fn test_motor_steps_precede_consumers() {
        let steps = residential_steps(residential_scenario("family_home").unwrap());
        let ids = ids(&steps);
        assert_eq!(steps.len(), 18);

        let disposal = ids.iter().position(|id| id == "motor:disposal").unwrap();
        let fixed = ids.iter().position(|id| id == "fixed_appliances").unwrap();
        assert_eq!(disposal + 1, fixed);

        let ac = ids.iter().position(|id| id == "motor:ac").unwrap();
        let hvac = ids.iter().position(|id| id == "hvac").unwrap();
        assert_eq!(ac + 1, hvac);
    }

    #[test]
    fn test_large_home_groups_motors() {
        let steps = residential_steps(residential_scenario("large_home").unwrap());
        let ids = ids(&steps);
        assert_eq!(steps.len(), 21);
        let fixed = ids.iter().position(|id| id == "fixed_appliances").unwrap();
        assert_eq!(&ids[fixed - 2..fixed], &["motor:disposal", "motor:compactor"]);
        let other = ids.iter().position(|id| id == "other_loads").unwrap();
        assert_eq!(ids[other - 1], "motor:pool_pump");
    }

    #[test]
    fn test_cottage_omits_missing_categories() {
        let steps = residential_steps(residential_scenario("cottage").unwrap());
        let ids = ids(&steps);
        assert_eq!(steps.len(), 14);
        for missing in ["dryer", "range", "other_loads"] {
            assert!(!ids.contains(&missing.to_string()), "{} should be omitted", missing);
        }
        // framework step stays even with nothing fixed in place
        assert!(ids.contains(&"fixed_appliances".to_string()));
        assert!(ids.contains(&"hvac".to_string()));
    }

    #[test]
    fn test_commercial_steps_fixed() {
        let steps = commercial_steps();
        assert_eq!(steps.len(), 10);
        assert_eq!(steps[0], CommercialStep::LightingLoad);
        assert_eq!(steps[9], CommercialStep::Gec);
    }
}
