//! Commercial Steps (NEC 220 Part IV, non-dwelling)
//!
//! Ten fixed steps; every scenario runs all of them.
//!
//! ```text
//!  1 lighting load        sq ft × unit load (Table 220.42(A))
//!  2 lighting demand      Table 220.45 schedule for the occupancy
//!  3 HVAC                 max(AC motor VA, heat)
//!  4 outlet loads         lampholders, receptacles, multioutlet, show window, sign
//!  5 receptacle demand    10 kVA at 100%, remainder at 50%
//!  6 kitchen demand       Table 220.56 by equipment count
//!  7 largest motor        25% of the largest motor
//!  8 total VA             2 + 3 + 5 + 6 + 7
//!  9 service conductor    total ÷ (V or V√3), Table 310.16
//! 10 GEC                  Table 250.66
//! ```

use serde::{Deserialize, Serialize};

use super::{CalculationStep, Hint, PriorAnswers, StepId, StepUnit, Validation};
use crate::coverage::keys;
use crate::motors::{describe_conversion, motor_to_va, Phase};
use crate::scenarios::{CommercialScenario, NamedMotor};
use crate::tables::demand::{
    LAMPHOLDER_VA, LARGEST_MOTOR_FACTOR, MULTIOUTLET_VA_PER_FT, RECEPTACLE_VA,
    SHOW_WINDOW_VA_PER_FT, SIGN_OUTLET_VA,
};
use crate::tables::{
    ampacity_75c, apply_tiered_demand, conductor_for_amps, gec_for_conductor,
    kitchen_demand_factor, nec_ref, tier_breakdown, ConductorSize, RECEPTACLE_DEMAND,
};

type StepHint<'s> = Hint<'s, CommercialScenario>;

/// One step of the non-dwelling calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommercialStep {
    LightingLoad,
    LightingDemand,
    Hvac,
    OutletLoads,
    ReceptacleDemand,
    KitchenDemand,
    LargestMotor,
    TotalVa,
    ServiceConductor,
    Gec,
}

impl CommercialStep {
    /// All steps in calculation order
    pub const ALL: [CommercialStep; 10] = [
        CommercialStep::LightingLoad,
        CommercialStep::LightingDemand,
        CommercialStep::Hvac,
        CommercialStep::OutletLoads,
        CommercialStep::ReceptacleDemand,
        CommercialStep::KitchenDemand,
        CommercialStep::LargestMotor,
        CommercialStep::TotalVa,
        CommercialStep::ServiceConductor,
        CommercialStep::Gec,
    ];

    fn key(&self) -> &'static str {
        match self {
            CommercialStep::LightingLoad => "lighting_load",
            CommercialStep::LightingDemand => "lighting_demand",
            CommercialStep::Hvac => "hvac",
            CommercialStep::OutletLoads => "outlet_loads",
            CommercialStep::ReceptacleDemand => "receptacle_demand",
            CommercialStep::KitchenDemand => "kitchen_demand",
            CommercialStep::LargestMotor => "largest_motor",
            CommercialStep::TotalVa => "total_va",
            CommercialStep::ServiceConductor => "service_conductor",
            CommercialStep::Gec => "gec",
        }
    }
}

/// Outlet load components as `(label, VA)`, zero entries omitted
pub fn outlet_components(scenario: &CommercialScenario) -> Vec<(&'static str, f64)> {
    let o = &scenario.outlets;
    let sign = if o.sign_outlet { SIGN_OUTLET_VA } else { 0.0 };
    [
        ("lampholders", f64::from(o.lampholders) * LAMPHOLDER_VA),
        ("receptacles", f64::from(o.receptacles) * RECEPTACLE_VA),
        ("multioutlet assembly", o.multioutlet_ft * MULTIOUTLET_VA_PER_FT),
        ("show window", o.show_window_ft * SHOW_WINDOW_VA_PER_FT),
        ("sign outlet", sign),
    ]
    .into_iter()
    .filter(|(_, va)| *va > 0.0)
    .collect()
}

fn hvac_cooling_va(scenario: &CommercialScenario) -> f64 {
    scenario
        .hvac_motor
        .as_ref()
        .map(|m| motor_to_va(&scenario.motor(m)))
        .unwrap_or(0.0)
}

/// Largest motor in the building by converted VA, with its VA
fn largest_motor(scenario: &CommercialScenario) -> Option<(&NamedMotor, f64)> {
    scenario
        .all_motors()
        .map(|m| (m, motor_to_va(&scenario.motor(m))))
        .fold(None, |best, (m, va)| match best {
            Some((_, best_va)) if best_va >= va => best,
            _ => Some((m, va)),
        })
}

fn kitchen_connected(scenario: &CommercialScenario) -> f64 {
    scenario.kitchen.iter().map(|k| k.watts).sum()
}

fn stored_conductor(answers: &PriorAnswers<'_>) -> ConductorSize {
    ConductorSize::from_code(answers.get(&CommercialStep::ServiceConductor.id()))
        .unwrap_or(ConductorSize::Awg8)
}

impl CalculationStep for CommercialStep {
    type Scenario = CommercialScenario;

    fn id(&self) -> StepId {
        StepId::new(self.key())
    }

    fn title(&self) -> String {
        match self {
            CommercialStep::LightingLoad => "General Lighting Load",
            CommercialStep::LightingDemand => "Lighting Demand",
            CommercialStep::Hvac => "Heating / Air Conditioning",
            CommercialStep::OutletLoads => "Outlet Loads",
            CommercialStep::ReceptacleDemand => "Receptacle Demand",
            CommercialStep::KitchenDemand => "Kitchen Equipment",
            CommercialStep::LargestMotor => "Largest Motor (25%)",
            CommercialStep::TotalVa => "Total Calculated Load",
            CommercialStep::ServiceConductor => "Service Conductor",
            CommercialStep::Gec => "Grounding Electrode Conductor",
        }
        .to_string()
    }

    fn prompt(&self, scenario: &CommercialScenario) -> String {
        match self {
            CommercialStep::LightingLoad => format!(
                "The {} is a {} sq ft {}. What is the general lighting load?",
                scenario.name,
                scenario.square_feet,
                scenario.building_type.display_name().to_lowercase()
            ),
            CommercialStep::LightingDemand => {
                "Apply the lighting demand factors. What is the demand load?".to_string()
            }
            CommercialStep::Hvac => format!(
                "The building is served at {} V {}. What is the HVAC load?",
                scenario.voltage, scenario.phase
            ),
            CommercialStep::OutletLoads => "What is the total connected outlet load?".to_string(),
            CommercialStep::ReceptacleDemand => {
                "Apply the receptacle demand factors. What is the demand load?".to_string()
            }
            CommercialStep::KitchenDemand => format!(
                "There are {} pieces of kitchen equipment. What is the demand load?",
                scenario.kitchen.len()
            ),
            CommercialStep::LargestMotor => "What is the 25% largest-motor addition?".to_string(),
            CommercialStep::TotalVa => "What is the total calculated load in VA?".to_string(),
            CommercialStep::ServiceConductor => {
                "What copper service conductor size is required? Enter the size code.".to_string()
            }
            CommercialStep::Gec => {
                "What size grounding electrode conductor is required? Enter the size code."
                    .to_string()
            }
        }
    }

    fn citation(&self) -> &'static str {
        match self {
            CommercialStep::LightingLoad => nec_ref::NON_DWELLING_LIGHTING,
            CommercialStep::LightingDemand => nec_ref::LIGHTING_DEMAND,
            CommercialStep::Hvac => nec_ref::NONCOINCIDENT,
            CommercialStep::OutletLoads => nec_ref::OTHER_LOADS,
            CommercialStep::ReceptacleDemand => nec_ref::RECEPTACLE_DEMAND,
            CommercialStep::KitchenDemand => nec_ref::KITCHEN,
            CommercialStep::LargestMotor => nec_ref::LARGEST_MOTOR,
            CommercialStep::TotalVa => nec_ref::TOTAL_LOAD,
            CommercialStep::ServiceConductor => nec_ref::CONDUCTOR_AMPACITY,
            CommercialStep::Gec => nec_ref::GEC,
        }
    }

    fn formula(&self) -> Option<&'static str> {
        match self {
            CommercialStep::LightingLoad => Some("sq ft × VA/sq ft"),
            CommercialStep::Hvac => Some("max(AC VA, heat W)"),
            CommercialStep::OutletLoads => Some(
                "600 × lampholders + 180 × receptacles + 180 × multioutlet ft \
                 + 200 × show window ft + 1,200 sign",
            ),
            CommercialStep::ReceptacleDemand => Some("10,000 + (outlets − 10,000) × 0.5"),
            CommercialStep::LargestMotor => Some("0.25 × largest motor VA"),
            CommercialStep::TotalVa => {
                Some("lighting + HVAC + receptacles + kitchen + largest motor")
            }
            CommercialStep::ServiceConductor => Some("I = VA ÷ V (1φ) or VA ÷ (V × √3) (3φ)"),
            _ => None,
        }
    }

    fn unit(&self) -> StepUnit {
        match self {
            CommercialStep::ServiceConductor | CommercialStep::Gec => StepUnit::SizeCode,
            _ => StepUnit::Va,
        }
    }

    fn validation(&self) -> Validation {
        match self {
            CommercialStep::LightingLoad | CommercialStep::OutletLoads => {
                Validation::tolerance(10.0)
            }
            CommercialStep::LargestMotor => Validation::tolerance(25.0),
            CommercialStep::TotalVa => Validation::tolerance(500.0),
            CommercialStep::ServiceConductor => Validation::ConductorSize { slack_amps: 25.0 },
            CommercialStep::Gec => Validation::GecSize,
            _ => Validation::tolerance(50.0),
        }
    }

    fn dependencies(&self, _scenario: &CommercialScenario) -> Vec<StepId> {
        match self {
            CommercialStep::LightingDemand => vec![CommercialStep::LightingLoad.id()],
            CommercialStep::ReceptacleDemand => vec![CommercialStep::OutletLoads.id()],
            CommercialStep::TotalVa => [
                CommercialStep::LightingDemand,
                CommercialStep::Hvac,
                CommercialStep::ReceptacleDemand,
                CommercialStep::KitchenDemand,
                CommercialStep::LargestMotor,
            ]
            .iter()
            .map(|s| s.id())
            .collect(),
            CommercialStep::ServiceConductor => vec![CommercialStep::TotalVa.id()],
            CommercialStep::Gec => vec![CommercialStep::ServiceConductor.id()],
            _ => Vec::new(),
        }
    }

    fn expected(&self, scenario: &CommercialScenario, answers: &PriorAnswers<'_>) -> f64 {
        match self {
            CommercialStep::LightingLoad => {
                (scenario.square_feet * scenario.building_type.va_per_sqft()).round()
            }
            CommercialStep::LightingDemand => apply_tiered_demand(
                answers.get(&CommercialStep::LightingLoad.id()),
                scenario.building_type.lighting_demand(),
            ),
            CommercialStep::Hvac => hvac_cooling_va(scenario).max(scenario.heating_watts),
            CommercialStep::OutletLoads => {
                outlet_components(scenario).iter().map(|(_, va)| va).sum()
            }
            CommercialStep::ReceptacleDemand => {
                let outlets = answers.get(&CommercialStep::OutletLoads.id());
                apply_tiered_demand(outlets, &RECEPTACLE_DEMAND)
            }
            CommercialStep::KitchenDemand => {
                let factor = kitchen_demand_factor(scenario.kitchen.len());
                (kitchen_connected(scenario) * factor).round()
            }
            CommercialStep::LargestMotor => largest_motor(scenario)
                .map(|(_, va)| (va * LARGEST_MOTOR_FACTOR).round())
                .unwrap_or(0.0),
            CommercialStep::TotalVa => answers.sum(&self.dependencies(scenario)),
            CommercialStep::ServiceConductor => {
                let amps = answers.get(&CommercialStep::TotalVa.id()) / scenario.amps_divisor();
                conductor_for_amps(amps).code()
            }
            CommercialStep::Gec => gec_for_conductor(stored_conductor(answers)).code(),
        }
    }

    fn stored_value(
        &self,
        scenario: &CommercialScenario,
        answers: &PriorAnswers<'_>,
        user: f64,
    ) -> f64 {
        match self {
            CommercialStep::ServiceConductor | CommercialStep::Gec => {
                self.expected(scenario, answers)
            }
            _ => user,
        }
    }

    fn hint(&self) -> StepHint<'_> {
        match self {
            CommercialStep::LightingLoad => StepHint::derived(|s, _| {
                let rate = s.building_type.va_per_sqft();
                format!(
                    "{} occupancies use {} VA per sq ft (125% continuous load included): \
                     {} × {} = {} VA",
                    s.building_type,
                    rate,
                    s.square_feet,
                    rate,
                    (s.square_feet * rate).round()
                )
            }),
            CommercialStep::LightingDemand => StepHint::derived(|s, a| {
                let load = a.get(&CommercialStep::LightingLoad.id());
                let tiers = s.building_type.lighting_demand();
                if tiers.len() == 1 {
                    return format!("{} lighting is taken at 100%: {} VA", s.building_type, load);
                }
                let parts: Vec<String> = tier_breakdown(load, tiers)
                    .iter()
                    .filter(|c| c.allocated_va > 0.0)
                    .map(|c| {
                        format!("{} × {}% = {}", c.allocated_va, c.factor * 100.0, c.demand_va)
                    })
                    .collect();
                let demand = apply_tiered_demand(load, tiers);
                format!("{}: {} = {} VA", s.building_type, parts.join(", "), demand)
            }),
            CommercialStep::Hvac => StepHint::derived(|s, _| {
                let cooling = match &s.hvac_motor {
                    Some(m) => format!("{}: {}", m.name, describe_conversion(&s.motor(m))),
                    None => "No air conditioning: 0 VA".to_string(),
                };
                format!(
                    "{}. Heat is {} W. Heating and cooling are noncoincident, \
                     so count the larger: {} VA",
                    cooling,
                    s.heating_watts,
                    hvac_cooling_va(s).max(s.heating_watts)
                )
            }),
            CommercialStep::OutletLoads => StepHint::derived(|s, _| {
                let parts = outlet_components(s);
                let total: f64 = parts.iter().map(|(_, va)| va).sum();
                let items: Vec<String> = parts
                    .iter()
                    .map(|(label, va)| format!("{} {}", label, va))
                    .collect();
                format!("{} = {} VA", items.join(" + "), total)
            }),
            CommercialStep::ReceptacleDemand => StepHint::derived(|_, a| {
                let outlets = a.get(&CommercialStep::OutletLoads.id());
                let parts = tier_breakdown(outlets, &RECEPTACLE_DEMAND);
                format!(
                    "First 10,000 VA at 100% = {}; remainder {} × 50% = {}; total {} VA",
                    parts[0].demand_va,
                    parts[1].allocated_va,
                    parts[1].demand_va,
                    parts[0].demand_va + parts[1].demand_va
                )
            }),
            CommercialStep::KitchenDemand => StepHint::derived(|s, _| {
                if s.kitchen.is_empty() {
                    return "No commercial kitchen equipment: 0 VA".to_string();
                }
                let connected = kitchen_connected(s);
                let factor = kitchen_demand_factor(s.kitchen.len());
                format!(
                    "{} units totaling {} W take a {}% demand factor: {} VA",
                    s.kitchen.len(),
                    connected,
                    factor * 100.0,
                    (connected * factor).round()
                )
            }),
            CommercialStep::LargestMotor => StepHint::derived(|s, _| match largest_motor(s) {
                Some((motor, va)) => format!(
                    "Convert every motor, then take 25% of the largest. \
                     {} is largest at {} VA: {} × 0.25 = {} VA",
                    motor.name,
                    va,
                    va,
                    (va * LARGEST_MOTOR_FACTOR).round()
                ),
                None => "There are no motors: 0 VA".to_string(),
            }),
            CommercialStep::TotalVa => StepHint::derived(move |s, a| {
                let deps = self.dependencies(s);
                let parts: Vec<String> = deps.iter().map(|d| format!("{}", a.get(d))).collect();
                format!("{} = {} VA", parts.join(" + "), a.sum(&deps))
            }),
            CommercialStep::ServiceConductor => StepHint::derived(|s, a| {
                let total = a.get(&CommercialStep::TotalVa.id());
                let amps = total / s.amps_divisor();
                let size = conductor_for_amps(amps);
                let divisor = match s.phase {
                    Phase::Single => format!("{} V", s.voltage),
                    Phase::Three => format!("({} V × √3)", s.voltage),
                };
                format!(
                    "{} VA ÷ {} = {:.1} A. Smallest 75 °C copper conductor: {} ({} A). \
                     Size code {}",
                    total,
                    divisor,
                    amps,
                    size,
                    ampacity_75c(size),
                    size.code()
                )
            }),
            CommercialStep::Gec => StepHint::derived(|_, a| {
                let conductor = stored_conductor(a);
                let gec = gec_for_conductor(conductor);
                format!(
                    "Table 250.66 for {} copper service conductors: {} GEC. \
                     Size code {} (1/0 = 10, 2/0 = 20, 3/0 = 30)",
                    conductor,
                    gec,
                    gec.code()
                )
            }),
        }
    }

    fn accounts_for(&self, scenario: &CommercialScenario) -> Vec<String> {
        match self {
            CommercialStep::LightingLoad => vec![keys::LIGHTING.to_string()],
            CommercialStep::Hvac => {
                let mut out = Vec::new();
                if scenario.hvac_motor.is_some() {
                    out.push(keys::HVAC_MOTOR.to_string());
                }
                if scenario.heating_watts > 0.0 {
                    out.push(keys::HEATING.to_string());
                }
                out
            }
            CommercialStep::OutletLoads => outlet_components(scenario)
                .iter()
                .map(|(label, _)| keys::outlet(label))
                .collect(),
            CommercialStep::KitchenDemand => {
                (0..scenario.kitchen.len()).map(keys::kitchen).collect()
            }
            CommercialStep::LargestMotor => {
                (0..scenario.other_motors.len()).map(keys::motor).collect()
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::commercial_scenario;
    use crate::steps::Answers;

    fn expected_with(step: CommercialStep, id: &str, answers: &Answers) -> f64 {
        let s = commercial_scenario(id).unwrap();
        step.expected(s, &PriorAnswers::all(answers))
    }

    #[test]
    fn test_retail_independent_steps() {
        let empty = Answers::new();
        assert_eq!(expected_with(CommercialStep::LightingLoad, "retail_store", &empty), 5_700.0);
        assert_eq!(expected_with(CommercialStep::Hvac, "retail_store", &empty), 6_720.0);
        assert_eq!(expected_with(CommercialStep::OutletLoads, "retail_store", &empty), 17_280.0);
        assert_eq!(expected_with(CommercialStep::KitchenDemand, "retail_store", &empty), 3_260.0);
        assert_eq!(expected_with(CommercialStep::LargestMotor, "retail_store", &empty), 1_680.0);
    }

    #[test]
    fn test_receptacle_demand_uses_full_outlet_total() {
        let answers: Answers = [(CommercialStep::OutletLoads.id(), 17_280.0)]
            .into_iter()
            .collect();
        let demand = expected_with(CommercialStep::ReceptacleDemand, "retail_store", &answers);
        assert_eq!(demand, 13_640.0);
    }

    #[test]
    fn test_largest_motor_scans_all_motors() {
        // elevator (15 hp, 16,644 VA) beats the 10 hp rooftop unit (11,096 VA)
        let empty = Answers::new();
        assert_eq!(expected_with(CommercialStep::LargestMotor, "office_building", &empty), 4_161.0);
        assert_eq!(expected_with(CommercialStep::Hvac, "office_building", &empty), 11_096.0);
    }

    #[test]
    fn test_hvac_without_ac_uses_heat() {
        assert_eq!(expected_with(CommercialStep::Hvac, "warehouse", &Answers::new()), 12_000.0);
    }

    #[test]
    fn test_kitchen_six_items() {
        // 50,000 W at 65%
        let demand = expected_with(CommercialStep::KitchenDemand, "restaurant", &Answers::new());
        assert_eq!(demand, 32_500.0);
    }

    #[test]
    fn test_warehouse_lighting_tiers() {
        let answers: Answers = [(CommercialStep::LightingLoad.id(), 24_000.0)]
            .into_iter()
            .collect();
        let demand = expected_with(CommercialStep::LightingDemand, "warehouse", &answers);
        assert_eq!(demand, 18_250.0);
    }

    #[test]
    fn test_three_phase_conductor() {
        // 52,057 VA / (208 × √3) = 144.5 A -> 1/0
        let answers: Answers = [(CommercialStep::TotalVa.id(), 52_057.0)]
            .into_iter()
            .collect();
        let code = expected_with(CommercialStep::ServiceConductor, "office_building", &answers);
        assert_eq!(code, 10.0);
    }

    #[test]
    fn test_gec_numeric_encoding() {
        let s = commercial_scenario("retail_store").unwrap();
        let answers: Answers = [(CommercialStep::ServiceConductor.id(), 1.0)].into_iter().collect();
        let view = PriorAnswers::all(&answers);
        assert_eq!(CommercialStep::Gec.expected(s, &view), 6.0);
        assert_eq!(CommercialStep::Gec.stored_value(s, &view, 6.0), 6.0);
    }

    #[test]
    fn test_outlet_hint() {
        let s = commercial_scenario("retail_store").unwrap();
        let answers = Answers::new();
        let text = CommercialStep::OutletLoads.hint().render(s, &PriorAnswers::all(&answers));
        assert_eq!(text, "receptacles 10080 + show window 6000 + sign outlet 1200 = 17280 VA");
    }

    #[test]
    fn test_accounts_for() {
        let s = commercial_scenario("office_building").unwrap();
        assert_eq!(
            CommercialStep::Hvac.accounts_for(s),
            vec![keys::HVAC_MOTOR.to_string(), keys::HEATING.to_string()]
        );
        assert_eq!(CommercialStep::LargestMotor.accounts_for(s).len(), 2);
        assert!(CommercialStep::TotalVa.accounts_for(s).is_empty());
    }
}
