//! Residential Steps (NEC 220 Part III, Standard Method)
//!
//! ```text
//!  1 general lighting      sq ft × 3 VA
//!  2 small appliance       2 × 1,500 VA
//!  3 laundry               1,500 VA
//!  4 subtotal              1 + 2 + 3
//!  5 first tier            first 10,000 VA at 100%
//!  6 remainder tier        remainder at 35%
//!  7 net general load      5 + 6
//!  8 fixed appliances      Σ, 75% when 4 or more
//!  9 dryer                 max(nameplate, 5,000)
//! 10 range                 Table 220.55 Column C
//! 11 water heater          100%
//! 12 HVAC                  max(cooling, heating)
//! 13 other loads           100%
//! 14 total VA              7 + 8 + ... + 13
//! 15 service amps          total / V, snapped to a standard size
//! 16 service conductor     Table 310.16
//! 17 GEC                   Table 250.66
//! ```
//!
//! Motor appliances get a conversion step placed just before the step that
//! counts them. See [`crate::filter`] for how the active list is derived.

use serde::{Deserialize, Serialize};

use super::{CalculationStep, Hint, PriorAnswers, StepId, StepUnit, Validation};
use crate::motors::{describe_conversion, motor_to_va, Phase};
use crate::scenarios::{Appliance, ApplianceCategory, ResidentialScenario};
use crate::tables::demand::{LAUNDRY_VA, SMALL_APPLIANCE_VA};
use crate::tables::{
    ampacity_75c, conductor_for_amps, dryer_demand, fixed_appliance_demand, gec_for_conductor,
    nec_ref, range_demand, snap_service_size, tier_breakdown, ConductorSize,
    DWELLING_LIGHTING_DEMAND, DWELLING_VA_PER_SQFT,
};

type StepHint<'s> = Hint<'s, ResidentialScenario>;

/// One step of the dwelling standard-method calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ResidentialStep {
    GeneralLighting,
    SmallAppliance,
    Laundry,
    SubtotalBeforeDemand,
    FirstTierDemand,
    RemainderDemand,
    NetGeneralLighting,
    /// Horsepower to VA for one motor appliance
    MotorConversion {
        appliance_id: String,
        name: String,
        phase: Phase,
    },
    FixedAppliances,
    Dryer,
    Range,
    WaterHeater,
    Hvac,
    OtherLoads,
    TotalVa,
    ServiceAmps,
    ServiceConductor,
    Gec,
}

impl ResidentialStep {
    /// Every non-motor step in calculation order
    pub const SEQUENCE: [ResidentialStep; 17] = [
        ResidentialStep::GeneralLighting,
        ResidentialStep::SmallAppliance,
        ResidentialStep::Laundry,
        ResidentialStep::SubtotalBeforeDemand,
        ResidentialStep::FirstTierDemand,
        ResidentialStep::RemainderDemand,
        ResidentialStep::NetGeneralLighting,
        ResidentialStep::FixedAppliances,
        ResidentialStep::Dryer,
        ResidentialStep::Range,
        ResidentialStep::WaterHeater,
        ResidentialStep::Hvac,
        ResidentialStep::OtherLoads,
        ResidentialStep::TotalVa,
        ResidentialStep::ServiceAmps,
        ResidentialStep::ServiceConductor,
        ResidentialStep::Gec,
    ];

    /// Conversion step for a motor appliance
    pub fn motor_conversion(appliance: &Appliance) -> Self {
        let phase = appliance.motor_rating().map(|m| m.phase).unwrap_or(Phase::Single);
        ResidentialStep::MotorConversion {
            appliance_id: appliance.id.clone(),
            name: appliance.name.clone(),
            phase,
        }
    }

    /// Appliance categories this step counts, empty for framework steps
    pub fn categories(&self) -> &'static [ApplianceCategory] {
        match self {
            ResidentialStep::FixedAppliances => &[ApplianceCategory::FixedInPlace],
            ResidentialStep::Dryer => &[ApplianceCategory::Dryer],
            ResidentialStep::Range => &[ApplianceCategory::Cooking],
            ResidentialStep::WaterHeater => &[ApplianceCategory::WaterHeater],
            ResidentialStep::Hvac => {
                &[ApplianceCategory::AirConditioning, ApplianceCategory::Heating]
            }
            ResidentialStep::OtherLoads => &[ApplianceCategory::Other],
            _ => &[],
        }
    }

    /// Step that counts appliances of a category
    pub fn consumer_of(category: ApplianceCategory) -> ResidentialStep {
        match category {
            ApplianceCategory::FixedInPlace => ResidentialStep::FixedAppliances,
            ApplianceCategory::Dryer => ResidentialStep::Dryer,
            ApplianceCategory::Cooking => ResidentialStep::Range,
            ApplianceCategory::WaterHeater => ResidentialStep::WaterHeater,
            ApplianceCategory::AirConditioning | ApplianceCategory::Heating => {
                ResidentialStep::Hvac
            }
            ApplianceCategory::Other => ResidentialStep::OtherLoads,
        }
    }

    /// Whether the step only exists when the scenario has matching equipment.
    ///
    /// Fixed appliances is a framework step and is always present.
    pub fn is_equipment_specific(&self) -> bool {
        matches!(
            self,
            ResidentialStep::Dryer
                | ResidentialStep::Range
                | ResidentialStep::WaterHeater
                | ResidentialStep::Hvac
                | ResidentialStep::OtherLoads
        )
    }

    /// Whether the step belongs in the active list for a scenario
    pub fn applies_to(&self, scenario: &ResidentialScenario) -> bool {
        match self {
            ResidentialStep::MotorConversion { appliance_id, .. } => scenario
                .appliance(appliance_id)
                .map(|a| a.is_motor())
                .unwrap_or(false),
            step if step.is_equipment_specific() => {
                step.categories().iter().any(|c| scenario.has(*c))
            }
            _ => true,
        }
    }

    fn appliances<'s>(&self, scenario: &'s ResidentialScenario) -> Vec<&'s Appliance> {
        let categories = self.categories();
        scenario
            .appliances
            .iter()
            .filter(|a| categories.contains(&a.category))
            .collect()
    }
}

/// Load of an appliance as seen by the step counting it.
///
/// Motors read their conversion step's stored answer; everything else uses
/// nameplate watts.
fn appliance_va(appliance: &Appliance, answers: &PriorAnswers<'_>) -> f64 {
    if appliance.is_motor() {
        answers.get(&StepId::motor(&appliance.id))
    } else {
        appliance.connected_va()
    }
}

fn sum_va(appliances: &[&Appliance], answers: &PriorAnswers<'_>) -> f64 {
    appliances.iter().map(|a| appliance_va(a, answers)).sum()
}

fn itemize(appliances: &[&Appliance], answers: &PriorAnswers<'_>) -> String {
    appliances
        .iter()
        .map(|a| format!("{} {} VA", a.name, appliance_va(a, answers)))
        .collect::<Vec<_>>()
        .join(" + ")
}

fn step_id(key: &str) -> StepId {
    StepId::new(key)
}

impl CalculationStep for ResidentialStep {
    type Scenario = ResidentialScenario;

    fn id(&self) -> StepId {
        match self {
            ResidentialStep::GeneralLighting => step_id("general_lighting"),
            ResidentialStep::SmallAppliance => step_id("small_appliance"),
            ResidentialStep::Laundry => step_id("laundry"),
            ResidentialStep::SubtotalBeforeDemand => step_id("subtotal"),
            ResidentialStep::FirstTierDemand => step_id("first_tier"),
            ResidentialStep::RemainderDemand => step_id("remainder_tier"),
            ResidentialStep::NetGeneralLighting => step_id("net_general"),
            ResidentialStep::MotorConversion { appliance_id, .. } => StepId::motor(appliance_id),
            ResidentialStep::FixedAppliances => step_id("fixed_appliances"),
            ResidentialStep::Dryer => step_id("dryer"),
            ResidentialStep::Range => step_id("range"),
            ResidentialStep::WaterHeater => step_id("water_heater"),
            ResidentialStep::Hvac => step_id("hvac"),
            ResidentialStep::OtherLoads => step_id("other_loads"),
            ResidentialStep::TotalVa => step_id("total_va"),
            ResidentialStep::ServiceAmps => step_id("service_amps"),
            ResidentialStep::ServiceConductor => step_id("service_conductor"),
            ResidentialStep::Gec => step_id("gec"),
        }
    }

    fn title(&self) -> String {
        match self {
            ResidentialStep::GeneralLighting => "General Lighting Load".to_string(),
            ResidentialStep::SmallAppliance => "Small Appliance Circuits".to_string(),
            ResidentialStep::Laundry => "Laundry Circuit".to_string(),
            ResidentialStep::SubtotalBeforeDemand => "Subtotal Before Demand".to_string(),
            ResidentialStep::FirstTierDemand => "First 10,000 VA at 100%".to_string(),
            ResidentialStep::RemainderDemand => "Remainder at 35%".to_string(),
            ResidentialStep::NetGeneralLighting => "Net General Load".to_string(),
            ResidentialStep::MotorConversion { name, .. } => format!("Motor Conversion: {}", name),
            ResidentialStep::FixedAppliances => "Fixed Appliances".to_string(),
            ResidentialStep::Dryer => "Clothes Dryer".to_string(),
            ResidentialStep::Range => "Cooking Equipment".to_string(),
            ResidentialStep::WaterHeater => "Water Heater".to_string(),
            ResidentialStep::Hvac => "Heating / Air Conditioning".to_string(),
            ResidentialStep::OtherLoads => "Other Loads".to_string(),
            ResidentialStep::TotalVa => "Total Calculated Load".to_string(),
            ResidentialStep::ServiceAmps => "Service Size".to_string(),
            ResidentialStep::ServiceConductor => "Service Conductor".to_string(),
            ResidentialStep::Gec => "Grounding Electrode Conductor".to_string(),
        }
    }

    fn prompt(&self, scenario: &ResidentialScenario) -> String {
        match self {
            ResidentialStep::GeneralLighting => format!(
                "The {} is {} sq ft. What is the general lighting load in VA?",
                scenario.name, scenario.square_feet
            ),
            ResidentialStep::SmallAppliance => {
                "What load do the required small-appliance branch circuits add?".to_string()
            }
            ResidentialStep::Laundry => {
                "What load does the laundry branch circuit add?".to_string()
            }
            ResidentialStep::SubtotalBeforeDemand => {
                "Add lighting, small-appliance and laundry loads. What is the subtotal?".to_string()
            }
            ResidentialStep::FirstTierDemand => {
                "How much of the subtotal is taken at 100% in the first demand tier?".to_string()
            }
            ResidentialStep::RemainderDemand => {
                "What is the demand load for the portion above 10,000 VA?".to_string()
            }
            ResidentialStep::NetGeneralLighting => {
                "What is the net general load after demand factors?".to_string()
            }
            ResidentialStep::MotorConversion { name, .. } => {
                format!("Convert the {} to VA using the motor full-load current tables.", name)
            }
            ResidentialStep::FixedAppliances => {
                "What is the demand load for the fastened-in-place appliances?".to_string()
            }
            ResidentialStep::Dryer => "What load does the clothes dryer add?".to_string(),
            ResidentialStep::Range => {
                "What is the demand load for the cooking equipment?".to_string()
            }
            ResidentialStep::WaterHeater => "What load does the water heater add?".to_string(),
            ResidentialStep::Hvac => {
                "Heating and cooling are noncoincident. Which load is counted?".to_string()
            }
            ResidentialStep::OtherLoads => "What do the remaining loads add?".to_string(),
            ResidentialStep::TotalVa => "What is the total calculated load in VA?".to_string(),
            ResidentialStep::ServiceAmps => format!(
                "At {} V, what size service is required (in amperes)?",
                scenario.voltage
            ),
            ResidentialStep::ServiceConductor => {
                "What copper service conductor size is required? Enter the size code.".to_string()
            }
            ResidentialStep::Gec => {
                "What size grounding electrode conductor is required? Enter the size code."
                    .to_string()
            }
        }
    }

    fn citation(&self) -> &'static str {
        match self {
            ResidentialStep::GeneralLighting => nec_ref::GENERAL_LIGHTING,
            ResidentialStep::SmallAppliance => nec_ref::SMALL_APPLIANCE,
            ResidentialStep::Laundry => nec_ref::LAUNDRY,
            ResidentialStep::SubtotalBeforeDemand
            | ResidentialStep::FirstTierDemand
            | ResidentialStep::RemainderDemand
            | ResidentialStep::NetGeneralLighting => nec_ref::LIGHTING_DEMAND,
            ResidentialStep::MotorConversion { phase, .. } => phase.flc_table(),
            ResidentialStep::FixedAppliances => nec_ref::FIXED_APPLIANCES,
            ResidentialStep::Dryer => nec_ref::DRYER,
            ResidentialStep::Range => nec_ref::RANGE,
            ResidentialStep::WaterHeater | ResidentialStep::OtherLoads => nec_ref::APPLIANCE_LOADS,
            ResidentialStep::Hvac => nec_ref::NONCOINCIDENT,
            ResidentialStep::TotalVa => nec_ref::TOTAL_LOAD,
            ResidentialStep::ServiceAmps => nec_ref::SERVICE_RATING,
            ResidentialStep::ServiceConductor => nec_ref::CONDUCTOR_AMPACITY,
            ResidentialStep::Gec => nec_ref::GEC,
        }
    }

    fn formula(&self) -> Option<&'static str> {
        match self {
            ResidentialStep::GeneralLighting => Some("sq ft × 3 VA"),
            ResidentialStep::SmallAppliance => Some("2 × 1,500 VA"),
            ResidentialStep::SubtotalBeforeDemand => Some("lighting + small appliance + laundry"),
            ResidentialStep::RemainderDemand => Some("(subtotal − 10,000) × 0.35"),
            ResidentialStep::NetGeneralLighting => Some("first tier + remainder tier"),
            ResidentialStep::MotorConversion { phase, .. } => Some(phase.va_formula()),
            ResidentialStep::FixedAppliances => Some("Σ nameplate × (0.75 if 4 or more)"),
            ResidentialStep::Dryer => Some("max(nameplate, 5,000)"),
            ResidentialStep::Range => Some("8,000 × (1 + 0.05 × kW over 12)"),
            ResidentialStep::Hvac => Some("max(cooling, heating)"),
            ResidentialStep::ServiceAmps => Some("total VA ÷ V"),
            _ => None,
        }
    }

    fn unit(&self) -> StepUnit {
        match self {
            ResidentialStep::ServiceAmps => StepUnit::Amps,
            ResidentialStep::ServiceConductor | ResidentialStep::Gec => StepUnit::SizeCode,
            _ => StepUnit::Va,
        }
    }

    fn validation(&self) -> Validation {
        match self {
            ResidentialStep::SmallAppliance
            | ResidentialStep::Laundry
            | ResidentialStep::FirstTierDemand => Validation::Exact,
            ResidentialStep::FixedAppliances
            | ResidentialStep::Range
            | ResidentialStep::Hvac
            | ResidentialStep::OtherLoads => Validation::tolerance(50.0),
            ResidentialStep::TotalVa => Validation::tolerance(500.0),
            ResidentialStep::ServiceAmps => Validation::ServiceSize { slack: 25.0 },
            ResidentialStep::ServiceConductor => Validation::ConductorSize { slack_amps: 25.0 },
            ResidentialStep::Gec => Validation::GecSize,
            _ => Validation::tolerance(10.0),
        }
    }

    fn dependencies(&self, scenario: &ResidentialScenario) -> Vec<StepId> {
        match self {
            ResidentialStep::SubtotalBeforeDemand => vec![
                ResidentialStep::GeneralLighting.id(),
                ResidentialStep::SmallAppliance.id(),
                ResidentialStep::Laundry.id(),
            ],
            ResidentialStep::FirstTierDemand | ResidentialStep::RemainderDemand => {
                vec![ResidentialStep::SubtotalBeforeDemand.id()]
            }
            ResidentialStep::NetGeneralLighting => vec![
                ResidentialStep::FirstTierDemand.id(),
                ResidentialStep::RemainderDemand.id(),
            ],
            ResidentialStep::TotalVa => {
                let mut deps = vec![
                    ResidentialStep::NetGeneralLighting.id(),
                    ResidentialStep::FixedAppliances.id(),
                ];
                deps.extend(
                    [
                        ResidentialStep::Dryer,
                        ResidentialStep::Range,
                        ResidentialStep::WaterHeater,
                        ResidentialStep::Hvac,
                        ResidentialStep::OtherLoads,
                    ]
                    .iter()
                    .filter(|step| step.applies_to(scenario))
                    .map(|step| step.id()),
                );
                deps
            }
            ResidentialStep::ServiceAmps => vec![ResidentialStep::TotalVa.id()],
            ResidentialStep::ServiceConductor => vec![ResidentialStep::ServiceAmps.id()],
            ResidentialStep::Gec => vec![ResidentialStep::ServiceConductor.id()],
            step => step
                .appliances(scenario)
                .into_iter()
                .filter(|a| a.is_motor())
                .map(|a| StepId::motor(&a.id))
                .collect(),
        }
    }

    fn expected(&self, scenario: &ResidentialScenario, answers: &PriorAnswers<'_>) -> f64 {
        match self {
            ResidentialStep::GeneralLighting => scenario.square_feet * DWELLING_VA_PER_SQFT,
            ResidentialStep::SmallAppliance => SMALL_APPLIANCE_VA,
            ResidentialStep::Laundry => LAUNDRY_VA,
            ResidentialStep::SubtotalBeforeDemand => answers.sum(&self.dependencies(scenario)),
            ResidentialStep::FirstTierDemand => {
                let subtotal = answers.get(&ResidentialStep::SubtotalBeforeDemand.id());
                tier_breakdown(subtotal, &DWELLING_LIGHTING_DEMAND)[0].demand_va
            }
            ResidentialStep::RemainderDemand => {
                let subtotal = answers.get(&ResidentialStep::SubtotalBeforeDemand.id());
                tier_breakdown(subtotal, &DWELLING_LIGHTING_DEMAND)[1].demand_va
            }
            ResidentialStep::NetGeneralLighting => answers.sum(&self.dependencies(scenario)),
            ResidentialStep::MotorConversion { appliance_id, .. } => scenario
                .appliance(appliance_id)
                .and_then(|a| a.motor_rating())
                .map(motor_to_va)
                .unwrap_or(0.0),
            ResidentialStep::FixedAppliances => {
                let fixed = self.appliances(scenario);
                fixed_appliance_demand(sum_va(&fixed, answers), fixed.len())
            }
            ResidentialStep::Dryer => self
                .appliances(scenario)
                .iter()
                .map(|a| dryer_demand(appliance_va(a, answers)))
                .sum(),
            ResidentialStep::Range => range_demand(sum_va(&self.appliances(scenario), answers)),
            ResidentialStep::WaterHeater | ResidentialStep::OtherLoads => {
                sum_va(&self.appliances(scenario), answers)
            }
            ResidentialStep::Hvac => {
                let (cooling, heating) = hvac_split(scenario, answers);
                cooling.max(heating)
            }
            ResidentialStep::TotalVa => answers.sum(&self.dependencies(scenario)),
            ResidentialStep::ServiceAmps => {
                answers.get(&ResidentialStep::TotalVa.id()) / scenario.voltage
            }
            ResidentialStep::ServiceConductor => {
                conductor_for_amps(answers.get(&ResidentialStep::ServiceAmps.id())).code()
            }
            ResidentialStep::Gec => gec_for_conductor(stored_conductor(answers)).code(),
        }
    }

    fn stored_value(
        &self,
        scenario: &ResidentialScenario,
        answers: &PriorAnswers<'_>,
        user: f64,
    ) -> f64 {
        match self {
            ResidentialStep::ServiceAmps => snap_service_size(self.expected(scenario, answers)),
            ResidentialStep::ServiceConductor | ResidentialStep::Gec => {
                self.expected(scenario, answers)
            }
            _ => user,
        }
    }

    fn hint(&self) -> StepHint<'_> {
        match self {
            ResidentialStep::GeneralLighting => StepHint::derived(|s, _| {
                format!(
                    "Dwellings use 3 VA per sq ft: {} × 3 = {} VA",
                    s.square_feet,
                    s.square_feet * DWELLING_VA_PER_SQFT
                )
            }),
            ResidentialStep::SmallAppliance => {
                StepHint::Static(
                    "At least two 20 A small-appliance circuits at 1,500 VA each: \
                     2 × 1,500 = 3,000 VA",
                )
            }
            ResidentialStep::Laundry => StepHint::Static("One laundry circuit at 1,500 VA"),
            ResidentialStep::FirstTierDemand => StepHint::derived(|_, a| {
                let subtotal = a.get(&ResidentialStep::SubtotalBeforeDemand.id());
                format!(
                    "The first 10,000 VA (or the whole subtotal if smaller) is taken at 100%: \
                     min({}, 10,000) = {} VA",
                    subtotal,
                    subtotal.clamp(0.0, 10_000.0)
                )
            }),
            ResidentialStep::RemainderDemand => StepHint::derived(|_, a| {
                let subtotal = a.get(&ResidentialStep::SubtotalBeforeDemand.id());
                let over = (subtotal - 10_000.0).max(0.0);
                if over == 0.0 {
                    format!(
                        "The subtotal of {} VA does not exceed 10,000 VA, \
                         so nothing is left for this tier: 0 VA",
                        subtotal
                    )
                } else {
                    let demand = (over * 0.35).round();
                    format!("({} − 10,000) × 0.35 = {} × 0.35 = {} VA", subtotal, over, demand)
                }
            }),
            ResidentialStep::MotorConversion { appliance_id, .. } => StepHint::derived(move |s, _| {
                s.appliance(appliance_id)
                    .and_then(|a| a.motor_rating())
                    .map(describe_conversion)
                    .unwrap_or_else(|| "This appliance has no motor rating".to_string())
            }),
            ResidentialStep::FixedAppliances => StepHint::derived(move |s, a| {
                let fixed = self.appliances(s);
                if fixed.is_empty() {
                    return "There are no fastened-in-place appliances: 0 VA".to_string();
                }
                let total = sum_va(&fixed, a);
                if fixed.len() >= 4 {
                    format!(
                        "{} = {} VA. With {} appliances (4 or more) apply 75%: {} VA",
                        itemize(&fixed, a),
                        total,
                        fixed.len(),
                        fixed_appliance_demand(total, fixed.len())
                    )
                } else {
                    format!(
                        "{} = {} VA. Fewer than 4 appliances, so 100% applies",
                        itemize(&fixed, a),
                        total
                    )
                }
            }),
            ResidentialStep::Dryer => StepHint::derived(move |s, a| {
                self.appliances(s)
                    .iter()
                    .map(|d| {
                        let va = appliance_va(d, a);
                        format!("{}: max({}, 5,000) = {} VA", d.name, va, dryer_demand(va))
                    })
                    .collect::<Vec<_>>()
                    .join("; ")
            }),
            ResidentialStep::Range => StepHint::derived(move |s, a| {
                let cooking = self.appliances(s);
                let total = sum_va(&cooking, a);
                if total <= 12_000.0 {
                    format!(
                        "{} = {} W, not over 12 kW: Column C gives 8,000 VA",
                        itemize(&cooking, a),
                        total
                    )
                } else {
                    let kw_over = ((total - 12_000.0) / 1_000.0).ceil();
                    format!(
                        "{} = {} W, {} kW over 12 kW: 8,000 × (1 + {} × 0.05) = {} VA",
                        itemize(&cooking, a),
                        total,
                        kw_over,
                        kw_over,
                        range_demand(total)
                    )
                }
            }),
            ResidentialStep::WaterHeater | ResidentialStep::OtherLoads => {
                StepHint::derived(move |s, a| {
                    let items = self.appliances(s);
                    let total = sum_va(&items, a);
                    format!("Counted at 100% of nameplate: {} = {} VA", itemize(&items, a), total)
                })
            }
            ResidentialStep::Hvac => StepHint::derived(|s, a| {
                let (cooling, heating) = hvac_split(s, a);
                format!(
                    "Only the larger of the noncoincident loads counts: \
                     max(cooling {} VA, heating {} VA) = {} VA",
                    cooling,
                    heating,
                    cooling.max(heating)
                )
            }),
            ResidentialStep::ServiceAmps => StepHint::derived(|s, a| {
                let total = a.get(&ResidentialStep::TotalVa.id());
                let amps = total / s.voltage;
                format!(
                    "{} VA ÷ {} V = {:.1} A. The next standard service size is {} A",
                    total,
                    s.voltage,
                    amps,
                    snap_service_size(amps)
                )
            }),
            ResidentialStep::ServiceConductor => StepHint::derived(|_, a| {
                let amps = a.get(&ResidentialStep::ServiceAmps.id());
                let size = conductor_for_amps(amps);
                format!(
                    "Smallest 75 °C copper conductor rated at least {} A: {} ({} A). Size code {}",
                    amps,
                    size,
                    ampacity_75c(size),
                    size.code()
                )
            }),
            ResidentialStep::Gec => StepHint::derived(|_, a| {
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
            step => StepHint::derived(move |s, a| {
                let deps = step.dependencies(s);
                let parts: Vec<String> = deps.iter().map(|d| format!("{}", a.get(d))).collect();
                format!("{} = {} VA", parts.join(" + "), a.sum(&deps))
            }),
        }
    }

    fn accounts_for(&self, scenario: &ResidentialScenario) -> Vec<String> {
        self.appliances(scenario).iter().map(|a| a.id.clone()).collect()
    }
}

fn hvac_split(scenario: &ResidentialScenario, answers: &PriorAnswers<'_>) -> (f64, f64) {
    let total = |category| -> f64 {
        scenario
            .in_category(category)
            .map(|a| appliance_va(a, answers))
            .sum()
    };
    (total(ApplianceCategory::AirConditioning), total(ApplianceCategory::Heating))
}

/// Conductor size from the stored conductor answer; unknown codes fall back
/// to the smallest size so the lookup stays total.
fn stored_conductor(answers: &PriorAnswers<'_>) -> ConductorSize {
    ConductorSize::from_code(answers.get(&ResidentialStep::ServiceConductor.id()))
        .unwrap_or(ConductorSize::Awg8)
}
