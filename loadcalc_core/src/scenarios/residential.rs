//! Residential scenarios: single-family dwellings on a 120/240 V service.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::motors::{motor_to_va, Motor, Phase};
use crate::tables::nec_ref;

/// Load category of a dwelling appliance.
///
/// The category decides which step accounts for the appliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplianceCategory {
    /// Fastened-in-place appliance grouped under 220.53 (dishwasher, disposal, ...)
    FixedInPlace,
    /// Clothes dryer
    Dryer,
    /// Range, cooktop or wall oven
    Cooking,
    /// Storage water heater
    WaterHeater,
    /// Air conditioning / heat pump compressor
    AirConditioning,
    /// Fixed electric space heating
    Heating,
    /// Anything else counted at 100% (spa, EV charger, pool pump)
    Other,
}

impl ApplianceCategory {
    /// Default NEC citation for the category
    pub fn citation(&self) -> &'static str {
        match self {
            ApplianceCategory::FixedInPlace => nec_ref::FIXED_APPLIANCES,
            ApplianceCategory::Dryer => nec_ref::DRYER,
            ApplianceCategory::Cooking => nec_ref::RANGE,
            ApplianceCategory::WaterHeater => nec_ref::APPLIANCE_LOADS,
            ApplianceCategory::AirConditioning | ApplianceCategory::Heating => {
                nec_ref::NONCOINCIDENT
            }
            ApplianceCategory::Other => nec_ref::APPLIANCE_LOADS,
        }
    }
}

/// Nameplate rating of an appliance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApplianceRating {
    /// Resistive or nameplate-VA load
    Watts { watts: f64 },
    /// Motor load, converted through the FLC tables
    Motor(Motor),
}

/// A piece of equipment in a dwelling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appliance {
    /// Stable identifier, unique within the scenario
    pub id: String,
    /// Display name
    pub name: String,
    /// Nameplate rating
    pub rating: ApplianceRating,
    /// Load category
    pub category: ApplianceCategory,
    /// NEC citation shown in the equipment list
    pub citation: String,
}

impl Appliance {
    /// A nameplate-watts appliance.
    pub fn watts(id: &str, name: &str, category: ApplianceCategory, watts: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            rating: ApplianceRating::Watts { watts },
            category,
            citation: category.citation().to_string(),
        }
    }

    /// A motor appliance on a single-phase supply.
    pub fn motor(
        id: &str,
        name: &str,
        category: ApplianceCategory,
        horsepower: f64,
        voltage: f64,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            rating: ApplianceRating::Motor(Motor::new(horsepower, voltage, Phase::Single)),
            category,
            citation: category.citation().to_string(),
        }
    }

    /// Whether this is a motor that needs FLC conversion
    pub fn is_motor(&self) -> bool {
        matches!(self.rating, ApplianceRating::Motor(_))
    }

    /// Whether the appliance is grouped under 220.53
    pub fn is_fixed_in_place(&self) -> bool {
        self.category == ApplianceCategory::FixedInPlace
    }

    /// The motor rating, if this is a motor
    pub fn motor_rating(&self) -> Option<&Motor> {
        match &self.rating {
            ApplianceRating::Motor(m) => Some(m),
            ApplianceRating::Watts { .. } => None,
        }
    }

    /// Connected load in VA (motors converted through [`motor_to_va`])
    pub fn connected_va(&self) -> f64 {
        match &self.rating {
            ApplianceRating::Watts { watts } => *watts,
            ApplianceRating::Motor(m) => motor_to_va(m),
        }
    }
}

/// A dwelling-unit scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidentialScenario {
    pub id: String,
    pub name: String,
    /// Conditioned floor area
    pub square_feet: f64,
    /// Service voltage (line to line)
    pub voltage: f64,
    pub appliances: Vec<Appliance>,
}

impl ResidentialScenario {
    /// Appliances in a category, in catalog order
    pub fn in_category(&self, category: ApplianceCategory) -> impl Iterator<Item = &Appliance> {
        self.appliances.iter().filter(move |a| a.category == category)
    }

    /// Whether any appliance of the category is present
    pub fn has(&self, category: ApplianceCategory) -> bool {
        self.in_category(category).next().is_some()
    }

    /// Find an appliance by id
    pub fn appliance(&self, id: &str) -> Option<&Appliance> {
        self.appliances.iter().find(|a| a.id == id)
    }
}

pub(crate) static CATALOG: Lazy<Vec<ResidentialScenario>> = Lazy::new(|| {
    use ApplianceCategory::*;

    vec![
        ResidentialScenario {
            id: "small_home".to_string(),
            name: "Small Home".to_string(),
            square_feet: 1_200.0,
            voltage: 240.0,
            appliances: vec![
                Appliance::watts("dishwasher", "Dishwasher", FixedInPlace, 1_200.0),
                Appliance::watts("dryer", "Electric Dryer", Dryer, 5_000.0),
                Appliance::watts("range", "Electric Range", Cooking, 12_000.0),
                Appliance::watts("water_heater", "Water Heater", WaterHeater, 4_500.0),
                Appliance::watts("ac", "Air Conditioner", AirConditioning, 5_000.0),
                Appliance::watts("heat", "Electric Furnace", Heating, 10_000.0),
            ],
        },
        ResidentialScenario {
            id: "family_home".to_string(),
            name: "Family Home".to_string(),
            square_feet: 2_000.0,
            voltage: 240.0,
            appliances: vec![
                Appliance::watts("dishwasher", "Dishwasher", FixedInPlace, 1_200.0),
                Appliance::motor("disposal", "Garbage Disposal", FixedInPlace, 0.5, 120.0),
                Appliance::watts("microwave", "Built-in Microwave", FixedInPlace, 1_500.0),
                Appliance::watts("dryer", "Electric Dryer", Dryer, 5_500.0),
                Appliance::watts("range", "Electric Range", Cooking, 11_000.0),
                Appliance::watts("water_heater", "Water Heater", WaterHeater, 4_500.0),
                Appliance::motor("ac", "Heat Pump Compressor", AirConditioning, 5.0, 240.0),
                Appliance::watts("heat_strip", "Heat Strip", Heating, 5_000.0),
            ],
        },
        ResidentialScenario {
            id: "large_home".to_string(),
            name: "Large Home".to_string(),
            square_feet: 3_500.0,
            voltage: 240.0,
            appliances: vec![
                Appliance::watts("dishwasher", "Dishwasher", FixedInPlace, 1_200.0),
                Appliance::motor("disposal", "Garbage Disposal", FixedInPlace, 0.5, 120.0),
                Appliance::motor("compactor", "Trash Compactor", FixedInPlace, 1.0 / 3.0, 120.0),
                Appliance::watts("microwave", "Built-in Microwave", FixedInPlace, 1_500.0),
                Appliance::watts("dryer", "Electric Dryer", Dryer, 4_500.0),
                Appliance::watts("cooktop", "Cooktop", Cooking, 7_000.0),
                Appliance::watts("wall_oven", "Wall Oven", Cooking, 6_000.0),
                Appliance::watts("water_heater", "Water Heater", WaterHeater, 5_500.0),
                Appliance::motor("ac", "Air Conditioner", AirConditioning, 5.0, 240.0),
                Appliance::watts("heat", "Electric Furnace", Heating, 15_000.0),
                Appliance::watts("spa", "Spa", Other, 6_000.0),
                Appliance::watts("ev_charger", "EV Charger", Other, 9_600.0),
                Appliance::motor("pool_pump", "Pool Pump", Other, 1.5, 240.0),
            ],
        },
        ResidentialScenario {
            id: "cottage".to_string(),
            name: "Cottage".to_string(),
            square_feet: 900.0,
            voltage: 240.0,
            appliances: vec![
                Appliance::watts("water_heater", "Water Heater", WaterHeater, 4_000.0),
                Appliance::watts("baseboard", "Baseboard Heat", Heating, 6_000.0),
            ],
        },
    ]
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_appliance_ids_unique_per_scenario() {
        for scenario in CATALOG.iter() {
            let mut ids = HashSet::new();
            for a in &scenario.appliances {
                assert!(ids.insert(a.id.as_str()), "{} repeats {}", scenario.id, a.id);
            }
        }
    }

    #[test]
    fn test_catalog_motors_are_tabulated() {
        for scenario in CATALOG.iter() {
            for a in scenario.appliances.iter().filter(|a| a.is_motor()) {
                assert!(a.connected_va() > 0.0, "{}/{} has no FLC entry", scenario.id, a.id);
            }
        }
    }

    #[test]
    fn test_motor_connected_va() {
        let large = CATALOG.iter().find(|s| s.id == "large_home").unwrap();
        assert_eq!(large.appliance("disposal").unwrap().connected_va(), 1_176.0);
        assert_eq!(large.appliance("compactor").unwrap().connected_va(), 864.0);
        assert_eq!(large.appliance("pool_pump").unwrap().connected_va(), 2_400.0);
        assert_eq!(large.appliance("ac").unwrap().connected_va(), 6_720.0);
    }

    #[test]
    fn test_category_queries() {
        let cottage = CATALOG.iter().find(|s| s.id == "cottage").unwrap();
        assert!(!cottage.has(ApplianceCategory::Dryer));
        assert!(cottage.has(ApplianceCategory::Heating));
        assert_eq!(cottage.in_category(ApplianceCategory::FixedInPlace).count(), 0);
    }

    #[test]
    fn test_rating_serialization() {
        let a = Appliance::motor("pump", "Pump", ApplianceCategory::Other, 1.5, 240.0);
        let json = serde_json::to_string(&a).unwrap();
        assert!(json.contains("\"kind\":\"motor\""));
        let back: Appliance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
    }
}
