//! Commercial scenarios: non-dwelling occupancies calculated per Part IV.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::motors::{Motor, Phase};
use crate::tables::BuildingType;

/// Outlet inventory for the "other loads" calculation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OutletCounts {
    /// Heavy-duty lampholders
    pub lampholders: u32,
    /// General-purpose receptacle outlets
    pub receptacles: u32,
    /// Multioutlet assembly length in feet
    pub multioutlet_ft: f64,
    /// Show-window length in feet
    pub show_window_ft: f64,
    /// Whether an exterior sign outlet is required
    pub sign_outlet: bool,
}

/// A piece of commercial cooking equipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenItem {
    pub name: String,
    pub watts: f64,
}

impl KitchenItem {
    pub fn new(name: &str, watts: f64) -> Self {
        Self {
            name: name.to_string(),
            watts,
        }
    }
}

/// A motor rated in horsepower; voltage and phase come from the building supply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedMotor {
    pub name: String,
    pub horsepower: f64,
}

impl NamedMotor {
    pub fn new(name: &str, horsepower: f64) -> Self {
        Self {
            name: name.to_string(),
            horsepower,
        }
    }
}

/// A non-dwelling building scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommercialScenario {
    pub id: String,
    pub name: String,
    pub building_type: BuildingType,
    pub square_feet: f64,
    /// Service voltage (line to line)
    pub voltage: f64,
    pub phase: Phase,
    pub outlets: OutletCounts,
    pub kitchen: Vec<KitchenItem>,
    /// Air-conditioning compressor, if any
    pub hvac_motor: Option<NamedMotor>,
    /// Fixed electric heat
    pub heating_watts: f64,
    /// Motors other than the HVAC compressor
    pub other_motors: Vec<NamedMotor>,
}

impl CommercialScenario {
    /// Electrical rating of a motor on this building's supply
    pub fn motor(&self, motor: &NamedMotor) -> Motor {
        Motor::new(motor.horsepower, self.voltage, self.phase)
    }

    /// Every motor in the building: the HVAC compressor first, then the rest
    pub fn all_motors(&self) -> impl Iterator<Item = &NamedMotor> {
        self.hvac_motor.iter().chain(self.other_motors.iter())
    }

    /// Divisor that turns VA into line amperes: V or V × √3
    pub fn amps_divisor(&self) -> f64 {
        self.voltage * self.phase.power_multiplier()
    }
}

pub(crate) static CATALOG: Lazy<Vec<CommercialScenario>> = Lazy::new(|| {
    vec![
        CommercialScenario {
            id: "retail_store".to_string(),
            name: "Retail Store".to_string(),
            building_type: BuildingType::Retail,
            square_feet: 3_000.0,
            voltage: 240.0,
            phase: Phase::Single,
            outlets: OutletCounts {
                lampholders: 0,
                receptacles: 56,
                multioutlet_ft: 0.0,
                show_window_ft: 30.0,
                sign_outlet: true,
            },
            kitchen: vec![
                KitchenItem::new("Coffee Brewer", 1_800.0),
                KitchenItem::new("Hot Food Display Case", 1_460.0),
            ],
            hvac_motor: Some(NamedMotor::new("Rooftop AC Compressor", 5.0)),
            heating_watts: 5_000.0,
            other_motors: vec![],
        },
        CommercialScenario {
            id: "office_building".to_string(),
            name: "Office Building".to_string(),
            building_type: BuildingType::Office,
            square_feet: 12_000.0,
            voltage: 208.0,
            phase: Phase::Three,
            outlets: OutletCounts {
                lampholders: 4,
                receptacles: 120,
                multioutlet_ft: 40.0,
                show_window_ft: 0.0,
                sign_outlet: true,
            },
            kitchen: vec![],
            hvac_motor: Some(NamedMotor::new("Rooftop Unit Compressor", 10.0)),
            heating_watts: 9_000.0,
            other_motors: vec![
                NamedMotor::new("Elevator", 15.0),
                NamedMotor::new("Exhaust Fan", 1.0),
            ],
        },
        CommercialScenario {
            id: "restaurant".to_string(),
            name: "Restaurant".to_string(),
            building_type: BuildingType::Restaurant,
            square_feet: 4_000.0,
            voltage: 208.0,
            phase: Phase::Three,
            outlets: OutletCounts {
                lampholders: 0,
                receptacles: 40,
                multioutlet_ft: 0.0,
                show_window_ft: 0.0,
                sign_outlet: true,
            },
            kitchen: vec![
                KitchenItem::new("Range", 14_000.0),
                KitchenItem::new("Fryer", 9_000.0),
                KitchenItem::new("Griddle", 8_000.0),
                KitchenItem::new("Dishwasher Booster Heater", 9_000.0),
                KitchenItem::new("Convection Oven", 6_000.0),
                KitchenItem::new("Steam Table", 4_000.0),
            ],
            hvac_motor: Some(NamedMotor::new("Split System Compressor", 7.5)),
            heating_watts: 6_000.0,
            other_motors: vec![NamedMotor::new("Hood Exhaust Fan", 3.0)],
        },
        CommercialScenario {
            id: "warehouse".to_string(),
            name: "Warehouse".to_string(),
            building_type: BuildingType::Warehouse,
            square_feet: 20_000.0,
            voltage: 240.0,
            phase: Phase::Three,
            outlets: OutletCounts {
                lampholders: 0,
                receptacles: 30,
                multioutlet_ft: 0.0,
                show_window_ft: 0.0,
                sign_outlet: false,
            },
            kitchen: vec![],
            hvac_motor: None,
            heating_watts: 12_000.0,
            other_motors: vec![
                NamedMotor::new("Dock Door Operator", 2.0),
                NamedMotor::new("Conveyor", 5.0),
            ],
        },
        CommercialScenario {
            id: "hotel".to_string(),
            name: "Hotel".to_string(),
            building_type: BuildingType::Hotel,
            square_feet: 30_000.0,
            voltage: 208.0,
            phase: Phase::Three,
            outlets: OutletCounts {
                lampholders: 0,
                receptacles: 200,
                multioutlet_ft: 0.0,
                show_window_ft: 0.0,
                sign_outlet: true,
            },
            kitchen: vec![
                KitchenItem::new("Breakfast Griddle", 5_000.0),
                KitchenItem::new("Warming Oven", 4_000.0),
                KitchenItem::new("Waffle Station", 3_000.0),
            ],
            hvac_motor: Some(NamedMotor::new("Chiller Compressor", 20.0)),
            heating_watts: 18_000.0,
            other_motors: vec![NamedMotor::new("Elevator", 25.0)],
        },
    ]
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motors::motor_to_va;

    fn scenario(id: &str) -> &'static CommercialScenario {
        CATALOG.iter().find(|s| s.id == id).unwrap()
    }

    #[test]
    fn test_all_motors_tabulated() {
        for s in CATALOG.iter() {
            for m in s.all_motors() {
                assert!(motor_to_va(&s.motor(m)) > 0.0, "{}: {}", s.id, m.name);
            }
        }
    }

    #[test]
    fn test_all_motors_order() {
        let office = scenario("office_building");
        let names: Vec<_> = office.all_motors().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Rooftop Unit Compressor", "Elevator", "Exhaust Fan"]);
        assert_eq!(scenario("warehouse").all_motors().count(), 2);
    }

    #[test]
    fn test_amps_divisor() {
        assert_eq!(scenario("retail_store").amps_divisor(), 240.0);
        assert!((scenario("hotel").amps_divisor() - 360.267).abs() < 0.01);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let retail = scenario("retail_store");
        let json = serde_json::to_string(retail).unwrap();
        assert!(json.contains("\"building_type\":\"retail\""));
        assert!(json.contains("\"phase\":1"));
        let back: CommercialScenario = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, retail);
    }
}
