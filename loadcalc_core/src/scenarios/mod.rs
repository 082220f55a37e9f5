//! # Scenario Catalog
//!
//! Fixed house and building archetypes that the guided calculators walk
//! through. Scenarios are built once, on first access, and never mutated.
//!
//! ## Example
//!
//! ```rust
//! use loadcalc_core::scenarios::{commercial_scenario, residential_scenarios};
//!
//! assert!(residential_scenarios().iter().any(|s| s.id == "small_home"));
//! let retail = commercial_scenario("retail_store").unwrap();
//! assert_eq!(retail.square_feet, 3_000.0);
//! ```

pub mod commercial;
pub mod residential;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

pub use commercial::{CommercialScenario, KitchenItem, NamedMotor, OutletCounts};
pub use residential::{Appliance, ApplianceCategory, ApplianceRating, ResidentialScenario};

/// Which calculator a scenario belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorKind {
    /// Dwelling unit, Part III standard method
    Residential,
    /// Non-dwelling, Part IV
    Commercial,
}

impl CalculatorKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            CalculatorKind::Residential => "Residential (Standard Method)",
            CalculatorKind::Commercial => "Commercial (Non-Dwelling)",
        }
    }
}

/// Identity shared by residential and commercial scenario records
pub trait ScenarioRecord {
    const KIND: CalculatorKind;

    fn id(&self) -> &str;

    fn name(&self) -> &str;
}

impl ScenarioRecord for ResidentialScenario {
    const KIND: CalculatorKind = CalculatorKind::Residential;

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl ScenarioRecord for CommercialScenario {
    const KIND: CalculatorKind = CalculatorKind::Commercial;

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// All residential scenarios in catalog order
pub fn residential_scenarios() -> &'static [ResidentialScenario] {
    &residential::CATALOG
}

/// All commercial scenarios in catalog order
pub fn commercial_scenarios() -> &'static [CommercialScenario] {
    &commercial::CATALOG
}

/// Look up a residential scenario by id.
pub fn residential_scenario(id: &str) -> CalcResult<&'static ResidentialScenario> {
    residential_scenarios()
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| CalcError::scenario_not_found(id))
}

/// Look up a commercial scenario by id.
pub fn commercial_scenario(id: &str) -> CalcResult<&'static CommercialScenario> {
    commercial_scenarios()
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| CalcError::scenario_not_found(id))
}

/// Find which calculator owns a scenario id.
pub fn kind_of(id: &str) -> Option<CalculatorKind> {
    if residential_scenario(id).is_ok() {
        Some(CalculatorKind::Residential)
    } else if commercial_scenario(id).is_ok() {
        Some(CalculatorKind::Commercial)
    } else {
        None
    }
}
