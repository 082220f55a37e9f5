//! Lighting unit loads and lighting demand schedules.
//!
//! Dwelling units use a flat 3 VA/sq ft with the 10,000 VA / 35% schedule.
//! Non-dwelling occupancies key both the unit load (Table 220.42(A)) and the
//! demand schedule (Table 220.45) off a [`BuildingType`].

use serde::{Deserialize, Serialize};

use super::DemandTier;

/// Dwelling general lighting unit load (VA per sq ft)
pub const DWELLING_VA_PER_SQFT: f64 = 3.0;

/// Dwelling general lighting demand: first 10,000 VA at 100%, remainder at 35%
pub const DWELLING_LIGHTING_DEMAND: [DemandTier; 2] =
    [DemandTier::up_to(10_000.0, 1.0), DemandTier::remainder(0.35)];

const FLAT_DEMAND: [DemandTier; 1] = [DemandTier::remainder(1.0)];
const WAREHOUSE_DEMAND: [DemandTier; 2] =
    [DemandTier::up_to(12_500.0, 1.0), DemandTier::remainder(0.5)];
const HOTEL_DEMAND: [DemandTier; 2] =
    [DemandTier::up_to(20_000.0, 0.5), DemandTier::remainder(0.4)];
const HOSPITAL_DEMAND: [DemandTier; 2] =
    [DemandTier::up_to(50_000.0, 0.4), DemandTier::remainder(0.2)];

/// Non-dwelling occupancy classification.
///
/// # Example
/// ```
/// use loadcalc_core::tables::BuildingType;
///
/// assert_eq!(BuildingType::Retail.va_per_sqft(), 1.9);
/// assert_eq!(BuildingType::Warehouse.lighting_demand().len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingType {
    Office,
    Retail,
    Restaurant,
    Warehouse,
    Hotel,
    Hospital,
    School,
    Bank,
}

impl BuildingType {
    /// All building types
    pub const ALL: [BuildingType; 8] = [
        BuildingType::Office,
        BuildingType::Retail,
        BuildingType::Restaurant,
        BuildingType::Warehouse,
        BuildingType::Hotel,
        BuildingType::Hospital,
        BuildingType::School,
        BuildingType::Bank,
    ];

    /// General lighting unit load in VA per sq ft (continuous-load factor included)
    pub fn va_per_sqft(&self) -> f64 {
        match self {
            BuildingType::Office => 1.3,
            BuildingType::Retail => 1.9,
            BuildingType::Restaurant => 1.5,
            BuildingType::Warehouse => 1.2,
            BuildingType::Hotel => 1.7,
            BuildingType::Hospital => 1.6,
            BuildingType::School => 1.5,
            BuildingType::Bank => 1.3,
        }
    }

    /// Lighting demand schedule. Occupancies without a schedule take 100%.
    pub fn lighting_demand(&self) -> &'static [DemandTier] {
        match self {
            BuildingType::Warehouse => &WAREHOUSE_DEMAND,
            BuildingType::Hotel => &HOTEL_DEMAND,
            BuildingType::Hospital => &HOSPITAL_DEMAND,
            _ => &FLAT_DEMAND,
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            BuildingType::Office => "Office",
            BuildingType::Retail => "Retail Store",
            BuildingType::Restaurant => "Restaurant",
            BuildingType::Warehouse => "Warehouse (Storage)",
            BuildingType::Hotel => "Hotel / Motel",
            BuildingType::Hospital => "Hospital",
            BuildingType::School => "School",
            BuildingType::Bank => "Bank",
        }
    }
}

impl std::fmt::Display for BuildingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::apply_tiered_demand;

    #[test]
    fn test_flat_schedule_is_identity() {
        assert_eq!(apply_tiered_demand(5_700.0, BuildingType::Retail.lighting_demand()), 5_700.0);
        assert_eq!(apply_tiered_demand(15_600.0, BuildingType::Office.lighting_demand()), 15_600.0);
    }

    #[test]
    fn test_warehouse_schedule() {
        // 12,500 + 11,500 * 0.5
        let demand = apply_tiered_demand(24_000.0, BuildingType::Warehouse.lighting_demand());
        assert_eq!(demand, 18_250.0);
    }

    #[test]
    fn test_hotel_schedule() {
        // 20,000 * 0.5 + 31,000 * 0.4
        assert_eq!(apply_tiered_demand(51_000.0, BuildingType::Hotel.lighting_demand()), 22_400.0);
    }

    #[test]
    fn test_schedules_end_open() {
        for bt in BuildingType::ALL {
            let tiers = bt.lighting_demand();
            assert!(tiers.last().map(|t| t.threshold.is_infinite()).unwrap_or(false));
        }
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&BuildingType::Retail).unwrap();
        assert_eq!(json, "\"retail\"");
    }
}
