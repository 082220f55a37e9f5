//! # Reference Tables
//!
//! Static NEC lookup data used by the calculation steps. Everything in this
//! module is immutable and pure: a lookup never fails for a valid key, and
//! threshold lookups past the end of a table extrapolate to the ceiling entry.
//!
//! ## Modules
//!
//! - [`lighting`] - Occupancy unit loads and lighting demand schedules
//! - [`demand`] - Receptacle, kitchen, appliance, dryer and range demand rules
//! - [`motor_flc`] - Motor full-load current tables (430.248 / 430.250)
//! - [`conductors`] - Conductor ampacity and grounding electrode conductor sizing
//!
//! ## Tiered Demand
//!
//! Demand schedules are applied cumulatively. Each tier consumes the part of
//! the remaining load that fits below its threshold, and the contribution of
//! each tier is rounded to whole VA before summing:
//!
//! ```rust
//! use loadcalc_core::tables::{apply_tiered_demand, DemandTier};
//!
//! let tiers = [DemandTier::up_to(10_000.0, 1.0), DemandTier::remainder(0.5)];
//! assert_eq!(apply_tiered_demand(17_280.0, &tiers), 13_640.0);
//! ```

pub mod conductors;
pub mod demand;
pub mod lighting;
pub mod motor_flc;

use serde::{Deserialize, Serialize};

pub use conductors::{ampacity_75c, conductor_for_amps, gec_for_conductor, ConductorSize};
pub use demand::{
    dryer_demand, fixed_appliance_demand, kitchen_demand_factor, range_demand, snap_service_size,
    RECEPTACLE_DEMAND, STANDARD_SERVICE_SIZES,
};
pub use lighting::{BuildingType, DWELLING_LIGHTING_DEMAND, DWELLING_VA_PER_SQFT};

// ============================================================================
// NEC Code Section References
// ============================================================================

/// NEC 2023 section references cited by the calculation steps.
pub mod nec_ref {
    /// Dwelling general lighting unit load
    pub const GENERAL_LIGHTING: &str = "NEC 220.41";
    /// Non-dwelling general lighting unit load
    pub const NON_DWELLING_LIGHTING: &str = "NEC Table 220.42(A)";
    /// Lighting demand factors
    pub const LIGHTING_DEMAND: &str = "NEC Table 220.45";
    /// Small-appliance branch circuits
    pub const SMALL_APPLIANCE: &str = "NEC 220.52(A)";
    /// Laundry branch circuit
    pub const LAUNDRY: &str = "NEC 220.52(B)";
    /// Appliance loads (water heaters and other 100% loads)
    pub const APPLIANCE_LOADS: &str = "NEC 220.51";
    /// Fixed appliances in dwellings
    pub const FIXED_APPLIANCES: &str = "NEC 220.53";
    /// Electric clothes dryers
    pub const DRYER: &str = "NEC 220.54";
    /// Electric cooking appliances
    pub const RANGE: &str = "NEC Table 220.55, Column C";
    /// Noncoincident loads (heating vs. cooling)
    pub const NONCOINCIDENT: &str = "NEC 220.60";
    /// Other loads (outlets not covered elsewhere)
    pub const OTHER_LOADS: &str = "NEC 220.14";
    /// Show window lighting
    pub const SHOW_WINDOW: &str = "NEC 220.14(G)";
    /// Sign outlet
    pub const SIGN_OUTLET: &str = "NEC 220.14(F)";
    /// Receptacle demand for non-dwelling occupancies
    pub const RECEPTACLE_DEMAND: &str = "NEC Table 220.47";
    /// Commercial kitchen equipment
    pub const KITCHEN: &str = "NEC Table 220.56";
    /// Largest motor 25% addition
    pub const LARGEST_MOTOR: &str = "NEC 220.50 / 430.24";
    /// Single-phase motor full-load current
    pub const MOTOR_FLC_1PH: &str = "NEC Table 430.248";
    /// Three-phase motor full-load current
    pub const MOTOR_FLC_3PH: &str = "NEC Table 430.250";
    /// Total calculated load
    pub const TOTAL_LOAD: &str = "NEC 220.40";
    /// Service rating
    pub const SERVICE_RATING: &str = "NEC 230.42 / 240.6(A)";
    /// Conductor ampacity
    pub const CONDUCTOR_AMPACITY: &str = "NEC Table 310.16";
    /// Grounding electrode conductor
    pub const GEC: &str = "NEC Table 250.66";
}

// ============================================================================
// Threshold Tables
// ============================================================================

/// Ascending threshold lookup table.
///
/// Rows are `(threshold, value)` pairs sorted by ascending threshold. A lookup
/// returns the value of the first row whose threshold is at least the key.
/// Keys beyond the last threshold return `ceiling`.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdTable<K: 'static, V: 'static> {
    rows: &'static [(K, V)],
    ceiling: V,
}

impl<K: PartialOrd + Copy, V: Copy> ThresholdTable<K, V> {
    /// Build a table from ascending rows and the value used past the end.
    pub const fn new(rows: &'static [(K, V)], ceiling: V) -> Self {
        Self { rows, ceiling }
    }

    /// Look up the value for `key`.
    pub fn lookup(&self, key: K) -> V {
        self.rows
            .iter()
            .find(|(threshold, _)| key <= *threshold)
            .map(|(_, value)| *value)
            .unwrap_or(self.ceiling)
    }

    /// The underlying rows, in ascending order.
    pub fn rows(&self) -> &'static [(K, V)] {
        self.rows
    }
}

// ============================================================================
// Tiered Demand Factors
// ============================================================================

/// One tier of a cumulative demand-factor schedule.
///
/// `threshold` is cumulative: a tier covers load from the previous tier's
/// threshold up to its own. The last tier of a schedule uses
/// `f64::INFINITY`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandTier {
    /// Cumulative VA ceiling of this tier
    pub threshold: f64,
    /// Demand factor applied to load inside this tier
    pub factor: f64,
}

impl DemandTier {
    /// A bounded tier ending at `threshold` VA.
    pub const fn up_to(threshold: f64, factor: f64) -> Self {
        Self { threshold, factor }
    }

    /// The open-ended final tier.
    pub const fn remainder(factor: f64) -> Self {
        Self {
            threshold: f64::INFINITY,
            factor,
        }
    }
}

/// Contribution of a single tier to a tiered demand calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierContribution {
    /// Connected VA allocated to this tier
    pub allocated_va: f64,
    /// Factor applied
    pub factor: f64,
    /// Demand VA, rounded to whole VA
    pub demand_va: f64,
}

/// Split `total_va` across `tiers` and compute each tier's rounded demand.
///
/// Every tier is reported, including ones that receive no load, so callers
/// can index the result by tier position.
pub fn tier_breakdown(total_va: f64, tiers: &[DemandTier]) -> Vec<TierContribution> {
    let mut remaining = total_va.max(0.0);
    let mut consumed = 0.0;

    tiers
        .iter()
        .map(|tier| {
            let capacity = (tier.threshold - consumed).max(0.0);
            let allocated = remaining.min(capacity);
            remaining -= allocated;
            consumed += allocated;
            TierContribution {
                allocated_va: allocated,
                factor: tier.factor,
                demand_va: (allocated * tier.factor).round(),
            }
        })
        .collect()
}

/// Apply a cumulative demand schedule, rounding per tier.
pub fn apply_tiered_demand(total_va: f64, tiers: &[DemandTier]) -> f64 {
    tier_breakdown(total_va, tiers)
        .iter()
        .map(|c| c.demand_va)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_TIER: [DemandTier; 2] =
        [DemandTier::up_to(10_000.0, 1.0), DemandTier::remainder(0.35)];

    #[test]
    fn test_threshold_lookup_and_ceiling() {
        static ROWS: [(f64, u32); 3] = [(10.0, 1), (20.0, 2), (30.0, 3)];
        let table = ThresholdTable::new(&ROWS, 99);
        assert_eq!(table.lookup(0.0), 1);
        assert_eq!(table.lookup(10.0), 1);
        assert_eq!(table.lookup(10.1), 2);
        assert_eq!(table.lookup(30.0), 3);
        assert_eq!(table.lookup(1000.0), 99);
    }

    #[test]
    fn test_tiered_demand_below_first_threshold() {
        assert_eq!(apply_tiered_demand(8_100.0, &TWO_TIER), 8_100.0);
        let parts = tier_breakdown(8_100.0, &TWO_TIER);
        assert_eq!(parts[1].allocated_va, 0.0);
    }

    #[test]
    fn test_tiered_demand_remainder() {
        // 10,000 + 5,000 * 0.35
        assert_eq!(apply_tiered_demand(15_000.0, &TWO_TIER), 11_750.0);
    }

    #[test]
    fn test_tier_rounding_is_per_tier() {
        let tiers = [DemandTier::up_to(1.0, 0.5), DemandTier::remainder(0.5)];
        // 0.5 rounds up in each tier: 1 + 1 = 2, where round(2 * 0.5) would be 1
        let parts = tier_breakdown(2.0, &tiers);
        assert_eq!(parts[0].demand_va, 1.0);
        assert_eq!(parts[1].demand_va, 1.0);
        assert_eq!(apply_tiered_demand(2.0, &tiers), 2.0);
    }

    #[test]
    fn test_tier_contributions_sum_and_capacity() {
        let tiers = [
            DemandTier::up_to(3_000.0, 1.0),
            DemandTier::up_to(120_000.0, 0.35),
            DemandTier::remainder(0.25),
        ];
        for total in [0.0, 2_500.0, 3_000.0, 50_000.0, 119_999.0, 250_000.0] {
            let parts = tier_breakdown(total, &tiers);
            let sum: f64 = parts.iter().map(|p| p.demand_va).sum();
            assert_eq!(sum, apply_tiered_demand(total, &tiers));

            let allocated: f64 = parts.iter().map(|p| p.allocated_va).sum();
            assert!((allocated - total).abs() < 1e-9);

            let mut previous = 0.0;
            for (part, tier) in parts.iter().zip(tiers.iter()) {
                assert!(part.allocated_va <= tier.threshold - previous);
                previous = tier.threshold;
            }
        }
    }

    #[test]
    fn test_negative_total_is_zero_demand() {
        assert_eq!(apply_tiered_demand(-50.0, &TWO_TIER), 0.0);
    }
}
