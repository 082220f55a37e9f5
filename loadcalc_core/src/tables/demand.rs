//! Appliance, receptacle, kitchen and service-size demand rules.

use super::DemandTier;

/// Small-appliance branch circuits: two at 1,500 VA each
pub const SMALL_APPLIANCE_VA: f64 = 2.0 * 1_500.0;

/// Laundry branch circuit
pub const LAUNDRY_VA: f64 = 1_500.0;

/// Minimum dryer load per NEC 220.54
pub const DRYER_MIN_VA: f64 = 5_000.0;

/// Column C demand for a single range up to 12 kW
pub const RANGE_COLUMN_C_VA: f64 = 8_000.0;

/// Nameplate rating above which Column C is increased
pub const RANGE_COLUMN_C_LIMIT_W: f64 = 12_000.0;

/// Fixed-appliance demand factor applied at four or more appliances
pub const FIXED_APPLIANCE_FACTOR: f64 = 0.75;

/// Number of fixed appliances at which the demand factor applies
pub const FIXED_APPLIANCE_MIN_COUNT: usize = 4;

/// Non-dwelling receptacle demand: first 10 kVA at 100%, remainder at 50%
pub const RECEPTACLE_DEMAND: [DemandTier; 2] =
    [DemandTier::up_to(10_000.0, 1.0), DemandTier::remainder(0.5)];

/// Heavy-duty lampholder outlet load
pub const LAMPHOLDER_VA: f64 = 600.0;

/// General-purpose receptacle outlet load
pub const RECEPTACLE_VA: f64 = 180.0;

/// Multioutlet assembly load per foot
pub const MULTIOUTLET_VA_PER_FT: f64 = 180.0;

/// Show-window lighting load per linear foot
pub const SHOW_WINDOW_VA_PER_FT: f64 = 200.0;

/// Sign outlet load
pub const SIGN_OUTLET_VA: f64 = 1_200.0;

/// Largest-motor addition as a fraction of the largest motor
pub const LARGEST_MOTOR_FACTOR: f64 = 0.25;

/// Standard service ratings in amperes, ascending
pub const STANDARD_SERVICE_SIZES: [f64; 6] = [100.0, 125.0, 150.0, 200.0, 225.0, 400.0];

/// Dryer demand: nameplate or 5,000 VA, whichever is larger.
pub fn dryer_demand(nameplate_w: f64) -> f64 {
    nameplate_w.max(DRYER_MIN_VA)
}

/// Range demand per Table 220.55 Column C.
///
/// Up to 12 kW the demand is a flat 8,000 VA. Above that, Column C is
/// increased 5% for each kW (or major fraction, rounded up) over 12 kW.
///
/// # Example
/// ```
/// use loadcalc_core::tables::range_demand;
///
/// assert_eq!(range_demand(12_000.0), 8_000.0);
/// assert_eq!(range_demand(13_000.0), 8_400.0);
/// assert_eq!(range_demand(14_500.0), 9_200.0);
/// ```
pub fn range_demand(combined_w: f64) -> f64 {
    if combined_w <= RANGE_COLUMN_C_LIMIT_W {
        return RANGE_COLUMN_C_VA;
    }
    let kw_over = ((combined_w - RANGE_COLUMN_C_LIMIT_W) / 1_000.0).ceil();
    (RANGE_COLUMN_C_VA * (1.0 + kw_over * 0.05)).round()
}

/// Fixed-appliance demand: 75% of the total when there are four or more.
pub fn fixed_appliance_demand(total_va: f64, count: usize) -> f64 {
    if count >= FIXED_APPLIANCE_MIN_COUNT {
        (total_va * FIXED_APPLIANCE_FACTOR).round()
    } else {
        total_va
    }
}

/// Commercial kitchen demand factor keyed by equipment count (Table 220.56).
pub fn kitchen_demand_factor(count: usize) -> f64 {
    match count {
        0..=2 => 1.0,
        3 => 0.9,
        4 => 0.8,
        5 => 0.7,
        _ => 0.65,
    }
}

/// Snap a computed amperage up to the next standard service size.
///
/// Values past the largest size return the largest size.
pub fn snap_service_size(amps: f64) -> f64 {
    STANDARD_SERVICE_SIZES
        .iter()
        .copied()
        .find(|size| amps <= *size)
        .unwrap_or(STANDARD_SERVICE_SIZES[STANDARD_SERVICE_SIZES.len() - 1])
}
