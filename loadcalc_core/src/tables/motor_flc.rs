//! Motor full-load current tables.
//!
//! - Table 430.248: single-phase AC motors, 115 V and 230 V columns
//! - Table 430.250: three-phase AC induction motors, 208 V and 230 V columns
//!
//! Horsepower is matched exactly. Fractional ratings are stored as decimals
//! (½ hp = 0.5, ¾ hp = 0.75, ⅓ hp ≈ 0.333).

/// Single-phase FLC rows: `(hp, amps @ 115 V, amps @ 230 V)`
pub static SINGLE_PHASE_FLC: [(f64, f64, f64); 12] = [
    (1.0 / 6.0, 4.4, 2.2),
    (0.25, 5.8, 2.9),
    (1.0 / 3.0, 7.2, 3.6),
    (0.5, 9.8, 4.9),
    (0.75, 13.8, 6.9),
    (1.0, 16.0, 8.0),
    (1.5, 20.0, 10.0),
    (2.0, 24.0, 12.0),
    (3.0, 34.0, 17.0),
    (5.0, 56.0, 28.0),
    (7.5, 80.0, 40.0),
    (10.0, 100.0, 50.0),
];

/// Three-phase FLC rows: `(hp, amps @ 208 V, amps @ 230 V)`
pub static THREE_PHASE_FLC: [(f64, f64, f64); 18] = [
    (0.5, 2.4, 2.2),
    (0.75, 3.5, 3.2),
    (1.0, 4.6, 4.2),
    (1.5, 6.6, 6.0),
    (2.0, 7.5, 6.8),
    (3.0, 10.6, 9.6),
    (5.0, 16.7, 15.2),
    (7.5, 24.2, 22.0),
    (10.0, 30.8, 28.0),
    (15.0, 46.2, 42.0),
    (20.0, 59.4, 54.0),
    (25.0, 74.8, 68.0),
    (30.0, 88.0, 80.0),
    (40.0, 114.0, 104.0),
    (50.0, 143.0, 130.0),
    (60.0, 169.0, 154.0),
    (75.0, 211.0, 192.0),
    (100.0, 273.0, 248.0),
];

/// Voltage column of a motor FLC table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlcColumn {
    /// 115 V (single-phase low column)
    V115,
    /// 208 V (three-phase low column)
    V208,
    /// 230 V (high column of either table)
    V230,
}

impl FlcColumn {
    /// Column heading as printed in the NEC
    pub fn label(&self) -> &'static str {
        match self {
            FlcColumn::V115 => "115V",
            FlcColumn::V208 => "208V",
            FlcColumn::V230 => "230V",
        }
    }
}

fn same_hp(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-3
}

/// Look up a row by exact horsepower.
pub fn find_row(table: &[(f64, f64, f64)], hp: f64) -> Option<(f64, f64, f64)> {
    table.iter().copied().find(|(row_hp, _, _)| same_hp(*row_hp, hp))
}
