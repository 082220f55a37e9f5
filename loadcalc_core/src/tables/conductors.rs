//! Service Conductor and GEC Sizing
//!
//! Copper conductor ampacity at 75 °C (Table 310.16) and grounding electrode
//! conductor sizing (Table 250.66).
//!
//! ## Numeric Encoding
//!
//! Steps answer with plain numbers, so sizes are encoded as:
//!
//! | Size        | Code |
//! |-------------|------|
//! | 8 ... 1 AWG | 8 ... 1 |
//! | 1/0 ... 4/0 | 10, 20, 30, 40 |
//! | 250 kcmil + | 250, 300, ... |
//!
//! 10 AWG and smaller are not service sizes and do not appear in these
//! tables, so the 1/0 = 10 encoding cannot collide.

use serde::{Deserialize, Serialize};

use super::ThresholdTable;

/// Copper conductor size, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConductorSize {
    Awg8,
    Awg6,
    Awg4,
    Awg3,
    Awg2,
    Awg1,
    Awg1_0,
    Awg2_0,
    Awg3_0,
    Awg4_0,
    Kcmil250,
    Kcmil300,
    Kcmil350,
    Kcmil400,
    Kcmil500,
    Kcmil600,
    Kcmil700,
    Kcmil750,
}

impl ConductorSize {
    /// All sizes in ascending order
    pub const ALL: [ConductorSize; 18] = [
        ConductorSize::Awg8,
        ConductorSize::Awg6,
        ConductorSize::Awg4,
        ConductorSize::Awg3,
        ConductorSize::Awg2,
        ConductorSize::Awg1,
        ConductorSize::Awg1_0,
        ConductorSize::Awg2_0,
        ConductorSize::Awg3_0,
        ConductorSize::Awg4_0,
        ConductorSize::Kcmil250,
        ConductorSize::Kcmil300,
        ConductorSize::Kcmil350,
        ConductorSize::Kcmil400,
        ConductorSize::Kcmil500,
        ConductorSize::Kcmil600,
        ConductorSize::Kcmil700,
        ConductorSize::Kcmil750,
    ];

    /// Sizes that Table 250.66 can return for a GEC
    pub const GEC_SIZES: [ConductorSize; 7] = [
        ConductorSize::Awg8,
        ConductorSize::Awg6,
        ConductorSize::Awg4,
        ConductorSize::Awg2,
        ConductorSize::Awg1_0,
        ConductorSize::Awg2_0,
        ConductorSize::Awg3_0,
    ];

    /// Numeric answer code (see module docs)
    pub fn code(&self) -> f64 {
        match self {
            ConductorSize::Awg8 => 8.0,
            ConductorSize::Awg6 => 6.0,
            ConductorSize::Awg4 => 4.0,
            ConductorSize::Awg3 => 3.0,
            ConductorSize::Awg2 => 2.0,
            ConductorSize::Awg1 => 1.0,
            ConductorSize::Awg1_0 => 10.0,
            ConductorSize::Awg2_0 => 20.0,
            ConductorSize::Awg3_0 => 30.0,
            ConductorSize::Awg4_0 => 40.0,
            ConductorSize::Kcmil250 => 250.0,
            ConductorSize::Kcmil300 => 300.0,
            ConductorSize::Kcmil350 => 350.0,
            ConductorSize::Kcmil400 => 400.0,
            ConductorSize::Kcmil500 => 500.0,
            ConductorSize::Kcmil600 => 600.0,
            ConductorSize::Kcmil700 => 700.0,
            ConductorSize::Kcmil750 => 750.0,
        }
    }

    /// Decode a numeric answer. Returns `None` for codes that are not a size.
    pub fn from_code(code: f64) -> Option<ConductorSize> {
        Self::ALL.iter().copied().find(|size| size.code() == code)
    }

    /// Trade designation (e.g., "3/0 AWG", "250 kcmil")
    pub fn label(&self) -> &'static str {
        match self {
            ConductorSize::Awg8 => "8 AWG",
            ConductorSize::Awg6 => "6 AWG",
            ConductorSize::Awg4 => "4 AWG",
            ConductorSize::Awg3 => "3 AWG",
            ConductorSize::Awg2 => "2 AWG",
            ConductorSize::Awg1 => "1 AWG",
            ConductorSize::Awg1_0 => "1/0 AWG",
            ConductorSize::Awg2_0 => "2/0 AWG",
            ConductorSize::Awg3_0 => "3/0 AWG",
            ConductorSize::Awg4_0 => "4/0 AWG",
            ConductorSize::Kcmil250 => "250 kcmil",
            ConductorSize::Kcmil300 => "300 kcmil",
            ConductorSize::Kcmil350 => "350 kcmil",
            ConductorSize::Kcmil400 => "400 kcmil",
            ConductorSize::Kcmil500 => "500 kcmil",
            ConductorSize::Kcmil600 => "600 kcmil",
            ConductorSize::Kcmil700 => "700 kcmil",
            ConductorSize::Kcmil750 => "750 kcmil",
        }
    }
}

impl std::fmt::Display for ConductorSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Table 310.16, copper, 75 °C column: `(ampacity, size)` ascending
static AMPACITY_ROWS: [(f64, ConductorSize); 18] = [
    (50.0, ConductorSize::Awg8),
    (65.0, ConductorSize::Awg6),
    (85.0, ConductorSize::Awg4),
    (100.0, ConductorSize::Awg3),
    (115.0, ConductorSize::Awg2),
    (130.0, ConductorSize::Awg1),
    (150.0, ConductorSize::Awg1_0),
    (175.0, ConductorSize::Awg2_0),
    (200.0, ConductorSize::Awg3_0),
    (230.0, ConductorSize::Awg4_0),
    (255.0, ConductorSize::Kcmil250),
    (285.0, ConductorSize::Kcmil300),
    (310.0, ConductorSize::Kcmil350),
    (335.0, ConductorSize::Kcmil400),
    (380.0, ConductorSize::Kcmil500),
    (420.0, ConductorSize::Kcmil600),
    (460.0, ConductorSize::Kcmil700),
    (475.0, ConductorSize::Kcmil750),
];

/// Table 250.66, copper: `(largest service conductor, GEC size)` ascending
static GEC_ROWS: [(ConductorSize, ConductorSize); 6] = [
    (ConductorSize::Awg2, ConductorSize::Awg8),
    (ConductorSize::Awg1_0, ConductorSize::Awg6),
    (ConductorSize::Awg3_0, ConductorSize::Awg4),
    (ConductorSize::Kcmil350, ConductorSize::Awg2),
    (ConductorSize::Kcmil600, ConductorSize::Awg1_0),
    (ConductorSize::Kcmil750, ConductorSize::Awg2_0),
];

/// Conductor ampacity lookup
pub static AMPACITY_TABLE: ThresholdTable<f64, ConductorSize> =
    ThresholdTable::new(&AMPACITY_ROWS, ConductorSize::Kcmil750);

/// GEC sizing lookup
pub static GEC_TABLE: ThresholdTable<ConductorSize, ConductorSize> =
    ThresholdTable::new(&GEC_ROWS, ConductorSize::Awg3_0);

/// Smallest copper conductor whose 75 °C ampacity is at least `amps`.
///
/// # Example
/// ```
/// use loadcalc_core::tables::{conductor_for_amps, ConductorSize};
///
/// assert_eq!(conductor_for_amps(200.0), ConductorSize::Awg3_0);
/// assert_eq!(conductor_for_amps(129.2), ConductorSize::Awg1);
/// ```
pub fn conductor_for_amps(amps: f64) -> ConductorSize {
    AMPACITY_TABLE.lookup(amps)
}

/// Required GEC for a service conductor.
pub fn gec_for_conductor(conductor: ConductorSize) -> ConductorSize {
    GEC_TABLE.lookup(conductor)
}

/// 75 °C copper ampacity of a size.
pub fn ampacity_75c(size: ConductorSize) -> f64 {
    AMPACITY_ROWS
        .iter()
        .find(|(_, s)| *s == size)
        .map(|(amps, _)| *amps)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for size in ConductorSize::ALL {
            assert_eq!(ConductorSize::from_code(size.code()), Some(size));
        }
        assert_eq!(ConductorSize::from_code(5.0), None);
        assert_eq!(ConductorSize::from_code(30.0), Some(ConductorSize::Awg3_0));
    }

    #[test]
    fn test_ampacity_lookup() {
        assert_eq!(conductor_for_amps(100.0), ConductorSize::Awg3);
        assert_eq!(conductor_for_amps(100.1), ConductorSize::Awg2);
        assert_eq!(conductor_for_amps(400.0), ConductorSize::Kcmil600);
        assert_eq!(conductor_for_amps(900.0), ConductorSize::Kcmil750);
    }

    #[test]
    fn test_gec_lookup() {
        assert_eq!(gec_for_conductor(ConductorSize::Awg3), ConductorSize::Awg8);
        assert_eq!(gec_for_conductor(ConductorSize::Awg1), ConductorSize::Awg6);
        assert_eq!(gec_for_conductor(ConductorSize::Awg3_0), ConductorSize::Awg4);
        assert_eq!(gec_for_conductor(ConductorSize::Kcmil600), ConductorSize::Awg1_0);
        assert_eq!(gec_for_conductor(ConductorSize::Kcmil750), ConductorSize::Awg2_0);
    }

    #[test]
    fn test_every_gec_result_is_a_gec_size() {
        for size in ConductorSize::ALL {
            assert!(ConductorSize::GEC_SIZES.contains(&gec_for_conductor(size)));
        }
    }

    #[test]
    fn test_ampacity_of_size() {
        assert_eq!(ampacity_75c(ConductorSize::Awg3_0), 200.0);
        assert_eq!(ampacity_75c(ConductorSize::Awg1), 130.0);
    }
}
