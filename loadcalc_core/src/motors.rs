//! # Motor Conversion
//!
//! Converts a motor's nameplate horsepower to full-load current (from the NEC
//! tables, never from nameplate amps) and then to apparent power.
//!
//! Every step that counts a motor's load goes through [`motor_to_va`], so the
//! HVAC step, the largest-motor step, and the equipment list always agree.
//!
//! ## Example
//!
//! ```rust
//! use loadcalc_core::motors::{motor_full_load_current, motor_to_va, Motor, Phase};
//!
//! // 5 hp, single-phase, 240 V: 230 V column -> 28 A -> 28 x 240 VA
//! assert_eq!(motor_full_load_current(5.0, 240.0, Phase::Single), 28.0);
//! assert_eq!(motor_to_va(&Motor::new(5.0, 240.0, Phase::Single)), 6_720.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::tables::motor_flc::{find_row, FlcColumn, SINGLE_PHASE_FLC, THREE_PHASE_FLC};
use crate::tables::nec_ref;

/// Supply phase count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Phase {
    Single,
    Three,
}

impl Phase {
    /// Number of phases (1 or 3)
    pub fn count(&self) -> u8 {
        match self {
            Phase::Single => 1,
            Phase::Three => 3,
        }
    }

    /// Line-to-line multiplier for apparent power: 1 or √3
    pub fn power_multiplier(&self) -> f64 {
        match self {
            Phase::Single => 1.0,
            Phase::Three => 3f64.sqrt(),
        }
    }

    /// Full-load-current table for this phase count
    pub fn flc_table(&self) -> &'static str {
        match self {
            Phase::Single => nec_ref::MOTOR_FLC_1PH,
            Phase::Three => nec_ref::MOTOR_FLC_3PH,
        }
    }

    /// FLC-to-VA formula in symbols
    pub fn va_formula(&self) -> &'static str {
        match self {
            Phase::Single => "FLC × V",
            Phase::Three => "FLC × V × √3",
        }
    }
}

impl TryFrom<u8> for Phase {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Phase::Single),
            3 => Ok(Phase::Three),
            other => Err(format!("phase must be 1 or 3, got {}", other)),
        }
    }
}

impl From<Phase> for u8 {
    fn from(phase: Phase) -> u8 {
        phase.count()
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Single => write!(f, "single-phase"),
            Phase::Three => write!(f, "three-phase"),
        }
    }
}

/// Electrical rating of a motor load
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motor {
    /// Nameplate horsepower (must be a tabulated value)
    pub horsepower: f64,
    /// Supply voltage
    pub voltage: f64,
    /// Supply phase
    pub phase: Phase,
}

impl Motor {
    pub fn new(horsepower: f64, voltage: f64, phase: Phase) -> Self {
        Self {
            horsepower,
            voltage,
            phase,
        }
    }

    /// Full-load current from the NEC tables
    pub fn full_load_current(&self) -> f64 {
        motor_full_load_current(self.horsepower, self.voltage, self.phase)
    }

    /// Apparent power in VA
    pub fn va(&self) -> f64 {
        motor_to_va(self)
    }
}

/// Table column used for a supply voltage and phase.
///
/// Three-phase selects 208 V at or below 208 V, else 230 V. Single-phase
/// selects 115 V at or below 120 V, else 230 V.
pub fn flc_column(voltage: f64, phase: Phase) -> FlcColumn {
    match phase {
        Phase::Three if voltage <= 208.0 => FlcColumn::V208,
        Phase::Single if voltage <= 120.0 => FlcColumn::V115,
        _ => FlcColumn::V230,
    }
}

/// Full-load current for a motor, in amperes.
///
/// Returns 0 when the horsepower is not tabulated.
pub fn motor_full_load_current(horsepower: f64, voltage: f64, phase: Phase) -> f64 {
    let (table, table_name): (&[(f64, f64, f64)], &str) = match phase {
        Phase::Single => (&SINGLE_PHASE_FLC, "430.248"),
        Phase::Three => (&THREE_PHASE_FLC, "430.250"),
    };

    let Some((_, low, high)) = find_row(table, horsepower) else {
        warn!(horsepower, table = table_name, "horsepower not tabulated, FLC taken as 0");
        return 0.0;
    };

    match flc_column(voltage, phase) {
        FlcColumn::V115 | FlcColumn::V208 => low,
        FlcColumn::V230 => high,
    }
}

/// Apparent power of a motor in VA, rounded to whole VA.
///
/// Three-phase: `FLC × V × √3`. Single-phase: `FLC × V`.
pub fn motor_to_va(motor: &Motor) -> f64 {
    (motor.full_load_current() * motor.voltage * motor.phase.power_multiplier()).round()
}

/// Human-readable derivation of a motor's VA, shared by step hints.
pub fn describe_conversion(motor: &Motor) -> String {
    let column = flc_column(motor.voltage, motor.phase);
    let flc = motor.full_load_current();
    let formula = match motor.phase {
        Phase::Single => format!("{} A × {} V", flc, motor.voltage),
        Phase::Three => format!("{} A × {} V × √3", flc, motor.voltage),
    };
    format!(
        "{} hp {} motor: {} ({} column) gives FLC = {} A. VA = {} = {} VA",
        format_hp(motor.horsepower),
        motor.phase,
        motor.phase.flc_table(),
        column.label(),
        flc,
        formula,
        motor_to_va(motor)
    )
}

fn format_hp(hp: f64) -> String {
    const FRACTIONS: [(f64, &str); 6] = [
        (1.0 / 6.0, "1/6"),
        (0.25, "1/4"),
        (1.0 / 3.0, "1/3"),
        (0.5, "1/2"),
        (0.75, "3/4"),
        (1.5, "1-1/2"),
    ];
    FRACTIONS
        .iter()
        .find(|(value, _)| (value - hp).abs() < 1e-3)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| format!("{}", hp))
}
