//! Subcommand implementations.

pub mod list;
pub mod run;
pub mod solve;

use loadcalc_core::steps::StepUnit;
use loadcalc_core::tables::ConductorSize;

/// Render a step value in its unit; size codes show the conductor label
pub fn format_value(value: f64, unit: StepUnit) -> String {
    match unit {
        StepUnit::Va => format!("{:.0} VA", value),
        StepUnit::Amps => format!("{:.1} A", value),
        StepUnit::SizeCode => match ConductorSize::from_code(value) {
            Some(size) => format!("{} (code {})", size, value),
            None => format!("code {}", value),
        },
    }
}
