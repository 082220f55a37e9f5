//! The `loadcalc list` command.

use anyhow::Result;
use loadcalc_core::scenarios::{commercial_scenarios, residential_scenarios, CalculatorKind};

pub fn execute() -> Result<()> {
    println!("{}", CalculatorKind::Residential.display_name());
    for s in residential_scenarios() {
        println!(
            "  {:<16} {:<14} {:>6} sq ft  {} V  {} appliances",
            s.id,
            s.name,
            s.square_feet,
            s.voltage,
            s.appliances.len()
        );
    }

    println!();
    println!("{}", CalculatorKind::Commercial.display_name());
    for s in commercial_scenarios() {
        println!(
            "  {:<16} {:<14} {:>6} sq ft  {} V {}  {}",
            s.id, s.name, s.square_feet, s.voltage, s.phase, s.building_type
        );
    }

    Ok(())
}
