//! The `loadcalc solve` command.

use anyhow::Result;
use loadcalc_core::ActiveCalculation;

use super::format_value;

pub fn execute(scenario_id: &str, json: bool) -> Result<()> {
    let sheet = ActiveCalculation::open(scenario_id)?.solve();

    if json {
        println!("{}", serde_json::to_string_pretty(&sheet)?);
        return Ok(());
    }

    println!("═══════════════════════════════════════════════════════════════");
    println!("  {} ({})", sheet.scenario_name, sheet.kind.display_name());
    println!("═══════════════════════════════════════════════════════════════");
    for (i, row) in sheet.rows.iter().enumerate() {
        let mut value = format_value(row.stored, row.unit);
        if row.stored != row.expected {
            value = format!("{}  (computed {})", value, format_value(row.expected, row.unit));
        }
        println!("{:>3}. {:<32} {:<28} {}", i + 1, row.title, row.citation, value);
    }

    Ok(())
}
