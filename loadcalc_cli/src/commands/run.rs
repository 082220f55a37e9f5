//! The `loadcalc run` and `loadcalc resume` commands.
//!
//! Input at the prompt: a number answers the step, `?` shows the hint,
//! `q` saves and exits. End of input also saves.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use loadcalc_core::coverage::{
    commercial_equipment, covered_items, residential_equipment, EquipmentLine,
};
use loadcalc_core::pipeline::{Pipeline, Submission};
use loadcalc_core::scenarios::ScenarioRecord;
use loadcalc_core::steps::CalculationStep;
use loadcalc_core::{load_snapshot, save_snapshot, ActiveCalculation, SessionSnapshot};
use tracing::info;

use super::format_value;
use crate::config::Config;

/// Start a fresh walkthrough
pub fn execute(scenario_id: &str, config: &Config) -> Result<()> {
    let calc = ActiveCalculation::open(scenario_id)?;
    let snapshot = SessionSnapshot::new(calc.kind(), scenario_id);
    walk(calc, snapshot, config)
}

/// Continue from a snapshot file
pub fn resume(path: &Path, config: &Config) -> Result<()> {
    let snapshot =
        load_snapshot(path).with_context(|| format!("resuming from {}", path.display()))?;
    let calc = snapshot.restore()?;
    println!("Resuming {} at step {}", snapshot.scenario_id, snapshot.step_index + 1);
    walk(calc, snapshot, config)
}

fn walk(calc: ActiveCalculation, snapshot: SessionSnapshot, config: &Config) -> Result<()> {
    match calc {
        ActiveCalculation::Residential(p) => {
            let equipment = residential_equipment(p.scenario());
            guide(&p, &equipment, snapshot, config)
        }
        ActiveCalculation::Commercial(p) => {
            let equipment = commercial_equipment(p.scenario());
            guide(&p, &equipment, snapshot, config)
        }
    }
}

enum Outcome {
    Next,
    Quit,
}

fn guide<S>(
    pipeline: &Pipeline<'_, S>,
    equipment: &[EquipmentLine],
    mut snapshot: SessionSnapshot,
    config: &Config,
) -> Result<()>
where
    S: CalculationStep,
    S::Scenario: ScenarioRecord,
{
    let scenario = pipeline.scenario();
    let mut answers = snapshot.answers.clone();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("═══════════════════════════════════════");
    println!("  {}", scenario.name());
    println!("═══════════════════════════════════════");

    for index in snapshot.step_index..pipeline.len() {
        print_equipment(equipment, pipeline, index);

        let step = pipeline.step(index)?;
        println!();
        println!("Step {}/{}: {}  [{}]", index + 1, pipeline.len(), step.title(), step.citation());
        if let Some(formula) = step.formula() {
            println!("  {}", formula);
        }
        println!("{}", step.prompt(scenario));

        match ask(pipeline, index, &mut answers, &mut lines, config)? {
            Outcome::Next => {
                snapshot.record(index + 1, &answers);
                save_snapshot(&snapshot, &config.snapshot_path)?;
            }
            Outcome::Quit => {
                snapshot.record(index, &answers);
                save_snapshot(&snapshot, &config.snapshot_path)?;
                println!("Progress saved to {}", config.snapshot_path.display());
                return Ok(());
            }
        }
    }

    info!(scenario = %scenario.id(), "walkthrough complete");
    println!();
    println!("═══════════════════════════════════════");
    println!("  Calculation complete");
    println!("═══════════════════════════════════════");
    for step in pipeline.steps() {
        if let Some(value) = answers.get(&step.id()) {
            println!("  {:<32} {}", step.title(), format_value(value, step.unit()));
        }
    }
    Ok(())
}

/// Prompt until the step is answered, revealed, or the user quits
fn ask<S, L>(
    pipeline: &Pipeline<'_, S>,
    index: usize,
    answers: &mut loadcalc_core::Answers,
    lines: &mut L,
    config: &Config,
) -> Result<Outcome>
where
    S: CalculationStep,
    S::Scenario: ScenarioRecord,
    L: Iterator<Item = io::Result<String>>,
{
    let step = pipeline.step(index)?;
    let mut attempts = 0;

    loop {
        print!("{} [{}] > ", step.unit().symbol(), step.validation().describe());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(Outcome::Quit);
        };
        let line = line?;

        match line.trim() {
            "q" | "quit" => return Ok(Outcome::Quit),
            "?" => {
                if config.show_hints {
                    println!("  Hint: {}", pipeline.hint_text(index, answers)?);
                } else {
                    println!("  Hints are disabled.");
                }
            }
            raw => match pipeline.submit(index, raw, answers)? {
                Submission::Accepted { stored } => {
                    println!(
                        "  ✓ Correct. Carrying forward {}",
                        format_value(stored, step.unit())
                    );
                    return Ok(Outcome::Next);
                }
                Submission::Rejected { reason } => {
                    attempts += 1;
                    println!("  ✗ {}", reason);
                    let limit = config.reveal_after_attempts;
                    if limit > 0 && attempts >= limit {
                        let expected = pipeline.expected(index, answers)?;
                        let stored = pipeline.stored_value(index, answers, expected)?;
                        println!("  The answer is {}", format_value(expected, step.unit()));
                        if config.show_hints {
                            println!("  {}", pipeline.hint_text(index, answers)?);
                        }
                        answers.insert(step.id(), stored);
                        return Ok(Outcome::Next);
                    }
                }
            },
        }
    }
}

fn print_equipment<S>(equipment: &[EquipmentLine], pipeline: &Pipeline<'_, S>, index: usize)
where
    S: CalculationStep,
    S::Scenario: ScenarioRecord,
{
    if equipment.is_empty() {
        return;
    }
    let covered = covered_items(pipeline.steps(), pipeline.scenario(), index);
    println!();
    println!("Equipment:");
    for line in equipment {
        let mark = if covered.contains(&line.key) { "x" } else { " " };
        match &line.detail {
            Some(detail) => println!(
                "  [{}] {:<28} {:>8.0} VA  ({})",
                mark, line.label, line.va, detail
            ),
            None => println!("  [{}] {:<28} {:>8.0} VA", mark, line.label, line.va),
        }
    }
}
