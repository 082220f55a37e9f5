//! # Pipeline Evaluator
//!
//! Drives an ordered step list for one scenario. The caller owns the
//! [`Answers`] map and threads it forward; the pipeline only computes.
//!
//! Validation and storage are separate operations. A step is judged against
//! its raw expected value, and what gets stored may be a snapped catalog
//! value (service size, conductor code) so later steps compute from clean
//! inputs.
//!
//! ## Example
//!
//! ```rust
//! use loadcalc_core::pipeline::{Pipeline, Submission};
//! use loadcalc_core::scenarios::residential_scenario;
//! use loadcalc_core::steps::Answers;
//!
//! let home = residential_scenario("small_home").unwrap();
//! let pipeline = Pipeline::residential(home);
//! let mut answers = Answers::new();
//!
//! let first = pipeline.submit(0, "3600", &mut answers).unwrap();
//! assert_eq!(first, Submission::Accepted { stored: 3600.0 });
//!
//! let sheet = pipeline.solve();
//! assert_eq!(sheet.stored("total_va"), Some(36_800.0));
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::filter::{commercial_steps, residential_steps};
use crate::scenarios::{CalculatorKind, CommercialScenario, ResidentialScenario, ScenarioRecord};
use crate::steps::{
    Answers, CalculationStep, CommercialStep, PriorAnswers, ResidentialStep, StepId, StepUnit,
};

// ============================================================================
// Submission
// ============================================================================

/// Why an answer was not accepted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Rejection {
    /// Input did not parse as a finite number
    NotNumeric(String),
    /// Numeric, but outside the step's acceptance rule
    OutsideTolerance(String),
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::NotNumeric(input) => write!(f, "'{}' is not a number", input),
            Rejection::OutsideTolerance(rule) => {
                write!(f, "not within the accepted range ({})", rule)
            }
        }
    }
}

/// Outcome of submitting an answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Submission {
    Accepted { stored: f64 },
    Rejected { reason: Rejection },
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Submission::Accepted { .. })
    }
}

// ============================================================================
// Worksheet
// ============================================================================

/// One solved step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorksheetRow {
    pub id: StepId,
    pub title: String,
    pub citation: String,
    /// Raw expected value the step validates against
    pub expected: f64,
    /// Canonical value stored for later steps
    pub stored: f64,
    pub unit: StepUnit,
}

/// Answer key for a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worksheet {
    pub kind: CalculatorKind,
    pub scenario_id: String,
    pub scenario_name: String,
    pub rows: Vec<WorksheetRow>,
}

impl Worksheet {
    pub fn row(&self, id: &str) -> Option<&WorksheetRow> {
        self.rows.iter().find(|r| r.id.as_str() == id)
    }

    /// Stored value for a step id
    pub fn stored(&self, id: &str) -> Option<f64> {
        self.row(id).map(|r| r.stored)
    }

    /// The stored values as an answer map
    pub fn answers(&self) -> Answers {
        self.rows.iter().map(|r| (r.id.clone(), r.stored)).collect()
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Step list bound to a scenario
pub struct Pipeline<'a, S: CalculationStep> {
    steps: Vec<S>,
    scenario: &'a S::Scenario,
}

impl<'a> Pipeline<'a, ResidentialStep> {
    /// Pipeline over the filtered residential steps
    pub fn residential(scenario: &'a ResidentialScenario) -> Self {
        Pipeline::new(residential_steps(scenario), scenario)
    }
}

impl<'a> Pipeline<'a, CommercialStep> {
    /// Pipeline over the ten commercial steps
    pub fn commercial(scenario: &'a CommercialScenario) -> Self {
        Pipeline::new(commercial_steps(), scenario)
    }
}

impl<'a, S> Pipeline<'a, S>
where
    S: CalculationStep,
    S::Scenario: ScenarioRecord,
{
    pub fn new(steps: Vec<S>, scenario: &'a S::Scenario) -> Self {
        Self { steps, scenario }
    }

    pub fn steps(&self) -> &[S] {
        &self.steps
    }

    pub fn scenario(&self) -> &'a S::Scenario {
        self.scenario
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, index: usize) -> CalcResult<&S> {
        self.steps
            .get(index)
            .ok_or_else(|| CalcError::step_out_of_range(index, self.steps.len()))
    }

    /// Declared dependencies of a step that appear earlier in the list
    fn visible_dependencies(&self, index: usize) -> Vec<StepId> {
        let earlier: Vec<StepId> = self.steps[..index].iter().map(|s| s.id()).collect();
        self.steps[index]
            .dependencies(self.scenario)
            .into_iter()
            .filter(|dep| earlier.contains(dep))
            .collect()
    }

    /// Expected answer for the step at `index`
    pub fn expected(&self, index: usize, answers: &Answers) -> CalcResult<f64> {
        let step = self.step(index)?;
        let visible = self.visible_dependencies(index);
        let value = step.expected(self.scenario, &PriorAnswers::restricted(answers, &visible));
        debug!(step = %step.id(), expected = value, "evaluated step");
        Ok(value)
    }

    /// Judge a user value against an expected value.
    ///
    /// Non-finite input is rejected before the step's rule is consulted.
    pub fn is_acceptable(&self, index: usize, user: f64, expected: f64) -> CalcResult<bool> {
        let step = self.step(index)?;
        if !user.is_finite() {
            return Ok(false);
        }
        Ok(step.validation().accepts(user, expected))
    }

    /// Value to store for an accepted answer
    pub fn stored_value(&self, index: usize, answers: &Answers, user: f64) -> CalcResult<f64> {
        let step = self.step(index)?;
        let visible = self.visible_dependencies(index);
        Ok(step.stored_value(self.scenario, &PriorAnswers::restricted(answers, &visible), user))
    }

    /// Rendered hint for the step at `index`
    pub fn hint_text(&self, index: usize, answers: &Answers) -> CalcResult<String> {
        let step = self.step(index)?;
        let visible = self.visible_dependencies(index);
        Ok(step.hint().render(self.scenario, &PriorAnswers::restricted(answers, &visible)))
    }

    /// Parse raw user input; thousands separators and surrounding space are ignored
    pub fn parse_answer(raw: &str) -> Option<f64> {
        let cleaned: String = raw.trim().chars().filter(|c| *c != ',' && *c != '_').collect();
        cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Parse, validate and, when accepted, store an answer.
    pub fn submit(&self, index: usize, raw: &str, answers: &mut Answers) -> CalcResult<Submission> {
        let step = self.step(index)?;
        let Some(user) = Self::parse_answer(raw) else {
            return Ok(Submission::Rejected {
                reason: Rejection::NotNumeric(raw.trim().to_string()),
            });
        };

        let expected = self.expected(index, answers)?;
        if !self.is_acceptable(index, user, expected)? {
            debug!(step = %step.id(), user, expected, "answer rejected");
            return Ok(Submission::Rejected {
                reason: Rejection::OutsideTolerance(step.validation().describe()),
            });
        }

        let stored = self.stored_value(index, answers, user)?;
        answers.insert(step.id(), stored);
        Ok(Submission::Accepted { stored })
    }

    /// Solve every step from an empty answer map, storing canonical values.
    pub fn solve(&self) -> Worksheet {
        let mut answers = Answers::new();
        let mut rows = Vec::with_capacity(self.steps.len());

        for (index, step) in self.steps.iter().enumerate() {
            let visible = self.visible_dependencies(index);
            let view = PriorAnswers::restricted(&answers, &visible);
            let expected = step.expected(self.scenario, &view);
            let stored = step.stored_value(self.scenario, &view, expected);
            debug!(step = %step.id(), expected, stored, "solved step");

            rows.push(WorksheetRow {
                id: step.id(),
                title: step.title(),
                citation: step.citation().to_string(),
                expected,
                stored,
                unit: step.unit(),
            });
            answers.insert(step.id(), stored);
        }

        Worksheet {
            kind: <S::Scenario as ScenarioRecord>::KIND,
            scenario_id: self.scenario.id().to_string(),
            scenario_name: self.scenario.name().to_string(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::{commercial_scenario, residential_scenario};

    #[test]
    fn test_parse_answer() {
        type P<'a> = Pipeline<'a, ResidentialStep>;
        assert_eq!(P::parse_answer(" 36,800 "), Some(36_800.0));
        assert_eq!(P::parse_answer("153.3"), Some(153.3));
        assert_eq!(P::parse_answer("abc"), None);
        assert_eq!(P::parse_answer("NaN"), None);
        assert_eq!(P::parse_answer("inf"), None);
        assert_eq!(P::parse_answer(""), None);
    }

    #[test]
    fn test_non_finite_rejected_before_rule() {
        let home = residential_scenario("small_home").unwrap();
        let pipeline = Pipeline::residential(home);
        assert!(!pipeline.is_acceptable(0, f64::NAN, 3_600.0).unwrap());
        assert!(!pipeline.is_acceptable(0, f64::INFINITY, 3_600.0).unwrap());
        assert!(pipeline.is_acceptable(0, 3_605.0, 3_600.0).unwrap());
    }

    #[test]
    fn test_submit_flow() {
        let home = residential_scenario("small_home").unwrap();
        let pipeline = Pipeline::residential(home);
        let mut answers = Answers::new();

        let bad = pipeline.submit(0, "lots", &mut answers).unwrap();
        assert_eq!(bad, Submission::Rejected { reason: Rejection::NotNumeric("lots".to_string()) });

        let far = pipeline.submit(0, "4000", &mut answers).unwrap();
        assert!(!far.is_accepted());
        assert!(answers.is_empty());

        let ok = pipeline.submit(0, "3,600", &mut answers).unwrap();
        assert_eq!(ok, Submission::Accepted { stored: 3_600.0 });
        assert_eq!(answers.get(&StepId::new("general_lighting")), Some(3_600.0));
    }

    #[test]
    fn test_service_amps_stores_snapped_size() {
        let home = residential_scenario("small_home").unwrap();
        let pipeline = Pipeline::residential(home);
        let mut answers = pipeline.solve().answers();
        let index = pipeline
            .steps()
            .iter()
            .position(|s| s.id().as_str() == "service_amps")
            .unwrap();
        answers.remove(&StepId::new("service_amps"));

        let result = pipeline.submit(index, "153", &mut answers).unwrap();
        assert_eq!(result, Submission::Accepted { stored: 200.0 });
    }

    #[test]
    fn test_service_amps_accepts_larger_standard_sizes() {
        let home = residential_scenario("small_home").unwrap();
        let pipeline = Pipeline::residential(home);
        let mut answers = pipeline.solve().answers();
        let index = pipeline
            .steps()
            .iter()
            .position(|s| s.id().as_str() == "service_amps")
            .unwrap();
        answers.remove(&StepId::new("service_amps"));
        let expected = pipeline.expected(index, &answers).unwrap();

        assert!(pipeline.is_acceptable(index, 225.0, expected).unwrap());
        assert!(pipeline.is_acceptable(index, 400.0, expected).unwrap());
        assert!(!pipeline.is_acceptable(index, 125.0, expected).unwrap());

        let result = pipeline.submit(index, "400", &mut answers).unwrap();
        assert_eq!(result, Submission::Accepted { stored: 200.0 });
    }

    #[test]
    fn test_out_of_range_index() {
        let retail = commercial_scenario("retail_store").unwrap();
        let pipeline = Pipeline::commercial(retail);
        let err = pipeline.expected(10, &Answers::new()).unwrap_err();
        assert_eq!(err, CalcError::step_out_of_range(10, 10));
    }

    #[test]
    fn test_missing_dependency_reads_zero() {
        let retail = commercial_scenario("retail_store").unwrap();
        let pipeline = Pipeline::commercial(retail);
        // lighting demand with no stored lighting load
        assert_eq!(pipeline.expected(1, &Answers::new()).unwrap(), 0.0);
    }

    #[test]
    fn test_later_answers_are_invisible() {
        let retail = commercial_scenario("retail_store").unwrap();
        let pipeline = Pipeline::commercial(retail);
        let mut answers = pipeline.solve().answers();
        answers.insert(StepId::new("lighting_load"), 0.0);
        // total_va is stored but not a dependency of lighting demand
        assert_eq!(pipeline.expected(1, &answers).unwrap(), 0.0);
    }

    #[test]
    fn test_solve_retail() {
        let retail = commercial_scenario("retail_store").unwrap();
        let sheet = Pipeline::commercial(retail).solve();
        assert_eq!(sheet.kind, CalculatorKind::Commercial);
        assert_eq!(sheet.rows.len(), 10);
        assert_eq!(sheet.stored("total_va"), Some(31_000.0));
        assert_eq!(sheet.stored("service_conductor"), Some(1.0));
        assert_eq!(sheet.stored("gec"), Some(6.0));
    }

    #[test]
    fn test_hint_text() {
        let home = residential_scenario("small_home").unwrap();
        let pipeline = Pipeline::residential(home);
        let text = pipeline.hint_text(0, &Answers::new()).unwrap();
        assert!(text.contains("3600"));
    }
}
