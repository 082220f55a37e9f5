//! # Calculation Steps
//!
//! A guided calculation is an ordered list of steps. Each step knows how to
//! compute its expected answer from the scenario and the answers stored for
//! earlier steps, how to judge a user's answer, and how to explain itself.
//!
//! ## Dependency Discipline
//!
//! Steps read earlier answers through [`PriorAnswers`], a view that only
//! exposes the step's declared dependencies. Reading anything else yields 0,
//! so a mis-wired step produces an obviously wrong (but deterministic) value
//! instead of silently picking up a later answer.
//!
//! ## Modules
//!
//! - [`residential`] - Dwelling standard method (Part III)
//! - [`commercial`] - Non-dwelling calculation (Part IV)

pub mod commercial;
pub mod residential;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::tables::{ampacity_75c, ConductorSize, STANDARD_SERVICE_SIZES};

pub use commercial::CommercialStep;
pub use residential::ResidentialStep;

// ============================================================================
// Step Identity and Answers
// ============================================================================

/// Stable identifier of a step within a calculator.
///
/// Ids are plain strings so answer maps serialize as JSON objects. Motor
/// conversion steps are keyed by the appliance they convert (`motor:<id>`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(String);

impl StepId {
    pub fn new(id: impl Into<String>) -> Self {
        StepId(id.into())
    }

    /// Id of the conversion step for a motor appliance
    pub fn motor(appliance_id: &str) -> Self {
        StepId(format!("motor:{}", appliance_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stored answers keyed by step id.
///
/// Owned by the caller; the engine only reads it (and writes through
/// [`crate::pipeline::Pipeline::submit`] when asked to).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers(BTreeMap<StepId, f64>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored value, if any
    pub fn get(&self, id: &StepId) -> Option<f64> {
        self.0.get(id).copied()
    }

    /// Stored value, or 0 when missing
    pub fn value(&self, id: &StepId) -> f64 {
        self.get(id).unwrap_or(0.0)
    }

    pub fn insert(&mut self, id: StepId, value: f64) {
        self.0.insert(id, value);
    }

    pub fn remove(&mut self, id: &StepId) -> Option<f64> {
        self.0.remove(id)
    }

    pub fn contains(&self, id: &StepId) -> bool {
        self.0.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StepId, &f64)> {
        self.0.iter()
    }
}

impl FromIterator<(StepId, f64)> for Answers {
    fn from_iter<I: IntoIterator<Item = (StepId, f64)>>(iter: I) -> Self {
        Answers(iter.into_iter().collect())
    }
}

/// Read-only view of the answers a step is allowed to see.
#[derive(Debug, Clone, Copy)]
pub struct PriorAnswers<'a> {
    answers: &'a Answers,
    visible: Option<&'a [StepId]>,
}

impl<'a> PriorAnswers<'a> {
    /// View restricted to `visible` ids
    pub fn restricted(answers: &'a Answers, visible: &'a [StepId]) -> Self {
        Self {
            answers,
            visible: Some(visible),
        }
    }

    /// Unrestricted view over every stored answer
    pub fn all(answers: &'a Answers) -> Self {
        Self { answers, visible: None }
    }

    /// Value for `id`, or 0 when missing or not visible
    pub fn get(&self, id: &StepId) -> f64 {
        if let Some(visible) = self.visible {
            if !visible.contains(id) {
                trace!(step = %id, "read of undeclared dependency");
                return 0.0;
            }
        }
        self.answers.value(id)
    }

    /// Sum of several answers
    pub fn sum<'i>(&self, ids: impl IntoIterator<Item = &'i StepId>) -> f64 {
        ids.into_iter().map(|id| self.get(id)).sum()
    }
}

// ============================================================================
// Validation
// ============================================================================

/// How a user's answer is compared with the expected value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Validation {
    /// Must equal the expected value
    Exact,
    /// Must be within an absolute tolerance
    Tolerance { plus_minus: f64 },
    /// Raw amperes within `slack`, or any standard service size at or above
    /// `expected - slack`
    ServiceSize { slack: f64 },
    /// A conductor size code whose ampacity is within `slack_amps` of the
    /// expected size's ampacity
    ConductorSize { slack_amps: f64 },
    /// The exact GEC size code
    GecSize,
}

impl Validation {
    pub const fn tolerance(plus_minus: f64) -> Self {
        Validation::Tolerance { plus_minus }
    }

    /// Judge `user` against `expected`.
    pub fn accepts(&self, user: f64, expected: f64) -> bool {
        match *self {
            Validation::Exact => user == expected,
            Validation::Tolerance { plus_minus } => (user - expected).abs() <= plus_minus,
            Validation::ServiceSize { slack } => {
                if (user - expected).abs() <= slack {
                    return true;
                }
                STANDARD_SERVICE_SIZES.contains(&user) && user >= expected - slack
            }
            Validation::ConductorSize { slack_amps } => {
                match (ConductorSize::from_code(user), ConductorSize::from_code(expected)) {
                    (Some(given), Some(wanted)) => {
                        (ampacity_75c(given) - ampacity_75c(wanted)).abs() <= slack_amps
                    }
                    _ => false,
                }
            }
            Validation::GecSize => ConductorSize::from_code(user)
                .map(|size| ConductorSize::GEC_SIZES.contains(&size) && user == expected)
                .unwrap_or(false),
        }
    }

    /// Short description for prompts (e.g., "±10")
    pub fn describe(&self) -> String {
        match self {
            Validation::Exact => "exact value".to_string(),
            Validation::Tolerance { plus_minus } => format!("±{}", plus_minus),
            Validation::ServiceSize { slack } => {
                format!("amperes (±{}) or a standard service size", slack)
            }
            Validation::ConductorSize { .. } => "conductor size code".to_string(),
            Validation::GecSize => "GEC size code".to_string(),
        }
    }
}

/// Unit of a step's answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepUnit {
    /// Volt-amperes
    Va,
    /// Amperes
    Amps,
    /// Conductor size code (see [`crate::tables::conductors`])
    SizeCode,
}

impl StepUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            StepUnit::Va => "VA",
            StepUnit::Amps => "A",
            StepUnit::SizeCode => "(size code)",
        }
    }
}

// ============================================================================
// Hints
// ============================================================================

/// Explanatory text for a step.
///
/// `Derived` hints render a worked derivation from the scenario and the
/// answers the step can see.
pub enum Hint<'s, S> {
    Static(&'static str),
    Derived(Box<dyn Fn(&S, &PriorAnswers<'_>) -> String + 's>),
}

impl<'s, S> Hint<'s, S> {
    /// Wrap a derivation closure
    pub fn derived(f: impl Fn(&S, &PriorAnswers<'_>) -> String + 's) -> Self {
        Hint::Derived(Box::new(f))
    }

    pub fn render(&self, scenario: &S, answers: &PriorAnswers<'_>) -> String {
        match self {
            Hint::Static(text) => text.to_string(),
            Hint::Derived(f) => f(scenario, answers),
        }
    }
}

impl<'s, S> std::fmt::Debug for Hint<'s, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Hint::Static(text) => f.debug_tuple("Static").field(text).finish(),
            Hint::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

// ============================================================================
// Step Trait
// ============================================================================

/// A single step of a guided calculation.
///
/// Implementations are pure: the same scenario and answers always produce
/// the same expected value, stored value and hint.
pub trait CalculationStep {
    /// Scenario record the step reads
    type Scenario;

    fn id(&self) -> StepId;

    fn title(&self) -> String;

    /// Question shown to the user
    fn prompt(&self, scenario: &Self::Scenario) -> String;

    /// NEC section the step applies
    fn citation(&self) -> &'static str;

    /// Formula in display form, when one is worth showing
    fn formula(&self) -> Option<&'static str> {
        None
    }

    fn unit(&self) -> StepUnit {
        StepUnit::Va
    }

    fn validation(&self) -> Validation;

    /// Ids of earlier steps whose stored answers this step reads
    fn dependencies(&self, scenario: &Self::Scenario) -> Vec<StepId>;

    /// Correct value for this step
    fn expected(&self, scenario: &Self::Scenario, answers: &PriorAnswers<'_>) -> f64;

    fn hint(&self) -> Hint<'_, Self::Scenario>;

    /// Value stored for later steps once an answer is accepted.
    ///
    /// Defaults to the user's value. Steps that answer from a discrete
    /// catalog store the canonical catalog value instead.
    fn stored_value(
        &self,
        _scenario: &Self::Scenario,
        _answers: &PriorAnswers<'_>,
        user: f64,
    ) -> f64 {
        user
    }

    /// Equipment keys this step accounts for (see [`crate::coverage`])
    fn accounts_for(&self, _scenario: &Self::Scenario) -> Vec<String> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prior_answers_restriction() {
        let answers: Answers = [(StepId::new("a"), 5.0), (StepId::new("b"), 7.0)]
            .into_iter()
            .collect();
        let visible = [StepId::new("a")];
        let view = PriorAnswers::restricted(&answers, &visible);
        assert_eq!(view.get(&StepId::new("a")), 5.0);
        assert_eq!(view.get(&StepId::new("b")), 0.0);
        assert_eq!(PriorAnswers::all(&answers).get(&StepId::new("b")), 7.0);
        assert_eq!(view.get(&StepId::new("missing")), 0.0);
    }

    #[test]
    fn test_answers_serialize_as_object() {
        let mut answers = Answers::new();
        answers.insert(StepId::new("general_lighting"), 3_600.0);
        answers.insert(StepId::motor("ac"), 6_720.0);
        let json = serde_json::to_string(&answers).unwrap();
        assert_eq!(json, r#"{"general_lighting":3600.0,"motor:ac":6720.0}"#);
        let back: Answers = serde_json::from_str(&json).unwrap();
        assert_eq!(back, answers);
    }

    #[test]
    fn test_tolerance_and_exact() {
        assert!(Validation::tolerance(10.0).accepts(3_609.0, 3_600.0));
        assert!(!Validation::tolerance(10.0).accepts(3_611.0, 3_600.0));
        assert!(Validation::Exact.accepts(3_000.0, 3_000.0));
        assert!(!Validation::Exact.accepts(3_000.5, 3_000.0));
    }

    #[test]
    fn test_service_size_validation() {
        let v = Validation::ServiceSize { slack: 25.0 };
        let expected = 36_800.0 / 240.0;
        assert!(v.accepts(200.0, expected));
        assert!(v.accepts(153.0, expected));
        assert!(v.accepts(150.0, expected));
        assert!(v.accepts(225.0, expected));
        assert!(v.accepts(400.0, expected));
        assert!(!v.accepts(100.0, expected));
        assert!(!v.accepts(190.0, expected));
    }

    #[test]
    fn test_conductor_validation() {
        let v = Validation::ConductorSize { slack_amps: 25.0 };
        // 3/0 (200 A) expected: 2/0 (175 A) is within 25 A, 4/0 (230 A) is not
        assert!(v.accepts(30.0, 30.0));
        assert!(v.accepts(20.0, 30.0));
        assert!(!v.accepts(40.0, 30.0));
        assert!(!v.accepts(4.0, 30.0));
        assert!(!v.accepts(5.0, 30.0));
    }

    #[test]
    fn test_gec_validation() {
        assert!(Validation::GecSize.accepts(4.0, 4.0));
        assert!(!Validation::GecSize.accepts(6.0, 4.0));
        assert!(!Validation::GecSize.accepts(3.0, 3.0));
    }

    #[test]
    fn test_static_hint_render() {
        let hint: Hint<'_, ()> = Hint::Static("Two circuits at 1,500 VA");
        let answers = Answers::new();
        assert_eq!(hint.render(&(), &PriorAnswers::all(&answers)), "Two circuits at 1,500 VA");
        assert_eq!(format!("{:?}", hint), "Static(\"Two circuits at 1,500 VA\")");
    }
}
