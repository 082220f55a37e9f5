//! # Sessions
//!
//! A session is a scenario plus the answers accepted so far and the index of
//! the step the user is on. Snapshots capture exactly that, so a walkthrough
//! can be resumed later. Steps are not self-describing: restoring a snapshot
//! resolves the scenario from the catalog again and rebuilds the step list.
//!
//! ## Example
//!
//! ```rust
//! use loadcalc_core::scenarios::CalculatorKind;
//! use loadcalc_core::session::{ActiveCalculation, SessionSnapshot};
//!
//! let snapshot = SessionSnapshot::new(CalculatorKind::Commercial, "retail_store");
//! let calc = snapshot.restore().unwrap();
//! assert_eq!(calc.len(), 10);
//! assert!(matches!(calc, ActiveCalculation::Commercial(_)));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CalcError, CalcResult};
use crate::pipeline::{Pipeline, Worksheet};
use crate::scenarios::{commercial_scenario, kind_of, residential_scenario, CalculatorKind};
use crate::steps::{Answers, CommercialStep, ResidentialStep};

/// Current snapshot schema version
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Saved state of a guided walkthrough
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Schema version for compatibility checks
    pub version: String,
    pub session_id: Uuid,
    pub kind: CalculatorKind,
    pub scenario_id: String,
    /// Index of the next unanswered step
    pub step_index: usize,
    pub answers: Answers,
    pub saved_at: DateTime<Utc>,
}

impl SessionSnapshot {
    /// Fresh session at the first step
    pub fn new(kind: CalculatorKind, scenario_id: impl Into<String>) -> Self {
        SessionSnapshot {
            version: SCHEMA_VERSION.to_string(),
            session_id: Uuid::new_v4(),
            kind,
            scenario_id: scenario_id.into(),
            step_index: 0,
            answers: Answers::new(),
            saved_at: Utc::now(),
        }
    }

    /// Record progress and refresh the timestamp
    pub fn record(&mut self, step_index: usize, answers: &Answers) {
        self.step_index = step_index;
        self.answers = answers.clone();
        self.saved_at = Utc::now();
    }

    /// Rebuild the step list for this snapshot.
    ///
    /// Fails when the scenario is not in the catalog for the recorded kind,
    /// or when the step index is past the end of the active list. An index
    /// equal to the list length is a finished session.
    pub fn restore(&self) -> CalcResult<ActiveCalculation> {
        let calc = match self.kind {
            CalculatorKind::Residential => {
                let scenario = residential_scenario(&self.scenario_id)?;
                ActiveCalculation::Residential(Pipeline::residential(scenario))
            }
            CalculatorKind::Commercial => {
                let scenario = commercial_scenario(&self.scenario_id)?;
                ActiveCalculation::Commercial(Pipeline::commercial(scenario))
            }
        };
        if self.step_index > calc.len() {
            return Err(CalcError::step_out_of_range(self.step_index, calc.len()));
        }
        Ok(calc)
    }
}

/// A pipeline over a catalog scenario of either kind
pub enum ActiveCalculation {
    Residential(Pipeline<'static, ResidentialStep>),
    Commercial(Pipeline<'static, CommercialStep>),
}

impl ActiveCalculation {
    /// Open a catalog scenario by id, whichever calculator owns it
    pub fn open(scenario_id: &str) -> CalcResult<Self> {
        match kind_of(scenario_id) {
            Some(CalculatorKind::Residential) => {
                let scenario = residential_scenario(scenario_id)?;
                Ok(ActiveCalculation::Residential(Pipeline::residential(scenario)))
            }
            Some(CalculatorKind::Commercial) => {
                let scenario = commercial_scenario(scenario_id)?;
                Ok(ActiveCalculation::Commercial(Pipeline::commercial(scenario)))
            }
            None => Err(CalcError::scenario_not_found(scenario_id)),
        }
    }

    pub fn kind(&self) -> CalculatorKind {
        match self {
            ActiveCalculation::Residential(_) => CalculatorKind::Residential,
            ActiveCalculation::Commercial(_) => CalculatorKind::Commercial,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ActiveCalculation::Residential(p) => p.len(),
            ActiveCalculation::Commercial(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn solve(&self) -> Worksheet {
        match self {
            ActiveCalculation::Residential(p) => p.solve(),
            ActiveCalculation::Commercial(p) => p.solve(),
        }
    }
}
