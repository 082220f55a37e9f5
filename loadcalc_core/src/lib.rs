//! # loadcalc_core - Guided NEC Article 220 Load Calculations
//!
//! `loadcalc_core` walks a learner through a service load calculation one
//! step at a time: residential dwellings by the Part III standard method and
//! non-dwelling buildings by Part IV. Every step computes its own expected
//! answer from a catalog scenario and the answers stored for earlier steps,
//! judges a submitted value, and can explain itself with a worked hint.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: the caller owns the answer map; evaluation is pure
//! - **JSON-First**: scenarios, answers, worksheets and snapshots serialize
//! - **No fatal engine errors**: a wrong answer is a normal result, and table
//!   lookups always fall back to a defined row
//!
//! ## Quick Start
//!
//! ```rust
//! use loadcalc_core::pipeline::Pipeline;
//! use loadcalc_core::scenarios::commercial_scenario;
//!
//! let retail = commercial_scenario("retail_store").unwrap();
//! let sheet = Pipeline::commercial(retail).solve();
//!
//! assert_eq!(sheet.stored("total_va"), Some(31_000.0));
//! let json = serde_json::to_string_pretty(&sheet).unwrap();
//! assert!(json.contains("\"scenario_id\": \"retail_store\""));
//! ```
//!
//! ## Modules
//!
//! - [`tables`] - NEC reference tables and demand-tier application
//! - [`motors`] - Horsepower to full-load current and VA
//! - [`scenarios`] - Residential and commercial scenario catalogs
//! - [`steps`] - Step definitions for both calculators
//! - [`filter`] - Active step lists per scenario
//! - [`pipeline`] - Step evaluation, submission and worksheets
//! - [`coverage`] - Equipment list and cross-off state
//! - [`session`] - Resumable session snapshots
//! - [`file_io`] - Snapshot files with atomic saves
//! - [`errors`] - Structured error types

pub mod coverage;
pub mod errors;
pub mod file_io;
pub mod filter;
pub mod motors;
pub mod pipeline;
pub mod scenarios;
pub mod session;
pub mod steps;
pub mod tables;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_snapshot, save_snapshot};
pub use pipeline::{Pipeline, Submission, Worksheet};
pub use scenarios::{CalculatorKind, CommercialScenario, ResidentialScenario};
pub use session::{ActiveCalculation, SessionSnapshot};
pub use steps::{Answers, CalculationStep, StepId};
