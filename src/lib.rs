//! Rule-based placement readiness scoring.
//!
//! A [`StudentProfile`] and its branch's [`BranchConfig`] go through three
//! stages: the eligibility gate, the weighted score, and classification with
//! company tiering and insights. [`predict`] composes them.

pub mod branches;
pub mod career;
pub mod classify;
pub mod config;
pub mod db;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod insights;
pub mod models;
pub mod profile;
pub mod report;
pub mod scoring;
pub mod telemetry;

pub use branches::{BranchCatalog, BranchConfig, SharedCatalog};
pub use engine::{predict, PlacementEngine};
pub use error::EngineError;
pub use models::{PlacementStatus, PredictionResult, StudentProfile};
pub use profile::{ScoringKind, ScoringProfile};
