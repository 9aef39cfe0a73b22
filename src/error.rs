use thiserror::Error;

use crate::models::Branch;

/// Errors the readiness engine can raise. An ineligible student is not an
/// error; see [`crate::eligibility::EligibilityVerdict`].
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid profile '{student_id}': {reason}")]
    InvalidProfile { student_id: String, reason: String },

    #[error("branch '{0}' is not configured")]
    UnknownBranch(String),

    #[error("profile branch {profile} does not match the {config} configuration")]
    BranchMismatch { profile: Branch, config: Branch },

    #[error("unknown {field} value '{value}'")]
    UnknownCategory { field: &'static str, value: String },

    #[error("failed to load branch catalog: {0}")]
    CatalogLoad(#[from] serde_json::Error),
}

impl EngineError {
    pub(crate) fn invalid(student_id: &str, reason: impl Into<String>) -> Self {
        Self::InvalidProfile {
            student_id: student_id.to_string(),
            reason: reason.into(),
        }
    }
}
