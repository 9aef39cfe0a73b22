use tracing::debug;

use crate::branches::{BranchCatalog, BranchConfig};
use crate::career::{detect_strength, suggest_career};
use crate::classify::{classify_status, company_tier, tier_companies, CompanyTier};
use crate::eligibility::{check_eligibility, EligibilityVerdict};
use crate::error::EngineError;
use crate::insights::{generate_insights, InsightContext};
use crate::models::{PlacementStatus, PredictionResult, StudentProfile};
use crate::profile::{ScoringKind, ScoringProfile};
use crate::scoring::{aggregate_score, probability, readiness};

const MAX_RATING: u8 = 10;

/// Rejects profiles whose fields are outside their documented domains.
pub fn validate_profile(profile: &StudentProfile) -> Result<(), EngineError> {
    let id = profile.student_id.as_str();
    if id.trim().is_empty() {
        return Err(EngineError::invalid(id, "student_id must not be empty"));
    }
    if !profile.cgpa.is_finite() || !(0.0..=10.0).contains(&profile.cgpa) {
        return Err(EngineError::invalid(
            id,
            format!("cgpa {} is outside 0-10", profile.cgpa),
        ));
    }

    let ratings = [
        ("coding_skill", profile.coding_skill),
        ("communication_skill", profile.communication_skill),
        ("aptitude_skill", profile.aptitude_skill),
        ("problem_solving", profile.problem_solving),
    ];
    for (field, value) in ratings {
        if value > MAX_RATING {
            return Err(EngineError::invalid(
                id,
                format!("{field} {value} is outside 0-{MAX_RATING}"),
            ));
        }
    }

    Ok(())
}

/// Scores one profile against its branch configuration.
pub fn predict(
    profile: &StudentProfile,
    branch: &BranchConfig,
    scoring: &ScoringProfile,
) -> Result<PredictionResult, EngineError> {
    validate_profile(profile)?;
    if branch.branch != profile.branch {
        return Err(EngineError::BranchMismatch {
            profile: profile.branch,
            config: branch.branch,
        });
    }

    let strength = detect_strength(profile, branch);
    let suggested_career = suggest_career(strength).to_string();

    let verdict = check_eligibility(profile, branch, &scoring.eligibility);
    if let EligibilityVerdict::Ineligible { reason, .. } = &verdict {
        debug!(student_id = %profile.student_id, %reason, "profile failed eligibility gate");
        let insights = vec![reason.clone()];
        return Ok(PredictionResult {
            student_id: profile.student_id.clone(),
            branch: profile.branch,
            eligibility: verdict,
            readiness: 0,
            probability: 0.0,
            status: PlacementStatus::NotPlaced,
            company_tier: CompanyTier::None,
            company_suggestions: Vec::new(),
            insights,
            strength,
            suggested_career,
        });
    }

    let raw_score = aggregate_score(profile, branch, scoring);
    let readiness = readiness(raw_score, scoring.ceiling);
    let status = classify_status(readiness, &scoring.status);
    let tier = company_tier(readiness, &scoring.tiers);
    let company_suggestions = tier_companies(&branch.companies, tier, &scoring.tiers).to_vec();
    let insights = generate_insights(
        scoring.insights,
        &InsightContext {
            profile,
            branch,
            readiness,
        },
    );

    debug!(
        student_id = %profile.student_id,
        profile = scoring.name,
        raw_score,
        readiness,
        status = status.label(),
        "scored profile"
    );

    Ok(PredictionResult {
        student_id: profile.student_id.clone(),
        branch: profile.branch,
        eligibility: verdict,
        readiness,
        probability: probability(readiness),
        status,
        company_tier: tier,
        company_suggestions,
        insights,
        strength,
        suggested_career,
    })
}

/// A scoring profile bound for repeated use. The catalog is passed per call
/// so callers can swap it between predictions.
#[derive(Debug, Clone)]
pub struct PlacementEngine {
    scoring: ScoringProfile,
}

impl PlacementEngine {
    pub fn new(scoring: ScoringProfile) -> Self {
        Self { scoring }
    }

    pub fn for_kind(kind: ScoringKind) -> Self {
        Self::new(kind.profile())
    }

    pub fn scoring(&self) -> &ScoringProfile {
        &self.scoring
    }

    pub fn predict(
        &self,
        profile: &StudentProfile,
        catalog: &BranchCatalog,
    ) -> Result<PredictionResult, EngineError> {
        let branch = catalog
            .get(profile.branch)
            .ok_or_else(|| EngineError::UnknownBranch(profile.branch.to_string()))?;
        predict(profile, branch, &self.scoring)
    }
}
