use crate::branches::BranchConfig;
use crate::models::{known_tokens, StudentProfile};
use crate::profile::ScoringProfile;

/// Weighted sum over an eligible profile, before the ceiling is applied.
pub fn aggregate_score(
    profile: &StudentProfile,
    branch: &BranchConfig,
    scoring: &ScoringProfile,
) -> f64 {
    let weights = &scoring.weights;
    let mut score = profile.cgpa * weights.cgpa
        + f64::from(profile.communication_skill) * weights.communication
        + f64::from(profile.aptitude_skill) * weights.aptitude
        + f64::from(profile.problem_solving) * weights.problem_solving
        + f64::from(profile.projects_count) * weights.projects
        + f64::from(profile.internship_count) * weights.internships
        + f64::from(profile.certifications_count) * weights.certifications
        + count(&profile.technical_skills) * weights.technical_skill
        + count(&profile.tools_known) * weights.tool;

    score += scoring.internship_bonus.for_type(profile.internship_type);
    score += scoring
        .certification_bonus
        .for_level(profile.certification_level);

    if branch.coding_required {
        score += f64::from(profile.coding_skill) * weights.coding;
    }

    score
}

/// Caps the raw score and truncates it to a whole readiness value. The raw
/// score is rounded to two decimals first so float noise such as
/// 72.99999999 still lands on 73.
pub fn readiness(raw_score: f64, ceiling: f64) -> u8 {
    let capped = raw_score.max(0.0).min(ceiling.min(100.0).max(0.0));
    let rounded = (capped * 100.0).round() / 100.0;
    rounded.floor() as u8
}

/// Display probability; readiness is whole, so two decimals are exact.
pub fn probability(readiness: u8) -> f64 {
    f64::from(readiness) / 100.0
}

fn count(tokens: &[String]) -> f64 {
    known_tokens(tokens) as f64
}
