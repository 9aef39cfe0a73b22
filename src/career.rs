use serde::{Deserialize, Serialize};

use crate::branches::BranchConfig;
use crate::models::{known_tokens, StudentProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthArea {
    Coding,
    Aptitude,
    Communication,
    ProblemSolving,
    Technical,
}

impl StrengthArea {
    pub fn label(self) -> &'static str {
        match self {
            StrengthArea::Coding => "Coding",
            StrengthArea::Aptitude => "Aptitude",
            StrengthArea::Communication => "Communication",
            StrengthArea::ProblemSolving => "Problem Solving",
            StrengthArea::Technical => "Technical",
        }
    }

    /// Roles that suit this strength, best fit first.
    pub fn careers(self) -> &'static [&'static str] {
        match self {
            StrengthArea::Coding => &["Software Developer", "Data Scientist"],
            StrengthArea::Aptitude => &["Data Analyst", "Research Analyst"],
            StrengthArea::Communication => &["HR", "Business Analyst", "Consultant"],
            StrengthArea::ProblemSolving => &["Product Manager", "Consultant"],
            StrengthArea::Technical => &["Engineer", "Technician"],
        }
    }
}

/// Highest-rated area; ties go to the area listed first.
pub fn detect_strength(profile: &StudentProfile, branch: &BranchConfig) -> StrengthArea {
    let candidates: [(StrengthArea, usize); 4] = if branch.coding_required {
        [
            (StrengthArea::Coding, usize::from(profile.coding_skill)),
            (StrengthArea::Aptitude, usize::from(profile.aptitude_skill)),
            (
                StrengthArea::Communication,
                usize::from(profile.communication_skill),
            ),
            (
                StrengthArea::ProblemSolving,
                usize::from(profile.problem_solving),
            ),
        ]
    } else {
        [
            (StrengthArea::Aptitude, usize::from(profile.aptitude_skill)),
            (
                StrengthArea::Communication,
                usize::from(profile.communication_skill),
            ),
            (
                StrengthArea::ProblemSolving,
                usize::from(profile.problem_solving),
            ),
            (StrengthArea::Technical, known_tokens(&profile.technical_skills)),
        ]
    };

    let (mut best, mut best_value) = candidates[0];
    for (area, value) in candidates.into_iter().skip(1) {
        if value > best_value {
            best = area;
            best_value = value;
        }
    }
    best
}

pub fn suggest_career(strength: StrengthArea) -> &'static str {
    strength.careers().first().copied().unwrap_or("Engineer")
}
