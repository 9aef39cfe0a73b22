//! Tunable constants for the readiness engine.
//!
//! Two presets exist: `standard`, used by the dashboard, and `compact`, used
//! by the command-line registration flow. They run through the same engine and
//! differ only in the numbers below.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::branches::BranchCatalog;
use crate::insights::{InsightRule, COMPACT_RULES, STANDARD_RULES};
use crate::models::{CertificationLevel, InternshipType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScoringKind {
    #[default]
    Standard,
    Compact,
}

impl ScoringKind {
    pub fn profile(self) -> ScoringProfile {
        match self {
            ScoringKind::Standard => ScoringProfile::standard(),
            ScoringKind::Compact => ScoringProfile::compact(),
        }
    }

    pub fn catalog(self) -> BranchCatalog {
        match self {
            ScoringKind::Standard => BranchCatalog::standard(),
            ScoringKind::Compact => BranchCatalog::compact(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScoringKind::Standard => "standard",
            ScoringKind::Compact => "compact",
        }
    }
}

/// Hard disqualifiers checked before any score is computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EligibilityRules {
    pub min_cgpa: f64,
    /// Only enforced for branches that require coding.
    pub min_coding: Option<u8>,
    pub min_communication: Option<u8>,
    pub require_skills_and_tools: bool,
}

/// Per-unit weights of the base sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub cgpa: f64,
    pub communication: f64,
    pub aptitude: f64,
    pub problem_solving: f64,
    pub projects: f64,
    pub internships: f64,
    pub certifications: f64,
    pub technical_skill: f64,
    pub tool: f64,
    /// Applied to coding_skill only when the branch requires coding.
    pub coding: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InternshipBonus {
    pub mnc: f64,
    pub startup: f64,
    pub government: f64,
    pub public_sector: f64,
    pub mid_size: f64,
}

impl InternshipBonus {
    pub fn for_type(&self, kind: InternshipType) -> f64 {
        match kind {
            InternshipType::None => 0.0,
            InternshipType::Mnc => self.mnc,
            InternshipType::Startup => self.startup,
            InternshipType::Government => self.government,
            InternshipType::PublicSector => self.public_sector,
            InternshipType::MidSize => self.mid_size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CertificationBonus {
    pub beginner: f64,
    pub intermediate: f64,
    pub advanced: f64,
    pub professional: f64,
}

impl CertificationBonus {
    pub fn for_level(&self, level: CertificationLevel) -> f64 {
        match level {
            CertificationLevel::None => 0.0,
            CertificationLevel::Beginner => self.beginner,
            CertificationLevel::Intermediate => self.intermediate,
            CertificationLevel::Advanced => self.advanced,
            CertificationLevel::Professional => self.professional,
        }
    }
}

/// Inclusive lower bounds of the status bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusThresholds {
    pub highly_placed: Option<u8>,
    pub placed: u8,
}

/// Inclusive lower bounds of the company tiers. With `width` set, the top and
/// mid tiers take `width` companies each and the entry tier takes the rest;
/// without it, one tier holds the whole list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompanyTiers {
    pub top: u8,
    pub mid: u8,
    pub entry: u8,
    pub width: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct ScoringProfile {
    pub name: &'static str,
    pub eligibility: EligibilityRules,
    pub weights: ScoreWeights,
    pub internship_bonus: InternshipBonus,
    pub certification_bonus: CertificationBonus,
    pub ceiling: f64,
    pub status: StatusThresholds,
    pub tiers: CompanyTiers,
    pub insights: &'static [InsightRule],
}

impl ScoringProfile {
    pub fn standard() -> Self {
        Self {
            name: "standard",
            eligibility: EligibilityRules {
                min_cgpa: 6.0,
                min_coding: Some(4),
                min_communication: Some(4),
                require_skills_and_tools: true,
            },
            weights: ScoreWeights {
                cgpa: 10.0,
                communication: 5.0,
                aptitude: 5.0,
                problem_solving: 5.0,
                projects: 3.0,
                internships: 5.0,
                certifications: 4.0,
                technical_skill: 3.0,
                tool: 2.0,
                coding: 5.0,
            },
            internship_bonus: InternshipBonus {
                mnc: 10.0,
                startup: 7.0,
                government: 5.0,
                public_sector: 4.0,
                mid_size: 3.0,
            },
            certification_bonus: CertificationBonus {
                beginner: 0.0,
                intermediate: 3.0,
                advanced: 5.0,
                professional: 8.0,
            },
            ceiling: 100.0,
            status: StatusThresholds {
                highly_placed: Some(75),
                placed: 60,
            },
            tiers: CompanyTiers {
                top: 80,
                mid: 65,
                entry: 50,
                width: Some(4),
            },
            insights: STANDARD_RULES,
        }
    }

    /// The command-line formula. Ratings are normalised to their 0-10 or 0-5
    /// scales, so the weights are fractional; categorical bonuses sit on a
    /// 0-3 level scale.
    pub fn compact() -> Self {
        Self {
            name: "compact",
            eligibility: EligibilityRules {
                min_cgpa: 6.0,
                min_coding: None,
                min_communication: None,
                require_skills_and_tools: false,
            },
            weights: ScoreWeights {
                cgpa: 2.0,
                communication: 1.0,
                aptitude: 1.5,
                problem_solving: 1.5,
                projects: 1.0,
                internships: 1.0,
                certifications: 0.6,
                technical_skill: 1.0,
                tool: 1.0,
                coding: 2.0,
            },
            internship_bonus: InternshipBonus {
                mnc: level_share(3, 5.0),
                startup: level_share(2, 5.0),
                government: level_share(2, 5.0),
                public_sector: level_share(1, 5.0),
                mid_size: level_share(1, 5.0),
            },
            certification_bonus: CertificationBonus {
                beginner: 0.0,
                intermediate: level_share(1, 2.0),
                advanced: level_share(2, 2.0),
                professional: level_share(3, 2.0),
            },
            ceiling: 100.0,
            status: StatusThresholds {
                highly_placed: None,
                placed: 65,
            },
            tiers: CompanyTiers {
                top: 0,
                mid: 0,
                entry: 0,
                width: None,
            },
            insights: COMPACT_RULES,
        }
    }
}

fn level_share(level: u8, max_points: f64) -> f64 {
    f64::from(level) / 3.0 * max_points
}
