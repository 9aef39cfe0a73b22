use serde::{Deserialize, Serialize};

use crate::branches::BranchConfig;
use crate::models::{known_tokens, StudentProfile};
use crate::profile::EligibilityRules;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateRule {
    MinimumCgpa,
    MinimumCoding,
    MinimumCommunication,
    SkillsAndTools,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum EligibilityVerdict {
    Eligible,
    Ineligible { rule: GateRule, reason: String },
}

impl EligibilityVerdict {
    pub fn is_eligible(&self) -> bool {
        matches!(self, EligibilityVerdict::Eligible)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            EligibilityVerdict::Eligible => None,
            EligibilityVerdict::Ineligible { reason, .. } => Some(reason),
        }
    }

    fn fail(rule: GateRule, reason: String) -> Self {
        EligibilityVerdict::Ineligible { rule, reason }
    }
}

/// Runs the hard placement rules in order; the first failing rule decides.
pub fn check_eligibility(
    profile: &StudentProfile,
    branch: &BranchConfig,
    rules: &EligibilityRules,
) -> EligibilityVerdict {
    if profile.cgpa < rules.min_cgpa {
        return EligibilityVerdict::fail(
            GateRule::MinimumCgpa,
            format!(
                "CGPA below {:.1} is not eligible for placements",
                rules.min_cgpa
            ),
        );
    }

    if let Some(min_coding) = rules.min_coding {
        if branch.coding_required && profile.coding_skill < min_coding {
            return EligibilityVerdict::fail(
                GateRule::MinimumCoding,
                format!("Coding skill below {min_coding} for {} branch", branch.branch),
            );
        }
    }

    if let Some(min_communication) = rules.min_communication {
        if profile.communication_skill < min_communication {
            return EligibilityVerdict::fail(
                GateRule::MinimumCommunication,
                format!("Communication skill below {min_communication}"),
            );
        }
    }

    let has_skills = known_tokens(&profile.technical_skills) > 0;
    let has_tools = known_tokens(&profile.tools_known) > 0;
    if rules.require_skills_and_tools && !(has_skills && has_tools) {
        return EligibilityVerdict::fail(
            GateRule::SkillsAndTools,
            "Technical skills or tools knowledge missing".to_string(),
        );
    }

    EligibilityVerdict::Eligible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branches::BranchCatalog;
    use crate::models::{Branch, CertificationLevel, InternshipType};
    use crate::profile::ScoringProfile;

    fn sample_profile(branch: Branch) -> StudentProfile {
        StudentProfile {
            student_id: "S-100".to_string(),
            student_name: "Kiara Patel".to_string(),
            branch,
            cgpa: 7.5,
            coding_skill: 6,
            communication_skill: 6,
            aptitude_skill: 6,
            problem_solving: 6,
            projects_count: 2,
            internship_count: 1,
            certifications_count: 1,
            internship_type: InternshipType::Startup,
            certification_level: CertificationLevel::Beginner,
            technical_skills: vec!["Python".to_string()],
            tools_known: vec!["Git".to_string()],
        }
    }

    fn check(profile: &StudentProfile) -> EligibilityVerdict {
        let catalog = BranchCatalog::standard();
        let branch = catalog.get(profile.branch).unwrap();
        check_eligibility(profile, branch, &ScoringProfile::standard().eligibility)
    }

    #[test]
    fn passing_profile_is_eligible() {
        assert_eq!(check(&sample_profile(Branch::Cse)), EligibilityVerdict::Eligible);
    }

    #[test]
    fn cgpa_rule_wins_over_every_later_rule() {
        let mut profile = sample_profile(Branch::Cse);
        profile.cgpa = 5.99;
        profile.coding_skill = 0;
        profile.communication_skill = 0;
        profile.tools_known.clear();

        let verdict = check(&profile);
        assert_eq!(
            verdict,
            EligibilityVerdict::Ineligible {
                rule: GateRule::MinimumCgpa,
                reason: "CGPA below 6.0 is not eligible for placements".to_string(),
            }
        );
    }

    #[test]
    fn cgpa_of_exactly_six_passes() {
        let mut profile = sample_profile(Branch::Civil);
        profile.cgpa = 6.0;
        assert!(check(&profile).is_eligible());
    }

    #[test]
    fn coding_rule_names_the_branch() {
        let mut profile = sample_profile(Branch::Ece);
        profile.coding_skill = 3;
        let verdict = check(&profile);
        assert_eq!(verdict.reason(), Some("Coding skill below 4 for ECE branch"));
    }

    #[test]
    fn coding_rule_skipped_for_non_coding_branches() {
        let mut profile = sample_profile(Branch::Mechanical);
        profile.coding_skill = 0;
        assert!(check(&profile).is_eligible());
    }

    #[test]
    fn communication_rule_follows_coding_rule() {
        let mut profile = sample_profile(Branch::Cse);
        profile.communication_skill = 3;
        let verdict = check(&profile);
        assert!(matches!(
            verdict,
            EligibilityVerdict::Ineligible { rule: GateRule::MinimumCommunication, .. }
        ));
        assert_eq!(verdict.reason(), Some("Communication skill below 4"));
    }

    #[test]
    fn empty_skill_or_tool_list_fails_last() {
        let mut profile = sample_profile(Branch::Other);
        profile.technical_skills.clear();
        assert_eq!(
            check(&profile).reason(),
            Some("Technical skills or tools knowledge missing")
        );

        let mut profile = sample_profile(Branch::Other);
        profile.tools_known.clear();
        assert_eq!(
            check(&profile).reason(),
            Some("Technical skills or tools knowledge missing")
        );
    }

    #[test]
    fn blank_skill_or_tool_entries_count_as_missing() {
        for blank in ["", "   "] {
            let mut profile = sample_profile(Branch::Civil);
            profile.technical_skills = vec![blank.to_string()];
            assert_eq!(
                check(&profile),
                EligibilityVerdict::Ineligible {
                    rule: GateRule::SkillsAndTools,
                    reason: "Technical skills or tools knowledge missing".to_string(),
                }
            );

            let mut profile = sample_profile(Branch::Civil);
            profile.tools_known = vec![blank.to_string(), " ".to_string()];
            assert_eq!(
                check(&profile).reason(),
                Some("Technical skills or tools knowledge missing")
            );
        }
    }

    #[test]
    fn compact_rules_only_enforce_cgpa() {
        let catalog = BranchCatalog::compact();
        let rules = ScoringProfile::compact().eligibility;
        let mut profile = sample_profile(Branch::Cse);
        profile.coding_skill = 1;
        profile.communication_skill = 1;
        profile.tools_known.clear();
        let branch = catalog.get(Branch::Cse).unwrap();
        assert!(check_eligibility(&profile, branch, &rules).is_eligible());

        profile.cgpa = 4.0;
        assert!(!check_eligibility(&profile, branch, &rules).is_eligible());
    }
}
