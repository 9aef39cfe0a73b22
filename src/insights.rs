//! Narrative insight rules. Each list is evaluated top to bottom and every
//! rule adds at most one line, so the output order is the declaration order.

use std::fmt;

use crate::branches::BranchConfig;
use crate::models::StudentProfile;

pub struct InsightContext<'a> {
    pub profile: &'a StudentProfile,
    pub branch: &'a BranchConfig,
    pub readiness: u8,
}

#[derive(Clone, Copy)]
pub struct InsightRule {
    pub name: &'static str,
    pub evaluate: fn(&InsightContext<'_>) -> Option<&'static str>,
}

impl fmt::Debug for InsightRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsightRule").field("name", &self.name).finish()
    }
}

pub fn generate_insights(rules: &[InsightRule], ctx: &InsightContext<'_>) -> Vec<String> {
    rules
        .iter()
        .filter_map(|rule| (rule.evaluate)(ctx))
        .map(str::to_string)
        .collect()
}

pub const STANDARD_RULES: &[InsightRule] = &[
    InsightRule {
        name: "academics",
        evaluate: academics,
    },
    InsightRule {
        name: "internships",
        evaluate: internships,
    },
    InsightRule {
        name: "projects",
        evaluate: projects,
    },
    InsightRule {
        name: "certifications",
        evaluate: certifications,
    },
    InsightRule {
        name: "targeting",
        evaluate: targeting,
    },
];

pub const COMPACT_RULES: &[InsightRule] = &[
    InsightRule {
        name: "academics",
        evaluate: compact_academics,
    },
    InsightRule {
        name: "coding",
        evaluate: compact_coding,
    },
    InsightRule {
        name: "projects",
        evaluate: compact_projects,
    },
    InsightRule {
        name: "communication",
        evaluate: compact_communication,
    },
];

fn academics(ctx: &InsightContext<'_>) -> Option<&'static str> {
    let cgpa = ctx.profile.cgpa;
    Some(if cgpa >= 8.5 {
        "Excellent academic record - can target core companies"
    } else if cgpa >= 7.5 {
        "Good academic performance - maintain current standards"
    } else {
        "Consider improving CGPA for better opportunities"
    })
}

fn internships(ctx: &InsightContext<'_>) -> Option<&'static str> {
    Some(match ctx.profile.internship_count {
        0 => "Look for internship opportunities to gain practical experience",
        1 => "Consider one more internship for better exposure",
        _ => "Good internship experience - highlight in interviews",
    })
}

fn projects(ctx: &InsightContext<'_>) -> Option<&'static str> {
    Some(if ctx.profile.projects_count >= 3 {
        "Strong project portfolio - showcase during placements"
    } else {
        "Add more projects to your portfolio"
    })
}

fn certifications(ctx: &InsightContext<'_>) -> Option<&'static str> {
    Some(if ctx.profile.certifications_count >= 2 {
        "Certifications add value to your profile"
    } else {
        "Consider getting industry-recognized certifications"
    })
}

fn targeting(ctx: &InsightContext<'_>) -> Option<&'static str> {
    if ctx.readiness >= 80 {
        Some("You can target product-based companies and MNCs")
    } else if ctx.readiness >= 65 {
        Some("Focus on service-based companies and startups")
    } else {
        None
    }
}

fn compact_academics(ctx: &InsightContext<'_>) -> Option<&'static str> {
    Some(if ctx.profile.cgpa >= 7.0 {
        "Good Academic Performance"
    } else {
        "Improve CGPA"
    })
}

fn compact_coding(ctx: &InsightContext<'_>) -> Option<&'static str> {
    if !ctx.branch.coding_required {
        return None;
    }
    Some(if ctx.profile.coding_skill >= 7 {
        "Strong Coding Skills"
    } else {
        "Practice Coding Daily"
    })
}

fn compact_projects(ctx: &InsightContext<'_>) -> Option<&'static str> {
    Some(if ctx.profile.projects_count >= 2 {
        "Good Project Exposure"
    } else {
        "Build More Real-Time Projects"
    })
}

fn compact_communication(ctx: &InsightContext<'_>) -> Option<&'static str> {
    Some(if ctx.profile.communication_skill >= 6 {
        "Decent Communication Skills"
    } else {
        "Improve Communication Skills"
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branches::BranchCatalog;
    use crate::models::{Branch, CertificationLevel, InternshipType};

    fn sample_profile() -> StudentProfile {
        StudentProfile {
            student_id: "S-300".to_string(),
            student_name: "Avery Lee".to_string(),
            branch: Branch::Cse,
            cgpa: 8.6,
            coding_skill: 7,
            communication_skill: 5,
            aptitude_skill: 6,
            problem_solving: 6,
            projects_count: 3,
            internship_count: 1,
            certifications_count: 0,
            internship_type: InternshipType::Startup,
            certification_level: CertificationLevel::None,
            technical_skills: vec!["Python".to_string()],
            tools_known: vec!["Git".to_string()],
        }
    }

    #[test]
    fn standard_rules_emit_in_declaration_order() {
        let catalog = BranchCatalog::standard();
        let profile = sample_profile();
        let ctx = InsightContext {
            profile: &profile,
            branch: catalog.get(Branch::Cse).unwrap(),
            readiness: 70,
        };

        assert_eq!(
            generate_insights(STANDARD_RULES, &ctx),
            vec![
                "Excellent academic record - can target core companies",
                "Consider one more internship for better exposure",
                "Strong project portfolio - showcase during placements",
                "Consider getting industry-recognized certifications",
                "Focus on service-based companies and startups",
            ]
        );
    }

    #[test]
    fn targeting_line_is_omitted_below_sixty_five() {
        let catalog = BranchCatalog::standard();
        let mut profile = sample_profile();
        profile.cgpa = 7.5;
        profile.internship_count = 0;
        let ctx = InsightContext {
            profile: &profile,
            branch: catalog.get(Branch::Cse).unwrap(),
            readiness: 64,
        };

        let insights = generate_insights(STANDARD_RULES, &ctx);
        assert_eq!(insights.len(), 4);
        assert_eq!(
            insights[0],
            "Good academic performance - maintain current standards"
        );
        assert_eq!(
            insights[1],
            "Look for internship opportunities to gain practical experience"
        );
    }

    #[test]
    fn compact_rules_skip_coding_for_non_coding_branches() {
        let catalog = BranchCatalog::compact();
        let mut profile = sample_profile();
        profile.branch = Branch::Civil;
        let ctx = InsightContext {
            profile: &profile,
            branch: catalog.get(Branch::Civil).unwrap(),
            readiness: 40,
        };

        assert_eq!(
            generate_insights(COMPACT_RULES, &ctx),
            vec![
                "Good Academic Performance",
                "Good Project Exposure",
                "Improve Communication Skills",
            ]
        );
    }

    #[test]
    fn rule_names_are_unique_within_a_list() {
        for rules in [STANDARD_RULES, COMPACT_RULES] {
            let mut names: Vec<_> = rules.iter().map(|rule| rule.name).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), rules.len());
        }
    }
}
