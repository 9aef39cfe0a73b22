use std::collections::HashMap;
use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::branches::BranchConfig;
use crate::models::{
    Branch, CohortSummary, PlacementStatus, PredictionRecord, PredictionResult, StatusCount,
    StudentProfile,
};
use crate::profile::ScoringKind;

pub type ScoredStudent = (StudentProfile, PredictionResult);

pub fn summarize_cohort(scored: &[ScoredStudent]) -> CohortSummary {
    let total_students = scored.len();
    let predicted_placed = scored
        .iter()
        .filter(|(_, result)| result.status.is_placed())
        .count();
    let average_cgpa = if total_students == 0 {
        0.0
    } else {
        scored.iter().map(|(profile, _)| profile.cgpa).sum::<f64>() / total_students as f64
    };

    let mut per_branch: HashMap<Branch, usize> = HashMap::new();
    for (profile, _) in scored {
        *per_branch.entry(profile.branch).or_insert(0) += 1;
    }
    let mut top_branch = None;
    let mut top_count = 0;
    for branch in Branch::ALL {
        let count = per_branch.get(&branch).copied().unwrap_or(0);
        if count > top_count {
            top_branch = Some(branch);
            top_count = count;
        }
    }

    CohortSummary {
        total_students,
        predicted_placed,
        average_cgpa,
        top_branch,
    }
}

/// Status counts, most frequent first.
pub fn status_mix(scored: &[ScoredStudent]) -> Vec<StatusCount> {
    let mut map: HashMap<PlacementStatus, (usize, u32)> = HashMap::new();

    for (_, result) in scored {
        let entry = map.entry(result.status).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += u32::from(result.readiness);
    }

    let mut counts: Vec<StatusCount> = map
        .into_iter()
        .map(|(status, (count, total_readiness))| StatusCount {
            status,
            count,
            avg_readiness: if count == 0 {
                0.0
            } else {
                f64::from(total_readiness) / count as f64
            },
        })
        .collect();

    counts.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.status.label().cmp(b.status.label()))
    });
    counts
}

pub fn build_report(
    scope: Option<&str>,
    scoring: ScoringKind,
    generated_at: DateTime<Utc>,
    scored: &[ScoredStudent],
) -> String {
    let summary = summarize_cohort(scored);
    let mix = status_mix(scored);

    let mut output = String::new();
    let scope_label = scope.unwrap_or("all branches");

    let _ = writeln!(output, "# Placement Readiness Report");
    let _ = writeln!(
        output,
        "Generated for {} with the {} profile on {}",
        scope_label,
        scoring.as_str(),
        generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Cohort Summary");
    let _ = writeln!(output, "- Total students: {}", summary.total_students);
    let _ = writeln!(output, "- Predicted placed: {}", summary.predicted_placed);
    let _ = writeln!(output, "- Average CGPA: {:.2}", summary.average_cgpa);
    let _ = writeln!(
        output,
        "- Top branch: {}",
        summary
            .top_branch
            .map(Branch::label)
            .unwrap_or("N/A")
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Status Mix");
    if mix.is_empty() {
        let _ = writeln!(output, "No students registered for this scope.");
    } else {
        for entry in &mix {
            let _ = writeln!(
                output,
                "- {}: {} students (avg readiness {:.1})",
                entry.status.label(),
                entry.count,
                entry.avg_readiness
            );
        }
    }

    let mut ranked: Vec<&ScoredStudent> = scored
        .iter()
        .filter(|(_, result)| result.eligibility.is_eligible())
        .collect();
    ranked.sort_by(|a, b| {
        b.1.readiness
            .cmp(&a.1.readiness)
            .then_with(|| a.0.student_id.cmp(&b.0.student_id))
    });

    let _ = writeln!(output);
    let _ = writeln!(output, "## Most Ready Students");
    if ranked.is_empty() {
        let _ = writeln!(output, "No eligible students in this scope.");
    } else {
        for (profile, result) in ranked.iter().take(10) {
            let _ = writeln!(
                output,
                "- {} ({}, {}) readiness {} ({})",
                profile.student_name,
                profile.student_id,
                profile.branch,
                result.readiness,
                result.status.label()
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Ineligible Students");
    let ineligible: Vec<&ScoredStudent> = scored
        .iter()
        .filter(|(_, result)| !result.eligibility.is_eligible())
        .collect();
    if ineligible.is_empty() {
        let _ = writeln!(output, "Every student passed the eligibility rules.");
    } else {
        for (profile, result) in ineligible {
            let _ = writeln!(
                output,
                "- {} ({}): {}",
                profile.student_name,
                profile.student_id,
                result.eligibility.reason().unwrap_or("not eligible")
            );
        }
    }

    output
}

/// Plain-text dashboard for a single prediction.
pub fn render_dashboard(
    profile: &StudentProfile,
    result: &PredictionResult,
    branch: &BranchConfig,
) -> String {
    let mut output = String::new();
    let rule = "=".repeat(50);
    let companies = if result.company_suggestions.is_empty() {
        "None".to_string()
    } else {
        result.company_suggestions.join(", ")
    };

    let _ = writeln!(output, "STUDENT DASHBOARD");
    let _ = writeln!(output, "{rule}");
    let _ = writeln!(output, "Name                 : {}", profile.student_name);
    let _ = writeln!(output, "Student ID           : {}", profile.student_id);
    let _ = writeln!(output, "Branch               : {}", profile.branch);
    let _ = writeln!(output, "Strength             : {}", result.strength.label());
    let _ = writeln!(output, "Suggested Career     : {}", result.suggested_career);
    let _ = writeln!(output, "Readiness Score      : {}/100", result.readiness);
    let _ = writeln!(
        output,
        "Placement Probability: {:.0}%",
        result.probability * 100.0
    );
    let _ = writeln!(output, "Recommended Companies: {companies}");
    let _ = writeln!(output, "Status               : {}", result.status.display_label());
    let _ = writeln!(output);
    let _ = writeln!(output, "Insights:");
    for insight in &result.insights {
        let _ = writeln!(output, " - {insight}");
    }
    if !branch.career_paths.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "Career Paths for {}:", branch.branch);
        for path in branch.career_paths.iter().take(5) {
            let _ = writeln!(output, " > {path}");
        }
    }
    let _ = writeln!(output, "{rule}");

    output
}

pub fn render_history(records: &[PredictionRecord]) -> String {
    let mut output = String::new();
    if records.is_empty() {
        let _ = writeln!(output, "No predictions recorded for this student.");
        return output;
    }

    for record in records {
        let _ = writeln!(
            output,
            "- {} {} readiness {} ({:.2}) companies: {}",
            record.created_at.format("%Y-%m-%d %H:%M:%S"),
            record.status.label(),
            record.readiness,
            record.probability,
            if record.company_suggestions.is_empty() {
                "None".to_string()
            } else {
                record.company_suggestions.join(", ")
            }
        );
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branches::BranchCatalog;
    use crate::engine::PlacementEngine;
    use crate::models::{CertificationLevel, InternshipType};
    use chrono::TimeZone;
    use uuid::Uuid;

    fn student(id: &str, branch: Branch, cgpa: f64, communication: u8) -> StudentProfile {
        StudentProfile {
            student_id: id.to_string(),
            student_name: format!("Student {id}"),
            branch,
            cgpa,
            coding_skill: 6,
            communication_skill: communication,
            aptitude_skill: 5,
            problem_solving: 5,
            projects_count: 2,
            internship_count: 1,
            certifications_count: 1,
            internship_type: InternshipType::Startup,
            certification_level: CertificationLevel::Beginner,
            technical_skills: vec!["Python".to_string()],
            tools_known: vec!["Git".to_string()],
        }
    }

    fn scored(profiles: Vec<StudentProfile>) -> Vec<ScoredStudent> {
        let engine = PlacementEngine::for_kind(ScoringKind::Standard);
        let catalog = BranchCatalog::standard();
        profiles
            .into_iter()
            .map(|profile| {
                let result = engine.predict(&profile, &catalog).unwrap();
                (profile, result)
            })
            .collect()
    }

    #[test]
    fn cohort_summary_counts_placed_and_top_branch() {
        let cohort = scored(vec![
            student("A", Branch::Cse, 8.0, 7),
            student("B", Branch::Cse, 5.0, 7),
            student("C", Branch::Civil, 7.0, 6),
        ]);
        let summary = summarize_cohort(&cohort);
        assert_eq!(summary.total_students, 3);
        assert_eq!(summary.predicted_placed, 2);
        assert!((summary.average_cgpa - 20.0 / 3.0).abs() < 1e-9);
        assert_eq!(summary.top_branch, Some(Branch::Cse));
    }

    #[test]
    fn empty_cohort_summary_has_no_top_branch() {
        let summary = summarize_cohort(&[]);
        assert_eq!(summary.total_students, 0);
        assert_eq!(summary.average_cgpa, 0.0);
        assert_eq!(summary.top_branch, None);
    }

    #[test]
    fn status_mix_orders_by_frequency() {
        let cohort = scored(vec![
            student("A", Branch::Cse, 8.0, 7),
            student("B", Branch::Cse, 5.0, 7),
            student("C", Branch::Civil, 5.5, 6),
        ]);
        let mix = status_mix(&cohort);
        assert_eq!(mix[0].status, PlacementStatus::NotPlaced);
        assert_eq!(mix[0].count, 2);
        assert_eq!(mix[0].avg_readiness, 0.0);
        assert_eq!(mix[1].status, PlacementStatus::HighlyPlaced);
    }

    #[test]
    fn report_lists_ineligible_reasons() {
        let cohort = scored(vec![
            student("A", Branch::Cse, 8.0, 7),
            student("B", Branch::Civil, 7.0, 2),
        ]);
        let generated_at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
        let report = build_report(Some("CSE"), ScoringKind::Standard, generated_at, &cohort);

        assert!(report.starts_with("# Placement Readiness Report\n"));
        assert!(report.contains("Generated for CSE with the standard profile on 2026-03-01 09:30 UTC"));
        assert!(report.contains("- Student A (A, CSE) readiness 100 (HIGHLY PLACED)"));
        assert!(report.contains("- Student B (B): Communication skill below 4"));
    }

    #[test]
    fn dashboard_shows_companies_and_career_paths() {
        let cohort = scored(vec![student("A", Branch::Cse, 8.0, 7)]);
        let (profile, result) = &cohort[0];
        let catalog = BranchCatalog::standard();
        let dashboard = render_dashboard(profile, result, catalog.get(Branch::Cse).unwrap());

        assert!(dashboard.contains("Recommended Companies: Google, Microsoft, Amazon, Meta"));
        assert!(dashboard.contains("Status               : HIGHLY PLACED ✅"));
        assert!(dashboard.contains(" > Software Engineer"));
    }

    #[test]
    fn history_renders_each_record() {
        let records = vec![PredictionRecord {
            id: Uuid::new_v4(),
            student_id: "A".to_string(),
            student_name: "Student A".to_string(),
            branch: "CSE".to_string(),
            status: PlacementStatus::Placed,
            probability: 0.68,
            readiness: 68,
            company_suggestions: vec![],
            insights: vec![],
            created_at: Utc.with_ymd_and_hms(2026, 2, 2, 10, 0, 0).unwrap(),
        }];
        assert_eq!(
            render_history(&records),
            "- 2026-02-02 10:00:00 PLACED readiness 68 (0.68) companies: None\n"
        );
        assert_eq!(
            render_history(&[]),
            "No predictions recorded for this student.\n"
        );
    }
}
