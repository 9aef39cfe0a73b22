use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{
    split_tokens, Branch, PredictionRecord, PredictionResult, StudentProfile,
};
use crate::profile::ScoringKind;

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// A student as stored: categorical fields as text, lists as comma-separated
/// cells. Shared by the database rows and the CSV import format.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentRow {
    pub student_id: String,
    pub student_name: String,
    pub branch: String,
    pub cgpa: f64,
    #[serde(default)]
    pub coding_skill: i32,
    pub communication_skill: i32,
    pub aptitude_skill: i32,
    pub problem_solving: i32,
    #[serde(default)]
    pub projects_count: i32,
    #[serde(default)]
    pub internship_count: i32,
    #[serde(default)]
    pub internship_type: String,
    #[serde(default)]
    pub certifications_count: i32,
    #[serde(default)]
    pub certification_level: String,
    #[serde(default)]
    pub technical_skills: String,
    #[serde(default)]
    pub tools_known: String,
}

/// Registration ids are matched case-insensitively.
pub fn normalize_student_id(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

impl StudentRow {
    pub fn into_profile(self) -> Result<StudentProfile, EngineError> {
        let id = normalize_student_id(&self.student_id);
        let rating = |field: &str, value: i32| {
            u8::try_from(value)
                .map_err(|_| EngineError::invalid(&id, format!("{field} {value} is outside 0-10")))
        };
        let count = |field: &str, value: i32| {
            u32::try_from(value)
                .map_err(|_| EngineError::invalid(&id, format!("{field} must not be negative")))
        };

        let profile = StudentProfile {
            student_name: self.student_name.trim().to_string(),
            branch: self.branch.parse::<Branch>()?,
            cgpa: self.cgpa,
            coding_skill: rating("coding_skill", self.coding_skill)?,
            communication_skill: rating("communication_skill", self.communication_skill)?,
            aptitude_skill: rating("aptitude_skill", self.aptitude_skill)?,
            problem_solving: rating("problem_solving", self.problem_solving)?,
            projects_count: count("projects_count", self.projects_count)?,
            internship_count: count("internship_count", self.internship_count)?,
            certifications_count: count("certifications_count", self.certifications_count)?,
            internship_type: self.internship_type.parse()?,
            certification_level: self.certification_level.parse()?,
            technical_skills: split_tokens(&self.technical_skills),
            tools_known: split_tokens(&self.tools_known),
            student_id: id,
        };
        crate::engine::validate_profile(&profile)?;
        Ok(profile)
    }

    fn from_pg(row: &PgRow) -> Self {
        Self {
            student_id: row.get("student_id"),
            student_name: row.get("student_name"),
            branch: row.get("branch"),
            cgpa: row.get("cgpa"),
            coding_skill: row.get("coding_skill"),
            communication_skill: row.get("communication_skill"),
            aptitude_skill: row.get("aptitude_skill"),
            problem_solving: row.get("problem_solving"),
            projects_count: row.get("projects_count"),
            internship_count: row.get("internship_count"),
            internship_type: row.get("internship_type"),
            certifications_count: row.get("certifications_count"),
            certification_level: row.get("certification_level"),
            technical_skills: row.get("technical_skills"),
            tools_known: row.get("tools_known"),
        }
    }
}

pub async fn upsert_student(pool: &PgPool, profile: &StudentProfile) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO placement.students
        (student_id, student_name, branch, cgpa, coding_skill, communication_skill,
         aptitude_skill, problem_solving, projects_count, internship_count,
         internship_type, certifications_count, certification_level,
         technical_skills, tools_known)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        ON CONFLICT (student_id) DO UPDATE
        SET student_name = EXCLUDED.student_name,
            branch = EXCLUDED.branch,
            cgpa = EXCLUDED.cgpa,
            coding_skill = EXCLUDED.coding_skill,
            communication_skill = EXCLUDED.communication_skill,
            aptitude_skill = EXCLUDED.aptitude_skill,
            problem_solving = EXCLUDED.problem_solving,
            projects_count = EXCLUDED.projects_count,
            internship_count = EXCLUDED.internship_count,
            internship_type = EXCLUDED.internship_type,
            certifications_count = EXCLUDED.certifications_count,
            certification_level = EXCLUDED.certification_level,
            technical_skills = EXCLUDED.technical_skills,
            tools_known = EXCLUDED.tools_known
        "#,
    )
    .bind(&profile.student_id)
    .bind(&profile.student_name)
    .bind(profile.branch.label())
    .bind(profile.cgpa)
    .bind(i32::from(profile.coding_skill))
    .bind(i32::from(profile.communication_skill))
    .bind(i32::from(profile.aptitude_skill))
    .bind(i32::from(profile.problem_solving))
    .bind(to_i32(profile.projects_count)?)
    .bind(to_i32(profile.internship_count)?)
    .bind(profile.internship_type.label())
    .bind(to_i32(profile.certifications_count)?)
    .bind(profile.certification_level.label())
    .bind(profile.technical_skills.join(", "))
    .bind(profile.tools_known.join(", "))
    .execute(pool)
    .await
    .with_context(|| format!("failed to save student {}", profile.student_id))?;

    Ok(())
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<()> {
    let students = vec![
        StudentRow {
            student_id: "CSE-2026-001".to_string(),
            student_name: "Avery Lee".to_string(),
            branch: "CSE".to_string(),
            cgpa: 9.0,
            coding_skill: 8,
            communication_skill: 8,
            aptitude_skill: 7,
            problem_solving: 7,
            projects_count: 4,
            internship_count: 2,
            internship_type: "MNC".to_string(),
            certifications_count: 2,
            certification_level: "Advanced".to_string(),
            technical_skills: "Python, Java, SQL".to_string(),
            tools_known: "Git, Docker".to_string(),
        },
        StudentRow {
            student_id: "ECE-2026-014".to_string(),
            student_name: "Jules Moreno".to_string(),
            branch: "ECE".to_string(),
            cgpa: 7.0,
            coding_skill: 2,
            communication_skill: 6,
            aptitude_skill: 6,
            problem_solving: 5,
            projects_count: 1,
            internship_count: 0,
            internship_type: "None".to_string(),
            certifications_count: 1,
            certification_level: "Beginner".to_string(),
            technical_skills: "VLSI, Verilog".to_string(),
            tools_known: "Xilinx".to_string(),
        },
        StudentRow {
            student_id: "MECH-2025-007".to_string(),
            student_name: "Kiara Patel".to_string(),
            branch: "Mechanical".to_string(),
            cgpa: 5.5,
            coding_skill: 0,
            communication_skill: 7,
            aptitude_skill: 8,
            problem_solving: 7,
            projects_count: 3,
            internship_count: 1,
            internship_type: "Government".to_string(),
            certifications_count: 1,
            certification_level: "Intermediate".to_string(),
            technical_skills: "AutoCAD, SolidWorks".to_string(),
            tools_known: "ANSYS, MATLAB".to_string(),
        },
        StudentRow {
            student_id: "CIV-2026-021".to_string(),
            student_name: "Noor Haddad".to_string(),
            branch: "Civil".to_string(),
            cgpa: 6.4,
            coding_skill: 0,
            communication_skill: 5,
            aptitude_skill: 4,
            problem_solving: 4,
            projects_count: 1,
            internship_count: 1,
            internship_type: "Public Sector".to_string(),
            certifications_count: 0,
            certification_level: "None".to_string(),
            technical_skills: "STAAD Pro".to_string(),
            tools_known: "MS Project".to_string(),
        },
    ];

    for row in students {
        let profile = row.into_profile()?;
        upsert_student(pool, &profile).await?;
    }

    Ok(())
}

/// Imports students from CSV, skipping rows that fail validation. Returns the
/// number of rows saved.
pub async fn import_csv(pool: &PgPool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let mut saved = 0usize;

    for (index, result) in reader.deserialize::<StudentRow>().enumerate() {
        let line = index + 2;
        let row = result.with_context(|| format!("malformed CSV row at line {line}"))?;
        let profile = match row.into_profile() {
            Ok(profile) => profile,
            Err(err) => {
                warn!(line, error = %err, "skipping invalid student row");
                continue;
            }
        };
        upsert_student(pool, &profile).await?;
        saved += 1;
    }

    info!(saved, path = %csv_path.display(), "imported students");
    Ok(saved)
}

pub async fn fetch_student(
    pool: &PgPool,
    student_id: &str,
) -> anyhow::Result<Option<StudentProfile>> {
    let row = sqlx::query("SELECT * FROM placement.students WHERE student_id = $1")
        .bind(normalize_student_id(student_id))
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => Ok(Some(StudentRow::from_pg(&row).into_profile()?)),
        None => Ok(None),
    }
}

/// All registered students, optionally limited to one branch. Rows that no
/// longer validate are logged and left out.
pub async fn fetch_students(
    pool: &PgPool,
    branch: Option<Branch>,
) -> anyhow::Result<Vec<StudentProfile>> {
    let mut query = String::from("SELECT * FROM placement.students");
    if branch.is_some() {
        query.push_str(" WHERE branch = $1");
    }
    query.push_str(" ORDER BY student_id");

    let mut rows = sqlx::query(&query);
    if let Some(value) = branch {
        rows = rows.bind(value.label());
    }

    let records = rows.fetch_all(pool).await?;
    let mut students = Vec::with_capacity(records.len());

    for row in records {
        match StudentRow::from_pg(&row).into_profile() {
            Ok(profile) => students.push(profile),
            Err(err) => warn!(error = %err, "skipping stored student"),
        }
    }

    Ok(students)
}

pub async fn record_prediction(
    pool: &PgPool,
    profile: &StudentProfile,
    result: &PredictionResult,
    scoring: ScoringKind,
    created_at: DateTime<Utc>,
) -> anyhow::Result<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO placement.predictions
        (id, student_id, student_name, branch, scoring, status, probability,
         readiness_score, company_suggestions, career_insights, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#,
    )
    .bind(id)
    .bind(&profile.student_id)
    .bind(&profile.student_name)
    .bind(profile.branch.label())
    .bind(scoring.as_str())
    .bind(result.status.label())
    .bind(result.probability)
    .bind(i32::from(result.readiness))
    .bind(&result.company_suggestions)
    .bind(&result.insights)
    .bind(created_at)
    .execute(pool)
    .await
    .with_context(|| format!("failed to record prediction for {}", profile.student_id))?;

    debug!(%id, student_id = %profile.student_id, "prediction recorded");
    Ok(id)
}

/// Prediction history for a student, newest first.
pub async fn fetch_history(
    pool: &PgPool,
    student_id: &str,
    limit: i64,
) -> anyhow::Result<Vec<PredictionRecord>> {
    let rows = sqlx::query(
        r#"
        SELECT id, student_id, student_name, branch, status, probability,
               readiness_score, company_suggestions, career_insights, created_at
        FROM placement.predictions
        WHERE student_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(normalize_student_id(student_id))
    .bind(limit.max(1))
    .fetch_all(pool)
    .await?;

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let status: String = row.get("status");
        let readiness: i32 = row.get("readiness_score");
        records.push(PredictionRecord {
            id: row.get("id"),
            student_id: row.get("student_id"),
            student_name: row.get("student_name"),
            branch: row.get("branch"),
            status: status.parse()?,
            probability: row.get("probability"),
            readiness: u8::try_from(readiness)
                .with_context(|| format!("stored readiness {readiness} out of range"))?,
            company_suggestions: row.get("company_suggestions"),
            insights: row.get("career_insights"),
            created_at: row.get("created_at"),
        });
    }

    Ok(records)
}

fn to_i32(value: u32) -> anyhow::Result<i32> {
    i32::try_from(value).with_context(|| format!("count {value} does not fit the schema"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CertificationLevel, InternshipType};

    fn sample_row() -> StudentRow {
        StudentRow {
            student_id: " cse-01 ".to_string(),
            student_name: "Avery Lee ".to_string(),
            branch: "cse".to_string(),
            cgpa: 8.1,
            coding_skill: 7,
            communication_skill: 6,
            aptitude_skill: 6,
            problem_solving: 7,
            projects_count: 2,
            internship_count: 1,
            internship_type: "Startup".to_string(),
            certifications_count: 1,
            certification_level: "".to_string(),
            technical_skills: "Python, SQL,".to_string(),
            tools_known: "Git".to_string(),
        }
    }

    #[test]
    fn row_converts_into_normalized_profile() {
        let profile = sample_row().into_profile().unwrap();
        assert_eq!(profile.student_id, "CSE-01");
        assert_eq!(profile.student_name, "Avery Lee");
        assert_eq!(profile.branch, Branch::Cse);
        assert_eq!(profile.internship_type, InternshipType::Startup);
        assert_eq!(profile.certification_level, CertificationLevel::None);
        assert_eq!(profile.technical_skills, vec!["Python", "SQL"]);
    }

    #[test]
    fn negative_counts_are_invalid() {
        let mut row = sample_row();
        row.projects_count = -1;
        let err = row.into_profile().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid profile 'CSE-01': projects_count must not be negative"
        );
    }

    #[test]
    fn out_of_range_ratings_are_invalid() {
        let mut row = sample_row();
        row.communication_skill = 300;
        assert!(matches!(
            row.into_profile(),
            Err(EngineError::InvalidProfile { .. })
        ));

        let mut row = sample_row();
        row.problem_solving = 12;
        assert!(matches!(
            row.into_profile(),
            Err(EngineError::InvalidProfile { .. })
        ));
    }

    #[test]
    fn unknown_text_values_are_surfaced() {
        let mut row = sample_row();
        row.branch = "Aerospace".to_string();
        assert!(matches!(
            row.into_profile(),
            Err(EngineError::UnknownBranch(_))
        ));

        let mut row = sample_row();
        row.internship_type = "Freelance".to_string();
        assert!(matches!(
            row.into_profile(),
            Err(EngineError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn csv_rows_deserialize_with_optional_columns() {
        let data = "\
student_id,student_name,branch,cgpa,communication_skill,aptitude_skill,problem_solving,technical_skills,tools_known
civ-9,Noor Haddad,Civil,6.4,5,4,4,\"STAAD Pro, ETABS\",MS Project
";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let rows: Vec<StudentRow> = reader.deserialize().collect::<Result<_, _>>().unwrap();
        let profile = rows[0].clone().into_profile().unwrap();
        assert_eq!(profile.student_id, "CIV-9");
        assert_eq!(profile.technical_skills, vec!["STAAD Pro", "ETABS"]);
        assert_eq!(profile.projects_count, 0);
    }
}
