use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::career::StrengthArea;
use crate::classify::CompanyTier;
use crate::eligibility::EligibilityVerdict;
use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Branch {
    #[serde(rename = "CSE")]
    Cse,
    #[serde(rename = "ECE")]
    Ece,
    Mechanical,
    Civil,
    #[serde(rename = "EEE")]
    Eee,
    Other,
}

impl Branch {
    pub const ALL: [Branch; 6] = [
        Branch::Cse,
        Branch::Ece,
        Branch::Mechanical,
        Branch::Civil,
        Branch::Eee,
        Branch::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Branch::Cse => "CSE",
            Branch::Ece => "ECE",
            Branch::Mechanical => "Mechanical",
            Branch::Civil => "Civil",
            Branch::Eee => "EEE",
            Branch::Other => "Other",
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Branch {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "CSE" => Ok(Branch::Cse),
            "ECE" => Ok(Branch::Ece),
            "MECHANICAL" => Ok(Branch::Mechanical),
            "CIVIL" => Ok(Branch::Civil),
            "EEE" | "ELECTRICAL" => Ok(Branch::Eee),
            "OTHER" => Ok(Branch::Other),
            _ => Err(EngineError::UnknownBranch(value.trim().to_string())),
        }
    }
}

impl TryFrom<String> for Branch {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum InternshipType {
    #[default]
    None,
    #[serde(rename = "MNC")]
    Mnc,
    Startup,
    Government,
    #[serde(rename = "Public Sector")]
    PublicSector,
    #[serde(rename = "Mid-size Company")]
    MidSize,
}

impl InternshipType {
    pub fn label(self) -> &'static str {
        match self {
            InternshipType::None => "None",
            InternshipType::Mnc => "MNC",
            InternshipType::Startup => "Startup",
            InternshipType::Government => "Government",
            InternshipType::PublicSector => "Public Sector",
            InternshipType::MidSize => "Mid-size Company",
        }
    }
}

impl fmt::Display for InternshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InternshipType {
    type Err = EngineError;

    /// Blank input means no internship was recorded.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(InternshipType::None);
        }
        [
            InternshipType::None,
            InternshipType::Mnc,
            InternshipType::Startup,
            InternshipType::Government,
            InternshipType::PublicSector,
            InternshipType::MidSize,
        ]
        .into_iter()
        .find(|kind| kind.label().eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| EngineError::UnknownCategory {
            field: "internship_type",
            value: trimmed.to_string(),
        })
    }
}

impl TryFrom<String> for InternshipType {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum CertificationLevel {
    #[default]
    None,
    Beginner,
    Intermediate,
    Advanced,
    Professional,
}

impl CertificationLevel {
    pub fn label(self) -> &'static str {
        match self {
            CertificationLevel::None => "None",
            CertificationLevel::Beginner => "Beginner",
            CertificationLevel::Intermediate => "Intermediate",
            CertificationLevel::Advanced => "Advanced",
            CertificationLevel::Professional => "Professional",
        }
    }
}

impl fmt::Display for CertificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CertificationLevel {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(CertificationLevel::None);
        }
        [
            CertificationLevel::None,
            CertificationLevel::Beginner,
            CertificationLevel::Intermediate,
            CertificationLevel::Advanced,
            CertificationLevel::Professional,
        ]
        .into_iter()
        .find(|level| level.label().eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| EngineError::UnknownCategory {
            field: "certification_level",
            value: trimmed.to_string(),
        })
    }
}

impl TryFrom<String> for CertificationLevel {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A registered student as supplied by the registration store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub student_id: String,
    pub student_name: String,
    pub branch: Branch,
    pub cgpa: f64,
    #[serde(default)]
    pub coding_skill: u8,
    pub communication_skill: u8,
    pub aptitude_skill: u8,
    pub problem_solving: u8,
    #[serde(default)]
    pub projects_count: u32,
    #[serde(default)]
    pub internship_count: u32,
    #[serde(default)]
    pub certifications_count: u32,
    #[serde(default)]
    pub internship_type: InternshipType,
    #[serde(default)]
    pub certification_level: CertificationLevel,
    #[serde(default, deserialize_with = "token_list")]
    pub technical_skills: Vec<String>,
    #[serde(default, deserialize_with = "token_list")]
    pub tools_known: Vec<String>,
}

/// Splits a comma-separated cell into trimmed, non-empty tokens.
pub fn split_tokens(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Number of entries that name something; blank entries are not skills.
pub fn known_tokens(tokens: &[String]) -> usize {
    tokens.iter().filter(|token| !token.trim().is_empty()).count()
}

fn token_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(raw
        .iter()
        .map(|token| token.trim())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlacementStatus {
    NotPlaced,
    Placed,
    HighlyPlaced,
}

impl PlacementStatus {
    pub fn label(self) -> &'static str {
        match self {
            PlacementStatus::NotPlaced => "NOT PLACED",
            PlacementStatus::Placed => "PLACED",
            PlacementStatus::HighlyPlaced => "HIGHLY PLACED",
        }
    }

    /// Label with the decorative marker used on dashboards.
    pub fn display_label(self) -> String {
        match self {
            PlacementStatus::NotPlaced => format!("{} ❌", self.label()),
            _ => format!("{} ✅", self.label()),
        }
    }

    pub fn is_placed(self) -> bool {
        !matches!(self, PlacementStatus::NotPlaced)
    }
}

impl fmt::Display for PlacementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PlacementStatus {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().replace(' ', "_").to_ascii_uppercase();
        match normalized.as_str() {
            "NOT_PLACED" => Ok(PlacementStatus::NotPlaced),
            "PLACED" => Ok(PlacementStatus::Placed),
            "HIGHLY_PLACED" => Ok(PlacementStatus::HighlyPlaced),
            _ => Err(EngineError::UnknownCategory {
                field: "status",
                value: value.trim().to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub student_id: String,
    pub branch: Branch,
    pub eligibility: EligibilityVerdict,
    pub readiness: u8,
    pub probability: f64,
    pub status: PlacementStatus,
    pub company_tier: CompanyTier,
    pub company_suggestions: Vec<String>,
    pub insights: Vec<String>,
    pub strength: StrengthArea,
    pub suggested_career: String,
}

/// A prediction as stored in the prediction log.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRecord {
    pub id: Uuid,
    pub student_id: String,
    pub student_name: String,
    pub branch: String,
    pub status: PlacementStatus,
    pub probability: f64,
    pub readiness: u8,
    pub company_suggestions: Vec<String>,
    pub insights: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CohortSummary {
    pub total_students: usize,
    pub predicted_placed: usize,
    pub average_cgpa: f64,
    pub top_branch: Option<Branch>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusCount {
    pub status: PlacementStatus,
    pub count: usize,
    pub avg_readiness: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_parsing_accepts_cli_casing() {
        assert_eq!("mechanical".parse::<Branch>().unwrap(), Branch::Mechanical);
        assert_eq!("ELECTRICAL".parse::<Branch>().unwrap(), Branch::Eee);
        assert_eq!(" cse ".parse::<Branch>().unwrap(), Branch::Cse);
    }

    #[test]
    fn unknown_branch_is_reported() {
        let err = "Aerospace".parse::<Branch>().unwrap_err();
        assert!(matches!(err, EngineError::UnknownBranch(ref name) if name == "Aerospace"));
    }

    #[test]
    fn categories_reject_typos_instead_of_defaulting() {
        assert_eq!(
            "Public Sector".parse::<InternshipType>().unwrap(),
            InternshipType::PublicSector
        );
        assert_eq!("".parse::<InternshipType>().unwrap(), InternshipType::None);
        let err = "MNCs".parse::<InternshipType>().unwrap_err();
        assert!(matches!(
            err,
            EngineError::UnknownCategory { field: "internship_type", .. }
        ));
        let err = "Expert".parse::<CertificationLevel>().unwrap_err();
        assert!(matches!(
            err,
            EngineError::UnknownCategory { field: "certification_level", .. }
        ));
    }

    #[test]
    fn split_tokens_drops_blank_entries() {
        assert_eq!(split_tokens("Python, Java,, SQL ,"), vec!["Python", "Java", "SQL"]);
        assert!(split_tokens("  ").is_empty());
    }

    #[test]
    fn status_labels_round_trip_through_parsing() {
        for status in [
            PlacementStatus::NotPlaced,
            PlacementStatus::Placed,
            PlacementStatus::HighlyPlaced,
        ] {
            assert_eq!(status.label().parse::<PlacementStatus>().unwrap(), status);
        }
        assert_eq!(PlacementStatus::Placed.display_label(), "PLACED ✅");
    }

    #[test]
    fn profile_json_uses_display_names_for_categories() {
        let json = r#"{
            "student_id": "S1",
            "student_name": "Avery Lee",
            "branch": "MECHANICAL",
            "cgpa": 7.2,
            "communication_skill": 6,
            "aptitude_skill": 5,
            "problem_solving": 5,
            "internship_type": "Mid-size Company",
            "certification_level": "Advanced",
            "technical_skills": ["AutoCAD"],
            "tools_known": ["ANSYS"]
        }"#;
        let profile: StudentProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.branch, Branch::Mechanical);
        assert_eq!(profile.internship_type, InternshipType::MidSize);
        assert_eq!(profile.coding_skill, 0);
    }

    #[test]
    fn profile_json_drops_blank_skill_and_tool_entries() {
        let json = r#"{
            "student_id": "S2",
            "student_name": "Rin Takeda",
            "branch": "Civil",
            "cgpa": 7.0,
            "communication_skill": 6,
            "aptitude_skill": 5,
            "problem_solving": 5,
            "technical_skills": ["  ", " STAAD Pro "],
            "tools_known": [""]
        }"#;
        let profile: StudentProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.technical_skills, vec!["STAAD Pro"]);
        assert!(profile.tools_known.is_empty());
        assert_eq!(known_tokens(&["".to_string(), " Git ".to_string()]), 1);
    }

    #[test]
    fn profile_json_parses_categories_like_csv_cells() {
        let json = r#"{
            "student_id": "S3",
            "student_name": "Noor Haddad",
            "branch": "cse",
            "cgpa": 8.0,
            "communication_skill": 6,
            "aptitude_skill": 6,
            "problem_solving": 6,
            "internship_type": "mnc",
            "certification_level": "advanced"
        }"#;
        let profile: StudentProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.branch, Branch::Cse);
        assert_eq!(profile.internship_type, InternshipType::Mnc);
        assert_eq!(profile.certification_level, CertificationLevel::Advanced);

        let electrical: Branch = serde_json::from_str(r#""Electrical""#).unwrap();
        assert_eq!(electrical, Branch::Eee);

        let err = serde_json::from_str::<Branch>(r#""Aerospace""#).unwrap_err();
        assert!(err.to_string().contains("Aerospace"));
        let err = serde_json::from_str::<InternshipType>(r#""MNCs""#).unwrap_err();
        assert!(err.to_string().contains("MNCs"));
    }

    #[test]
    fn serialized_categories_parse_back() {
        for branch in Branch::ALL {
            let json = serde_json::to_string(&branch).unwrap();
            assert_eq!(serde_json::from_str::<Branch>(&json).unwrap(), branch);
        }
        let json = serde_json::to_string(&InternshipType::MidSize).unwrap();
        assert_eq!(json, r#""Mid-size Company""#);
        assert_eq!(
            serde_json::from_str::<InternshipType>(&json).unwrap(),
            InternshipType::MidSize
        );
    }
}
