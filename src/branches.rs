use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::Branch;

/// Static reference data for one branch. `companies` is ordered best-first;
/// tiers are carved out of it by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchConfig {
    pub branch: Branch,
    pub coding_required: bool,
    #[serde(default)]
    pub technical_skills: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub companies: Vec<String>,
    #[serde(default)]
    pub career_paths: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchCatalog {
    branches: Vec<BranchConfig>,
}

impl BranchCatalog {
    pub fn new(branches: Vec<BranchConfig>) -> Self {
        Self { branches }
    }

    /// Parses a catalog from a JSON array of branch entries. Later entries
    /// for the same branch replace earlier ones.
    pub fn from_json(raw: &str) -> Result<Self, EngineError> {
        let entries: Vec<BranchConfig> = serde_json::from_str(raw)?;
        let mut catalog = Self::new(Vec::with_capacity(entries.len()));
        for entry in entries {
            catalog.upsert(entry);
        }
        Ok(catalog)
    }

    pub fn get(&self, branch: Branch) -> Option<&BranchConfig> {
        self.branches.iter().find(|config| config.branch == branch)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BranchConfig> {
        self.branches.iter()
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    fn upsert(&mut self, entry: BranchConfig) {
        match self.branches.iter_mut().find(|c| c.branch == entry.branch) {
            Some(existing) => *existing = entry,
            None => self.branches.push(entry),
        }
    }

    /// Catalog used by the interactive dashboard.
    pub fn standard() -> Self {
        Self::new(vec![
            entry(
                Branch::Cse,
                true,
                &[
                    "Python",
                    "Java",
                    "C++",
                    "JavaScript",
                    "SQL",
                    "Data Structures",
                    "Algorithms",
                    "Machine Learning",
                    "Web Development",
                    "Mobile Development",
                ],
                &[
                    "VS Code", "IntelliJ", "Git", "Docker", "AWS", "MySQL", "MongoDB", "React",
                    "Node.js", "TensorFlow",
                ],
                &[
                    "Google",
                    "Microsoft",
                    "Amazon",
                    "Meta",
                    "Adobe",
                    "Oracle",
                    "Intel",
                    "Cisco",
                    "TCS",
                    "Infosys",
                    "Wipro",
                    "Accenture",
                ],
                &[
                    "Software Engineer",
                    "Data Scientist",
                    "ML Engineer",
                    "DevOps Engineer",
                    "Cloud Architect",
                    "Full Stack Developer",
                ],
            ),
            entry(
                Branch::Ece,
                true,
                &[
                    "Embedded Systems",
                    "VLSI",
                    "Digital Signal Processing",
                    "PCB Design",
                    "MATLAB",
                    "Verilog",
                    "VHDL",
                    "IoT",
                    "ARM Cortex",
                ],
                &[
                    "Cadence",
                    "Xilinx",
                    "Multisim",
                    "Keil",
                    "Arduino",
                    "Raspberry Pi",
                    "Oscilloscope",
                    "Logic Analyzer",
                ],
                &[
                    "Intel",
                    "Qualcomm",
                    "Texas Instruments",
                    "Samsung",
                    "Broadcom",
                    "NVIDIA",
                    "AMD",
                    "Huawei",
                    "Ericsson",
                ],
                &[
                    "VLSI Engineer",
                    "Embedded Engineer",
                    "Hardware Engineer",
                    "RF Engineer",
                    "Signal Processing Engineer",
                ],
            ),
            entry(
                Branch::Mechanical,
                false,
                &[
                    "AutoCAD",
                    "CATIA",
                    "SolidWorks",
                    "ANSYS",
                    "Finite Element Analysis",
                    "Thermodynamics",
                    "Fluid Mechanics",
                    "Manufacturing Processes",
                ],
                &[
                    "SolidWorks",
                    "CATIA",
                    "ANSYS",
                    "AutoCAD",
                    "MATLAB",
                    "3D Printer",
                    "CNC Machines",
                ],
                &[
                    "TATA Motors",
                    "Mahindra",
                    "Bosch",
                    "Schneider Electric",
                    "Siemens",
                    "General Electric",
                    "John Deere",
                ],
                &MECHANICAL_CAREERS,
            ),
            entry(
                Branch::Civil,
                false,
                &[
                    "AutoCAD Civil",
                    "STAAD Pro",
                    "ETABS",
                    "Primavera",
                    "Construction Management",
                    "Structural Analysis",
                    "Surveying",
                ],
                &[
                    "AutoCAD Civil 3D",
                    "STAAD Pro",
                    "ETABS",
                    "Primavera P6",
                    "MS Project",
                    "ArcGIS",
                ],
                &["L&T", "Shapoorji Pallonji", "GMR", "DLF", "Jacobs", "AECOM"],
                &CIVIL_CAREERS,
            ),
            entry(
                Branch::Eee,
                false,
                &[
                    "Power Systems",
                    "Control Systems",
                    "Electrical Machines",
                    "Renewable Energy",
                    "PLC Programming",
                    "SCADA",
                ],
                &[
                    "MATLAB Simulink",
                    "ETAP",
                    "LabVIEW",
                    "AutoCAD Electrical",
                    "PowerWorld",
                ],
                &[
                    "Siemens",
                    "ABB",
                    "Schneider Electric",
                    "BHEL",
                    "NTPC",
                    "Power Grid Corporation",
                ],
                &EEE_CAREERS,
            ),
            entry(
                Branch::Other,
                false,
                &[
                    "MS Office",
                    "Communication",
                    "Project Management",
                    "Analytical Skills",
                ],
                &[
                    "MS Office Suite",
                    "Google Workspace",
                    "Project Management Tools",
                ],
                &[
                    "Various MNCs",
                    "Startups",
                    "Government Sector",
                    "Public Sector Units",
                ],
                &OTHER_CAREERS,
            ),
        ])
    }

    /// Catalog used by the command-line registration flow. Career paths are
    /// shared with the standard table since this flow never listed its own.
    pub fn compact() -> Self {
        let standard = Self::standard();
        let careers = |branch: Branch| -> Vec<String> {
            standard
                .get(branch)
                .map(|config| config.career_paths.clone())
                .unwrap_or_default()
        };

        let mut branches = vec![
            entry(
                Branch::Cse,
                true,
                &["Python", "Java", "C++", "SQL", "ML", "Data Analytics"],
                &["Git", "AWS", "Docker", "Linux", "Jupyter Notebook"],
                &["Google", "Microsoft", "Amazon", "TCS", "Infosys"],
                &[],
            ),
            entry(
                Branch::Ece,
                true,
                &[
                    "Embedded C",
                    "VHDL",
                    "MATLAB",
                    "Python",
                    "Arduino",
                    "PCB Design",
                ],
                &[
                    "Oscilloscope",
                    "Multimeter",
                    "PCB Etching Tools",
                    "Proteus",
                    "Arduino IDE",
                ],
                &["Qualcomm", "Intel", "Texas Instruments", "TCS", "Infosys"],
                &[],
            ),
            entry(
                Branch::Mechanical,
                false,
                &["AutoCAD", "SolidWorks", "ANSYS", "MATLAB", "CATIA"],
                &["SolidWorks", "ANSYS", "MATLAB", "CATIA", "MS Excel"],
                &["L&T", "Siemens", "TATA Motors", "Mahindra", "Bosch"],
                &[],
            ),
            entry(
                Branch::Civil,
                false,
                &[
                    "AutoCAD Civil 3D",
                    "STAAD.Pro",
                    "Revit",
                    "ETABS",
                    "MS Project",
                ],
                &[
                    "AutoCAD",
                    "STAAD.Pro",
                    "MS Project",
                    "Revit",
                    "Surveying Tools",
                ],
                &[
                    "L&T",
                    "Reliance Infrastructure",
                    "Shapoorji Pallonji",
                    "Afcons",
                ],
                &[],
            ),
            entry(
                Branch::Eee,
                false,
                &["MATLAB", "Proteus", "ETAP", "Power Systems", "PLC"],
                &["MATLAB", "Simulink", "Proteus", "ETAP", "Multimeter"],
                &["Siemens", "ABB", "BHEL", "GE Power", "TCS"],
                &[],
            ),
            entry(
                Branch::Other,
                false,
                &["Generic Skill 1", "Generic Skill 2"],
                &["Generic Tool 1", "Generic Tool 2"],
                &["Generic Company A", "Generic Company B"],
                &[],
            ),
        ];

        for config in &mut branches {
            config.career_paths = careers(config.branch);
        }

        Self::new(branches)
    }
}

const MECHANICAL_CAREERS: [&str; 5] = [
    "Design Engineer",
    "Production Engineer",
    "Quality Engineer",
    "R&D Engineer",
    "Project Manager",
];

const CIVIL_CAREERS: [&str; 5] = [
    "Structural Engineer",
    "Site Engineer",
    "Planning Engineer",
    "Quantity Surveyor",
    "Project Coordinator",
];

const EEE_CAREERS: [&str; 4] = [
    "Power Systems Engineer",
    "Control Engineer",
    "Electrical Design Engineer",
    "Field Service Engineer",
];

const OTHER_CAREERS: [&str; 4] = [
    "Management Trainee",
    "Business Analyst",
    "Operations Executive",
    "Administrative Roles",
];

fn entry(
    branch: Branch,
    coding_required: bool,
    technical_skills: &[&str],
    tools: &[&str],
    companies: &[&str],
    career_paths: &[&str],
) -> BranchConfig {
    let owned = |items: &[&str]| items.iter().map(|item| item.to_string()).collect();
    BranchConfig {
        branch,
        coding_required,
        technical_skills: owned(technical_skills),
        tools: owned(tools),
        companies: owned(companies),
        career_paths: owned(career_paths),
    }
}

/// A catalog that can be swapped while predictions are running. Readers hold
/// an `Arc` snapshot for the whole call, so a replacement never shows up
/// half-applied.
#[derive(Debug)]
pub struct SharedCatalog {
    current: RwLock<Arc<BranchCatalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: BranchCatalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    pub fn snapshot(&self) -> Arc<BranchCatalog> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&*guard),
            Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
        }
    }

    pub fn replace(&self, catalog: BranchCatalog) -> Arc<BranchCatalog> {
        let next = Arc::new(catalog);
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::replace(&mut *guard, next)
    }
}
