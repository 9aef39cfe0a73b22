use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use placement_readiness::config::AppConfig;
use placement_readiness::models::{Branch, StudentProfile};
use placement_readiness::report;
use placement_readiness::{db, telemetry, BranchCatalog, PlacementEngine, ScoringKind};

#[derive(Parser)]
#[command(name = "placement-readiness")]
#[command(about = "Placement readiness scoring for registered students", long_about = None)]
struct Cli {
    /// Scoring profile; defaults to PLACEMENT_SCORING or `standard`
    #[arg(long, global = true, value_enum)]
    scoring: Option<ScoringKind>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load sample student registrations
    Seed,
    /// Import student registrations from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// List the branch configuration in use
    Branches,
    /// Score a profile from a JSON file without touching the database
    Evaluate {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Score a registered student and record the prediction
    Predict {
        #[arg(long)]
        student_id: String,
        /// Skip writing the prediction log
        #[arg(long)]
        no_save: bool,
        #[arg(long)]
        json: bool,
    },
    /// Rank registered students by readiness
    Score {
        #[arg(long)]
        branch: Option<Branch>,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Show recorded predictions for a student
    History {
        #[arg(long)]
        student_id: String,
        #[arg(long, default_value_t = 10)]
        limit: i64,
    },
    /// Generate a markdown cohort report
    Report {
        #[arg(long)]
        branch: Option<Branch>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load().context("invalid configuration")?;
    telemetry::init(&config.telemetry)?;

    let kind = cli.scoring.unwrap_or(config.scoring);
    let catalog = config.catalog(kind)?;
    let engine = PlacementEngine::for_kind(kind);

    match cli.command {
        Commands::InitDb => {
            let pool = connect(&config).await?;
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            let pool = connect(&config).await?;
            db::seed(&pool).await?;
            println!("Seed data inserted.");
        }
        Commands::Import { csv } => {
            let pool = connect(&config).await?;
            let saved = db::import_csv(&pool, &csv).await?;
            println!("Saved {saved} students from {}.", csv.display());
        }
        Commands::Branches => {
            for branch in catalog.iter() {
                println!(
                    "{} (coding {}): {}",
                    branch.branch,
                    if branch.coding_required {
                        "required"
                    } else {
                        "optional"
                    },
                    branch.companies.join(", ")
                );
            }
        }
        Commands::Evaluate { file, json } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let profile: StudentProfile = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a valid student profile", file.display()))?;
            show_prediction(&engine, &catalog, &profile, json)?;
        }
        Commands::Predict {
            student_id,
            no_save,
            json,
        } => {
            let pool = connect(&config).await?;
            let Some(profile) = db::fetch_student(&pool, &student_id).await? else {
                bail!("student {student_id} is not registered");
            };
            let result = show_prediction(&engine, &catalog, &profile, json)?;
            if !no_save {
                let id = db::record_prediction(&pool, &profile, &result, kind, Utc::now()).await?;
                info!(%id, student_id = %profile.student_id, "prediction saved");
            }
        }
        Commands::Score { branch, limit } => {
            let pool = connect(&config).await?;
            let students = db::fetch_students(&pool, branch).await?;
            let mut scored = Vec::with_capacity(students.len());
            for profile in students {
                let result = engine.predict(&profile, &catalog)?;
                scored.push((profile, result));
            }

            if scored.is_empty() {
                println!("No students registered for this scope.");
                return Ok(());
            }

            scored.sort_by(|a, b| b.1.readiness.cmp(&a.1.readiness));
            println!("Top students by readiness:");
            for (profile, result) in scored.iter().take(limit) {
                println!(
                    "- {} ({}, {}) readiness {} {}",
                    profile.student_name,
                    profile.student_id,
                    profile.branch,
                    result.readiness,
                    result.status.label()
                );
            }
        }
        Commands::History { student_id, limit } => {
            let pool = connect(&config).await?;
            let records = db::fetch_history(&pool, &student_id, limit).await?;
            print!("{}", report::render_history(&records));
        }
        Commands::Report { branch, out } => {
            let pool = connect(&config).await?;
            let students = db::fetch_students(&pool, branch).await?;
            let mut scored = Vec::with_capacity(students.len());
            for profile in students {
                let result = engine.predict(&profile, &catalog)?;
                scored.push((profile, result));
            }
            let content = report::build_report(
                branch.map(Branch::label),
                kind,
                Utc::now(),
                &scored,
            );
            std::fs::write(&out, content)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    let database_url = config.database_url()?;
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(database_url)
        .await
        .context("failed to connect to Postgres")
}

fn show_prediction(
    engine: &PlacementEngine,
    catalog: &BranchCatalog,
    profile: &StudentProfile,
    json: bool,
) -> anyhow::Result<placement_readiness::PredictionResult> {
    let result = engine.predict(profile, catalog)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if let Some(branch) = catalog.get(profile.branch) {
        print!("{}", report::render_dashboard(profile, &result, branch));
    }
    Ok(result)
}
