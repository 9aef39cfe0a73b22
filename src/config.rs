use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::branches::BranchCatalog;
use crate::error::EngineError;
use crate::profile::ScoringKind;

/// Top-level configuration for the CLI.
#[derive(Debug, Clone)]
pub struct AppConfig {
    database_url: Option<String>,
    pub max_connections: u32,
    pub scoring: ScoringKind,
    pub branches_file: Option<PathBuf>,
    pub telemetry: TelemetryConfig,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DATABASE_URL must be set to a Postgres instance for this command")]
    MissingDatabaseUrl,

    #[error("PLACEMENT_DB_MAX_CONNECTIONS must be a positive integer, got '{0}'")]
    InvalidMaxConnections(String),

    #[error("PLACEMENT_SCORING must be 'standard' or 'compact', got '{0}'")]
    InvalidScoring(String),

    #[error("unable to read branch catalog {path}")]
    CatalogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Catalog(#[from] EngineError),
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let max_connections = match lookup("PLACEMENT_DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|value| *value > 0)
                .ok_or(ConfigError::InvalidMaxConnections(raw))?,
            None => 5,
        };

        let scoring = match lookup("PLACEMENT_SCORING") {
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "standard" => ScoringKind::Standard,
                "compact" => ScoringKind::Compact,
                _ => return Err(ConfigError::InvalidScoring(raw)),
            },
            None => ScoringKind::default(),
        };

        let branches_file = lookup("PLACEMENT_BRANCHES_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let log_level = lookup("PLACEMENT_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            database_url,
            max_connections,
            scoring,
            branches_file,
            telemetry: TelemetryConfig { log_level },
        })
    }

    pub fn database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or(ConfigError::MissingDatabaseUrl)
    }

    /// Branch catalog for a scoring kind: the configured file when present,
    /// the built-in table otherwise.
    pub fn catalog(&self, kind: ScoringKind) -> Result<BranchCatalog, ConfigError> {
        let Some(path) = &self.branches_file else {
            return Ok(kind.catalog());
        };
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::CatalogFile {
            path: path.clone(),
            source,
        })?;
        Ok(BranchCatalog::from_json(&raw)?)
    }
}
