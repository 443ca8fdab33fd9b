use anyhow::{Context, Result};
use career_timeline::difficulty::DEFAULT_BIG_CLUBS;
use career_timeline::{BigClubs, SelfContainment};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::CandidateQuery;

/// Prefix for environment overrides, e.g. `CAREER_SAMPLER__PAGE_SIZE=250`
pub const ENV_PREFIX: &str = "CAREER";

/// Configuration for the career fetcher
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Wikidata endpoints and request settings
    pub wikidata: WikidataConfig,

    /// Candidate pool settings
    pub sampler: SamplerConfig,

    /// Retry configuration for paginated queries
    pub retry: RetryConfig,

    /// Per-player pipeline settings
    pub pipeline: PipelineConfig,

    /// Difficulty scoring settings
    pub scoring: ScoringConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WikidataConfig {
    /// Entity search API (wbsearchentities)
    pub search_url: String,

    /// SPARQL query endpoint
    pub sparql_url: String,

    /// User-Agent sent with every request
    pub user_agent: String,

    /// Label and search language
    pub language: String,

    /// Timeout for name searches in seconds
    pub search_timeout_secs: u64,

    /// Timeout for per-player career queries in seconds
    pub stint_timeout_secs: u64,

    /// Timeout for candidate pool pages in seconds
    pub bulk_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Maximum number of candidates to fetch
    pub total_limit: usize,

    /// Candidates requested per page
    pub page_size: usize,

    /// Cap per nationality in the final pool
    pub max_per_nationality: usize,

    /// Where the candidate names are written
    pub output_file: PathBuf,

    /// Bulk query constraints
    pub query: CandidateQuery,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of attempts per request
    pub max_retries: u32,

    /// Initial retry delay in seconds
    pub initial_delay_secs: u64,

    /// Maximum retry delay in seconds
    pub max_delay_secs: u64,

    /// Backoff multiplier
    pub backoff_multiplier: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Input list of player names, one per line
    pub names_file: PathBuf,

    /// Directory receiving one JSON file per player
    pub output_dir: PathBuf,

    /// Pause between players in milliseconds
    pub politeness_delay_ms: u64,

    /// Let a club's own first spell mark its later spells as loans
    pub self_containment: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Clubs that make a career easier to guess
    pub big_clubs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, pretty)
    pub format: String,
}

impl Default for WikidataConfig {
    fn default() -> Self {
        Self {
            search_url: "https://www.wikidata.org/w/api.php".to_string(),
            sparql_url: "https://query.wikidata.org/sparql".to_string(),
            user_agent: concat!("PlayerCareerQuiz/", env!("CARGO_PKG_VERSION")).to_string(),
            language: "en".to_string(),
            search_timeout_secs: 15,
            stint_timeout_secs: 20,
            bulk_timeout_secs: 30,
        }
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            total_limit: 5000,
            page_size: 500,
            max_per_nationality: 100,
            output_file: PathBuf::from("notable_players.txt"),
            query: CandidateQuery::default(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self { max_retries: 3, initial_delay_secs: 5, max_delay_secs: 300, backoff_multiplier: 2.0 }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            names_file: PathBuf::from("player_names.txt"),
            output_dir: PathBuf::from("player_data"),
            politeness_delay_ms: 1000,
            self_containment: true,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self { big_clubs: DEFAULT_BIG_CLUBS.iter().map(|club| club.to_string()).collect() }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "pretty".to_string() }
    }
}

impl RetryConfig {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_secs(self.initial_delay_secs)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_secs(self.max_delay_secs)
    }

    /// Delay following `delay`, capped at `max_delay`
    pub fn next_delay(&self, delay: Duration) -> Duration {
        let next = delay.as_secs_f64() * self.backoff_multiplier;
        Duration::from_secs_f64(next.min(self.max_delay().as_secs_f64()))
    }
}

impl WikidataConfig {
    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    pub fn stint_timeout(&self) -> Duration {
        Duration::from_secs(self.stint_timeout_secs)
    }

    pub fn bulk_timeout(&self) -> Duration {
        Duration::from_secs(self.bulk_timeout_secs)
    }
}

impl PipelineConfig {
    pub fn politeness_delay(&self) -> Duration {
        Duration::from_millis(self.politeness_delay_ms)
    }

    pub fn self_containment(&self) -> SelfContainment {
        if self.self_containment {
            SelfContainment::Include
        } else {
            SelfContainment::Exclude
        }
    }
}

impl ScoringConfig {
    pub fn big_clubs(&self) -> BigClubs {
        BigClubs::new(self.big_clubs.iter().cloned())
    }
}

impl FetcherConfig {
    /// Load configuration from defaults, an optional TOML file and
    /// `CAREER_`-prefixed environment variables, in that order.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            tracing::debug!("Loading configuration from file: {:?}", path);
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        settings.try_deserialize().context("Failed to parse configuration")
    }

    /// Defaults plus environment overrides, without a configuration file
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Reject settings the fetcher cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.sampler.page_size == 0 {
            anyhow::bail!("sampler.page_size must be greater than zero");
        }

        if self.sampler.max_per_nationality == 0 {
            anyhow::bail!("sampler.max_per_nationality must be greater than zero");
        }

        if self.retry.max_retries == 0 {
            anyhow::bail!("retry.max_retries must be at least 1");
        }

        if self.retry.backoff_multiplier < 1.0 {
            anyhow::bail!("Invalid backoff multiplier: {}", self.retry.backoff_multiplier);
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Invalid log level: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "json" | "pretty" => {}
            _ => anyhow::bail!("Invalid log format: {}", self.logging.format),
        }

        Ok(())
    }
}
