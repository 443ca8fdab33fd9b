//! # Command Line Interface
//!
//! `candidates` builds the player pool, `careers` writes one record per
//! player, `show` prints a single record.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::FetcherConfig;
use crate::fetcher::WikidataClient;
use crate::output::{read_names, to_pretty_json, write_names, RecordWriter};
use crate::pipeline::CareerPipeline;
use crate::sampler::CandidateSampler;

/// Career fetcher for the player guessing game
#[derive(Parser)]
#[command(name = "career-fetcher")]
#[command(about = "Builds the candidate pool and career records for the player quiz")]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch notable players and write a nationality-balanced name list
    Candidates {
        /// Maximum number of players to fetch
        #[arg(long)]
        total_limit: Option<usize>,
        /// Players requested per page
        #[arg(long)]
        page_size: Option<usize>,
        /// Cap per nationality
        #[arg(long)]
        max_per_nationality: Option<usize>,
        /// Output file for the names
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Build a career record for every name in a list
    Careers {
        /// Input names file, one per line
        #[arg(long)]
        names: Option<PathBuf>,
        /// Directory for the JSON records
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Print the career record for one player
    Show {
        /// Player name as it would appear in the names file
        name: String,
    },
}

impl Commands {
    /// Fold command-line overrides into the loaded configuration
    pub fn apply_overrides(&self, config: &mut FetcherConfig) {
        match self {
            Commands::Candidates { total_limit, page_size, max_per_nationality, out } => {
                if let Some(total_limit) = total_limit {
                    config.sampler.total_limit = *total_limit;
                }
                if let Some(page_size) = page_size {
                    config.sampler.page_size = *page_size;
                }
                if let Some(max) = max_per_nationality {
                    config.sampler.max_per_nationality = *max;
                }
                if let Some(out) = out {
                    config.sampler.output_file = out.clone();
                }
            }
            Commands::Careers { names, out_dir } => {
                if let Some(names) = names {
                    config.pipeline.names_file = names.clone();
                }
                if let Some(out_dir) = out_dir {
                    config.pipeline.output_dir = out_dir.clone();
                }
            }
            Commands::Show { .. } => {}
        }
    }
}

/// CLI handler
pub struct CliHandler {
    config: FetcherConfig,
    client: WikidataClient,
}

impl CliHandler {
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let client = WikidataClient::new(config.wikidata.clone())?;
        Ok(Self { config, client })
    }

    pub async fn handle_command(self, command: Commands) -> Result<()> {
        match command {
            Commands::Candidates { .. } => self.candidates().await,
            Commands::Careers { .. } => self.careers().await,
            Commands::Show { name } => self.show(&name).await,
        }
    }

    async fn candidates(&self) -> Result<()> {
        info!("Querying Wikidata for notable football players...");

        let sampler = CandidateSampler::new(&self.client, &self.config.sampler, &self.config.retry);
        let (pool, report) = sampler.build_pool().await;

        if report.candidates.is_empty() {
            warn!("No players fetched from Wikidata");
            return Ok(());
        }
        if report.is_partial() {
            warn!("Candidate pool is partial: {:?}", report.stop);
        }

        for candidate in pool.iter().take(20) {
            info!(
                "  - {} ({}, {} sitelinks)",
                candidate.name, candidate.nationality, candidate.popularity
            );
        }

        write_names(&self.config.sampler.output_file, &pool)?;
        info!("Player names saved to {:?}", self.config.sampler.output_file);
        Ok(())
    }

    async fn careers(self) -> Result<()> {
        let names = read_names(&self.config.pipeline.names_file)?;
        let writer = RecordWriter::new(&self.config.pipeline.output_dir);
        let delay = self.config.pipeline.politeness_delay();

        let pipeline = CareerPipeline::new(
            self.client,
            self.config.scoring.big_clubs(),
            self.config.pipeline.self_containment(),
        );
        pipeline.run_batch(&names, &writer, delay).await;
        Ok(())
    }

    async fn show(self, name: &str) -> Result<()> {
        let pipeline = CareerPipeline::new(
            self.client,
            self.config.scoring.big_clubs(),
            self.config.pipeline.self_containment(),
        );

        let record = pipeline
            .build_record(name)
            .await
            .with_context(|| format!("No Wikidata entity found for {name:?}"))?;

        println!("{}", to_pretty_json(&record)?);
        Ok(())
    }
}
