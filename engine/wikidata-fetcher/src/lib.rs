//! Wikidata Career Fetcher
//!
//! Builds the candidate player pool for the guessing game and produces one
//! career record per player. Network access goes through the
//! [`KnowledgeBase`] trait; the classification and scoring themselves live
//! in the `career-timeline` crate.

pub mod cli;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod logging;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod retry;
pub mod sampler;
pub mod source;

pub use config::FetcherConfig;
pub use error::{SourceError, SourceResult};
pub use fetcher::WikidataClient;
pub use logging::initialize_logging;
pub use models::*;
pub use pipeline::{BatchSummary, CareerPipeline};
pub use retry::run_with_retry;
pub use sampler::{select_diverse, CandidateSampler, PoolReport, StopReason};
pub use source::KnowledgeBase;
