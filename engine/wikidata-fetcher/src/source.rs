//! Knowledge-base abstraction
//!
//! The pipeline and sampler only talk to this trait. [`WikidataClient`]
//! is the production implementation; tests use in-memory ones.
//!
//! [`WikidataClient`]: crate::fetcher::WikidataClient

use career_timeline::RawStint;

use crate::error::SourceResult;
use crate::models::{CandidatePlayer, CandidateQuery};

#[async_trait::async_trait]
pub trait KnowledgeBase: Send + Sync {
    /// Resolve a display name to the best-matching entity identifier
    async fn search_entity(&self, name: &str) -> SourceResult<Option<String>>;

    /// Club membership records for one entity, national teams excluded
    async fn query_stints(&self, entity_id: &str) -> SourceResult<Vec<RawStint>>;

    /// One page of candidates matching `query`
    async fn query_candidates(
        &self,
        query: &CandidateQuery,
        limit: usize,
        offset: usize,
    ) -> SourceResult<Vec<CandidatePlayer>>;
}
