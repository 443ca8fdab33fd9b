//! Candidate pool: paginated fetch and nationality-balanced selection

use crate::config::{RetryConfig, SamplerConfig};
use crate::models::CandidatePlayer;
use crate::retry::run_with_retry;
use crate::source::KnowledgeBase;
use std::collections::HashMap;
use tracing::{info, warn};

/// Why pagination stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `total_limit` candidates were requested
    LimitReached,
    /// A page came back shorter than requested
    EndOfData,
    /// Every attempt for the page at `offset` failed
    RetriesExhausted { offset: usize },
}

/// Result of a paginated fetch
#[derive(Debug, Clone)]
pub struct PoolReport {
    /// Everything fetched, in page order
    pub candidates: Vec<CandidatePlayer>,
    /// Pages successfully fetched
    pub pages: usize,
    pub stop: StopReason,
}

impl PoolReport {
    /// Whether pagination ended early because of failures
    pub fn is_partial(&self) -> bool {
        matches!(self.stop, StopReason::RetriesExhausted { .. })
    }
}

/// Builds the candidate pool from a knowledge base
pub struct CandidateSampler<'a, K: KnowledgeBase + ?Sized> {
    source: &'a K,
    config: &'a SamplerConfig,
    retry: &'a RetryConfig,
}

impl<'a, K: KnowledgeBase + ?Sized> CandidateSampler<'a, K> {
    pub fn new(source: &'a K, config: &'a SamplerConfig, retry: &'a RetryConfig) -> Self {
        Self { source, config, retry }
    }

    /// Fetch up to `total_limit` candidates page by page.
    ///
    /// A page is retried with backoff; if it still fails, pagination stops
    /// and whatever was already fetched is returned.
    pub async fn fetch_paginated(&self) -> PoolReport {
        let total_limit = self.config.total_limit;
        let page_size = self.config.page_size.max(1);

        let mut candidates = Vec::new();
        let mut offset = 0;
        let mut pages = 0;

        while offset < total_limit {
            let limit = page_size.min(total_limit - offset);
            let label = format!("Candidate page at offset {offset}");

            let page = run_with_retry(&label, self.retry, || {
                self.source.query_candidates(&self.config.query, limit, offset)
            })
            .await;

            let page = match page {
                Ok(page) => page,
                Err(e) => {
                    warn!(
                        "Failed to fetch players at offset {}: {}. Stopping pagination with {} candidates",
                        offset,
                        e,
                        candidates.len()
                    );
                    let stop = StopReason::RetriesExhausted { offset };
                    return PoolReport { candidates, pages, stop };
                }
            };

            pages += 1;
            let received = page.len();
            candidates.extend(page);

            if received < limit {
                info!(
                    "Page at offset {} returned {} of {}; no more results",
                    offset, received, limit
                );
                return PoolReport { candidates, pages, stop: StopReason::EndOfData };
            }

            offset += limit;
        }

        PoolReport { candidates, pages, stop: StopReason::LimitReached }
    }

    /// Fetch, then apply the per-nationality cap
    pub async fn build_pool(&self) -> (Vec<CandidatePlayer>, PoolReport) {
        let report = self.fetch_paginated().await;
        let pool = select_diverse(report.candidates.clone(), self.config.max_per_nationality);

        info!(
            "Selected {} of {} candidates (max {} per nationality)",
            pool.len(),
            report.candidates.len(),
            self.config.max_per_nationality
        );

        (pool, report)
    }
}

/// Keep the `max_per_nationality` most popular candidates of each
/// nationality, then order the survivors by popularity, descending.
///
/// Both sorts are stable: ties keep fetch order within a nationality, and
/// nationalities in first-seen order.
pub fn select_diverse(
    candidates: Vec<CandidatePlayer>,
    max_per_nationality: usize,
) -> Vec<CandidatePlayer> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<CandidatePlayer>> = Vec::new();

    for candidate in candidates {
        let slot = *index.entry(candidate.nationality.clone()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(candidate);
    }

    let mut selected: Vec<CandidatePlayer> = groups
        .into_iter()
        .flat_map(|mut group| {
            group.sort_by(|a, b| b.popularity.cmp(&a.popularity));
            group.truncate(max_per_nationality);
            group
        })
        .collect();

    selected.sort_by(|a, b| b.popularity.cmp(&a.popularity));
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SourceError, SourceResult};
    use crate::models::CandidateQuery;
    use career_timeline::RawStint;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Serves scripted pages and records every request
    #[derive(Default)]
    struct ScriptedPages {
        pages: Mutex<VecDeque<SourceResult<Vec<CandidatePlayer>>>>,
        requests: Mutex<Vec<(usize, usize)>>,
    }

    impl ScriptedPages {
        fn new(pages: Vec<SourceResult<Vec<CandidatePlayer>>>) -> Self {
            Self { pages: Mutex::new(pages.into()), requests: Mutex::default() }
        }

        fn requests(&self) -> Vec<(usize, usize)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl KnowledgeBase for ScriptedPages {
        async fn search_entity(&self, _name: &str) -> SourceResult<Option<String>> {
            Ok(None)
        }

        async fn query_stints(&self, _entity_id: &str) -> SourceResult<Vec<RawStint>> {
            Ok(Vec::new())
        }

        async fn query_candidates(
            &self,
            _query: &CandidateQuery,
            limit: usize,
            offset: usize,
        ) -> SourceResult<Vec<CandidatePlayer>> {
            self.requests.lock().unwrap().push((limit, offset));
            self.pages.lock().unwrap().pop_front().unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn page(prefix: &str, count: usize) -> Vec<CandidatePlayer> {
        (0..count)
            .map(|i| CandidatePlayer::new(format!("{prefix}{i}"), "Spain", 100 - i as u64))
            .collect()
    }

    fn unavailable() -> SourceResult<Vec<CandidatePlayer>> {
        Err(SourceError::status("sparql", 503))
    }

    fn sampler_config(total_limit: usize, page_size: usize) -> SamplerConfig {
        SamplerConfig { total_limit, page_size, ..SamplerConfig::default() }
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_page_returns_accumulated() {
        let source =
            ScriptedPages::new(vec![Ok(page("a", 2)), unavailable(), unavailable(), unavailable()]);
        let config = sampler_config(10, 2);
        let retry = RetryConfig::default();

        let report = CandidateSampler::new(&source, &config, &retry).fetch_paginated().await;

        assert_eq!(report.candidates, page("a", 2));
        assert_eq!(report.pages, 1);
        assert_eq!(report.stop, StopReason::RetriesExhausted { offset: 2 });
        assert!(report.is_partial());
        // same page retried three times
        assert_eq!(source.requests(), vec![(2, 0), (2, 2), (2, 2), (2, 2)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failure_retries_same_page() {
        let source = ScriptedPages::new(vec![unavailable(), Ok(page("a", 2)), Ok(page("b", 1))]);
        let config = sampler_config(10, 2);
        let retry = RetryConfig::default();

        let report = CandidateSampler::new(&source, &config, &retry).fetch_paginated().await;

        assert_eq!(report.candidates.len(), 3);
        assert_eq!(report.stop, StopReason::EndOfData);
        assert_eq!(source.requests(), vec![(2, 0), (2, 0), (2, 2)]);
    }

    #[tokio::test]
    async fn test_last_page_is_trimmed_to_limit() {
        let source = ScriptedPages::new(vec![Ok(page("a", 4)), Ok(page("b", 4)), Ok(page("c", 2))]);
        let config = sampler_config(10, 4);
        let retry = RetryConfig::default();

        let report = CandidateSampler::new(&source, &config, &retry).fetch_paginated().await;

        assert_eq!(report.candidates.len(), 10);
        assert_eq!(report.pages, 3);
        assert_eq!(report.stop, StopReason::LimitReached);
        assert_eq!(source.requests(), vec![(4, 0), (4, 4), (2, 8)]);
    }

    #[tokio::test]
    async fn test_zero_limit_makes_no_requests() {
        let source = ScriptedPages::new(Vec::new());
        let config = sampler_config(0, 500);
        let retry = RetryConfig::default();

        let report = CandidateSampler::new(&source, &config, &retry).fetch_paginated().await;
        assert!(report.candidates.is_empty());
        assert!(source.requests().is_empty());
    }

    #[test]
    fn test_diversity_cap_keeps_top_of_group() {
        let mut candidates = vec![
            CandidatePlayer::new("b1", "Brazil", 40),
            CandidatePlayer::new("b2", "Brazil", 90),
            CandidatePlayer::new("b3", "Brazil", 10),
            CandidatePlayer::new("b4", "Brazil", 70),
            CandidatePlayer::new("b5", "Brazil", 55),
        ];
        candidates.push(CandidatePlayer::new("n1", "Norway", 60));

        let selected = select_diverse(candidates, 2);
        let names: Vec<_> = selected.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["b2", "b4", "n1"]);
    }

    #[test]
    fn test_diversity_orders_globally_and_keeps_ties_stable() {
        let candidates = vec![
            CandidatePlayer::new("fr", "France", 50),
            CandidatePlayer::new("es", "Spain", 80),
            CandidatePlayer::new("unknown", "Unknown", 50),
            CandidatePlayer::new("es2", "Spain", 20),
        ];

        let selected = select_diverse(candidates, 100);
        let names: Vec<_> = selected.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["es", "fr", "unknown", "es2"]);
    }

    #[tokio::test]
    async fn test_build_pool_applies_cap() {
        let source = ScriptedPages::new(vec![Ok(page("a", 5))]);
        let config = SamplerConfig { max_per_nationality: 3, ..sampler_config(10, 5) };
        let retry = RetryConfig::default();

        let (pool, report) = CandidateSampler::new(&source, &config, &retry).build_pool().await;
        assert_eq!(report.candidates.len(), 5);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool[0].name, "a0");
    }
}
