use crate::models::PipelineEvent;
use crate::output::RecordWriter;
use crate::source::KnowledgeBase;
use career_timeline::{build_career, BigClubs, CareerRecord, RawStint, SelfContainment};
use chrono::Utc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Per-player pipeline: resolve a name, fetch its stints, classify and score.
///
/// Every failure is contained to the player being processed.
pub struct CareerPipeline<K: KnowledgeBase> {
    source: K,
    big_clubs: BigClubs,
    policy: SelfContainment,
}

/// Outcome of a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub events: Vec<PipelineEvent>,
}

impl BatchSummary {
    pub fn saved(&self) -> usize {
        self.events.iter().filter(|e| matches!(e, PipelineEvent::Saved { .. })).count()
    }

    pub fn unresolved(&self) -> usize {
        self.events.iter().filter(|e| matches!(e, PipelineEvent::Unresolved { .. })).count()
    }

    pub fn write_failures(&self) -> usize {
        self.events.iter().filter(|e| matches!(e, PipelineEvent::WriteFailed { .. })).count()
    }
}

impl<K: KnowledgeBase> CareerPipeline<K> {
    pub fn new(source: K, big_clubs: BigClubs, policy: SelfContainment) -> Self {
        Self { source, big_clubs, policy }
    }

    /// Resolve `name` to an entity id; lookup failures count as not found
    pub async fn resolve(&self, name: &str) -> Option<String> {
        match self.source.search_entity(name).await {
            Ok(Some(id)) => Some(id),
            Ok(None) => {
                warn!("Could not find Wikidata ID for {}", name);
                None
            }
            Err(e) => {
                warn!("Entity search failed for '{}': {}", name, e);
                None
            }
        }
    }

    /// Raw stints for `entity_id`; a failed query yields an empty career
    pub async fn fetch_stints(&self, entity_id: &str) -> Vec<RawStint> {
        match self.source.query_stints(entity_id).await {
            Ok(stints) => stints,
            Err(e) => {
                warn!("Career query failed for {}: {}", entity_id, e);
                Vec::new()
            }
        }
    }

    /// Build the career record for one name, or `None` if it does not resolve
    pub async fn build_record(&self, name: &str) -> Option<CareerRecord> {
        let id = self.resolve(name).await?;
        info!("Found {} → {}", name, id);

        let stints = self.fetch_stints(&id).await;
        Some(build_career(id, name, &stints, self.policy, &self.big_clubs))
    }

    /// Process and write one player
    pub async fn process(&self, name: &str, writer: &RecordWriter) -> PipelineEvent {
        let Some(record) = self.build_record(name).await else {
            return PipelineEvent::Unresolved { name: name.to_string(), timestamp: Utc::now() };
        };

        match writer.write(&record) {
            Ok(path) => {
                info!(
                    "Saved {} → {:?} (Difficulty: {}, {} stints)",
                    name,
                    path,
                    record.difficulty.level,
                    record.career.len()
                );
                PipelineEvent::Saved {
                    name: record.name,
                    id: record.id,
                    path,
                    stints: record.career.len(),
                    level: record.difficulty.level,
                    timestamp: Utc::now(),
                }
            }
            Err(e) => {
                error!("Failed to save {}: {:#}", name, e);
                PipelineEvent::WriteFailed {
                    name: record.name,
                    id: record.id,
                    error: format!("{e:#}"),
                    timestamp: Utc::now(),
                }
            }
        }
    }

    /// Process every name in order, pausing `delay` between players
    pub async fn run_batch(
        &self,
        names: &[String],
        writer: &RecordWriter,
        delay: Duration,
    ) -> BatchSummary {
        info!("Loaded {} players", names.len());

        let mut summary = BatchSummary::default();
        for (i, name) in names.iter().enumerate() {
            if i > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            summary.events.push(self.process(name, writer).await);
        }

        info!(
            "Batch complete: {} saved, {} unresolved, {} write failures",
            summary.saved(),
            summary.unresolved(),
            summary.write_failures()
        );
        summary
    }
}
