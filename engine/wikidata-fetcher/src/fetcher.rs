use crate::config::WikidataConfig;
use crate::error::{SourceError, SourceResult};
use crate::models::*;
use crate::source::KnowledgeBase;
use anyhow::{Context, Result};
use career_timeline::RawStint;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

/// Wikidata-backed knowledge base
pub struct WikidataClient {
    config: WikidataConfig,
    client: Client,
}

impl WikidataClient {
    /// Create a new client instance
    pub fn new(config: WikidataConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.bulk_timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { config, client })
    }

    /// Send a GET and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
        accept: &str,
        timeout: Duration,
    ) -> SourceResult<T> {
        let response = self
            .client
            .get(url)
            .query(params)
            .header(ACCEPT, accept)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| SourceError::from_request(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::status(url, status.as_u16()));
        }

        let body = response.text().await.map_err(|e| SourceError::from_request(e, timeout))?;
        serde_json::from_str(&body).map_err(|e| SourceError::decode(url, e))
    }

    /// Run a SPARQL query against the query service
    async fn run_sparql(&self, query: &str, timeout: Duration) -> SourceResult<SparqlResponse> {
        self.get_json(
            &self.config.sparql_url,
            &[("query", query), ("format", "json")],
            "application/sparql-results+json",
            timeout,
        )
        .await
    }
}

/// Whether `id` looks like a Wikidata item identifier (Q followed by digits)
pub fn is_entity_id(id: &str) -> bool {
    id.strip_prefix('Q')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Senior club career of one entity, national teams excluded
pub fn stint_query(entity_id: &str, language: &str) -> String {
    format!(
        r#"SELECT ?clubLabel ?start ?end ?apps ?goals WHERE {{
  wd:{entity_id} p:P54 ?statement.
  ?statement ps:P54 ?club.
  FILTER NOT EXISTS {{ ?club wdt:P31/wdt:P279* wd:Q6979593 }}
  OPTIONAL {{ ?statement pq:P580 ?start. }}
  OPTIONAL {{ ?statement pq:P582 ?end. }}
  OPTIONAL {{ ?statement pq:P1350 ?apps. }}
  OPTIONAL {{ ?statement pq:P1351 ?goals. }}
  SERVICE wikibase:label {{ bd:serviceParam wikibase:language "{language}". }}
}}
ORDER BY ?start
"#
    )
}

#[async_trait::async_trait]
impl KnowledgeBase for WikidataClient {
    async fn search_entity(&self, name: &str) -> SourceResult<Option<String>> {
        debug!("Searching entity for {:?}", name);

        let response: SearchResponse = self
            .get_json(
                &self.config.search_url,
                &[
                    ("action", "wbsearchentities"),
                    ("language", self.config.language.as_str()),
                    ("format", "json"),
                    ("type", "item"),
                    ("search", name),
                ],
                "application/json",
                self.config.search_timeout(),
            )
            .await?;

        Ok(response.search.into_iter().next().map(|hit| hit.id))
    }

    async fn query_stints(&self, entity_id: &str) -> SourceResult<Vec<RawStint>> {
        if !is_entity_id(entity_id) {
            return Err(SourceError::InvalidEntity(entity_id.to_string()));
        }

        let query = stint_query(entity_id, &self.config.language);
        let response = self.run_sparql(&query, self.config.stint_timeout()).await?;
        let stints: Vec<RawStint> =
            response.results.bindings.iter().map(stint_from_binding).collect();

        debug!("Fetched {} stints for {}", stints.len(), entity_id);
        Ok(stints)
    }

    async fn query_candidates(
        &self,
        query: &CandidateQuery,
        limit: usize,
        offset: usize,
    ) -> SourceResult<Vec<CandidatePlayer>> {
        info!("Fetching players {}–{}...", offset + 1, offset + limit);

        let sparql = query.to_sparql(limit, offset);
        let response = self.run_sparql(&sparql, self.config.bulk_timeout()).await?;

        Ok(response.results.bindings.iter().filter_map(candidate_from_binding).collect())
    }
}
