use career_timeline::normalizer::parse_count;
use career_timeline::{DifficultyLevel, RawStint};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Nationality recorded when the source has none
pub const UNKNOWN_NATIONALITY: &str = "Unknown";

/// A player considered for the quiz pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePlayer {
    pub name: String,
    pub nationality: String,
    /// Number of Wikipedia sitelinks, used as a popularity proxy
    pub popularity: u64,
}

impl CandidatePlayer {
    pub fn new(name: impl Into<String>, nationality: impl Into<String>, popularity: u64) -> Self {
        Self { name: name.into(), nationality: nationality.into(), popularity }
    }
}

/// Constraints for the bulk candidate query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateQuery {
    /// Occupation item (Q937857 = association football player)
    pub occupation: String,

    /// Leagues a club of the player must belong to
    pub leagues: Vec<String>,

    /// Only players with an English Wikipedia article
    pub require_english_article: bool,

    /// Label language
    pub language: String,
}

impl Default for CandidateQuery {
    fn default() -> Self {
        Self {
            occupation: "Q937857".to_string(),
            // UEFA CL, Premier League, La Liga, Serie A, Bundesliga, Ligue 1
            leagues: ["Q9448", "Q324867", "Q32495", "Q15804", "Q1478437", "Q82595"]
                .iter()
                .map(|id| id.to_string())
                .collect(),
            require_english_article: true,
            language: "en".to_string(),
        }
    }
}

impl CandidateQuery {
    /// Render one page of the query, most-linked players first
    pub fn to_sparql(&self, limit: usize, offset: usize) -> String {
        let leagues = self
            .leagues
            .iter()
            .map(|id| format!("wd:{id}"))
            .collect::<Vec<_>>()
            .join(" ");

        let article = if self.require_english_article {
            "  ?article schema:about ?player;\n           schema:isPartOf <https://en.wikipedia.org/>.\n"
        } else {
            ""
        };

        format!(
            r#"SELECT ?player ?playerLabel ?nationalityLabel ?sitelinks WHERE {{
  ?player wdt:P106 wd:{occupation};
          wdt:P54 ?team;
          wdt:P27 ?nationality;
          wikibase:sitelinks ?sitelinks.
  ?team wdt:P118 ?league.
  VALUES ?league {{ {leagues} }}
{article}  SERVICE wikibase:label {{ bd:serviceParam wikibase:language "{language}". }}
}}
ORDER BY DESC(?sitelinks)
LIMIT {limit}
OFFSET {offset}
"#,
            occupation = self.occupation,
            language = self.language,
        )
    }
}

/// `wbsearchentities` response
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
pub struct SearchHit {
    pub id: String,
}

/// SPARQL JSON results envelope
#[derive(Debug, Default, Deserialize)]
pub struct SparqlResponse {
    #[serde(default)]
    pub results: SparqlResults,
}

#[derive(Debug, Default, Deserialize)]
pub struct SparqlResults {
    #[serde(default)]
    pub bindings: Vec<Binding>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SparqlValue {
    #[serde(default)]
    pub value: String,
}

/// One result row, keyed by variable name
pub type Binding = HashMap<String, SparqlValue>;

fn binding_value<'a>(binding: &'a Binding, key: &str) -> Option<&'a str> {
    binding.get(key).map(|v| v.value.as_str())
}

/// Convert a career query row into a raw stint. Missing fields stay empty.
pub fn stint_from_binding(binding: &Binding) -> RawStint {
    RawStint {
        club_name: binding_value(binding, "clubLabel").unwrap_or_default().to_string(),
        start_date: binding_value(binding, "start").map(str::to_string),
        end_date: binding_value(binding, "end").map(str::to_string),
        appearances: binding_value(binding, "apps").and_then(parse_count),
        goals: binding_value(binding, "goals").and_then(parse_count),
    }
}

/// Convert a candidate query row; rows without a name are dropped
pub fn candidate_from_binding(binding: &Binding) -> Option<CandidatePlayer> {
    let name = binding_value(binding, "playerLabel").filter(|name| !name.is_empty())?;
    let nationality = binding_value(binding, "nationalityLabel").unwrap_or(UNKNOWN_NATIONALITY);
    let popularity =
        binding_value(binding, "sitelinks").and_then(|v| v.trim().parse().ok()).unwrap_or(0);

    Some(CandidatePlayer::new(name, nationality, popularity))
}

/// Outcome of one player's pipeline run
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    /// Career record written
    Saved {
        name: String,
        id: String,
        path: PathBuf,
        stints: usize,
        level: DifficultyLevel,
        timestamp: DateTime<Utc>,
    },

    /// Name did not resolve to an entity
    Unresolved {
        name: String,
        timestamp: DateTime<Utc>,
    },

    /// Record built but could not be written
    WriteFailed {
        name: String,
        id: String,
        error: String,
        timestamp: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_bindings(json: &str) -> Vec<Binding> {
        serde_json::from_str::<SparqlResponse>(json).unwrap().results.bindings
    }

    #[test]
    fn test_stint_from_binding() {
        let bindings = parse_bindings(
            r#"{"head": {"vars": []}, "results": {"bindings": [
                {"clubLabel": {"type": "literal", "value": "Sporting CP"},
                 "start": {"type": "literal", "value": "2002-08-01T00:00:00Z"},
                 "apps": {"type": "literal", "value": "25"},
                 "goals": {"type": "literal", "value": "3"}},
                {"start": {"value": "2003-01-01T00:00:00Z"}, "apps": {"value": "lots"}}
            ]}}"#,
        );

        let first = stint_from_binding(&bindings[0]);
        assert_eq!(first.club_name, "Sporting CP");
        assert_eq!(first.start_date.as_deref(), Some("2002-08-01T00:00:00Z"));
        assert_eq!(first.end_date, None);
        assert_eq!(first.appearances, Some(25));
        assert_eq!(first.goals, Some(3));

        let second = stint_from_binding(&bindings[1]);
        assert_eq!(second.club_name, "");
        assert_eq!(second.appearances, None);
    }

    #[test]
    fn test_candidate_from_binding_defaults() {
        let bindings = parse_bindings(
            r#"{"results": {"bindings": [
                {"playerLabel": {"value": "Lionel Messi"}, "nationalityLabel": {"value": "Argentina"}, "sitelinks": {"value": "180"}},
                {"playerLabel": {"value": "Mystery Man"}},
                {"nationalityLabel": {"value": "France"}, "sitelinks": {"value": "3"}}
            ]}}"#,
        );

        let candidates: Vec<_> = bindings.iter().filter_map(candidate_from_binding).collect();
        assert_eq!(
            candidates,
            vec![
                CandidatePlayer::new("Lionel Messi", "Argentina", 180),
                CandidatePlayer::new("Mystery Man", UNKNOWN_NATIONALITY, 0),
            ]
        );
    }

    #[test]
    fn test_missing_results_is_empty() {
        let response: SparqlResponse = serde_json::from_str("{}").unwrap();
        assert!(response.results.bindings.is_empty());

        let search: SearchResponse = serde_json::from_str(r#"{"searchinfo": {}}"#).unwrap();
        assert!(search.search.is_empty());
    }

    #[test]
    fn test_candidate_query_rendering() {
        let query = CandidateQuery::default().to_sparql(250, 500);
        assert!(query.contains("wdt:P106 wd:Q937857"));
        assert!(query.contains("VALUES ?league { wd:Q9448 wd:Q324867"));
        assert!(query.contains("schema:isPartOf <https://en.wikipedia.org/>"));
        assert!(query.contains("LIMIT 250"));
        assert!(query.contains("OFFSET 500"));

        let bare = CandidateQuery { require_english_article: false, ..CandidateQuery::default() };
        assert!(!bare.to_sparql(1, 0).contains("schema:about"));
    }
}
