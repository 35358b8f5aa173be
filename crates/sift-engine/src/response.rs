//! Decoding of engine responses.
//!
//! Bodies that do not have the expected shape are reported as
//! [`EngineError::MalformedResponse`] rather than being read as empty results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sift_query::{Suggestions, TermBucket};

use crate::EngineError;

/// One matched document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hit {
    /// Document id.
    pub id: String,
    /// Relevance score; absent when an explicit sort was applied.
    pub score: Option<f64>,
    /// Stored document.
    pub source: Value,
}

/// The decoded answer to a search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineResponse {
    /// Matched documents of the requested page, in engine order.
    pub hits: Vec<Hit>,
    /// Total matches across all pages.
    pub total: u64,
    /// Spelling candidates per field.
    pub suggestions: Suggestions,
}

impl EngineResponse {
    /// Decodes a `_search` response body.
    pub fn from_json(body: &str) -> Result<Self, EngineError> {
        let raw: RawSearch = decode(body)?;
        let hits = raw
            .hits
            .hits
            .into_iter()
            .map(|hit| Hit {
                id: hit.id,
                score: hit.score,
                source: hit.source,
            })
            .collect();
        let suggestions = raw
            .suggest
            .into_iter()
            .map(|(field, entries)| {
                let candidates = entries
                    .into_iter()
                    .next()
                    .map(|entry| entry.options.into_iter().map(|o| o.text).collect())
                    .unwrap_or_default();
                (field, candidates)
            })
            .collect();
        Ok(Self {
            hits,
            total: raw.hits.total.value(),
            suggestions,
        })
    }

    /// Returns true when nothing matched.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// A document to be written by a bulk request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkDocument {
    /// Document id.
    pub id: String,
    /// Document body.
    pub source: Value,
}

/// Outcome of a bulk request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BulkSummary {
    /// Documents written.
    pub indexed: usize,
    /// Documents the engine rejected.
    pub failed: usize,
}

impl BulkSummary {
    /// Decodes a `_bulk` response body.
    pub fn from_json(body: &str) -> Result<Self, EngineError> {
        let raw: RawBulk = decode(body)?;
        let mut summary = Self::default();
        for item in raw.items {
            let accepted = item
                .into_values()
                .next()
                .is_some_and(|result| (200..300).contains(&result.status));
            if accepted {
                summary.indexed += 1;
            } else {
                summary.failed += 1;
            }
        }
        Ok(summary)
    }
}

/// Decodes the buckets of the aggregation called `name` from a `_search` response body.
pub fn decode_buckets(body: &str, name: &str) -> Result<Vec<TermBucket>, EngineError> {
    let mut raw: RawAggregations = decode(body)?;
    raw.aggregations
        .remove(name)
        .map(|aggregation| aggregation.buckets)
        .ok_or_else(|| EngineError::MalformedResponse(format!("missing aggregation '{name}'")))
}

/// Deserializes `body`, mapping failures to [`EngineError::MalformedResponse`].
fn decode<'de, T: Deserialize<'de>>(body: &'de str) -> Result<T, EngineError> {
    serde_json::from_str(body).map_err(|e| EngineError::MalformedResponse(e.to_string()))
}

/// Top level of a search response.
#[derive(Deserialize)]
struct RawSearch {
    /// Hit section.
    hits: RawHits,
    /// Suggest section, keyed by field.
    #[serde(default)]
    suggest: HashMap<String, Vec<RawSuggestEntry>>,
}

/// Hit section of a search response.
#[derive(Deserialize)]
struct RawHits {
    /// Total matches.
    total: RawTotal,
    /// Page of hits.
    #[serde(default)]
    hits: Vec<RawHit>,
}

/// Total hits, as a bare count or as an object with a relation.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTotal {
    /// Legacy bare count.
    Count(u64),
    /// `{ "value": n, "relation": "eq" }`.
    Object {
        /// Count.
        value: u64,
    },
}

impl RawTotal {
    /// The count, whatever the encoding.
    fn value(&self) -> u64 {
        match self {
            Self::Count(value) | Self::Object { value } => *value,
        }
    }
}

/// One hit.
#[derive(Deserialize)]
struct RawHit {
    /// Document id.
    #[serde(rename = "_id")]
    id: String,
    /// Score, null under explicit sorts.
    #[serde(rename = "_score")]
    score: Option<f64>,
    /// Stored document.
    #[serde(rename = "_source")]
    source: Value,
}

/// One analyzed token of a term suggestion.
#[derive(Deserialize)]
struct RawSuggestEntry {
    /// Ranked candidates.
    #[serde(default)]
    options: Vec<RawSuggestOption>,
}

/// One suggestion candidate.
#[derive(Deserialize)]
struct RawSuggestOption {
    /// Candidate term.
    text: String,
}

/// Aggregation section of a search response.
#[derive(Deserialize)]
struct RawAggregations {
    /// Aggregations by name.
    #[serde(default)]
    aggregations: HashMap<String, RawBuckets>,
}

/// Bucket list of a single aggregation.
#[derive(Deserialize)]
struct RawBuckets {
    /// Buckets in engine order.
    buckets: Vec<TermBucket>,
}

/// Bulk response.
#[derive(Deserialize)]
struct RawBulk {
    /// Per-document results, keyed by action.
    items: Vec<HashMap<String, RawBulkItem>>,
}

/// Result of one bulk action.
#[derive(Deserialize)]
struct RawBulkItem {
    /// HTTP status of the action.
    status: u16,
}
