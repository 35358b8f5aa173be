//! Aggregation requests for the read-only reports.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::{Clause, RangeBound};

/// Field whose significant terms make up the trend report.
pub const TREND_FIELD: &str = "count";

/// Field holding the ingestion time of content documents.
pub const INGESTED_AT_FIELD: &str = "ingested_at";

/// Keyword field holding the application identifier of publications.
pub const APP_ID_FIELD: &str = "appId.keyword";

/// Minimum documents a term must appear in to count as trending.
pub const TREND_MIN_DOC_COUNT: u32 = 3;

/// The aggregation to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregationKind {
    /// Most frequent values of a keyword field.
    Terms {
        /// Aggregated field.
        field: &'static str,
        /// Maximum buckets.
        size: u32,
    },
    /// Terms unusually frequent in the filtered set relative to the whole index.
    SignificantText {
        /// Aggregated field.
        field: &'static str,
        /// Maximum buckets.
        size: u32,
        /// Minimum supporting documents per bucket.
        min_doc_count: u32,
    },
}

/// A named aggregation over an optionally filtered document set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationSpec {
    /// Aggregation name; buckets are read back under it.
    pub name: &'static str,
    /// What to aggregate.
    pub kind: AggregationKind,
    /// Documents considered; empty means all.
    pub filter: Vec<Clause>,
}

impl AggregationSpec {
    /// Significant terms among content ingested in the `days_back` days before `now`.
    pub fn trending(size: u32, days_back: u32, now: DateTime<Utc>) -> Self {
        let since = now
            .checked_sub_signed(Duration::days(i64::from(days_back)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self {
            name: "trends",
            kind: AggregationKind::SignificantText {
                field: TREND_FIELD,
                size,
                min_doc_count: TREND_MIN_DOC_COUNT,
            },
            filter: vec![Clause::Range {
                field: INGESTED_AT_FIELD,
                gte: Some(RangeBound::Instant(since)),
                lte: Some(RangeBound::Now),
            }],
        }
    }

    /// The `size` most common application identifiers.
    pub fn app_ids(size: u32) -> Self {
        Self {
            name: "app-ids",
            kind: AggregationKind::Terms {
                field: APP_ID_FIELD,
                size,
            },
            filter: Vec::new(),
        }
    }

    /// Renders the request body. No hits are requested.
    pub fn to_body(&self) -> Value {
        let aggregation = match &self.kind {
            AggregationKind::Terms { field, size } => {
                json!({ "terms": { "field": field, "size": size } })
            }
            AggregationKind::SignificantText {
                field,
                size,
                min_doc_count,
            } => json!({
                "significant_text": {
                    "field": field,
                    "min_doc_count": min_doc_count,
                    "size": size,
                }
            }),
        };
        let mut aggs = Map::new();
        aggs.insert(self.name.to_string(), aggregation);

        let mut body = Map::new();
        if !self.filter.is_empty() {
            let must: Vec<Value> = self.filter.iter().map(Clause::to_json).collect();
            body.insert("query".into(), json!({ "bool": { "must": must } }));
        }
        body.insert("size".into(), json!(0));
        body.insert("aggs".into(), Value::Object(aggs));
        Value::Object(body)
    }
}

/// One aggregation bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermBucket {
    /// Bucket term.
    pub key: String,
    /// Documents in the bucket.
    pub doc_count: u64,
    /// Significance score, for significant-text buckets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Background frequency, for significant-text buckets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_count: Option<u64>,
}

impl TermBucket {
    /// Returns true when the key starts with an alphabetic character.
    pub fn is_alphabetic_key(&self) -> bool {
        self.key.chars().next().is_some_and(char::is_alphabetic)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn trending_window_and_body() {
        let now = Utc.with_ymd_and_hms(2022, 7, 3, 12, 0, 0).unwrap();
        let body = AggregationSpec::trending(20, 2, now).to_body();
        assert_eq!(body["size"], 0);
        assert_eq!(
            body["aggs"]["trends"],
            json!({ "significant_text": { "field": "count", "min_doc_count": 3, "size": 20 } })
        );
        assert_eq!(
            body["query"]["bool"]["must"][0],
            json!({ "range": { "ingested_at": {
                "gte": "2022-07-01T12:00:00+00:00",
                "lte": "now"
            } } })
        );
    }

    #[test]
    fn app_ids_has_no_filter() {
        let body = AggregationSpec::app_ids(5).to_body();
        assert!(body.get("query").is_none());
        assert_eq!(
            body["aggs"]["app-ids"],
            json!({ "terms": { "field": "appId.keyword", "size": 5 } })
        );
    }

    #[test]
    fn alphabetic_key_filter() {
        let bucket = |key: &str| TermBucket {
            key: key.into(),
            doc_count: 1,
            score: None,
            bg_count: None,
        };
        assert!(bucket("lens").is_alphabetic_key());
        assert!(bucket("émoji").is_alphabetic_key());
        assert!(!bucket("2022").is_alphabetic_key());
        assert!(!bucket("#gm").is_alphabetic_key());
        assert!(!bucket("").is_alphabetic_key());
    }
}
