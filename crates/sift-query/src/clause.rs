//! Atomic query clauses and the field clause builder.
//!
//! A [`Clause`] is one condition against one field. Clauses are built from caller values
//! by [`build_clause`], [`threshold_clause`], [`prefix_clause`] and [`date_range_clause`];
//! each returns `None` when the value is absent so that missing filters contribute nothing.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value, json};

use crate::{DateRange, TextMatchMode};

/// Marker every hashtag token starts with.
pub const HASHTAG_MARKER: char = '#';

/// One end of a range clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeBound {
    /// A numeric threshold.
    Count(i64),
    /// A calendar day.
    Date(NaiveDate),
    /// A precise point in time.
    Instant(DateTime<Utc>),
    /// The engine's current time.
    Now,
}

impl RangeBound {
    /// Renders the bound as the engine expects it.
    fn to_json(&self) -> Value {
        match self {
            Self::Count(n) => json!(n),
            Self::Date(day) => json!(day.format("%Y-%m-%d").to_string()),
            Self::Instant(at) => json!(at.to_rfc3339()),
            Self::Now => json!("now"),
        }
    }
}

/// A single condition against one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// Relevance match: at least one token must be present.
    Match {
        /// Target field.
        field: &'static str,
        /// Query text.
        query: String,
    },
    /// Every token must be present.
    MatchAll {
        /// Target field.
        field: &'static str,
        /// Query text.
        query: String,
    },
    /// Tokens must appear contiguously and in order.
    MatchPhrase {
        /// Target field.
        field: &'static str,
        /// Query text.
        query: String,
    },
    /// The field value must start with `value`.
    Prefix {
        /// Target field.
        field: &'static str,
        /// Required prefix.
        value: String,
    },
    /// The field value must fall inside the bounds.
    Range {
        /// Target field.
        field: &'static str,
        /// Inclusive lower bound.
        gte: Option<RangeBound>,
        /// Inclusive upper bound.
        lte: Option<RangeBound>,
    },
}

impl Clause {
    /// Returns the field this clause targets.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Match { field, .. }
            | Self::MatchAll { field, .. }
            | Self::MatchPhrase { field, .. }
            | Self::Prefix { field, .. }
            | Self::Range { field, .. } => field,
        }
    }

    /// Returns the query text for text clauses.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Match { query, .. }
            | Self::MatchAll { query, .. }
            | Self::MatchPhrase { query, .. } => Some(query),
            Self::Prefix { .. } | Self::Range { .. } => None,
        }
    }

    /// Renders the clause in the engine's query DSL.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Match { field, query } => keyed("match", field, json!({ "query": query })),
            Self::MatchAll { field, query } => keyed(
                "match",
                field,
                json!({ "query": query, "operator": "and" }),
            ),
            Self::MatchPhrase { field, query } => {
                keyed("match_phrase", field, json!({ "query": query }))
            }
            Self::Prefix { field, value } => keyed("prefix", field, json!({ "value": value })),
            Self::Range { field, gte, lte } => {
                let mut bounds = Map::new();
                if let Some(gte) = gte {
                    bounds.insert("gte".into(), gte.to_json());
                }
                if let Some(lte) = lte {
                    bounds.insert("lte".into(), lte.to_json());
                }
                keyed("range", field, Value::Object(bounds))
            }
        }
    }
}

/// Wraps `body` as `{ kind: { field: body } }`.
fn keyed(kind: &str, field: &str, body: Value) -> Value {
    let mut inner = Map::new();
    inner.insert(field.to_string(), body);
    let mut outer = Map::new();
    outer.insert(kind.to_string(), Value::Object(inner));
    Value::Object(outer)
}

/// Builds a text clause for `field` under the given match discipline.
///
/// Returns `None` when `value` is empty or whitespace.
pub fn build_clause(field: &'static str, value: &str, mode: TextMatchMode) -> Option<Clause> {
    if value.trim().is_empty() {
        return None;
    }
    let query = value.to_string();
    Some(match mode {
        TextMatchMode::ExactPhrase => Clause::MatchPhrase { field, query },
        TextMatchMode::AllWords => Clause::MatchAll { field, query },
        TextMatchMode::Hashtags => Clause::Match {
            field,
            query: hashtagify(value),
        },
        TextMatchMode::AnyWords | TextMatchMode::NoneOfWords => Clause::Match { field, query },
    })
}

/// Prefixes every whitespace-separated token with the hashtag marker, once.
///
/// Tokens that already carry the marker are left untouched, so the function is idempotent.
pub fn hashtagify(text: &str) -> String {
    text.split_whitespace()
        .map(|token| {
            if token.starts_with(HASHTAG_MARKER) {
                token.to_string()
            } else {
                format!("{HASHTAG_MARKER}{token}")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds a `>=` range clause for a numeric minimum.
///
/// A missing, zero or negative threshold means "no filter".
pub fn threshold_clause(field: &'static str, threshold: Option<i64>) -> Option<Clause> {
    let minimum = threshold.filter(|value| *value > 0)?;
    Some(Clause::Range {
        field,
        gte: Some(RangeBound::Count(minimum)),
        lte: None,
    })
}

/// Builds a prefix filter, or `None` for an empty prefix.
pub fn prefix_clause(field: &'static str, value: &str) -> Option<Clause> {
    if value.is_empty() {
        return None;
    }
    Some(Clause::Prefix {
        field,
        value: value.to_string(),
    })
}

/// Builds an inclusive day-window filter, or `None` when neither bound is set.
pub fn date_range_clause(field: &'static str, range: DateRange) -> Option<Clause> {
    if range.is_empty() {
        return None;
    }
    Some(Clause::Range {
        field,
        gte: range.from.map(RangeBound::Date),
        lte: range.to.map(RangeBound::Date),
    })
}
