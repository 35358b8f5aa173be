//! Scripted engine for unit tests.

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
};

use serde_json::json;
use sift_query::{AggregationSpec, CompiledQuery, Suggestions, TermBucket};

use crate::{BulkDocument, BulkSummary, EngineError, EngineResponse, Hit, SearchEngine};

/// Replays scripted search responses and records every request it receives.
#[derive(Default)]
pub struct FakeEngine {
    /// Remaining search responses, in order.
    responses: RefCell<VecDeque<Result<EngineResponse, EngineError>>>,
    /// Buckets returned by every aggregation.
    buckets: Vec<TermBucket>,
    /// Compiled queries received.
    queries: RefCell<Vec<CompiledQuery>>,
    /// Indices searched or aggregated, in order.
    indices: RefCell<Vec<String>>,
    /// Aggregations received.
    aggregations: RefCell<Vec<AggregationSpec>>,
    /// Bulk batches received.
    bulks: RefCell<Vec<Vec<BulkDocument>>>,
    /// Search calls made.
    calls: Cell<usize>,
}

impl FakeEngine {
    /// Creates an engine answering searches with `responses` in order.
    pub fn new(responses: Vec<Result<EngineResponse, EngineError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            ..Self::default()
        }
    }

    /// Creates an engine answering every aggregation with `buckets`.
    pub fn with_buckets(buckets: Vec<TermBucket>) -> Self {
        Self {
            buckets,
            ..Self::default()
        }
    }

    /// Number of searches executed.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Queries received, in order.
    pub fn queries(&self) -> Vec<CompiledQuery> {
        self.queries.borrow().clone()
    }

    /// Indices addressed, in order.
    pub fn indices(&self) -> Vec<String> {
        self.indices.borrow().clone()
    }

    /// Aggregations received, in order.
    pub fn aggregations(&self) -> Vec<AggregationSpec> {
        self.aggregations.borrow().clone()
    }

    /// Bulk batches received, in order.
    pub fn bulks(&self) -> Vec<Vec<BulkDocument>> {
        self.bulks.borrow().clone()
    }
}

impl SearchEngine for FakeEngine {
    fn search(&self, index: &str, query: &CompiledQuery) -> Result<EngineResponse, EngineError> {
        self.calls.set(self.calls.get() + 1);
        self.indices.borrow_mut().push(index.to_string());
        self.queries.borrow_mut().push(query.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(EngineResponse::default()))
    }

    fn aggregate(
        &self,
        index: &str,
        spec: &AggregationSpec,
    ) -> Result<Vec<TermBucket>, EngineError> {
        self.indices.borrow_mut().push(index.to_string());
        self.aggregations.borrow_mut().push(spec.clone());
        Ok(self.buckets.clone())
    }

    fn bulk_index(
        &self,
        index: &str,
        documents: &[BulkDocument],
    ) -> Result<BulkSummary, EngineError> {
        self.indices.borrow_mut().push(index.to_string());
        self.bulks.borrow_mut().push(documents.to_vec());
        Ok(BulkSummary {
            indexed: documents.len(),
            failed: 0,
        })
    }
}

/// A response with `n` hits and a matching total.
pub fn hits(n: usize) -> EngineResponse {
    EngineResponse {
        hits: (0..n)
            .map(|i| Hit {
                id: format!("doc-{i}"),
                score: Some(1.0),
                source: json!({ "n": i }),
            })
            .collect(),
        total: n as u64,
        suggestions: Suggestions::new(),
    }
}

/// A zero-hit response carrying `entries` as suggestions.
pub fn suggesting(entries: &[(&str, &[&str])]) -> EngineResponse {
    EngineResponse {
        suggestions: entries
            .iter()
            .map(|(field, candidates)| {
                (
                    (*field).to_string(),
                    candidates.iter().map(|c| (*c).to_string()).collect(),
                )
            })
            .collect(),
        ..EngineResponse::default()
    }
}

/// A bucket with the given key and count.
pub fn bucket(key: &str, doc_count: u64) -> TermBucket {
    TermBucket {
        key: key.to_string(),
        doc_count,
        score: None,
        bg_count: None,
    }
}
