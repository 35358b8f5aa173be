//! Caller-facing search results.

use serde::Serialize;
use serde_json::Value;
use sift_query::EntityRequest;

use crate::{EngineResponse, Outcome};

/// One page of matched documents and the request that found them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult<Q> {
    /// Requested page, 1-based.
    pub page: u32,
    /// Documents on this page; may be fewer than the requested page size.
    pub size: usize,
    /// Matches across all pages.
    pub total_count: u64,
    /// Stored documents, in engine order.
    pub data: Vec<Value>,
    /// Effective request, including any corrections applied by relaxation.
    pub query: Q,
    /// Whether `query` is a relaxed copy of the caller's request.
    pub relaxed: bool,
}

impl<Q> SearchResult<Q> {
    /// Builds a result page from an engine response.
    pub fn assemble(response: EngineResponse, page: u32, query: Q, relaxed: bool) -> Self {
        let data: Vec<Value> = response.hits.into_iter().map(|hit| hit.source).collect();
        Self {
            page,
            size: data.len(),
            total_count: response.total,
            data,
            query,
            relaxed,
        }
    }

    /// Replaces the echoed request.
    pub fn map_query<T>(self, f: impl FnOnce(Q) -> T) -> SearchResult<T> {
        SearchResult {
            page: self.page,
            size: self.size,
            total_count: self.total_count,
            data: self.data,
            query: f(self.query),
            relaxed: self.relaxed,
        }
    }
}

impl<R: EntityRequest> From<Outcome<R>> for SearchResult<R> {
    fn from(outcome: Outcome<R>) -> Self {
        let relaxed = outcome.relaxed();
        let page = outcome.request.pagination().page();
        Self::assemble(outcome.response, page, outcome.request, relaxed)
    }
}
