//! The search engine seam.

use sift_query::{AggregationSpec, CompiledQuery, TermBucket};

use crate::{BulkDocument, BulkSummary, EngineError, EngineResponse};

/// A full-text search engine reachable by index name.
///
/// Implementations perform exactly one round trip per call and report transport problems
/// as [`EngineError`] without retrying.
pub trait SearchEngine {
    /// Runs a compiled query against `index`.
    fn search(&self, index: &str, query: &CompiledQuery) -> Result<EngineResponse, EngineError>;

    /// Runs an aggregation against `index` and returns its buckets in engine order.
    fn aggregate(
        &self,
        index: &str,
        spec: &AggregationSpec,
    ) -> Result<Vec<TermBucket>, EngineError>;

    /// Writes `documents` into `index`, replacing documents with the same id.
    fn bulk_index(
        &self,
        index: &str,
        documents: &[BulkDocument],
    ) -> Result<BulkSummary, EngineError>;
}

impl<E: SearchEngine + ?Sized> SearchEngine for &E {
    fn search(&self, index: &str, query: &CompiledQuery) -> Result<EngineResponse, EngineError> {
        (**self).search(index, query)
    }

    fn aggregate(
        &self,
        index: &str,
        spec: &AggregationSpec,
    ) -> Result<Vec<TermBucket>, EngineError> {
        (**self).aggregate(index, spec)
    }

    fn bulk_index(
        &self,
        index: &str,
        documents: &[BulkDocument],
    ) -> Result<BulkSummary, EngineError> {
        (**self).bulk_index(index, documents)
    }
}
